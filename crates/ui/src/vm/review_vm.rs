use reading_core::model::{AnswerLedger, QuizItem};
use reading_core::scorer::{self, OptionMark, ReviewFilter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewOptionVm {
    pub text: String,
    pub mark: OptionMark,
}

impl ReviewOptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.mark {
            OptionMark::CorrectPick => "review-option review-option--correct review-option--picked",
            OptionMark::Correct => "review-option review-option--correct",
            OptionMark::WrongPick => "review-option review-option--wrong review-option--picked",
            OptionMark::Plain => "review-option",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewQuestionVm {
    /// 1-based.
    pub number: usize,
    pub question: String,
    pub options: Vec<ReviewOptionVm>,
    pub answered: bool,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub correct_count: u32,
    pub total: u32,
    pub percent: u8,
    pub questions: Vec<ReviewQuestionVm>,
}

impl ReviewVm {
    pub fn visible(&self, filter: ReviewFilter) -> impl Iterator<Item = &ReviewQuestionVm> {
        self.questions.iter().filter(move |question| match filter {
            ReviewFilter::All => true,
            ReviewFilter::IncorrectOnly => !question.is_correct,
        })
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_correct).count()
    }
}

/// Score `ledger` against `quiz` and lay out every option with its mark.
#[must_use]
pub fn build_review(quiz: &[QuizItem], ledger: &AnswerLedger) -> ReviewVm {
    let report = scorer::score(ledger, quiz);
    let questions = quiz
        .iter()
        .zip(&report.per_question)
        .map(|(item, outcome)| ReviewQuestionVm {
            number: outcome.index + 1,
            question: item.question.clone(),
            options: item
                .options
                .iter()
                .map(|option| ReviewOptionVm {
                    text: option.clone(),
                    mark: scorer::option_mark(item, option, outcome.user_choice),
                })
                .collect(),
            answered: outcome.user_choice.is_some(),
            is_correct: outcome.is_correct,
        })
        .collect();

    ReviewVm {
        correct_count: report.correct_count,
        total: report.total,
        percent: report.percent(),
        questions,
    }
}
