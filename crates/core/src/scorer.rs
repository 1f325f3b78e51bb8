use crate::model::{AnswerLedger, QuizItem, option_code};

/// Correctness of one question in a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub index: usize,
    /// Code of the option the user picked, `None` when unanswered.
    pub user_choice: Option<char>,
    pub is_correct: bool,
}

/// Score plus per-question breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct_count: u32,
    pub total: u32,
    pub per_question: Vec<QuestionOutcome>,
}

impl ScoreReport {
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.correct_count, self.total)
    }

    /// Outcomes visible under `filter`. Stored data is never modified.
    pub fn visible(&self, filter: ReviewFilter) -> impl Iterator<Item = &QuestionOutcome> {
        self.per_question
            .iter()
            .filter(move |outcome| filter.includes(outcome))
    }
}

/// "All" / "Incorrect only" toggle on the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewFilter {
    #[default]
    All,
    IncorrectOnly,
}

impl ReviewFilter {
    #[must_use]
    pub fn includes(self, outcome: &QuestionOutcome) -> bool {
        match self {
            Self::All => true,
            Self::IncorrectOnly => !outcome.is_correct,
        }
    }
}

/// How an option is highlighted in the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    /// The correct option, picked by the user.
    CorrectPick,
    /// The correct option, not picked.
    Correct,
    /// The user's pick, and it is wrong.
    WrongPick,
    Plain,
}

/// Score every question in `quiz` against `ledger`.
#[must_use]
pub fn score(ledger: &AnswerLedger, quiz: &[QuizItem]) -> ScoreReport {
    let per_question: Vec<QuestionOutcome> = quiz
        .iter()
        .enumerate()
        .map(|(index, item)| QuestionOutcome {
            index,
            user_choice: ledger.get(index).and_then(|entry| entry.code()),
            is_correct: ledger.is_correct(index, item),
        })
        .collect();

    let correct = per_question.iter().filter(|outcome| outcome.is_correct).count();
    ScoreReport {
        correct_count: u32::try_from(correct).unwrap_or(u32::MAX),
        total: u32::try_from(quiz.len()).unwrap_or(u32::MAX),
        per_question,
    }
}

/// Rounded percentage clamped to `0..=100`; zero when `total` is zero.
#[must_use]
pub fn percent(score: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = (f64::from(score) / f64::from(total)).clamp(0.0, 1.0);
    // Clamped above, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = (ratio * 100.0).round() as u8;
    value
}

/// Classify `option` of `item` given the user's pick.
#[must_use]
pub fn option_mark(item: &QuizItem, option: &str, user_choice: Option<char>) -> OptionMark {
    let code = option_code(option);
    let is_answer = code == Some(item.answer_key);
    let is_pick = code.is_some() && code == user_choice;
    match (is_answer, is_pick) {
        (true, true) => OptionMark::CorrectPick,
        (true, false) => OptionMark::Correct,
        (false, true) => OptionMark::WrongPick,
        (false, false) => OptionMark::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::item;

    fn sample() -> (Vec<QuizItem>, AnswerLedger) {
        let quiz = vec![item("one", 'A'), item("two", 'B'), item("three", 'C')];
        let ledger = AnswerLedger::from_submitted(["A) first", "C) third", "C) third"]);
        (quiz, ledger)
    }

    #[test]
    fn counts_matching_first_characters() {
        let (quiz, ledger) = sample();
        let report = score(&ledger, &quiz);

        assert_eq!(report.correct_count, 2);
        assert_eq!(report.total, 3);
        assert_eq!(
            report.per_question[1],
            QuestionOutcome {
                index: 1,
                user_choice: Some('C'),
                is_correct: false
            }
        );
    }

    #[test]
    fn unanswered_questions_are_incorrect() {
        let quiz = vec![item("one", 'A'), item("two", 'B')];
        let ledger = AnswerLedger::from_submitted([""]);
        let report = score(&ledger, &quiz);

        assert_eq!(report.correct_count, 0);
        assert!(report.per_question.iter().all(|o| o.user_choice.is_none()));
    }

    #[test]
    fn incorrect_only_filter_is_a_view() {
        let (quiz, ledger) = sample();
        let report = score(&ledger, &quiz);

        let visible: Vec<usize> = report
            .visible(ReviewFilter::IncorrectOnly)
            .map(|outcome| outcome.index)
            .collect();
        assert_eq!(visible, vec![1]);
        assert_eq!(report.visible(ReviewFilter::All).count(), 3);
        assert_eq!(report.per_question.len(), 3);
    }

    #[test]
    fn percent_rounds_and_clamps() {
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(5, 3), 100);
        assert_eq!(percent(1, 0), 0);
    }

    #[test]
    fn option_marks_highlight_answer_and_wrong_pick() {
        let question = item("two", 'B');
        assert_eq!(option_mark(&question, "B) second", Some('C')), OptionMark::Correct);
        assert_eq!(option_mark(&question, "C) third", Some('C')), OptionMark::WrongPick);
        assert_eq!(option_mark(&question, "B) second", Some('B')), OptionMark::CorrectPick);
        assert_eq!(option_mark(&question, "A) first", None), OptionMark::Plain);
    }
}
