use services::{QuizProgress, QuizSession};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub text: String,
    pub selected: bool,
}

/// The question screen, derived from a live session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub answered_label: String,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub primary_label: &'static str,
    pub submitting: bool,
}

/// `None` outside the question stage.
#[must_use]
pub fn question_vm(session: &QuizSession) -> Option<QuestionVm> {
    let item = session.current_item()?;
    let choice = session.state().current_choice();
    let progress = QuizProgress::of(session);
    Some(QuestionVm {
        progress_label: session.progress_label(),
        answered_label: format!("{} of {} answered", progress.answered, progress.total),
        question: item.question.clone(),
        options: item
            .options
            .iter()
            .map(|option| OptionVm {
                text: option.clone(),
                selected: choice == Some(option.as_str()),
            })
            .collect(),
        primary_label: session.primary_label(),
        submitting: session.is_submitting(),
    })
}

#[cfg(test)]
mod tests {
    use reading_core::model::{Passage, QuizItem, ReadingSession};
    use reading_core::quiz::QuizEvent;
    use reading_core::time::fixed_clock;

    use super::*;

    fn session() -> QuizSession {
        let options = || vec!["A) up".to_string(), "B) down".to_string()];
        let reading = ReadingSession::new(
            "2025-01-01",
            Passage::new("Kites", "Kites fly up.", Vec::new()),
            vec![
                QuizItem::new("Where do kites fly?", options(), 'A'),
                QuizItem::new("Where does rain fall?", options(), 'B'),
            ],
        )
        .unwrap();
        QuizSession::new(reading, fixed_clock())
    }

    #[test]
    fn passage_stage_has_no_question() {
        assert!(question_vm(&session()).is_none());
    }

    #[test]
    fn selection_and_labels_follow_the_session() {
        let mut session = session();
        session.dispatch(QuizEvent::Next);
        session.dispatch(QuizEvent::Select("B) down".into()));

        let vm = question_vm(&session).unwrap();
        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert_eq!(vm.answered_label, "1 of 2 answered");
        assert!(!vm.options[0].selected);
        assert!(vm.options[1].selected);
        assert_eq!(vm.primary_label, "Next");

        session.dispatch(QuizEvent::Next);
        let vm = question_vm(&session).unwrap();
        assert_eq!(vm.primary_label, "Submit");
        assert!(vm.options.iter().all(|option| !option.selected));
    }
}
