use reading_core::quiz::SessionStage;

use super::workflow::QuizSession;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn of(session: &QuizSession) -> Self {
        let total = session.reading().question_count();
        let remaining = session.state().ledger().unanswered_indices(total).len();
        Self {
            total,
            answered: total - remaining,
            remaining,
            is_complete: session.stage() == SessionStage::Submitted,
        }
    }
}

#[cfg(test)]
mod tests {
    use reading_core::model::{Passage, QuizItem, ReadingSession};
    use reading_core::quiz::QuizEvent;
    use reading_core::time::fixed_clock;

    use super::*;

    #[test]
    fn counts_answered_questions() {
        let options = vec!["A) yes".to_string(), "B) no".to_string()];
        let reading = ReadingSession::new(
            "2025-01-01",
            Passage::default(),
            vec![
                QuizItem::new("One?", options.clone(), 'A'),
                QuizItem::new("Two?", options.clone(), 'B'),
                QuizItem::new("Three?", options, 'A'),
            ],
        )
        .unwrap();
        let mut session = QuizSession::new(reading, fixed_clock());
        session.dispatch(QuizEvent::Next);
        session.dispatch(QuizEvent::Select("A) yes".into()));
        session.dispatch(QuizEvent::Next);

        let progress = QuizProgress::of(&session);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.remaining, 2);
        assert!(!progress.is_complete);
    }
}
