use std::collections::BTreeMap;

use crate::model::reading::QuizItem;

/// What the user recorded for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    /// The user moved past the question without picking an option.
    Skipped,
    /// The full option text, e.g. `"B) a bird"`.
    Chosen(String),
}

impl LedgerEntry {
    /// Decode an entry from the answer list stored by the backend (`""` means skipped).
    #[must_use]
    pub fn from_submitted(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Skipped
        } else {
            Self::Chosen(raw.to_string())
        }
    }

    /// Wire form of the entry.
    #[must_use]
    pub fn as_submitted(&self) -> &str {
        match self {
            Self::Skipped => "",
            Self::Chosen(option) => option,
        }
    }

    /// Leading character of the chosen option.
    #[must_use]
    pub fn code(&self) -> Option<char> {
        match self {
            Self::Skipped => None,
            Self::Chosen(option) => option.chars().next(),
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Question index to recorded answer.
///
/// Mutation is crate-private: only the quiz state machine writes to a live ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLedger {
    entries: BTreeMap<usize, LedgerEntry>,
}

impl AnswerLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a stored answer list, indexed by position.
    pub fn from_submitted<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = answers
            .into_iter()
            .enumerate()
            .map(|(index, raw)| (index, LedgerEntry::from_submitted(raw.as_ref())))
            .collect();
        Self { entries }
    }

    pub(crate) fn choose(&mut self, index: usize, option: impl Into<String>) {
        self.entries.insert(index, LedgerEntry::Chosen(option.into()));
    }

    pub(crate) fn skip(&mut self, index: usize) {
        self.entries.insert(index, LedgerEntry::Skipped);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(&index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// The chosen option text, if any.
    #[must_use]
    pub fn chosen(&self, index: usize) -> Option<&str> {
        match self.entries.get(&index)? {
            LedgerEntry::Chosen(option) => Some(option),
            LedgerEntry::Skipped => None,
        }
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.chosen(index).is_some_and(|option| !option.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indices in `0..question_count` that were never visited or were skipped.
    #[must_use]
    pub fn unanswered_indices(&self, question_count: usize) -> Vec<usize> {
        (0..question_count)
            .filter(|index| !self.is_answered(*index))
            .collect()
    }

    #[must_use]
    pub fn first_unanswered(&self, question_count: usize) -> Option<usize> {
        (0..question_count).find(|index| !self.is_answered(*index))
    }

    /// True iff the entry is a non-empty choice whose first character is the answer key.
    #[must_use]
    pub fn is_correct(&self, index: usize, item: &QuizItem) -> bool {
        self.get(index)
            .and_then(LedgerEntry::code)
            .is_some_and(|code| code == item.answer_key)
    }

    /// Number of entries matching their question's answer key.
    #[must_use]
    pub fn score(&self, quiz: &[QuizItem]) -> u32 {
        let correct = self
            .entries
            .keys()
            .filter(|index| {
                quiz.get(**index)
                    .is_some_and(|item| self.is_correct(**index, item))
            })
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// One wire entry per question in index order; unanswered questions are `""`.
    #[must_use]
    pub fn submitted_answers(&self, question_count: usize) -> Vec<String> {
        (0..question_count)
            .map(|index| {
                self.get(index)
                    .map_or_else(String::new, |entry| entry.as_submitted().to_string())
            })
            .collect()
    }
}
