use std::collections::HashSet;

use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while validating a fetched reading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReadingError {
    #[error("reading has no quiz questions")]
    EmptyQuiz,

    #[error("question {question} has no options")]
    NoOptions { question: usize },

    #[error("question {question}, option {option} is missing a letter code")]
    MissingOptionCode { question: usize, option: usize },

    #[error("question {question} repeats option code {code}")]
    DuplicateOptionCode { question: usize, code: char },

    #[error("question {question} has an invalid answer key: {raw:?}")]
    InvalidAnswerKey { question: usize, raw: String },

    #[error("question {question} answer key {key} matches no option")]
    AnswerKeyMismatch { question: usize, key: char },
}

//
// ─── OPTION CODES ─────────────────────────────────────────────────────────────
//

/// Leading letter of an option such as `"A) a small dog"`.
#[must_use]
pub fn option_code(option: &str) -> Option<char> {
    option.chars().next().filter(char::is_ascii_alphabetic)
}

/// Parses a raw answer key (`"B"`) into its single-letter code.
#[must_use]
pub fn parse_answer_key(raw: &str) -> Option<char> {
    let mut chars = raw.trim().chars();
    let key = chars.next()?;
    if chars.next().is_some() || !key.is_ascii_alphabetic() {
        return None;
    }
    Some(key)
}

//
// ─── PASSAGE ──────────────────────────────────────────────────────────────────
//

/// The text the user reads before the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Passage {
    pub title: String,
    pub body: String,
    pub vocabulary: Vec<String>,
}

impl Passage {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, vocabulary: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            vocabulary,
        }
    }
}

//
// ─── QUIZ ITEM ────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub question: String,
    /// Options in display order, each prefixed by its letter code.
    pub options: Vec<String>,
    pub answer_key: char,
}

impl QuizItem {
    #[must_use]
    pub fn new(question: impl Into<String>, options: Vec<String>, answer_key: char) -> Self {
        Self {
            question: question.into(),
            options,
            answer_key,
        }
    }

    /// Build an item from the raw answer string sent by the backend.
    ///
    /// # Errors
    ///
    /// Returns `ReadingError::InvalidAnswerKey` when `answer` is not a single letter.
    pub fn from_raw(
        index: usize,
        question: impl Into<String>,
        options: Vec<String>,
        answer: &str,
    ) -> Result<Self, ReadingError> {
        let answer_key = parse_answer_key(answer).ok_or_else(|| ReadingError::InvalidAnswerKey {
            question: index,
            raw: answer.to_string(),
        })?;
        Ok(Self::new(question, options, answer_key))
    }

    /// Returns true if `option` is one of this item's options.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// The option whose code matches the answer key.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .iter()
            .map(String::as_str)
            .find(|option| option_code(option) == Some(self.answer_key))
    }

    fn validate(&self, index: usize) -> Result<(), ReadingError> {
        if self.options.is_empty() {
            return Err(ReadingError::NoOptions { question: index });
        }

        let mut seen = HashSet::new();
        for (option_index, option) in self.options.iter().enumerate() {
            let code = option_code(option).ok_or(ReadingError::MissingOptionCode {
                question: index,
                option: option_index,
            })?;
            if !seen.insert(code) {
                return Err(ReadingError::DuplicateOptionCode {
                    question: index,
                    code,
                });
            }
        }

        if !seen.contains(&self.answer_key) {
            return Err(ReadingError::AnswerKeyMismatch {
                question: index,
                key: self.answer_key,
            });
        }
        Ok(())
    }
}

//
// ─── READING SESSION ──────────────────────────────────────────────────────────
//

/// A validated daily reading: passage plus quiz. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingSession {
    date: String,
    passage: Passage,
    quiz: Vec<QuizItem>,
}

impl ReadingSession {
    /// Validate and assemble a reading session.
    ///
    /// # Errors
    ///
    /// Returns `ReadingError::EmptyQuiz` when `quiz` is empty, or the first item
    /// validation failure (missing/duplicate option codes, unmatched answer key).
    pub fn new(
        date: impl Into<String>,
        passage: Passage,
        quiz: Vec<QuizItem>,
    ) -> Result<Self, ReadingError> {
        if quiz.is_empty() {
            return Err(ReadingError::EmptyQuiz);
        }
        for (index, item) in quiz.iter().enumerate() {
            item.validate(index)?;
        }
        Ok(Self {
            date: date.into(),
            passage,
            quiz,
        })
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.passage.title
    }

    #[must_use]
    pub fn quiz(&self) -> &[QuizItem] {
        &self.quiz
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }

    /// Index of the final question. The quiz is never empty.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.quiz.len() - 1
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&QuizItem> {
        self.quiz.get(index)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn item(question: &str, key: char) -> QuizItem {
        QuizItem::new(
            question,
            vec![
                "A) first".to_string(),
                "B) second".to_string(),
                "C) third".to_string(),
            ],
            key,
        )
    }

    pub(crate) fn reading(keys: &[char]) -> ReadingSession {
        let quiz = keys
            .iter()
            .enumerate()
            .map(|(index, key)| item(&format!("Question {}", index + 1), *key))
            .collect();
        ReadingSession::new(
            "2025-01-01",
            Passage::new("Morning Walk", "The sun rose. Birds sang!", Vec::new()),
            quiz,
        )
        .unwrap()
    }
}
