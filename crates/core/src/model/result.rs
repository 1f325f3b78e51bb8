use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{ResultId, UserId};
use crate::model::ledger::AnswerLedger;
use crate::model::reading::{Passage, QuizItem};

//
// ─── SUGGESTIONS ──────────────────────────────────────────────────────────────
//

/// A word the backend recommends reviewing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VocabularySuggestion {
    pub word: String,
    pub definition: String,
}

/// Post-submission study feedback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    #[serde(default)]
    pub vocabulary: Vec<VocabularySuggestion>,
    #[serde(default)]
    pub grammar_tip: String,
}

impl Suggestions {
    #[must_use]
    pub fn has_vocabulary(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    #[must_use]
    pub fn has_grammar_tip(&self) -> bool {
        !self.grammar_tip.trim().is_empty()
    }
}

//
// ─── SUBMISSION ───────────────────────────────────────────────────────────────
//

/// Payload sent when the user confirms submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub score: u32,
    pub answers: Vec<String>,
}

/// Outcome of a successful submission, kept for the review stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub score: u32,
    pub answers: Vec<String>,
    pub suggestions: Suggestions,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionResult {
    #[must_use]
    pub fn new(
        request: SubmissionRequest,
        suggestions: Suggestions,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            score: request.score,
            answers: request.answers,
            suggestions,
            submitted_at,
        }
    }
}

//
// ─── TODAY ────────────────────────────────────────────────────────────────────
//

/// The stored answers and score for today's reading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserResult {
    pub answers: Vec<String>,
    pub score: u32,
}

/// Today's reading together with the user's result, if they already took it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodayResult {
    pub date: String,
    pub passage: Passage,
    pub quiz: Vec<QuizItem>,
    pub user_result: Option<UserResult>,
    pub suggestions: Suggestions,
    pub has_result: bool,
}

impl TodayResult {
    /// The stored result, present only when `has_result` is set.
    #[must_use]
    pub fn completed(&self) -> Option<&UserResult> {
        if self.has_result {
            self.user_result.as_ref()
        } else {
            None
        }
    }
}

//
// ─── HISTORY ──────────────────────────────────────────────────────────────────
//

/// Passage snapshot stored alongside a historical result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPassage {
    pub title: String,
    pub body: String,
    pub quiz: Vec<QuizItem>,
}

/// One past submission as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub user_id: UserId,
    pub result_id: ResultId,
    pub date: String,
    /// Score recorded by the client at submission time, shown as-is.
    pub client_score: u32,
    pub total: u32,
    pub created_at: DateTime<Utc>,
    pub suggestions: Suggestions,
    pub passage: ResultPassage,
    pub answers: Vec<String>,
}

impl ResultRecord {
    #[must_use]
    pub fn ledger(&self) -> AnswerLedger {
        AnswerLedger::from_submitted(&self.answers)
    }
}

/// A page of results plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub items: Vec<ResultRecord>,
    pub cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_decode_with_missing_fields() {
        let parsed: Suggestions = serde_json::from_str(r#"{"grammarTip":"Use the past tense."}"#)
            .expect("decode suggestions");
        assert!(parsed.vocabulary.is_empty());
        assert!(parsed.has_grammar_tip());
    }

    #[test]
    fn today_result_hides_stale_user_result() {
        let today = TodayResult {
            date: "2025-01-01".into(),
            passage: Passage::default(),
            quiz: Vec::new(),
            user_result: Some(UserResult::default()),
            suggestions: Suggestions::default(),
            has_result: false,
        };
        assert!(today.completed().is_none());
    }
}
