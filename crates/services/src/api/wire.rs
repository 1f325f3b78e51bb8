//! JSON shapes exchanged with the reading backend.
//!
//! Several fields of the today/history endpoints are JSON documents encoded as
//! strings; they are decoded here so the rest of the crate only sees domain
//! types.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use reading_core::model::{
    Passage, QuizItem, ReadingError, ReadingSession, ResultId, ResultPage, ResultPassage,
    ResultRecord, SubmissionRequest, Suggestions, TodayResult, UserId, UserResult,
};

use crate::error::ApiError;

//
// ─── SHARED ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WireQuizItem {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    answer: String,
}

fn quiz_items(items: Vec<WireQuizItem>) -> Result<Vec<QuizItem>, ReadingError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| QuizItem::from_raw(index, item.question, item.options, &item.answer))
        .collect()
}

/// Decode a field carrying a JSON document as a string. Missing or blank means default.
fn decode_embedded<T>(field: &'static str, raw: Option<&str>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(raw) => serde_json::from_str(raw).map_err(|source| ApiError::Decode { field, source }),
    }
}

//
// ─── GENERATE READING ─────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedReading {
    #[serde(default)]
    date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    passage: String,
    #[serde(default)]
    vocabulary: Vec<String>,
    #[serde(default)]
    quiz: Vec<WireQuizItem>,
}

impl GeneratedReading {
    pub(crate) fn into_session(self) -> Result<ReadingSession, ReadingError> {
        let quiz = quiz_items(self.quiz)?;
        ReadingSession::new(
            self.date,
            Passage::new(self.title, self.passage, self.vocabulary),
            quiz,
        )
    }
}

//
// ─── SUBMIT RESULT ────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct SubmitBody<'a> {
    score: u32,
    answers: &'a [String],
}

impl<'a> From<&'a SubmissionRequest> for SubmitBody<'a> {
    fn from(request: &'a SubmissionRequest) -> Self {
        Self {
            score: request.score,
            answers: &request.answers,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub(crate) suggestions: Suggestions,
}

//
// ─── TODAY ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TodayResponse {
    #[serde(default)]
    date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    passage: String,
    vocabulary: Option<String>,
    quiz: Option<String>,
    user_result: Option<WireUserResult>,
    suggestions: Option<String>,
    #[serde(default)]
    has_result: bool,
}

#[derive(Debug, Deserialize)]
struct WireUserResult {
    answers: Option<String>,
    #[serde(default)]
    score: u32,
}

impl TodayResponse {
    pub(crate) fn into_today(self) -> Result<TodayResult, ApiError> {
        let vocabulary: Vec<String> = decode_embedded("vocabulary", self.vocabulary.as_deref())?;
        let quiz: Vec<WireQuizItem> = decode_embedded("quiz", self.quiz.as_deref())?;
        let suggestions = decode_embedded("suggestions", self.suggestions.as_deref())?;
        let user_result = self
            .user_result
            .map(|result| -> Result<UserResult, ApiError> {
                Ok(UserResult {
                    answers: decode_embedded("userResult.answers", result.answers.as_deref())?,
                    score: result.score,
                })
            })
            .transpose()?;

        Ok(TodayResult {
            date: self.date,
            passage: Passage::new(self.title, self.passage, vocabulary),
            quiz: quiz_items(quiz)?,
            user_result,
            suggestions,
            has_result: self.has_result,
        })
    }
}

//
// ─── HISTORY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsResponse {
    #[serde(default)]
    items: Vec<WireResultItem>,
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResultItem {
    user_id: String,
    result_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    client_score: u32,
    #[serde(default)]
    total: u32,
    created_at: WireTimestamp,
    suggestions: Option<String>,
    passage: Option<String>,
    answers: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WirePassageSnapshot {
    #[serde(default)]
    title: String,
    #[serde(default)]
    passage: String,
    #[serde(default)]
    quiz: Vec<WireQuizItem>,
}

/// `createdAt` arrives either as epoch milliseconds or as an RFC 3339 string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Millis(i64),
    Text(String),
}

impl WireTimestamp {
    fn into_utc(self) -> Result<DateTime<Utc>, ApiError> {
        match self {
            Self::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| ApiError::InvalidTimestamp(millis.to_string())),
            Self::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|at| at.with_timezone(&Utc))
                .map_err(|_| ApiError::InvalidTimestamp(text)),
        }
    }
}

impl WireResultItem {
    fn into_record(self) -> Result<ResultRecord, ApiError> {
        let snapshot: WirePassageSnapshot = decode_embedded("passage", self.passage.as_deref())?;
        Ok(ResultRecord {
            user_id: UserId::new(self.user_id),
            result_id: ResultId::new(self.result_id),
            date: self.date,
            client_score: self.client_score,
            total: self.total,
            created_at: self.created_at.into_utc()?,
            suggestions: decode_embedded("suggestions", self.suggestions.as_deref())?,
            passage: ResultPassage {
                title: snapshot.title,
                body: snapshot.passage,
                quiz: quiz_items(snapshot.quiz)?,
            },
            answers: decode_embedded("answers", self.answers.as_deref())?,
        })
    }
}

impl ResultsResponse {
    pub(crate) fn into_page(self) -> Result<ResultPage, ApiError> {
        let items = self
            .items
            .into_iter()
            .map(WireResultItem::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResultPage {
            items,
            cursor: self.cursor.filter(|cursor| !cursor.is_empty()),
        })
    }
}
