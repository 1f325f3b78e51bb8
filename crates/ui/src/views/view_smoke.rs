use std::sync::Arc;

use dioxus::prelude::ReadableExt;

use reading_core::model::{
    Passage, QuizItem, ReadingSession, ResultId, ResultPage, ResultPassage, ResultRecord,
    Suggestions, SubmissionRequest, TodayResult, UserId, UserResult, VocabularySuggestion,
};
use reading_core::quiz::QuizEvent;
use reading_core::time::fixed_now;
use services::{ApiError, InMemoryReadingApi, ReadingApi};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_api};

fn options() -> Vec<String> {
    vec![
        "A) the harbor".to_string(),
        "B) the hills".to_string(),
        "C) the market".to_string(),
    ]
}

fn quiz() -> Vec<QuizItem> {
    vec![
        QuizItem::new("Where did the boats rest?", options(), 'A'),
        QuizItem::new("Where did the goats graze?", options(), 'B'),
    ]
}

fn passage() -> Passage {
    Passage::new(
        "Harbor Morning",
        "The boats rested in the harbor. Goats grazed on the hills!",
        vec!["harbor".to_string()],
    )
}

fn reading() -> ReadingSession {
    ReadingSession::new("2025-03-07", passage(), quiz()).expect("valid reading")
}

fn suggestions() -> Suggestions {
    Suggestions {
        vocabulary: vec![VocabularySuggestion {
            word: "graze".into(),
            definition: "to eat grass in a field".into(),
        }],
        grammar_tip: "Use the past tense for finished actions.".into(),
    }
}

fn today(user_result: Option<UserResult>) -> TodayResult {
    TodayResult {
        date: "2025-03-07".into(),
        passage: passage(),
        quiz: quiz(),
        has_result: user_result.is_some(),
        user_result,
        suggestions: suggestions(),
    }
}

fn record(id: usize) -> ResultRecord {
    ResultRecord {
        user_id: UserId::new("user-42"),
        result_id: ResultId::new(format!("result-{id}")),
        date: "2025-03-07".into(),
        client_score: 1,
        total: 2,
        created_at: fixed_now(),
        suggestions: suggestions(),
        passage: ResultPassage {
            title: format!("Reading {id}"),
            body: "The boats rested in the harbor.".into(),
            quiz: quiz(),
        },
        answers: vec!["A) the harbor".into(), "C) the market".into()],
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_offers_todays_quiz() {
    let api = InMemoryReadingApi::new().with_today(today(None));
    let mut harness = setup_view_harness(ViewKind::Home, api);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Welcome Back!"), "missing greeting in {html}");
    assert!(html.contains("Harbor Morning"), "missing title in {html}");
    assert!(html.contains("Start Today"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_completed_result() {
    let result = UserResult {
        answers: vec!["A) the harbor".into(), String::new()],
        score: 1,
    };
    let api = InMemoryReadingApi::new().with_today(today(Some(result)));
    let mut harness = setup_view_harness(ViewKind::Home, api);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("50%"), "missing score percent in {html}");
    assert!(html.contains("1 of 2 correct"), "missing score detail in {html}");
    assert!(html.contains("Use the past tense"), "missing grammar tip in {html}");
    assert!(html.contains("Incorrect only (1)"), "missing filter in {html}");
    assert!(html.contains("Not answered"), "missing unanswered marker in {html}");
    assert!(!html.contains("Start Today"), "unexpected start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness(ViewKind::Home, InMemoryReadingApi::new());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("reach the server"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reading_view_smoke_renders_passage_sentences() {
    let api = InMemoryReadingApi::new().with_reading(reading());
    let mut harness = setup_view_harness(ViewKind::Reading, api);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Harbor Morning"), "missing title in {html}");
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("Read Along"), "missing read-along toggle in {html}");
    assert!(
        html.contains("The boats rested in the harbor."),
        "missing first sentence in {html}"
    );
    assert!(html.contains("Reading"), "missing progress label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reading_view_smoke_confirms_and_submits() {
    let api = InMemoryReadingApi::new()
        .with_reading(reading())
        .with_suggestions(suggestions());
    let mut harness = setup_view_harness(ViewKind::Reading, api.clone());
    harness.settle().await;

    let dispatch = harness.handles().dispatch();
    harness.in_runtime(|| {
        dispatch.call(QuizEvent::Next);
        dispatch.call(QuizEvent::Select("A) the harbor".into()));
        dispatch.call(QuizEvent::Next);
    });
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "missing progress in {html}");
    assert!(html.contains("Submit"), "missing submit label in {html}");

    harness.in_runtime(|| dispatch.call(QuizEvent::Next));
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("You have 1 unanswered question: 2"),
        "missing confirmation in {html}"
    );
    assert!(html.contains("Review"), "missing review button in {html}");
    assert!(html.contains("Cancel"), "missing cancel button in {html}");

    let submit = harness.handles().submit();
    harness.in_runtime(|| submit.call(()));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Quiz complete"), "missing completion in {html}");
    assert!(html.contains("50%"), "missing score in {html}");
    assert!(html.contains("graze"), "missing suggestions in {html}");
    assert_eq!(
        api.submissions(),
        vec![SubmissionRequest {
            score: 1,
            answers: vec!["A) the harbor".into(), String::new()],
        }]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn reading_view_smoke_keeps_question_after_failed_submit() {
    let api = InMemoryReadingApi::new().with_reading(reading());
    api.fail_submissions(true);
    let mut harness = setup_view_harness(ViewKind::Reading, api.clone());
    harness.settle().await;

    let dispatch = harness.handles().dispatch();
    let submit = harness.handles().submit();
    harness.in_runtime(|| {
        dispatch.call(QuizEvent::Next);
        dispatch.call(QuizEvent::Next);
        dispatch.call(QuizEvent::Next);
        submit.call(());
    });
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("answers weren"), "missing submit error in {html}");
    assert!(html.contains("Question 2 of 2"), "left the question in {html}");
    let session = harness.handles().session();
    harness.in_runtime(|| {
        let guard = session.read();
        let current = guard.as_ref().expect("session loaded");
        assert!(!current.is_submitting());
        assert!(current.dialog().is_none());
    });
    assert!(api.submissions().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn reading_view_smoke_back_from_passage_asks_to_leave() {
    let api = InMemoryReadingApi::new().with_reading(reading());
    let mut harness = setup_view_harness(ViewKind::Reading, api);
    harness.settle().await;

    let dispatch = harness.handles().dispatch();
    harness.in_runtime(|| dispatch.call(QuizEvent::Back));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Leave the quiz?"), "missing leave dialog in {html}");
    assert!(html.contains("Stay"), "missing stay button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn reading_view_smoke_renders_fetch_error() {
    let mut harness = setup_view_harness(ViewKind::Reading, InMemoryReadingApi::new());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("reach the server"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_scores_and_more() {
    let records = (0..21).map(record).collect();
    let api = InMemoryReadingApi::new().with_results(records);
    let mut harness = setup_view_harness(ViewKind::History, api);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Reading 0"), "missing first item in {html}");
    assert!(html.contains("1/2 (50%)"), "missing score in {html}");
    assert!(html.contains("Load more"), "missing load more in {html}");
    assert!(!html.contains("Reading 20"), "second page rendered early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::History, InMemoryReadingApi::new());
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No results yet."), "missing empty state in {html}");
    assert!(!html.contains("Load more"), "unexpected load more in {html}");
}

struct MalformedHistoryApi;

#[async_trait::async_trait]
impl ReadingApi for MalformedHistoryApi {
    async fn fetch_reading(&self) -> Result<ReadingSession, ApiError> {
        Ok(reading())
    }

    async fn submit_result(&self, _request: &SubmissionRequest) -> Result<Suggestions, ApiError> {
        Ok(Suggestions::default())
    }

    async fn today_result(&self) -> Result<TodayResult, ApiError> {
        Ok(today(None))
    }

    async fn list_results(
        &self,
        _limit: u32,
        _cursor: Option<&str>,
    ) -> Result<ResultPage, ApiError> {
        Err(ApiError::InvalidTimestamp("yesterday".into()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_api(ViewKind::History, Arc::new(MalformedHistoryApi));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("reach the server"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn read_along_smoke_follows_new_passage_text() {
    let mut harness = setup_view_harness(ViewKind::ReadAlong, InMemoryReadingApi::new());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("The tide came in."), "missing first passage in {html}");

    let text = harness.passage_text.clone();
    harness.in_runtime(|| text.set("A storm rolled over the bay. Boats stayed home."));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("A storm rolled over the bay."), "stale passage in {html}");
    assert!(html.contains("Boats stayed home."), "missing second sentence in {html}");
    assert!(!html.contains("Gulls circled the pier."), "old sentence kept in {html}");
}
