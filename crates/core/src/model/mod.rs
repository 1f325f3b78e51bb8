mod ids;
mod ledger;
mod reading;
mod result;

pub use ids::{ResultId, UserId};
pub use ledger::{AnswerLedger, LedgerEntry};
pub use reading::{
    Passage, QuizItem, ReadingError, ReadingSession, option_code, parse_answer_key,
};
pub use result::{
    ResultPage, ResultPassage, ResultRecord, Suggestions, SubmissionRequest, SubmissionResult,
    TodayResult, UserResult, VocabularySuggestion,
};

#[cfg(test)]
pub(crate) use reading::fixtures;
