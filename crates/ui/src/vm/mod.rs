mod history_vm;
mod quiz_vm;
mod review_vm;
mod time_fmt;

pub use history_vm::{HistoryItemVm, map_history_items};
pub use quiz_vm::{OptionVm, QuestionVm, question_vm};
pub use review_vm::{ReviewOptionVm, ReviewQuestionVm, ReviewVm, build_review};
pub use time_fmt::{format_datetime, format_reading_date};
