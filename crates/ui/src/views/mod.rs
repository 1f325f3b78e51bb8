mod history;
mod home;
mod read_along;
mod reading;
mod review;
mod state;
mod suggestions;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use history::HistoryView;
pub use home::HomeView;
pub use read_along::{PassageReadAlong, ReadAloudButton};
pub use reading::ReadingView;
pub use review::{ResultReview, ScoreRing};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use suggestions::SuggestionsPanel;
