#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod auth;
pub mod error;
pub mod history;
pub mod read_along;
pub mod reading_service;
pub mod sessions;
pub mod speech;

pub use reading_core::Clock;

pub use api::{ApiConfig, HttpReadingApi, InMemoryReadingApi, ReadingApi};
pub use app_services::AppServices;
pub use auth::{AuthContext, AuthEvent, AuthSession, AuthState, StaticTokenSource, TokenSource};
pub use error::{ApiError, AuthError, ReadingServiceError, SessionError, SpeechError};
pub use history::{HistoryFeed, PageRequest};
pub use read_along::{ReadAloud, ReadAlongPlayer, ReadAlongState};
pub use reading_service::ReadingService;
pub use sessions::{QuizProgress, QuizSession};
pub use speech::{NoSpeech, SpeechCallback, SpeechEngine, SpeechOptions, SpeechOutcome};
