use dioxus::prelude::*;
use services::{ReadingServiceError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    FetchFailed,
    InvalidReading,
    SubmitFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchFailed => "Couldn't reach the server. Check your connection and try again.",
            Self::InvalidReading => "Today's reading is incomplete. Please try again later.",
            Self::SubmitFailed => "Your answers weren't saved. Please try again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&ReadingServiceError> for ViewError {
    fn from(err: &ReadingServiceError) -> Self {
        match err {
            ReadingServiceError::FetchFailed(_) => Self::FetchFailed,
            ReadingServiceError::InvalidReading(_) => Self::InvalidReading,
            _ => Self::Unknown,
        }
    }
}

impl From<ReadingServiceError> for ViewError {
    fn from(err: ReadingServiceError) -> Self {
        Self::from(&err)
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::SubmitFailed(_) => Self::SubmitFailed,
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
