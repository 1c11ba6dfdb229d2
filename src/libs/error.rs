use crate::libs::messages::Message;
use crate::libs::timer::TimerState;
use thiserror::Error;

/// Failures of timer operations.
///
/// Everything except [`TimerError::Storage`] is reported to the user and
/// leaves the stored timers untouched.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("{}", Message::InvalidTimeFormat(.0.clone()))]
    InvalidTimeFormat(String),
    #[error("{}", Message::TimerIdRequired)]
    MissingId,
    #[error("{}", Message::TimerNotFound(.0.clone()))]
    NotFound(String),
    #[error("{}", Message::TimerInvalidState(.id.clone(), .state.to_string()))]
    InvalidState { id: String, state: TimerState },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
