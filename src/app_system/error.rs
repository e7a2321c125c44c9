use thiserror::Error;

use crate::error::{ApiError, SessionError};

/// Errors raised while starting or stopping the profile system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Account service error: {0}")]
    Account(#[from] ApiError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Seed account {0} vanished after registration")]
    MissingAccount(String),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}
