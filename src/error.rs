use thiserror::Error;

/// Errors returned by the update and upload collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failure reported by a capture device.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaptureError {
    #[error("Capture from {device} failed: {message}")]
    Device {
        device: crate::domain::CaptureSource,
        message: String,
    },
}

/// Errors that can occur when talking to the session store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("No user is signed in")]
    NotSignedIn,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
