//! Collaborators the profile flow talks to, and the local implementations used
//! by the demo binary.

use async_trait::async_trait;

use crate::domain::{AvatarUpload, CaptureResult, UpdatePayload, User};
use crate::error::ApiError;

pub mod account_client;
pub mod local;

pub use account_client::AccountClient;
pub use local::{LogNavigator, LogNotifier, ScriptedCapture};

/// Sends profile updates to the backend (`PUT /profile`).
#[async_trait]
pub trait ProfileUpdater: Send + Sync {
    async fn update_profile(&self, payload: UpdatePayload) -> Result<User, ApiError>;
}

/// Sends avatar images to the backend (`PATCH /users/avatar`).
#[async_trait]
pub trait AvatarUploader: Send + Sync {
    async fn upload_avatar(&self, upload: AvatarUpload) -> Result<User, ApiError>;
}

/// Acquires one image from a camera or media library.
///
/// The returned future resolves once, when the user finishes, cancels or the
/// device fails. It may never resolve if the user abandons the picker.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn capture(&self) -> CaptureResult;
}

pub trait Navigator: Send + Sync {
    fn go_back(&self);
}

/// User-visible banners.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: Option<&str>);
}
