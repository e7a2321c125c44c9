//! Avatar capture: modal visibility state machine plus the capture/upload flow.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::clients::{AvatarUploader, CaptureDevice, Notifier};
use crate::config::ProfileConfig;
use crate::domain::{AvatarUpload, CaptureResult, CaptureSource, User};
use crate::error::{ApiError, CaptureError};
use crate::session::SessionClient;

/// Visibility of the source-selection modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvatarModal {
    #[default]
    Hidden,
    SourceSelectionVisible,
    /// The modal stays up while the device picker is open.
    Capturing(CaptureSource),
}

/// What to do once a capture attempt completed.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureStep {
    Cancelled,
    Failed(CaptureError),
    Upload(AvatarUpload),
}

#[derive(Debug, Default, Clone)]
pub struct AvatarStateMachine {
    state: AvatarModal,
}

impl AvatarStateMachine {
    pub fn state(&self) -> AvatarModal {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != AvatarModal::Hidden
    }

    /// Flips between hidden and source selection. Ignored while capturing.
    pub fn toggle(&mut self) -> bool {
        self.state = match self.state {
            AvatarModal::Hidden => AvatarModal::SourceSelectionVisible,
            AvatarModal::SourceSelectionVisible => AvatarModal::Hidden,
            capturing @ AvatarModal::Capturing(_) => capturing,
        };
        self.is_visible()
    }

    /// Starts a capture. Only allowed while the source selection is visible.
    pub fn begin_capture(&mut self, source: CaptureSource) -> bool {
        if self.state != AvatarModal::SourceSelectionVisible {
            return false;
        }
        self.state = AvatarModal::Capturing(source);
        true
    }

    /// Closes the modal and turns the capture result into the next step.
    ///
    /// Returns `None` when no capture was in flight.
    pub fn complete(&mut self, result: CaptureResult) -> Option<CaptureStep> {
        let AvatarModal::Capturing(source) = self.state else {
            return None;
        };
        self.state = AvatarModal::Hidden;

        Some(match result {
            CaptureResult::Cancelled => CaptureStep::Cancelled,
            CaptureResult::Errored(message) => CaptureStep::Failed(CaptureError::Device {
                device: source,
                message,
            }),
            CaptureResult::Success { uri, file_name } => {
                CaptureStep::Upload(AvatarUpload::from_capture(uri, file_name))
            }
        })
    }
}

/// Result of picking a source in the avatar modal.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarOutcome {
    /// The modal was not showing the source selection; nothing happened.
    Ignored,
    Cancelled,
    CaptureFailed(CaptureError),
    Updated(User),
    UploadFailed(ApiError),
}

pub struct AvatarFlow {
    machine: AvatarStateMachine,
    camera: Arc<dyn CaptureDevice>,
    library: Arc<dyn CaptureDevice>,
    uploader: Arc<dyn AvatarUploader>,
    session: SessionClient,
    notifier: Arc<dyn Notifier>,
    config: ProfileConfig,
}

impl AvatarFlow {
    pub fn new(
        config: ProfileConfig,
        camera: Arc<dyn CaptureDevice>,
        library: Arc<dyn CaptureDevice>,
        uploader: Arc<dyn AvatarUploader>,
        session: SessionClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            machine: AvatarStateMachine::default(),
            camera,
            library,
            uploader,
            session,
            notifier,
            config,
        }
    }

    pub fn state(&self) -> AvatarModal {
        self.machine.state()
    }

    pub fn is_visible(&self) -> bool {
        self.machine.is_visible()
    }

    pub fn toggle(&mut self) -> bool {
        let visible = self.machine.toggle();
        debug!(visible, "Avatar modal toggled");
        visible
    }

    /// Captures from `source` and uploads the result.
    ///
    /// The modal is hidden again before the upload starts.
    #[instrument(name = "update_avatar", skip(self, user), fields(user_id = %user.id))]
    pub async fn select_source(&mut self, source: CaptureSource, user: &mut User) -> AvatarOutcome {
        if !self.machine.begin_capture(source) {
            debug!(state = ?self.machine.state(), "Source selection ignored");
            return AvatarOutcome::Ignored;
        }

        let device = match source {
            CaptureSource::Camera => &self.camera,
            CaptureSource::Library => &self.library,
        };
        debug!("Waiting for capture");
        let result = device.capture().await;

        let Some(step) = self.machine.complete(result) else {
            return AvatarOutcome::Ignored;
        };

        match step {
            CaptureStep::Cancelled => {
                debug!("Capture cancelled");
                AvatarOutcome::Cancelled
            }
            CaptureStep::Failed(e) => {
                warn!(error = %e, "Capture failed");
                self.notifier.notify(&self.config.messages.avatar_failed_title, None);
                AvatarOutcome::CaptureFailed(e)
            }
            CaptureStep::Upload(upload) => self.upload(upload, user).await,
        }
    }

    async fn upload(&self, upload: AvatarUpload, user: &mut User) -> AvatarOutcome {
        debug!(file_name = %upload.file_name(), content_type = %upload.content_type(), "Sending request");
        match self.uploader.upload_avatar(upload).await {
            Ok(updated) => {
                info!(avatar_url = ?updated.avatar_url, "Avatar updated");
                *user = updated.clone();
                if let Err(e) = self.session.replace_user(updated.clone()).await {
                    warn!(error = %e, "Session store did not take the updated user");
                }
                AvatarOutcome::Updated(updated)
            }
            Err(e) => {
                error!(error = %e, "Avatar upload failed");
                if self.config.notify_upload_failures {
                    let messages = &self.config.messages;
                    self.notifier.notify(
                        &messages.avatar_failed_title,
                        Some(&messages.avatar_upload_failed_message),
                    );
                }
                AvatarOutcome::UploadFailed(e)
            }
        }
    }
}
