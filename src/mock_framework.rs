//! # Mock Framework
//!
//! Utilities for testing the profile screen against hand-driven collaborators.
//!
//! Each mock forwards calls to a channel the test holds. The test answers
//! through the embedded `oneshot` sender, or checks with `try_recv` that no
//! call was made at all.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::clients::{AvatarUploader, CaptureDevice, Navigator, Notifier, ProfileUpdater};
use crate::config::ProfileConfig;
use crate::domain::{AvatarUpload, CaptureResult, UpdatePayload, User};
use crate::error::ApiError;
use crate::profile::{Collaborators, ProfileScreen};
use crate::session::{SessionActor, SessionClient};

pub type ApiResponder = oneshot::Sender<Result<User, ApiError>>;

/// A request that reached the mocked backend.
#[derive(Debug)]
pub enum ApiCall {
    UpdateProfile {
        payload: UpdatePayload,
        respond_to: ApiResponder,
    },
    UploadAvatar {
        upload: AvatarUpload,
        respond_to: ApiResponder,
    },
}

#[derive(Clone)]
pub struct MockApi {
    sender: mpsc::Sender<ApiCall>,
}

impl MockApi {
    async fn call(&self, build: impl FnOnce(ApiResponder) -> ApiCall) -> Result<User, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::Transport("mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::Transport("mock backend dropped the request".to_string()))?
    }
}

#[async_trait]
impl ProfileUpdater for MockApi {
    async fn update_profile(&self, payload: UpdatePayload) -> Result<User, ApiError> {
        self.call(|respond_to| ApiCall::UpdateProfile { payload, respond_to })
            .await
    }
}

#[async_trait]
impl AvatarUploader for MockApi {
    async fn upload_avatar(&self, upload: AvatarUpload) -> Result<User, ApiError> {
        self.call(|respond_to| ApiCall::UploadAvatar { upload, respond_to })
            .await
    }
}

/// Creates a mock backend and the receiver its calls arrive on.
pub fn create_mock_api(buffer_size: usize) -> (MockApi, mpsc::Receiver<ApiCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockApi { sender }, receiver)
}

/// Helper to verify that the next call is a profile update
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ApiCall>,
) -> Option<(UpdatePayload, ApiResponder)> {
    match receiver.recv().await {
        Some(ApiCall::UpdateProfile { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an avatar upload
pub async fn expect_upload(
    receiver: &mut mpsc::Receiver<ApiCall>,
) -> Option<(AvatarUpload, ApiResponder)> {
    match receiver.recv().await {
        Some(ApiCall::UploadAvatar { upload, respond_to }) => Some((upload, respond_to)),
        _ => None,
    }
}

pub type CaptureResponder = oneshot::Sender<CaptureResult>;

pub struct MockCapture {
    sender: mpsc::Sender<CaptureResponder>,
}

#[async_trait]
impl CaptureDevice for MockCapture {
    async fn capture(&self) -> CaptureResult {
        let (respond_to, response) = oneshot::channel();
        if self.sender.send(respond_to).await.is_err() {
            return CaptureResult::Errored("mock device closed".to_string());
        }
        response
            .await
            .unwrap_or_else(|_| CaptureResult::Errored("mock device dropped".to_string()))
    }
}

pub fn create_mock_capture(buffer_size: usize) -> (MockCapture, mpsc::Receiver<CaptureResponder>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockCapture { sender }, receiver)
}

/// Helper to wait for the next capture request
pub async fn expect_capture(receiver: &mut mpsc::Receiver<CaptureResponder>) -> Option<CaptureResponder> {
    receiver.recv().await
}

/// Something the screen showed or did to the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Notified { title: String, message: Option<String> },
    WentBack,
}

#[derive(Clone)]
pub struct RecordingUi {
    sender: mpsc::UnboundedSender<UiEvent>,
}

impl Notifier for RecordingUi {
    fn notify(&self, title: &str, message: Option<&str>) {
        let _ = self.sender.send(UiEvent::Notified {
            title: title.to_string(),
            message: message.map(str::to_string),
        });
    }
}

impl Navigator for RecordingUi {
    fn go_back(&self) {
        let _ = self.sender.send(UiEvent::WentBack);
    }
}

pub fn create_recording_ui() -> (RecordingUi, mpsc::UnboundedReceiver<UiEvent>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (RecordingUi { sender }, receiver)
}

/// Receivers for every mocked collaborator of a screen opened with [`open_mock_screen`].
pub struct MockHandles {
    pub api: mpsc::Receiver<ApiCall>,
    pub camera: mpsc::Receiver<CaptureResponder>,
    pub library: mpsc::Receiver<CaptureResponder>,
    pub ui: mpsc::UnboundedReceiver<UiEvent>,
    pub session: SessionClient,
    pub session_task: JoinHandle<()>,
}

impl MockHandles {
    /// Stops the session store so every later session write fails.
    pub async fn stop_session(&mut self) {
        self.session_task.abort();
        let _ = (&mut self.session_task).await;
    }
}

pub fn signed_in_user() -> User {
    User {
        id: "user_1".to_string(),
        name: "Ana".to_string(),
        email: "ana@x.com".to_string(),
        avatar_url: None,
    }
}

/// Opens a profile screen for `user` with every collaborator mocked.
pub async fn open_mock_screen(user: User, config: &ProfileConfig) -> (ProfileScreen, MockHandles) {
    let (session_actor, session) = SessionActor::new(8, Some(user));
    let session_task = tokio::spawn(session_actor.run());

    let (api, api_rx) = create_mock_api(8);
    let (camera, camera_rx) = create_mock_capture(8);
    let (library, library_rx) = create_mock_capture(8);
    let (ui, ui_rx) = create_recording_ui();
    let api = Arc::new(api);
    let ui = Arc::new(ui);

    let collaborators = Collaborators {
        session: session.clone(),
        updater: api.clone(),
        uploader: api,
        camera: Arc::new(camera),
        library: Arc::new(library),
        navigator: ui.clone(),
        notifier: ui,
    };
    let screen = ProfileScreen::open(collaborators, config)
        .await
        .expect("session has a signed-in user");

    let handles = MockHandles {
        api: api_rx,
        camera: camera_rx,
        library: library_rx,
        ui: ui_rx,
        session,
        session_task,
    };
    (screen, handles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api(10);

        let update_task = tokio::spawn(async move {
            let payload = UpdatePayload { name: "Ana".into(), email: "ana@x.com".into(), credentials: None };
            api.update_profile(payload).await
        });

        let (payload, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(payload.name, "Ana");
        responder.send(Ok(signed_in_user())).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Ok(signed_in_user()));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_transport_error() {
        let (api, mut receiver) = create_mock_api(10);
        let upload_task = tokio::spawn(async move {
            api.upload_avatar(AvatarUpload::from_capture("file:///p.jpg", "p.jpg")).await
        });
        let (_, responder) = expect_upload(&mut receiver).await.expect("Expected Upload request");
        drop(responder);
        assert!(matches!(upload_task.await.unwrap(), Err(ApiError::Transport(_))));
    }
}
