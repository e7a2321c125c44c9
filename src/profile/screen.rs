use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, instrument, warn};

use crate::clients::{AvatarUploader, CaptureDevice, Navigator, Notifier, ProfileUpdater};
use crate::config::ProfileConfig;
use crate::domain::{CaptureSource, Field, FieldErrors, ProfileFormData, User};
use crate::error::SessionError;
use crate::form::{FieldRegistry, FocusAction, FocusChain};
use crate::session::{SessionClient, SessionEvent};

use super::avatar::{AvatarFlow, AvatarModal, AvatarOutcome};
use super::submission::{Outcome, SubmissionOrchestrator};

/// Everything outside the screen that the profile flow calls into.
#[derive(Clone)]
pub struct Collaborators {
    pub session: SessionClient,
    pub updater: Arc<dyn ProfileUpdater>,
    pub uploader: Arc<dyn AvatarUploader>,
    pub camera: Arc<dyn CaptureDevice>,
    pub library: Arc<dyn CaptureDevice>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

/// One open instance of the profile-edit screen.
///
/// Owns the form state and the local copy of the signed-in user; every
/// mutation goes through `&mut self`.
pub struct ProfileScreen {
    registry: FieldRegistry,
    focus: FocusChain,
    user: User,
    submission: SubmissionOrchestrator,
    avatar: AvatarFlow,
    navigator: Arc<dyn Navigator>,
    session_events: broadcast::Receiver<SessionEvent>,
}

impl ProfileScreen {
    /// Opens the screen with the form prefilled from the session user.
    #[instrument(name = "open_profile", skip_all)]
    pub async fn open(
        collaborators: Collaborators,
        config: &ProfileConfig,
    ) -> Result<Self, SessionError> {
        let user = collaborators.session.current_user().await?;
        info!(user_id = %user.id, "Profile screen opened");

        let Collaborators {
            session,
            updater,
            uploader,
            camera,
            library,
            navigator,
            notifier,
        } = collaborators;

        let session_events = session.subscribe();

        Ok(Self {
            registry: FieldRegistry::new(ProfileFormData::from_user(&user)),
            focus: FocusChain::default(),
            user,
            submission: SubmissionOrchestrator::new(
                config.messages.clone(),
                updater,
                session.clone(),
                navigator.clone(),
                notifier.clone(),
            ),
            avatar: AvatarFlow::new(config.clone(), camera, library, uploader, session, notifier),
            navigator,
            session_events,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.registry.set_value(field, value);
    }

    pub fn value(&self, field: Field) -> &str {
        self.registry.value(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.registry.error(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        self.registry.errors()
    }

    pub fn focus(&mut self, field: Field) {
        self.focus.focus(field);
    }

    pub fn focused(&self) -> Option<Field> {
        self.focus.focused()
    }

    /// Return key on `field`: moves focus along, or submits from the last field.
    pub async fn submit_editing(&mut self, field: Field) -> Option<Outcome> {
        match self.focus.next(field) {
            FocusAction::Focus(next) => {
                debug!(from = %field, to = %next, "Focus moved");
                None
            }
            FocusAction::Submit => Some(self.submit().await),
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        self.submission.submit(&mut self.registry, &mut self.user).await
    }

    pub fn toggle_avatar_modal(&mut self) -> bool {
        self.avatar.toggle()
    }

    pub fn avatar_modal_visible(&self) -> bool {
        self.avatar.is_visible()
    }

    pub fn avatar_state(&self) -> AvatarModal {
        self.avatar.state()
    }

    pub async fn select_avatar_source(&mut self, source: CaptureSource) -> AvatarOutcome {
        self.avatar.select_source(source, &mut self.user).await
    }

    /// Applies every session change published since the last call and
    /// returns how many events were read.
    ///
    /// A replaced user refreshes the local snapshot; form values are left alone.
    pub fn drain_session_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.session_events.try_recv() {
                Ok(event) => {
                    self.apply_session_event(event);
                    applied += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Missed session events");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return applied,
            }
        }
    }

    fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::UserReplaced(user) if user.id == self.user.id => {
                debug!(user_id = %user.id, "Session user refreshed");
                self.user = user;
            }
            SessionEvent::UserReplaced(_) => {}
            // Leaving the screen on sign-out is up to the host's navigation.
            SessionEvent::SignedOut => debug!("Session signed out"),
        }
    }

    pub fn go_back(&self) {
        self.navigator.go_back();
    }
}
