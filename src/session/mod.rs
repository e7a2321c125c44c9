//! Session store: the single owner of the signed-in user.
//!
//! Screens read the user through [`SessionClient::current_user`] and publish
//! changes with [`SessionClient::replace_user`]. Every change is broadcast as a
//! [`SessionEvent`] so other screens can refresh.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::domain::User;
use crate::error::SessionError;

const EVENT_CAPACITY: usize = 16;

/// Change notifications published by the session store.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    UserReplaced(User),
    SignedOut,
}

#[derive(Debug)]
pub enum SessionRequest {
    CurrentUser {
        respond_to: oneshot::Sender<Option<User>>,
    },
    ReplaceUser {
        user: User,
        respond_to: oneshot::Sender<()>,
    },
    SignOut {
        respond_to: oneshot::Sender<()>,
    },
}

pub struct SessionActor {
    receiver: mpsc::Receiver<SessionRequest>,
    user: Option<User>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionActor {
    pub fn new(buffer_size: usize, user: Option<User>) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let actor = Self {
            receiver,
            user,
            events: events.clone(),
        };
        (actor, SessionClient { sender, events })
    }

    #[instrument(name = "session_store", skip(self))]
    pub async fn run(mut self) {
        info!("Session store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SessionRequest::CurrentUser { respond_to } => {
                    let _ = respond_to.send(self.user.clone());
                }
                SessionRequest::ReplaceUser { user, respond_to } => {
                    debug!(user_id = %user.id, "Replacing session user");
                    self.user = Some(user.clone());
                    // No subscribers is fine.
                    let _ = self.events.send(SessionEvent::UserReplaced(user));
                    let _ = respond_to.send(());
                }
                SessionRequest::SignOut { respond_to } => {
                    debug!("Signing out");
                    self.user = None;
                    let _ = self.events.send(SessionEvent::SignedOut);
                    let _ = respond_to.send(());
                }
            }
        }
        info!("Session store stopped");
    }
}

/// Handle to the session store.
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionClient {
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::CurrentUser { respond_to }).await?;
        response
            .await
            .map_err(|_| SessionError::ActorCommunicationError("Actor dropped".to_string()))?
            .ok_or(SessionError::NotSignedIn)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn replace_user(&self, user: User) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::ReplaceUser { user, respond_to }).await?;
        response
            .await
            .map_err(|_| SessionError::ActorCommunicationError("Actor dropped".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.send(SessionRequest::SignOut { respond_to }).await?;
        response
            .await
            .map_err(|_| SessionError::ActorCommunicationError("Actor dropped".to_string()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn send(&self, request: SessionRequest) -> Result<(), SessionError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| SessionError::ActorCommunicationError("Actor closed".to_string()))
    }
}
