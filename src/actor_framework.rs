use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks and actions)
// =============================================================================

/// Errors produced by the resource actor or by entity hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any record must implement to be managed by [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Construct the full record from its new ID and the creation payload.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, FrameworkError>;

    /// Apply a patch. On error the stored record is left untouched.
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    /// Handle a domain-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until every client handle is dropped.
    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        debug!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    let result = T::from_create(id.clone(), payload).map(|item| {
                        self.store.insert(id.clone(), item);
                        id
                    });
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            // Hooks mutate a copy so a rejected patch leaves no partial state.
                            let mut updated = item.clone();
                            updated.on_update(patch).map(|()| {
                                *item = updated.clone();
                                updated
                            })
                        }
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    if let Err(e) = &result {
                        warn!(%id, error = %e, "Update failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Actor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // A provider listing entry, just enough to exercise the actor.
    #[derive(Clone, Debug, PartialEq)]
    struct Provider {
        id: String,
        name: String,
        open_slots: u32,
    }

    #[derive(Debug)]
    struct ProviderCreate {
        name: String,
        open_slots: u32,
    }

    #[derive(Debug)]
    struct ProviderPatch {
        name: Option<String>,
    }

    #[derive(Debug)]
    enum ProviderAction {
        Book,
    }

    impl Entity for Provider {
        type Id = String;
        type CreatePayload = ProviderCreate;
        type Patch = ProviderPatch;
        type Action = ProviderAction;
        type ActionResult = u32;

        fn from_create(id: String, payload: ProviderCreate) -> Result<Self, FrameworkError> {
            Ok(Self {
                id,
                name: payload.name,
                open_slots: payload.open_slots,
            })
        }

        fn on_update(&mut self, patch: ProviderPatch) -> Result<(), FrameworkError> {
            if let Some(name) = patch.name {
                if name.is_empty() {
                    return Err(FrameworkError::Rejected("empty name".into()));
                }
                self.name = name;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: ProviderAction) -> Result<u32, FrameworkError> {
            match action {
                ProviderAction::Book => {
                    if self.open_slots == 0 {
                        return Err(FrameworkError::Rejected("fully booked".into()));
                    }
                    self.open_slots -= 1;
                    Ok(self.open_slots)
                }
            }
        }
    }

    fn start() -> ResourceClient<Provider> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("provider_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start();
        let id = client
            .create(ProviderCreate { name: "Barber".into(), open_slots: 1 })
            .await
            .unwrap();
        assert_eq!(id, "provider_1");

        assert_eq!(client.perform_action(id.clone(), ProviderAction::Book).await, Ok(0));
        assert_eq!(
            client.perform_action(id.clone(), ProviderAction::Book).await,
            Err(FrameworkError::Rejected("fully booked".into()))
        );
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_record() {
        let client = start();
        let id = client
            .create(ProviderCreate { name: "Barber".into(), open_slots: 3 })
            .await
            .unwrap();

        let result = client
            .update(id.clone(), ProviderPatch { name: Some(String::new()) })
            .await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));

        let stored = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.name, "Barber");

        let renamed = client
            .update(id, ProviderPatch { name: Some("Salon".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.name, "Salon");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let client = start();
        let result = client.update("nobody".into(), ProviderPatch { name: None }).await;
        assert_eq!(result, Err(FrameworkError::NotFound("nobody".into())));
        assert_eq!(client.get("nobody".into()).await, Ok(None));
    }
}
