use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::account_actor::AccountAction;
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::{AvatarUploader, ProfileUpdater};
use crate::domain::{Account, AccountCreate, AvatarUpload, UpdatePayload, User};
use crate::error::ApiError;

impl From<FrameworkError> for ApiError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(_) | FrameworkError::Rejected(_) => ApiError::Rejected(e.to_string()),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ApiError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

/// Client for the account actor, acting on behalf of one signed-in account.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
    account_id: String,
}

impl AccountClient {
    pub fn new(inner: ResourceClient<Account>, account_id: impl Into<String>) -> Self {
        Self {
            inner,
            account_id: account_id.into(),
        }
    }

    /// Registers a new account and returns its ID.
    #[instrument(skip(inner))]
    pub async fn register(
        inner: &ResourceClient<Account>,
        create: AccountCreate,
    ) -> Result<String, ApiError> {
        debug!("Sending request");
        Ok(inner.create(create).await?)
    }

    #[instrument(skip(self), fields(account_id = %self.account_id))]
    pub async fn get_user(&self) -> Result<Option<User>, ApiError> {
        debug!("Sending request");
        let account = self.inner.get(self.account_id.clone()).await?;
        Ok(account.map(|account| account.user))
    }
}

#[async_trait]
impl ProfileUpdater for AccountClient {
    #[instrument(skip(self, payload), fields(account_id = %self.account_id, changes_password = payload.changes_password()))]
    async fn update_profile(&self, payload: UpdatePayload) -> Result<User, ApiError> {
        debug!("Sending request");
        let account = self.inner.update(self.account_id.clone(), payload).await?;
        Ok(account.user)
    }
}

#[async_trait]
impl AvatarUploader for AccountClient {
    #[instrument(skip(self, upload), fields(account_id = %self.account_id, file_name = %upload.file_name()))]
    async fn upload_avatar(&self, upload: AvatarUpload) -> Result<User, ApiError> {
        debug!("Sending request");
        let user = self
            .inner
            .perform_action(self.account_id.clone(), AccountAction::ReplaceAvatar(upload))
            .await?;
        Ok(user)
    }
}
