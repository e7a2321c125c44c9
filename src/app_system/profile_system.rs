use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::app_system::SystemError;
use crate::clients::{AccountClient, CaptureDevice, LogNavigator, LogNotifier};
use crate::config::ProfileConfig;
use crate::domain::{Account, AccountCreate};
use crate::profile::Collaborators;
use crate::session::{SessionActor, SessionClient};

/// Local backend plus session store, wired together.
///
/// Responsible for starting the actors, signing in the seed account, and
/// handling shutdown.
pub struct ProfileSystem {
    pub session: SessionClient,
    pub accounts: AccountClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ProfileSystem {
    #[instrument(name = "profile_system", skip_all)]
    pub async fn start(config: &ProfileConfig, seed: AccountCreate) -> Result<Self, SystemError> {
        info!("Starting profile system");

        // 1. Account service
        let id_counter = Arc::new(AtomicU64::new(1));
        let next_account_id = move || {
            let id = id_counter.fetch_add(1, Ordering::SeqCst);
            format!("user_{}", id)
        };
        let (account_actor, account_resource_client) =
            ResourceActor::<Account>::new(config.channel_buffer, next_account_id);
        let account_handle = tokio::spawn(account_actor.run());

        // 2. Sign in the seed account
        let account_id = AccountClient::register(&account_resource_client, seed).await?;
        let accounts = AccountClient::new(account_resource_client, account_id.clone());
        let user = accounts
            .get_user()
            .await?
            .ok_or(SystemError::MissingAccount(account_id))?;
        info!(user_id = %user.id, "Seed account signed in");

        // 3. Session store
        let (session_actor, session) = SessionActor::new(config.channel_buffer, Some(user));
        let session_handle = tokio::spawn(session_actor.run());

        Ok(Self {
            session,
            accounts,
            handles: vec![account_handle, session_handle],
        })
    }

    /// Collaborators for a profile screen, backed by this system.
    pub fn collaborators(
        &self,
        camera: Arc<dyn CaptureDevice>,
        library: Arc<dyn CaptureDevice>,
    ) -> Collaborators {
        let accounts = Arc::new(self.accounts.clone());
        Collaborators {
            session: self.session.clone(),
            updater: accounts.clone(),
            uploader: accounts,
            camera,
            library,
            navigator: Arc::new(LogNavigator),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Stops the actors. Screens holding collaborators must be dropped first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Actors stop once every client handle is gone.
        drop(self.session);
        drop(self.accounts);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ScriptedCapture;
    use crate::domain::{CaptureResult, CaptureSource, Field};
    use crate::profile::{Outcome, ProfileScreen};

    #[tokio::test]
    async fn test_start_update_and_shutdown() {
        let config = ProfileConfig::default();
        let system = ProfileSystem::start(&config, AccountCreate::new("Ana", "ana@x.com", "old1"))
            .await
            .unwrap();
        let collaborators = system.collaborators(
            Arc::new(ScriptedCapture::new(CaptureSource::Camera, [CaptureResult::Cancelled])),
            Arc::new(ScriptedCapture::new(CaptureSource::Library, [CaptureResult::Cancelled])),
        );

        {
            let mut screen = ProfileScreen::open(collaborators, &config).await.unwrap();
            assert_eq!(screen.value(Field::Email), "ana@x.com");
            screen.set_value(Field::Name, "Ana Maria");
            match screen.submit().await {
                Outcome::Updated(user) => assert_eq!(user.name, "Ana Maria"),
                other => panic!("Unexpected outcome: {:?}", other),
            }
        }

        assert_eq!(system.session.current_user().await.unwrap().name, "Ana Maria");
        system.shutdown().await.unwrap();
    }
}
