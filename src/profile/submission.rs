use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::clients::{Navigator, Notifier, ProfileUpdater};
use crate::config::ProfileMessages;
use crate::domain::{FieldErrors, UpdatePayload, User};
use crate::form::{FieldRegistry, ProfileValidator};
use crate::session::SessionClient;

/// Terminal result of one submit action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing was sent; the errors are also shown in the registry.
    ValidationFailed(FieldErrors),
    Updated(User),
    /// The backend call failed. `message` is the generic text shown to the user.
    UpdateFailed { message: String },
}

/// Validates the form, sends the minimal update and reports how it went.
pub struct SubmissionOrchestrator {
    validator: ProfileValidator,
    updater: Arc<dyn ProfileUpdater>,
    session: SessionClient,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    messages: ProfileMessages,
}

impl SubmissionOrchestrator {
    pub fn new(
        messages: ProfileMessages,
        updater: Arc<dyn ProfileUpdater>,
        session: SessionClient,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            validator: ProfileValidator::new(messages.clone()),
            updater,
            session,
            navigator,
            notifier,
            messages,
        }
    }

    /// Runs one submission against the registry's current values.
    ///
    /// At most one update call is made, and none when validation fails. On
    /// success `user` is replaced with the backend's copy.
    #[instrument(name = "submit_profile", skip_all, fields(user_id = %user.id))]
    pub async fn submit(&self, registry: &mut FieldRegistry, user: &mut User) -> Outcome {
        registry.clear_errors();

        let valid = match self.validator.validate(&registry.snapshot()) {
            Ok(valid) => valid,
            Err(errors) => {
                info!(invalid_fields = %errors, "Validation failed, nothing sent");
                registry.set_errors(errors.clone());
                return Outcome::ValidationFailed(errors);
            }
        };

        let payload = UpdatePayload::from(valid);
        debug!(changes_password = payload.changes_password(), "Sending request");

        match self.updater.update_profile(payload).await {
            Ok(updated) => {
                info!("Profile updated");
                *user = updated.clone();
                if let Err(e) = self.session.replace_user(updated.clone()).await {
                    warn!(error = %e, "Session store did not take the updated user");
                }
                self.notifier.notify(&self.messages.update_succeeded, None);
                self.navigator.go_back();
                Outcome::Updated(updated)
            }
            Err(e) => {
                error!(error = %e, "Profile update failed");
                self.notifier.notify(
                    &self.messages.update_failed_title,
                    Some(&self.messages.update_failed_message),
                );
                Outcome::UpdateFailed {
                    message: self.messages.update_failed_message.clone(),
                }
            }
        }
    }
}
