use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Account, AccountCreate, UpdatePayload, User};
use super::actions::AccountAction;

impl Entity for Account {
    type Id = String;
    type CreatePayload = AccountCreate;
    type Patch = UpdatePayload;
    type Action = AccountAction;
    type ActionResult = User;

    fn from_create(id: String, payload: AccountCreate) -> Result<Self, FrameworkError> {
        if payload.password.is_empty() {
            return Err(FrameworkError::Rejected("Password is required".to_string()));
        }
        Ok(Self {
            user: User {
                id,
                name: payload.name,
                email: payload.email,
                avatar_url: None,
            },
            password: payload.password,
        })
    }

    /// Applies a profile update.
    ///
    /// # Errors
    /// When the payload carries a password change, the old password must match the
    /// stored one and the confirmation must match the new password.
    fn on_update(&mut self, patch: UpdatePayload) -> Result<(), FrameworkError> {
        if let Some(change) = patch.credentials {
            if change.old_password != self.password {
                return Err(FrameworkError::Rejected("Old password does not match".to_string()));
            }
            if change.password != change.password_confirmation {
                return Err(FrameworkError::Rejected("Password confirmation does not match".to_string()));
            }
            self.password = change.password;
        }
        self.user.name = patch.name;
        self.user.email = patch.email;
        Ok(())
    }

    fn handle_action(&mut self, action: AccountAction) -> Result<User, FrameworkError> {
        match action {
            AccountAction::ReplaceAvatar(upload) => {
                if !upload.content_type().starts_with("image/") {
                    return Err(FrameworkError::Rejected(format!(
                        "Unsupported avatar type: {}",
                        upload.content_type()
                    )));
                }
                self.user.avatar_url = Some(format!("avatars/{}/{}", self.user.id, upload.file_name()));
                Ok(self.user.clone())
            }
        }
    }
}
