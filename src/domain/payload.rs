use std::fmt;

use serde::Serialize;

/// The password triad, only present when the user asked to change the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

/// Normalized form data that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProfile {
    pub name: String,
    pub email: String,
    pub credentials: Option<PasswordChange>,
}

/// Body of the profile update request.
///
/// Serializes to a flat object; the password keys are absent when
/// `credentials` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePayload {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub credentials: Option<PasswordChange>,
}

impl UpdatePayload {
    pub fn changes_password(&self) -> bool {
        self.credentials.is_some()
    }
}

impl From<ValidProfile> for UpdatePayload {
    fn from(valid: ValidProfile) -> Self {
        Self {
            name: valid.name,
            email: valid.email,
            credentials: valid.credentials,
        }
    }
}
