use std::fmt;

use super::User;

/// A user record as stored by the account service, including its password.
#[derive(Clone, PartialEq)]
pub struct Account {
    pub user: User,
    pub(crate) password: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Payload for creating a new account.
#[derive(Clone)]
pub struct AccountCreate {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AccountCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AccountCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
