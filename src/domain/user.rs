use serde::{Deserialize, Serialize};

/// The signed-in user as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Reference to the current avatar image, if one was ever uploaded.
    #[serde(default)]
    pub avatar_url: Option<String>,
}
