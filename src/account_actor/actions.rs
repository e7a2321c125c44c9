use crate::domain::AvatarUpload;

/// Custom actions for Account entities beyond create/update.
#[derive(Debug, Clone)]
pub enum AccountAction {
    /// Stores the uploaded image and points the user's avatar at it.
    ReplaceAvatar(AvatarUpload),
}
