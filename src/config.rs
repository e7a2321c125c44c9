//! Screen configuration: user-facing strings and runtime knobs.

/// Every string the profile flow shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileMessages {
    pub name_required: String,
    pub email_required: String,
    pub email_invalid: String,
    pub field_required: String,
    pub confirmation_mismatch: String,
    pub update_succeeded: String,
    pub update_failed_title: String,
    pub update_failed_message: String,
    pub avatar_failed_title: String,
    pub avatar_upload_failed_message: String,
}

impl Default for ProfileMessages {
    fn default() -> Self {
        Self {
            name_required: "Name is required".into(),
            email_required: "E-mail is required".into(),
            email_invalid: "Enter a valid e-mail".into(),
            field_required: "Required field".into(),
            confirmation_mismatch: "Confirmation does not match".into(),
            update_succeeded: "Profile updated successfully!".into(),
            update_failed_title: "Profile update failed".into(),
            update_failed_message:
                "An error occurred while updating your profile, please try again.".into(),
            avatar_failed_title: "Failed to update your avatar".into(),
            avatar_upload_failed_message: "The new avatar could not be uploaded.".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub messages: ProfileMessages,
    /// Buffer size of the actor request channels.
    pub channel_buffer: usize,
    /// Show a notification when an avatar upload fails after a successful capture.
    pub notify_upload_failures: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            messages: ProfileMessages::default(),
            channel_buffer: 32,
            notify_upload_failures: true,
        }
    }
}
