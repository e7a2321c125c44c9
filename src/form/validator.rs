//! Conditional validation of the profile form.
//!
//! Rules live in a table evaluated against the whole snapshot, so a rule can
//! look at sibling fields. Every rule runs; for each field the first failing
//! rule in table order supplies the message.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::ProfileMessages;
use crate::domain::{Field, FieldErrors, PasswordChange, ProfileFormData, ValidProfile};

/// Dot-atom local part, then a domain of at least two labels. Labels are
/// alphanumeric with inner hyphens only.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$"#,
    )
    .expect("email pattern is a valid regex")
});

fn is_well_formed_email(email: &str) -> bool {
    if !EMAIL_PATTERN.is_match(email) {
        return false;
    }
    // The regex has no lookaround, so dots in the local part are checked here.
    let local = email.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

type Check = fn(&ProfileFormData, &ProfileMessages) -> Result<(), String>;

struct Rule {
    field: Field,
    check: Check,
}

const RULES: &[Rule] = &[
    Rule { field: Field::Name, check: name_present },
    Rule { field: Field::Email, check: email_present },
    Rule { field: Field::Email, check: email_well_formed },
    Rule { field: Field::Password, check: password_present_for_change },
    Rule { field: Field::PasswordConfirmation, check: confirmation_present_for_change },
    Rule { field: Field::PasswordConfirmation, check: confirmation_matches },
];

fn name_present(data: &ProfileFormData, messages: &ProfileMessages) -> Result<(), String> {
    if data.name.trim().is_empty() {
        return Err(messages.name_required.clone());
    }
    Ok(())
}

fn email_present(data: &ProfileFormData, messages: &ProfileMessages) -> Result<(), String> {
    if data.email.trim().is_empty() {
        return Err(messages.email_required.clone());
    }
    Ok(())
}

fn email_well_formed(data: &ProfileFormData, messages: &ProfileMessages) -> Result<(), String> {
    if !is_well_formed_email(data.email.trim()) {
        return Err(messages.email_invalid.clone());
    }
    Ok(())
}

fn password_present_for_change(
    data: &ProfileFormData,
    messages: &ProfileMessages,
) -> Result<(), String> {
    if data.wants_password_change() && data.password.is_empty() {
        return Err(messages.field_required.clone());
    }
    Ok(())
}

fn confirmation_present_for_change(
    data: &ProfileFormData,
    messages: &ProfileMessages,
) -> Result<(), String> {
    if data.wants_password_change() && data.password_confirmation.is_empty() {
        return Err(messages.field_required.clone());
    }
    Ok(())
}

fn confirmation_matches(data: &ProfileFormData, messages: &ProfileMessages) -> Result<(), String> {
    if data.wants_password_change() && data.password_confirmation != data.password {
        return Err(messages.confirmation_mismatch.clone());
    }
    Ok(())
}

/// Validates profile snapshots against the rule table.
#[derive(Debug, Clone, Default)]
pub struct ProfileValidator {
    messages: ProfileMessages,
}

impl ProfileValidator {
    pub fn new(messages: ProfileMessages) -> Self {
        Self { messages }
    }

    /// Collects every field violation in `data`. Empty when the snapshot is valid.
    pub fn check(&self, data: &ProfileFormData) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for rule in RULES {
            if errors.contains(rule.field) {
                continue;
            }
            if let Err(message) = (rule.check)(data, &self.messages) {
                errors.insert(rule.field, message);
            }
        }
        errors
    }

    /// Returns the normalized profile or the complete set of field errors.
    pub fn validate(&self, data: &ProfileFormData) -> Result<ValidProfile, FieldErrors> {
        let errors = self.check(data);
        if !errors.is_empty() {
            debug!(fields = %errors, "Profile validation failed");
            return Err(errors);
        }

        let credentials = data.wants_password_change().then(|| PasswordChange {
            old_password: data.old_password.clone(),
            password: data.password.clone(),
            password_confirmation: data.password_confirmation.clone(),
        });

        Ok(ValidProfile {
            name: data.name.trim().to_string(),
            email: data.email.trim().to_string(),
            credentials,
        })
    }
}
