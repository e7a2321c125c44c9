use std::collections::BTreeMap;
use std::fmt;

use super::User;

/// The fixed set of inputs on the profile form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    OldPassword,
    Password,
    PasswordConfirmation,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::OldPassword,
        Field::Password,
        Field::PasswordConfirmation,
    ];

    /// Wire name of the field, as used in payloads and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::OldPassword => "old_password",
            Field::Password => "password",
            Field::PasswordConfirmation => "password_confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values of the profile form as typed by the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileFormData {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ProfileFormData {
    /// Prefills name and email from the user; password fields start empty.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::OldPassword => &self.old_password,
            Field::Password => &self.password,
            Field::PasswordConfirmation => &self.password_confirmation,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::OldPassword => &mut self.old_password,
            Field::Password => &mut self.password,
            Field::PasswordConfirmation => &mut self.password_confirmation,
        };
        *slot = value.into();
    }

    /// True when the user started a password change.
    pub fn wants_password_change(&self) -> bool {
        !self.old_password.is_empty()
    }
}

impl fmt::Debug for ProfileFormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &str| if value.is_empty() { "" } else { "***" };
        f.debug_struct("ProfileFormData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("old_password", &mask(&self.old_password))
            .field("password", &mask(&self.password))
            .field("password_confirmation", &mask(&self.password_confirmation))
            .finish()
    }
}

/// One message per field. Inserting for a field that already has a message replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_debug_masks_passwords() {
        let mut data = ProfileFormData::default();
        data.set(Field::Name, "Ana");
        data.set(Field::OldPassword, "hunter2");
        let rendered = format!("{data:?}");
        assert!(rendered.contains("Ana"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_field_errors_last_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "first");
        errors.insert(Field::Email, "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some("second"));
    }

    #[test]
    fn test_field_errors_iterate_in_form_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::PasswordConfirmation, "c");
        errors.insert(Field::Name, "a");
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::Name, Field::PasswordConfirmation]);
        assert_eq!(errors.to_string(), "name: a; password_confirmation: c");
    }
}
