use crate::domain::{Field, FieldErrors, ProfileFormData};

/// Live values and displayed errors of one form instance.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    values: ProfileFormData,
    errors: FieldErrors,
}

impl FieldRegistry {
    pub fn new(initial: ProfileFormData) -> Self {
        Self {
            values: initial,
            errors: FieldErrors::new(),
        }
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn snapshot(&self) -> ProfileFormData {
        self.values.clone()
    }

    /// Replaces every displayed error with `errors`.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = FieldErrors::new();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}
