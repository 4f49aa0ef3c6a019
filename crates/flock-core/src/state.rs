//! Mutable values and errors for one open form session.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Current form values keyed by field name.
pub type FormValues = serde_json::Map<String, Value>;

/// Field-scoped messages keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Where a field error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSource {
    /// Local schema validation.
    Schema,
    /// Attached from a rejected submission.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub source: ErrorSource,
    pub message: String,
}

/// Compute the values a form opens with: `defaults`, overlaid key by key
/// with `edit` when editing.
pub fn seed_values(defaults: &FormValues, edit: Option<&FormValues>) -> FormValues {
    let mut values = defaults.clone();
    if let Some(edit) = edit {
        for (key, value) in edit {
            values.insert(key.clone(), value.clone());
        }
    }
    values
}

/// Values, errors and flags for one modal session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    values: FormValues,
    errors: BTreeMap<String, FieldError>,
    dirty: bool,
    submitting: bool,
}

impl FormState {
    pub fn seeded(values: FormValues) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Record user input. Editing a field clears whatever error it carried.
    pub fn set_value(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
        self.errors.remove(name);
        self.dirty = true;
    }

    pub fn errors(&self) -> &BTreeMap<String, FieldError> {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    pub fn set_error(&mut self, name: &str, source: ErrorSource, message: impl Into<String>) {
        self.errors.insert(
            name.to_string(),
            FieldError {
                source,
                message: message.into(),
            },
        );
    }

    pub fn remove_error(&mut self, name: &str) -> Option<FieldError> {
        self.errors.remove(name)
    }

    /// Drop every error that came from `source`.
    pub fn clear_errors(&mut self, source: ErrorSource) {
        self.errors.retain(|_, e| e.source != source);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> FormValues {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_seed_without_edit_is_defaults() {
        let defaults = map(json!({"nama": "", "status": "aktif"}));
        assert_eq!(seed_values(&defaults, None), defaults);
    }

    #[test]
    fn test_seed_edit_overrides_defaults() {
        let defaults = map(json!({"nama": "", "status": "aktif", "rayon": null}));
        let edit = map(json!({"nama": "Yohanes", "rayon": 3, "id": 17}));

        let seeded = seed_values(&defaults, Some(&edit));
        assert_eq!(
            seeded,
            map(json!({"nama": "Yohanes", "status": "aktif", "rayon": 3, "id": 17}))
        );
    }

    #[test]
    fn test_set_value_clears_field_error_and_marks_dirty() {
        let mut state = FormState::seeded(map(json!({"email": "a@b.c"})));
        state.set_error("email", ErrorSource::Manual, "taken");
        state.set_error("nama", ErrorSource::Schema, "required");
        assert!(!state.is_dirty());

        state.set_value("email", json!("x@y.z"));
        assert!(state.is_dirty());
        assert!(state.error("email").is_none());
        assert!(state.error("nama").is_some());
    }

    #[test]
    fn test_clear_errors_by_source() {
        let mut state = FormState::default();
        state.set_error("email", ErrorSource::Manual, "taken");
        state.set_error("nama", ErrorSource::Schema, "required");

        state.clear_errors(ErrorSource::Schema);
        assert_eq!(state.errors().len(), 1);
        assert_eq!(state.error("email").map(|e| e.message.as_str()), Some("taken"));
    }
}
