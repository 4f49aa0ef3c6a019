//! Multi-step form wizards.
//!
//! A wizard splits one form into steps. Moving forward validates only the
//! fields owned by the current step; moving back never validates.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FlockError, FlockResult};
use crate::messages::Messages;
use crate::notifier::{Notification, Notifier};
use crate::schema::Validator;
use crate::state::{ErrorSource, FieldErrors, FormState, FormValues};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardStep {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Fields validated when leaving this step. Empty for review steps.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl WizardStep {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Step cursor over a shared form state.
#[derive(Debug, Clone)]
pub struct Wizard {
    steps: Vec<WizardStep>,
    current: usize,
}

impl Wizard {
    pub fn new(steps: Vec<WizardStep>) -> FlockResult<Self> {
        if steps.is_empty() {
            return Err(FlockError::Config("a wizard needs at least one step".to_string()));
        }
        Ok(Self { steps, current: 0 })
    }

    pub fn steps(&self) -> &[WizardStep] {
        &self.steps
    }

    pub fn current(&self) -> &WizardStep {
        &self.steps[self.current]
    }

    /// 1-based position of the current step.
    pub fn step_number(&self) -> usize {
        self.current + 1
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Run `schema` and keep only the errors for the current step's fields.
    pub fn validate_step(&self, values: &FormValues, schema: &dyn Validator) -> Result<(), FieldErrors> {
        let step = self.current();
        let errors: FieldErrors = match schema.validate(values) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .into_iter()
                .filter(|(name, _)| step.fields.contains(name))
                .collect(),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate the current step and advance. On failure the step's errors
    /// are written to `state`, one notification is sent, and the cursor
    /// stays put. Returns whether the cursor moved.
    pub fn next(
        &mut self,
        state: &mut FormState,
        schema: &dyn Validator,
        notifier: &dyn Notifier,
        messages: &Messages,
    ) -> bool {
        for name in &self.current().fields {
            if state.error(name).is_some_and(|e| e.source == ErrorSource::Schema) {
                state.remove_error(name);
            }
        }

        if let Err(errors) = self.validate_step(state.values(), schema) {
            debug!(step = %self.current().id, count = errors.len(), "Wizard step failed validation");
            for (name, message) in &errors {
                state.set_error(name, ErrorSource::Schema, message.as_str());
            }
            notifier.notify(Notification::error(messages.step_invalid_title, messages.step_invalid));
            return false;
        }

        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump to a 1-based step: any earlier step directly, the following
    /// step through [`Wizard::next`]. Other targets are ignored.
    pub fn go_to(
        &mut self,
        step_number: usize,
        state: &mut FormState,
        schema: &dyn Validator,
        notifier: &dyn Notifier,
        messages: &Messages,
    ) -> bool {
        let target = match step_number.checked_sub(1) {
            Some(t) => t,
            None => return false,
        };
        if target < self.current {
            self.current = target;
            true
        } else if target == self.current + 1 {
            self.next(state, schema, notifier, messages)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldKind};
    use crate::messages::INDONESIAN;
    use crate::schema::DescriptorSchema;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<Notification>>);

    impl Notifier for Collect {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn majelis_schema() -> DescriptorSchema {
        let fields = vec![
            FieldDescriptor::new(FieldKind::Text, "namaLengkap", "Nama Lengkap").required(),
            FieldDescriptor::new(FieldKind::Date, "mulai", "Tanggal Mulai Jabatan").required(),
            FieldDescriptor::new(FieldKind::Text, "username", "Username").required(),
            FieldDescriptor::new(FieldKind::Email, "email", "Email").required(),
        ];
        DescriptorSchema::from_fields(&fields, &INDONESIAN)
    }

    fn wizard() -> Wizard {
        Wizard::new(vec![
            WizardStep::new("majelis-info", "Data Majelis", &["namaLengkap", "mulai"]),
            WizardStep::new("account-info", "Data Akun", &["username", "email"]),
            WizardStep::new("confirmation", "Konfirmasi", &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_wizard_rejected() {
        assert!(Wizard::new(Vec::new()).is_err());
    }

    #[test]
    fn test_next_validates_only_current_step() {
        let mut wizard = wizard();
        let schema = majelis_schema();
        let notifier = Collect::default();
        let mut state = FormState::seeded(
            json!({"namaLengkap": "Pdt. Andreas", "mulai": "2024-01-07", "username": "", "email": ""})
                .as_object()
                .cloned()
                .unwrap(),
        );

        assert!(wizard.next(&mut state, &schema, &notifier, &INDONESIAN));
        assert_eq!(wizard.step_number(), 2);
        assert!(!state.has_errors());

        assert!(!wizard.next(&mut state, &schema, &notifier, &INDONESIAN));
        assert_eq!(wizard.step_number(), 2);
        assert_eq!(state.errors().len(), 2);

        let sent = notifier.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "Validasi Gagal");
    }

    #[test]
    fn test_go_to_moves_back_freely_but_forward_one_step() {
        let mut wizard = wizard();
        let schema = majelis_schema();
        let notifier = Collect::default();
        let mut state = FormState::seeded(
            json!({"namaLengkap": "A", "mulai": "2024-01-07", "username": "andreas", "email": "a@gki.or.id"})
                .as_object()
                .cloned()
                .unwrap(),
        );

        assert!(!wizard.go_to(3, &mut state, &schema, &notifier, &INDONESIAN));
        assert!(wizard.go_to(2, &mut state, &schema, &notifier, &INDONESIAN));
        assert!(wizard.go_to(3, &mut state, &schema, &notifier, &INDONESIAN));
        assert!(wizard.is_last());
        assert!(!wizard.next(&mut state, &schema, &notifier, &INDONESIAN));

        assert!(wizard.go_to(1, &mut state, &schema, &notifier, &INDONESIAN));
        assert!(wizard.is_first());
        wizard.previous();
        assert_eq!(wizard.step_number(), 1);
        assert!(!wizard.go_to(0, &mut state, &schema, &notifier, &INDONESIAN));
    }
}
