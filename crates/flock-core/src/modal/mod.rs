//! Create/edit modal orchestration.
//!
//! A [`FormModal`] owns the form state of one modal and drives it through
//! `Closed -> Open(mode) -> Submitting(mode) -> Closed | Open(mode)`.
//!
//! Submission is split in two so that callers holding the modal behind a
//! lock can release it while the backend call is in flight:
//! [`FormModal::begin_submit`] validates and hands out a [`SubmitTicket`],
//! [`FormModal::finish_submit`] reconciles the result. Every open and close
//! bumps a generation counter; a ticket from an older generation is
//! discarded when it comes back.

pub mod view;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{FlockError, FlockResult};
use crate::field::FieldDescriptor;
use crate::messages::{Locale, Messages};
use crate::notifier::{Notification, Notifier};
use crate::render::{render_fields, RenderedField};
use crate::schema::{DescriptorSchema, Validator};
use crate::state::{seed_values, ErrorSource, FieldErrors, FormState, FormValues};
use crate::submit::{SubmitResult, Submitter};

pub use view::{FieldView, ModalView};

/// Whether the modal creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "mode", rename_all = "snake_case")]
pub enum ModalPhase {
    Closed,
    Open(FormMode),
    Submitting(FormMode),
}

impl fmt::Display for ModalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open(_) => write!(f, "open"),
            Self::Submitting(_) => write!(f, "submitting"),
        }
    }
}

/// Why the modal is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The cancel button.
    Cancel,
    /// A click outside the dialog.
    Backdrop,
    /// The owner withdrew the open signal.
    Dismissed,
}

/// Callback run once after a successful save.
pub type SuccessHook = Arc<dyn Fn() + Send + Sync>;

/// Everything a modal needs besides its runtime state.
#[derive(Clone)]
pub struct ModalConfig {
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
    pub default_values: FormValues,
    /// `None` disables client-side validation.
    pub schema: Option<Arc<dyn Validator>>,
    pub on_success: Option<SuccessHook>,
    pub locale: Locale,
}

impl ModalConfig {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: title.into(),
            fields,
            default_values: FormValues::new(),
            schema: None,
            on_success: None,
            locale: Locale::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: FormValues) -> Self {
        self.default_values = defaults;
        self
    }

    pub fn with_schema(mut self, schema: Arc<dyn Validator>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Validate with the constraints declared on the descriptors, unless
    /// none are declared.
    pub fn with_descriptor_schema(mut self) -> Self {
        let schema = DescriptorSchema::from_fields(&self.fields, self.locale.messages());
        if !schema.is_trivial() {
            self.schema = Some(Arc::new(schema));
        }
        self
    }

    pub fn with_on_success(mut self, hook: SuccessHook) -> Self {
        self.on_success = Some(hook);
        self
    }

    /// Set the locale. Call before `with_descriptor_schema` so validation
    /// messages use it too.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Proof that a submission was started, carrying the data to persist.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    generation: u64,
    pub data: FormValues,
    pub is_edit: bool,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of [`FormModal::begin_submit`].
#[derive(Debug, Clone)]
pub enum Prepared {
    Ticket(SubmitTicket),
    /// Local validation failed; nothing may be sent.
    Invalid(FieldErrors),
}

/// What a submit attempt ended in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Local validation failed. The submitter was not called.
    Invalid { errors: FieldErrors },
    /// Saved; the modal is closed.
    Saved {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    /// The backend refused the data; the modal stays open.
    Rejected {
        message: String,
        field_errors: FieldErrors,
        /// Error keys that matched no field in this form.
        dropped: Vec<String>,
    },
    /// The submitter itself failed; the modal stays open.
    Failed,
    /// The modal was reopened or closed while the call was in flight.
    Stale,
}

/// Orchestrates one create/edit modal.
pub struct FormModal {
    config: ModalConfig,
    fields: Vec<RenderedField>,
    phase: ModalPhase,
    state: FormState,
    edit_data: Option<FormValues>,
    generation: u64,
}

impl FormModal {
    pub fn new(config: ModalConfig) -> Self {
        let fields = render_fields(&config.fields);
        Self {
            config,
            fields,
            phase: ModalPhase::Closed,
            state: FormState::default(),
            edit_data: None,
            generation: 0,
        }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn fields(&self) -> &[RenderedField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&RenderedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, ModalPhase::Closed)
    }

    pub fn is_edit(&self) -> bool {
        matches!(
            self.phase,
            ModalPhase::Open(FormMode::Edit) | ModalPhase::Submitting(FormMode::Edit)
        )
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn messages(&self) -> &'static Messages {
        self.config.locale.messages()
    }

    /// Open the modal, seeding values from the defaults and, when editing,
    /// from `edit_data` on top. Reopening an open modal re-seeds it.
    pub fn open(&mut self, edit_data: Option<FormValues>) {
        let mode = if edit_data.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        };

        self.generation += 1;
        self.state = FormState::seeded(seed_values(&self.config.default_values, edit_data.as_ref()));
        self.edit_data = edit_data;
        self.phase = ModalPhase::Open(mode);

        debug!(
            title = %self.config.title,
            generation = self.generation,
            ?mode,
            "Modal opened"
        );
    }

    /// Follow the owner's `is_open` / edit target. Re-seeds on the open edge
    /// and whenever the edit target changes while open.
    pub fn sync(&mut self, is_open: bool, edit_data: Option<FormValues>) {
        match (is_open, self.is_open()) {
            (true, false) => self.open(edit_data),
            (true, true) if self.edit_data != edit_data => self.open(edit_data),
            (false, true) => self.discard(),
            _ => {}
        }
    }

    /// Record user input for one field.
    pub fn set_value(&mut self, name: &str, value: Value) -> FlockResult<()> {
        if !matches!(self.phase, ModalPhase::Open(_)) {
            return Err(FlockError::transition("edit a field", self.phase));
        }
        if self.field(name).is_none() {
            return Err(FlockError::FieldNotFound(name.to_string()));
        }
        self.state.set_value(name, value);
        Ok(())
    }

    /// Close the modal and discard its state. Cancel and backdrop clicks are
    /// refused while a submission is in flight.
    pub fn close(&mut self, reason: CloseReason) -> FlockResult<()> {
        match (self.phase, reason) {
            (ModalPhase::Closed, _) => Ok(()),
            (ModalPhase::Submitting(_), CloseReason::Cancel | CloseReason::Backdrop) => {
                Err(FlockError::transition("close", self.phase))
            }
            _ => {
                debug!(title = %self.config.title, ?reason, "Modal closed");
                self.discard();
                Ok(())
            }
        }
    }

    fn discard(&mut self) {
        self.generation += 1;
        self.phase = ModalPhase::Closed;
        self.state = FormState::default();
        self.edit_data = None;
    }

    /// Validate and, if valid, move to `Submitting`.
    pub fn begin_submit(&mut self) -> FlockResult<Prepared> {
        let mode = match self.phase {
            ModalPhase::Open(mode) => mode,
            other => return Err(FlockError::transition("submit", other)),
        };

        if let Some(schema) = &self.config.schema {
            self.state.clear_errors(ErrorSource::Schema);
            if let Err(errors) = schema.validate(self.state.values()) {
                for (name, message) in &errors {
                    self.state.set_error(name, ErrorSource::Schema, message.as_str());
                }
                debug!(count = errors.len(), "Form failed validation");
                return Ok(Prepared::Invalid(errors));
            }
        }

        // A fresh attempt supersedes the previous rejection.
        self.state.clear_errors(ErrorSource::Manual);
        self.state.set_submitting(true);
        self.phase = ModalPhase::Submitting(mode);

        Ok(Prepared::Ticket(SubmitTicket {
            generation: self.generation,
            data: self.state.values().clone(),
            is_edit: mode == FormMode::Edit,
        }))
    }

    /// Reconcile the submitter's answer with the modal.
    ///
    /// Sends exactly one notification unless the ticket is stale.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: anyhow::Result<SubmitResult>,
        notifier: &dyn Notifier,
    ) -> SubmitOutcome {
        let mode = match self.phase {
            ModalPhase::Submitting(mode) if ticket.generation == self.generation => mode,
            _ => {
                debug!(
                    ticket = ticket.generation,
                    current = self.generation,
                    "Discarding stale submission result"
                );
                return SubmitOutcome::Stale;
            }
        };

        let m = self.messages();
        let is_edit = mode == FormMode::Edit;
        self.state.set_submitting(false);

        match result {
            Err(e) => {
                warn!(error = %e, title = %self.config.title, "Form submission error");
                notifier.notify(Notification::error(m.system_error_title, m.system_error));
                self.phase = ModalPhase::Open(mode);
                SubmitOutcome::Failed
            }
            Ok(result) if result.success => {
                let message = result
                    .message
                    .unwrap_or_else(|| (if is_edit { m.updated } else { m.created }).to_string());
                notifier.notify(Notification::success(m.success_title, message.as_str()));
                info!(title = %self.config.title, ?mode, "Form saved");

                if let Some(hook) = &self.config.on_success {
                    hook();
                }
                self.discard();
                SubmitOutcome::Saved {
                    message,
                    data: result.data,
                }
            }
            Ok(result) => {
                let mut field_errors = FieldErrors::new();
                let mut dropped = Vec::new();
                for (name, message) in result.errors.unwrap_or_default() {
                    if self.field(&name).is_some() {
                        self.state.set_error(&name, ErrorSource::Manual, message.as_str());
                        field_errors.insert(name, message);
                    } else {
                        warn!(field = %name, "Dropping submit error for unknown field");
                        dropped.push(name);
                    }
                }

                let (title, fallback) = if is_edit {
                    (m.update_failed_title, m.update_failed)
                } else {
                    (m.create_failed_title, m.create_failed)
                };
                let message = result.message.unwrap_or_else(|| fallback.to_string());
                notifier.notify(Notification::error(title, message.as_str()));
                self.phase = ModalPhase::Open(mode);

                SubmitOutcome::Rejected {
                    message,
                    field_errors,
                    dropped,
                }
            }
        }
    }

    /// Validate, call the submitter and reconcile, in one go.
    pub async fn submit(
        &mut self,
        submitter: &dyn Submitter,
        notifier: &dyn Notifier,
    ) -> FlockResult<SubmitOutcome> {
        let ticket = match self.begin_submit()? {
            Prepared::Ticket(ticket) => ticket,
            Prepared::Invalid(errors) => return Ok(SubmitOutcome::Invalid { errors }),
        };
        let result = submitter.submit(ticket.data.clone(), ticket.is_edit).await;
        Ok(self.finish_submit(ticket, result, notifier))
    }
}
