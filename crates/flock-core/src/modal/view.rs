//! Read-only snapshot of a modal for rendering.

use serde::Serialize;
use serde_json::Value;

use super::{FormModal, ModalPhase};
use crate::render::Widget;

/// One field as it should be drawn right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub widget: Widget,
    pub value: Value,
    pub error: Option<String>,
}

/// The whole modal as it should be drawn right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub phase: ModalPhase,
    pub heading: String,
    pub fields: Vec<FieldView>,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Both confirm and cancel are disabled while submitting.
    pub controls_disabled: bool,
    pub generation: u64,
}

impl FormModal {
    pub fn view(&self) -> ModalView {
        let m = self.messages();
        let submitting = matches!(self.phase, ModalPhase::Submitting(_));
        let edit = self.is_edit();

        let heading = format!(
            "{} {}",
            if edit { m.heading_edit } else { m.heading_create },
            self.config.title
        );
        let confirm_label = match (submitting, edit) {
            (true, true) => m.updating,
            (true, false) => m.saving,
            (false, true) => m.confirm_edit,
            (false, false) => m.confirm_create,
        };

        let fields = if self.is_open() {
            self.fields
                .iter()
                .map(|f| FieldView {
                    name: f.name.clone(),
                    label: f.label.clone(),
                    placeholder: f.placeholder.clone(),
                    required: f.required,
                    widget: f.widget.clone(),
                    value: self.state.value(&f.name).cloned().unwrap_or(Value::Null),
                    error: self.state.error(&f.name).map(|e| e.message.clone()),
                })
                .collect()
        } else {
            Vec::new()
        };

        ModalView {
            phase: self.phase,
            heading,
            fields,
            confirm_label: confirm_label.to_string(),
            cancel_label: m.cancel.to_string(),
            controls_disabled: submitting,
            generation: self.generation,
        }
    }
}
