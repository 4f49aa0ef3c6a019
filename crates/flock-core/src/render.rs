//! Field registry: resolves descriptors to concrete widgets.
//!
//! Dispatch happens once, when a form is built. Callers then walk the
//! resulting [`RenderedField`] list instead of re-inspecting `type` strings.

use serde::Serialize;
use tracing::warn;

use crate::field::{FieldDescriptor, FieldKind, SelectOption};

/// A concrete input widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    /// Single-line input; `input_type` is the HTML input type.
    Input { input_type: String },
    /// Calendar picker emitting `YYYY-MM-DD`.
    DatePicker,
    TextArea,
    /// Static select bound to a fixed option list.
    Select { options: Vec<SelectOption> },
    /// Searchable select that queries `endpoint` as the user types.
    /// `seed` is shown before the first query returns.
    RemoteSelect {
        endpoint: Option<String>,
        seed: Vec<SelectOption>,
    },
}

impl Widget {
    /// Short name used by templates and terminal output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Input { .. } => "input",
            Self::DatePicker => "date",
            Self::TextArea => "textarea",
            Self::Select { .. } => "select",
            Self::RemoteSelect { .. } => "remote-select",
        }
    }

    /// Resolve the widget for one descriptor. First matching rule wins.
    pub fn for_descriptor(field: &FieldDescriptor) -> Self {
        match &field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Number => Self::Input {
                input_type: field.kind.as_str().to_string(),
            },
            FieldKind::Date | FieldKind::DatePicker => Self::DatePicker,
            FieldKind::TextArea => Self::TextArea,
            // An endpoint turns a select into a remote lookup; static options are dropped.
            FieldKind::Select => match &field.api_endpoint {
                Some(endpoint) => Self::RemoteSelect {
                    endpoint: Some(endpoint.clone()),
                    seed: Vec::new(),
                },
                None => Self::Select {
                    options: field.options.clone().unwrap_or_default(),
                },
            },
            FieldKind::Autocomplete => Self::RemoteSelect {
                endpoint: field.api_endpoint.clone(),
                seed: field.options.clone().unwrap_or_default(),
            },
            FieldKind::Unknown(_) => Self::Input {
                input_type: "text".to_string(),
            },
        }
    }
}

/// A descriptor resolved to its widget, bound to the form value under `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub widget: Widget,
}

impl RenderedField {
    pub fn from_descriptor(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            required: field.required,
            widget: Widget::for_descriptor(field),
        }
    }
}

/// Render descriptors in order, one widget per distinct name.
///
/// A repeated name replaces the widget already rendered for that name, in
/// the earlier slot: the last descriptor wins. Well-formed field sets never
/// hit this path; it is kept deterministic so a broken definition still
/// renders something predictable.
pub fn render_fields(fields: &[FieldDescriptor]) -> Vec<RenderedField> {
    let mut rendered: Vec<RenderedField> = Vec::with_capacity(fields.len());

    for field in fields {
        let widget = RenderedField::from_descriptor(field);
        match rendered.iter().position(|r| r.name == field.name) {
            Some(slot) => {
                warn!(field = %field.name, slot, "Duplicate field name, later descriptor replaces earlier widget");
                rendered[slot] = widget;
            }
            None => rendered.push(widget),
        }
    }

    rendered
}
