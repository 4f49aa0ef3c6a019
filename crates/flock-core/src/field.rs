//! Declarative field descriptors.

use serde::{Deserialize, Serialize};

/// Input type named by a descriptor's `type` key.
///
/// Unknown type strings are kept verbatim so that a form definition written
/// against a newer widget set still loads; the renderer degrades them to a
/// plain text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    DatePicker,
    TextArea,
    Select,
    Autocomplete,
    Unknown(String),
}

impl FieldKind {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "email" => Self::Email,
            "number" => Self::Number,
            "date" => Self::Date,
            "datepicker" => Self::DatePicker,
            "textarea" => Self::TextArea,
            "select" => Self::Select,
            "autocomplete" => Self::Autocomplete,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::DatePicker => "datepicker",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Autocomplete => "autocomplete",
            Self::Unknown(other) => other,
        }
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Declarative description of one form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default, alias = "apiEndpoint", skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, alias = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, alias = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldDescriptor {
    /// Create an optional field with no constraints.
    pub fn new(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            label: label.into(),
            placeholder: None,
            options: None,
            api_endpoint: None,
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether the widget for this field resolves options remotely.
    pub fn loads_remote_options(&self) -> bool {
        match self.kind {
            FieldKind::Select => self.api_endpoint.is_some(),
            FieldKind::Autocomplete => true,
            _ => false,
        }
    }
}

/// Every repeated name as `(name, first_index, repeat_index)`, in order of
/// the repeats.
pub fn find_duplicates(fields: &[FieldDescriptor]) -> Vec<(String, usize, usize)> {
    let mut duplicates = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if let Some(first) = fields[..i].iter().position(|f| f.name == field.name) {
            duplicates.push((field.name.clone(), first, i));
        }
    }
    duplicates
}
