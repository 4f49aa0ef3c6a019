//! Static checks over form definitions.
//!
//! None of these stop a form from rendering; they flag definitions that
//! render differently from what their author likely meant.

use std::fmt;

use serde::Serialize;

use crate::config::FormDefinition;
use crate::field::{find_duplicates, FieldKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum FormIssue {
    NoFields,
    /// The later descriptor replaces the earlier one.
    DuplicateField { name: String, first: usize, second: usize },
    /// A select with an endpoint ignores its static options.
    ShadowedOptions { field: String },
    /// An autocomplete with neither endpoint nor options offers nothing.
    EmptyAutocomplete { field: String },
    /// Rendered as a plain text input.
    UnknownKind { field: String, kind: String },
}

impl fmt::Display for FormIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFields => write!(f, "form has no fields"),
            Self::DuplicateField { name, first, second } => write!(
                f,
                "field '{}' declared at {} and {}; the later one wins",
                name, first, second
            ),
            Self::ShadowedOptions { field } => write!(
                f,
                "select '{}' has an endpoint, its static options are ignored",
                field
            ),
            Self::EmptyAutocomplete { field } => {
                write!(f, "autocomplete '{}' has no endpoint and no options", field)
            }
            Self::UnknownKind { field, kind } => {
                write!(f, "field '{}' has unknown type '{}', shown as text", field, kind)
            }
        }
    }
}

pub fn lint_form(form: &FormDefinition) -> Vec<FormIssue> {
    let mut issues = Vec::new();
    if form.fields.is_empty() {
        issues.push(FormIssue::NoFields);
    }

    for (name, first, second) in find_duplicates(&form.fields) {
        issues.push(FormIssue::DuplicateField { name, first, second });
    }

    for field in &form.fields {
        let has_options = field.options.as_ref().is_some_and(|o| !o.is_empty());
        match &field.kind {
            FieldKind::Select if field.api_endpoint.is_some() && has_options => {
                issues.push(FormIssue::ShadowedOptions {
                    field: field.name.clone(),
                });
            }
            FieldKind::Autocomplete if field.api_endpoint.is_none() && !has_options => {
                issues.push(FormIssue::EmptyAutocomplete {
                    field: field.name.clone(),
                });
            }
            FieldKind::Unknown(kind) => issues.push(FormIssue::UnknownKind {
                field: field.name.clone(),
                kind: kind.clone(),
            }),
            _ => {}
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::master_forms;
    use crate::field::{FieldDescriptor, SelectOption};

    #[test]
    fn test_catalog_is_clean() {
        for form in master_forms() {
            assert!(lint_form(&form).is_empty(), "{}", form.key);
        }
    }

    #[test]
    fn test_flags_each_issue() {
        let form = FormDefinition::new(
            "uji",
            "Uji",
            "/uji",
            vec![
                FieldDescriptor::new(FieldKind::Text, "nama", "Nama"),
                FieldDescriptor::new(FieldKind::Select, "rayon", "Rayon")
                    .with_endpoint("/rayon")
                    .with_options(vec![SelectOption::new("1", "Rayon 1")]),
                FieldDescriptor::new(FieldKind::Autocomplete, "kota", "Kota"),
                FieldDescriptor::new(FieldKind::from_str("color"), "warna", "Warna"),
                FieldDescriptor::new(FieldKind::TextArea, "nama", "Nama Lengkap"),
            ],
        );

        let issues = lint_form(&form);
        assert_eq!(
            issues,
            vec![
                FormIssue::DuplicateField {
                    name: "nama".to_string(),
                    first: 0,
                    second: 4
                },
                FormIssue::ShadowedOptions {
                    field: "rayon".to_string()
                },
                FormIssue::EmptyAutocomplete {
                    field: "kota".to_string()
                },
                FormIssue::UnknownKind {
                    field: "warna".to_string(),
                    kind: "color".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_form() {
        let form = FormDefinition::new("kosong", "Kosong", "/kosong", Vec::new());
        assert_eq!(lint_form(&form), vec![FormIssue::NoFields]);
    }
}
