//! Client-side schema validation.

use chrono::NaiveDate;
use serde_json::Value;

use crate::field::{FieldDescriptor, FieldKind};
use crate::messages::{fill, Messages};
use crate::state::{FieldErrors, FormValues};

/// Validates a full set of form values before submission.
pub trait Validator: Send + Sync {
    /// Return every failing field with its message.
    fn validate(&self, values: &FormValues) -> Result<(), FieldErrors>;
}

impl<F> Validator for F
where
    F: Fn(&FormValues) -> Result<(), FieldErrors> + Send + Sync,
{
    fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        self(values)
    }
}

/// Rules derived from one descriptor.
#[derive(Debug, Clone)]
struct FieldRule {
    name: String,
    kind: FieldKind,
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min: Option<f64>,
    max: Option<f64>,
}

/// A validator built from the constraints declared on field descriptors.
#[derive(Debug, Clone)]
pub struct DescriptorSchema {
    rules: Vec<FieldRule>,
    messages: &'static Messages,
}

impl DescriptorSchema {
    pub fn from_fields(fields: &[FieldDescriptor], messages: &'static Messages) -> Self {
        let rules = fields
            .iter()
            .map(|f| FieldRule {
                name: f.name.clone(),
                kind: f.kind.clone(),
                required: f.required,
                min_length: f.min_length,
                max_length: f.max_length,
                min: f.min,
                max: f.max,
            })
            .collect();
        Self { rules, messages }
    }

    /// True when no descriptor declares any constraint.
    pub fn is_trivial(&self) -> bool {
        self.rules.iter().all(|r| {
            !r.required
                && r.min_length.is_none()
                && r.max_length.is_none()
                && r.min.is_none()
                && r.max.is_none()
                && !matches!(
                    r.kind,
                    FieldKind::Email | FieldKind::Number | FieldKind::Date | FieldKind::DatePicker
                )
        })
    }

    fn check(&self, rule: &FieldRule, value: Option<&Value>) -> Option<String> {
        let m = self.messages;

        let value = match value {
            Some(v) if !is_empty(v) => v,
            _ => return rule.required.then(|| m.required.to_string()),
        };

        match rule.kind {
            FieldKind::Email => {
                if !value.as_str().is_some_and(looks_like_email) {
                    return Some(m.invalid_email.to_string());
                }
            }
            FieldKind::Number => {
                let Some(n) = as_number(value) else {
                    return Some(m.invalid_number.to_string());
                };
                if let Some(min) = rule.min {
                    if n < min {
                        return Some(fill(m.below_min, min));
                    }
                }
                if let Some(max) = rule.max {
                    if n > max {
                        return Some(fill(m.above_max, max));
                    }
                }
            }
            FieldKind::Date | FieldKind::DatePicker => {
                let valid = value
                    .as_str()
                    .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
                if !valid {
                    return Some(m.invalid_date.to_string());
                }
            }
            _ => {}
        }

        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if let Some(min) = rule.min_length {
                if len < min {
                    return Some(fill(m.too_short, min));
                }
            }
            if let Some(max) = rule.max_length {
                if len > max {
                    return Some(fill(m.too_long, max));
                }
            }
        }

        None
    }
}

impl Validator for DescriptorSchema {
    fn validate(&self, values: &FormValues) -> Result<(), FieldErrors> {
        let errors: FieldErrors = self
            .rules
            .iter()
            .filter_map(|rule| {
                self.check(rule, values.get(&rule.name))
                    .map(|msg| (rule.name.clone(), msg))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
