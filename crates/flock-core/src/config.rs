//! Configuration file (`flock.toml`).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog;
use crate::error::FlockResult;
use crate::field::{FieldDescriptor, FieldKind};
use crate::messages::Locale;
use crate::modal::ModalConfig;
use crate::state::FormValues;

/// Default backend URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Environment variable overriding `api_base_url`.
pub const API_URL_ENV: &str = "FLOCK_API_URL";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_true() -> bool {
    true
}

/// One create/edit form bound to a backend resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub key: String,
    pub title: String,
    /// Collection path, e.g. `/jenis-ibadah`.
    pub resource: String,
    /// Field carrying the record id when editing.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default)]
    pub defaults: FormValues,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormDefinition {
    pub fn new(key: &str, title: &str, resource: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            resource: resource.to_string(),
            id_field: default_id_field(),
            defaults: FormValues::new(),
            fields,
        }
    }

    /// Blank value per field (empty string for typed inputs, null for
    /// selects), overlaid with the configured defaults.
    pub fn default_values(&self) -> FormValues {
        let mut values: FormValues = self
            .fields
            .iter()
            .map(|f| {
                let blank = match f.kind {
                    FieldKind::Select | FieldKind::Autocomplete => Value::Null,
                    _ => Value::String(String::new()),
                };
                (f.name.clone(), blank)
            })
            .collect();
        for (key, value) in &self.defaults {
            values.insert(key.clone(), value.clone());
        }
        values
    }

    pub fn modal_config(&self, locale: Locale) -> ModalConfig {
        ModalConfig::new(self.title.clone(), self.fields.clone())
            .with_locale(locale)
            .with_defaults(self.default_values())
            .with_descriptor_schema()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlockConfig {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_debounce_ms")]
    pub option_debounce_ms: u64,
    /// Serve the built-in master-data forms next to the configured ones.
    #[serde(default = "default_true")]
    pub include_catalog: bool,
    #[serde(default)]
    pub forms: Vec<FormDefinition>,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            locale: Locale::default(),
            option_debounce_ms: default_debounce_ms(),
            include_catalog: true,
            forms: Vec::new(),
        }
    }
}

impl FlockConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    /// `FLOCK_API_URL` wins over the file.
    pub fn load(path: &Path) -> FlockResult<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)?
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn from_toml_str(content: &str) -> FlockResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    pub fn option_debounce(&self) -> Duration {
        Duration::from_millis(self.option_debounce_ms)
    }

    /// Configured forms first, then catalog forms not overridden by key.
    pub fn forms(&self) -> Vec<FormDefinition> {
        let mut forms = self.forms.clone();
        if self.include_catalog {
            for form in catalog::master_forms() {
                if !forms.iter().any(|f| f.key == form.key) {
                    forms.push(form);
                }
            }
        }
        forms
    }

    pub fn form(&self, key: &str) -> Option<FormDefinition> {
        self.forms().into_iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"
api_base_url = "http://gereja.local/api"
locale = "en"
include_catalog = false

[[forms]]
key = "jemaat"
title = "Jemaat"
resource = "/jemaat"
id_field = "idJemaat"

[forms.defaults]
status = "aktif"

[[forms.fields]]
type = "text"
name = "nama"
label = "Nama"
required = true
min_length = 3

[[forms.fields]]
type = "select"
name = "idRayon"
label = "Rayon"
apiEndpoint = "/rayon"
"#;

    #[test]
    fn test_parse_sample() {
        let config = FlockConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.api_base_url, "http://gereja.local/api");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.option_debounce(), Duration::from_millis(300));

        let forms = config.forms();
        assert_eq!(forms.len(), 1);
        let jemaat = &forms[0];
        assert_eq!(jemaat.id_field, "idJemaat");
        assert_eq!(jemaat.fields.len(), 2);
        assert_eq!(jemaat.fields[1].api_endpoint.as_deref(), Some("/rayon"));
    }

    #[test]
    fn test_default_values_blank_then_configured() {
        let config = FlockConfig::from_toml_str(SAMPLE).unwrap();
        let jemaat = config.form("jemaat").unwrap();
        assert_eq!(
            Value::Object(jemaat.default_values()),
            json!({"nama": "", "idRayon": null, "status": "aktif"})
        );
    }

    #[test]
    fn test_configured_form_overrides_catalog_key() {
        let config = FlockConfig::from_toml_str(
            r#"
[[forms]]
key = "rayon"
title = "Rayon Pelayanan"
resource = "/rayon"
"#,
        )
        .unwrap();

        let forms = config.forms();
        assert_eq!(forms.iter().filter(|f| f.key == "rayon").count(), 1);
        assert_eq!(config.form("rayon").unwrap().title, "Rayon Pelayanan");
        assert!(config.form("pendidikan").is_some());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = FlockConfig::load(Path::new("/nonexistent/flock.toml")).unwrap();
        assert!(config.include_catalog);
        assert!(!config.forms().is_empty());
    }

    #[test]
    fn test_api_url_override() {
        let config = FlockConfig::default()
            .with_api_url_override(Some("http://10.0.0.2/api".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2/api");

        let config = FlockConfig::default().with_api_url_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }
}
