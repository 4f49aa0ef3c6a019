//! Backend HTTP client.
//!
//! Writes never fail at this layer: every response, including transport
//! errors, is folded into a [`SubmitResult`] the form layer can show.

use std::time::Duration;

use flock_core::messages::fill;
use flock_core::{FieldErrors, Locale, Messages, SubmitResult};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    messages: &'static Messages,
}

impl ApiClient {
    pub fn new(base_url: &str, locale: Locale) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            messages: locale.messages(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// GET a JSON document. Non-2xx statuses are errors.
    pub async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> ClientResult<Value> {
        let response = self.request(Method::GET, path).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Send a write and fold whatever happens into a `SubmitResult`.
    pub async fn call(&self, request: RequestBuilder) -> SubmitResult {
        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.json::<Value>().await.ok();
                debug!(status, "Backend responded");
                interpret_response(status, body.as_ref(), self.messages)
            }
            Err(e) => {
                warn!(error = %e, "Backend call failed");
                let m = self.messages;
                let message = if e.is_connect() || e.is_timeout() || e.is_request() {
                    m.api_network
                } else {
                    m.api_unexpected
                };
                SubmitResult::rejected(message).with_errors(FieldErrors::new())
            }
        }
    }
}

/// Map a backend status and JSON body onto a `SubmitResult`.
///
/// 2xx is success, with the body's `data` echoed back when present. 500
/// always uses the fixed server-error message and drops field errors;
/// every other status prefers the body's `message` and `errors`.
pub fn interpret_response(status: u16, body: Option<&Value>, m: &Messages) -> SubmitResult {
    let body_message = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    if (200..300).contains(&status) {
        let data = body.map(|b| b.get("data").cloned().unwrap_or_else(|| b.clone()));
        return SubmitResult {
            success: true,
            message: Some(body_message.unwrap_or_else(|| m.api_ok.to_string())),
            errors: None,
            data,
        };
    }

    if status == 500 {
        return SubmitResult::rejected(m.api_server_error).with_errors(FieldErrors::new());
    }

    let fallback = match status {
        409 => m.api_conflict.to_string(),
        400 => m.api_bad_request.to_string(),
        404 => m.api_not_found.to_string(),
        422 => m.api_unprocessable.to_string(),
        other => fill(m.api_status, other),
    };

    SubmitResult::rejected(body_message.unwrap_or(fallback))
        .with_errors(body.map(field_errors).unwrap_or_default())
}

/// Read an `errors` object. Values may be a message or a list of messages;
/// lists contribute their first entry.
fn field_errors(body: &Value) -> FieldErrors {
    let Some(errors) = body.get("errors").and_then(Value::as_object) else {
        return FieldErrors::new();
    };

    errors
        .iter()
        .filter_map(|(field, value)| {
            let message = match value {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
                _ => None,
            };
            message.map(|m| (field.clone(), m))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::messages::INDONESIAN;
    use serde_json::json;

    #[test]
    fn test_success_uses_body_message_and_data() {
        let body = json!({"message": "Jenis ibadah dibuat", "data": {"id": 4}});
        let result = interpret_response(201, Some(&body), &INDONESIAN);
        assert!(result.success);
        assert_eq!(result.message.as_deref(), Some("Jenis ibadah dibuat"));
        assert_eq!(result.data, Some(json!({"id": 4})));
    }

    #[test]
    fn test_success_without_body() {
        let result = interpret_response(204, None, &INDONESIAN);
        assert!(result.success);
        assert_eq!(result.message.as_deref(), Some("Operasi berhasil"));
        assert_eq!(result.data, None);
    }

    #[test]
    fn test_conflict_carries_field_errors() {
        let body = json!({"errors": {"namaIbadah": "Sudah ada", "kode": ["Terlalu panjang", "x"]}});
        let result = interpret_response(409, Some(&body), &INDONESIAN);
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some(INDONESIAN.api_conflict));
        let errors = result.errors.unwrap();
        assert_eq!(errors["namaIbadah"], "Sudah ada");
        assert_eq!(errors["kode"], "Terlalu panjang");
    }

    #[test]
    fn test_status_defaults() {
        for (status, expected) in [
            (400, INDONESIAN.api_bad_request),
            (404, INDONESIAN.api_not_found),
            (422, INDONESIAN.api_unprocessable),
        ] {
            let result = interpret_response(status, None, &INDONESIAN);
            assert_eq!(result.message.as_deref(), Some(expected));
            assert_eq!(result.errors, Some(FieldErrors::new()));
        }
    }

    #[test]
    fn test_server_error_ignores_body() {
        let body = json!({"message": "stack trace", "errors": {"nama": "x"}});
        let result = interpret_response(500, Some(&body), &INDONESIAN);
        assert_eq!(result.message.as_deref(), Some(INDONESIAN.api_server_error));
        assert_eq!(result.errors, Some(FieldErrors::new()));
    }

    #[test]
    fn test_other_status_mentions_code() {
        let result = interpret_response(403, None, &INDONESIAN);
        assert_eq!(
            result.message.as_deref(),
            Some("Terjadi kesalahan (403). Silakan coba lagi.")
        );
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:8080/api/", Locale::Id);
        assert_eq!(client.url("/rayon"), "http://localhost:8080/api/rayon");
        assert_eq!(client.url("rayon/3"), "http://localhost:8080/api/rayon/3");
    }
}
