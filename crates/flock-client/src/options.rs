//! Remote options over HTTP.

use async_trait::async_trait;
use flock_core::{FlockError, FlockResult, OptionSource, SelectOption};
use serde_json::Value;
use tracing::warn;

use crate::client::ApiClient;

/// Queries `GET {endpoint}?search={query}` on the backend.
#[derive(Clone)]
pub struct HttpOptionSource {
    client: ApiClient,
}

impl HttpOptionSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OptionSource for HttpOptionSource {
    async fn search(&self, endpoint: &str, query: &str) -> FlockResult<Vec<SelectOption>> {
        let body = self
            .client
            .get_json(endpoint, &[("search", query)])
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Option lookup failed");
                FlockError::OptionLookup(e.to_string())
            })?;
        Ok(parse_options(&body))
    }
}

/// Pull options out of a list response. Accepts a bare array, `{data: [..]}`
/// or `{data: {items: [..]}}`.
pub fn parse_options(body: &Value) -> Vec<SelectOption> {
    let items = body
        .as_array()
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| {
            body.get("data")
                .and_then(|d| d.get("items"))
                .and_then(Value::as_array)
        });

    items
        .map(|items| items.iter().filter_map(option_from).collect())
        .unwrap_or_default()
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn option_from(item: &Value) -> Option<SelectOption> {
    let value = ["value", "id"].iter().find_map(|k| item.get(*k).and_then(scalar))?;
    let label = ["label", "nama", "name", "title"]
        .iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| value.clone());
    Some(SelectOption::new(value, label))
}
