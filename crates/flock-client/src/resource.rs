//! Generic CRUD over one backend collection.

use anyhow::bail;
use async_trait::async_trait;
use flock_core::{FormValues, SubmitResult, Submitter};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::ClientResult;

/// One REST collection, e.g. `/jenis-ibadah`.
#[derive(Clone)]
pub struct Resource {
    client: ApiClient,
    path: String,
}

impl Resource {
    pub fn new(client: ApiClient, path: &str) -> Self {
        Self {
            client,
            path: format!("/{}", path.trim_matches('/')),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list(&self, params: &[(&str, &str)]) -> ClientResult<Value> {
        self.client.get_json(&self.path, params).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Value> {
        self.client.get_json(&self.item_path(id), &[]).await
    }

    pub async fn create(&self, data: &FormValues) -> SubmitResult {
        debug!(path = %self.path, "Creating record");
        let request = self.client.request(Method::POST, &self.path).json(data);
        self.client.call(request).await
    }

    pub async fn update(&self, id: &str, data: &FormValues) -> SubmitResult {
        debug!(path = %self.path, id, "Updating record");
        let request = self.client.request(Method::PATCH, &self.item_path(id)).json(data);
        self.client.call(request).await
    }

    pub async fn delete(&self, id: &str) -> SubmitResult {
        info!(path = %self.path, id, "Deleting record");
        let request = self.client.request(Method::DELETE, &self.item_path(id));
        self.client.call(request).await
    }

    /// Records filtered by a parent, e.g.
    /// `/geografi/kota-kabupaten/by-provinsi?idProvinsi=7`.
    pub async fn children(&self, segment: &str, param: &str, parent_id: &str) -> ClientResult<Value> {
        let path = format!("{}/{}", self.path, segment.trim_matches('/'));
        self.client.get_json(&path, &[(param, parent_id)]).await
    }
}

/// Saves a form through a [`Resource`]: POST when creating, PATCH on the
/// record id when editing.
pub struct ResourceSubmitter {
    resource: Resource,
    id_field: String,
}

impl ResourceSubmitter {
    pub fn new(resource: Resource, id_field: &str) -> Self {
        Self {
            resource,
            id_field: id_field.to_string(),
        }
    }
}

fn record_id(data: &FormValues, id_field: &str) -> Option<String> {
    match data.get(id_field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl Submitter for ResourceSubmitter {
    async fn submit(&self, data: FormValues, is_edit: bool) -> anyhow::Result<SubmitResult> {
        if !is_edit {
            return Ok(self.resource.create(&data).await);
        }

        let Some(id) = record_id(&data, &self.id_field) else {
            bail!("edit data has no '{}' to update", self.id_field);
        };
        Ok(self.resource.update(&id, &data).await)
    }
}
