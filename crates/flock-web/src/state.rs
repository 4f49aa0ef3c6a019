//! Application state.

use std::collections::HashMap;
use std::sync::Arc;

use flock_client::{ApiClient, HttpOptionSource, Resource, ResourceSubmitter};
use flock_core::{
    FlockConfig, FormDefinition, FormModal, Notification, Notifier, OptionLookup, OptionSource,
    Submitter, TracingNotifier,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};

/// WebSocket message types.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    /// A toast for the browser showing `session_id`.
    Toast {
        session_id: String,
        notification: Notification,
    },
    /// A record was saved through `form_key`; lists showing it should reload.
    FormSaved { form_key: String },
}

/// Hands out the persistence collaborator for a form.
pub trait SubmitterFactory: Send + Sync {
    fn submitter(&self, form: &FormDefinition) -> Arc<dyn Submitter>;
}

/// Saves every form through its backend resource.
pub struct BackendSubmitters {
    client: ApiClient,
}

impl BackendSubmitters {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl SubmitterFactory for BackendSubmitters {
    fn submitter(&self, form: &FormDefinition) -> Arc<dyn Submitter> {
        let resource = Resource::new(self.client.clone(), &form.resource);
        Arc::new(ResourceSubmitter::new(resource, &form.id_field))
    }
}

/// One browser's modal for one form.
pub struct Session {
    pub form: FormDefinition,
    pub modal: FormModal,
    /// Option lookups for remote selects, by field name.
    pub lookups: HashMap<String, OptionLookup>,
}

/// Logs each notification and forwards it to WebSocket clients, tagged
/// with the session it belongs to.
#[derive(Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<WebSocketMessage>,
    session_id: String,
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        TracingNotifier.notify(notification.clone());
        let _ = self.tx.send(WebSocketMessage::Toast {
            session_id: self.session_id.clone(),
            notification,
        });
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FlockConfig>,
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    pub submitters: Arc<dyn SubmitterFactory>,
    pub options: Arc<dyn OptionSource>,
    pub tx: broadcast::Sender<WebSocketMessage>,
}

impl AppState {
    /// State backed by the configured REST backend.
    pub fn new(config: FlockConfig) -> Self {
        let client = ApiClient::new(&config.api_base_url, config.locale);
        let submitters = Arc::new(BackendSubmitters::new(client.clone()));
        let options = Arc::new(HttpOptionSource::new(client));
        Self::with_backends(config, submitters, options)
    }

    pub fn with_backends(
        config: FlockConfig,
        submitters: Arc<dyn SubmitterFactory>,
        options: Arc<dyn OptionSource>,
    ) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            submitters,
            options,
            tx,
        }
    }

    /// Notifier whose toasts reach only the browser showing `session_id`.
    pub fn notifier(&self, session_id: &str) -> BroadcastNotifier {
        BroadcastNotifier {
            tx: self.tx.clone(),
            session_id: session_id.to_string(),
        }
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }
}
