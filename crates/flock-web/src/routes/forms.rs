//! Form catalog and session creation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flock_core::{render_fields, FlockError, FormDefinition, FormModal, FormValues, ModalView, OptionLookup};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::api_error;
use crate::state::{AppState, Session, WebSocketMessage};

#[derive(Serialize)]
pub struct FormSummary {
    pub key: String,
    pub title: String,
    pub resource: String,
    pub fields: usize,
}

#[derive(Deserialize, Default)]
pub struct OpenRequest {
    #[serde(default)]
    pub edit_data: Option<FormValues>,
}

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub view: ModalView,
}

/// GET /api/forms
pub async fn list_forms(State(state): State<AppState>) -> Json<Vec<FormSummary>> {
    let forms = state
        .config
        .forms()
        .into_iter()
        .map(|f| FormSummary {
            fields: render_fields(&f.fields).len(),
            key: f.key,
            title: f.title,
            resource: f.resource,
        })
        .collect();
    Json(forms)
}

/// POST /api/forms/{key}/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<OpenRequest>,
) -> Result<(StatusCode, Json<SessionCreated>), (StatusCode, String)> {
    let form = state
        .config
        .form(&key)
        .ok_or_else(|| api_error(FlockError::FormNotFound(key.clone())))?;

    let (session_id, view) = open_session(&state, form, req.edit_data).await;
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id, view })))
}

/// Build a modal for `form`, open it and register the session.
pub(crate) async fn open_session(
    state: &AppState,
    form: FormDefinition,
    edit_data: Option<FormValues>,
) -> (String, ModalView) {
    let tx = state.tx.clone();
    let form_key = form.key.clone();
    let config = form
        .modal_config(state.config.locale)
        .with_on_success(Arc::new(move || {
            let _ = tx.send(WebSocketMessage::FormSaved {
                form_key: form_key.clone(),
            });
        }));

    let mut modal = FormModal::new(config);
    modal.open(edit_data);

    let debounce = state.config.option_debounce();
    let lookups = modal
        .fields()
        .iter()
        .filter_map(|f| {
            OptionLookup::for_widget(&f.widget, state.options.clone(), debounce)
                .map(|lookup| (f.name.clone(), lookup))
        })
        .collect();

    let session_id = Uuid::new_v4().to_string();
    let view = modal.view();
    info!(session = %session_id, form = %form.key, edit = modal.is_edit(), "Session opened");

    state.sessions.lock().await.insert(
        session_id.clone(),
        Session {
            form,
            modal,
            lookups,
        },
    );
    (session_id, view)
}
