//! Server-rendered pages.
//!
//! The modal page is a thin shell over the JSON API: it is rendered from a
//! [`ModalView`] and posts every change back through `/api/sessions`.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use flock_core::{FieldView, ModalPhase, ModalView, SelectOption, Widget};
use serde_json::Value;

use super::forms::open_session;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    forms: Vec<FormLink>,
}

struct FormLink {
    key: String,
    title: String,
}

#[derive(Template)]
#[template(path = "modal.html")]
struct ModalTemplate {
    session_id: String,
    open: bool,
    heading: String,
    confirm_label: String,
    cancel_label: String,
    disabled: bool,
    fields: Vec<FieldRow>,
}

/// View model for one field, flattened for the template.
struct FieldRow {
    name: String,
    label: String,
    placeholder: String,
    required: bool,
    kind: &'static str,
    input_type: String,
    value: String,
    error: String,
    options: Vec<SelectOption>,
    remote: bool,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl FieldRow {
    fn from_view(field: &FieldView) -> Self {
        let (input_type, options, remote) = match &field.widget {
            Widget::Input { input_type } => (input_type.clone(), Vec::new(), false),
            Widget::Select { options } => (String::new(), options.clone(), false),
            Widget::RemoteSelect { seed, .. } => (String::new(), seed.clone(), true),
            Widget::DatePicker | Widget::TextArea => (String::new(), Vec::new(), false),
        };
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            placeholder: field.placeholder.clone().unwrap_or_default(),
            required: field.required,
            kind: field.widget.kind_name(),
            input_type,
            value: display_value(&field.value),
            error: field.error.clone().unwrap_or_default(),
            options,
            remote,
        }
    }
}

impl ModalTemplate {
    fn from_view(session_id: String, view: &ModalView) -> Self {
        Self {
            session_id,
            open: view.phase != ModalPhase::Closed,
            heading: view.heading.clone(),
            confirm_label: view.confirm_label.clone(),
            cancel_label: view.cancel_label.clone(),
            disabled: view.controls_disabled,
            fields: view.fields.iter().map(FieldRow::from_view).collect(),
        }
    }
}

fn render<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Template error: {}", e)),
        )
            .into_response(),
    }
}

/// GET / - Form index.
pub async fn index(State(state): State<AppState>) -> Response {
    let forms = state
        .config
        .forms()
        .into_iter()
        .map(|f| FormLink {
            key: f.key,
            title: f.title,
        })
        .collect();
    render(IndexTemplate { forms })
}

/// GET /forms/{key}/new - Open a create session and show it.
pub async fn new_session(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let Some(form) = state.config.form(&key) else {
        return (StatusCode::NOT_FOUND, Html(format!("Form not found: {}", key))).into_response();
    };
    let (session_id, _) = open_session(&state, form, None).await;
    Redirect::to(&format!("/sessions/{}", session_id)).into_response()
}

/// GET /sessions/{id} - Render the modal.
pub async fn show_session(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let view = {
        let sessions = state.sessions.lock().await;
        match sessions.get(&id) {
            Some(session) => session.modal.view(),
            None => {
                return (StatusCode::NOT_FOUND, Html("Session not found".to_string())).into_response()
            }
        }
    };
    render(ModalTemplate::from_view(id, &view))
}
