//! Session route handlers: edit, submit, close, option search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use flock_core::{
    CloseReason, FlockError, FormValues, ModalView, Prepared, SelectOption, SubmitOutcome,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{api_error, session_not_found};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Deserialize)]
pub struct SetValueRequest {
    pub name: String,
    pub value: Value,
}

#[derive(Deserialize, Default)]
pub struct ReopenRequest {
    #[serde(default)]
    pub edit_data: Option<FormValues>,
}

#[derive(Deserialize)]
pub struct CloseRequest {
    pub reason: CloseReason,
}

#[derive(Deserialize)]
pub struct OptionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    /// Absent when the session ended while the backend call was running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ModalView>,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    /// `None` when a newer search on the same field replaced this one.
    pub options: Option<Vec<SelectOption>>,
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ModalView> {
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(Json(session.modal.view()))
}

/// PUT /api/sessions/{id}/values
pub async fn set_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SetValueRequest>,
) -> ApiResult<ModalView> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
    session.modal.set_value(&req.name, req.value).map_err(api_error)?;
    Ok(Json(session.modal.view()))
}

/// POST /api/sessions/{id}/open
pub async fn reopen(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ReopenRequest>,
) -> ApiResult<ModalView> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
    session.modal.open(req.edit_data);
    Ok(Json(session.modal.view()))
}

/// POST /api/sessions/{id}/close
///
/// A closed session is finished and is dropped.
pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CloseRequest>,
) -> ApiResult<ModalView> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
    session.modal.close(req.reason).map_err(api_error)?;
    let view = session.modal.view();
    if !session.modal.is_open() {
        sessions.remove(&id);
        info!(session = %id, reason = ?req.reason, "Session closed");
    }
    Ok(Json(view))
}

/// POST /api/sessions/{id}/submit
///
/// The session lock is not held while the backend call runs, so the modal
/// can still be viewed, reopened or dismissed in the meantime.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SubmitResponse> {
    let (ticket, submitter) = {
        let mut sessions = state.sessions.lock().await;
        let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(&id))?;
        match session.modal.begin_submit().map_err(api_error)? {
            Prepared::Invalid(errors) => {
                return Ok(Json(SubmitResponse {
                    outcome: SubmitOutcome::Invalid { errors },
                    view: Some(session.modal.view()),
                }));
            }
            Prepared::Ticket(ticket) => (ticket, state.submitters.submitter(&session.form)),
        }
    };

    debug!(session = %id, edit = ticket.is_edit, "Submitting form");
    let result = submitter.submit(ticket.data.clone(), ticket.is_edit).await;

    let mut sessions = state.sessions.lock().await;
    let Some(session) = sessions.get_mut(&id) else {
        debug!(session = %id, "Session ended during submit, discarding result");
        return Ok(Json(SubmitResponse {
            outcome: SubmitOutcome::Stale,
            view: None,
        }));
    };
    let outcome = session
        .modal
        .finish_submit(ticket, result, &state.notifier(&id));
    let view = session.modal.view();
    if matches!(outcome, SubmitOutcome::Saved { .. }) {
        sessions.remove(&id);
        info!(session = %id, "Session saved and closed");
    }
    Ok(Json(SubmitResponse {
        outcome,
        view: Some(view),
    }))
}

/// GET /api/sessions/{id}/options/{field}?q=
pub async fn search_options(
    State(state): State<AppState>,
    Path((id, field)): Path<(String, String)>,
    Query(query): Query<OptionQuery>,
) -> ApiResult<OptionsResponse> {
    let lookup = {
        let sessions = state.sessions.lock().await;
        let session = sessions.get(&id).ok_or_else(|| session_not_found(&id))?;
        if session.modal.field(&field).is_none() {
            return Err(api_error(FlockError::FieldNotFound(field)));
        }
        session
            .lookups
            .get(&field)
            .cloned()
            .ok_or_else(|| api_error(FlockError::NoRemoteOptions(field.clone())))?
    };

    let options = lookup.query(&query.q).await.map_err(api_error)?;
    Ok(Json(OptionsResponse { options }))
}
