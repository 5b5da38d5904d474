//! Request handlers mapping REST calls onto [`QueueEngine`] operations.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::OfficeHours;
use crate::engine::{Admission, QueueEngine};
use crate::models::session::{SessionId, SessionStatus};

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct HttpState {
    /// The engine behind every endpoint.
    pub engine: Arc<QueueEngine>,
    /// Window applied when a submission does not state office hours.
    pub office_hours: OfficeHours,
}

/// Query string for `POST /api/chat/start`.
#[derive(Debug, Deserialize)]
pub struct StartParams {
    /// Explicit office-hours flag; derived from the local clock when absent.
    #[serde(default, alias = "isOfficeHours")]
    pub is_office_hours: Option<bool>,
}

/// Body of a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
    /// Identifier of the admitted session.
    pub session_id: SessionId,
}

/// Body of a status query.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Session the status refers to.
    pub session_id: SessionId,
    /// Reported status.
    pub status: SessionStatus,
}

/// Body of a shift change.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftResponse {
    /// Shift now in effect.
    pub shift: i32,
}

/// Body returned with `429 Too Many Requests` on rejection.
pub const QUEUE_FULL_MESSAGE: &str = "queue full, try again later";

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/chat/start`
pub async fn start_chat(
    State(state): State<HttpState>,
    Query(params): Query<StartParams>,
) -> Response {
    let is_office_hours = params
        .is_office_hours
        .unwrap_or_else(|| state.office_hours.contains(Local::now().hour()));

    match state.engine.submit(is_office_hours).await {
        Admission::Accepted { session_id, .. } => {
            Json(StartResponse { session_id }).into_response()
        }
        Admission::Rejected => {
            (StatusCode::TOO_MANY_REQUESTS, QUEUE_FULL_MESSAGE).into_response()
        }
    }
}

/// `POST /api/chat/poll/{id}`
pub async fn poll_chat(State(state): State<HttpState>, Path(id): Path<Uuid>) -> StatusCode {
    state.engine.record_liveness(SessionId(id)).await;
    StatusCode::OK
}

/// `GET /api/chat/status/{id}`
pub async fn chat_status(State(state): State<HttpState>, Path(id): Path<Uuid>) -> Response {
    let session_id = SessionId(id);
    let status = state.engine.status(session_id).await;
    let code = if status == SessionStatus::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (code, Json(StatusResponse { session_id, status })).into_response()
}

/// `POST /api/chat/shift/{shift}`
pub async fn change_shift(
    State(state): State<HttpState>,
    Path(shift): Path<i32>,
) -> Json<ShiftResponse> {
    state.engine.change_shift(shift).await;
    Json(ShiftResponse { shift })
}
