use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use rollcall::data::{CheckIn, CheckedIn, Session, SessionEnded, SessionStarted, StartSession};
use rollcall::id::SessionId;
use rollcall::validate::{RollNo, Subject};

use crate::error::SessionError;
use crate::services::SessionService;

/// Unreadable JSON bodies are reported like validation failures.
fn payload<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, SessionError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| SessionError::Payload(rejection.body_text()))
}

/// Handler to start a new session
pub async fn start(
    State(state): State<Arc<crate::AppState>>,
    body: Result<Json<StartSession>, JsonRejection>,
) -> Result<Json<SessionStarted>, SessionError> {
    let request = payload(body)?;
    let subject = Subject::parse(&request.subject)?;
    state.sessions.start(subject).await.map(Json)
}

/// Handler to get a session by ID
pub async fn get(
    State(state): State<Arc<crate::AppState>>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<Session>, SessionError> {
    state.sessions.get(&session_id).await.map(Json)
}

/// Handler to check a student in
pub async fn check_in(
    State(state): State<Arc<crate::AppState>>,
    Path(session_id): Path<SessionId>,
    body: Result<Json<CheckIn>, JsonRejection>,
) -> Result<Json<CheckedIn>, SessionError> {
    // The body is checked before the session is looked up.
    let request = payload(body)?;
    let roll_no = RollNo::parse(&request.roll_no)?;
    state.sessions.check_in(&session_id, roll_no).await.map(Json)
}

/// Handler to end a session
pub async fn end(
    State(state): State<Arc<crate::AppState>>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<SessionEnded>, SessionError> {
    state.sessions.end(&session_id).await.map(Json)
}
