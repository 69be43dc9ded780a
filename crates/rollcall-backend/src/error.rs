use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rollcall::data::ErrorBody;
use rollcall::log;
use rollcall::validate::ValidationError;

/// Why a session request was refused. Rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,
    #[error("Session has ended")]
    Ended,
    #[error("Student already checked in")]
    AlreadyCheckedIn,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Payload(String),
}

impl SessionError {
    pub fn status(&self) -> StatusCode {
        match self {
            SessionError::NotFound => StatusCode::NOT_FOUND,
            SessionError::Ended | SessionError::AlreadyCheckedIn => StatusCode::BAD_REQUEST,
            SessionError::Invalid(_) | SessionError::Payload(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!(%status, detail = %self, "rejecting request");
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
