//! Data structures exchanged between the web client and the attendance backend.
//!
//! Timestamps travel as the strings the backend produced. The client formats them at
//! display time so a malformed value degrades to a placeholder instead of failing the
//! whole response.

use serde::{Deserialize, Serialize};

use crate::id::SessionId;

/// Lifecycle of a session. `Ended` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Badge text shown in the session view and the navbar.
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Active => "ACTIVE",
            SessionStatus::Ended => "ENDED",
        }
    }
}

/// One recorded check-in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub roll_no: String,
    pub time: String,
}

/// Session state as returned by `GET /session/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub subject: String,
    pub status: SessionStatus,
    pub attendees_count: u32,
    pub started_at: String,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Body of `POST /session/start`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StartSession {
    pub subject: String,
}

/// Response of `POST /session/start`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionStarted {
    pub session_id: SessionId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub expires_at: String,
}

/// Body of `POST /session/{id}/checkin`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub roll_no: String,
}

/// Response of `POST /session/{id}/checkin`; `total` is the attendee count after the check-in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedIn {
    #[serde(default = "ok")]
    pub ok: bool,
    pub total: u32,
}

/// Response of `POST /session/{id}/end`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnded {
    pub ok: bool,
}

fn ok() -> bool {
    true
}

/// Error payload of a rejected request.
///
/// Only a string `detail` is shown to users; validation failures from some backends
/// carry a list of field errors there instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: serde_json::Value::String(detail.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.detail.as_str().filter(|detail| !detail.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    #[serde(rename = "UP")]
    Up,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UptimeInfo {
    pub seconds: i64,
    pub human: String,
}

/// Response of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub started_at: String,
    pub uptime: UptimeInfo,
    pub active_sessions: usize,
}
