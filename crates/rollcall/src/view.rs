//! State of the session view and the fetch that drives it.

use crate::api::{ApiError, AttendanceApi};
use crate::data::Session;
use crate::feedback::{Action, NETWORK_MESSAGE, Notice, Notifier};
use crate::format::display_timestamp;
use crate::id::SessionId;

/// Why the session could not be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    NotFound,
    Network,
    Other,
}

impl LoadError {
    pub fn from_api(err: &ApiError) -> Self {
        if err.status() == Some(404) {
            LoadError::NotFound
        } else if err.is_network() {
            LoadError::Network
        } else {
            LoadError::Other
        }
    }

    /// Text of the error display that replaces the session details.
    pub fn message(&self) -> &'static str {
        match self {
            LoadError::NotFound => "Session not found",
            LoadError::Network => "Network error",
            LoadError::Other => "Failed to load session",
        }
    }

    /// Text of the toast raised alongside the error display.
    pub fn notice(&self) -> &'static str {
        match self {
            LoadError::NotFound => "Session not found or has expired",
            LoadError::Network => NETWORK_MESSAGE,
            LoadError::Other => Action::LoadSession.failure_message(),
        }
    }
}

/// What the session view renders. Every completed fetch replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionView {
    #[default]
    Loading,
    Failed(LoadError),
    Loaded(Session),
}

impl SessionView {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionView::Loaded(session) => Some(session),
            _ => None,
        }
    }
}

/// One rendered attendee line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRow {
    pub roll_no: String,
    pub checked_in: String,
}

/// Rows in the order the backend returned them.
pub fn attendee_rows(session: &Session) -> Vec<AttendeeRow> {
    session
        .attendees
        .iter()
        .map(|attendee| AttendeeRow {
            roll_no: attendee.roll_no.clone(),
            checked_in: display_timestamp(&attendee.time),
        })
        .collect()
}

/// Fetches the session and turns the outcome into the next view state.
/// Failures also raise a notice.
pub async fn load_session<A, N>(api: &A, notifier: &N, id: &SessionId) -> SessionView
where
    A: AttendanceApi + ?Sized,
    N: Notifier + ?Sized,
{
    match api.fetch_session(id).await {
        Ok(session) => {
            tracing::debug!(%id, attendees = session.attendees_count, "session loaded");
            SessionView::Loaded(session)
        }
        Err(err) => {
            let reason = LoadError::from_api(&err);
            tracing::warn!(%id, error = %err, ?reason, "failed to load session");
            notifier.notify(Notice::error(reason.notice()));
            SessionView::Failed(reason)
        }
    }
}
