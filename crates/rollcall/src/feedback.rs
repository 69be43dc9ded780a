//! User-facing notifications and the failure messages that feed them.

use crate::api::ApiError;

pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One toast-style message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for notices. The web client renders them as toasts.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// The operation a request was attempting, used to word its generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartSession,
    LoadSession,
    CheckIn,
    EndSession,
}

impl Action {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::StartSession => "Failed to start session. Please try again.",
            Action::LoadSession => "Failed to load session. Please try again.",
            Action::CheckIn => "Failed to check in student. Please try again.",
            Action::EndSession => "Failed to end session. Please try again.",
        }
    }
}

/// Message for a failed mutation: the backend's own detail, else a connectivity
/// message for transport failures, else the action's generic failure.
pub fn describe_failure(err: &ApiError, action: Action) -> String {
    if let Some(detail) = err.detail() {
        detail.to_string()
    } else if err.is_network() {
        NETWORK_MESSAGE.to_string()
    } else {
        action.failure_message().to_string()
    }
}
