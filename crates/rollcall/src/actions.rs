//! The user-triggered flows: start a session, check a student in, end a session.
//!
//! Each flow validates first, flips the busy flag only once a request is actually
//! going out, reports the outcome through a [`Notifier`] and always clears the busy
//! flag again. The Yew components hand in setters for their state; the flows
//! themselves never touch the DOM.

use crate::api::AttendanceApi;
use crate::feedback::{Action, Notice, Notifier, describe_failure};
use crate::id::SessionId;
use crate::validate::{RollNo, Subject};

/// A single-line text input guarded by a busy flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    value: String,
    busy: bool,
}

impl FormField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            busy: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Submit is offered only for non-blank input and while no request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.value.trim().is_empty()
    }

    /// Edits are ignored while a request is in flight; the input is disabled then.
    pub fn edited(&self, value: impl Into<String>) -> Self {
        if self.busy {
            return self.clone();
        }
        Self::new(value)
    }

    pub fn submitting(&self) -> Self {
        Self {
            value: self.value.clone(),
            busy: true,
        }
    }

    /// The request finished; `clear` empties the input.
    pub fn settled(&self, clear: bool) -> Self {
        Self {
            value: if clear { String::new() } else { self.value.clone() },
            busy: false,
        }
    }
}

/// Starts a session for the subject typed into `form`.
///
/// Returns the new session's id so the caller can navigate to it.
pub async fn start_session<A, N>(
    api: &A,
    notifier: &N,
    form: &FormField,
    mut update: impl FnMut(FormField),
) -> Option<SessionId>
where
    A: AttendanceApi + ?Sized,
    N: Notifier + ?Sized,
{
    if form.is_busy() {
        return None;
    }
    let subject = match Subject::parse(form.value()) {
        Ok(subject) => subject,
        Err(err) => {
            notifier.notify(Notice::error(err.to_string()));
            return None;
        }
    };

    update(form.submitting());
    let started = match api.start_session(&subject).await {
        Ok(started) => {
            tracing::info!(session = %started.session_id, %subject, "session started");
            notifier.notify(Notice::success("Session started successfully!"));
            Some(started.session_id)
        }
        Err(err) => {
            tracing::warn!(error = %err, %subject, "failed to start session");
            notifier.notify(Notice::error(describe_failure(&err, Action::StartSession)));
            None
        }
    };
    update(form.settled(false));
    started
}

/// Checks in the roll number typed into `form`.
///
/// On success the input is cleared and `on_checked_in` runs once; the dialog stays open
/// so the next student can be entered straight away.
pub async fn check_in<A, N>(
    api: &A,
    notifier: &N,
    session: &SessionId,
    form: &FormField,
    mut update: impl FnMut(FormField),
    on_checked_in: impl FnOnce(),
) -> Option<u32>
where
    A: AttendanceApi + ?Sized,
    N: Notifier + ?Sized,
{
    if form.is_busy() {
        return None;
    }
    let roll_no = match RollNo::parse(form.value()) {
        Ok(roll_no) => roll_no,
        Err(err) => {
            notifier.notify(Notice::error(err.to_string()));
            return None;
        }
    };

    update(form.submitting());
    match api.check_in(session, &roll_no).await {
        Ok(checked_in) => {
            tracing::info!(%session, %roll_no, total = checked_in.total, "student checked in");
            notifier.notify(Notice::success(format!(
                "Student checked in successfully! Total: {}",
                checked_in.total
            )));
            update(form.settled(true));
            on_checked_in();
            Some(checked_in.total)
        }
        Err(err) => {
            tracing::warn!(%session, %roll_no, error = %err, "check-in failed");
            notifier.notify(Notice::error(describe_failure(&err, Action::CheckIn)));
            update(form.settled(false));
            None
        }
    }
}

/// Ends the session. `set_ending` drives the end control's busy state.
///
/// Returns true when the caller should re-fetch right away.
pub async fn end_session<A, N>(
    api: &A,
    notifier: &N,
    session: &SessionId,
    mut set_ending: impl FnMut(bool),
) -> bool
where
    A: AttendanceApi + ?Sized,
    N: Notifier + ?Sized,
{
    set_ending(true);
    let ended = match api.end_session(session).await {
        Ok(()) => {
            tracing::info!(%session, "session ended");
            notifier.notify(Notice::success("Session ended successfully!"));
            true
        }
        Err(err) => {
            tracing::warn!(%session, error = %err, "failed to end session");
            notifier.notify(Notice::error(describe_failure(&err, Action::EndSession)));
            false
        }
    };
    set_ending(false);
    ended
}
