//! Test doubles shared by the unit tests of this crate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::api::{ApiError, ApiResult, AttendanceApi, status_error};
use crate::data::{Attendee, CheckedIn, Session, SessionStarted, SessionStatus};
use crate::feedback::{Notice, Notifier};
use crate::id::SessionId;
use crate::poll::Scheduler;
use crate::validate::{RollNo, Subject};

pub fn sample_session() -> Session {
    let attendee = |roll_no: &str, time: &str| Attendee {
        roll_no: roll_no.to_string(),
        time: time.to_string(),
    };
    Session {
        subject: "Artificial Intelligence".to_string(),
        status: SessionStatus::Active,
        attendees_count: 3,
        started_at: "2025-03-04T09:15:00.123456".to_string(),
        attendees: vec![
            attendee("AIE22039", "2025-03-04T09:16:10.000001"),
            attendee("AIE22001", "2025-03-04T09:17:42.500000"),
            attendee("AIE22017", "2025-03-04T09:20:03"),
        ],
    }
}

fn offline() -> ApiError {
    ApiError::NetworkError(gloo_net::Error::GlooError("Failed to fetch".to_string()))
}

/// Canned answer for `fetch_session`.
#[derive(Debug, Clone)]
pub enum FetchReply {
    Session(Session),
    Status(u16),
    Detail(u16, &'static str),
    Offline,
}

/// Canned answer for the mutating calls.
#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Ok,
    Status(u16),
    Detail(u16, &'static str),
    Offline,
}

impl Outcome {
    fn into_result<T>(self, endpoint: &str, ok: impl FnOnce() -> T) -> ApiResult<T> {
        match self {
            Outcome::Ok => Ok(ok()),
            Outcome::Status(status) => Err(status_error(status, None, endpoint)),
            Outcome::Detail(status, detail) => Err(ApiError::Rejected {
                status,
                detail: detail.to_string(),
            }),
            Outcome::Offline => Err(offline()),
        }
    }
}

/// In-memory [`AttendanceApi`] that records every call.
pub struct MockApi {
    fetch_reply: RefCell<FetchReply>,
    start_outcome: Cell<Outcome>,
    check_in_outcome: Cell<Outcome>,
    end_outcome: Cell<Outcome>,
    total: Cell<u32>,
    fetches: Cell<u32>,
    subjects: RefCell<Vec<String>>,
    roll_numbers: RefCell<Vec<String>>,
    ends: Cell<u32>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            fetch_reply: RefCell::new(FetchReply::Session(sample_session())),
            start_outcome: Cell::new(Outcome::Ok),
            check_in_outcome: Cell::new(Outcome::Ok),
            end_outcome: Cell::new(Outcome::Ok),
            total: Cell::new(1),
            fetches: Cell::new(0),
            subjects: RefCell::default(),
            roll_numbers: RefCell::default(),
            ends: Cell::new(0),
        }
    }
}

impl MockApi {
    pub fn replying(self, reply: FetchReply) -> Self {
        self.set_reply(reply);
        self
    }

    pub fn starting(self, outcome: Outcome) -> Self {
        self.start_outcome.set(outcome);
        self
    }

    pub fn checking_in(self, outcome: Outcome, total: u32) -> Self {
        self.check_in_outcome.set(outcome);
        self.total.set(total);
        self
    }

    pub fn ending(self, outcome: Outcome) -> Self {
        self.end_outcome.set(outcome);
        self
    }

    pub fn set_reply(&self, reply: FetchReply) {
        *self.fetch_reply.borrow_mut() = reply;
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.get()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.subjects.borrow().clone()
    }

    pub fn roll_numbers(&self) -> Vec<String> {
        self.roll_numbers.borrow().clone()
    }

    pub fn ends(&self) -> u32 {
        self.ends.get()
    }
}

#[async_trait::async_trait(?Send)]
impl AttendanceApi for MockApi {
    async fn start_session(&self, subject: &Subject) -> ApiResult<SessionStarted> {
        self.subjects.borrow_mut().push(subject.as_str().to_string());
        self.start_outcome
            .get()
            .into_result("/session/start", || SessionStarted {
                session_id: "Q7mKp2Xa".into(),
                subject: subject.as_str().to_string(),
                started_at: "2025-03-04T09:15:00".to_string(),
                expires_at: "2025-03-04T11:15:00".to_string(),
            })
    }

    async fn fetch_session(&self, id: &SessionId) -> ApiResult<Session> {
        self.fetches.set(self.fetches.get() + 1);
        let endpoint = format!("/session/{id}");
        match self.fetch_reply.borrow().clone() {
            FetchReply::Session(session) => Ok(session),
            FetchReply::Status(status) => Err(status_error(status, None, &endpoint)),
            FetchReply::Detail(status, detail) => Err(ApiError::Rejected {
                status,
                detail: detail.to_string(),
            }),
            FetchReply::Offline => Err(offline()),
        }
    }

    async fn check_in(&self, id: &SessionId, roll_no: &RollNo) -> ApiResult<CheckedIn> {
        self.roll_numbers
            .borrow_mut()
            .push(roll_no.as_str().to_string());
        let total = self.total.get();
        self.check_in_outcome
            .get()
            .into_result(&format!("/session/{id}/checkin"), || CheckedIn {
                ok: true,
                total,
            })
    }

    async fn end_session(&self, id: &SessionId) -> ApiResult<()> {
        self.ends.set(self.ends.get() + 1);
        self.end_outcome
            .get()
            .into_result(&format!("/session/{id}/end"), || ())
    }
}

/// [`Notifier`] that keeps every notice.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .map(|notice| notice.message.clone())
            .collect()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

struct Timer {
    period: Duration,
    due: Duration,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    timers: Vec<Timer>,
}

/// [`Scheduler`] driven by [`ManualScheduler::advance`] instead of wall time.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

/// Cancels its timer on drop.
pub struct ManualTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    /// Moves time forward, firing due ticks in order.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let tick = {
                let mut clock = self.clock.borrow_mut();
                clock.timers.retain(|timer| !timer.cancelled.get());
                let next = clock
                    .timers
                    .iter_mut()
                    .filter(|timer| timer.due <= target)
                    .min_by_key(|timer| timer.due);
                let Some(timer) = next else { break };
                let due = timer.due;
                timer.due += timer.period;
                let tick = timer.tick.clone();
                clock.now = due;
                tick
            };
            let mut tick = tick.borrow_mut();
            (tick.as_mut())();
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn active_timers(&self) -> usize {
        self.clock
            .borrow()
            .timers
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTimer;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> ManualTimer {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + period;
        clock.timers.push(Timer {
            period,
            due,
            tick: Rc::new(RefCell::new(tick)),
            cancelled: cancelled.clone(),
        });
        ManualTimer { cancelled }
    }
}
