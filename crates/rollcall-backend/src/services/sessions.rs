use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, TimeDelta};
use dashmap::{DashMap, mapref::entry::Entry};

use rollcall::data::{Attendee, CheckedIn, Session, SessionEnded, SessionStarted, SessionStatus};
use rollcall::id::SessionId;
use rollcall::log;
use rollcall::validate::{RollNo, Subject};

use crate::error::SessionError;

/// A trait for managing attendance sessions.
///
/// Implementations decide expiry from their own clock: once a session is past its
/// expiry it reads as ended and refuses check-ins.
#[async_trait]
pub trait SessionService {
    type Error;

    /// Opens a new active session with no attendees.
    async fn start(&self, subject: Subject) -> Result<SessionStarted, Self::Error>;

    /// Returns the session as clients see it, marking it ended when it has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists with the given ID.
    async fn get(&self, session_id: &SessionId) -> Result<Session, Self::Error>;

    /// Records a roll number against an active session and returns the new total.
    ///
    /// Roll numbers are unique per session, compared case-insensitively.
    async fn check_in(
        &self,
        session_id: &SessionId,
        roll_no: RollNo,
    ) -> Result<CheckedIn, Self::Error>;

    /// Ends a session. Ending an ended session succeeds.
    async fn end(&self, session_id: &SessionId) -> Result<SessionEnded, Self::Error>;

    /// Number of sessions that are active and unexpired.
    async fn active_count(&self) -> usize;
}

/// Source of the current local wall-clock time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Timestamps go on the wire as naive local times with microseconds.
fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[derive(Debug, Clone)]
struct StoredAttendee {
    roll_no: String,
    time: NaiveDateTime,
}

#[derive(Debug, Clone)]
struct StoredSession {
    subject: String,
    status: SessionStatus,
    started_at: NaiveDateTime,
    expires_at: NaiveDateTime,
    attendees: Vec<StoredAttendee>,
}

impl StoredSession {
    /// Flips an active session to ended once `now` is past its expiry.
    fn expire(&mut self, now: NaiveDateTime) {
        if self.status.is_active() && now > self.expires_at {
            self.status = SessionStatus::Ended;
        }
    }

    fn to_session(&self) -> Session {
        Session {
            subject: self.subject.clone(),
            status: self.status,
            attendees_count: self.attendees.len() as u32,
            started_at: timestamp(self.started_at),
            attendees: self
                .attendees
                .iter()
                .map(|attendee| Attendee {
                    roll_no: attendee.roll_no.clone(),
                    time: timestamp(attendee.time),
                })
                .collect(),
        }
    }
}

/// An in-memory implementation of [`SessionService`].
///
/// Sessions live in a `DashMap` and are never evicted; an expired session stays
/// readable as ended.
pub struct SessionServiceInMemory {
    sessions: DashMap<SessionId, StoredSession>,
    ttl: TimeDelta,
    clock: Clock,
}

impl SessionServiceInMemory {
    pub fn new(ttl: TimeDelta) -> Self {
        Self::with_clock(ttl, Arc::new(|| Local::now().naive_local()))
    }

    pub fn with_clock(ttl: TimeDelta, clock: Clock) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            clock,
        }
    }

    fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

#[async_trait]
impl SessionService for SessionServiceInMemory {
    type Error = SessionError;

    async fn start(&self, subject: Subject) -> Result<SessionStarted, Self::Error> {
        let started_at = self.now();
        let expires_at = started_at + self.ttl;
        let stored = StoredSession {
            subject: subject.as_str().to_string(),
            status: SessionStatus::Active,
            started_at,
            expires_at,
            attendees: Vec::new(),
        };

        let session_id = loop {
            let candidate = SessionId::generate();
            if let Entry::Vacant(slot) = self.sessions.entry(candidate.clone()) {
                slot.insert(stored);
                break candidate;
            }
            log::debug!(%candidate, "session id collision, generating another");
        };

        log::info!(%session_id, %subject, "session started");
        Ok(SessionStarted {
            session_id,
            subject: subject.as_str().to_string(),
            started_at: timestamp(started_at),
            expires_at: timestamp(expires_at),
        })
    }

    async fn get(&self, session_id: &SessionId) -> Result<Session, Self::Error> {
        let now = self.now();
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound)?;
        entry.expire(now);
        Ok(entry.to_session())
    }

    async fn check_in(
        &self,
        session_id: &SessionId,
        roll_no: RollNo,
    ) -> Result<CheckedIn, Self::Error> {
        let now = self.now();
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound)?;
        entry.expire(now);
        if !entry.status.is_active() {
            return Err(SessionError::Ended);
        }

        let duplicate = entry
            .attendees
            .iter()
            .any(|attendee| attendee.roll_no.eq_ignore_ascii_case(roll_no.as_str()));
        if duplicate {
            return Err(SessionError::AlreadyCheckedIn);
        }

        entry.attendees.push(StoredAttendee {
            roll_no: roll_no.as_str().to_string(),
            time: now,
        });
        let total = entry.attendees.len() as u32;
        log::info!(%session_id, %roll_no, total, "student checked in");
        Ok(CheckedIn { ok: true, total })
    }

    async fn end(&self, session_id: &SessionId) -> Result<SessionEnded, Self::Error> {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(SessionError::NotFound)?;
        entry.status = SessionStatus::Ended;
        log::info!(%session_id, "session ended");
        Ok(SessionEnded { ok: true })
    }

    async fn active_count(&self) -> usize {
        let now = self.now();
        self.sessions
            .iter()
            .filter(|entry| entry.status.is_active() && now <= entry.expires_at)
            .count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;

    /// A clock that only moves when told to.
    #[derive(Clone)]
    pub(crate) struct ManualClock(Arc<Mutex<NaiveDateTime>>);

    impl ManualClock {
        pub(crate) fn new() -> Self {
            let start = NaiveDate::from_ymd_opt(2025, 3, 4)
                .and_then(|date| date.and_hms_micro_opt(9, 15, 0, 123_456))
                .unwrap();
            Self(Arc::new(Mutex::new(start)))
        }

        pub(crate) fn advance(&self, by: TimeDelta) {
            *self.0.lock().unwrap() += by;
        }

        pub(crate) fn clock(&self) -> Clock {
            let now = self.0.clone();
            Arc::new(move || *now.lock().unwrap())
        }
    }

    fn service() -> (SessionServiceInMemory, ManualClock) {
        let clock = ManualClock::new();
        (
            SessionServiceInMemory::with_clock(TimeDelta::hours(2), clock.clock()),
            clock,
        )
    }

    fn subject(name: &str) -> Subject {
        Subject::parse(name).unwrap()
    }

    fn roll(number: &str) -> RollNo {
        RollNo::parse(number).unwrap()
    }

    #[tokio::test]
    async fn start_opens_an_empty_active_session() {
        let (service, _) = service();

        let started = service.start(subject(" Maths ")).await.unwrap();
        assert_eq!(started.subject, "Maths");
        assert_eq!(started.started_at, "2025-03-04T09:15:00.123456");
        assert_eq!(started.expires_at, "2025-03-04T11:15:00.123456");
        assert_eq!(started.session_id.as_str().len(), 8);

        let session = service.get(&started.session_id).await.unwrap();
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.attendees_count, 0);
        assert!(session.attendees.is_empty());
        assert_eq!(service.active_count().await, 1);
    }

    #[tokio::test]
    async fn check_ins_keep_arrival_order_and_count() {
        let (service, clock) = service();
        let id = service.start(subject("Maths")).await.unwrap().session_id;

        assert_eq!(service.check_in(&id, roll("AIE22039")).await.unwrap().total, 1);
        clock.advance(TimeDelta::seconds(70));
        assert_eq!(service.check_in(&id, roll("AIE22001")).await.unwrap().total, 2);

        let session = service.get(&id).await.unwrap();
        assert_eq!(session.attendees_count, 2);
        let order: Vec<_> = session.attendees.iter().map(|a| a.roll_no.as_str()).collect();
        assert_eq!(order, vec!["AIE22039", "AIE22001"]);
        assert_eq!(session.attendees[1].time, "2025-03-04T09:16:10.123456");
    }

    #[tokio::test]
    async fn duplicate_roll_numbers_are_refused_case_insensitively() {
        let (service, _) = service();
        let id = service.start(subject("Maths")).await.unwrap().session_id;

        service.check_in(&id, roll("aie22039")).await.unwrap();
        let err = service.check_in(&id, roll("AIE22039")).await.unwrap_err();

        assert_eq!(err, SessionError::AlreadyCheckedIn);
        assert_eq!(service.get(&id).await.unwrap().attendees_count, 1);
    }

    #[tokio::test]
    async fn ended_sessions_refuse_check_ins() {
        let (service, _) = service();
        let id = service.start(subject("Maths")).await.unwrap().session_id;

        assert!(service.end(&id).await.unwrap().ok);
        assert!(service.end(&id).await.unwrap().ok);

        let err = service.check_in(&id, roll("AIE22039")).await.unwrap_err();
        assert_eq!(err, SessionError::Ended);
        assert_eq!(service.get(&id).await.unwrap().status, SessionStatus::Ended);
        assert_eq!(service.active_count().await, 0);
    }

    #[tokio::test]
    async fn sessions_expire_after_their_ttl() {
        let (service, clock) = service();
        let id = service.start(subject("Maths")).await.unwrap().session_id;

        clock.advance(TimeDelta::hours(2));
        assert_eq!(service.get(&id).await.unwrap().status, SessionStatus::Active);

        clock.advance(TimeDelta::seconds(1));
        assert_eq!(service.active_count().await, 0);
        let err = service.check_in(&id, roll("AIE22039")).await.unwrap_err();
        assert_eq!(err, SessionError::Ended);
        assert_eq!(service.get(&id).await.unwrap().status, SessionStatus::Ended);
    }

    #[tokio::test]
    async fn unknown_sessions_are_not_found() {
        let (service, _) = service();
        let missing: SessionId = "missing".into();

        assert_eq!(service.get(&missing).await.unwrap_err(), SessionError::NotFound);
        assert_eq!(
            service.check_in(&missing, roll("AIE22039")).await.unwrap_err(),
            SessionError::NotFound
        );
        assert_eq!(service.end(&missing).await.unwrap_err(), SessionError::NotFound);
    }
}
