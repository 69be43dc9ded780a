//! Periodic refresh with an explicit, owned timer.
//!
//! A [`Poller`] runs its refresh once when started and then on every tick of the
//! timer it got from a [`Scheduler`]. Dropping the poller drops the timer handle,
//! which is how the session view stops polling when it unmounts or switches sessions.

use std::time::Duration;

/// How often the session view re-fetches session state.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Source of repeating timers.
///
/// `Handle` must cancel the timer when dropped. In the browser it is a
/// `gloo_timers::callback::Interval`.
pub trait Scheduler {
    type Handle;

    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Owns a running poll. Drop it (or call [`Poller::stop`]) to cancel.
#[must_use = "dropping a Poller cancels the poll"]
pub struct Poller<H> {
    timer: H,
    period: Duration,
}

impl<H> Poller<H> {
    /// Runs `refresh` immediately, then every `period`.
    ///
    /// A tick never waits on the previous refresh; callers let the newest response win.
    pub fn start<S, F>(scheduler: &S, period: Duration, mut refresh: F) -> Self
    where
        S: Scheduler<Handle = H>,
        F: FnMut() + 'static,
    {
        tracing::debug!(?period, "starting poll");
        refresh();
        let timer = scheduler.every(period, Box::new(refresh));
        Self { timer, period }
    }

    pub fn stop(self) {
        tracing::debug!(period = ?self.period, "stopping poll");
        drop(self.timer);
    }
}
