use std::time::Duration;

use gloo_timers::callback::Interval;
use rollcall::poll::Scheduler;

/// [`Scheduler`] backed by `setInterval`. Dropping the returned [`Interval`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Interval;

    fn every(&self, period: Duration, mut tick: Box<dyn FnMut()>) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || tick())
    }
}
