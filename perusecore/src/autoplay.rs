//! Autoplay timing.
//!
//! Two states, stopped and running. Running owns a single pending deadline;
//! there is never more than one scheduled tick because the deadline is
//! replaced, not accumulated. The interval is read fresh every time a tick
//! is rescheduled, so moving the delay slider takes effect on the next tick
//! rather than retroactively.

use std::time::{Duration, Instant};

/// One tick of the delay slider.
pub const TICK: Duration = Duration::from_millis(100);

/// Slider range, in ticks.
pub const MIN_INTERVAL_TICKS: u32 = 1;
pub const MAX_INTERVAL_TICKS: u32 = 100;

fn interval(ticks: u32) -> Duration {
    TICK * ticks.clamp(MIN_INTERVAL_TICKS, MAX_INTERVAL_TICKS)
}

/// Slideshow timer state machine.
#[derive(Debug, Default)]
pub struct Autoplay {
    /// The one pending tick; `None` while stopped.
    deadline: Option<Instant>,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Flip between stopped and running. Returns the new running state.
    pub fn toggle(&mut self, now: Instant, ticks: u32) -> bool {
        match self.deadline {
            Some(_) => {
                self.deadline = None;
                false
            }
            None => {
                self.deadline = Some(now + interval(ticks));
                true
            }
        }
    }

    /// Cancel any pending tick and force the stopped state.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Report whether a tick is due. When it is, the next tick is scheduled
    /// from `now` using the current slider value and `true` is returned;
    /// the caller performs exactly one wrapping advance per `true`.
    pub fn poll(&mut self, now: Instant, ticks: u32) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + interval(ticks));
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the pending tick, if running.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
