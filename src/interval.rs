use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// A cancellable periodic subscription polled by the event loop.
///
/// Fires at most once per poll and re-arms relative to the poll time, so a
/// late poll shifts every following tick. Once unsubscribed it never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn subscribe(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn unsubscribe(&mut self) {
        self.next_due = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when the interval fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
