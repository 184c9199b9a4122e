use chrono::{DateTime, Local, TimeDelta};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source for the app: wall-clock for session timestamps, monotonic for ticks
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    fn wall(&self) -> DateTime<Local>;
    fn monotonic(&self) -> Instant;
}

/// Production clock reading the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }

    fn monotonic(&self) -> Instant {
        Instant::now()
    }
}

/// Test clock that only moves when told to. Clones share the same offset.
#[derive(Clone, Debug)]
pub struct ManualClock {
    wall_base: DateTime<Local>,
    mono_base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            wall_base: Local::now(),
            mono_base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn wall(&self) -> DateTime<Local> {
        let offset = TimeDelta::from_std(self.offset()).unwrap_or_else(|_| TimeDelta::zero());
        self.wall_base + offset
    }

    fn monotonic(&self) -> Instant {
        self.mono_base + self.offset()
    }
}
