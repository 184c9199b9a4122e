//! Countdown timer, independent of the session tracker.

use thiserror::Error;

use crate::util::format_mm_ss;

pub const MAX_MINUTES: u32 = 60;
pub const MAX_SECONDS: u32 = 59;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownError {
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum CountdownPhase {
    Idle,
    Running,
    Finished,
}

/// What a start or tick produced, for the display and the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { minutes: u32, seconds: u32 },
    /// Reached zero with auto-reset on; carries the reloaded duration
    Reset { minutes: u32, seconds: u32 },
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    minutes: u32,
    seconds: u32,
    remaining_seconds: u32,
    is_running: bool,
    auto_reset: bool,
    finished: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(0, 30, true)
    }
}

impl Countdown {
    pub fn new(minutes: u32, seconds: u32, auto_reset: bool) -> Self {
        Self {
            minutes: minutes.min(MAX_MINUTES),
            seconds: seconds.min(MAX_SECONDS),
            remaining_seconds: 0,
            is_running: false,
            auto_reset,
            finished: false,
        }
    }

    /// Store a new duration. Ignored while running.
    pub fn configure(&mut self, minutes: u32, seconds: u32) {
        if self.is_running {
            return;
        }
        self.minutes = minutes.min(MAX_MINUTES);
        self.seconds = seconds.min(MAX_SECONDS);
    }

    pub fn configured_total(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    /// Load the configured duration and start running. The returned event is
    /// the immediate display update; nothing is decremented until the first tick.
    pub fn start(&mut self) -> Result<CountdownEvent, CountdownError> {
        let total = self.configured_total();
        if total == 0 {
            return Err(CountdownError::ZeroDuration);
        }

        self.remaining_seconds = total;
        self.is_running = true;
        self.finished = false;

        Ok(self.tick_event())
    }

    pub fn stop(&mut self) {
        self.is_running = false;
    }

    pub fn tick(&mut self) -> Option<CountdownEvent> {
        if !self.is_running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return Some(self.tick_event());
        }

        if self.auto_reset {
            self.remaining_seconds = self.configured_total();
            Some(CountdownEvent::Reset {
                minutes: self.minutes,
                seconds: self.seconds,
            })
        } else {
            self.stop();
            self.finished = true;
            Some(CountdownEvent::Finished)
        }
    }

    fn tick_event(&self) -> CountdownEvent {
        CountdownEvent::Tick {
            minutes: self.remaining_seconds / 60,
            seconds: self.remaining_seconds % 60,
        }
    }

    pub fn display(&self) -> String {
        format_mm_ss(
            u64::from(self.remaining_seconds / 60),
            u64::from(self.remaining_seconds % 60),
        )
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.is_running {
            CountdownPhase::Running
        } else if self.finished {
            CountdownPhase::Finished
        } else {
            CountdownPhase::Idle
        }
    }

    pub fn set_auto_reset(&mut self, on: bool) {
        self.auto_reset = on;
    }

    pub fn toggle_auto_reset(&mut self) -> bool {
        self.auto_reset = !self.auto_reset;
        self.auto_reset
    }

    pub fn auto_reset(&self) -> bool {
        self.auto_reset
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}
