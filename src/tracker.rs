//! Session tracker: the start/stop/reset lifecycle around one XP measurement.
//!
//! The tracker never schedules anything itself. The host polls an
//! [`Interval`](crate::interval::Interval) and calls [`SessionTracker::tick`]
//! once per second while tracking. Rates are computed from the wall-clock
//! timestamps recorded at start and stop, so tick jitter only affects the
//! elapsed display, never the reported rates.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::util::{format_hms, parse_xp};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("not a valid integer: {0:?}")]
    InvalidInput(String),
    #[error("no tracking session is active")]
    NotTracking,
    #[error("both starting and ending XP are required")]
    MissingData,
    #[error("the session has not been started and stopped")]
    IncompleteSession,
    #[error("time difference is zero or negative")]
    NonPositiveDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TrackerPhase {
    Idle,
    Tracking,
    Stopped,
}

/// Outcome of a successful calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XpRates {
    pub xp_change: i64,
    pub xp_per_minute: i64,
    pub xp_per_hour: i64,
    /// Wall-clock seconds between start and stop
    pub duration_secs: f64,
}

impl XpRates {
    /// Compute rates for `xp_change` over `duration_secs`. Rates truncate toward zero.
    pub fn compute(xp_change: i64, duration_secs: f64) -> Result<Self, TrackerError> {
        if duration_secs <= 0.0 {
            return Err(TrackerError::NonPositiveDuration);
        }

        let xp_per_second = xp_change as f64 / duration_secs;

        // f64 -> i64 `as` casts saturate at the i64 bounds

        Ok(Self {
            xp_change,
            xp_per_minute: (xp_per_second * 60.0).trunc() as i64,
            xp_per_hour: (xp_per_second * 3600.0).trunc() as i64,
            duration_secs,
        })
    }

    pub fn xp_per_second(&self) -> f64 {
        self.xp_change as f64 / self.duration_secs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionTracker {
    start_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
    start_xp: Option<i64>,
    end_xp: Option<i64>,
    is_tracking: bool,
    elapsed_seconds: u64,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session at `now` with the XP typed into the start box.
    pub fn start(&mut self, start_xp_raw: &str, now: DateTime<Local>) -> Result<(), TrackerError> {
        let start_xp = parse_xp(start_xp_raw)
            .ok_or_else(|| TrackerError::InvalidInput(start_xp_raw.trim().to_string()))?;

        self.start_time = Some(now);
        self.end_time = None;
        self.start_xp = Some(start_xp);
        self.end_xp = None;
        self.is_tracking = true;
        self.elapsed_seconds = 0;

        Ok(())
    }

    pub fn tick(&mut self) {
        if self.is_tracking {
            self.elapsed_seconds += 1;
        }
    }

    pub fn stop(&mut self, now: DateTime<Local>) -> Result<(), TrackerError> {
        if !self.is_tracking {
            return Err(TrackerError::NotTracking);
        }

        self.end_time = Some(now);
        self.is_tracking = false;

        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Compute gain and rates against the XP typed into the end box.
    ///
    /// Checks run in order: parse, missing XP, incomplete session, duration.
    /// Nothing is stored unless every check passes.
    pub fn calculate(&mut self, end_xp_raw: &str) -> Result<XpRates, TrackerError> {
        let end_xp = parse_xp(end_xp_raw)
            .ok_or_else(|| TrackerError::InvalidInput(end_xp_raw.trim().to_string()))?;

        let start_xp = self.start_xp.ok_or(TrackerError::MissingData)?;

        let (start_time, end_time) = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(TrackerError::IncompleteSession),
        };

        let elapsed = end_time - start_time;
        let duration_secs = match elapsed.num_microseconds() {
            Some(micros) => micros as f64 / 1_000_000.0,
            None => elapsed.num_milliseconds() as f64 / 1000.0,
        };

        // A gain outside i64 cannot be reported with the right sign
        let xp_change = end_xp
            .checked_sub(start_xp)
            .ok_or_else(|| TrackerError::InvalidInput(end_xp_raw.trim().to_string()))?;
        let rates = XpRates::compute(xp_change, duration_secs)?;

        self.end_xp = Some(end_xp);
        Ok(rates)
    }

    pub fn phase(&self) -> TrackerPhase {
        match (self.is_tracking, self.start_time, self.end_time) {
            (true, _, _) => TrackerPhase::Tracking,
            (false, Some(_), Some(_)) => TrackerPhase::Stopped,
            _ => TrackerPhase::Idle,
        }
    }

    pub fn elapsed_display(&self) -> String {
        format_hms(self.elapsed_seconds)
    }

    pub fn is_tracking(&self) -> bool {
        self.is_tracking
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    pub fn start_xp(&self) -> Option<i64> {
        self.start_xp
    }

    pub fn end_xp(&self) -> Option<i64> {
        self.end_xp
    }
}
