use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::countdown::{Countdown, CountdownEvent, MAX_MINUTES, MAX_SECONDS};
use crate::input::{SpinBox, TextInput};
use crate::interval::Interval;
use crate::opacity::Opacity;
use crate::runtime::AppEvent;
use crate::tracker::{SessionTracker, TrackerError, TrackerPhase, XpRates};
use crate::util::group_thousands;

pub const READY_STATUS: &str = "Ready. Enter your starting XP and press (s) to start tracking.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Main,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Focus {
    #[strum(to_string = "Starting XP")]
    StartXp,
    #[strum(to_string = "Ending XP")]
    EndXp,
    Minutes,
    Seconds,
}

const FOCUS_ORDER: [Focus; 4] = [Focus::StartXp, Focus::EndXp, Focus::Minutes, Focus::Seconds];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Host for the session tracker and the countdown: owns their tick
/// subscriptions, the input boxes and every string the screen shows.
#[derive(Debug)]
pub struct App {
    pub tracker: SessionTracker,
    pub countdown: Countdown,
    pub opacity: Opacity,
    pub start_xp: TextInput,
    pub end_xp: TextInput,
    pub minutes: SpinBox,
    pub seconds: SpinBox,
    pub focus: Option<Focus>,
    pub state: AppState,
    pub rates: Option<XpRates>,
    pub status: String,
    tracker_interval: Interval,
    countdown_interval: Interval,
    clock: Box<dyn Clock>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default(), Box::new(SystemClock))
    }
}

impl App {
    pub fn new(config: &Config, clock: Box<dyn Clock>) -> Self {
        let countdown = Countdown::new(
            config.countdown_minutes,
            config.countdown_seconds,
            config.auto_reset,
        );

        Self {
            minutes: SpinBox::new(countdown.minutes(), 0, MAX_MINUTES),
            seconds: SpinBox::new(countdown.seconds(), 0, MAX_SECONDS),
            tracker: SessionTracker::new(),
            countdown,
            opacity: Opacity::new(config.opacity),
            start_xp: TextInput::new("Enter starting XP (e.g., 12353546)"),
            end_xp: TextInput::new("Enter ending XP (e.g., 12453546)"),
            focus: Some(Focus::StartXp),
            state: AppState::Main,
            rates: None,
            status: READY_STATUS.to_string(),
            tracker_interval: Interval::default(),
            countdown_interval: Interval::default(),
            clock,
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Control {
        let control = match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => Control::Continue,
        };

        // Key repeat can keep the runner from ever timing out into a Tick
        self.on_tick();
        control
    }

    /// Poll both subscriptions; each fires at most once per call.
    pub fn on_tick(&mut self) {
        let now = self.clock.monotonic();

        if self.tracker_interval.poll(now) {
            self.tracker.tick();
        }

        if self.countdown_interval.poll(now) {
            if let Some(event) = self.countdown.tick() {
                self.apply_countdown_event(event);
            }
        }
    }

    // --- session tracker -------------------------------------------------

    pub fn start_tracking(&mut self) {
        if self.tracker.is_tracking() {
            return;
        }

        let now = self.clock.wall();
        match self.tracker.start(self.start_xp.value(), now) {
            Ok(()) => {
                self.tracker_interval.subscribe(self.clock.monotonic());
                let start_xp = self.tracker.start_xp().unwrap_or_default();
                log::info!("tracking started with {start_xp} xp");
                self.status = format!(
                    "Tracking started at {} with XP: {}",
                    now.format("%H:%M:%S"),
                    group_thousands(start_xp)
                );
                self.ensure_focus_enabled();
            }
            Err(e) => self.report_tracker_error(e, Focus::StartXp),
        }
    }

    pub fn stop_tracking(&mut self) {
        let now = self.clock.wall();
        match self.tracker.stop(now) {
            Ok(()) => {
                self.tracker_interval.unsubscribe();
                log::info!(
                    "tracking stopped after {} ticks",
                    self.tracker.elapsed_seconds()
                );
                self.status = format!(
                    "Tracking stopped at {}. Enter your ending XP and press (c) to calculate.",
                    now.format("%H:%M:%S")
                );
                self.focus = Some(Focus::EndXp);
            }
            Err(e) => self.report_tracker_error(e, Focus::StartXp),
        }
    }

    pub fn reset_tracking(&mut self) {
        self.tracker.reset();
        self.tracker_interval.unsubscribe();
        self.start_xp.clear();
        self.end_xp.clear();
        self.rates = None;
        self.focus = Some(Focus::StartXp);
        log::info!("tracking reset");
        self.status =
            "Reset complete. Enter your starting XP and press (s) to start tracking.".to_string();
    }

    pub fn calculate(&mut self) {
        match self.tracker.calculate(self.end_xp.value()) {
            Ok(rates) => {
                log::info!(
                    "calculated {} xp over {:.1}s ({} xp/h)",
                    rates.xp_change,
                    rates.duration_secs,
                    rates.xp_per_hour
                );
                self.status = format!(
                    "Results calculated for {:.1} seconds of tracking.",
                    rates.duration_secs
                );
                self.rates = Some(rates);
            }
            Err(e) => self.report_tracker_error(e, Focus::EndXp),
        }
    }

    fn report_tracker_error(&mut self, err: TrackerError, input: Focus) {
        log::warn!("session tracker: {err}");
        self.status = match err {
            TrackerError::InvalidInput(_) if input == Focus::EndXp => {
                "Please enter a valid ending XP number."
            }
            TrackerError::InvalidInput(_) => "Please enter a valid starting XP number.",
            TrackerError::NotTracking => "No tracking session to stop.",
            TrackerError::MissingData => "Please enter both starting and ending XP values.",
            TrackerError::IncompleteSession => {
                "You must start and stop tracking before calculating results."
            }
            TrackerError::NonPositiveDuration => "Error: Time difference is zero or negative.",
        }
        .to_string();
    }

    pub fn result_lines(&self) -> [String; 3] {
        match self.rates {
            Some(rates) => [
                format!("XP Gained: {}", group_thousands(rates.xp_change)),
                format!("XP/Minute: {}", group_thousands(rates.xp_per_minute)),
                format!("XP/Hour: {}", group_thousands(rates.xp_per_hour)),
            ],
            None => [
                "XP Gained: --".to_string(),
                "XP/Minute: --".to_string(),
                "XP/Hour: --".to_string(),
            ],
        }
    }

    // --- countdown -------------------------------------------------------

    pub fn start_countdown(&mut self) {
        if self.countdown.is_running() {
            return;
        }

        let (minutes, seconds) = (self.minutes.value(), self.seconds.value());
        self.countdown.configure(minutes, seconds);

        match self.countdown.start() {
            Ok(_) => {
                self.countdown_interval.subscribe(self.clock.monotonic());
                log::info!("countdown started for {minutes}m {seconds}s");
                self.status =
                    format!("Countdown started: {minutes} minutes and {seconds} seconds");
                self.ensure_focus_enabled();
            }
            Err(e) => {
                log::warn!("countdown: {e}");
                self.status = "Please set a countdown time greater than zero.".to_string();
            }
        }
    }

    pub fn stop_countdown(&mut self) {
        self.countdown.stop();
        self.countdown_interval.unsubscribe();
        self.status = "Countdown stopped.".to_string();
    }

    fn apply_countdown_event(&mut self, event: CountdownEvent) {
        match event {
            CountdownEvent::Tick { .. } => {}
            CountdownEvent::Reset { minutes, seconds } => {
                // Notification stub: no sound, only a record
                log::info!("countdown reached zero, reloading {minutes}m {seconds}s");
                self.status = format!("Countdown reset: {minutes} minutes and {seconds} seconds");
            }
            CountdownEvent::Finished => {
                self.countdown_interval.unsubscribe();
                log::info!("countdown finished");
                self.status = "Countdown finished!".to_string();
            }
        }
    }

    pub fn toggle_auto_reset(&mut self) {
        let on = self.countdown.toggle_auto_reset();
        log::debug!("auto reset {}", if on { "on" } else { "off" });
    }

    // --- inputs ----------------------------------------------------------

    pub fn is_enabled(&self, focus: Focus) -> bool {
        match focus {
            Focus::StartXp => !self.tracker.is_tracking(),
            Focus::EndXp => self.tracker.phase() == TrackerPhase::Stopped,
            Focus::Minutes | Focus::Seconds => !self.countdown.is_running(),
        }
    }

    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.cycle_focus(FOCUS_ORDER.len() - 1);
    }

    fn cycle_focus(&mut self, step: usize) {
        let start = self
            .focus
            .and_then(|f| FOCUS_ORDER.iter().position(|&o| o == f))
            .unwrap_or(FOCUS_ORDER.len() - 1);

        self.focus = (1..=FOCUS_ORDER.len())
            .map(|i| FOCUS_ORDER[(start + i * step) % FOCUS_ORDER.len()])
            .find(|&f| self.is_enabled(f));
    }

    fn ensure_focus_enabled(&mut self) {
        if !self.focus.is_some_and(|f| self.is_enabled(f)) {
            self.focus_next();
        }
    }

    fn edit_focused(&mut self, key: KeyCode) {
        let Some(focus) = self.focus.filter(|&f| self.is_enabled(f)) else {
            return;
        };

        match (focus, key) {
            (Focus::StartXp, KeyCode::Char(c)) => self.start_xp.push(c),
            (Focus::StartXp, KeyCode::Backspace) => self.start_xp.backspace(),
            (Focus::EndXp, KeyCode::Char(c)) => self.end_xp.push(c),
            (Focus::EndXp, KeyCode::Backspace) => self.end_xp.backspace(),
            (Focus::Minutes | Focus::Seconds, key) => {
                let spin = if focus == Focus::Minutes {
                    &mut self.minutes
                } else {
                    &mut self.seconds
                };
                match key {
                    KeyCode::Up => spin.increment(),
                    KeyCode::Down => spin.decrement(),
                    KeyCode::Backspace => spin.backspace(),
                    KeyCode::Char(c) => {
                        if let Some(d) = c.to_digit(10) {
                            spin.push_digit(d);
                        }
                    }
                    _ => {}
                }
                self.countdown
                    .configure(self.minutes.value(), self.seconds.value());
            }
            _ => {}
        }
    }

    fn submit_focused(&mut self) {
        match self.focus {
            Some(Focus::StartXp) => self.start_tracking(),
            Some(Focus::EndXp) => self.calculate(),
            Some(Focus::Minutes | Focus::Seconds) => self.start_countdown(),
            None => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Control::Quit;
        }

        if self.state == AppState::Help {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('b') | KeyCode::Backspace
            ) {
                self.state = AppState::Main;
            }
            return Control::Continue;
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => self.edit_focused(key.code),
            KeyCode::Backspace | KeyCode::Up | KeyCode::Down => self.edit_focused(key.code),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Enter => self.submit_focused(),
            KeyCode::Char('s') => self.start_tracking(),
            KeyCode::Char('x') => self.stop_tracking(),
            KeyCode::Char('r') => self.reset_tracking(),
            KeyCode::Char('c') => self.calculate(),
            KeyCode::Char('g') => self.start_countdown(),
            KeyCode::Char('h') => self.stop_countdown(),
            KeyCode::Char('a') => self.toggle_auto_reset(),
            KeyCode::Char(']') => self.opacity.step_up(),
            KeyCode::Char('[') => self.opacity.step_down(),
            KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }

        Control::Continue
    }

    pub fn tracker_subscribed(&self) -> bool {
        self.tracker_interval.is_subscribed()
    }

    pub fn countdown_subscribed(&self) -> bool {
        self.countdown_interval.is_subscribed()
    }
}
