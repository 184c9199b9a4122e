use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use xptrack::app::{App, Control};
use xptrack::clock::ManualClock;
use xptrack::config::Config;
use xptrack::countdown::CountdownPhase;
use xptrack::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn enter() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
}

// Headless integration using the internal runtime + App without a TTY.
// Key events go through Runner/TestEventSource; the manual clock stands in
// for wall time so one-second ticks are deterministic.
#[test]
fn headless_tracking_session_reports_rates() {
    let clock = ManualClock::new();
    let mut app = App::new(&Config::default(), Box::new(clock.clone()));

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    for c in "1000".chars() {
        tx.send(key(c)).unwrap();
    }
    tx.send(enter()).unwrap();

    for _ in 0..5u32 {
        app.handle_event(runner.step());
    }
    assert!(app.tracker.is_tracking());

    // Sixty seconds of ticks; the runner times out into Tick events
    for _ in 0..60u32 {
        clock.advance(Duration::from_secs(1));
        assert!(matches!(runner.step(), AppEvent::Tick));
        app.handle_event(AppEvent::Tick);
    }
    assert_eq!(app.tracker.elapsed_display(), "00:01:00");

    tx.send(key('x')).unwrap();
    for c in "1600".chars() {
        tx.send(key(c)).unwrap();
    }
    tx.send(key('c')).unwrap();
    for _ in 0..6u32 {
        app.handle_event(runner.step());
    }

    let rates = app.rates.expect("results should be calculated");
    assert_eq!(rates.xp_change, 600);
    assert_eq!(rates.xp_per_minute, 600);
    assert_eq!(rates.xp_per_hour, 36000);
}

#[test]
fn headless_countdown_finishes_by_ticks() {
    let clock = ManualClock::new();
    let config = Config {
        countdown_minutes: 0,
        countdown_seconds: 3,
        auto_reset: false,
        ..Config::default()
    };
    let mut app = App::new(&config, Box::new(clock.clone()));

    app.handle_event(key('g'));
    assert_eq!(app.countdown.display(), "00:03");

    for _ in 0..10u32 {
        clock.advance(Duration::from_secs(1));
        app.handle_event(AppEvent::Tick);
        if app.countdown.phase() == CountdownPhase::Finished {
            break;
        }
    }

    assert_eq!(app.countdown.phase(), CountdownPhase::Finished);
    assert_eq!(app.countdown.display(), "00:00");
    assert_eq!(app.status, "Countdown finished!");
}

#[test]
fn headless_sub_second_polls_do_not_tick() {
    let clock = ManualClock::new();
    let mut app = App::new(&Config::default(), Box::new(clock.clone()));
    app.start_xp.text = "5".to_string();
    app.start_tracking();

    // Nine 100ms polls stay inside the first second
    for _ in 0..9u32 {
        clock.advance(Duration::from_millis(100));
        app.handle_event(AppEvent::Tick);
    }
    assert_eq!(app.tracker.elapsed_seconds(), 0);

    clock.advance(Duration::from_millis(100));
    app.handle_event(AppEvent::Tick);
    assert_eq!(app.tracker.elapsed_seconds(), 1);
}

#[test]
fn headless_key_burst_does_not_stall_timers() {
    let clock = ManualClock::new();
    let mut app = App::new(&Config::default(), Box::new(clock.clone()));
    app.start_xp.text = "5".to_string();
    app.start_tracking();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(100)),
    );

    // Autorepeat at 50ms: the runner never times out during the burst
    for _ in 0..24u32 {
        tx.send(key('7')).unwrap();
    }
    for _ in 0..24u32 {
        clock.advance(Duration::from_millis(50));
        let event = runner.step();
        assert!(matches!(event, AppEvent::Key(_)));
        app.handle_event(event);
    }

    assert_eq!(app.tracker.elapsed_seconds(), 1);
}

#[test]
fn headless_escape_quits() {
    let mut app = App::default();
    let quit = app.handle_event(AppEvent::Key(KeyEvent::new(
        KeyCode::Esc,
        KeyModifiers::NONE,
    )));
    assert_eq!(quit, Control::Quit);
}
