use chrono::{Local, TimeDelta};
use xptrack::countdown::{Countdown, CountdownError, CountdownEvent, CountdownPhase};
use xptrack::tracker::{SessionTracker, TrackerError, TrackerPhase};

#[test]
fn tracker_full_cycle_then_reset() {
    let mut tracker = SessionTracker::new();
    let t0 = Local::now();

    tracker.start("1000", t0).unwrap();
    for _ in 0..60 {
        tracker.tick();
    }
    tracker.stop(t0 + TimeDelta::seconds(60)).unwrap();
    assert_eq!(tracker.phase(), TrackerPhase::Stopped);

    let rates = tracker.calculate("1600").unwrap();
    assert_eq!(
        (rates.xp_change, rates.xp_per_minute, rates.xp_per_hour),
        (600, 600, 36000)
    );

    tracker.reset();
    assert_eq!(tracker, SessionTracker::new());
    assert_eq!(tracker.calculate("1600"), Err(TrackerError::MissingData));
}

#[test]
fn tracker_rates_ignore_tick_count() {
    // Ticks lag behind wall time; rates still follow the timestamps
    let mut tracker = SessionTracker::new();
    let t0 = Local::now();
    tracker.start("0", t0).unwrap();
    for _ in 0..50 {
        tracker.tick();
    }
    tracker.stop(t0 + TimeDelta::seconds(120)).unwrap();

    let rates = tracker.calculate("240").unwrap();
    assert_eq!(tracker.elapsed_seconds(), 50);
    assert_eq!(rates.xp_per_minute, 120);
}

#[test]
fn tracker_fractional_duration() {
    let mut tracker = SessionTracker::new();
    let t0 = Local::now();
    tracker.start("0", t0).unwrap();
    tracker.stop(t0 + TimeDelta::milliseconds(1500)).unwrap();

    let rates = tracker.calculate("3").unwrap();
    assert_eq!(rates.duration_secs, 1.5);
    assert_eq!(rates.xp_per_minute, 120);
}

#[test]
fn countdown_lifecycle() {
    let mut countdown = Countdown::new(0, 0, false);
    assert_eq!(countdown.start(), Err(CountdownError::ZeroDuration));

    countdown.configure(0, 3);
    countdown.start().unwrap();
    let events: Vec<_> = std::iter::from_fn(|| countdown.tick()).collect();

    assert_eq!(
        events,
        vec![
            CountdownEvent::Tick {
                minutes: 0,
                seconds: 2
            },
            CountdownEvent::Tick {
                minutes: 0,
                seconds: 1
            },
            CountdownEvent::Finished,
        ]
    );
    assert_eq!(countdown.phase(), CountdownPhase::Finished);
}

#[test]
fn countdown_auto_reset_keeps_cycling() {
    let mut countdown = Countdown::new(0, 2, true);
    countdown.start().unwrap();

    let resets = (0..10)
        .filter_map(|_| countdown.tick())
        .filter(|e| matches!(e, CountdownEvent::Reset { .. }))
        .count();

    assert_eq!(resets, 5);
    assert!(countdown.is_running());
}
