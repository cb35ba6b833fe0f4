use super::*;

fn cfg() -> WatchdogConfig {
    WatchdogConfig {
        delay_ms: 2000.0,
        retry_ms: 500.0,
        opacity_threshold: 0.05,
    }
}

#[test]
fn delay_outlasts_the_longest_entrance() {
    assert_eq!(Watchdog::delay_for(&cfg(), 1000.0), 2000.0);
    assert_eq!(Watchdog::delay_for(&cfg(), 3000.0), 3000.0 + ENTRANCE_MARGIN_MS);
}

#[test]
fn fires_once() {
    let mut w = Watchdog::arm(TimeMs(100.0), &cfg(), 0.0);
    assert_eq!(w.deadline(), Some(TimeMs(2100.0)));
    assert_eq!(w.poll(TimeMs(2000.0), false), WatchdogPoll::Idle);
    assert_eq!(w.poll(TimeMs(2100.0), false), WatchdogPoll::Inspect);
    assert!(!w.is_armed());
    assert_eq!(w.poll(TimeMs(9000.0), false), WatchdogPoll::Idle);
}

#[test]
fn busy_entrance_postpones() {
    let mut w = Watchdog::arm(TimeMs(0.0), &cfg(), 0.0);
    assert_eq!(w.poll(TimeMs(2000.0), true), WatchdogPoll::Postponed);
    assert_eq!(w.deadline(), Some(TimeMs(2500.0)));
    assert_eq!(w.poll(TimeMs(2200.0), false), WatchdogPoll::Idle);
    assert_eq!(w.poll(TimeMs(2500.0), false), WatchdogPoll::Inspect);
}

#[test]
fn cancel_disarms() {
    let mut w = Watchdog::arm(TimeMs(0.0), &cfg(), 0.0);
    w.cancel();
    assert_eq!(w.poll(TimeMs(1e9), false), WatchdogPoll::Idle);
}

#[test]
fn stuck_needs_a_hidden_measure() {
    let w = Watchdog::arm(TimeMs(0.0), &cfg(), 0.0);
    assert!(w.is_stuck(Some(0.0), 1.0, true));
    assert!(!w.is_stuck(Some(0.8), 1.0, true));
    assert!(!w.is_stuck(None, 1.0, false));
}

#[test]
fn hidden_expectation_is_trusted_only_after_a_scroll() {
    let w = Watchdog::arm(TimeMs(0.0), &cfg(), 0.0);
    assert!(!w.is_stuck(Some(0.0), 0.0, true));
    assert!(w.is_stuck(Some(0.0), 0.0, false));
    assert!(w.is_stuck(Some(0.01), 0.0, false));
}
