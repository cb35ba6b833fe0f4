use super::*;

fn vp() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

fn geom(top: f64) -> SectionGeometry {
    SectionGeometry {
        top,
        height: 1000.0,
    }
}

#[test]
fn pinned_progress_runs_over_travel() {
    let t = Trigger::Pinned { travel: 1.3 };
    assert_eq!(t.raw_progress(0.0, geom(2000.0), vp()), 0.0);
    assert_eq!(t.raw_progress(2000.0, geom(2000.0), vp()), 0.0);
    assert!((t.raw_progress(2650.0, geom(2000.0), vp()) - 0.5).abs() < 1e-12);
    assert_eq!(t.raw_progress(3300.0, geom(2000.0), vp()), 1.0);
    assert_eq!(t.raw_progress(9000.0, geom(2000.0), vp()), 1.0);
}

#[test]
fn progress_is_monotone_in_scroll() {
    let t = Trigger::DEFAULT_PINNED;
    let mut last = 0.0;
    for i in 0..400 {
        let p = t.raw_progress(1800.0 + i as f64 * 5.0, geom(2000.0), vp());
        assert!(p >= last);
        last = p;
    }
}

#[test]
fn range_trigger_uses_viewport_lines() {
    let t = Trigger::DEFAULT_RANGE;
    // top 80% -> scroll 1200, top 50% -> scroll 1500
    assert_eq!(t.raw_progress(1200.0, geom(2000.0), vp()), 0.0);
    assert!((t.raw_progress(1350.0, geom(2000.0), vp()) - 0.5).abs() < 1e-12);
    assert_eq!(t.raw_progress(1500.0, geom(2000.0), vp()), 1.0);
    assert!(!t.has_entered(1199.0, geom(2000.0), vp()));
    assert!(t.has_entered(1200.0, geom(2000.0), vp()));
}

#[test]
fn degenerate_geometry_reports_zero() {
    let zero = Viewport::new(0.0, 0.0).unwrap();
    assert_eq!(Trigger::DEFAULT_PINNED.raw_progress(500.0, geom(0.0), zero), 0.0);
    assert_eq!(
        Trigger::Pinned { travel: 0.0 }.raw_progress(500.0, geom(0.0), vp()),
        0.0
    );
    let inverted = Trigger::Range {
        start_line: 0.2,
        end_line: 0.6,
    };
    assert_eq!(inverted.raw_progress(1900.0, geom(2000.0), vp()), 0.0);
    assert_eq!(Trigger::DEFAULT_PINNED.raw_progress(f64::NAN, geom(0.0), vp()), 0.0);
}

#[test]
fn pin_state_freezes_the_section() {
    let t = Trigger::Pinned { travel: 1.3 };
    let before = t.pin_state(1500.0, geom(2000.0), vp()).unwrap();
    assert!(!before.pinned);
    assert_eq!(before.offset_px, 0.0);
    assert_eq!(before.spacer_px, 1300.0);

    let during = t.pin_state(2400.0, geom(2000.0), vp()).unwrap();
    assert!(during.pinned);
    assert_eq!(during.offset_px, 400.0);

    let after = t.pin_state(5000.0, geom(2000.0), vp()).unwrap();
    assert!(!after.pinned);
    assert_eq!(after.offset_px, 1300.0);

    assert!(Trigger::DEFAULT_RANGE.pin_state(0.0, geom(0.0), vp()).is_none());
}

#[test]
fn triggers_parse_from_json() {
    let t: Trigger = serde_json::from_str(r#"{"kind":"pinned","travel":1.3}"#).unwrap();
    assert_eq!(t, Trigger::DEFAULT_PINNED);
    let t: Trigger =
        serde_json::from_str(r#"{"kind":"range","start_line":0.8,"end_line":0.5}"#).unwrap();
    assert_eq!(t, Trigger::DEFAULT_RANGE);
    assert!(Trigger::Pinned { travel: -1.0 }.validate().is_err());
}
