use super::*;

fn fade_in(start: f64, end: f64) -> ChoreoResult<Segment> {
    Segment::new(
        start,
        end,
        StateDef::new().opacity(0.0),
        StateDef::new().opacity(1.0),
        Ease::OutQuad,
    )
}

#[test]
fn offsets_outside_unit_interval_are_rejected() {
    assert!(fade_in(-0.1, 0.2).is_err());
    assert!(fade_in(0.5, 0.4).is_err());
    assert!(fade_in(0.2, 1.2).is_err());
    assert!(fade_in(f64::NAN, 0.2).is_err());
    assert!(fade_in(0.0, 0.3).is_ok());
}

#[test]
fn empty_target_state_is_rejected() {
    let seg = Segment::new(0.0, 0.1, StateDef::new(), StateDef::new(), Ease::Linear);
    assert!(seg.is_err());
}

#[test]
fn local_progress_is_clamped_and_eased() {
    let seg = fade_in(0.2, 0.4).unwrap();
    assert_eq!(seg.eased_local(0.0), 0.0);
    assert_eq!(seg.eased_local(0.9), 1.0);
    let mid = seg.eased_local(0.3);
    assert!((mid - Ease::OutQuad.apply(0.5)).abs() < 1e-12);
}

#[test]
fn instant_segment_jumps_at_start() {
    let seg = Segment::set(0.5, StateDef::new().opacity(1.0)).unwrap();
    assert!(seg.is_instant());
    assert_eq!(seg.eased_local(0.49), 0.0);
    assert_eq!(seg.eased_local(0.5), 1.0);
}

#[test]
fn shifting_keeps_length_and_bounds() {
    let seg = fade_in(0.7, 0.9).unwrap();
    let moved = seg.shifted(0.25);
    assert!((moved.end() - 1.0).abs() < 1e-12);
    assert!((moved.end() - moved.start() - 0.2).abs() < 1e-12);
    assert!(moved.validate().is_ok());
}
