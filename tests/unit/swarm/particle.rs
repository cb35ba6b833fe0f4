use super::*;

fn timings() -> SwarmTimings {
    SwarmTimings {
        scatter_ms: 100.0,
        converge_ms: 200.0,
        hold_ms: 300.0,
        fade_ms: 100.0,
    }
}

fn particle() -> SwarmParticle {
    SwarmParticle {
        id: 0,
        origin: Point::new(0.0, 0.0),
        scatter: Point::new(100.0, 50.0),
        target: Point::new(10.0, 10.0),
        scale: 1.2,
        rotation_deg: 90.0,
    }
}

#[test]
fn deadlines_are_absolute_and_ordered() {
    let s = BatchSchedule::new(TimeMs(1000.0), timings());
    assert_eq!(s.converge_at, TimeMs(1100.0));
    assert_eq!(s.fade_at, TimeMs(1600.0));
    assert_eq!(s.dispose_at, TimeMs(1700.0));

    assert_eq!(s.phase_at(TimeMs(999.0)), SwarmPhase::Idle);
    assert_eq!(s.phase_at(TimeMs(1000.0)), SwarmPhase::Scattering);
    assert_eq!(s.phase_at(TimeMs(1100.0)), SwarmPhase::Converging);
    assert_eq!(s.phase_at(TimeMs(1500.0)), SwarmPhase::Converging);
    assert_eq!(s.phase_at(TimeMs(1600.0)), SwarmPhase::Fading);
    assert_eq!(s.phase_at(TimeMs(1700.0)), SwarmPhase::Disposed);
}

#[test]
fn scatter_grows_opacity_from_origin() {
    let s = BatchSchedule::new(TimeMs(0.0), timings());
    let p = particle();
    let start = p.sample(&s, 0.5, TimeMs(0.0)).unwrap();
    assert_eq!(start.position, p.origin);
    assert_eq!(start.opacity, 0.0);

    let mid = p.sample(&s, 0.5, TimeMs(50.0)).unwrap();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(mid.position.x > 0.0 && mid.position.x < 100.0);
}

#[test]
fn converge_lands_on_target_and_shrinks() {
    let s = BatchSchedule::new(TimeMs(0.0), timings());
    let p = particle();
    let begin = p.sample(&s, 0.5, TimeMs(100.0)).unwrap();
    assert_eq!(begin.position, p.scatter);

    let formed = p.sample(&s, 0.5, TimeMs(400.0)).unwrap();
    assert_eq!(formed.position, p.target);
    assert!((formed.scale - 0.6).abs() < 1e-12);
    assert_eq!(formed.rotation_deg, 0.0);
    assert_eq!(formed.opacity, 1.0);
}

#[test]
fn fade_then_gone() {
    let s = BatchSchedule::new(TimeMs(0.0), timings());
    let p = particle();
    let fading = p.sample(&s, 0.5, TimeMs(650.0)).unwrap();
    assert!((fading.opacity - 0.5).abs() < 1e-12);
    assert_eq!(fading.position, p.target);
    assert!(p.sample(&s, 0.5, TimeMs(700.0)).is_none());
}

#[test]
fn zero_length_phases_do_not_divide_by_zero() {
    let t = SwarmTimings {
        scatter_ms: 0.0,
        converge_ms: 0.0,
        hold_ms: 0.0,
        fade_ms: 10.0,
    };
    let s = BatchSchedule::new(TimeMs(0.0), t);
    let sample = particle().sample(&s, 0.5, TimeMs(0.0)).unwrap();
    assert!(sample.opacity.is_finite());
    assert_eq!(s.phase_at(TimeMs(0.0)), SwarmPhase::Fading);
}
