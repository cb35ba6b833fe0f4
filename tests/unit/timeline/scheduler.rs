use super::*;
use crate::animation::ease::Ease;
use crate::animation::segment::Segment;
use crate::animation::state::StateDef;
use crate::host::memory::MemoryHost;

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn fade_track(id: &str, start: f64) -> Track {
    Track::new(
        TargetId::from(id),
        vec![
            Segment::new(
                start,
                start + 0.1,
                StateDef::new().opacity(0.0).y(24.0),
                StateDef::new().opacity(1.0).y(0.0),
                Ease::OutCubic,
            )
            .unwrap(),
            Segment::new(
                0.8,
                1.0,
                StateDef::new().opacity(1.0),
                StateDef::new().opacity(0.0),
                Ease::InCubic,
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

fn scheduler() -> Scheduler {
    Scheduler::new(vec![fade_track("a", 0.0), fade_track("b", 0.05)]).unwrap()
}

#[test]
fn duplicate_targets_are_rejected() {
    let err = Scheduler::new(vec![fade_track("a", 0.0), fade_track("a", 0.1)]);
    assert!(err.is_err());
}

#[test]
fn advance_is_idempotent() {
    let mut s = scheduler();
    let mut host = MemoryHost::with_targets(["a", "b"]);
    s.advance(0.37, vp(), &mut host);
    let first = host.snapshot().clone();
    s.advance(0.37, vp(), &mut host);
    assert_eq!(&first, host.snapshot());
}

#[test]
fn scrolling_back_matches_direct_seek() {
    let mut forward = scheduler();
    let mut host_a = MemoryHost::with_targets(["a", "b"]);
    for p in [0.0, 0.04, 0.12, 0.5, 0.93, 1.0, 0.6, 0.07] {
        forward.advance(p, vp(), &mut host_a);
    }

    let mut direct = scheduler();
    let mut host_b = MemoryHost::with_targets(["a", "b"]);
    direct.advance(0.07, vp(), &mut host_b);

    assert_eq!(host_a.snapshot(), host_b.snapshot());
}

#[test]
fn detached_targets_are_skipped_then_resume() {
    let mut s = scheduler();
    let mut host = MemoryHost::with_targets(["a"]);
    let report = s.advance(0.5, vp(), &mut host);
    assert_eq!(report, AdvanceReport { applied: 1, skipped: 1 });

    host.attach(TargetId::from("b"));
    let report = s.advance(0.5, vp(), &mut host);
    assert_eq!(report.skipped, 0);
    assert_eq!(host.value(&TargetId::from("b"), Property::Opacity), 1.0);
}

#[test]
fn current_reflects_last_advance() {
    let mut s = scheduler();
    let mut host = MemoryHost::new();
    assert!(s.current(&TargetId::from("a")).is_none());
    s.advance(1.0, vp(), &mut host);
    assert_eq!(
        s.current(&TargetId::from("a")).unwrap().get(Property::Opacity),
        Some(0.0)
    );
    assert_eq!(s.progress(), Some(1.0));
    s.clear();
    assert!(s.current(&TargetId::from("a")).is_none());
}

#[test]
fn stagger_is_just_shifted_tracks() {
    let s = scheduler();
    let a = s.resolve_target(&TargetId::from("a"), 0.05, vp()).unwrap();
    let b = s.resolve_target(&TargetId::from("b"), 0.05, vp()).unwrap();
    assert!(a.get(Property::Opacity).unwrap() > 0.0);
    assert_eq!(b.get(Property::Opacity), Some(0.0));
}
