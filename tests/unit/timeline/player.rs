use super::*;
use crate::animation::ease::Ease;
use crate::animation::state::{Property, StateDef};
use crate::host::memory::MemoryHost;
use crate::timeline::dsl::TimelineBuilder;

fn vp() -> Viewport {
    Viewport::new(1440.0, 900.0).unwrap()
}

fn hero_player() -> EntrancePlayer {
    let scheduler = TimelineBuilder::new()
        .from_to(
            "hero.title",
            0.0,
            0.6,
            StateDef::new().opacity(0.0).y(40.0),
            StateDef::new().opacity(1.0).y(0.0),
            Ease::OutCubic,
        )
        .unwrap()
        .build()
        .unwrap();
    EntrancePlayer::new(scheduler, 1000.0).unwrap()
}

#[test]
fn zero_duration_is_rejected() {
    let scheduler = TimelineBuilder::new().build().unwrap();
    assert!(EntrancePlayer::new(scheduler, 0.0).is_err());
}

#[test]
fn plays_to_completion_in_wall_clock_time() {
    let mut p = hero_player();
    let mut host = MemoryHost::with_targets(["hero.title"]);
    let id = TargetId::from("hero.title");

    p.render(TimeMs(0.0), vp(), &mut host);
    assert_eq!(host.value(&id, Property::Opacity), 0.0);
    assert!(p.tick(TimeMs(0.0), vp(), &mut host).is_none());

    p.play(TimeMs(100.0));
    assert_eq!(p.finishes_at(), Some(TimeMs(1100.0)));
    p.tick(TimeMs(400.0), vp(), &mut host);
    let mid = host.value(&id, Property::Opacity);
    assert!(mid > 0.0 && mid < 1.0);

    p.tick(TimeMs(2000.0), vp(), &mut host);
    assert!(p.is_finished());
    assert_eq!(host.value(&id, Property::Opacity), 1.0);
    assert_eq!(host.value(&id, Property::Y), 0.0);
}

#[test]
fn cancel_returns_to_idle() {
    let mut p = hero_player();
    p.play(TimeMs(0.0));
    assert!(p.is_playing());
    p.cancel();
    assert_eq!(p.state(), PlayerState::Idle);
    assert_eq!(p.progress_at(TimeMs(5000.0)), 0.0);
}

#[test]
fn expected_tracks_progress() {
    let mut p = hero_player();
    let id = TargetId::from("hero.title");
    assert_eq!(
        p.expected(&id, TimeMs(0.0), vp()).unwrap().get(Property::Opacity),
        Some(0.0)
    );
    p.play(TimeMs(0.0));
    assert_eq!(
        p.expected(&id, TimeMs(600.0), vp()).unwrap().get(Property::Opacity),
        Some(1.0)
    );
}
