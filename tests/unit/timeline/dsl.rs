use super::*;
use crate::animation::state::Property;
use crate::foundation::core::Viewport;

fn vp() -> Viewport {
    Viewport::new(1280.0, 720.0).unwrap()
}

#[test]
fn same_target_tweens_merge_into_one_track() {
    let tracks = TimelineBuilder::new()
        .from_to(
            "title",
            0.0,
            0.3,
            StateDef::new().opacity(0.0),
            StateDef::new().opacity(1.0),
            Ease::OutCubic,
        )
        .unwrap()
        .to("title", 0.7, 1.0, StateDef::new().opacity(0.0), Ease::InCubic)
        .unwrap()
        .into_tracks()
        .unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].segments().len(), 2);
}

#[test]
fn stagger_shifts_each_item() {
    let tracks = TimelineBuilder::new()
        .stagger(
            ["i0", "i1", "i2"],
            0.1,
            0.3,
            StateDef::new().opacity(0.0),
            StateDef::new().opacity(1.0),
            Ease::OutQuad,
            0.02,
        )
        .unwrap()
        .into_tracks()
        .unwrap();
    let starts: Vec<f64> = tracks.iter().map(|t| t.segments()[0].start()).collect();
    assert!((starts[0] - 0.10).abs() < 1e-12);
    assert!((starts[1] - 0.12).abs() < 1e-12);
    assert!((starts[2] - 0.14).abs() < 1e-12);
}

#[test]
fn stagger_past_the_end_is_clamped() {
    let tracks = TimelineBuilder::new()
        .stagger(
            (0..10).map(|i| format!("item{i}")).map(TargetId::new),
            0.8,
            1.0,
            StateDef::new().opacity(0.0),
            StateDef::new().opacity(1.0),
            Ease::Linear,
            0.1,
        )
        .unwrap()
        .into_tracks()
        .unwrap();
    for t in &tracks {
        let seg = &t.segments()[0];
        assert!(seg.end() <= 1.0);
        assert!((seg.end() - seg.start() - 0.2).abs() < 1e-9);
    }
}

#[test]
fn negative_stagger_is_rejected() {
    let err = TimelineBuilder::new().stagger(
        ["a"],
        0.0,
        0.1,
        StateDef::new(),
        StateDef::new().opacity(1.0),
        Ease::Linear,
        -0.1,
    );
    assert!(err.is_err());
}

#[test]
fn set_applies_at_its_offset() {
    let scheduler = TimelineBuilder::new()
        .set("badge", 0.5, StateDef::new().opacity(0.0))
        .unwrap()
        .build()
        .unwrap();
    let id = TargetId::from("badge");
    let before = scheduler.resolve_target(&id, 0.49, vp()).unwrap();
    let after = scheduler.resolve_target(&id, 0.5, vp()).unwrap();
    assert_eq!(before.get(Property::Opacity), Some(1.0));
    assert_eq!(after.get(Property::Opacity), Some(0.0));
}

#[test]
fn targets_keep_first_addressed_order() {
    let b = TimelineBuilder::new()
        .to("z", 0.0, 0.1, StateDef::new().x(1.0), Ease::Linear)
        .unwrap()
        .to("a", 0.0, 0.1, StateDef::new().x(1.0), Ease::Linear)
        .unwrap()
        .to("z", 0.5, 0.6, StateDef::new().x(2.0), Ease::Linear)
        .unwrap();
    assert_eq!(b.targets(), &[TargetId::from("z"), TargetId::from("a")]);
}
