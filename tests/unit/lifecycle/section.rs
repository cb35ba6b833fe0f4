use super::*;
use crate::animation::ease::Ease;
use crate::animation::state::StateDef;
use crate::host::memory::MemoryHost;
use crate::timeline::dsl::TimelineBuilder;

fn vp() -> Viewport {
    Viewport::new(1440.0, 1000.0).unwrap()
}

fn reveal_tracks() -> Vec<Track> {
    TimelineBuilder::new()
        .from_to(
            "about.card",
            0.0,
            0.3,
            StateDef::new().opacity(0.0).y(40.0),
            StateDef::new().opacity(1.0).y(0.0),
            Ease::OutCubic,
        )
        .unwrap()
        .into_tracks()
        .unwrap()
}

fn geom() -> SectionGeometry {
    SectionGeometry {
        top: 2000.0,
        height: 1000.0,
    }
}

#[test]
fn targets_and_longest_entrance() {
    let s = Section::new("about", geom())
        .with_variant(
            DeviceClass::Wide,
            VariantGraph::Animated {
                trigger: Trigger::DEFAULT_RANGE,
                drive: Drive::Scrub { lag_ms: 400.0 },
                tracks: reveal_tracks(),
            },
        )
        .with_variant(
            DeviceClass::Compact,
            VariantGraph::Animated {
                trigger: Trigger::DEFAULT_RANGE,
                drive: Drive::PlayOnEnter { duration_ms: 900.0 },
                tracks: reveal_tracks(),
            },
        );
    s.validate().unwrap();
    assert_eq!(s.longest_entrance_ms(), 900.0);
    assert!(s.targets().contains(&TargetId::from("about.card")));
}

#[test]
fn invalid_geometry_is_rejected() {
    let s = Section::new(
        "bad",
        SectionGeometry {
            top: f64::NAN,
            height: 10.0,
        },
    );
    assert!(matches!(s.validate(), Err(ChoreoError::Scene(_))));
    assert!(Section::new(" ", geom()).validate().is_err());
}

#[test]
fn scrub_binding_writes_only_on_change() {
    let graph = VariantGraph::Animated {
        trigger: Trigger::DEFAULT_RANGE,
        drive: Drive::Scrub { lag_ms: 0.0 },
        tracks: reveal_tracks(),
    };
    let mut b = Binding::bind(&graph, 0.0, geom(), vp(), TimeMs(0.0)).unwrap();
    let mut host = MemoryHost::with_targets(["about.card"]);

    assert_eq!(b.frame(TimeMs(0.0), vp(), &mut host).applied, 1);
    assert_eq!(b.frame(TimeMs(16.0), vp(), &mut host).applied, 0);

    // Range runs from scroll 1200 to 1500.
    b.on_scroll(1500.0, geom(), vp(), TimeMs(32.0));
    assert_eq!(b.frame(TimeMs(32.0), vp(), &mut host).applied, 1);
    let id = TargetId::from("about.card");
    assert_eq!(host.value(&id, Property::Opacity), 1.0);
    assert_eq!(b.progress(TimeMs(32.0)), Some(1.0));

    b.invalidate();
    assert_eq!(b.frame(TimeMs(48.0), vp(), &mut host).applied, 1);
}

#[test]
fn detached_targets_keep_the_binding_dirty() {
    let graph = VariantGraph::Animated {
        trigger: Trigger::DEFAULT_RANGE,
        drive: Drive::Scrub { lag_ms: 0.0 },
        tracks: reveal_tracks(),
    };
    let mut b = Binding::bind(&graph, 0.0, geom(), vp(), TimeMs(0.0)).unwrap();
    let mut host = MemoryHost::new();
    assert_eq!(b.frame(TimeMs(0.0), vp(), &mut host).skipped, 1);

    host.attach(TargetId::from("about.card"));
    assert_eq!(b.frame(TimeMs(16.0), vp(), &mut host).applied, 1);
}

#[test]
fn play_on_enter_starts_when_crossing_the_start_line() {
    let graph = VariantGraph::Animated {
        trigger: Trigger::DEFAULT_RANGE,
        drive: Drive::PlayOnEnter { duration_ms: 500.0 },
        tracks: reveal_tracks(),
    };
    let mut b = Binding::bind(&graph, 0.0, geom(), vp(), TimeMs(0.0)).unwrap();
    let mut host = MemoryHost::with_targets(["about.card"]);
    let id = TargetId::from("about.card");

    b.frame(TimeMs(0.0), vp(), &mut host);
    assert_eq!(host.value(&id, Property::Opacity), 0.0);
    assert!(!b.busy());

    b.on_scroll(1250.0, geom(), vp(), TimeMs(100.0));
    assert!(b.busy());
    b.frame(TimeMs(700.0), vp(), &mut host);
    assert_eq!(host.value(&id, Property::Opacity), 1.0);
    assert!(!b.busy());

    // Scrolling back does not replay.
    b.on_scroll(0.0, geom(), vp(), TimeMs(800.0));
    b.on_scroll(1300.0, geom(), vp(), TimeMs(900.0));
    assert!(!b.busy());
}

#[test]
fn rest_binding_is_inert() {
    let mut b = Binding::bind(&VariantGraph::Rest, 0.0, geom(), vp(), TimeMs(0.0)).unwrap();
    let mut host = MemoryHost::new();
    assert_eq!(b.frame(TimeMs(0.0), vp(), &mut host), AdvanceReport::default());
    assert!(b.trigger().is_none());
    assert!(b.progress(TimeMs(0.0)).is_none());
}

#[test]
fn most_hidden_expectation_wins() {
    let graph = VariantGraph::Animated {
        trigger: Trigger::DEFAULT_RANGE,
        drive: Drive::Scrub { lag_ms: 0.0 },
        tracks: reveal_tracks(),
    };
    let b = Binding::bind(&graph, 5000.0, geom(), vp(), TimeMs(0.0)).unwrap();
    let id = TargetId::from("about.card");
    assert_eq!(expected_opacity(&b, None, &id, TimeMs(0.0), vp()), 1.0);

    let scheduler = TimelineBuilder::new()
        .from_to(
            "about.card",
            0.0,
            1.0,
            StateDef::new().opacity(0.0),
            StateDef::new().opacity(1.0),
            Ease::Linear,
        )
        .unwrap()
        .build()
        .unwrap();
    let idle = EntrancePlayer::new(scheduler, 1000.0).unwrap();
    assert_eq!(expected_opacity(&b, Some(&idle), &id, TimeMs(0.0), vp()), 0.0);

    let other = TargetId::from("nowhere");
    assert_eq!(expected_opacity(&b, None, &other, TimeMs(0.0), vp()), 1.0);
}
