use super::*;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

#[test]
fn unit_suffixes_parse_and_resolve() {
    assert_eq!(Value::parse("-20vw").unwrap().resolve(vp()), -200.0);
    assert_eq!(Value::parse("5vh").unwrap().resolve(vp()), 40.0);
    assert_eq!(Value::parse("12px").unwrap().resolve(vp()), 12.0);
    assert_eq!(Value::parse("35deg").unwrap().resolve(vp()), 35.0);
    assert_eq!(Value::parse(" 3 ").unwrap(), Value::Num(3.0));
    assert!(Value::parse("wide").is_err());
}

#[test]
fn state_def_reads_numbers_and_unit_strings() {
    let s: StateDef =
        serde_json::from_str(r#"{"x": "-60vw", "rotateY": 35, "opacity": 0}"#).unwrap();
    assert_eq!(s.get(Property::X), Some(Value::Vw(-60.0)));
    assert_eq!(s.get(Property::RotateY), Some(Value::Num(35.0)));
    assert_eq!(s.get(Property::Opacity), Some(Value::Num(0.0)));
    assert_eq!(s.get(Property::Scale), None);
}

#[test]
fn resting_is_fully_visible_and_untransformed() {
    let r = VisualState::resting();
    assert_eq!(r.get(Property::Opacity), Some(1.0));
    assert_eq!(r.get(Property::Scale), Some(1.0));
    assert_eq!(r.get(Property::X), Some(0.0));
    assert!(r.is_resting());

    let mut moved = r.clone();
    moved.set(Property::Y, 3.0);
    assert!(!moved.is_resting());
}

#[test]
fn merge_overwrites_only_present_properties() {
    let mut a = VisualState::new();
    a.set(Property::X, 1.0);
    a.set(Property::Opacity, 0.5);
    let mut b = VisualState::new();
    b.set(Property::Opacity, 0.9);
    a.merge(&b);
    assert_eq!(a.get(Property::X), Some(1.0));
    assert_eq!(a.get(Property::Opacity), Some(0.9));
}

#[test]
fn lerp_points_midway() {
    let p = <Point as Lerp>::lerp(&Point::new(0.0, 0.0), &Point::new(10.0, -4.0), 0.5);
    assert_eq!(p, Point::new(5.0, -2.0));
}
