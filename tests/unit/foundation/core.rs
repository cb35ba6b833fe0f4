use super::*;

#[test]
fn viewport_rejects_negative_and_non_finite() {
    assert!(Viewport::new(-1.0, 10.0).is_err());
    assert!(Viewport::new(f64::NAN, 10.0).is_err());
    assert!(Viewport::new(1280.0, 720.0).is_ok());
}

#[test]
fn zero_sized_viewport_is_degenerate() {
    assert!(Viewport::new(0.0, 720.0).unwrap().is_degenerate());
    assert!(!Viewport::new(1280.0, 720.0).unwrap().is_degenerate());
}

#[test]
fn time_since_is_floored() {
    let a = TimeMs(100.0);
    assert_eq!(a.after(50.0).since(a), 50.0);
    assert_eq!(a.since(a.after(50.0)), 0.0);
}

#[test]
fn ids_round_trip_as_plain_strings() {
    let id = TargetId::from("hero.image");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"hero.image\"");
    assert_eq!(id.to_string(), "hero.image");
}
