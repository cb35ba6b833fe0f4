use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v >= prev, "{ease:?} decreased at step {i}");
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(7.0), 1.0);
}

#[test]
fn dotted_names_parse() {
    assert_eq!(Ease::parse("power2.out").unwrap(), Ease::OutCubic);
    assert_eq!(Ease::parse("power2.in").unwrap(), Ease::InCubic);
    assert_eq!(Ease::parse("quad.inOut").unwrap(), Ease::InOutQuad);
    assert_eq!(Ease::parse("none").unwrap(), Ease::Linear);
    assert!(Ease::parse("elastic.out").is_err());
}

#[test]
fn serde_accepts_both_spellings() {
    let a: Ease = serde_json::from_str("\"OutQuad\"").unwrap();
    let b: Ease = serde_json::from_str("\"power1.out\"").unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&Ease::InCubic).unwrap(), "\"InCubic\"");
}
