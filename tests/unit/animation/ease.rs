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
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn symmetric_curves_hit_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InOutCubic.apply(-2.0), 0.0);
    assert_eq!(Ease::InOutCubic.apply(3.0), 1.0);
}

#[test]
fn default_is_in_out_cubic() {
    assert_eq!(Ease::default(), Ease::InOutCubic);
}
