use super::*;

const ALL: [Ease; 11] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InOutSine,
    Ease::CssEaseIn,
    Ease::CssEaseOut,
    Ease::CssEaseInOut,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn css_ease_in_out_is_symmetric() {
    let e = Ease::CssEaseInOut;
    assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
    let a = e.apply(0.2);
    let b = e.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-6);
}

#[test]
fn linear_bezier_matches_identity() {
    let e = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for t in [0.1, 0.33, 0.5, 0.9] {
        assert!((e.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::InQuad.apply(-3.0), 0.0);
    assert_eq!(Ease::InQuad.apply(3.0), 1.0);
}
