use super::*;

fn bounce() -> Keyframes<f64> {
    Keyframes::evenly([0.0, -20.0, 0.0], Ease::Linear)
}

#[test]
fn evenly_spaces_positions() {
    let kf = bounce();
    let at: Vec<f64> = kf.keys.iter().map(|k| k.at).collect();
    assert_eq!(at, vec![0.0, 0.5, 1.0]);
    kf.validate().unwrap();
}

#[test]
fn keyframes_interpolate_per_segment() {
    let kf = bounce();
    assert_eq!(kf.sample(0.0).unwrap(), 0.0);
    assert_eq!(kf.sample(0.25).unwrap(), -10.0);
    assert_eq!(kf.sample(0.5).unwrap(), -20.0);
    assert_eq!(kf.sample(0.75).unwrap(), -10.0);
    assert_eq!(kf.sample(1.0).unwrap(), 0.0);
}

#[test]
fn empty_keyframes_fall_back_to_default() {
    let kf = Keyframes::<f64> {
        keys: vec![],
        default: Some(4.0),
    };
    assert_eq!(kf.sample(0.3).unwrap(), 4.0);

    let kf = Keyframes::<f64> {
        keys: vec![],
        default: None,
    };
    assert!(kf.validate().is_err());
    assert!(kf.sample(0.3).is_err());
}

#[test]
fn unsorted_keys_are_rejected() {
    let mut kf = bounce();
    kf.keys.swap(0, 2);
    kf.keys[0].at = 1.0;
    kf.keys[2].at = 0.0;
    assert!(kf.validate().is_err());
}

#[test]
fn tween_once_holds_final_value() {
    let tw = Tween::once(Keyframes::evenly([0.0, 10.0], Ease::Linear), 100).with_delay(50);
    assert_eq!(tw.sample(0).unwrap(), 0.0);
    assert_eq!(tw.sample(50).unwrap(), 0.0);
    assert_eq!(tw.sample(100).unwrap(), 5.0);
    assert_eq!(tw.sample(150).unwrap(), 10.0);
    assert_eq!(tw.sample(10_000).unwrap(), 10.0);
    assert!(!tw.is_finished(149));
    assert!(tw.is_finished(150));
}

#[test]
fn tween_forever_restarts_each_cycle() {
    let tw = Tween::forever(Keyframes::evenly([1.0, 0.0], Ease::Linear), 800, LoopMode::Repeat);
    assert_eq!(tw.sample(0).unwrap(), 1.0);
    assert_eq!(tw.sample(400).unwrap(), 0.5);
    assert_eq!(tw.sample(800).unwrap(), 1.0);
    assert_eq!(tw.sample(1200).unwrap(), 0.5);
    assert!(!tw.is_finished(u64::MAX));
}

#[test]
fn tween_ping_pong_mirrors_odd_cycles() {
    let tw = Tween::forever(Keyframes::evenly([0.0, 100.0], Ease::Linear), 100, LoopMode::PingPong);
    assert_eq!(tw.sample(25).unwrap(), 25.0);
    assert_eq!(tw.sample(125).unwrap(), 75.0);
    assert_eq!(tw.sample(225).unwrap(), 25.0);
}

#[test]
fn zero_duration_tween_is_invalid() {
    let tw = Tween::once(Keyframes::constant(1.0), 0);
    assert!(tw.validate().is_err());
    assert_eq!(tw.sample(10).unwrap(), 1.0);
}

#[test]
fn color_lerp_rounds_and_clamps() {
    let a = Rgba8Premul::transparent();
    let b = Rgba8Premul {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    let mid = Rgba8Premul::lerp(&a, &b, 0.5);
    assert_eq!(mid.a, 128);
}
