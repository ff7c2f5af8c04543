use super::*;
use crate::animation::ease::Ease;

#[test]
fn stagger_delays_follow_base_and_step() {
    assert_eq!(stagger_delays(4, 500, 100), vec![500, 600, 700, 800]);
    assert!(stagger_delays(0, 500, 100).is_empty());
    assert_eq!(stagger_delay(usize::MAX, 1, u64::MAX), u64::MAX);
}

#[test]
fn stagger_offsets_each_tween() {
    let fade = Tween::once(Keyframes::evenly([0.0, 1.0], Ease::Linear), 100);
    let group = stagger(vec![fade.clone(), fade.clone(), fade], 0, 200);
    assert_eq!(group[0].sample(50).unwrap(), 0.5);
    assert_eq!(group[1].sample(50).unwrap(), 0.0);
    assert_eq!(group[1].sample(250).unwrap(), 0.5);
    assert_eq!(group[2].sample(450).unwrap(), 0.5);
}

#[test]
fn delay_accumulates() {
    let t = Tween::once(Keyframes::constant(1.0), 10).with_delay(5);
    assert_eq!(delay(t, 7).delay_ms, 12);
}

#[test]
fn loop_never_finishes() {
    let t = loop_(Keyframes::evenly([0.0, 1.0], Ease::Linear), 100, LoopMode::Repeat);
    assert!(!t.is_finished(1_000_000));
    assert_eq!(t.sample(150).unwrap(), 0.5);
}
