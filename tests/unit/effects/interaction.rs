use super::*;
use crate::foundation::core::{Fps, Vec2};
use crate::schedule::scheduler::VirtualScheduler;

fn sched() -> (Rc<VirtualScheduler>, Rc<dyn Scheduler>) {
    let v = VirtualScheduler::shared(Fps::default());
    let d: Rc<dyn Scheduler> = v.clone();
    (v, d)
}

fn card() -> TransitionTable {
    TransitionTable::default()
        .entrance(
            StyleDelta::new().opacity(0.0).translate(0.0, 20.0),
            TransitionProfile::tween(500, Ease::CssEaseOut),
        )
        .on(InteractionState::Hovered, StyleDelta::new().scale(1.05))
        .on(InteractionState::Pressed, StyleDelta::new().scale(0.95))
}

#[test]
fn state_priority_and_layering() {
    let table = card();
    let mut f = InteractionFlags::default();
    assert_eq!(f.derive(&table), InteractionState::OutOfView);
    assert_eq!(f.target_style(&table).opacity, 0.0);

    f.in_view = true;
    f.entered = true;
    assert_eq!(f.derive(&table), InteractionState::InView);
    assert_eq!(f.target_style(&table), Style::default());

    f.hovered = true;
    assert_eq!(f.derive(&table), InteractionState::Hovered);
    assert_eq!(f.target_style(&table).transform.scale, Vec2::new(1.05, 1.05));

    f.pressed = true;
    assert_eq!(f.derive(&table), InteractionState::Pressed);
    assert_eq!(f.target_style(&table).transform.scale, Vec2::new(0.95, 0.95));

    let plain = TransitionTable::default();
    assert_eq!(InteractionFlags::default().derive(&plain), InteractionState::Idle);
}

#[test]
fn one_shot_entrance_plays_once() {
    let (v, d) = sched();
    let mut el = InteractiveElement::mount(card(), &d).unwrap();
    assert_eq!(el.style().opacity, 0.0);

    assert!(el.viewport_enter());
    v.advance_by(1_000);
    assert_eq!(el.style(), Style::default());
    assert!(!el.is_animating());

    assert!(!el.viewport_exit());
    assert_eq!(el.state(), InteractionState::InView);
    assert!(!el.viewport_enter());
    v.advance_by(1_000);
    assert_eq!(el.entrance_count(), 1);
    assert_eq!(el.transition_count(), 1);
    assert_eq!(el.style(), Style::default());
}

#[test]
fn repeating_entrance_replays() {
    let (v, d) = sched();
    let mut el = InteractiveElement::mount(card().repeat_entrance(), &d).unwrap();
    el.viewport_enter();
    v.advance_by(1_000);
    el.viewport_exit();
    assert_eq!(el.state(), InteractionState::OutOfView);
    v.advance_by(1_000);
    assert_eq!(el.style().opacity, 0.0);
    el.viewport_enter();
    assert_eq!(el.entrance_count(), 2);
}

#[test]
fn same_state_is_a_no_op() {
    let (v, d) = sched();
    let mut el = InteractiveElement::mount(card(), &d).unwrap();
    el.viewport_enter();
    v.advance_by(1_000);

    assert!(el.pointer_enter());
    v.advance_by(100);
    let mid = el.style();
    assert!(!el.pointer_enter());
    assert_eq!(el.transition_count(), 2);
    assert_eq!(el.style(), mid);
    v.advance_by(1_000);
    assert_eq!(el.style().transform.scale, Vec2::new(1.05, 1.05));
}

#[test]
fn retarget_continues_from_current_style() {
    let (v, d) = sched();
    let table = TransitionTable::default()
        .with_transition(TransitionProfile::tween(400, Ease::Linear))
        .on(InteractionState::Hovered, StyleDelta::new().translate(0.0, -100.0));
    let mut el = InteractiveElement::mount(table, &d).unwrap();

    el.pointer_enter();
    v.advance_by(200);
    let before = el.style();
    assert!(before.transform.translate.y < -10.0 && before.transform.translate.y > -90.0);

    el.pointer_leave();
    assert_eq!(el.style(), before);
    v.advance_by(16);
    let after = el.style();
    assert!((after.transform.translate.y - before.transform.translate.y).abs() < 10.0);
    v.advance_by(1_000);
    assert_eq!(el.style(), Style::default());
}

#[test]
fn spring_keeps_velocity_and_settles() {
    let (v, d) = sched();
    let table = TransitionTable::default()
        .with_transition(TransitionProfile::spring(300.0))
        .on(InteractionState::Hovered, StyleDelta::new().scale(1.05));
    let mut el = InteractiveElement::mount(table, &d).unwrap();

    el.pointer_enter();
    v.advance_by(50);
    let before = el.style();
    el.pointer_leave();
    assert_eq!(el.style(), before);
    v.advance_by(17);
    let next = el.style();
    // Still moving outward right after the retarget.
    assert!(next.transform.scale.x > before.transform.scale.x);

    v.advance_by(5_000);
    assert!(!el.is_animating());
    assert_eq!(el.style(), Style::default());
    assert_eq!(v.pending(), 0);
}

#[test]
fn delayed_entrance_holds_hidden_style() {
    let (v, d) = sched();
    let table = TransitionTable::default().entrance(
        StyleDelta::new().opacity(0.0),
        TransitionProfile::spring(100.0).with_delay(300),
    );
    let mut el = InteractiveElement::mount(table, &d).unwrap();
    el.viewport_enter();
    v.advance_by(250);
    assert_eq!(el.style().opacity, 0.0);
    v.advance_by(200);
    assert!(el.style().opacity > 0.0);
}

#[test]
fn frames_are_released_when_settled() {
    let (v, d) = sched();
    let mut el = InteractiveElement::mount(card(), &d).unwrap();
    assert_eq!(v.pending(), 0);
    el.viewport_enter();
    assert_eq!(v.pending(), 1);
    v.advance_by(2_000);
    assert_eq!(v.pending(), 0);
    el.pointer_enter();
    assert_eq!(v.pending(), 1);
}

#[test]
fn unmount_stops_transitions() {
    let (v, d) = sched();
    let mut el = InteractiveElement::mount(card(), &d).unwrap();
    el.viewport_enter();
    v.advance_by(100);
    el.unmount();
    assert_eq!(v.pending(), 0);
    let calls = v.invocations();
    let frozen = el.style();
    assert!(!el.pointer_enter());
    v.advance_by(1_000);
    assert_eq!(v.invocations(), calls);
    assert_eq!(el.style(), frozen);
}

#[test]
fn table_validation() {
    assert!(card().validate().is_ok());
    let mut dup = card();
    dup.rules.push(dup.rules[0]);
    assert!(dup.validate().is_err());
    let bad = TransitionTable::default().with_transition(TransitionProfile::tween(0, Ease::Linear));
    assert!(bad.validate().is_err());
}

#[test]
fn profile_json_shape() {
    let p: TransitionProfile =
        serde_json::from_str(r#"{"motion":{"kind":"spring","stiffness":100.0},"delay_ms":200}"#)
            .unwrap();
    assert_eq!(p, TransitionProfile::spring(100.0).with_delay(200));
}
