use super::*;
use std::cell::Cell;

fn sched() -> (Rc<VirtualScheduler>, Rc<dyn Scheduler>) {
    let v = VirtualScheduler::shared(Fps::new(60, 1).unwrap());
    let d: Rc<dyn Scheduler> = v.clone();
    (v, d)
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let c = Rc::new(Cell::new(0));
    (c.clone(), c)
}

#[test]
fn timeout_fires_once_at_due_time() {
    let (v, d) = sched();
    let (seen, c) = counter();
    let at = Rc::new(Cell::new(TimeMs::ZERO));
    let at2 = at.clone();
    let _sub = Subscription::timeout(
        &d,
        100,
        Box::new(move |now| {
            c.set(c.get() + 1);
            at2.set(now);
        }),
    );
    assert_eq!(v.advance_by(99), 0);
    assert_eq!(seen.get(), 0);
    assert_eq!(v.advance_by(1), 1);
    assert_eq!(seen.get(), 1);
    assert_eq!(at.get(), TimeMs(100));
    v.advance_by(1000);
    assert_eq!(seen.get(), 1);
    assert_eq!(v.pending(), 0);
}

#[test]
fn interval_repeats_until_break() {
    let (v, d) = sched();
    let (seen, c) = counter();
    let _sub = Subscription::interval(
        &d,
        100,
        Box::new(move |_| {
            c.set(c.get() + 1);
            if c.get() == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }),
    );
    v.advance_by(250);
    assert_eq!(seen.get(), 2);
    v.advance_by(10_000);
    assert_eq!(seen.get(), 3);
    assert_eq!(v.pending(), 0);
}

#[test]
fn frames_fire_on_frame_boundaries() {
    let (v, d) = sched();
    let times = Rc::new(RefCell::new(Vec::new()));
    let t2 = times.clone();
    let _sub = Subscription::frames(
        &d,
        Box::new(move |now| {
            t2.borrow_mut().push(now.0);
            ControlFlow::Continue(())
        }),
    );
    v.advance_to(TimeMs(50));
    assert_eq!(*times.borrow(), vec![16, 33, 50]);
}

#[test]
fn dropping_subscription_cancels() {
    let (v, d) = sched();
    let (seen, c) = counter();
    let sub = Subscription::interval(
        &d,
        10,
        Box::new(move |_| {
            c.set(c.get() + 1);
            ControlFlow::Continue(())
        }),
    );
    v.advance_by(35);
    assert_eq!(seen.get(), 3);
    assert!(sub.is_active());
    drop(sub);
    assert_eq!(v.pending(), 0);
    v.advance_by(1000);
    assert_eq!(seen.get(), 3);
}

#[test]
fn cancel_is_idempotent() {
    let (v, d) = sched();
    let sub = Subscription::timeout(&d, 10, Box::new(|_| {}));
    assert!(sub.cancel());
    assert!(!sub.cancel());
    assert!(!d.cancel(sub.id()));
    assert!(!d.cancel(TimerId(999)));
    drop(sub);
    assert_eq!(v.advance_by(100), 0);
}

#[test]
fn callback_may_cancel_itself_and_schedule_more() {
    let (v, d) = sched();
    let (seen, c) = counter();
    let own_id = Rc::new(Cell::new(None::<TimerId>));
    let own_id2 = own_id.clone();
    let weak = Rc::downgrade(&d);
    let id = d.set_interval(
        10,
        Box::new(move |_| {
            c.set(c.get() + 1);
            if let (Some(s), Some(id)) = (weak.upgrade(), own_id2.get()) {
                s.cancel(id);
                let c = c.clone();
                s.set_timeout(5, Box::new(move |_| c.set(c.get() + 100)));
            }
            ControlFlow::Continue(())
        }),
    );
    own_id.set(Some(id));
    v.advance_by(100);
    assert_eq!(seen.get(), 101);
    assert_eq!(v.pending(), 0);
}

#[test]
fn equal_due_times_run_in_scheduling_order() {
    let (v, d) = sched();
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut subs = Vec::new();
    for tag in 0..4 {
        let order = order.clone();
        subs.push(Subscription::timeout(
            &d,
            20,
            Box::new(move |_| order.borrow_mut().push(tag)),
        ));
    }
    v.advance_by(20);
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
}

#[test]
fn subscription_outliving_scheduler_is_harmless() {
    let (v, d) = sched();
    let sub = Subscription::timeout(&d, 10, Box::new(|_| {}));
    drop(d);
    drop(v);
    assert!(!sub.is_active());
    assert!(!sub.cancel());
}

#[test]
fn advance_sets_clock_even_when_idle() {
    let (v, _d) = sched();
    v.advance_by(123);
    assert_eq!(v.now(), TimeMs(123));
    assert_eq!(v.invocations(), 0);
}
