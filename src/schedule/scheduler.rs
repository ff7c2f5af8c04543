use crate::foundation::core::{Fps, TimeMs};
use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};

/// Identifier of a scheduled callback. Never reused within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// One-shot callback, receives the time it fired at.
pub type OnceCallback = Box<dyn FnOnce(TimeMs)>;
/// Repeating callback; returning `ControlFlow::Break` ends the subscription.
pub type RepeatCallback = Box<dyn FnMut(TimeMs) -> ControlFlow<()>>;

/// The "scheduled tick" capability every animated element is driven by.
///
/// Implementations are single-threaded and must never invoke a callback while
/// holding internal borrows, so callbacks are free to schedule or cancel.
pub trait Scheduler {
    fn now(&self) -> TimeMs;

    /// Display cadence behind [`Scheduler::request_frames`].
    fn fps(&self) -> Fps;

    fn set_timeout(&self, delay_ms: u64, callback: OnceCallback) -> TimerId;

    /// Fire every `period_ms` (at least 1 ms) starting one period from now.
    fn set_interval(&self, period_ms: u64, callback: RepeatCallback) -> TimerId;

    /// Fire on every display frame boundary after now.
    fn request_frames(&self, callback: RepeatCallback) -> TimerId;

    /// Cancel a pending callback. Returns whether it was still live; calling it
    /// again, or for a finished timer, is a no-op.
    fn cancel(&self, id: TimerId) -> bool;

    fn is_pending(&self, id: TimerId) -> bool;
}

/// Owns one scheduled callback and cancels it when dropped.
///
/// Holds the scheduler weakly so callbacks that capture a subscription never
/// form a reference cycle with the scheduler.
#[must_use = "dropping a Subscription cancels its timer"]
pub struct Subscription {
    scheduler: Weak<dyn Scheduler>,
    id: TimerId,
}

impl Subscription {
    pub fn new(scheduler: &Rc<dyn Scheduler>, id: TimerId) -> Self {
        Self {
            scheduler: Rc::downgrade(scheduler),
            id,
        }
    }

    pub fn timeout(scheduler: &Rc<dyn Scheduler>, delay_ms: u64, callback: OnceCallback) -> Self {
        let id = scheduler.set_timeout(delay_ms, callback);
        Self::new(scheduler, id)
    }

    pub fn interval(
        scheduler: &Rc<dyn Scheduler>,
        period_ms: u64,
        callback: RepeatCallback,
    ) -> Self {
        let id = scheduler.set_interval(period_ms, callback);
        Self::new(scheduler, id)
    }

    pub fn frames(scheduler: &Rc<dyn Scheduler>, callback: RepeatCallback) -> Self {
        let id = scheduler.request_frames(callback);
        Self::new(scheduler, id)
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .is_some_and(|s| s.is_pending(self.id))
    }

    /// Cancel now. Idempotent; dropping afterwards does nothing further.
    pub fn cancel(&self) -> bool {
        match self.scheduler.upgrade() {
            Some(s) => s.cancel(self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

enum Cadence {
    Once,
    Every(u64),
    Frame,
}

enum Callback {
    Once(OnceCallback),
    Repeat(RepeatCallback),
}

struct Slot {
    cadence: Cadence,
    due: TimeMs,
    // `None` while the callback is running.
    callback: Option<Callback>,
}

#[derive(Default)]
struct Inner {
    now: TimeMs,
    next_id: u64,
    next_seq: u64,
    // (due, seq, id); stale entries are skipped on pop.
    queue: BinaryHeap<Reverse<(TimeMs, u64, u64)>>,
    slots: HashMap<u64, Slot>,
    invocations: u64,
}

impl Inner {
    fn push(&mut self, due: TimeMs, id: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, id)));
    }

    fn insert(&mut self, cadence: Cadence, due: TimeMs, callback: Callback) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.slots.insert(
            id,
            Slot {
                cadence,
                due,
                callback: Some(callback),
            },
        );
        self.push(due, id);
        TimerId(id)
    }
}

/// Deterministic scheduler over virtual time.
///
/// Nothing fires until the host calls [`VirtualScheduler::advance_to`] or
/// [`VirtualScheduler::advance_by`]. Determinism rule: earliest due time first,
/// ties broken by scheduling order.
pub struct VirtualScheduler {
    fps: Fps,
    inner: RefCell<Inner>,
}

impl VirtualScheduler {
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            inner: RefCell::new(Inner::default()),
        }
    }

    /// Shared handle, the form components take.
    pub fn shared(fps: Fps) -> Rc<Self> {
        Rc::new(Self::new(fps))
    }

    /// Number of live (not yet finished or cancelled) callbacks.
    pub fn pending(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Total callback invocations so far.
    pub fn invocations(&self) -> u64 {
        self.inner.borrow().invocations
    }

    pub fn advance_by(&self, ms: u64) -> usize {
        let target = self.now().saturating_add(ms);
        self.advance_to(target)
    }

    /// Run every callback due at or before `target`, in order, then set the
    /// clock to `target`. Returns the number of callbacks invoked.
    pub fn advance_to(&self, target: TimeMs) -> usize {
        let mut fired = 0usize;
        loop {
            let (id, now, callback) = {
                let mut inner = self.inner.borrow_mut();
                let Some(Reverse((due, _, id))) = inner.queue.peek().copied() else {
                    break;
                };
                if due > target {
                    break;
                }
                inner.queue.pop();
                let live = inner
                    .slots
                    .get(&id)
                    .is_some_and(|slot| slot.due == due && slot.callback.is_some());
                if !live {
                    continue;
                }
                inner.now = inner.now.max(due);
                inner.invocations += 1;
                let now = inner.now;
                let once = matches!(
                    inner.slots.get(&id).map(|s| &s.cadence),
                    Some(Cadence::Once)
                );
                let callback = if once {
                    inner.slots.remove(&id).and_then(|s| s.callback)
                } else {
                    inner.slots.get_mut(&id).and_then(|s| s.callback.take())
                };
                (id, now, callback)
            };

            let Some(callback) = callback else {
                continue;
            };
            fired += 1;
            match callback {
                Callback::Once(cb) => cb(now),
                Callback::Repeat(mut cb) => {
                    let flow = cb(now);
                    let leftover = self.rearm(id, now, flow, cb);
                    drop(leftover);
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.now = inner.now.max(target);
        fired
    }

    // Puts a repeating callback back unless it broke out or was cancelled while
    // running. A callback that is not re-armed is handed back so the caller
    // drops it outside the borrow (its captures may cancel other timers).
    fn rearm(
        &self,
        id: u64,
        now: TimeMs,
        flow: ControlFlow<()>,
        cb: RepeatCallback,
    ) -> Option<RepeatCallback> {
        let mut inner = self.inner.borrow_mut();
        if flow.is_break() {
            let removed = inner.slots.remove(&id);
            drop(inner);
            drop(removed);
            return Some(cb);
        }
        let next_due = match inner.slots.get(&id).map(|s| &s.cadence) {
            Some(Cadence::Every(period)) => Some(now.saturating_add(*period)),
            Some(Cadence::Frame) => Some(self.fps.frame_start(self.fps.next_frame_after(now))),
            Some(Cadence::Once) | None => None,
        };
        let Some(next_due) = next_due else {
            return Some(cb);
        };
        if let Some(slot) = inner.slots.get_mut(&id) {
            slot.due = next_due;
            slot.callback = Some(Callback::Repeat(cb));
        }
        inner.push(next_due, id);
        None
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> TimeMs {
        self.inner.borrow().now
    }

    fn fps(&self) -> Fps {
        self.fps
    }

    fn set_timeout(&self, delay_ms: u64, callback: OnceCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now.saturating_add(delay_ms);
        inner.insert(Cadence::Once, due, Callback::Once(callback))
    }

    fn set_interval(&self, period_ms: u64, callback: RepeatCallback) -> TimerId {
        let period = period_ms.max(1);
        let mut inner = self.inner.borrow_mut();
        let due = inner.now.saturating_add(period);
        inner.insert(Cadence::Every(period), due, Callback::Repeat(callback))
    }

    fn request_frames(&self, callback: RepeatCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let due = self.fps.frame_start(self.fps.next_frame_after(inner.now));
        inner.insert(Cadence::Frame, due, Callback::Repeat(callback))
    }

    fn cancel(&self, id: TimerId) -> bool {
        let removed = self.inner.borrow_mut().slots.remove(&id.0);
        let was_live = removed.is_some();
        drop(removed);
        was_live
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().slots.contains_key(&id.0)
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VirtualScheduler")
            .field("fps", &self.fps)
            .field("now", &inner.now)
            .field("pending", &inner.slots.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
