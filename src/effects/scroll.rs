//! Scroll progress of a designated container, normalized to `[0, 1]`.
//!
//! The mapper is the only writer. Readers share the value through
//! [`ProgressReader`] and may register change listeners whose guards
//! unsubscribe on drop.

use crate::foundation::{
    error::{PagefxError, PagefxResult},
    math::{LinearMap, clamp01},
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// One host sample of a scroll container's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Distance the container can scroll; `0` when content fits.
    pub fn extent(&self) -> f64 {
        let h = self.scroll_height - self.client_height;
        if h.is_finite() { h.max(0.0) } else { 0.0 }
    }

    /// Normalized progress, clamped. Non-finite input and containers without
    /// a scrollable extent map to `0`.
    pub fn progress(&self) -> f64 {
        let extent = self.extent();
        if extent <= 0.0 {
            return 0.0;
        }
        clamp01(self.scroll_top / extent)
    }
}

type Listener = Rc<dyn Fn(f64)>;

#[derive(Default)]
struct Channel {
    value: Cell<f64>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Channel {
    fn subscribe(self: &Rc<Self>, listener: Listener) -> ProgressSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        ProgressSubscription {
            channel: Rc::downgrade(self),
            id,
        }
    }

    fn is_registered(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(i, _)| *i == id)
    }

    fn publish(&self, value: f64) {
        self.value.set(value);
        // Listeners may subscribe or unsubscribe while being notified.
        let snapshot: Vec<(u64, Listener)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener(value);
            }
        }
    }
}

/// Guard for a change listener; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct ProgressSubscription {
    channel: Weak<Channel>,
    id: u64,
}

impl ProgressSubscription {
    pub fn is_active(&self) -> bool {
        self.channel
            .upgrade()
            .is_some_and(|c| c.is_registered(self.id))
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.listeners.borrow_mut().retain(|(i, _)| *i != self.id);
        }
    }
}

/// Read-only handle to the published progress.
#[derive(Clone)]
pub struct ProgressReader {
    channel: Rc<Channel>,
}

impl ProgressReader {
    pub fn get(&self) -> f64 {
        self.channel.value.get()
    }

    /// Call `listener` with every new value.
    pub fn subscribe(&self, listener: impl Fn(f64) + 'static) -> ProgressSubscription {
        self.channel.subscribe(Rc::new(listener))
    }

    pub fn listener_count(&self) -> usize {
        self.channel.listeners.borrow().len()
    }
}

/// Samples a container and publishes its normalized scroll progress.
pub struct ScrollMapper {
    channel: Rc<Channel>,
    samples: u64,
    publishes: u64,
}

impl Default for ScrollMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollMapper {
    pub fn new() -> Self {
        Self {
            channel: Rc::new(Channel::default()),
            samples: 0,
            publishes: 0,
        }
    }

    pub fn reader(&self) -> ProgressReader {
        ProgressReader {
            channel: Rc::clone(&self.channel),
        }
    }

    pub fn progress(&self) -> f64 {
        self.channel.value.get()
    }

    /// Recompute progress from `metrics`; publishes and returns `true` only
    /// when the value changed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sample(&mut self, metrics: ScrollMetrics) -> bool {
        self.samples += 1;
        let next = metrics.progress();
        if next == self.channel.value.get() {
            return false;
        }
        self.publishes += 1;
        tracing::trace!(progress = next, "scroll progress published");
        self.channel.publish(next);
        true
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn publishes(&self) -> u64 {
        self.publishes
    }
}

/// Maps the shared scroll progress into a consumer's own co-domain.
#[derive(Clone)]
pub struct Parallax {
    reader: ProgressReader,
    map: LinearMap,
}

impl Parallax {
    /// Background offset `0%..100%`, as used by the hero backdrop.
    pub const BACKDROP: LinearMap = LinearMap::unit_to(0.0, 100.0);

    pub fn new(reader: ProgressReader, map: LinearMap) -> PagefxResult<Self> {
        map.input.validate("parallax.input")?;
        if !(map.output.min.is_finite() && map.output.max.is_finite()) {
            return Err(PagefxError::validation("parallax.output must be finite"));
        }
        Ok(Self { reader, map })
    }

    pub fn backdrop(reader: ProgressReader) -> Self {
        Self {
            reader,
            map: Self::BACKDROP,
        }
    }

    pub fn map(&self) -> LinearMap {
        self.map
    }

    pub fn offset(&self) -> f64 {
        self.map.apply(self.reader.get())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scroll.rs"]
mod tests;
