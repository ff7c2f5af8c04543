use crate::foundation::core::TimeMs;
use crate::schedule::scheduler::VirtualScheduler;
use std::time::Instant;

/// Maps wall-clock time onto a [`VirtualScheduler`].
///
/// A host event loop calls [`WallClock::pump`] once per display frame (or from
/// its own timer); the scheduler then runs every callback that came due since
/// the previous pump. Nothing blocks.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    origin: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::start()
    }
}

impl WallClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self { origin }
    }

    pub fn time_at(&self, at: Instant) -> TimeMs {
        let ms = at.saturating_duration_since(self.origin).as_millis();
        TimeMs(u64::try_from(ms).unwrap_or(u64::MAX))
    }

    pub fn elapsed(&self) -> TimeMs {
        self.time_at(Instant::now())
    }

    /// Advance `scheduler` to the wall time at `at`. Returns callbacks run.
    pub fn pump_at(&self, scheduler: &VirtualScheduler, at: Instant) -> usize {
        let fired = scheduler.advance_to(self.time_at(at));
        if fired > 0 {
            tracing::trace!(fired, "wall clock pump");
        }
        fired
    }

    pub fn pump(&self, scheduler: &VirtualScheduler) -> usize {
        self.pump_at(scheduler, Instant::now())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
