//! Continuous loop animation for the particle field.
//!
//! Every particle gets its own motion (own cycle length, own frame
//! subscription, own output cell). Nothing is shared between particles, so
//! cycles drift apart naturally and need no coordination.

use crate::{
    animation::{
        anim::{Keyframes, LoopMode, Tween},
        ease::Ease,
    },
    effects::field::{Particle, ParticleField, draw},
    foundation::{
        core::{TimeMs, Vec2},
        error::{PagefxError, PagefxResult},
        math::Span,
    },
    schedule::scheduler::{Scheduler, Subscription},
};
use rand::Rng;
use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Cycle duration range, drawn uniformly per particle.
    pub cycle_ms: Span,
    /// Peak upward offset in pixels.
    pub rise_px: f64,
    /// Peak sideways offset in pixels.
    pub sway_px: f64,
    /// Opacity multiplier at the middle of the cycle.
    pub fade: f64,
    pub ease: Ease,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            cycle_ms: Span::new(10_000.0, 20_000.0),
            rise_px: 20.0,
            sway_px: 10.0,
            fade: 0.3,
            ease: Ease::CssEaseInOut,
        }
    }
}

impl DriftConfig {
    pub fn validate(&self) -> PagefxResult<()> {
        self.cycle_ms.validate("drift.cycle_ms")?;
        if self.cycle_ms.min < 1.0 {
            return Err(PagefxError::validation("drift.cycle_ms must be >= 1ms"));
        }
        if !(0.0..=1.0).contains(&self.fade) {
            return Err(PagefxError::validation("drift.fade must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Rendered state of a particle at the last frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticlePose {
    pub id: u32,
    pub offset: Vec2,
    pub opacity: f64,
}

/// The perpetual motion cycle of a single particle.
#[derive(Clone, Debug)]
pub struct ParticleMotion {
    pub particle: Particle,
    pub cycle_ms: u64,
    dx: Tween<f64>,
    dy: Tween<f64>,
    opacity: Tween<f64>,
}

impl ParticleMotion {
    pub fn new(particle: Particle, cycle_ms: u64, config: &DriftConfig) -> Self {
        let cycle_ms = cycle_ms.max(1);
        let track = |values: [f64; 3]| {
            Tween::forever(
                Keyframes::evenly(values, config.ease),
                cycle_ms,
                LoopMode::Repeat,
            )
        };
        let o = particle.opacity;
        Self {
            particle,
            cycle_ms,
            dx: track([0.0, config.sway_px, 0.0]),
            dy: track([0.0, -config.rise_px, 0.0]),
            opacity: track([o, o * config.fade, o]),
        }
    }

    /// Pose `elapsed_ms` after the motion started.
    pub fn pose(&self, elapsed_ms: u64) -> ParticlePose {
        ParticlePose {
            id: self.particle.id,
            offset: Vec2::new(
                self.dx.sample(elapsed_ms).unwrap_or(0.0),
                self.dy.sample(elapsed_ms).unwrap_or(0.0),
            ),
            opacity: self
                .opacity
                .sample(elapsed_ms)
                .unwrap_or(self.particle.opacity),
        }
    }
}

/// Run `sample(elapsed_ms)` on every frame and publish into the returned cell.
pub(crate) fn drive_loop<T, F>(
    scheduler: &Rc<dyn Scheduler>,
    initial: T,
    mut sample: F,
) -> (Rc<Cell<T>>, Subscription)
where
    T: Copy + 'static,
    F: FnMut(u64) -> T + 'static,
{
    let out = Rc::new(Cell::new(initial));
    let sink = Rc::clone(&out);
    let start: TimeMs = scheduler.now();
    let sub = Subscription::frames(
        scheduler,
        Box::new(move |now| {
            sink.set(sample(now.since(start)));
            ControlFlow::Continue(())
        }),
    );
    (out, sub)
}

struct Running {
    motion: ParticleMotion,
    pose: Rc<Cell<ParticlePose>>,
}

/// Owns the motion of a mounted particle field.
///
/// Dropping the animator (or calling [`LoopAnimator::unmount`]) cancels every
/// frame subscription.
pub struct LoopAnimator {
    running: Vec<Running>,
    subs: Vec<Subscription>,
}

impl LoopAnimator {
    #[tracing::instrument(skip_all, fields(particles = field.len()))]
    pub fn mount<R: Rng>(
        field: &ParticleField,
        config: &DriftConfig,
        scheduler: &Rc<dyn Scheduler>,
        rng: &mut R,
    ) -> Self {
        let mut running = Vec::with_capacity(field.len());
        let mut subs = Vec::with_capacity(field.len());
        for particle in field.particles() {
            let cycle_ms = draw(rng, config.cycle_ms).round().max(1.0) as u64;
            let motion = ParticleMotion::new(*particle, cycle_ms, config);
            let driven = motion.clone();
            let (pose, sub) = drive_loop(scheduler, motion.pose(0), move |elapsed| {
                driven.pose(elapsed)
            });
            running.push(Running { motion, pose });
            subs.push(sub);
        }
        tracing::debug!(loops = subs.len(), "particle loops mounted");
        Self { running, subs }
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn is_mounted(&self) -> bool {
        !self.subs.is_empty()
    }

    pub fn motions(&self) -> impl Iterator<Item = &ParticleMotion> {
        self.running.iter().map(|r| &r.motion)
    }

    /// Poses as of the last rendered frame.
    pub fn poses(&self) -> Vec<ParticlePose> {
        self.running.iter().map(|r| r.pose.get()).collect()
    }

    pub fn unmount(&mut self) {
        if self.subs.is_empty() {
            return;
        }
        let n = self.subs.len();
        self.subs.clear();
        tracing::debug!(loops = n, "particle loops unmounted");
    }
}

impl Drop for LoopAnimator {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/drift.rs"]
mod tests;
