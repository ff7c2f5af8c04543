//! Decorative infinite loops around the hero section.

use crate::{
    animation::{
        anim::{Keyframes, LoopMode, Tween},
        ease::Ease,
    },
    effects::{
        drift::drive_loop,
        style::{Style, StyleDelta},
    },
    foundation::{
        core::Rgba8Premul,
        error::{PagefxError, PagefxResult},
    },
    schedule::scheduler::{Scheduler, Subscription},
};
use std::cell::Cell;
use std::rc::Rc;

/// A named, perpetually repeating style track.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AmbientLoop {
    pub name: String,
    pub tween: Tween<Style>,
}

impl AmbientLoop {
    pub fn new(name: impl Into<String>, tween: Tween<Style>) -> Self {
        Self {
            name: name.into(),
            tween,
        }
    }

    /// Loop through `deltas` layered over the default style, evenly spaced.
    pub fn through(
        name: impl Into<String>,
        deltas: &[StyleDelta],
        period_ms: u64,
        ease: Ease,
    ) -> Self {
        let base = Style::default();
        let kf = Keyframes::evenly(deltas.iter().map(|d| base.with(d)), ease);
        Self::new(name, Tween::forever(kf, period_ms, LoopMode::Repeat))
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.tween = self.tween.with_delay(delay_ms);
        self
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if self.name.is_empty() {
            return Err(PagefxError::validation("ambient loop name is empty"));
        }
        self.tween.validate()
    }

    pub fn style_at(&self, elapsed_ms: u64) -> Style {
        self.tween.sample(elapsed_ms).unwrap_or_default()
    }

    /// Backdrop gradient shift between the two brand blues.
    pub fn backdrop() -> Self {
        let deep = Rgba8Premul::from_straight_rgba(30, 64, 175, 255);
        let bright = Rgba8Premul::from_straight_rgba(59, 130, 246, 255);
        Self::through(
            "backdrop",
            &[
                StyleDelta::new().tint(deep).translate(0.0, 0.0),
                StyleDelta::new().tint(bright).translate(100.0, 0.0),
                StyleDelta::new().tint(deep).translate(0.0, 0.0),
            ],
            10_000,
            Ease::CssEaseInOut,
        )
    }

    /// Floating glow orb; `index` 1 runs slower and starts a second late.
    pub fn orb(index: usize) -> Self {
        let (period, delay, lift) = match index {
            0 => (8_000, 0, -30.0),
            _ => (10_000, 1_000, 30.0),
        };
        Self::through(
            format!("orb-{index}"),
            &[
                StyleDelta::new().translate(0.0, 0.0).scale(1.0),
                StyleDelta::new().translate(0.0, lift).scale(1.1),
                StyleDelta::new().translate(0.0, 0.0).scale(1.0),
            ],
            period,
            Ease::CssEaseInOut,
        )
        .with_delay(delay)
    }

    /// Decorative ring, one full turn per cycle.
    pub fn ring() -> Self {
        Self::through(
            "ring",
            &[StyleDelta::new().rotate_deg(0.0), StyleDelta::new().rotate_deg(360.0)],
            15_000,
            Ease::Linear,
        )
    }

    /// Highlight sweep over the hero title.
    pub fn shimmer() -> Self {
        Self::through(
            "shimmer",
            &[
                StyleDelta::new().translate(-100.0, 0.0),
                StyleDelta::new().translate(100.0, 0.0),
            ],
            5_000,
            Ease::Linear,
        )
    }

    /// The loops the landing page runs.
    pub fn page_defaults() -> Vec<Self> {
        vec![
            Self::backdrop(),
            Self::orb(0),
            Self::orb(1),
            Self::ring(),
            Self::shimmer(),
        ]
    }
}

/// Mounted ambient loops, one frame subscription each.
pub struct AmbientLoops {
    loops: Vec<(String, Rc<Cell<Style>>)>,
    subs: Vec<Subscription>,
}

impl AmbientLoops {
    #[tracing::instrument(skip_all, fields(loops = loops.len()))]
    pub fn mount(loops: &[AmbientLoop], scheduler: &Rc<dyn Scheduler>) -> PagefxResult<Self> {
        for l in loops {
            l.validate()?;
        }
        let mut out = Vec::with_capacity(loops.len());
        let mut subs = Vec::with_capacity(loops.len());
        for l in loops {
            let track = l.clone();
            let (cell, sub) = drive_loop(scheduler, l.style_at(0), move |elapsed| {
                track.style_at(elapsed)
            });
            out.push((l.name.clone(), cell));
            subs.push(sub);
        }
        Ok(Self { loops: out, subs })
    }

    pub fn style(&self, name: &str) -> Option<Style> {
        self.loops
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, cell)| cell.get())
    }

    /// Current value of every loop, in mount order.
    pub fn styles(&self) -> Vec<(String, Style)> {
        self.loops
            .iter()
            .map(|(n, cell)| (n.clone(), cell.get()))
            .collect()
    }

    pub fn is_mounted(&self) -> bool {
        !self.subs.is_empty()
    }

    pub fn unmount(&mut self) {
        if !self.subs.is_empty() {
            self.subs.clear();
            tracing::debug!("ambient loops unmounted");
        }
    }
}

impl Drop for AmbientLoops {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ambient.rs"]
mod tests;
