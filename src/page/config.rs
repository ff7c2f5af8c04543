use crate::{
    effects::{drift::DriftConfig, field::FieldConfig, reveal::RevealConfig},
    foundation::{
        core::Fps,
        error::{PagefxError, PagefxResult},
    },
};
use anyhow::Context;
use std::path::Path;

/// Entrance and emphasis timings of the landing page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageTiming {
    /// Header drops in from `-header_drop_px`.
    pub header_drop_px: f64,
    pub header_ms: u64,
    /// Badge, title, tagline, lede and actions, in that order.
    pub hero_delays_ms: [u64; 5],
    pub hero_ms: u64,
    /// The title's entrance runs longer than the rest of the hero.
    pub title_ms: u64,
    pub nav_base_ms: u64,
    pub nav_step_ms: u64,
    pub nav_hover_scale: f64,
    pub feature_step_ms: u64,
    pub feature_stiffness: f64,
    pub feature_rise_px: f64,
    pub feature_hover_lift_px: f64,
    pub feature_hover_scale: f64,
    pub solution_step_ms: u64,
    pub solution_stiffness: f64,
    pub solution_offset_px: f64,
    pub solution_hover_scale: f64,
    pub logo_stiffness: f64,
    pub cta_hover_scale: f64,
    pub cta_press_scale: f64,
    pub hover_ms: u64,
}

impl Default for PageTiming {
    fn default() -> Self {
        Self {
            header_drop_px: 100.0,
            header_ms: 800,
            hero_delays_ms: [200, 400, 800, 1_200, 1_600],
            hero_ms: 800,
            title_ms: 1_000,
            nav_base_ms: 500,
            nav_step_ms: 100,
            nav_hover_scale: 1.1,
            feature_step_ms: 100,
            feature_stiffness: 100.0,
            feature_rise_px: 50.0,
            feature_hover_lift_px: 10.0,
            feature_hover_scale: 1.02,
            solution_step_ms: 200,
            solution_stiffness: 100.0,
            solution_offset_px: 50.0,
            solution_hover_scale: 1.03,
            logo_stiffness: 300.0,
            cta_hover_scale: 1.05,
            cta_press_scale: 0.95,
            hover_ms: 300,
        }
    }
}

impl PageTiming {
    pub fn validate(&self) -> PagefxResult<()> {
        let durations = [self.header_ms, self.hero_ms, self.title_ms, self.hover_ms];
        if durations.contains(&0) {
            return Err(PagefxError::validation("page durations must be > 0"));
        }
        let stiffness = [
            self.feature_stiffness,
            self.solution_stiffness,
            self.logo_stiffness,
        ];
        if !stiffness.iter().all(|k| k.is_finite() && *k > 0.0) {
            return Err(PagefxError::validation("page spring stiffness must be > 0"));
        }
        let scales = [
            self.nav_hover_scale,
            self.feature_hover_scale,
            self.solution_hover_scale,
            self.cta_hover_scale,
            self.cta_press_scale,
        ];
        if !scales.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(PagefxError::validation("page scales must be > 0"));
        }
        Ok(())
    }
}

/// Every tunable of the page's motion, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Display cadence the page expects. Build the host scheduler with it;
    /// [`LandingPage::mount`](crate::LandingPage::mount) rejects a scheduler
    /// running at a different rate.
    pub fps: Fps,
    pub field: FieldConfig,
    pub drift: DriftConfig,
    pub reveal: RevealConfig,
    pub page: PageTiming,
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> PagefxResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PagefxResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read motion config '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> PagefxResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        self.field.validate()?;
        self.drift.validate()?;
        self.reveal.validate()?;
        self.page.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/config.rs"]
mod tests;
