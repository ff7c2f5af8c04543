use crate::foundation::error::{PagefxError, PagefxResult};

/// Clamp to `[0, 1]`, mapping non-finite input to `0`.
pub fn clamp01(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Closed numeric interval used by configuration (`min <= max`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, what: &str) -> PagefxResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(PagefxError::validation(format!("{what} must be finite")));
        }
        if self.min > self.max {
            return Err(PagefxError::validation(format!(
                "{what} min must be <= max (got {}..{})",
                self.min, self.max
            )));
        }
        if !self.width().is_finite() {
            return Err(PagefxError::validation(format!(
                "{what} width must be finite (got {}..{})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Fixed linear mapping from an input interval to an output interval.
///
/// Input outside the domain is clamped first, so the output never leaves the
/// co-domain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearMap {
    pub input: Span,
    pub output: Span,
}

impl LinearMap {
    pub const fn new(input: Span, output: Span) -> Self {
        Self { input, output }
    }

    /// Map from the unit interval onto `[from, to]`.
    pub const fn unit_to(from: f64, to: f64) -> Self {
        Self {
            input: Span::new(0.0, 1.0),
            output: Span::new(from, to),
        }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let w = self.input.width();
        if w == 0.0 {
            return self.output.min;
        }
        let t = clamp01((v - self.input.min) / w);
        lerp(self.output.min, self.output.max, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
