//! Damped spring integration for emphasis transitions.
//!
//! Springs are stepped per channel so a transition can be retargeted while in
//! flight without losing velocity.

use crate::foundation::error::{PagefxError, PagefxResult};

/// Physical parameters of a damped harmonic spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringProfile {
    pub stiffness: f64,
    #[serde(default = "SpringProfile::default_damping")]
    pub damping: f64,
    #[serde(default = "SpringProfile::default_mass")]
    pub mass: f64,
    /// Distance to target below which the spring may come to rest.
    #[serde(default = "SpringProfile::default_rest_delta")]
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    #[serde(default = "SpringProfile::default_rest_speed")]
    pub rest_speed: f64,
}

impl Default for SpringProfile {
    fn default() -> Self {
        Self::with_stiffness(100.0)
    }
}

impl SpringProfile {
    const MAX_STEP_SECS: f64 = 0.001;

    fn default_damping() -> f64 {
        10.0
    }

    fn default_mass() -> f64 {
        1.0
    }

    fn default_rest_delta() -> f64 {
        0.001
    }

    fn default_rest_speed() -> f64 {
        0.01
    }

    /// A spring with the given stiffness and implicit damping/mass.
    pub fn with_stiffness(stiffness: f64) -> Self {
        Self {
            stiffness,
            damping: Self::default_damping(),
            mass: Self::default_mass(),
            rest_delta: Self::default_rest_delta(),
            rest_speed: Self::default_rest_speed(),
        }
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(PagefxError::animation("spring stiffness must be > 0"));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(PagefxError::animation("spring damping must be >= 0"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PagefxError::animation("spring mass must be > 0"));
        }
        Ok(())
    }

    /// Damping ratio; `< 1` overshoots, `>= 1` does not.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Position and velocity of one spring-driven channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct SpringState {
    pub value: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn at_rest(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    pub fn is_settled(&self, target: f64, profile: &SpringProfile) -> bool {
        (target - self.value).abs() <= profile.rest_delta
            && self.velocity.abs() <= profile.rest_speed
    }

    /// Advance by `dt_secs` toward `target`. Returns `true` once settled, in
    /// which case the state is snapped exactly onto the target.
    pub fn step(&mut self, target: f64, dt_secs: f64, profile: &SpringProfile) -> bool {
        let mut remaining = dt_secs.max(0.0);
        let mass = profile.mass.max(f64::EPSILON);
        while remaining > 0.0 {
            let h = remaining.min(SpringProfile::MAX_STEP_SECS);
            let force = -profile.stiffness * (self.value - target) - profile.damping * self.velocity;
            self.velocity += force / mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled(target, profile) {
            *self = Self::at_rest(target);
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
