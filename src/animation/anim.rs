use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8Premul, Transform2D, Vec2},
    foundation::error::{PagefxError, PagefxResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Transform2D {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            rotation_rad: a.rotation_rad + (b.rotation_rad - a.rotation_rad) * t,
            scale: <Vec2 as Lerp>::lerp(&a.scale, &b.scale, t),
            anchor: <Vec2 as Lerp>::lerp(&a.anchor, &b.anchor, t),
        }
    }
}

impl Lerp for Rgba8Premul {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Keyframe track sampled by normalized progress.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    pub keys: Vec<Keyframe<T>>, // sorted by `at`
    pub default: Option<T>,     // value when no keys exist
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Position within the cycle, in `[0, 1]`.
    pub at: f64,
    pub value: T,
    pub ease: Ease, // ease applied toward next key
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![Keyframe {
                at: 0.0,
                value,
                ease: Ease::Linear,
            }],
            default: None,
        }
    }

    /// Values spread evenly over the cycle, each segment eased with `ease`.
    pub fn evenly(values: impl IntoIterator<Item = T>, ease: Ease) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        let last = values.len().saturating_sub(1).max(1) as f64;
        let keys = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| Keyframe {
                at: (i as f64 / last).min(1.0),
                value,
                ease,
            })
            .collect();
        Self {
            keys,
            default: None,
        }
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(PagefxError::animation(
                "Keyframes must have at least one key or a default value",
            ));
        }
        if !self.keys.iter().all(|k| (0.0..=1.0).contains(&k.at)) {
            return Err(PagefxError::animation(
                "Keyframes positions must lie in [0, 1]",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].at <= w[1].at) {
            return Err(PagefxError::animation(
                "Keyframes keys must be sorted by position",
            ));
        }
        Ok(())
    }

    pub fn sample(&self, progress: f64) -> PagefxResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| PagefxError::animation("Keyframes has no keys and no default"));
        }

        let p = progress.clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|k| k.at <= p);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.at - a.at;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let t = (p - a.at) / denom;
        Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Jump back to the start after each cycle.
    #[default]
    Repeat,
    /// Alternate direction every cycle.
    PingPong,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// Play once and hold the final value.
    #[default]
    Once,
    /// Restart on completion for as long as the track is sampled.
    Forever,
}

/// A timed keyframe track: delay, duration and repeat policy over [`Keyframes`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Tween<T> {
    pub keyframes: Keyframes<T>,
    pub duration_ms: u64,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub mode: LoopMode,
}

impl<T> Tween<T>
where
    T: Lerp + Clone,
{
    pub fn once(keyframes: Keyframes<T>, duration_ms: u64) -> Self {
        Self {
            keyframes,
            duration_ms,
            delay_ms: 0,
            repeat: Repeat::Once,
            mode: LoopMode::Repeat,
        }
    }

    pub fn forever(keyframes: Keyframes<T>, period_ms: u64, mode: LoopMode) -> Self {
        Self {
            keyframes,
            duration_ms: period_ms,
            delay_ms: 0,
            repeat: Repeat::Forever,
            mode,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> PagefxResult<()> {
        if self.duration_ms == 0 {
            return Err(PagefxError::animation("Tween duration must be > 0"));
        }
        self.keyframes.validate()
    }

    /// Normalized progress through the current cycle at `elapsed_ms` after start.
    pub fn progress(&self, elapsed_ms: u64) -> f64 {
        if elapsed_ms < self.delay_ms || self.duration_ms == 0 {
            return 0.0;
        }
        let local = elapsed_ms - self.delay_ms;
        match self.repeat {
            Repeat::Once => (local as f64 / self.duration_ms as f64).min(1.0),
            Repeat::Forever => {
                let cycle = local / self.duration_ms;
                let pos = (local % self.duration_ms) as f64 / self.duration_ms as f64;
                match self.mode {
                    LoopMode::Repeat => pos,
                    LoopMode::PingPong if cycle % 2 == 1 => 1.0 - pos,
                    LoopMode::PingPong => pos,
                }
            }
        }
    }

    pub fn sample(&self, elapsed_ms: u64) -> PagefxResult<T> {
        self.keyframes.sample(self.progress(elapsed_ms))
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        match self.repeat {
            Repeat::Once => elapsed_ms >= self.delay_ms.saturating_add(self.duration_ms),
            Repeat::Forever => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
