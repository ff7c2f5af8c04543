use crate::foundation::{
    error::PagefxResult,
    math::Span,
};
use rand::Rng;

/// Immutable descriptor of one decorative particle.
///
/// `x`/`y` are percentages of the container, `size` is in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub opacity: f64,
}

/// Parameters of the randomized particle field.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles; zero or negative means an empty field.
    pub count: i64,
    pub x: Span,
    pub y: Span,
    pub size: Span,
    pub opacity: Span,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 50,
            x: Span::new(0.0, 100.0),
            y: Span::new(0.0, 100.0),
            size: Span::new(1.0, 5.0),
            opacity: Span::new(0.1, 0.6),
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> PagefxResult<()> {
        self.x.validate("field.x")?;
        self.y.validate("field.y")?;
        self.size.validate("field.size")?;
        self.opacity.validate("field.opacity")
    }

    /// Effective particle count.
    pub fn len(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A generated batch of particles. Fixed size for the lifetime of a mount.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Draw a fresh field. Every coordinate is sampled independently.
    #[tracing::instrument(skip_all, fields(count = config.count))]
    pub fn generate<R: Rng>(config: &FieldConfig, rng: &mut R) -> Self {
        let n = config.len();
        let particles = (0..n)
            .map(|i| Particle {
                id: u32::try_from(i).unwrap_or(u32::MAX),
                x: draw(rng, config.x),
                y: draw(rng, config.y),
                size: draw(rng, config.size),
                opacity: draw(rng, config.opacity),
            })
            .collect::<Vec<_>>();
        tracing::debug!(particles = particles.len(), "particle field generated");
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }
}

/// Uniform draw from `[min, max)`. Empty, non-finite or overflowing spans
/// yield `min` without consuming the rng.
pub(crate) fn draw<R: Rng>(rng: &mut R, span: Span) -> f64 {
    let width = span.max - span.min;
    if !(width > 0.0 && width.is_finite()) {
        return span.min;
    }
    rng.random_range(span.min..span.max)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/field.rs"]
mod tests;
