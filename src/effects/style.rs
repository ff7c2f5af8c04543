use crate::{
    animation::anim::Lerp,
    foundation::core::{Rgba8Premul, Transform2D, Vec2},
};

/// Number of independently animated scalar channels in a [`Style`].
pub const STYLE_CHANNELS: usize = 10;

/// Rendered visual state of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    pub transform: Transform2D,
    pub opacity: f64,
    pub tint: Rgba8Premul,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            transform: Transform2D::default(),
            opacity: 1.0,
            tint: Rgba8Premul::transparent(),
        }
    }
}

impl Style {
    /// Layer `delta` over this style; unset fields keep their value.
    pub fn with(&self, delta: &StyleDelta) -> Self {
        let mut out = *self;
        if let Some(t) = delta.translate {
            out.transform.translate = t;
        }
        if let Some(r) = delta.rotation_rad {
            out.transform.rotation_rad = r;
        }
        if let Some(s) = delta.scale {
            out.transform.scale = s;
        }
        if let Some(o) = delta.opacity {
            out.opacity = o;
        }
        if let Some(c) = delta.tint {
            out.tint = c;
        }
        out
    }

    pub fn to_channels(&self) -> [f64; STYLE_CHANNELS] {
        let t = &self.transform;
        [
            t.translate.x,
            t.translate.y,
            t.rotation_rad,
            t.scale.x,
            t.scale.y,
            self.opacity,
            f64::from(self.tint.r),
            f64::from(self.tint.g),
            f64::from(self.tint.b),
            f64::from(self.tint.a),
        ]
    }

    /// Rebuild from channels. The anchor is not animated and comes from `like`.
    pub fn from_channels(ch: &[f64; STYLE_CHANNELS], like: &Style) -> Self {
        fn u8_of(v: f64) -> u8 {
            v.round().clamp(0.0, 255.0) as u8
        }

        Self {
            transform: Transform2D {
                translate: Vec2::new(ch[0], ch[1]),
                rotation_rad: ch[2],
                scale: Vec2::new(ch[3], ch[4]),
                anchor: like.transform.anchor,
            },
            opacity: ch[5],
            tint: Rgba8Premul {
                r: u8_of(ch[6]),
                g: u8_of(ch[7]),
                b: u8_of(ch[8]),
                a: u8_of(ch[9]),
            },
        }
    }
}

impl Lerp for Style {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            transform: Transform2D::lerp(&a.transform, &b.transform, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            tint: Rgba8Premul::lerp(&a.tint, &b.tint, t),
        }
    }
}

/// Partial style bound to an interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleDelta {
    pub translate: Option<Vec2>,
    pub rotation_rad: Option<f64>,
    pub scale: Option<Vec2>,
    pub opacity: Option<f64>,
    pub tint: Option<Rgba8Premul>,
}

impl StyleDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        self.translate = Some(Vec2::new(x, y));
        self
    }

    pub fn rotate_deg(mut self, deg: f64) -> Self {
        self.rotation_rad = Some(deg.to_radians());
        self
    }

    pub fn scale(mut self, s: f64) -> Self {
        self.scale = Some(Vec2::new(s, s));
        self
    }

    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = Some(o);
        self
    }

    pub fn tint(mut self, c: Rgba8Premul) -> Self {
        self.tint = Some(c);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
