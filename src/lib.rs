//! pagefx is the motion core of an animated marketing landing page.
//!
//! It owns everything on the page that moves, independent of any rendering
//! surface:
//!
//! - a randomized particle field and its perpetual drift loops
//! - decorative ambient loops (backdrop, orbs, ring, shimmer)
//! - a glyph-by-glyph text reveal with a blinking cursor
//! - scroll progress normalized to `[0, 1]` feeding parallax consumers
//! - per-element interaction tables (hover, press, viewport entrance)
//!
//! Time comes from an injected [`Scheduler`]; randomness from an injected
//! [`rand::Rng`]. Tests drive a [`VirtualScheduler`] by hand and seed the RNG,
//! which makes every frame reproducible. Hosts read a serializable
//! [`PageFrame`] per display frame and report pointer, viewport and scroll
//! input back.
//!
//! The crate is single-threaded by construction. Every timer is owned by a
//! [`Subscription`] guard, so unmounting (or dropping) a component leaves
//! nothing scheduled.
#![forbid(unsafe_code)]

mod animation;
mod effects;
mod foundation;
mod page;
mod schedule;

pub use animation::anim::{Keyframe, Keyframes, Lerp, LoopMode, Repeat, Tween};
pub use animation::ease::Ease;
pub use animation::ops::{delay, loop_, stagger, stagger_delay, stagger_delays};
pub use animation::spring::{SpringProfile, SpringState};
pub use effects::ambient::{AmbientLoop, AmbientLoops};
pub use effects::drift::{DriftConfig, LoopAnimator, ParticleMotion, ParticlePose};
pub use effects::field::{FieldConfig, Particle, ParticleField};
pub use effects::interaction::{
    InteractionFlags, InteractionState, InteractiveElement, Motion, StateRule,
    TransitionProfile, TransitionTable,
};
pub use effects::reveal::{RevealConfig, RevealPhase, RevealState, TextReveal};
pub use effects::scroll::{
    Parallax, ProgressReader, ProgressSubscription, ScrollMapper, ScrollMetrics,
};
pub use effects::style::{STYLE_CHANNELS, Style, StyleDelta};
pub use foundation::core::{Affine, Fps, Rgba8Premul, TimeMs, Transform2D, Vec2};
pub use foundation::error::{PagefxError, PagefxResult};
pub use foundation::math::{LinearMap, Span, clamp01, lerp};
pub use page::catalog::{Catalog, Feature, NavAnchor, Solution};
pub use page::config::{MotionConfig, PageTiming};
pub use page::landing::{AmbientFrame, ElementFrame, ElementKey, LandingPage, PageFrame};
pub use page::nav::{CtaSlot, NavEvent, Navigator, RecordingNavigator};
pub use schedule::clock::WallClock;
pub use schedule::scheduler::{
    OnceCallback, RepeatCallback, Scheduler, Subscription, TimerId, VirtualScheduler,
};
