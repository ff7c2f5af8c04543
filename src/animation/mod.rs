//! Keyframe tracks, easing, tween combinators and springs.

pub(crate) mod anim;
pub(crate) mod ease;
pub(crate) mod ops;
pub(crate) mod spring;
