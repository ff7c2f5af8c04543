use crate::animation::anim::{Keyframes, Lerp, LoopMode, Tween};

pub fn delay<T>(mut inner: Tween<T>, by_ms: u64) -> Tween<T> {
    inner.delay_ms = inner.delay_ms.saturating_add(by_ms);
    inner
}

pub fn loop_<T>(keyframes: Keyframes<T>, period_ms: u64, mode: LoopMode) -> Tween<T>
where
    T: Lerp + Clone,
{
    Tween::forever(keyframes, period_ms, mode)
}

/// Delay for the `index`-th item of a staggered group.
pub fn stagger_delay(index: usize, base_ms: u64, step_ms: u64) -> u64 {
    let index = u64::try_from(index).unwrap_or(u64::MAX);
    base_ms.saturating_add(step_ms.saturating_mul(index))
}

/// Delays for a group of `count` items entering one after another.
pub fn stagger_delays(count: usize, base_ms: u64, step_ms: u64) -> Vec<u64> {
    (0..count)
        .map(|i| stagger_delay(i, base_ms, step_ms))
        .collect()
}

/// Offset each tween by its position in the group.
pub fn stagger<T>(tweens: Vec<Tween<T>>, base_ms: u64, step_ms: u64) -> Vec<Tween<T>> {
    tweens
        .into_iter()
        .enumerate()
        .map(|(i, t)| delay(t, stagger_delay(i, base_ms, step_ms)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
