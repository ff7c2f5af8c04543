//! Declarative interaction styles per element.
//!
//! An element binds [`StyleDelta`]s to interaction states and animates the
//! rendered style toward the layered target whenever its pointer or viewport
//! flags change. Transitions are tweens or springs, are retargeted from the
//! current value when interrupted, and only hold a frame subscription while
//! in flight.

use crate::{
    animation::{
        anim::Lerp,
        ease::Ease,
        spring::{SpringProfile, SpringState},
    },
    effects::style::{STYLE_CHANNELS, Style, StyleDelta},
    foundation::{
        core::TimeMs,
        error::{PagefxError, PagefxResult},
        math::clamp01,
    },
    schedule::scheduler::{Scheduler, Subscription},
};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

type Channels = [f64; STYLE_CHANNELS];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    Idle,
    Hovered,
    Pressed,
    InView,
    OutOfView,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    Tween { duration_ms: u64, ease: Ease },
    Spring(SpringProfile),
}

/// How an element moves toward a newly targeted style.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionProfile {
    pub motion: Motion,
    #[serde(default)]
    pub delay_ms: u64,
}

impl Default for TransitionProfile {
    fn default() -> Self {
        Self::tween(300, Ease::CssEaseOut)
    }
}

impl TransitionProfile {
    pub fn tween(duration_ms: u64, ease: Ease) -> Self {
        Self {
            motion: Motion::Tween { duration_ms, ease },
            delay_ms: 0,
        }
    }

    pub fn spring(stiffness: f64) -> Self {
        Self {
            motion: Motion::Spring(SpringProfile::with_stiffness(stiffness)),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> PagefxResult<()> {
        match self.motion {
            Motion::Tween { duration_ms, .. } if duration_ms == 0 => Err(
                PagefxError::animation("transition tween duration must be > 0"),
            ),
            Motion::Tween { .. } => Ok(()),
            Motion::Spring(ref p) => p.validate(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateRule {
    pub state: InteractionState,
    #[serde(default)]
    pub delta: StyleDelta,
    /// Overrides the table's transition when moving into `state`.
    #[serde(default)]
    pub profile: Option<TransitionProfile>,
}

/// Per-element mapping from interaction state to style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionTable {
    #[serde(default)]
    pub base: Style,
    #[serde(default)]
    pub transition: TransitionProfile,
    #[serde(default)]
    pub rules: Vec<StateRule>,
    /// The entrance plays at most once per mount.
    #[serde(default = "TransitionTable::default_once_in_view")]
    pub once_in_view: bool,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl TransitionTable {
    fn default_once_in_view() -> bool {
        true
    }

    pub fn new(base: Style) -> Self {
        Self {
            base,
            transition: TransitionProfile::default(),
            rules: Vec::new(),
            once_in_view: true,
        }
    }

    pub fn with_transition(mut self, profile: TransitionProfile) -> Self {
        self.transition = profile;
        self
    }

    /// Bind `delta` to `state`, replacing any earlier rule for it.
    pub fn on(self, state: InteractionState, delta: StyleDelta) -> Self {
        self.rule_with(state, delta, None)
    }

    pub fn on_with(
        self,
        state: InteractionState,
        delta: StyleDelta,
        profile: TransitionProfile,
    ) -> Self {
        self.rule_with(state, delta, Some(profile))
    }

    fn rule_with(
        mut self,
        state: InteractionState,
        delta: StyleDelta,
        profile: Option<TransitionProfile>,
    ) -> Self {
        self.rules.retain(|r| r.state != state);
        self.rules.push(StateRule {
            state,
            delta,
            profile,
        });
        self
    }

    /// Hidden until the element first enters the viewport, then animated to
    /// the base style with `profile`.
    pub fn entrance(self, hidden: StyleDelta, profile: TransitionProfile) -> Self {
        self.on(InteractionState::OutOfView, hidden)
            .on_with(InteractionState::InView, StyleDelta::new(), profile)
    }

    /// Replay the entrance on every viewport entry.
    pub fn repeat_entrance(mut self) -> Self {
        self.once_in_view = false;
        self
    }

    pub fn rule(&self, state: InteractionState) -> Option<&StateRule> {
        self.rules.iter().find(|r| r.state == state)
    }

    pub fn has_entrance(&self) -> bool {
        self.rule(InteractionState::OutOfView).is_some()
            || self.rule(InteractionState::InView).is_some()
    }

    pub fn profile_for(&self, state: InteractionState) -> TransitionProfile {
        self.rule(state)
            .and_then(|r| r.profile)
            .unwrap_or(self.transition)
    }

    fn delta(&self, state: InteractionState) -> Option<&StyleDelta> {
        self.rule(state).map(|r| &r.delta)
    }

    pub fn validate(&self) -> PagefxResult<()> {
        self.transition.validate()?;
        for (i, rule) in self.rules.iter().enumerate() {
            if self.rules[..i].iter().any(|r| r.state == rule.state) {
                return Err(PagefxError::validation(format!(
                    "duplicate interaction rule for {:?}",
                    rule.state
                )));
            }
            if let Some(p) = &rule.profile {
                p.validate()?;
            }
        }
        if !self.base.opacity.is_finite() {
            return Err(PagefxError::validation("base opacity must be finite"));
        }
        Ok(())
    }
}

/// Pointer and viewport flags reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct InteractionFlags {
    pub hovered: bool,
    pub pressed: bool,
    pub in_view: bool,
    /// The element has entered the viewport at least once.
    pub entered: bool,
}

impl InteractionFlags {
    fn entrance_shown(&self, once: bool) -> bool {
        if once { self.entered } else { self.in_view }
    }

    /// Highest-priority state implied by the flags.
    pub fn derive(&self, table: &TransitionTable) -> InteractionState {
        if self.pressed {
            InteractionState::Pressed
        } else if self.hovered {
            InteractionState::Hovered
        } else if table.has_entrance() {
            if self.entrance_shown(table.once_in_view) {
                InteractionState::InView
            } else {
                InteractionState::OutOfView
            }
        } else {
            InteractionState::Idle
        }
    }

    /// Layer base, entrance, hover and press deltas in that order.
    pub fn target_style(&self, table: &TransitionTable) -> Style {
        let mut style = table.base;
        let entrance = if self.entrance_shown(table.once_in_view) {
            InteractionState::InView
        } else {
            InteractionState::OutOfView
        };
        let mut layers = vec![entrance];
        if self.hovered || self.pressed {
            layers.push(InteractionState::Hovered);
        }
        if self.pressed {
            layers.push(InteractionState::Pressed);
        }
        for state in layers {
            if let Some(delta) = table.delta(state) {
                style = style.with(delta);
            }
        }
        style
    }
}

enum Active {
    Tween {
        from: Channels,
        started: TimeMs,
        delay_ms: u64,
        duration_ms: u64,
        ease: Ease,
    },
    Spring {
        springs: [SpringState; STYLE_CHANNELS],
        profile: SpringProfile,
        release: TimeMs,
        last: TimeMs,
    },
}

struct Motor {
    like: Style,
    current: Channels,
    target: Channels,
    active: Option<Active>,
}

impl Motor {
    fn at_rest(style: Style) -> Self {
        let ch = style.to_channels();
        Self {
            like: style,
            current: ch,
            target: ch,
            active: None,
        }
    }

    fn style(&self) -> Style {
        Style::from_channels(&self.current, &self.like)
    }

    fn retarget(&mut self, target: Channels, profile: &TransitionProfile, now: TimeMs) {
        self.target = target;
        self.active = Some(match profile.motion {
            Motion::Tween { duration_ms, ease } => Active::Tween {
                from: self.current,
                started: now,
                delay_ms: profile.delay_ms,
                duration_ms: duration_ms.max(1),
                ease,
            },
            Motion::Spring(spring) => {
                let carried = match &self.active {
                    Some(Active::Spring { springs, .. }) => Some(*springs),
                    _ => None,
                };
                let springs = std::array::from_fn(|i| SpringState {
                    value: self.current[i],
                    velocity: carried.map_or(0.0, |s| s[i].velocity),
                });
                Active::Spring {
                    springs,
                    profile: spring,
                    release: now.saturating_add(profile.delay_ms),
                    last: now,
                }
            }
        });
    }

    /// Advance to `now`. Returns `true` once the transition has settled.
    fn step(&mut self, now: TimeMs) -> bool {
        let settled = match &mut self.active {
            None => true,
            Some(Active::Tween {
                from,
                started,
                delay_ms,
                duration_ms,
                ease,
            }) => {
                let elapsed = now.since(*started);
                if elapsed < *delay_ms {
                    false
                } else {
                    let t = clamp01((elapsed - *delay_ms) as f64 / *duration_ms as f64);
                    let e = ease.apply(t);
                    for i in 0..STYLE_CHANNELS {
                        self.current[i] = f64::lerp(&from[i], &self.target[i], e);
                    }
                    t >= 1.0
                }
            }
            Some(Active::Spring {
                springs,
                profile,
                release,
                last,
            }) => {
                let from = (*last).max(*release);
                *last = now;
                if now <= from {
                    false
                } else {
                    let dt = (now.since(from)) as f64 / 1000.0;
                    let mut all = true;
                    for i in 0..STYLE_CHANNELS {
                        all &= springs[i].step(self.target[i], dt, profile);
                        self.current[i] = springs[i].value;
                    }
                    all
                }
            }
        };
        if settled {
            self.current = self.target;
            self.active = None;
        }
        settled
    }
}

/// A mounted element driven by an interaction table.
pub struct InteractiveElement {
    scheduler: Rc<dyn Scheduler>,
    table: TransitionTable,
    flags: InteractionFlags,
    state: InteractionState,
    motor: Rc<RefCell<Motor>>,
    frames: Option<Subscription>,
    transitions: u64,
    entrances: u64,
    mounted: bool,
}

impl InteractiveElement {
    #[tracing::instrument(skip_all, fields(rules = table.rules.len()))]
    pub fn mount(table: TransitionTable, scheduler: &Rc<dyn Scheduler>) -> PagefxResult<Self> {
        table.validate()?;
        let flags = InteractionFlags::default();
        let state = flags.derive(&table);
        let motor = Motor::at_rest(flags.target_style(&table));
        Ok(Self {
            scheduler: Rc::clone(scheduler),
            table,
            flags,
            state,
            motor: Rc::new(RefCell::new(motor)),
            frames: None,
            transitions: 0,
            entrances: 0,
            mounted: true,
        })
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn flags(&self) -> InteractionFlags {
        self.flags
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Style as of the last rendered frame.
    pub fn style(&self) -> Style {
        self.motor.borrow().style()
    }

    pub fn target_style(&self) -> Style {
        self.flags.target_style(&self.table)
    }

    pub fn is_animating(&self) -> bool {
        self.frames.as_ref().is_some_and(Subscription::is_active)
    }

    /// Transitions started since mount (retargets included).
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Times the entrance transition was started.
    pub fn entrance_count(&self) -> u64 {
        self.entrances
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn pointer_enter(&mut self) -> bool {
        self.update(|f| f.hovered = true)
    }

    /// Leaving also releases a press.
    pub fn pointer_leave(&mut self) -> bool {
        self.update(|f| {
            f.hovered = false;
            f.pressed = false;
        })
    }

    pub fn pointer_down(&mut self) -> bool {
        self.update(|f| f.pressed = true)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.update(|f| f.pressed = false)
    }

    pub fn viewport_enter(&mut self) -> bool {
        self.update(|f| {
            f.in_view = true;
            f.entered = true;
        })
    }

    pub fn viewport_exit(&mut self) -> bool {
        self.update(|f| f.in_view = false)
    }

    /// Apply a flag change; returns whether a transition was started.
    fn update(&mut self, change: impl FnOnce(&mut InteractionFlags)) -> bool {
        if !self.mounted {
            return false;
        }
        let before = self.flags.target_style(&self.table);
        let was_shown = self.flags.entrance_shown(self.table.once_in_view);
        change(&mut self.flags);
        self.state = self.flags.derive(&self.table);

        let target = self.flags.target_style(&self.table);
        if target == before {
            return false;
        }

        let entering = !was_shown && self.flags.entrance_shown(self.table.once_in_view);
        let profile = if entering {
            self.entrances += 1;
            tracing::debug!(entrances = self.entrances, "entrance started");
            self.table.profile_for(InteractionState::InView)
        } else {
            self.table.profile_for(self.state)
        };

        let now = self.scheduler.now();
        self.motor
            .borrow_mut()
            .retarget(target.to_channels(), &profile, now);
        self.transitions += 1;
        tracing::trace!(state = ?self.state, "transition retargeted");
        self.ensure_frames();
        true
    }

    fn ensure_frames(&mut self) {
        if self.is_animating() {
            return;
        }
        let motor = Rc::clone(&self.motor);
        self.frames = Some(Subscription::frames(
            &self.scheduler,
            Box::new(move |now| {
                if motor.borrow_mut().step(now) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }),
        ));
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.frames = None;
        tracing::debug!(transitions = self.transitions, "interactive element unmounted");
    }
}

impl Drop for InteractiveElement {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/interaction.rs"]
mod tests;
