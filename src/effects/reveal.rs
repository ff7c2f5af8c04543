use crate::{
    animation::{
        anim::{Keyframes, LoopMode, Tween},
        ease::Ease,
    },
    foundation::error::{PagefxError, PagefxResult},
    schedule::scheduler::{Scheduler, Subscription},
};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between two revealed glyphs.
    pub interval_ms: u64,
    /// Full period of the cursor blink (opaque to transparent).
    pub cursor_period_ms: u64,
    pub cursor_ease: Ease,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            cursor_period_ms: 800,
            cursor_ease: Ease::CssEaseInOut,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> PagefxResult<()> {
        if self.interval_ms == 0 {
            return Err(PagefxError::validation("reveal.interval_ms must be > 0"));
        }
        if self.cursor_period_ms == 0 {
            return Err(PagefxError::validation(
                "reveal.cursor_period_ms must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RevealPhase {
    Revealing,
    Complete,
}

/// Glyph-by-glyph reveal of one source string.
///
/// Glyphs are Unicode scalar values, so the visible text is always a valid
/// prefix of the source.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RevealState {
    source: String,
    // Byte offset after each glyph.
    #[serde(skip)]
    ends: Vec<usize>,
    revealed: usize,
    ticks: u64,
    cursor_visible: bool,
    cursor_opacity: f64,
}

impl RevealState {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let ends = source.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
        Self {
            source,
            ends,
            revealed: 0,
            ticks: 0,
            cursor_visible: true,
            cursor_opacity: 1.0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the source in glyphs.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Ticks that revealed a glyph.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> RevealPhase {
        if self.revealed >= self.len() {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == RevealPhase::Complete
    }

    pub fn visible_text(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.source[..self.ends[n - 1]],
        }
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn cursor_opacity(&self) -> f64 {
        self.cursor_opacity
    }

    /// Reveal one more glyph. A no-op once complete.
    pub fn tick(&mut self) -> RevealPhase {
        if self.revealed < self.len() {
            self.revealed += 1;
            self.ticks += 1;
        }
        self.phase()
    }

    fn set_cursor_opacity(&mut self, opacity: f64) {
        self.cursor_opacity = opacity;
        self.cursor_visible = opacity >= 0.5;
    }
}

/// A mounted text reveal with its typing interval and cursor blink.
pub struct TextReveal {
    scheduler: Rc<dyn Scheduler>,
    config: RevealConfig,
    state: Rc<RefCell<RevealState>>,
    typing: Option<Subscription>,
    cursor: Option<Subscription>,
}

impl TextReveal {
    #[tracing::instrument(skip_all, fields(len = source.chars().count()))]
    pub fn mount(source: &str, config: &RevealConfig, scheduler: &Rc<dyn Scheduler>) -> Self {
        let mut this = Self {
            scheduler: Rc::clone(scheduler),
            config: config.clone(),
            state: Rc::new(RefCell::new(RevealState::new(source))),
            typing: None,
            cursor: None,
        };
        this.start();
        this
    }

    fn start(&mut self) {
        self.typing = if self.state.borrow().is_complete() {
            None
        } else {
            let state = Rc::clone(&self.state);
            Some(Subscription::interval(
                &self.scheduler,
                self.config.interval_ms,
                Box::new(move |_| match state.borrow_mut().tick() {
                    RevealPhase::Revealing => ControlFlow::Continue(()),
                    RevealPhase::Complete => {
                        tracing::debug!("text reveal complete");
                        ControlFlow::Break(())
                    }
                }),
            ))
        };

        let blink = Tween::forever(
            Keyframes::evenly([1.0, 0.0], self.config.cursor_ease),
            self.config.cursor_period_ms.max(1),
            LoopMode::Repeat,
        );
        let state = Rc::clone(&self.state);
        let start = self.scheduler.now();
        self.cursor = Some(Subscription::frames(
            &self.scheduler,
            Box::new(move |now| {
                let opacity = blink.sample(now.since(start)).unwrap_or(1.0);
                state.borrow_mut().set_cursor_opacity(opacity);
                ControlFlow::Continue(())
            }),
        ));
    }

    /// Replace the source text. A different text is a new instance: timers are
    /// torn down and the reveal restarts from zero. Returns whether it reset.
    pub fn set_text(&mut self, source: &str) -> bool {
        if self.state.borrow().source() == source {
            return false;
        }
        self.unmount();
        *self.state.borrow_mut() = RevealState::new(source);
        self.start();
        tracing::debug!(len = self.state.borrow().len(), "text reveal reset");
        true
    }

    pub fn state(&self) -> RevealState {
        self.state.borrow().clone()
    }

    pub fn visible_text(&self) -> String {
        self.state.borrow().visible_text().to_owned()
    }

    pub fn phase(&self) -> RevealPhase {
        self.state.borrow().phase()
    }

    pub fn is_typing(&self) -> bool {
        self.typing.as_ref().is_some_and(Subscription::is_active)
    }

    pub fn is_mounted(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn unmount(&mut self) {
        let typing = self.typing.take();
        let cursor = self.cursor.take();
        if typing.is_some() || cursor.is_some() {
            tracing::debug!("text reveal unmounted");
        }
    }
}

impl Drop for TextReveal {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reveal.rs"]
mod tests;
