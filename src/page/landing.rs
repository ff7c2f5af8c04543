//! The landing page: every motion mechanism mounted with the page's timings.

use crate::{
    animation::{ease::Ease, ops::stagger_delay},
    effects::{
        ambient::{AmbientLoop, AmbientLoops},
        drift::{LoopAnimator, ParticlePose},
        field::ParticleField,
        interaction::{
            InteractionState, InteractiveElement, TransitionProfile, TransitionTable,
        },
        reveal::{RevealPhase, TextReveal},
        scroll::{Parallax, ScrollMapper, ScrollMetrics},
        style::{Style, StyleDelta},
    },
    foundation::{
        core::TimeMs,
        error::{PagefxError, PagefxResult},
    },
    page::{
        catalog::Catalog,
        config::{MotionConfig, PageTiming},
        nav::{CtaSlot, Navigator},
    },
    schedule::scheduler::Scheduler,
};
use rand::Rng;
use std::rc::Rc;

/// Addressable interactive element of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKey {
    Header,
    Logo,
    Nav(usize),
    Badge,
    Title,
    Tagline,
    Lede,
    Actions,
    Cta(CtaSlot),
    Feature(usize),
    Solution(usize),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementFrame {
    pub key: ElementKey,
    pub state: InteractionState,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AmbientFrame {
    pub name: String,
    pub style: Style,
}

/// Everything a host needs to draw one frame of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageFrame {
    pub time: TimeMs,
    pub particles: Vec<ParticlePose>,
    pub typed_text: String,
    pub typing_phase: RevealPhase,
    pub cursor_visible: bool,
    pub scroll_progress: f64,
    pub parallax_offset: f64,
    pub ambient: Vec<AmbientFrame>,
    pub elements: Vec<ElementFrame>,
}

impl PageFrame {
    pub fn to_json(&self) -> PagefxResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn entrance_tween(hidden: StyleDelta, duration_ms: u64, delay_ms: u64) -> TransitionTable {
    TransitionTable::default().entrance(
        hidden,
        TransitionProfile::tween(duration_ms, Ease::CssEaseOut).with_delay(delay_ms),
    )
}

fn hover_table(t: &PageTiming, hover: StyleDelta) -> TransitionTable {
    TransitionTable::default()
        .with_transition(TransitionProfile::tween(t.hover_ms, Ease::CssEaseOut))
        .on(InteractionState::Hovered, hover)
}

/// Interaction tables in page order. Elements with `true` play their
/// entrance as soon as the page mounts.
fn page_tables(t: &PageTiming, catalog: &Catalog) -> Vec<(ElementKey, TransitionTable, bool)> {
    let mut out = Vec::new();

    out.push((
        ElementKey::Header,
        TransitionTable::default().entrance(
            StyleDelta::new().translate(0.0, -t.header_drop_px),
            TransitionProfile::tween(t.header_ms, Ease::CssEaseOut),
        ),
        true,
    ));
    out.push((
        ElementKey::Logo,
        TransitionTable::default()
            .with_transition(TransitionProfile::spring(t.logo_stiffness))
            .on(InteractionState::Hovered, StyleDelta::new().scale(1.05)),
        false,
    ));
    for i in 0..catalog.anchors.len() {
        let delay = stagger_delay(i, t.nav_base_ms, t.nav_step_ms);
        let table = hover_table(t, StyleDelta::new().scale(t.nav_hover_scale)).entrance(
            StyleDelta::new().opacity(0.0).translate(0.0, -20.0),
            TransitionProfile::default().with_delay(delay),
        );
        out.push((ElementKey::Nav(i), table, true));
    }

    let [badge, title, tagline, lede, actions] = t.hero_delays_ms;
    let rise = |dy: f64| StyleDelta::new().opacity(0.0).translate(0.0, dy);
    let hero = [
        (ElementKey::Badge, rise(30.0), t.hero_ms, badge),
        (ElementKey::Title, StyleDelta::new().opacity(0.0).scale(0.8), t.title_ms, title),
        (
            ElementKey::Tagline,
            StyleDelta::new().opacity(0.0).translate(-50.0, 0.0),
            t.hero_ms,
            tagline,
        ),
        (ElementKey::Lede, rise(20.0), t.hero_ms, lede),
        (ElementKey::Actions, rise(30.0), t.hero_ms, actions),
    ];
    for (key, hidden, duration, delay) in hero {
        out.push((key, entrance_tween(hidden, duration, delay), true));
    }

    for slot in [CtaSlot::Primary, CtaSlot::Secondary] {
        let table = hover_table(t, StyleDelta::new().scale(t.cta_hover_scale))
            .on(InteractionState::Pressed, StyleDelta::new().scale(t.cta_press_scale));
        out.push((ElementKey::Cta(slot), table, false));
    }

    for i in 0..catalog.features.len() {
        let delay = stagger_delay(i, 0, t.feature_step_ms);
        let table = hover_table(
            t,
            StyleDelta::new()
                .translate(0.0, -t.feature_hover_lift_px)
                .scale(t.feature_hover_scale),
        )
        .entrance(
            StyleDelta::new().opacity(0.0).translate(0.0, t.feature_rise_px),
            TransitionProfile::spring(t.feature_stiffness).with_delay(delay),
        );
        out.push((ElementKey::Feature(i), table, false));
    }

    for i in 0..catalog.solutions.len() {
        let delay = stagger_delay(i, 0, t.solution_step_ms);
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        let table = hover_table(t, StyleDelta::new().scale(t.solution_hover_scale)).entrance(
            StyleDelta::new()
                .opacity(0.0)
                .translate(side * t.solution_offset_px, 0.0),
            TransitionProfile::spring(t.solution_stiffness).with_delay(delay),
        );
        out.push((ElementKey::Solution(i), table, false));
    }

    out
}

/// A mounted landing page session.
///
/// Owns every subscription it creates; [`LandingPage::unmount`] (or drop)
/// leaves nothing scheduled.
pub struct LandingPage {
    scheduler: Rc<dyn Scheduler>,
    navigator: Rc<dyn Navigator>,
    catalog: Catalog,
    config: MotionConfig,
    field: ParticleField,
    particles: LoopAnimator,
    ambient: AmbientLoops,
    tagline: TextReveal,
    scroll: ScrollMapper,
    parallax: Parallax,
    elements: Vec<(ElementKey, InteractiveElement)>,
    mounted: bool,
}

impl LandingPage {
    #[tracing::instrument(skip_all, fields(particles = config.field.count))]
    pub fn mount<R: Rng>(
        config: MotionConfig,
        catalog: Catalog,
        scheduler: &Rc<dyn Scheduler>,
        navigator: Rc<dyn Navigator>,
        rng: &mut R,
    ) -> PagefxResult<Self> {
        config.validate()?;
        catalog.validate()?;
        let cadence = scheduler.fps();
        if !config.fps.same_rate(cadence) {
            return Err(PagefxError::validation(format!(
                "config fps {}/{} does not match scheduler fps {}/{}",
                config.fps.num, config.fps.den, cadence.num, cadence.den
            )));
        }

        let ambient = AmbientLoops::mount(&AmbientLoop::page_defaults(), scheduler)?;
        let mut elements = Vec::new();
        for (key, table, on_mount) in page_tables(&config.page, &catalog) {
            let mut el = InteractiveElement::mount(table, scheduler)?;
            if on_mount {
                el.viewport_enter();
            }
            elements.push((key, el));
        }

        let field = ParticleField::generate(&config.field, rng);
        let particles = LoopAnimator::mount(&field, &config.drift, scheduler, rng);
        let tagline = TextReveal::mount(&catalog.tagline, &config.reveal, scheduler);
        let scroll = ScrollMapper::new();
        let parallax = Parallax::backdrop(scroll.reader());

        tracing::debug!(elements = elements.len(), "landing page mounted");
        Ok(Self {
            scheduler: Rc::clone(scheduler),
            navigator,
            catalog,
            config,
            field,
            particles,
            ambient,
            tagline,
            scroll,
            parallax,
            elements,
            mounted: true,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn element(&self, key: ElementKey) -> Option<&InteractiveElement> {
        self.elements.iter().find(|(k, _)| *k == key).map(|(_, e)| e)
    }

    pub fn element_keys(&self) -> impl Iterator<Item = ElementKey> + '_ {
        self.elements.iter().map(|(k, _)| *k)
    }

    fn interact(
        &mut self,
        key: ElementKey,
        f: impl FnOnce(&mut InteractiveElement) -> bool,
    ) -> PagefxResult<bool> {
        match self.elements.iter_mut().find(|(k, _)| *k == key) {
            Some((_, el)) => Ok(f(el)),
            None => Err(PagefxError::validation(format!("unknown element {key:?}"))),
        }
    }

    pub fn pointer_enter(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::pointer_enter)
    }

    pub fn pointer_leave(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::pointer_leave)
    }

    pub fn pointer_down(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::pointer_down)
    }

    pub fn pointer_up(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::pointer_up)
    }

    pub fn viewport_enter(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::viewport_enter)
    }

    pub fn viewport_exit(&mut self, key: ElementKey) -> PagefxResult<bool> {
        self.interact(key, InteractiveElement::viewport_exit)
    }

    /// Ask the host to scroll to the section behind a nav anchor.
    pub fn click_nav(&self, anchor_id: &str) -> PagefxResult<()> {
        if self.catalog.anchor(anchor_id).is_none() {
            return Err(PagefxError::validation(format!(
                "unknown nav anchor '{anchor_id}'"
            )));
        }
        self.navigator.scroll_to_anchor(anchor_id);
        Ok(())
    }

    /// Open the contact form. Both CTAs lead to the same URL.
    pub fn click_cta(&self, slot: CtaSlot) {
        tracing::debug!(?slot, "cta clicked");
        self.navigator.open_external(&self.catalog.cta_url);
    }

    /// Feed a scroll sample of the page container.
    pub fn scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.scroll.sample(metrics)
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll.progress()
    }

    pub fn snapshot(&self) -> PageFrame {
        let tagline = self.tagline.state();
        PageFrame {
            time: self.scheduler.now(),
            particles: self.particles.poses(),
            typed_text: tagline.visible_text().to_owned(),
            typing_phase: tagline.phase(),
            cursor_visible: tagline.cursor_visible(),
            scroll_progress: self.scroll.progress(),
            parallax_offset: self.parallax.offset(),
            ambient: self
                .ambient
                .styles()
                .into_iter()
                .map(|(name, style)| AmbientFrame { name, style })
                .collect(),
            elements: self
                .elements
                .iter()
                .map(|(key, el)| ElementFrame {
                    key: *key,
                    state: el.state(),
                    style: el.style(),
                })
                .collect(),
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.particles.unmount();
        self.ambient.unmount();
        self.tagline.unmount();
        for (_, el) in &mut self.elements {
            el.unmount();
        }
        tracing::debug!("landing page unmounted");
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/landing.rs"]
mod tests;
