use std::cell::RefCell;

/// Host-side navigation surface.
///
/// Calls are fire-and-forget: the page neither waits for nor retries them.
pub trait Navigator {
    /// Smooth-scroll the page to the section with the given anchor id.
    fn scroll_to_anchor(&self, id: &str);
    /// Open `url` outside the page (new tab or external browser).
    fn open_external(&self, url: &str);
}

/// A navigation request as seen by a [`RecordingNavigator`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum NavEvent {
    Anchor(String),
    External(String),
}

/// Navigator that only records requests, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: RefCell<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Navigator for RecordingNavigator {
    fn scroll_to_anchor(&self, id: &str) {
        self.events.borrow_mut().push(NavEvent::Anchor(id.to_owned()));
    }

    fn open_external(&self, url: &str) {
        self.events
            .borrow_mut()
            .push(NavEvent::External(url.to_owned()));
    }
}

/// Which call-to-action button was clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaSlot {
    Primary,
    Secondary,
}
