//! Theme preference
//!
//! One stored key, value "light" or "dark". Read once at bootstrap,
//! written on toggle; anything absent or unrecognized falls back to
//! light. The preference is reflected on body so the stylesheet can key
//! off it.

use crate::storage::Storage;
use petit_dom::{NodeId, Page};
use petit_events::{Event, EventBus, EventKind, EventTarget, ListenerId, Scheduler};
use petit_widgets::Widget;
use std::time::Instant;
use tracing::warn;

/// Storage key holding the preference
pub const THEME_KEY: &str = "petits-pas-theme";

/// Class on body while the dark theme is active
pub const DARK_CLASS: &str = "theme-dark";

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn other(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Stored theme preference
#[derive(Debug)]
pub struct ThemePreference {
    storage: Storage,
    current: Theme,
}

impl ThemePreference {
    /// Read the stored value once; absent or corrupt means light
    pub fn load(storage: Storage) -> Self {
        let current = storage
            .get_item(THEME_KEY)
            .and_then(Theme::parse)
            .unwrap_or_default();
        Self { storage, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switch and persist; a write failure keeps the in-memory value
    pub fn set(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(err) = self.storage.set_item(THEME_KEY, theme.as_str()) {
            warn!(%err, "theme preference not saved");
        }
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.current.other();
        self.set(next);
        next
    }

    /// Reflect the preference on body
    pub fn apply(&self, page: &mut Page) {
        let body = page.body();
        page.tree.set_attr(body, "data-theme", self.current.as_str());
        match self.current {
            Theme::Dark => page.tree.add_class(body, DARK_CLASS),
            Theme::Light => page.tree.remove_class(body, DARK_CLASS),
        }
    }
}

/// Button widget flipping the theme on click
pub struct ThemeToggle {
    button: NodeId,
    pref: ThemePreference,
    listeners: Vec<ListenerId>,
}

impl ThemeToggle {
    pub fn new(page: &mut Page, bus: &mut EventBus, button: NodeId, pref: ThemePreference) -> Self {
        page.tree.set_attr(
            button,
            "aria-pressed",
            if pref.current() == Theme::Dark { "true" } else { "false" },
        );
        Self {
            button,
            pref,
            listeners: vec![bus.add(EventTarget::Node(button), EventKind::Click)],
        }
    }

    pub fn theme(&self) -> Theme {
        self.pref.current()
    }
}

impl Widget for ThemeToggle {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, _sched: &mut Scheduler, event: &Event, _now: Instant) {
        if event.kind != EventKind::Click {
            return;
        }
        let next = self.pref.toggle();
        self.pref.apply(page);
        page.tree.set_attr(
            self.button,
            "aria-pressed",
            if next == Theme::Dark { "true" } else { "false" },
        );
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        for id in self.listeners.drain(..) {
            bus.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_corrupt_default_to_light() {
        let pref = ThemePreference::load(Storage::session());
        assert_eq!(pref.current(), Theme::Light);

        let mut storage = Storage::session();
        storage.set_item(THEME_KEY, "sepia").unwrap();
        let pref = ThemePreference::load(storage);
        assert_eq!(pref.current(), Theme::Light);
    }

    #[test]
    fn test_stored_dark_is_read_once_at_load() {
        let mut storage = Storage::session();
        storage.set_item(THEME_KEY, "dark").unwrap();

        let pref = ThemePreference::load(storage);
        assert_eq!(pref.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists_and_applies() {
        let mut page = Page::new();
        let mut bus = EventBus::new();
        let mut sched = Scheduler::new();
        let body = page.body();
        let button = page.tree.create_element("button");
        page.tree.append_child(body, button);

        let pref = ThemePreference::load(Storage::session());
        pref.apply(&mut page);
        let mut toggle = ThemeToggle::new(&mut page, &mut bus, button, pref);
        assert_eq!(page.tree.attr(button, "aria-pressed"), Some("false"));

        toggle.handle(&mut page, &mut sched, &Event::click(button), Instant::now());
        assert_eq!(toggle.theme(), Theme::Dark);
        assert!(page.tree.has_class(body, DARK_CLASS));
        assert_eq!(page.tree.attr(body, "data-theme"), Some("dark"));
        assert_eq!(page.tree.attr(button, "aria-pressed"), Some("true"));
        assert_eq!(toggle.pref.storage.get_item(THEME_KEY), Some("dark"));

        toggle.handle(&mut page, &mut sched, &Event::click(button), Instant::now());
        assert_eq!(toggle.theme(), Theme::Light);
        assert!(!page.tree.has_class(body, DARK_CLASS));
    }
}
