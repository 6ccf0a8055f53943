//! Disclosure widget
//!
//! One binary open/closed state machine behind both the mobile navigation
//! and the FAQ items. Open and close are idempotent; every transition keeps
//! aria-expanded in sync and is announced to assistive tech.

use crate::widget::{dispose_all, Widget};
use petit_a11y::{announce, FocusTrap, Politeness};
use petit_dom::{NodeId, Page};
use petit_events::{Event, EventBus, EventKind, EventTarget, Key, ListenerId, Scheduler};
use std::time::Instant;
use tracing::debug;

/// Responsive breakpoint above which the mobile nav cannot stay open
pub const NAV_BREAKPOINT: f64 = 768.0;

/// Open/closed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    #[default]
    Closed,
    Open,
}

/// Per-instance behavior knobs
#[derive(Debug, Clone)]
pub struct DisclosureOptions {
    /// Class set on the root while open
    pub open_class: String,
    /// Close when a click lands outside the root
    pub close_on_outside: bool,
    /// Close when the viewport reaches this width (mobile nav)
    pub close_min_width: Option<f64>,
    /// Trap Tab cycling inside the panel while open
    pub trap_focus: bool,
    pub open_message: String,
    pub close_message: String,
}

impl Default for DisclosureOptions {
    fn default() -> Self {
        Self {
            open_class: "is-open".to_string(),
            close_on_outside: false,
            close_min_width: None,
            trap_focus: false,
            open_message: "Panneau ouvert".to_string(),
            close_message: "Panneau fermé".to_string(),
        }
    }
}

impl DisclosureOptions {
    /// Mobile navigation: outside click, Escape, breakpoint, focus trap
    pub fn mobile_nav() -> Self {
        Self {
            close_on_outside: true,
            close_min_width: Some(NAV_BREAKPOINT),
            trap_focus: true,
            open_message: "Menu ouvert".to_string(),
            close_message: "Menu fermé".to_string(),
            ..Self::default()
        }
    }

    /// FAQ item: plain toggle with Escape
    pub fn faq_item() -> Self {
        Self {
            open_message: "Réponse affichée".to_string(),
            close_message: "Réponse masquée".to_string(),
            ..Self::default()
        }
    }
}

/// Toggleable widget bound to a root, a trigger control, and a panel
#[derive(Debug)]
pub struct Disclosure {
    root: NodeId,
    trigger: NodeId,
    panel: NodeId,
    state: ToggleState,
    options: DisclosureOptions,
    trap: FocusTrap,
    listeners: Vec<ListenerId>,
}

impl Disclosure {
    pub fn new(
        page: &mut Page,
        bus: &mut EventBus,
        root: NodeId,
        trigger: NodeId,
        panel: NodeId,
        options: DisclosureOptions,
    ) -> Self {
        page.tree.set_attr(trigger, "aria-expanded", "false");
        if let Some(panel_id) = page.tree.attr(panel, "id").map(String::from) {
            page.tree.set_attr(trigger, "aria-controls", &panel_id);
        }

        let mut listeners = vec![
            bus.add(EventTarget::Node(trigger), EventKind::Click),
            bus.add(EventTarget::Document, EventKind::Keydown),
        ];
        if options.close_on_outside {
            listeners.push(bus.add(EventTarget::Document, EventKind::Click));
        }
        if options.close_min_width.is_some() {
            listeners.push(bus.add(EventTarget::Window, EventKind::Resize));
        }

        Self {
            root,
            trigger,
            panel,
            state: ToggleState::Closed,
            options,
            trap: FocusTrap::new(),
            listeners,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ToggleState::Open
    }

    /// Flip between open and closed
    pub fn toggle(&mut self, page: &mut Page, sched: &mut Scheduler, now: Instant) {
        match self.state {
            ToggleState::Closed => self.open(page, sched, now),
            ToggleState::Open => self.close(page, sched, now),
        }
    }

    /// Enter Open; no-op when already open
    pub fn open(&mut self, page: &mut Page, sched: &mut Scheduler, now: Instant) {
        if self.state == ToggleState::Open {
            return;
        }
        self.state = ToggleState::Open;
        debug!(trigger = ?self.trigger, "disclosure open");

        page.tree.set_attr(self.trigger, "aria-expanded", "true");
        page.tree.add_class(self.root, &self.options.open_class);

        if self.options.trap_focus {
            self.trap.activate(page, self.panel);
        }
        // Focus moves on the next tick so layout settles first
        let panel = self.panel;
        sched.schedule(
            now,
            Box::new(move |page, _| {
                if let Some(&first) = page.focusables(panel).first() {
                    page.focus(first);
                }
            }),
        );

        announce(page, sched, now, &self.options.open_message, Politeness::Polite);
    }

    /// Enter Closed; no-op when already closed
    pub fn close(&mut self, page: &mut Page, sched: &mut Scheduler, now: Instant) {
        if self.state == ToggleState::Closed {
            return;
        }
        self.state = ToggleState::Closed;
        debug!(trigger = ?self.trigger, "disclosure close");

        page.tree.set_attr(self.trigger, "aria-expanded", "false");
        page.tree.remove_class(self.root, &self.options.open_class);
        self.trap.deactivate();

        announce(page, sched, now, &self.options.close_message, Politeness::Polite);
    }
}

impl Widget for Disclosure {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, sched: &mut Scheduler, event: &Event, now: Instant) {
        match event.kind {
            EventKind::Click => {
                let Some(target) = event.target else { return };
                if page.tree.contains(self.trigger, target) {
                    self.toggle(page, sched, now);
                } else if self.options.close_on_outside
                    && self.is_open()
                    && !page.tree.contains(self.root, target)
                {
                    self.close(page, sched, now);
                }
            }
            EventKind::Keydown => match event.key {
                Some(Key::Escape) if self.is_open() => self.close(page, sched, now),
                Some(Key::Tab) => {
                    self.trap.handle_key(page, Key::Tab, event.shift_key);
                }
                _ => {}
            },
            EventKind::Resize => {
                if let Some(breakpoint) = self.options.close_min_width {
                    let width = event.width.unwrap_or(page.viewport.width);
                    if self.is_open() && width >= breakpoint {
                        self.close(page, sched, now);
                    }
                }
            }
            _ => {}
        }
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        dispose_all(bus, &mut self.listeners);
        self.trap.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_fixture() -> (Page, EventBus, Scheduler, Disclosure) {
        let mut page = Page::new();
        let mut bus = EventBus::new();
        let body = page.body();

        let root = page.tree.create_element("nav");
        let trigger = page.tree.create_element("button");
        let panel = page.tree.create_element("ul");
        let link = page.tree.create_element("a");
        page.tree.set_attr(link, "href", "#accueil");
        page.tree.set_attr(panel, "id", "nav-menu");
        page.tree.append_child(body, root);
        page.tree.append_child(root, trigger);
        page.tree.append_child(root, panel);
        page.tree.append_child(panel, link);

        let disclosure = Disclosure::new(
            &mut page,
            &mut bus,
            root,
            trigger,
            panel,
            DisclosureOptions::mobile_nav(),
        );
        (page, bus, Scheduler::new(), disclosure)
    }

    #[test]
    fn test_wires_aria_at_construction() {
        let (page, bus, _, nav) = nav_fixture();
        let trigger = nav.trigger;

        assert_eq!(page.tree.attr(trigger, "aria-expanded"), Some("false"));
        assert_eq!(page.tree.attr(trigger, "aria-controls"), Some("nav-menu"));
        assert_eq!(bus.len(), nav.listeners().len());
    }

    #[test]
    fn test_toggle_round_trip() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();
        let trigger = nav.trigger;

        nav.toggle(&mut page, &mut sched, now);
        assert!(nav.is_open());
        assert_eq!(page.tree.attr(trigger, "aria-expanded"), Some("true"));
        assert!(page.tree.has_class(nav.root, "is-open"));

        nav.toggle(&mut page, &mut sched, now);
        assert!(!nav.is_open());
        assert_eq!(page.tree.attr(trigger, "aria-expanded"), Some("false"));
        assert!(!page.tree.has_class(nav.root, "is-open"));
    }

    #[test]
    fn test_open_is_idempotent() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();

        nav.open(&mut page, &mut sched, now);
        let pending_after_first = sched.pending();
        nav.open(&mut page, &mut sched, now);

        assert!(nav.is_open());
        // Second open scheduled nothing new
        assert_eq!(sched.pending(), pending_after_first);
    }

    #[test]
    fn test_deferred_focus_lands_on_first_link() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();
        let link = *page.focusables(nav.panel).first().unwrap();

        nav.open(&mut page, &mut sched, now);
        // Not focused until the next tick
        assert_ne!(page.focused(), Some(link));

        sched.run_due(now, &mut page);
        assert_eq!(page.focused(), Some(link));
    }

    #[test]
    fn test_escape_closes() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();

        nav.open(&mut page, &mut sched, now);
        nav.handle(&mut page, &mut sched, &Event::keydown(Key::Escape), now);
        assert!(!nav.is_open());

        // Escape while closed stays closed
        nav.handle(&mut page, &mut sched, &Event::keydown(Key::Escape), now);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_outside_click_closes() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();
        let outside = page.tree.create_element("footer");
        let body = page.body();
        page.tree.append_child(body, outside);

        nav.open(&mut page, &mut sched, now);
        // Click inside the panel does nothing
        let inside = page.tree.children(nav.panel)[0];
        nav.handle(&mut page, &mut sched, &Event::click(inside), now);
        assert!(nav.is_open());

        nav.handle(&mut page, &mut sched, &Event::click(outside), now);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_breakpoint_resize_closes() {
        let (mut page, _bus, mut sched, mut nav) = nav_fixture();
        let now = Instant::now();

        nav.open(&mut page, &mut sched, now);
        nav.handle(&mut page, &mut sched, &Event::resize(500.0), now);
        assert!(nav.is_open());

        nav.handle(&mut page, &mut sched, &Event::resize(NAV_BREAKPOINT), now);
        assert!(!nav.is_open());
        assert_eq!(page.tree.attr(nav.trigger, "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_destroy_clears_listeners() {
        let (_page, mut bus, _sched, mut nav) = nav_fixture();

        nav.destroy(&mut bus);
        assert!(nav.listeners().is_empty());
        assert!(bus.is_empty());
    }
}
