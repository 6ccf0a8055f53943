//! Composition root
//!
//! Mounts every widget against its DOM anchors; a missing anchor disables
//! that widget and nothing else. Afterwards the app only routes: events
//! through the listener registry, time through the scheduler, visibility
//! through the observers. Widgets never talk to each other except through
//! the document.

use crate::diagnostics::{CrashLog, ErrorReport};
use crate::storage::Storage;
use crate::theme::{ThemePreference, ThemeToggle};
use petit_a11y::prefers_reduced_motion;
use petit_dom::{query, query_all, Page};
use petit_events::{
    Event, EventBus, EventKind, EventTarget, Key, ListenerId, MediaQuery, MediaWatcher, QueryId,
    Scheduler,
};
use petit_forms::{ContactForm, Field, Rule, SubmitAction};
use petit_widgets::{Disclosure, DisclosureOptions, HeaderShrink, LazyImages, ScrollSpy, Widget};
use std::time::Instant;
use tracing::debug;

/// Class on body while the user navigates with the keyboard
pub const KEYBOARD_CLASS: &str = "using-keyboard";

/// Class on body while reduced motion is preferred
pub const REDUCED_MOTION_CLASS: &str = "reduced-motion";

/// Scroll-spy reading offset, roughly the fixed header height
const SPY_OFFSET: f64 = 80.0;

/// The mounted site behavior
pub struct App {
    bus: EventBus,
    sched: Scheduler,
    widgets: Vec<Box<dyn Widget>>,
    lazy: Option<LazyImages>,
    watcher: MediaWatcher,
    motion_query: QueryId,
    crash_log: CrashLog,
}

impl App {
    /// Wire every widget whose anchors exist in the page
    pub fn mount(page: &mut Page, storage: Storage, submit_action: Box<dyn SubmitAction>) -> Self {
        let mut bus = EventBus::new();
        let mut widgets: Vec<Box<dyn Widget>> = Vec::new();
        let body = page.body();

        // Mobile navigation
        let toggle = query(&page.tree, body, "#nav-toggle");
        let menu = query(&page.tree, body, "#nav-menu");
        match (toggle, menu) {
            (Some(trigger), Some(panel)) => {
                let root = query(&page.tree, body, "nav").unwrap_or(body);
                widgets.push(Box::new(Disclosure::new(
                    page,
                    &mut bus,
                    root,
                    trigger,
                    panel,
                    DisclosureOptions::mobile_nav(),
                )));
            }
            _ => debug!("nav anchors missing, navigation disabled"),
        }

        // Header shrink
        match query(&page.tree, body, "header") {
            Some(header) => widgets.push(Box::new(HeaderShrink::new(&mut bus, header))),
            None => debug!("header missing, shrink disabled"),
        }

        // Scroll spy: nav links paired with the sections their hrefs name
        let mut entries = Vec::new();
        for link in query_all(&page.tree, body, ".nav-link") {
            let section = page
                .tree
                .attr(link, "href")
                .and_then(|href| href.strip_prefix('#'))
                .and_then(|id| page.tree.element_by_id(id));
            if let Some(section) = section {
                entries.push((section, link));
            }
        }
        if entries.is_empty() {
            debug!("no nav links name a section, scroll spy disabled");
        } else {
            widgets.push(Box::new(ScrollSpy::new(&mut bus, entries, SPY_OFFSET)));
        }

        // FAQ accordions
        for item in query_all(&page.tree, body, ".faq-item") {
            let trigger = query(&page.tree, item, ".faq-question");
            let panel = query(&page.tree, item, ".faq-answer");
            let (Some(trigger), Some(panel)) = (trigger, panel) else {
                debug!(item = item.index(), "faq item missing trigger or panel, skipped");
                continue;
            };
            widgets.push(Box::new(Disclosure::new(
                page,
                &mut bus,
                item,
                trigger,
                panel,
                DisclosureOptions::faq_item(),
            )));
        }

        // Lazy images; an initial sweep loads above-the-fold content
        let images = query_all(&page.tree, body, "[data-src]");
        let lazy = if images.is_empty() {
            debug!("no deferred images");
            None
        } else {
            let mut lazy = LazyImages::new(page, &mut bus, images, true);
            lazy.sweep(page);
            Some(lazy)
        };

        // Contact form
        match query(&page.tree, body, "#contact-form") {
            Some(form) => match query(&page.tree, form, "button") {
                Some(button) => {
                    let mut fields = Vec::new();
                    for (id, rules) in [
                        ("nom", vec![Rule::Required]),
                        ("email", vec![Rule::Required, Rule::Email]),
                        ("telephone", vec![Rule::Phone]),
                        ("age", vec![Rule::IntRange { min: 0, max: 10 }]),
                        ("message", vec![Rule::Required]),
                    ] {
                        match page.tree.element_by_id(id) {
                            Some(input) => fields.push(Field::new(input, rules)),
                            None => debug!(id, "form field missing, skipped"),
                        }
                    }
                    widgets.push(Box::new(ContactForm::new(
                        &mut bus,
                        form,
                        fields,
                        button,
                        submit_action,
                    )));
                }
                None => debug!("submit control missing, contact form disabled"),
            },
            None => debug!("contact form missing, disabled"),
        }

        // Theme preference, applied once even without a toggle control
        let pref = ThemePreference::load(storage);
        pref.apply(page);
        match query(&page.tree, body, "#theme-toggle") {
            Some(button) => widgets.push(Box::new(ThemeToggle::new(page, &mut bus, button, pref))),
            None => debug!("theme toggle missing, preference applied once"),
        }

        // Keyboard-vs-pointer marker for focus styling
        widgets.push(Box::new(InputModality::new(&mut bus)));

        if prefers_reduced_motion(&page.viewport) {
            page.tree.add_class(body, REDUCED_MOTION_CLASS);
        }
        let mut watcher = MediaWatcher::new();
        let motion_query = watcher.watch(MediaQuery::prefers_reduced_motion());
        watcher.poll(&page.viewport);

        Self {
            bus,
            sched: Scheduler::new(),
            widgets,
            lazy,
            watcher,
            motion_query,
            crash_log: CrashLog::new(),
        }
    }

    /// Route an event to every widget holding a matching listener
    pub fn dispatch(&mut self, page: &mut Page, event: &Event, now: Instant) {
        let hits = self.bus.hits(event, page);
        if hits.is_empty() {
            return;
        }
        for widget in &mut self.widgets {
            if widget.listeners().iter().any(|id| hits.contains(id)) {
                widget.handle(page, &mut self.sched, event, now);
            }
        }
        if let Some(lazy) = &mut self.lazy {
            if lazy.listeners().iter().any(|id| hits.contains(id)) {
                lazy.handle(page, &mut self.sched, event, now);
            }
        }
    }

    /// Advance time: run due tasks, re-check visibility, poll media state
    pub fn tick(&mut self, page: &mut Page, now: Instant) {
        self.sched.run_due(now, page);
        if let Some(lazy) = &mut self.lazy {
            lazy.sweep(page);
        }
        for (id, matches) in self.watcher.poll(&page.viewport) {
            if id == self.motion_query {
                let body = page.body();
                if matches {
                    page.tree.add_class(body, REDUCED_MOTION_CLASS);
                } else {
                    page.tree.remove_class(body, REDUCED_MOTION_CLASS);
                }
            }
        }
    }

    /// Record an uncaught error
    pub fn report_error(&mut self, report: ErrorReport) {
        self.crash_log.capture(report);
    }

    pub fn crash_log(&self) -> &CrashLog {
        &self.crash_log
    }

    /// Live listener registrations
    pub fn listener_count(&self) -> usize {
        self.bus.len()
    }

    /// Tasks waiting on the scheduler
    pub fn pending_tasks(&self) -> usize {
        self.sched.pending()
    }

    /// Tear every widget down; the registry ends empty
    pub fn destroy(&mut self) {
        for widget in &mut self.widgets {
            widget.destroy(&mut self.bus);
        }
        self.widgets.clear();
        if let Some(mut lazy) = self.lazy.take() {
            lazy.destroy(&mut self.bus);
        }
        self.watcher.unwatch(self.motion_query);
    }
}

/// Marks body while the keyboard is driving, so focus outlines can be
/// shown only when useful
struct InputModality {
    listeners: Vec<ListenerId>,
}

impl InputModality {
    fn new(bus: &mut EventBus) -> Self {
        Self {
            listeners: vec![
                bus.add(EventTarget::Document, EventKind::Keydown),
                bus.add(EventTarget::Document, EventKind::Click),
            ],
        }
    }
}

impl Widget for InputModality {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, _sched: &mut Scheduler, event: &Event, _now: Instant) {
        let body = page.body();
        match event.kind {
            EventKind::Keydown if event.key == Some(Key::Tab) => {
                page.tree.add_class(body, KEYBOARD_CLASS);
            }
            EventKind::Click => {
                page.tree.remove_class(body, KEYBOARD_CLASS);
            }
            _ => {}
        }
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
    use petit_forms::{FormData, SubmitError};

    struct NullAction;

    impl SubmitAction for NullAction {
        fn submit(&mut self, _data: &FormData) -> Result<(), SubmitError> {
            Ok(())
        }
    }

    #[test]
    fn test_mount_on_bare_page_only_wires_modality() {
        let mut page = Page::new();
        let app = App::mount(&mut page, Storage::session(), Box::new(NullAction));

        // Keydown + click markers, nothing else found an anchor
        assert_eq!(app.listener_count(), 2);
        assert!(app.lazy.is_none());
    }

    #[test]
    fn test_keyboard_modality_class() {
        let mut page = Page::new();
        let mut app = App::mount(&mut page, Storage::session(), Box::new(NullAction));
        let body = page.body();
        let now = Instant::now();

        app.dispatch(&mut page, &Event::keydown(Key::Tab), now);
        assert!(page.tree.has_class(body, KEYBOARD_CLASS));

        app.dispatch(&mut page, &Event::click(body), now);
        assert!(!page.tree.has_class(body, KEYBOARD_CLASS));
    }

    #[test]
    fn test_destroy_empties_registry() {
        let mut page = Page::new();
        let mut app = App::mount(&mut page, Storage::session(), Box::new(NullAction));

        app.destroy();
        assert_eq!(app.listener_count(), 0);
    }

    #[test]
    fn test_reduced_motion_class_follows_preference() {
        let mut page = Page::new();
        let mut app = App::mount(&mut page, Storage::session(), Box::new(NullAction));
        let body = page.body();

        assert!(!page.tree.has_class(body, REDUCED_MOTION_CLASS));

        page.viewport.reduced_motion = true;
        app.tick(&mut page, Instant::now());
        assert!(page.tree.has_class(body, REDUCED_MOTION_CLASS));

        page.viewport.reduced_motion = false;
        app.tick(&mut page, Instant::now());
        assert!(!page.tree.has_class(body, REDUCED_MOTION_CLASS));
    }

    #[test]
    fn test_crash_log_capture() {
        let mut page = Page::new();
        let mut app = App::mount(&mut page, Storage::session(), Box::new(NullAction));

        app.report_error(ErrorReport::new("boom", "test-agent").with_source("app.js:1"));
        assert_eq!(app.crash_log().len(), 1);
        assert_eq!(app.crash_log().last().unwrap().message, "boom");
    }
}
