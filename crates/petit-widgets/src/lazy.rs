//! Lazy image loading
//!
//! Each observed image goes pending -> loaded exactly once, on its first
//! nonzero intersection with the viewport. Without intersection support
//! everything loads eagerly at construction.

use crate::widget::{dispose_all, Widget};
use petit_dom::{NodeId, Page};
use petit_events::{
    Event, EventBus, EventKind, EventTarget, IntersectionObserver, ListenerId, Scheduler,
};
use std::time::Instant;
use tracing::debug;

/// Deferred source attribute
pub const DATA_SRC_ATTR: &str = "data-src";

/// Class marking a promoted image
pub const LOADED_CLASS: &str = "is-loaded";

/// Promotes data-src images when they enter the viewport
#[derive(Debug)]
pub struct LazyImages {
    /// None when intersection observation is unsupported (eager mode)
    observer: Option<IntersectionObserver>,
    loaded: usize,
    listeners: Vec<ListenerId>,
}

impl LazyImages {
    /// Observe the given images; with `supported == false` they all load
    /// immediately instead (degrade to eager, never fail).
    pub fn new(
        page: &mut Page,
        bus: &mut EventBus,
        images: Vec<NodeId>,
        supported: bool,
    ) -> Self {
        if !supported {
            debug!(count = images.len(), "intersection unsupported, eager loading");
            let mut loaded = 0;
            for img in images {
                if Self::load(page, img) {
                    loaded += 1;
                }
            }
            return Self {
                observer: None,
                loaded,
                listeners: Vec::new(),
            };
        }

        let mut observer = IntersectionObserver::new();
        for img in images {
            observer.observe(img);
        }
        Self {
            observer: Some(observer),
            loaded: 0,
            listeners: vec![bus.add(EventTarget::Window, EventKind::Scroll)],
        }
    }

    /// Images promoted so far
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    /// Check every observed image against the viewport; called once at
    /// mount and after each scroll.
    pub fn sweep(&mut self, page: &mut Page) {
        let Some(observer) = &mut self.observer else {
            return;
        };
        for entry in observer.check(page) {
            if entry.is_intersecting {
                observer.unobserve(entry.target);
                if Self::load(page, entry.target) {
                    self.loaded += 1;
                }
            }
        }
    }

    /// Copy data-src into src; returns false when already promoted
    fn load(page: &mut Page, img: NodeId) -> bool {
        let Some(src) = page.tree.remove_attr(img, DATA_SRC_ATTR) else {
            return false;
        };
        page.tree.set_attr(img, "src", &src);
        page.tree.add_class(img, LOADED_CLASS);
        true
    }
}

impl Widget for LazyImages {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, _sched: &mut Scheduler, event: &Event, _now: Instant) {
        if event.kind == EventKind::Scroll {
            self.sweep(page);
        }
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        dispose_all(bus, &mut self.listeners);
        if let Some(observer) = &mut self.observer {
            observer.disconnect();
        }
    }
}
