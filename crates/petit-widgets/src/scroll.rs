//! Scroll tracking
//!
//! Header shrink and scroll spy both derive a discrete state from the
//! continuous scroll offset, behind a throttle so fast scrolling never
//! floods the handlers.

use crate::widget::{dispose_all, Widget};
use petit_dom::{NodeId, Page};
use petit_events::{Event, EventBus, EventKind, EventTarget, ListenerId, Scheduler, Throttle};
use std::time::{Duration, Instant};

/// Class on the header once scrolled past the threshold
pub const CONDENSED_CLASS: &str = "is-condensed";

/// Class (and aria-current) on the active nav link
pub const ACTIVE_CLASS: &str = "active";

const SHRINK_THRESHOLD: f64 = 20.0;
const SHRINK_INTERVAL: Duration = Duration::from_millis(16);
const SPY_INTERVAL: Duration = Duration::from_millis(100);

/// Condenses the header once the page is scrolled
#[derive(Debug)]
pub struct HeaderShrink {
    header: NodeId,
    threshold: f64,
    throttle: Throttle,
    scrolled: bool,
    listeners: Vec<ListenerId>,
}

impl HeaderShrink {
    pub fn new(bus: &mut EventBus, header: NodeId) -> Self {
        Self {
            header,
            threshold: SHRINK_THRESHOLD,
            throttle: Throttle::new(SHRINK_INTERVAL),
            scrolled: false,
            listeners: vec![bus.add(EventTarget::Window, EventKind::Scroll)],
        }
    }

    pub fn is_condensed(&self) -> bool {
        self.scrolled
    }
}

impl Widget for HeaderShrink {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, _sched: &mut Scheduler, event: &Event, now: Instant) {
        if event.kind != EventKind::Scroll || !self.throttle.allow(now) {
            return;
        }
        let past = page.viewport.scroll_y > self.threshold;
        if past != self.scrolled {
            self.scrolled = past;
            if past {
                page.tree.add_class(self.header, CONDENSED_CLASS);
            } else {
                page.tree.remove_class(self.header, CONDENSED_CLASS);
            }
        }
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        dispose_all(bus, &mut self.listeners);
    }
}

/// Highlights the nav link of the section under the reading position
#[derive(Debug)]
pub struct ScrollSpy {
    /// (section, nav link) pairs in DOM order
    entries: Vec<(NodeId, NodeId)>,
    active: Option<usize>,
    header_offset: f64,
    throttle: Throttle,
    listeners: Vec<ListenerId>,
}

impl ScrollSpy {
    pub fn new(bus: &mut EventBus, entries: Vec<(NodeId, NodeId)>, header_offset: f64) -> Self {
        Self {
            entries,
            active: None,
            header_offset,
            throttle: Throttle::new(SPY_INTERVAL),
            listeners: vec![bus.add(EventTarget::Window, EventKind::Scroll)],
        }
    }

    /// Currently highlighted section, if any
    pub fn active_section(&self) -> Option<NodeId> {
        self.active.map(|i| self.entries[i].0)
    }

    fn recompute(&mut self, page: &mut Page) {
        let point = page.viewport.scroll_y + self.header_offset;

        // First section containing the point wins; on a miss the previous
        // selection is retained
        let Some(hit) = self
            .entries
            .iter()
            .position(|&(section, _)| page.tree.rect(section).contains_y(point))
        else {
            return;
        };

        if self.active == Some(hit) {
            return;
        }
        for (i, &(_, link)) in self.entries.iter().enumerate() {
            if i == hit {
                page.tree.add_class(link, ACTIVE_CLASS);
                page.tree.set_attr(link, "aria-current", "true");
            } else {
                page.tree.remove_class(link, ACTIVE_CLASS);
                page.tree.remove_attr(link, "aria-current");
            }
        }
        self.active = Some(hit);
    }
}

impl Widget for ScrollSpy {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, _sched: &mut Scheduler, event: &Event, now: Instant) {
        if event.kind != EventKind::Scroll || !self.throttle.allow(now) {
            return;
        }
        self.recompute(page);
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        dispose_all(bus, &mut self.listeners);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petit_dom::Rect;

    fn scroll_at(page: &mut Page, y: f64) -> Event {
        page.viewport.scroll_y = y;
        Event::scroll()
    }

    #[test]
    fn test_header_shrink_threshold() {
        let mut page = Page::new();
        let mut bus = EventBus::new();
        let mut sched = Scheduler::new();
        let header = page.tree.create_element("header");
        let body = page.body();
        page.tree.append_child(body, header);

        let mut shrink = HeaderShrink::new(&mut bus, header);
        let t0 = Instant::now();

        let ev = scroll_at(&mut page, 20.0);
        shrink.handle(&mut page, &mut sched, &ev, t0);
        // Exactly at the threshold counts as not past
        assert!(!page.tree.has_class(header, CONDENSED_CLASS));

        let ev = scroll_at(&mut page, 21.0);
        shrink.handle(&mut page, &mut sched, &ev, t0 + Duration::from_millis(16));
        assert!(page.tree.has_class(header, CONDENSED_CLASS));
        assert!(shrink.is_condensed());

        let ev = scroll_at(&mut page, 0.0);
        shrink.handle(&mut page, &mut sched, &ev, t0 + Duration::from_millis(32));
        assert!(!page.tree.has_class(header, CONDENSED_CLASS));
    }

    #[test]
    fn test_header_shrink_throttled() {
        let mut page = Page::new();
        let mut bus = EventBus::new();
        let mut sched = Scheduler::new();
        let header = page.tree.create_element("header");
        let body = page.body();
        page.tree.append_child(body, header);

        let mut shrink = HeaderShrink::new(&mut bus, header);
        let t0 = Instant::now();

        let ev = scroll_at(&mut page, 0.0);
        shrink.handle(&mut page, &mut sched, &ev, t0);
        // Inside the throttle window: the deep scroll is not sampled
        let ev = scroll_at(&mut page, 500.0);
        shrink.handle(&mut page, &mut sched, &ev, t0 + Duration::from_millis(5));
        assert!(!shrink.is_condensed());
    }

    fn spy_fixture() -> (Page, EventBus, ScrollSpy, Vec<NodeId>) {
        let mut page = Page::new();
        let mut bus = EventBus::new();
        let body = page.body();
        let mut pairs = Vec::new();
        let mut links = Vec::new();

        // Sections A [0,100), B [100,300), C [300,600)
        for (y, h) in [(0.0, 100.0), (100.0, 200.0), (300.0, 300.0)] {
            let section = page.tree.create_element("section");
            let link = page.tree.create_element("a");
            page.tree.set_attr(link, "href", "#s");
            page.tree.append_child(body, section);
            page.tree.append_child(body, link);
            page.tree.set_rect(section, Rect::from_xywh(0.0, y, 800.0, h));
            pairs.push((section, link));
            links.push(link);
        }
        let spy = ScrollSpy::new(&mut bus, pairs, 80.0);
        (page, bus, spy, links)
    }

    #[test]
    fn test_spy_activates_containing_section() {
        let (mut page, _bus, mut spy, links) = spy_fixture();
        let mut sched = Scheduler::new();
        let t0 = Instant::now();

        // scroll_y 70 + offset 80 = 150, inside section B
        let ev = scroll_at(&mut page, 70.0);
        spy.handle(&mut page, &mut sched, &ev, t0);

        assert!(page.tree.has_class(links[1], ACTIVE_CLASS));
        assert_eq!(page.tree.attr(links[1], "aria-current"), Some("true"));
        assert!(!page.tree.has_class(links[0], ACTIVE_CLASS));
        assert!(!page.tree.has_class(links[2], ACTIVE_CLASS));
    }

    #[test]
    fn test_spy_moves_highlight_exclusively() {
        let (mut page, _bus, mut spy, links) = spy_fixture();
        let mut sched = Scheduler::new();
        let t0 = Instant::now();

        let ev = scroll_at(&mut page, 70.0);
        spy.handle(&mut page, &mut sched, &ev, t0);
        let ev = scroll_at(&mut page, 400.0);
        spy.handle(&mut page, &mut sched, &ev, t0 + Duration::from_millis(100));

        assert!(!page.tree.has_class(links[1], ACTIVE_CLASS));
        assert_eq!(page.tree.attr(links[1], "aria-current"), None);
        assert!(page.tree.has_class(links[2], ACTIVE_CLASS));
    }

    #[test]
    fn test_spy_retains_active_on_miss() {
        let (mut page, _bus, mut spy, links) = spy_fixture();
        let mut sched = Scheduler::new();
        let t0 = Instant::now();

        let ev = scroll_at(&mut page, 70.0);
        spy.handle(&mut page, &mut sched, &ev, t0);

        // 700 + 80 = 780: beyond every section
        let ev = scroll_at(&mut page, 700.0);
        spy.handle(&mut page, &mut sched, &ev, t0 + Duration::from_millis(100));

        assert!(page.tree.has_class(links[1], ACTIVE_CLASS));
        assert_eq!(spy.active_section(), Some(spy.entries[1].0));
    }
}
