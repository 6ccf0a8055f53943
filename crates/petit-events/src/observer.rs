//! Observers
//!
//! Intersection observation against the page viewport and edge-triggered
//! media-query watching. Both are polled: the host (or a test) decides when
//! layout has settled and calls `check`/`poll`.

use petit_dom::{NodeId, Page, Rect, Viewport};

/// One intersection report
#[derive(Debug, Clone, Copy)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Viewport intersection observer
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    /// (target, last seen ratio); None until first check
    observed: Vec<(NodeId, Option<f64>)>,
    thresholds: Vec<f64>,
}

impl IntersectionObserver {
    /// Observer reporting on any visibility change (threshold 0)
    pub fn new() -> Self {
        Self {
            observed: Vec::new(),
            thresholds: vec![0.0],
        }
    }

    pub fn with_thresholds(thresholds: Vec<f64>) -> Self {
        Self {
            observed: Vec::new(),
            thresholds: if thresholds.is_empty() {
                vec![0.0]
            } else {
                thresholds
            },
        }
    }

    /// Start observing an element
    pub fn observe(&mut self, target: NodeId) {
        if !self.observed.iter().any(|(id, _)| *id == target) {
            self.observed.push((target, None));
        }
    }

    /// Stop observing an element
    pub fn unobserve(&mut self, target: NodeId) {
        self.observed.retain(|(id, _)| *id != target);
    }

    /// Stop observing everything
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.observed.iter().any(|(id, _)| *id == target)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Compare every observed element against the current viewport.
    /// First check always reports; afterwards a report fires when the
    /// intersecting flag flips or a threshold is crossed.
    pub fn check(&mut self, page: &Page) -> Vec<IntersectionEntry> {
        let viewport = viewport_rect(&page.viewport);
        let mut entries = Vec::new();

        for (target, last_ratio) in &mut self.observed {
            let rect = page.tree.rect(*target);
            let ratio = if rect.area() > 0.0 {
                rect.intersection(&viewport)
                    .map(|i| i.area() / rect.area())
                    .unwrap_or(0.0)
            } else {
                0.0
            };

            let notify = match *last_ratio {
                None => true,
                Some(prev) => {
                    (prev > 0.0) != (ratio > 0.0)
                        || self
                            .thresholds
                            .iter()
                            .any(|&t| (prev < t && ratio >= t) || (prev >= t && ratio < t))
                }
            };

            if notify {
                *last_ratio = Some(ratio);
                entries.push(IntersectionEntry {
                    target: *target,
                    ratio,
                    is_intersecting: ratio > 0.0,
                });
            }
        }
        entries
    }
}

fn viewport_rect(viewport: &Viewport) -> Rect {
    Rect::from_xywh(0.0, viewport.scroll_y, viewport.width, viewport.height)
}

/// Media query handle; unwatching it is the disposer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(u32);

/// Predicate over the viewport, standing in for matchMedia
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaQuery {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub reduced_motion: Option<bool>,
}

impl MediaQuery {
    /// `(min-width: px)`
    pub fn min_width(px: f64) -> Self {
        Self {
            min_width: Some(px),
            ..Self::default()
        }
    }

    /// `(prefers-reduced-motion: reduce)`
    pub fn prefers_reduced_motion() -> Self {
        Self {
            reduced_motion: Some(true),
            ..Self::default()
        }
    }

    pub fn matches(&self, viewport: &Viewport) -> bool {
        if let Some(min) = self.min_width {
            if viewport.width < min {
                return false;
            }
        }
        if let Some(max) = self.max_width {
            if viewport.width > max {
                return false;
            }
        }
        if let Some(reduce) = self.reduced_motion {
            if viewport.reduced_motion != reduce {
                return false;
            }
        }
        true
    }
}

/// Edge-triggered media-query subscriptions
#[derive(Debug, Default)]
pub struct MediaWatcher {
    next: u32,
    queries: Vec<(QueryId, MediaQuery, Option<bool>)>,
}

impl MediaWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe; the returned id unsubscribes
    pub fn watch(&mut self, query: MediaQuery) -> QueryId {
        let id = QueryId(self.next);
        self.next += 1;
        self.queries.push((id, query, None));
        id
    }

    /// Unsubscribe; false if the id was already gone
    pub fn unwatch(&mut self, id: QueryId) -> bool {
        let before = self.queries.len();
        self.queries.retain(|(qid, ..)| *qid != id);
        self.queries.len() != before
    }

    /// Report every subscription whose match state changed (first poll
    /// always reports)
    pub fn poll(&mut self, viewport: &Viewport) -> Vec<(QueryId, bool)> {
        let mut changes = Vec::new();
        for (id, query, last) in &mut self.queries {
            let matches = query.matches(viewport);
            if *last != Some(matches) {
                *last = Some(matches);
                changes.push((*id, matches));
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_image(y: f64) -> (Page, NodeId) {
        let mut page = Page::new();
        let img = page.tree.create_element("img");
        let body = page.body();
        page.tree.append_child(body, img);
        page.tree.set_rect(img, Rect::from_xywh(0.0, y, 400.0, 300.0));
        (page, img)
    }

    #[test]
    fn test_first_check_reports() {
        let (page, img) = page_with_image(100.0);
        let mut observer = IntersectionObserver::new();
        observer.observe(img);

        let entries = observer.check(&page);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_intersecting);

        // No change: nothing new
        assert!(observer.check(&page).is_empty());
    }

    #[test]
    fn test_reports_when_scrolled_into_view() {
        let (mut page, img) = page_with_image(2000.0);
        let mut observer = IntersectionObserver::new();
        observer.observe(img);

        let first = observer.check(&page);
        assert!(!first[0].is_intersecting);

        page.viewport.scroll_y = 1500.0;
        let second = observer.check(&page);
        assert_eq!(second.len(), 1);
        assert!(second[0].is_intersecting);
    }

    #[test]
    fn test_unobserve_stops_reports() {
        let (mut page, img) = page_with_image(2000.0);
        let mut observer = IntersectionObserver::new();
        observer.observe(img);
        observer.check(&page);

        observer.unobserve(img);
        page.viewport.scroll_y = 1500.0;
        assert!(observer.check(&page).is_empty());
        assert!(observer.is_empty());
    }

    #[test]
    fn test_media_watcher_edges() {
        let mut watcher = MediaWatcher::new();
        let id = watcher.watch(MediaQuery::min_width(768.0));
        let mut viewport = Viewport {
            width: 375.0,
            ..Viewport::default()
        };

        assert_eq!(watcher.poll(&viewport), vec![(id, false)]);
        assert!(watcher.poll(&viewport).is_empty());

        viewport.width = 1024.0;
        assert_eq!(watcher.poll(&viewport), vec![(id, true)]);

        assert!(watcher.unwatch(id));
        viewport.width = 320.0;
        assert!(watcher.poll(&viewport).is_empty());
    }

    #[test]
    fn test_reduced_motion_query() {
        let viewport = Viewport {
            reduced_motion: true,
            ..Viewport::default()
        };
        assert!(MediaQuery::prefers_reduced_motion().matches(&viewport));
        assert!(!MediaQuery::prefers_reduced_motion().matches(&Viewport::default()));
    }
}
