//! Widget lifecycle
//!
//! A widget is bound to DOM anchors at construction, reacts to routed
//! events, and deregisters every listener on destroy.

use petit_dom::Page;
use petit_events::{Event, EventBus, ListenerId, Scheduler};
use std::time::Instant;

/// Event-driven UI component
pub trait Widget {
    /// The listener registrations this widget owns (its disposer list)
    fn listeners(&self) -> &[ListenerId];

    /// React to an event the bus routed here
    fn handle(&mut self, page: &mut Page, sched: &mut Scheduler, event: &Event, now: Instant);

    /// Deregister every listener; the widget must be inert afterwards
    fn destroy(&mut self, bus: &mut EventBus);
}

/// Remove a widget's registrations; returns how many were live
pub(crate) fn dispose_all(bus: &mut EventBus, listeners: &mut Vec<ListenerId>) -> usize {
    let mut removed = 0;
    for id in listeners.drain(..) {
        if bus.remove(id) {
            removed += 1;
        }
    }
    removed
}
