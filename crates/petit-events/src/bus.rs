//! Listener registry
//!
//! `add` hands back a ListenerId that doubles as the removal token, so a
//! widget's disposer list is exactly its live registrations. Dispatch order
//! is insertion order; node listeners see events bubbling up from any
//! descendant of their element.

use crate::{Event, EventKind};
use petit_dom::{NodeId, Page};

/// Listener handle; removing it is the disposer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// What a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    /// An element; matches events on it or any descendant
    Node(NodeId),
    /// Every targeted event on the page
    Document,
    /// Window-level events (scroll, resize)
    Window,
}

#[derive(Debug)]
struct Binding {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
}

/// Listener registry
#[derive(Debug, Default)]
pub struct EventBus {
    next: u32,
    bindings: Vec<Binding>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest; the returned id removes it again
    pub fn add(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.bindings.push(Binding { id, target, kind });
        id
    }

    /// Deregister; false if the id was already gone
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.id != id);
        self.bindings.len() != before
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Listeners matching an event, in insertion order
    pub fn hits(&self, event: &Event, page: &Page) -> Vec<ListenerId> {
        self.bindings
            .iter()
            .filter(|b| b.kind == event.kind && Self::target_matches(b.target, event, page))
            .map(|b| b.id)
            .collect()
    }

    fn target_matches(target: EventTarget, event: &Event, page: &Page) -> bool {
        match target {
            EventTarget::Window => event.target.is_none(),
            EventTarget::Document => true,
            EventTarget::Node(node) => event
                .target
                .is_some_and(|t| page.tree.contains(node, t)),
        }
    }
}
