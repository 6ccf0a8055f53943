//! Focus trap
//!
//! Keeps Tab/Shift+Tab cycling inside a container. The focusable set is
//! snapshotted once at activation; the owning widget routes keydowns here
//! and owns the activation lifecycle.

use petit_dom::{NodeId, Page};
use petit_events::Key;

/// Tab-cycle focus trap for a container
#[derive(Debug, Default)]
pub struct FocusTrap {
    focusables: Vec<NodeId>,
    active: bool,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the container's focusables and start trapping.
    /// DOM mutations after this point are not picked up; moving focus into
    /// the container stays the caller's job.
    pub fn activate(&mut self, page: &Page, container: NodeId) {
        self.focusables = page.focusables(container);
        self.active = true;
    }

    /// Release the trap and drop the snapshot
    pub fn deactivate(&mut self) {
        self.active = false;
        self.focusables.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a keydown; returns true when the key was consumed.
    /// Tab advances, Shift+Tab retreats, both wrapping at the ends.
    pub fn handle_key(&mut self, page: &mut Page, key: Key, shift: bool) -> bool {
        if !self.active || key != Key::Tab || self.focusables.is_empty() {
            return false;
        }

        let len = self.focusables.len();
        let current = page
            .focused()
            .and_then(|f| self.focusables.iter().position(|&id| id == f));

        let next = match (current, shift) {
            (Some(i), false) => (i + 1) % len,
            (Some(i), true) => (i + len - 1) % len,
            (None, false) => 0,
            (None, true) => len - 1,
        };
        page.focus(self.focusables[next]);
        true
    }
}
