//! Events
//!
//! A narrow event surface: kind, target, key, shift modifier, viewport
//! width. Handlers never see more than they read.

use petit_dom::NodeId;

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Keydown,
    Blur,
    Input,
    Submit,
    Scroll,
    Resize,
}

/// Keys the widgets care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Enter,
    Other,
}

/// A dispatched event
#[derive(Debug, Clone, Copy)]
pub struct Event {
    pub kind: EventKind,
    /// Element the event originated on (None for window-level events)
    pub target: Option<NodeId>,
    pub key: Option<Key>,
    pub shift_key: bool,
    /// New viewport width, for resize
    pub width: Option<f64>,
}

impl Event {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            target: None,
            key: None,
            shift_key: false,
            width: None,
        }
    }

    /// Click on an element
    pub fn click(target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(EventKind::Click)
        }
    }

    /// Key press at document level
    pub fn keydown(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(EventKind::Keydown)
        }
    }

    /// Key press with the shift modifier held
    pub fn keydown_shift(key: Key) -> Self {
        Self {
            shift_key: true,
            ..Self::keydown(key)
        }
    }

    /// Field lost focus
    pub fn blur(target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(EventKind::Blur)
        }
    }

    /// Field value changed
    pub fn input(target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(EventKind::Input)
        }
    }

    /// Form submit requested
    pub fn submit(target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::new(EventKind::Submit)
        }
    }

    /// Window scrolled (offset lives on the page viewport)
    pub fn scroll() -> Self {
        Self::new(EventKind::Scroll)
    }

    /// Window resized to the given width
    pub fn resize(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::new(EventKind::Resize)
        }
    }
}
