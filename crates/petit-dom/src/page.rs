//! Page - document plus viewport and focus state
//!
//! The Page is the single shared medium between widgets: the tree, the
//! viewport, and which element currently holds document focus.

use crate::{DomTree, NodeId};

/// Viewport state sampled by scroll/resize handlers
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
    /// prefers-reduced-motion media preference
    pub reduced_motion: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
            reduced_motion: false,
        }
    }
}

/// Page: DOM tree, body anchor, viewport, document focus
#[derive(Debug)]
pub struct Page {
    pub tree: DomTree,
    pub viewport: Viewport,
    body: NodeId,
    focused: Option<NodeId>,
}

impl Page {
    /// Create a page with an html/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let body = tree.create_element("body");
        tree.append_child(tree.root(), html);
        tree.append_child(html, body);

        Self {
            tree,
            viewport: Viewport::default(),
            body,
            focused: None,
        }
    }

    /// The <body> element
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Currently focused element, if any
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move document focus
    pub fn focus(&mut self, id: NodeId) {
        self.focused = Some(id);
    }

    /// Clear document focus
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Check whether an element can take keyboard focus
    pub fn is_focusable(&self, id: NodeId) -> bool {
        let Some(elem) = self.tree.get(id).and_then(|n| n.as_element()) else {
            return false;
        };
        if elem.attr("disabled").is_some() {
            return false;
        }
        if let Some(value) = elem.attr("tabindex") {
            return matches!(value.parse::<i32>(), Ok(n) if n >= 0);
        }
        match elem.tag.as_str() {
            "a" => elem.attr("href").is_some(),
            "button" | "input" | "select" | "textarea" => true,
            _ => false,
        }
    }

    /// Focusable descendants of a container, in document order
    pub fn focusables(&self, container: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(container)
            .into_iter()
            .filter(|&id| self.is_focusable(id))
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
