//! DOM Tree (arena-based allocation)
//!
//! Nodes live in a flat arena; detach unlinks a subtree but never reclaims
//! slots, so a NodeId stays valid for the page lifetime.

use crate::{Node, NodeId, Rect};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Document root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes allocated (including detached ones)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a new text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a child as the last child of parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let prev_last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev_last;
        }
        if prev_last.is_valid() {
            if let Some(node) = self.get_mut(prev_last) {
                node.next_sibling = child;
            }
        }
        if let Some(node) = self.get_mut(parent) {
            if !node.first_child.is_valid() {
                node.first_child = child;
            }
            node.last_child = child;
        }
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            if let Some(n) = self.get_mut(prev) {
                n.next_sibling = next;
            }
        }
        if next.is_valid() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        }
        if parent.is_valid() {
            if let Some(p) = self.get_mut(parent) {
                if p.first_child == id {
                    p.first_child = next;
                }
                if p.last_child == id {
                    p.last_child = prev;
                }
            }
        }
        if let Some(n) = self.get_mut(id) {
            n.parent = NodeId::NONE;
            n.prev_sibling = NodeId::NONE;
            n.next_sibling = NodeId::NONE;
        }
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Direct children in document order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        while cur.is_valid() {
            out.push(cur);
            cur = self.get(cur).map(|n| n.next_sibling).unwrap_or(NodeId::NONE);
        }
        out
    }

    /// All descendants of root, preorder (root excluded)
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root);
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut kids = self.children(id);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Check whether `id` is `ancestor` or sits inside its subtree
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = id;
        while cur.is_valid() {
            if cur == ancestor {
                return true;
            }
            cur = self.get(cur).map(|n| n.parent).unwrap_or(NodeId::NONE);
        }
        false
    }

    /// Check whether a node is still reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Tag name of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute lookup
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attr(name)
    }

    /// Set an attribute (no-op on non-elements)
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.set_attr(name, value);
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.get_mut(id)?.as_element_mut()?.remove_attr(name)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.remove_class(class);
        }
    }

    /// Replace an element's children with a single text node
    pub fn set_text(&mut self, id: NodeId, content: &str) {
        for child in self.children(id) {
            self.detach(child);
        }
        let text = self.create_text(content);
        self.append_child(id, text);
    }

    /// Concatenated text of all descendant text nodes
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for desc in self.descendants(id) {
            if let Some(t) = self.get(desc).and_then(|n| n.as_text()) {
                out.push_str(t);
            }
        }
        out
    }

    /// Element layout rectangle (zero if never seeded)
    pub fn rect(&self, id: NodeId) -> Rect {
        self.get(id)
            .and_then(|n| n.as_element())
            .map(|e| e.rect)
            .unwrap_or_default()
    }

    /// Seed an element's layout rectangle
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) {
            elem.rect = rect;
        }
    }

    /// First element with the given id attribute
    pub fn element_by_id(&self, target: &str) -> Option<NodeId> {
        self.descendants(self.root()).into_iter().find(|&id| {
            self.get(id)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.id.as_deref() == Some(target))
        })
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let parent = tree.create_element("section");
        let a = tree.create_element("p");
        let b = tree.create_element("p");
        tree.append_child(tree.root(), parent);
        tree.append_child(parent, a);
        tree.append_child(parent, b);
        (tree, parent, a, b)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, parent, a, b) = sample();

        assert_eq!(tree.children(parent), vec![a, b]);
        assert_eq!(tree.parent(a), Some(parent));
        assert!(tree.contains(parent, b));
        assert!(tree.is_connected(a));
    }

    #[test]
    fn test_detach_unlinks_subtree() {
        let (mut tree, parent, a, b) = sample();

        tree.detach(a);

        assert_eq!(tree.children(parent), vec![b]);
        assert_eq!(tree.parent(a), None);
        assert!(!tree.is_connected(a));
        // Arena slot survives detach
        assert!(tree.get(a).is_some());
    }

    #[test]
    fn test_set_text_replaces_content() {
        let (mut tree, _, a, _) = sample();

        tree.set_text(a, "Bonjour");
        assert_eq!(tree.text(a), "Bonjour");

        tree.set_text(a, "Au revoir");
        assert_eq!(tree.text(a), "Au revoir");
        assert_eq!(tree.children(a).len(), 1);
    }

    #[test]
    fn test_element_by_id() {
        let (mut tree, _, a, _) = sample();
        tree.set_attr(a, "id", "intro");

        assert_eq!(tree.element_by_id("intro"), Some(a));
        assert_eq!(tree.element_by_id("missing"), None);
    }

    #[test]
    fn test_descendants_preorder() {
        let (mut tree, parent, a, b) = sample();
        let inner = tree.create_element("span");
        tree.append_child(a, inner);

        assert_eq!(tree.descendants(parent), vec![a, inner, b]);
    }
}
