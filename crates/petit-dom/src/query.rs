//! Selector queries
//!
//! Simple selectors (tag, .class, #id, [attr], *) with safe lookup helpers:
//! a malformed selector is logged and resolved to nothing, never an error.

use crate::{DomTree, ElementData, NodeId};
use tracing::warn;

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    /// Attribute presence, e.g. `[data-src]`
    Attr(String),
    Universal,
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else if let Some(rest) = s.strip_prefix('[') {
            let name = rest.strip_suffix(']')?;
            (!name.is_empty()).then(|| Self::Attr(name.to_string()))
        } else if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            Some(Self::Tag(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Check whether an element matches
    pub fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => elem.tag == *tag,
            Self::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => elem.has_class(class),
            Self::Attr(name) => elem.attr(name).is_some(),
        }
    }
}

/// First matching element under root, or None (also on malformed selector)
pub fn query(tree: &DomTree, root: NodeId, selector: &str) -> Option<NodeId> {
    let Some(sel) = SimpleSelector::parse(selector) else {
        warn!(selector, "ignoring malformed selector");
        return None;
    };
    tree.descendants(root).into_iter().find(|&id| {
        tree.get(id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| sel.matches(e))
    })
}

/// All matching elements under root in document order (empty on malformed selector)
pub fn query_all(tree: &DomTree, root: NodeId, selector: &str) -> Vec<NodeId> {
    let Some(sel) = SimpleSelector::parse(selector) else {
        warn!(selector, "ignoring malformed selector");
        return Vec::new();
    };
    tree.descendants(root)
        .into_iter()
        .filter(|&id| {
            tree.get(id)
                .and_then(|n| n.as_element())
                .is_some_and(|e| sel.matches(e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let nav = tree.create_element("nav");
        let link = tree.create_element("a");
        let img = tree.create_element("img");
        tree.append_child(tree.root(), nav);
        tree.append_child(nav, link);
        tree.append_child(nav, img);
        tree.set_attr(link, "class", "nav-link active");
        tree.set_attr(img, "data-src", "hero.jpg");
        (tree, nav, link, img)
    }

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            SimpleSelector::parse("DIV"),
            Some(SimpleSelector::Tag("div".into()))
        );
        assert_eq!(
            SimpleSelector::parse(".active"),
            Some(SimpleSelector::Class("active".into()))
        );
        assert_eq!(
            SimpleSelector::parse("#main"),
            Some(SimpleSelector::Id("main".into()))
        );
        assert_eq!(
            SimpleSelector::parse("[data-src]"),
            Some(SimpleSelector::Attr("data-src".into()))
        );
        assert_eq!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal));
    }

    #[test]
    fn test_malformed_resolves_to_nothing() {
        assert_eq!(SimpleSelector::parse(""), None);
        assert_eq!(SimpleSelector::parse("#"), None);
        assert_eq!(SimpleSelector::parse("div > a"), None);
        assert_eq!(SimpleSelector::parse("[unclosed"), None);

        let (tree, nav, ..) = sample();
        assert_eq!(query(&tree, nav, "div > a"), None);
        assert!(query_all(&tree, nav, "???").is_empty());
    }

    #[test]
    fn test_query_matches() {
        let (tree, nav, link, img) = sample();

        assert_eq!(query(&tree, tree.root(), "nav"), Some(nav));
        assert_eq!(query(&tree, nav, ".active"), Some(link));
        assert_eq!(query_all(&tree, nav, "[data-src]"), vec![img]);
        assert_eq!(query_all(&tree, nav, "*"), vec![link, img]);
    }
}
