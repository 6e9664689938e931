//! Placeholder lookup tables for layout and master parts.
//!
//! Matching a slide placeholder to its layout and master counterparts would
//! otherwise rescan the shape tree on every facet lookup. The tables are built
//! once per part and may be shared across every slide that uses it.

use crate::tree::Node;
use std::collections::HashMap;

/// Shape kinds that can carry `nv*Pr/nvPr/ph`.
pub(crate) const SHAPE_KINDS: [&str; 5] = ["sp", "pic", "graphicFrame", "cxnSp", "grpSp"];

/// Placeholder identity as declared by `p:ph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderRef<'a> {
    pub idx: Option<&'a str>,
    pub ph_type: Option<&'a str>,
}

impl<'a> PlaceholderRef<'a> {
    /// Read the `ph` element of a shape, if it is a placeholder.
    pub fn of(shape: &'a Node) -> Option<Self> {
        let ph = non_visual_props(shape)?.path(&["nvPr", "ph"])?;
        Some(Self {
            idx: ph.attr("idx"),
            ph_type: ph.attr("type"),
        })
    }
}

/// The `nvSpPr`/`nvPicPr`/... child of a shape.
pub(crate) fn non_visual_props(shape: &Node) -> Option<&Node> {
    shape
        .children()
        .iter()
        .find(|c| c.name().starts_with("nv") && c.name().ends_with("Pr"))
}

/// Three lookup tables over one shape tree: by element id (`cNvPr id`), by
/// placeholder index and by placeholder type.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderIndex<'a> {
    by_id: HashMap<&'a str, &'a Node>,
    by_idx: HashMap<&'a str, &'a Node>,
    by_type: HashMap<&'a str, &'a Node>,
}

impl<'a> PlaceholderIndex<'a> {
    /// Index a slide, layout or master part (the element holding `cSld`).
    pub fn build(part: &'a Node) -> Self {
        let mut index = Self::default();
        if let Some(tree) = part.path(&["cSld", "spTree"]) {
            index.scan(tree);
        }
        index
    }

    fn scan(&mut self, container: &'a Node) {
        for shape in container.children() {
            if !SHAPE_KINDS.contains(&shape.name()) {
                continue;
            }
            if let Some(nv) = non_visual_props(shape) {
                if let Some(id) = nv.child("cNvPr").and_then(|c| c.attr("id")) {
                    self.by_id.insert(id, shape);
                }
                if let Some(ph) = nv.path(&["nvPr", "ph"]) {
                    if let Some(idx) = ph.attr("idx") {
                        self.by_idx.insert(idx, shape);
                    }
                    if let Some(ph_type) = ph.attr("type") {
                        self.by_type.insert(ph_type, shape);
                    }
                }
            }
            if shape.is("grpSp") {
                self.scan(shape);
            }
        }
    }

    pub fn by_id(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    pub fn by_idx(&self, idx: &str) -> Option<&'a Node> {
        self.by_idx.get(idx).copied()
    }

    pub fn by_type(&self, ph_type: &str) -> Option<&'a Node> {
        self.by_type.get(ph_type).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.by_idx.is_empty() && self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(id: &str, idx: Option<&str>, ph_type: Option<&str>) -> Node {
        let mut ph = Node::new("ph");
        if let Some(idx) = idx {
            ph = ph.with_attr("idx", idx);
        }
        if let Some(t) = ph_type {
            ph = ph.with_attr("type", t);
        }
        Node::new("sp").with_child(
            Node::new("nvSpPr")
                .with_child(Node::new("cNvPr").with_attr("id", id))
                .with_child(Node::new("nvPr").with_child(ph)),
        )
    }

    #[test]
    fn test_build_index() {
        let layout = Node::new("sldLayout").with_child(
            Node::new("cSld").with_child(
                Node::new("spTree")
                    .with_child(placeholder("2", None, Some("title")))
                    .with_child(placeholder("3", Some("1"), Some("body")))
                    .with_child(Node::new("grpSp").with_child(placeholder("9", Some("13"), None))),
            ),
        );
        let index = PlaceholderIndex::build(&layout);
        assert!(index.by_type("title").is_some());
        assert!(index.by_idx("1").is_some());
        assert!(index.by_idx("13").is_some());
        assert!(index.by_id("9").is_some());
        assert!(index.by_type("ftr").is_none());
    }

    #[test]
    fn test_placeholder_ref() {
        let shape = placeholder("4", Some("10"), Some("dt"));
        let ph = PlaceholderRef::of(&shape).unwrap();
        assert_eq!(ph.idx, Some("10"));
        assert_eq!(ph.ph_type, Some("dt"));
        assert!(PlaceholderRef::of(&Node::new("sp")).is_none());
    }

    #[test]
    fn test_missing_tree_is_empty() {
        assert!(PlaceholderIndex::build(&Node::new("sldMaster")).is_empty());
    }
}
