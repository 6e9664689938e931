//! Generic document tree node.

use smallvec::SmallVec;

/// One element of a parsed DrawingML part.
///
/// Names are local names (`solidFill`, not `a:solidFill`); namespace prefixes
/// are dropped when the tree is built. Attributes and children keep document
/// order, which matters for list-like lookups such as `gsLst` or the theme's
/// style matrices.
///
/// The tree is immutable once built. Resolvers only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    attrs: SmallVec<[(String, String); 4]>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    /// Create an empty node. A namespace prefix in `name` is stripped.
    pub fn new(name: &str) -> Self {
        Self {
            name: local_name(name).to_string(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter. A later value for the same key replaces
    /// the earlier one in place.
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub(crate) fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let key = local_name(key);
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.attrs.push((key.to_string(), value));
        }
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Local tag name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Raw attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in document order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All children in document order.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child whose name is any of `names`.
    pub fn first_child_of(&self, names: &[&str]) -> Option<&Node> {
        self.children.iter().find(|c| names.contains(&c.name.as_str()))
    }

    /// Follow a chain of child names, taking the first match at every step.
    ///
    /// ```rust
    /// use drawingml_style::Node;
    ///
    /// let sp = Node::new("p:sp").with_child(
    ///     Node::new("p:spPr").with_child(Node::new("a:ln").with_attr("w", "12700")),
    /// );
    /// assert_eq!(sp.path(&["spPr", "ln"]).and_then(|ln| ln.attr("w")), Some("12700"));
    /// ```
    pub fn path(&self, names: &[&str]) -> Option<&Node> {
        names.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Concatenated character data directly inside this node.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Depth-first search for the first descendant (or self) with `name`.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

/// Strip a namespace prefix: `a:srgbClr` -> `srgbClr`.
#[inline]
pub(crate) fn local_name(qualified: &str) -> &str {
    match qualified.rfind(':') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("a:gsLst")
            .with_child(Node::new("a:gs").with_attr("pos", "100000"))
            .with_child(Node::new("a:gs").with_attr("pos", "0"))
            .with_child(Node::new("a:ext"))
    }

    #[test]
    fn test_prefix_is_stripped() {
        let node = Node::new("p:sp").with_attr("r:embed", "rId2");
        assert_eq!(node.name(), "sp");
        assert_eq!(node.attr("embed"), Some("rId2"));
        assert!(node.attr("r:embed").is_none());
    }

    #[test]
    fn test_children_keep_order() {
        let list = sample();
        let positions: Vec<_> = list.children_named("gs").filter_map(|g| g.attr("pos")).collect();
        assert_eq!(positions, vec!["100000", "0"]);
        assert_eq!(list.child("gs").and_then(|g| g.attr("pos")), Some("100000"));
        assert_eq!(list.children().len(), 3);
    }

    #[test]
    fn test_attr_replacement_keeps_position() {
        let node = Node::new("a")
            .with_attr("x", "1")
            .with_attr("y", "2")
            .with_attr("x", "3");
        let attrs: Vec<_> = node.attrs().collect();
        assert_eq!(attrs, vec![("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_path_and_find() {
        let root = Node::new("sld").with_child(
            Node::new("cSld").with_child(Node::new("spTree").with_child(Node::new("sp"))),
        );
        assert!(root.path(&["cSld", "spTree", "sp"]).is_some());
        assert!(root.path(&["cSld", "bg"]).is_none());
        assert!(root.find("sp").is_some());
        assert!(root.path(&[]).is_some_and(|n| n.is("sld")));
    }
}
