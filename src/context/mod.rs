//! Per-slide resolution context.
//!
//! A [`StyleContext`] bundles everything a resolver may consult besides the
//! node itself: the slide, layout, master and theme trees, the effective
//! color map, placeholder lookup tables and the asset provider. It is built
//! once per slide and only ever borrowed afterwards.
//!
//! # Examples
//!
//! ```rust
//! use drawingml_style::{Node, StyleContext};
//!
//! let slide = Node::new("p:sld");
//! let theme = Node::new("a:theme");
//! let ctx = StyleContext::builder(&slide).theme(&theme).build();
//! assert_eq!(ctx.color_map().remap("tx1"), "dk1");
//! ```

// Submodule declarations
pub mod assets;
pub mod color_map;
pub mod index;
pub mod theme;

// Re-exports
pub use assets::{AssetProvider, NoAssets};
pub use color_map::ColorMap;
pub use index::{PlaceholderIndex, PlaceholderRef};

use crate::config::ResolveOptions;
use crate::tree::Node;
use std::borrow::Cow;

static NO_ASSETS: NoAssets = NoAssets;

/// Read-only inputs for resolving one slide.
#[derive(Clone)]
pub struct StyleContext<'a> {
    slide: &'a Node,
    layout: Option<&'a Node>,
    master: Option<&'a Node>,
    theme: Option<&'a Node>,
    table_styles: Option<&'a Node>,
    default_text_style: Option<&'a Node>,
    color_map: ColorMap,
    layout_index: Cow<'a, PlaceholderIndex<'a>>,
    master_index: Cow<'a, PlaceholderIndex<'a>>,
    assets: &'a dyn AssetProvider,
    options: &'a ResolveOptions,
}

impl std::fmt::Debug for StyleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleContext")
            .field("slide", &self.slide.name())
            .field("has_layout", &self.layout.is_some())
            .field("has_master", &self.master.is_some())
            .field("has_theme", &self.theme.is_some())
            .field("color_map", &self.color_map)
            .finish_non_exhaustive()
    }
}

/// Layout and master counterparts of a slide placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderMatch<'n> {
    pub layout: Option<&'n Node>,
    pub master: Option<&'n Node>,
    /// Declared type, else the matched layout placeholder's type, else `obj`
    /// for any placeholder. `None` for ordinary shapes.
    pub ph_type: Option<&'n str>,
}

impl<'a> StyleContext<'a> {
    /// Start building a context for `slide`.
    pub fn builder(slide: &'a Node) -> StyleContextBuilder<'a> {
        StyleContextBuilder::new(slide)
    }

    #[inline]
    pub fn slide(&self) -> &'a Node {
        self.slide
    }

    #[inline]
    pub fn layout(&self) -> Option<&'a Node> {
        self.layout
    }

    #[inline]
    pub fn master(&self) -> Option<&'a Node> {
        self.master
    }

    #[inline]
    pub fn theme(&self) -> Option<&'a Node> {
        self.theme
    }

    /// The presentation's table style catalog (`a:tblStyleLst`).
    #[inline]
    pub fn table_styles(&self) -> Option<&'a Node> {
        self.table_styles
    }

    /// The presentation's `p:defaultTextStyle`.
    #[inline]
    pub fn default_text_style(&self) -> Option<&'a Node> {
        self.default_text_style
    }

    #[inline]
    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    #[inline]
    pub fn layout_index(&self) -> &PlaceholderIndex<'a> {
        &self.layout_index
    }

    #[inline]
    pub fn master_index(&self) -> &PlaceholderIndex<'a> {
        &self.master_index
    }

    #[inline]
    pub fn assets(&self) -> &'a dyn AssetProvider {
        self.assets
    }

    #[inline]
    pub fn options(&self) -> &'a ResolveOptions {
        self.options
    }

    /// Match a slide shape to its layout and master placeholders.
    ///
    /// With an `idx`, the layout is searched by index and the master by type
    /// when a type is declared, else by index. Without an `idx`, both are
    /// searched by type. A type missing on the slide is borrowed from the
    /// matched layout placeholder.
    pub fn placeholders<'n>(&self, shape: &'n Node) -> PlaceholderMatch<'n>
    where
        'a: 'n,
    {
        let Some(ph) = PlaceholderRef::of(shape) else {
            return PlaceholderMatch::default();
        };

        let (layout, mut master) = match (ph.idx, ph.ph_type) {
            (Some(idx), declared) => {
                let layout = self
                    .layout_index
                    .by_idx(idx)
                    .or_else(|| declared.and_then(|t| self.layout_index.by_type(t)));
                let master = match declared {
                    Some(t) => self.master_index.by_type(t),
                    None => self.master_index.by_idx(idx),
                };
                (layout, master)
            },
            (None, Some(t)) => (self.layout_index.by_type(t), self.master_index.by_type(t)),
            (None, None) => (None, None),
        };

        let ph_type = ph
            .ph_type
            .or_else(|| layout.and_then(PlaceholderRef::of).and_then(|l| l.ph_type))
            .or(Some("obj"));

        if master.is_none()
            && let Some(t) = ph_type
        {
            master = self.master_index.by_type(t);
        }

        PlaceholderMatch {
            layout,
            master,
            ph_type,
        }
    }

    /// Master `txStyles` block for a placeholder type: `titleStyle` for titles,
    /// `bodyStyle` for body-like placeholders, `otherStyle` for the rest.
    pub fn master_text_style(&self, ph_type: Option<&str>) -> Option<&'a Node> {
        let block = match ph_type {
            Some("title" | "ctrTitle") => "titleStyle",
            Some("body" | "subTitle" | "obj") => "bodyStyle",
            _ => "otherStyle",
        };
        self.master?.path(&["txStyles", block])
    }
}

/// Builder for [`StyleContext`].
pub struct StyleContextBuilder<'a> {
    slide: &'a Node,
    layout: Option<&'a Node>,
    master: Option<&'a Node>,
    theme: Option<&'a Node>,
    table_styles: Option<&'a Node>,
    default_text_style: Option<&'a Node>,
    layout_index: Option<&'a PlaceholderIndex<'a>>,
    master_index: Option<&'a PlaceholderIndex<'a>>,
    assets: Option<&'a dyn AssetProvider>,
    options: Option<&'a ResolveOptions>,
}

impl<'a> StyleContextBuilder<'a> {
    fn new(slide: &'a Node) -> Self {
        Self {
            slide,
            layout: None,
            master: None,
            theme: None,
            table_styles: None,
            default_text_style: None,
            layout_index: None,
            master_index: None,
            assets: None,
            options: None,
        }
    }

    pub fn layout(mut self, layout: &'a Node) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn master(mut self, master: &'a Node) -> Self {
        self.master = Some(master);
        self
    }

    pub fn theme(mut self, theme: &'a Node) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn table_styles(mut self, table_styles: &'a Node) -> Self {
        self.table_styles = Some(table_styles);
        self
    }

    pub fn default_text_style(mut self, default_text_style: &'a Node) -> Self {
        self.default_text_style = Some(default_text_style);
        self
    }

    /// Reuse a layout index built for another slide of the same layout.
    pub fn layout_index(mut self, index: &'a PlaceholderIndex<'a>) -> Self {
        self.layout_index = Some(index);
        self
    }

    /// Reuse a master index built for another slide of the same master.
    pub fn master_index(mut self, index: &'a PlaceholderIndex<'a>) -> Self {
        self.master_index = Some(index);
        self
    }

    pub fn assets(mut self, assets: &'a dyn AssetProvider) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn options(mut self, options: &'a ResolveOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> StyleContext<'a> {
        let layout_index = match (self.layout_index, self.layout) {
            (Some(index), _) => Cow::Borrowed(index),
            (None, Some(layout)) => Cow::Owned(PlaceholderIndex::build(layout)),
            (None, None) => Cow::Owned(PlaceholderIndex::default()),
        };
        let master_index = match (self.master_index, self.master) {
            (Some(index), _) => Cow::Borrowed(index),
            (None, Some(master)) => Cow::Owned(PlaceholderIndex::build(master)),
            (None, None) => Cow::Owned(PlaceholderIndex::default()),
        };

        StyleContext {
            slide: self.slide,
            layout: self.layout,
            master: self.master,
            theme: self.theme,
            table_styles: self.table_styles,
            default_text_style: self.default_text_style,
            color_map: ColorMap::effective(Some(self.slide), self.layout, self.master),
            layout_index,
            master_index,
            assets: self.assets.unwrap_or(&NO_ASSETS),
            options: self.options.unwrap_or_else(|| ResolveOptions::global_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ph_shape(idx: Option<&str>, ph_type: Option<&str>) -> Node {
        let mut ph = Node::new("ph");
        if let Some(idx) = idx {
            ph = ph.with_attr("idx", idx);
        }
        if let Some(t) = ph_type {
            ph = ph.with_attr("type", t);
        }
        Node::new("sp").with_child(
            Node::new("nvSpPr")
                .with_child(Node::new("cNvPr").with_attr("id", "1"))
                .with_child(Node::new("nvPr").with_child(ph)),
        )
    }

    fn part(name: &str, shapes: Vec<Node>) -> Node {
        let tree = shapes
            .into_iter()
            .fold(Node::new("spTree"), |tree, s| tree.with_child(s));
        Node::new(name).with_child(Node::new("cSld").with_child(tree))
    }

    #[test]
    fn test_idx_prefers_layout_idx_and_master_type() {
        let layout = part(
            "sldLayout",
            vec![ph_shape(Some("1"), Some("body")), ph_shape(None, Some("title"))],
        );
        let master = part(
            "sldMaster",
            vec![ph_shape(Some("1"), Some("body")), ph_shape(None, Some("title"))],
        );
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).layout(&layout).master(&master).build();

        let shape = ph_shape(Some("1"), None);
        let m = ctx.placeholders(&shape);
        assert!(m.layout.is_some());
        assert!(m.master.is_some());
        assert_eq!(m.ph_type, Some("body"));
    }

    #[test]
    fn test_type_only_match() {
        let layout = part("sldLayout", vec![ph_shape(None, Some("title"))]);
        let master = part("sldMaster", vec![ph_shape(None, Some("title"))]);
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).layout(&layout).master(&master).build();

        let shape = ph_shape(None, Some("title"));
        let m = ctx.placeholders(&shape);
        assert!(m.layout.is_some() && m.master.is_some());
        assert_eq!(m.ph_type, Some("title"));

        let plain = Node::new("sp");
        let m = ctx.placeholders(&plain);
        assert!(m.layout.is_none() && m.master.is_none() && m.ph_type.is_none());
    }

    #[test]
    fn test_prebuilt_index_is_used() {
        let layout = part("sldLayout", vec![ph_shape(Some("7"), None)]);
        let index = PlaceholderIndex::build(&layout);
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).layout_index(&index).build();
        let shape = ph_shape(Some("7"), None);
        assert!(ctx.placeholders(&shape).layout.is_some());
        assert_eq!(ctx.placeholders(&shape).ph_type, Some("obj"));
    }

    #[test]
    fn test_local_and_default_options() {
        let slide = Node::new("sld");
        let options = ResolveOptions {
            dpi: 72,
            ..ResolveOptions::default()
        };
        let local = StyleContext::builder(&slide).options(&options).build();
        assert_eq!(local.options().dpi, 72);

        let fallback = StyleContext::builder(&slide).build();
        assert!(std::ptr::eq(fallback.options(), ResolveOptions::global_default()));
    }

    #[test]
    fn test_master_text_style_selection() {
        let master = Node::new("sldMaster").with_child(
            Node::new("txStyles")
                .with_child(Node::new("titleStyle"))
                .with_child(Node::new("bodyStyle"))
                .with_child(Node::new("otherStyle")),
        );
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).master(&master).build();
        assert!(ctx.master_text_style(Some("ctrTitle")).unwrap().is("titleStyle"));
        assert!(ctx.master_text_style(Some("subTitle")).unwrap().is("bodyStyle"));
        assert!(ctx.master_text_style(Some("sldNum")).unwrap().is("otherStyle"));
        assert!(ctx.master_text_style(None).unwrap().is("otherStyle"));
    }
}
