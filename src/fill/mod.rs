//! Fill resolution for shapes, groups, table cells and backgrounds.
//!
//! A node's fill comes from the first of: a direct fill element in its
//! properties (`spPr`, `grpSpPr`, `bgPr`, `tcPr`), then the theme fill style
//! its `p:style/a:fillRef` points at. `grpFill` defers to the nearest group
//! ancestor.

pub mod background;
pub mod gradient;
pub mod pattern;

pub use background::BackgroundResolver;
pub use gradient::{
    BACKGROUND_GRADIENT_AXIS_OFFSET, GradientEngine, GradientFill, GradientKind, GradientStop, PathShape,
    SHAPE_GRADIENT_AXIS_OFFSET,
};
pub use pattern::{GradientLayer, LayerShape, LayerStop, PatternFillEngine, PatternType, TiledPatternDescriptor};

use crate::color::{ColorSpec, ColorTransformPipeline};
use crate::common::unit::percentage_to_fraction;
use crate::common::{Color, RGBColor};
use crate::context::StyleContext;
use crate::context::theme::BACKGROUND_FILL_INDEX_BASE;
use crate::tree::Node;
use bytes::Bytes;
use serde::Serialize;

/// Fill elements, in the order DrawingML allows them.
pub const FILL_ELEMENTS: [&str; 6] = ["noFill", "solidFill", "gradFill", "blipFill", "pattFill", "grpFill"];

/// Property containers that may hold a fill element.
const PROPERTY_ELEMENTS: [&str; 5] = ["spPr", "grpSpPr", "bgPr", "tcPr", "ln"];

/// A resolved pattern fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternFill {
    pub preset: String,
    pub fg: Color,
    pub bg: Color,
}

impl PatternFill {
    /// Tile recipe for this pattern.
    pub fn tiles(&self) -> TiledPatternDescriptor {
        PatternFillEngine::build(&self.preset, self.fg, self.bg)
    }
}

/// How a picture fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PictureMode {
    Stretch,
    Tile,
}

/// A picture fill. The bytes are carried, never decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureFill {
    pub rel_id: String,
    #[serde(skip)]
    pub data: Option<Bytes>,
    pub mode: PictureMode,
    /// `alphaModFix amt` as a fraction, `1.0` when absent
    pub opacity: f64,
}

/// A resolved fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Fill {
    None,
    Solid(Color),
    Gradient(GradientFill),
    Pattern(PatternFill),
    Picture(PictureFill),
    /// `grpFill` with no group ancestor to inherit from
    GroupInherited,
}

impl Fill {
    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }

    /// A single representative color: the solid color, the first gradient
    /// stop, or the pattern foreground.
    pub fn primary_color(&self) -> Option<Color> {
        match self {
            Fill::Solid(c) => Some(*c),
            Fill::Gradient(g) => g.stops.first().map(|s| s.color),
            Fill::Pattern(p) => Some(p.fg),
            _ => None,
        }
    }
}

/// Properties element of a node: the node itself when it already is one.
pub fn properties_of(node: &Node) -> Option<&Node> {
    if PROPERTY_ELEMENTS.contains(&node.name()) {
        return Some(node);
    }
    node.first_child_of(&PROPERTY_ELEMENTS[..4])
}

/// Resolves [`Fill`]s against one slide context.
#[derive(Debug, Clone, Copy)]
pub struct FillResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    pipeline: ColorTransformPipeline<'c, 'a>,
}

impl<'c, 'a> FillResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            pipeline: ColorTransformPipeline::new(ctx),
        }
    }

    pub fn pipeline(&self) -> ColorTransformPipeline<'c, 'a> {
        self.pipeline
    }

    /// Resolve the fill of `node`.
    ///
    /// `ancestors` runs from the outermost element down to the direct parent;
    /// it is only consulted for `grpFill`. Nothing found yields [`Fill::None`].
    pub fn resolve(&self, node: &Node, ancestors: &[&Node]) -> Fill {
        self.resolve_at(node, ancestors, 0).unwrap_or(Fill::None)
    }

    /// Like [`resolve`](Self::resolve), but `None` when the node declares no
    /// fill at all, so callers can keep cascading.
    pub fn resolve_declared(&self, node: &Node, ancestors: &[&Node]) -> Option<Fill> {
        self.resolve_at(node, ancestors, 0)
    }

    fn resolve_at(&self, node: &Node, ancestors: &[&Node], depth: usize) -> Option<Fill> {
        if depth > self.ctx.options().max_recursion_depth {
            tracing::debug!(depth, "group fill recursion cap reached");
            return None;
        }

        let direct = properties_of(node).and_then(|props| self.from_properties(props, None, SHAPE_GRADIENT_AXIS_OFFSET));
        let fill = match direct {
            Some(fill) => fill,
            None => self.from_style_reference(node)?,
        };

        if fill != Fill::GroupInherited {
            return Some(fill);
        }
        match ancestors.iter().rposition(|a| a.is("grpSp")) {
            Some(pos) => self
                .resolve_at(ancestors[pos], &ancestors[..pos], depth + 1)
                .or(Some(Fill::GroupInherited)),
            None => Some(Fill::GroupInherited),
        }
    }

    /// Fill declared by the first fill element inside a properties node.
    pub fn from_properties(&self, props: &Node, placeholder: Option<&ColorSpec>, axis_offset: f64) -> Option<Fill> {
        let element = props.first_child_of(&FILL_ELEMENTS)?;
        self.from_element(element, placeholder, axis_offset)
    }

    /// `p:style/a:fillRef`: index into the theme fill matrix, its color child
    /// standing in for `phClr`.
    pub fn from_style_reference(&self, node: &Node) -> Option<Fill> {
        self.from_fill_reference(node.path(&["style", "fillRef"])?)
    }

    /// A bare `fillRef`, as found in shape styles and table styles.
    pub fn from_fill_reference(&self, fill_ref: &Node) -> Option<Fill> {
        let idx = fill_ref.attr_i64("idx")?;
        if idx == 0 || idx == BACKGROUND_FILL_INDEX_BASE {
            return Some(Fill::None);
        }
        let placeholder = ColorSpec::from_container(fill_ref);
        let Some(style) = self.ctx.fill_style(idx) else {
            tracing::debug!(idx, "fillRef index outside the theme fill list");
            return None;
        };
        self.from_element(style, placeholder.as_ref(), SHAPE_GRADIENT_AXIS_OFFSET)
    }

    /// Convert one fill element. A solid fill whose color cannot be resolved
    /// counts as undeclared.
    pub fn from_element(&self, element: &Node, placeholder: Option<&ColorSpec>, axis_offset: f64) -> Option<Fill> {
        match element.name() {
            "noFill" => Some(Fill::None),
            "solidFill" => self.pipeline.resolve_node(element, placeholder).map(Fill::Solid),
            "gradFill" => GradientEngine::new(self.pipeline)
                .build(element, placeholder, axis_offset)
                .map(Fill::Gradient),
            "pattFill" => Some(Fill::Pattern(self.pattern(element, placeholder))),
            "blipFill" => self.picture(element).map(Fill::Picture),
            "grpFill" => Some(Fill::GroupInherited),
            other => {
                tracing::trace!(element = other, "not a fill element");
                None
            },
        }
    }

    fn pattern(&self, element: &Node, placeholder: Option<&ColorSpec>) -> PatternFill {
        let color = |slot: &str, fallback: RGBColor| {
            element
                .child(slot)
                .and_then(|c| self.pipeline.resolve_node(c, placeholder))
                .unwrap_or(Color::opaque(fallback))
        };
        PatternFill {
            preset: element.attr("prst").unwrap_or("pct5").to_string(),
            fg: color("fgClr", RGBColor::BLACK),
            bg: color("bgClr", RGBColor::WHITE),
        }
    }

    fn picture(&self, element: &Node) -> Option<PictureFill> {
        let blip = element.child("blip")?;
        let rel_id = blip.attr("embed").or_else(|| blip.attr("link"))?;
        let opacity = blip
            .child("alphaModFix")
            .and_then(|a| a.attr_f64("amt"))
            .map(|amt| percentage_to_fraction(amt).clamp(0.0, 1.0))
            .unwrap_or(1.0);
        let mode = if element.child("tile").is_some() {
            PictureMode::Tile
        } else {
            PictureMode::Stretch
        };
        Some(PictureFill {
            rel_id: rel_id.to_string(),
            data: self.ctx.assets().asset(rel_id),
            mode,
            opacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn theme() -> Node {
        Node::new("theme").with_child(
            Node::new("themeElements")
                .with_child(
                    Node::new("clrScheme")
                        .with_child(Node::new("accent1").with_child(Node::new("srgbClr").with_attr("val", "4F81BD"))),
                )
                .with_child(
                    Node::new("fmtScheme")
                        .with_child(
                            Node::new("fillStyleLst")
                                .with_child(
                                    Node::new("solidFill")
                                        .with_child(Node::new("schemeClr").with_attr("val", "phClr")),
                                )
                                .with_child(
                                    Node::new("solidFill").with_child(
                                        Node::new("schemeClr")
                                            .with_attr("val", "phClr")
                                            .with_child(Node::new("shade").with_attr("val", "0")),
                                    ),
                                ),
                        )
                        .with_child(
                            Node::new("bgFillStyleLst")
                                .with_child(Node::new("solidFill").with_child(Node::new("srgbClr").with_attr("val", "FFFFFF"))),
                        ),
                ),
        )
    }

    fn styled_shape(idx: &str) -> Node {
        Node::new("sp").with_child(Node::new("spPr")).with_child(
            Node::new("style").with_child(
                Node::new("fillRef")
                    .with_attr("idx", idx)
                    .with_child(Node::new("schemeClr").with_attr("val", "accent1")),
            ),
        )
    }

    #[test]
    fn test_direct_fill_wins() {
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let sp = Node::new("sp").with_child(
            Node::new("spPr").with_child(Node::new("solidFill").with_child(Node::new("srgbClr").with_attr("val", "FF0000"))),
        );
        assert_eq!(FillResolver::new(&ctx).resolve(&sp, &[]), Fill::Solid(Color::opaque(RGBColor::new(255, 0, 0))));

        let hidden = Node::new("sp").with_child(Node::new("spPr").with_child(Node::new("noFill")));
        assert_eq!(FillResolver::new(&ctx).resolve(&hidden, &[]), Fill::None);
    }

    #[test]
    fn test_fill_ref_uses_placeholder_color() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let resolver = FillResolver::new(&ctx);

        let fill = resolver.resolve(&styled_shape("1"), &[]);
        assert_eq!(fill, Fill::Solid(Color::opaque(RGBColor::new(0x4F, 0x81, 0xBD))));
        let fill = resolver.resolve(&styled_shape("2"), &[]);
        assert_eq!(fill, Fill::Solid(Color::opaque(RGBColor::BLACK)));
        let fill = resolver.resolve(&styled_shape("1001"), &[]);
        assert_eq!(fill, Fill::Solid(Color::opaque(RGBColor::WHITE)));
        assert_eq!(resolver.resolve(&styled_shape("0"), &[]), Fill::None);
        assert_eq!(resolver.resolve(&styled_shape("1000"), &[]), Fill::None);
    }

    #[test]
    fn test_group_fill_recurses_to_group() {
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let group = Node::new("grpSp").with_child(
            Node::new("grpSpPr").with_child(Node::new("solidFill").with_child(Node::new("prstClr").with_attr("val", "red"))),
        );
        let inner = Node::new("grpSp").with_child(Node::new("grpSpPr").with_child(Node::new("grpFill")));
        let sp = Node::new("sp").with_child(Node::new("spPr").with_child(Node::new("grpFill")));

        let resolver = FillResolver::new(&ctx);
        let fill = resolver.resolve(&sp, &[&group, &inner]);
        assert_eq!(fill, Fill::Solid(Color::opaque(RGBColor::new(255, 0, 0))));
        assert_eq!(resolver.resolve(&sp, &[]), Fill::GroupInherited);
    }

    #[test]
    fn test_pattern_and_picture() {
        let slide = Node::new("sld");
        let mut assets = HashMap::new();
        assets.insert("rId3".to_string(), Bytes::from_static(b"\x89PNG"));
        let ctx = StyleContext::builder(&slide).assets(&assets).build();
        let resolver = FillResolver::new(&ctx);

        let patt = Node::new("spPr").with_child(
            Node::new("pattFill")
                .with_attr("prst", "dkUpDiag")
                .with_child(Node::new("fgClr").with_child(Node::new("srgbClr").with_attr("val", "00FF00"))),
        );
        let Fill::Pattern(p) = resolver.resolve(&patt, &[]) else {
            panic!("expected a pattern");
        };
        assert_eq!(p.fg.rgb, RGBColor::new(0, 255, 0));
        assert_eq!(p.bg.rgb, RGBColor::WHITE);
        assert!(!p.tiles().is_empty());

        let pic = Node::new("spPr").with_child(
            Node::new("blipFill")
                .with_child(
                    Node::new("blip")
                        .with_attr("r:embed", "rId3")
                        .with_child(Node::new("alphaModFix").with_attr("amt", "50000")),
                )
                .with_child(Node::new("tile")),
        );
        let Fill::Picture(p) = resolver.resolve(&pic, &[]) else {
            panic!("expected a picture");
        };
        assert_eq!(p.mode, PictureMode::Tile);
        assert_eq!(p.opacity, 0.5);
        assert_eq!(p.data.as_deref(), Some(&b"\x89PNG"[..]));
    }

    #[test]
    fn test_group_recursion_is_capped() {
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let group = Node::new("grpSp").with_child(Node::new("grpSpPr").with_child(Node::new("grpFill")));
        let chain: Vec<&Node> = std::iter::repeat_n(&group, 64).collect();
        let sp = Node::new("sp").with_child(Node::new("spPr").with_child(Node::new("grpFill")));
        assert_eq!(FillResolver::new(&ctx).resolve(&sp, &chain), Fill::GroupInherited);
    }
}
