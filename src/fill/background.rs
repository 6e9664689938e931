//! Slide background (`p:cSld/p:bg`).

use super::{BACKGROUND_GRADIENT_AXIS_OFFSET, Fill, FillResolver};
use crate::color::ColorSpec;
use crate::context::StyleContext;
use crate::context::theme::BACKGROUND_FILL_INDEX_BASE;
use crate::tree::Node;

/// Resolves the effective background of a slide: the slide's own `bg`, else
/// the layout's, else the master's.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    fills: FillResolver<'c, 'a>,
}

impl<'c, 'a> BackgroundResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            fills: FillResolver::new(ctx),
        }
    }

    pub fn resolve(&self) -> Fill {
        let parts = [Some(self.ctx.slide()), self.ctx.layout(), self.ctx.master()];
        parts
            .into_iter()
            .flatten()
            .find_map(|part| self.part_background(part))
            .unwrap_or(Fill::None)
    }

    /// Background declared by one part, if any.
    pub fn part_background(&self, part: &Node) -> Option<Fill> {
        let bg = part.path(&["cSld", "bg"])?;
        if let Some(props) = bg.child("bgPr") {
            return self.fills.from_properties(props, None, BACKGROUND_GRADIENT_AXIS_OFFSET);
        }

        let bg_ref = bg.child("bgRef")?;
        let idx = bg_ref.attr_i64("idx")?;
        if idx == 0 || idx == BACKGROUND_FILL_INDEX_BASE {
            return Some(Fill::None);
        }
        let placeholder = ColorSpec::from_container(bg_ref);
        let style = self.ctx.fill_style(idx)?;
        self.fills
            .from_element(style, placeholder.as_ref(), BACKGROUND_GRADIENT_AXIS_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Color, RGBColor};
    use crate::tree::Node;

    fn with_bg(name: &str, bg: Node) -> Node {
        Node::new(name).with_child(Node::new("cSld").with_child(bg))
    }

    fn theme() -> Node {
        Node::new("theme").with_child(
            Node::new("themeElements")
                .with_child(
                    Node::new("clrScheme")
                        .with_child(Node::new("lt1").with_child(Node::new("srgbClr").with_attr("val", "FFFFFF")))
                        .with_child(Node::new("dk2").with_child(Node::new("srgbClr").with_attr("val", "1F497D"))),
                )
                .with_child(
                    Node::new("fmtScheme").with_child(
                        Node::new("bgFillStyleLst")
                            .with_child(Node::new("solidFill").with_child(Node::new("schemeClr").with_attr("val", "phClr")))
                            .with_child(
                                Node::new("gradFill")
                                    .with_child(
                                        Node::new("gsLst").with_child(
                                            Node::new("gs")
                                                .with_attr("pos", "0")
                                                .with_child(Node::new("schemeClr").with_attr("val", "phClr")),
                                        ),
                                    )
                                    .with_child(Node::new("lin").with_attr("ang", "0")),
                            ),
                    ),
                ),
        )
    }

    #[test]
    fn test_master_bg_ref_with_placeholder() {
        let theme = theme();
        let master = with_bg(
            "sldMaster",
            Node::new("bg").with_child(
                Node::new("bgRef")
                    .with_attr("idx", "1001")
                    .with_child(Node::new("schemeClr").with_attr("val", "bg1")),
            ),
        );
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).master(&master).theme(&theme).build();
        assert_eq!(BackgroundResolver::new(&ctx).resolve(), Fill::Solid(Color::opaque(RGBColor::WHITE)));
    }

    #[test]
    fn test_slide_overrides_layout_and_uses_background_axis() {
        let theme = theme();
        let layout = with_bg(
            "sldLayout",
            Node::new("bg").with_child(
                Node::new("bgRef")
                    .with_attr("idx", "1002")
                    .with_child(Node::new("schemeClr").with_attr("val", "tx2")),
            ),
        );
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).layout(&layout).theme(&theme).build();
        let Fill::Gradient(g) = BackgroundResolver::new(&ctx).resolve() else {
            panic!("expected gradient");
        };
        assert_eq!(g.angle, 90.0);
        assert_eq!(g.stops[0].color.rgb, RGBColor::new(0x1F, 0x49, 0x7D));

        let own = with_bg(
            "sld",
            Node::new("bg").with_child(Node::new("bgPr").with_child(Node::new("noFill"))),
        );
        let ctx = StyleContext::builder(&own).layout(&layout).theme(&theme).build();
        assert_eq!(BackgroundResolver::new(&ctx).resolve(), Fill::None);
    }
}
