//! Scheme color lookup (`a:schemeClr`).

use super::spec::ColorSpec;
use crate::context::{ColorMap, StyleContext};

/// The placeholder color slot.
pub const PLACEHOLDER_SLOT: &str = "phClr";

/// Maps a symbolic scheme slot to the theme's concrete color specification.
#[derive(Debug, Clone, Copy)]
pub struct SchemeColorResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
}

impl<'c, 'a> SchemeColorResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolve `slot` to the theme's color specification.
    ///
    /// `phClr` yields `placeholder` as is. Roles (`tx1`, `bg1`, ...) go through
    /// `color_map`, or the context's effective map when `None`. Unknown slots
    /// yield `None`.
    pub fn resolve(&self, slot: &str, color_map: Option<&ColorMap>, placeholder: Option<&ColorSpec>) -> Option<ColorSpec> {
        if slot == PLACEHOLDER_SLOT {
            if placeholder.is_none() {
                tracing::trace!("phClr used without a placeholder color");
            }
            return placeholder.cloned();
        }

        let map = color_map.unwrap_or_else(|| self.ctx.color_map());
        let physical = map.remap(slot);
        let Some(entry) = self.ctx.theme_color_slot(physical) else {
            tracing::debug!(slot, physical, "scheme color slot not found in theme");
            return None;
        };
        ColorSpec::from_container(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorKind;
    use crate::common::RGBColor;
    use crate::tree::Node;

    fn theme() -> Node {
        Node::new("theme").with_child(
            Node::new("themeElements").with_child(
                Node::new("clrScheme")
                    .with_child(
                        Node::new("dk1").with_child(
                            Node::new("sysClr").with_attr("val", "windowText").with_attr("lastClr", "000000"),
                        ),
                    )
                    .with_child(Node::new("lt1").with_child(Node::new("srgbClr").with_attr("val", "FFFFFF")))
                    .with_child(Node::new("accent1").with_child(Node::new("srgbClr").with_attr("val", "4F81BD"))),
            ),
        )
    }

    #[test]
    fn test_role_is_remapped() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let resolver = SchemeColorResolver::new(&ctx);

        let tx1 = resolver.resolve("tx1", None, None).unwrap();
        assert!(matches!(tx1.kind, ColorKind::System { .. }));

        let mut inverted = ColorMap::default();
        inverted.overlay(&Node::new("clrMap").with_attr("tx1", "lt1"));
        let tx1 = resolver.resolve("tx1", Some(&inverted), None).unwrap();
        assert_eq!(tx1.kind, ColorKind::Rgb(RGBColor::WHITE));
    }

    #[test]
    fn test_placeholder_and_unknown() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let resolver = SchemeColorResolver::new(&ctx);

        let ph = ColorSpec::scheme("accent1");
        assert_eq!(resolver.resolve("phClr", None, Some(&ph)), Some(ph));
        assert_eq!(resolver.resolve("phClr", None, None), None);
        assert_eq!(resolver.resolve("accent6", None, None), None);
    }
}
