//! Bullets and paragraph numbering.
//!
//! A bullet is assembled from four facets, each cascading on its own through
//! the paragraph-properties chain of a paragraph: the kind (`buNone`,
//! `buChar`, `buAutoNum`, `buBlip`), the font, the color and the size. The
//! chain is ordered from the paragraph's own `pPr` down to the presentation
//! default; the first node declaring a facet wins.
//!
//! # Examples
//!
//! ```rust
//! use drawingml_style::bullet::{BulletKind, BulletResolver, CounterTable};
//! use drawingml_style::{Node, StyleContext};
//!
//! let slide = Node::new("sld");
//! let ctx = StyleContext::builder(&slide).build();
//! let ppr = Node::new("pPr").with_child(Node::new("buAutoNum").with_attr("type", "romanUcPeriod"));
//!
//! let mut counters = CounterTable::new();
//! let resolver = BulletResolver::new(&ctx);
//! resolver.resolve(&[&ppr], 0, &mut counters);
//! let second = resolver.resolve(&[&ppr], 0, &mut counters);
//! assert!(matches!(second.kind, BulletKind::AutoNumber { ref text, .. } if text == "II. "));
//! ```

pub mod counter;
pub mod dingbat;
pub mod numbering;

pub use counter::CounterTable;
pub use dingbat::{is_symbol_font, map_symbol};
pub use numbering::{Affix, NumberFormat, Numeral, format_number};

use crate::color::ColorTransformPipeline;
use crate::common::Color;
use crate::common::unit::centipoints_to_pt;
use crate::context::StyleContext;
use crate::tree::Node;
use bytes::Bytes;
use serde::Serialize;

/// Elements that decide whether and what kind of bullet a paragraph has.
const KIND_ELEMENTS: [&str; 4] = ["buNone", "buChar", "buAutoNum", "buBlip"];

const DEFAULT_SCHEME: &str = "arabicPeriod";

/// What is drawn in front of a paragraph.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum BulletKind {
    #[default]
    None,
    Character {
        ch: char,
        /// Bullet font; `None` follows the text font
        font: Option<String>,
    },
    AutoNumber {
        scheme: String,
        level: usize,
        number: u32,
        text: String,
    },
    Picture {
        rel_id: String,
        #[serde(skip)]
        data: Option<Bytes>,
    },
}

/// Bullet size relative to the text or in absolute points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BulletSize {
    Percent(f64),
    Points(f64),
}

/// A resolved bullet. `color` and `size` of `None` follow the first run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BulletSpec {
    pub kind: BulletKind,
    pub color: Option<Color>,
    pub size: Option<BulletSize>,
}

impl BulletSpec {
    pub fn is_none(&self) -> bool {
        matches!(self.kind, BulletKind::None)
    }
}

/// Resolves bullets against one slide context.
#[derive(Debug, Clone, Copy)]
pub struct BulletResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    pipeline: ColorTransformPipeline<'c, 'a>,
}

impl<'c, 'a> BulletResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            pipeline: ColorTransformPipeline::new(ctx),
        }
    }

    /// Resolve the bullet of a paragraph at 0-based `level`.
    ///
    /// `chain` holds paragraph-properties nodes (`pPr`, `lvlNpPr`), nearest
    /// first. Auto numbers advance `counters`.
    pub fn resolve(&self, chain: &[&Node], level: usize, counters: &mut CounterTable) -> BulletSpec {
        let Some(kind) = declared(chain, &KIND_ELEMENTS) else {
            return BulletSpec::default();
        };

        let kind = match kind.name() {
            "buChar" => self.character(kind, chain),
            "buAutoNum" => auto_number(kind, level, counters),
            "buBlip" => self.picture(kind),
            _ => BulletKind::None,
        };
        if kind == BulletKind::None {
            return BulletSpec::default();
        }

        BulletSpec {
            kind,
            color: self.color(chain),
            size: size(chain),
        }
    }

    fn character(&self, bu_char: &Node, chain: &[&Node]) -> BulletKind {
        let Some(raw) = bu_char.attr("char").and_then(|c| c.chars().next()) else {
            tracing::debug!("buChar without a character");
            return BulletKind::None;
        };
        let font = declared(chain, &["buFont", "buFontTx"])
            .filter(|f| f.is("buFont"))
            .and_then(|f| f.attr("typeface"))
            .and_then(|t| self.ctx.resolve_typeface(t));
        let ch = match &font {
            Some(face) => map_symbol(face, raw),
            None => raw,
        };
        BulletKind::Character { ch, font }
    }

    fn picture(&self, bu_blip: &Node) -> BulletKind {
        let Some(rel_id) = bu_blip
            .child("blip")
            .and_then(|b| b.attr("embed").or_else(|| b.attr("link")))
        else {
            tracing::debug!("buBlip without a relationship id");
            return BulletKind::None;
        };
        BulletKind::Picture {
            rel_id: rel_id.to_string(),
            data: self.ctx.assets().asset(rel_id),
        }
    }

    fn color(&self, chain: &[&Node]) -> Option<Color> {
        let element = declared(chain, &["buClr", "buClrTx"])?;
        if element.is("buClrTx") {
            return None;
        }
        self.pipeline.resolve_node(element, None)
    }
}

fn auto_number(bu_auto_num: &Node, level: usize, counters: &mut CounterTable) -> BulletKind {
    let scheme = bu_auto_num.attr("type").unwrap_or(DEFAULT_SCHEME);
    let start_at = bu_auto_num
        .attr_i64("startAt")
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(1);
    let number = counters.next(scheme, level, start_at);
    BulletKind::AutoNumber {
        scheme: scheme.to_string(),
        level,
        number,
        text: format_number(scheme, number),
    }
}

fn size(chain: &[&Node]) -> Option<BulletSize> {
    let element = declared(chain, &["buSzPct", "buSzPts", "buSzTx"])?;
    match element.name() {
        "buSzPct" => element.attr_f64("val").map(|v| BulletSize::Percent(v / 1000.0)),
        "buSzPts" => element.attr_i64("val").map(|v| BulletSize::Points(centipoints_to_pt(v))),
        _ => None,
    }
}

/// First element among `names` in the nearest chain node that has one.
fn declared<'n>(chain: &[&'n Node], names: &[&str]) -> Option<&'n Node> {
    chain.iter().find_map(|ppr| ppr.first_child_of(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use std::collections::HashMap;

    fn ctx_parts() -> (Node, Node) {
        let slide = Node::new("sld");
        let theme = Node::new("theme").with_child(
            Node::new("themeElements")
                .with_child(
                    Node::new("clrScheme")
                        .with_child(Node::new("accent2").with_child(Node::new("srgbClr").with_attr("val", "C0504D"))),
                )
                .with_child(
                    Node::new("fontScheme")
                        .with_child(Node::new("minorFont").with_child(Node::new("latin").with_attr("typeface", "Calibri"))),
                ),
        );
        (slide, theme)
    }

    fn auto_num(scheme: &str) -> Node {
        Node::new("pPr").with_child(Node::new("buAutoNum").with_attr("type", scheme))
    }

    #[test]
    fn test_three_numbered_paragraphs_then_new_body() {
        let (slide, _) = ctx_parts();
        let ctx = StyleContext::builder(&slide).build();
        let resolver = BulletResolver::new(&ctx);
        let ppr = auto_num("arabicPeriod");
        let mut counters = CounterTable::new();

        let texts: Vec<String> = (0..3)
            .map(|_| match resolver.resolve(&[&ppr], 0, &mut counters).kind {
                BulletKind::AutoNumber { text, .. } => text,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(texts, ["1. ", "2. ", "3. "]);

        counters.reset();
        let first = resolver.resolve(&[&ppr], 0, &mut counters);
        assert!(matches!(first.kind, BulletKind::AutoNumber { number: 1, .. }));
    }

    #[test]
    fn test_facets_cascade_independently() {
        let (slide, theme) = ctx_parts();
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let resolver = BulletResolver::new(&ctx);

        let own = Node::new("pPr").with_child(Node::new("buSzPct").with_attr("val", "75000"));
        let list = Node::new("lvl1pPr")
            .with_child(Node::new("buClr").with_child(Node::new("schemeClr").with_attr("val", "accent2")))
            .with_child(Node::new("buFont").with_attr("typeface", "Wingdings"))
            .with_child(Node::new("buChar").with_attr("char", "§"));
        let master = Node::new("lvl1pPr")
            .with_child(Node::new("buFont").with_attr("typeface", "Arial"))
            .with_child(Node::new("buSzPts").with_attr("val", "1400"));

        let bullet = resolver.resolve(&[&own, &list, &master], 0, &mut CounterTable::new());
        assert_eq!(
            bullet.kind,
            BulletKind::Character {
                ch: '■',
                font: Some("Wingdings".to_string())
            }
        );
        assert_eq!(bullet.color.map(|c| c.rgb), Some(RGBColor::new(0xC0, 0x50, 0x4D)));
        assert_eq!(bullet.size, Some(BulletSize::Percent(75.0)));
    }

    #[test]
    fn test_bu_none_stops_the_chain() {
        let (slide, _) = ctx_parts();
        let ctx = StyleContext::builder(&slide).build();
        let own = Node::new("pPr").with_child(Node::new("buNone"));
        let master = Node::new("lvl1pPr").with_child(Node::new("buChar").with_attr("char", "•"));
        let bullet = BulletResolver::new(&ctx).resolve(&[&own, &master], 0, &mut CounterTable::new());
        assert!(bullet.is_none());

        let bullet = BulletResolver::new(&ctx).resolve(&[&Node::new("pPr")], 0, &mut CounterTable::new());
        assert_eq!(bullet, BulletSpec::default());
    }

    #[test]
    fn test_theme_font_reference_and_text_tracking() {
        let (slide, theme) = ctx_parts();
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let ppr = Node::new("pPr")
            .with_child(Node::new("buClrTx"))
            .with_child(Node::new("buSzTx"))
            .with_child(Node::new("buFont").with_attr("typeface", "+mn-lt"))
            .with_child(Node::new("buChar").with_attr("char", "–"));
        let bullet = BulletResolver::new(&ctx).resolve(&[&ppr], 0, &mut CounterTable::new());
        assert_eq!(
            bullet.kind,
            BulletKind::Character {
                ch: '–',
                font: Some("Calibri".to_string())
            }
        );
        assert_eq!(bullet.color, None);
        assert_eq!(bullet.size, None);
    }

    #[test]
    fn test_start_at_and_levels() {
        let (slide, _) = ctx_parts();
        let ctx = StyleContext::builder(&slide).build();
        let resolver = BulletResolver::new(&ctx);
        let outer = Node::new("pPr").with_child(
            Node::new("buAutoNum")
                .with_attr("type", "alphaUcParenBoth")
                .with_attr("startAt", "3"),
        );
        let inner = auto_num("romanLcPeriod");
        let mut counters = CounterTable::new();

        let text = |b: BulletSpec| match b.kind {
            BulletKind::AutoNumber { text, .. } => text,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(text(resolver.resolve(&[&outer], 0, &mut counters)), "(C) ");
        assert_eq!(text(resolver.resolve(&[&inner], 1, &mut counters)), "i. ");
        assert_eq!(text(resolver.resolve(&[&inner], 1, &mut counters)), "ii. ");
        assert_eq!(text(resolver.resolve(&[&outer], 0, &mut counters)), "(D) ");
        assert_eq!(text(resolver.resolve(&[&inner], 1, &mut counters)), "i. ");
    }

    #[test]
    fn test_picture_bullet_reads_assets() {
        let (slide, _) = ctx_parts();
        let mut assets: HashMap<String, Bytes> = HashMap::new();
        assets.insert("rId4".to_string(), Bytes::from_static(b"\x89PNG"));
        let ctx = StyleContext::builder(&slide).assets(&assets).build();
        let ppr = Node::new("pPr").with_child(Node::new("buBlip").with_child(Node::new("blip").with_attr("embed", "rId4")));
        let bullet = BulletResolver::new(&ctx).resolve(&[&ppr], 0, &mut CounterTable::new());
        let BulletKind::Picture { rel_id, data } = bullet.kind else {
            panic!("expected a picture bullet");
        };
        assert_eq!(rel_id, "rId4");
        assert_eq!(data.as_deref(), Some(&b"\x89PNG"[..]));
    }
}
