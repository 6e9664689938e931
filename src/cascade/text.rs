//! Run-level facets: font and color.

use super::level::{CascadeLevel, LevelSource, cascade_lookup, lookup_rpr};
use crate::border::{Border, BorderResolver};
use crate::color::{ColorSpec, ColorTransformPipeline};
use crate::common::unit::{centipoints_to_pt, spacing_percent};
use crate::common::{Color, RGBColor};
use crate::context::StyleContext;
use crate::context::theme::{FontCollection, FontScript};
use crate::fill::{FILL_ELEMENTS, Fill, FillResolver};
use crate::table;
use crate::tree::Node;
use serde::Serialize;

/// Strike-through (`rPr strike`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Strike {
    #[default]
    None,
    Single,
    Double,
}

/// Capitalization (`rPr cap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Caps {
    #[default]
    None,
    Small,
    All,
}

/// Resolved font of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontStyle {
    /// Latin typeface with theme references (`+mn-lt`) resolved
    pub family: Option<String>,
    pub east_asian: Option<String>,
    pub size_pt: f64,
    pub bold: bool,
    pub italic: bool,
    /// Underline kind as written (`sng`, `dbl`, `wavy`, ...); `None` for no underline
    pub underline: Option<String>,
    pub strike: Strike,
    /// Vertical offset in percent of the font size; positive is superscript
    pub baseline: f64,
    pub caps: Caps,
}

/// Resolve the font facets. `title` selects the theme's major font as the
/// last resort; `font_scale` is the body's `normAutofit` factor.
pub fn font(ctx: &StyleContext<'_>, levels: &[CascadeLevel<'_>], title: bool, font_scale: Option<f64>) -> FontStyle {
    let collection = if title {
        FontCollection::Major
    } else {
        FontCollection::Minor
    };

    let family = cascade_lookup(levels, |level| {
        level
            .rpr
            .and_then(|r| r.child("latin"))
            .and_then(|l| l.attr("typeface"))
            .and_then(|t| ctx.resolve_typeface(t))
            .or_else(|| {
                level
                    .style_ref
                    .and_then(|s| s.child("fontRef"))
                    .and_then(|f| table::font_reference(ctx, f))
            })
            .or_else(|| level.cell_text.and_then(|t| table::text_font(ctx, t)))
    })
    .map(|(family, _)| family)
    .or_else(|| ctx.theme_font(collection, FontScript::Latin).map(str::to_string));

    let east_asian = lookup_rpr(levels, |r| r.child("ea")?.attr("typeface"))
        .and_then(|t| ctx.resolve_typeface(t))
        .or_else(|| ctx.theme_font(collection, FontScript::EastAsian).map(str::to_string));

    let size_pt = lookup_rpr(levels, |r| r.attr_i64("sz").filter(|&sz| sz > 0))
        .map(centipoints_to_pt)
        .unwrap_or(ctx.options().default_font_size_pt);
    let size_pt = match font_scale {
        Some(scale) if scale > 0.0 => size_pt * scale,
        _ => size_pt,
    };

    let flag = |attr: &str| {
        cascade_lookup(levels, |level| {
            level
                .rpr
                .and_then(|r| r.attr_bool(attr))
                .or_else(|| level.cell_text.and_then(|t| t.attr_bool(attr)))
        })
        .map(|(on, _)| on)
        .unwrap_or(false)
    };

    let underline = lookup_rpr(levels, |r| r.attr("u"))
        .filter(|u| *u != "none")
        .map(str::to_string);
    let strike = match lookup_rpr(levels, |r| r.attr("strike")) {
        Some("sngStrike") => Strike::Single,
        Some("dblStrike") => Strike::Double,
        _ => Strike::None,
    };
    let caps = match lookup_rpr(levels, |r| r.attr("cap")) {
        Some("small") => Caps::Small,
        Some("all") => Caps::All,
        _ => Caps::None,
    };
    let baseline = lookup_rpr(levels, |r| r.attr_i64("baseline"))
        .map(spacing_percent)
        .unwrap_or(0.0);

    FontStyle {
        family,
        east_asian,
        size_pt,
        bold: flag("b"),
        italic: flag("i"),
        underline,
        strike,
        baseline,
        caps,
    }
}

/// Resolve the text color.
///
/// A hyperlink run without a color of its own takes the theme `hlink`
/// color. Nothing found anywhere falls back to `tx1`, then to the
/// configured default.
pub fn color(ctx: &StyleContext<'_>, levels: &[CascadeLevel<'_>], is_hyperlink: bool) -> Color {
    let fills = FillResolver::new(ctx);
    let pipeline = fills.pipeline();

    if is_hyperlink {
        let own = levels
            .first()
            .filter(|l| l.source == LevelSource::Direct)
            .and_then(|l| l.rpr)
            .and_then(|r| r.first_child_of(&FILL_ELEMENTS));
        if own.is_none()
            && let Some(link) = pipeline.resolve(&ColorSpec::scheme("hlink"))
        {
            return link;
        }
    }

    cascade_lookup(levels, |level| {
        level
            .rpr
            .and_then(|r| run_fill_color(fills, r))
            .or_else(|| {
                level
                    .style_ref
                    .and_then(|s| s.child("fontRef"))
                    .and_then(|f| pipeline.resolve_node(f, None))
            })
            .or_else(|| level.cell_text.and_then(|t| table::text_color(pipeline, t)))
    })
    .map(|(color, _)| color)
    .or_else(|| fallback_color(pipeline))
    .unwrap_or_else(|| ctx.options().text_color())
}

/// Color of a run's fill element; `noFill` is fully transparent.
fn run_fill_color(fills: FillResolver<'_, '_>, rpr: &Node) -> Option<Color> {
    match fills.from_properties(rpr, None, 0.0)? {
        Fill::None => Some(Color::with_alpha(RGBColor::BLACK, 0.0)),
        fill => fill.primary_color(),
    }
}

fn fallback_color(pipeline: ColorTransformPipeline<'_, '_>) -> Option<Color> {
    let tx1 = pipeline.resolve(&ColorSpec::scheme("tx1"));
    if tx1.is_none() {
        tracing::trace!("theme has no tx1 color, using the configured text color");
    }
    tx1
}

/// Run highlight (`rPr/highlight`).
pub fn highlight(ctx: &StyleContext<'_>, levels: &[CascadeLevel<'_>]) -> Option<Color> {
    let pipeline = ColorTransformPipeline::new(ctx);
    lookup_rpr(levels, |r| pipeline.resolve_node(r.child("highlight")?, None))
}

/// Text outline (`rPr/ln`) from the nearest level that draws one.
pub fn outline(ctx: &StyleContext<'_>, levels: &[CascadeLevel<'_>]) -> Border {
    let borders = BorderResolver::new(ctx);
    lookup_rpr(levels, |r| {
        r.child("ln")?;
        Some(borders.resolve(r, true)).filter(|b| !b.is_unspecified())
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Node {
        Node::from_xml(
            r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
                 <a:themeElements>
                   <a:clrScheme name="t">
                     <a:dk1><a:srgbClr val="101010"/></a:dk1>
                     <a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
                     <a:hlink><a:srgbClr val="0000FF"/></a:hlink>
                   </a:clrScheme>
                   <a:fontScheme name="t">
                     <a:majorFont><a:latin typeface="Cambria"/><a:ea typeface=""/></a:majorFont>
                     <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface="MS Mincho"/></a:minorFont>
                   </a:fontScheme>
                 </a:themeElements>
               </a:theme>"#,
        )
        .unwrap()
    }

    #[test]
    fn test_font_facets_cascade_separately() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();

        // A malformed size is skipped; the list style size still applies.
        let rpr = Node::new("rPr")
            .with_attr("b", "1")
            .with_attr("u", "sng")
            .with_attr("sz", "abc")
            .with_attr("baseline", "up");
        let entry = Node::new("lvl1pPr").with_child(
            Node::new("defRPr")
                .with_attr("sz", "2400")
                .with_attr("b", "0")
                .with_attr("baseline", "30000")
                .with_child(Node::new("latin").with_attr("typeface", "+mj-lt")),
        );
        let levels = [
            CascadeLevel {
                rpr: Some(&rpr),
                ..CascadeLevel::new(LevelSource::Direct)
            },
            CascadeLevel::list_entry(LevelSource::ListStyle, Some(&entry)),
        ];

        let font = font(&ctx, &levels, false, Some(0.5));
        assert_eq!(font.family.as_deref(), Some("Cambria"));
        assert_eq!(font.east_asian.as_deref(), Some("MS Mincho"));
        assert_eq!(font.size_pt, 12.0);
        assert!(font.bold);
        assert!(!font.italic);
        assert_eq!(font.underline.as_deref(), Some("sng"));
        assert_eq!(font.baseline, 30.0);
    }

    #[test]
    fn test_font_falls_back_to_theme_and_options() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();
        let title = font(&ctx, &[], true, None);
        assert_eq!(title.family.as_deref(), Some("Cambria"));
        assert_eq!(title.east_asian, None);
        assert_eq!(title.size_pt, 18.0);
        assert_eq!(font(&ctx, &[], false, None).family.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_color_from_style_reference_and_fallbacks() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();

        let style = Node::new("style").with_child(
            Node::new("fontRef")
                .with_attr("idx", "minor")
                .with_child(Node::new("schemeClr").with_attr("val", "accent1")),
        );
        let levels = [CascadeLevel {
            style_ref: Some(&style),
            ..CascadeLevel::new(LevelSource::StyleReference)
        }];
        assert_eq!(color(&ctx, &levels, false).rgb, RGBColor::from_u32(0x4F81BD));
        assert_eq!(color(&ctx, &[], false).rgb, RGBColor::from_u32(0x101010));

        let bare = StyleContext::builder(&slide).build();
        assert_eq!(color(&bare, &[], false), Color::opaque(RGBColor::BLACK));
    }

    #[test]
    fn test_hyperlink_color_yields_to_direct_fill() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();

        let plain = Node::new("rPr").with_child(Node::new("hlinkClick"));
        let levels = [CascadeLevel {
            rpr: Some(&plain),
            ..CascadeLevel::new(LevelSource::Direct)
        }];
        assert_eq!(color(&ctx, &levels, true).rgb, RGBColor::from_u32(0x0000FF));

        let red = Node::new("rPr").with_child(Node::new("solidFill").with_child(Node::new("srgbClr").with_attr("val", "FF0000")));
        let levels = [CascadeLevel {
            rpr: Some(&red),
            ..CascadeLevel::new(LevelSource::Direct)
        }];
        assert_eq!(color(&ctx, &levels, true).rgb, RGBColor::from_u32(0xFF0000));
    }

    #[test]
    fn test_highlight_and_outline() {
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).build();
        let rpr = Node::new("rPr")
            .with_child(Node::new("highlight").with_child(Node::new("srgbClr").with_attr("val", "FFFF00")))
            .with_child(
                Node::new("ln")
                    .with_attr("w", "6350")
                    .with_child(Node::new("solidFill").with_child(Node::new("srgbClr").with_attr("val", "000000"))),
            );
        let levels = [CascadeLevel {
            rpr: Some(&rpr),
            ..CascadeLevel::new(LevelSource::Direct)
        }];
        assert_eq!(highlight(&ctx, &levels).map(|c| c.rgb), Some(RGBColor::from_u32(0xFFFF00)));
        assert_eq!(outline(&ctx, &levels).line().map(|l| l.width_pt), Some(0.5));
        assert!(outline(&ctx, &[]).is_unspecified());
    }
}
