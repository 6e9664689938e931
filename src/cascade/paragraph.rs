//! Paragraph-level facets: alignment, spacing and indentation.

use super::level::{CascadeLevel, lookup_ppr};
use crate::common::unit::{centipoints_to_pt, emu_to_px_f64, spacing_percent};
use crate::tree::Node;
use serde::Serialize;

/// Horizontal alignment (`pPr algn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HorizontalAlignment {
    /// Nothing declared; the renderer keeps its own default
    #[default]
    Inherit,
    Left,
    Center,
    Right,
    Justify,
    Distributed,
}

impl HorizontalAlignment {
    fn parse(val: &str) -> Option<Self> {
        Some(match val {
            "l" => Self::Left,
            "ctr" => Self::Center,
            "r" => Self::Right,
            "just" | "justLow" => Self::Justify,
            "dist" | "thaiDist" => Self::Distributed,
            other => {
                tracing::debug!(value = other, "unknown paragraph alignment");
                return None;
            },
        })
    }
}

/// Vertical anchoring of text in its box (`bodyPr anchor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VerticalAlignment {
    #[default]
    Inherit,
    Top,
    Middle,
    Bottom,
}

/// A spacing amount: absolute points or percent of the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SpacingValue {
    Points(f64),
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Spacing {
    pub before: Option<SpacingValue>,
    pub after: Option<SpacingValue>,
    pub line: Option<SpacingValue>,
}

/// Paragraph indentation in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Indent {
    pub margin_left_px: Option<f64>,
    /// First-line offset relative to the margin; negative for hanging indents
    pub first_line_px: Option<f64>,
}

pub fn alignment(levels: &[CascadeLevel<'_>]) -> HorizontalAlignment {
    lookup_ppr(levels, |p| p.attr("algn").and_then(HorizontalAlignment::parse)).unwrap_or_default()
}

/// Before, after and line spacing, each from the nearest level declaring it.
/// `line_reduction` is the body's `normAutofit lnSpcReduction` in percent.
pub fn spacing(levels: &[CascadeLevel<'_>], line_reduction: Option<f64>) -> Spacing {
    let line = lookup_ppr(levels, |p| spacing_value(p.child("lnSpc")?)).map(|line| match (line, line_reduction) {
        (SpacingValue::Percent(pct), Some(reduction)) => SpacingValue::Percent((pct - reduction).max(0.0)),
        (value, _) => value,
    });
    Spacing {
        before: lookup_ppr(levels, |p| spacing_value(p.child("spcBef")?)),
        after: lookup_ppr(levels, |p| spacing_value(p.child("spcAft")?)),
        line,
    }
}

fn spacing_value(container: &Node) -> Option<SpacingValue> {
    if let Some(pts) = container.child("spcPts") {
        return pts.attr_i64("val").map(|v| SpacingValue::Points(centipoints_to_pt(v)));
    }
    container
        .child("spcPct")?
        .attr_i64("val")
        .map(|v| SpacingValue::Percent(spacing_percent(v)))
}

pub fn indent(levels: &[CascadeLevel<'_>], dpi: u32) -> Indent {
    Indent {
        margin_left_px: lookup_ppr(levels, |p| p.attr_i64("marL")).map(|emu| emu_to_px_f64(emu, dpi)),
        first_line_px: lookup_ppr(levels, |p| p.attr_i64("indent")).map(|emu| emu_to_px_f64(emu, dpi)),
    }
}

/// Anchor from the first `bodyPr` that declares one.
pub fn vertical_alignment(bodies: &[&Node]) -> VerticalAlignment {
    bodies
        .iter()
        .find_map(|body| match body.attr("anchor")? {
            "t" => Some(VerticalAlignment::Top),
            "ctr" => Some(VerticalAlignment::Middle),
            "b" => Some(VerticalAlignment::Bottom),
            // Justified and distributed anchors fill the box from the top.
            "just" | "dist" => Some(VerticalAlignment::Top),
            _ => None,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::level::LevelSource;

    #[test]
    fn test_nothing_declared_inherits() {
        assert_eq!(alignment(&[]), HorizontalAlignment::Inherit);
        assert_eq!(spacing(&[], None), Spacing::default());
        assert_eq!(indent(&[], 96), Indent::default());
        assert_eq!(vertical_alignment(&[]), VerticalAlignment::Inherit);
    }

    #[test]
    fn test_spacing_facets_come_from_different_levels() {
        let own = Node::new("pPr")
            .with_attr("algn", "bogus")
            .with_child(Node::new("spcBef").with_child(Node::new("spcPts").with_attr("val", "600")));
        let master = Node::new("lvl1pPr")
            .with_attr("algn", "ctr")
            .with_attr("marL", "342900")
            .with_attr("indent", "-342900")
            .with_child(Node::new("lnSpc").with_child(Node::new("spcPct").with_attr("val", "90000")))
            .with_child(Node::new("spcBef").with_child(Node::new("spcPct").with_attr("val", "20000")));
        let levels = [
            CascadeLevel::list_entry(LevelSource::Direct, Some(&own)),
            CascadeLevel::list_entry(LevelSource::MasterTextStyle, Some(&master)),
        ];

        assert_eq!(alignment(&levels), HorizontalAlignment::Center);
        let spacing = spacing(&levels, Some(10.0));
        assert_eq!(spacing.before, Some(SpacingValue::Points(6.0)));
        assert_eq!(spacing.line, Some(SpacingValue::Percent(80.0)));
        assert_eq!(spacing.after, None);

        let indent = indent(&levels, 96);
        assert_eq!(indent.margin_left_px, Some(36.0));
        assert_eq!(indent.first_line_px, Some(-36.0));
    }

    #[test]
    fn test_anchor_from_first_declaring_body() {
        let own = Node::new("bodyPr");
        let layout = Node::new("bodyPr").with_attr("anchor", "ctr");
        let master = Node::new("bodyPr").with_attr("anchor", "b");
        assert_eq!(vertical_alignment(&[&own, &layout, &master]), VerticalAlignment::Middle);
    }
}
