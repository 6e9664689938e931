//! Line and border resolution (`a:ln`, `p:style/a:lnRef`).

use crate::color::ColorSpec;
use crate::common::Color;
use crate::common::unit::emu_to_pt_f64;
use crate::context::StyleContext;
use crate::fill::{Fill, FillResolver, properties_of};
use crate::tree::Node;
use serde::Serialize;

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    LargeDash,
    DashDot,
    LargeDashDot,
    LargeDashDotDot,
    SystemDash,
    SystemDot,
    SystemDashDot,
    SystemDashDotDot,
    /// Compound lines (`cmpd`)
    Double,
    ThickThin,
    ThinThick,
    Triple,
}

impl DashStyle {
    /// Parse a `prstDash val`.
    pub fn from_preset(val: &str) -> Option<Self> {
        Some(match val {
            "solid" => Self::Solid,
            "dot" => Self::Dot,
            "dash" => Self::Dash,
            "lgDash" => Self::LargeDash,
            "dashDot" => Self::DashDot,
            "lgDashDot" => Self::LargeDashDot,
            "lgDashDotDot" => Self::LargeDashDotDot,
            "sysDash" => Self::SystemDash,
            "sysDot" => Self::SystemDot,
            "sysDashDot" => Self::SystemDashDot,
            "sysDashDotDot" => Self::SystemDashDotDot,
            _ => return None,
        })
    }

    /// Parse a `cmpd` attribute. Single lines yield `None`.
    pub fn from_compound(val: &str) -> Option<Self> {
        match val {
            "dbl" => Some(Self::Double),
            "thickThin" => Some(Self::ThickThin),
            "thinThick" => Some(Self::ThinThick),
            "tri" => Some(Self::Triple),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineCap {
    #[default]
    Flat,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
    Miter,
}

/// Line end decoration (`headEnd`/`tailEnd type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ArrowKind {
    #[default]
    None,
    Triangle,
    Stealth,
    Diamond,
    Oval,
    Arrow,
}

impl ArrowKind {
    fn parse(val: &str) -> Self {
        match val {
            "triangle" => Self::Triangle,
            "stealth" => Self::Stealth,
            "diamond" => Self::Diamond,
            "oval" => Self::Oval,
            "arrow" => Self::Arrow,
            _ => Self::None,
        }
    }
}

/// A visible line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub width_pt: f64,
    pub dash: DashStyle,
    pub color: Option<Color>,
    pub cap: LineCap,
    pub join: LineJoin,
    pub head: ArrowKind,
    pub tail: ArrowKind,
}

/// Result of border resolution.
///
/// `Hidden` is an explicit "no line" and stops any further cascading;
/// `Unspecified` means nothing was declared.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum Border {
    #[default]
    Unspecified,
    Hidden,
    Line(Line),
}

impl Border {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Border::Unspecified)
    }

    pub fn line(&self) -> Option<&Line> {
        match self {
            Border::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Resolves shape outlines, text outlines and table cell edges.
#[derive(Debug, Clone, Copy)]
pub struct BorderResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    fills: FillResolver<'c, 'a>,
}

impl<'c, 'a> BorderResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            fills: FillResolver::new(ctx),
        }
    }

    /// Resolve the border of `node`.
    ///
    /// Shape borders read `spPr/ln` and fall back to the theme line style
    /// referenced by `p:style/a:lnRef`. Text borders read `rPr/ln` only.
    pub fn resolve(&self, node: &Node, is_text_border: bool) -> Border {
        if is_text_border {
            let ln = text_line(node);
            return match ln {
                Some(ln) => self.from_lines(Some(ln), None, None),
                None => Border::Unspecified,
            };
        }

        let direct = if node.is("ln") {
            Some(node)
        } else {
            properties_of(node).and_then(|p| p.child("ln"))
        };
        let line_ref = node.path(&["style", "lnRef"]);
        let idx = line_ref.and_then(|r| r.attr_i64("idx"));

        if direct.is_none() {
            match idx {
                None => return Border::Unspecified,
                Some(0) => return Border::Hidden,
                Some(_) => {},
            }
        }

        let themed = idx.filter(|&i| i > 0).and_then(|i| {
            let style = self.ctx.line_style(i);
            if style.is_none() {
                tracing::debug!(idx = i, "lnRef index outside the theme line list");
            }
            style
        });
        let placeholder = line_ref.and_then(ColorSpec::from_container);
        self.from_lines(direct, themed, placeholder.as_ref())
    }

    /// Resolve a bare line element (`ln`, `lnL`, `lnT`, ...), as used by
    /// table cell edges.
    pub fn resolve_line(&self, ln: &Node) -> Border {
        self.from_lines(Some(ln), None, None)
    }

    /// Resolve a bare `lnRef` (table style borders): `idx` 0 hides the edge,
    /// the color child stands in for `phClr`.
    pub fn resolve_line_ref(&self, ln_ref: &Node) -> Border {
        let Some(idx) = ln_ref.attr_i64("idx") else {
            return Border::Unspecified;
        };
        if idx == 0 {
            return Border::Hidden;
        }
        let Some(style) = self.ctx.line_style(idx) else {
            tracing::debug!(idx, "lnRef index outside the theme line list");
            return Border::Unspecified;
        };
        let placeholder = ColorSpec::from_container(ln_ref);
        self.from_lines(None, Some(style), placeholder.as_ref())
    }

    /// Lay the cell's own edge `ln` over an inherited edge. Facets the own
    /// line declares win; a line without a fill keeps the inherited color.
    pub fn overlay_line(&self, ln: &Node, base: &Border) -> Border {
        match self.resolve_line(ln) {
            Border::Unspecified => match base {
                Border::Line(line) => {
                    let own = LineFacets::declared([Some(ln), None]);
                    Border::Line(Line {
                        width_pt: own.width_pt.unwrap_or(line.width_pt),
                        dash: own.dash.unwrap_or(line.dash),
                        color: line.color,
                        cap: own.cap.unwrap_or(line.cap),
                        join: own.join.unwrap_or(line.join),
                        head: own.head.unwrap_or(line.head),
                        tail: own.tail.unwrap_or(line.tail),
                    })
                },
                other => other.clone(),
            },
            own => own,
        }
    }

    /// Merge a direct line with a theme line, facet by facet.
    ///
    /// Only `noFill` hides a line. A line whose color resolves nowhere is
    /// left unspecified so the caller keeps cascading.
    fn from_lines(&self, direct: Option<&Node>, themed: Option<&Node>, placeholder: Option<&ColorSpec>) -> Border {
        let lines = [direct, themed];

        // The first line that declares a fill decides the color.
        let fill = first_facet(lines, |ln| self.fills.from_properties(ln, placeholder, 0.0));
        if matches!(fill, Some(Fill::None)) {
            return Border::Hidden;
        }
        let color = fill
            .as_ref()
            .and_then(Fill::primary_color)
            .or_else(|| placeholder.and_then(|p| self.fills.pipeline().resolve(p)));
        let Some(color) = color else {
            return Border::Unspecified;
        };

        let facets = LineFacets::declared(lines);
        Border::Line(Line {
            width_pt: facets
                .width_pt
                .unwrap_or(self.ctx.options().default_border_width_pt),
            dash: facets.dash.unwrap_or_default(),
            color: Some(color),
            cap: facets.cap.unwrap_or_default(),
            join: facets.join.unwrap_or_default(),
            head: facets.head.unwrap_or_default(),
            tail: facets.tail.unwrap_or_default(),
        })
    }
}

/// Line facets as declared, nearest line first.
#[derive(Debug, Default)]
struct LineFacets {
    width_pt: Option<f64>,
    dash: Option<DashStyle>,
    cap: Option<LineCap>,
    join: Option<LineJoin>,
    head: Option<ArrowKind>,
    tail: Option<ArrowKind>,
}

impl LineFacets {
    fn declared(lines: [Option<&Node>; 2]) -> Self {
        let width_pt = first_facet(lines, |ln| {
            let w = ln.attr_i64("w")?;
            if w < 0 {
                tracing::debug!(w, "ignoring negative line width");
                return None;
            }
            Some(emu_to_pt_f64(w))
        });

        let dash = first_facet(lines, |ln| {
            ln.child("prstDash")
                .and_then(|d| d.attr("val"))
                .map(|v| {
                    DashStyle::from_preset(v).unwrap_or_else(|| {
                        tracing::debug!(value = v, "unknown dash preset, using solid");
                        DashStyle::Solid
                    })
                })
                .or_else(|| ln.attr("cmpd").and_then(DashStyle::from_compound))
        });

        let cap = first_facet(lines, |ln| {
            ln.attr("cap").map(|c| match c {
                "rnd" => LineCap::Round,
                "sq" => LineCap::Square,
                _ => LineCap::Flat,
            })
        });

        let join = first_facet(lines, |ln| {
            ln.first_child_of(&["round", "bevel", "miter"]).map(|j| match j.name() {
                "bevel" => LineJoin::Bevel,
                "miter" => LineJoin::Miter,
                _ => LineJoin::Round,
            })
        });

        let arrow = |end: &str| first_facet(lines, |ln| ln.child(end).and_then(|e| e.attr("type")).map(ArrowKind::parse));

        Self {
            width_pt,
            dash,
            cap,
            join,
            head: arrow("headEnd"),
            tail: arrow("tailEnd"),
        }
    }
}

fn first_facet<T>(lines: [Option<&Node>; 2], read: impl Fn(&Node) -> Option<T>) -> Option<T> {
    lines.into_iter().flatten().find_map(read)
}

/// `ln` of a run, its `rPr`, or the element itself.
fn text_line(node: &Node) -> Option<&Node> {
    if node.is("ln") {
        return Some(node);
    }
    if let Some(ln) = node.child("ln") {
        return Some(ln);
    }
    node.path(&["rPr", "ln"])
}
