//! Style inheritance for shapes, paragraphs and runs.
//!
//! Every facet is looked up through the same ordered chain of
//! [`CascadeLevel`]s:
//!
//! 1. the node's own `pPr`/`rPr`
//! 2. the shape's `txBody/lstStyle` entry for the paragraph level
//! 3. the shape's `p:style` references
//! 4. table style text properties when the text sits in a table cell
//! 5. the matched layout placeholder
//! 6. the matched master placeholder
//! 7. the master `txStyles` block for the placeholder type
//! 8. the presentation `defaultTextStyle`
//! 9. the theme `objectDefaults`
//!
//! and ends in the [`ResolveOptions`](crate::ResolveOptions) fallback. Paragraph levels are
//! 0-based in `pPr lvl` and 1-based in list style entries (`lvl1pPr`).
//!
//! # Examples
//!
//! ```rust
//! use drawingml_style::cascade::{HorizontalAlignment, StyleCascadeResolver};
//! use drawingml_style::{Node, StyleContext};
//!
//! let slide = Node::new("sld");
//! let ctx = StyleContext::builder(&slide).build();
//! let run = Node::new("r");
//!
//! let style = StyleCascadeResolver::new(&ctx).resolve(&run, &[]);
//! assert_eq!(style.font.size_pt, 18.0);
//! assert_eq!(style.alignment, HorizontalAlignment::Inherit);
//! ```

pub mod body;
pub mod level;
pub mod paragraph;
pub mod text;

pub use body::{ResolvedParagraph, ResolvedRun, TextBodyResolver};
pub use level::{CascadeLevel, LevelSource, cascade_lookup, list_level_name};
pub use paragraph::{HorizontalAlignment, Indent, Spacing, SpacingValue, VerticalAlignment};
pub use text::{Caps, FontStyle, Strike};

use crate::border::{Border, BorderResolver};
use crate::bullet::{BulletResolver, BulletSpec, CounterTable};
use crate::common::Color;
use crate::common::unit::{percentage_to_fraction, spacing_percent};
use crate::context::index::SHAPE_KINDS;
use crate::context::{PlaceholderMatch, StyleContext};
use crate::fill::{Fill, FillResolver};
use crate::table::{CellAnchor, CellStyle, TableStyleCascade};
use crate::tree::Node;
use serde::Serialize;

/// Elements resolved as runs.
pub(crate) const RUN_ELEMENTS: [&str; 3] = ["r", "fld", "br"];

/// The effective style of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStyle {
    /// 0-based paragraph level the text facets were looked up at
    pub level: usize,
    pub font: FontStyle,
    pub color: Color,
    pub highlight: Option<Color>,
    /// Fill of the enclosing shape, or of the table cell
    pub fill: Fill,
    /// Outline of the enclosing shape
    pub border: Border,
    pub text_outline: Border,
    pub alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub spacing: Spacing,
    pub indent: Indent,
    /// Only resolved for paragraphs
    pub bullet: BulletSpec,
    /// Present when the node sits in a table cell
    pub cell: Option<CellStyle>,
}

/// The elements around a node that the cascade reads from.
#[derive(Debug, Clone, Default)]
struct Scope<'n> {
    run: Option<&'n Node>,
    paragraph: Option<&'n Node>,
    body: Option<&'n Node>,
    shape: Option<&'n Node>,
    /// Ancestors of `shape`, outermost first
    shape_ancestors: Vec<&'n Node>,
    cell: Option<&'n Node>,
    table: Option<&'n Node>,
    level: usize,
}

impl<'n> Scope<'n> {
    fn locate(node: &'n Node, ancestors: &[&'n Node]) -> Self {
        let mut path: Vec<&'n Node> = ancestors.to_vec();
        path.push(node);

        let nearest = |pred: fn(&Node) -> bool| path.iter().rposition(|n| pred(n));
        let shape_pos = nearest(|n| SHAPE_KINDS.contains(&n.name()));
        let paragraph = nearest(|n| n.is("p")).map(|i| path[i]);

        let level = paragraph
            .and_then(|p| p.child("pPr"))
            .and_then(|p| p.attr_i64("lvl"))
            .map(|l| l.clamp(0, 8) as usize)
            .unwrap_or(0);

        Self {
            run: RUN_ELEMENTS.contains(&node.name()).then_some(node),
            paragraph,
            body: nearest(|n| n.is("txBody")).map(|i| path[i]),
            shape: shape_pos.map(|i| path[i]),
            shape_ancestors: shape_pos.map(|i| path[..i].to_vec()).unwrap_or_default(),
            cell: nearest(|n| n.is("tc")).map(|i| path[i]),
            table: nearest(|n| n.is("tbl")).map(|i| path[i]),
            level,
        }
    }

    /// `bodyPr` of the enclosing text body, or of the shape's own when the
    /// node is the shape itself.
    fn body_properties(&self) -> Option<&'n Node> {
        match self.body {
            Some(body) => body.child("bodyPr"),
            None => self.shape?.path(&["txBody", "bodyPr"]),
        }
    }
}

/// Resolves [`ResolvedStyle`]s against one slide context.
#[derive(Debug, Clone, Copy)]
pub struct StyleCascadeResolver<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    fills: FillResolver<'c, 'a>,
    borders: BorderResolver<'c, 'a>,
    bullets: BulletResolver<'c, 'a>,
    tables: TableStyleCascade<'c, 'a>,
}

impl<'c, 'a> StyleCascadeResolver<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            fills: FillResolver::new(ctx),
            borders: BorderResolver::new(ctx),
            bullets: BulletResolver::new(ctx),
            tables: TableStyleCascade::new(ctx),
        }
    }

    pub fn context(&self) -> &'c StyleContext<'a> {
        self.ctx
    }

    /// Resolve `node` (a shape, paragraph, run or table cell).
    ///
    /// `ancestors` runs from the outermost element down to the direct parent.
    /// A paragraph's auto number is counted in a fresh [`CounterTable`]; use
    /// [`TextBodyResolver`] to number a whole text body.
    pub fn resolve<'n>(&self, node: &'n Node, ancestors: &[&'n Node]) -> ResolvedStyle
    where
        'a: 'n,
    {
        self.resolve_with(node, ancestors, &mut CounterTable::new())
    }

    /// Like [`resolve`](Self::resolve), numbering paragraphs in `counters`.
    pub fn resolve_with<'n>(&self, node: &'n Node, ancestors: &[&'n Node], counters: &mut CounterTable) -> ResolvedStyle
    where
        'a: 'n,
    {
        let scope = Scope::locate(node, ancestors);
        let placeholders = scope.shape.map(|s| self.ctx.placeholders(s)).unwrap_or_default();
        let levels = self.levels(&scope, &placeholders);

        let autofit = scope.body_properties().and_then(|b| b.child("normAutofit"));
        let font_scale = autofit
            .and_then(|a| a.attr_f64("fontScale"))
            .map(percentage_to_fraction);
        let line_reduction = autofit
            .and_then(|a| a.attr_i64("lnSpcReduction"))
            .map(spacing_percent);
        let is_title = matches!(placeholders.ph_type, Some("title" | "ctrTitle"));
        let is_hyperlink = scope
            .run
            .and_then(|r| r.child("rPr"))
            .is_some_and(|r| r.child("hlinkClick").is_some());

        let cell = match (scope.table, scope.cell) {
            (Some(tbl), Some(tc)) => Some(self.tables.resolve(tbl, tc)),
            _ => None,
        };

        let bullet = match scope.paragraph {
            Some(p) if std::ptr::eq(p, node) && has_text_runs(p) => {
                let chain: Vec<&Node> = levels.iter().filter_map(|l| l.ppr).collect();
                self.bullets.resolve(&chain, scope.level, counters)
            },
            // Empty paragraphs show no bullet and do not advance numbering.
            _ => BulletSpec::default(),
        };

        ResolvedStyle {
            level: scope.level,
            font: text::font(self.ctx, &levels, is_title, font_scale),
            color: text::color(self.ctx, &levels, is_hyperlink),
            highlight: text::highlight(self.ctx, &levels),
            fill: match &cell {
                Some(cell) => cell.fill.clone(),
                None => self.shape_fill(&scope, &placeholders),
            },
            border: match &cell {
                Some(_) => Border::Unspecified,
                None => self.shape_border(&scope, &placeholders),
            },
            text_outline: text::outline(self.ctx, &levels),
            alignment: paragraph::alignment(&levels),
            vertical_alignment: match &cell {
                Some(cell) => match cell.anchor {
                    CellAnchor::Top => VerticalAlignment::Top,
                    CellAnchor::Middle => VerticalAlignment::Middle,
                    CellAnchor::Bottom => VerticalAlignment::Bottom,
                },
                None => self.vertical_alignment(&scope, &placeholders),
            },
            spacing: paragraph::spacing(&levels, line_reduction),
            indent: paragraph::indent(&levels, self.ctx.options().dpi),
            bullet,
            cell,
        }
    }

    /// The cascade chain for a located node, nearest level first. Levels
    /// with nothing to contribute are left out.
    fn levels<'n>(&self, scope: &Scope<'n>, placeholders: &PlaceholderMatch<'n>) -> Vec<CascadeLevel<'n>>
    where
        'a: 'n,
    {
        let entry_name = list_level_name(scope.level);
        let entry = |list: Option<&'n Node>| list.and_then(|l| l.child(&entry_name));
        let list_style_of = |shape: &'n Node| shape.path(&["txBody", "lstStyle"]);

        let direct_ppr = scope.paragraph.and_then(|p| p.child("pPr"));
        let direct_rpr = match scope.run {
            Some(run) => run.child("rPr"),
            None => direct_ppr.and_then(|p| p.child("defRPr")),
        };

        let mut levels = vec![
            CascadeLevel {
                ppr: direct_ppr,
                rpr: direct_rpr,
                ..CascadeLevel::new(LevelSource::Direct)
            },
            CascadeLevel::list_entry(
                LevelSource::ListStyle,
                entry(scope.body.and_then(|b| b.child("lstStyle"))),
            ),
            CascadeLevel {
                style_ref: scope.shape.and_then(|s| s.child("style")),
                ..CascadeLevel::new(LevelSource::StyleReference)
            },
        ];

        if let (Some(tbl), Some(tc)) = (scope.table, scope.cell) {
            levels.extend(self.tables.text_styles(tbl, tc).into_iter().map(|tx| CascadeLevel {
                cell_text: Some(tx),
                ..CascadeLevel::new(LevelSource::TableCell)
            }));
        }

        for (source, placeholder) in [
            (LevelSource::Layout, placeholders.layout),
            (LevelSource::Master, placeholders.master),
        ] {
            if let Some(ph) = placeholder {
                levels.push(CascadeLevel {
                    style_ref: ph.child("style"),
                    ..CascadeLevel::list_entry(source, entry(list_style_of(ph)))
                });
            }
        }

        levels.push(CascadeLevel::list_entry(
            LevelSource::MasterTextStyle,
            entry(self.ctx.master_text_style(placeholders.ph_type)),
        ));
        levels.push(CascadeLevel::list_entry(
            LevelSource::PresentationDefault,
            entry(self.ctx.default_text_style()),
        ));
        levels.push(CascadeLevel::list_entry(LevelSource::Theme, entry(self.ctx.theme_list_style())));

        levels.retain(|l| !l.is_empty());
        levels
    }

    fn shape_fill(&self, scope: &Scope<'_>, placeholders: &PlaceholderMatch<'_>) -> Fill {
        let Some(shape) = scope.shape else {
            return Fill::None;
        };
        self.fills
            .resolve_declared(shape, &scope.shape_ancestors)
            .or_else(|| placeholders.layout.and_then(|ph| self.fills.resolve_declared(ph, &[])))
            .or_else(|| placeholders.master.and_then(|ph| self.fills.resolve_declared(ph, &[])))
            .unwrap_or(Fill::None)
    }

    fn shape_border(&self, scope: &Scope<'_>, placeholders: &PlaceholderMatch<'_>) -> Border {
        let Some(shape) = scope.shape else {
            return Border::Unspecified;
        };
        [Some(shape), placeholders.layout, placeholders.master]
            .into_iter()
            .flatten()
            .map(|s| self.borders.resolve(s, false))
            .find(|b| !b.is_unspecified())
            .unwrap_or_default()
    }

    fn vertical_alignment(&self, scope: &Scope<'_>, placeholders: &PlaceholderMatch<'_>) -> VerticalAlignment {
        let bodies: Vec<&Node> = [
            scope.body_properties(),
            placeholders.layout.and_then(|ph| ph.path(&["txBody", "bodyPr"])),
            placeholders.master.and_then(|ph| ph.path(&["txBody", "bodyPr"])),
        ]
        .into_iter()
        .flatten()
        .collect();
        paragraph::vertical_alignment(&bodies)
    }
}

/// Whether a paragraph holds any text-bearing run.
fn has_text_runs(paragraph: &Node) -> bool {
    paragraph.children().iter().any(|c| c.is("r") || c.is("fld"))
}
