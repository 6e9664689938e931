//! Table cell styling.
//!
//! A cell's look is layered from the table style's region blocks (whole
//! table, bands, first/last row and column, corner cells) in fixed
//! precedence, then overridden by the cell's own `a:tcPr`. Which regions
//! apply depends on the cell's grid position and the table's `tblPr`
//! options.

pub mod grid;
pub mod look;
pub mod style;

pub use grid::{GridCell, TableGrid};
pub use look::TableLook;
pub use style::{Region, find_style, regions_for};

use crate::border::{Border, BorderResolver};
use crate::color::{ColorSpec, ColorTransformPipeline};
use crate::common::Color;
use crate::context::StyleContext;
use crate::context::theme::{FontCollection, FontScript};
use crate::fill::{Fill, FillResolver};
use crate::tree::Node;
use serde::Serialize;

/// Resolved edges of one cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CellBorders {
    pub left: Border,
    pub right: Border,
    pub top: Border,
    pub bottom: Border,
    /// Top-left to bottom-right diagonal
    pub diagonal_down: Border,
    /// Bottom-left to top-right diagonal
    pub diagonal_up: Border,
}

/// Vertical placement of text in a cell (`tcPr anchor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CellAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Effective style of one table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellStyle {
    pub fill: Fill,
    pub borders: CellBorders,
    pub text_color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub font: Option<String>,
    pub anchor: CellAnchor,
    /// Applied regions, lowest precedence first
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Resolves cell styles against the context's table style catalog.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleCascade<'c, 'a> {
    ctx: &'c StyleContext<'a>,
    fills: FillResolver<'c, 'a>,
    borders: BorderResolver<'c, 'a>,
}

impl<'c, 'a> TableStyleCascade<'c, 'a> {
    pub fn new(ctx: &'c StyleContext<'a>) -> Self {
        Self {
            ctx,
            fills: FillResolver::new(ctx),
            borders: BorderResolver::new(ctx),
        }
    }

    /// The `tblStyle` a table uses: embedded in `tblPr`, else looked up by
    /// `tableStyleId` in the catalog.
    pub fn table_style<'n>(&self, tbl: &'n Node) -> Option<&'n Node>
    where
        'a: 'n,
    {
        let tbl_pr = tbl.child("tblPr")?;
        if let Some(embedded) = tbl_pr.child("tableStyle") {
            return Some(embedded);
        }
        let id = tbl_pr.child("tableStyleId").map(|n| n.text().trim())?;
        let found = self.ctx.table_styles().and_then(|catalog| find_style(catalog, id));
        if found.is_none() {
            tracing::debug!(style_id = id, "unknown table style id");
        }
        found
    }

    /// Region blocks that apply to `cell`, highest precedence first.
    pub fn blocks<'n>(&self, tbl: &'n Node, grid: &TableGrid<'n>, cell: GridCell) -> Vec<(Region, &'n Node)>
    where
        'a: 'n,
    {
        let Some(style) = self.table_style(tbl) else {
            return Vec::new();
        };
        let look = TableLook::of_table(tbl);
        regions_for(cell, grid.rows(), grid.cols(), look)
            .into_iter()
            .rev()
            .filter_map(|region| style.child(region.element()).map(|block| (region, block)))
            .collect()
    }

    /// `tcTxStyle` blocks that apply to `tc`, highest precedence first.
    pub fn text_styles<'n>(&self, tbl: &'n Node, tc: &'n Node) -> Vec<&'n Node>
    where
        'a: 'n,
    {
        let grid = TableGrid::build(tbl);
        let Some(cell) = grid.position(tc) else {
            return Vec::new();
        };
        self.blocks(tbl, &grid, cell)
            .into_iter()
            .filter_map(|(_, block)| block.child("tcTxStyle"))
            .collect()
    }

    /// Resolve the style of `tc`, a cell of `tbl`.
    pub fn resolve<'n>(&self, tbl: &'n Node, tc: &'n Node) -> CellStyle
    where
        'a: 'n,
    {
        let grid = TableGrid::build(tbl);
        self.resolve_in(tbl, &grid, tc)
    }

    /// Like [`resolve`](Self::resolve) with a grid built once per table.
    pub fn resolve_in<'n>(&self, tbl: &'n Node, grid: &TableGrid<'n>, tc: &'n Node) -> CellStyle
    where
        'a: 'n,
    {
        let cell = grid.position(tc).unwrap_or(GridCell {
            row: 0,
            col: 0,
            row_span: 1,
            col_span: 1,
            covered: false,
        });
        let blocks = self.blocks(tbl, grid, cell);
        let tc_pr = tc.child("tcPr");
        let text_blocks: Vec<&Node> = blocks.iter().filter_map(|(_, b)| b.child("tcTxStyle")).collect();
        let pipeline = self.fills.pipeline();

        let fill = tc_pr
            .and_then(|p| self.fills.from_properties(p, None, 0.0))
            .or_else(|| blocks.iter().find_map(|(_, block)| self.block_fill(block)))
            .unwrap_or(Fill::None);

        let own_line = |styled: Border, direct: &str| -> Border {
            match tc_pr.and_then(|p| p.child(direct)) {
                Some(ln) => self.borders.overlay_line(ln, &styled),
                None => styled,
            }
        };
        let edge = |edge: Edge, direct: &str| -> Border {
            let styled = blocks
                .iter()
                .map(|&(region, block)| {
                    let name = edge_name(region, edge, cell, grid.rows(), grid.cols());
                    self.block_edge(block, name)
                })
                .find(|b| !b.is_unspecified())
                .unwrap_or_default();
            own_line(styled, direct)
        };
        let diagonal = |direct: &str, styled: &str| -> Border {
            let styled = blocks
                .iter()
                .map(|(_, block)| self.block_edge(block, styled))
                .find(|b| !b.is_unspecified())
                .unwrap_or_default();
            own_line(styled, direct)
        };
        let borders = CellBorders {
            left: edge(Edge::Left, "lnL"),
            right: edge(Edge::Right, "lnR"),
            top: edge(Edge::Top, "lnT"),
            bottom: edge(Edge::Bottom, "lnB"),
            diagonal_down: diagonal("lnTlToBr", "tl2br"),
            diagonal_up: diagonal("lnBlToTr", "tr2bl"),
        };

        let anchor = match tc_pr.and_then(|p| p.attr("anchor")) {
            Some("ctr") => CellAnchor::Middle,
            Some("b") => CellAnchor::Bottom,
            _ => CellAnchor::Top,
        };

        CellStyle {
            fill,
            borders,
            text_color: text_blocks
                .iter()
                .find_map(|tx| text_color_spec(tx))
                .and_then(|spec| pipeline.resolve(&spec)),
            bold: text_blocks.iter().find_map(|tx| tx.attr_bool("b")),
            italic: text_blocks.iter().find_map(|tx| tx.attr_bool("i")),
            font: text_blocks.iter().find_map(|tx| text_font(self.ctx, tx)),
            anchor,
            regions: blocks.iter().rev().map(|(region, _)| *region).collect(),
        }
    }

    fn block_fill(&self, block: &Node) -> Option<Fill> {
        let tc_style = block.child("tcStyle")?;
        if let Some(fill) = tc_style.child("fill") {
            return self.fills.from_properties(fill, None, 0.0);
        }
        self.fills.from_fill_reference(tc_style.child("fillRef")?)
    }

    fn block_edge(&self, block: &Node, name: &str) -> Border {
        let Some(side) = block.path(&["tcStyle", "tcBdr", name]) else {
            return Border::Unspecified;
        };
        if let Some(ln) = side.child("ln") {
            return self.borders.resolve_line(ln);
        }
        match side.child("lnRef") {
            Some(ln_ref) => self.borders.resolve_line_ref(ln_ref),
            None => Border::Unspecified,
        }
    }
}

/// Border element of `region` that draws `edge` of `cell`: the region's
/// outer edge where the cell touches the region boundary, else the inside
/// line.
fn edge_name(region: Region, edge: Edge, cell: GridCell, rows: usize, cols: usize) -> &'static str {
    use Region::*;
    let spans_rows = matches!(region, WholeTable | FirstCol | LastCol | Band1V | Band2V);
    let spans_cols = matches!(region, WholeTable | FirstRow | LastRow | Band1H | Band2H);
    match edge {
        Edge::Left if !spans_cols || cell.col == 0 => "left",
        Edge::Right if !spans_cols || cell.col + cell.col_span >= cols => "right",
        Edge::Left | Edge::Right => "insideV",
        Edge::Top if !spans_rows || cell.row == 0 => "top",
        Edge::Bottom if !spans_rows || cell.row + cell.row_span >= rows => "bottom",
        Edge::Top | Edge::Bottom => "insideH",
    }
}

/// Text color of a `tcTxStyle`: its own color element, else the color of
/// its `fontRef`.
pub(crate) fn text_color_spec(tx_style: &Node) -> Option<ColorSpec> {
    ColorSpec::from_container(tx_style).or_else(|| tx_style.child("fontRef").and_then(ColorSpec::from_container))
}

/// Latin typeface of a `tcTxStyle`: `font/latin`, else the theme font its
/// `fontRef` names.
pub(crate) fn text_font(ctx: &StyleContext<'_>, tx_style: &Node) -> Option<String> {
    if let Some(face) = tx_style.path(&["font", "latin"]).and_then(|l| l.attr("typeface")) {
        return ctx.resolve_typeface(face);
    }
    font_reference(ctx, tx_style.child("fontRef")?)
}

/// Theme font named by a `fontRef idx` (`major`/`minor`).
pub(crate) fn font_reference(ctx: &StyleContext<'_>, font_ref: &Node) -> Option<String> {
    let collection = match font_ref.attr("idx")? {
        "major" => FontCollection::Major,
        "minor" => FontCollection::Minor,
        _ => return None,
    };
    ctx.theme_font(collection, FontScript::Latin).map(str::to_string)
}

/// Resolve a `tcTxStyle` color without a full cell cascade.
pub(crate) fn text_color(pipeline: ColorTransformPipeline<'_, '_>, tx_style: &Node) -> Option<Color> {
    pipeline.resolve(&text_color_spec(tx_style)?)
}
