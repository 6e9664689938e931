//! Grid positions of table cells.
//!
//! PresentationML writes one `a:tc` per grid slot: a merged area keeps its
//! covered slots as `tc` elements flagged `hMerge`/`vMerge`, and the origin
//! cell carries `gridSpan`/`rowSpan`.

use crate::common::unit::emu_to_px_f64;
use crate::tree::Node;
use serde::Serialize;

/// One cell slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    /// Hidden under another cell's span
    pub covered: bool,
}

/// Cell layout of one `a:tbl`.
#[derive(Debug, Clone)]
pub struct TableGrid<'n> {
    cells: Vec<(&'n Node, GridCell)>,
    rows: usize,
    cols: usize,
    column_widths: Vec<i64>,
}

impl<'n> TableGrid<'n> {
    pub fn build(tbl: &'n Node) -> Self {
        let column_widths: Vec<i64> = tbl
            .child("tblGrid")
            .map(|g| g.children_named("gridCol").map(|c| c.attr_i64("w").unwrap_or(0)).collect())
            .unwrap_or_default();

        let mut cells = Vec::new();
        // Areas covered by a span origin: (first col, width, last row).
        let mut spans: Vec<(usize, usize, usize)> = Vec::new();
        let mut rows = 0;
        let mut widest = 0;

        for (row, tr) in tbl.children_named("tr").enumerate() {
            rows = row + 1;
            let mut col = 0;
            for tc in tr.children_named("tc") {
                let row_span = span(tc, "rowSpan");
                let col_span = span(tc, "gridSpan");
                let flagged = tc.flag("hMerge") || tc.flag("vMerge");
                let spanned = spans
                    .iter()
                    .any(|&(start, width, last)| row <= last && (start..start + width).contains(&col));
                let covered = flagged || spanned;
                if !covered && (row_span > 1 || col_span > 1) {
                    spans.push((col, col_span, row + row_span - 1));
                }
                cells.push((
                    tc,
                    GridCell {
                        row,
                        col,
                        row_span: if covered { 1 } else { row_span },
                        col_span: if covered { 1 } else { col_span },
                        covered,
                    },
                ));
                col += 1;
            }
            widest = widest.max(col);
        }

        Self {
            cells,
            rows,
            cols: column_widths.len().max(widest),
            column_widths,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid slot of a `tc` element belonging to this table.
    pub fn position(&self, tc: &Node) -> Option<GridCell> {
        self.cells
            .iter()
            .find(|(node, _)| std::ptr::eq(*node, tc))
            .map(|(_, cell)| *cell)
    }

    /// The `tc` element at a grid slot.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&'n Node> {
        self.cells
            .iter()
            .find(|(_, cell)| cell.row == row && cell.col == col)
            .map(|(node, _)| *node)
    }

    /// Cells in document order.
    pub fn cells(&self) -> impl Iterator<Item = (&'n Node, GridCell)> + '_ {
        self.cells.iter().copied()
    }

    /// Column widths from `tblGrid` in pixels.
    pub fn column_widths_px(&self, dpi: u32) -> Vec<f64> {
        self.column_widths.iter().map(|&w| emu_to_px_f64(w, dpi)).collect()
    }
}

fn span(tc: &Node, attr: &str) -> usize {
    tc.attr_i64(attr)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tc() -> Node {
        Node::new("tc")
    }

    #[test]
    fn test_spans_and_merges() {
        let tbl = Node::new("tbl")
            .with_child(
                Node::new("tblGrid")
                    .with_child(Node::new("gridCol").with_attr("w", "914400"))
                    .with_child(Node::new("gridCol").with_attr("w", "914400"))
                    .with_child(Node::new("gridCol").with_attr("w", "457200")),
            )
            .with_child(
                Node::new("tr")
                    .with_child(tc().with_attr("gridSpan", "2").with_attr("rowSpan", "2"))
                    .with_child(tc().with_attr("hMerge", "1"))
                    .with_child(tc()),
            )
            .with_child(
                Node::new("tr")
                    .with_child(tc().with_attr("vMerge", "1"))
                    .with_child(tc())
                    .with_child(tc()),
            );
        let grid = TableGrid::build(&tbl);
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.column_widths_px(96), vec![96.0, 96.0, 48.0]);

        let cells: Vec<GridCell> = grid.cells().map(|(_, c)| c).collect();
        assert_eq!((cells[0].row_span, cells[0].col_span, cells[0].covered), (2, 2, false));
        assert!(cells[1].covered);
        assert!(!cells[2].covered);
        assert!(cells[3].covered);
        // Covered by the rowSpan/gridSpan origin even without a flag.
        assert!(cells[4].covered);
        assert!(!cells[5].covered);

        let origin = grid.cell_at(0, 0).unwrap();
        assert_eq!(grid.position(origin).map(|c| (c.row, c.col)), Some((0, 0)));
        assert_eq!(grid.position(&tc()), None);
    }

    #[test]
    fn test_bad_spans_count_as_one() {
        let tbl = Node::new("tbl").with_child(
            Node::new("tr")
                .with_child(tc().with_attr("gridSpan", "0"))
                .with_child(tc().with_attr("rowSpan", "x")),
        );
        let grid = TableGrid::build(&tbl);
        assert!(grid.cells().all(|(_, c)| c.row_span == 1 && c.col_span == 1 && !c.covered));
        assert_eq!(grid.cols(), 2);
    }
}
