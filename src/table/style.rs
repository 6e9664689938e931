//! Table style regions (`a:tblStyle` blocks).

use super::grid::GridCell;
use super::look::TableLook;
use crate::tree::Node;
use serde::Serialize;

/// A style block of a table style. Variants are declared from lowest to
/// highest precedence, so `Ord` is the tie-break between overlapping blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    WholeTable,
    Band1V,
    Band2V,
    Band1H,
    Band2H,
    LastCol,
    FirstCol,
    LastRow,
    FirstRow,
    SeCell,
    SwCell,
    NeCell,
    NwCell,
}

impl Region {
    pub const ALL: [Region; 13] = [
        Region::WholeTable,
        Region::Band1V,
        Region::Band2V,
        Region::Band1H,
        Region::Band2H,
        Region::LastCol,
        Region::FirstCol,
        Region::LastRow,
        Region::FirstRow,
        Region::SeCell,
        Region::SwCell,
        Region::NeCell,
        Region::NwCell,
    ];

    /// Element name of the block inside `tblStyle`.
    pub fn element(self) -> &'static str {
        match self {
            Region::WholeTable => "wholeTbl",
            Region::Band1V => "band1V",
            Region::Band2V => "band2V",
            Region::Band1H => "band1H",
            Region::Band2H => "band2H",
            Region::LastCol => "lastCol",
            Region::FirstCol => "firstCol",
            Region::LastRow => "lastRow",
            Region::FirstRow => "firstRow",
            Region::SeCell => "seCell",
            Region::SwCell => "swCell",
            Region::NeCell => "neCell",
            Region::NwCell => "nwCell",
        }
    }
}

/// Regions that apply to `cell` in a `rows` x `cols` table, lowest
/// precedence first.
///
/// Bands count from the first body row or column: a header row or first
/// column switched on by `look` is not part of the banding.
pub fn regions_for(cell: GridCell, rows: usize, cols: usize, look: TableLook) -> Vec<Region> {
    let first_row = look.contains(TableLook::FIRST_ROW) && cell.row == 0;
    let last_row = look.contains(TableLook::LAST_ROW) && rows > 0 && cell.row + cell.row_span >= rows;
    let first_col = look.contains(TableLook::FIRST_COL) && cell.col == 0;
    let last_col = look.contains(TableLook::LAST_COL) && cols > 0 && cell.col + cell.col_span >= cols;

    let mut regions = vec![Region::WholeTable];

    if look.contains(TableLook::BAND_COL) && !first_col && !last_col {
        let body_col = cell.col - usize::from(look.contains(TableLook::FIRST_COL));
        regions.push(if body_col % 2 == 0 { Region::Band1V } else { Region::Band2V });
    }
    if look.contains(TableLook::BAND_ROW) && !first_row && !last_row {
        let body_row = cell.row - usize::from(look.contains(TableLook::FIRST_ROW));
        regions.push(if body_row % 2 == 0 { Region::Band1H } else { Region::Band2H });
    }

    for (applies, region) in [
        (last_col, Region::LastCol),
        (first_col, Region::FirstCol),
        (last_row, Region::LastRow),
        (first_row, Region::FirstRow),
        (last_row && last_col, Region::SeCell),
        (last_row && first_col, Region::SwCell),
        (first_row && last_col, Region::NeCell),
        (first_row && first_col, Region::NwCell),
    ] {
        if applies {
            regions.push(region);
        }
    }
    regions
}

/// Find a table style by id in a `tblStyleLst` catalog.
pub fn find_style<'a>(catalog: &'a Node, style_id: &str) -> Option<&'a Node> {
    catalog
        .children_named("tblStyle")
        .find(|s| s.attr("styleId") == Some(style_id))
}
