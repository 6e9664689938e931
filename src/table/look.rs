use crate::tree::Node;
use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Table style options switched on by `a:tblPr`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
    pub struct TableLook: u8 {
        /// Header row (`firstRow`)
        const FIRST_ROW = 0x01;
        /// Total row (`lastRow`)
        const LAST_ROW = 0x02;
        /// First column (`firstCol`)
        const FIRST_COL = 0x04;
        /// Last column (`lastCol`)
        const LAST_COL = 0x08;
        /// Banded rows (`bandRow`)
        const BAND_ROW = 0x10;
        /// Banded columns (`bandCol`)
        const BAND_COL = 0x20;
    }
}

impl TableLook {
    /// Read the boolean attributes of a `tblPr` element.
    pub fn from_table_properties(tbl_pr: &Node) -> Self {
        let mut look = Self::empty();
        for (attr, flag) in [
            ("firstRow", Self::FIRST_ROW),
            ("lastRow", Self::LAST_ROW),
            ("firstCol", Self::FIRST_COL),
            ("lastCol", Self::LAST_COL),
            ("bandRow", Self::BAND_ROW),
            ("bandCol", Self::BAND_COL),
        ] {
            look.set(flag, tbl_pr.flag(attr));
        }
        look
    }

    /// Look of a `tbl` element; no `tblPr` means no options.
    pub fn of_table(tbl: &Node) -> Self {
        tbl.child("tblPr").map(Self::from_table_properties).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_from_attributes() {
        let tbl_pr = Node::new("tblPr")
            .with_attr("firstRow", "1")
            .with_attr("bandRow", "true")
            .with_attr("lastCol", "0")
            .with_attr("firstCol", "yes");
        let look = TableLook::from_table_properties(&tbl_pr);
        assert_eq!(look, TableLook::FIRST_ROW | TableLook::BAND_ROW);
        assert!(TableLook::of_table(&Node::new("tbl")).is_empty());
    }
}
