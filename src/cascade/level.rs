//! One step of the inheritance chain and the generic lookup over it.

use crate::tree::Node;
use serde::Serialize;

/// Where a cascade level comes from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LevelSource {
    /// The node's own `pPr`/`rPr`
    Direct,
    /// The shape's `txBody/lstStyle`
    ListStyle,
    /// The shape's `p:style` references
    StyleReference,
    /// Table style text properties of the enclosing cell
    TableCell,
    /// Matched layout placeholder
    Layout,
    /// Matched master placeholder
    Master,
    /// Master `txStyles` block for the placeholder type
    MasterTextStyle,
    /// Presentation `defaultTextStyle`
    PresentationDefault,
    /// Theme `objectDefaults`
    Theme,
}

/// Properties one level contributes. Any part may be absent.
#[derive(Debug, Clone, Copy)]
pub struct CascadeLevel<'n> {
    pub source: LevelSource,
    /// Paragraph properties (`pPr` or `lvlNpPr`)
    pub ppr: Option<&'n Node>,
    /// Run properties (`rPr` or `defRPr`)
    pub rpr: Option<&'n Node>,
    /// Shape style (`p:style`)
    pub style_ref: Option<&'n Node>,
    /// Table text style (`tcTxStyle`)
    pub cell_text: Option<&'n Node>,
}

impl<'n> CascadeLevel<'n> {
    pub fn new(source: LevelSource) -> Self {
        Self {
            source,
            ppr: None,
            rpr: None,
            style_ref: None,
            cell_text: None,
        }
    }

    /// A level made of one list-style entry: its `lvlNpPr` and the
    /// `defRPr` inside it.
    pub fn list_entry(source: LevelSource, ppr: Option<&'n Node>) -> Self {
        Self {
            ppr,
            rpr: ppr.and_then(|p| p.child("defRPr")),
            ..Self::new(source)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ppr.is_none() && self.rpr.is_none() && self.style_ref.is_none() && self.cell_text.is_none()
    }
}

/// Walk `levels` in order and return the first value `extract` yields,
/// together with the level it came from.
pub fn cascade_lookup<'n, T>(
    levels: &[CascadeLevel<'n>],
    mut extract: impl FnMut(&CascadeLevel<'n>) -> Option<T>,
) -> Option<(T, LevelSource)> {
    levels.iter().find_map(|level| extract(level).map(|value| (value, level.source)))
}

/// Like [`cascade_lookup`] over the paragraph properties of each level.
pub fn lookup_ppr<'n, T>(levels: &[CascadeLevel<'n>], mut extract: impl FnMut(&'n Node) -> Option<T>) -> Option<T> {
    cascade_lookup(levels, |level| level.ppr.and_then(&mut extract)).map(|(v, _)| v)
}

/// Like [`cascade_lookup`] over the run properties of each level.
pub fn lookup_rpr<'n, T>(levels: &[CascadeLevel<'n>], mut extract: impl FnMut(&'n Node) -> Option<T>) -> Option<T> {
    cascade_lookup(levels, |level| level.rpr.and_then(&mut extract)).map(|(v, _)| v)
}

/// Element name of a list-style entry for a 0-based paragraph level.
pub fn list_level_name(level: usize) -> String {
    format!("lvl{}pPr", level.min(8) + 1)
}
