//! Logical color role to scheme slot mapping (`p:clrMap`).

use crate::tree::Node;
use std::collections::HashMap;

/// Roles a color map may remap. Only the four text/background roles are
/// looked up through the map by the scheme resolver; the accents map to
/// themselves in every real-world master.
pub const MAPPED_ROLES: [&str; 12] = [
    "bg1", "tx1", "bg2", "tx2", "accent1", "accent2", "accent3", "accent4", "accent5", "accent6",
    "hlink", "folHlink",
];

/// Effective role -> slot map for one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    entries: HashMap<String, String>,
}

impl Default for ColorMap {
    fn default() -> Self {
        let entries = [("bg1", "lt1"), ("tx1", "dk1"), ("bg2", "lt2"), ("tx2", "dk2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { entries }
    }
}

impl ColorMap {
    /// Read a `clrMap` or `overrideClrMapping` element.
    pub fn from_node(node: &Node) -> Self {
        let mut map = Self::default();
        map.overlay(node);
        map
    }

    /// Replace entries with the attributes `node` defines.
    pub fn overlay(&mut self, node: &Node) {
        for role in MAPPED_ROLES {
            if let Some(slot) = node.attr(role) {
                self.entries.insert(role.to_string(), slot.to_string());
            }
        }
    }

    /// Build the effective map for a slide.
    ///
    /// Priority: slide override, then layout override, then the master's
    /// `clrMap`, then the built-in default. An override element that is just
    /// `masterClrMapping` leaves the map untouched.
    pub fn effective(slide: Option<&Node>, layout: Option<&Node>, master: Option<&Node>) -> Self {
        let mut map = master
            .and_then(|m| m.child("clrMap"))
            .map(Self::from_node)
            .unwrap_or_default();

        for part in [layout, slide].into_iter().flatten() {
            if let Some(over) = part.path(&["clrMapOvr", "overrideClrMapping"]) {
                map.overlay(over);
            }
        }
        map
    }

    /// Slot for a role, if the role is mapped.
    pub fn get(&self, role: &str) -> Option<&str> {
        self.entries.get(role).map(String::as_str)
    }

    /// Map `tx1`/`tx2`/`bg1`/`bg2` to physical slots; anything else passes through.
    pub fn remap<'a>(&'a self, name: &'a str) -> &'a str {
        match name {
            "tx1" | "tx2" | "bg1" | "bg2" => self.get(name).unwrap_or(name),
            _ => name,
        }
    }
}
