//! Theme part lookups (`a:theme/a:themeElements`).

use super::StyleContext;
use crate::tree::Node;

/// Which theme font collection a `+mj-*`/`+mn-*` reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontCollection {
    Major,
    Minor,
}

/// Script slot inside a font collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontScript {
    Latin,
    EastAsian,
    ComplexScript,
}

impl FontScript {
    fn element(self) -> &'static str {
        match self {
            FontScript::Latin => "latin",
            FontScript::EastAsian => "ea",
            FontScript::ComplexScript => "cs",
        }
    }
}

/// `bgFillStyleLst` indices start here in `fillRef`/`bgRef`.
pub const BACKGROUND_FILL_INDEX_BASE: i64 = 1000;

impl<'a> StyleContext<'a> {
    fn theme_elements(&self) -> Option<&'a Node> {
        self.theme()?.child("themeElements")
    }

    /// The `clrScheme` entry for a physical slot (`dk1`, `accent2`, ...).
    pub fn theme_color_slot(&self, slot: &str) -> Option<&'a Node> {
        self.theme_elements()?.path(&["clrScheme", slot])
    }

    /// Typeface of a theme font collection, if the theme declares one.
    pub fn theme_font(&self, collection: FontCollection, script: FontScript) -> Option<&'a str> {
        let name = match collection {
            FontCollection::Major => "majorFont",
            FontCollection::Minor => "minorFont",
        };
        self.theme_elements()?
            .path(&["fontScheme", name, script.element()])?
            .attr("typeface")
            .filter(|t| !t.is_empty())
    }

    /// Resolve a typeface that may be a theme reference (`+mj-lt`, `+mn-ea`, ...).
    pub fn resolve_typeface(&self, typeface: &str) -> Option<String> {
        let Some(reference) = typeface.strip_prefix('+') else {
            return Some(typeface.to_string());
        };
        let (collection, script) = reference.split_once('-')?;
        let collection = match collection {
            "mj" => FontCollection::Major,
            "mn" => FontCollection::Minor,
            _ => return None,
        };
        let script = match script {
            "lt" => FontScript::Latin,
            "ea" => FontScript::EastAsian,
            "cs" => FontScript::ComplexScript,
            _ => return None,
        };
        self.theme_font(collection, script).map(str::to_string)
    }

    /// Fill style referenced by a `fillRef`/`bgRef` index.
    ///
    /// `0` and `1000` mean no fill. `1..999` index `fillStyleLst`, `1001..`
    /// index `bgFillStyleLst`; both lists are 1-based.
    pub fn fill_style(&self, idx: i64) -> Option<&'a Node> {
        let fmt = self.theme_elements()?.child("fmtScheme")?;
        let (list, position) = if idx > BACKGROUND_FILL_INDEX_BASE {
            ("bgFillStyleLst", idx - BACKGROUND_FILL_INDEX_BASE)
        } else {
            ("fillStyleLst", idx)
        };
        if position < 1 {
            return None;
        }
        fmt.child(list)?.children().get(position as usize - 1)
    }

    /// Line style referenced by an `lnRef` index (1-based into `lnStyleLst`).
    pub fn line_style(&self, idx: i64) -> Option<&'a Node> {
        if idx < 1 {
            return None;
        }
        self.theme_elements()?
            .path(&["fmtScheme", "lnStyleLst"])?
            .children_named("ln")
            .nth(idx as usize - 1)
    }

    /// Theme `objectDefaults` list style for text (`txDef`, else `spDef`).
    pub fn theme_list_style(&self) -> Option<&'a Node> {
        let defaults = self.theme()?.child("objectDefaults")?;
        defaults
            .path(&["txDef", "lstStyle"])
            .or_else(|| defaults.path(&["spDef", "lstStyle"]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Node {
        Node::new("theme").with_child(
            Node::new("themeElements")
                .with_child(
                    Node::new("clrScheme")
                        .with_child(Node::new("accent1").with_child(Node::new("srgbClr").with_attr("val", "4F81BD"))),
                )
                .with_child(
                    Node::new("fontScheme")
                        .with_child(Node::new("majorFont").with_child(Node::new("latin").with_attr("typeface", "Calibri Light")))
                        .with_child(
                            Node::new("minorFont")
                                .with_child(Node::new("latin").with_attr("typeface", "Calibri"))
                                .with_child(Node::new("ea").with_attr("typeface", "")),
                        ),
                )
                .with_child(
                    Node::new("fmtScheme")
                        .with_child(
                            Node::new("fillStyleLst")
                                .with_child(Node::new("solidFill"))
                                .with_child(Node::new("gradFill"))
                                .with_child(Node::new("pattFill")),
                        )
                        .with_child(
                            Node::new("lnStyleLst")
                                .with_child(Node::new("ln").with_attr("w", "9525"))
                                .with_child(Node::new("ln").with_attr("w", "25400")),
                        )
                        .with_child(
                            Node::new("bgFillStyleLst")
                                .with_child(Node::new("solidFill"))
                                .with_child(Node::new("blipFill")),
                        ),
                ),
        )
    }

    #[test]
    fn test_theme_lookups() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();

        assert!(ctx.theme_color_slot("accent1").is_some());
        assert!(ctx.theme_color_slot("accent2").is_none());
        assert_eq!(ctx.resolve_typeface("+mj-lt").as_deref(), Some("Calibri Light"));
        assert_eq!(ctx.resolve_typeface("+mn-lt").as_deref(), Some("Calibri"));
        assert_eq!(ctx.resolve_typeface("+mn-ea"), None);
        assert_eq!(ctx.resolve_typeface("Arial").as_deref(), Some("Arial"));
    }

    #[test]
    fn test_style_matrix_indexing() {
        let theme = theme();
        let slide = Node::new("sld");
        let ctx = StyleContext::builder(&slide).theme(&theme).build();

        assert!(ctx.fill_style(0).is_none());
        assert!(ctx.fill_style(1000).is_none());
        assert!(ctx.fill_style(2).unwrap().is("gradFill"));
        assert!(ctx.fill_style(1002).unwrap().is("blipFill"));
        assert!(ctx.fill_style(4).is_none());
        assert_eq!(ctx.line_style(2).and_then(|l| l.attr("w")), Some("25400"));
        assert!(ctx.line_style(0).is_none());
    }
}
