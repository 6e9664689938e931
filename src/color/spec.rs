//! Unresolved color specifications as they appear in the document.

use crate::common::unit::{angle_to_degrees_exact, percentage_to_fraction};
use crate::common::{Hsl, RGBColor};
use crate::tree::Node;

/// Element names that carry a color specification.
pub const COLOR_ELEMENTS: [&str; 6] = ["srgbClr", "scrgbClr", "schemeClr", "sysClr", "prstClr", "hslClr"];

/// Modifier elements that exist in DrawingML but are not applied.
const UNSUPPORTED_MODIFIERS: [&str; 12] = [
    "alphaMod", "alphaOff", "redMod", "greenMod", "blueMod", "hueOff", "satOff", "comp", "inv", "gray", "gamma",
    "invGamma",
];

/// Base color of a specification, before modifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorKind {
    /// `srgbClr`, and `scrgbClr` converted to 8-bit sRGB
    Rgb(RGBColor),
    /// `schemeClr` slot or role name (`accent1`, `tx1`, `phClr`)
    Scheme(String),
    /// `sysClr` with its cached `lastClr`
    System { name: String, last: Option<RGBColor> },
    /// `prstClr` name
    Preset(String),
    /// `hslClr`
    Hsl(Hsl),
}

/// Supported modifiers, one slot each.
///
/// Values are fractions (`val / 100000`). The pipeline applies them in field
/// order regardless of their order in the document.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorModifiers {
    pub alpha: Option<f64>,
    pub hue_mod: Option<f64>,
    pub lum_mod: Option<f64>,
    pub lum_off: Option<f64>,
    pub sat_mod: Option<f64>,
    pub shade: Option<f64>,
    pub tint: Option<f64>,
}

impl ColorModifiers {
    /// True when no modifier is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when a modifier needs the HSL round trip.
    pub fn touches_hsl(&self) -> bool {
        self.hue_mod.is_some()
            || self.lum_mod.is_some()
            || self.lum_off.is_some()
            || self.sat_mod.is_some()
            || self.shade.is_some()
            || self.tint.is_some()
    }

    /// Read modifiers from the children of a color element.
    ///
    /// The first occurrence of a modifier wins. Missing or non-numeric `val`
    /// leaves the slot empty.
    pub fn from_children(color: &Node) -> Self {
        let mut modifiers = Self::default();
        for child in color.children() {
            let slot = match child.name() {
                "alpha" => &mut modifiers.alpha,
                "hueMod" => &mut modifiers.hue_mod,
                "lumMod" => &mut modifiers.lum_mod,
                "lumOff" => &mut modifiers.lum_off,
                "satMod" => &mut modifiers.sat_mod,
                "shade" => &mut modifiers.shade,
                "tint" => &mut modifiers.tint,
                name if UNSUPPORTED_MODIFIERS.contains(&name) => {
                    tracing::trace!(modifier = name, "unsupported color modifier ignored");
                    continue;
                },
                _ => continue,
            };
            if slot.is_none() {
                *slot = child.attr_f64("val").map(percentage_to_fraction);
            }
        }
        modifiers
    }
}

/// A color as written in the document: base plus modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpec {
    pub kind: ColorKind,
    pub modifiers: ColorModifiers,
}

impl ColorSpec {
    pub fn rgb(rgb: RGBColor) -> Self {
        Self {
            kind: ColorKind::Rgb(rgb),
            modifiers: ColorModifiers::default(),
        }
    }

    pub fn scheme(slot: &str) -> Self {
        Self {
            kind: ColorKind::Scheme(slot.to_string()),
            modifiers: ColorModifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ColorModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Parse a color element (`srgbClr`, `schemeClr`, ...).
    ///
    /// Returns `None` for other elements and for colors whose base value is
    /// missing or malformed.
    pub fn from_node(node: &Node) -> Option<Self> {
        let kind = match node.name() {
            "srgbClr" => ColorKind::Rgb(parse_hex(node, "val")?),
            "scrgbClr" => ColorKind::Rgb(RGBColor::new(
                linear_channel(node.attr_f64("r")?),
                linear_channel(node.attr_f64("g")?),
                linear_channel(node.attr_f64("b")?),
            )),
            "schemeClr" => ColorKind::Scheme(node.attr("val")?.to_string()),
            "sysClr" => ColorKind::System {
                name: node.attr("val")?.to_string(),
                last: parse_hex(node, "lastClr"),
            },
            "prstClr" => ColorKind::Preset(node.attr("val")?.to_string()),
            "hslClr" => ColorKind::Hsl(Hsl::new(
                angle_to_degrees_exact(node.attr_f64("hue")?).rem_euclid(360.0),
                percentage_to_fraction(node.attr_f64("sat")?).clamp(0.0, 1.0),
                percentage_to_fraction(node.attr_f64("lum")?).clamp(0.0, 1.0),
            )),
            _ => return None,
        };
        Some(Self {
            kind,
            modifiers: ColorModifiers::from_children(node),
        })
    }

    /// Parse the first color element inside a container such as `solidFill`,
    /// `fgClr`, `buClr`, `fontRef` or a `clrScheme` slot.
    pub fn from_container(container: &Node) -> Option<Self> {
        container.first_child_of(&COLOR_ELEMENTS).and_then(Self::from_node)
    }

    /// Whether this spec refers to the placeholder color.
    pub fn is_placeholder(&self) -> bool {
        matches!(&self.kind, ColorKind::Scheme(slot) if slot == "phClr")
    }
}

fn parse_hex(node: &Node, key: &str) -> Option<RGBColor> {
    let raw = node.attr(key)?;
    let rgb = RGBColor::from_hex(raw);
    if rgb.is_none() {
        tracing::debug!(element = node.name(), attr = key, value = raw, "ignoring malformed hex color");
    }
    rgb
}

/// scRGB channels are linear-light percentages; convert to gamma-encoded sRGB.
fn linear_channel(raw: f64) -> u8 {
    let linear = percentage_to_fraction(raw).clamp(0.0, 1.0);
    let encoded = if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        let rgb = ColorSpec::from_node(&Node::new("srgbClr").with_attr("val", "4F81BD")).unwrap();
        assert_eq!(rgb.kind, ColorKind::Rgb(RGBColor::new(0x4F, 0x81, 0xBD)));

        let sys = ColorSpec::from_node(
            &Node::new("sysClr").with_attr("val", "windowText").with_attr("lastClr", "000000"),
        )
        .unwrap();
        assert_eq!(
            sys.kind,
            ColorKind::System {
                name: "windowText".into(),
                last: Some(RGBColor::BLACK)
            }
        );

        let scrgb = ColorSpec::from_node(
            &Node::new("scrgbClr").with_attr("r", "100000").with_attr("g", "0").with_attr("b", "0"),
        )
        .unwrap();
        assert_eq!(scrgb.kind, ColorKind::Rgb(RGBColor::new(255, 0, 0)));

        let hsl = ColorSpec::from_node(
            &Node::new("hslClr").with_attr("hue", "7200000").with_attr("sat", "100000").with_attr("lum", "50000"),
        )
        .unwrap();
        assert_eq!(hsl.kind, ColorKind::Hsl(Hsl::new(120.0, 1.0, 0.5)));
    }

    #[test]
    fn test_malformed_base_is_absent() {
        assert!(ColorSpec::from_node(&Node::new("srgbClr").with_attr("val", "zz")).is_none());
        assert!(ColorSpec::from_node(&Node::new("schemeClr")).is_none());
        assert!(ColorSpec::from_node(&Node::new("solidFill")).is_none());
    }

    #[test]
    fn test_modifiers_ignore_document_order_and_garbage() {
        let node = Node::new("schemeClr")
            .with_attr("val", "accent1")
            .with_child(Node::new("tint").with_attr("val", "40000"))
            .with_child(Node::new("lumMod").with_attr("val", "abc"))
            .with_child(Node::new("alpha").with_attr("val", "50000"))
            .with_child(Node::new("alphaMod").with_attr("val", "10000"))
            .with_child(Node::new("tint").with_attr("val", "90000"));
        let spec = ColorSpec::from_node(&node).unwrap();
        assert_eq!(spec.modifiers.tint, Some(0.4));
        assert_eq!(spec.modifiers.alpha, Some(0.5));
        assert_eq!(spec.modifiers.lum_mod, None);
        assert!(spec.modifiers.touches_hsl());
    }

    #[test]
    fn test_from_container() {
        let fill = Node::new("solidFill").with_child(Node::new("schemeClr").with_attr("val", "phClr"));
        let spec = ColorSpec::from_container(&fill).unwrap();
        assert!(spec.is_placeholder());
        assert!(spec.modifiers.is_empty());
    }
}
