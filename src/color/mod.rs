//! Color specifications and the transform pipeline.
//!
//! Every color in a DrawingML part is a base (`srgbClr`, `schemeClr`,
//! `sysClr`, `prstClr`, `hslClr`, `scrgbClr`) followed by modifier elements.
//! [`ColorSpec`] captures both; [`ColorTransformPipeline`] turns it into a
//! concrete [`Color`](crate::common::Color) for one slide.
//!
//! # Examples
//!
//! ```rust
//! use drawingml_style::{ColorTransformPipeline, Node, StyleContext};
//!
//! let slide = Node::new("p:sld");
//! let ctx = StyleContext::builder(&slide).build();
//! let green = Node::new("a:srgbClr")
//!     .with_attr("val", "00FF00")
//!     .with_child(Node::new("a:lumMod").with_attr("val", "50000"));
//!
//! let color = ColorTransformPipeline::new(&ctx).resolve_node(&green, None).unwrap();
//! assert_eq!(color.to_string(), "#008000");
//! ```

pub mod preset;
pub mod scheme;
pub mod spec;
pub mod transform;

pub use preset::{preset_color, system_color};
pub use scheme::{PLACEHOLDER_SLOT, SchemeColorResolver};
pub use spec::{COLOR_ELEMENTS, ColorKind, ColorModifiers, ColorSpec};
pub use transform::{ColorTransformPipeline, apply_hsl_modifiers, apply_modifiers, ops};
