//! drawingml-style - style inheritance and color resolution for DrawingML slides
//!
//! This library answers one question for a node of a PresentationML slide:
//! what does it actually look like? A run, paragraph or shape rarely carries
//! its full formatting. The rest is inherited from list styles, layout and
//! master placeholders, master text styles, the presentation defaults and
//! the theme, and colors are expressed as scheme slots with chains of
//! modifiers. The resolvers here walk those chains and hand back plain data.
//!
//! # Features
//!
//! - **Color pipeline**: scheme slots, color maps, presets, system colors and
//!   HSL-space modifiers applied in a fixed order
//! - **Fills**: solid, gradient, pattern, picture and group fills, including
//!   theme `fillRef` lookups and slide backgrounds
//! - **Borders**: line width, dash and color with theme `lnRef` merging
//! - **Bullets**: character, picture and auto-numbered bullets with
//!   per-body counters
//! - **Text cascade**: fonts, colors, alignment, spacing and indentation
//!   through the full placeholder chain
//! - **Tables**: table style regions, banding and merged cells
//!
//! # Example - Resolving a run
//!
//! ```rust
//! use drawingml_style::{Node, StyleCascadeResolver, StyleContext};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let theme = Node::from_xml(
//!     r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">
//!          <a:themeElements>
//!            <a:clrScheme name="Office">
//!              <a:dk1><a:srgbClr val="000000"/></a:dk1>
//!              <a:accent1><a:srgbClr val="4F81BD"/></a:accent1>
//!            </a:clrScheme>
//!          </a:themeElements>
//!        </a:theme>"#,
//! )?;
//! let slide = Node::from_xml(
//!     r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"
//!               xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
//!          <p:cSld><p:spTree><p:sp>
//!            <p:txBody><a:bodyPr/><a:p><a:r>
//!              <a:rPr sz="2400"><a:solidFill><a:schemeClr val="accent1"><a:lumMod val="75000"/></a:schemeClr></a:solidFill></a:rPr>
//!              <a:t>Hello</a:t>
//!            </a:r></a:p></p:txBody>
//!          </p:sp></p:spTree></p:cSld>
//!        </p:sld>"#,
//! )?;
//! let ctx = StyleContext::builder(&slide).theme(&theme).build();
//!
//! let c_sld = slide.path(&["cSld"]).unwrap();
//! let tree = c_sld.child("spTree").unwrap();
//! let sp = tree.child("sp").unwrap();
//! let body = sp.child("txBody").unwrap();
//! let para = body.child("p").unwrap();
//! let run = para.child("r").unwrap();
//!
//! let style = StyleCascadeResolver::new(&ctx).resolve(run, &[&slide, c_sld, tree, sp, body, para]);
//! assert_eq!(style.font.size_pt, 24.0);
//! assert_eq!(style.color.to_hex(), "376092");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Configuration
//!
//! ```rust
//! use drawingml_style::ResolveOptions;
//!
//! let options = ResolveOptions::from_yaml_str("default_font_size_pt: 12\n").unwrap();
//! assert_eq!(options.default_font_size_pt, 12.0);
//! ```

/// Shared error types, colors and unit conversions.
pub mod common;

/// Engine-wide fallbacks and their YAML loader.
pub mod config;

/// The immutable document tree the resolvers read.
pub mod tree;

/// Per-slide context: layout, master, theme, color map and placeholder lookup.
pub mod context;

/// Color specifications and the modifier pipeline.
pub mod color;

/// Solid, gradient, pattern, picture and background fills.
pub mod fill;

/// Shape outlines, text outlines and table cell edges.
pub mod border;

/// Bullet kinds, auto-number formats and symbol fonts.
pub mod bullet;

/// Text and shape style inheritance.
pub mod cascade;

/// Table style regions and cell formatting.
pub mod table;

#[cfg(feature = "parallel")]
pub mod batch;

pub use border::{Border, BorderResolver};
pub use bullet::{BulletKind, BulletResolver, BulletSpec, CounterTable};
pub use cascade::{ResolvedStyle, StyleCascadeResolver, TextBodyResolver};
pub use color::{ColorSpec, ColorTransformPipeline};
pub use common::{Color, Error, RGBColor, Result};
pub use config::ResolveOptions;
pub use context::StyleContext;
pub use fill::{Fill, FillResolver};
pub use table::{CellStyle, TableStyleCascade};
pub use tree::Node;
