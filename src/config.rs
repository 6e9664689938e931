//! Engine-wide fallback values.
//!
//! Every cascade ends in a constant when no level of the document supplies a
//! value. Those constants live in [`ResolveOptions`] so callers can tune them
//! per deployment, either in code or from a YAML document.
//!
//! ```rust
//! use drawingml_style::ResolveOptions;
//!
//! let options = ResolveOptions::from_yaml_str("default_font_size_pt: 12").unwrap();
//! assert_eq!(options.default_font_size_pt, 12.0);
//! assert_eq!(options.default_border_width_pt, 0.75);
//! ```

use crate::common::unit::DEFAULT_DPI;
use crate::common::{Color, Error, RGBColor, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

static DEFAULT_OPTIONS: Lazy<ResolveOptions> = Lazy::new(ResolveOptions::default);

/// Fallback constants used at the bottom of every cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
    /// Font size used when no level defines `sz`
    pub default_font_size_pt: f64,
    /// Line width used when a line omits `w` or carries garbage
    pub default_border_width_pt: f64,
    /// Text color used when neither the document nor the theme resolves one (`RRGGBB`)
    pub default_text_color: String,
    /// Cap on group-fill and placeholder-color recursion
    pub max_recursion_depth: usize,
    /// Dots per inch for EMU to pixel conversion
    pub dpi: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default_font_size_pt: 18.0,
            default_border_width_pt: 0.75,
            default_text_color: "000000".to_string(),
            max_recursion_depth: 16,
            dpi: DEFAULT_DPI,
        }
    }
}

impl ResolveOptions {
    /// Shared default instance.
    pub fn global_default() -> &'static ResolveOptions {
        &DEFAULT_OPTIONS
    }

    /// Parse options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: ResolveOptions = serde_saphyr::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and parse a YAML options file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if !(self.default_font_size_pt.is_finite() && self.default_font_size_pt > 0.0) {
            return Err(Error::Config(format!(
                "default_font_size_pt must be positive, got {}",
                self.default_font_size_pt
            )));
        }
        if !(self.default_border_width_pt.is_finite() && self.default_border_width_pt >= 0.0) {
            return Err(Error::Config(format!(
                "default_border_width_pt must not be negative, got {}",
                self.default_border_width_pt
            )));
        }
        if RGBColor::from_hex(&self.default_text_color).is_none() {
            return Err(Error::Config(format!(
                "default_text_color must be RRGGBB, got '{}'",
                self.default_text_color
            )));
        }
        if self.dpi == 0 {
            return Err(Error::Config("dpi must be non-zero".to_string()));
        }
        Ok(())
    }

    /// The fallback text color as a resolved color.
    pub fn text_color(&self) -> Color {
        Color::from_hex(&self.default_text_color).unwrap_or(Color::opaque(RGBColor::BLACK))
    }
}
