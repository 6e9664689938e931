//! Common style and formatting types.
//!
//! This module provides the color primitives every resolver works with.

// Submodule declarations
pub mod color;

// Re-exports
pub use color::{Color, Hsl, RGBColor};
