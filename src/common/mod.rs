//! Common types, traits, and utilities shared across resolvers.
//!
//! This module provides the error type, unit conversions and color
//! primitives used by every other part of the crate.

// Submodule declarations
pub mod error;
pub mod style;
pub mod unit;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{Color, Hsl, RGBColor};
