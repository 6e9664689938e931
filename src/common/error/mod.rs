//! Unified error types for the style engine.
//!
//! This module provides a single error type shared by the tree builder and
//! the configuration loader.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
