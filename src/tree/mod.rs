//! Generic, immutable document tree.
//!
//! The resolvers make exactly one structural assumption about their input: a
//! tree of named nodes with ordered attributes and ordered children. Any XML
//! parser can produce it through the builder API; the `xml` feature adds a
//! `quick-xml` based constructor.

// Submodule declarations
pub mod attr;
pub mod node;
#[cfg(feature = "xml")]
pub mod parse;

// Re-exports
pub use attr::{parse_bool, parse_float, parse_int};
pub use node::Node;
