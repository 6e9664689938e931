//! Unified error types for the style engine.
//!
//! Resolution itself never fails: missing or malformed input degrades to a
//! documented default. Errors only surface at the edges, when a node tree is
//! built from XML text or when options are loaded from YAML.
use thiserror::Error;

/// Main error type for drawingml-style operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Input is well-formed XML but not a usable document tree
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Options document could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for drawingml-style operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::Xml("bad tag".into()).to_string(), "XML error: bad tag");
        assert_eq!(
            Error::Config("unknown field `dpis`".into()).to_string(),
            "Configuration error: unknown field `dpis`"
        );
        let io = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        assert!(matches!(io, Error::Io(_)));
    }
}
