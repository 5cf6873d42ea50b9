//! Error types for the embedded-content core.
//!
//! Capability gaps (no frame, plugins or Java disabled), unavailable bridge
//! handles and unresolvable URLs are not errors: they degrade to "no
//! representation" and are only traced. The variants below cover misuse of
//! the tree API and configuration loading.

use thiserror::Error;

use crate::document::NodeId;

/// Errors produced by document, tree and configuration operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be decoded.
    #[error("Failed to parse settings: {0}")]
    Config(#[from] serde_json::Error),
    /// Settings file could not be read.
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    /// The configured document base URL is not absolute.
    #[error("Invalid document base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The node key does not refer to a live node of this document.
    #[error("Node {0:?} does not exist in this document")]
    UnknownNode(NodeId),
    /// The node exists but is not an applet, embed, object or param element.
    #[error("Node {0:?} is not an embedded-content element")]
    NotEmbedded(NodeId),
    /// The node already has a parent and must be removed first.
    #[error("Node {0:?} already has a parent")]
    AlreadyParented(NodeId),
    /// The requested tree mutation would produce an invalid hierarchy.
    #[error("Invalid hierarchy: {0}")]
    HierarchyRequest(&'static str),
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::HierarchyRequest("text nodes cannot have children");
        assert_eq!(
            error.to_string(),
            "Invalid hierarchy: text nodes cannot have children"
        );
    }

    #[test]
    fn test_config_error_from_json() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error = Error::from(json_error);
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().starts_with("Failed to parse settings"));
    }
}
