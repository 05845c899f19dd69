//! Error types for the profile editing core
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for profile editing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the profile editing core
#[derive(Error, Debug)]
pub enum Error {
    /// The profile store rejected or failed an update
    #[error("Profile store error: {0}")]
    Store(String),

    /// The image upload (`complete_profile`) failed
    #[error("Image upload error: {0}")]
    Upload(String),

    /// The preview reader could not produce a preview
    #[error("Preview error: {0}")]
    Preview(String),

    /// The pending image is at or above the configured size limit
    #[error("Image too large: {size} bytes (limit {limit} bytes)")]
    ImageTooLarge {
        /// Size of the rejected image in bytes
        size: usize,
        /// Configured exclusive upper bound in bytes
        limit: usize,
    },

    /// Another submit for this session has not resolved yet
    #[error("A submit is already in progress")]
    SubmitInProgress,

    /// The operation is not allowed in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a profile store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an image upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Create a preview error
    pub fn preview(msg: impl Into<String>) -> Self {
        Self::Preview(msg.into())
    }

    /// Create an invalid state error
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the failure came from an external collaborator call
    ///
    /// Collaborator failures leave the session in edit mode so the user can
    /// retry; local rejections never reached a collaborator at all.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Upload(_) | Self::Other(_))
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_too_large_message_names_both_sizes() {
        let err = Error::ImageTooLarge {
            size: 3_000_000,
            limit: 2_097_152,
        };
        assert_eq!(
            err.to_string(),
            "Image too large: 3000000 bytes (limit 2097152 bytes)"
        );
        assert!(!err.is_external());
    }

    #[test]
    fn anyhow_errors_become_other() {
        let err: Error = anyhow::anyhow!("gateway timeout").into();
        assert!(matches!(err, Error::Other(ref m) if m == "gateway timeout"));
        assert!(err.is_external());
    }
}
