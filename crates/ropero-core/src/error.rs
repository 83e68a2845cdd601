//! Error types for the wardrobe-sync system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for wardrobe-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the wardrobe-sync system
#[derive(Error, Debug)]
pub enum Error {
    /// The source image could not be decoded
    #[error("image decode error: {0}")]
    Decode(String),

    /// The blob store rejected or failed the upload
    #[error("media upload error: {0}")]
    Upload(String),

    /// The document store rejected, failed, or timed out
    #[error("remote store error: {0}")]
    Remote(String),

    /// Requested document does not exist
    #[error("item not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Live-subscription lifecycle errors
    #[error("subscription error: {0}")]
    Subscription(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an image decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a media upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Create a remote store error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a subscription lifecycle error
    pub fn subscription(msg: impl Into<String>) -> Self {
        Self::Subscription(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
