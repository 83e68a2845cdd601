//! Configuration types for the wardrobe-sync system
//!
//! All configuration is injected at construction time; there is no ambient
//! global state. Defaults match the production deployment: the `"ropa"`
//! collection, `clothing_images/` blob keys, and 800x800 JPEG at quality 85.

use serde::{Deserialize, Serialize};

/// Main synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Name of the remote document collection
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Blob store settings
    #[serde(default)]
    pub media: MediaConfig,

    /// Photo normalization settings
    #[serde(default)]
    pub image: ImageConfig,
}

impl SyncConfig {
    /// Create a configuration with production defaults
    pub fn new() -> Self {
        Self {
            collection: default_collection(),
            media: MediaConfig::default(),
            image: ImageConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.collection.is_empty() {
            return Err(crate::Error::config("collection name cannot be empty"));
        }
        self.media.validate()?;
        self.image.validate()?;
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Blob store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Namespace prefix for uploaded blob keys
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl MediaConfig {
    /// Validate the blob store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.key_prefix.is_empty() {
            return Err(crate::Error::config("blob key prefix cannot be empty"));
        }
        Ok(())
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

/// Photo normalization configuration
///
/// Uploaded photos are scaled (not cropped) to a fixed square so blob sizes
/// stay bounded and predictable regardless of the camera's native resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Target width in pixels
    #[serde(default = "default_target_dimension")]
    pub target_width: u32,

    /// Target height in pixels
    #[serde(default = "default_target_dimension")]
    pub target_height: u32,

    /// JPEG quality factor (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl ImageConfig {
    /// Validate the image configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(crate::Error::config("target dimensions must be non-zero"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(crate::Error::config(format!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            target_width: default_target_dimension(),
            target_height: default_target_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_collection() -> String {
    "ropa".to_string()
}

fn default_key_prefix() -> String {
    "clothing_images/".to_string()
}

fn default_target_dimension() -> u32 {
    800
}

fn default_jpeg_quality() -> u8 {
    85
}
