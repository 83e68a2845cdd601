//! Core traits for the wardrobe-sync system
//!
//! This module defines the abstract interfaces for the external collaborators:
//!
//! - [`ItemStore`]: Remote document collection (CRUD + live snapshot stream)
//! - [`MediaStore`]: Remote blob store for uploaded photos
//! - [`ImagePipeline`]: Photo normalization (decode, scale, re-encode)
//! - [`AuthSignal`]: Opaque signed-in/signed-out events

pub mod auth;
pub mod image_pipeline;
pub mod item_store;
pub mod media_store;

pub use auth::{AuthEvent, AuthSignal};
pub use image_pipeline::ImagePipeline;
pub use item_store::{ItemDocument, ItemFields, ItemStore, SnapshotStream};
pub use media_store::MediaStore;
