// # ropero-core
//
// Core library for the reactive wardrobe-sync system.
//
// ## Architecture Overview
//
// This library provides the synchronization and media-ingestion core for a
// clothing inventory tracker:
// - **ItemStore**: Trait for the remote document collection (CRUD + live snapshots)
// - **MediaStore**: Trait for the remote blob store holding uploaded photos
// - **ImagePipeline**: Trait for photo normalization (decode, scale, JPEG encode)
// - **AuthSignal**: Trait delivering opaque signed-in/signed-out events
// - **ClothingRepository**: Orchestrates the stores behind a single stable contract
// - **ClothingCollection**: Observable state container mirroring the remote collection
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Store backends are separate from orchestration
// 2. **Event-Driven**: The remote collection is mirrored through an async snapshot stream
// 3. **Explicit Dependencies**: Store handles are injected at construction, no globals
// 4. **Store Truth**: Writes are confirmed by the next remote snapshot, never spliced locally
// 5. **No Retries**: A failed operation leaves prior state unchanged and is reported upward

pub mod collection;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod traits;

// Re-export core types for convenience
pub use collection::ClothingCollection;
pub use config::{ImageConfig, MediaConfig, SyncConfig};
pub use error::{Error, Result};
pub use model::{Category, ClothingItem};
pub use repository::ClothingRepository;
pub use traits::{AuthSignal, ImagePipeline, ItemStore, MediaStore};
