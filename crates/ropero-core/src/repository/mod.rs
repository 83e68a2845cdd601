//! Clothing repository
//!
//! The ClothingRepository is responsible for:
//! - Mirroring the remote collection through a live snapshot stream
//! - Resolving individual items by id on demand
//! - Create/update/delete against the remote store
//! - The composite "add item with photo" operation
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐      ┌────────────────────┐      ┌─────────────┐
//! │ ImagePipeline │─────▶│ ClothingRepository │─────▶│  ItemStore  │
//! └──────────────┘      └────────────────────┘      └─────────────┘
//!                                │
//!                                ▼
//!                         ┌─────────────┐
//!                         │ MediaStore  │
//!                         └─────────────┘
//! ```
//!
//! ## Create-With-Photo Flow
//!
//! 1. Normalize the source image (decode, scale, JPEG encode)
//! 2. Upload the payload to the blob store
//! 3. Add the document `{name, category, image_url, wear_count: 0}`
//!
//! The sequence is strict: if normalization or upload fails no document is
//! ever created. If the document write fails after a successful upload the
//! blob is left orphaned in the blob store; that leak is accepted rather
//! than reconciled, and no step is retried.

use std::pin::Pin;
use std::sync::Arc;

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::model::ClothingItem;
use crate::traits::item_store::{FIELD_WEAR_COUNT, ItemFields};
use crate::traits::{ImagePipeline, ItemStore, MediaStore};

/// Live stream of canonical item snapshots
pub type ItemStream = Pin<Box<dyn Stream<Item = Result<Vec<ClothingItem>>> + Send + 'static>>;

/// Orchestrates the item store, blob store, and image pipeline behind a
/// single stable contract
///
/// The repository owns the only write path to the remote store. All
/// dependencies are injected at construction; the repository holds no
/// cached state of its own.
pub struct ClothingRepository {
    /// Remote document collection
    items: Arc<dyn ItemStore>,

    /// Remote blob store for photos
    media: Arc<dyn MediaStore>,

    /// Photo normalization pipeline
    pipeline: Arc<dyn ImagePipeline>,
}

impl ClothingRepository {
    /// Create a new repository over the given collaborators
    pub fn new(
        items: Arc<dyn ItemStore>,
        media: Arc<dyn MediaStore>,
        pipeline: Arc<dyn ImagePipeline>,
    ) -> Self {
        Self {
            items,
            media,
            pipeline,
        }
    }

    /// Open a live stream over the full collection
    ///
    /// Each emission is the complete current set translated into the
    /// canonical [`ClothingItem`] shape, in store order. The stream ends
    /// only on cancellation (drop) or a store-side error emission.
    pub fn watch_all(&self) -> ItemStream {
        let snapshots = self.items.watch();
        Box::pin(snapshots.map(|next| {
            next.map(|documents| {
                documents
                    .into_iter()
                    .map(ClothingItem::from_document)
                    .collect()
            })
        }))
    }

    /// Resolve a single item by id
    pub async fn get_by_id(&self, id: &str) -> Result<ClothingItem> {
        match self.items.get(id).await {
            Ok(Some(document)) => Ok(ClothingItem::from_document(document)),
            Ok(None) => Err(Error::not_found(id)),
            Err(e) => {
                error!(operation = "get_by_id", id, error = %e, "item fetch failed");
                Err(e)
            }
        }
    }

    /// Create a new item with a photo
    ///
    /// Runs the strict normalize → upload → add sequence and returns the
    /// store-assigned id. The new document starts with `wear_count = 0`.
    pub async fn create_with_photo(
        &self,
        name: &str,
        category: &str,
        source_image: Vec<u8>,
    ) -> Result<String> {
        if name.is_empty() {
            return Err(Error::invalid_input("item name cannot be empty"));
        }

        // Codec work is CPU-bound; keep it off the async executor.
        let pipeline = Arc::clone(&self.pipeline);
        let encoded = tokio::task::spawn_blocking(move || pipeline.normalize(&source_image))
            .await
            .map_err(|e| Error::other(format!("image task failed: {e}")))?
            .map_err(|e| {
                error!(operation = "create_with_photo", error = %e, "image normalization failed");
                e
            })?;

        let image_url = match self.media.upload(&encoded).await {
            Ok(url) => url,
            Err(e) => {
                error!(operation = "create_with_photo", error = %e, "photo upload failed, no document created");
                return Err(e);
            }
        };
        debug!(image_url, "photo uploaded");

        let fields = ItemFields {
            name: name.to_string(),
            category: category.to_string(),
            image_url,
            wear_count: 0,
        };

        match self.items.add(&fields).await {
            Ok(id) => {
                info!(operation = "create_with_photo", id, "item created");
                Ok(id)
            }
            Err(e) => {
                // The uploaded blob is now orphaned; accepted, not reconciled.
                error!(operation = "create_with_photo", error = %e, "document create failed after upload");
                Err(e)
            }
        }
    }

    /// Record one "use" of an item: wear counter goes from n to n+1
    ///
    /// Returns the new counter value.
    pub async fn record_use(&self, id: &str) -> Result<u32> {
        let item = self.get_by_id(id).await?;
        let next = item.wear_count.saturating_add(1);
        match self
            .items
            .set_field(id, FIELD_WEAR_COUNT, serde_json::json!(next))
            .await
        {
            Ok(()) => {
                debug!(operation = "record_use", id, wear_count = next, "wear counter incremented");
                Ok(next)
            }
            Err(e) => {
                error!(operation = "record_use", id, error = %e, "counter update failed");
                Err(e)
            }
        }
    }

    /// Send an item to the wash: wear counter resets to 0
    pub async fn send_to_wash(&self, id: &str) -> Result<()> {
        match self
            .items
            .set_field(id, FIELD_WEAR_COUNT, serde_json::json!(0))
            .await
        {
            Ok(()) => {
                debug!(operation = "send_to_wash", id, "wear counter reset");
                Ok(())
            }
            Err(e) => {
                error!(operation = "send_to_wash", id, error = %e, "counter reset failed");
                Err(e)
            }
        }
    }

    /// Overwrite an existing item with a full document write
    pub async fn update(&self, item: &ClothingItem) -> Result<()> {
        if item.id.is_empty() {
            return Err(Error::invalid_input("cannot update an item without an id"));
        }
        match self.items.replace(&item.id, &item.to_fields()).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(operation = "update", id = %item.id, error = %e, "item update failed");
                Err(e)
            }
        }
    }

    /// Delete an item; deleting an already-absent id succeeds
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.items.delete(id).await {
            Ok(()) => {
                debug!(operation = "delete", id, "item deleted");
                Ok(())
            }
            Err(e) => {
                error!(operation = "delete", id, error = %e, "item delete failed");
                Err(e)
            }
        }
    }
}
