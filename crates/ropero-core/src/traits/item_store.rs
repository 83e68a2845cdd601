// # Item Store Trait
//
// Defines the interface to the remote document collection holding the
// authoritative set of clothing items.
//
// ## Implementations
//
// - In-memory (tests, demos, embedded use): `ropero-store-memory` crate
// - Production: a wrapper over the hosted document-database SDK
//
// ## Usage
//
// ```rust,ignore
// use ropero_core::ItemStore;
// use tokio_stream::StreamExt;
//
// let store = /* ItemStore implementation */;
//
// // Mirror the collection
// let mut snapshots = store.watch();
// while let Some(snapshot) = snapshots.next().await {
//     println!("collection now holds {} items", snapshot?.len());
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use tokio_stream::Stream;

/// Remote field name for the display name
pub const FIELD_NAME: &str = "nombre";
/// Remote field name for the category label
pub const FIELD_CATEGORY: &str = "categoría";
/// Remote field name for the photo URL
pub const FIELD_IMAGE_URL: &str = "imagenUrl";
/// Remote field name for the wear counter
pub const FIELD_WEAR_COUNT: &str = "vecesPuesto";

/// Document fields as stored in the remote collection
///
/// The serialized names are the legacy schema the collection has used since
/// the first release; renaming them would strand existing documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Category label
    #[serde(rename = "categoría")]
    pub category: String,

    /// URL of the uploaded photo
    #[serde(rename = "imagenUrl")]
    pub image_url: String,

    /// Wear counter
    #[serde(rename = "vecesPuesto")]
    pub wear_count: u32,
}

/// A document as delivered by the store: assigned id plus fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDocument {
    /// Store-assigned document id
    pub id: String,
    /// Document fields
    pub fields: ItemFields,
}

/// Live stream of full collection snapshots
///
/// Every emission replaces the entire visible collection; the stream never
/// completes on its own and is cancelled by dropping it. An `Err` emission
/// terminates the logical subscription.
pub type SnapshotStream =
    Pin<Box<dyn Stream<Item = crate::Result<Vec<ItemDocument>>> + Send + 'static>>;

/// Trait for remote document collection implementations
///
/// Implementations must be thread-safe and usable across async tasks. They
/// wrap whatever wire format the store SDK defines; nothing beyond these
/// operations is assumed by the core.
///
/// ## Responsibilities
///
/// - Perform single-shot CRUD calls against the backing collection
/// - Deliver full-snapshot change notifications through [`ItemStore::watch`]
/// - Assign document identity on [`ItemStore::add`]
///
/// ## Not Responsibilities
///
/// - Retry logic (the core performs no retries anywhere)
/// - Caching beyond a single call (the collection container owns the mirror)
/// - Deciding when to subscribe or unsubscribe (owned by `ClothingCollection`)
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fetch a single document by id
    ///
    /// # Returns
    ///
    /// - `Ok(Some(document))`: The document exists
    /// - `Ok(None)`: No document with this id
    /// - `Err(Error)`: The store call failed
    async fn get(&self, id: &str) -> crate::Result<Option<ItemDocument>>;

    /// Add a new document; the store assigns and returns its id
    ///
    /// Callers must not pre-supply an id.
    async fn add(&self, fields: &ItemFields) -> crate::Result<String>;

    /// Set a single field on an existing document
    ///
    /// This is the one place partial-document writes are permitted, used
    /// for the two wear-counter mutations. Setting a field on a missing
    /// document fails with `NotFound`.
    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> crate::Result<()>;

    /// Overwrite the full document (upsert, matching the store's `set` call)
    async fn replace(&self, id: &str, fields: &ItemFields) -> crate::Result<()>;

    /// Delete a document; deleting a missing id is not an error
    async fn delete(&self, id: &str) -> crate::Result<()>;

    /// Open a live snapshot stream over the collection
    ///
    /// # Behavior
    ///
    /// - Yields the current full collection immediately when first polled
    /// - Yields the complete current set whenever any document changes,
    ///   is added, or removed (snapshots, not diffs)
    /// - Preserves the store's document order
    /// - Must be cancellation-safe (dropping the stream releases resources)
    fn watch(&self) -> SnapshotStream;
}
