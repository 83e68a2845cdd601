//! In-memory document collection

use std::sync::Mutex;

use async_trait::async_trait;
use ropero_core::Error;
use ropero_core::traits::item_store::{
    FIELD_CATEGORY, FIELD_IMAGE_URL, FIELD_NAME, FIELD_WEAR_COUNT, ItemDocument, ItemFields,
    ItemStore, SnapshotStream,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;
use uuid::Uuid;

/// In-memory implementation of [`ItemStore`]
///
/// Documents are kept in insertion order, which is the order snapshots are
/// delivered in. Every mutation publishes the full current collection to
/// all live watchers, mirroring the snapshot-listener behavior of the
/// hosted document store.
///
/// # Example
///
/// ```rust,no_run
/// use ropero_store_memory::MemoryItemStore;
/// use ropero_core::traits::item_store::{ItemFields, ItemStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryItemStore::new("ropa");
///
///     let id = store.add(&ItemFields {
///         name: "Camisa".into(),
///         category: "Camiseta".into(),
///         image_url: String::new(),
///         wear_count: 0,
///     }).await?;
///
///     assert!(store.get(&id).await?.is_some());
///     Ok(())
/// }
/// ```
pub struct MemoryItemStore {
    /// Collection name, for log context only
    collection: String,
    inner: Mutex<Inner>,
}

struct Inner {
    documents: Vec<ItemDocument>,
    watchers: Vec<mpsc::UnboundedSender<ropero_core::Result<Vec<ItemDocument>>>>,
}

impl MemoryItemStore {
    /// Create a new empty store for the named collection
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            inner: Mutex::new(Inner {
                documents: Vec::new(),
                watchers: Vec::new(),
            }),
        }
    }

    /// Number of documents currently held
    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.lock().documents.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("store state poisoned")
    }

    /// Publish the current collection to all live watchers, pruning any
    /// whose stream has been dropped
    fn publish(inner: &mut Inner) {
        let snapshot = inner.documents.clone();
        inner
            .watchers
            .retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
    }

    fn apply_field(fields: &mut ItemFields, field: &str, value: serde_json::Value) -> ropero_core::Result<()> {
        match field {
            FIELD_NAME => {
                fields.name = as_string(field, value)?;
            }
            FIELD_CATEGORY => {
                fields.category = as_string(field, value)?;
            }
            FIELD_IMAGE_URL => {
                fields.image_url = as_string(field, value)?;
            }
            FIELD_WEAR_COUNT => {
                fields.wear_count = value
                    .as_u64()
                    .ok_or_else(|| {
                        Error::invalid_input(format!("field {field} requires a non-negative integer"))
                    })? as u32;
            }
            other => {
                return Err(Error::invalid_input(format!("unknown field: {other}")));
            }
        }
        Ok(())
    }
}

fn as_string(field: &str, value: serde_json::Value) -> ropero_core::Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        _ => Err(Error::invalid_input(format!(
            "field {field} requires a string"
        ))),
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn get(&self, id: &str) -> ropero_core::Result<Option<ItemDocument>> {
        let inner = self.lock();
        Ok(inner.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn add(&self, fields: &ItemFields) -> ropero_core::Result<String> {
        let id = Uuid::new_v4().simple().to_string();
        let mut inner = self.lock();
        inner.documents.push(ItemDocument {
            id: id.clone(),
            fields: fields.clone(),
        });
        Self::publish(&mut inner);
        debug!(collection = %self.collection, id, "document added");
        Ok(id)
    }

    async fn set_field(
        &self,
        id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> ropero_core::Result<()> {
        let mut inner = self.lock();
        let Some(document) = inner.documents.iter_mut().find(|d| d.id == id) else {
            return Err(Error::not_found(id));
        };
        Self::apply_field(&mut document.fields, field, value)?;
        Self::publish(&mut inner);
        Ok(())
    }

    async fn replace(&self, id: &str, fields: &ItemFields) -> ropero_core::Result<()> {
        let mut inner = self.lock();
        if let Some(document) = inner.documents.iter_mut().find(|d| d.id == id) {
            document.fields = fields.clone();
        } else {
            // Upsert, matching the hosted store's full-document set call.
            inner.documents.push(ItemDocument {
                id: id.to_string(),
                fields: fields.clone(),
            });
        }
        Self::publish(&mut inner);
        Ok(())
    }

    async fn delete(&self, id: &str) -> ropero_core::Result<()> {
        let mut inner = self.lock();
        let before = inner.documents.len();
        inner.documents.retain(|d| d.id != id);
        if inner.documents.len() != before {
            Self::publish(&mut inner);
            debug!(collection = %self.collection, id, "document deleted");
        }
        Ok(())
    }

    fn watch(&self) -> SnapshotStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // First emission is the current collection, delivered immediately.
        let _ = tx.send(Ok(inner.documents.clone()));
        inner.watchers.push(tx);
        Box::pin(UnboundedReceiverStream::new(rx))
    }
}
