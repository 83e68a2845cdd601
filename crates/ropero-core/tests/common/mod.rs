//! Test doubles and common utilities for the contract tests
//!
//! These doubles track call counts and support failure injection so the
//! tests can verify sequencing contracts (what was called, what was not)
//! without any real store backend.
#![allow(dead_code)]

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ropero_core::error::{Error, Result};
use ropero_core::traits::item_store::{ItemDocument, ItemFields, SnapshotStream};
use ropero_core::traits::{AuthEvent, AuthSignal, ImagePipeline, ItemStore, MediaStore};
use ropero_core::{ClothingCollection, ClothingRepository};
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A controlled ItemStore the tests can seed, fail, and observe
pub struct ControlledItemStore {
    state: Mutex<StoreState>,
    next_id: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub set_field_calls: AtomicUsize,
    pub replace_calls: AtomicUsize,
    pub fail_add: AtomicBool,
    pub fail_get: AtomicBool,
}

struct StoreState {
    documents: Vec<ItemDocument>,
    watchers: Vec<mpsc::UnboundedSender<Result<Vec<ItemDocument>>>>,
}

impl ControlledItemStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                documents: Vec::new(),
                watchers: Vec::new(),
            }),
            next_id: AtomicUsize::new(1),
            add_calls: AtomicUsize::new(0),
            set_field_calls: AtomicUsize::new(0),
            replace_calls: AtomicUsize::new(0),
            fail_add: AtomicBool::new(false),
            fail_get: AtomicBool::new(false),
        }
    }

    /// Seed a document directly, simulating another client's write
    pub fn seed(&self, fields: ItemFields) -> String {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut state = self.state.lock().unwrap();
        state.documents.push(ItemDocument {
            id: id.clone(),
            fields,
        });
        Self::publish(&mut state);
        id
    }

    /// Remove a document directly, simulating another client's delete
    pub fn remove_external(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.documents.retain(|d| d.id != id);
        Self::publish(&mut state);
    }

    /// Terminate all live subscriptions with an error emission
    pub fn emit_error(&self) {
        let mut state = self.state.lock().unwrap();
        state
            .watchers
            .retain(|tx| tx.send(Err(Error::remote("permission revoked"))).is_ok());
    }

    /// Current documents, in store order
    pub fn documents(&self) -> Vec<ItemDocument> {
        self.state.lock().unwrap().documents.clone()
    }

    pub fn add_call_count(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn set_field_call_count(&self) -> usize {
        self.set_field_calls.load(Ordering::SeqCst)
    }

    pub fn replace_call_count(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }

    fn publish(state: &mut StoreState) {
        let snapshot = state.documents.clone();
        state
            .watchers
            .retain(|tx| tx.send(Ok(snapshot.clone())).is_ok());
    }
}

#[async_trait::async_trait]
impl ItemStore for ControlledItemStore {
    async fn get(&self, id: &str) -> Result<Option<ItemDocument>> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Error::remote("injected get failure"));
        }
        let state = self.state.lock().unwrap();
        Ok(state.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn add(&self, fields: &ItemFields) -> Result<String> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(Error::remote("injected add failure"));
        }
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut state = self.state.lock().unwrap();
        state.documents.push(ItemDocument {
            id: id.clone(),
            fields: fields.clone(),
        });
        Self::publish(&mut state);
        Ok(id)
    }

    async fn set_field(&self, id: &str, field: &str, value: serde_json::Value) -> Result<()> {
        self.set_field_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let Some(document) = state.documents.iter_mut().find(|d| d.id == id) else {
            return Err(Error::not_found(id));
        };
        match field {
            ropero_core::traits::item_store::FIELD_WEAR_COUNT => {
                document.fields.wear_count = value
                    .as_u64()
                    .ok_or_else(|| Error::invalid_input("wear count must be an integer"))?
                    as u32;
            }
            other => return Err(Error::invalid_input(format!("unknown field: {other}"))),
        }
        Self::publish(&mut state);
        Ok(())
    }

    async fn replace(&self, id: &str, fields: &ItemFields) -> Result<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        if let Some(document) = state.documents.iter_mut().find(|d| d.id == id) {
            document.fields = fields.clone();
        } else {
            state.documents.push(ItemDocument {
                id: id.to_string(),
                fields: fields.clone(),
            });
        }
        Self::publish(&mut state);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.documents.len();
        state.documents.retain(|d| d.id != id);
        if state.documents.len() != before {
            Self::publish(&mut state);
        }
        Ok(())
    }

    fn watch(&self) -> SnapshotStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.state.lock().unwrap();
        let _ = tx.send(Ok(state.documents.clone()));
        state.watchers.push(tx);
        Box::pin(UnboundedReceiverStream::new(rx))
    }
}

/// A MediaStore double that counts uploads and can be made to fail
pub struct CountingMediaStore {
    pub upload_calls: AtomicUsize,
    pub fail: AtomicBool,
    uploads: Mutex<Vec<Vec<u8>>>,
}

impl CountingMediaStore {
    pub fn new() -> Self {
        Self {
            upload_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_call_count(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn uploaded_payloads(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MediaStore for CountingMediaStore {
    async fn upload(&self, bytes: &[u8]) -> Result<String> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::upload("injected upload failure"));
        }
        self.uploads.lock().unwrap().push(bytes.to_vec());
        Ok(format!("https://blobs.test/clothing_images/{n}.jpg"))
    }
}

/// An ImagePipeline double that tags payloads instead of transcoding them
pub struct StubPipeline {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl StubPipeline {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImagePipeline for StubPipeline {
    fn normalize(&self, source: &[u8]) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::decode("injected decode failure"));
        }
        let mut out = b"JPEG!".to_vec();
        out.extend_from_slice(source);
        Ok(out)
    }
}

/// An auth signal the test drives by hand
pub struct ControlledAuthSignal {
    watchers: Mutex<Vec<mpsc::UnboundedSender<AuthEvent>>>,
}

impl ControlledAuthSignal {
    pub fn new() -> Self {
        Self {
            watchers: Mutex::new(Vec::new()),
        }
    }

    pub fn emit(&self, event: AuthEvent) {
        self.watchers
            .lock()
            .unwrap()
            .retain(|tx| tx.send(event).is_ok());
    }
}

impl AuthSignal for ControlledAuthSignal {
    fn watch(&self) -> Pin<Box<dyn Stream<Item = AuthEvent> + Send + 'static>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers.lock().unwrap().push(tx);
        Box::pin(UnboundedReceiverStream::new(rx))
    }
}

/// Wire a repository over fresh doubles
pub fn harness() -> (
    Arc<ControlledItemStore>,
    Arc<CountingMediaStore>,
    Arc<StubPipeline>,
    Arc<ClothingRepository>,
) {
    let items = Arc::new(ControlledItemStore::new());
    let media = Arc::new(CountingMediaStore::new());
    let pipeline = Arc::new(StubPipeline::new());
    let repository = Arc::new(ClothingRepository::new(
        items.clone(),
        media.clone(),
        pipeline.clone(),
    ));
    (items, media, pipeline, repository)
}

/// Wire a collection on top of [`harness`]
pub fn collection_harness() -> (
    Arc<ControlledItemStore>,
    Arc<ClothingRepository>,
    ClothingCollection,
) {
    let (items, _, _, repository) = harness();
    let collection = ClothingCollection::new(repository.clone());
    (items, repository, collection)
}

/// Sample fields for seeding
pub fn fields(name: &str, wear_count: u32) -> ItemFields {
    ItemFields {
        name: name.to_string(),
        category: "Camiseta".to_string(),
        image_url: format!("https://blobs.test/clothing_images/{name}.jpg"),
        wear_count,
    }
}
