//! In-memory blob store

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ropero_core::config::MediaConfig;
use ropero_core::traits::MediaStore;
use tracing::debug;
use uuid::Uuid;

/// Scheme prefix for URLs minted by this backend
const URL_BASE: &str = "memory://blobs/";

/// In-memory implementation of [`MediaStore`]
///
/// Every upload gets a fresh UUID key under the configured namespace
/// prefix, so concurrent uploads never collide and no two items share a
/// blob. URLs use a `memory://` scheme and can be dereferenced back into
/// bytes with [`MemoryMediaStore::fetch`], which the full-stack tests use
/// to prove uploaded photos are retrievable.
pub struct MemoryMediaStore {
    key_prefix: String,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryMediaStore {
    /// Create an empty blob store with the given key namespace
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            key_prefix: config.key_prefix.clone(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Dereference a URL previously returned by `upload`
    pub fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let key = url.strip_prefix(URL_BASE)?;
        self.blobs
            .lock()
            .expect("blob state poisoned")
            .get(key)
            .cloned()
    }

    /// Number of blobs currently held (orphans included)
    pub fn len(&self) -> usize {
        self.blobs.lock().expect("blob state poisoned").len()
    }

    /// Whether the store holds no blobs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, bytes: &[u8]) -> ropero_core::Result<String> {
        let key = format!("{}{}.jpg", self.key_prefix, Uuid::new_v4().simple());
        self.blobs
            .lock()
            .expect("blob state poisoned")
            .insert(key.clone(), bytes.to_vec());
        debug!(key, size = bytes.len(), "blob stored");
        Ok(format!("{URL_BASE}{key}"))
    }
}
