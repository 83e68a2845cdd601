// # Media Store Trait
//
// Defines the interface to the remote blob store holding uploaded photos.
//
// ## Implementations
//
// - In-memory (tests, demos): `ropero-store-memory` crate
// - Production: a wrapper over the hosted blob-storage SDK

use async_trait::async_trait;

/// Trait for blob store implementations
///
/// Implementations generate a globally-unique storage key per upload (a
/// random UUID under the configured `clothing_images/` prefix) so concurrent
/// uploads never collide and no two items ever share a blob.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a byte payload and return its durable retrieval URL
    ///
    /// The returned URL is stable and publicly dereferenceable. On failure
    /// the blob is not retrievable and no item may reference it; upload must
    /// complete before the owning document is persisted.
    async fn upload(&self, bytes: &[u8]) -> crate::Result<String>;
}
