// # Image Pipeline Trait
//
// Defines the interface for photo normalization: decode a user-selected or
// camera-captured image, scale it to a fixed square bound, and re-encode it
// as JPEG so uploaded blobs have bounded, predictable size.
//
// ## Implementations
//
// - `ropero-image` crate: `JpegPipeline` built on the `image` codec crate

/// Trait for photo normalization implementations
///
/// `normalize` is CPU-bound synchronous work; the repository runs it on a
/// blocking worker so it never stalls the caller's async executor.
pub trait ImagePipeline: Send + Sync {
    /// Decode `source`, scale (not crop) to the fixed target, re-encode JPEG
    ///
    /// # Returns
    ///
    /// - `Ok(bytes)`: The upload-ready JPEG payload
    /// - `Err(Error::Decode)`: The source is not a decodable raster image;
    ///   no bytes are produced and the caller must not attempt upload
    fn normalize(&self, source: &[u8]) -> crate::Result<Vec<u8>>;
}
