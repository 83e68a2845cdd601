// # JPEG Normalization Pipeline
//
// This crate provides the production ImagePipeline implementation for the
// ropero system.
//
// ## Purpose
//
// Photos arrive from gallery selection or camera capture at arbitrary
// resolutions. Before upload they are decoded, scaled (not cropped) to a
// fixed square bound, and re-encoded as JPEG at a fixed quality factor so
// every stored blob has bounded, predictable size.
//
// ## Architecture
//
// Everything happens in memory: decode via `image::load_from_memory`,
// scale via `resize_exact`, encode via `JpegEncoder::new_with_quality`.
// The pipeline is synchronous CPU work; callers (the repository) run it on
// a blocking worker.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder};
use ropero_core::config::ImageConfig;
use ropero_core::traits::ImagePipeline;
use ropero_core::Error;
use tracing::debug;

/// Fixed-bound JPEG normalization pipeline
///
/// With the default [`ImageConfig`] this produces 800x800 JPEG at
/// quality 85, the trade the product has always made between size and
/// fidelity.
pub struct JpegPipeline {
    config: ImageConfig,
}

impl JpegPipeline {
    /// Create a pipeline with the given normalization settings
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }
}

impl Default for JpegPipeline {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}

impl ImagePipeline for JpegPipeline {
    fn normalize(&self, source: &[u8]) -> ropero_core::Result<Vec<u8>> {
        let decoded = image::load_from_memory(source)
            .map_err(|e| Error::decode(format!("source image is not decodable: {e}")))?;

        let (width, height) = (self.config.target_width, self.config.target_height);
        // Scale to the exact target; aspect ratio is intentionally not
        // preserved so output dimensions are always the fixed square.
        let scaled = decoded
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgb8();

        let mut encoded = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut encoded, self.config.jpeg_quality);
        encoder
            .write_image(scaled.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| Error::other(format!("JPEG encoding failed: {e}")))?;

        debug!(
            source_len = source.len(),
            encoded_len = encoded.len(),
            width,
            height,
            "photo normalized"
        );
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("png encoding");
        bytes
    }

    #[test]
    fn large_source_is_bounded_by_the_target_square() {
        let pipeline = JpegPipeline::default();
        let out = pipeline.normalize(&png_bytes(4000, 3000)).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 800);
        // Quality-85 output of a busy gradient stays well under half a MB.
        assert!(out.len() < 500_000, "encoded size {} too large", out.len());
    }

    #[test]
    fn small_source_is_scaled_up_to_the_target() {
        let pipeline = JpegPipeline::default();
        let out = pipeline.normalize(&png_bytes(64, 48)).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 800);
    }

    #[test]
    fn output_is_jpeg() {
        let pipeline = JpegPipeline::default();
        let out = pipeline.normalize(&png_bytes(100, 100)).unwrap();
        assert_eq!(
            image::guess_format(&out).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn undecodable_source_fails_with_decode_error() {
        let pipeline = JpegPipeline::default();
        let result = pipeline.normalize(b"definitely not an image");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn custom_bounds_are_applied() {
        let pipeline = JpegPipeline::new(ImageConfig {
            target_width: 200,
            target_height: 200,
            jpeg_quality: 60,
        });
        let out = pipeline.normalize(&png_bytes(1000, 500)).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 200);
    }
}
