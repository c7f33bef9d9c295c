//! PNG decode → WebP encode.

use tracing::debug;
use crate::core::{ConverterConfig, Quality};
use crate::utils::{ConverterError, ConverterResult};

/// Re-encodes one image at a given quality.
///
/// Implementations are called from blocking threads, one call per image.
pub trait ImageEncoder: Send + Sync + 'static {
    fn encode(&self, source: &[u8], quality: Quality) -> ConverterResult<Vec<u8>>;
}

/// Decodes PNG with `image` and encodes WebP with libwebp.
#[derive(Debug, Clone)]
pub struct WebpEncoder {
    lossless_at_max: bool,
}

impl WebpEncoder {
    pub fn new(lossless_at_max: bool) -> Self {
        Self { lossless_at_max }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(config.lossless_at_max)
    }
}

impl Default for WebpEncoder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ImageEncoder for WebpEncoder {
    fn encode(&self, source: &[u8], quality: Quality) -> ConverterResult<Vec<u8>> {
        let image = image::load_from_memory_with_format(source, image::ImageFormat::Png)
            .map_err(|e| ConverterError::processing(format!("Failed to decode PNG: {e}")))?;

        // Native dimensions, straight alpha
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        let lossless = self.lossless_at_max && quality.is_max();
        let encoded = webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(lossless, quality.percent() as f32)
            .map_err(|e| ConverterError::processing(format!("WebP encode failed: {e:?}")))?;

        debug!(
            "Encoded {}×{} at {} ({}): {} → {} bytes",
            width,
            height,
            quality,
            if lossless { "lossless" } else { "lossy" },
            source.len(),
            encoded.len()
        );

        Ok(encoded.to_vec())
    }
}
