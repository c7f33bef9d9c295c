//! Deterministic encoder for coordinator and executor tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use crate::core::Quality;
use crate::utils::{ConverterError, ConverterResult};
use super::encoder::ImageEncoder;

/// Prefix that makes [`StubEncoder`] reject an input.
pub const CORRUPT_PREFIX: &[u8] = b"corrupt";

/// Output depends only on input and quality: `quality.percent()` followed by
/// the input truncated to `percent`% of its length.
#[derive(Debug, Clone, Default)]
pub struct StubEncoder {
    calls: Arc<AtomicUsize>,
    delay_for_quality: Option<(Quality, Duration)>,
    delay_for_len: Option<(usize, Duration)>,
}

impl StubEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps before encoding anything at `quality`.
    pub fn with_delay_for_quality(mut self, quality: Quality, delay: Duration) -> Self {
        self.delay_for_quality = Some((quality, delay));
        self
    }

    /// Sleeps before encoding inputs of exactly `len` bytes.
    pub fn with_delay_for_len(mut self, len: usize, delay: Duration) -> Self {
        self.delay_for_len = Some((len, delay));
        self
    }

    /// Shared counter of `encode` calls
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn expected_output(source: &[u8], quality: Quality) -> Vec<u8> {
        let keep = source.len() * quality.percent() as usize / 100;
        let mut out = vec![quality.percent()];
        out.extend_from_slice(&source[..keep]);
        out
    }
}

impl ImageEncoder for StubEncoder {
    fn encode(&self, source: &[u8], quality: Quality) -> ConverterResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some((q, delay)) = self.delay_for_quality {
            if q == quality {
                std::thread::sleep(delay);
            }
        }
        if let Some((len, delay)) = self.delay_for_len {
            if len == source.len() {
                std::thread::sleep(delay);
            }
        }

        if source.starts_with(CORRUPT_PREFIX) {
            return Err(ConverterError::processing("Failed to decode PNG: bad signature"));
        }
        Ok(Self::expected_output(source, quality))
    }
}
