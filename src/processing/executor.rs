//! Concurrent batch conversion.
//!
//! Each image is encoded inside `spawn_blocking` so the async runtime is
//! never blocked. All images of a batch are in flight at once; the batch
//! succeeds only if every image does.

use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::{BatchProgress, Quality, UploadFile};
use crate::utils::{ConverterError, ConverterResult};

use super::encoder::ImageEncoder;

/// Runs one encoder over a whole batch.
pub struct BatchExecutor<E> {
    encoder: Arc<E>,
}

impl<E: ImageEncoder> BatchExecutor<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder: Arc::new(encoder),
        }
    }

    /// Encodes every file at `quality`, returning outputs in input order.
    ///
    /// Fails fast: the first error aborts the remaining tasks and is returned
    /// as-is. `on_progress` is called once per finished image.
    pub async fn execute_batch<F>(
        &self,
        files: &[UploadFile],
        quality: Quality,
        on_progress: F,
    ) -> ConverterResult<Vec<Vec<u8>>>
    where
        F: Fn(BatchProgress),
    {
        let total = files.len();
        info!("Converting {} image(s) at {}", total, quality);

        let mut tasks = JoinSet::new();
        for (index, file) in files.iter().enumerate() {
            let encoder = Arc::clone(&self.encoder);
            let bytes = Arc::clone(&file.bytes);
            tasks.spawn_blocking(move || (index, encoder.encode(&bytes, quality)));
        }

        let mut outputs: Vec<Option<Vec<u8>>> = std::iter::repeat_with(|| None).take(total).collect();
        let mut completed = 0;

        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined
                .map_err(|e| ConverterError::processing(format!("Task panicked: {e}")))?;
            let name = &files[index].name;

            match result {
                Ok(encoded) => {
                    completed += 1;
                    debug!("'{}' → {} bytes ({}/{})", name, encoded.len(), completed, total);
                    on_progress(BatchProgress::new(completed, total, name));
                    outputs[index] = Some(encoded);
                }
                Err(e) => {
                    warn!("Conversion failed for '{}': {}", name, e);
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        outputs
            .into_iter()
            .map(|slot| slot.ok_or_else(|| ConverterError::processing("Missing conversion result")))
            .collect()
    }
}
