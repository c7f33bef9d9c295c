//! Upload → convert → preview → reset state machine.
//!
//! Every transition is an explicit command. A conversion batch runs without
//! holding the state lock, so commands issued while it is in flight take
//! effect immediately; the batch generation decides whose results are kept.

use std::path::PathBuf;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::core::handle::{HandleEntry, HandleRegistry, ObjectUrl};
use crate::core::images::{ConvertedImage, SourceImage};
use crate::core::{AppPhase, BatchProgress, ConverterConfig, Quality, UploadFile, UploadSource};
use crate::preview::{self, ConversionSummary, DownloadItem, DownloadSink, webp_file_name};
use crate::processing::{BatchExecutor, ImageEncoder};
use crate::utils::{
    CONVERSION_FAILURE_MESSAGE, ConverterResult, ValidationError, filter_accepted,
};

/// How a conversion request ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BatchOutcome {
    /// Every image converted and the results are now current
    Completed { count: usize },
    /// A newer command replaced this batch; its results were dropped
    Superseded,
    /// Nothing to convert, or nothing changed
    Skipped,
}

/// Point-in-time view of the coordinator for a front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub phase: AppPhase,
    pub error: Option<String>,
    pub quality: Quality,
    pub image_count: usize,
    /// Present only when the phase is `Done`
    pub summary: Option<ConversionSummary>,
}

type ProgressCallback = Box<dyn Fn(BatchProgress) + Send + Sync>;

/// Inputs of a batch, captured when it starts.
struct PendingBatch {
    generation: u64,
    files: Vec<UploadFile>,
    quality: Quality,
}

#[derive(Debug)]
struct CoordinatorState {
    phase: AppPhase,
    error: Option<String>,
    quality: Quality,
    sources: Vec<SourceImage>,
    converted: Vec<ConvertedImage>,
    handles: HandleRegistry,
    /// Bumped by every command that makes an in-flight batch stale
    generation: u64,
}

impl CoordinatorState {
    fn new(quality: Quality) -> Self {
        Self {
            phase: AppPhase::Idle,
            error: None,
            quality,
            sources: Vec::new(),
            converted: Vec::new(),
            handles: HandleRegistry::new(),
            generation: 0,
        }
    }

    fn release_sources(&mut self) {
        for source in self.sources.drain(..) {
            self.handles.revoke(&source.url);
        }
    }

    fn release_converted(&mut self) {
        for output in self.converted.drain(..) {
            self.handles.revoke(&output.url);
        }
    }
}

/// Owns the image lists and quality; all other components only read them.
pub struct ConversionCoordinator<E> {
    state: Mutex<CoordinatorState>,
    executor: BatchExecutor<E>,
    default_quality: Quality,
    phase_tx: watch::Sender<AppPhase>,
    on_progress: Option<ProgressCallback>,
}

impl<E: ImageEncoder> ConversionCoordinator<E> {
    pub fn new(encoder: E, config: &ConverterConfig) -> ConverterResult<Self> {
        let default_quality = config.default_quality()?;
        let (phase_tx, _) = watch::channel(AppPhase::Idle);

        Ok(Self {
            state: Mutex::new(CoordinatorState::new(default_quality)),
            executor: BatchExecutor::new(encoder),
            default_quality,
            phase_tx,
            on_progress: None,
        })
    }

    /// Calls `callback` for every image finished in any batch.
    pub fn with_progress(mut self, callback: impl Fn(BatchProgress) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Observes phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<AppPhase> {
        self.phase_tx.subscribe()
    }

    fn set_phase(&self, state: &mut CoordinatorState, phase: AppPhase) {
        if state.phase != phase {
            debug!("Phase {:?} → {:?}", state.phase, phase);
        }
        state.phase = phase;
        self.phase_tx.send_replace(phase);
    }

    // ── Commands ───────────────────────────────────────────────────────────────────

    /// Registers a new batch and converts it.
    ///
    /// With no acceptable file the phase becomes `Error` and the current
    /// lists are left untouched.
    pub async fn upload(&self, source: UploadSource, files: Vec<UploadFile>) -> ConverterResult<BatchOutcome> {
        let offered = files.len();

        let accepted = match filter_accepted(files) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("{:?} upload rejected: none of {} file(s) accepted", source, offered);
                let mut state = self.state.lock().await;
                state.generation += 1;
                state.error = Some(e.user_kind().message().to_string());
                self.set_phase(&mut state, AppPhase::Error);
                return Err(e);
            }
        };

        let batch = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            info!("{:?} upload: {} of {} file(s) accepted", source, accepted.len(), offered);

            state.release_sources();
            state.release_converted();
            state.error = None;

            state.sources = accepted
                .into_iter()
                .map(|file| SourceImage::register(file, &mut state.handles))
                .collect();
            self.begin_batch(state)
        };

        self.run_batch(batch).await
    }

    /// Changes quality, re-converting every loaded image when it differs.
    pub async fn set_quality(&self, quality: Quality) -> ConverterResult<BatchOutcome> {
        let batch = {
            let mut state = self.state.lock().await;
            if state.quality == quality {
                return Ok(BatchOutcome::Skipped);
            }
            debug!("Quality {} → {}", state.quality, quality);
            state.quality = quality;
            self.begin_batch(&mut state)
        };

        self.run_batch(batch).await
    }

    /// Converts the current sources at the current quality.
    ///
    /// All-or-nothing: on any failure the phase becomes `Error` and no
    /// converted image is kept. Results of a batch that was superseded while
    /// in flight are dropped without ever being registered.
    pub async fn convert_batch(&self) -> ConverterResult<BatchOutcome> {
        let batch = {
            let mut state = self.state.lock().await;
            self.begin_batch(&mut state)
        };
        self.run_batch(batch).await
    }

    /// Starts a batch over the current sources and quality.
    ///
    /// Must run in the same critical section that changed them, so that any
    /// batch still in flight is already stale when it next takes the lock.
    fn begin_batch(&self, state: &mut CoordinatorState) -> Option<PendingBatch> {
        if state.sources.is_empty() {
            return None;
        }
        state.generation += 1;
        self.set_phase(state, AppPhase::Converting);

        Some(PendingBatch {
            generation: state.generation,
            files: state.sources.iter().map(|s| s.file.clone()).collect(),
            quality: state.quality,
        })
    }

    /// Encodes a started batch and commits it if it is still current.
    async fn run_batch(&self, batch: Option<PendingBatch>) -> ConverterResult<BatchOutcome> {
        let Some(PendingBatch { generation, files, quality }) = batch else {
            return Ok(BatchOutcome::Skipped);
        };

        let result = self
            .executor
            .execute_batch(&files, quality, |progress| {
                if let Some(callback) = &self.on_progress {
                    callback(progress);
                }
            })
            .await;

        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if state.generation != generation {
            debug!("Dropping results of superseded batch {}", generation);
            return Ok(BatchOutcome::Superseded);
        }

        match result {
            Ok(outputs) => {
                state.release_converted();
                state.converted = outputs
                    .into_iter()
                    .map(|bytes| ConvertedImage::register(bytes, &mut state.handles))
                    .collect();
                state.error = None;
                self.set_phase(state, AppPhase::Done);

                let count = state.converted.len();
                info!("Batch {} complete: {} image(s) at {}", generation, count, quality);
                Ok(BatchOutcome::Completed { count })
            }
            Err(e) => {
                warn!("Batch {} failed: {}", generation, e);
                state.release_converted();
                state.error = Some(CONVERSION_FAILURE_MESSAGE.to_string());
                self.set_phase(state, AppPhase::Error);
                Err(e)
            }
        }
    }

    /// Back to `Idle`: releases every handle and restores the default quality.
    pub async fn reset(&self) {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        state.generation += 1;
        state.release_sources();
        state.release_converted();
        state.quality = self.default_quality;
        state.error = None;
        self.set_phase(state, AppPhase::Idle);

        debug!("Reset ({} handle(s) still live)", state.handles.live_count());
    }

    // ── Queries ────────────────────────────────────────────────────────────────────

    pub async fn phase(&self) -> AppPhase {
        self.state.lock().await.phase
    }

    pub async fn quality(&self) -> Quality {
        self.state.lock().await.quality
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    /// `(sources, converted)` list lengths
    pub async fn counts(&self) -> (usize, usize) {
        let state = self.state.lock().await;
        (state.sources.len(), state.converted.len())
    }

    /// Handles issued and not yet released
    pub async fn live_handles(&self) -> usize {
        self.state.lock().await.handles.live_count()
    }

    pub async fn resolve(&self, url: &ObjectUrl) -> Option<HandleEntry> {
        self.state.lock().await.handles.resolve(url).cloned()
    }

    /// Size comparison for the current batch; only available when `Done`.
    pub async fn summary(&self) -> Option<ConversionSummary> {
        let state = self.state.lock().await;
        (state.phase == AppPhase::Done)
            .then(|| ConversionSummary::from_lists(&state.sources, &state.converted))
    }

    pub async fn snapshot(&self) -> AppSnapshot {
        let state = self.state.lock().await;
        AppSnapshot {
            phase: state.phase,
            error: state.error.clone(),
            quality: state.quality,
            image_count: state.sources.len(),
            summary: (state.phase == AppPhase::Done)
                .then(|| ConversionSummary::from_lists(&state.sources, &state.converted)),
        }
    }

    // ── Downloads ──────────────────────────────────────────────────────────────────

    /// Converted image `index` under its download name.
    pub async fn download_item(&self, index: usize) -> ConverterResult<DownloadItem> {
        let state = self.state.lock().await;
        if state.phase != AppPhase::Done {
            return Err(ValidationError::NoSuchImage(index).into());
        }

        match (state.sources.get(index), state.converted.get(index)) {
            (Some(source), Some(output)) => Ok(DownloadItem {
                file_name: webp_file_name(&source.file.name),
                bytes: output.bytes.clone(),
            }),
            _ => Err(ValidationError::NoSuchImage(index).into()),
        }
    }

    /// Every converted image, in batch order. Empty unless `Done`.
    pub async fn download_items(&self) -> Vec<DownloadItem> {
        let state = self.state.lock().await;
        if state.phase != AppPhase::Done {
            return Vec::new();
        }

        state
            .sources
            .iter()
            .zip(&state.converted)
            .map(|(source, output)| DownloadItem {
                file_name: webp_file_name(&source.file.name),
                bytes: output.bytes.clone(),
            })
            .collect()
    }

    /// Saves one converted image. The state lock is not held while saving.
    pub async fn download_one<S: DownloadSink>(&self, index: usize, sink: &mut S) -> ConverterResult<PathBuf> {
        let item = self.download_item(index).await?;
        sink.save(&item.file_name, &item.bytes).await
    }

    /// Saves every converted image, one after another.
    pub async fn download_all<S: DownloadSink>(&self, sink: &mut S) -> ConverterResult<Vec<PathBuf>> {
        let items = self.download_items().await;
        preview::save_all(&items, sink).await
    }
}
