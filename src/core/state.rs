//! Application state managed by Tauri.

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager};
use tracing::{debug, warn};

use crate::core::{AppPhase, ConversionCoordinator, ConverterConfig};
use crate::processing::WebpEncoder;
use crate::utils::{ConverterError, ConverterResult};

/// Event carrying an [`AppSnapshot`](crate::core::AppSnapshot) after each phase change.
pub const STATE_EVENT: &str = "conversion-state";
/// Event carrying a [`BatchProgress`](crate::core::BatchProgress) per finished image.
pub const PROGRESS_EVENT: &str = "conversion-progress";

/// Shared handle to the coordinator and the download location.
#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<ConversionCoordinator<WebpEncoder>>,
    download_dir: Option<PathBuf>,
}

impl AppState {
    /// Builds the coordinator and starts forwarding its phase changes as events.
    pub fn new(app: AppHandle, config: &ConverterConfig) -> ConverterResult<Self> {
        let progress_app = app.clone();
        let coordinator = ConversionCoordinator::new(WebpEncoder::from_config(config), config)?
            .with_progress(move |progress| {
                let _ = progress_app.emit(PROGRESS_EVENT, progress);
            });
        let coordinator = Arc::new(coordinator);

        let mut phases = coordinator.subscribe();
        let forward = Arc::clone(&coordinator);
        tauri::async_runtime::spawn(async move {
            while phases.changed().await.is_ok() {
                let phase: AppPhase = *phases.borrow_and_update();
                debug!("Emitting {} ({:?})", STATE_EVENT, phase);
                let snapshot = forward.snapshot().await;
                if let Err(e) = app.emit(STATE_EVENT, snapshot) {
                    warn!("Failed to emit {}: {}", STATE_EVENT, e);
                }
            }
        });

        Ok(Self {
            coordinator,
            download_dir: config.download_dir.clone(),
        })
    }

    pub fn coordinator(&self) -> &ConversionCoordinator<WebpEncoder> {
        &self.coordinator
    }

    /// Configured download folder, else the platform one.
    pub fn download_dir(&self, app: &AppHandle) -> ConverterResult<PathBuf> {
        if let Some(dir) = &self.download_dir {
            return Ok(dir.clone());
        }
        app.path()
            .download_dir()
            .map_err(|e| ConverterError::io(format!("No download directory: {e}")))
    }
}
