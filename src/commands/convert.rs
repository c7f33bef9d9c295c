//! Tauri command handlers for conversion.

use std::path::PathBuf;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tracing::{debug, warn};

use crate::core::{AppSnapshot, AppState, BatchOutcome, Quality, UploadFile, UploadSource};
use crate::preview::DirectorySink;
use crate::utils::{ConverterError, ConverterResult};

/// Reads `paths` and hands them to the coordinator as one upload.
///
/// Unreadable paths are skipped like files of the wrong type.
pub async fn upload_from_paths(
    state: &AppState,
    source: UploadSource,
    paths: Vec<PathBuf>,
) -> ConverterResult<BatchOutcome> {
    debug!("{:?} upload of {} path(s)", source, paths.len());

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        match UploadFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    state.coordinator().upload(source, files).await
}

/// Uploads files dropped onto the page.
#[tauri::command]
pub async fn upload_paths(
    state: State<'_, AppState>,
    paths: Vec<PathBuf>,
) -> ConverterResult<BatchOutcome> {
    upload_from_paths(&state, UploadSource::Drop, paths).await
}

/// Opens a file selection dialog and uploads the chosen images.
///
/// Returns `None` when the dialog is cancelled.
#[tauri::command]
pub async fn pick_images(
    app: AppHandle,
    state: State<'_, AppState>,
) -> ConverterResult<Option<BatchOutcome>> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("PNG images", &["png"])
        .pick_files(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx
        .await
        .map_err(|_| ConverterError::io("File dialog closed unexpectedly"))?;
    let Some(picked) = picked else {
        debug!("File dialog cancelled");
        return Ok(None);
    };

    let paths = picked
        .into_iter()
        .filter_map(|file| file.into_path().ok())
        .collect();

    upload_from_paths(&state, UploadSource::Picker, paths).await.map(Some)
}

/// Changes quality, re-converting the loaded batch.
#[tauri::command]
pub async fn set_quality(
    state: State<'_, AppState>,
    quality: f32,
) -> ConverterResult<BatchOutcome> {
    let quality = Quality::new(quality)?;
    state.coordinator().set_quality(quality).await
}

/// "Try again" / "Convert more": back to an empty page.
#[tauri::command]
pub async fn reset(state: State<'_, AppState>) -> ConverterResult<()> {
    state.coordinator().reset().await;
    Ok(())
}

#[tauri::command]
pub async fn get_snapshot(state: State<'_, AppState>) -> ConverterResult<AppSnapshot> {
    Ok(state.coordinator().snapshot().await)
}

/// Saves one converted image into the download folder.
#[tauri::command]
pub async fn download_image(
    app: AppHandle,
    state: State<'_, AppState>,
    index: usize,
) -> ConverterResult<PathBuf> {
    let mut sink = DirectorySink::new(state.download_dir(&app)?);
    state.coordinator().download_one(index, &mut sink).await
}

/// Saves every converted image into the download folder.
#[tauri::command]
pub async fn download_all(
    app: AppHandle,
    state: State<'_, AppState>,
) -> ConverterResult<Vec<PathBuf>> {
    let mut sink = DirectorySink::new(state.download_dir(&app)?);
    state.coordinator().download_all(&mut sink).await
}
