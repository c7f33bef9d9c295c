// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Desktop entry point. The conversion logic lives in the library crate.

use tauri::http::{Response, StatusCode, header::CONTENT_TYPE};
use tauri::{DragDropEvent, Manager, WindowEvent};
use tracing::{debug, info, warn};

use png_webp_converter_lib::commands::{
    self, download_all, download_image, get_snapshot, pick_images, reset, set_quality, upload_paths,
};
use png_webp_converter_lib::core::{AppState, CONFIG_FILE_NAME, HANDLE_SCHEME};
use png_webp_converter_lib::logging::init_tracing;
use png_webp_converter_lib::{ConverterConfig, ObjectUrl, UploadSource};

fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("=== Application Starting ===");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            upload_paths,
            pick_images,
            set_quality,
            reset,
            get_snapshot,
            download_image,
            download_all,
        ])
        // Serves registered image handles to <img> tags in the web view
        .register_asynchronous_uri_scheme_protocol(HANDLE_SCHEME, |ctx, request, responder| {
            let app = ctx.app_handle().clone();
            // Platforms disagree on the scheme/host part; the id is the path.
            let url = format!("{HANDLE_SCHEME}://localhost{}", request.uri().path());

            tauri::async_runtime::spawn(async move {
                let entry = match (app.try_state::<AppState>(), ObjectUrl::parse(&url)) {
                    (Some(state), Some(url)) => state.coordinator().resolve(&url).await,
                    _ => None,
                };

                let response = match entry {
                    Some(entry) => Response::builder()
                        .header(CONTENT_TYPE, entry.mime_type)
                        .body(entry.bytes.to_vec()),
                    None => Response::builder()
                        .status(StatusCode::NOT_FOUND)
                        .body(Vec::new()),
                };

                match response {
                    Ok(response) => responder.respond(response),
                    Err(e) => warn!("Failed to build response for {}: {}", url, e),
                }
            });
        })
        .on_window_event(|window, event| {
            if let WindowEvent::DragDrop(DragDropEvent::Drop { paths, .. }) = event {
                let app = window.app_handle().clone();
                let paths = paths.clone();
                tauri::async_runtime::spawn(async move {
                    let Some(state) = app.try_state::<AppState>() else {
                        return;
                    };
                    if let Err(e) = commands::upload_from_paths(&state, UploadSource::Drop, paths).await {
                        debug!("Dropped files not converted: {}", e);
                    }
                });
            }
        })
        .setup(|app| {
            let config_path = app.path().app_config_dir()?.join(CONFIG_FILE_NAME);
            let config = tauri::async_runtime::block_on(ConverterConfig::load(&config_path))?;

            let state = AppState::new(app.app_handle().clone(), &config)?;
            app.manage(state);
            debug!("✓ AppState initialized");
            Ok(())
        })
        .build(tauri::generate_context!())?;

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });

    Ok(())
}
