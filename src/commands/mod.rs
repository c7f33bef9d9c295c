//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the web view:
//! - [`upload_paths`] / [`pick_images`]: register a new batch
//! - [`set_quality`]: re-convert at a new quality
//! - [`reset`]: release everything and return to idle
//! - [`download_image`] / [`download_all`]: save converted images

mod convert;

pub use convert::*;
