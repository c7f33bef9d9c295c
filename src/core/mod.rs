//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`ConversionCoordinator`]: the upload → convert → preview → reset state machine
//! - [`Quality`] and [`AppPhase`]: conversion setting and current phase
//! - [`UploadFile`]: a file-like input with its declared type
//! - [`HandleRegistry`]: session-scoped handles to in-memory images
//! - [`ConverterConfig`]: startup configuration

mod config;
mod coordinator;
mod handle;
mod images;
mod progress;
#[cfg(feature = "desktop")]
mod state;
mod types;
mod upload;

pub use config::{CONFIG_FILE_NAME, ConverterConfig};
pub use coordinator::{AppSnapshot, BatchOutcome, ConversionCoordinator};
pub use handle::{HANDLE_SCHEME, HandleEntry, HandleRegistry, ObjectUrl};
pub use images::{ConvertedImage, SourceImage};
pub use progress::BatchProgress;
#[cfg(feature = "desktop")]
pub use state::{AppState, PROGRESS_EVENT, STATE_EVENT};
pub use types::{AppPhase, Quality};
pub use upload::{UploadFile, UploadSource};
