// Module declarations in dependency order
pub mod utils;
pub mod logging;
pub mod core;
pub mod processing;
pub mod preview;
#[cfg(feature = "desktop")]
pub mod commands;

// Public exports for external consumers
pub use core::{
    AppPhase,
    AppSnapshot,
    BatchOutcome,
    ConversionCoordinator,
    ConverterConfig,
    ObjectUrl,
    Quality,
    UploadFile,
    UploadSource,
};
pub use preview::{ConversionSummary, DirectorySink, DownloadSink};
pub use processing::{ImageEncoder, WebpEncoder};
pub use utils::{ConverterError, ConverterResult};

// This library file is the public API; the desktop entry point is in main.rs.
