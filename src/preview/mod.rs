//! Size comparison and downloads for converted batches.

mod download;
mod summary;

pub use download::{DirectorySink, DownloadItem, DownloadSink, save_all};
pub use summary::{ConversionSummary, ItemSummary, format_file_size, reduction_percent, webp_file_name};
