//! Source and converted image records held by the coordinator.

use std::sync::Arc;
use crate::core::handle::{HandleRegistry, ObjectUrl};
use crate::core::UploadFile;
use crate::utils::ImageFormat;

/// An accepted upload with a handle for previewing it.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file: UploadFile,
    pub url: ObjectUrl,
    pub size: u64,
}

impl SourceImage {
    pub fn register(file: UploadFile, registry: &mut HandleRegistry) -> Self {
        let url = registry.create(&file.mime_type, Arc::clone(&file.bytes));
        let size = file.size();
        Self { file, url, size }
    }
}

/// Encoded output for the source image at the same index.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub bytes: Arc<[u8]>,
    pub url: ObjectUrl,
    pub size: u64,
}

impl ConvertedImage {
    pub fn register(bytes: Vec<u8>, registry: &mut HandleRegistry) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        let url = registry.create(ImageFormat::WebP.mime_type(), Arc::clone(&bytes));
        let size = bytes.len() as u64;
        Self { bytes, url, size }
    }
}
