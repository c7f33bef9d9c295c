//! File-like upload inputs.

use std::path::Path;
use std::sync::Arc;
use serde::Serialize;
use crate::utils::{ConverterResult, extract_filename, mime_type_for_path, validate_input_path};

/// How a set of files reached the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadSource {
    /// Dropped onto the window
    Drop,
    /// Chosen in a file selection dialog
    Picker,
}

/// A file offered for conversion, with the type it declares.
///
/// Bytes are shared so that a batch snapshot can be handed to encoder
/// threads without copying image data.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, declaring its type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> ConverterResult<Self> {
        let path = path.as_ref();
        validate_input_path(path).await?;
        let bytes = tokio::fs::read(path).await?;
        let display = path.to_string_lossy();

        Ok(Self::new(
            extract_filename(&display),
            mime_type_for_path(path),
            bytes,
        ))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_path_declares_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("shot.png");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&png, [1u8, 2, 3]).unwrap();
        std::fs::write(&txt, b"hello").unwrap();

        let file = UploadFile::from_path(&png).await.unwrap();
        assert_eq!(file.name, "shot.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.size(), 3);

        let file = UploadFile::from_path(&txt).await.unwrap();
        assert_eq!(file.mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn from_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadFile::from_path(dir.path().join("gone.png")).await.is_err());
    }
}
