//! Saving converted images.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use crate::utils::{ConverterResult, unique_path};

/// A converted image ready to be saved under its download name.
#[derive(Debug, Clone)]
pub struct DownloadItem {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

/// Destination for downloads.
pub trait DownloadSink {
    /// Saves one file, returning where it ended up.
    fn save(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> impl Future<Output = ConverterResult<PathBuf>> + Send;
}

/// Writes downloads into a directory without overwriting existing files.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    async fn save(&mut self, file_name: &str, bytes: &[u8]) -> ConverterResult<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = unique_path(&self.dir, file_name).await?;
        tokio::fs::write(&path, bytes).await?;
        info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Saves items one after another, stopping at the first failure.
pub async fn save_all<S: DownloadSink>(
    items: &[DownloadItem],
    sink: &mut S,
) -> ConverterResult<Vec<PathBuf>> {
    let mut saved = Vec::with_capacity(items.len());
    for item in items {
        saved.push(sink.save(&item.file_name, &item.bytes).await?);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, bytes: &[u8]) -> DownloadItem {
        DownloadItem {
            file_name: name.to_string(),
            bytes: Arc::from(bytes),
        }
    }

    #[tokio::test]
    async fn directory_sink_writes_in_order_without_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("downloads"));
        let items = [item("a.webp", b"first"), item("a.webp", b"second"), item("b.webp", b"third")];

        let saved = save_all(&items, &mut sink).await.unwrap();
        assert_eq!(
            saved,
            [
                dir.path().join("downloads/a.webp"),
                dir.path().join("downloads/a (1).webp"),
                dir.path().join("downloads/b.webp"),
            ]
        );
        assert_eq!(std::fs::read(&saved[0]).unwrap(), b"first");
        assert_eq!(std::fs::read(&saved[1]).unwrap(), b"second");
    }
}
