use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::ConverterResult;

/// Final path component of `path`, or the whole string when there is none
pub fn extract_filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Returns a path inside `dir` for `file_name` that does not exist yet.
///
/// Collisions get a browser-style suffix: `a.webp`, `a (1).webp`, `a (2).webp`.
pub async fn unique_path(dir: impl AsRef<Path>, file_name: &str) -> ConverterResult<PathBuf> {
    let dir = dir.as_ref();
    let candidate = dir.join(file_name);
    if !fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
    let ext = name.extension().and_then(|e| e.to_str());

    let mut n = 1u32;
    loop {
        let numbered = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(numbered);
        if !fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_either_separator() {
        assert_eq!(extract_filename("/tmp/shots/a.png"), "a.png");
        assert_eq!(extract_filename(r"C:\shots\b.png"), "b.png");
        assert_eq!(extract_filename("c.png"), "c.png");
    }

    #[tokio::test]
    async fn collisions_get_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_path(dir.path(), "a.webp").await.unwrap();
        assert_eq!(first, dir.path().join("a.webp"));

        std::fs::write(&first, b"1").unwrap();
        let second = unique_path(dir.path(), "a.webp").await.unwrap();
        assert_eq!(second, dir.path().join("a (1).webp"));

        std::fs::write(&second, b"2").unwrap();
        let third = unique_path(dir.path(), "a.webp").await.unwrap();
        assert_eq!(third, dir.path().join("a (2).webp"));
    }
}
