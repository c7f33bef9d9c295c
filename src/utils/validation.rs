use std::path::Path;
use tracing::debug;
use crate::core::UploadFile;
use crate::utils::{ConverterResult, ValidationError};

/// Substring a declared MIME type must contain to be accepted.
pub const ACCEPTED_MIME_FRAGMENT: &str = "png";

/// Whether a declared MIME type is accepted for conversion
pub fn is_accepted_type(mime_type: &str) -> bool {
    mime_type.contains(ACCEPTED_MIME_FRAGMENT)
}

/// Keeps only uploads whose declared type is accepted.
///
/// Rejected files are dropped silently. An upload with nothing left fails
/// with [`ValidationError::NoValidFiles`].
pub fn filter_accepted(files: Vec<UploadFile>) -> ConverterResult<Vec<UploadFile>> {
    let offered = files.len();
    let accepted: Vec<UploadFile> = files
        .into_iter()
        .filter(|file| {
            let keep = is_accepted_type(&file.mime_type);
            if !keep {
                debug!("Dropping '{}' ({})", file.name, file.mime_type);
            }
            keep
        })
        .collect();

    if accepted.is_empty() {
        return Err(ValidationError::NoValidFiles.into());
    }

    debug!("Accepted {}/{} uploaded files", accepted.len(), offered);
    Ok(accepted)
}

/// Validates that an input path exists and is a regular file
pub async fn validate_input_path(path: impl AsRef<Path>) -> ConverterResult<()> {
    let path = path.as_ref();
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| ValidationError::path_not_found(path))?;

    if !metadata.is_file() {
        return Err(ValidationError::not_a_file(path).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ConverterError;

    fn file(name: &str, mime: &str) -> UploadFile {
        UploadFile::new(name, mime, vec![0u8; 4])
    }

    #[test]
    fn keeps_only_png_uploads_in_order() {
        let files = vec![
            file("a.png", "image/png"),
            file("notes.txt", "text/plain"),
            file("b.png", "image/png"),
            file("c.jpg", "image/jpeg"),
        ];
        let accepted = filter_accepted(files).unwrap();
        let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
    }

    #[test]
    fn type_check_is_substring_and_case_sensitive() {
        assert!(is_accepted_type("image/png"));
        assert!(is_accepted_type("image/apng"));
        assert!(!is_accepted_type("image/PNG"));
        assert!(!is_accepted_type(""));
    }

    #[test]
    fn nothing_accepted_is_no_valid_files() {
        let err = filter_accepted(vec![file("notes.txt", "text/plain")]).unwrap_err();
        assert!(matches!(err, ConverterError::Validation(ValidationError::NoValidFiles)));

        let err = filter_accepted(Vec::new()).unwrap_err();
        assert!(matches!(err, ConverterError::Validation(ValidationError::NoValidFiles)));
    }

    #[tokio::test]
    async fn input_path_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_input_path(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a file"));

        let missing = dir.path().join("missing.png");
        let err = validate_input_path(&missing).await.unwrap_err();
        assert!(err.to_string().contains("File not found"));

        let present = dir.path().join("ok.png");
        std::fs::write(&present, b"x").unwrap();
        validate_input_path(&present).await.unwrap();
    }
}
