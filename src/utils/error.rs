//! Error types for the converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Message shown when an upload contains no acceptable files.
pub const INVALID_UPLOAD_MESSAGE: &str =
    "Only PNG files are accepted. Please select at least one PNG file.";

/// Message shown when any image in a batch fails to convert.
pub const CONVERSION_FAILURE_MESSAGE: &str =
    "Image conversion failed. One or more files might be corrupted or in an unsupported format.";

/// Validation errors for uploads and settings.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// The upload contained no file of an accepted type
    #[error("No valid files in upload")]
    NoValidFiles,
    /// No converted image exists at the requested position
    #[error("No converted image at index {0}")]
    NoSuchImage(usize),
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// File path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
}

/// Main error type for the converter.
///
/// All errors are converted to this type before being returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum ConverterError {
    /// Upload or settings validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Decoding or encoding failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),
}

/// Convenience result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;

/// The two error kinds a user ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UserErrorKind {
    InvalidUpload,
    ConversionFailure,
}

impl UserErrorKind {
    /// Static, non-technical message for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidUpload => INVALID_UPLOAD_MESSAGE,
            Self::ConversionFailure => CONVERSION_FAILURE_MESSAGE,
        }
    }
}

impl ConverterError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    /// Maps this error onto what the user is shown.
    pub fn user_kind(&self) -> UserErrorKind {
        match self {
            Self::Validation(ValidationError::NoValidFiles) => UserErrorKind::InvalidUpload,
            _ => UserErrorKind::ConversionFailure,
        }
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFile(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

impl From<io::Error> for ConverterError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

impl From<PathError> for ConverterError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_valid_files_maps_to_invalid_upload() {
        let err = ConverterError::from(ValidationError::NoValidFiles);
        assert_eq!(err.user_kind(), UserErrorKind::InvalidUpload);
        assert_eq!(err.user_kind().message(), INVALID_UPLOAD_MESSAGE);
    }

    #[test]
    fn everything_else_is_a_conversion_failure() {
        let errs = [
            ConverterError::processing("bad deflate stream"),
            ConverterError::io("disk gone"),
            ConverterError::from(ValidationError::settings("quality")),
        ];
        for err in errs {
            assert_eq!(err.user_kind(), UserErrorKind::ConversionFailure);
        }
    }

    #[test]
    fn path_errors_nest_under_validation() {
        let err: ConverterError = PathError::NotFound("a.png".into()).into();
        assert!(matches!(err, ConverterError::Validation(ValidationError::Path(_))));
        assert_eq!(err.to_string(), "Validation error: Path error: File not found: a.png");
    }
}
