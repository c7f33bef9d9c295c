use std::path::Path;
use std::str::FromStr;
use crate::utils::ConverterError;

/// MIME type declared for files whose type cannot be determined.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
    AVIF,
    GIF,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
            Self::WebP => &["webp"],
            Self::AVIF => &["avif"],
            Self::GIF => &["gif"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }

    /// MIME type a browser would declare for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
            Self::AVIF => "image/avif",
            Self::GIF => "image/gif",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConverterError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "webp" => Ok(Self::WebP),
            "avif" => Ok(Self::AVIF),
            "gif" => Ok(Self::GIF),
            _ => Err(ConverterError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: impl AsRef<Path>) -> Result<ImageFormat, ConverterError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConverterError::format(
            format!("File has no extension: {}", path.display())
        ))?;

    ImageFormat::from_str(ext)
}

/// Declared MIME type for a path, derived from its extension.
///
/// Unknown or missing extensions declare [`UNKNOWN_MIME_TYPE`], so they are
/// dropped by upload filtering instead of failing the whole upload.
pub fn mime_type_for_path(path: impl AsRef<Path>) -> &'static str {
    format_from_extension(path)
        .map(|f| f.mime_type())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(format_from_extension("Photo.PNG").unwrap(), ImageFormat::PNG);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::JPEG);
        assert_eq!(ImageFormat::WebP.primary_extension(), "webp");
    }

    #[test]
    fn mime_types_follow_extensions() {
        assert_eq!(mime_type_for_path("shots/a.png"), "image/png");
        assert_eq!(mime_type_for_path("a.jpeg"), "image/jpeg");
        assert_eq!(mime_type_for_path("notes.txt"), UNKNOWN_MIME_TYPE);
        assert_eq!(mime_type_for_path("Makefile"), UNKNOWN_MIME_TYPE);
    }
}
