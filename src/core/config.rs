//! Converter configuration.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::core::Quality;
use crate::utils::{ConverterError, ConverterResult, ValidationError};

/// File name the desktop shell looks for in the app config directory.
pub const CONFIG_FILE_NAME: &str = "converter.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterConfig {
    /// Quality used on start and restored by reset
    pub default_quality: f32,
    /// Encode losslessly when quality is at its maximum
    pub lossless_at_max: bool,
    /// Where downloads are written; the platform download folder when unset
    pub download_dir: Option<PathBuf>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_quality: Quality::DEFAULT.value(),
            lossless_at_max: true,
            download_dir: None,
        }
    }
}

impl ConverterConfig {
    pub fn from_json_str(json: &str) -> ConverterResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ValidationError::settings(format!("Invalid config: {e}")))?;
        config.default_quality()?;
        Ok(config)
    }

    /// Loads a config file, falling back to defaults when it does not exist.
    pub async fn load(path: impl AsRef<Path>) -> ConverterResult<Self> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(json) => {
                debug!("Loading config from {}", path.display());
                Self::from_json_str(&json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConverterError::from(e)),
        }
    }

    /// Default quality, validated
    pub fn default_quality(&self) -> ConverterResult<Quality> {
        Quality::new(self.default_quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ConverterConfig::from_json_str(r#"{ "losslessAtMax": false }"#).unwrap();
        assert!(!config.lossless_at_max);
        assert_eq!(config.default_quality().unwrap(), Quality::DEFAULT);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn out_of_range_default_quality_is_rejected() {
        let err = ConverterConfig::from_json_str(r#"{ "defaultQuality": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid quality value"));
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = ConverterConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConverterError::Validation(ValidationError::Settings(_))));
    }

    #[tokio::test]
    async fn load_falls_back_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConverterConfig::load(dir.path().join(CONFIG_FILE_NAME)).await.unwrap();
        assert!(config.lossless_at_max);

        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "defaultQuality": 0.5, "downloadDir": "/tmp/out" }"#).unwrap();
        let config = ConverterConfig::load(&path).await.unwrap();
        assert_eq!(config.default_quality().unwrap().percent(), 50);
        assert_eq!(config.download_dir, Some(PathBuf::from("/tmp/out")));
    }
}
