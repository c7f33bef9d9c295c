//! Before/after size statistics for a converted batch.

use std::path::Path;
use serde::Serialize;
use crate::core::{ConvertedImage, ObjectUrl, SourceImage};
use crate::utils::ImageFormat;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size: `0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// Download name for a converted file: the extension becomes `.webp`.
pub fn webp_file_name(name: &str) -> String {
    Path::new(name)
        .with_extension(ImageFormat::WebP.primary_extension())
        .to_string_lossy()
        .into_owned()
}

/// Percentage saved going from `original` to `converted` bytes.
///
/// Negative when the output grew; zero for an empty original.
pub fn reduction_percent(original: u64, converted: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - converted as f64) / original as f64 * 100.0
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub index: usize,
    pub file_name: String,
    pub download_name: String,
    pub original_size: u64,
    pub converted_size: u64,
    pub original_size_label: String,
    pub converted_size_label: String,
    pub reduction_percent: f64,
    pub original_url: ObjectUrl,
    pub converted_url: ObjectUrl,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSummary {
    pub image_count: usize,
    pub total_original_size: u64,
    pub total_converted_size: u64,
    pub total_original_label: String,
    pub total_converted_label: String,
    pub total_reduction_percent: f64,
    pub items: Vec<ItemSummary>,
}

impl ConversionSummary {
    /// Builds the summary from index-aligned lists.
    ///
    /// Sources without a converted counterpart count towards the totals but
    /// get no item row.
    pub fn from_lists(sources: &[SourceImage], converted: &[ConvertedImage]) -> Self {
        let total_original_size: u64 = sources.iter().map(|s| s.size).sum();
        let total_converted_size: u64 = converted.iter().map(|c| c.size).sum();

        let items = sources
            .iter()
            .zip(converted)
            .enumerate()
            .map(|(index, (source, output))| ItemSummary {
                index,
                file_name: source.file.name.clone(),
                download_name: webp_file_name(&source.file.name),
                original_size: source.size,
                converted_size: output.size,
                original_size_label: format_file_size(source.size),
                converted_size_label: format_file_size(output.size),
                reduction_percent: reduction_percent(source.size, output.size),
                original_url: source.url.clone(),
                converted_url: output.url.clone(),
            })
            .collect();

        Self {
            image_count: sources.len(),
            total_original_size,
            total_converted_size,
            total_original_label: format_file_size(total_original_size),
            total_converted_label: format_file_size(total_converted_size),
            total_reduction_percent: reduction_percent(total_original_size, total_converted_size),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HandleRegistry, UploadFile};

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(100_000), "97.66 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024), "3072 GB");
    }

    #[test]
    fn download_names() {
        assert_eq!(webp_file_name("cat.png"), "cat.webp");
        assert_eq!(webp_file_name("Cat.PNG"), "Cat.webp");
        assert_eq!(webp_file_name("archive.v2.png"), "archive.v2.webp");
        assert_eq!(webp_file_name("README"), "README.webp");
    }

    #[test]
    fn reductions() {
        assert_eq!(reduction_percent(200, 50), 75.0);
        assert_eq!(reduction_percent(100, 150), -50.0);
        assert_eq!(reduction_percent(0, 10), 0.0);
    }

    #[test]
    fn summary_aggregates_pairs() {
        let mut registry = HandleRegistry::new();
        let sources = vec![
            SourceImage::register(UploadFile::new("a.png", "image/png", vec![0u8; 1000]), &mut registry),
            SourceImage::register(UploadFile::new("b.png", "image/png", vec![0u8; 3000]), &mut registry),
        ];
        let converted = vec![
            ConvertedImage::register(vec![0u8; 250], &mut registry),
            ConvertedImage::register(vec![0u8; 750], &mut registry),
        ];

        let summary = ConversionSummary::from_lists(&sources, &converted);
        assert_eq!(summary.image_count, 2);
        assert_eq!(summary.total_original_size, 4000);
        assert_eq!(summary.total_converted_size, 1000);
        assert_eq!(summary.total_reduction_percent, 75.0);
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.items[1].download_name, "b.webp");
        assert_eq!(summary.items[1].reduction_percent, 75.0);
        assert_eq!(summary.items[0].converted_url, converted[0].url);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = ConversionSummary::from_lists(&[], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["imageCount"], 0);
        assert_eq!(json["totalReductionPercent"], 0.0);
    }
}
