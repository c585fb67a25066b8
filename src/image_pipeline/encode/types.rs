//! Output format and conversion configuration types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::ConversionError;

/// Image formats a WebP source can be converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            _ => Err(ConversionError::UnsupportedFormat(format!(
                "{} (expected png or jpeg)",
                s
            ))),
        }
    }
}

/// Highest JPEG quality, used unless configured otherwise.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Configuration for WebP conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// JPEG quality, 1 (smallest) to 100 (best)
    pub jpeg_quality: u8,
    /// Refuse input files larger than this many bytes
    pub max_input_size: Option<u64>,
    /// Whether to validate image dimensions before decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating dimensions
    pub max_dimension: Option<u32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: MAX_JPEG_QUALITY,
            max_input_size: None,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    jpeg_quality: Option<u8>,
    max_input_size: Option<Option<u64>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl ConversionConfigBuilder {
    /// Sets the JPEG quality, clamped to 1..=100.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, MAX_JPEG_QUALITY));
        self
    }

    pub fn max_input_size(mut self, max_size: Option<u64>) -> Self {
        self.max_input_size = Some(max_size);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
            max_input_size: self.max_input_size.unwrap_or(default.max_input_size),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
