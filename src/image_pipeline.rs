//! Image processing pipeline module
//!
//! This module provides a structured approach to WebP conversion, with
//! separate modules for WebP reading, PNG/JPEG writing and conversion
//! orchestration.

pub mod webp;
pub mod encode;
pub mod conversions;
pub mod common;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{
    ConversionError,
    PipelineTimings,
    Result,
};

pub use webp::{
    BitstreamFeatures,
    BitstreamFormat,
    CompressedImage,
    DecodedImage,
    LibwebpDecoder,
    PixelLayout,
    Raster,
    WebPDecoder,
};

pub use encode::{
    ConversionConfig,
    ConversionConfigBuilder,
    ImageWriter,
    OutputFormat,
    StandardImageWriter,
};

pub use conversions::{
    WebPConversionPipeline,
};
