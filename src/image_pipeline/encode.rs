//! PNG and JPEG writing module
//!
//! This module encodes decoded rasters, honoring their row stride.

mod writer;
mod png_writer;
mod jpeg_writer;
mod standard_image_writer;
pub mod types;

pub use writer::ImageWriter;
pub use png_writer::encode_png;
pub use jpeg_writer::encode_jpeg;
pub use standard_image_writer::StandardImageWriter;
pub use types::{OutputFormat, ConversionConfig, ConversionConfigBuilder, MAX_JPEG_QUALITY};
