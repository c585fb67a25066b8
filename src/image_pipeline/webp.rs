//! WebP reading module
//!
//! This module validates WebP files and decodes them to RGB/RGBA rasters.

mod compressed_image;
mod decoder;
mod libwebp_decoder;
pub mod types;

pub use compressed_image::CompressedImage;
pub use decoder::WebPDecoder;
pub use libwebp_decoder::{LibwebpDecoder, is_webp, read_features};
pub use types::{BitstreamFeatures, BitstreamFormat, DecodedImage, PixelLayout, Raster};
