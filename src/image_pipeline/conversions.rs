//! Pipeline conversions module
//!
//! This module contains orchestration logic for WebP to PNG/JPEG conversion.

mod webp_to_image;


pub use webp_to_image::WebPConversionPipeline;
