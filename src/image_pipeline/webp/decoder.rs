use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::webp::compressed_image::CompressedImage;
use crate::image_pipeline::webp::types::{DecodedImage, PixelLayout};

pub trait WebPDecoder {
    fn decode(&self, image: &CompressedImage, layout: PixelLayout) -> Result<DecodedImage>;
}
