use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::jpeg_writer::encode_jpeg;
use crate::image_pipeline::encode::png_writer::encode_png;
use crate::image_pipeline::encode::types::ConversionConfig;
use crate::image_pipeline::encode::writer::ImageWriter;
use crate::image_pipeline::webp::types::Raster;

/// Writes PNG through the `png` crate and JPEG through `image`'s baseline encoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_png(&self, image: &Raster<'_>, output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
        encode_png(image, output)
    }

    fn write_jpeg(&self, image: &Raster<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        encode_jpeg(image, output, config.jpeg_quality)
    }
}
