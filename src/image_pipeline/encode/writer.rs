use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::encode::types::ConversionConfig;
use crate::image_pipeline::webp::types::Raster;

pub trait ImageWriter {
    fn write_png(&self, image: &Raster<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
    fn write_jpeg(&self, image: &Raster<'_>, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
