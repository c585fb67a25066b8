use std::borrow::Cow;
use std::io::Write;

use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::webp::types::{PixelLayout, Raster};

/// Writes `image` as a baseline JPEG at the given quality.
///
/// JPEG carries no alpha channel; for RGBA rasters the alpha byte of every
/// pixel is dropped and the color samples are kept as they are.
pub fn encode_jpeg(image: &Raster<'_>, output: &mut dyn Write, quality: u8) -> Result<()> {
    debug!(
        "Encoding JPEG image: {}x{} {:?}, quality {}",
        image.width, image.height, image.layout, quality
    );

    let rgb = packed_rgb(image);
    let mut encoder = JpegEncoder::new_with_quality(output, quality);
    encoder
        .encode(&rgb, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(ConversionError::jpeg)?;

    debug!("JPEG encoding complete");
    Ok(())
}

/// Pixels as tightly packed RGB, borrowed when the raster already is.
fn packed_rgb<'a>(image: &Raster<'a>) -> Cow<'a, [u8]> {
    let row_len = image.row_len();
    let size = row_len * image.height as usize;
    if image.layout == PixelLayout::Rgb && image.stride == row_len {
        return Cow::Borrowed(&image.data[..size]);
    }

    let mut rgb = Vec::with_capacity(image.width as usize * image.height as usize * 3);
    for row in image.rows() {
        match image.layout {
            PixelLayout::Rgb => rgb.extend_from_slice(row),
            PixelLayout::Rgba => {
                for pixel in row.chunks_exact(4) {
                    rgb.extend_from_slice(&pixel[..3]);
                }
            }
        }
    }
    Cow::Owned(rgb)
}
