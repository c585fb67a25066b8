use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::webp::types::{PixelLayout, Raster};

/// Writes `image` as an 8-bit RGB or RGBA PNG, one scanline at a time.
pub fn encode_png(image: &Raster<'_>, output: &mut dyn Write) -> Result<()> {
    debug!(
        "Encoding PNG image: {}x{} {:?}, stride {}",
        image.width, image.height, image.layout, image.stride
    );

    let mut encoder = png::Encoder::new(output, image.width, image.height);
    encoder.set_color(match image.layout {
        PixelLayout::Rgb => png::ColorType::Rgb,
        PixelLayout::Rgba => png::ColorType::Rgba,
    });
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(ConversionError::png)?;
    {
        let mut stream = writer.stream_writer().map_err(ConversionError::png)?;
        for row in image.rows() {
            stream.write_all(row).map_err(ConversionError::png)?;
        }
        stream.finish().map_err(ConversionError::png)?;
    }
    writer.finish().map_err(ConversionError::png)?;

    debug!("PNG encoding complete");
    Ok(())
}
