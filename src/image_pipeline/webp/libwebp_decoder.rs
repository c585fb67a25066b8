//! WebP decoding backed by libwebp.
//!
//! All calls into `libwebp-sys` live in this module. Buffers allocated by the
//! decoder are owned by [`LibwebpBuffer`] and freed when it is dropped, so an
//! early return anywhere in the pipeline cannot leak them.

use tracing::debug;

use libwebp_sys::{VP8StatusCode, WEBP_CSP_MODE, WebPDecoderConfig};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::webp::compressed_image::CompressedImage;
use crate::image_pipeline::webp::decoder::WebPDecoder;
use crate::image_pipeline::webp::types::{
    BitstreamFeatures, BitstreamFormat, DecodedImage, PixelLayout,
};

/// Decoder that hands the whole compressed buffer to `WebPDecode`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LibwebpDecoder;

impl WebPDecoder for LibwebpDecoder {
    fn decode(&self, image: &CompressedImage, layout: PixelLayout) -> Result<DecodedImage> {
        let data = image.data();
        debug!("Decoding WebP image, {} bytes as {:?}", data.len(), layout);

        let mut config = WebPDecoderConfig::new().map_err(|_| {
            ConversionError::DecodeError("libwebp decoder version mismatch".to_string())
        })?;
        config.output.colorspace = match layout {
            PixelLayout::Rgb => WEBP_CSP_MODE::MODE_RGB,
            PixelLayout::Rgba => WEBP_CSP_MODE::MODE_RGBA,
        };

        // From here on the output buffer is released on every path.
        let mut buffer = LibwebpBuffer { config };
        let status =
            unsafe { libwebp_sys::WebPDecode(data.as_ptr(), data.len(), &mut buffer.config) };
        if status != VP8StatusCode::VP8_STATUS_OK {
            return Err(ConversionError::DecodeError(status_message(status).to_string()));
        }

        let decoded = DecodedImage::from_libwebp(buffer, layout)?;
        debug!(
            "Decoded image: {}x{}, stride {}",
            decoded.width(),
            decoded.height(),
            decoded.stride()
        );
        Ok(decoded)
    }
}

/// Decoder state whose output buffer belongs to libwebp.
pub(crate) struct LibwebpBuffer {
    config: WebPDecoderConfig,
}

impl LibwebpBuffer {
    /// Width, height and stride of the decoded RGB(A) buffer.
    pub(crate) fn geometry(&self) -> (u32, u32, usize) {
        let output = &self.config.output;
        let stride = unsafe { output.u.RGBA.stride };
        (
            output.width.max(0) as u32,
            output.height.max(0) as u32,
            stride.max(0) as usize,
        )
    }

    pub(crate) fn pixels(&self) -> &[u8] {
        unsafe {
            let rgba = self.config.output.u.RGBA;
            if rgba.rgba.is_null() {
                &[]
            } else {
                std::slice::from_raw_parts(rgba.rgba, rgba.size)
            }
        }
    }
}

impl Drop for LibwebpBuffer {
    fn drop(&mut self) {
        unsafe { libwebp_sys::WebPFreeDecBuffer(&mut self.config.output) };
    }
}

/// Cheap check of the RIFF/WebP signature and image dimensions.
pub fn is_webp(data: &[u8]) -> bool {
    let mut width: i32 = 0;
    let mut height: i32 = 0;
    unsafe { libwebp_sys::WebPGetInfo(data.as_ptr(), data.len(), &mut width, &mut height) != 0 }
}

/// Extracts the bitstream features without decoding pixel data.
pub fn read_features(data: &[u8]) -> Result<BitstreamFeatures> {
    let mut features: libwebp_sys::WebPBitstreamFeatures = unsafe { std::mem::zeroed() };
    let status =
        unsafe { libwebp_sys::WebPGetFeatures(data.as_ptr(), data.len(), &mut features) };
    if status != VP8StatusCode::VP8_STATUS_OK {
        return Err(ConversionError::InvalidWebP(status_message(status).to_string()));
    }

    let format = match features.format {
        1 => BitstreamFormat::Lossy,
        2 => BitstreamFormat::Lossless,
        _ => BitstreamFormat::Undefined,
    };

    Ok(BitstreamFeatures {
        width: features.width.max(0) as u32,
        height: features.height.max(0) as u32,
        has_alpha: features.has_alpha != 0,
        has_animation: features.has_animation != 0,
        format,
    })
}

fn status_message(status: VP8StatusCode) -> &'static str {
    match status {
        VP8StatusCode::VP8_STATUS_OK => "ok",
        VP8StatusCode::VP8_STATUS_OUT_OF_MEMORY => "out of memory",
        VP8StatusCode::VP8_STATUS_INVALID_PARAM => "invalid parameter",
        VP8StatusCode::VP8_STATUS_BITSTREAM_ERROR => "bitstream error",
        VP8StatusCode::VP8_STATUS_UNSUPPORTED_FEATURE => "unsupported feature",
        VP8StatusCode::VP8_STATUS_NOT_ENOUGH_DATA => "not enough data",
        _ => "decoding aborted",
    }
}
