//! WebP bitstream metadata and decoded raster types

use std::fmt;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::webp::libwebp_decoder::LibwebpBuffer;

/// Compression used by the WebP bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitstreamFormat {
    /// Mixed (animations with both kinds of frames) or not reported.
    #[default]
    Undefined,
    Lossy,
    Lossless,
}

/// Metadata extracted from a WebP bitstream without decoding any pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitstreamFeatures {
    /// Width of the image (canvas width for animations) in pixels
    pub width: u32,
    /// Height of the image (canvas height for animations) in pixels
    pub height: u32,
    pub has_alpha: bool,
    pub has_animation: bool,
    pub format: BitstreamFormat,
}

/// Channel layout of a decoded raster, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn for_alpha(has_alpha: bool) -> Self {
        if has_alpha { PixelLayout::Rgba } else { PixelLayout::Rgb }
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, PixelLayout::Rgba)
    }
}

/// Borrowed view of decoded pixels.
///
/// Rows start every `stride` bytes; only the first `width * bytes_per_pixel`
/// bytes of each row are pixel data.
#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub layout: PixelLayout,
    pub data: &'a [u8],
}

impl<'a> Raster<'a> {
    /// Number of pixel bytes in a single row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Iterates over the rows from top to bottom, padding stripped.
    pub fn rows(self) -> impl Iterator<Item = &'a [u8]> {
        let data = self.data;
        let stride = self.stride;
        let row_len = self.row_len();
        (0..self.height as usize).map(move |y| &data[y * stride..y * stride + row_len])
    }
}

enum PixelStorage {
    Owned(Vec<u8>),
    Libwebp(LibwebpBuffer),
}

impl fmt::Debug for PixelStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelStorage::Owned(data) => write!(f, "Owned({} bytes)", data.len()),
            PixelStorage::Libwebp(buffer) => write!(f, "Libwebp({} bytes)", buffer.pixels().len()),
        }
    }
}

/// Decoded pixel data, owned exclusively by one conversion.
///
/// Memory allocated by libwebp is released when this value is dropped.
#[derive(Debug)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
    pixels: PixelStorage,
}

impl DecodedImage {
    /// Wraps pixels produced outside of libwebp.
    pub fn from_vec(
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
        data: Vec<u8>,
    ) -> Result<Self> {
        check_layout(width, height, stride, layout, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            layout,
            pixels: PixelStorage::Owned(data),
        })
    }

    pub(crate) fn from_libwebp(buffer: LibwebpBuffer, layout: PixelLayout) -> Result<Self> {
        let (width, height, stride) = buffer.geometry();
        check_layout(width, height, stride, layout, buffer.pixels().len())?;
        Ok(Self {
            width,
            height,
            stride,
            layout,
            pixels: PixelStorage::Libwebp(buffer),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn raster(&self) -> Raster<'_> {
        let data = match &self.pixels {
            PixelStorage::Owned(data) => data.as_slice(),
            PixelStorage::Libwebp(buffer) => buffer.pixels(),
        };
        Raster {
            width: self.width,
            height: self.height,
            stride: self.stride,
            layout: self.layout,
            data,
        }
    }
}

fn check_layout(
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
    len: usize,
) -> Result<()> {
    let overflow = || {
        ConversionError::DecodeError(format!(
            "{}x{} {:?} with stride {} overflows the address space",
            width, height, layout, stride
        ))
    };

    let row_len = (width as usize)
        .checked_mul(layout.bytes_per_pixel())
        .ok_or_else(overflow)?;
    if stride < row_len {
        return Err(ConversionError::DecodeError(format!(
            "stride {} is shorter than a {}-pixel row",
            stride, width
        )));
    }

    let required = match height as usize {
        0 => 0,
        h => stride
            .checked_mul(h - 1)
            .and_then(|offset| offset.checked_add(row_len))
            .ok_or_else(overflow)?,
    };
    if len < required {
        return Err(ConversionError::DecodeError(format!(
            "pixel buffer holds {} bytes, {}x{} {:?} needs {}",
            len, width, height, layout, required
        )));
    }

    Ok(())
}
