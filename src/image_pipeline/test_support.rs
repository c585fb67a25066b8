//! WebP fixtures produced with libwebp's encoder.
//!
//! Also compiled into the integration tests and benches through `#[path]`.

#![allow(dead_code)]

pub fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x * 17) as u8, (y * 29) as u8, ((x + y) * 7) as u8]);
        }
    }
    pixels
}

pub fn gradient_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 13) as u8,
                (y * 31) as u8,
                ((x * y) % 256) as u8,
                (255 - (x + y) * 9 % 200) as u8,
            ]);
        }
    }
    pixels
}

pub fn lossless_rgb(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    encode(|out| unsafe {
        libwebp_sys::WebPEncodeLosslessRGB(
            pixels.as_ptr(),
            width as i32,
            height as i32,
            (width * 3) as i32,
            out,
        )
    })
}

pub fn lossless_rgba(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    encode(|out| unsafe {
        libwebp_sys::WebPEncodeLosslessRGBA(
            pixels.as_ptr(),
            width as i32,
            height as i32,
            (width * 4) as i32,
            out,
        )
    })
}

pub fn lossy_rgb(pixels: &[u8], width: usize, height: usize, quality: f32) -> Vec<u8> {
    encode(|out| unsafe {
        libwebp_sys::WebPEncodeRGB(
            pixels.as_ptr(),
            width as i32,
            height as i32,
            (width * 3) as i32,
            quality,
            out,
        )
    })
}

pub fn lossy_rgba(pixels: &[u8], width: usize, height: usize, quality: f32) -> Vec<u8> {
    encode(|out| unsafe {
        libwebp_sys::WebPEncodeRGBA(
            pixels.as_ptr(),
            width as i32,
            height as i32,
            (width * 4) as i32,
            quality,
            out,
        )
    })
}

fn encode(f: impl FnOnce(*mut *mut u8) -> usize) -> Vec<u8> {
    let mut out: *mut u8 = std::ptr::null_mut();
    let len = f(&mut out);
    assert!(len > 0 && !out.is_null(), "libwebp failed to encode fixture");
    unsafe {
        let data = std::slice::from_raw_parts(out, len).to_vec();
        libwebp_sys::WebPFree(out as *mut _);
        data
    }
}

/// RIFF container holding only a VP8X chunk with the animation flag set.
pub fn animated_webp(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(30);
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&22u32.to_le_bytes());
    data.extend_from_slice(b"WEBP");
    data.extend_from_slice(b"VP8X");
    data.extend_from_slice(&10u32.to_le_bytes());
    data.extend_from_slice(&[0x02, 0, 0, 0]);
    data.extend_from_slice(&(width - 1).to_le_bytes()[..3]);
    data.extend_from_slice(&(height - 1).to_le_bytes()[..3]);
    data
}
