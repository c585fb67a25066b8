#![allow(dead_code)]

use std::path::{Path, PathBuf};

#[path = "../../src/image_pipeline/test_support.rs"]
mod fixtures;

pub use fixtures::{animated_webp, lossless_rgb, lossless_rgba, lossy_rgb};

pub fn checkerboard_rgb(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            if (x / 4 + y / 4) % 2 == 0 {
                pixels.extend_from_slice(&[230, 40, 25]);
            } else {
                pixels.extend_from_slice(&[15, 90, 200]);
            }
        }
    }
    pixels
}

/// Alpha never reaches zero, so lossless encoding keeps the color samples.
pub fn translucent_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
                ((x + y) * 16 % 240 + 16) as u8,
            ]);
        }
    }
    pixels
}

pub fn solid_rgb(width: usize, height: usize, color: [u8; 3]) -> Vec<u8> {
    color.iter().copied().cycle().take(width * height * 3).collect()
}

pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub pixels: Vec<u8>,
}

pub fn read_png(path: &Path) -> DecodedPng {
    let file = std::fs::File::open(path).unwrap();
    let mut reader = png::Decoder::new(file).read_info().unwrap();
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels).unwrap();
    pixels.truncate(info.buffer_size());
    DecodedPng {
        width: info.width,
        height: info.height,
        color_type: info.color_type,
        pixels,
    }
}
