use std::path::{Path, PathBuf};

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::common::file_util::{read_file, read_file_with_max_size};
use crate::image_pipeline::webp::libwebp_decoder::{is_webp, read_features};
use crate::image_pipeline::webp::types::BitstreamFeatures;

/// A validated, still-compressed WebP image.
///
/// The features are computed from `data` when the value is built and never
/// change afterwards, so a `CompressedImage` that exists is always a
/// well-formed WebP bitstream.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    path: Option<PathBuf>,
    data: Vec<u8>,
    features: BitstreamFeatures,
}

impl CompressedImage {
    /// Reads and validates the WebP file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_max_size(path, None)
    }

    /// Same as [`CompressedImage::open`], rejecting files larger than `max_size`.
    pub fn open_with_max_size<P: AsRef<Path>>(path: P, max_size: Option<u64>) -> Result<Self> {
        let path = path.as_ref();
        let data = match max_size {
            Some(max_size) => read_file_with_max_size(path, max_size)?,
            None => read_file(path)?,
        };

        let mut image = Self::from_bytes(data).map_err(|e| match e {
            ConversionError::InvalidWebP(reason) => {
                ConversionError::InvalidWebP(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
        image.path = Some(path.to_path_buf());
        Ok(image)
    }

    /// Validates an in-memory WebP bitstream and takes ownership of it.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.is_empty() {
            return Err(ConversionError::InvalidWebP("empty input".to_string()));
        }

        if !is_webp(&data) {
            return Err(ConversionError::InvalidWebP(
                "unrecognized signature or dimensions".to_string(),
            ));
        }

        let features = read_features(&data)?;
        debug!(
            width = features.width,
            height = features.height,
            has_alpha = features.has_alpha,
            has_animation = features.has_animation,
            "Parsed WebP bitstream features"
        );

        Ok(Self {
            path: None,
            data,
            features,
        })
    }

    pub fn width(&self) -> u32 {
        self.features.width
    }

    pub fn height(&self) -> u32 {
        self.features.height
    }

    pub fn features(&self) -> &BitstreamFeatures {
        &self.features
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File the image was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::test_support::{
        animated_webp, gradient_rgb, gradient_rgba, lossless_rgb, lossless_rgba,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_valid_rgb() {
        let webp = lossless_rgb(&gradient_rgb(20, 10), 20, 10);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&webp).unwrap();

        let image = CompressedImage::open(file.path()).unwrap();
        assert_eq!(image.width(), 20);
        assert_eq!(image.height(), 10);
        assert!(!image.features().has_alpha);
        assert_eq!(image.data(), &webp[..]);
        assert_eq!(image.path(), Some(file.path()));
    }

    #[test]
    fn test_valid_rgba_reports_alpha() {
        let image =
            CompressedImage::from_bytes(lossless_rgba(&gradient_rgba(3, 9), 3, 9)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 9));
        assert!(image.features().has_alpha);
        assert!(image.path().is_none());
    }

    #[test]
    fn test_empty_input_is_invalid() {
        let result = CompressedImage::from_bytes(Vec::new());
        assert!(matches!(result, Err(ConversionError::InvalidWebP(_))));
    }

    #[test]
    fn test_wrong_magic_is_invalid() {
        let mut webp = lossless_rgb(&gradient_rgb(4, 4), 4, 4);
        webp[0..4].copy_from_slice(b"RIFX");
        let result = CompressedImage::from_bytes(webp);
        assert!(matches!(result, Err(ConversionError::InvalidWebP(_))));
    }

    #[test]
    fn test_truncated_header_is_invalid() {
        let webp = lossless_rgb(&gradient_rgb(4, 4), 4, 4);
        let result = CompressedImage::from_bytes(webp[..20].to_vec());
        assert!(matches!(result, Err(ConversionError::InvalidWebP(_))));
    }

    #[test]
    fn test_animated_image_is_valid_with_flag() {
        let image = CompressedImage::from_bytes(animated_webp(6, 2)).unwrap();
        assert!(image.features().has_animation);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CompressedImage::open(dir.path().join("missing.webp"));
        assert!(matches!(result, Err(ConversionError::InputReadError(_))));
    }

    #[test]
    fn test_open_empty_file_names_path() {
        let file = NamedTempFile::new().unwrap();
        match CompressedImage::open(file.path()) {
            Err(ConversionError::InvalidWebP(reason)) => {
                assert!(reason.contains(&file.path().display().to_string()));
            }
            other => panic!("expected InvalidWebP, got {:?}", other),
        }
    }

    #[test]
    fn test_open_with_max_size_rejects_large_file() {
        let webp = lossless_rgb(&gradient_rgb(16, 16), 16, 16);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&webp).unwrap();

        let result = CompressedImage::open_with_max_size(file.path(), Some(10));
        assert!(matches!(result, Err(ConversionError::InputTooLarge { .. })));

        let image =
            CompressedImage::open_with_max_size(file.path(), Some(webp.len() as u64)).unwrap();
        assert_eq!(image.len(), webp.len());
    }

    #[test]
    fn test_clone_duplicates_buffer() {
        let image = CompressedImage::from_bytes(lossless_rgb(&gradient_rgb(2, 2), 2, 2)).unwrap();
        let copy = image.clone();
        assert_eq!(copy.data(), image.data());
        assert_eq!(copy.features(), image.features());
        assert_ne!(copy.data().as_ptr(), image.data().as_ptr());
    }
}
