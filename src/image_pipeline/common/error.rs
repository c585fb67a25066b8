use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Input file {path} exceeds maximum size of {max_size} bytes")]
    InputTooLarge { path: String, max_size: u64 },

    #[error("Invalid WebP image: {0}")]
    InvalidWebP(String),

    #[error("Animated WebP images are not supported")]
    UnsupportedAnimation,

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode WebP image: {0}")]
    DecodeError(String),

    #[error("Failed to encode {format} image: {message}")]
    EncodeError { format: &'static str, message: String },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl ConversionError {
    pub(crate) fn png(err: impl std::fmt::Display) -> Self {
        Self::EncodeError { format: "PNG", message: err.to_string() }
    }

    pub(crate) fn jpeg(err: impl std::fmt::Display) -> Self {
        Self::EncodeError { format: "JPEG", message: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
