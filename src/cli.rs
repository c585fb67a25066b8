//! Command-line front end
//!
//! Flags are declared with `clap`; the three conversion flags are checked by
//! hand so that each missing one gets its own message, and the format is
//! parsed only once all three are present.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use thiserror::Error;
use tracing::debug;

use crate::image_pipeline::encode::MAX_JPEG_QUALITY;
use crate::image_pipeline::{
    ConversionConfig, OutputFormat, PipelineTimings, WebPConversionPipeline,
};

/// Exit status for a failed conversion.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for invalid or missing arguments, matching clap's own.
pub const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "webp_convert_rs",
    version,
    about = "Convert a WebP image to PNG or JPEG",
    long_about = None
)]
pub struct Cli {
    /// WebP image to read
    #[arg(long = "in-file", value_name = "PATH")]
    pub in_file: Option<PathBuf>,

    /// Destination of the converted image
    #[arg(long = "out-file", value_name = "PATH")]
    pub out_file: Option<PathBuf>,

    /// Output image format: png or jpeg (jpg)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = MAX_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Refuse input files larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub max_input_size: Option<u64>,

    /// Print how long each conversion step took
    #[arg(long)]
    pub timings: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("Missing input file!")]
    MissingInputFile,

    #[error("Missing output file!")]
    MissingOutputFile,

    #[error("Missing image format!")]
    MissingFormat,

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Fully specified conversion request.
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    pub format: OutputFormat,
    pub config: ConversionConfig,
    pub timings: bool,
}

impl Cli {
    /// Checks the required flags in the order input, output, format, then
    /// parses the format.
    pub fn into_args(self) -> Result<ConvertArgs, CliError> {
        let in_file = self.in_file.ok_or(CliError::MissingInputFile)?;
        let out_file = self.out_file.ok_or(CliError::MissingOutputFile)?;
        let format = self.format.ok_or(CliError::MissingFormat)?;
        let format = format
            .parse::<OutputFormat>()
            .map_err(|_| CliError::UnsupportedFormat(format.clone()))?;

        let config = ConversionConfig::builder()
            .jpeg_quality(self.quality)
            .max_input_size(self.max_input_size)
            .build();

        Ok(ConvertArgs {
            in_file,
            out_file,
            format,
            config,
            timings: self.timings,
        })
    }
}

/// A finished conversion; displays as the success status line.
#[derive(Debug)]
pub struct Converted {
    pub in_file: PathBuf,
    pub format: OutputFormat,
    /// Present when `--timings` was given.
    pub timings: Option<PipelineTimings>,
}

impl fmt::Display for Converted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Save {} to {} success", self.in_file.display(), self.format)
    }
}

/// Runs the conversion described by `cli`.
///
/// Missing flags and bad format values surface as a [`CliError`] inside the
/// returned error.
pub fn run(cli: Cli) -> anyhow::Result<Converted> {
    let args = cli.into_args()?;
    let pipeline = WebPConversionPipeline::new(args.config.clone());

    let timings = pipeline
        .convert_file_with_timings(&args.in_file, &args.out_file, args.format)
        .with_context(|| format!("Save {} to {} failed", args.in_file.display(), args.format))?;

    let converted = Converted {
        in_file: args.in_file,
        format: args.format,
        timings: args.timings.then_some(timings),
    };
    debug!("{}", converted);
    Ok(converted)
}
