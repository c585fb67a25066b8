//! Common utilities module
//!
//! This module contains shared utilities used across the image pipeline:
//! error types, whole-file reading and step timings.

pub mod error;
pub mod file_util;
pub mod timing;

pub use error::{ConversionError, Result};
pub use file_util::{read_file, read_file_into, read_file_with_max_size};
pub use timing::{PipelineTimings, StepTiming, Timer};
