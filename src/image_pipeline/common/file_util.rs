//! Whole-file reading with an optional size cap.
//!
//! Files are read sequentially in fixed-size chunks instead of trusting the
//! size reported by the filesystem, since some files (procfs and friends)
//! report a size that does not match their contents.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Size of each chunk read from the file.
const CHUNK_SIZE: usize = 1 << 16;

/// Opens `path` for reading, retrying when the call is interrupted.
pub fn open_file(path: &Path) -> std::io::Result<File> {
    loop {
        match File::open(path) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Reads the complete contents of `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let mut contents = Vec::new();
    read_file_into(path, &mut contents, u64::MAX)?;
    Ok(contents)
}

/// Reads the complete contents of `path`, failing with
/// [`ConversionError::InputTooLarge`] if the file holds more than `max_size`
/// bytes. A file of exactly `max_size` bytes is accepted.
pub fn read_file_with_max_size<P: AsRef<Path>>(path: P, max_size: u64) -> Result<Vec<u8>> {
    let mut contents = Vec::new();
    read_file_into(path, &mut contents, max_size)?;
    Ok(contents)
}

/// Reads `path` into `contents`, which is cleared first.
///
/// When the file turns out to be larger than `max_size`, the first
/// `max_size` bytes are left in `contents` and an error is returned.
pub fn read_file_into<P: AsRef<Path>>(
    path: P,
    contents: &mut Vec<u8>,
    max_size: u64,
) -> Result<()> {
    let path = path.as_ref();
    contents.clear();

    let mut file = open_file(path)
        .map_err(|e| ConversionError::InputReadError(format!("{}: {}", path.display(), e)))?;

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut size: u64 = 0;

    loop {
        let len = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ConversionError::InputReadError(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let remaining = max_size - size;
        if remaining < len as u64 {
            contents.extend_from_slice(&buf[..remaining as usize]);
            return Err(ConversionError::InputTooLarge {
                path: path.display().to_string(),
                max_size,
            });
        }

        contents.extend_from_slice(&buf[..len]);
        size += len as u64;
    }

    debug!("Read {} bytes from {}", size, path.display());
    Ok(())
}
