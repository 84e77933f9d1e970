//! Per-file processing status detection.
//!
//! Reads a file as a sequence of code-unit windows and decides whether it is
//! already LF-terminated, needs CRLF conversion, looks binary, or could not
//! be read. Nothing here mutates the file.

use crate::encoding::{Encoding, detect_and_skip_bom};
use crate::error::{EolError, Result};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of classifying one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// LF-terminated (or terminator-free) text; nothing to do.
    Good,
    /// Contains at least one CRLF pair; needs conversion.
    Bad,
    /// Content looks binary; skipped.
    Binary,
    /// Could not be read or is malformed for its encoding; skipped.
    Error,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileStatus::Good => "good",
            FileStatus::Bad => "bad",
            FileStatus::Binary => "binary",
            FileStatus::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// Classification result for one file.
#[derive(Debug, Clone)]
pub struct Classification {
    pub status: FileStatus,
    pub encoding: Encoding,
    pub message: String,
}

/// Per-file report as carried by events and the final run result.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub message: String,
}

/// Classify a file without modifying it.
///
/// Never fails: read errors and malformed content become
/// `FileStatus::Error` with a diagnostic in the message, so one unreadable
/// file cannot abort a batch.
pub fn classify(path: &Path) -> Classification {
    match scan(path) {
        Ok(classification) => {
            debug!(path = %path.display(), status = %classification.status, "Classified file");
            classification
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to classify file");
            Classification {
                status: FileStatus::Error,
                encoding: Encoding::None,
                message: e.to_string(),
            }
        }
    }
}

fn scan(path: &Path) -> Result<Classification> {
    let file = File::open(path).map_err(|e| EolError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut reader = BufReader::new(file);

    let encoding = detect_and_skip_bom(&mut reader).map_err(|e| EolError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let width = encoding.unit_width();

    let mut unit = [0u8; 4];
    let mut offset = encoding.bom_len() as u64;
    let mut last_unit_was_cr = false;
    let mut needs_fixing = false;

    loop {
        let filled = read_window(&mut reader, &mut unit[..width]).map_err(|e| EolError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        if filled == 0 {
            break;
        }
        if filled < width {
            // File length is not unit-aligned for its encoding
            return Err(EolError::TruncatedUnit {
                path: path.display().to_string(),
                offset,
                width,
            });
        }

        let window = &unit[..width];
        if encoding.looks_binary(window) {
            return Ok(Classification {
                status: FileStatus::Binary,
                encoding,
                message: format!("binary content at offset {}", offset),
            });
        }

        if encoding.is_cr(window) {
            last_unit_was_cr = true;
        } else {
            if last_unit_was_cr && encoding.is_lf(window) {
                needs_fixing = true;
            }
            last_unit_was_cr = false;
        }

        offset += width as u64;
    }

    let (status, message) = if needs_fixing {
        (FileStatus::Bad, "contains CRLF line endings".to_string())
    } else {
        (FileStatus::Good, "already uses LF line endings".to_string())
    };

    Ok(Classification {
        status,
        encoding,
        message,
    })
}

/// Fill `buf` from the reader, stopping early only at end of input.
///
/// Returns the number of bytes read; anything between 0 and `buf.len()`
/// means the stream ended mid-window.
fn read_window<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
