//! Message stream reading
//!
//! Input files hold one JSON message per line. Lines are split on the mapped
//! bytes and decoded in parallel; order is preserved.

use std::fs::File;
use std::path::{Path, PathBuf};

use fragstats_core::Message;
use memchr::memchr_iter;
use memmap2::Mmap;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to map {path:?}: {source}")]
    Map {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read every well-formed message from a stream file.
pub fn read_messages(path: &Path) -> Result<Vec<Message>, StreamError> {
    let file = File::open(path).map_err(|source| StreamError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file
        .metadata()
        .map_err(|source| StreamError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the file is only read, and only for the lifetime of the map.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| StreamError::Map {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_messages(&mmap))
}

/// Split on newlines and decode each non-blank line. Malformed lines are
/// logged with their 1-based line number and skipped.
pub fn parse_messages(bytes: &[u8]) -> Vec<Message> {
    let mut line_ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        line_ranges.push((start, end));
        start = end + 1;
    }
    if start < bytes.len() {
        line_ranges.push((start, bytes.len()));
    }

    line_ranges
        .par_iter()
        .enumerate()
        .filter_map(|(idx, &(start, end))| {
            let line = bytes[start..end].trim_ascii();
            if line.is_empty() {
                return None;
            }
            match Message::from_json(line) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "Skipping malformed message");
                    None
                }
            }
        })
        .collect()
}
