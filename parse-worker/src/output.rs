//! Output records and JSON file writing

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::stream::StreamError;

/// Result for one replayed session
#[derive(Debug, Serialize)]
pub struct SessionOutput {
    pub input: PathBuf,
    pub map: Option<String>,
    pub duration_secs: f32,
    pub players: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub frags_path: PathBuf,
    pub items_path: PathBuf,
    pub stats_path: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct FailedInput {
    pub input: PathBuf,
    pub error: String,
}

/// Printed to stdout once every input has been processed
#[derive(Debug, Default, Serialize)]
pub struct WorkerOutput {
    pub sessions: Vec<SessionOutput>,
    pub failed: Vec<FailedInput>,
    pub elapsed_ms: u128,
}

/// `<output_dir>/<stem>.<kind>.json`
pub fn output_path(output_dir: &Path, stem: &str, kind: &str) -> PathBuf {
    output_dir.join(format!("{stem}.{kind}.json"))
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StreamError> {
    let file = File::create(path).map_err(|source| StreamError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|source| StreamError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| StreamError::Write {
        path: path.to_path_buf(),
        source,
    })
}
