//! Error types for catalog and settings loading.
//!
//! Both are fatal at startup. Nothing produced while replaying a session is
//! an error: unmatched notifications and unknown player references are
//! logged and skipped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: malformed declaration: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: unknown declaration {kind} {subtype}")]
    UnknownDeclaration {
        line: usize,
        kind: String,
        subtype: String,
    },

    #[error("line {line}: unknown cause '{cause}'")]
    UnknownCause { line: usize, cause: String },

    #[error("line {line}: {subtype} does not take a cause")]
    UnexpectedCause { line: usize, subtype: String },
}

impl CatalogError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
