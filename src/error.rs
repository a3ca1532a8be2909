//! Error types for the Bacon game.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaconError {
    /// An input file is missing or unreadable. Fatal at startup.
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    /// A malformed record or a dangling id reference. The record is skipped.
    #[error("bad record at {path}:{line}: {reason}")]
    Data {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// An actor that is not in the graph, or not reachable from the root.
    #[error("actor not found: {0}")]
    NotFound(String),

    /// An aggregate query over a tree that holds nothing but its root.
    #[error("no actors connected to {0}")]
    EmptyTree(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BaconError>;

impl BaconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BaconError::Io {
            source,
            path: path.into(),
        }
    }

    pub(crate) fn data(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        BaconError::Data {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }
}

// Terminal reads and writes in the shell have no file path.
impl From<std::io::Error> for BaconError {
    fn from(source: std::io::Error) -> Self {
        BaconError::Io {
            source,
            path: PathBuf::from("<stdio>"),
        }
    }
}

impl From<toml::de::Error> for BaconError {
    fn from(e: toml::de::Error) -> Self {
        BaconError::Config(e.to_string())
    }
}
