//! Compile and artifact error types.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file failures. The compiler logs these and skips the file.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize `{path}`")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("book `{0}` has no index file")]
    MissingIndex(PathBuf),
}

impl CompileError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
