use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading report files from disk.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed report JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    /// Classify an I/O error by kind so callers can tell a missing file
    /// from an unreadable one.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ReportError::NotFound { path },
            io::ErrorKind::PermissionDenied => ReportError::PermissionDenied { path },
            _ => ReportError::Io { path, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
