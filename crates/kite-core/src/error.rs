use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct KiteError {
    pub code: String,
    pub message: String,
    pub path: Option<PathBuf>,
}

impl KiteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(
        code: impl Into<String>,
        message: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: Some(path.as_ref().to_path_buf()),
        }
    }
}
