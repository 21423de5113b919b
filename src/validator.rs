// ==============================================================================
// validator.rs - Input File Validation
// ==============================================================================
// Description: Pre-flight checks on the four input tables before any parsing
// Author: Matt Barham
// Created: 2026-10-19
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{label} file not found: {path}")]
    NotFound { label: String, path: PathBuf },

    #[error("{label} path is not a regular file: {path}")]
    NotAFile { label: String, path: PathBuf },

    #[error("{label} file is not readable: {path}: {source}")]
    Unreadable {
        label: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{label} file too large: {size} bytes (max: {max} bytes)")]
    TooLarge { label: String, size: u64, max: u64 },

    #[error("{label} file is empty: {path}")]
    Empty { label: String, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFile {
    pub label: String,
    pub path: PathBuf,
    pub size: u64,
}

pub struct FileValidator {
    /// Optional size cap in bytes; unbounded unless set
    max_file_size: Option<u64>,
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileValidator {
    pub fn new() -> Self {
        Self { max_file_size: None }
    }

    pub fn with_max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = Some(max);
        self
    }

    /// Check that `path` exists, is a non-empty regular file (within the size
    /// limit, if one is set), and can be opened for reading
    pub fn validate_input(&self, label: &str, path: &Path) -> Result<ValidatedFile, ValidationError> {
        let metadata = std::fs::metadata(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => ValidationError::NotFound {
                label: label.to_string(),
                path: path.to_path_buf(),
            },
            _ => ValidationError::Unreadable {
                label: label.to_string(),
                path: path.to_path_buf(),
                source,
            },
        })?;

        if !metadata.is_file() {
            return Err(ValidationError::NotAFile {
                label: label.to_string(),
                path: path.to_path_buf(),
            });
        }

        let size = metadata.len();
        if let Some(max) = self.max_file_size {
            if size > max {
                return Err(ValidationError::TooLarge {
                    label: label.to_string(),
                    size,
                    max,
                });
            }
        }
        if size == 0 {
            return Err(ValidationError::Empty {
                label: label.to_string(),
                path: path.to_path_buf(),
            });
        }

        File::open(path).map_err(|source| ValidationError::Unreadable {
            label: label.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        debug!("{} input ok: {:?} ({} bytes)", label, path, size);

        Ok(ValidatedFile {
            label: label.to_string(),
            path: path.to_path_buf(),
            size,
        })
    }
}
