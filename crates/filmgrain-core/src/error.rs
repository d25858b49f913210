use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::convert::FormatError;

/// Input rejected before any external process was started. The tool is never
/// run with a partially validated record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No image files provided")]
    NoImages,

    #[error("No metadata to write")]
    NothingToWrite,

    #[error("No metadata tags specified for removal")]
    NoTags,

    #[error("Invalid {field}: {value}")]
    Field { field: &'static str, value: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The external tool could not be started or reported failure.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("ExifTool not found: {0}")]
    MissingBinary(PathBuf),

    #[error("Failed to run {binary}: {source}")]
    Spawn { binary: PathBuf, source: io::Error },

    #[error("ExifTool error: {stderr}")]
    Tool { stderr: String },

    #[error("Failed to write export file {path}: {source}")]
    ExportFile { path: PathBuf, source: io::Error },
}

/// The preset store file could not be read, written, or decoded.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read database {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write database {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to encode database: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid database entry in {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Self::Validation(ValidationError::Format(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
