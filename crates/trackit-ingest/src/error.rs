//! Error types for record source ingestion.

use std::path::PathBuf;

use thiserror::Error;
use trackit_model::ExportError;

/// Errors that can occur while loading a record source folder.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A required record file is missing from the source folder.
    #[error("required file {name} not found in {path}")]
    FileNotFound { name: String, path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Failed to open or parse a CSV file.
    #[error("failed to read CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in a record table.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Record Errors ===
    /// Invalid value in a metadata field.
    #[error("invalid {field} value '{value}' in {path}")]
    InvalidValue {
        field: String,
        value: String,
        path: PathBuf,
    },

    /// A row could not be turned into a typed record.
    #[error("invalid record in {path}: {source}")]
    Record {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

impl IngestError {
    pub fn missing_column(column: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            path: path.into(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
