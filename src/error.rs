//! Error types for the map engine.
//!
//! Only the I/O boundaries produce errors. Inside the resolution engine
//! nothing is fatal: malformed geometry, unresolvable references and
//! reference cycles are recovered locally and the engine returns a
//! best-effort result (partial legacy data is the expected steady state).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading a project payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Failed to read the payload file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The payload is not valid JSON or misses required fields.
    #[error("invalid payload JSON: {source}")]
    InvalidJson {
        #[from]
        source: serde_json::Error,
    },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
