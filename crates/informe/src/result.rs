//! Result and error types for Informe.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Informe operations
pub type InformeResult<T> = Result<T, InformeError>;

/// Errors that can occur while generating reports or maintaining history
#[derive(Debug, Error)]
pub enum InformeError {
    /// Results directory could not be created
    #[error("Failed to create results directory {}: {source}", path.display())]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Report file could not be written
    #[error("Failed to write report {}: {source}", path.display())]
    ReportWrite {
        /// Destination report path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
