//! Error types for the analysis core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying the player dataset.
///
/// Empty derived views (an unknown team filter, a quadrant population that
/// fails the volume threshold) are not errors; they surface as empty
/// collections or `None` and callers render an empty state.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to read player data from {}: {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed player data: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column missing from player data: {0}")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value {value:?} in column {column}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("player not found: {0}")]
    PlayerNotFound(String),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
