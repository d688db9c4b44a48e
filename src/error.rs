//! Error types shared by the store, the collection and the dispatcher.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Input rejected before any mutation happened.
    #[error("{0}")]
    Validation(String),

    #[error("workout '{0}' does not exist")]
    NotFound(String),

    /// The document (or settings file) could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not JSON of the expected shape.
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded before writing.
    #[error("could not serialize workouts for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl WorkoutError {
    pub fn validation(message: impl Into<String>) -> Self {
        WorkoutError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WorkoutError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, WorkoutError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, WorkoutError>;
