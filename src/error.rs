//! Top-level error taxonomy for a merge run.
//!
//! Every variant is fatal: the pipeline never retries and never continues
//! after the first failure.

use std::path::PathBuf;

use crate::drivers::DriverError;
use crate::tli::TliError;

/// Errors that abort a merge run
#[derive(Debug, thiserror::Error)]
pub enum LineReadError {
    /// Malformed or inconsistent run configuration (raised before any I/O)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A format tag that no driver is registered for
    #[error("Unknown database format for input {index}: '{tag}'")]
    UnknownFormat {
        /// 1-based position of the offending input
        index: usize,
        /// The tag as given by the user
        tag: String,
    },

    /// Inconsistent partition-function data for one database
    #[error("Malformed partition data for '{database}': {reason}")]
    MalformedPartitionData {
        /// Database name the data belongs to
        database: String,
        /// What was inconsistent
        reason: String,
    },

    /// A driver failed to produce a consistent set of transitions
    #[error("Failed to read transitions from {}: {reason}", path.display())]
    TransitionRead {
        /// Line-list file that failed
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Driver construction or partition-file loading failed
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Container framing error (phase violation or field overflow)
    #[error("Container error: {0}")]
    Container(TliError),

    /// I/O error on the output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LineReadError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn transition_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::TransitionRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<TliError> for LineReadError {
    fn from(error: TliError) -> Self {
        match error {
            TliError::MalformedPartition { database, reason } => {
                LineReadError::MalformedPartitionData { database, reason }
            }
            TliError::Io(e) => LineReadError::Io(e),
            other => LineReadError::Container(other),
        }
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, LineReadError>;
