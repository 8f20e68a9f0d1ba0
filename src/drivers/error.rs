//! Error types for line-database drivers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or reading a line database
#[derive(Error, Debug)]
pub enum DriverError {
    /// I/O failure on a driver input file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Unparseable content at a known line
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line (or record) number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A required section of the partition-function file is absent
    #[error("{}: missing required directive {directive}", path.display())]
    MissingDirective {
        /// Partition-function file
        path: PathBuf,
        /// Directive name, e.g. `@MOLECULE`
        directive: &'static str,
    },

    /// File content is structurally invalid (not tied to a single line)
    #[error("{}: {message}", path.display())]
    InvalidFile {
        /// File being read
        path: PathBuf,
        /// What went wrong
        message: String,
    },
}

impl DriverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
