use std::fmt;

/// Phases of the container writer, in the only order they may occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Nothing written yet; the header comes next
    Header,
    /// Header written; partition entries come next
    Partition,
    /// All partition entries written; the transition block comes next
    Transitions,
    /// Transition block written; only `finish` remains
    Closed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Header => "HEADER",
            Phase::Partition => "PARTITION",
            Phase::Transitions => "TRANSITIONS",
            Phase::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}

/// Errors raised while framing a TLI container
#[derive(Debug, thiserror::Error)]
pub enum TliError {
    /// An operation was attempted out of phase order
    #[error("operation requires phase {expected}, but the writer is in phase {actual}")]
    Phase {
        /// Phase the attempted operation belongs to
        expected: Phase,
        /// Phase the writer is in
        actual: Phase,
    },

    /// Partition entry rejected before any of its bytes were written
    #[error("malformed partition data for '{database}': {reason}")]
    MalformedPartition {
        /// Database name
        database: String,
        /// What was inconsistent
        reason: String,
    },

    /// The number of partition entries does not match the header
    #[error("header declared {declared} database(s) but {written} were written")]
    DatabaseCount {
        /// Count written in the header
        declared: usize,
        /// Entries actually written
        written: usize,
    },

    /// A value does not fit its fixed-width field
    #[error("{field} = {value} does not fit in the container (max {max})")]
    FieldOverflow {
        /// Field name
        field: &'static str,
        /// Offending value
        value: usize,
        /// Largest representable value
        max: usize,
    },

    /// Transition block counts are internally inconsistent
    #[error("inconsistent transition block: {0}")]
    InconsistentTransitions(String),

    /// I/O error on the output stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
