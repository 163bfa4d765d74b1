use thiserror::Error;

use crate::cell::CellId;

/// Errors returned by grouping, parsing and generation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A cell has a NaN or infinite coordinate.
    #[error("cell {id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Offending cell id.
        id: CellId,
    },

    /// Two cells in the same case share an id.
    #[error("duplicate cell id {id}")]
    DuplicateId {
        /// The repeated id.
        id: CellId,
    },

    /// A line of batch input could not be parsed.
    #[error("line {line}: {message}")]
    MalformedInput {
        /// 1-based input line.
        line: usize,
        /// Human-readable explanation.
        message: String,
    },

    /// Batch input ended before everything it declared was read.
    #[error("unexpected end of input after line {line}: expected {expected}")]
    UnexpectedEnd {
        /// Last line that was read (0 for empty input).
        line: usize,
        /// What was still expected.
        expected: String,
    },

    /// A case of a batch failed.
    #[error("case {case}: {source}")]
    InCase {
        /// 1-based case number.
        case: usize,
        /// What went wrong.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            message: message.into(),
        }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
