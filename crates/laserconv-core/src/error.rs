//! Error handling for laserconv
//!
//! A single conversion either completes or fails with one of the typed
//! errors below. The GEO parser is strict and reports structural
//! violations with the offending line number; the LST interpreter is
//! permissive by design and only fails on I/O or reference errors.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::geometry::PointId;

/// Conversion error type.
///
/// The unified error type for parsing, geometry resolution, and emission.
#[derive(Error, Debug)]
pub enum Error {
    /// A record in a structured input violated its expected shape.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The input ended in the middle of a record.
    #[error("Unexpected end of input at line {line}")]
    UnexpectedEndOfInput {
        /// 1-based line number where more input was expected.
        line: usize,
    },

    /// A segment, arc, or circle references a point id that is not in the model.
    #[error("Unresolved point reference: {id}")]
    UnresolvedReference {
        /// The missing point id.
        id: PointId,
    },

    /// An arc whose start point coincides with its center has no radius
    /// and cannot be resolved into angles.
    #[error("Degenerate arc: zero radius")]
    DegenerateArc,

    /// Standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a `MalformedRecord` error for the given line.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
