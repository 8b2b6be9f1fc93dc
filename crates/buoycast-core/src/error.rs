use std::fmt;

/// Errors that fail a reconciliation call outright.
///
/// Per-block anomalies that the engine tolerates (a `<time-layout>`
/// missing its `<layout-key>`, ragged value lists) never surface here;
/// they degrade to skipped blocks or [`crate::Datum::Missing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A `<start-valid-time>` text failed strict RFC 3339 parsing.
    /// Timestamps are the join key for the merge, so no partial result
    /// is returned.
    MalformedTimestamp {
        /// `layout-key` of the owning block.
        layout_key: String,
        /// The offending text, verbatim.
        raw: String,
    },
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::MalformedTimestamp { layout_key, raw } => {
                write!(
                    f,
                    "malformed timestamp '{raw}' in time-layout '{layout_key}'"
                )
            }
        }
    }
}

impl std::error::Error for ReconcileError {}
