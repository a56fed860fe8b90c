use thiserror::Error;

use crate::source::SourceError;

/// Failures that abort a whole extraction run. Fragments that simply do not
/// parse never show up here.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A record matched the grammar but its date is not a calendar date.
    #[error("Malformed draw date '{raw}' (expected MM/DD/YY)")]
    MalformedDate { raw: String },
    #[error("Table source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}
