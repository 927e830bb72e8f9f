use thiserror::Error;

/// Pipeline failures, returned as values to the UI host.
///
/// Errors are local and non-fatal: a bad chart request only voids that
/// chart, a failed upload leaves the previously loaded table untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExploreError {
    /// The upload was not well-formed delimited text, or no columns could
    /// be recovered from it.
    #[error("could not parse CSV: {0}")]
    Parse(String),

    /// A column reference does not exist in the table.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    /// A chart request is structurally invalid (missing column, wrong
    /// y-arity for Pie, empty y for a non-Histogram kind).
    #[error("invalid chart request: {0}")]
    InvalidChartRequest(String),

    /// The sort target is not a column of the table.
    #[error("sort column '{0}' is not in the table")]
    InvalidSortColumn(String),
}
