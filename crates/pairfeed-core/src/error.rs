use thiserror::Error;

/// Validation and contract errors exposed by `pairfeed-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pair id cannot be empty")]
    EmptyPairId,
    #[error("pair id contains invalid character {ch:?} at index {index}")]
    PairIdInvalidChar { ch: char, index: usize },

    #[error("invalid performance window '{value}', expected one of 24h, 1w, 1m, 3m, 6m, ytd, 1y, 2y, 3y, 4y, 5y")]
    InvalidWindow { value: String },

    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },
    #[error("timestamp cannot be represented in UTC")]
    TimestampOutOfRange,

    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("pair update must carry exactly one of VWAPUpdate, PerformanceUpdate, TrendlineUpdate (found {present})")]
    MalformedUpdate { present: usize },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
