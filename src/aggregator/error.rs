//! Aggregator error types.

use thiserror::Error;

/// Construction-time failures. Per-record problems are never errors; the record is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("invalid window range: start={start}, end={end}, width={width}")]
    InvalidRange { start: f64, end: f64, width: f64 },

    #[error("too many windows: {count} exceeds {max}")]
    TooManyWindows { count: f64, max: usize },
}

pub type AggregateResult<T> = Result<T, AggregateError>;
