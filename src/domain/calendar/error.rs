use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no VCALENDAR block found")]
    NotACalendar,
    #[error("malformed calendar data: {0}")]
    Malformed(String),
}

/// Why a single feed was left out of an aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    /// Every configured feed failed; callers receive an empty result.
    #[error("no feed could be loaded")]
    NoFeedsAvailable,
    #[error("feed task failed: {0}")]
    Task(String),
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        AppError::Aggregation(err.to_string())
    }
}
