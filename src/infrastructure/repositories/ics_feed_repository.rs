use crate::domain::calendar::FetchError;
use async_trait::async_trait;

/// Repository for retrieving raw calendar feeds.
/// Abstracts where feed text comes from (remote HTTP, fixtures in tests, etc.)
///
/// Implementations must not retry: one call is one retrieval attempt.
#[async_trait]
pub trait IcsFeedRepository: Send + Sync {
    /// Fetch the raw ICS text published at `url`
    ///
    /// # Errors
    /// Returns `FetchError::Status` for non-success responses and
    /// `FetchError::Transport` when the request could not be completed
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
