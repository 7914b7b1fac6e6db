use super::ics_feed_repository::IcsFeedRepository;
use crate::domain::calendar::FetchError;
use async_trait::async_trait;

const USER_AGENT: &str = "CalFeed-Backend";

/// Fetches feeds over HTTP with reqwest's default transport settings
pub struct HttpIcsFeedRepository {
    http_client: reqwest::Client,
}

impl HttpIcsFeedRepository {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl Default for HttpIcsFeedRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IcsFeedRepository for HttpIcsFeedRepository {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tracing::info!(url = %url, "Fetching ICS feed");

        let response = self
            .http_client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
