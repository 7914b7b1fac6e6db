use super::color::generate_color;
use super::error::{AggregationError, FeedError};
use super::model::{AggregationResult, EventRecord, FeedSource};
use super::parser::parse_feed;
use crate::infrastructure::repositories::IcsFeedRepository;
use async_trait::async_trait;
use futures::future::join_all;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Default time a merged result is served before feeds are fetched again
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// The cache only ever holds the latest merged result
const RESULT_KEY: () = ();

/// A feed that was fetched and parsed successfully
#[derive(Debug)]
struct LoadedFeed {
    source: FeedSource,
    records: Vec<EventRecord>,
}

#[derive(Debug)]
struct FeedLoadError {
    feed_id: String,
    url: String,
    error: FeedError,
}

pub struct CalendarService {
    feed_repo: Arc<dyn IcsFeedRepository>,
    feed_urls: Arc<[String]>,
    cache: Cache<(), Arc<AggregationResult>>,
}

impl CalendarService {
    pub fn new(
        feed_repo: Arc<dyn IcsFeedRepository>,
        feed_urls: Vec<String>,
        cache_ttl: Duration,
    ) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();

        Self {
            feed_repo,
            feed_urls: feed_urls.into(),
            cache,
        }
    }
}

#[async_trait]
pub trait CalendarServiceApi: Send + Sync {
    /// Return the merged events of all configured feeds
    ///
    /// This operation:
    /// - Serves the cached result while it is younger than the TTL
    /// - Otherwise fetches and parses every feed concurrently, skipping failed ones
    /// - Collapses concurrent refreshes into a single in-flight one
    ///
    /// A refresh where every feed failed yields an empty result that is not cached.
    async fn get_events(&self) -> Result<Arc<AggregationResult>, AggregationError>;

    /// Whether a fresh result is currently cached
    async fn is_warm(&self) -> bool;

    fn feed_count(&self) -> usize;
}

#[async_trait]
impl CalendarServiceApi for CalendarService {
    async fn get_events(&self) -> Result<Arc<AggregationResult>, AggregationError> {
        if let Some(cached) = self.cache.get(&RESULT_KEY).await {
            tracing::debug!(
                event_count = cached.events.len(),
                feed_count = cached.feeds.len(),
                "Using cached events"
            );
            return Ok(cached);
        }

        match self.cache.try_get_with(RESULT_KEY, self.refresh()).await {
            Ok(result) => Ok(result),
            Err(err) => match err.as_ref() {
                AggregationError::NoFeedsAvailable => Ok(Arc::new(AggregationResult::default())),
                other => Err(other.clone()),
            },
        }
    }

    async fn is_warm(&self) -> bool {
        self.cache.get(&RESULT_KEY).await.is_some()
    }

    fn feed_count(&self) -> usize {
        self.feed_urls.len()
    }
}

impl CalendarService {
    /// Fetch and parse every feed concurrently, then merge in configured order.
    async fn refresh(&self) -> Result<Arc<AggregationResult>, AggregationError> {
        tracing::info!(
            feed_count = self.feed_urls.len(),
            "Cache expired or empty, fetching fresh events"
        );

        let total = self.feed_urls.len();
        let tasks = self.feed_urls.iter().enumerate().map(|(index, url)| {
            let feed_repo = self.feed_repo.clone();
            let url = url.clone();
            tokio::spawn(async move { load_feed(feed_repo.as_ref(), index, total, url).await })
        });

        let mut result = AggregationResult::default();
        for outcome in join_all(tasks).await {
            match outcome.map_err(|e| AggregationError::Task(e.to_string()))? {
                Ok(feed) => result.push_feed(feed.source, feed.records),
                Err(failure) => {
                    tracing::error!(
                        feed_id = %failure.feed_id,
                        url = %failure.url,
                        error = %failure.error,
                        "Failed to process ICS feed"
                    );
                }
            }
        }

        if result.is_empty() {
            tracing::warn!(feed_count = total, "Every ICS feed failed, result will not be cached");
            return Err(AggregationError::NoFeedsAvailable);
        }

        tracing::info!(
            event_count = result.events.len(),
            loaded_feeds = result.feeds.len(),
            feed_count = total,
            "Fetched events"
        );

        Ok(Arc::new(result))
    }
}

async fn load_feed(
    feed_repo: &dyn IcsFeedRepository,
    index: usize,
    total: usize,
    url: String,
) -> Result<LoadedFeed, FeedLoadError> {
    let feed_id = FeedSource::id_for(index);

    let parsed = match feed_repo.fetch(&url).await {
        Ok(text) => parse_feed(&text).map_err(FeedError::from),
        Err(e) => Err(FeedError::from(e)),
    };
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(error) => return Err(FeedLoadError { feed_id, url, error }),
    };

    let name = parsed
        .name
        .unwrap_or_else(|| FeedSource::fallback_name(index));

    tracing::info!(
        feed_id = %feed_id,
        url = %url,
        event_count = parsed.events.len(),
        "Processed ICS feed"
    );

    Ok(LoadedFeed {
        source: FeedSource {
            id: feed_id,
            url,
            name,
            color: generate_color(index, total).to_string(),
        },
        records: parsed.events,
    })
}
