use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use calfeed_backend::controllers::events::EventsController;
use calfeed_backend::domain::calendar::{CalendarService, CalendarServiceApi};
use calfeed_backend::infrastructure::config::{Config, LogFormat};
use calfeed_backend::infrastructure::http::start_http_server;
use calfeed_backend::infrastructure::repositories::HttpIcsFeedRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting calendar feed aggregator on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        base_path = %config.base_path,
        ics_urls = ?config.ics_urls,
        cache_ttl_secs = config.cache_ttl_secs,
        "Feeds configured: {}",
        config.ics_urls.len()
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    let feed_repo = Arc::new(HttpIcsFeedRepository::new());

    let calendar_service: Arc<dyn CalendarServiceApi> = Arc::new(CalendarService::new(
        feed_repo,
        config.ics_urls.clone(),
        config.cache_ttl(),
    ));

    let events_controller = Arc::new(EventsController::new(calendar_service.clone()));

    start_http_server(config, calendar_service, events_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "calfeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "calfeed_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
