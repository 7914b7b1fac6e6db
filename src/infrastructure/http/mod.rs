pub mod request_id;

pub use request_id::{request_id_middleware, request_span};

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::controllers::{debug, events::EventsController, health};
use crate::domain::calendar::CalendarServiceApi;
use crate::infrastructure::config::Config;

/// Build the application router.
///
/// Static assets are served at the root and again under the configured base
/// path, so links built with the public prefix resolve either way.
pub fn build_router(
    config: Arc<Config>,
    calendar_service: Arc<dyn CalendarServiceApi>,
    events_controller: Arc<EventsController>,
) -> Router {
    let events_routes = Router::new()
        .route("/events", get(EventsController::get_events))
        .with_state(events_controller);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(calendar_service);

    let debug_routes = Router::new()
        .route("/debug", get(debug::debug_config))
        .with_state(config.clone());

    let mut app = Router::new()
        .merge(events_routes)
        .merge(health_routes)
        .merge(debug_routes);

    if let Some(base_path) = config.nested_base_path() {
        app = app.nest_service(&base_path, ServeDir::new(&config.static_dir));
    }

    app.fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(request_span)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    calendar_service: Arc<dyn CalendarServiceApi>,
    events_controller: Arc<EventsController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(config.clone(), calendar_service, events_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!(
        base_path = %config.base_path,
        feed_count = config.ics_urls.len(),
        "Server listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
