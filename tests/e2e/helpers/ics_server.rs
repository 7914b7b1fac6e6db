use axum::{extract::State, http::StatusCode, http::Uri, Router};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::fixtures::*;

#[derive(Clone)]
struct UpstreamState {
    feeds: Arc<HashMap<&'static str, (StatusCode, &'static str)>>,
    hits: Arc<AtomicUsize>,
}

/// Upstream serving fixture ICS feeds, counting every request
pub struct MockIcsServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockIcsServer {
    pub async fn start() -> Self {
        let feeds: HashMap<&'static str, (StatusCode, &'static str)> = HashMap::from([
            (TEAM_A_PATH, (StatusCode::OK, TEAM_A_ICS)),
            (YOUTH_PATH, (StatusCode::OK, YOUTH_ICS)),
            (UNNAMED_PATH, (StatusCode::OK, UNNAMED_ICS)),
            (BROKEN_PATH, (StatusCode::OK, BROKEN_BODY)),
            (SERVER_ERROR_PATH, (StatusCode::INTERNAL_SERVER_ERROR, "boom")),
        ]);
        let hits = Arc::new(AtomicUsize::new(0));
        let state = UpstreamState {
            feeds: Arc::new(feeds),
            hits: hits.clone(),
        };

        let app = Router::new().fallback(serve_feed).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of feed requests received so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn serve_feed(State(state): State<UpstreamState>, uri: Uri) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.feeds.get(uri.path()) {
        Some((status, body)) => (*status, body.to_string()),
        None => (StatusCode::NOT_FOUND, "Not Found".to_string()),
    }
}
