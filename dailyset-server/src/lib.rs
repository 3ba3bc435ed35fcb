//! dailyset-server library - HTTP transport for the daily set
//!
//! Thin transport over dailyset-core: serves the persisted artifact as a
//! download, rate-capped, with a health endpoint. The read path never blocks
//! on generation; it serves whatever is currently persisted.

use axum::Router;
use dailyset_core::SetStore;
use std::sync::Arc;

pub mod api;
pub mod limit;
pub mod schedule;

use limit::SharedRateLimiter;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Set store the read path serves from
    pub store: Arc<SetStore>,
    /// Download file name suggested to clients
    pub artifact_name: String,
    /// Request-rate cap for the download endpoint
    pub limiter: SharedRateLimiter,
}

impl AppState {
    pub fn new(store: Arc<SetStore>, artifact_name: String, limiter: SharedRateLimiter) -> Self {
        Self {
            store,
            artifact_name,
            limiter,
        }
    }
}

/// Build application router
///
/// The download route sits behind the rate limiter; health does not.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::get;

    let limited = Router::new()
        .route("/dailyset", get(api::download_daily_set))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            limit::rate_limit_middleware,
        ));

    Router::new()
        .merge(limited)
        .merge(api::health_routes())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
