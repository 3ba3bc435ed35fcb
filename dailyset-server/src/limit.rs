//! Request-rate cap for the download endpoint
//!
//! One limiter instance caps the endpoint as a whole: max_requests per
//! window across all clients, answering 429 when exceeded.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dailyset_core::RateLimitConfig;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::AppState;

/// Shared direct (un-keyed) limiter over the in-memory state store
pub type SharedRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

/// Build a limiter allowing `max_requests` per `window_secs`.
pub fn build_limiter(config: &RateLimitConfig) -> SharedRateLimiter {
    // Safe: max_requests is validated non-zero by Config::validate
    let max = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
    let period = Duration::from_secs_f64(config.window_secs as f64 / f64::from(max.get()));
    let quota = Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_minute(max))
        .allow_burst(max);
    Arc::new(RateLimiter::direct(quota))
}

/// Middleware answering 429 once the cap is exhausted.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.limiter.check().is_err() {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please try again later.",
        )
            .into_response();
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limiter_allows_burst_up_to_max() {
        let limiter = build_limiter(&RateLimitConfig {
            window_secs: 60,
            max_requests: 3,
        });
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_zero_max_is_clamped_not_panicking() {
        // Config::validate rejects this, but the builder must still be total
        let limiter = build_limiter(&RateLimitConfig {
            window_secs: 60,
            max_requests: 0,
        });
        assert!(limiter.check().is_ok());
    }
}
