//! Daily refresh scheduler
//!
//! The external clock of the system: a background task that sleeps until the
//! next refresh boundary in the configured zone, regenerates the set, and
//! goes back to sleep. A failed run is logged and retried at the next tick;
//! the previously persisted set keeps serving in the meantime.

use chrono::Utc;
use chrono_tz::Tz;
use dailyset_core::{freshness, Generator};
use std::sync::Arc;
use tracing::{error, info};

pub async fn run_daily_refresh(generator: Arc<Generator>, tz: Tz, refresh_hour: u32) {
    loop {
        let now = Utc::now();
        let next = freshness::next_boundary(now, tz, refresh_hour);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next = %next, "Next scheduled daily set refresh");
        tokio::time::sleep(wait).await;

        match generator.generate().await {
            Ok(report) => info!(
                records = report.records_written,
                "Scheduled refresh complete"
            ),
            Err(e) => error!("Scheduled refresh failed: {}", e),
        }
    }
}
