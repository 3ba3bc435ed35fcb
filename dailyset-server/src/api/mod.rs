//! HTTP API handlers

mod dailyset;
mod health;

pub use dailyset::download_daily_set;
pub use health::{health_check, health_routes};
