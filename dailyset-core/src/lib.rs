//! dailyset-core - daily set generation and freshness logic
//!
//! Builds the daily set served by dailyset-server: scans a corpus of JSON
//! files, samples a handful of records without replacement across files,
//! persists the result atomically, and decides when the cached set has gone
//! stale relative to the configured daily refresh boundary.

pub mod config;
pub mod error;
pub mod freshness;
pub mod generator;
pub mod parser;
pub mod sampler;
pub mod scanner;
pub mod store;

pub use config::{Config, RateLimitConfig};
pub use error::{Error, Result};
pub use generator::{GenerationReport, Generator};
pub use store::SetStore;

/// One sampleable domain record (a "location"), passed through verbatim.
/// The core never interprets its fields.
pub type Record = serde_json::Value;
