//! Daily set orchestration
//!
//! Wires scan -> sample -> persist on demand. Invoked by the scheduler tick
//! and by the startup staleness check; a mutex serializes the two so
//! concurrent triggers never interleave store writes.

use crate::config::Config;
use crate::store::SetStore;
use crate::{freshness, sampler, scanner, Record, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Outcome of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Source files discovered in the corpus
    pub files_scanned: usize,
    /// Distinct files sampled (<= sample_size)
    pub files_selected: usize,
    /// Records written to the daily set (<= files_selected)
    pub records_written: usize,
}

/// Orchestrates daily set generation against a corpus and a set store.
///
/// Sole mutator of the store: only one generation runs at a time. The HTTP
/// read path never goes through the generator, it reads the store directly.
pub struct Generator {
    corpus_root: PathBuf,
    sample_size: usize,
    refresh_hour: u32,
    tz: Tz,
    store: SetStore,
    lock: Mutex<()>,
}

impl Generator {
    pub fn new(config: &Config, store: SetStore) -> Result<Self> {
        let tz = config.timezone()?;
        Ok(Self {
            corpus_root: config.corpus_root.clone(),
            sample_size: config.sample_size,
            refresh_hour: config.refresh_hour,
            tz,
            store,
            lock: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &SetStore {
        &self.store
    }

    /// Generate a fresh daily set now, fully replacing the persisted one.
    pub async fn generate(&self) -> Result<GenerationReport> {
        self.generate_at(Utc::now()).await
    }

    /// Generate a fresh daily set stamped with the given instant.
    pub async fn generate_at(&self, now: DateTime<Utc>) -> Result<GenerationReport> {
        let _guard = self.lock.lock().await;
        self.run_generation(now)
    }

    /// Regenerate the daily set if it is stale at `now`.
    ///
    /// Returns whether a refresh happened. The staleness check and the
    /// regeneration run under one lock acquisition, so two concurrent
    /// checks in the same logical day trigger at most one generation.
    pub async fn check_and_maybe_refresh(&self, now: DateTime<Utc>) -> Result<bool> {
        let _guard = self.lock.lock().await;

        let boundary = freshness::stale_boundary(now, self.tz, self.refresh_hour);
        let last_refresh = self
            .store
            .read_timestamp()
            .map(|ts| ts.with_timezone(&Utc));

        if !freshness::is_stale(last_refresh, now, boundary) {
            info!("Daily set is still fresh, no refresh needed");
            return Ok(false);
        }

        info!("Daily set is stale, regenerating");
        self.run_generation(now)?;
        Ok(true)
    }

    fn run_generation(&self, now: DateTime<Utc>) -> Result<GenerationReport> {
        let corpus = scanner::scan_corpus(&self.corpus_root)?;
        if corpus.is_empty() {
            warn!(root = %self.corpus_root.display(), "Corpus is empty, writing an empty daily set");
        }

        let mut rng = rand::thread_rng();
        let selected = sampler::select_files(&corpus, self.sample_size, &mut rng);

        let mut records: Vec<Record> = Vec::with_capacity(selected.len());
        for path in &selected {
            if let Some(record) = sampler::select_record(path, &mut rng) {
                records.push(record);
            }
        }

        self.store.write_set(&records, now.with_timezone(&self.tz))?;

        let report = GenerationReport {
            files_scanned: corpus.len(),
            files_selected: selected.len(),
            records_written: records.len(),
        };
        info!(
            files_scanned = report.files_scanned,
            files_selected = report.files_selected,
            records = report.records_written,
            "Daily set generated"
        );
        Ok(report)
    }
}
