//! Set store
//!
//! Persists the generated daily set and its refresh timestamp as two blobs
//! in the output directory. Both are published via temp-file-and-rename so
//! readers never observe a half-written artifact and a failed write leaves
//! the prior content intact.

use crate::Record;
use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// File name of the persisted refresh timestamp
pub const TIMESTAMP_FILE: &str = "lastsaved.txt";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unrecoverable persistence failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Output directory could not be created
    #[error("Failed to create output directory {}: {}", path.display(), source)]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or publishing a blob failed
    #[error("Failed to write {}: {}", path.display(), source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading the persisted artifact failed
    #[error("Failed to read {}: {}", path.display(), source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serializing the daily set failed
    #[error("Failed to serialize daily set: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistent store for the daily set artifact and its refresh timestamp
#[derive(Debug, Clone)]
pub struct SetStore {
    output_dir: PathBuf,
    artifact_name: String,
    tz: Tz,
}

impl SetStore {
    pub fn new(output_dir: &Path, artifact_name: impl Into<String>, tz: Tz) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            artifact_name: artifact_name.into(),
            tz,
        }
    }

    /// Path of the persisted daily set artifact
    pub fn artifact_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifact_name)
    }

    fn timestamp_path(&self) -> PathBuf {
        self.output_dir.join(TIMESTAMP_FILE)
    }

    /// Read the persisted refresh timestamp.
    ///
    /// `None` means "never generated": the blob is missing or does not
    /// parse. An unparsable timestamp is logged and treated as absent so a
    /// corrupted blob heals at the next staleness check.
    pub fn read_timestamp(&self) -> Option<DateTime<Tz>> {
        let path = self.timestamp_path();
        let raw = std::fs::read_to_string(&path).ok()?;
        match parse_timestamp(raw.trim(), self.tz) {
            Some(ts) => Some(ts),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "Unparsable refresh timestamp, treating as never generated"
                );
                None
            }
        }
    }

    /// Read the persisted daily set bytes, `None` if nothing was ever
    /// generated. Only an unexpected I/O failure is an error.
    pub fn read_artifact(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.artifact_path();
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Persist the daily set and its refresh timestamp.
    ///
    /// The artifact is serialized as a JSON array of opaque records, the
    /// timestamp as `YYYY-MM-DD HH:MM:SS <ZONE>`. Each blob is written to a
    /// temporary file in the output directory and renamed into place.
    pub fn write_set(&self, records: &[Record], timestamp: DateTime<Tz>) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| StoreError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let artifact = serde_json::to_vec(records)?;
        self.write_atomic(&self.artifact_path(), &artifact)?;

        let stamp = format_timestamp(timestamp);
        self.write_atomic(&self.timestamp_path(), stamp.as_bytes())?;

        tracing::debug!(
            artifact = %self.artifact_path().display(),
            timestamp = %stamp,
            "Daily set persisted"
        );
        Ok(())
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(|source| {
            StoreError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tmp.write_all(bytes).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tmp.persist(path).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e.error,
        })?;
        Ok(())
    }
}

fn format_timestamp(timestamp: DateTime<Tz>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

/// Parse `YYYY-MM-DD HH:MM:SS <ZONE>`. The zone suffix is informational;
/// the instant is interpreted in the configured zone.
fn parse_timestamp(raw: &str, tz: Tz) -> Option<DateTime<Tz>> {
    let head: String = raw.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
    let naive = NaiveDateTime::parse_from_str(&head, TIMESTAMP_FORMAT).ok()?;
    tz.from_local_datetime(&naive).earliest()
}
