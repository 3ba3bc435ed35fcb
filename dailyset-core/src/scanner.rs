//! Corpus scanner
//!
//! Recursive discovery of sampleable source files. The corpus is re-scanned
//! fresh on every generation; files have no persistent identity across runs.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Corpus scan errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Corpus root does not exist
    #[error("Corpus root not found: {0}")]
    RootNotFound(PathBuf),

    /// Corpus root exists but is not a directory
    #[error("Corpus root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Scan the corpus root for source files.
///
/// Returns every regular file under `root` (recursively) whose extension is
/// `json`, in unspecified order. Unreadable entries below the root are
/// skipped with a warning rather than aborting the scan; only a missing or
/// non-directory root is an error.
pub fn scan_corpus(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_json_extension(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable corpus entry: {}", e);
            }
        }
    }

    tracing::debug!(files = files.len(), root = %root.display(), "Corpus scan complete");
    Ok(files)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
