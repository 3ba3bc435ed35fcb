//! Randomized sampling over the corpus
//!
//! Two independent draws: a sample of distinct source files, then one record
//! from each sampled file. Bounded sampling without replacement - a small
//! corpus never loops, it just yields fewer files.

use crate::{parser, Record};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Select up to `k` distinct files uniformly at random, without replacement.
///
/// Returns fewer than `k` when the corpus is smaller; that is not an error.
pub fn select_files(corpus: &[PathBuf], k: usize, rng: &mut impl Rng) -> Vec<PathBuf> {
    corpus.choose_multiple(rng, k).cloned().collect()
}

/// Select one record uniformly at random from a source file.
///
/// Returns `None` when the file cannot be read, fails to parse, or contains
/// no records; the file then contributes nothing to the daily set. All of
/// these are recovered locally - the overall generation continues.
pub fn select_record(path: &Path, rng: &mut impl Rng) -> Option<Record> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to read sampled file: {}", e);
            return None;
        }
    };

    let mut records = match parser::parse_records(path, &contents) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("{}", e);
            return None;
        }
    };

    if records.is_empty() {
        tracing::warn!(path = %path.display(), "No records found in sampled file");
        return None;
    }

    let index = rng.gen_range(0..records.len());
    Some(records.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn corpus(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("file{}.json", i))).collect()
    }

    #[test]
    fn test_select_files_returns_k_distinct() {
        let corpus = corpus(20);
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_files(&corpus, 5, &mut rng);
        assert_eq!(selected.len(), 5);
        let distinct: HashSet<_> = selected.iter().collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_select_files_small_corpus_returns_all() {
        let corpus = corpus(3);
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_files(&corpus, 5, &mut rng);
        assert_eq!(selected.len(), 3);
        let distinct: HashSet<_> = selected.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_select_files_empty_corpus() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_files(&[], 5, &mut rng).is_empty());
    }

    #[test]
    fn test_select_record_from_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spots.json");
        std::fs::write(&path, r#"[{"name":"harbor"},{"name":"summit"}]"#).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let record = select_record(&path, &mut rng).unwrap();
        let name = record["name"].as_str().unwrap();
        assert!(name == "harbor" || name == "summit");
    }

    #[test]
    fn test_select_record_tolerates_trailing_comma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spots.json");
        std::fs::write(&path, r#"[{"name":"harbor"},]"#).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let record = select_record(&path, &mut rng).unwrap();
        assert_eq!(record["name"], "harbor");
    }

    #[test]
    fn test_select_record_empty_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "[]").unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_record(&path, &mut rng).is_none());
    }

    #[test]
    fn test_select_record_malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "this is not json").unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_record(&path, &mut rng).is_none());
    }

    #[test]
    fn test_select_record_missing_file_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_record(Path::new("/nonexistent/f.json"), &mut rng).is_none());
    }
}
