//! Input file discovery
//!
//! Enumerates the files a merge run will process. Matching is purely by
//! glob pattern; no filtering beyond it. The globber walks directories in a
//! deterministic order, so the same input set always yields the same file
//! ordering (and therefore the same event-ID offsets).

use crate::types::{ReaderError, Result};
use std::path::PathBuf;

/// Enumerate the files matching `pattern`.
///
/// Unreadable directory entries abort the enumeration with an error.
pub fn discover_files(pattern: &str) -> Result<Vec<PathBuf>> {
    log::debug!("Discovering input files: {}", pattern);

    let entries =
        glob::glob(pattern).map_err(|e| ReaderError::InvalidPattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ReaderError::IoError(e.into_error()))?;
        files.push(path);
    }

    log::info!("Found {} files matching {}", files.len(), pattern);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_discover_matches_pattern_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["run_0.root", "run_1.root", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let pattern = format!("{}/*.root", dir.path().display());
        let files = discover_files(&pattern).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "root"));
    }

    #[test]
    fn test_discover_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.root", dir.path().display());
        assert!(discover_files(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_discover_invalid_pattern() {
        let result = discover_files("out/***.root");
        assert!(matches!(result, Err(ReaderError::InvalidPattern(_))));
    }
}
