//! High-score persistence: a text file holding one decimal integer.
//!
//! Reading never fails from the caller's point of view (missing or malformed
//! means 0) and write failures are swallowed, so a broken disk never ends a
//! session.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored score, or 0 if the file is missing, unreadable or malformed.
    pub fn load(&self) -> u32 {
        self.try_load().unwrap_or(0)
    }

    pub fn try_load(&self) -> Result<u32> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let first = text.lines().next().unwrap_or("").trim();
        first
            .parse::<u32>()
            .with_context(|| format!("parse high score {:?}", first))
    }

    /// Persist `score` if it beats the stored value. Returns true if written.
    pub fn record(&self, score: u32) -> bool {
        if score <= self.load() {
            return false;
        }
        self.try_store(score).is_ok()
    }

    pub fn try_store(&self, score: u32) -> Result<()> {
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> HighScoreFile {
        let path = std::env::temp_dir().join(format!(
            "quadra-hs-{}-{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        HighScoreFile::new(path)
    }

    #[test]
    fn missing_file_reads_zero() {
        let hs = scratch("missing");
        assert_eq!(hs.load(), 0);
        assert!(hs.try_load().is_err());
    }

    #[test]
    fn malformed_file_reads_zero() {
        let hs = scratch("malformed");
        fs::write(hs.path(), "lots").unwrap();
        assert_eq!(hs.load(), 0);
        let _ = fs::remove_file(hs.path());
    }

    #[test]
    fn records_only_improvements() {
        let hs = scratch("improve");
        assert!(hs.record(300));
        assert_eq!(hs.load(), 300);

        assert!(!hs.record(300));
        assert!(!hs.record(120));
        assert_eq!(hs.load(), 300);

        assert!(hs.record(301));
        assert_eq!(fs::read_to_string(hs.path()).unwrap(), "301");
        let _ = fs::remove_file(hs.path());
    }

    #[test]
    fn zero_is_never_written() {
        let hs = scratch("zero");
        assert!(!hs.record(0));
        assert!(!hs.path().exists());
    }

    #[test]
    fn trailing_newline_is_accepted() {
        let hs = scratch("newline");
        fs::write(hs.path(), "1200\n").unwrap();
        assert_eq!(hs.load(), 1200);
        let _ = fs::remove_file(hs.path());
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let hs = HighScoreFile::new(std::env::temp_dir().join("quadra-no-such-dir/hs.txt"));
        assert!(!hs.record(999));
    }
}
