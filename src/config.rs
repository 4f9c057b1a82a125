//! Runtime configuration read from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `QUADRA_HIGHSCORE_PATH` | `highscore.txt` | High-score file |
//! | `QUADRA_SEED` | clock-derived | Randomizer seed (u32) |
//! | `QUADRA_EVENT_LOG` | unset | JSONL event log path |
//! | `QUADRA_BELL_DISABLED` | unset | `1`/`true` silences the bell |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_HIGHSCORE_PATH: &str = "highscore.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub highscore_path: PathBuf,
    pub seed: u32,
    pub event_log: Option<PathBuf>,
    pub bell: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_PATH),
            seed: clock_seed(),
            event_log: None,
            bell: true,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let highscore_path = non_empty("QUADRA_HIGHSCORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGHSCORE_PATH));

        let seed = non_empty("QUADRA_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);

        let event_log = non_empty("QUADRA_EVENT_LOG").map(PathBuf::from);

        let bell = !non_empty("QUADRA_BELL_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            highscore_path,
            seed,
            event_log,
            bell,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.highscore_path, PathBuf::from("highscore.txt"));
        assert_eq!(cfg.event_log, None);
        assert!(cfg.bell);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("QUADRA_HIGHSCORE_PATH", "/tmp/q.txt"),
            ("QUADRA_SEED", "42"),
            ("QUADRA_EVENT_LOG", " events.jsonl "),
            ("QUADRA_BELL_DISABLED", "TRUE"),
        ]));
        assert_eq!(cfg.highscore_path, PathBuf::from("/tmp/q.txt"));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.event_log, Some(PathBuf::from("events.jsonl")));
        assert!(!cfg.bell);
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = GameConfig::from_lookup(lookup(&[
            ("QUADRA_HIGHSCORE_PATH", "  "),
            ("QUADRA_SEED", "not-a-number"),
            ("QUADRA_EVENT_LOG", ""),
            ("QUADRA_BELL_DISABLED", "0"),
        ]));
        assert_eq!(cfg.highscore_path, PathBuf::from(DEFAULT_HIGHSCORE_PATH));
        assert_eq!(cfg.event_log, None);
        assert!(cfg.bell);
    }
}
