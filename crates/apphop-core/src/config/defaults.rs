//! Default implementations for configuration types.
//!
//! Accessors here resolve the optional TOML fields to their effective values.

use crate::config::types::{
    AutomationConfig, Config, HelperConfig, ProcessQueryBackend, ProcessQueryConfig,
    ScoringConfig, TimeoutConfig,
};
use crate::matching::ScoreWeights;
use std::path::PathBuf;

pub fn default_autohotkey_candidates() -> Vec<PathBuf> {
    [
        r"C:\Program Files\AutoHotkey\AutoHotkey.exe",
        r"C:\Program Files\AutoHotkey\v2\AutoHotkey64.exe",
        r"C:\Program Files\AutoHotkey\v2\AutoHotkey32.exe",
        r"C:\Program Files (x86)\AutoHotkey\AutoHotkey.exe",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

impl TimeoutConfig {
    /// Process lookups must not block an interactive command for long.
    pub fn process_query_ms(&self) -> u64 {
        self.process_query_ms.unwrap_or(3000)
    }

    pub fn activation_ms(&self) -> u64 {
        self.activation_ms.unwrap_or(5000)
    }

    pub fn listing_ms(&self) -> u64 {
        self.listing_ms.unwrap_or(5000)
    }
}

impl ProcessQueryConfig {
    pub fn backend(&self) -> ProcessQueryBackend {
        self.backend.unwrap_or_default()
    }
}

impl HelperConfig {
    pub fn discover(&self) -> bool {
        self.discover.unwrap_or(true)
    }
}

impl AutomationConfig {
    pub fn candidates(&self) -> Vec<PathBuf> {
        self.candidates
            .clone()
            .unwrap_or_else(default_autohotkey_candidates)
    }

    pub fn search_path(&self) -> bool {
        self.search_path.unwrap_or(true)
    }
}

impl ScoringConfig {
    /// Resolve the configured weights, filling gaps with the built-in ones.
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            process_match: self.process_match.unwrap_or(100),
            title_exact: self.title_exact.unwrap_or(40),
            title_contains: self.title_contains.unwrap_or(15),
            class_exact: self.class_exact.unwrap_or(15),
            class_contains: self.class_contains.unwrap_or(5),
            listing_title_exact: self.listing_title_exact.unwrap_or(30),
            listing_title_contains: self.listing_title_contains.unwrap_or(10),
            window_threshold: self.window_threshold.unwrap_or(30),
            listing_threshold: self.listing_threshold.unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = match std::env::var_os("APPHOP_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => match dirs::home_dir() {
                Some(home) => home.join(".apphop"),
                None => {
                    eprintln!(
                        "Warning: Could not find home directory. Set APPHOP_HOME or HOME. \
                        Using fallback directory."
                    );
                    std::env::temp_dir().join(".apphop")
                }
            },
        };

        Self { data_dir }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the persisted app list.
    pub fn apps_file(&self) -> PathBuf {
        self.data_dir.join("apps.json")
    }

    /// Path of the user-level config file.
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_defaults_preserve_ranking() {
        let scoring = ScoringConfig::default().weights();
        assert!(scoring.process_match > scoring.title_exact);
        assert!(scoring.title_exact > scoring.title_contains);
        assert!(scoring.class_exact > scoring.class_contains);
        assert!(scoring.listing_title_exact > scoring.listing_title_contains);
        assert!(scoring.window_threshold > scoring.listing_threshold);
    }

    #[test]
    fn test_autohotkey_candidates_not_empty() {
        let automation = AutomationConfig::default();
        assert_eq!(automation.candidates().len(), 4);
        assert!(automation.search_path());

        let automation = AutomationConfig {
            candidates: Some(Vec::new()),
            search_path: Some(false),
        };
        assert!(automation.candidates().is_empty());
        assert!(!automation.search_path());
    }

    #[test]
    fn test_config_paths_live_under_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/apphop-test"),
        };
        assert_eq!(config.apps_file(), PathBuf::from("/tmp/apphop-test/apps.json"));
        assert_eq!(
            config.config_file(),
            PathBuf::from("/tmp/apphop-test/config.toml")
        );
    }
}
