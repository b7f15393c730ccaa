//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.apphop/config.toml`
//! 3. **Project config** - `./.apphop/config.toml`

use crate::config::types::{
    AppHopConfig, AutomationConfig, Config, HelperConfig, ProcessQueryConfig, ScoringConfig,
    StrategyConfig, TimeoutConfig,
};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::fs;
use std::path::Path;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }
    false
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if
/// validation of the merged result fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<AppHopConfig, Box<dyn std::error::Error>> {
    let mut config = AppHopConfig::default();

    match load_config_file(&Config::default().config_file()) {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {}
    }

    let project_path = std::env::current_dir()?.join(".apphop").join("config.toml");
    match load_config_file(&project_path) {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {}
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
///
/// A missing file surfaces as the underlying `std::io::Error` so callers can
/// tell "absent" apart from "broken".
pub fn load_config_file(path: &Path) -> Result<AppHopConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppHopConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            message: format!("'{}': {}", path.display(), e),
        })?;

    tracing::debug!(
        event = "core.config.file_loaded",
        path = %path.display()
    );

    Ok(config)
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Each field falls back to `base` when the override leaves it unset, so a
/// layer only replaces what it actually names. Disabled strategies
/// accumulate across layers.
pub fn merge_configs(base: AppHopConfig, override_config: AppHopConfig) -> AppHopConfig {
    AppHopConfig {
        timeouts: TimeoutConfig {
            process_query_ms: override_config
                .timeouts
                .process_query_ms
                .or(base.timeouts.process_query_ms),
            activation_ms: override_config
                .timeouts
                .activation_ms
                .or(base.timeouts.activation_ms),
            listing_ms: override_config.timeouts.listing_ms.or(base.timeouts.listing_ms),
        },
        process_query: ProcessQueryConfig {
            backend: override_config
                .process_query
                .backend
                .or(base.process_query.backend),
        },
        helper: HelperConfig {
            path: override_config.helper.path.or(base.helper.path),
            discover: override_config.helper.discover.or(base.helper.discover),
        },
        automation: AutomationConfig {
            candidates: override_config
                .automation
                .candidates
                .or(base.automation.candidates),
            search_path: override_config
                .automation
                .search_path
                .or(base.automation.search_path),
        },
        scoring: merge_scoring(base.scoring, override_config.scoring),
        strategies: StrategyConfig {
            disabled: {
                let mut merged = base.strategies.disabled;
                for name in override_config.strategies.disabled {
                    if !merged.iter().any(|d| d.eq_ignore_ascii_case(&name)) {
                        merged.push(name);
                    }
                }
                merged
            },
        },
    }
}

fn merge_scoring(base: ScoringConfig, over: ScoringConfig) -> ScoringConfig {
    ScoringConfig {
        process_match: over.process_match.or(base.process_match),
        title_exact: over.title_exact.or(base.title_exact),
        title_contains: over.title_contains.or(base.title_contains),
        class_exact: over.class_exact.or(base.class_exact),
        class_contains: over.class_contains.or(base.class_contains),
        listing_title_exact: over.listing_title_exact.or(base.listing_title_exact),
        listing_title_contains: over.listing_title_contains.or(base.listing_title_contains),
        window_threshold: over.window_threshold.or(base.window_threshold),
        listing_threshold: over.listing_threshold.or(base.listing_threshold),
    }
}
