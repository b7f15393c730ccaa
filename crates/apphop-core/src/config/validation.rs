//! Configuration validation.

use crate::config::types::AppHopConfig;
use crate::errors::ConfigError;

/// Names accepted in `[strategies] disabled`, in chain order.
pub const KNOWN_STRATEGIES: &[&str] = &["helper", "wscript", "autohotkey", "title", "window-manager"];

/// Validate the merged configuration.
///
/// # Errors
///
/// Returns `ConfigError` when a timeout or a score threshold is zero, or an
/// unknown strategy is disabled.
pub fn validate_config(config: &AppHopConfig) -> Result<(), ConfigError> {
    let timeouts = [
        ("process_query_ms", config.timeouts.process_query_ms()),
        ("activation_ms", config.timeouts.activation_ms()),
        ("listing_ms", config.timeouts.listing_ms()),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("timeouts.{} must be greater than zero", name),
            });
        }
    }

    // A zero threshold would accept any window at all, including unrelated ones.
    let weights = config.scoring.weights();
    let thresholds = [
        ("window_threshold", weights.window_threshold),
        ("listing_threshold", weights.listing_threshold),
    ];
    for (name, value) in thresholds {
        if value == 0 {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("scoring.{} must be greater than zero", name),
            });
        }
    }

    for name in &config.strategies.disabled {
        if !KNOWN_STRATEGIES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name))
        {
            return Err(ConfigError::UnknownStrategy {
                strategy: name.clone(),
                known: KNOWN_STRATEGIES.join(", "),
            });
        }
    }

    Ok(())
}
