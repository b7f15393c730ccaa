//! Configuration type definitions for apphop.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [timeouts]
//! process_query_ms = 3000
//! activation_ms = 5000
//! listing_ms = 5000
//!
//! [process_query]
//! backend = "auto"
//!
//! [automation]
//! candidates = ['C:\Program Files\AutoHotkey\AutoHotkey.exe']
//! search_path = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration derived from the environment, not from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all apphop data (default: ~/.apphop)
    pub data_dir: PathBuf,
}

/// Main configuration loaded from TOML config files.
///
/// Every leaf is optional so that a layer only overrides what it sets.
/// Resolved values come from the accessor methods in `defaults.rs`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppHopConfig {
    /// Bounds on every external call
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// How running processes are discovered
    #[serde(default)]
    pub process_query: ProcessQueryConfig,

    /// Location of the out-of-process window helper
    #[serde(default)]
    pub helper: HelperConfig,

    /// Discovery of the optional AutoHotkey automation tool
    #[serde(default)]
    pub automation: AutomationConfig,

    /// Match score weights and acceptance thresholds
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Strategy chain adjustments
    #[serde(default)]
    pub strategies: StrategyConfig,
}

/// Timeouts in milliseconds for external calls.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TimeoutConfig {
    /// Process id lookup. Default: 3000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_query_ms: Option<u64>,

    /// Each helper, script interpreter or automation tool invocation.
    /// Default: 5000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_ms: Option<u64>,

    /// Window and task listings. Default: 5000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_ms: Option<u64>,
}

impl TimeoutConfig {
    pub fn process_query(&self) -> Duration {
        Duration::from_millis(self.process_query_ms())
    }

    pub fn activation(&self) -> Duration {
        Duration::from_millis(self.activation_ms())
    }

    pub fn listing(&self) -> Duration {
        Duration::from_millis(self.listing_ms())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessQueryBackend {
    /// `wmic`, falling back to the in-process inventory when `wmic` is missing.
    #[default]
    Auto,
    /// `wmic` only.
    Wmic,
    /// In-process process inventory only.
    Inventory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessQueryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<ProcessQueryBackend>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HelperConfig {
    /// Explicit helper executable path. Checked first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Look next to the running executable and on PATH when no explicit
    /// path resolves. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discover: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutomationConfig {
    /// Well-known AutoHotkey install locations, checked in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<PathBuf>>,

    /// Also search PATH for `AutoHotkey.exe`. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_path: Option<bool>,
}

/// Point weights and thresholds used by the match scorer.
///
/// Unset fields fall back to the built-in weights; see [`ScoringConfig::weights`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_match: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_exact: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_contains: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_exact: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_contains: Option<u32>,
    /// Title weights for the task-listing path, which lacks pid corroboration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_title_exact: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_title_contains: Option<u32>,
    /// Minimum score for window enumeration paths (helper, window manager).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_threshold: Option<u32>,
    /// Minimum score for the title-only task-listing path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_threshold: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StrategyConfig {
    /// Strategy names to skip (see `KNOWN_STRATEGIES`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl StrategyConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|d| d.eq_ignore_ascii_case(name))
    }
}
