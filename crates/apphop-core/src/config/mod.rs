//! # Configuration System
//!
//! Hierarchical TOML configuration for apphop.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.apphop/config.toml` (or `$APPHOP_HOME/config.toml`)
//! 3. **Project config** - `./.apphop/config.toml`
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.apphop/config.toml
//! [timeouts]
//! process_query_ms = 3000
//!
//! [helper]
//! path = 'C:\tools\apphop-activator.exe'
//!
//! [scoring]
//! window_threshold = 30
//! listing_threshold = 10
//!
//! [strategies]
//! disabled = ["autohotkey"]
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use apphop_core::config::AppHopConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppHopConfig::load_hierarchy()?;
//!     let timeout = config.timeouts.process_query();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{
    AppHopConfig, AutomationConfig, Config, HelperConfig, ProcessQueryBackend,
    ProcessQueryConfig, ScoringConfig, StrategyConfig, TimeoutConfig,
};
pub use validation::{KNOWN_STRATEGIES, validate_config};

impl AppHopConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
