use std::future::Future;

use tracing::{error, warn};

use apphop_core::config::{AppHopConfig, Config};
use apphop_core::{AppStore, platform};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> AppHopConfig {
    match AppHopConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.apphop/config.toml and ./.apphop/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            AppHopConfig::default()
        }
    }
}

/// Open the app list, warning once if the file on disk was unreadable.
pub fn open_store() -> AppStore {
    let store = AppStore::open(&Config::new());
    if let Some(message) = store.load_error() {
        eprintln!("Warning: {}. Starting with an empty list.", message);
        warn!(event = "cli.apps.load_failed", error = %message);
    }
    store
}

/// Stop activation commands on hosts without a Windows desktop.
pub fn require_supported_platform(command: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = platform::ensure_supported() {
        eprintln!("⚠️  {}", e);
        error!(event = "cli.platform_unsupported", command = command);
        return Err(e.into());
    }
    Ok(())
}

/// Drive one async core call to completion.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
