//! apphop-core: launch an application, or bring its running window forward.
//!
//! The library owns the saved application list and the activation pipeline.
//! It is used by the `apphop` CLI and the `apphop-activator` helper.
//!
//! # Main Entry Points
//!
//! - [`apps`] - Saved application list and shortcut import
//! - [`activation`] - Resolve a running instance and activate it, or launch
//! - [`config`] - Configuration management
//! - [`platform`] - Gate for operations that need a Windows desktop

pub mod activation;
pub mod apps;
pub mod config;
pub mod errors;
pub mod events;
pub mod exec;
pub mod logging;
pub mod matching;
pub mod native;
pub mod platform;
pub mod process;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at crate root for convenience
pub use activation::{
    ActivationState, Activator, LaunchError, OpenOutcome, TargetApp, HELPER_BINARY, HELPER_DONE,
};
pub use apps::{AppEntry, AppStore, AppStoreError, ImportError, ImportSummary, ShortcutCandidate};
pub use config::{AppHopConfig, Config};
pub use errors::AppHopError;
pub use exec::{CommandRunner, SystemRunner};
pub use native::{WindowCapability, WindowManager};
pub use platform::UnsupportedPlatform;
pub use window::{WindowDescriptor, WindowHandle};

// Re-export logging initialization
pub use logging::init_logging;
