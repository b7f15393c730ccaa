//! The user-curated application list and shortcut import.

pub mod errors;
pub mod import;
pub mod persistence;
pub mod store;
pub mod types;

pub use errors::{AppStoreError, ImportError};
pub use import::{ShortcutCandidate, find_shortcuts, shortcut_search_dirs};
pub use store::{AppStore, ImportSummary};
pub use types::{AppEntry, AppsData};
