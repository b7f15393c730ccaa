//! Host platform gate.
//!
//! Window activation only exists on Windows. Everything else in the crate
//! (scoring, parsing, the app store) is platform-neutral.

use tracing::warn;

use crate::errors::AppHopError;

#[derive(Debug, thiserror::Error)]
#[error("apphop window activation is only supported on Windows (current platform: {platform})")]
pub struct UnsupportedPlatform {
    pub platform: &'static str,
}

impl AppHopError for UnsupportedPlatform {
    fn error_code(&self) -> &'static str {
        "UNSUPPORTED_PLATFORM"
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

/// Whether the current host can run the activation pipeline.
pub fn is_supported() -> bool {
    cfg!(target_os = "windows")
}

/// Fail once, up front, on hosts where no activation logic may run.
pub fn ensure_supported() -> Result<(), UnsupportedPlatform> {
    if is_supported() {
        return Ok(());
    }

    warn!(
        event = "core.platform.not_supported",
        platform = std::env::consts::OS
    );
    Err(UnsupportedPlatform {
        platform: std::env::consts::OS,
    })
}
