use std::sync::Arc;

use tracing::debug;

use crate::window::{WindowDescriptor, WindowHandle};

/// Native window enumeration and foregrounding.
pub trait WindowManager: Send + Sync {
    /// Visible, titled, user-facing top-level windows, in OS order.
    fn list_windows(&self) -> Vec<WindowDescriptor>;

    /// Restore `handle` if minimized and bring it to the foreground.
    ///
    /// Returns `false` for a handle that no longer names a window.
    fn activate(&self, handle: WindowHandle) -> bool;
}

#[derive(Clone)]
pub enum WindowCapability {
    Available(Arc<dyn WindowManager>),
    Unavailable { reason: String },
}

impl WindowCapability {
    /// Detect the capability for this host.
    pub fn detect() -> Self {
        #[cfg(windows)]
        let capability = WindowCapability::Available(Arc::new(crate::native::win32::Win32WindowManager));

        #[cfg(not(windows))]
        let capability = WindowCapability::Unavailable {
            reason: format!("no native window manager on {}", std::env::consts::OS),
        };

        debug!(
            event = "core.native.capability_detected",
            available = capability.is_available()
        );
        capability
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        WindowCapability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, WindowCapability::Available(_))
    }

    pub fn manager(&self) -> Option<Arc<dyn WindowManager>> {
        match self {
            WindowCapability::Available(manager) => Some(Arc::clone(manager)),
            WindowCapability::Unavailable { .. } => None,
        }
    }
}

impl std::fmt::Debug for WindowCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowCapability::Available(_) => f.write_str("Available"),
            WindowCapability::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}
