//! In-process window management.
//!
//! Whether a native window capability exists is decided once, when a
//! [`WindowCapability`] is created. Callers branch on that state instead of
//! probing per call.

pub mod capability;
pub mod filter;
#[cfg(windows)]
pub mod win32;

pub use capability::{WindowCapability, WindowManager};
