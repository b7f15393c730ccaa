use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::process::ProcessId;

/// Opaque OS window identifier.
///
/// Becomes invalid once the window closes; activating a stale handle is a
/// silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(u64);

impl WindowHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowHandle {
    type Err = std::num::ParseIntError;

    /// Decimal, or hexadecimal with a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).map(Self),
            None => s.parse::<u64>().map(Self),
        }
    }
}

/// One visible, user-facing top-level window.
///
/// Produced fresh by every enumeration and never cached. `process_name`
/// and `process_path` are empty when the owning process could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    pub handle: WindowHandle,
    pub pid: ProcessId,
    pub title: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub process_name: String,
    #[serde(default)]
    pub process_path: String,
}

/// A row of the task listing: a process and its main window title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub pid: ProcessId,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_parse() {
        assert_eq!("131844".parse::<WindowHandle>().unwrap().as_u64(), 131844);
        assert_eq!("0x20304".parse::<WindowHandle>().unwrap().as_u64(), 0x20304);
        assert_eq!(" 42 ".parse::<WindowHandle>().unwrap().to_string(), "42");
        assert!("abc".parse::<WindowHandle>().is_err());
        assert!("-1".parse::<WindowHandle>().is_err());
    }
}
