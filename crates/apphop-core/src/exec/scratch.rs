//! Transient script files handed to external interpreters.
//!
//! A script lives in the temp directory only for the duration of one
//! strategy attempt. Removal is best-effort.

use std::io::Write;
use std::path::Path;

use tempfile::TempPath;
use tracing::debug;

use crate::exec::errors::ExecError;

/// On-disk encoding expected by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEncoding {
    /// UTF-8 with a byte order mark (AutoHotkey).
    Utf8Bom,
    /// UTF-16LE with a byte order mark (Windows Script Host).
    Utf16LeBom,
}

impl ScriptEncoding {
    fn encode(self, contents: &str) -> Vec<u8> {
        match self {
            ScriptEncoding::Utf8Bom => {
                let mut bytes = vec![0xEF, 0xBB, 0xBF];
                bytes.extend_from_slice(contents.as_bytes());
                bytes
            }
            ScriptEncoding::Utf16LeBom => {
                let mut bytes = vec![0xFF, 0xFE];
                for unit in contents.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
        }
    }
}

/// A script file that is deleted when dropped or explicitly removed.
#[derive(Debug)]
pub struct ScratchScript {
    path: TempPath,
}

impl ScratchScript {
    /// Write `contents` to a fresh file named `apphop-*<extension>`.
    pub fn write(
        extension: &str,
        contents: &str,
        encoding: ScriptEncoding,
    ) -> Result<Self, ExecError> {
        let mut file = tempfile::Builder::new()
            .prefix("apphop-")
            .suffix(extension)
            .tempfile()?;
        file.write_all(&encoding.encode(contents))?;
        file.flush()?;

        // Close our handle so the interpreter can open the file freely.
        let path = file.into_temp_path();
        debug!(event = "core.exec.scratch_written", path = %path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as a program argument.
    pub fn arg(&self) -> String {
        self.path.display().to_string()
    }

    /// Delete the file now; a failure is logged and otherwise ignored.
    pub fn remove(self) {
        let shown = self.path.display().to_string();
        if let Err(e) = self.path.close() {
            debug!(
                event = "core.exec.scratch_remove_failed",
                path = %shown,
                error = %e
            );
        }
    }
}
