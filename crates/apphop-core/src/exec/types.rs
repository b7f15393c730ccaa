use std::path::PathBuf;
use std::time::Duration;

use crate::exec::errors::ExecError;

/// A single external program invocation with its timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// File name of the program, for log fields.
    pub fn program_name(&self) -> &str {
        self.program
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.program)
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Captured result of a finished program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout of a successful run, or `NonZeroExit`.
    pub fn into_stdout(self, program: &str) -> Result<String, ExecError> {
        if self.is_success() {
            Ok(self.stdout)
        } else {
            Err(ExecError::NonZeroExit {
                program: program.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }

    /// Whether trimmed stdout is exactly the script success sentinel.
    pub fn reports_ok(&self) -> bool {
        self.is_success() && self.stdout.trim() == "OK"
    }
}

/// Decode program output bytes.
///
/// Some Windows tools write UTF-16LE when their stdout is a pipe; everything
/// else is treated as UTF-8 with lossy replacement.
pub fn decode_output(bytes: &[u8]) -> String {
    let has_bom = bytes.starts_with(&[0xFF, 0xFE]);
    let looks_wide = bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes[1] == 0 && bytes[0] != 0;

    if has_bom || looks_wide {
        let body = if has_bom { &bytes[2..] } else { bytes };
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let spec = CommandSpec::new(r"C:\Windows\System32\cscript.exe", Duration::from_secs(5))
            .arg("//nologo")
            .args(["a.js", "4321"]);

        assert_eq!(spec.args, vec!["//nologo", "a.js", "4321"]);
        assert_eq!(spec.program_name(), "cscript.exe");
        assert_eq!(spec.timeout_ms(), 5000);
        assert_eq!(spec.current_dir, None);
    }

    #[test]
    fn test_reports_ok_requires_exact_sentinel() {
        assert!(CommandOutput::success("OK\r\n").reports_ok());
        assert!(!CommandOutput::success("OK then").reports_ok());
        assert!(!CommandOutput::success("").reports_ok());

        let mut failed = CommandOutput::success("OK");
        failed.code = Some(1);
        assert!(!failed.reports_ok());
    }

    #[test]
    fn test_into_stdout_non_zero_exit() {
        let err = CommandOutput::failure(2, "boom\n")
            .into_stdout("wmic")
            .unwrap_err();
        match err {
            ExecError::NonZeroExit {
                program,
                code,
                stderr,
            } => {
                assert_eq!(program, "wmic");
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_output_utf8() {
        assert_eq!(decode_output(b"ProcessId=42\r\n"), "ProcessId=42\r\n");
    }

    #[test]
    fn test_decode_output_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "ProcessId=7".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_output(&bytes), "ProcessId=7");
    }

    #[test]
    fn test_decode_output_utf16_without_bom() {
        let bytes: Vec<u8> = "Done"
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect();
        assert_eq!(decode_output(&bytes), "Done");
    }

    #[test]
    fn test_decode_output_empty() {
        assert_eq!(decode_output(&[]), "");
    }
}
