//! Running external programs with a bounded timeout.

use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::exec::errors::ExecError;
use crate::exec::types::{CommandOutput, CommandSpec, decode_output};

/// Hides the console window of child processes on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Trait defining the boundary through which the core reaches the OS.
///
/// The production implementation is [`SystemRunner`]; tests substitute a
/// scripted runner so activation logic can be exercised on any host.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a program to completion and capture its output.
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - The program ran; its exit code may be non-zero
    /// * `Err(ExecError::NotFound)` - The program does not exist
    /// * `Err(ExecError::Timeout)` - The program exceeded `spec.timeout` and was killed
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError>;

    /// Start a program without waiting for it (fire-and-forget).
    fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ExecError>;
}

/// Runs real processes via tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

fn spawn_error(program: &str, e: std::io::Error) -> ExecError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ExecError::NotFound {
            program: program.to_string(),
        }
    } else {
        ExecError::SpawnFailed {
            program: program.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        debug!(
            event = "core.exec.run_started",
            program = spec.program_name(),
            arg_count = spec.args.len(),
            timeout_ms = spec.timeout_ms()
        );

        let mut command = tokio::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let child = command
            .spawn()
            .map_err(|e| spawn_error(&spec.program, e))?;

        // Dropping the wait future on timeout kills the child (kill_on_drop).
        let output = match tokio::time::timeout(spec.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExecError::SpawnFailed {
                    program: spec.program.clone(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                warn!(
                    event = "core.exec.run_timed_out",
                    program = spec.program_name(),
                    timeout_ms = spec.timeout_ms()
                );
                return Err(ExecError::Timeout {
                    program: spec.program.clone(),
                    timeout_ms: spec.timeout_ms(),
                });
            }
        };

        let result = CommandOutput {
            code: output.status.code(),
            stdout: decode_output(&output.stdout),
            stderr: decode_output(&output.stderr),
        };

        debug!(
            event = "core.exec.run_completed",
            program = spec.program_name(),
            code = ?result.code,
            stdout_bytes = output.stdout.len()
        );

        Ok(result)
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<(), ExecError> {
        let mut command = std::process::Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let child = command
            .spawn()
            .map_err(|e| spawn_error(&spec.program, e))?;

        debug!(
            event = "core.exec.spawn_detached",
            program = spec.program_name(),
            pid = child.id()
        );

        Ok(())
    }
}
