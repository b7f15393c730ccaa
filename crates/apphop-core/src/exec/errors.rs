use crate::errors::AppHopError;

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Program '{program}' not found")]
    NotFound { program: String },

    #[error("Failed to run '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    #[error("'{program}' timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },

    #[error("'{program}' exited with code {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to write scratch script: {source}")]
    ScriptWrite {
        #[from]
        source: std::io::Error,
    },
}

impl ExecError {
    /// The program could not be started at all, as opposed to starting and failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExecError::NotFound { .. })
    }
}

impl AppHopError for ExecError {
    fn error_code(&self) -> &'static str {
        match self {
            ExecError::NotFound { .. } => "EXEC_NOT_FOUND",
            ExecError::SpawnFailed { .. } => "EXEC_SPAWN_FAILED",
            ExecError::Timeout { .. } => "EXEC_TIMEOUT",
            ExecError::NonZeroExit { .. } => "EXEC_NON_ZERO_EXIT",
            ExecError::ScriptWrite { .. } => "EXEC_SCRIPT_WRITE_FAILED",
        }
    }
}
