use crate::errors::AppHopError;
use crate::exec::ExecError;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Executable not found: {path}")]
    ExecutableNotFound { path: String },

    #[error("Failed to launch '{path}': {source}")]
    SpawnFailed {
        path: String,
        #[source]
        source: ExecError,
    },
}

impl AppHopError for LaunchError {
    fn error_code(&self) -> &'static str {
        match self {
            LaunchError::ExecutableNotFound { .. } => "LAUNCH_EXECUTABLE_NOT_FOUND",
            LaunchError::SpawnFailed { .. } => "LAUNCH_SPAWN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, LaunchError::ExecutableNotFound { .. })
    }
}
