use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::matching::MatchTokens;
use crate::process::ProcessIdSet;

/// The application a caller wants brought to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetApp {
    pub display_name: String,
    pub executable_path: PathBuf,
}

impl TargetApp {
    pub fn new(display_name: impl Into<String>, executable_path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            executable_path: executable_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.executable_path
    }

    pub fn path_str(&self) -> String {
        self.executable_path.to_string_lossy().into_owned()
    }

    /// Executable file name, e.g. `notepad.exe`.
    pub fn file_name(&self) -> String {
        let path = self.path_str();
        path.rsplit(['\\', '/']).next().unwrap_or(&path).to_string()
    }

    pub fn match_tokens(&self) -> MatchTokens {
        MatchTokens::build(&self.display_name, &self.path_str())
    }
}

/// Result of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Succeeded,
    /// Nothing to act on: tool missing, no candidate above threshold.
    Declined { reason: String },
    /// A candidate was found but activation was not confirmed.
    Failed { reason: String },
}

impl ActivationOutcome {
    pub fn declined(reason: impl Into<String>) -> Self {
        ActivationOutcome::Declined {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        ActivationOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActivationOutcome::Succeeded)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ActivationOutcome::Succeeded => "succeeded",
            ActivationOutcome::Declined { .. } => "declined",
            ActivationOutcome::Failed { .. } => "failed",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ActivationOutcome::Succeeded => None,
            ActivationOutcome::Declined { reason } | ActivationOutcome::Failed { reason } => {
                Some(reason)
            }
        }
    }
}

/// Terminal state of one `activate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationState {
    /// No process runs the target executable. No strategy was tried.
    NotRunning,
    /// An existing window was brought to the front.
    Activated { strategy: &'static str },
    /// The target runs but every strategy declined or failed.
    NotActivated,
}

impl ActivationState {
    pub fn is_activated(&self) -> bool {
        matches!(self, ActivationState::Activated { .. })
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationState::NotRunning => write!(f, "not running"),
            ActivationState::Activated { strategy } => write!(f, "activated via {strategy}"),
            ActivationState::NotActivated => write!(f, "running but not activated"),
        }
    }
}

/// Everything a strategy needs about the target, computed once per `activate`.
#[derive(Debug)]
pub struct ActivationRequest<'a> {
    pub app: &'a TargetApp,
    pub pids: &'a ProcessIdSet,
    pub tokens: &'a MatchTokens,
}
