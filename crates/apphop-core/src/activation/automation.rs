//! Discovery of the optional AutoHotkey automation tool.
//!
//! Path and dialect are resolved once per [`AutomationLocator`] and reused.
//! Concurrent first calls wait on the same initialization.

use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::{AppHopConfig, AutomationConfig};
use crate::exec::{CommandRunner, CommandSpec};

static V2_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)AutoHotkey v2").unwrap_or_else(|e| panic!("invalid banner pattern: {e}"))
});

/// Names searched on PATH when no well-known location exists.
const PATH_NAMES: [&str; 2] = ["AutoHotkey", "AutoHotkey64"];

/// The two incompatible AutoHotkey script dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationFlavor {
    V1,
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationTool {
    pub path: PathBuf,
    pub flavor: AutomationFlavor,
}

pub struct AutomationLocator {
    runner: Arc<dyn CommandRunner>,
    config: AutomationConfig,
    probe_timeout: Duration,
    tool: OnceCell<Option<AutomationTool>>,
}

impl AutomationLocator {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &AppHopConfig) -> Self {
        Self {
            runner,
            config: config.automation.clone(),
            probe_timeout: config.timeouts.activation(),
            tool: OnceCell::new(),
        }
    }

    /// The installed tool, or `None` when it is not installed.
    pub async fn tool(&self) -> Option<AutomationTool> {
        self.tool.get_or_init(|| self.discover()).await.clone()
    }

    async fn discover(&self) -> Option<AutomationTool> {
        let Some(path) = self.find_path() else {
            debug!(event = "core.automation.not_found");
            return None;
        };
        let flavor = self.probe_flavor(&path).await;

        debug!(
            event = "core.automation.detected",
            path = %path.display(),
            flavor = ?flavor
        );
        Some(AutomationTool { path, flavor })
    }

    fn find_path(&self) -> Option<PathBuf> {
        if let Some(candidate) = self.config.candidates().into_iter().find(|c| c.is_file()) {
            return Some(candidate);
        }
        if !self.config.search_path() {
            return None;
        }
        PATH_NAMES.iter().find_map(|name| which::which(name).ok())
    }

    /// Ask the tool for its usage banner; anything but a v2 banner means v1.
    async fn probe_flavor(&self, path: &std::path::Path) -> AutomationFlavor {
        let spec = CommandSpec::new(path.to_string_lossy(), self.probe_timeout).arg("/?");
        match self.runner.run(&spec).await {
            Ok(output) if V2_BANNER.is_match(&output.stdout) || V2_BANNER.is_match(&output.stderr) => {
                AutomationFlavor::V2
            }
            Ok(_) => AutomationFlavor::V1,
            Err(e) => {
                debug!(event = "core.automation.probe_failed", error = %e);
                AutomationFlavor::V1
            }
        }
    }
}
