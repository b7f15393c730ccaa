//! Client for the out-of-process window helper (`apphop-activator`).
//!
//! The helper speaks two commands:
//! - `list` prints `hwnd|pid|title|processName|processPath|className` lines
//! - `activate <hwnd>` prints `Done` once the window is foregrounded

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::config::{AppHopConfig, HelperConfig, TimeoutConfig};
use crate::exec::{CommandRunner, CommandSpec, ExecError};
use crate::window::{WindowDescriptor, WindowHandle, parse_helper_list};

/// Base name of the helper executable.
pub const HELPER_BINARY: &str = "apphop-activator";

/// Substring of helper stdout confirming an activation.
pub const HELPER_DONE: &str = "Done";

pub struct HelperClient {
    runner: Arc<dyn CommandRunner>,
    config: HelperConfig,
    timeouts: TimeoutConfig,
    resolved: Mutex<Option<PathBuf>>,
}

impl HelperClient {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &AppHopConfig) -> Self {
        Self {
            runner,
            config: config.helper.clone(),
            timeouts: config.timeouts.clone(),
            resolved: Mutex::new(None),
        }
    }

    /// Resolve the helper executable.
    ///
    /// A resolved path is cached and reused until the file disappears.
    /// Filesystem and PATH checks run on the blocking pool; the cache lock
    /// is only held to read or store the path.
    pub async fn locate(&self) -> Option<PathBuf> {
        let cached = self.cached_path();
        let config = self.config.clone();

        let found = match tokio::task::spawn_blocking(move || refresh(cached, &config)).await {
            Ok(found) => found,
            Err(e) => {
                warn!(event = "core.helper.locate_failed", error = %e);
                None
            }
        };

        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone_from(&found);
        found
    }

    fn cached_path(&self) -> Option<PathBuf> {
        self.resolved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `helper list`.
    pub async fn list_windows(&self, helper: &Path) -> Result<Vec<WindowDescriptor>, ExecError> {
        let program = helper.to_string_lossy().into_owned();
        let spec = CommandSpec::new(program.clone(), self.timeouts.listing()).arg("list");
        let stdout = self.runner.run(&spec).await?.into_stdout(&program)?;
        let windows = parse_helper_list(&stdout);

        debug!(event = "core.helper.list_completed", count = windows.len());
        Ok(windows)
    }

    /// Run `helper activate <hwnd>`. `Ok(false)` when the helper did not confirm.
    pub async fn activate(&self, helper: &Path, handle: WindowHandle) -> Result<bool, ExecError> {
        let spec = CommandSpec::new(helper.to_string_lossy(), self.timeouts.activation())
            .args(["activate".to_string(), handle.to_string()]);
        let output = self.runner.run(&spec).await?;
        let confirmed = output.is_success() && output.stdout.contains(HELPER_DONE);

        debug!(
            event = "core.helper.activate_completed",
            hwnd = %handle,
            confirmed = confirmed,
            code = ?output.code
        );
        Ok(confirmed)
    }
}

fn refresh(cached: Option<PathBuf>, config: &HelperConfig) -> Option<PathBuf> {
    if let Some(path) = cached {
        if path.is_file() {
            return Some(path);
        }
        debug!(
            event = "core.helper.cache_invalidated",
            path = %path.display()
        );
    }

    let found = resolve_helper(config);
    match &found {
        Some(path) => debug!(event = "core.helper.located", path = %path.display()),
        None => debug!(event = "core.helper.not_found"),
    }
    found
}

fn resolve_helper(config: &HelperConfig) -> Option<PathBuf> {
    if let Some(path) = &config.path {
        if path.is_file() {
            return Some(path.clone());
        }
        warn!(
            event = "core.helper.configured_path_missing",
            path = %path.display()
        );
    }

    if !config.discover() {
        return None;
    }

    let file_name = format!("{HELPER_BINARY}{}", std::env::consts::EXE_SUFFIX);
    if let Ok(current) = std::env::current_exe()
        && let Some(dir) = current.parent()
    {
        let sibling = dir.join(&file_name);
        if sibling.is_file() {
            return Some(sibling);
        }
    }

    which::which(HELPER_BINARY).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::CommandOutput;
    use crate::testing::ScriptedRunner;

    fn client_with(runner: ScriptedRunner, path: Option<PathBuf>) -> HelperClient {
        let mut config = AppHopConfig::default();
        config.helper = HelperConfig {
            path,
            discover: Some(false),
        };
        HelperClient::new(Arc::new(runner), &config)
    }

    #[tokio::test]
    async fn test_locate_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("apphop-activator.exe");
        std::fs::write(&helper, b"").unwrap();

        let client = client_with(ScriptedRunner::new(), Some(helper.clone()));
        assert_eq!(client.locate().await, Some(helper));
    }

    #[tokio::test]
    async fn test_locate_missing_without_discovery() {
        let client = client_with(
            ScriptedRunner::new(),
            Some(PathBuf::from("/nonexistent/apphop-activator.exe")),
        );
        assert_eq!(client.locate().await, None);
        assert_eq!(client.cached_path(), None);
    }

    #[tokio::test]
    async fn test_cache_invalidated_when_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("apphop-activator.exe");
        std::fs::write(&helper, b"").unwrap();

        let client = client_with(ScriptedRunner::new(), Some(helper.clone()));
        assert!(client.locate().await.is_some());

        std::fs::remove_file(&helper).unwrap();
        assert_eq!(client.locate().await, None);
        assert_eq!(client.cached_path(), None);

        std::fs::write(&helper, b"").unwrap();
        assert_eq!(client.locate().await, Some(helper));
    }

    #[tokio::test]
    async fn test_concurrent_locates_share_cache() {
        let dir = tempfile::tempdir().unwrap();
        let helper = dir.path().join("apphop-activator.exe");
        std::fs::write(&helper, b"").unwrap();

        let client = client_with(ScriptedRunner::new(), Some(helper.clone()));
        let (first, second) = tokio::join!(client.locate(), client.locate());

        assert_eq!(first, Some(helper.clone()));
        assert_eq!(second, Some(helper.clone()));
        assert_eq!(client.cached_path(), Some(helper));
    }

    #[tokio::test]
    async fn test_list_windows_parses_output() {
        let runner = ScriptedRunner::new().on(
            |spec| spec.args == ["list"],
            |_| {
                Ok(CommandOutput::success(
                    "100|4321|Untitled - Notepad|notepad|C:\\Windows\\notepad.exe\r\nbad line\r\n",
                ))
            },
        );
        let client = client_with(runner, None);

        let windows = client.list_windows(Path::new("helper.exe")).await.unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].pid.as_u32(), 4321);
    }

    #[tokio::test]
    async fn test_activate_requires_done() {
        let runner = ScriptedRunner::new().on(
            |spec| spec.args.first().is_some_and(|a| a == "activate"),
            |spec| {
                if spec.args[1] == "100" {
                    Ok(CommandOutput::success("Done\r\n"))
                } else {
                    Ok(CommandOutput::success("Invalid window handle.\r\n"))
                }
            },
        );
        let client = client_with(runner, None);
        let helper = Path::new("helper.exe");

        assert!(client.activate(helper, WindowHandle::from_raw(100)).await.unwrap());
        assert!(!client.activate(helper, WindowHandle::from_raw(5)).await.unwrap());
    }

    #[tokio::test]
    async fn test_activate_non_zero_exit_is_not_confirmed() {
        let runner = ScriptedRunner::new().on(|_| true, |_| {
            Ok(CommandOutput {
                code: Some(1),
                stdout: "Done".to_string(),
                stderr: String::new(),
            })
        });
        let client = client_with(runner, None);

        assert!(
            !client
                .activate(Path::new("helper.exe"), WindowHandle::from_raw(1))
                .await
                .unwrap()
        );
    }
}
