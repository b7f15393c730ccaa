//! Starting a fresh instance of an application.

use std::time::Duration;

use tracing::info;

use crate::activation::errors::LaunchError;
use crate::activation::types::TargetApp;
use crate::exec::{CommandRunner, CommandSpec};

/// Shell used for argument-less launches; it behaves like a double-click.
const SHELL_LAUNCHER: &str = "explorer.exe";

/// Start `app` without waiting for it.
///
/// Without arguments the executable is handed to the shell, whose exit code
/// is unreliable and therefore ignored. With arguments the executable is
/// spawned directly from its own directory.
pub fn launch(
    runner: &dyn CommandRunner,
    app: &TargetApp,
    args: &[String],
    timeout: Duration,
) -> Result<(), LaunchError> {
    let path = app.path_str();
    if !app.path().is_file() {
        return Err(LaunchError::ExecutableNotFound { path });
    }

    let spec = if args.is_empty() {
        CommandSpec::new(SHELL_LAUNCHER, timeout).arg(path.clone())
    } else {
        let mut spec = CommandSpec::new(path.clone(), timeout).args(args.iter().cloned());
        if let Some(dir) = app.path().parent() {
            spec = spec.current_dir(dir);
        }
        spec
    };

    runner
        .spawn_detached(&spec)
        .map_err(|source| LaunchError::SpawnFailed {
            path: path.clone(),
            source,
        })?;

    info!(
        event = "core.launch.completed",
        app = %app.display_name,
        path = %path,
        via = spec.program_name(),
        arg_count = args.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    fn existing_app(dir: &tempfile::TempDir) -> TargetApp {
        let exe = dir.path().join("tool.exe");
        std::fs::write(&exe, b"").unwrap();
        TargetApp::new("Tool", exe)
    }

    #[test]
    fn test_launch_without_args_uses_shell() {
        let dir = tempfile::tempdir().unwrap();
        let app = existing_app(&dir);
        let runner = ScriptedRunner::new();

        launch(&runner, &app, &[], Duration::from_secs(1)).unwrap();

        let spawned = runner.spawned();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].program, "explorer.exe");
        assert_eq!(spawned[0].args, vec![app.path_str()]);
    }

    #[test]
    fn test_launch_with_args_spawns_directly() {
        let dir = tempfile::tempdir().unwrap();
        let app = existing_app(&dir);
        let runner = ScriptedRunner::new();

        launch(
            &runner,
            &app,
            &["--new-window".to_string()],
            Duration::from_secs(1),
        )
        .unwrap();

        let spawned = runner.spawned();
        assert_eq!(spawned[0].program, app.path_str());
        assert_eq!(spawned[0].args, vec!["--new-window"]);
        assert_eq!(spawned[0].current_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_launch_missing_executable() {
        let runner = ScriptedRunner::new();
        let app = TargetApp::new("Gone", "/nonexistent/gone.exe");

        let err = launch(&runner, &app, &[], Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, LaunchError::ExecutableNotFound { .. }));
        assert!(runner.spawned().is_empty());
    }
}
