use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::activation::automation::{AutomationFlavor, AutomationLocator};
use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest};
use crate::exec::escape::{ahk_v1_string, ahk_v2_string};
use crate::exec::{CommandRunner, CommandSpec, ScratchScript, ScriptEncoding};

const EXE_PLACEHOLDER: &str = "__APPHOP_EXE__";

/// v2 dialect. `WinActivate` throws when nothing matches, hence `try`.
const SCRIPT_V2: &str = r#"#SingleInstance Off
#NoTrayIcon
pid := A_Args.Length >= 1 ? A_Args[1] : ""
exe := __APPHOP_EXE__
if (pid != "") {
  try WinActivate "ahk_pid " pid
  WinWaitActive "ahk_pid " pid, , 0.6
}
if (!WinActive("ahk_pid " pid) && exe != "") {
  try WinActivate "ahk_exe " exe
  WinWaitActive "ahk_exe " exe, , 0.6
}
if (WinActive("ahk_pid " pid) || (exe != "" && WinActive("ahk_exe " exe))) {
  FileAppend "OK", "*"
}
"#;

const SCRIPT_V1: &str = r#"#SingleInstance Off
#NoTrayIcon
pid = %1%
exe := __APPHOP_EXE__
if (pid != "") {
  WinActivate, ahk_pid %pid%
  WinWaitActive, ahk_pid %pid%, , 0.6
}
if (!WinActive("ahk_pid " pid) && exe != "") {
  WinActivate, ahk_exe %exe%
  WinWaitActive, ahk_exe %exe%, , 0.6
}
if (WinActive("ahk_pid " pid) || (exe != "" && WinActive("ahk_exe " exe)))
  FileAppend, OK, *
"#;

/// Render the activation script for `flavor` with the executable name embedded.
pub fn build_script(flavor: AutomationFlavor, exe_name: &str) -> String {
    match flavor {
        AutomationFlavor::V2 => SCRIPT_V2.replace(EXE_PLACEHOLDER, &ahk_v2_string(exe_name)),
        AutomationFlavor::V1 => SCRIPT_V1.replace(EXE_PLACEHOLDER, &ahk_v1_string(exe_name)),
    }
}

/// AutoHotkey `WinActivate` by pid, then by executable name.
pub struct AutoHotkeyStrategy {
    runner: Arc<dyn CommandRunner>,
    locator: Arc<AutomationLocator>,
    timeout: Duration,
}

impl AutoHotkeyStrategy {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        locator: Arc<AutomationLocator>,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            locator,
            timeout,
        }
    }
}

#[async_trait]
impl ActivationStrategy for AutoHotkeyStrategy {
    fn name(&self) -> &'static str {
        "autohotkey"
    }

    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome {
        if request.pids.is_empty() {
            return ActivationOutcome::declined("no process ids");
        }

        let Some(tool) = self.locator.tool().await else {
            return ActivationOutcome::declined("AutoHotkey not installed");
        };

        let source = build_script(tool.flavor, &request.app.file_name());
        let script = match ScratchScript::write(".ahk", &source, ScriptEncoding::Utf8Bom) {
            Ok(script) => script,
            Err(e) => return ActivationOutcome::declined(e.to_string()),
        };

        let program = tool.path.to_string_lossy().into_owned();
        let mut outcome = ActivationOutcome::failed("AutoHotkey did not confirm activation");
        for pid in request.pids.iter() {
            let spec = CommandSpec::new(program.clone(), self.timeout).args([
                "/ErrorStdOut".to_string(),
                script.arg(),
                pid.to_string(),
            ]);
            match self.runner.run(&spec).await {
                Ok(output) if output.reports_ok() => {
                    outcome = ActivationOutcome::Succeeded;
                    break;
                }
                Ok(output) => {
                    debug!(
                        event = "core.activation.autohotkey_pid_declined",
                        pid = %pid,
                        code = ?output.code,
                        stderr = %output.stderr.trim()
                    );
                }
                Err(e) => {
                    debug!(event = "core.activation.autohotkey_pid_error", pid = %pid, error = %e);
                }
            }
        }

        script.remove();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_script_v2_embeds_escaped_exe() {
        let script = build_script(AutomationFlavor::V2, "we\"ird.exe");
        assert!(script.contains("exe := \"we`\"ird.exe\""));
        assert!(script.contains("FileAppend \"OK\", \"*\""));
        assert!(!script.contains(EXE_PLACEHOLDER));
    }

    #[test]
    fn test_build_script_v1_embeds_escaped_exe() {
        let script = build_script(AutomationFlavor::V1, "we\"ird.exe");
        assert!(script.contains("exe := \"we\"\"ird.exe\""));
        assert!(script.contains("pid = %1%"));
        assert!(script.contains("FileAppend, OK, *"));
    }
}
