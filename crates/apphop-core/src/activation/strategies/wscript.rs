use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::SCRIPT_HOST;
use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest};
use crate::exec::{CommandRunner, CommandSpec, ScratchScript, ScriptEncoding};

/// Activates the window owned by the pid in argument 0 and echoes `OK`.
const ACTIVATE_BY_PID: &str = "\
var sh = new ActiveXObject('WScript.Shell');
var pid = parseInt(WScript.Arguments(0), 10);
var ok = sh.AppActivate(pid);
if (ok) {
  sh.SendKeys('%');
  WScript.Echo('OK');
}
";

/// Windows Script Host `AppActivate` by process id, one pid at a time.
pub struct WscriptStrategy {
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
}

impl WscriptStrategy {
    pub fn new(runner: Arc<dyn CommandRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }
}

#[async_trait]
impl ActivationStrategy for WscriptStrategy {
    fn name(&self) -> &'static str {
        "wscript"
    }

    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome {
        if request.pids.is_empty() {
            return ActivationOutcome::declined("no process ids");
        }

        let script = match ScratchScript::write(".js", ACTIVATE_BY_PID, ScriptEncoding::Utf16LeBom) {
            Ok(script) => script,
            Err(e) => return ActivationOutcome::declined(e.to_string()),
        };

        let mut outcome = ActivationOutcome::declined("AppActivate matched no window");
        for pid in request.pids.iter() {
            let spec = CommandSpec::new(SCRIPT_HOST, self.timeout).args([
                "//nologo".to_string(),
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
                        event = "core.activation.wscript_pid_declined",
                        pid = %pid,
                        code = ?output.code
                    );
                }
                Err(e) if e.is_not_found() => {
                    outcome = ActivationOutcome::declined(format!("{SCRIPT_HOST} not available"));
                    break;
                }
                Err(e) => {
                    debug!(event = "core.activation.wscript_pid_error", pid = %pid, error = %e);
                }
            }
        }

        script.remove();
        outcome
    }
}
