use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::SCRIPT_HOST;
use crate::activation::traits::ActivationStrategy;
use crate::activation::types::{ActivationOutcome, ActivationRequest};
use crate::exec::escape::jscript_string;
use crate::exec::{CommandRunner, CommandSpec, ExecError, ScratchScript, ScriptEncoding};
use crate::matching::Scorer;
use crate::window::{TaskListing, parse_tasklist_csv};

/// Verbose CSV task listing with the console switched to UTF-8 first.
pub const TASKLIST_COMMAND: &str = "chcp 65001 > nul & tasklist /v /fo csv";

const TITLE_PLACEHOLDER: &str = "__APPHOP_TITLE__";

const ACTIVATE_BY_TITLE: &str = "\
var sh = new ActiveXObject('WScript.Shell');
var ok = sh.AppActivate(__APPHOP_TITLE__);
if (ok) {
  sh.SendKeys('%');
  WScript.Echo('OK');
}
";

pub fn build_title_script(title: &str) -> String {
    ACTIVATE_BY_TITLE.replace(TITLE_PLACEHOLDER, &jscript_string(title))
}

/// Least reliable path: match task listing titles, then `AppActivate` by title.
pub struct TitleStrategy {
    runner: Arc<dyn CommandRunner>,
    scorer: Scorer,
    listing_timeout: Duration,
    activation_timeout: Duration,
}

impl TitleStrategy {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        scorer: Scorer,
        listing_timeout: Duration,
        activation_timeout: Duration,
    ) -> Self {
        Self {
            runner,
            scorer,
            listing_timeout,
            activation_timeout,
        }
    }

    async fn task_listing(&self) -> Result<Vec<TaskListing>, ExecError> {
        let spec = CommandSpec::new("cmd", self.listing_timeout).args(["/c", TASKLIST_COMMAND]);
        let stdout = self.runner.run(&spec).await?.into_stdout("tasklist")?;
        Ok(parse_tasklist_csv(&stdout))
    }
}

#[async_trait]
impl ActivationStrategy for TitleStrategy {
    fn name(&self) -> &'static str {
        "title"
    }

    async fn try_activate(&self, request: &ActivationRequest<'_>) -> ActivationOutcome {
        let rows = match self.task_listing().await {
            Ok(rows) => rows,
            Err(e) => return ActivationOutcome::declined(format!("task listing failed: {e}")),
        };

        // Without pids every titled row is a candidate.
        let candidates: Vec<TaskListing> = if request.pids.is_empty() {
            rows
        } else {
            rows.into_iter()
                .filter(|row| request.pids.contains(row.pid))
                .collect()
        };

        let Some(best) = self.scorer.best_listing(&candidates, request.tokens) else {
            return ActivationOutcome::declined(format!(
                "no title scored {} or more among {}",
                self.scorer.weights().listing_threshold,
                candidates.len()
            ));
        };

        debug!(
            event = "core.activation.title_candidate",
            pid = %best.item.pid,
            score = best.score,
            title = %best.item.title
        );

        let source = build_title_script(&best.item.title);
        let script = match ScratchScript::write(".js", &source, ScriptEncoding::Utf16LeBom) {
            Ok(script) => script,
            Err(e) => return ActivationOutcome::declined(e.to_string()),
        };

        let spec = CommandSpec::new(SCRIPT_HOST, self.activation_timeout)
            .args(["//nologo".to_string(), script.arg()]);
        let outcome = match self.runner.run(&spec).await {
            Ok(output) if output.reports_ok() => ActivationOutcome::Succeeded,
            Ok(_) => ActivationOutcome::failed(format!(
                "AppActivate did not confirm '{}'",
                best.item.title
            )),
            Err(e) => ActivationOutcome::failed(e.to_string()),
        };

        script.remove();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_title_script_escapes_title() {
        let script = build_title_script("Bob's \\ Editor");
        assert!(script.contains(r"sh.AppActivate('Bob\'s \\ Editor');"));
        assert!(!script.contains(TITLE_PLACEHOLDER));
    }
}
