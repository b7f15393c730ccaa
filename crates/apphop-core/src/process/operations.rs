use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::{AppHopConfig, ProcessQueryBackend};
use crate::exec::escape::wql_string;
use crate::exec::{CommandRunner, CommandSpec, ExecError};
use crate::process::inventory::find_in_inventory;
use crate::process::types::{ProcessId, ProcessIdSet};

static PROCESS_ID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ProcessId=(\d+)$").unwrap_or_else(|e| panic!("invalid ProcessId pattern: {e}"))
});

/// Find the processes currently running `executable` (a full path or a bare name).
///
/// Never fails: a query error, a timeout or no match all yield an empty set,
/// which callers read as "not running".
pub async fn find_process_ids(
    runner: &dyn CommandRunner,
    config: &AppHopConfig,
    executable: &str,
) -> ProcessIdSet {
    let file_name = process_file_name(executable);
    debug!(
        event = "core.process.query_started",
        executable = executable,
        file_name = %file_name,
        backend = ?config.process_query.backend()
    );

    let pids = match config.process_query.backend() {
        ProcessQueryBackend::Inventory => inventory_lookup(config, executable, &file_name).await,
        ProcessQueryBackend::Wmic => wmic_lookup(runner, config, executable, &file_name)
            .await
            .unwrap_or_else(|e| {
                warn!(event = "core.process.query_failed", backend = "wmic", error = %e);
                ProcessIdSet::new()
            }),
        ProcessQueryBackend::Auto => match wmic_lookup(runner, config, executable, &file_name).await
        {
            Ok(pids) => pids,
            Err(e) if e.is_not_found() => {
                debug!(
                    event = "core.process.wmic_unavailable",
                    fallback = "inventory"
                );
                inventory_lookup(config, executable, &file_name).await
            }
            Err(e) => {
                warn!(event = "core.process.query_failed", backend = "wmic", error = %e);
                ProcessIdSet::new()
            }
        },
    };

    debug!(
        event = "core.process.query_completed",
        executable = executable,
        pids = %pids,
        count = pids.len()
    );
    pids
}

/// Executable path query first, then image name.
async fn wmic_lookup(
    runner: &dyn CommandRunner,
    config: &AppHopConfig,
    executable: &str,
    file_name: &str,
) -> Result<ProcessIdSet, ExecError> {
    let timeout = config.timeouts.process_query();

    if is_path(executable) {
        let by_path = CommandSpec::new("wmic", timeout).args([
            "process".to_string(),
            "where".to_string(),
            format!("ExecutablePath='{}'", wql_string(executable)),
            "get".to_string(),
            "ProcessId".to_string(),
            "/value".to_string(),
        ]);
        match runner.run(&by_path).await.and_then(|o| o.into_stdout("wmic")) {
            Ok(stdout) => {
                let pids = parse_process_id_lines(&stdout);
                if !pids.is_empty() {
                    return Ok(pids);
                }
            }
            Err(e) if e.is_not_found() => return Err(e),
            Err(e) => {
                debug!(event = "core.process.path_query_failed", error = %e);
            }
        }
    }

    let by_name = CommandSpec::new("wmic", timeout).args([
        "process".to_string(),
        "where".to_string(),
        format!("Name='{}'", wql_string(file_name)),
        "get".to_string(),
        "ProcessId".to_string(),
        "/value".to_string(),
    ]);
    let stdout = runner.run(&by_name).await?.into_stdout("wmic")?;
    Ok(parse_process_id_lines(&stdout))
}

async fn inventory_lookup(config: &AppHopConfig, executable: &str, file_name: &str) -> ProcessIdSet {
    let executable = executable.to_string();
    let file_name = file_name.to_string();
    let lookup = tokio::task::spawn_blocking(move || find_in_inventory(&executable, &file_name));

    match tokio::time::timeout(config.timeouts.process_query(), lookup).await {
        Ok(Ok(pids)) => pids,
        Ok(Err(e)) => {
            warn!(event = "core.process.inventory_failed", error = %e);
            ProcessIdSet::new()
        }
        Err(_) => {
            warn!(
                event = "core.process.inventory_timed_out",
                timeout_ms = config.timeouts.process_query_ms()
            );
            ProcessIdSet::new()
        }
    }
}

/// Parse `ProcessId=<digits>` lines, ignoring everything else.
pub fn parse_process_id_lines(output: &str) -> ProcessIdSet {
    output
        .lines()
        .filter_map(|line| PROCESS_ID_LINE.captures(line.trim()))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .map(ProcessId::from)
        .collect()
}

/// Image name as the process table reports it: the file name, `.exe` assumed.
fn process_file_name(executable: &str) -> String {
    let name = executable
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or(executable)
        .trim();
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{name}.exe")
    }
}

fn is_path(executable: &str) -> bool {
    executable.contains(['\\', '/'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::CommandOutput;
    use crate::testing::ScriptedRunner;

    fn wmic_config() -> AppHopConfig {
        let mut config = AppHopConfig::default();
        config.process_query.backend = Some(ProcessQueryBackend::Wmic);
        config
    }

    fn where_clause(spec: &CommandSpec) -> String {
        spec.args[2].clone()
    }

    #[test]
    fn test_parse_process_id_lines() {
        let output = "\r\n\r\nProcessId=4321\r\n\r\nProcessId=88\r\nNode=HOST\r\nProcessId=abc\r\n";
        let pids = parse_process_id_lines(output);
        assert_eq!(pids.iter().map(|p| p.as_u32()).collect::<Vec<_>>(), vec![88, 4321]);
    }

    #[test]
    fn test_parse_process_id_lines_empty() {
        assert!(parse_process_id_lines("No Instance(s) Available.").is_empty());
        assert!(parse_process_id_lines("").is_empty());
    }

    #[test]
    fn test_process_file_name() {
        assert_eq!(process_file_name(r"C:\Windows\System32\notepad.exe"), "notepad.exe");
        assert_eq!(process_file_name("notepad"), "notepad.exe");
        assert_eq!(process_file_name("C:/tools/code.EXE"), "code.EXE");
    }

    #[tokio::test]
    async fn test_path_match_short_circuits_name_query() {
        let runner = ScriptedRunner::new().on_program("wmic", |spec| {
            if where_clause(spec).starts_with("ExecutablePath=") {
                Ok(CommandOutput::success("ProcessId=4321\r\n"))
            } else {
                Ok(CommandOutput::success("ProcessId=9999\r\n"))
            }
        });

        let pids = find_process_ids(&runner, &wmic_config(), r"C:\Windows\System32\notepad.exe").await;

        assert_eq!(pids.iter().map(|p| p.as_u32()).collect::<Vec<_>>(), vec![4321]);
        let calls = runner.calls_to("wmic");
        assert_eq!(calls.len(), 1);
        assert_eq!(
            where_clause(&calls[0]),
            r"ExecutablePath='C:\\Windows\\System32\\notepad.exe'"
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_name_query() {
        let runner = ScriptedRunner::new().on_program("wmic", |spec| {
            if where_clause(spec).starts_with("Name=") {
                Ok(CommandOutput::success("ProcessId=7\r\nProcessId=8\r\n"))
            } else {
                Ok(CommandOutput::success("No Instance(s) Available.\r\n"))
            }
        });

        let pids = find_process_ids(&runner, &wmic_config(), r"C:\Apps\Foo.exe").await;

        assert_eq!(pids.len(), 2);
        let calls = runner.calls_to("wmic");
        assert_eq!(calls.len(), 2);
        assert_eq!(where_clause(&calls[1]), "Name='Foo.exe'");
    }

    #[tokio::test]
    async fn test_bare_name_skips_path_query() {
        let runner = ScriptedRunner::new()
            .on_program("wmic", |_| Ok(CommandOutput::success("ProcessId=5\r\n")));

        let pids = find_process_ids(&runner, &wmic_config(), "notepad").await;

        assert_eq!(pids.len(), 1);
        let calls = runner.calls_to("wmic");
        assert_eq!(calls.len(), 1);
        assert_eq!(where_clause(&calls[0]), "Name='notepad.exe'");
    }

    #[tokio::test]
    async fn test_timeout_yields_empty_set() {
        let runner = ScriptedRunner::new().on_program("wmic", |spec| {
            Err(ExecError::Timeout {
                program: spec.program.clone(),
                timeout_ms: spec.timeout_ms(),
            })
        });

        let pids = find_process_ids(&runner, &wmic_config(), r"C:\Apps\Foo.exe").await;
        assert!(pids.is_empty());
    }

    #[tokio::test]
    async fn test_non_zero_exit_yields_empty_set() {
        let runner = ScriptedRunner::new()
            .on_program("wmic", |_| Ok(CommandOutput::failure(1, "Invalid query")));

        let pids = find_process_ids(&runner, &AppHopConfig::default(), r"C:\Apps\Foo.exe").await;
        assert!(pids.is_empty());
    }

    #[tokio::test]
    async fn test_query_uses_process_query_timeout() {
        let mut config = wmic_config();
        config.timeouts.process_query_ms = Some(1234);
        let runner = ScriptedRunner::new()
            .on_program("wmic", |_| Ok(CommandOutput::success("")));

        find_process_ids(&runner, &config, "foo").await;

        assert_eq!(runner.calls_to("wmic")[0].timeout_ms(), 1234);
    }

    #[tokio::test]
    async fn test_auto_falls_back_to_inventory_when_wmic_missing() {
        // No rules: wmic behaves as not installed.
        let runner = ScriptedRunner::new();

        let pids = find_process_ids(
            &runner,
            &AppHopConfig::default(),
            r"C:\nowhere\apphop-no-such-program.exe",
        )
        .await;

        assert!(pids.is_empty());
        assert_eq!(runner.calls_to("wmic").len(), 1);
    }

    #[tokio::test]
    async fn test_inventory_backend_never_runs_wmic() {
        let mut config = AppHopConfig::default();
        config.process_query.backend = Some(ProcessQueryBackend::Inventory);
        let runner = ScriptedRunner::new();

        find_process_ids(&runner, &config, "apphop-no-such-program").await;

        assert!(runner.calls().is_empty());
    }
}
