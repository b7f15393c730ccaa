//! Discovery of installed applications from desktop and Start Menu shortcuts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::errors::ImportError;
use crate::exec::escape::{encode_powershell_command, powershell_single_quoted};
use crate::exec::{CommandRunner, CommandSpec};

/// An executable found by a shortcut scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutCandidate {
    pub name: String,
    pub path: PathBuf,
}

impl ShortcutCandidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Prints `name|target` for every shortcut in `$paths` that points at an exe.
const RESOLVE_SCRIPT: &str = "\
[Console]::OutputEncoding = [System.Text.Encoding]::UTF8
$paths = __APPHOP_PATHS__ | ConvertFrom-Json
$shell = New-Object -ComObject WScript.Shell
foreach ($p in $paths) {
  try {
    $target = $shell.CreateShortcut($p).TargetPath
    if ($target -and $target -like '*.exe') {
      $name = [System.IO.Path]::GetFileNameWithoutExtension($p)
      Write-Output \"$name|$target\"
    }
  } catch {}
}
";

/// Desktop, per-user Start Menu and all-users Start Menu, in that order.
pub fn shortcut_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join("Desktop"));
    }
    if let Some(roaming) = dirs::data_dir() {
        dirs.push(roaming.join(r"Microsoft\Windows\Start Menu\Programs"));
    }
    let program_data = std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"));
    dirs.push(program_data.join(r"Microsoft\Windows\Start Menu\Programs"));
    dirs
}

/// Scan `dirs` one level deep; sorted by name and unique by normalized path.
pub async fn find_shortcuts(
    runner: &dyn CommandRunner,
    dirs: &[PathBuf],
    timeout: Duration,
) -> Vec<ShortcutCandidate> {
    let mut found = Vec::new();
    let mut links = Vec::new();

    for dir in dirs.iter().filter(|d| d.is_dir()) {
        let (exes, lnks) = scan_directory(dir);
        debug!(
            event = "core.import.dir_scanned",
            dir = %dir.display(),
            exes = exes.len(),
            links = lnks.len()
        );
        found.extend(exes);
        links.extend(lnks);
    }

    if !links.is_empty() {
        match resolve_shortcuts(runner, &links, timeout).await {
            Ok(resolved) => found.extend(resolved),
            Err(e) => warn!(event = "core.import.resolve_failed", error = %e),
        }
    }

    let mut seen = std::collections::HashSet::new();
    found.retain(|c| seen.insert(normalize_path(&c.path)));
    found.sort_by_key(|c| c.name.to_lowercase());
    found
}

/// Executables and shortcut files directly inside `dir`.
fn scan_directory(dir: &Path) -> (Vec<ShortcutCandidate>, Vec<PathBuf>) {
    let mut exes = Vec::new();
    let mut links = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.into_path();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "exe" => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                exes.push(ShortcutCandidate::new(name, path));
            }
            "lnk" => links.push(path),
            _ => {}
        }
    }

    (exes, links)
}

/// Resolve shortcut targets with a single PowerShell invocation.
async fn resolve_shortcuts(
    runner: &dyn CommandRunner,
    links: &[PathBuf],
    timeout: Duration,
) -> Result<Vec<ShortcutCandidate>, ImportError> {
    let paths: Vec<String> = links.iter().map(|p| p.display().to_string()).collect();
    let json = serde_json::to_string(&paths).unwrap_or_else(|_| "[]".to_string());
    let script = RESOLVE_SCRIPT.replace("__APPHOP_PATHS__", &powershell_single_quoted(&json));

    let spec = CommandSpec::new("powershell", timeout).args([
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-EncodedCommand".to_string(),
        encode_powershell_command(&script),
    ]);
    let stdout = runner.run(&spec).await?.into_stdout("powershell")?;
    Ok(parse_resolved_lines(&stdout))
}

/// Parse `name|target` lines, ignoring anything without both parts.
pub fn parse_resolved_lines(output: &str) -> Vec<ShortcutCandidate> {
    output
        .lines()
        .filter_map(|line| {
            let (name, target) = line.trim().split_once('|')?;
            let (name, target) = (name.trim(), target.trim());
            if name.is_empty() || target.is_empty() {
                return None;
            }
            Some(ShortcutCandidate::new(name, target))
        })
        .collect()
}

/// Case-folded path with uniform separators, for duplicate detection.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('/', "\\")
        .trim_end_matches('\\')
        .to_lowercase()
}
