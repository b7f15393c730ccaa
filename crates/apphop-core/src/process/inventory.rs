//! In-process process inventory, used where `wmic` is unavailable.

use std::path::Path;

use sysinfo::{ProcessesToUpdate, System};

use crate::process::types::ProcessIdSet;

/// Path-then-name lookup over a fresh process snapshot.
///
/// Same semantics as the `wmic` pair: an exact (case-insensitive) executable
/// path match wins; only when none exists are processes matched by file name.
pub fn find_in_inventory(executable: &str, file_name: &str) -> ProcessIdSet {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let by_path: ProcessIdSet = system
        .processes()
        .iter()
        .filter(|(_, process)| {
            process
                .exe()
                .is_some_and(|exe| paths_equal(exe, executable))
        })
        .map(|(pid, _)| pid.as_u32())
        .collect();

    if !by_path.is_empty() {
        return by_path;
    }

    system
        .processes()
        .iter()
        .filter(|(_, process)| {
            process
                .name()
                .to_string_lossy()
                .eq_ignore_ascii_case(file_name)
        })
        .map(|(pid, _)| pid.as_u32())
        .collect()
}

fn paths_equal(exe: &Path, wanted: &str) -> bool {
    let exe = exe.to_string_lossy().replace('/', "\\");
    let wanted = wanted.replace('/', "\\");
    exe.eq_ignore_ascii_case(&wanted)
}
