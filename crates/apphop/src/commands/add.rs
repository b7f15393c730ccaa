use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::events;

use super::helpers::open_store;

pub(crate) fn handle_add_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .ok_or("Path argument is required")?;
    let args: Vec<String> = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let name = match matches.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or("Cannot derive a name from the path; pass --name")?,
    };

    info!(event = "cli.add_started", name = %name, path = %path.display());

    if !path.is_file() {
        eprintln!("⚠️  '{}' does not exist yet; adding anyway", path.display());
    }

    let mut store = open_store();
    match store.add(&name, &path, args) {
        Ok(entry) => {
            println!("✅ Added '{}'", entry.name);
            println!("   ID:   {}", entry.id);
            println!("   Path: {}", entry.path.display());
            info!(event = "cli.add_completed", id = %entry.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to add '{}': {}", name, e);
            error!(event = "cli.add_failed", name = %name, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
