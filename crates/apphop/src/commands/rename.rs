use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::events;

use super::helpers::open_store;

pub(crate) fn handle_rename_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = matches
        .get_one::<String>("app")
        .ok_or("App argument is required")?;
    let new_name = matches
        .get_one::<String>("name")
        .ok_or("Name argument is required")?;

    info!(event = "cli.rename_started", app = %query, name = %new_name);

    let mut store = open_store();
    match store.rename(query, new_name) {
        Ok(entry) => {
            println!("✅ Renamed to '{}'", entry.name);
            info!(event = "cli.rename_completed", id = %entry.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to rename '{}': {}", query, e);
            error!(event = "cli.rename_failed", app = %query, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
