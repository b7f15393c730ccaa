use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::events;

use super::helpers::open_store;

pub(crate) fn handle_remove_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = matches
        .get_one::<String>("app")
        .ok_or("App argument is required")?;

    info!(event = "cli.remove_started", app = %query);

    let mut store = open_store();
    match store.remove(query) {
        Ok(entry) => {
            println!("✅ Removed '{}'", entry.name);
            info!(event = "cli.remove_completed", id = %entry.id);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to remove '{}': {}", query, e);
            error!(event = "cli.remove_failed", app = %query, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
