use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::events;

use super::helpers::open_store;

pub(crate) fn handle_clear_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    if !matches.get_flag("yes") {
        eprintln!("This removes every saved app. Re-run with --yes to confirm.");
        return Err("Clear not confirmed".into());
    }

    info!(event = "cli.clear_started");

    let mut store = open_store();
    match store.clear() {
        Ok(count) => {
            println!("✅ Removed {} app(s)", count);
            info!(event = "cli.clear_completed", count = count);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to clear apps: {}", e);
            error!(event = "cli.clear_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
