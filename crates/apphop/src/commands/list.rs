use clap::ArgMatches;
use tracing::info;

use super::helpers::open_store;
use crate::table::AppTable;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let store = open_store();
    let apps = store.apps();

    if json_output {
        println!("{}", serde_json::to_string_pretty(apps)?);
    } else if apps.is_empty() {
        println!("No apps saved. Add one with 'apphop add <path>' or 'apphop import'.");
    } else {
        AppTable::new(apps).print_table(apps);
    }

    info!(event = "cli.list_completed", count = apps.len());
    Ok(())
}
