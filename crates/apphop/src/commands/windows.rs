use clap::ArgMatches;
use tracing::info;

use apphop_core::Activator;

use super::helpers::{block_on, load_config_with_warning, require_supported_platform};
use crate::table::WindowTable;

pub(crate) fn handle_windows_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    require_supported_platform("windows")?;

    info!(event = "cli.windows_started", json_output = json_output);

    let activator = Activator::new(load_config_with_warning());
    let windows = block_on(activator.list_windows())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&windows)?);
    } else if windows.is_empty() {
        println!("No windows found.");
    } else {
        WindowTable::new(&windows).print_table(&windows);
    }

    info!(event = "cli.windows_completed", count = windows.len());
    Ok(())
}
