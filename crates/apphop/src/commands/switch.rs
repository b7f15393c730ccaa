use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::{Activator, WindowHandle};

use super::helpers::{block_on, load_config_with_warning, require_supported_platform};

pub(crate) fn handle_switch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let raw = matches
        .get_one::<String>("handle")
        .ok_or("Handle argument is required")?;

    let handle: WindowHandle = raw.parse().map_err(|_| {
        eprintln!("❌ '{}' is not a window handle", raw);
        format!("Invalid window handle '{}'", raw)
    })?;

    require_supported_platform("switch")?;

    info!(event = "cli.switch_started", hwnd = %handle);

    let activator = Activator::new(load_config_with_warning());
    if block_on(activator.switch_to(handle))? {
        println!("✅ Switched to window {}", handle);
        info!(event = "cli.switch_completed", hwnd = %handle);
        Ok(())
    } else {
        eprintln!("❌ Could not switch to window {} (it may have closed)", handle);
        error!(event = "cli.switch_failed", hwnd = %handle);
        Err(format!("Could not switch to window {}", handle).into())
    }
}
