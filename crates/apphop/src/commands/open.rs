use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::activation::ActivationState;
use apphop_core::{Activator, OpenOutcome, events};

use super::helpers::{block_on, load_config_with_warning, open_store, require_supported_platform};

pub(crate) fn handle_open_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let query = matches
        .get_one::<String>("app")
        .ok_or("App argument is required")?;
    let force_new = matches.get_flag("new");

    require_supported_platform("open")?;

    info!(event = "cli.open_started", app = %query, force_new = force_new);

    let store = open_store();
    let Some(entry) = store.find(query) else {
        eprintln!("❌ No app matches '{}'. See 'apphop list'.", query);
        error!(event = "cli.open_failed", app = %query, error = "not_found");
        return Err(format!("No app matches '{}'", query).into());
    };

    let target = entry.target();
    let activator = Activator::new(load_config_with_warning());

    let result = if force_new {
        activator
            .launch(&target, &entry.args)
            .map(|()| OpenOutcome::Launched {
                previous: ActivationState::NotRunning,
            })
    } else {
        block_on(activator.open(&target, &entry.args))?
    };

    match result {
        Ok(OpenOutcome::Activated { strategy }) => {
            println!("✅ Switched to '{}'", entry.name);
            info!(event = "cli.open_completed", app = %entry.name, strategy = strategy);
            Ok(())
        }
        Ok(OpenOutcome::Launched { previous }) => {
            println!("🚀 Launched '{}'", entry.name);
            info!(event = "cli.open_completed", app = %entry.name, launched = true, previous = %previous);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to open '{}': {}", entry.name, e);
            error!(event = "cli.open_failed", app = %entry.name, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
