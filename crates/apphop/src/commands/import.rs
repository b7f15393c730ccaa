use clap::ArgMatches;
use tracing::{error, info};

use apphop_core::apps::{find_shortcuts, shortcut_search_dirs};
use apphop_core::{SystemRunner, events};

use super::helpers::{block_on, load_config_with_warning, open_store, require_supported_platform};

pub(crate) fn handle_import_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let dry_run = matches.get_flag("dry-run");

    require_supported_platform("import")?;

    info!(event = "cli.import_started", dry_run = dry_run);

    let config = load_config_with_warning();
    let dirs = shortcut_search_dirs();
    let candidates = block_on(find_shortcuts(
        &SystemRunner,
        &dirs,
        config.timeouts.listing(),
    ))?;

    let mut store = open_store();

    if dry_run {
        let fresh: Vec<_> = candidates
            .iter()
            .filter(|c| !store.contains_path(&c.path))
            .collect();
        println!("Would add {} app(s):", fresh.len());
        for candidate in fresh {
            println!("  {}  {}", candidate.name, candidate.path.display());
        }
        info!(event = "cli.import_completed", dry_run = true, found = candidates.len());
        return Ok(());
    }

    match store.import(&candidates) {
        Ok(summary) => {
            println!(
                "✅ Imported {} app(s), skipped {} already listed",
                summary.added, summary.skipped
            );
            info!(
                event = "cli.import_completed",
                added = summary.added,
                skipped = summary.skipped
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Import failed: {}", e);
            error!(event = "cli.import_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
