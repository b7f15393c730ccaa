use clap::ArgMatches;
use tracing::error;

use apphop_core::events;

pub mod helpers;

mod add;
mod clear;
mod completions;
mod import;
mod list;
mod open;
mod remove;
mod rename;
mod switch;
mod windows;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("add", sub_matches)) => add::handle_add_command(sub_matches),
        Some(("remove", sub_matches)) => remove::handle_remove_command(sub_matches),
        Some(("rename", sub_matches)) => rename::handle_rename_command(sub_matches),
        Some(("clear", sub_matches)) => clear::handle_clear_command(sub_matches),
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("open", sub_matches)) => open::handle_open_command(sub_matches),
        Some(("windows", sub_matches)) => windows::handle_windows_command(sub_matches),
        Some(("switch", sub_matches)) => switch::handle_switch_command(sub_matches),
        Some(("import", sub_matches)) => import::handle_import_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
