use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("apphop")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Launch applications or switch to their running windows")
        .long_about("apphop keeps a list of applications. Opening one brings its existing window to the foreground when it is already running, and starts it otherwise.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("add")
                .about("Add an application to the list")
                .arg(
                    Arg::new("path")
                        .help("Path to the executable")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Display name (default: executable file name)")
                )
                .arg(
                    Arg::new("args")
                        .long("args")
                        .num_args(1..)
                        .allow_hyphen_values(true)
                        .help("Arguments passed when launching a new instance")
                )
        )
        .subcommand(
            Command::new("remove")
                .about("Remove an application from the list")
                .arg(
                    Arg::new("app")
                        .help("App id or name")
                        .required(true)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("rename")
                .about("Rename an application")
                .arg(
                    Arg::new("app")
                        .help("App id or name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("name")
                        .help("New display name")
                        .required(true)
                        .index(2)
                )
        )
        .subcommand(
            Command::new("clear")
                .about("Remove every application from the list")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .help("Confirm removal of all apps")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("list")
                .about("List saved applications")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("open")
                .about("Switch to a running instance of an app, or launch it")
                .arg(
                    Arg::new("app")
                        .help("App id or name")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("new")
                        .long("new")
                        .help("Always launch a new instance")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("windows")
                .about("List open application windows")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("switch")
                .about("Bring a window from 'apphop windows' to the foreground")
                .arg(
                    Arg::new("handle")
                        .help("Window handle (decimal or 0x-prefixed hex)")
                        .required(true)
                        .index(1)
                )
        )
        .subcommand(
            Command::new("import")
                .about("Add applications found in Desktop and Start Menu shortcuts")
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would be added without saving")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}
