//! `apphop-activator list` prints one `hwnd|pid|title|processName|processPath|className`
//! line per visible application window.
//! `apphop-activator activate <hwnd>` brings that window forward and prints `Done`.

use apphop_core::init_logging;
use apphop_core::platform::{self, UnsupportedPlatform};
use apphop_core::window::WindowHandle;

#[derive(Debug, thiserror::Error)]
enum ActivatorError {
    #[error("usage: apphop-activator list | activate <hwnd>")]
    Usage,

    #[error("invalid window handle '{0}'")]
    InvalidHandle(String),

    #[error("could not activate window {0}")]
    #[cfg_attr(not(windows), allow(dead_code))]
    ActivationFailed(WindowHandle),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedPlatform),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    List,
    Activate(WindowHandle),
}

fn main() {
    init_logging(true);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let exit_code = match parse(&args).and_then(run) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("apphop-activator: {}", e);
            tracing::error!(event = "activator.run_failed", error = %e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn parse(args: &[String]) -> Result<Invocation, ActivatorError> {
    match args {
        [command] if command == "list" => Ok(Invocation::List),
        [command, raw] if command == "activate" => raw
            .parse::<WindowHandle>()
            .map(Invocation::Activate)
            .map_err(|_| ActivatorError::InvalidHandle(raw.clone())),
        _ => Err(ActivatorError::Usage),
    }
}

fn run(invocation: Invocation) -> Result<(), ActivatorError> {
    platform::ensure_supported()?;
    execute(invocation)
}

#[cfg(windows)]
fn execute(invocation: Invocation) -> Result<(), ActivatorError> {
    use std::io::Write;

    use apphop_core::native::win32::Win32WindowManager;
    use apphop_core::window::format_helper_line;
    use apphop_core::{HELPER_DONE, WindowManager};

    let manager = Win32WindowManager;
    let mut stdout = std::io::stdout().lock();

    match invocation {
        Invocation::List => {
            for window in manager.list_windows() {
                writeln!(stdout, "{}", format_helper_line(&window))?;
            }
        }
        Invocation::Activate(handle) => {
            if !manager.activate(handle) {
                return Err(ActivatorError::ActivationFailed(handle));
            }
            writeln!(stdout, "{}", HELPER_DONE)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(not(windows))]
fn execute(_invocation: Invocation) -> Result<(), ActivatorError> {
    Err(ActivatorError::Unsupported(UnsupportedPlatform {
        platform: std::env::consts::OS,
    }))
}
