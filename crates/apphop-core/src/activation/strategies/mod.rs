//! Activation strategies, in chain priority order.

pub mod autohotkey;
pub mod helper;
pub mod title;
pub mod window_manager;
pub mod wscript;

pub use autohotkey::AutoHotkeyStrategy;
pub use helper::HelperStrategy;
pub use title::TitleStrategy;
pub use window_manager::WindowManagerStrategy;
pub use wscript::WscriptStrategy;

/// Script interpreter for the JScript strategies.
pub(crate) const SCRIPT_HOST: &str = "cscript";
