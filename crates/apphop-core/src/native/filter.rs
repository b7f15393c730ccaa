//! Which enumerated top-level windows count as user-facing.
//!
//! Kept free of Win32 calls so the rules hold on every host.

/// `WS_EX_TOOLWINDOW`
pub const EX_TOOL_WINDOW: u32 = 0x0000_0080;
/// `WS_EX_APPWINDOW`
pub const EX_APP_WINDOW: u32 = 0x0004_0000;

/// Tool windows are hidden from the taskbar unless they also carry the
/// app-window bit, which forces a taskbar button.
pub fn is_user_facing(ex_style: u32) -> bool {
    ex_style & EX_TOOL_WINDOW == 0 || ex_style & EX_APP_WINDOW != 0
}

/// Facts gathered about one enumerated window before it is described.
#[derive(Debug, Clone, Copy)]
pub struct WindowTraits<'a> {
    pub visible: bool,
    pub is_shell: bool,
    pub ex_style: u32,
    pub title: &'a str,
}

/// Visible, titled, user-facing windows other than the desktop shell.
pub fn should_list(traits: &WindowTraits<'_>) -> bool {
    traits.visible
        && !traits.is_shell
        && !traits.title.is_empty()
        && is_user_facing(traits.ex_style)
}

/// File stem of a Windows image path: `C:\x\notepad.exe` gives `notepad`.
pub fn process_stem(path: &str) -> String {
    let file = path.rsplit(['\\', '/']).next().unwrap_or(path);
    match file.rfind('.') {
        Some(dot) if dot > 0 => file[..dot].to_string(),
        _ => file.to_string(),
    }
}
