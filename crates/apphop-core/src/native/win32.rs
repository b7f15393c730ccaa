//! Win32 window enumeration and activation.

use tracing::debug;
use windows_sys::Win32::Foundation::{BOOL, CloseHandle, HWND, LPARAM};
use windows_sys::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GWL_EXSTYLE, GetClassNameW, GetShellWindow, GetWindowLongW,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow,
    IsWindowVisible, SW_RESTORE, SetForegroundWindow, ShowWindow,
};

use crate::native::capability::WindowManager;
use crate::native::filter::{WindowTraits, process_stem, should_list};
use crate::process::ProcessId;
use crate::window::{WindowDescriptor, WindowHandle};

const CLASS_NAME_CAPACITY: usize = 256;
const IMAGE_PATH_CAPACITY: usize = 1024;

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowManager;

impl WindowManager for Win32WindowManager {
    fn list_windows(&self) -> Vec<WindowDescriptor> {
        let mut handles: Vec<HWND> = Vec::new();
        // SAFETY: the callback only pushes into the Vec passed via lparam,
        // which outlives the synchronous EnumWindows call.
        unsafe {
            EnumWindows(
                Some(collect_handle),
                &mut handles as *mut Vec<HWND> as LPARAM,
            );
        }

        // SAFETY: GetShellWindow has no preconditions.
        let shell = unsafe { GetShellWindow() };
        let windows: Vec<WindowDescriptor> = handles
            .into_iter()
            .filter_map(|hwnd| describe(hwnd, shell))
            .collect();

        debug!(event = "core.native.list_completed", count = windows.len());
        windows
    }

    fn activate(&self, handle: WindowHandle) -> bool {
        let hwnd = handle.as_u64() as usize as HWND;

        // SAFETY: every call below tolerates an invalid handle; IsWindow
        // rejects stale handles up front.
        unsafe {
            if IsWindow(hwnd) == 0 {
                debug!(event = "core.native.activate_stale_handle", hwnd = %handle);
                return false;
            }
            if IsIconic(hwnd) != 0 {
                ShowWindow(hwnd, SW_RESTORE);
            }
            // The first call can be refused while focus is changing hands.
            SetForegroundWindow(hwnd);
            SetForegroundWindow(hwnd) != 0
        }
    }
}

unsafe extern "system" fn collect_handle(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the &mut Vec<HWND> from list_windows.
    let handles = unsafe { &mut *(lparam as *mut Vec<HWND>) };
    handles.push(hwnd);
    1
}

fn describe(hwnd: HWND, shell: HWND) -> Option<WindowDescriptor> {
    // SAFETY: hwnd came from EnumWindows; calls on a window that has since
    // closed fail without side effects.
    unsafe {
        let title = window_text(hwnd);
        let traits = WindowTraits {
            visible: IsWindowVisible(hwnd) != 0,
            is_shell: hwnd == shell,
            ex_style: GetWindowLongW(hwnd, GWL_EXSTYLE) as u32,
            title: &title,
        };
        if !should_list(&traits) {
            return None;
        }

        let mut pid = 0u32;
        GetWindowThreadProcessId(hwnd, &mut pid);

        let mut class_buf = [0u16; CLASS_NAME_CAPACITY];
        let class_len = GetClassNameW(hwnd, class_buf.as_mut_ptr(), class_buf.len() as i32);
        let class_name = String::from_utf16_lossy(&class_buf[..class_len.max(0) as usize]);

        let process_path = image_path(pid).unwrap_or_default();
        let process_name = process_stem(&process_path);

        Some(WindowDescriptor {
            handle: WindowHandle::from_raw(hwnd as usize as u64),
            pid: ProcessId::from(pid),
            title,
            class_name,
            process_name,
            process_path,
        })
    }
}

/// Window title; empty for untitled windows.
unsafe fn window_text(hwnd: HWND) -> String {
    // SAFETY: caller passes a window handle; buffer sizes are passed along.
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buf = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
        String::from_utf16_lossy(&buf[..copied.max(0) as usize])
    }
}

/// Full image path of `pid`; `None` when the process is gone or protected.
fn image_path(pid: u32) -> Option<String> {
    // SAFETY: the process handle is checked for null and always closed.
    unsafe {
        let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if process.is_null() {
            return None;
        }

        let mut buf = [0u16; IMAGE_PATH_CAPACITY];
        let mut size = buf.len() as u32;
        let ok = QueryFullProcessImageNameW(
            process,
            PROCESS_NAME_WIN32,
            buf.as_mut_ptr(),
            &mut size,
        );
        CloseHandle(process);

        if ok == 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buf[..size as usize]))
    }
}
