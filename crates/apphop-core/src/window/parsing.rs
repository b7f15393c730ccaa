//! Parsers for the text formats produced by window and task listings.
//!
//! Malformed lines are skipped; one bad row never aborts a listing.

use crate::process::ProcessId;
use crate::window::types::{TaskListing, WindowDescriptor, WindowHandle};

/// Parse helper `list` output: `hwnd|pid|title|processName[|processPath[|className]]`.
pub fn parse_helper_list(output: &str) -> Vec<WindowDescriptor> {
    output
        .lines()
        .filter_map(|line| parse_helper_line(line.trim_end_matches('\r')))
        .collect()
}

fn parse_helper_line(line: &str) -> Option<WindowDescriptor> {
    if line.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 4 {
        return None;
    }

    let handle = fields[0].parse::<WindowHandle>().ok()?;
    let pid = fields[1].trim().parse::<u32>().ok()?;

    Some(WindowDescriptor {
        handle,
        pid: ProcessId::from(pid),
        title: fields[2].to_string(),
        process_name: fields[3].trim().to_string(),
        process_path: fields.get(4).map(|s| s.trim().to_string()).unwrap_or_default(),
        class_name: fields.get(5).map(|s| s.trim().to_string()).unwrap_or_default(),
    })
}

/// Render one helper `list` line. Field separators and line breaks inside
/// values are replaced with spaces so every window stays one parseable line.
pub fn format_helper_line(window: &WindowDescriptor) -> String {
    format!(
        "{}|{}|{}|{}|{}|{}",
        window.handle,
        window.pid,
        sanitize_field(&window.title),
        sanitize_field(&window.process_name),
        sanitize_field(&window.process_path),
        sanitize_field(&window.class_name),
    )
}

fn sanitize_field(value: &str) -> String {
    value.replace(['|', '\r', '\n'], " ")
}

/// Minimum columns in a verbose task listing row.
const TASKLIST_MIN_COLUMNS: usize = 9;
const TASKLIST_PID_COLUMN: usize = 1;
const TASKLIST_TITLE_COLUMN: usize = 8;

/// Parse `tasklist /v /fo csv` output into processes that own a titled window.
///
/// The header row is skipped, as are rows with too few columns, a
/// non-numeric pid, or a title of `N/A`.
pub fn parse_tasklist_csv(output: &str) -> Vec<TaskListing> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .filter_map(|line| {
            let columns = split_csv_line(line)?;
            if columns.len() < TASKLIST_MIN_COLUMNS {
                return None;
            }
            let pid = columns[TASKLIST_PID_COLUMN].trim().parse::<u32>().ok()?;
            let title = columns[TASKLIST_TITLE_COLUMN].trim();
            if title.is_empty() || title == "N/A" {
                return None;
            }
            Some(TaskListing {
                pid: ProcessId::from(pid),
                title: title.to_string(),
            })
        })
        .collect()
}

/// Split one CSV row with `"`-quoted fields and `""` escapes.
/// Returns `None` for a row with an unterminated quote.
fn split_csv_line(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(current);
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKLIST_HEADER: &str = "\"Image Name\",\"PID\",\"Session Name\",\"Session#\",\"Mem Usage\",\"Status\",\"User Name\",\"CPU Time\",\"Window Title\"";

    #[test]
    fn test_parse_helper_list_full_lines() {
        let output = "131844|4321|Untitled - Notepad|notepad|C:\\Windows\\System32\\notepad.exe|Notepad\r\n\
                      65810|88|Inbox|outlook|C:\\Office\\OUTLOOK.EXE\r\n";
        let windows = parse_helper_list(output);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].handle.as_u64(), 131844);
        assert_eq!(windows[0].pid.as_u32(), 4321);
        assert_eq!(windows[0].title, "Untitled - Notepad");
        assert_eq!(windows[0].process_name, "notepad");
        assert_eq!(windows[0].class_name, "Notepad");
        assert_eq!(windows[1].process_path, "C:\\Office\\OUTLOOK.EXE");
        assert_eq!(windows[1].class_name, "");
    }

    #[test]
    fn test_parse_helper_list_skips_malformed_lines() {
        let output = "garbage\n1|2|three\nx|2|title|proc\n10|20|Good|proc\n\n";
        let windows = parse_helper_list(output);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title, "Good");
        assert_eq!(windows[0].process_path, "");
    }

    #[test]
    fn test_format_helper_line_strips_separators() {
        let window = WindowDescriptor {
            handle: WindowHandle::from_raw(7),
            pid: ProcessId::from(9),
            title: "a|b\nc".to_string(),
            class_name: "Cls".to_string(),
            process_name: "app".to_string(),
            process_path: "C:\\app.exe".to_string(),
        };
        let line = format_helper_line(&window);
        assert_eq!(line, "7|9|a b c|app|C:\\app.exe|Cls");

        let parsed = parse_helper_list(&line);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "a b c");
        assert_eq!(parsed[0].class_name, "Cls");
    }

    #[test]
    fn test_parse_tasklist_csv() {
        let output = format!(
            "{TASKLIST_HEADER}\r\n\
             \"notepad.exe\",\"4321\",\"Console\",\"1\",\"12,345 K\",\"Running\",\"PC\\user\",\"0:00:01\",\"Untitled - Notepad\"\r\n\
             \"svchost.exe\",\"1000\",\"Services\",\"0\",\"8,000 K\",\"Unknown\",\"N/A\",\"0:00:00\",\"N/A\"\r\n"
        );
        let rows = parse_tasklist_csv(&output);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pid.as_u32(), 4321);
        assert_eq!(rows[0].title, "Untitled - Notepad");
    }

    #[test]
    fn test_parse_tasklist_csv_skips_short_and_broken_rows() {
        let output = format!(
            "{TASKLIST_HEADER}\n\
             \"short.exe\",\"5\",\"Console\"\n\
             \"broken.exe\",\"6\",\"Console\",\"1\",\"1 K\",\"Running\",\"u\",\"0:00:00\",\"unterminated\n\
             \"nopid.exe\",\"x\",\"Console\",\"1\",\"1 K\",\"Running\",\"u\",\"0:00:00\",\"Title\"\n\
             \"bar.exe\",\"77\",\"Console\",\"1\",\"1 K\",\"Running\",\"u\",\"0:00:00\",\"Bar \"\"Pro\"\" Editor\"\n"
        );
        let rows = parse_tasklist_csv(&output);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].pid.as_u32(), 77);
        assert_eq!(rows[0].title, "Bar \"Pro\" Editor");
    }

    #[test]
    fn test_parse_tasklist_csv_header_only() {
        assert!(parse_tasklist_csv(TASKLIST_HEADER).is_empty());
        assert!(parse_tasklist_csv("").is_empty());
    }

    #[test]
    fn test_split_csv_line_keeps_commas_inside_quotes() {
        let fields = split_csv_line("\"a,b\",\"c\",d").unwrap();
        assert_eq!(fields, vec!["a,b", "c", "d"]);
    }
}
