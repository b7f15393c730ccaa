use apphop_core::{AppEntry, WindowDescriptor};

/// Box-drawn columns with fixed widths.
struct Columns {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
}

impl Columns {
    fn print_header(&self) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.row(&self.headers));
        println!("{}", self.border('├', '┼', '┤'));
    }

    fn print_footer(&self) {
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let body: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| truncate(cell.as_ref(), *width))
            .collect();
        format!("│ {} │", body.join(" │ "))
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(&mid.to_string()))
    }
}

/// Widest value in a column, clamped between the header and a terminal-friendly max.
fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(header.chars().count(), max)
}

pub struct AppTable {
    columns: Columns,
}

impl AppTable {
    pub fn new(apps: &[AppEntry]) -> Self {
        let paths: Vec<String> = apps.iter().map(|a| a.path.display().to_string()).collect();
        let args: Vec<String> = apps.iter().map(|a| a.args.join(" ")).collect();

        Self {
            columns: Columns {
                headers: vec!["Name", "Path", "Args", "ID"],
                widths: vec![
                    column_width(apps.iter().map(|a| a.name.as_str()), "Name", 30),
                    column_width(paths.iter().map(String::as_str), "Path", 60),
                    column_width(args.iter().map(String::as_str), "Args", 20),
                    8,
                ],
            },
        }
    }

    pub fn print_table(&self, apps: &[AppEntry]) {
        self.columns.print_header();
        for app in apps {
            println!(
                "{}",
                self.columns.row(&[
                    app.name.clone(),
                    app.path.display().to_string(),
                    app.args.join(" "),
                    app.id.chars().take(8).collect(),
                ])
            );
        }
        self.columns.print_footer();
    }
}

pub struct WindowTable {
    columns: Columns,
}

impl WindowTable {
    pub fn new(windows: &[WindowDescriptor]) -> Self {
        let handles: Vec<String> = windows.iter().map(|w| w.handle.to_string()).collect();

        Self {
            columns: Columns {
                headers: vec!["Handle", "PID", "Process", "Title"],
                widths: vec![
                    column_width(handles.iter().map(String::as_str), "Handle", 20),
                    7,
                    column_width(windows.iter().map(|w| w.process_name.as_str()), "Process", 24),
                    column_width(windows.iter().map(|w| w.title.as_str()), "Title", 60),
                ],
            },
        }
    }

    pub fn print_table(&self, windows: &[WindowDescriptor]) {
        self.columns.print_header();
        for window in windows {
            println!(
                "{}",
                self.columns.row(&[
                    window.handle.to_string(),
                    window.pid.to_string(),
                    window.process_name.clone(),
                    window.title.clone(),
                ])
            );
        }
        self.columns.print_footer();
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so multi-byte titles stay intact.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_pads_short_values() {
        assert_eq!(truncate("abc", 5), "abc  ");
    }

    #[test]
    fn test_truncate_multibyte_title() {
        assert_eq!(truncate("Документ - Блокнот", 8), "Докум...");
    }

    #[test]
    fn test_column_width_clamps() {
        assert_eq!(column_width(["a", "bb"].into_iter(), "Name", 30), 4);
        assert_eq!(column_width(["x".repeat(50).as_str()].into_iter(), "Name", 30), 30);
    }

    #[test]
    fn test_row_and_border_align() {
        let columns = Columns {
            headers: vec!["A", "B"],
            widths: vec![3, 2],
        };
        let row = columns.row(&["x", "yy"]);
        let border = columns.border('┌', '┬', '┐');
        assert_eq!(row, "│ x   │ yy │");
        assert_eq!(border, "┌─────┬────┐");
        assert_eq!(row.chars().count(), border.chars().count());
    }
}
