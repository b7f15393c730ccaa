//! Escaping of values embedded in generated queries and scripts.
//!
//! Each function produces text that is safe to splice into exactly one
//! dialect. Callers never build script text from raw user values.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Escape a value for a single-quoted WQL string literal (`wmic ... where`).
pub fn wql_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Render a value as a single-quoted JScript string literal, quotes included.
pub fn jscript_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a value as an AutoHotkey v2 double-quoted string literal.
pub fn ahk_v2_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '`' => out.push_str("``"),
            '"' => out.push_str("`\""),
            ';' => out.push_str("`;"),
            '\n' => out.push_str("`n"),
            '\r' => out.push_str("`r"),
            '\t' => out.push_str("`t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a value as an AutoHotkey v1 expression string literal.
///
/// v1 expressions escape quotes by doubling them.
pub fn ahk_v1_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\"\""),
            '`' => out.push_str("``"),
            ';' => out.push_str("`;"),
            '\n' => out.push_str("`n"),
            '\r' => out.push_str("`r"),
            '\t' => out.push_str("`t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a value as a PowerShell single-quoted string, quotes included.
pub fn powershell_single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Encode a script for `powershell -EncodedCommand` (base64 of UTF-16LE).
pub fn encode_powershell_command(script: &str) -> String {
    let bytes: Vec<u8> = script
        .encode_utf16()
        .flat_map(|unit| unit.to_le_bytes())
        .collect();
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wql_string() {
        assert_eq!(
            wql_string(r"C:\Windows\System32\notepad.exe"),
            r"C:\\Windows\\System32\\notepad.exe"
        );
        assert_eq!(wql_string("O'Brien.exe"), r"O\'Brien.exe");
    }

    #[test]
    fn test_jscript_string() {
        assert_eq!(jscript_string("Untitled - Notepad"), "'Untitled - Notepad'");
        assert_eq!(jscript_string("it's"), r"'it\'s'");
        assert_eq!(jscript_string(r"C:\temp"), r"'C:\\temp'");
        assert_eq!(jscript_string("a\nb"), r"'a\nb'");
        assert_eq!(jscript_string("a\u{2028}b"), r"'a\u2028b'");
        assert_eq!(jscript_string("a\u{7}b"), r"'a\u0007b'");
    }

    #[test]
    fn test_jscript_string_cannot_break_out() {
        let hostile = "'); WScript.Quit(1); ('";
        let literal = jscript_string(hostile);
        assert_eq!(literal, r"'\'); WScript.Quit(1); (\''");
    }

    #[test]
    fn test_ahk_v2_string() {
        assert_eq!(ahk_v2_string("notepad.exe"), "\"notepad.exe\"");
        assert_eq!(ahk_v2_string("say \"hi\""), "\"say `\"hi`\"\"");
        assert_eq!(ahk_v2_string("a`b"), "\"a``b\"");
        assert_eq!(ahk_v2_string("a ;b"), "\"a `;b\"");
    }

    #[test]
    fn test_ahk_v1_string() {
        assert_eq!(ahk_v1_string("notepad.exe"), "\"notepad.exe\"");
        assert_eq!(ahk_v1_string("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(ahk_v1_string("a\nb"), "\"a`nb\"");
    }

    #[test]
    fn test_powershell_single_quoted() {
        assert_eq!(powershell_single_quoted("plain"), "'plain'");
        assert_eq!(powershell_single_quoted("it's"), "'it''s'");
    }

    #[test]
    fn test_encode_powershell_command() {
        // "A" in UTF-16LE is 0x41 0x00
        assert_eq!(encode_powershell_command("A"), "QQA=");
        assert_eq!(encode_powershell_command(""), "");
    }
}
