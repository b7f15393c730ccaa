use std::collections::BTreeSet;

/// Minimum length of a fragment split out of a longer token.
const MIN_FRAGMENT_LEN: usize = 3;

/// Normalized lowercase fragments of an application's name and path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTokens(BTreeSet<String>);

impl MatchTokens {
    /// Build tokens from a display name and executable path.
    ///
    /// Sources are the display name, the executable stem and the full file
    /// name. Each is also split on non-alphanumeric boundaries, keeping
    /// fragments of at least three characters, so "Visual Studio Code"
    /// yields "code" as well.
    pub fn build(display_name: &str, executable_path: &str) -> Self {
        let file_name = executable_path
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(executable_path);
        let stem = match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        };

        let mut tokens = Self::default();
        for source in [display_name, stem, file_name] {
            tokens.add(source);
        }
        tokens
    }

    /// Add a source string and its fragments.
    pub fn add(&mut self, source: &str) {
        let normalized = normalize(source);
        if normalized.is_empty() {
            return;
        }

        for fragment in normalized.split(|c: char| !c.is_alphanumeric()) {
            if fragment.chars().count() >= MIN_FRAGMENT_LEN {
                self.0.insert(fragment.to_string());
            }
        }
        self.0.insert(normalized);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

impl<'a> FromIterator<&'a str> for MatchTokens {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tokens = Self::default();
        for source in iter {
            tokens.add(source);
        }
        tokens
    }
}

/// Trimmed lowercase form used on both sides of every comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_notepad() {
        let tokens = MatchTokens::build("Notepad", r"C:\Windows\System32\notepad.exe");
        assert!(tokens.contains("notepad"));
        assert!(tokens.contains("notepad.exe"));
        assert!(tokens.contains("exe"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_build_splits_multi_word_names() {
        let tokens = MatchTokens::build(
            "Visual Studio Code",
            r"C:\Users\me\AppData\Local\Programs\Microsoft VS Code\Code.exe",
        );
        assert!(tokens.contains("visual studio code"));
        assert!(tokens.contains("visual"));
        assert!(tokens.contains("studio"));
        assert!(tokens.contains("code"));
        assert!(tokens.contains("code.exe"));
    }

    #[test]
    fn test_short_fragments_dropped_but_whole_kept() {
        let tokens = MatchTokens::build("Go IDE", r"C:\JetBrains\goland64.exe");
        assert!(tokens.contains("go ide"));
        assert!(tokens.contains("ide"));
        assert!(!tokens.contains("go"));
        assert!(tokens.contains("goland64"));
    }

    #[test]
    fn test_empty_sources() {
        let tokens = MatchTokens::build("  ", "");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_path_without_extension() {
        let tokens = MatchTokens::build("Bar", "/opt/bar/bar-editor");
        assert!(tokens.contains("bar"));
        assert!(tokens.contains("bar-editor"));
        assert!(tokens.contains("editor"));
    }
}
