//! Allowed file extensions

use std::collections::BTreeSet;

/// Text-based file types accepted when no configuration says otherwise
pub const DEFAULT_EXTENSIONS: [&str; 8] = ["py", "txt", "md", "json", "html", "css", "js", "csv"];

/// Normalized set of allowed extensions: lower-case, no leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedExtensions {
    extensions: BTreeSet<String>,
}

impl AllowedExtensions {
    /// Builds the set, accepting entries with or without a leading dot in any case.
    /// Blank entries are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Case-insensitive membership test for an extension without its dot
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_ascii_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Comma separated list with dots, e.g. `.css, .txt`
    pub fn display_list(&self) -> String {
        self.iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for AllowedExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}
