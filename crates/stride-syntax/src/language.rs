//! Registration surface a host uses to pick the Stride rules for a file.

use glob::Pattern;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub filenames: &'static [&'static str],
}

pub const STRIDE: LanguageInfo = LanguageInfo {
    name: "Stride",
    aliases: &["stride"],
    filenames: &["*.sr"],
};

impl LanguageInfo {
    /// Matches the file name component of `path` against the filename patterns.
    pub fn matches_filename(&self, path: impl AsRef<Path>) -> bool {
        let Some(file_name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        self.filenames
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .any(|pattern| pattern.matches(file_name))
    }

    /// Case-insensitive match against the display name and the aliases.
    pub fn matches_alias(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

/// Known languages. Stride is the only one this crate ships rules for.
pub const LANGUAGES: &[LanguageInfo] = &[STRIDE];

/// Resolves a language from an alias, a display name or a file path.
pub fn find_language(name_or_path: &str) -> Option<&'static LanguageInfo> {
    LANGUAGES
        .iter()
        .find(|lang| lang.matches_alias(name_or_path))
        .or_else(|| LANGUAGES.iter().find(|lang| lang.matches_filename(name_or_path)))
}
