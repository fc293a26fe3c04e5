//! # Worksheet Naming
//!
//! Excel sheet names are at most 31 characters, may not contain
//! `* : ? / \ [ ]`, may not start or end with an apostrophe, and must be
//! unique ignoring case. Room names are free text, so every room sheet name
//! goes through [`SheetNamer`].
//!
//! ```text
//! "Board Room [L2]"  ──► sanitize ──► "Board Room _L2_"
//! "Board Room [L2]"  ──► sanitize ──► "Board Room _L2_" (taken) ──► "Board Room _L2__2"
//! ```

use std::collections::HashSet;

/// Excel's limit on worksheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const ILLEGAL_CHARS: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

const FALLBACK_NAME: &str = "Room";

/// Replaces illegal characters with `_`, trims, and truncates to 31 chars.
pub fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim().trim_matches('\'').trim();
    let name = if trimmed.is_empty() { FALLBACK_NAME } else { trimmed };

    name.chars().take(MAX_SHEET_NAME_LEN).collect::<String>().trim_end().to_string()
}

/// `base` with a `_N` suffix, shortened so the result still fits.
fn with_suffix(base: &str, n: usize) -> String {
    let suffix = format!("_{n}");
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.len()).max(1);
    let stem: String = base.chars().take(room).collect();
    format!("{stem}{suffix}")
}

/// Hands out unique, valid worksheet names.
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fixed sheet name as taken.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_lowercase());
    }

    /// A valid name for `raw` that no earlier call has returned.
    pub fn unique_name(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);

        let mut candidate = base.clone();
        let mut n = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            candidate = with_suffix(&base, n);
            n += 1;
        }

        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_illegal_chars() {
        assert_eq!(sanitize_sheet_name("Room 1/2: Main?"), "Room 1_2_ Main_");
        assert_eq!(sanitize_sheet_name("[Lobby]*"), "_Lobby__");
    }

    #[test]
    fn test_sanitize_truncates_to_31_chars() {
        let name = sanitize_sheet_name("Executive Board Room with Video Wall");
        assert_eq!(name.chars().count(), MAX_SHEET_NAME_LEN);
        assert_eq!(name, "Executive Board Room with Video");
    }

    #[test]
    fn test_sanitize_blank_and_apostrophes() {
        assert_eq!(sanitize_sheet_name("   "), "Room");
        assert_eq!(sanitize_sheet_name("'Quoted'"), "Quoted");
    }

    #[test]
    fn test_duplicates_get_suffixes() {
        let mut namer = SheetNamer::new();
        assert_eq!(namer.unique_name("Huddle"), "Huddle");
        assert_eq!(namer.unique_name("huddle"), "huddle_2");
        assert_eq!(namer.unique_name("Huddle"), "Huddle_3");
    }

    #[test]
    fn test_reserved_names_are_avoided() {
        let mut namer = SheetNamer::new();
        namer.reserve("Proposal Summary");
        assert_eq!(namer.unique_name("Proposal Summary"), "Proposal Summary_2");
    }

    #[test]
    fn test_suffix_fits_within_limit() {
        let mut namer = SheetNamer::new();
        let long = "A".repeat(40);
        let first = namer.unique_name(&long);
        let second = namer.unique_name(&long);

        assert_eq!(first.len(), MAX_SHEET_NAME_LEN);
        assert_eq!(second.len(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with("_2"));
    }
}
