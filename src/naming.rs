//! The `NNN-name` convention shared by project directories and image files.
//!
//! A numeric prefix orders entries and marks them as published; the rest of
//! the name becomes a slug (for scripts and URLs) and a display title:
//!
//! - `010-Villa-Ikoyi/` → order 10, slug `villa-ikoyi`, title "Villa Ikoyi"
//! - `002-atrium.jpg` (stem `002-atrium`) → order 2, slug `atrium`, title "atrium"
//! - `drafts/` → unordered, slug `drafts`, title "drafts"

/// A parsed `NNN-name` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    /// Order from the numeric prefix, if any.
    pub number: Option<u32>,
    /// Lowercased name part, dashes preserved. Empty for number-only names.
    pub slug: String,
    /// Name part with dashes turned into spaces, case preserved.
    pub title: String,
}

impl EntryName {
    /// Whether the entry carries an order prefix (and so is published).
    pub fn is_numbered(&self) -> bool {
        self.number.is_some()
    }
}

/// Parse a directory name or file stem following the `NNN-name` convention.
pub fn parse_entry_name(name: &str) -> EntryName {
    let (number, rest) = match name.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(n) => (Some(n), rest),
            Err(_) => (None, name),
        },
        None => match name.parse::<u32>() {
            Ok(n) => (Some(n), ""),
            Err(_) => (None, name),
        },
    };

    EntryName {
        number,
        slug: rest.to_lowercase(),
        title: rest.replace('-', " "),
    }
}
