//! Header block parsing for `**Label:** value` declarations
//!
//! Articles carry their metadata as bolded label lines right below the
//! title:
//!
//! ```text
//! # Guide SEO
//!
//! **Catégorie:** SEO
//! **Auteur:** Jane
//!
//! ## Introduction
//! ```
//!
//! The header block is line oriented. The title line and the blank lines
//! before the first declaration are skipped; after that, the block ends at
//! the first blank line or heading. Lines inside the block that are not
//! declarations are ignored.

use std::collections::HashMap;

const BOLD: &str = "**";
const BOLD_COLON: &str = ":**";

/// Metadata extracted from an article header, keyed by lower-cased label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, String>,
}

impl Metadata {
    /// Look up a label, case-insensitively
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(&label.to_lowercase()).map(String::as_str)
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the header held no declaration
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parse one line as a `**Label:** value` declaration
///
/// Returns the lower-cased label and the trimmed value. The label is the
/// text before the first colon once every bold marker is removed; the value
/// is everything after the first `:**`.
pub fn parse_declaration(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if !line.starts_with(BOLD) || !line.contains(BOLD_COLON) {
        return None;
    }

    let unbolded = line.replace(BOLD, "");
    let label = unbolded.split(':').next().unwrap_or_default().trim();
    let (_, value) = line.split_once(BOLD_COLON)?;

    Some((label.to_lowercase(), value.trim().to_string()))
}

/// Extract the header metadata of a raw document
pub fn extract_metadata(content: &str) -> Metadata {
    let mut entries = HashMap::new();
    let mut lines = content.lines().peekable();

    // The first line is the title, not part of the header
    if lines.peek().is_some_and(|l| parse_declaration(l).is_none()) {
        lines.next();
    }
    while lines.peek().is_some_and(|l| l.trim().is_empty()) {
        lines.next();
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            break;
        }
        if let Some((label, value)) = parse_declaration(line) {
            entries.insert(label, value);
        }
    }

    Metadata { entries }
}
