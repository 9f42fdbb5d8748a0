//! Keyword and seen-set filtering of extracted entries.

use std::collections::HashSet;

use crate::entry::Entry;
use crate::store::SeenSet;

/// Case-insensitive title keyword, stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    /// Normalize a keyword. Returns `None` for blank input.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    /// The normalized keyword.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `title` contains the keyword in any letter casing.
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        title.to_uppercase().contains(&self.0)
    }
}

/// Keep the entries worth notifying, in their original order.
///
/// An entry qualifies when its title matches `keyword` and its link is not in
/// `seen`. A link repeated within `entries` is only kept the first time.
pub fn select_new(entries: &[Entry], keyword: &Keyword, seen: &SeenSet) -> Vec<Entry> {
    let mut batch: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();

    for entry in entries {
        if keyword.matches(&entry.title)
            && !seen.contains(&entry.link)
            && batch.insert(entry.link.as_str())
        {
            selected.push(entry.clone());
        }
    }

    selected
}
