//! Announcement entries extracted from the portal listing.

use serde::{Deserialize, Serialize};

/// Placeholder href used when a listing row carries no link.
pub const MISSING_LINK: &str = "#";

/// One row of the announcements listing.
///
/// The absolute `link` is the identity of an entry; two rows with the same
/// link are the same announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Announcement title as shown in the first column.
    pub title: String,
    /// Absolute URL of the announcement page.
    pub link: String,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}
