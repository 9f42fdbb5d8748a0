//! Notification text for a newly found announcement.

use crate::entry::Entry;

/// Format the Telegram message announcing `entry`.
///
/// Uses Telegram's legacy Markdown, where a single `*` marks bold text. Both
/// the title and the link are escaped, since an unpaired `_` in either one
/// makes the whole message unparseable.
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "🔔 *Nuovo Bando Trovato!*\n\n*Titolo:* {}\n*Link:* {}",
        escape_markdown(&entry.title),
        escape_markdown(&entry.link)
    )
}

/// Escape characters legacy Markdown would treat as formatting.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
