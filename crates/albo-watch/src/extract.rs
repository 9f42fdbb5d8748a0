//! Albo listing HTML parser.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::entry::{Entry, MISSING_LINK};

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.views-table").expect("Invalid table selector"));
static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("Invalid row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("Invalid cell selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Invalid link selector"));

/// Turns a listing fragment into entries.
pub trait EntryParser: Send + Sync {
    /// Parse entries in document order.
    ///
    /// Returns `None` when the fragment has no listing at all, which callers
    /// treat as an empty page rather than a failure.
    fn parse(&self, fragment: &str) -> Option<Vec<Entry>>;
}

/// Parser for the Drupal `views-table` listing used by the albo.
#[derive(Debug, Clone)]
pub struct TableParser {
    base: Url,
}

impl TableParser {
    /// Create a parser resolving relative links against `base`.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Create a parser from a base URL string.
    pub fn from_base(base: &str) -> Result<Self, url::ParseError> {
        Url::parse(base).map(Self::new)
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<Entry> {
        let cell = row.select(&CELL).next()?;

        let title = normalize_text(cell.text());
        let href = cell
            .select(&LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map_or(MISSING_LINK, str::trim);

        Some(Entry::new(title, self.resolve(href)))
    }

    fn resolve(&self, href: &str) -> String {
        match self.base.join(href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(href, error = %e, "Could not resolve link, keeping it verbatim");
                href.to_string()
            }
        }
    }
}

impl EntryParser for TableParser {
    fn parse(&self, fragment: &str) -> Option<Vec<Entry>> {
        let document = Html::parse_fragment(fragment);
        let table = document.select(&TABLE).next()?;

        let entries: Vec<Entry> = table
            .select(&BODY_ROW)
            .filter_map(|row| self.parse_row(row))
            .collect();

        tracing::debug!(count = entries.len(), "Parsed listing rows");
        Some(entries)
    }
}

/// Join text nodes and collapse whitespace runs.
fn normalize_text<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    pieces
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> TableParser {
        TableParser::from_base("https://www.poliba.it").unwrap()
    }

    const LISTING: &str = r#"
        <div class="view-content">
          <table class="views-table cols-3">
            <thead><tr><th>Oggetto</th><th>Tipologia</th><th>Data</th></tr></thead>
            <tbody>
              <tr class="odd views-row-first">
                <td class="views-field views-field-title">
                  <a href="/node/1">ISP5G Tender A</a>
                </td>
                <td>Bando</td><td>01/06/2025</td>
              </tr>
              <tr class="even views-row-last">
                <td class="views-field views-field-title"><a href="/node/2">Unrelated Notice</a></td>
                <td>Avviso</td><td>02/06/2025</td>
              </tr>
            </tbody>
          </table>
        </div>
    "#;

    #[test]
    fn test_parse_resolves_links_in_document_order() {
        let entries = parser().parse(LISTING).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("ISP5G Tender A", "https://www.poliba.it/node/1"),
                Entry::new("Unrelated Notice", "https://www.poliba.it/node/2"),
            ]
        );
    }

    #[test]
    fn test_missing_table_yields_none() {
        let fragment = r#"<div class="view-empty"><p>Nessun atto pubblicato.</p></div>"#;
        let parsed = parser().parse(fragment);
        assert!(parsed.is_none());
        assert!(parsed.unwrap_or_default().is_empty());

        // A table without the views class is not the listing.
        let other = "<table><tbody><tr><td>ISP5G</td></tr></tbody></table>";
        assert!(parser().parse(other).is_none());
    }

    #[test]
    fn test_row_without_link_uses_placeholder() {
        let fragment = r#"<table class="views-table"><tbody>
            <tr><td>  ISP5G   avviso
                senza link </td></tr>
        </tbody></table>"#;
        let entries = parser().parse(fragment).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "ISP5G avviso senza link");
        assert_eq!(entries[0].link, "https://www.poliba.it/#");
    }

    #[test]
    fn test_rows_without_cells_are_skipped() {
        let fragment = r#"<table class="views-table">
            <thead><tr><th>Oggetto</th></tr></thead>
            <tbody>
              <tr><th>header-like row</th></tr>
              <tr><td><a href="https://cdn.example.org/doc.pdf">External</a></td></tr>
            </tbody></table>"#;
        let entries = parser().parse(fragment).unwrap();
        assert_eq!(
            entries,
            vec![Entry::new("External", "https://cdn.example.org/doc.pdf")]
        );
    }

    #[test]
    fn test_empty_table_body() {
        let fragment = r#"<table class="views-table"><tbody></tbody></table>"#;
        assert_eq!(parser().parse(fragment), Some(vec![]));
    }

    #[test]
    fn test_title_from_nested_markup() {
        let fragment = r#"<table class="views-table"><tbody><tr>
            <td><a href="it/node/77"><strong>ISP5G</strong> - Lotto <em>2</em></a></td>
        </tr></tbody></table>"#;
        let entries = parser().parse(fragment).unwrap();
        assert_eq!(entries[0].title, "ISP5G - Lotto 2");
        assert_eq!(entries[0].link, "https://www.poliba.it/it/node/77");
    }
}
