//! Drupal AJAX command list decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;

/// One entry of the command list returned by `views/ajax`.
///
/// Only `insert` commands matter here; `settings` and others carry arbitrary
/// JSON in `data`, so it is kept untyped.
#[derive(Debug, Deserialize)]
pub struct AjaxCommand {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// CSS selector of the container Drupal replaces for a given view dom id.
pub fn listing_selector(dom_id: &str) -> String {
    format!(".view-dom-id-{dom_id}")
}

/// Decode a response body into its command list.
pub fn decode(body: &str) -> Result<Vec<AjaxCommand>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::ResponseFormat(e.to_string()))
}

/// Pull the listing fragment out of a command list.
pub fn find_fragment(
    commands: Vec<AjaxCommand>,
    dom_id: &str,
    page: u32,
) -> Result<String, FetchError> {
    let selector = listing_selector(dom_id);

    commands
        .into_iter()
        .filter(|c| c.command == "insert" && c.selector.as_deref() == Some(selector.as_str()))
        .find_map(|c| match c.data {
            Some(Value::String(html)) if !html.trim().is_empty() => Some(html),
            _ => None,
        })
        .ok_or(FetchError::FragmentNotFound { page })
}
