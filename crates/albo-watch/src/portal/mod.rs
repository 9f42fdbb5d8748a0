//! Poliba portal client.
//!
//! The albo listing is paginated through Drupal's `views/ajax` endpoint. Each
//! page is a form POST answered with a JSON list of commands, one of which
//! inserts the listing HTML into the view container. Everything tied to the
//! site's current markup (form blob, headers, dom id) stays in this module.

mod commands;
mod form;

pub use commands::{listing_selector, AjaxCommand};

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::error::FetchError;

/// Number of listing pages scanned per cycle.
pub const MAX_PAGES: u32 = 10;

/// Default AJAX endpoint of the portal.
pub const DEFAULT_ENDPOINT: &str = "https://www.poliba.it/it/views/ajax";

/// Default origin used to resolve relative announcement links.
pub const DEFAULT_BASE_URL: &str = "https://www.poliba.it";

/// Dom id of the albo view block on the portal page.
pub const DEFAULT_DOM_ID: &str = "a41f9fb34f3bbf348abc81d7ecfeecfb";

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:138.0) Gecko/20100101 Firefox/138.0";
const REFERER_PATH: &str = "/it/amministrazione-e-servizi/albo-online";

/// Source of listing fragments, one per page index.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetch the listing HTML for `page`.
    async fn fetch(&self, page: u32) -> Result<String, FetchError>;
}

/// Where and how to reach the portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// AJAX endpoint receiving the form POST.
    pub endpoint: String,
    /// Origin of the site, used for headers and link resolution.
    pub base_url: String,
    /// Dom id of the view whose listing is requested.
    pub dom_id: String,
    /// Skip TLS certificate verification.
    pub insecure_tls: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            dom_id: DEFAULT_DOM_ID.to_string(),
            insecure_tls: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the albo `views/ajax` endpoint.
pub struct PortalClient {
    config: PortalConfig,
    client: Client,
}

impl PortalClient {
    /// Create a new portal client.
    pub fn new(config: PortalConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(default_headers(&config.base_url))
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()?;

        if config.insecure_tls {
            tracing::warn!("TLS certificate verification disabled for portal requests");
        }

        Ok(Self { config, client })
    }
}

#[async_trait]
impl FragmentSource for PortalClient {
    async fn fetch(&self, page: u32) -> Result<String, FetchError> {
        let fields = form::fields(&self.config.dom_id, page);

        tracing::debug!(page, endpoint = %self.config.endpoint, "Requesting listing page");

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&fields)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let commands = commands::decode(&body)?;
        tracing::debug!(page, commands = commands.len(), "Decoded AJAX commands");

        commands::find_fragment(commands, &self.config.dom_id, page)
    }
}

fn default_headers(base_url: &str) -> HeaderMap {
    let origin = base_url.trim_end_matches('/');
    let mut headers = HeaderMap::new();

    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("it-IT,it;q=0.8,en-US;q=0.5,en;q=0.3"),
    );
    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
    headers.insert(header::COOKIE, HeaderValue::from_static("has_js=1"));

    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(header::ORIGIN, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("{origin}{REFERER_PATH}")) {
        headers.insert(header::REFERER, value);
    }

    headers
}
