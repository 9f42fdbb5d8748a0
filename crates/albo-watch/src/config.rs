//! Configuration loaded from environment variables.

use std::time::Duration;
use thiserror::Error;

use crate::filter::Keyword;
use crate::portal::PortalConfig;

/// Default poll interval in seconds.
pub const DEFAULT_REFRESH_RATE_SECS: u64 = 300;

/// Errors raised while validating configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("Insert a valid {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the watcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot credential.
    pub bot_token: String,
    /// Telegram chat ids that receive notifications.
    pub chat_ids: Vec<String>,
    /// Title keyword, already normalized.
    pub keyword: Keyword,
    /// Delay between two cycles.
    pub refresh_rate: Duration,
    /// Portal endpoint details.
    pub portal: PortalConfig,
    /// Alternative Bot API server, if any.
    pub telegram_api_base: Option<String>,
    /// Log messages instead of sending them.
    pub notify_disabled: bool,
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `BOT_TOKEN`: Telegram bot token
    /// - `KEY_TEXT`: keyword that must appear in an announcement title
    ///
    /// # Optional Environment Variables
    /// - `CHAT_IDS`: comma-separated chat ids (default: none)
    /// - `REFRESH_RATE`: seconds between cycles (default: 300)
    /// - `PORTAL_URL`, `PORTAL_BASE_URL`, `PORTAL_INSECURE_TLS`
    /// - `TELEGRAM_API_URL`, `NOTIFY_DISABLED`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("BOT_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let chat_ids = parse_chat_ids(&lookup("CHAT_IDS").unwrap_or_default());

        let keyword = lookup("KEY_TEXT")
            .and_then(|v| Keyword::new(&v))
            .ok_or(ConfigError::Missing("KEY_TEXT"))?;

        let refresh_rate = match lookup("REFRESH_RATE") {
            Some(raw) => parse_refresh_rate(&raw)?,
            None => Duration::from_secs(DEFAULT_REFRESH_RATE_SECS),
        };

        let mut portal = PortalConfig::default();
        if let Some(endpoint) = lookup("PORTAL_URL").filter(|v| !v.trim().is_empty()) {
            portal.endpoint = endpoint.trim().to_string();
        }
        if let Some(base) = lookup("PORTAL_BASE_URL").filter(|v| !v.trim().is_empty()) {
            portal.base_url = base.trim().to_string();
        }
        portal.insecure_tls = lookup("PORTAL_INSECURE_TLS").is_some_and(|v| is_truthy(&v));

        url::Url::parse(&portal.base_url).map_err(|e| ConfigError::Invalid {
            name: "PORTAL_BASE_URL",
            reason: e.to_string(),
        })?;

        let telegram_api_base = lookup("TELEGRAM_API_URL").filter(|v| !v.trim().is_empty());
        let notify_disabled = lookup("NOTIFY_DISABLED").is_some_and(|v| is_truthy(&v));

        Ok(Self {
            bot_token,
            chat_ids,
            keyword,
            refresh_rate,
            portal,
            telegram_api_base,
            notify_disabled,
        })
    }
}

/// Split a comma-separated list, dropping blank items.
pub fn parse_chat_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_refresh_rate(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
        name: "REFRESH_RATE",
        reason: format!("expected whole seconds, got {raw:?}"),
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            name: "REFRESH_RATE",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
