//! Telegram Bot API notification channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::NotifyChannel;

/// Default Telegram Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Text formatting mode understood by `sendMessage`.
///
/// Only legacy Markdown (`*bold*`, `_italic_`) is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
enum ParseMode {
    Markdown,
}

/// Telegram bot notification channel.
pub struct TelegramChannel {
    bot_token: Option<String>,
    api_base: String,
    client: reqwest::Client,
}

impl TelegramChannel {
    /// Create a Telegram channel for the given bot token.
    #[must_use]
    pub fn new(bot_token: String) -> Self {
        let bot_token = Some(bot_token).filter(|t| !t.trim().is_empty());
        if bot_token.is_none() {
            debug!("Telegram notifications disabled (empty bot token)");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            bot_token,
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        }
    }

    /// Point the channel at a different Bot API server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, token: &str) -> String {
        format!("{}/bot{token}/sendMessage", self.api_base)
    }
}

#[async_trait]
impl NotifyChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn enabled(&self) -> bool {
        self.bot_token.is_some()
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<(), ChannelError> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or_else(|| ChannelError::NotConfigured("BOT_TOKEN".to_string()))?;

        let payload = SendMessage {
            chat_id: recipient,
            text: message,
            parse_mode: ParseMode::Markdown,
        };

        debug!(channel = "telegram", chat_id = recipient, "Sending notification");

        let response = self
            .client
            .post(self.endpoint(token))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The Bot API always answers with an envelope, even on 4xx.
        let reply: ApiReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(ChannelError::Rejected {
                    channel: "telegram",
                    code: status.as_u16(),
                    description: body,
                })
            }
        };

        if reply.ok {
            debug!(channel = "telegram", chat_id = recipient, "Notification sent successfully");
            return Ok(());
        }

        if let Some(retry_after_secs) = reply.parameters.and_then(|p| p.retry_after) {
            return Err(ChannelError::RateLimited { retry_after_secs });
        }

        let code = reply.error_code.unwrap_or_else(|| status.as_u16());
        let description = reply.description.unwrap_or_default();

        warn!(
            channel = "telegram",
            chat_id = recipient,
            code,
            description = %description,
            "Telegram sendMessage request failed"
        );

        Err(ChannelError::Rejected {
            channel: "telegram",
            code,
            description,
        })
    }
}

// =============================================================================
// Telegram Bot API types
// =============================================================================

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}
