//! Notification channels for albo-watch.
//!
//! This crate delivers short text messages to a fixed list of recipients over
//! a messaging platform. Delivery is best-effort: every recipient is attempted
//! independently and failures are reported back, never raised.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use notify::{Notifier, TelegramChannel};
//!
//! # async fn demo() {
//! let channel = TelegramChannel::new("123:abc".to_string());
//! let notifier = Notifier::new(Arc::new(channel), vec!["42".to_string()]);
//!
//! let report = notifier.broadcast("hello").await;
//! assert_eq!(report.attempted(), 1);
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for notification channels
//! - [`TelegramChannel`] implements the Telegram Bot API `sendMessage` call
//! - [`Notifier`] fans a message out to every configured recipient

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;

pub use channels::telegram::TelegramChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;

use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of delivering one message to every recipient.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Recipients that accepted the message.
    pub delivered: Vec<String>,
    /// Recipients whose delivery failed, with the error.
    pub failed: Vec<(String, ChannelError)>,
}

impl DeliveryReport {
    /// Number of recipients a delivery was attempted for.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Broadcasts messages to a fixed recipient list over one channel.
pub struct Notifier {
    channel: Arc<dyn NotifyChannel>,
    recipients: Vec<String>,
    disabled: bool,
}

impl Notifier {
    /// Create a notifier for the given channel and recipients.
    #[must_use]
    pub fn new(channel: Arc<dyn NotifyChannel>, recipients: Vec<String>) -> Self {
        if recipients.is_empty() {
            warn!(
                channel = channel.name(),
                "No recipients configured, notifications will not be delivered"
            );
        } else {
            info!(
                channel = channel.name(),
                recipient_count = recipients.len(),
                "Notification system initialized"
            );
        }

        Self {
            channel,
            recipients,
            disabled: false,
        }
    }

    /// Create a notifier that logs messages instead of sending them.
    #[must_use]
    pub fn disabled(channel: Arc<dyn NotifyChannel>, recipients: Vec<String>) -> Self {
        info!("Notifications disabled, messages will only be logged");
        Self {
            channel,
            recipients,
            disabled: true,
        }
    }

    /// Send a message to every recipient, one after another.
    ///
    /// A failure for one recipient is logged and recorded in the report; the
    /// remaining recipients are still attempted.
    pub async fn broadcast(&self, message: &str) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let channel_name = self.channel.name();

        if self.disabled {
            debug!(
                channel = channel_name,
                text = message,
                "Notifications disabled, skipping send"
            );
            return report;
        }

        if !self.channel.enabled() {
            debug!(channel = channel_name, "Channel disabled, skipping");
            return report;
        }

        for recipient in &self.recipients {
            match self.channel.send(recipient, message).await {
                Ok(()) => {
                    debug!(channel = channel_name, recipient = %recipient, "Notification sent");
                    report.delivered.push(recipient.clone());
                }
                Err(e) => {
                    error!(
                        channel = channel_name,
                        recipient = %recipient,
                        error = %e,
                        "Failed to send notification"
                    );
                    report.failed.push((recipient.clone(), e));
                }
            }
        }

        report
    }
}
