//! Albo online watcher for the Politecnico di Bari portal.
//!
//! This crate provides:
//! - Paginated fetching of the albo listing through the Drupal AJAX endpoint
//! - Extraction of announcement entries from the listing HTML
//! - Keyword filtering against a persisted set of already-notified links
//! - Telegram notifications for every new match

pub mod config;
pub mod entry;
pub mod error;
pub mod extract;
pub mod filter;
pub mod message;
pub mod portal;
pub mod store;
pub mod watcher;

// Re-export main types
pub use config::{Config, ConfigError};
pub use entry::Entry;
pub use error::{FetchError, StoreError};
pub use extract::{EntryParser, TableParser};
pub use filter::{select_new, Keyword};
pub use portal::{FragmentSource, PortalClient, PortalConfig, MAX_PAGES};
pub use store::{SeenSet, SeenStore};
pub use watcher::{CycleResult, Watcher};
