//! Watch loop - orchestrates the fetch-extract-filter-notify-persist flow.

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use notify::Notifier;

use crate::config::DEFAULT_REFRESH_RATE_SECS;
use crate::entry::Entry;
use crate::extract::EntryParser;
use crate::filter::{select_new, Keyword};
use crate::message::format_entry;
use crate::portal::{FragmentSource, MAX_PAGES};
use crate::store::{SeenSet, SeenStore};

/// Result of a single cycle over the page window.
#[derive(Debug)]
pub struct CycleResult {
    /// When the cycle started.
    pub started_at: DateTime<Utc>,
    /// Pages requested.
    pub pages_scanned: u32,
    /// Pages whose fetch failed.
    pub pages_failed: u32,
    /// Pages whose fragment had no listing table.
    pub pages_without_table: u32,
    /// Rows extracted across all pages.
    pub entries_found: usize,
    /// Entries that matched the keyword and were not seen before.
    pub new_entries: usize,
    /// Successful per-recipient deliveries.
    pub deliveries: usize,
    /// Failed per-recipient deliveries.
    pub delivery_failures: usize,
    /// Failed writes of the state file.
    pub persist_failures: usize,
    /// Errors encountered.
    pub errors: Vec<String>,
}

impl Default for CycleResult {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            pages_scanned: 0,
            pages_failed: 0,
            pages_without_table: 0,
            entries_found: 0,
            new_entries: 0,
            deliveries: 0,
            delivery_failures: 0,
            persist_failures: 0,
            errors: Vec::new(),
        }
    }
}

/// Polls the listing and announces new matching entries.
pub struct Watcher {
    source: Box<dyn FragmentSource>,
    parser: Box<dyn EntryParser>,
    notifier: Notifier,
    keyword: Keyword,
    store: SeenStore,
    pages: u32,
    interval: Duration,
}

impl Watcher {
    /// Create a watcher scanning the default page window.
    pub fn new(
        source: Box<dyn FragmentSource>,
        parser: Box<dyn EntryParser>,
        notifier: Notifier,
        keyword: Keyword,
        store: SeenStore,
    ) -> Self {
        Self {
            source,
            parser,
            notifier,
            keyword,
            store,
            pages: MAX_PAGES,
            interval: Duration::from_secs(DEFAULT_REFRESH_RATE_SECS),
        }
    }

    /// Override the number of pages scanned per cycle.
    #[must_use]
    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    /// Override the delay between cycles.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The state store used for persistence.
    pub fn store(&self) -> &SeenStore {
        &self.store
    }

    /// Run one cycle over every page of the window.
    ///
    /// Pages are processed strictly in order. A failing page is logged and
    /// skipped; it never stops the remaining pages.
    pub async fn run_cycle(&self, seen: &mut SeenSet) -> CycleResult {
        let mut result = CycleResult::default();

        tracing::info!(
            pages = self.pages,
            keyword = self.keyword.as_str(),
            "Checking for new tenders"
        );

        for page in 0..self.pages {
            result.pages_scanned += 1;

            let fragment = match self.source.fetch(page).await {
                Ok(fragment) => fragment,
                Err(e) => {
                    tracing::warn!(
                        page,
                        kind = e.kind(),
                        error = %e,
                        "Failed to fetch listing page"
                    );
                    result.pages_failed += 1;
                    result.errors.push(format!("page {page}: {e}"));
                    continue;
                }
            };

            let Some(entries) = self.parser.parse(&fragment) else {
                tracing::info!(page, "No tenders table found on page");
                result.pages_without_table += 1;
                continue;
            };
            result.entries_found += entries.len();

            let fresh = select_new(&entries, &self.keyword, seen);
            tracing::info!(page, rows = entries.len(), new = fresh.len(), "Filtered page");

            for entry in fresh {
                self.announce(&entry, seen, &mut result).await;
            }
        }

        tracing::info!(
            pages_scanned = result.pages_scanned,
            pages_failed = result.pages_failed,
            pages_without_table = result.pages_without_table,
            entries_found = result.entries_found,
            new_entries = result.new_entries,
            delivery_failures = result.delivery_failures,
            persist_failures = result.persist_failures,
            "Cycle complete"
        );

        result
    }

    /// Notify every recipient about `entry`, then record and persist it.
    ///
    /// The entry is marked seen whatever the delivery outcome.
    async fn announce(&self, entry: &Entry, seen: &mut SeenSet, result: &mut CycleResult) {
        tracing::info!(title = %entry.title, link = %entry.link, "New tender found");
        result.new_entries += 1;

        let report = self.notifier.broadcast(&format_entry(entry)).await;
        for chat_id in &report.delivered {
            tracing::info!(chat_id = %chat_id, title = %entry.title, "Notified chat");
        }
        for (chat_id, e) in &report.failed {
            result.errors.push(format!("delivery to {chat_id} failed: {e}"));
        }
        result.deliveries += report.delivered.len();
        result.delivery_failures += report.failed.len();

        seen.insert(entry.link.clone());
        if let Err(e) = self.store.persist(seen).await {
            tracing::error!(
                path = %self.store.path().display(),
                link = %entry.link,
                error = %e,
                "Failed to persist seen links, a restart may repeat this notification"
            );
            result.persist_failures += 1;
            result.errors.push(format!("persist failed: {e}"));
        }
    }

    /// Check, sleep, repeat. Never returns.
    ///
    /// A panic inside a cycle is logged and treated like a failed cycle.
    pub async fn run_forever(&self, mut seen: SeenSet) {
        loop {
            let cycle = AssertUnwindSafe(self.run_cycle(&mut seen)).catch_unwind();
            if cycle.await.is_err() {
                tracing::error!("Cycle aborted unexpectedly, retrying after the interval");
            }

            tracing::info!(
                secs = self.interval.as_secs(),
                seen = seen.len(),
                "Waiting before next check"
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::extract::TableParser;
    use async_trait::async_trait;
    use notify::{ChannelError, NotifyChannel};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Serves canned fragments; pages listed in `failing` return a network-like error.
    struct ScriptedSource {
        pages: HashMap<u32, String>,
        failing: Vec<u32>,
        requested: Arc<Mutex<Vec<u32>>>,
    }

    #[async_trait]
    impl FragmentSource for ScriptedSource {
        async fn fetch(&self, page: u32) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(page);
            if self.failing.contains(&page) {
                return Err(FetchError::Status { status: 503 });
            }
            self.pages
                .get(&page)
                .cloned()
                .ok_or(FetchError::FragmentNotFound { page })
        }
    }

    /// Records deliveries; recipients in `failing` are rejected.
    struct RecordingChannel {
        sent: Mutex<Vec<(String, String)>>,
        failing: Vec<String>,
    }

    #[async_trait]
    impl NotifyChannel for RecordingChannel {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn enabled(&self) -> bool {
            true
        }

        async fn send(&self, recipient: &str, message: &str) -> Result<(), ChannelError> {
            if self.failing.iter().any(|f| f == recipient) {
                return Err(ChannelError::Rejected {
                    channel: "recording",
                    code: 403,
                    description: "bot was blocked by the user".to_string(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), message.to_string()));
            Ok(())
        }
    }

    fn table(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(title, href)| {
                format!(r#"<tr><td><a href="{href}">{title}</a></td><td>x</td></tr>"#)
            })
            .collect();
        format!(r#"<table class="views-table"><tbody>{body}</tbody></table>"#)
    }

    struct Harness {
        watcher: Watcher,
        channel: Arc<RecordingChannel>,
        requested: Arc<Mutex<Vec<u32>>>,
        _dir: TempDir,
    }

    fn harness(
        pages: HashMap<u32, String>,
        failing_pages: Vec<u32>,
        failing_chats: Vec<&str>,
    ) -> Harness {
        let dir = TempDir::new().unwrap();
        let requested = Arc::new(Mutex::new(vec![]));
        let source = ScriptedSource {
            pages,
            failing: failing_pages,
            requested: requested.clone(),
        };
        let channel = Arc::new(RecordingChannel {
            sent: Mutex::new(vec![]),
            failing: failing_chats.into_iter().map(String::from).collect(),
        });
        let notifier = Notifier::new(channel.clone(), vec!["100".to_string(), "200".to_string()]);
        let watcher = Watcher::new(
            Box::new(source),
            Box::new(TableParser::from_base("https://www.poliba.it").unwrap()),
            notifier,
            Keyword::new("isp5g").unwrap(),
            SeenStore::new(dir.path().join("data").join("found_tenders.json")),
        );

        Harness {
            watcher,
            channel,
            requested,
            _dir: dir,
        }
    }

    fn sent_count(channel: &RecordingChannel) -> usize {
        channel.sent.lock().unwrap().len()
    }

    #[tokio::test]
    async fn test_notifies_once_across_cycles() {
        let pages = HashMap::from([(
            0,
            table(&[("ISP5G Tender A", "/node/1"), ("Unrelated Notice", "/node/2")]),
        )]);
        let h = harness(pages, vec![], vec![]);
        let mut seen = SeenSet::default();

        let first = h.watcher.run_cycle(&mut seen).await;
        assert_eq!(first.new_entries, 1);
        assert_eq!(first.deliveries, 2);
        assert_eq!(sent_count(&h.channel), 2);
        assert!(seen.contains("https://www.poliba.it/node/1"));
        assert!(!seen.contains("https://www.poliba.it/node/2"));

        let second = h.watcher.run_cycle(&mut seen).await;
        assert_eq!(second.new_entries, 0);
        assert_eq!(sent_count(&h.channel), 2);
    }

    #[tokio::test]
    async fn test_message_content() {
        let pages = HashMap::from([(0, table(&[("ISP5G Tender A", "/node/1")]))]);
        let h = harness(pages, vec![], vec![]);

        h.watcher.run_cycle(&mut SeenSet::default()).await;

        let sent = h.channel.sent.lock().unwrap();
        assert_eq!(sent[0].0, "100");
        assert_eq!(sent[1].0, "200");
        assert!(sent[0].1.contains("ISP5G Tender A"));
        assert!(sent[0].1.contains("https://www.poliba.it/node/1"));
    }

    #[tokio::test]
    async fn test_partial_delivery_failure_still_marks_seen() {
        let pages = HashMap::from([(0, table(&[("ISP5G Tender A", "/node/1")]))]);
        let h = harness(pages, vec![], vec!["100"]);
        let mut seen = SeenSet::default();

        let result = h.watcher.run_cycle(&mut seen).await;

        assert_eq!(result.delivery_failures, 1);
        assert_eq!(result.deliveries, 1);
        let sent = h.channel.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "200");

        assert!(seen.contains("https://www.poliba.it/node/1"));
        let persisted = h.watcher.store().load().await;
        assert!(persisted.contains("https://www.poliba.it/node/1"));
    }

    #[tokio::test]
    async fn test_failing_page_does_not_stop_the_cycle() {
        let pages: HashMap<u32, String> = (0..10)
            .map(|p| {
                let title = format!("ISP5G lotto {p}");
                let href = format!("/node/{p}");
                (p, table(&[(title.as_str(), href.as_str())]))
            })
            .collect();
        let h = harness(pages, vec![3], vec![]);
        let mut seen = SeenSet::default();

        let result = h.watcher.run_cycle(&mut seen).await;

        assert_eq!(*h.requested.lock().unwrap(), (0..10).collect::<Vec<_>>());
        assert_eq!(result.pages_scanned, 10);
        assert_eq!(result.pages_failed, 1);
        assert_eq!(result.new_entries, 9);
        assert!(!seen.contains("https://www.poliba.it/node/3"));
        for p in [0, 1, 2, 4, 5, 6, 7, 8, 9] {
            assert!(seen.contains(&format!("https://www.poliba.it/node/{p}")));
        }
    }

    #[tokio::test]
    async fn test_missing_table_and_missing_fragment_are_not_fatal() {
        let pages = HashMap::from([
            (0, r#"<div class="view-empty">Nessun atto</div>"#.to_string()),
            (2, table(&[("ISP5G Tender A", "/node/1")])),
        ]);
        let h = harness(pages, vec![], vec![]);
        let mut seen = SeenSet::default();

        let result = h.watcher.with_pages(3).run_cycle(&mut seen).await;

        assert_eq!(result.pages_scanned, 3);
        assert_eq!(result.pages_without_table, 1);
        assert_eq!(result.pages_failed, 1);
        assert_eq!(result.new_entries, 1);
    }

    #[tokio::test]
    async fn test_same_link_on_two_pages_notified_once() {
        let pages = HashMap::from([
            (0, table(&[("ISP5G Tender A", "/node/1")])),
            (1, table(&[("ISP5G Tender A", "/node/1")])),
        ]);
        let h = harness(pages, vec![], vec![]);

        let result = h
            .watcher
            .with_pages(2)
            .run_cycle(&mut SeenSet::default())
            .await;

        assert_eq!(result.new_entries, 1);
    }

    #[tokio::test]
    async fn test_persist_failure_is_counted_but_entry_stays_seen() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let pages = HashMap::from([(0, table(&[("ISP5G Tender A", "/node/1")]))]);
        let h = harness(pages, vec![], vec![]);
        let watcher = Watcher {
            store: SeenStore::new(blocker.join("found_tenders.json")),
            ..h.watcher
        }
        .with_pages(1);
        let mut seen = SeenSet::default();

        let result = watcher.run_cycle(&mut seen).await;

        assert_eq!(result.persist_failures, 1);
        assert!(seen.contains("https://www.poliba.it/node/1"));

        // Still in memory, so the next cycle does not repeat it.
        let again = watcher.run_cycle(&mut seen).await;
        assert_eq!(again.new_entries, 0);
    }

    /// Panics on every fragment it is given.
    struct PanickingParser {
        calls: Arc<AtomicUsize>,
    }

    impl EntryParser for PanickingParser {
        fn parse(&self, _fragment: &str) -> Option<Vec<Entry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            panic!("unexpected listing markup");
        }
    }

    #[tokio::test]
    async fn test_run_forever_survives_a_panicking_cycle() {
        let pages = HashMap::from([(0, table(&[("ISP5G Tender A", "/node/1")]))]);
        let h = harness(pages, vec![], vec![]);
        let calls = Arc::new(AtomicUsize::new(0));
        let watcher = Watcher {
            parser: Box::new(PanickingParser {
                calls: calls.clone(),
            }),
            ..h.watcher
        }
        .with_pages(1)
        .with_interval(Duration::from_millis(10));

        let outcome = tokio::time::timeout(
            Duration::from_millis(300),
            watcher.run_forever(SeenSet::default()),
        )
        .await;

        assert!(outcome.is_err(), "run_forever must never return");
        assert!(calls.load(Ordering::SeqCst) > 1);
        assert_eq!(sent_count(&h.channel), 0);
    }
}
