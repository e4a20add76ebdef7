//! Full-tree search: debounced scheduling, generation tracking and filtering.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::event::{Event, SearchEvent};
use crate::tree::collector::TreeCollector;
use crate::tree::entry::Entry;
use crate::tree::path::RepoPath;

/// Quiet period a query must hold before a search starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Result of one search run.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub query: String,
    /// Matching entries in collector discovery order.
    pub entries: Vec<Entry>,
    /// Directories that could not be listed during the run.
    pub failed: usize,
    /// Folders skipped because of the depth ceiling.
    pub truncated: usize,
}

impl SearchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// What `update_query` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchUpdate {
    /// Empty query: results cleared, nothing scheduled.
    Cleared,
    /// A debounced search was scheduled under this generation.
    Scheduled { generation: u64 },
}

/// Keep entries whose root-relative name contains `query`, ignoring case.
pub fn filter_by_query(entries: Vec<Entry>, query: &str) -> Vec<Entry> {
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Collect the whole tree from the root and filter it by `query`.
pub async fn run_search(collector: &TreeCollector, query: &str) -> SearchOutcome {
    let collection = collector.collect(&RepoPath::root()).await;
    if !collection.is_complete() {
        tracing::warn!(query, failed = ?collection.failed, "search skipped unreadable folders");
    }
    let failed = collection.failed.len();
    let truncated = collection.truncated.len();
    let entries = filter_by_query(collection.entries, query);
    tracing::info!(query, matches = entries.len(), failed, truncated, "search finished");
    SearchOutcome {
        query: query.to_string(),
        entries,
        failed,
        truncated,
    }
}

/// Debounced search scheduler.
///
/// Every query change bumps a generation counter. A scheduled search sleeps
/// for the debounce interval and exits if its generation was superseded in
/// the meantime. A search that already started is not aborted; its events
/// carry the generation so the receiver can drop stale results.
pub struct SearchEngine {
    collector: TreeCollector,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    event_tx: mpsc::UnboundedSender<Event>,
}

impl SearchEngine {
    pub fn new(
        collector: TreeCollector,
        debounce: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            collector,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            event_tx,
        }
    }

    /// React to a new query string.
    pub fn update_query(&self, query: &str) -> SearchUpdate {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if query.is_empty() {
            return SearchUpdate::Cleared;
        }

        let current = self.generation.clone();
        let collector = self.collector.clone();
        let debounce = self.debounce;
        let tx = self.event_tx.clone();
        let query = query.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            tracing::debug!(%query, generation, "search started");
            let _ = tx.send(Event::Search(SearchEvent::Started { generation }));
            let outcome = run_search(&collector, &query).await;
            let _ = tx.send(Event::Search(SearchEvent::Finished {
                generation,
                outcome,
            }));
        });

        SearchUpdate::Scheduled { generation }
    }

    /// Whether `generation` belongs to the latest query.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
