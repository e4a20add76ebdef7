use std::time::Duration;

use crate::remote::{with_timeout, RemoteTree};
use crate::tree::entry::Entry;
use crate::tree::path::RepoPath;

/// Whether a listing reflects the remote directory or a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    Complete,
    /// The fetch failed; entries are empty. Holds the error text.
    Failed(String),
}

/// One directory level as seen by the directory view.
#[derive(Debug, Clone)]
pub struct Listing {
    pub path: RepoPath,
    pub entries: Vec<Entry>,
    pub status: ListingStatus,
}

impl Listing {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ListingStatus::Failed(_))
    }
}

/// Fetch exactly one directory level.
///
/// Failures never propagate: they are logged and turn into an empty,
/// `Failed` listing. There is no retry.
pub async fn load_directory(tree: &dyn RemoteTree, path: &RepoPath, timeout: Duration) -> Listing {
    match with_timeout(timeout, tree.list_directory(path)).await {
        Ok(entries) => {
            tracing::debug!(path = %path, count = entries.len(), "directory loaded");
            Listing {
                path: path.clone(),
                entries,
                status: ListingStatus::Complete,
            }
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "failed to load directory");
            Listing {
                path: path.clone(),
                entries: Vec::new(),
                status: ListingStatus::Failed(e.to_string()),
            }
        }
    }
}
