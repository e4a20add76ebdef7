//! Remote tree clients: the only place the explorer talks to a content store.

pub mod github;
pub mod memory;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::tree::entry::Entry;
use crate::tree::path::RepoPath;

/// A read-only, per-directory view of a remote repository tree.
#[async_trait]
pub trait RemoteTree: Send + Sync {
    /// Immediate children of `path`, with best-effort modification times.
    async fn list_directory(&self, path: &RepoPath) -> Result<Vec<Entry>>;

    /// Raw text behind a content locator (an entry's `download_url`).
    async fn fetch_raw_content(&self, locator: &str) -> Result<String>;

    /// Short human label for the tree, e.g. `owner/repo`.
    fn label(&self) -> String;
}

/// Bound a remote call by `limit`, mapping expiry to [`AppError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(limit)),
    }
}
