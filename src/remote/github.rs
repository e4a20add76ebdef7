//! GitHub contents API client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio::time::{timeout_at, Instant};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::remote::RemoteTree;
use crate::tree::entry::{Entry, EntryKind};
use crate::tree::path::RepoPath;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// History lookups in flight per listing unless configured otherwise.
pub const DEFAULT_HISTORY_CONCURRENCY: usize = 4;

const USER_AGENT_VALUE: &str = concat!("repo_explorer_tui/", env!("CARGO_PKG_VERSION"));

/// One item of a contents listing.
#[derive(Debug, Deserialize)]
struct ContentItem {
    sha: String,
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
}

/// The contents endpoint answers with an array for directories and with a
/// single object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<ContentItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    committer: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    date: Option<DateTime<Utc>>,
}

/// Remote tree backed by a GitHub repository.
#[derive(Clone)]
pub struct GitHubTree {
    http: reqwest::Client,
    api_base: Url,
    owner: String,
    repo: String,
    history_concurrency: usize,
    /// Share of a listing's time that history lookups may use.
    history_budget: Duration,
}

impl GitHubTree {
    pub fn new(api_base: &str, owner: &str, repo: &str, timeout: Duration) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| AppError::InvalidPath(format!("bad API base {}: {}", api_base, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base,
            owner: owner.to_string(),
            repo: repo.to_string(),
            history_concurrency: DEFAULT_HISTORY_CONCURRENCY,
            history_budget: timeout / 2,
        })
    }

    /// Cap the last-commit lookups issued at once for one listing.
    pub fn with_history_concurrency(mut self, limit: usize) -> Self {
        self.history_concurrency = limit.max(1);
        self
    }

    /// `{api_base}/repos/{owner}/{repo}/{endpoint}/{extra...}`
    fn repo_url<'a>(&self, endpoint: &str, extra: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidPath(format!("API base cannot be a base: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), endpoint])
            .extend(extra);
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AppError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.text().await?)
    }

    /// Date of the most recent commit touching `path`.
    async fn last_commit_date(&self, path: &str) -> Result<Option<DateTime<Utc>>> {
        let mut url = self.repo_url("commits", std::iter::empty())?;
        url.query_pairs_mut()
            .append_pair("path", path)
            .append_pair("per_page", "1");
        let body = self.get_text(url).await?;
        let commits: Vec<CommitItem> = serde_json::from_str(&body)?;
        Ok(commits
            .into_iter()
            .next()
            .and_then(|c| c.commit.committer)
            .and_then(|s| s.date))
    }

    async fn modified_or_now(&self, path: &str) -> DateTime<Utc> {
        match self.last_commit_date(path).await {
            Ok(Some(date)) => date,
            Ok(None) => Utc::now(),
            Err(e) => {
                tracing::debug!(path, error = %e, "history lookup failed, using current time");
                Utc::now()
            }
        }
    }
}

#[async_trait]
impl RemoteTree for GitHubTree {
    async fn list_directory(&self, path: &RepoPath) -> Result<Vec<Entry>> {
        let history_deadline = Instant::now() + self.history_budget;
        let url = self.repo_url("contents", path.segments().iter().map(String::as_str))?;
        tracing::debug!(%url, "listing directory");
        let body = self.get_text(url).await?;

        let items = match serde_json::from_str::<ContentsResponse>(&body)? {
            ContentsResponse::Listing(items) => items,
            ContentsResponse::Other(_) => return Ok(Vec::new()),
        };

        let dates = history_dates(
            items.iter().map(|item| item.path.as_str()),
            self.history_concurrency,
            history_deadline,
            |path| self.modified_or_now(path),
        )
        .boxed()
        .await;

        Ok(items
            .into_iter()
            .zip(dates)
            .map(|(item, modified)| {
                let kind = if item.item_type == "dir" {
                    EntryKind::Folder
                } else {
                    EntryKind::File
                };
                match kind {
                    EntryKind::Folder => Entry::folder(item.sha, item.name, modified),
                    EntryKind::File => {
                        // Some listings omit the raw locator.
                        let download_url = item
                            .download_url
                            .or_else(|| item.html_url.as_deref().map(raw_url));
                        Entry::file(item.sha, item.name, item.size.unwrap_or(0), modified)
                            .with_urls(download_url, item.html_url)
                    }
                }
            })
            .collect())
    }

    async fn fetch_raw_content(&self, locator: &str) -> Result<String> {
        let url = Url::parse(locator)
            .map_err(|e| AppError::InvalidPath(format!("bad content locator {}: {}", locator, e)))?;
        self.get_text(url).await
    }

    fn label(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Run `lookup` for each path with at most `limit` in flight, keeping input
/// order. Lookups still pending at `deadline` resolve to the current time.
async fn history_dates<I, F, Fut>(
    paths: I,
    limit: usize,
    deadline: Instant,
    lookup: F,
) -> Vec<DateTime<Utc>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = DateTime<Utc>>,
{
    stream::iter(paths)
        .map(lookup)
        .map(move |fut| async move {
            timeout_at(deadline, fut).await.unwrap_or_else(|_| {
                tracing::debug!("history lookup ran out of time, using current time");
                Utc::now()
            })
        })
        .buffered(limit.max(1))
        .collect()
        .await
}

/// Rewrite a hosted-view URL (`github.com/o/r/blob/...`) to its raw form.
pub fn raw_url(html_url: &str) -> String {
    html_url
        .replacen("github.com", "raw.githubusercontent.com", 1)
        .replacen("/blob", "", 1)
}
