//! In-memory remote tree, used by `--demo` and by tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{AppError, Result};
use crate::remote::RemoteTree;
use crate::tree::entry::Entry;
use crate::tree::path::RepoPath;

/// Scheme used for content locators of in-memory files.
const MEMORY_SCHEME: &str = "memory://";

/// A remote tree held entirely in memory.
///
/// Directories are keyed by their API path (`""` for the root). Listing a
/// directory that was never added fails like a 404 would.
#[derive(Debug, Default)]
pub struct MemoryTree {
    label: String,
    dirs: HashMap<String, Vec<Entry>>,
    contents: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    listing_calls: AtomicUsize,
}

impl MemoryTree {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Register the children of `path`.
    pub fn with_dir(mut self, path: &str, entries: Vec<Entry>) -> Self {
        self.dirs.insert(RepoPath::parse(path).api_path(), entries);
        self
    }

    /// Register raw content behind `locator`.
    pub fn with_content(mut self, locator: &str, text: &str) -> Self {
        self.contents.insert(locator.to_string(), text.to_string());
        self
    }

    /// Make every listing of `path` fail.
    #[cfg(test)]
    pub fn fail_on(mut self, path: &str) -> Self {
        self.failing.insert(RepoPath::parse(path).api_path());
        self
    }

    /// Delay every listing of `path` by `delay`.
    #[cfg(test)]
    pub fn delay_on(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(RepoPath::parse(path).api_path(), delay);
        self
    }

    /// Number of `list_directory` calls served so far.
    #[cfg(test)]
    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    /// Small sample repository for demo mode.
    pub fn sample() -> Self {
        let readme = "# Project Documentation\n\nThis is a sample readme file with markdown content.\n\n## Features\n- File browsing\n- Dark mode\n- File preview\n";
        let package = "{\n  \"name\": \"file-explorer\",\n  \"version\": \"1.0.0\",\n  \"description\": \"A web-based file explorer\"\n}\n";
        let index = "console.log(\"Hello, World!\");\n\nfunction main() {\n  // Main application code\n}\n";
        let notes = "Quarterly goals\n- ship the explorer\n- write docs\n";

        Self::new("demo/files")
            .with_dir(
                "/",
                vec![
                    Entry::folder("1", "Documents", day(2024, 3, 15)),
                    Entry::folder("2", "Images", day(2024, 3, 14)),
                    Entry::folder("3", "Projects", day(2024, 3, 13)),
                    memory_file("4", "readme.md", "readme.md", 2150, day(2024, 3, 12)),
                ],
            )
            .with_dir(
                "/Documents",
                vec![
                    Entry::folder("5", "Work", day(2024, 3, 11)),
                    Entry::folder("6", "Personal", day(2024, 3, 10)),
                    memory_file("7", "report.pdf", "Documents/report.pdf", 1_572_864, day(2024, 3, 9)),
                ],
            )
            .with_dir(
                "/Documents/Work",
                vec![memory_file("13", "notes.txt", "Documents/Work/notes.txt", 48, day(2024, 3, 2))],
            )
            .with_dir("/Documents/Personal", Vec::new())
            .with_dir(
                "/Images",
                vec![
                    memory_file("8", "vacation.jpg", "Images/vacation.jpg", 3_355_443, day(2024, 3, 8)),
                    memory_file("9", "profile.png", "Images/profile.png", 819_200, day(2024, 3, 7)),
                ],
            )
            .with_dir(
                "/Projects",
                vec![
                    Entry::folder("10", "src", day(2024, 3, 6)),
                    memory_file("11", "package.json", "Projects/package.json", 325, day(2024, 3, 5)),
                    memory_file("12", "index.js", "Projects/index.js", 1229, day(2024, 3, 4)),
                ],
            )
            .with_dir("/Projects/src", Vec::new())
            .with_content("memory://readme.md", readme)
            .with_content("memory://Projects/package.json", package)
            .with_content("memory://Projects/index.js", index)
            .with_content("memory://Documents/Work/notes.txt", notes)
    }
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn memory_file(id: &str, name: &str, path: &str, size: u64, modified: DateTime<Utc>) -> Entry {
    Entry::file(id, name, size, modified).with_urls(
        Some(format!("{}{}", MEMORY_SCHEME, path)),
        Some(format!("https://github.com/demo/files/blob/main/{}", path)),
    )
}

#[async_trait]
impl RemoteTree for MemoryTree {
    async fn list_directory(&self, path: &RepoPath) -> Result<Vec<Entry>> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        let key = path.api_path();

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&key) {
            return Err(AppError::Remote {
                status: 503,
                message: format!("listing {} unavailable", path),
            });
        }
        self.dirs.get(&key).cloned().ok_or_else(|| AppError::Remote {
            status: 404,
            message: format!("{} not found", path),
        })
    }

    async fn fetch_raw_content(&self, locator: &str) -> Result<String> {
        self.contents
            .get(locator)
            .cloned()
            .ok_or_else(|| AppError::Remote {
                status: 404,
                message: format!("{} not found", locator),
            })
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_root_lists_four_entries() {
        let tree = MemoryTree::sample();
        let root = tree.list_directory(&RepoPath::root()).await.unwrap();
        let names: Vec<&str> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Documents", "Images", "Projects", "readme.md"]);
        assert_eq!(tree.listing_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_directory_is_not_found() {
        let tree = MemoryTree::sample();
        let err = tree.list_directory(&RepoPath::parse("nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Remote { status: 404, .. }));
    }

    #[tokio::test]
    async fn failing_directory_errors() {
        let tree = MemoryTree::sample().fail_on("Images");
        assert!(tree.list_directory(&RepoPath::parse("/Images/")).await.is_err());
        assert!(tree.list_directory(&RepoPath::parse("Documents")).await.is_ok());
    }

    #[tokio::test]
    async fn content_is_served_by_locator() {
        let tree = MemoryTree::sample();
        let root = tree.list_directory(&RepoPath::root()).await.unwrap();
        let readme = root.iter().find(|e| e.name == "readme.md").unwrap();
        let text = tree
            .fetch_raw_content(readme.download_url.as_deref().unwrap())
            .await
            .unwrap();
        assert!(text.starts_with("# Project Documentation"));
    }

    #[test]
    fn sample_dates_are_set() {
        assert_eq!(day(2024, 3, 15).format("%Y-%m-%d").to_string(), "2024-03-15");
    }
}
