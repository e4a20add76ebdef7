use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a node in the remote tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// One node of the remote tree as observed by the explorer.
///
/// `name` is the leaf name for a plain directory listing. Entries produced by
/// the recursive collector carry the slash-joined path relative to the
/// traversal root instead, so merged listings never collide and search can
/// match against full paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque content identifier from the store (git blob/tree sha).
    pub id: String,
    pub name: String,
    pub kind: EntryKind,
    /// Byte count, files only.
    pub size: Option<u64>,
    /// Last change, best-effort.
    pub modified: DateTime<Utc>,
    /// Raw-content locator, files only.
    pub download_url: Option<String>,
    /// Human-facing URL of the hosted file view, files only.
    pub html_url: Option<String>,
}

impl Entry {
    /// Build a folder entry.
    pub fn folder(id: impl Into<String>, name: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::Folder,
            size: None,
            modified,
            download_url: None,
            html_url: None,
        }
    }

    /// Build a file entry without locators.
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        size: u64,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            modified,
            download_url: None,
            html_url: None,
        }
    }

    /// Attach content locators (builder style).
    pub fn with_urls(mut self, download_url: Option<String>, html_url: Option<String>) -> Self {
        self.download_url = download_url;
        self.html_url = html_url;
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// Last `/`-segment of the name.
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Copy of this entry whose name is prefixed by `prefix` (a root-relative
    /// directory path without leading slash). An empty prefix keeps the name.
    pub fn qualified(&self, prefix: &str) -> Self {
        let mut entry = self.clone();
        if !prefix.is_empty() {
            entry.name = format!("{}/{}", prefix, self.name);
        }
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-12T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn folder_has_no_size_or_urls() {
        let e = Entry::folder("1", "Documents", ts());
        assert!(e.is_folder());
        assert!(e.size.is_none());
        assert!(e.download_url.is_none());
    }

    #[test]
    fn qualified_prefixes_name() {
        let e = Entry::file("7", "report.pdf", 1_500_000, ts());
        assert_eq!(e.qualified("Documents").name, "Documents/report.pdf");
        assert_eq!(e.qualified("a/b").name, "a/b/report.pdf");
    }

    #[test]
    fn qualified_with_empty_prefix_keeps_name() {
        let e = Entry::file("4", "readme.md", 2150, ts());
        assert_eq!(e.qualified("").name, "readme.md");
    }

    #[test]
    fn leaf_name_of_qualified_entry() {
        let e = Entry::file("7", "Documents/Work/report.pdf", 10, ts());
        assert_eq!(e.leaf_name(), "report.pdf");
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntryKind::Folder).unwrap();
        assert_eq!(json, "\"folder\"");
    }
}
