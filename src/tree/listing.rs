//! Presentation helpers shared by the directory view and search results.

use chrono::{DateTime, Utc};

use crate::tree::classify::{classify, Category, CategoryFilter};
use crate::tree::entry::Entry;

/// An entry annotated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ListedEntry {
    pub entry: Entry,
    pub category: Category,
}

/// Filter by category, annotate, and sort folders first then by name.
pub fn visible_entries(entries: &[Entry], filter: CategoryFilter) -> Vec<ListedEntry> {
    let mut listed: Vec<ListedEntry> = entries
        .iter()
        .map(|entry| ListedEntry {
            category: classify(entry),
            entry: entry.clone(),
        })
        .filter(|item| filter.matches(item.category))
        .collect();

    listed.sort_by(|a, b| {
        b.entry
            .is_folder()
            .cmp(&a.entry.is_folder())
            .then_with(|| a.entry.name.to_lowercase().cmp(&b.entry.name.to_lowercase()))
            .then_with(|| a.entry.name.cmp(&b.entry.name))
    });
    listed
}

/// Format bytes as a short human-readable size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_modified(modified: &DateTime<Utc>) -> String {
    modified.format("%Y-%m-%d").to_string()
}

/// Split a qualified name into its leaf and the path that contains it.
pub fn display_parts(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('/') {
        Some((parent, leaf)) if !parent.is_empty() => (leaf, Some(parent)),
        Some((_, leaf)) => (leaf, None),
        None => (name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn names(listed: &[ListedEntry]) -> Vec<&str> {
        listed.iter().map(|l| l.entry.name.as_str()).collect()
    }

    #[test]
    fn folders_sort_before_files() {
        let entries = vec![
            Entry::file("1", "readme.md", 2150, now()),
            Entry::folder("2", "Documents", now()),
        ];
        let listed = visible_entries(&entries, CategoryFilter::All);
        assert_eq!(names(&listed), vec!["Documents", "readme.md"]);
        assert_eq!(listed[0].category, Category::Folder);
        assert_eq!(listed[1].category, Category::Document);
    }

    #[test]
    fn names_sort_case_insensitively() {
        let entries = vec![
            Entry::file("1", "beta.rs", 1, now()),
            Entry::file("2", "Alpha.rs", 1, now()),
            Entry::file("3", "alpha.rs", 1, now()),
            Entry::folder("4", "zeta", now()),
        ];
        let listed = visible_entries(&entries, CategoryFilter::All);
        assert_eq!(names(&listed), vec!["zeta", "Alpha.rs", "alpha.rs", "beta.rs"]);
    }

    #[test]
    fn category_filter_hides_other_kinds() {
        let entries = vec![
            Entry::folder("1", "Documents", now()),
            Entry::file("2", "readme.md", 2150, now()),
        ];
        let listed = visible_entries(&entries, CategoryFilter::Only(Category::Document));
        assert_eq!(names(&listed), vec!["readme.md"]);
    }

    #[test]
    fn filter_on_empty_input_is_empty() {
        assert!(visible_entries(&[], CategoryFilter::Only(Category::Code)).is_empty());
    }

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(2150), "2.1 KB");
        assert_eq!(format_size(1_572_864), "1.5 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn modified_formatting() {
        let dt = DateTime::parse_from_rfc3339("2024-03-15T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_modified(&dt), "2024-03-15");
    }

    #[test]
    fn display_parts_splits_qualified_names() {
        assert_eq!(display_parts("Documents/report.pdf"), ("report.pdf", Some("Documents")));
        assert_eq!(display_parts("a/b/c.rs"), ("c.rs", Some("a/b")));
        assert_eq!(display_parts("readme.md"), ("readme.md", None));
    }
}
