//! Navigation model: repository paths as segment sequences and breadcrumbs.
//!
//! Slash strings only exist at the edges (CLI input, API requests, display).
//! Internally a path is a list of non-empty segments, so repeated, leading
//! and trailing slashes cannot leak into navigation state.

use std::fmt;

/// Label of the first breadcrumb.
pub const ROOT_LABEL: &str = "Home";

/// A root-anchored path inside the remote repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RepoPath {
    segments: Vec<String>,
}

impl RepoPath {
    /// The repository root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a slash-delimited string. Empty segments are dropped.
    pub fn parse(s: &str) -> Self {
        Self {
            segments: split_segments(s),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the root.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Drop the last segment. The parent of the root is the root.
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Append `name` as new segment(s). `name` may itself contain slashes,
    /// as collector-qualified names do.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(split_segments(name));
        Self { segments }
    }

    /// Path as the remote API expects it: `a/b`, empty for the root.
    pub fn api_path(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for RepoPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

fn split_segments(s: &str) -> Vec<String> {
    s.split('/')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// One element of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreadcrumbItem {
    pub name: String,
    /// Root-anchored, `/`-prefixed path usable directly for navigation.
    pub path: String,
}

/// Breadcrumb trail for a path: the root item followed by one item per
/// segment, each extending the previous path by that segment.
pub fn breadcrumbs(path: &RepoPath) -> Vec<BreadcrumbItem> {
    let mut items = Vec::with_capacity(path.depth() + 1);
    items.push(BreadcrumbItem {
        name: ROOT_LABEL.to_string(),
        path: "/".to_string(),
    });

    let mut current = RepoPath::root();
    for segment in path.segments() {
        current = current.child(segment);
        items.push(BreadcrumbItem {
            name: segment.clone(),
            path: current.to_string(),
        });
    }
    items
}

/// Breadcrumbs for a boundary string such as a URL path or CLI argument.
pub fn breadcrumbs_for(path: &str) -> Vec<BreadcrumbItem> {
    breadcrumbs(&RepoPath::parse(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "/",
        "//",
        "Documents",
        "/Documents/",
        "Documents//Work",
        "/a/b/c/d",
        "a///b//c/",
        "docs/README.md",
    ];

    fn non_empty_segments(s: &str) -> usize {
        s.split('/').filter(|p| !p.is_empty()).count()
    }

    #[test]
    fn parse_collapses_slashes() {
        let p = RepoPath::parse("//Documents///Work/");
        assert_eq!(p.segments(), &["Documents".to_string(), "Work".to_string()]);
        assert_eq!(p.to_string(), "/Documents/Work");
        assert_eq!(p.api_path(), "Documents/Work");
    }

    #[test]
    fn root_display_and_api_path() {
        let root = RepoPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.api_path(), "");
        assert_eq!(RepoPath::parse("/"), root);
        assert_eq!(RepoPath::parse(""), root);
    }

    #[test]
    fn breadcrumbs_length_matches_segments() {
        for s in SAMPLES {
            let crumbs = breadcrumbs_for(s);
            assert_eq!(crumbs.len(), non_empty_segments(s) + 1, "path {:?}", s);
        }
    }

    #[test]
    fn breadcrumbs_round_trip_through_last_path() {
        for s in SAMPLES {
            let crumbs = breadcrumbs_for(s);
            let last = crumbs.last().unwrap();
            assert_eq!(breadcrumbs_for(&last.path), crumbs, "path {:?}", s);
        }
    }

    #[test]
    fn breadcrumbs_are_cumulative() {
        let crumbs = breadcrumbs_for("/Documents/Work/2024");
        let paths: Vec<&str> = crumbs.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/Documents", "/Documents/Work", "/Documents/Work/2024"]);
        assert_eq!(crumbs[0].name, ROOT_LABEL);
        assert_eq!(crumbs[3].name, "2024");
    }

    #[test]
    fn parent_child_round_trip_is_stable() {
        for s in SAMPLES {
            let p = RepoPath::parse(s);
            let child = p.child("x");
            assert_eq!(child.parent().child("x"), child, "path {:?}", s);
        }
    }

    #[test]
    fn parent_never_has_double_slash() {
        for s in SAMPLES {
            let parent = RepoPath::parse(s).parent().to_string();
            assert!(!parent.contains("//"), "parent of {:?} was {:?}", s, parent);
        }
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(RepoPath::root().parent(), RepoPath::root());
    }

    #[test]
    fn child_accepts_qualified_names() {
        let p = RepoPath::root().child("Documents/Work/");
        assert_eq!(p.to_string(), "/Documents/Work");
        assert_eq!(p.depth(), 2);
        assert_eq!(p.segments().last().map(String::as_str), Some("Work"));
    }

    #[test]
    fn child_with_empty_name_is_unchanged() {
        let p = RepoPath::parse("/a");
        assert_eq!(p.child(""), p);
        assert_eq!(p.child("//"), p);
    }
}
