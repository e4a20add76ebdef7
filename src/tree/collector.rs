//! Recursive tree collector: bounded-depth expansion of a remote subtree.
//!
//! Traversal runs off an explicit worklist. Directory fetches are issued up
//! to `concurrency` at a time and may complete in any order; the result is
//! still assembled in depth-first discovery order because each directory's
//! children are stored on its own node and flattened at the end.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::error::Result;
use crate::remote::{with_timeout, RemoteTree};
use crate::tree::entry::Entry;
use crate::tree::path::RepoPath;

/// Deepest directory level (below the traversal root) that gets listed.
pub const DEFAULT_MAX_DEPTH: usize = 5;
/// Directory fetches allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Deadline for a single directory fetch.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tuning knobs for a collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectOptions {
    pub max_depth: usize,
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Everything one collection run found.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Files and folders, names relative to the traversal root, in
    /// depth-first discovery order.
    pub entries: Vec<Entry>,
    /// Directories whose fetch failed or timed out.
    pub failed: Vec<RepoPath>,
    /// Folders not descended into because of the depth ceiling.
    pub truncated: Vec<RepoPath>,
    /// Number of directory listings requested.
    pub directories_visited: usize,
}

impl Collection {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A directory discovered during traversal.
struct DirNode {
    path: RepoPath,
    relative: RepoPath,
    depth: usize,
    entries: Vec<Entry>,
    subdirs: Vec<usize>,
}

/// Walks a remote tree below a root, aggregating every entry.
#[derive(Clone)]
pub struct TreeCollector {
    tree: Arc<dyn RemoteTree>,
    options: CollectOptions,
}

impl TreeCollector {
    pub fn new(tree: Arc<dyn RemoteTree>, options: CollectOptions) -> Self {
        Self { tree, options }
    }

    /// Collect every entry below `root`, one listing call per visited
    /// directory. A failed directory contributes nothing and does not stop
    /// the rest of the traversal.
    pub async fn collect(&self, root: &RepoPath) -> Collection {
        let concurrency = self.options.concurrency.max(1);
        let timeout = self.options.request_timeout;
        let tree = self.tree.as_ref();

        let mut nodes = vec![DirNode {
            path: root.clone(),
            relative: RepoPath::root(),
            depth: 0,
            entries: Vec::new(),
            subdirs: Vec::new(),
        }];
        let mut pending: Vec<usize> = vec![0];
        let mut in_flight = FuturesUnordered::new();
        let mut collection = Collection::default();

        loop {
            while in_flight.len() < concurrency {
                let Some(idx) = pending.pop() else { break };
                collection.directories_visited += 1;
                in_flight.push(fetch_dir(tree, idx, nodes[idx].path.clone(), timeout));
            }

            let Some((idx, result)) = in_flight.next().await else {
                break;
            };

            let children = match result {
                Ok(children) => children,
                Err(e) => {
                    tracing::warn!(path = %nodes[idx].path, error = %e, "subtree skipped");
                    collection.failed.push(nodes[idx].path.clone());
                    continue;
                }
            };

            let prefix = nodes[idx].relative.api_path();
            let child_depth = nodes[idx].depth + 1;
            let mut subdirs = Vec::new();

            for child in children.iter().filter(|c| c.is_folder()) {
                let path = nodes[idx].path.child(&child.name);
                if child_depth > self.options.max_depth {
                    collection.truncated.push(path);
                    continue;
                }
                let relative = nodes[idx].relative.child(&child.name);
                subdirs.push(nodes.len());
                nodes.push(DirNode {
                    path,
                    relative,
                    depth: child_depth,
                    entries: Vec::new(),
                    subdirs: Vec::new(),
                });
            }

            // Reverse so the first sub-folder is fetched first.
            pending.extend(subdirs.iter().rev().copied());

            let node = &mut nodes[idx];
            node.entries = children.iter().map(|c| c.qualified(&prefix)).collect();
            node.subdirs = subdirs;
        }

        collection.entries = flatten(nodes);
        tracing::debug!(
            root = %root,
            entries = collection.entries.len(),
            visited = collection.directories_visited,
            failed = collection.failed.len(),
            truncated = collection.truncated.len(),
            "collection finished"
        );
        collection
    }
}

async fn fetch_dir(
    tree: &dyn RemoteTree,
    idx: usize,
    path: RepoPath,
    timeout: Duration,
) -> (usize, Result<Vec<Entry>>) {
    let result = with_timeout(timeout, tree.list_directory(&path)).await;
    (idx, result)
}

/// Pre-order flatten: a directory's own children, then each sub-folder's
/// subtree in listing order.
fn flatten(mut nodes: Vec<DirNode>) -> Vec<Entry> {
    let mut out = Vec::new();
    let mut stack = vec![0];
    while let Some(idx) = stack.pop() {
        let node = &mut nodes[idx];
        out.append(&mut node.entries);
        stack.extend(node.subdirs.iter().rev().copied());
    }
    out
}
