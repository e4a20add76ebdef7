use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::text::Line;
use syntect::highlighting::Theme;
use syntect::parsing::SyntaxSet;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::download::save_download;
use crate::event::{Event, SearchEvent};
use crate::preview_content::{
    highlight_content, load_theme, metadata_card, preview_kind, PreviewKind,
};
use crate::remote::{with_timeout, RemoteTree};
use crate::theme::{resolve_theme, ThemeColors};
use crate::tree::classify::CategoryFilter;
use crate::tree::collector::TreeCollector;
use crate::tree::entry::Entry;
use crate::tree::listing::{visible_entries, ListedEntry};
use crate::tree::loader::{load_directory, Listing};
use crate::tree::path::{breadcrumbs, BreadcrumbItem, RepoPath};
use crate::tree::search::{SearchEngine, SearchOutcome, SearchUpdate};

/// Application mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Normal,
    /// Typing into the search bar.
    Search,
    Preview,
    Help,
}

/// One row of the file list.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// `..`, navigates to the parent directory.
    Parent,
    Item(ListedEntry),
}

/// State of the preview overlay.
#[derive(Debug)]
pub struct PreviewState {
    pub entry: Entry,
    pub kind: PreviewKind,
    /// Raw fetched text, kept for saving.
    pub content: Option<String>,
    pub loading: bool,
    pub failed: bool,
    pub lines: Vec<Line<'static>>,
    pub scroll_offset: usize,
}

/// Main application state.
pub struct App {
    tree: Arc<dyn RemoteTree>,
    search: SearchEngine,
    event_tx: mpsc::UnboundedSender<Event>,
    request_timeout: Duration,
    syntax_set: SyntaxSet,
    syntax_theme: Theme,
    max_preview_bytes: usize,

    pub repo_label: String,
    pub theme: ThemeColors,
    pub use_icons: bool,
    pub mode: AppMode,
    pub should_quit: bool,

    pub current_path: RepoPath,
    /// Raw listing of `current_path`.
    pub entries: Vec<Entry>,
    pub loading: bool,
    load_generation: u64,

    pub query: String,
    pub search_results: Vec<Entry>,
    pub searching: bool,

    pub filter: CategoryFilter,
    pub rows: Vec<Row>,
    pub selected_index: usize,
    pub scroll_offset: usize,

    pub preview: Option<PreviewState>,
    preview_generation: u64,
    pub help_scroll: usize,

    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        tree: Arc<dyn RemoteTree>,
        config: &AppConfig,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let collector = TreeCollector::new(tree.clone(), config.collect_options());
        let search = SearchEngine::new(collector, config.debounce(), event_tx.clone());
        Self {
            repo_label: tree.label(),
            tree,
            search,
            event_tx,
            request_timeout: config.request_timeout(),
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            syntax_theme: load_theme(config.syntax_theme_name()),
            max_preview_bytes: config.max_preview_bytes(),
            theme: resolve_theme(config.theme_scheme()),
            use_icons: config.use_icons(),
            mode: AppMode::Normal,
            should_quit: false,
            current_path: RepoPath::root(),
            entries: Vec::new(),
            loading: false,
            load_generation: 0,
            query: String::new(),
            search_results: Vec::new(),
            searching: false,
            filter: CategoryFilter::All,
            rows: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            preview: None,
            preview_generation: 0,
            help_scroll: 0,
            status_message: None,
        }
    }

    // ── Directory view ───────────────────────────────────────────────────────

    /// Replace the view with the listing of `path` and fetch it.
    pub fn navigate(&mut self, path: RepoPath) {
        tracing::debug!(path = %path, "navigate");
        if !self.query.is_empty() {
            self.set_query(String::new());
        }
        self.current_path = path.clone();
        self.entries.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.loading = true;
        self.load_generation += 1;
        self.refresh_rows();

        let generation = self.load_generation;
        let tree = self.tree.clone();
        let tx = self.event_tx.clone();
        let timeout = self.request_timeout;
        tokio::spawn(async move {
            let listing = load_directory(tree.as_ref(), &path, timeout).await;
            let _ = tx.send(Event::DirectoryLoaded {
                generation,
                listing,
            });
        });
    }

    /// Re-fetch the current directory.
    pub fn reload(&mut self) {
        self.navigate(self.current_path.clone());
    }

    pub fn navigate_parent(&mut self) {
        if !self.current_path.is_root() {
            self.navigate(self.current_path.parent());
        }
    }

    /// Jump to the breadcrumb at `index` (0 is the root).
    pub fn navigate_breadcrumb(&mut self, index: usize) {
        if let Some(item) = self.breadcrumbs().get(index) {
            let path = RepoPath::parse(&item.path);
            self.navigate(path);
        }
    }

    pub fn breadcrumbs(&self) -> Vec<BreadcrumbItem> {
        breadcrumbs(&self.current_path)
    }

    /// Apply a finished directory load. Loads superseded by a later
    /// navigation are dropped.
    pub fn handle_directory_loaded(&mut self, generation: u64, listing: Listing) {
        if generation != self.load_generation {
            tracing::debug!(path = %listing.path, "dropping stale directory load");
            return;
        }
        self.loading = false;
        if listing.is_failed() {
            self.set_status_message(format!("Could not list {}", listing.path));
        }
        self.entries = listing.entries;
        self.refresh_rows();
    }

    // ── Search ───────────────────────────────────────────────────────────────

    pub fn is_search_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Replace the query and reschedule the search.
    pub fn set_query(&mut self, query: String) {
        self.query = query;
        if self.search.update_query(&self.query) == SearchUpdate::Cleared {
            self.search_results.clear();
            self.searching = false;
        }
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh_rows();
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    pub fn handle_search_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Started { generation } => {
                if self.search.is_current(generation) {
                    self.searching = true;
                    self.refresh_rows();
                }
            }
            SearchEvent::Finished {
                generation,
                outcome,
            } => {
                if !self.search.is_current(generation) {
                    tracing::debug!(query = %outcome.query, "dropping stale search result");
                    return;
                }
                self.apply_search_outcome(outcome);
            }
        }
    }

    fn apply_search_outcome(&mut self, outcome: SearchOutcome) {
        self.searching = false;
        let mut gaps = Vec::new();
        if !outcome.is_complete() {
            gaps.push(format!("{} folder(s) could not be read", outcome.failed));
        }
        if outcome.truncated > 0 {
            gaps.push(format!(
                "{} folder(s) below the depth limit skipped",
                outcome.truncated
            ));
        }
        if !gaps.is_empty() {
            self.set_status_message(format!("Search incomplete: {}", gaps.join(", ")));
        }
        self.search_results = outcome.entries;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh_rows();
    }

    // ── Rows & selection ─────────────────────────────────────────────────────

    /// Entries currently listed, after filtering and sorting.
    pub fn visible(&self) -> Vec<ListedEntry> {
        let source = if self.is_search_active() {
            &self.search_results
        } else {
            &self.entries
        };
        visible_entries(source, self.filter)
    }

    /// Whether the list shows the loading placeholder.
    pub fn is_busy(&self) -> bool {
        self.loading || self.searching
    }

    /// Rebuild the row list from the current state.
    pub fn refresh_rows(&mut self) {
        let mut rows = Vec::new();
        if !self.current_path.is_root() {
            rows.push(Row::Parent);
        }
        rows.extend(self.visible().into_iter().map(Row::Item));
        self.rows = rows;
        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.selected_index)
    }

    pub fn select_next(&mut self) {
        let len = self.rows.len();
        if len > 0 && self.selected_index < len - 1 {
            self.selected_index += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.rows.len().saturating_sub(1);
    }

    /// Keep the selected row inside a viewport of `visible_height` rows.
    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.refresh_rows();
    }

    /// Open the selected row: parent row and folders navigate, files preview.
    pub fn activate_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        match row {
            Row::Parent => self.navigate_parent(),
            Row::Item(item) if item.entry.is_folder() => {
                // Search results carry root-relative names.
                let base = if self.is_search_active() {
                    RepoPath::root()
                } else {
                    self.current_path.clone()
                };
                self.navigate(base.child(&item.entry.name));
            }
            Row::Item(item) => self.open_preview(item.entry),
        }
    }

    // ── Preview ──────────────────────────────────────────────────────────────

    pub fn open_preview(&mut self, entry: Entry) {
        let kind = preview_kind(&entry.name);
        self.preview_generation += 1;
        self.mode = AppMode::Preview;

        if !kind.is_text() {
            self.preview = Some(PreviewState {
                lines: metadata_card(&entry, kind),
                entry,
                kind,
                content: None,
                loading: false,
                failed: false,
                scroll_offset: 0,
            });
            return;
        }

        let locator = entry.download_url.clone();
        self.preview = Some(PreviewState {
            entry,
            kind,
            content: None,
            loading: locator.is_some(),
            failed: locator.is_none(),
            lines: Vec::new(),
            scroll_offset: 0,
        });

        let Some(locator) = locator else {
            return;
        };
        let generation = self.preview_generation;
        let tree = self.tree.clone();
        let tx = self.event_tx.clone();
        let timeout = self.request_timeout;
        tokio::spawn(async move {
            let text = match with_timeout(timeout, tree.fetch_raw_content(&locator)).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!(%locator, error = %e, "failed to fetch content");
                    None
                }
            };
            let _ = tx.send(Event::ContentLoaded { generation, text });
        });
    }

    pub fn handle_content_loaded(&mut self, generation: u64, text: Option<String>) {
        if generation != self.preview_generation {
            return;
        }
        let Some(preview) = self.preview.as_mut() else {
            return;
        };
        preview.loading = false;
        match text {
            Some(text) => {
                preview.lines = highlight_content(
                    &text,
                    &preview.entry.name,
                    &self.syntax_set,
                    &self.syntax_theme,
                    self.max_preview_bytes,
                );
                preview.content = Some(text);
            }
            None => {
                preview.failed = true;
                preview.lines.clear();
            }
        }
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
        self.preview_generation += 1;
        self.mode = AppMode::Normal;
    }

    pub fn scroll_preview(&mut self, delta: isize) {
        if let Some(preview) = self.preview.as_mut() {
            let max = preview.lines.len().saturating_sub(1);
            let next = preview.scroll_offset as isize + delta;
            preview.scroll_offset = next.clamp(0, max as isize) as usize;
        }
    }

    pub fn scroll_preview_to(&mut self, top: bool) {
        if let Some(preview) = self.preview.as_mut() {
            preview.scroll_offset = if top {
                0
            } else {
                preview.lines.len().saturating_sub(1)
            };
        }
    }

    /// Save the previewed content into `dest_dir`.
    pub fn save_preview_to(&mut self, dest_dir: &Path) {
        let Some(preview) = self.preview.as_ref() else {
            return;
        };
        let Some(content) = preview.content.as_deref() else {
            self.set_status_message("Nothing to save yet".to_string());
            return;
        };
        let msg = match save_download(dest_dir, &preview.entry.name, content) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                format!("Save failed: {}", e)
            }
        };
        self.set_status_message(msg);
    }

    // ── Help & misc ──────────────────────────────────────────────────────────

    pub fn toggle_help(&mut self) {
        self.mode = if self.mode == AppMode::Help {
            AppMode::Normal
        } else {
            self.help_scroll = 0;
            AppMode::Help
        };
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
