//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`OWNER/REPO`, `--depth`, `--no-icons`, `--log-level`)
//! 2. Explicit `--config` file
//! 3. `$REX_CONFIG` environment variable (path to config file)
//! 4. Project-local `.rex.toml` in the current working directory
//! 5. Global `~/.config/rex/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::remote::github::{DEFAULT_API_BASE, DEFAULT_HISTORY_CONCURRENCY};
use crate::tree::collector::{CollectOptions, DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH};

// ── Section configs ──────────────────────────────────────────────────────────

/// Which repository to explore and how to reach it.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// Base URL of the contents API.
    pub api_base: Option<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Maximum history (last-commit) lookups in flight per listing.
    pub history_concurrency: Option<usize>,
}

/// Search settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a search starts, in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Deepest directory level the collector will list.
    pub max_depth: Option<usize>,
    /// Maximum directory listings in flight during a search.
    pub concurrency: Option<usize>,
}

/// File list settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Preview overlay settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PreviewConfig {
    /// Syntax highlighting theme (syntect theme name).
    pub syntax_theme: Option<String>,
    /// Content beyond this many bytes is cut off in the preview.
    pub max_preview_bytes: Option<usize>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark" or "light".
    pub scheme: Option<String>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "info" or "repo_explorer_tui=debug".
    pub level: Option<String>,
    /// Log file path.
    pub file: Option<PathBuf>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub search: SearchConfig,
    pub tree: TreeConfig,
    pub preview: PreviewConfig,
    pub theme: ThemeConfig,
    pub logging: LoggingConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

pub const DEFAULT_OWNER: &str = "lxhapp";
pub const DEFAULT_REPO: &str = "files";
/// Default per-request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
/// Default search debounce interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Default preview cutoff (1 MiB).
pub const DEFAULT_MAX_PREVIEW_BYTES: usize = 1_048_576;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("REX_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".rex.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("rex").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. `Ok(None)` when the file
/// doesn't exist; `Err` carries a readable parse failure.
fn load_file(path: &Path) -> std::result::Result<Option<AppConfig>, String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Ok(None);
    };
    toml::from_str::<AppConfig>(&content)
        .map(Some)
        .map_err(|e| format!("skipping config file {}: {}", path.display(), e))
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            remote: RemoteConfig {
                owner: other.remote.owner.clone().or(self.remote.owner),
                repo: other.remote.repo.clone().or(self.remote.repo),
                api_base: other.remote.api_base.clone().or(self.remote.api_base),
                request_timeout_ms: other
                    .remote
                    .request_timeout_ms
                    .or(self.remote.request_timeout_ms),
                history_concurrency: other
                    .remote
                    .history_concurrency
                    .or(self.remote.history_concurrency),
            },
            search: SearchConfig {
                debounce_ms: other.search.debounce_ms.or(self.search.debounce_ms),
                max_depth: other.search.max_depth.or(self.search.max_depth),
                concurrency: other.search.concurrency.or(self.search.concurrency),
            },
            tree: TreeConfig {
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            preview: PreviewConfig {
                syntax_theme: other
                    .preview
                    .syntax_theme
                    .clone()
                    .or(self.preview.syntax_theme),
                max_preview_bytes: other
                    .preview
                    .max_preview_bytes
                    .or(self.preview.max_preview_bytes),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
            },
            logging: LoggingConfig {
                level: other.logging.level.clone().or(self.logging.level),
                file: other.logging.file.clone().or(self.logging.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    ///
    /// Unparsable files are skipped. Their errors are returned alongside the
    /// config so they can be logged once logging is up.
    pub fn load(
        cli_config_path: Option<&Path>,
        cli_overrides: Option<&AppConfig>,
    ) -> (AppConfig, Vec<String>) {
        let mut config = AppConfig::default();
        let mut warnings = Vec::new();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        let paths = candidate_paths()
            .into_iter()
            .rev()
            .chain(cli_config_path.map(Path::to_path_buf));
        for path in paths {
            match load_file(&path) {
                Ok(Some(file_cfg)) => config = config.merge(&file_cfg),
                Ok(None) => {}
                Err(warning) => warnings.push(warning),
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        (config, warnings)
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn owner(&self) -> &str {
        self.remote.owner.as_deref().unwrap_or(DEFAULT_OWNER)
    }

    pub fn repo(&self) -> &str {
        self.remote.repo.as_deref().unwrap_or(DEFAULT_REPO)
    }

    pub fn api_base(&self) -> &str {
        self.remote.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.remote
                .request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn history_concurrency(&self) -> usize {
        self.remote
            .history_concurrency
            .unwrap_or(DEFAULT_HISTORY_CONCURRENCY)
            .max(1)
    }

    /// Search debounce interval.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn max_depth(&self) -> usize {
        self.search.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn concurrency(&self) -> usize {
        self.search.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    /// Collector options assembled from the search and remote sections.
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            max_depth: self.max_depth(),
            concurrency: self.concurrency(),
            request_timeout: self.request_timeout(),
        }
    }

    /// Whether to use nerd font icons.
    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    /// Syntax highlighting theme name.
    pub fn syntax_theme_name(&self) -> &str {
        self.preview
            .syntax_theme
            .as_deref()
            .unwrap_or("base16-ocean.dark")
    }

    pub fn max_preview_bytes(&self) -> usize {
        self.preview
            .max_preview_bytes
            .unwrap_or(DEFAULT_MAX_PREVIEW_BYTES)
    }

    /// Theme scheme: "dark" or "light".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path; falls back to the platform data directory.
    pub fn log_file(&self) -> PathBuf {
        if let Some(path) = &self.logging.file {
            return path.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("rex")
            .join("rex.log")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.owner(), "lxhapp");
        assert_eq!(cfg.repo(), "files");
        assert_eq!(cfg.api_base(), "https://api.github.com");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.history_concurrency(), 4);
        assert_eq!(cfg.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.max_depth(), 5);
        assert_eq!(cfg.concurrency(), 4);
        assert!(cfg.use_icons());
        assert_eq!(cfg.syntax_theme_name(), "base16-ocean.dark");
        assert_eq!(cfg.max_preview_bytes(), 1_048_576);
        assert_eq!(cfg.theme_scheme(), "dark");
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.log_file().ends_with("rex/rex.log"));
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[remote]
owner = "rust-lang"
repo = "book"
api_base = "http://localhost:8080"
request_timeout_ms = 2500
history_concurrency = 2

[search]
debounce_ms = 150
max_depth = 3
concurrency = 8

[tree]
use_icons = false

[preview]
syntax_theme = "Solarized (dark)"
max_preview_bytes = 4096

[theme]
scheme = "light"

[logging]
level = "debug"
file = "/tmp/rex-test.log"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.owner(), "rust-lang");
        assert_eq!(cfg.repo(), "book");
        assert_eq!(cfg.api_base(), "http://localhost:8080");
        assert_eq!(cfg.request_timeout(), Duration::from_millis(2500));
        assert_eq!(cfg.history_concurrency(), 2);
        assert_eq!(cfg.debounce(), Duration::from_millis(150));
        assert_eq!(cfg.max_depth(), 3);
        assert_eq!(cfg.concurrency(), 8);
        assert!(!cfg.use_icons());
        assert_eq!(cfg.syntax_theme_name(), "Solarized (dark)");
        assert_eq!(cfg.max_preview_bytes(), 4096);
        assert_eq!(cfg.theme_scheme(), "light");
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.log_file(), PathBuf::from("/tmp/rex-test.log"));
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[search]
max_depth = 2
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.max_depth(), 2);
        assert_eq!(cfg.concurrency(), 4);
        assert_eq!(cfg.owner(), "lxhapp");
    }

    #[test]
    fn test_collect_options_follow_config() {
        let cfg = AppConfig {
            search: SearchConfig {
                max_depth: Some(2),
                concurrency: Some(1),
                ..Default::default()
            },
            remote: RemoteConfig {
                request_timeout_ms: Some(500),
                ..Default::default()
            },
            ..Default::default()
        };
        let opts = cfg.collect_options();
        assert_eq!(opts.max_depth, 2);
        assert_eq!(opts.concurrency, 1);
        assert_eq!(opts.request_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            remote: RemoteConfig {
                owner: Some("a".into()),
                repo: Some("b".into()),
                ..Default::default()
            },
            search: SearchConfig {
                max_depth: Some(5),
                concurrency: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };

        let over = AppConfig {
            remote: RemoteConfig {
                owner: Some("c".into()),
                ..Default::default()
            },
            search: SearchConfig {
                max_depth: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.owner(), "c");
        assert_eq!(merged.repo(), "b");
        assert_eq!(merged.max_depth(), 3);
        assert_eq!(merged.concurrency(), 2);
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            tree: TreeConfig {
                use_icons: Some(false),
            },
            theme: ThemeConfig {
                scheme: Some("light".into()),
            },
            ..Default::default()
        };

        let merged = base.merge(&AppConfig::default());
        assert!(!merged.use_icons());
        assert_eq!(merged.theme_scheme(), "light");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[remote]
owner = "octo"

[search]
debounce_ms = 50
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load").expect("present");
        assert_eq!(cfg.owner(), "octo");
        assert_eq!(cfg.debounce(), Duration::from_millis(50));
        assert_eq!(cfg.repo(), "files");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_file(Path::new("/nonexistent/config.toml")),
            Ok(None)
        ));
    }

    #[test]
    fn test_load_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        let err = load_file(&cfg_path).unwrap_err();
        assert!(err.contains("bad.toml"));
    }

    #[test]
    fn test_load_skips_invalid_file_and_returns_warning() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("broken.toml");
        std::fs::write(&cfg_path, "[search\nmax_depth = 2").expect("write");

        let (cfg, warnings) = AppConfig::load(Some(&cfg_path), None);
        assert_eq!(cfg.max_depth(), 5);
        assert!(warnings.iter().any(|w| w.contains("broken.toml")));
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[remote]
owner = "from-file"
repo = "kept"

[search]
max_depth = 4
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            remote: RemoteConfig {
                owner: Some("from-cli".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let (cfg, _) = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.owner(), "from-cli");
        assert_eq!(cfg.repo(), "kept");
        assert_eq!(cfg.max_depth(), 4);
    }
}
