mod app;
mod components;
mod config;
mod download;
mod error;
mod event;
mod handler;
mod logging;
mod preview_content;
mod remote;
mod theme;
mod tree;
mod tui;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::{AppConfig, LoggingConfig, RemoteConfig, SearchConfig, TreeConfig};
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::remote::github::GitHubTree;
use crate::remote::memory::MemoryTree;
use crate::remote::RemoteTree;
use crate::tree::path::RepoPath;
use crate::tui::{install_panic_hook, Tui};

/// Browse and search a remote repository tree from the terminal.
#[derive(Parser, Debug)]
#[command(name = "rex", version, about)]
struct Cli {
    /// Repository to explore, as OWNER/REPO
    repository: Option<String>,

    /// Directory to open first
    #[arg(long, default_value = "/")]
    path: String,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Browse a built-in sample tree instead of a remote repository
    #[arg(long)]
    demo: bool,

    /// Use ASCII tags instead of Nerd Font icons
    #[arg(long)]
    no_icons: bool,

    /// Deepest folder level searched
    #[arg(long)]
    depth: Option<usize>,

    /// Log filter, e.g. "debug" or "repo_explorer_tui=trace"
    #[arg(long)]
    log_level: Option<String>,
}

/// Split an `OWNER/REPO` argument.
fn parse_repository(arg: &str) -> error::Result<(String, String)> {
    match arg.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AppError::InvalidPath(format!(
            "expected OWNER/REPO, got {:?}",
            arg
        ))),
    }
}

impl Cli {
    /// CLI flags as a config layer that wins over every file.
    fn overrides(&self) -> error::Result<AppConfig> {
        let (owner, repo) = match &self.repository {
            Some(arg) => {
                let (owner, repo) = parse_repository(arg)?;
                (Some(owner), Some(repo))
            }
            None => (None, None),
        };
        Ok(AppConfig {
            remote: RemoteConfig {
                owner,
                repo,
                ..Default::default()
            },
            search: SearchConfig {
                max_depth: self.depth,
                ..Default::default()
            },
            tree: TreeConfig {
                use_icons: if self.no_icons { Some(false) } else { None },
            },
            logging: LoggingConfig {
                level: self.log_level.clone(),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    let overrides = cli.overrides()?;
    let (config, config_warnings) = AppConfig::load(cli.config.as_deref(), Some(&overrides));

    let _log_guard = logging::init_logging(&config.log_file(), config.log_level())?;
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let tree: Arc<dyn RemoteTree> = if cli.demo {
        Arc::new(MemoryTree::sample())
    } else {
        Arc::new(GitHubTree::new(
            config.api_base(),
            config.owner(),
            config.repo(),
            config.request_timeout(),
        )?
        .with_history_concurrency(config.history_concurrency()))
    };
    tracing::info!(repo = %tree.label(), path = %cli.path, "starting");

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut events = EventHandler::new(Duration::from_millis(16));
    let mut app = App::new(tree, &config, events.sender());
    app.navigate(RepoPath::parse(&cli.path));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
            Event::DirectoryLoaded {
                generation,
                listing,
            } => app.handle_directory_loaded(generation, listing),
            Event::Search(event) => app.handle_search_event(event),
            Event::ContentLoaded { generation, text } => {
                app.handle_content_loaded(generation, text)
            }
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    tracing::info!("exiting");
    Ok(())
}
