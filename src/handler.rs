use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, AppMode};
use crate::components::help::HelpOverlay;

/// Lines moved by PageUp / PageDown in the preview.
const PAGE_STEP: isize = 20;

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    match app.mode {
        AppMode::Normal => handle_normal_mode(app, key),
        AppMode::Search => handle_search_mode(app, key),
        AppMode::Preview => handle_preview_mode(app, key),
        AppMode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.activate_selected(),
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => app.navigate_parent(),
        KeyCode::Char('~') => app.navigate_breadcrumb(0),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(index) = c.to_digit(10) {
                app.navigate_breadcrumb(index as usize - 1);
            }
        }
        KeyCode::Char('/') => app.mode = AppMode::Search,
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('r') | KeyCode::F(5) => app.reload(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Esc if app.is_search_active() => app.set_query(String::new()),
        _ => {}
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.set_query(String::new());
            app.mode = AppMode::Normal;
        }
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => app.mode = AppMode::Normal,
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Char(c) => app.push_query_char(c),
        _ => {}
    }
}

fn handle_preview_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_preview(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_preview(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_preview(PAGE_STEP),
        KeyCode::PageUp => app.scroll_preview(-PAGE_STEP),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_preview_to(true),
        KeyCode::Char('G') | KeyCode::End => app.scroll_preview_to(false),
        KeyCode::Char('s') => {
            let dest = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            app.save_preview_to(&dest);
        }
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.toggle_help(),
        KeyCode::Char('j') | KeyCode::Down => {
            let max = HelpOverlay::total_lines().saturating_sub(1);
            app.help_scroll = (app.help_scroll + 1).min(max);
        }
        KeyCode::Char('k') | KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        _ => {}
    }
}
