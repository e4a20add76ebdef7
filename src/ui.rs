use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, AppMode, Row};
use crate::components::breadcrumb::BreadcrumbWidget;
use crate::components::file_list::FileListWidget;
use crate::components::help::HelpOverlay;
use crate::components::preview::PreviewWidget;
use crate::components::search_bar::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let [crumbs_area, search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    // Borders and the column header.
    let visible_height = list_area.height.saturating_sub(3) as usize;
    app.update_scroll(visible_height);

    let theme = &app.theme;
    let border = |focused: bool| {
        let fg = if focused {
            theme.border_focused_fg
        } else {
            theme.border_fg
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fg))
    };

    let crumbs = app.breadcrumbs();
    frame.render_widget(
        BreadcrumbWidget::new(&crumbs, theme)
            .block(border(false).title(format!(" {} ", app.repo_label))),
        crumbs_area,
    );

    let search_focused = app.mode == AppMode::Search;
    frame.render_widget(
        SearchBarWidget::new(&app.query, app.filter, theme)
            .focused(search_focused)
            .searching(app.searching)
            .block(border(search_focused).title(" Search ")),
        search_area,
    );

    let list_title = if app.is_search_active() {
        " Results "
    } else {
        " Files "
    };
    frame.render_widget(
        FileListWidget::new(&app.rows, theme, app.use_icons)
            .selection(app.selected_index, app.scroll_offset)
            .busy(app.is_busy())
            .block(border(app.mode == AppMode::Normal).title(list_title)),
        list_area,
    );

    let location = format!("{}:{}", app.repo_label, app.current_path);
    let info = item_summary(app);
    let mut status = StatusBarWidget::new(&location, &info, theme);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg);
    }
    frame.render_widget(status, status_area);

    match app.mode {
        AppMode::Preview => {
            if let Some(preview) = &app.preview {
                frame.render_widget(PreviewWidget::new(preview, theme), area);
            }
        }
        AppMode::Help => frame.render_widget(HelpOverlay::new(theme, app.help_scroll), area),
        _ => {}
    }
}

fn item_summary(app: &App) -> String {
    let count = app
        .rows
        .iter()
        .filter(|row| matches!(row, Row::Item(_)))
        .count();
    let noun = if count == 1 { "item" } else { "items" };
    if app.is_search_active() {
        format!("{} {} matching \"{}\"", count, noun, app.query)
    } else {
        format!("{} {}", count, noun)
    }
}
