use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::app::Row;
use crate::theme::ThemeColors;
use crate::tree::listing::{display_parts, format_modified, format_size};

const SIZE_WIDTH: usize = 10;
const MODIFIED_WIDTH: usize = 12;

/// File list widget: one row per entry with size and modification date.
pub struct FileListWidget<'a> {
    rows: &'a [Row],
    selected: usize,
    scroll_offset: usize,
    busy: bool,
    theme: &'a ThemeColors,
    use_icons: bool,
    block: Option<Block<'a>>,
}

impl<'a> FileListWidget<'a> {
    pub fn new(rows: &'a [Row], theme: &'a ThemeColors, use_icons: bool) -> Self {
        Self {
            rows,
            selected: 0,
            scroll_offset: 0,
            busy: false,
            theme,
            use_icons,
            block: None,
        }
    }

    pub fn selection(mut self, selected: usize, scroll_offset: usize) -> Self {
        self.selected = selected;
        self.scroll_offset = scroll_offset;
        self
    }

    /// Show the loading placeholder instead of rows.
    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn header(&self, width: usize) -> Line<'static> {
        let name_width = width.saturating_sub(SIZE_WIDTH + MODIFIED_WIDTH);
        Line::from(Span::styled(
            format!(
                "{:<name_width$}{:>SIZE_WIDTH$}{:>MODIFIED_WIDTH$}",
                "Name", "Size", "Modified"
            ),
            Style::default()
                .fg(self.theme.dim_fg)
                .add_modifier(Modifier::BOLD),
        ))
    }

    fn row_line(&self, row: &Row, width: usize, is_selected: bool) -> Line<'static> {
        let name_width = width.saturating_sub(SIZE_WIDTH + MODIFIED_WIDTH);
        let dim = Style::default().fg(self.theme.dim_fg);

        let mut spans = match row {
            Row::Parent => {
                let icon = if self.use_icons { "󰁍 " } else { "[..] " };
                vec![Span::styled(
                    format!("{}..", icon),
                    Style::default().fg(self.theme.folder_fg),
                )]
            }
            Row::Item(item) => {
                let (leaf, parent) = display_parts(&item.entry.name);
                let mut style = Style::default().fg(self.theme.category_fg(item.category));
                if item.entry.is_folder() {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let mut spans = vec![Span::styled(
                    format!("{}{}", item.category.icon(self.use_icons), leaf),
                    style,
                )];
                if let Some(parent) = parent {
                    spans.push(Span::styled(format!("  {}", parent), dim));
                }
                let used: usize = spans.iter().map(|s| s.width()).sum();
                spans.push(Span::raw(" ".repeat(name_width.saturating_sub(used))));
                let size = item.entry.size.map(format_size).unwrap_or_else(|| "-".into());
                spans.push(Span::styled(format!("{:>SIZE_WIDTH$}", size), dim));
                spans.push(Span::styled(
                    format!("{:>MODIFIED_WIDTH$}", format_modified(&item.entry.modified)),
                    dim,
                ));
                spans
            }
        };

        if is_selected {
            let used: usize = spans.iter().map(|s| s.width()).sum();
            if used < width {
                spans.push(Span::raw(" ".repeat(width - used)));
            }
            let highlight = Style::default()
                .bg(self.theme.list_selected_bg)
                .fg(self.theme.list_selected_fg)
                .add_modifier(Modifier::BOLD);
            spans = spans
                .into_iter()
                .map(|s| {
                    let style = s.style.patch(highlight);
                    Span::styled(s.content, style)
                })
                .collect();
        }
        Line::from(spans)
    }

    fn render_centered(&self, lines: &[Line], area: Rect, buf: &mut Buffer) {
        let top = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as u16;
            if y >= area.y + area.height {
                break;
            }
            let x = area.x + area.width.saturating_sub(line.width() as u16) / 2;
            buf.set_line(x, y, line, area.width);
        }
    }
}

impl<'a> Widget for FileListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }
        let width = inner.width as usize;

        buf.set_line(inner.x, inner.y, &self.header(width), inner.width);
        let body = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );
        if body.height == 0 {
            return;
        }

        if self.busy {
            let line = Line::from(Span::styled(
                "Loading files...",
                Style::default().fg(self.theme.dim_fg),
            ));
            self.render_centered(&[line], body, buf);
            return;
        }

        let has_items = self.rows.iter().any(|r| matches!(r, Row::Item(_)));
        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(body.height as usize);
        for (i, (idx, row)) in visible.enumerate() {
            let line = self.row_line(row, width, idx == self.selected);
            buf.set_line(body.x, body.y + i as u16, &line, body.width);
        }

        if !has_items {
            let used = self.rows.len().saturating_sub(self.scroll_offset) as u16;
            let rest = Rect::new(
                body.x,
                body.y + used,
                body.width,
                body.height.saturating_sub(used),
            );
            let lines = [
                Line::from(Span::styled(
                    "No files found",
                    Style::default()
                        .fg(self.theme.list_fg)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Try adjusting your search or filter criteria",
                    Style::default().fg(self.theme.dim_fg),
                )),
            ];
            self.render_centered(&lines, rest, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;
    use crate::tree::classify::CategoryFilter;
    use crate::tree::entry::Entry;
    use crate::tree::listing::visible_entries;
    use chrono::{DateTime, Utc};

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-12T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn rows(entries: &[Entry], with_parent: bool) -> Vec<Row> {
        let mut rows = Vec::new();
        if with_parent {
            rows.push(Row::Parent);
        }
        rows.extend(
            visible_entries(entries, CategoryFilter::All)
                .into_iter()
                .map(Row::Item),
        );
        rows
    }

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_header_and_entries() {
        let entries = vec![
            Entry::file("1", "readme.md", 2150, ts()),
            Entry::folder("2", "Documents", ts()),
        ];
        let rows = rows(&entries, false);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&rows, &tc, false).render(area, &mut buf);

        assert!(row_text(&buf, 0, 60).contains("Name"));
        assert!(row_text(&buf, 0, 60).contains("Modified"));
        assert!(row_text(&buf, 1, 60).contains("Documents"));
        let readme = row_text(&buf, 2, 60);
        assert!(readme.contains("readme.md"));
        assert!(readme.contains("2.1 KB"));
        assert!(readme.contains("2024-03-12"));
    }

    #[test]
    fn selected_row_is_highlighted() {
        let entries = vec![Entry::folder("1", "a", ts()), Entry::folder("2", "b", ts())];
        let rows = rows(&entries, false);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&rows, &tc, false)
            .selection(1, 0)
            .render(area, &mut buf);
        assert_eq!(buf.cell((0, 2)).unwrap().bg, tc.list_selected_bg);
        assert_ne!(buf.cell((0, 1)).unwrap().bg, tc.list_selected_bg);
    }

    #[test]
    fn parent_row_and_qualified_names() {
        let entries = vec![Entry::file("1", "Documents/report.pdf", 1_572_864, ts())];
        let rows = rows(&entries, true);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 70, 4);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&rows, &tc, false).render(area, &mut buf);

        assert!(row_text(&buf, 1, 70).contains(".."));
        let line = row_text(&buf, 2, 70);
        assert!(line.contains("report.pdf"));
        assert!(line.contains("Documents"));
        assert!(line.contains("1.5 MB"));
    }

    #[test]
    fn busy_shows_loading() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&[], &tc, false)
            .busy(true)
            .render(area, &mut buf);
        let all: String = (0..5).map(|y| row_text(&buf, y, 40)).collect();
        assert!(all.contains("Loading files..."));
    }

    #[test]
    fn empty_list_shows_hint() {
        let tc = theme::dark_theme();
        let rows = vec![Row::Parent];
        let area = Rect::new(0, 0, 50, 8);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&rows, &tc, false).render(area, &mut buf);
        let all: String = (0..8).map(|y| row_text(&buf, y, 50)).collect();
        assert!(all.contains(".."));
        assert!(all.contains("No files found"));
    }

    #[test]
    fn zero_area_does_not_panic() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&[], &tc, true).render(area, &mut buf);
    }
}
