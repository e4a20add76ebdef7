use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};

use crate::app::PreviewState;
use crate::theme::ThemeColors;

/// Preview overlay showing fetched content or a metadata card.
pub struct PreviewWidget<'a> {
    preview_state: &'a PreviewState,
    theme: &'a ThemeColors,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(preview_state: &'a PreviewState, theme: &'a ThemeColors) -> Self {
        Self {
            preview_state,
            theme,
        }
    }

    fn title(&self) -> Line<'static> {
        let entry = &self.preview_state.entry;
        let leaf = entry.leaf_name();
        let parent = entry.name.rsplit_once('/').map(|(parent, _)| parent);
        let mut spans = vec![Span::styled(
            format!(" {} ", leaf),
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(parent) = parent {
            spans.push(Span::styled(
                format!("in {} ", parent),
                Style::default().fg(self.theme.dim_fg),
            ));
        }
        spans.push(Span::styled(
            format!("[{}] ", self.preview_state.kind.label()),
            Style::default().fg(self.theme.info_fg),
        ));
        Line::from(spans)
    }
}

impl<'a> Widget for PreviewWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let overlay_width = (area.width as f32 * 0.85) as u16;
        let overlay_height = (area.height as f32 * 0.85) as u16;
        let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
        let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
        let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

        Clear.render(overlay_area, buf);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused_fg))
            .style(
                Style::default()
                    .bg(self.theme.preview_bg)
                    .fg(self.theme.preview_fg),
            );
        let inner = block.inner(overlay_area);
        block.render(overlay_area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let state = self.preview_state;
        let placeholder = if state.loading {
            Some(("Loading preview...", self.theme.dim_fg))
        } else if state.failed {
            Some(("Preview unavailable", self.theme.warning_fg))
        } else {
            None
        };
        if let Some((msg, fg)) = placeholder {
            let line = Line::from(Span::styled(msg, Style::default().fg(fg)));
            buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(1));
            return;
        }

        // Visible lines starting from scroll_offset
        let visible_height = inner.height as usize;
        let start = state.scroll_offset.min(state.lines.len());
        let end = (start + visible_height).min(state.lines.len());
        for (i, line) in state.lines[start..end].iter().enumerate() {
            let y = inner.y + i as u16;
            buf.set_line(inner.x + 1, y, line, inner.width.saturating_sub(1));
        }

        let total = state.lines.len();
        if total > visible_height {
            let indicator = format!(" {}/{} ", (start + 1).min(total), total);
            let ind_span = Span::styled(indicator, Style::default().fg(self.theme.dim_fg));
            let ind_x = overlay_area.x
                + overlay_area
                    .width
                    .saturating_sub(ind_span.width() as u16 + 1);
            let ind_y = overlay_area.y + overlay_area.height - 1;
            buf.set_span(ind_x, ind_y, &ind_span, ind_span.width() as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview_content::PreviewKind;
    use crate::theme;
    use crate::tree::entry::Entry;
    use chrono::Utc;

    fn state(name: &str, lines: Vec<Line<'static>>) -> PreviewState {
        PreviewState {
            entry: Entry::file("1", name, 10, Utc::now()),
            kind: PreviewKind::Text,
            content: None,
            loading: false,
            failed: false,
            lines,
            scroll_offset: 0,
        }
    }

    fn screen(buf: &Buffer, area: Rect) -> String {
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_preview_with_content() {
        let st = state(
            "notes.txt",
            vec![Line::from("line 1"), Line::from("line 2")],
        );
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
        let text = screen(&buf, area);
        assert!(text.contains("notes.txt"));
        assert!(text.contains("line 1"));
        assert!(text.contains("line 2"));
    }

    #[test]
    fn test_preview_scroll_offset() {
        let mut st = state(
            "notes.txt",
            vec![
                Line::from("line 1"),
                Line::from("line 2"),
                Line::from("line 3"),
            ],
        );
        st.scroll_offset = 1;
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
        let text = screen(&buf, area);
        assert!(!text.contains("line 1"));
        assert!(text.contains("line 3"));
    }

    #[test]
    fn test_title_shows_parent_folder() {
        let st = state("Projects/web/index.js", vec![]);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
        let text = screen(&buf, area);
        assert!(text.contains("index.js"));
        assert!(text.contains("in Projects/web"));
    }

    #[test]
    fn test_loading_and_failed_placeholders() {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 40, 10);

        let mut st = state("a.md", vec![]);
        st.loading = true;
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
        assert!(screen(&buf, area).contains("Loading preview..."));

        st.loading = false;
        st.failed = true;
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
        assert!(screen(&buf, area).contains("Preview unavailable"));
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let st = state("a.md", vec![Line::from("x")]);
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(&st, &tc).render(area, &mut buf);
    }
}
