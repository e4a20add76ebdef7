use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;
use crate::tree::path::BreadcrumbItem;

const SEPARATOR: &str = " › ";

/// Breadcrumb trail for the current directory.
pub struct BreadcrumbWidget<'a> {
    items: &'a [BreadcrumbItem],
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> BreadcrumbWidget<'a> {
    pub fn new(items: &'a [BreadcrumbItem], theme: &'a ThemeColors) -> Self {
        Self {
            items,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let last = self.items.len().saturating_sub(1);
        let mut spans = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(self.theme.dim_fg)));
            }
            // Digit that jumps here.
            if i < 9 {
                spans.push(Span::styled(
                    format!("{}:", i + 1),
                    Style::default().fg(self.theme.dim_fg),
                ));
            }
            let style = if i == last {
                Style::default()
                    .fg(self.theme.accent_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.folder_fg)
            };
            spans.push(Span::styled(item.name.clone(), style));
        }
        spans
    }
}

impl<'a> Widget for BreadcrumbWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut spans = self.spans();
        // Drop leading crumbs until the trail fits, keeping the current one.
        let mut dropped = false;
        while spans.iter().map(|s| s.width()).sum::<usize>() + 2 > inner.width as usize
            && spans.len() > 3
        {
            let cut = spans
                .iter()
                .skip(1)
                .position(|s| s.content == SEPARATOR)
                .map(|p| p + 1)
                .unwrap_or(spans.len() - 1);
            spans.drain(..cut);
            if spans.first().map(|s| s.content == SEPARATOR).unwrap_or(false) {
                spans.remove(0);
            }
            dropped = true;
        }
        if dropped {
            spans.insert(0, Span::styled("… ", Style::default().fg(self.theme.dim_fg)));
        }

        buf.set_line(inner.x + 1, inner.y, &Line::from(spans), inner.width.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::path::breadcrumbs_for;
    use ratatui::widgets::Borders;

    fn row(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_trail_with_root_label() {
        let items = breadcrumbs_for("/Documents/Work");
        let tc = crate::theme::dark_theme();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        BreadcrumbWidget::new(&items, &tc)
            .block(Block::default().borders(Borders::ALL).title(" demo/files "))
            .render(area, &mut buf);

        assert!(row(&buf, 0, 60).contains("demo/files"));
        let trail = row(&buf, 1, 60);
        assert!(trail.contains("1:Home"));
        assert!(trail.contains("2:Documents"));
        assert!(trail.contains("3:Work"));
    }

    #[test]
    fn current_crumb_is_highlighted() {
        let items = breadcrumbs_for("/Images");
        let tc = crate::theme::dark_theme();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        BreadcrumbWidget::new(&items, &tc).render(area, &mut buf);
        let text = row(&buf, 0, 40);
        let byte = text.find("Images").unwrap();
        let x = text[..byte].chars().count() as u16;
        assert_eq!(buf.cell((x, 0)).unwrap().fg, tc.accent_fg);
    }

    #[test]
    fn narrow_area_keeps_current_crumb() {
        let items = breadcrumbs_for("/alpha/beta/gamma/delta");
        let tc = crate::theme::dark_theme();
        let area = Rect::new(0, 0, 24, 1);
        let mut buf = Buffer::empty(area);
        BreadcrumbWidget::new(&items, &tc).render(area, &mut buf);
        let text = row(&buf, 0, 24);
        assert!(text.contains("delta"));
        assert!(!text.contains("Home"));
    }
}
