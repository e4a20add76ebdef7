use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::theme::ThemeColors;
use crate::tree::classify::CategoryFilter;

/// Search input with the active type filter on the right.
pub struct SearchBarWidget<'a> {
    query: &'a str,
    filter: CategoryFilter,
    focused: bool,
    searching: bool,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(query: &'a str, filter: CategoryFilter, theme: &'a ThemeColors) -> Self {
        Self {
            query,
            filter,
            focused: false,
            searching: false,
            theme,
            block: None,
        }
    }

    /// Whether keystrokes currently go to the query.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn searching(mut self, searching: bool) -> Self {
        self.searching = searching;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = block.into();
        self
    }
}

impl<'a> Widget for SearchBarWidget<'a> {
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

        let mut right = Vec::new();
        if self.searching {
            right.push(Span::styled(
                "searching… ",
                Style::default().fg(self.theme.info_fg),
            ));
        }
        right.push(Span::styled(
            "Filter: ",
            Style::default().fg(self.theme.dim_fg),
        ));
        right.push(Span::styled(
            format!("{} ", self.filter.label()),
            Style::default()
                .fg(self.theme.accent_fg)
                .add_modifier(Modifier::BOLD),
        ));
        let right_width: u16 = right.iter().map(|s| s.width() as u16).sum();

        let mut left = vec![Span::styled(
            " / ",
            Style::default()
                .fg(self.theme.warning_fg)
                .add_modifier(Modifier::BOLD),
        )];
        if self.query.is_empty() && !self.focused {
            left.push(Span::styled(
                "Search files...",
                Style::default().fg(self.theme.dim_fg),
            ));
        } else {
            left.push(Span::styled(
                self.query.to_string(),
                Style::default().fg(self.theme.list_fg),
            ));
            if self.focused {
                left.push(Span::styled(
                    "█",
                    Style::default().fg(self.theme.accent_fg),
                ));
            }
        }

        let left_width = inner.width.saturating_sub(right_width + 1);
        buf.set_line(inner.x, inner.y, &Line::from(left), left_width);
        if right_width < inner.width {
            let x = inner.x + inner.width - right_width;
            buf.set_line(x, inner.y, &Line::from(right), right_width);
        }
    }
}
