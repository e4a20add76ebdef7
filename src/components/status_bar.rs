use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

const KEY_HINTS: &str = " /:search  f:filter  ?:help  q:quit ";

/// Status bar widget: location, item count and key hints, or a transient
/// status message.
pub struct StatusBarWidget<'a> {
    location: &'a str,
    info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(location: &'a str, info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            location,
            info,
            theme,
            status_message: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str) -> Self {
        self.status_message = Some(msg);
        self
    }
}

/// Keep the last `budget` chars of `s`, prefixed with `...` when cut.
fn truncate_left(s: &str, budget: usize) -> String {
    let len = s.chars().count();
    if len <= budget {
        return s.to_string();
    }
    if budget <= 3 {
        return s.chars().take(budget).collect();
    }
    let tail: String = s.chars().skip(len - (budget - 3)).collect();
    format!("...{}", tail)
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;
        buf.set_style(
            area,
            Style::default()
                .bg(self.theme.status_bg)
                .fg(self.theme.status_fg),
        );

        if let Some(msg) = self.status_message {
            let display: String = msg.chars().take(width).collect();
            let line = Line::from(Span::styled(
                display,
                Style::default()
                    .fg(self.theme.warning_fg)
                    .add_modifier(Modifier::BOLD),
            ));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // [location] [info] ... [key_hints]
        let hints_len = KEY_HINTS.chars().count();
        let remaining = width.saturating_sub(hints_len);
        let info_len = self.info.chars().count();
        let location_budget = remaining.saturating_sub(info_len + 2);
        let location = truncate_left(self.location, location_budget);

        let mut spans = vec![
            Span::styled(
                format!(" {}", location),
                Style::default().fg(self.theme.status_fg),
            ),
            Span::raw(" "),
            Span::styled(self.info.to_string(), Style::default().fg(self.theme.info_fg)),
        ];

        let used: usize = spans.iter().map(|s| s.width()).sum();
        if used + hints_len <= width {
            spans.push(Span::raw(" ".repeat(width - used - hints_len)));
            spans.push(Span::styled(
                KEY_HINTS,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
