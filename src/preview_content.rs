use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::tree::classify::extension;
use crate::tree::entry::Entry;
use crate::tree::listing::{format_modified, format_size};

/// How a file is shown in the preview overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Text,
    Image,
    Pdf,
    Binary,
}

impl PreviewKind {
    pub fn label(&self) -> &'static str {
        match self {
            PreviewKind::Text => "text",
            PreviewKind::Image => "image",
            PreviewKind::Pdf => "pdf",
            PreviewKind::Binary => "binary",
        }
    }

    /// Whether content is fetched and shown inline.
    pub fn is_text(&self) -> bool {
        matches!(self, PreviewKind::Text)
    }
}

/// Decide the preview kind from the file extension.
pub fn preview_kind(name: &str) -> PreviewKind {
    match extension(name).as_deref() {
        Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg") => PreviewKind::Image,
        Some("pdf") => PreviewKind::Pdf,
        Some(
            "js" | "jsx" | "ts" | "tsx" | "json" | "md" | "txt" | "html" | "css" | "scss" | "yml"
            | "yaml" | "rs" | "toml" | "py" | "go" | "java" | "cpp" | "c" | "h" | "sh" | "php",
        ) => PreviewKind::Text,
        _ => PreviewKind::Binary,
    }
}

/// Detect the syntax name for a file based on its extension.
pub fn detect_syntax_name(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("py") => "Python",
        Some("rs") => "Rust",
        Some("yaml" | "yml") => "YAML",
        Some("json") => "JSON",
        Some("toml") => "TOML",
        Some("sh" | "bash" | "zsh") => "Bash",
        Some("md" | "markdown") => "Markdown",
        Some("html" | "htm") => "HTML",
        Some("css" | "scss") => "CSS",
        Some("js" | "jsx") => "JavaScript",
        Some("ts" | "tsx") => "TypeScript",
        Some("c" | "h") => "C",
        Some("cpp" | "hpp" | "cc") => "C++",
        Some("java") => "Java",
        Some("go") => "Go",
        Some("php") => "PHP",
        _ => "Plain Text",
    }
}

/// Load a theme from the built-in theme set by name, with fallback.
pub fn load_theme(theme_name: &str) -> Theme {
    let ts = ThemeSet::load_defaults();
    ts.themes
        .get(theme_name)
        .or_else(|| ts.themes.get("base16-ocean.dark"))
        .cloned()
        .unwrap_or_default()
}

fn syntect_color_to_ratatui(c: syntect::highlighting::Color) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Cut `text` to at most `max_bytes`, on a char boundary.
/// Returns the kept prefix and whether anything was dropped.
pub fn truncate_for_preview(text: &str, max_bytes: usize) -> (&str, bool) {
    if text.len() <= max_bytes {
        return (text, false);
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    (&text[..end], true)
}

/// Syntax-highlight fetched content, returning styled lines for ratatui.
pub fn highlight_content(
    text: &str,
    file_name: &str,
    ss: &SyntaxSet,
    theme: &Theme,
    max_bytes: usize,
) -> Vec<Line<'static>> {
    let (text, truncated) = truncate_for_preview(text, max_bytes);

    let syntax = ss
        .find_syntax_by_name(detect_syntax_name(file_name))
        .or_else(|| extension(file_name).and_then(|ext| ss.find_syntax_by_extension(&ext)))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let mut highlighter = syntect::easy::HighlightLines::new(syntax, theme);
    let lines_text: Vec<&str> = text.lines().collect();
    let line_num_width = lines_text.len().max(1).to_string().len();

    let mut result_lines = Vec::with_capacity(lines_text.len() + 1);
    for (i, line_str) in lines_text.iter().enumerate() {
        let mut spans: Vec<Span<'static>> = Vec::new();

        let num = format!("{:>width$} │ ", i + 1, width = line_num_width);
        spans.push(Span::styled(num, Style::default().fg(Color::DarkGray)));

        match highlighter.highlight_line(line_str, ss) {
            Ok(ranges) => {
                for (style, text) in ranges {
                    let fg = syntect_color_to_ratatui(style.foreground);
                    spans.push(Span::styled(text.to_string(), Style::default().fg(fg)));
                }
            }
            Err(_) => spans.push(Span::raw(line_str.to_string())),
        }

        result_lines.push(Line::from(spans));
    }

    if result_lines.is_empty() {
        result_lines.push(Line::from(Span::styled(
            "(empty file)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if truncated {
        result_lines.push(Line::from(Span::styled(
            format!("… truncated at {}", format_size(max_bytes as u64)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    result_lines
}

/// Metadata card for files that are not shown inline.
pub fn metadata_card(entry: &Entry, kind: PreviewKind) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);
    let dim_style = Style::default().fg(Color::DarkGray);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {}: ", label), label_style),
            Span::styled(value, value_style),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        row("File", entry.leaf_name().to_string()),
        row("Kind", kind.label().to_string()),
        row("Size", entry.size.map(format_size).unwrap_or_else(|| "-".into())),
        row("Modified", format_modified(&entry.modified)),
    ];
    if let Some(url) = &entry.download_url {
        lines.push(row("Download", url.clone()));
    }
    if let Some(url) = &entry.html_url {
        lines.push(row("Web", url.clone()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  [{} file, open the link above to view]", kind.label()),
        dim_style,
    )));
    lines
}
