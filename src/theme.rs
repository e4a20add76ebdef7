//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::tree::classify::Category;

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // File list
    pub list_fg: Color,
    pub list_selected_bg: Color,
    pub list_selected_fg: Color,
    pub folder_fg: Color,
    pub image_fg: Color,
    pub document_fg: Color,
    pub code_fg: Color,
    pub other_fg: Color,

    // Preview overlay
    pub preview_bg: Color,
    pub preview_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,
    pub overlay_bg: Color,

    // Semantic colors (consistent across themes)
    pub warning_fg: Color,
    pub info_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

impl ThemeColors {
    /// Foreground used for an entry of the given category.
    pub fn category_fg(&self, category: Category) -> Color {
        match category {
            Category::Folder => self.folder_fg,
            Category::Image => self.image_fg,
            Category::Document => self.document_fg,
            Category::Code => self.code_fg,
            Category::Other => self.other_fg,
        }
    }
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        list_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        list_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        folder_fg: Color::Rgb(137, 180, 250),        // #89b4fa (blue)
        image_fg: Color::Rgb(245, 194, 231),         // #f5c2e7 (pink)
        document_fg: Color::Rgb(249, 226, 175),      // #f9e2af (yellow)
        code_fg: Color::Rgb(166, 227, 161),          // #a6e3a1 (green)
        other_fg: Color::Rgb(205, 214, 244),

        preview_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        preview_fg: Color::Rgb(205, 214, 244),

        status_bg: Color::Rgb(30, 30, 46),
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112),           // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250), // #89b4fa (blue)
        overlay_bg: Color::Rgb(49, 50, 68),           // #313244 (surface0)

        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(76, 79, 105),             // #4c4f69 (text)
        list_selected_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface1)
        list_selected_fg: Color::Rgb(76, 79, 105),
        folder_fg: Color::Rgb(30, 102, 245),          // #1e66f5 (blue)
        image_fg: Color::Rgb(234, 118, 203),          // #ea76cb (pink)
        document_fg: Color::Rgb(223, 142, 29),        // #df8e1d (yellow)
        code_fg: Color::Rgb(64, 160, 43),             // #40a02b (green)
        other_fg: Color::Rgb(76, 79, 105),

        preview_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        preview_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245),
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),
        overlay_bg: Color::Rgb(230, 233, 239), // #e6e9ef (surface0)

        warning_fg: Color::Rgb(223, 142, 29),
        info_fg: Color::Rgb(30, 102, 245),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),   // #9ca0b0 (overlay0)
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the palette for a scheme name. Unknown names fall back to dark.
pub fn resolve_theme(scheme: &str) -> ThemeColors {
    match scheme {
        "light" => light_theme(),
        _ => dark_theme(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
