use colored::{Color, Colorize};

use crate::cli::output::{current_preferences, use_color};

#[derive(Clone)]
pub struct UiStyle {
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Color,
    pub color_total: Color,
}

impl UiStyle {
    pub fn detect() -> Self {
        let prefs = current_preferences();
        Self {
            horizontal: '─',
            use_color: use_color(&prefs),
            color_header: Color::BrightBlue,
            color_total: Color::Cyan,
        }
    }

    /// Colourless style for deterministic rendering.
    pub fn plain() -> Self {
        Self {
            use_color: false,
            ..Self::detect()
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(20))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if self.use_color {
            text.color(self.color_header).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn apply_total_style(&self, text: &str) -> String {
        if self.use_color {
            text.color(self.color_total).bold().to_string()
        } else {
            text.to_string()
        }
    }
}
