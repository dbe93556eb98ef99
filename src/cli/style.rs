use std::io::IsTerminal;

use colored::{Color, Colorize};

/// Terminal styling decided once per run from config, TTY detection and `NO_COLOR`.
#[derive(Debug, Clone)]
pub struct UiStyle {
    pub header_prefix: String,
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Option<Color>,
    pub plain_mode: bool,
}

impl UiStyle {
    pub fn detect(color_enabled: bool, plain_requested: bool) -> Self {
        let stdout_tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let use_color = stdout_tty && color_enabled && !plain_requested && !no_color;
        Self::new(use_color, plain_requested)
    }

    pub fn new(use_color: bool, plain_mode: bool) -> Self {
        colored::control::set_override(use_color);
        Self {
            header_prefix: if plain_mode { "> ".into() } else { "⮞ ".into() },
            horizontal: if plain_mode { '-' } else { '─' },
            use_color,
            color_header: if use_color {
                Some(Color::BrightBlue)
            } else {
                None
            },
            plain_mode,
        }
    }

    pub fn plain() -> Self {
        Self::new(false, true)
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(40))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if self.use_color {
            match self.color_header {
                Some(color) => text.color(color).bold().to_string(),
                None => text.bold().to_string(),
            }
        } else {
            text.to_string()
        }
    }

    /// Red for negative balances, green otherwise.
    pub fn apply_balance_style(&self, text: &str, value: i64) -> String {
        if !self.use_color {
            return text.to_string();
        }
        if value < 0 {
            text.red().bold().to_string()
        } else {
            text.green().to_string()
        }
    }

    pub fn header(&self, title: &str) -> String {
        let prefixed = format!("{}{}", self.header_prefix, title);
        self.apply_header_style(&prefixed)
    }
}
