//! Diagnostic logging.
//!
//! stdout carries command results (JSON documents, listings), so every
//! `log!` line goes to stderr:
//!
//! ```ignore
//! log!("posts"; "loaded {} posts from {}", count, dir.display());
//! ```
//!
//! Lines read `[module] message`. On a terminal the line is cut to the
//! terminal width; redirected output is never truncated.

use colored::{Color, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::io::{IsTerminal, Write, stderr};

/// Prefix colour of each module that logs.
const MODULE_COLORS: &[(&str, Color)] = &[
    ("posts", Color::BrightCyan),
    ("fallback", Color::BrightGreen),
    ("patterns", Color::BrightBlue),
    ("tags", Color::BrightMagenta),
];

const DEFAULT_COLOR: Color = Color::BrightYellow;

/// Columns assumed when the terminal size cannot be read.
const FALLBACK_WIDTH: usize = 120;

/// Log a formatted message to stderr under a module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

pub fn log(module: &str, message: &str) {
    let width = stderr()
        .is_terminal()
        .then(|| size().map_or(FALLBACK_WIDTH, |(cols, _)| cols as usize));

    let mut out = stderr().lock();
    if width.is_some() {
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
    }
    writeln!(out, "{}", render(module, message, width)).ok();
}

fn module_color(module: &str) -> Color {
    MODULE_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(module))
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}

/// Format one line; `width` is the terminal width, if any.
fn render(module: &str, message: &str, width: Option<usize>) -> String {
    let prefix = format!("[{module}]");
    let message = match width {
        Some(width) => fit(message, width.saturating_sub(prefix.len() + 1)),
        None => message,
    };
    format!("{} {message}", prefix.color(module_color(module)).bold())
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn fit(s: &str, max: usize) -> &str {
    let end = s
        .char_indices()
        .map(|(start, c)| start + c.len_utf8())
        .take_while(|&end| end <= max)
        .last()
        .unwrap_or(0);
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("hello", 10), "hello");
        assert_eq!(fit("hello world", 5), "hello");
        assert_eq!(fit("hello", 0), "");
        assert_eq!(fit("", 3), "");
    }

    #[test]
    fn test_fit_backs_off_to_char_boundary() {
        // "你" is 3 bytes
        assert_eq!(fit("你好", 4), "你");
        assert_eq!(fit("a你b", 3), "a");
    }

    #[test]
    fn test_module_color() {
        assert_eq!(module_color("posts"), Color::BrightCyan);
        assert_eq!(module_color("Fallback"), Color::BrightGreen);
        assert_eq!(module_color("other"), DEFAULT_COLOR);
    }

    #[test]
    fn test_render_keeps_message_when_redirected() {
        let long = "x".repeat(500);
        let line = render("posts", &long, None);

        assert!(line.contains("[posts]"));
        assert!(line.ends_with(&format!(" {long}")));
    }

    #[test]
    fn test_render_cuts_to_terminal_width() {
        // "[posts] " takes 8 columns
        let line = render("posts", "hello world", Some(13));
        assert!(line.ends_with(" hello"));
    }
}
