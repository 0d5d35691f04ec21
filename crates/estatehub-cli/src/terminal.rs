// Rust guideline compliant 2026-10-12

//! Terminal helpers for the EstateHub CLI.
//!
//! Color detection, terminal width, word wrapping for long descriptions,
//! and ANSI painting for short labels.

use std::env;
use std::io::Write;
use termcolor::{Ansi, Color, ColorSpec, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the `NO_COLOR` environment variable and only colors a TTY.
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    atty::is(atty::Stream::Stdout)
}

/// Gets the terminal width in columns, or 80 if it cannot be determined.
pub fn get_terminal_width() -> usize {
    term_size::dimensions().map_or(80, |(w, _)| w)
}

/// Wraps text to the terminal width, indenting continuation lines.
///
/// Text is returned unchanged when fewer than 10 columns remain after the
/// indent.
pub fn wrap_text(text: &str, indent: usize) -> String {
    wrap_to_width(text, indent, get_terminal_width())
}

fn wrap_to_width(text: &str, indent: usize, width: usize) -> String {
    let available_width = width.saturating_sub(indent);
    if available_width < 10 {
        return text.to_string();
    }

    let indent_str = " ".repeat(indent);
    let mut result = String::new();

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
            result.push_str(&indent_str);
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line.push_str(word);
            } else if current_line.len() + 1 + word.len() <= available_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push_str(&current_line);
                result.push('\n');
                result.push_str(&indent_str);
                current_line = word.to_string();
            }
        }
        result.push_str(&current_line);
    }

    result
}

/// Wraps `text` in ANSI color codes when `use_color` is set.
pub fn paint(text: &str, color: Color, bold: bool, use_color: bool) -> String {
    if !use_color {
        return text.to_string();
    }

    let mut out = Ansi::new(Vec::new());
    let _ = out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold));
    let _ = write!(out, "{text}");
    let _ = out.reset();
    String::from_utf8_lossy(&out.into_inner()).into_owned()
}
