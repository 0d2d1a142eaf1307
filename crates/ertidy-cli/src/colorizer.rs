//! Terminal rendering of the lines `check` would rewrite
//!
//! Applies ANSI escape codes to the diff using crossterm.

use crossterm::style::{Color, Stylize};
use ertidy::split_lines;

/// Render the changed lines as a diff
///
/// Each changed line is printed twice, prefixed with its 1-based number:
/// - `-` the original line: Red
/// - `+` the normalized line: Green
///
/// `changed_lines` must refer to lines present in both texts; normalization
/// never changes the number of lines, so this holds for its report.
pub fn render_diff(before: &str, after: &str, changed_lines: &[usize], colorize: bool) -> String {
    let before_lines = split_lines(before);
    let after_lines = split_lines(after);
    let mut result = String::new();

    for &number in changed_lines {
        let (Some(old), Some(new)) = (
            before_lines.get(number.wrapping_sub(1)),
            after_lines.get(number.wrapping_sub(1)),
        ) else {
            continue;
        };

        let removed = format!("-{:>4} | {}", number, old.body);
        let added = format!("+{:>4} | {}", number, new.body);
        if colorize {
            result.push_str(&format!("{}", removed.with(Color::Red)));
            result.push('\n');
            result.push_str(&format!("{}", added.with(Color::Green)));
        } else {
            result.push_str(&removed);
            result.push('\n');
            result.push_str(&added);
        }
        result.push('\n');
    }

    result
}
