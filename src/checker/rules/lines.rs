//! Line rules
//!
//! These work on text alone and run even when a line cannot be tokenized.

use crate::checker::constants::MODELINE_PREFIX;
use crate::checker::{RuleContext, Warning};

/// Lines whose last character before the newline is whitespace.
pub fn trailing_whitespace(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.raw_lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.chars().last().is_some_and(char::is_whitespace))
        .map(|(i, _)| Warning::new(i, "Trailing whitespace characters"))
        .collect()
}

/// Right-trimmed lines over the length limit, except vim modelines.
pub fn long_lines(cx: &RuleContext<'_>) -> Vec<Warning> {
    let max = cx.options.max_line_length;
    cx.lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            line.chars().count() > max && !line.starts_with(MODELINE_PREFIX)
        })
        .map(|(i, line)| {
            Warning::new(
                i,
                format!(
                    "Line longer than {} characters: {}",
                    max,
                    line.trim_start()
                ),
            )
        })
        .collect()
}

/// First literal tab on each line.
pub fn tab_characters(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.raw_lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let col = line.chars().position(|c| c == '\t')?;
            Some(Warning::new(i, format!("Tab character (col {})", col)))
        })
        .collect()
}
