//! Quote-aware splitting of raw text into logical lines and fields
//!
//! Both levels use the same rule: split naively on the separator, then glue
//! tokens back together (with the separator they were split on) while the
//! accumulated text holds an odd number of `"` characters. Every emitted
//! piece therefore carries an even number of quotes.
//!
//! Doubled quotes inside a quoted value are not unescaped; they pass through
//! literally.

use tracing::warn;

use crate::model::Delimiter;

const QUOTE: char = '"';

/// Split file content into logical lines.
///
/// Carriage returns must already be stripped. A quoted value may span
/// several physical lines; those come back as one logical line joined by `\n`.
pub fn split_lines(text: &str) -> Vec<String> {
    consolidate(text.split('\n'), '\n')
}

/// Split one logical line into raw fields (outer quotes still attached).
///
/// An empty line yields a single empty field.
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<String> {
    let sep = delimiter.as_char();
    consolidate(line.split(sep), sep)
}

/// Strip one matching pair of surrounding quotes, if present
pub fn unwrap_outer_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with(QUOTE) && value.ends_with(QUOTE) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Whether the text holds an even number of quote characters
pub fn is_balanced(text: &str) -> bool {
    quote_count(text) % 2 == 0
}

fn quote_count(text: &str) -> usize {
    text.chars().filter(|&ch| ch == QUOTE).count()
}

fn consolidate<'a>(tokens: impl Iterator<Item = &'a str>, separator: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut pending: Option<String> = None;

    for token in tokens {
        match pending.take() {
            Some(mut acc) => {
                acc.push(separator);
                acc.push_str(token);
                if is_balanced(&acc) {
                    pieces.push(acc);
                } else {
                    pending = Some(acc);
                }
            }
            None if is_balanced(token) => pieces.push(token.to_string()),
            None => pending = Some(token.to_string()),
        }
    }

    // Unterminated quoted value at end of input: close it rather than fail.
    if let Some(mut acc) = pending {
        warn!(
            length = acc.len(),
            "unterminated quoted value at end of input, appending closing quote"
        );
        acc.push(QUOTE);
        pieces.push(acc);
    }

    pieces
}
