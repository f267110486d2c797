//! Field separators accepted by the parser and writer

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field separator. Unrecognized characters fall back to [`Delimiter::Comma`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Tilde,
}

impl Delimiter {
    /// The separator character
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Tilde => '~',
        }
    }

    /// Pick a delimiter from a file extension (`tsv` means tab, anything else comma)
    pub fn for_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("tsv") {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }
}

impl From<char> for Delimiter {
    fn from(ch: char) -> Self {
        match ch {
            ';' => Delimiter::Semicolon,
            '\t' => Delimiter::Tab,
            '~' => Delimiter::Tilde,
            _ => Delimiter::Comma,
        }
    }
}

impl From<Delimiter> for char {
    fn from(d: Delimiter) -> Self {
        d.as_char()
    }
}

impl FromStr for Delimiter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let delimiter = match s.to_lowercase().as_str() {
            "comma" => Delimiter::Comma,
            "semicolon" => Delimiter::Semicolon,
            "tab" | "\\t" => Delimiter::Tab,
            "tilde" => Delimiter::Tilde,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Delimiter::from(ch),
                    _ => Delimiter::Comma,
                }
            }
        };
        Ok(delimiter)
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
