//! MAC address canonicalization

use tracing::trace;

use crate::model::Row;

use super::NormalizationRule;

const MAC_HEX_DIGITS: usize = 12;

/// Separator placed between each pair of hex digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MacSeparator {
    #[default]
    None,
    Colon,
    Dash,
}

impl MacSeparator {
    pub fn as_char(self) -> Option<char> {
        match self {
            MacSeparator::None => None,
            MacSeparator::Colon => Some(':'),
            MacSeparator::Dash => Some('-'),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MacSeparator::None => "",
            MacSeparator::Colon => ":",
            MacSeparator::Dash => "-",
        }
    }
}

impl std::str::FromStr for MacSeparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(MacSeparator::None),
            "colon" | ":" => Ok(MacSeparator::Colon),
            "dash" | "-" => Ok(MacSeparator::Dash),
            _ => Err(format!("Unknown MAC separator: {}", s)),
        }
    }
}

/// Rewrites MAC addresses to one canonical layout: 12 hex digits, one case,
/// the configured separator every two digits. Values that do not hold exactly
/// 12 hex digits are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddressRule {
    capitalize: bool,
    separator: MacSeparator,
}

impl MacAddressRule {
    pub fn new(capitalize: bool, separator: MacSeparator) -> Self {
        Self {
            capitalize,
            separator,
        }
    }

    pub fn capitalize(&self) -> bool {
        self.capitalize
    }

    pub fn separator(&self) -> MacSeparator {
        self.separator
    }

    /// Already in the configured canonical layout
    pub fn is_valid(&self, mac: &str) -> bool {
        let bytes = mac.as_bytes();
        match self.separator.as_char() {
            None => bytes.len() == MAC_HEX_DIGITS && bytes.iter().all(|&b| self.is_hex(b)),
            Some(sep) => {
                // Two digits then a separator, five times, then the last two digits
                bytes.len() == MAC_HEX_DIGITS / 2 * 3 - 1
                    && bytes.iter().enumerate().all(|(i, &b)| {
                        if i % 3 == 2 {
                            b == sep as u8
                        } else {
                            self.is_hex(b)
                        }
                    })
            }
        }
    }

    fn is_hex(&self, b: u8) -> bool {
        b.is_ascii_digit()
            || if self.capitalize {
                (b'A'..=b'F').contains(&b)
            } else {
                (b'a'..=b'f').contains(&b)
            }
    }

    /// Canonical form of `mac`, or `None` when it does not hold 12 hex digits
    pub fn normalize_value(&self, mac: &str) -> Option<String> {
        if self.is_valid(mac) {
            return Some(mac.to_string());
        }

        let digits: String = mac
            .chars()
            .filter(char::is_ascii_hexdigit)
            .map(|c| {
                if self.capitalize {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect();

        if digits.len() != MAC_HEX_DIGITS {
            return None;
        }

        let pairs: Vec<&str> = (0..MAC_HEX_DIGITS)
            .step_by(2)
            .map(|i| &digits[i..i + 2])
            .collect();
        Some(pairs.join(self.separator.as_str()))
    }
}

impl Default for MacAddressRule {
    fn default() -> Self {
        Self::new(false, MacSeparator::None)
    }
}

impl NormalizationRule for MacAddressRule {
    fn apply(&self, rows: &mut [Row], columns: &[String]) {
        let mut changed = 0usize;
        let mut skipped = 0usize;
        for row in rows.iter_mut() {
            for column in columns {
                let Some(value) = row.get_mut(column) else {
                    continue;
                };
                match self.normalize_value(value) {
                    Some(canonical) if canonical != *value => {
                        *value = canonical;
                        changed += 1;
                    }
                    Some(_) => {}
                    None => skipped += 1,
                }
            }
        }
        trace!(changed, skipped, "applied MAC address rule");
    }
}
