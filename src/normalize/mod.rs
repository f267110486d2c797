//! Per-column normalization passes applied in place to rows

mod mac;

use tracing::trace;

use crate::model::Row;

pub use mac::{MacAddressRule, MacSeparator};

/// A destructive fix-up applied to selected columns of every row.
///
/// Rows lacking a target column are left as they are.
pub trait NormalizationRule {
    fn apply(&self, rows: &mut [Row], columns: &[String]);
}

/// Upper- or lower-cases every value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseRule {
    pub capitalize: bool,
}

impl CaseRule {
    pub fn upper() -> Self {
        Self { capitalize: true }
    }

    pub fn lower() -> Self {
        Self { capitalize: false }
    }
}

impl NormalizationRule for CaseRule {
    fn apply(&self, rows: &mut [Row], columns: &[String]) {
        let mut changed = 0usize;
        for row in rows.iter_mut() {
            for column in columns {
                if let Some(value) = row.get_mut(column) {
                    let folded = if self.capitalize {
                        value.to_uppercase()
                    } else {
                        value.to_lowercase()
                    };
                    if *value != folded {
                        *value = folded;
                        changed += 1;
                    }
                }
            }
        }
        trace!(changed, capitalize = self.capitalize, "applied case rule");
    }
}
