//! Column type inference
//!
//! A column gets the first type that holds for all of its non-null values,
//! tried in the order timestamp, integer, floating point. Anything else is
//! text. `null` and `PrivacySuppressed` (any case) count as null.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::model::{ColumnType, StorageType};

static INTEGER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+$").expect("valid integer pattern"));

static FLOAT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d*\.?\d+$").expect("valid float pattern"));

const NULL_LITERAL: &str = "null";
const SUPPRESSED_LITERAL: &str = "privacysuppressed";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Infer the storage type and nullability of a column's values
pub fn infer_column<S: AsRef<str>>(values: &[S]) -> ColumnType {
    let mut maybe_timestamp = true;
    let mut maybe_integer = true;
    let mut maybe_float = true;
    let mut nullable = false;
    let mut max_length = 0;

    for value in values {
        let value = value.as_ref();
        max_length = max_length.max(value.chars().count());

        let lowered = value.to_lowercase();
        if is_null(&lowered) {
            nullable = true;
            continue;
        }

        if maybe_timestamp && !is_timestamp(value) {
            maybe_timestamp = false;
        }
        if maybe_integer && !INTEGER_PATTERN.is_match(&lowered) {
            maybe_integer = false;
        }
        if maybe_float && !FLOAT_PATTERN.is_match(&lowered) {
            maybe_float = false;
        }
    }

    let kind = if maybe_timestamp {
        StorageType::Timestamp
    } else if maybe_integer {
        StorageType::Integer
    } else if maybe_float {
        StorageType::FloatingPoint
    } else {
        StorageType::Text
    };

    ColumnType {
        kind,
        nullable,
        max_length,
    }
}

fn is_null(lowered: &str) -> bool {
    lowered == NULL_LITERAL || lowered == SUPPRESSED_LITERAL
}

/// Whether the value parses as a date or date/time in one of the known layouts
pub fn is_timestamp(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(value).is_ok() || DateTime::parse_from_rfc2822(value).is_ok() {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
}
