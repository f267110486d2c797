//! Column metadata and inferred storage types

use serde::{Deserialize, Serialize};

/// Longest text value that still fits a bounded `varchar` column
pub const BOUNDED_TEXT_LIMIT: usize = 255;

/// Canonical storage type for every value of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    Integer,
    FloatingPoint,
    Timestamp,
    Text,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::Integer => write!(f, "integer"),
            StorageType::FloatingPoint => write!(f, "float"),
            StorageType::Timestamp => write!(f, "timestamp"),
            StorageType::Text => write!(f, "text"),
        }
    }
}

/// Result of type inference over one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    pub kind: StorageType,
    /// Some value was `null` (or `PrivacySuppressed`)
    pub nullable: bool,
    /// Longest observed value, in characters
    pub max_length: usize,
}

impl ColumnType {
    /// Text whose longest value fits [`BOUNDED_TEXT_LIMIT`]
    pub fn is_bounded_text(&self) -> bool {
        self.kind == StorageType::Text && self.max_length <= BOUNDED_TEXT_LIMIT
    }

    /// SQL column type with nullability, e.g. `INT NOT NULL`
    pub fn sql_type(&self) -> String {
        let base = match self.kind {
            StorageType::Integer => "INT",
            StorageType::FloatingPoint => "DOUBLE",
            StorageType::Timestamp => "DATETIME",
            StorageType::Text if self.is_bounded_text() => "varchar(255)",
            StorageType::Text => "TEXT",
        };
        let null = if self.nullable { "NULL" } else { "NOT NULL" };
        format!("{} {}", base, null)
    }

    /// Rust field type, wrapped in `Option` when nullable
    pub fn rust_type(&self) -> String {
        let base = match self.kind {
            StorageType::Integer => "i64",
            StorageType::FloatingPoint => "f64",
            StorageType::Timestamp => "chrono::NaiveDateTime",
            StorageType::Text => "String",
        };
        if self.nullable {
            format!("Option<{}>", base)
        } else {
            base.to_string()
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_type())
    }
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position in the table's column list)
    pub index: usize,
    /// Inferred type from data
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            index,
            column_type,
        }
    }
}
