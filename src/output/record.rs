//! Record type declaration derived from inferred column types

use std::fmt::Write as _;
use std::io::Write;

use rustc_hash::FxHashSet;

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

// Strict and reserved keywords across editions
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Emits a Rust struct with one field per column
pub struct RecordOutput {
    type_name: String,
    visibility: String,
}

impl RecordOutput {
    pub fn new(type_name: String, visibility: String) -> Self {
        Self {
            type_name,
            visibility,
        }
    }

    /// Struct declaration; field names that differ from their column carry
    /// a `serde(rename)` attribute
    pub fn declaration(&self, table: &Table) -> String {
        let vis = if self.visibility.trim().is_empty() {
            String::new()
        } else {
            format!("{} ", self.visibility.trim())
        };

        let mut code = String::new();
        let _ = writeln!(code, "#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]");
        let _ = writeln!(code, "{}struct {} {{", vis, self.type_name);

        let mut used = FxHashSet::default();
        for column in table.schema() {
            let field = unique_field_name(&column.name, column.index, &mut used);
            if field != column.name {
                let _ = writeln!(code, "    #[serde(rename = {:?})]", column.name);
            }
            let _ = writeln!(code, "    {}{}: {},", vis, field, column.column_type.rust_type());
        }

        code.push('}');
        code
    }
}

impl OutputFormatter for RecordOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "{}", self.declaration(table))?;
        Ok(())
    }
}

/// snake_case identifier for a column header
fn field_name(header: &str, index: usize) -> String {
    let mut name = String::new();
    for ch in header.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let name = name.trim_matches('_');

    if name.is_empty() {
        format!("field_{}", index)
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else if KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

fn unique_field_name(header: &str, index: usize, used: &mut FxHashSet<String>) -> String {
    let base = field_name(header, index);
    let mut candidate = base.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, n);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Row;

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("id", 0), "id");
        assert_eq!(field_name("First Name", 0), "first_name");
        assert_eq!(field_name("f(x)", 0), "f_x");
        assert_eq!(field_name("2nd", 0), "_2nd");
        assert_eq!(field_name("type", 0), "type_");
        assert_eq!(field_name("***", 3), "field_3");
    }

    #[test]
    fn test_reserved_words_get_suffix() {
        assert_eq!(field_name("abstract", 0), "abstract_");
        assert_eq!(field_name("Gen", 0), "gen_");
        assert_eq!(field_name("macro", 0), "macro_");
        assert_eq!(field_name("Do", 0), "do_");
        assert_eq!(field_name("virtual", 0), "virtual_");
    }

    #[test]
    fn test_declaration() {
        let table = Table::from_rows([
            Row::from_pairs([("id", "1"), ("Score", "2.5"), ("when", "2020-01-01"), ("note", "hi")]),
            Row::from_pairs([("id", "2"), ("Score", "null"), ("when", "2020-02-01"), ("note", "yo")]),
        ]);
        let code = table.to_record_code("Entry", "pub");
        assert_eq!(
            code,
            "#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]\n\
             pub struct Entry {\n    \
             pub id: i64,\n    \
             #[serde(rename = \"Score\")]\n    \
             pub score: Option<f64>,\n    \
             pub when: chrono::NaiveDateTime,\n    \
             pub note: String,\n\
             }"
        );
    }

    #[test]
    fn test_colliding_headers_get_distinct_fields() {
        let table = Table::parse_str("A,A\n1,2", crate::model::Delimiter::Comma);
        let code = table.to_record_code("Pair", "");
        assert!(code.contains("struct Pair {"));
        assert!(code.contains("    a: i64,"));
        assert!(code.contains("    a_2: i64,"));
        assert!(!code.contains("pub"));
    }
}
