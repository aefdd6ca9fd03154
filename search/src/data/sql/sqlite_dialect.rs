//! SQLite SQL dialect implementation

use super::SqlDialect;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn ilike(&self, col: &str, placeholder: &str) -> String {
        format!("LOWER({}) LIKE LOWER({}) ESCAPE '\\'", col, placeholder)
    }

    /// SQLite has no boolean type and stores 1/0.
    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }
}
