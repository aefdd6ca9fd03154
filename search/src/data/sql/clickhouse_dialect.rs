//! ClickHouse SQL dialect implementation

use super::SqlDialect;

/// ClickHouse SQL dialect
pub struct ClickhouseDialect;

impl SqlDialect for ClickhouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn placeholder(&self, _index: usize) -> String {
        // ClickHouse uses ? for positional parameters
        "?".to_string()
    }

    fn like(&self, col: &str, placeholder: &str) -> String {
        // Backslash is already the LIKE escape character; no ESCAPE clause
        format!("{} LIKE {}", col, placeholder)
    }

    fn ilike(&self, col: &str, placeholder: &str) -> String {
        format!("ilike({}, {})", col, placeholder)
    }
}
