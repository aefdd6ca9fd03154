//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - Case-insensitive pattern matching
/// - Boolean literals
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - SQLite/DuckDB/ClickHouse: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Generate a LIKE comparison using backslash as the escape character
    fn like(&self, col: &str, placeholder: &str) -> String {
        format!("{} LIKE {} ESCAPE '\\'", col, placeholder)
    }

    /// Generate a case-insensitive LIKE comparison
    ///
    /// - PostgreSQL/DuckDB: `col ILIKE ?`
    /// - SQLite: `LOWER(col) LIKE LOWER(?)`
    /// - ClickHouse: `ilike(col, ?)`
    fn ilike(&self, col: &str, placeholder: &str) -> String;

    /// Boolean literal
    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }
}
