//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn ilike(&self, col: &str, placeholder: &str) -> String {
        format!("{} ILIKE {} ESCAPE '\\'", col, placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.placeholder(1), "$1");
        assert_eq!(dialect.placeholder(10), "$10");
    }

    #[test]
    fn test_like_and_ilike() {
        let dialect = PostgresDialect;
        assert_eq!(dialect.like("title", "$1"), r"title LIKE $1 ESCAPE '\'");
        assert_eq!(dialect.ilike("title", "$2"), r"title ILIKE $2 ESCAPE '\'");
    }

    #[test]
    fn test_bool_literal() {
        assert_eq!(PostgresDialect.bool_literal(true), "TRUE");
    }
}
