//! Repository abstraction
//!
//! Filters reach the repository only to qualify field names. Repositories
//! that have no table alias (mocks, non-SQL sources) report no aliasing
//! capability and field names are used as configured.

use serde::{Deserialize, Serialize};

/// Separator between a table alias and a column name
pub const ALIAS_SEPARATOR: &str = ".";

/// Alias capability exposed by a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aliasing<'a> {
    pub alias: &'a str,
    pub separator: &'a str,
}

impl Aliasing<'_> {
    /// Qualify a field with the alias unless it already carries a qualifier
    pub fn qualify(&self, field: &str) -> String {
        if field.contains(self.separator) {
            field.to_string()
        } else {
            format!("{}{}{}", self.alias, self.separator, field)
        }
    }
}

/// Data source a filter manager is bound to
pub trait Repository: Send + Sync {
    /// Identifier of the data source
    fn name(&self) -> &str;

    /// Alias capability, `None` when the repository cannot alias fields
    fn aliasing(&self) -> Option<Aliasing<'_>> {
        None
    }

    /// Whether the schema knows `column`; `None` when there is no schema
    fn has_column(&self, _column: &str) -> Option<bool> {
        None
    }
}

/// Table backed repository with an alias and an optional column list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            columns: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Alias used in queries, falls back to the table name
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl Repository for Table {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliasing(&self) -> Option<Aliasing<'_>> {
        Some(Aliasing {
            alias: self.alias(),
            separator: ALIAS_SEPARATOR,
        })
    }

    fn has_column(&self, column: &str) -> Option<bool> {
        if self.columns.is_empty() {
            return None;
        }
        let column = match column.rsplit_once(ALIAS_SEPARATOR) {
            Some((qualifier, col)) if qualifier == self.alias() => col,
            Some(_) => return None,
            None => column,
        };
        Some(self.columns.iter().any(|c| c == column))
    }
}

/// Repository without alias capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainRepository {
    name: String,
}

impl PlainRepository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Repository for PlainRepository {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alias_defaults_to_name() {
        let table = Table::new("Articles");
        assert_eq!(table.alias(), "Articles");
        assert_eq!(
            table.aliasing(),
            Some(Aliasing {
                alias: "Articles",
                separator: "."
            })
        );
    }

    #[test]
    fn test_qualify_skips_qualified_fields() {
        let table = Table::new("articles").with_alias("a");
        let aliasing = table.aliasing().unwrap();
        assert_eq!(aliasing.qualify("title"), "a.title");
        assert_eq!(aliasing.qualify("authors.name"), "authors.name");
    }

    #[test]
    fn test_plain_repository_has_no_aliasing() {
        let repo = PlainRepository::new("memory");
        assert_eq!(repo.name(), "memory");
        assert!(repo.aliasing().is_none());
        assert_eq!(repo.has_column("anything"), None);
    }

    #[test]
    fn test_has_column() {
        let table = Table::new("articles")
            .with_alias("Articles")
            .with_columns(["id", "title"]);
        assert_eq!(table.has_column("title"), Some(true));
        assert_eq!(table.has_column("Articles.title"), Some(true));
        assert_eq!(table.has_column("body"), Some(false));
        assert_eq!(table.has_column("Authors.name"), None);
        assert_eq!(Table::new("x").has_column("title"), None);
    }
}
