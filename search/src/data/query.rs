//! Query conditions and the select query they accumulate into
//!
//! Filters never read a query back; they only push [`Condition`]s through
//! the [`QueryBuilder`] trait. [`SelectQuery`] is the in-crate builder that
//! renders the collected conditions as parameterised SQL.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::sql::SqlDialect;

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SqlParams {
    pub values: Vec<JsonValue>,
}

impl SqlParams {
    /// Bind a value and return its placeholder
    fn bind(&mut self, value: JsonValue, dialect: &dyn SqlDialect) -> String {
        self.values.push(value);
        dialect.placeholder(self.values.len())
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CompareOp {
    #[serde(rename = ">")]
    Gt,
    #[default]
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// How several conditions are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[serde(alias = "and")]
    And,
    #[serde(alias = "or")]
    Or,
}

impl Mode {
    /// Join conditions; `None` when there is nothing to join
    pub fn combine(&self, mut conditions: Vec<Condition>) -> Option<Condition> {
        match conditions.len() {
            0 => None,
            1 => conditions.pop(),
            _ => Some(match self {
                Mode::And => Condition::And(conditions),
                Mode::Or => Condition::Or(conditions),
            }),
        }
    }
}

/// A single WHERE clause contribution
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq {
        field: String,
        value: JsonValue,
    },
    In {
        field: String,
        values: Vec<JsonValue>,
    },
    Like {
        field: String,
        pattern: String,
        case_insensitive: bool,
    },
    Compare {
        field: String,
        op: CompareOp,
        value: JsonValue,
    },
    Bool {
        field: String,
        value: bool,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    /// Literal SQL; each `?` binds the next entry of `params`
    Raw {
        sql: String,
        params: Vec<JsonValue>,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn raw(sql: impl Into<String>, params: Vec<JsonValue>) -> Self {
        Self::Raw {
            sql: sql.into(),
            params,
        }
    }

    /// Generate SQL WHERE clause fragment
    /// Returns the SQL with dialect placeholders and updates params
    pub fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::Eq { field, value } => {
                let ph = params.bind(value.clone(), dialect);
                format!("{} = {}", field, ph)
            }
            Self::In { field, values } => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let placeholders: Vec<String> = values
                    .iter()
                    .map(|v| params.bind(v.clone(), dialect))
                    .collect();
                format!("{} IN ({})", field, placeholders.join(", "))
            }
            Self::Like {
                field,
                pattern,
                case_insensitive,
            } => {
                let ph = params.bind(JsonValue::String(pattern.clone()), dialect);
                if *case_insensitive {
                    dialect.ilike(field, &ph)
                } else {
                    dialect.like(field, &ph)
                }
            }
            Self::Compare { field, op, value } => {
                let ph = params.bind(value.clone(), dialect);
                format!("{} {} {}", field, op.as_sql(), ph)
            }
            Self::Bool { field, value } => {
                format!("{} = {}", field, dialect.bool_literal(*value))
            }
            Self::IsNull { field } => format!("{} IS NULL", field),
            Self::IsNotNull { field } => format!("{} IS NOT NULL", field),
            Self::Raw { sql, params: raw } => {
                let mut out = String::with_capacity(sql.len());
                let mut values = raw.iter();
                for ch in sql.chars() {
                    if ch == '?' {
                        if let Some(value) = values.next() {
                            out.push_str(&params.bind(value.clone(), dialect));
                            continue;
                        }
                    }
                    out.push(ch);
                }
                out
            }
            Self::And(conditions) => join(conditions, " AND ", "1=1", dialect, params),
            Self::Or(conditions) => join(conditions, " OR ", "1=0", dialect, params),
        }
    }
}

fn join(
    conditions: &[Condition],
    separator: &str,
    empty: &str,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    if conditions.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = conditions
        .iter()
        .map(|c| c.to_sql(dialect, params))
        .collect();
    format!("({})", parts.join(separator))
}

/// Conditions accumulation capability filters write into
pub trait QueryBuilder {
    /// Add a condition; conditions are ANDed together
    fn add_condition(&mut self, condition: Condition);

    /// Conditions collected so far
    fn conditions(&self) -> &[Condition];
}

/// SELECT query over a single aliased table
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    table: String,
    alias: String,
    conditions: Vec<Condition>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
            conditions: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Render the query with dialect placeholders
    pub fn to_sql(&self, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = if self.alias.is_empty() || self.alias == self.table {
            format!("SELECT * FROM {}", self.table)
        } else {
            format!("SELECT * FROM {} AS {}", self.table, self.alias)
        };
        if !self.conditions.is_empty() {
            let clauses: Vec<String> = self
                .conditions
                .iter()
                .map(|c| c.to_sql(dialect, &mut params))
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        (sql, params)
    }
}

impl QueryBuilder for SelectQuery {
    fn add_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}
