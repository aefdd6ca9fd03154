//! Search filters for a query builder
//!
//! Filters map request parameters to query conditions. Each filter decides
//! whether it applies, normalizes its argument and contributes conditions to
//! a [`data::QueryBuilder`]; a [`search::Manager`] runs a set of them for one
//! request.
//!
//! ```
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use search_filters::data::{Backend, SelectQuery, Table};
//! use search_filters::search::{FilterOptions, Manager};
//!
//! let mut manager = Manager::new(Arc::new(Table::new("articles").with_alias("Articles")));
//! manager.value("author_id", FilterOptions::new()).unwrap();
//!
//! let args = json!({"author_id": 7}).as_object().cloned().unwrap();
//! let mut query = SelectQuery::new("articles", "Articles");
//! manager.process(&mut query, &args);
//!
//! let (sql, params) = query.to_sql(Backend::Postgres.dialect());
//! assert_eq!(sql, "SELECT * FROM articles AS Articles WHERE Articles.author_id = $1");
//! assert_eq!(params.values, vec![json!(7)]);
//! ```

mod app;
pub mod core;
pub mod data;
pub mod search;
pub mod utils;
