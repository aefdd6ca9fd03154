//! Data layer abstractions
//!
//! The repository describes the table filters run against, the query
//! collects the conditions they contribute, and the SQL dialects render it.

pub mod query;
pub mod repository;
pub mod sql;

pub use query::{CompareOp, Condition, Mode, QueryBuilder, SelectQuery, SqlParams};
pub use repository::{Aliasing, PlainRepository, Repository, Table};
pub use sql::{Backend, SqlDialect};
