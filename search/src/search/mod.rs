//! Request-driven search filters
//!
//! A [`Manager`] holds [`Filter`]s; each filter reads one request argument,
//! normalizes it and contributes conditions to a
//! [`QueryBuilder`](crate::data::QueryBuilder).

pub mod base;
pub mod error;
pub mod filters;
pub mod manager;
pub mod options;

pub use base::{Base, Context, Filter, Invocation, Outcome, parse_name};
pub use error::SearchError;
pub use filters::FilterKind;
pub use manager::{DEFAULT_COLLECTION, Manager, ProcessSummary};
pub use options::{AfterProcessHook, Args, BeforeProcess, BeforeProcessHook, Field, FilterOptions};
