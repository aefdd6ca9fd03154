//! Concrete filter kinds
//!
//! Each kind only implements `process`; option handling, aliasing and the
//! hook protocol come from [`Base`](crate::search::Base).

mod boolean;
mod callback;
mod compare;
mod exists;
mod like;
mod value;

use std::sync::Arc;

use serde::Deserialize;

pub use boolean::{BooleanFilter, BooleanOptions};
pub use callback::{CallbackFilter, CallbackFn};
pub use compare::{CompareFilter, CompareOptions};
pub use exists::{ExistsFilter, ExistsOptions};
pub use like::{Comparison, LikeFilter, LikeOptions};
pub use value::{ValueFilter, ValueOptions};

use crate::data::Repository;

use super::base::Filter;
use super::error::SearchError;
use super::options::FilterOptions;

/// Filter kind with its kind-specific options, as read from configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterKind {
    Value(ValueOptions),
    Like(LikeOptions),
    Compare(CompareOptions),
    Boolean(BooleanOptions),
    Exists(ExistsOptions),
}

impl FilterKind {
    /// Construct the filter this kind describes
    pub fn build(
        self,
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Box<dyn Filter>, SearchError> {
        Ok(match self {
            FilterKind::Value(opts) => {
                Box::new(ValueFilter::new(name, repository, options)?.with_options(opts))
            }
            FilterKind::Like(opts) => {
                Box::new(LikeFilter::new(name, repository, options)?.with_options(opts))
            }
            FilterKind::Compare(opts) => {
                Box::new(CompareFilter::new(name, repository, options)?.with_options(opts))
            }
            FilterKind::Boolean(opts) => {
                Box::new(BooleanFilter::new(name, repository, options)?.with_options(opts))
            }
            FilterKind::Exists(opts) => {
                Box::new(ExistsFilter::new(name, repository, options)?.with_options(opts))
            }
        })
    }
}
