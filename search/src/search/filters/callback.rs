//! Filter delegating to a user closure

use std::sync::Arc;

use crate::data::{QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::{Args, FilterOptions};

/// Closure run as the filter's `process` step
pub type CallbackFn = Arc<dyn Fn(&mut dyn QueryBuilder, &Args, &Base) + Send + Sync>;

/// Runs a closure with the query, the effective arguments and the filter
pub struct CallbackFilter {
    base: Base,
    callback: CallbackFn,
}

impl CallbackFilter {
    pub fn new<F>(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
        callback: F,
    ) -> Result<Self, SearchError>
    where
        F: Fn(&mut dyn QueryBuilder, &Args, &Base) + Send + Sync + 'static,
    {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            callback: Arc::new(callback),
        })
    }
}

impl std::fmt::Debug for CallbackFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackFilter")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl Filter for CallbackFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "callback"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        (self.callback)(query, ctx.args, &self.base);
    }
}
