//! NULL check filter

use std::sync::Arc;

use serde::Deserialize;

use crate::data::{Condition, Mode, QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::FilterOptions;
use crate::utils::value::{is_blank, parse_flag};

/// Options of the `exists` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExistsOptions {
    #[serde(default = "default_mode")]
    pub mode: Mode,
}

fn default_mode() -> Mode {
    Mode::And
}

impl Default for ExistsOptions {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

/// `field IS NOT NULL` for a truthy value, `field IS NULL` otherwise
#[derive(Debug)]
pub struct ExistsFilter {
    base: Base,
    options: ExistsOptions,
}

impl ExistsFilter {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            options: ExistsOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ExistsOptions) -> Self {
        self.options = options;
        self
    }
}

impl Filter for ExistsFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "exists"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        if ctx.value.is_null() {
            return;
        }
        let exists = parse_flag(&ctx.value).unwrap_or_else(|| !is_blank(&ctx.value));
        let conditions = ctx
            .field
            .iter()
            .map(|field| {
                let field = field.to_string();
                if exists {
                    Condition::IsNotNull { field }
                } else {
                    Condition::IsNull { field }
                }
            })
            .collect();

        if let Some(condition) = self.options.mode.combine(conditions) {
            query.add_condition(condition);
        }
    }
}
