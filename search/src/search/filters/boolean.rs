//! Boolean flag filter

use std::sync::Arc;

use serde::Deserialize;

use crate::data::{Condition, Mode, QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::FilterOptions;
use crate::utils::value::parse_flag;

/// Options of the `boolean` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BooleanOptions {
    #[serde(default = "default_mode")]
    pub mode: Mode,
}

fn default_mode() -> Mode {
    Mode::Or
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

/// `field = TRUE|FALSE` for recognised flag spellings
#[derive(Debug)]
pub struct BooleanFilter {
    base: Base,
    options: BooleanOptions,
}

impl BooleanFilter {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            options: BooleanOptions::default(),
        })
    }

    pub fn with_options(mut self, options: BooleanOptions) -> Self {
        self.options = options;
        self
    }
}

impl Filter for BooleanFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "boolean"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        let Some(flag) = parse_flag(&ctx.value) else {
            return;
        };
        let conditions = ctx
            .field
            .iter()
            .map(|field| Condition::Bool {
                field: field.to_string(),
                value: flag,
            })
            .collect();

        if let Some(condition) = self.options.mode.combine(conditions) {
            query.add_condition(condition);
        }
    }
}
