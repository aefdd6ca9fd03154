//! Comparison filter

use std::sync::Arc;

use serde::Deserialize;

use crate::data::{CompareOp, Condition, Mode, QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::FilterOptions;
use crate::utils::value::is_array_shaped;

/// Options of the `compare` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub operator: CompareOp,
    #[serde(default = "default_mode")]
    pub mode: Mode,
}

fn default_mode() -> Mode {
    Mode::And
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            operator: CompareOp::default(),
            mode: default_mode(),
        }
    }
}

/// `field <op> value` for a scalar value
#[derive(Debug)]
pub struct CompareFilter {
    base: Base,
    options: CompareOptions,
}

impl CompareFilter {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            options: CompareOptions::default(),
        })
    }

    pub fn with_options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }
}

impl Filter for CompareFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "compare"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        if ctx.value.is_null() || is_array_shaped(&ctx.value) {
            return;
        }
        let conditions = ctx
            .field
            .iter()
            .map(|field| Condition::Compare {
                field: field.to_string(),
                op: self.options.operator,
                value: ctx.value.clone(),
            })
            .collect();

        if let Some(condition) = self.options.mode.combine(conditions) {
            query.add_condition(condition);
        }
    }
}
