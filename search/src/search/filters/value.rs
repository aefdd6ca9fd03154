//! Exact match filter

use std::sync::Arc;

use serde::Deserialize;

use crate::data::{Condition, Mode, QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::FilterOptions;
use crate::utils::value::{elements, is_array_shaped};

/// Options of the `value` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueOptions {
    /// How conditions on several fields are joined
    #[serde(default = "default_mode")]
    pub mode: Mode,
}

fn default_mode() -> Mode {
    Mode::Or
}

impl Default for ValueOptions {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

/// `field = value`, or `field IN (...)` for multiple values
#[derive(Debug)]
pub struct ValueFilter {
    base: Base,
    options: ValueOptions,
}

impl ValueFilter {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            options: ValueOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ValueOptions) -> Self {
        self.options = options;
        self
    }
}

impl Filter for ValueFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "value"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        if ctx.value.is_null() {
            return;
        }
        let conditions = if is_array_shaped(&ctx.value) {
            let values: Vec<_> = elements(&ctx.value).into_iter().cloned().collect();
            if values.is_empty() {
                return;
            }
            ctx.field
                .iter()
                .map(|field| Condition::In {
                    field: field.to_string(),
                    values: values.clone(),
                })
                .collect()
        } else {
            ctx.field
                .iter()
                .map(|field| Condition::eq(field, ctx.value.clone()))
                .collect()
        };

        if let Some(condition) = self.options.mode.combine(conditions) {
            query.add_condition(condition);
        }
    }
}
