//! Pattern matching filter

use std::sync::Arc;

use serde::Deserialize;

use crate::data::{Condition, Mode, QueryBuilder, Repository};
use crate::search::base::{Base, Context, Filter};
use crate::search::error::SearchError;
use crate::search::options::FilterOptions;
use crate::utils::sql::like_pattern;
use crate::utils::value::{display_scalar, elements, is_blank};

/// LIKE flavour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Comparison {
    #[default]
    #[serde(rename = "LIKE", alias = "like")]
    Like,
    #[serde(rename = "ILIKE", alias = "ilike")]
    Ilike,
}

/// Options of the `like` filter
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeOptions {
    /// Prepend the any-wildcard
    #[serde(default)]
    pub before: bool,
    /// Append the any-wildcard
    #[serde(default)]
    pub after: bool,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default = "default_mode")]
    pub value_mode: Mode,
    #[serde(default)]
    pub comparison: Comparison,
    #[serde(default = "default_wildcard_any")]
    pub wildcard_any: String,
    #[serde(default = "default_wildcard_one")]
    pub wildcard_one: String,
}

fn default_mode() -> Mode {
    Mode::Or
}

fn default_wildcard_any() -> String {
    "*".to_string()
}

fn default_wildcard_one() -> String {
    "?".to_string()
}

impl Default for LikeOptions {
    fn default() -> Self {
        Self {
            before: false,
            after: false,
            mode: default_mode(),
            value_mode: default_mode(),
            comparison: Comparison::default(),
            wildcard_any: default_wildcard_any(),
            wildcard_one: default_wildcard_one(),
        }
    }
}

/// `field LIKE pattern` with escaped input and user wildcards
#[derive(Debug)]
pub struct LikeFilter {
    base: Base,
    options: LikeOptions,
}

impl LikeFilter {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            base: Base::new(name, repository, options)?,
            options: LikeOptions::default(),
        })
    }

    pub fn with_options(mut self, options: LikeOptions) -> Self {
        self.options = options;
        self
    }

    fn pattern(&self, input: &str) -> String {
        let body = like_pattern(input, &self.options.wildcard_any, &self.options.wildcard_one);
        format!(
            "{}{}{}",
            if self.options.before { "%" } else { "" },
            body,
            if self.options.after { "%" } else { "" }
        )
    }
}

impl Filter for LikeFilter {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "like"
    }

    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
        let patterns: Vec<String> = elements(&ctx.value)
            .into_iter()
            .filter(|v| !is_blank(v) && !v.is_array() && !v.is_object())
            .map(|v| self.pattern(&display_scalar(v)))
            .collect();
        if patterns.is_empty() {
            return;
        }

        let case_insensitive = self.options.comparison == Comparison::Ilike;
        let per_field: Vec<Condition> = ctx
            .field
            .iter()
            .filter_map(|field| {
                let per_value = patterns
                    .iter()
                    .map(|pattern| Condition::Like {
                        field: field.to_string(),
                        pattern: pattern.clone(),
                        case_insensitive,
                    })
                    .collect();
                self.options.value_mode.combine(per_value)
            })
            .collect();

        if let Some(condition) = self.options.mode.combine(per_field) {
            query.add_condition(condition);
        }
    }
}
