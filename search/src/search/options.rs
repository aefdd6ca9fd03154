//! Filter options shared by every filter kind

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::data::QueryBuilder;

use super::error::SearchError;

/// Request arguments keyed by parameter name
pub type Args = serde_json::Map<String, JsonValue>;

/// Hook run before the skip check
pub type BeforeProcessHook =
    Arc<dyn Fn(&mut dyn QueryBuilder, &Args) -> BeforeProcess + Send + Sync>;

/// Hook run after `process`; its result is ignored
pub type AfterProcessHook = Arc<dyn Fn(&mut dyn QueryBuilder, &Args) + Send + Sync>;

/// Decision returned by a `beforeProcess` hook
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BeforeProcess {
    /// Stop the invocation, nothing else runs
    Abort,
    /// Use these arguments for the rest of the invocation
    ReplaceArgs(Args),
    /// Proceed with the arguments unchanged
    #[default]
    Continue,
}

/// Logical field(s) a filter targets; the shape is kept through aliasing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Field {
    One(String),
    Many(Vec<String>),
}

impl Field {
    /// Validate a configured `field` value
    ///
    /// Accepts a non-empty string or a non-empty array of non-empty strings.
    pub fn from_value(value: &JsonValue) -> Result<Self, SearchError> {
        match value {
            JsonValue::String(s) if !s.is_empty() => Ok(Field::One(s.clone())),
            JsonValue::Array(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) if !s.is_empty() => Ok(s.clone()),
                    _ => Err(SearchError::invalid_field()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Field::Many),
            _ => Err(SearchError::invalid_field()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Field::One(f) => std::slice::from_ref(f),
            Field::Many(fs) => fs,
        };
        items.iter().map(String::as_str)
    }

    /// Apply `f` to every entry, keeping the shape
    pub fn map(&self, f: impl Fn(&str) -> String) -> Field {
        match self {
            Field::One(field) => Field::One(f(field)),
            Field::Many(fields) => Field::Many(fields.iter().map(|x| f(x)).collect()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::One(field) => write!(f, "{}", field),
            Field::Many(fields) => write!(f, "[{}]", fields.join(", ")),
        }
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::One(value.to_string())
    }
}

/// Options recognised by every filter
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Raw `field` option; validated when the filter is built
    #[serde(default, deserialize_with = "present")]
    pub field: Option<JsonValue>,
    #[serde(default = "default_true")]
    pub alias_field: bool,
    #[serde(default)]
    pub default_value: Option<JsonValue>,
    #[serde(default)]
    pub always_run: bool,
    #[serde(default)]
    pub filter_empty: bool,
    #[serde(default)]
    pub multi_value: bool,
    #[serde(default)]
    pub multi_value_separator: Option<String>,
    #[serde(skip)]
    pub before_process: Option<BeforeProcessHook>,
    #[serde(skip)]
    pub after_process: Option<AfterProcessHook>,
}

fn default_true() -> bool {
    true
}

// An explicit `null` must reach validation instead of meaning "unset".
fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            field: None,
            alias_field: true,
            default_value: None,
            always_run: false,
            filter_empty: false,
            multi_value: false,
            multi_value_separator: None,
            before_process: None,
            after_process: None,
        }
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("field", &self.field)
            .field("alias_field", &self.alias_field)
            .field("default_value", &self.default_value)
            .field("always_run", &self.always_run)
            .field("filter_empty", &self.filter_empty)
            .field("multi_value", &self.multi_value)
            .field("multi_value_separator", &self.multi_value_separator)
            .field("before_process", &self.before_process.is_some())
            .field("after_process", &self.after_process.is_some())
            .finish()
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<JsonValue>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_alias_field(mut self, alias_field: bool) -> Self {
        self.alias_field = alias_field;
        self
    }

    pub fn with_default_value(mut self, value: impl Into<JsonValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_always_run(mut self, always_run: bool) -> Self {
        self.always_run = always_run;
        self
    }

    pub fn with_filter_empty(mut self, filter_empty: bool) -> Self {
        self.filter_empty = filter_empty;
        self
    }

    pub fn with_multi_value(mut self, multi_value: bool) -> Self {
        self.multi_value = multi_value;
        self
    }

    pub fn with_multi_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.multi_value_separator = Some(separator.into());
        self
    }

    pub fn with_before_process<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn QueryBuilder, &Args) -> BeforeProcess + Send + Sync + 'static,
    {
        self.before_process = Some(Arc::new(hook));
        self
    }

    pub fn with_after_process<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn QueryBuilder, &Args) + Send + Sync + 'static,
    {
        self.after_process = Some(Arc::new(hook));
        self
    }

    /// Separator to split string arguments on, ignoring an empty one
    pub fn separator(&self) -> Option<&str> {
        self.multi_value_separator
            .as_deref()
            .filter(|sep| !sep.is_empty())
    }
}
