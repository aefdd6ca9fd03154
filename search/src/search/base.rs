//! Base filter behavior
//!
//! Every filter kind shares the same lifecycle: resolve the field, normalize
//! the request argument, decide whether to run, then let the concrete
//! `process` contribute conditions. Arguments travel in a per-call
//! [`Context`], so a filter holds no request state between invocations.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::data::{QueryBuilder, Repository};
use crate::utils::value::{is_array_shaped, is_blank};

use super::error::SearchError;
use super::options::{Args, BeforeProcess, Field, FilterOptions};

/// Validate a filter name given as an arbitrary JSON value
pub fn parse_name(value: &JsonValue) -> Result<String, SearchError> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Ok(s.clone()),
        _ => Err(SearchError::invalid_name()),
    }
}

/// State and option handling shared by all filters
pub struct Base {
    name: String,
    field: Field,
    repository: Arc<dyn Repository>,
    options: FilterOptions,
}

impl Base {
    pub fn new(
        name: impl Into<String>,
        repository: Arc<dyn Repository>,
        options: FilterOptions,
    ) -> Result<Self, SearchError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SearchError::invalid_name());
        }
        let field = resolve_field(&name, &options)?;
        Ok(Self {
            name,
            field,
            repository,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repository
    }

    /// Change options after construction
    ///
    /// The `field` option is validated again; on error the previous options
    /// stay in place.
    pub fn configure(&mut self, f: impl FnOnce(&mut FilterOptions)) -> Result<(), SearchError> {
        let mut options = self.options.clone();
        f(&mut options);
        self.field = resolve_field(&self.name, &options)?;
        self.options = options;
        Ok(())
    }

    /// Configured field(s), qualified with the repository alias when enabled
    pub fn field(&self) -> Field {
        if !self.options.alias_field {
            return self.field.clone();
        }
        match self.repository.aliasing() {
            Some(aliasing) => self.field.map(|f| aliasing.qualify(f)),
            None => self.field.clone(),
        }
    }

    /// Normalize the request argument for this filter
    pub fn value(&self, args: &Args) -> JsonValue {
        let default = || self.options.default_value.clone().unwrap_or(JsonValue::Null);

        let raw = match args.get(&self.name) {
            Some(raw) if !raw.is_null() => raw,
            _ => return default(),
        };

        if self.options.multi_value {
            return raw.clone();
        }

        if let (Some(separator), JsonValue::String(s)) = (self.options.separator(), raw) {
            return JsonValue::Array(
                s.split(separator)
                    .map(|part| JsonValue::String(part.to_string()))
                    .collect(),
            );
        }

        if is_array_shaped(raw) {
            return default();
        }

        raw.clone()
    }

    /// Whether the filter should be left out for these arguments
    pub fn skip(&self, args: &Args) -> bool {
        if self.options.always_run {
            return false;
        }
        self.options.filter_empty && is_blank(&self.value(args))
    }
}

impl std::fmt::Debug for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Base")
            .field("name", &self.name)
            .field("field", &self.field)
            .field("repository", &self.repository.name())
            .field("options", &self.options)
            .finish()
    }
}

fn resolve_field(name: &str, options: &FilterOptions) -> Result<Field, SearchError> {
    match &options.field {
        Some(value) => Field::from_value(value),
        None => Ok(Field::One(name.to_string())),
    }
}

/// Per-invocation data handed to `process`
#[derive(Debug)]
pub struct Context<'a> {
    pub args: &'a Args,
    pub field: Field,
    pub value: JsonValue,
}

/// Terminal state of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `beforeProcess` returned [`BeforeProcess::Abort`]
    Aborted,
    /// `skip` decided the filter does not apply
    Skipped,
    /// `process` ran
    Done,
}

/// Result of [`Filter::apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub outcome: Outcome,
    /// Arguments in effect at the end of the invocation
    pub args: Args,
}

/// A named unit contributing conditions to a query
pub trait Filter: Send + Sync {
    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    /// Short type name, e.g. `value` or `like`
    fn kind(&self) -> &'static str;

    /// Contribute conditions for the normalized value
    fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>);

    fn name(&self) -> &str {
        self.base().name()
    }

    /// Run the full sequence: before hook, skip check, process, after hook
    fn apply(&self, query: &mut dyn QueryBuilder, args: &Args) -> Invocation {
        let base = self.base();
        let mut args = args.clone();

        if let Some(hook) = &base.options().before_process {
            match hook(&mut *query, &args) {
                BeforeProcess::Abort => {
                    tracing::trace!(filter = base.name(), "Filter aborted by beforeProcess");
                    return Invocation {
                        outcome: Outcome::Aborted,
                        args,
                    };
                }
                BeforeProcess::ReplaceArgs(replaced) => args = replaced,
                BeforeProcess::Continue => {}
            }
        }

        if base.skip(&args) {
            tracing::trace!(filter = base.name(), "Filter skipped");
            return Invocation {
                outcome: Outcome::Skipped,
                args,
            };
        }

        let ctx = Context {
            args: &args,
            field: base.field(),
            value: base.value(&args),
        };
        tracing::trace!(
            filter = base.name(),
            kind = self.kind(),
            field = %ctx.field,
            value = %ctx.value,
            "Processing filter"
        );
        self.process(&mut *query, &ctx);

        if let Some(hook) = &base.options().after_process {
            hook(&mut *query, &args);
        }

        Invocation {
            outcome: Outcome::Done,
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Condition, PlainRepository, SelectQuery, Table};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Filter that records how often `process` ran
    struct RecordingFilter {
        base: Base,
        calls: AtomicUsize,
    }

    impl RecordingFilter {
        fn new(name: &str, options: FilterOptions) -> Result<Self, SearchError> {
            Self::with_repository(name, articles(), options)
        }

        fn with_repository(
            name: &str,
            repository: Arc<dyn Repository>,
            options: FilterOptions,
        ) -> Result<Self, SearchError> {
            Ok(Self {
                base: Base::new(name, repository, options)?,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Filter for RecordingFilter {
        fn base(&self) -> &Base {
            &self.base
        }

        fn base_mut(&mut self) -> &mut Base {
            &mut self.base
        }

        fn kind(&self) -> &'static str {
            "recording"
        }

        fn process(&self, query: &mut dyn QueryBuilder, ctx: &Context<'_>) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            for field in ctx.field.iter() {
                query.add_condition(Condition::eq(field, ctx.value.clone()));
            }
        }
    }

    fn articles() -> Arc<dyn Repository> {
        Arc::new(Table::new("articles").with_alias("Articles"))
    }

    fn args(value: JsonValue) -> Args {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn empty_values() -> Vec<JsonValue> {
        vec![json!(""), JsonValue::Null, json!([]), json!([""])]
    }

    #[test]
    fn test_construct_empty_field_option() {
        for empty in empty_values() {
            let err = RecordingFilter::new("name", FilterOptions::new().with_field(empty))
                .err()
                .expect("empty field must be rejected");
            assert_eq!(
                err.to_string(),
                "The `field` option is invalid. Expected a non-empty string or array."
            );
        }
    }

    #[test]
    fn test_construct_empty_name_argument() {
        for empty in empty_values() {
            let err = parse_name(&empty).unwrap_err();
            assert_eq!(
                err.to_string(),
                "The `name` argument is invalid. Expected a non-empty string."
            );
        }
        let err = RecordingFilter::new("", FilterOptions::new().with_field("field"))
            .err()
            .expect("empty name must be rejected");
        assert_eq!(err, SearchError::invalid_name());
    }

    #[test]
    fn test_construct_non_empty_field_option() {
        for value in [json!("0"), json!("value"), json!(["value"])] {
            let filter = RecordingFilter::new(
                "name",
                FilterOptions::new()
                    .with_field(value.clone())
                    .with_alias_field(false),
            )
            .unwrap();
            assert_eq!(serde_json::to_value(filter.base().field()).unwrap(), value);
        }
    }

    #[test]
    fn test_construct_non_empty_name_argument() {
        for name in ["0", "value"] {
            let filter =
                RecordingFilter::new(name, FilterOptions::new().with_field("field")).unwrap();
            assert_eq!(filter.name(), name);
            assert_eq!(parse_name(&json!(name)).unwrap(), name);
        }
    }

    #[test]
    fn test_field_defaults_to_name() {
        let filter =
            RecordingFilter::new("title", FilterOptions::new().with_alias_field(false)).unwrap();
        assert_eq!(filter.base().field(), Field::One("title".into()));
    }

    #[test]
    fn test_skip_with_always_run() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_always_run(true)
                .with_filter_empty(true),
        )
        .unwrap();

        for value in [json!("1"), json!("0"), json!(""), json!([])] {
            assert!(!filter.base().skip(&args(json!({ "field": value }))));
        }
        assert!(!filter.base().skip(&Args::new()));
    }

    #[test]
    fn test_skip_with_filter_empty() {
        let filter =
            RecordingFilter::new("field", FilterOptions::new().with_filter_empty(true)).unwrap();
        let base = filter.base();

        assert!(!base.skip(&args(json!({"field": "1"}))));
        assert!(!base.skip(&args(json!({"field": "0"}))));
        assert!(base.skip(&args(json!({"field": ""}))));
        assert!(base.skip(&args(json!({"other": "1"}))));

        let multi = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_filter_empty(true)
                .with_multi_value(true),
        )
        .unwrap();
        assert!(multi.base().skip(&args(json!({"field": []}))));
        assert!(multi.base().skip(&args(json!({"field": ["", null]}))));
        assert!(!multi.base().skip(&args(json!({"field": ["", "x"]}))));
    }

    #[test]
    fn test_skip_without_filter_empty() {
        let filter = RecordingFilter::new("field", FilterOptions::new()).unwrap();
        assert!(!filter.base().skip(&args(json!({"field": ""}))));
    }

    #[test]
    fn test_value_with_default() {
        let filter =
            RecordingFilter::new("field", FilterOptions::new().with_default_value("default"))
                .unwrap();
        let base = filter.base();

        assert_eq!(base.value(&args(json!({"field": "value"}))), json!("value"));
        assert_eq!(
            base.value(&args(json!({"other_field": "value"}))),
            json!("default")
        );
        assert_eq!(
            base.value(&args(json!({"field": ["value1", "value2"]}))),
            json!("default")
        );
        assert_eq!(base.value(&args(json!({"field": null}))), json!("default"));
    }

    #[test]
    fn test_value_without_default_is_null() {
        let filter = RecordingFilter::new("field", FilterOptions::new()).unwrap();
        assert_eq!(filter.base().value(&Args::new()), JsonValue::Null);
    }

    #[test]
    fn test_value_multi_value() {
        let mut filter =
            RecordingFilter::new("field", FilterOptions::new().with_default_value("default"))
                .unwrap();
        filter
            .base_mut()
            .configure(|o| o.multi_value = true)
            .unwrap();

        assert_eq!(
            filter
                .base()
                .value(&args(json!({"field": ["value1", "value2"]}))),
            json!(["value1", "value2"])
        );
    }

    #[test]
    fn test_value_multi_value_separator() {
        let mut filter =
            RecordingFilter::new("field", FilterOptions::new().with_default_value("default"))
                .unwrap();
        filter
            .base_mut()
            .configure(|o| o.multi_value_separator = Some("|".into()))
            .unwrap();

        assert_eq!(
            filter.base().value(&args(json!({"field": "value1|value2"}))),
            json!(["value1", "value2"])
        );
        assert_eq!(
            filter.base().value(&args(json!({"field": ["value1"]}))),
            json!("default")
        );
    }

    #[test]
    fn test_value_multi_value_does_not_split_scalars() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_default_value("default")
                .with_multi_value(true),
        )
        .unwrap();

        assert_eq!(
            filter.base().value(&args(json!({"field": "value1|value2"}))),
            json!("value1|value2")
        );
    }

    #[test]
    fn test_multi_value_takes_precedence_over_separator() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_multi_value(true)
                .with_multi_value_separator("|"),
        )
        .unwrap();

        assert_eq!(
            filter.base().value(&args(json!({"field": "a|b"}))),
            json!("a|b")
        );
    }

    #[test]
    fn test_field_aliasing() {
        let mut filter = RecordingFilter::new("field", FilterOptions::new()).unwrap();
        assert_eq!(filter.base().field(), Field::One("Articles.field".into()));

        filter
            .base_mut()
            .configure(|o| o.alias_field = false)
            .unwrap();
        assert_eq!(filter.base().field(), Field::One("field".into()));

        let filter = RecordingFilter::new(
            "name",
            FilterOptions::new().with_field(json!(["field1", "field2"])),
        )
        .unwrap();
        assert_eq!(
            filter.base().field(),
            Field::Many(vec!["Articles.field1".into(), "Articles.field2".into()])
        );
        // Stable across calls
        assert_eq!(filter.base().field(), filter.base().field());
    }

    #[test]
    fn test_field_aliasing_keeps_qualified_fields() {
        let filter = RecordingFilter::new(
            "name",
            FilterOptions::new().with_field(json!(["Authors.name", "title"])),
        )
        .unwrap();
        assert_eq!(
            filter.base().field(),
            Field::Many(vec!["Authors.name".into(), "Articles.title".into()])
        );
    }

    #[test]
    fn test_field_aliasing_with_non_supporting_repository() {
        let filter = RecordingFilter::with_repository(
            "field",
            Arc::new(PlainRepository::new("mock")),
            FilterOptions::new().with_alias_field(true),
        )
        .unwrap();
        assert_eq!(filter.base().field(), Field::One("field".into()));
    }

    #[test]
    fn test_configure_rejects_empty_field_and_keeps_options() {
        let mut filter = RecordingFilter::new("field", FilterOptions::new()).unwrap();
        let err = filter
            .base_mut()
            .configure(|o| o.field = Some(json!("")))
            .unwrap_err();
        assert_eq!(err, SearchError::invalid_field());
        assert!(filter.base().options().field.is_none());
    }

    #[test]
    fn test_before_process_callback_contributes() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new().with_before_process(|query, params| {
                for (key, value) in params {
                    query.add_condition(Condition::eq(key.clone(), value.clone()));
                }
                BeforeProcess::Continue
            }),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        let invocation = filter.apply(&mut query, &args(json!({"field": "bar"})));

        assert_eq!(invocation.outcome, Outcome::Done);
        assert_eq!(filter.calls(), 1);
        assert_eq!(
            query.conditions(),
            &[
                Condition::eq("field", "bar"),
                Condition::eq("Articles.field", "bar"),
            ]
        );
    }

    #[test]
    fn test_before_process_abort_prevents_process() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_before_process(|_, _| BeforeProcess::Abort)
                .with_after_process(|query, _| {
                    query.add_condition(Condition::raw("after = 1", vec![]));
                }),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        let invocation = filter.apply(&mut query, &args(json!({"field": "bar"})));

        assert_eq!(invocation.outcome, Outcome::Aborted);
        assert_eq!(filter.calls(), 0);
        assert!(query.conditions().is_empty());
    }

    #[test]
    fn test_before_process_replaces_args() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new().with_before_process(|_, params| {
                let mut params = params.clone();
                params.insert("extra".into(), json!("value"));
                BeforeProcess::ReplaceArgs(params)
            }),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        let invocation = filter.apply(&mut query, &args(json!({"field": "bar"})));

        assert_eq!(invocation.args, args(json!({"field": "bar", "extra": "value"})));
        assert_eq!(filter.calls(), 1);
    }

    #[test]
    fn test_before_process_replacement_drives_value() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_alias_field(false)
                .with_before_process(|_, _| BeforeProcess::ReplaceArgs(Args::new()))
                .with_default_value("fallback"),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        filter.apply(&mut query, &args(json!({"field": "bar"})));

        assert_eq!(query.conditions(), &[Condition::eq("field", "fallback")]);
    }

    #[test]
    fn test_skipped_invocation_does_not_process_or_run_after_hook() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_filter_empty(true)
                .with_after_process(|query, _| {
                    query.add_condition(Condition::raw("after = 1", vec![]));
                }),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        let invocation = filter.apply(&mut query, &args(json!({"field": ""})));

        assert_eq!(invocation.outcome, Outcome::Skipped);
        assert_eq!(filter.calls(), 0);
        assert!(query.conditions().is_empty());
    }

    #[test]
    fn test_after_process_runs_after_process() {
        let filter = RecordingFilter::new(
            "field",
            FilterOptions::new()
                .with_alias_field(false)
                .with_after_process(|query, params| {
                    assert_eq!(query.conditions().len(), 1);
                    query.add_condition(Condition::eq("seen", params.len()));
                }),
        )
        .unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        filter.apply(&mut query, &args(json!({"field": "bar"})));

        assert_eq!(
            query.conditions(),
            &[Condition::eq("field", "bar"), Condition::eq("seen", 1)]
        );
    }

    #[test]
    fn test_args_are_not_merged_across_invocations() {
        let filter = RecordingFilter::new("field", FilterOptions::new()).unwrap();
        let mut query = SelectQuery::new("articles", "Articles");

        let first = filter.apply(&mut query, &args(json!({"field": "a", "x": 1})));
        let second = filter.apply(&mut query, &args(json!({"field": "b"})));

        assert_eq!(first.args.len(), 2);
        assert_eq!(second.args, args(json!({"field": "b"})));
    }
}
