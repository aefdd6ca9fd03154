//! Filter manager
//!
//! Groups filters into named collections bound to one repository and runs a
//! collection against a query for one set of request arguments.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::data::{QueryBuilder, Repository};

use super::base::{Base, Filter, Outcome};
use super::error::SearchError;
use super::filters::{
    BooleanFilter, CallbackFilter, CompareFilter, CompareOptions, ExistsFilter, LikeFilter,
    LikeOptions, ValueFilter,
};
use super::options::{Args, FilterOptions};

/// Collection used when none is selected
pub const DEFAULT_COLLECTION: &str = "default";

/// Counts of filter outcomes for one `process` run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Filters whose `process` step ran
    pub applied: usize,
    pub skipped: usize,
    pub aborted: usize,
    /// Filters not invoked because their argument was absent
    pub inactive: usize,
}

/// Owns the filter collections for a repository
pub struct Manager {
    repository: Arc<dyn Repository>,
    collections: BTreeMap<String, Vec<Box<dyn Filter>>>,
    collection: String,
}

impl Manager {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            repository,
            collections: BTreeMap::new(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repository
    }

    /// Collection that `add` and the helpers target
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Switch the collection that `add` and the helpers target
    pub fn use_collection(&mut self, name: impl Into<String>) -> &mut Self {
        self.collection = name.into();
        self
    }

    /// Add a filter to the current collection, replacing one with the same name
    pub fn add(&mut self, filter: Box<dyn Filter>) -> &mut Self {
        self.warn_unknown_fields(filter.as_ref());
        let filters = self.collections.entry(self.collection.clone()).or_default();
        let existing = filters.iter().position(|f| f.name() == filter.name());
        match existing {
            Some(idx) => filters[idx] = filter,
            None => filters.push(filter),
        }
        self
    }

    /// Remove a filter from the current collection
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Filter>> {
        let filters = self.collections.get_mut(&self.collection)?;
        let idx = filters.iter().position(|f| f.name() == name)?;
        Some(filters.remove(idx))
    }

    /// Filter of the current collection by name
    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        self.filters(&self.collection)
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
    }

    /// Filters of a collection in insertion order
    pub fn filters(&self, collection: &str) -> &[Box<dyn Filter>] {
        self.collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn value(&mut self, name: &str, options: FilterOptions) -> Result<&mut Self, SearchError> {
        let filter = ValueFilter::new(name, self.repository.clone(), options)?;
        Ok(self.add(Box::new(filter)))
    }

    pub fn like(
        &mut self,
        name: &str,
        options: FilterOptions,
        like: LikeOptions,
    ) -> Result<&mut Self, SearchError> {
        let filter = LikeFilter::new(name, self.repository.clone(), options)?.with_options(like);
        Ok(self.add(Box::new(filter)))
    }

    pub fn compare(
        &mut self,
        name: &str,
        options: FilterOptions,
        compare: CompareOptions,
    ) -> Result<&mut Self, SearchError> {
        let filter =
            CompareFilter::new(name, self.repository.clone(), options)?.with_options(compare);
        Ok(self.add(Box::new(filter)))
    }

    pub fn boolean(
        &mut self,
        name: &str,
        options: FilterOptions,
    ) -> Result<&mut Self, SearchError> {
        let filter = BooleanFilter::new(name, self.repository.clone(), options)?;
        Ok(self.add(Box::new(filter)))
    }

    pub fn exists(&mut self, name: &str, options: FilterOptions) -> Result<&mut Self, SearchError> {
        let filter = ExistsFilter::new(name, self.repository.clone(), options)?;
        Ok(self.add(Box::new(filter)))
    }

    pub fn callback<F>(
        &mut self,
        name: &str,
        options: FilterOptions,
        callback: F,
    ) -> Result<&mut Self, SearchError>
    where
        F: Fn(&mut dyn QueryBuilder, &Args, &Base) + Send + Sync + 'static,
    {
        let filter = CallbackFilter::new(name, self.repository.clone(), options, callback)?;
        Ok(self.add(Box::new(filter)))
    }

    /// Run the current collection
    pub fn process(&self, query: &mut dyn QueryBuilder, args: &Args) -> ProcessSummary {
        self.process_collection(query, args, &self.collection)
    }

    /// Run every filter of `collection` that is active for `args`
    ///
    /// A filter is active when its argument is present and not null, when it
    /// has `alwaysRun`, or when it has a `defaultValue`.
    pub fn process_collection(
        &self,
        query: &mut dyn QueryBuilder,
        args: &Args,
        collection: &str,
    ) -> ProcessSummary {
        let filters = self.filters(collection);
        tracing::debug!(
            repository = self.repository.name(),
            collection,
            filters = filters.len(),
            "Processing search filters"
        );

        let mut summary = ProcessSummary::default();
        for filter in filters {
            if !is_active(filter.as_ref(), args) {
                summary.inactive += 1;
                continue;
            }
            match filter.apply(&mut *query, args).outcome {
                Outcome::Done => summary.applied += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Aborted => summary.aborted += 1,
            }
        }
        summary
    }

    /// Arguments of the current collection's filters, in argument order
    pub fn filter_params(&self, args: &Args) -> Args {
        let filters = self.filters(&self.collection);
        args.iter()
            .filter(|(key, _)| filters.iter().any(|f| f.name() == key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Whether any filter of the current collection has a non-empty argument
    pub fn is_search(&self, args: &Args) -> bool {
        self.filter_params(args)
            .values()
            .any(|v| !crate::utils::value::is_blank(v))
    }

    fn warn_unknown_fields(&self, filter: &dyn Filter) {
        for field in filter.base().field().iter() {
            if self.repository.has_column(field) == Some(false) {
                tracing::warn!(
                    filter = filter.name(),
                    field,
                    repository = self.repository.name(),
                    "Filter field is not a column of the repository"
                );
            }
        }
    }
}

fn is_active(filter: &dyn Filter, args: &Args) -> bool {
    let options = filter.base().options();
    options.always_run
        || options.default_value.is_some()
        || args.get(filter.name()).is_some_and(|v| !v.is_null())
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let collections: BTreeMap<&str, Vec<&str>> = self
            .collections
            .iter()
            .map(|(name, filters)| (name.as_str(), filters.iter().map(|f| f.name()).collect()))
            .collect();
        f.debug_struct("Manager")
            .field("repository", &self.repository.name())
            .field("collection", &self.collection)
            .field("collections", &collections)
            .finish()
    }
}
