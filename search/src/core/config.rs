use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::data::{Backend, Repository, Table};
use crate::search::{
    DEFAULT_COLLECTION, FilterKind, FilterOptions, Manager, SearchError, parse_name,
};

// =============================================================================
// Filter Definitions
// =============================================================================

/// One filter entry of the config file
///
/// ```json
/// { "name": "q", "type": "like", "field": ["title", "body"], "after": true }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FilterDefinition {
    /// Validated when the manager is built so empty names report the
    /// filter error rather than a parse error
    pub name: JsonValue,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(flatten)]
    pub options: FilterOptions,
    #[serde(flatten)]
    pub kind: FilterKind,
}

// =============================================================================
// Search Config
// =============================================================================

/// Config file contents: target table, SQL backend and filters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub backend: Backend,
    pub table: Table,
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
}

impl SearchConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            table = %config.table.name,
            backend = %config.backend,
            filters = config.filters.len(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Build a manager with every configured filter
    ///
    /// The returned manager has the default collection selected.
    pub fn build_manager(&self) -> Result<Manager, SearchError> {
        let repository: Arc<dyn Repository> = Arc::new(self.table.clone());
        let mut manager = Manager::new(repository.clone());
        let mut seen = HashSet::new();

        for definition in &self.filters {
            let name = parse_name(&definition.name)?;
            let collection = definition
                .collection
                .as_deref()
                .unwrap_or(DEFAULT_COLLECTION);
            if !seen.insert((collection.to_string(), name.clone())) {
                return Err(SearchError::Config(format!(
                    "Duplicate filter `{}` in collection `{}`",
                    name, collection
                )));
            }
            let filter = definition.kind.clone().build(
                name,
                repository.clone(),
                definition.options.clone(),
            )?;
            manager.use_collection(collection).add(filter);
        }

        manager.use_collection(DEFAULT_COLLECTION);
        Ok(manager)
    }
}
