use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::core::cli::Cli;
use crate::core::config::SearchConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::data::{Backend, SelectQuery};
use crate::search::{Args, ProcessSummary};

/// Rendered query for one set of request arguments
#[derive(Debug, Serialize)]
pub struct Rendered {
    pub backend: Backend,
    pub sql: String,
    pub params: Vec<JsonValue>,
    pub summary: ProcessSummary,
}

pub struct CoreApp;

impl CoreApp {
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        Self::init_logging();
        tracing::trace!(cli = ?cli, "Parsed command line");

        let config = SearchConfig::load(&cli.config)?;
        let backend = cli.backend.unwrap_or(config.backend);
        let args = cli.request_args()?;

        let rendered = Self::render(&config, &args, &cli.collection, backend)?;
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        Ok(())
    }

    /// Run the configured filters of `collection` and render the query
    pub fn render(
        config: &SearchConfig,
        args: &Args,
        collection: &str,
        backend: Backend,
    ) -> Result<Rendered> {
        let manager = config.build_manager()?;
        if manager.filters(collection).is_empty() {
            tracing::warn!(collection, "No filters configured for collection");
        }

        let mut query = SelectQuery::new(&config.table.name, config.table.alias());
        let summary = manager.process_collection(&mut query, args, collection);
        let (sql, params) = query.to_sql(backend.dialect());
        tracing::debug!(
            backend = %backend,
            applied = summary.applied,
            skipped = summary.skipped,
            aborted = summary.aborted,
            "Query rendered"
        );

        Ok(Rendered {
            backend,
            sql,
            params: params.values,
            summary,
        })
    }

    fn init_logging() {
        let default_filter = format!("warn,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }
}
