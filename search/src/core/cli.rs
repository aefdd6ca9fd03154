use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value as JsonValue;

use std::path::PathBuf;

use crate::data::Backend;
use crate::search::{Args, DEFAULT_COLLECTION};

use super::constants::{CONFIG_FILE_NAME, ENV_BACKEND, ENV_CONFIG, LIST_PARAM_SUFFIX};

#[derive(Parser, Debug)]
#[command(name = "search-filters")]
#[command(
    version,
    about = "Build query conditions from request parameters",
    long_about = None
)]
pub struct Cli {
    /// Path to the filter config file
    #[arg(long, short = 'c', env = ENV_CONFIG, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Request arguments as a JSON object
    #[arg(long, short = 'a')]
    pub args: Option<String>,

    /// Request parameter as key=value; `key[]=value` appends to a list
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Filter collection to run
    #[arg(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// SQL backend (sqlite, postgres, duckdb, clickhouse), overrides the config file
    #[arg(long, short = 'b', env = ENV_BACKEND, value_parser = parse_backend)]
    pub backend: Option<Backend>,
}

impl Cli {
    /// Merge `--args` and `--param` into one argument map
    ///
    /// Parameters are applied after the JSON object and override its keys.
    pub fn request_args(&self) -> Result<Args> {
        let mut args = match &self.args {
            Some(raw) => match serde_json::from_str::<JsonValue>(raw).context("Invalid --args JSON")? {
                JsonValue::Object(map) => map,
                other => bail!("--args must be a JSON object, got: {}", other),
            },
            None => Args::new(),
        };

        for (key, value) in &self.params {
            let value = JsonValue::String(value.clone());
            match key.strip_suffix(LIST_PARAM_SUFFIX) {
                Some(list_key) => match args
                    .entry(list_key.to_string())
                    .or_insert_with(|| JsonValue::Array(Vec::new()))
                {
                    JsonValue::Array(items) => items.push(value),
                    existing => *existing = JsonValue::Array(vec![existing.take(), value]),
                },
                None => {
                    args.insert(key.clone(), value);
                }
            }
        }
        Ok(args)
    }
}

/// Parse a `key=value` request parameter
fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid parameter '{}'. Expected key=value", s)),
    }
}

/// Parse SQL backend from CLI/env string
fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse()
}
