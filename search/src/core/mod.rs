//! Command line front end: arguments, config file and constants

pub mod cli;
pub mod config;
pub mod constants;

pub use crate::app::{CoreApp, Rendered};
pub use cli::Cli;
pub use config::{FilterDefinition, SearchConfig};
