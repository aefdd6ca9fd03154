//! Utility functions for the library

pub mod sql;
pub mod value;
