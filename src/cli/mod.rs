//! Command-line interface for `logtint`.

pub mod args;
pub mod commands;
