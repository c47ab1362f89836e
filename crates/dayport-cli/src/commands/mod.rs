//! Command handlers, one module per top-level subcommand.

pub mod config;
pub mod import;
pub mod misc;
mod run;
pub mod update;
