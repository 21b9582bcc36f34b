//! Baby tracker CLI library.
//!
//! This crate provides the CLI interface for the baby tracker.

mod cli;
pub mod commands;
mod config;
pub mod render;

pub use cli::{ChartRange, Cli, Commands};
pub use config::Config;
