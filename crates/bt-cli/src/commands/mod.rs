//! CLI subcommand implementations.

pub mod chart;
pub mod record;
pub mod status;
pub mod today;
pub mod undo;
pub mod util;
