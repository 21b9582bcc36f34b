//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use bt_core::SeriesRange;

/// Baby feeding, diaper and temperature tracker.
///
/// Records care events into a day-keyed log and summarizes them per day,
/// week, month or all time.
#[derive(Debug, Parser)]
#[command(name = "bt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the person recording; its initial is stored with each event.
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a bottle feeding.
    Feed {
        /// Amount in ml (1-500).
        amount: String,

        /// Earlier time today (HH:MM or HH:MM:SS) instead of now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Record a diaper change.
    Diaper {
        /// pooped, peed or both.
        kind: String,
    },

    /// Record a body temperature.
    Temp {
        /// Degrees Celsius (30.0-45.0); a comma works as decimal separator.
        value: String,
    },

    /// Show today's events.
    Today,

    /// Delete today's most recent event of a type.
    Undo {
        /// feeding, diaper or temperature.
        kind: String,
    },

    /// Chart totals over a range of days.
    Chart {
        /// Range of days to cover.
        #[arg(value_enum, default_value_t = ChartRange::Week)]
        range: ChartRange,

        /// Emit the series as JSON instead of a text chart.
        #[arg(long)]
        json: bool,

        /// Write the chart to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show data file location and today's latest events.
    Status,
}

/// Chart ranges accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartRange {
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Every recorded day.
    All,
}

impl From<ChartRange> for SeriesRange {
    fn from(range: ChartRange) -> Self {
        match range {
            ChartRange::Week => Self::Week,
            ChartRange::Month => Self::Month,
            ChartRange::All => Self::AllTime,
        }
    }
}
