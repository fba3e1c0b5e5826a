//! CLI argument definitions.
//!
//! Commands:
//! - healthlog record --date <day> --weight <kg> --sleep <hours>
//! - healthlog show --date <day>
//! - healthlog history --metric <name> --window week|month

use clap::{Parser, Subcommand, ValueEnum};
use healthlog_core::SeriesWindow;
use std::path::PathBuf;

/// Daily weight and sleep log with coach feedback
#[derive(Parser, Debug)]
#[command(name = "healthlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite file holding daily records
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record one day's values and show the coach's reaction
    Record {
        /// Calendar day, `YYYY-MM-DD` or an RFC 3339 timestamp
        #[arg(long)]
        date: String,

        /// Body weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Sleep duration in hours
        #[arg(long)]
        sleep: Option<f64>,

        /// Calorie intake in kcal
        #[arg(long)]
        calories: Option<f64>,

        /// Exercise duration in minutes
        #[arg(long)]
        exercise: Option<f64>,
    },

    /// Show the stored entry and feedback for one day
    Show {
        /// Calendar day, `YYYY-MM-DD` or an RFC 3339 timestamp
        #[arg(long)]
        date: String,
    },

    /// List one metric over a week or month window
    History {
        /// weight | sleep | calories | exercise
        #[arg(long, default_value = "weight")]
        metric: String,

        #[arg(long, value_enum, default_value_t = Window::Week)]
        window: Window,

        /// Last day of the window; defaults to the latest recorded day
        #[arg(long)]
        until: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Window {
    Week,
    Month,
}

impl From<Window> for SeriesWindow {
    fn from(value: Window) -> Self {
        match value {
            Window::Week => SeriesWindow::Week,
            Window::Month => SeriesWindow::Month,
        }
    }
}
