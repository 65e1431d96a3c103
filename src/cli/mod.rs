pub mod check;
pub mod clean;
pub mod config;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "txclean", about = "Clean personal-finance transaction exports.")]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and clean an export, then print a summary and preview.
    Clean {
        /// CSV export to read (default: $TRANSACTIONS_FILE_PATH, then settings)
        #[arg(long)]
        file: Option<String>,
        /// Number of cleaned rows to preview
        #[arg(long)]
        rows: Option<usize>,
        /// Also drop rows whose date is not in day/month/year format
        #[arg(long = "drop-unparsed-dates")]
        drop_unparsed_dates: bool,
    },
    /// Check that an export has the required columns.
    Check {
        /// CSV export to read (default: $TRANSACTIONS_FILE_PATH, then settings)
        #[arg(long)]
        file: Option<String>,
    },
    /// Show the resolved source file and settings.
    Status,
    /// Show or update saved settings.
    Config {
        /// Default export location
        #[arg(long = "source-path")]
        source_path: Option<String>,
        /// Default number of preview rows
        #[arg(long = "preview-rows")]
        preview_rows: Option<usize>,
    },
}
