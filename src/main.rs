mod cleaner;
mod cli;
mod error;
mod fmt;
mod loader;
mod logging;
mod models;
mod schema;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            rows,
            drop_unparsed_dates,
        } => cli::clean::run(file.as_deref(), rows, drop_unparsed_dates),
        Commands::Check { file } => cli::check::run(file.as_deref()),
        Commands::Status => cli::status::run(),
        Commands::Config {
            source_path,
            preview_rows,
        } => cli::config::run(source_path, preview_rows),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
