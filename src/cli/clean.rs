use colored::Colorize;

use crate::cleaner::{clean_transactions, CleanOptions};
use crate::cli::report;
use crate::error::Result;
use crate::loader::{file_checksum, load_raw_table};
use crate::schema::validate_schema;
use crate::settings::{env_var, load_settings, resolve_source_path};

pub fn run(file: Option<&str>, rows: Option<usize>, drop_unparsed_dates: bool) -> Result<()> {
    let settings = load_settings();
    let source = resolve_source_path(file, &settings, env_var);
    tracing::debug!(path = %source.path.display(), origin = %source.origin, "resolved source file");

    let raw = if source.path.is_file() {
        println!("File found! Loading data...");
        if let Ok(checksum) = file_checksum(&source.path) {
            tracing::info!(%checksum, "source checksum");
        }
        load_raw_table(&source.path)
    } else {
        println!("{}", format!("File not found at {}", source.path.display()).red());
        None
    };

    let table = validate_schema(raw).into_result()?;
    if table.is_some() {
        println!("All required columns present.");
    }

    let options = CleanOptions { drop_unparsed_dates };
    let outcome = clean_transactions(table.as_ref(), &options)?;

    println!("{}", report::format_diagnostics(&outcome.diagnostics));
    if let Some(cleaned) = &outcome.table {
        if cleaned.is_empty() {
            println!("\nNo transactions left after cleaning.");
            return Ok(());
        }
        let limit = rows.unwrap_or(settings.preview_rows);
        println!("\n{}", report::format_preview(cleaned, limit));
        println!("\n{}", report::format_info(cleaned));
    }
    Ok(())
}
