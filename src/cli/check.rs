use colored::Colorize;

use crate::error::{Result, TxError};
use crate::loader::load_raw_table;
use crate::schema::{validate_schema, SchemaCheck};
use crate::settings::{env_var, load_settings, resolve_source_path};

pub fn run(file: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let source = resolve_source_path(file, &settings, env_var);

    match validate_schema(load_raw_table(&source.path)) {
        SchemaCheck::Valid(table) => {
            println!(
                "{} {} ({} rows, {} columns)",
                "All required columns present.".green(),
                source.path.display(),
                table.len(),
                table.columns.len()
            );
            Ok(())
        }
        SchemaCheck::Invalid { missing } => Err(TxError::MissingColumns(missing)),
        SchemaCheck::Absent => Err(TxError::Other(format!(
            "File not found at {}",
            source.path.display()
        ))),
    }
}
