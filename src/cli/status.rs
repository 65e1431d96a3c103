use crate::error::Result;
use crate::fmt;
use crate::loader::file_checksum;
use crate::settings::{env_var, load_settings, resolve_source_path, settings_path};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let source = resolve_source_path(None, &settings, env_var);
    let config = settings_path();

    println!("Source:        {}", source.path.display());
    println!("From:          {}", source.origin);
    println!(
        "Settings:      {}{}",
        config.display(),
        if config.exists() { "" } else { " (not created)" }
    );
    println!("Preview rows:  {}", settings.preview_rows);

    if source.path.is_file() {
        let size = std::fs::metadata(&source.path)?.len();
        println!();
        println!("File size:     {}", fmt::bytes(size));
        println!("SHA-256:       {}", file_checksum(&source.path)?);
    } else {
        println!();
        println!("Source file not found. Set TRANSACTIONS_FILE_PATH or pass --file.");
    }

    Ok(())
}
