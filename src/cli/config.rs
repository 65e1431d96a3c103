use crate::error::{Result, TxError};
use crate::settings::{load_settings_from, save_settings_to, settings_path};

pub fn run(source_path: Option<String>, preview_rows: Option<usize>) -> Result<()> {
    let path = settings_path();
    let mut settings = load_settings_from(&path);

    if source_path.is_none() && preview_rows.is_none() {
        let json = serde_json::to_string_pretty(&settings).map_err(|e| TxError::Settings(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    if let Some(source) = source_path {
        settings.source_path = source;
    }
    if let Some(rows) = preview_rows {
        settings.preview_rows = rows;
    }
    save_settings_to(&path, &settings)?;
    println!("Saved settings to {}", path.display());
    Ok(())
}
