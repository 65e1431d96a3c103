use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TxError};

pub const SOURCE_PATH_ENV: &str = "TRANSACTIONS_FILE_PATH";
pub const DEFAULT_SOURCE_PATH: &str = "data/sample_transactions.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_source_path")]
    pub source_path: String,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_source_path() -> String {
    DEFAULT_SOURCE_PATH.to_string()
}

fn default_preview_rows() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("txclean")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Read settings from `path`, falling back to defaults when the file is
/// missing or malformed.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
            Settings::default()
        }
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|e| TxError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Where the resolved source path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    CommandLine,
    Environment,
    SettingsFile,
    Default,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CommandLine => "--file",
            Self::Environment => SOURCE_PATH_ENV,
            Self::SettingsFile => "settings file",
            Self::Default => "default",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    pub path: PathBuf,
    pub origin: SourceOrigin,
}

/// Pick the export location: `--file`, then the environment, then the
/// settings file, then the built-in default. Empty values are skipped.
pub fn resolve_source_path<F>(cli_file: Option<&str>, settings: &Settings, env: F) -> SourcePath
where
    F: Fn(&str) -> Option<String>,
{
    fn non_empty(s: &str) -> bool {
        !s.trim().is_empty()
    }
    let (raw, origin) = if let Some(file) = cli_file.filter(|f| non_empty(f)) {
        (file.to_string(), SourceOrigin::CommandLine)
    } else if let Some(value) = env(SOURCE_PATH_ENV).filter(|v| non_empty(v)) {
        (value, SourceOrigin::Environment)
    } else if non_empty(&settings.source_path) && settings.source_path != DEFAULT_SOURCE_PATH {
        (settings.source_path.clone(), SourceOrigin::SettingsFile)
    } else {
        (DEFAULT_SOURCE_PATH.to_string(), SourceOrigin::Default)
    };
    SourcePath {
        path: PathBuf::from(expand_home(&raw)),
        origin,
    }
}

pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
