//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `data_file`.
pub const DATA_FILE_ENV: &str = "MARKSHEET_DATA_FILE";

/// Top-level marksheet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksheetConfig {
    /// Path of the student records file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Output format when none is given on the command line: table or json.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("studentMarks.txt")
}
fn default_format() -> String {
    "table".to_string()
}

impl Default for MarksheetConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `marksheet.toml` in the current directory
/// 2. `~/.config/marksheet/config.toml`
///
/// `MARKSHEET_DATA_FILE` overrides the data file from either.
pub fn load_config() -> Result<MarksheetConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MarksheetConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("marksheet.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => MarksheetConfig::default(),
    };

    if let Ok(data_file) = std::env::var(DATA_FILE_ENV) {
        config.data_file = PathBuf::from(data_file);
    }

    let resolved = resolve_env_vars(&config.data_file.to_string_lossy());
    config.data_file = PathBuf::from(resolved);

    anyhow::ensure!(
        matches!(config.default_format.as_str(), "table" | "json"),
        "default_format must be \"table\" or \"json\", got \"{}\"",
        config.default_format
    );

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<MarksheetConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("marksheet"))
}
