pub mod add;
pub mod delete;
pub mod find;
pub mod init;
pub mod list;
pub mod rank;
pub mod sort;
pub mod summary;
pub mod update;

use std::path::PathBuf;

use anyhow::Result;

use marksheet_core::config::{load_config_from, MarksheetConfig};
use marksheet_core::error::MarksheetError;
use marksheet_core::marksheet::Marksheet;
use marksheet_core::persistence::FlatFileRepository;

use crate::render::Format;

/// Resolved settings shared by every command.
pub struct Context {
    pub config: MarksheetConfig,
}

impl Context {
    /// Load config, then let `--data-file` override it.
    pub fn load(config_path: Option<PathBuf>, data_file: Option<PathBuf>) -> Result<Self> {
        let mut config = load_config_from(config_path.as_deref())?;
        if let Some(path) = data_file {
            config.data_file = path;
        }
        tracing::debug!("using data file {}", config.data_file.display());
        Ok(Self { config })
    }

    /// Open the records file, creating it if missing.
    pub fn open(&self) -> Result<Marksheet<FlatFileRepository>> {
        let repo = FlatFileRepository::new(&self.config.data_file);
        let sheet = Marksheet::open(repo)?;
        if !sheet.skipped().is_empty() {
            eprintln!(
                "Warning: skipped {} malformed line(s) in {}",
                sheet.skipped().len(),
                self.config.data_file.display()
            );
        }
        Ok(sheet)
    }

    /// The format flag if given, else the configured default.
    pub fn format(&self, flag: Option<String>) -> Result<Format> {
        flag.as_deref()
            .unwrap_or(&self.config.default_format)
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}", e))
    }
}

/// Convert a mutation result, flagging changes that could not be saved.
pub fn committed<T>(result: Result<T, MarksheetError>) -> Result<T> {
    result.map_err(|e| {
        if e.is_persistence() {
            anyhow::Error::new(e).context("change was not saved")
        } else {
            e.into()
        }
    })
}
