// =============================================================================
// Runtime Configuration: where the history lives and what to emit
// =============================================================================
//
// Indicator periods and decision thresholds are fixed constants; this file
// only chooses the pair label, the input file and the outputs.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.  All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::atomic_file::write_atomically;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "EURINR=X".to_string()
}

fn default_data_file() -> String {
    "EUR_INR_data.csv".to_string()
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Currency pair label used in logs and the report.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// CSV file holding the daily bar history.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Where to write the gap-filled indicator series, if anywhere.
    #[serde(default)]
    pub export_file: Option<String>,

    /// Also print the report as pretty JSON.
    #[serde(default)]
    pub report_json: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            data_file: default_data_file(),
            export_file: None,
            report_json: false,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from the JSON file at `path`.
    ///
    /// The file must exist: an unreadable file or invalid JSON is an error.
    /// Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            data_file = %config.data_file,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` as pretty JSON, replacing any
    /// existing file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        write_atomically(path, |file| {
            serde_json::to_writer_pretty(file, self)
                .context("failed to serialise runtime config to JSON")
        })?;

        info!(path = %path.display(), "runtime config saved");
        Ok(())
    }

    /// Config at `path`, or the defaults when no file exists yet.
    ///
    /// Defaults are written to `path` so the next run has a file to edit; a
    /// failure to write them is logged and otherwise ignored.
    pub fn load_or_init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!(path = %path.display(), "config file not found, writing defaults");
        let defaults = Self::default();
        if let Err(e) = defaults.save(path) {
            warn!(error = %e, "could not write default config");
        }
        Ok(defaults)
    }

    /// Apply overrides from a variable lookup (normally `std::env::var`).
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(symbol) = get("FOREX_SYMBOL") {
            self.symbol = symbol.to_uppercase();
        }
        if let Some(file) = get("FOREX_DATA_FILE") {
            self.data_file = file;
        }
        if let Some(file) = get("FOREX_EXPORT_FILE") {
            self.export_file = Some(file);
        }
    }
}
