//! `tradetrack.toml` — defaults for imports and the store location.
//!
//! ```toml
//! initial_investment = 10000.0
//! value_policy = "lenient"
//! store_dir = "/var/lib/tradetrack"
//!
//! [columns]
//! date_column = "M/D/YY"
//! time_column = "H:MM AM/PM"
//! ```
//!
//! Every key is optional. Column names not given fall back to the combined
//! `SYMBOL` / `DateTime` / `value` schema.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tradetrack_core::{ColumnMapping, Pipeline, ValuePolicy};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tradetrack.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeTrackConfig {
    /// Used when the import command is not given an amount.
    pub initial_investment: Option<f64>,
    pub store_dir: Option<PathBuf>,
    pub columns: ColumnMapping,
    pub value_policy: ValuePolicy,
}

impl TradeTrackConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load an explicit path, or `tradetrack.toml` if it exists, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    log::debug!("using {}", default.display());
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.columns.clone(), self.value_policy)
    }

    /// `store_dir` if set, else `<data dir>/tradetrack`, else `./.tradetrack`.
    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(default_store_dir)
    }
}

pub fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tradetrack"))
        .unwrap_or_else(|| PathBuf::from(".tradetrack"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = TradeTrackConfig::from_toml("").unwrap();
        assert_eq!(cfg, TradeTrackConfig::default());
        assert_eq!(cfg.pipeline(), Pipeline::default());
    }

    #[test]
    fn full_config_parses() {
        let cfg = TradeTrackConfig::from_toml(
            r#"
initial_investment = 2500.0
value_policy = "lenient"
store_dir = "/tmp/tt"

[columns]
date_column = "M/D/YY"
time_column = "H:MM AM/PM"
"#,
        )
        .unwrap();

        assert_eq!(cfg.initial_investment, Some(2500.0));
        assert_eq!(cfg.value_policy, ValuePolicy::Lenient);
        assert_eq!(cfg.columns, ColumnMapping::split());
        assert_eq!(cfg.resolved_store_dir(), PathBuf::from("/tmp/tt"));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(matches!(
            TradeTrackConfig::from_toml("initial_investment = \"lots\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TradeTrackConfig::load_or_default(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tradetrack.toml");
        std::fs::write(&path, "initial_investment = 100.0\n").unwrap();
        let cfg = TradeTrackConfig::load_or_default(Some(&path)).unwrap();
        assert_eq!(cfg.initial_investment, Some(100.0));
    }

    #[test]
    fn default_store_dir_ends_in_tradetrack() {
        let dir = default_store_dir();
        assert!(dir.ends_with("tradetrack") || dir.ends_with(".tradetrack"));
    }
}
