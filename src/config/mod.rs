use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        session::{SessionOptions, DEFAULT_BUFFER_PERCENT},
        utils::{ensure_dir, PathResolver},
    },
    currency::{CurrencyCode, LocaleConfig},
    errors::LedgerError,
    ledger::PlanningMode,
    storage::json_backend::{tmp_path, write_atomic},
};

/// User preferences stored at `<home>/config/config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_currency: CurrencyCode,
    pub default_mode: PlanningMode,
    pub buffer_percent: f64,
    pub seed_demo_ledger: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub locale: LocaleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: CurrencyCode::default(),
            default_mode: PlanningMode::default(),
            buffer_percent: DEFAULT_BUFFER_PERCENT,
            seed_demo_ledger: true,
            export_dir: None,
            locale: LocaleConfig::default(),
        }
    }
}

impl Config {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            seed_demo: self.seed_demo_ledger,
            buffer_percent: self.buffer_percent,
            default_currency: self.default_currency.clone(),
            default_mode: self.default_mode,
            locale: self.locale.clone(),
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Reads the config file, returning defaults when it does not exist yet.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data_dir(&self) -> PathBuf {
        PathResolver::data_dir_in(&self.base)
    }

    /// Configured export directory, or `<home>/exports`.
    pub fn export_dir(&self, config: &Config) -> PathBuf {
        config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathResolver::export_dir_in(&self.base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.buffer_percent, 15.0);
        assert!(config.seed_demo_ledger);
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            default_currency: CurrencyCode::new("JPY"),
            default_mode: PlanningMode::Monthly,
            seed_demo_ledger: false,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(manager.path().ends_with("config/config.json"));
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"buffer_percent": 25}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.buffer_percent, 25.0);
        assert_eq!(config.default_currency.as_str(), "USD");
        assert_eq!(
            manager.export_dir(&config),
            temp.path().join("exports")
        );
    }
}
