use super::currency::CurrencyCode;
use super::trend::DEFAULT_TREND_DAYS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const FRANKFURTER_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FrankfurterProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub frankfurter: Option<FrankfurterProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            frankfurter: Some(FrankfurterProviderConfig {
                base_url: FRANKFURTER_BASE_URL.to_string(),
            }),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_from() -> CurrencyCode {
    CurrencyCode::new_unchecked("USD")
}

fn default_to() -> CurrencyCode {
    CurrencyCode::new_unchecked("INR")
}

fn default_trend_days() -> u32 {
    DEFAULT_TREND_DAYS
}

fn default_currencies() -> Vec<CurrencyCode> {
    ["USD", "INR", "EUR", "JPY", "GBP", "AUD", "CAD"]
        .into_iter()
        .map(CurrencyCode::new_unchecked)
        .collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Per-request timeout for the rate provider.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_from")]
    pub default_from: CurrencyCode,
    #[serde(default = "default_to")]
    pub default_to: CurrencyCode,
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,
    /// Quick-pick list shown by `currencies`. Not used to validate codes.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyCode>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            timeout_secs: default_timeout_secs(),
            default_from: default_from(),
            default_to: default_to(),
            trend_days: default_trend_days(),
            currencies: default_currencies(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxtrend")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn frankfurter_base_url(&self) -> &str {
        self.providers
            .frankfurter
            .as_ref()
            .map_or(FRANKFURTER_BASE_URL, |p| &p.base_url)
    }
}
