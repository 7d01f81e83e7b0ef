use crate::core::news::NewsCategory;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// The three upstream data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Weather,
    Finance,
    News,
}

impl ProviderKind {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Weather => "https://api.openweathermap.org",
            ProviderKind::Finance => "https://www.alphavantage.co",
            ProviderKind::News => "https://newsapi.org",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Weather => "OPENWEATHER_API_KEY",
            ProviderKind::Finance => "ALPHAVANTAGE_API_KEY",
            ProviderKind::News => "NEWSAPI_API_KEY",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProviderConfig {
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub weather: Option<ProviderConfig>,
    pub finance: Option<ProviderConfig>,
    pub news: Option<ProviderConfig>,
}

fn default_location() -> String {
    "London".to_string()
}

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_category() -> String {
    "technology".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Unit system passed to the weather provider
    #[serde(default = "default_units")]
    pub units: String,
    /// Country filter for headlines
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            location: default_location(),
            symbol: default_symbol(),
            category: default_category(),
            units: default_units(),
            country: default_country(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "dashline", "dashline")
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

    pub fn news_category(&self) -> NewsCategory {
        NewsCategory::from_text(&self.category)
    }

    fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        match kind {
            ProviderKind::Weather => self.providers.weather.as_ref(),
            ProviderKind::Finance => self.providers.finance.as_ref(),
            ProviderKind::News => self.providers.news.as_ref(),
        }
    }

    pub fn base_url(&self, kind: ProviderKind) -> &str {
        self.provider(kind)
            .and_then(|p| p.base_url.as_deref())
            .unwrap_or(kind.default_base_url())
    }

    pub fn api_key_env(&self, kind: ProviderKind) -> &str {
        self.provider(kind)
            .and_then(|p| p.api_key_env.as_deref())
            .unwrap_or(kind.default_api_key_env())
    }

    /// Reads the provider's API key from the environment.
    pub fn api_key(&self, kind: ProviderKind) -> Result<String> {
        self.api_key_with(kind, env_key)
    }

    /// Resolves the provider's API key through `lookup`, which maps a variable
    /// name to its value.
    pub fn api_key_with(
        &self,
        kind: ProviderKind,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<String> {
        let var = self.api_key_env(kind);
        lookup(var)
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("Missing API key: set the {var} environment variable"))
    }
}

/// Key lookup backed by the process environment.
pub fn env_key(var: &str) -> Option<String> {
    std::env::var(var).ok()
}
