pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::dashboard::{Dashboard, Inputs, PanelSelection};
use crate::core::config::{AppConfig, env_key};
use crate::core::news::NewsCategory;
use anyhow::Result;
use tracing::{debug, info};

/// Commands that need a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// All three panels, once
    Dashboard,
    Weather(Option<String>),
    Stock(Option<String>),
    News(Option<String>),
    /// Interactive mode reading input changes from stdin
    Watch,
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Applies command arguments over the configured inputs.
fn resolve(cmd: &AppCommand, config: &AppConfig) -> (Inputs, PanelSelection) {
    let mut inputs = Inputs::from_config(config);
    let selection = match cmd {
        AppCommand::Dashboard | AppCommand::Watch => PanelSelection::All,
        AppCommand::Weather(location) => {
            if let Some(location) = location {
                inputs.location = location.clone();
            }
            PanelSelection::Weather
        }
        AppCommand::Stock(symbol) => {
            if let Some(symbol) = symbol {
                inputs.symbol = symbol.clone();
            }
            PanelSelection::Stock
        }
        AppCommand::News(category) => {
            if let Some(category) = category {
                inputs.category = NewsCategory::from_text(category);
            }
            PanelSelection::News
        }
    };
    (inputs, selection)
}

/// Runs `cmd` with API keys read from the environment.
pub async fn run_command(cmd: AppCommand, config_path: Option<&str>) -> Result<()> {
    run_command_with_keys(cmd, config_path, env_key).await
}

/// Runs `cmd` with API keys resolved through `keys`, which maps the configured
/// variable name to its value.
pub async fn run_command_with_keys(
    cmd: AppCommand,
    config_path: Option<&str>,
    keys: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    info!(?cmd, "dashline starting...");
    let config = load_config(config_path)?;
    let (inputs, selection) = resolve(&cmd, &config);
    let dashboard = Dashboard::with_keys(&config, keys);

    match cmd {
        AppCommand::Watch => cli::watch::run(&dashboard, inputs).await,
        _ => cli::dashboard::run(&dashboard, &inputs, selection).await,
    }
}
