use anyhow::Result;
use clap::{Parser, Subcommand};
use dashline::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for dashline::AppCommand {
    fn from(cmd: Commands) -> dashline::AppCommand {
        match cmd {
            Commands::Dashboard => dashline::AppCommand::Dashboard,
            Commands::Weather { location } => dashline::AppCommand::Weather(location),
            Commands::Stock { symbol } => dashline::AppCommand::Stock(symbol),
            Commands::News { category } => dashline::AppCommand::News(category),
            Commands::Watch => dashline::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display weather, stock and news panels (default)
    Dashboard,
    /// Display current weather and the daily forecast
    Weather {
        /// City name, defaults to the configured location
        location: Option<String>,
    },
    /// Display recent closing prices and the daily change
    Stock {
        /// Ticker symbol, defaults to the configured symbol
        symbol: Option<String>,
    },
    /// Display top headlines
    News {
        /// Headline category, defaults to the configured category
        category: Option<String>,
    },
    /// Interactively change inputs and watch panels update
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Setup => dashline::cli::setup::setup(),
        cmd => dashline::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
