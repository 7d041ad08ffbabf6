use clap::{Parser, Subcommand};
use esg_core::EngineConfig;

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "esg-score", version, about = "ESG assessment scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Built-in questionnaires
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Score an answer sheet and build a report
    Assess(commands::assess::AssessArgs),
    /// Exported results
    Results {
        #[command(subcommand)]
        action: commands::results::ResultsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = telemetry::init(&config.logging.level) {
        eprintln!("warning: {e}");
    }

    let result = match cli.command {
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Assess(args) => commands::assess::run(args, &config),
        Commands::Results { action } => commands::results::run(action),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
