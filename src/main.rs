use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use quizgate::cli::Cli;
use quizgate::config::load_config;
use quizgate::startup;
use quizgate::utils::logger::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initialising logging: {}", e);
        return ExitCode::FAILURE;
    }

    match startup::run(Arc::new(config), cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
