//! `shipyard` binary entry point

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use shipyard_cli::cli::{Cli, Commands};
use shipyard_cli::commands;
use shipyard_cli::error::CliError;
use shipyard_cli::logging;
use shipyard_cli::output::OutputWriter;
use shipyard_core::config::GeneralConfig;
use shipyard_core::error::ShipyardError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            if let CliError::Core(ShipyardError::Command(failure)) = &e {
                if !failure.output.is_empty() {
                    eprintln!("{}", failure.output);
                }
            }
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config: config_path,
        log_level,
        output,
        command,
    } = cli;
    let writer = OutputWriter::new(output);

    // config commands report load failures themselves
    if let Commands::Config(args) = command {
        let general = GeneralConfig {
            log_level: log_level.unwrap_or_else(|| "warn".to_owned()),
            ..GeneralConfig::default()
        };
        logging::init_tracing(&general)?;
        return commands::config::execute(args, &config_path, &writer).await;
    }

    let config = commands::load_config(&config_path, log_level.as_deref()).await?;
    logging::init_tracing(&config.general)?;
    debug!(path = %config_path.display(), "configuration loaded");

    match command {
        Commands::Status(args) => commands::status::execute(args, &config, &writer).await,
        Commands::Check(args) => commands::check::execute(args, &config, &writer).await,
        Commands::Ps(args) => commands::ps::execute(args, &config, &writer).await,
        Commands::Dockerfile(args) => commands::dockerfile::execute(args, &config, &writer).await,
        Commands::Logs(args) => commands::logs::execute(args, &config, &writer).await,
        Commands::Config(_) => unreachable!("config commands return before configuration loading"),
    }
}
