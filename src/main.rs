use clap::{Parser, Subcommand};
use git_fleet::commands::*;
use git_fleet::core::{error::FleetError, print_error};
use env_logger::Env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "git-fleet")]
#[command(about = "Push, pull and inspect a fleet of git repositories at once")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ~/.config/git-fleet/config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Maximum number of repositories processed at once
    #[arg(long, global = true)]
    jobs: Option<usize>,

    /// Timeout in seconds for each git invocation
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Push bare repositories, pull all repositories and show their status
    Sync,
    /// Show the status of all repositories without contacting remotes
    Status,
}

fn report_failure(error: FleetError) -> ! {
    if let FleetError::ConfigNotFound { path } = &error {
        print_error(&format!(
            "No configuration found at {}. Create it or pass --config <FILE>",
            path.display()
        ));
    } else {
        print_error(&error.to_string());
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let options = RunOptions {
        config: cli.config,
        json: cli.json,
        jobs: cli.jobs,
        timeout_secs: cli.timeout,
    };

    let result = match cli.command {
        Commands::Sync => execute_sync(&options).await,
        Commands::Status => execute_status(&options).await,
    };

    if let Err(e) = result {
        report_failure(e);
    }
}
