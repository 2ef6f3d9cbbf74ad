mod commands;
mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use fairdraw_core::{DrawError, LotteryEngine, Storage};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fairdraw")]
#[command(about = "Verifiable random draws: names, numbers, teams, order and bingo")]
#[command(version)]
struct Cli {
    /// Data directory for history and saved lists
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a draw and print its proof
    #[command(subcommand)]
    Draw(commands::DrawCommands),

    /// Verify a proof from a file, stdin, URL or history code
    Verify(commands::VerifyArgs),

    /// Browse stored draws
    #[command(subcommand)]
    History(commands::HistoryCommands),

    /// Manage saved item lists
    #[command(subcommand)]
    Lists(commands::ListCommands),

    /// Print share text and verification URL for a stored draw
    Share {
        /// Verification code or draw ID
        code: String,
        /// Base URL of the verification page
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "fairdraw={},fairdraw_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Get data directory
    let data_dir = cli.data_dir.unwrap_or_else(config::default_data_dir);

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let config = CliConfig::load_or_create(&data_dir)?;
    let storage = Storage::open(&config.db_path())?;
    let engine = LotteryEngine::new(config.engine_config())?;

    // Execute command
    let result = match cli.command {
        Commands::Draw(cmd) => commands::handle_draw_command(cmd, &engine, &storage, &config),
        Commands::Verify(args) => commands::handle_verify_command(args, &engine, &storage, &config),
        Commands::History(cmd) => commands::handle_history_command(cmd, &storage),
        Commands::Lists(cmd) => commands::handle_list_command(cmd, &storage),
        Commands::Share { code, base_url } => {
            let base_url = base_url.unwrap_or_else(|| config.verify_base_url.clone());
            commands::share_draw(&storage, &code, &base_url)
        }
    };

    if let Err(e) = result {
        match &e {
            DrawError::InvalidInput(msg) => {
                eprintln!("Error: Invalid draw settings: {}", msg);
            }
            DrawError::ExhaustedAttempts { .. } => {
                eprintln!("Error: {}", e);
                eprintln!("The range is too small for this many distinct numbers");
            }
            DrawError::ResultMismatch | DrawError::HashMismatch { .. } => {
                eprintln!("Error: {}", e);
                eprintln!("This proof has been altered since the draw was made");
            }
            DrawError::NotFound(what) => {
                eprintln!("Error: {} not found", what);
                eprintln!("Use 'fairdraw history list' or 'fairdraw lists list' to see stored entries");
            }
            _ => {
                eprintln!("Error: {}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
