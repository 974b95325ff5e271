mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use hrtools_core::{AppState, Storage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hrtools")]
#[command(about = "HR Tools - roster import, prize draws and random grouping")]
#[command(version)]
struct Cli {
    /// Data directory for the session database
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
    /// Roster import and management
    #[command(subcommand)]
    Roster(commands::RosterCommands),

    /// Prize draw commands
    #[command(subcommand)]
    Draw(commands::DrawCommands),

    /// Random grouping and export
    #[command(subcommand)]
    Group(commands::GroupCommands),

    /// Clear roster, winners and groups
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Interactive session with roster, draw and grouping views
    Session,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "hrtools={},hrtools_core={}",
            log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CliConfig::load(cli.data_dir, cli.verbose)?;

    // Ensure data directory exists
    tokio::fs::create_dir_all(&config.data_dir).await?;

    let storage = Arc::new(Storage::new(&config.db_path()).await?);
    let mut state = AppState::open(storage, config.app.clone()).await?;

    // Execute command
    let result = match cli.command {
        Commands::Roster(cmd) => commands::handle_roster_command(cmd, &mut state).await,
        Commands::Draw(cmd) => commands::handle_draw_command(cmd, &mut state).await,
        Commands::Group(cmd) => commands::handle_group_command(cmd, &mut state).await,
        Commands::Clear { force } => commands::handle_clear(&mut state, force).await,
        Commands::Session => commands::run_session(&mut state).await,
    };

    if let Err(e) = result {
        if e.is_advisory() {
            println!("Notice: {}", e);
            return Ok(());
        }

        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
