use hrtools_core::{AppConfig, AppState, ExportFormat, GroupingPolicy, Storage};
use std::sync::Arc;
use tempfile::tempdir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create temp dir
    let temp_dir = tempdir()?;
    println!("Using temporary directory: {:?}", temp_dir.path());

    let storage = Arc::new(Storage::new(&temp_dir.path().join("hrtools.db")).await?);
    let mut state = AppState::open(storage, AppConfig::default()).await?;

    let added = state.load_mock().await?;
    println!("Loaded {} sample participants", added);

    state.set_prize("Team Dinner");
    let winner = state.draw().await?;
    println!("\nWinner: {} ({})", winner.name, winner.prize);
    println!("Remaining pool: {}", state.eligible_pool().len());

    state.regroup(GroupingPolicy::ByCount(4)).await?;
    println!("\n{}", state.export(ExportFormat::Text)?);
    println!("\nCSV would be saved as {}", state.export_filename(ExportFormat::Csv));

    Ok(())
}
