use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use hrtools_core::{AppState, Result};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum RosterCommands {
    /// Add names separated by newlines or commas
    Add {
        /// One or more names, e.g. "Alice, Bob"
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Import names from a UTF-8 .txt or .csv file
    Import {
        /// File to import
        path: PathBuf,
    },
    /// Load the built-in sample names
    Mock,
    /// List the roster
    List,
    /// Remove a participant by ID
    Remove {
        /// Participant ID
        id: String,
    },
    /// Keep only the first entry for each repeated name
    Dedupe,
    /// Show names that appear more than once
    Duplicates,
}

pub async fn handle_roster_command(cmd: RosterCommands, state: &mut AppState) -> Result<()> {
    match cmd {
        RosterCommands::Add { names } => {
            let added = state.add_names(&names.join("\n")).await?;
            println!("Added {} names. Roster now has {}.", added, state.roster().len());
            warn_duplicates(state);
        }

        RosterCommands::Import { path } => {
            let added = state.import_file(&path).await?;
            println!(
                "Imported {} names from {}. Roster now has {}.",
                added,
                path.display(),
                state.roster().len()
            );
            warn_duplicates(state);
        }

        RosterCommands::Mock => {
            let added = state.load_mock().await?;
            println!("Loaded {} sample names.", added);
        }

        RosterCommands::List => print_roster(state),

        RosterCommands::Remove { id } => {
            let Some(name) = state.roster().get(&id).map(|p| p.name.clone()) else {
                println!("No participant with ID {}.", id);
                return Ok(());
            };

            state.remove_participant(&id).await?;
            println!("Removed {} ({}).", name, id);
        }

        RosterCommands::Dedupe => {
            let removed = state.remove_duplicates().await?;
            if removed == 0 {
                println!("No duplicate names found.");
            } else {
                println!("Removed {} duplicate entries.", removed);
            }
        }

        RosterCommands::Duplicates => {
            let mut names: Vec<String> = state.roster().duplicate_names().into_iter().collect();
            if names.is_empty() {
                println!("No duplicate names found.");
            } else {
                names.sort();
                println!("Duplicate names: {}", names.join(", "));
            }
        }
    }

    Ok(())
}

pub(crate) fn print_roster(state: &AppState) {
    let roster = state.roster();
    if roster.is_empty() {
        println!("The roster is empty.");
        println!("Add names with: hrtools roster add \"Alice, Bob\"");
        return;
    }

    let duplicates = roster.duplicate_names();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "ID", "Duplicate"]);

    for (idx, person) in roster.participants().iter().enumerate() {
        let flag = if duplicates.contains(&person.name) { "yes" } else { "" };
        table.add_row(vec![
            (idx + 1).to_string(),
            person.name.clone(),
            person.id.clone(),
            flag.to_string(),
        ]);
    }

    println!("{}", table);
    println!("Loaded: {} people", roster.len());
}

pub(crate) fn warn_duplicates(state: &AppState) {
    let mut names: Vec<String> = state.roster().duplicate_names().into_iter().collect();
    if !names.is_empty() {
        names.sort();
        println!("Warning: duplicate names detected: {}", names.join(", "));
        println!("Run 'hrtools roster dedupe' to keep only the first of each.");
    }
}
