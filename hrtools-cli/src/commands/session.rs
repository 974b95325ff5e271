//! Interactive session mirroring the three views: roster, prize draw and
//! grouping.

use crate::commands::confirm_clear;
use crate::commands::draw::{print_history, run_draw};
use crate::commands::group::{export_groups, print_groups};
use crate::commands::roster::{print_roster, warn_duplicates};
use dialoguer::{Input, Select};
use hrtools_core::{AppState, ExportFormat, GroupingPolicy, HrError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Roster,
    Draw,
    Grouping,
}

pub async fn run_session(state: &mut AppState) -> Result<()> {
    loop {
        println!();
        println!(
            "Loaded: {} people | Winners: {} | Groups: {}",
            state.roster().len(),
            state.winners().len(),
            state.groups().len()
        );

        let choice = select(
            "Choose a view",
            &["Roster import", "Prize draw", "Grouping", "Clear all", "Quit"],
        )?;

        let result = match choice {
            0 => run_view(state, View::Roster).await,
            1 => run_view(state, View::Draw).await,
            2 => run_view(state, View::Grouping).await,
            3 => clear_all(state).await,
            _ => return Ok(()),
        };

        report(result)?;
    }
}

async fn run_view(state: &mut AppState, view: View) -> Result<()> {
    loop {
        let keep_going = match view {
            View::Roster => roster_view(state).await,
            View::Draw => draw_view(state).await,
            View::Grouping => grouping_view(state).await,
        };

        match keep_going {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(e) => report(Err(e))?,
        }
    }
}

/// Advisories are shown and the session continues.
fn report(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_advisory() => {
            println!("Notice: {}", e);
            Ok(())
        }
        other => other,
    }
}

async fn roster_view(state: &mut AppState) -> Result<bool> {
    let choice = select(
        "Roster",
        &[
            "Add names",
            "Import file",
            "Load sample names",
            "Show roster",
            "Remove a participant",
            "Remove duplicates",
            "Back",
        ],
    )?;

    match choice {
        0 => {
            let raw: String = prompt("Names (separate with commas)")?;
            let added = state.add_names(&raw).await?;
            println!("Added {} names.", added);
            warn_duplicates(state);
        }
        1 => {
            let path: String = prompt("Path to a .txt or .csv file")?;
            let added = state.import_file(&PathBuf::from(path.trim())).await?;
            println!("Imported {} names.", added);
            warn_duplicates(state);
        }
        2 => {
            let added = state.load_mock().await?;
            println!("Loaded {} sample names.", added);
        }
        3 => print_roster(state),
        4 => {
            if state.roster().is_empty() {
                return Err(HrError::EmptyRoster);
            }

            let labels: Vec<String> = state
                .roster()
                .participants()
                .iter()
                .map(|p| format!("{} ({})", p.name, p.id))
                .collect();
            let idx = select("Remove who?", &labels)?;
            let id = state.roster().participants()[idx].id.clone();
            state.remove_participant(&id).await?;
            println!("Removed {}.", labels[idx]);
        }
        5 => {
            let removed = state.remove_duplicates().await?;
            println!("Removed {} duplicate entries.", removed);
        }
        _ => return Ok(false),
    }

    Ok(true)
}

async fn draw_view(state: &mut AppState) -> Result<bool> {
    let settings = state.engine().settings().clone();
    println!(
        "Prize: {} | Repeat winners: {} | Pool: {}",
        settings.prize,
        if settings.allow_duplicates { "allowed" } else { "excluded" },
        state.eligible_pool().len()
    );

    let choice = select(
        "Prize draw",
        &[
            "Draw",
            "Set prize",
            "Toggle repeat winners",
            "Winner history",
            "Remove a winner record",
            "Back",
        ],
    )?;

    match choice {
        0 => {
            run_draw(state, true).await?;
        }
        1 => {
            let prize: String = Input::new()
                .with_prompt("Prize name")
                .with_initial_text(settings.prize)
                .interact_text()
                .map_err(|e| HrError::dialog(e.to_string()))?;
            state.set_prize(prize.trim());
        }
        2 => state.set_allow_duplicates(!settings.allow_duplicates),
        3 => print_history(state.winners()),
        4 => {
            if state.winners().is_empty() {
                println!("No winners yet.");
                return Ok(true);
            }

            let labels: Vec<String> = state
                .winners()
                .iter()
                .map(|w| format!("{} - {} ({})", w.name, w.prize, w.won_at.format("%H:%M:%S")))
                .collect();
            let idx = select("Remove which record?", &labels)?;
            let removed = state.remove_winner(idx).await?;
            println!("Removed record for {}.", removed.name);
        }
        _ => return Ok(false),
    }

    Ok(true)
}

async fn grouping_view(state: &mut AppState) -> Result<bool> {
    let choice = select(
        "Grouping",
        &[
            "Group by members per group",
            "Group by number of groups",
            "Show groups",
            "Export as CSV",
            "Export as TXT",
            "Back",
        ],
    )?;

    match choice {
        0 | 1 => {
            if state.roster().is_empty() {
                return Err(HrError::EmptyRoster);
            }

            let policy = if choice == 0 {
                let size = prompt_number("Members per group", state.config().default_group_size)?;
                GroupingPolicy::BySize(size)
            } else {
                let count = prompt_number("Number of groups", state.config().default_group_count)?;
                GroupingPolicy::ByCount(count)
            };

            state.regroup(policy).await?;
            print_groups(state.groups());
        }
        2 => print_groups(state.groups()),
        3 | 4 => {
            let format = if choice == 3 {
                ExportFormat::Csv
            } else {
                ExportFormat::Text
            };
            let path = export_groups(state, format, &PathBuf::from(".")).await?;
            println!("Saved {}", path.display());
        }
        _ => return Ok(false),
    }

    Ok(true)
}

async fn clear_all(state: &mut AppState) -> Result<()> {
    if confirm_clear()? {
        state.clear_all().await?;
        println!("Everything cleared.");
    }
    Ok(())
}

fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| HrError::dialog(e.to_string()))
}

fn prompt(prompt: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| HrError::dialog(e.to_string()))
}

/// Values below 1 are clamped to 1.
fn prompt_number(prompt: &str, default: usize) -> Result<usize> {
    let value: usize = Input::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(|e| HrError::dialog(e.to_string()))?;
    Ok(value.max(1))
}
