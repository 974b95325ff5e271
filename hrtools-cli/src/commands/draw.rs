use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use hrtools_core::{AppState, HrError, RevealFrame, Result, WinnerRecord};
use std::io::Write;

#[derive(Subcommand)]
pub enum DrawCommands {
    /// Draw one winner from the eligible pool
    Run {
        /// Prize label recorded with the winner
        #[arg(short, long)]
        prize: Option<String>,
        /// Let past winners be drawn again
        #[arg(short, long)]
        allow_duplicates: bool,
        /// Skip the name reveal and draw immediately
        #[arg(long)]
        no_reveal: bool,
    },
    /// Show who is eligible for the next draw
    Pool {
        /// Include past winners
        #[arg(short, long)]
        allow_duplicates: bool,
    },
    /// Show winner history, most recent first
    History,
    /// Remove a winner record by its number in the history
    Undo {
        /// Record number as shown by `draw history`
        number: usize,
    },
}

pub async fn handle_draw_command(cmd: DrawCommands, state: &mut AppState) -> Result<()> {
    match cmd {
        DrawCommands::Run {
            prize,
            allow_duplicates,
            no_reveal,
        } => {
            if let Some(prize) = prize {
                state.set_prize(prize);
            }
            if allow_duplicates {
                state.set_allow_duplicates(true);
            }

            run_draw(state, !no_reveal).await?;
        }

        DrawCommands::Pool { allow_duplicates } => {
            if allow_duplicates {
                state.set_allow_duplicates(true);
            }

            let pool = state.eligible_pool();
            println!("Draw pool: {} of {} people", pool.len(), state.roster().len());
            for person in &pool {
                println!("  {} ({})", person.name, person.id);
            }
        }

        DrawCommands::History => print_history(state.winners()),

        DrawCommands::Undo { number } => {
            let removed = state.remove_winner(history_index(number)?).await?;
            println!(
                "Removed winner record: {} - {} ({})",
                removed.name,
                removed.prize,
                removed.won_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    Ok(())
}

/// Draw one winner, optionally after a reveal over the frozen pool.
pub(crate) async fn run_draw(state: &mut AppState, reveal: bool) -> Result<WinnerRecord> {
    let prize = state.engine().settings().prize.clone();

    let record = if reveal {
        let mut handle = state.start_reveal()?;
        println!("Drawing {}...", prize);

        let mut finished = false;
        while let Some(frame) = handle.next_frame().await {
            match frame {
                RevealFrame::Tick(name) => {
                    print!("\r  {:<40}", name);
                    let _ = std::io::stdout().flush();
                }
                RevealFrame::Finished => {
                    finished = true;
                    break;
                }
            }
        }
        println!();

        if !finished {
            return Err(HrError::internal("Reveal was cancelled"));
        }
        state.complete_reveal(&handle).await?
    } else {
        state.draw().await?
    };

    println!("Congratulations! {} wins {}", record.name, record.prize);
    println!("Remaining pool: {}", state.eligible_pool().len());
    Ok(record)
}

pub(crate) fn print_history(history: &[WinnerRecord]) {
    if history.is_empty() {
        println!("No winners yet.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Name", "Prize", "Time", "ID"]);

    for (idx, winner) in history.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            winner.name.clone(),
            winner.prize.clone(),
            winner.won_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            winner.id.clone(),
        ]);
    }

    println!("{}", table);
}

/// History numbers are 1-based on screen.
pub(crate) fn history_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| HrError::invalid_input("Record numbers start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrtools_core::AppConfig;

    #[test]
    fn test_history_index() {
        assert_eq!(history_index(1).unwrap(), 0);
        assert_eq!(history_index(5).unwrap(), 4);
        assert!(history_index(0).is_err());
    }

    #[tokio::test]
    async fn test_run_draw_without_reveal() {
        let mut state = AppState::in_memory(AppConfig::default());
        state.add_names("Alice").await.unwrap();

        let record = run_draw(&mut state, false).await.unwrap();
        assert_eq!(record.name, "Alice");
        assert!(matches!(run_draw(&mut state, false).await, Err(HrError::EmptyPool)));
    }

    #[tokio::test]
    async fn test_run_draw_with_reveal() {
        let mut config = AppConfig::default();
        config.reveal.duration_ms = 10;
        config.reveal.interval_ms = 2;

        let mut state = AppState::in_memory(config);
        state.add_names("Alice, Bob").await.unwrap();

        run_draw(&mut state, true).await.unwrap();
        assert_eq!(state.winners().len(), 1);
        assert_eq!(state.eligible_pool().len(), 1);
    }
}
