pub mod draw;
pub mod group;
pub mod roster;
pub mod session;

pub use draw::{handle_draw_command, DrawCommands};
pub use group::{handle_group_command, GroupCommands};
pub use roster::{handle_roster_command, RosterCommands};
pub use session::run_session;

use dialoguer::Confirm;
use hrtools_core::{AppState, HrError, Result};

pub async fn handle_clear(state: &mut AppState, force: bool) -> Result<()> {
    if !force && !confirm_clear()? {
        println!("Clear cancelled.");
        return Ok(());
    }

    state.clear_all().await?;
    println!("Roster, winners and groups cleared.");
    Ok(())
}

pub(crate) fn confirm_clear() -> Result<bool> {
    Confirm::new()
        .with_prompt("Clear the roster, all winners and all groups? This cannot be undone.")
        .default(false)
        .interact()
        .map_err(|e| HrError::dialog(e.to_string()))
}
