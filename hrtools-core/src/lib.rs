//! HR Tools - core library for roster management, prize draws and random
//! grouping.
//!
//! The roster feeds both the draw engine and the grouping engine; their
//! results never flow back into the roster. [`AppState`] owns all three and
//! writes every change through to a small SQLite key-value store.

pub mod config;
pub mod draw;
pub mod error;
pub mod export;
pub mod grouping;
pub mod random;
pub mod roster;
pub mod state;
pub mod storage;
pub mod types;

pub use config::{AppConfig, RevealConfig};
pub use draw::{compute_eligible_pool, DrawEngine, DrawSettings, RevealController, RevealFrame};
pub use error::{HrError, Result};
pub use export::{export_csv, export_text, ExportFormat, TabularRow};
pub use grouping::{group, GroupingPolicy};
pub use random::{chunk, shuffle};
pub use roster::{find_duplicate_names, parse_names, Roster};
pub use state::AppState;
pub use storage::{SessionStore, Storage};
pub use types::{Group, Participant, WinnerRecord};
