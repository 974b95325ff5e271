use crate::config::AppConfig;
use crate::draw::{
    compute_eligible_pool, DrawEngine, DrawSettings, RevealController, RevealHandle,
};
use crate::error::{HrError, Result};
use crate::export::{export_filename, ExportFormat};
use crate::grouping::{group, GroupingPolicy};
use crate::roster::Roster;
use crate::storage::{SessionStore, Storage};
use crate::types::{Group, Participant, WinnerRecord};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Single owner of the roster, the draw engine and the last grouping result.
/// Every mutation is written through to storage when one is attached.
pub struct AppState {
    config: AppConfig,
    storage: Option<Arc<Storage>>,
    roster: Roster,
    engine: DrawEngine,
    groups: Vec<Group>,
    reveal: RevealController,
}

impl AppState {
    pub fn in_memory(config: AppConfig) -> Self {
        let settings = DrawSettings {
            prize: config.default_prize.clone(),
            allow_duplicates: config.allow_duplicates,
        };

        Self {
            config,
            storage: None,
            roster: Roster::new(),
            engine: DrawEngine::new(settings),
            groups: Vec::new(),
            reveal: RevealController::new(),
        }
    }

    /// Rehydrate from storage. Corrupt entries load as empty.
    pub async fn open(storage: Arc<Storage>, config: AppConfig) -> Result<Self> {
        config.validate()?;

        let store = SessionStore::new(&storage);
        let roster = store.load_roster().await?;
        let winners = store.load_winners().await?;
        let groups = store.load_groups().await?;

        tracing::info!(
            "Loaded session: {} participants, {} winners, {} groups",
            roster.len(),
            winners.len(),
            groups.len()
        );

        let mut state = Self::in_memory(config);
        state.roster = Roster::from_participants(roster);
        state.engine = DrawEngine::with_history(state.engine.settings().clone(), winners);
        state.groups = groups;
        state.storage = Some(storage);
        Ok(state)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn winners(&self) -> &[WinnerRecord] {
        self.engine.history()
    }

    pub fn eligible_pool(&self) -> Vec<Participant> {
        self.engine.pool(self.roster.participants())
    }

    pub fn set_prize(&mut self, prize: impl Into<String>) {
        self.engine.set_prize(prize);
    }

    pub fn set_allow_duplicates(&mut self, allow: bool) {
        self.engine.set_allow_duplicates(allow);
    }

    pub async fn add_names(&mut self, raw: &str) -> Result<usize> {
        let previous = self.roster.clone();
        let added = self.roster.add_text(raw)?;
        self.commit_roster(previous).await?;
        Ok(added)
    }

    pub async fn import_file(&mut self, path: &Path) -> Result<usize> {
        let previous = self.roster.clone();
        let added = self.roster.import_file(path).await?;
        self.commit_roster(previous).await?;
        Ok(added)
    }

    pub async fn load_mock(&mut self) -> Result<usize> {
        let previous = self.roster.clone();
        let added = self.roster.load_mock();
        self.commit_roster(previous).await?;
        Ok(added)
    }

    pub async fn remove_participant(&mut self, id: &str) -> Result<bool> {
        let previous = self.roster.clone();
        let removed = self.roster.remove(id);
        if removed {
            self.commit_roster(previous).await?;
        }
        Ok(removed)
    }

    pub async fn remove_duplicates(&mut self) -> Result<usize> {
        let previous = self.roster.clone();
        let removed = self.roster.remove_duplicates();
        if removed > 0 {
            self.commit_roster(previous).await?;
        }
        Ok(removed)
    }

    /// Immediate draw without a reveal. Cancels any reveal still running.
    pub async fn draw(&mut self) -> Result<WinnerRecord> {
        self.reveal.cancel();

        let previous = self.engine.history().to_vec();
        let record = self.engine.draw(self.roster.participants())?;
        self.commit_winners(previous).await?;
        Ok(record)
    }

    /// Freeze the current pool and start a reveal over it, cancelling any
    /// reveal still running.
    pub fn start_reveal(&mut self) -> Result<RevealHandle> {
        let pool = self.eligible_pool();
        self.reveal.start(pool, self.config.reveal)
    }

    /// The one real draw, made against the pool frozen by `start_reveal`.
    /// Only the most recent reveal can be completed, and only once. Anyone
    /// who has won since the snapshot stays excluded.
    pub async fn complete_reveal(&mut self, handle: &RevealHandle) -> Result<WinnerRecord> {
        self.reveal.settle(handle)?;

        let settings = self.engine.settings();
        let pool = compute_eligible_pool(
            handle.pool(),
            self.engine.history(),
            settings.allow_duplicates,
        );

        let previous = self.engine.history().to_vec();
        let record = self.engine.draw_from_pool(&pool)?;
        self.commit_winners(previous).await?;
        Ok(record)
    }

    pub fn cancel_reveal(&mut self) {
        self.reveal.cancel();
    }

    pub async fn remove_winner(&mut self, index: usize) -> Result<WinnerRecord> {
        let previous = self.engine.history().to_vec();
        let removed = self.engine.remove_winner(index)?;
        self.commit_winners(previous).await?;
        Ok(removed)
    }

    /// Replace the previous grouping result wholesale.
    pub async fn regroup(&mut self, policy: GroupingPolicy) -> Result<&[Group]> {
        let groups = group(self.roster.participants(), policy)?;
        if let Some(storage) = &self.storage {
            SessionStore::new(storage).save_groups(&groups).await?;
        }

        self.groups = groups;
        Ok(&self.groups)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        if self.groups.is_empty() {
            return Err(HrError::invalid_input(
                "No groups to export, run a grouping first",
            ));
        }
        Ok(format.render(&self.groups))
    }

    pub fn export_filename(&self, format: ExportFormat) -> String {
        export_filename(&self.config.export_prefix, format, Utc::now())
    }

    /// Discard roster, winners and groups together.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.reveal.cancel();
        self.roster.clear();
        self.engine.clear();
        self.groups.clear();

        if let Some(storage) = &self.storage {
            SessionStore::new(storage).clear_all().await?;
        }

        tracing::info!("Cleared roster, winners and groups");
        Ok(())
    }

    /// Persist the roster, restoring `previous` if the write fails.
    async fn commit_roster(&mut self, previous: Roster) -> Result<()> {
        if let Some(storage) = &self.storage {
            let saved = SessionStore::new(storage)
                .save_roster(self.roster.participants())
                .await;
            if let Err(e) = saved {
                self.roster = previous;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Persist the winner history, restoring `previous` if the write fails.
    async fn commit_winners(&mut self, previous: Vec<WinnerRecord>) -> Result<()> {
        if let Some(storage) = &self.storage {
            let saved = SessionStore::new(storage)
                .save_winners(self.engine.history())
                .await;
            if let Err(e) = saved {
                self.engine.restore_history(previous);
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealConfig;
    use crate::draw::RevealFrame;
    use tempfile::tempdir;

    fn fast_config() -> AppConfig {
        AppConfig {
            reveal: RevealConfig {
                duration_ms: 10,
                interval_ms: 1,
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("hrtools.db");

        {
            let storage = Arc::new(Storage::new(&db_path).await.unwrap());
            let mut state = AppState::open(storage, AppConfig::default()).await.unwrap();
            state.add_names("Alice, Bob\nCarol，Dave").await.unwrap();
            state.draw().await.unwrap();
            state.regroup(GroupingPolicy::BySize(2)).await.unwrap();
        }

        let storage = Arc::new(Storage::new(&db_path).await.unwrap());
        let state = AppState::open(storage, AppConfig::default()).await.unwrap();
        assert_eq!(state.roster().len(), 4);
        assert_eq!(state.winners().len(), 1);
        assert_eq!(state.groups().len(), 2);
        assert_eq!(state.eligible_pool().len(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_roster_starts_empty() {
        let storage = Arc::new(Storage::in_memory().await.unwrap());
        storage
            .put(crate::storage::session_store::ROSTER_KEY, "garbage")
            .await
            .unwrap();

        let state = AppState::open(storage, AppConfig::default()).await.unwrap();
        assert!(state.roster().is_empty());
    }

    #[tokio::test]
    async fn test_advisories_leave_state_untouched() {
        let mut state = AppState::in_memory(AppConfig::default());

        assert!(matches!(state.draw().await, Err(HrError::EmptyPool)));
        assert!(matches!(
            state.regroup(GroupingPolicy::ByCount(2)).await,
            Err(HrError::EmptyRoster)
        ));
        assert!(matches!(state.add_names("  ").await, Err(HrError::EmptyInput)));
        assert!(state.export(ExportFormat::Csv).is_err());

        assert!(state.winners().is_empty());
        assert!(state.groups().is_empty());
    }

    #[tokio::test]
    async fn test_regroup_replaces_previous_result() {
        let mut state = AppState::in_memory(AppConfig::default());
        state.load_mock().await.unwrap();

        state.regroup(GroupingPolicy::BySize(5)).await.unwrap();
        assert_eq!(state.groups().len(), 5);

        state.regroup(GroupingPolicy::ByCount(2)).await.unwrap();
        assert_eq!(state.groups().len(), 2);
        let total: usize = state.groups().iter().map(Group::len).sum();
        assert_eq!(total, state.roster().len());

        let text = state.export(ExportFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_reveal_draws_from_frozen_pool() {
        let mut state = AppState::in_memory(fast_config());
        state.add_names("Alice, Bob").await.unwrap();

        let mut handle = state.start_reveal().unwrap();

        // roster changes after the reveal started do not affect the draw
        let bob = state.roster().participants()[1].id.clone();
        state.remove_participant(&bob).await.unwrap();
        state.add_names("Mallory").await.unwrap();

        while let Some(frame) = handle.next_frame().await {
            if frame == RevealFrame::Finished {
                break;
            }
        }

        let record = state.complete_reveal(&handle).await.unwrap();
        assert!(record.name == "Alice" || record.name == "Bob");
        assert_eq!(state.winners().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let temp_dir = tempdir().unwrap();
        let storage = Arc::new(Storage::new(&temp_dir.path().join("hrtools.db")).await.unwrap());

        let mut state = AppState::open(storage.clone(), AppConfig::default())
            .await
            .unwrap();
        state.add_names("A,B,C").await.unwrap();
        state.draw().await.unwrap();
        state.regroup(GroupingPolicy::BySize(2)).await.unwrap();

        state.clear_all().await.unwrap();
        assert!(state.roster().is_empty());
        assert!(state.winners().is_empty());
        assert!(state.groups().is_empty());

        let reopened = AppState::open(storage, AppConfig::default()).await.unwrap();
        assert!(reopened.roster().is_empty());
        assert!(reopened.winners().is_empty());
    }

    #[tokio::test]
    async fn test_remove_winner_returns_participant_to_pool() {
        let mut state = AppState::in_memory(AppConfig::default());
        state.add_names("Solo").await.unwrap();

        state.draw().await.unwrap();
        assert!(state.eligible_pool().is_empty());

        state.remove_winner(0).await.unwrap();
        assert_eq!(state.eligible_pool().len(), 1);
        assert!(matches!(
            state.remove_winner(0).await,
            Err(HrError::WinnerNotFound(0))
        ));
    }
    #[tokio::test]
    async fn test_draw_cancels_running_reveal() {
        let mut state = AppState::in_memory(fast_config());
        state.add_names("Solo").await.unwrap();

        let handle = state.start_reveal().unwrap();
        state.draw().await.unwrap();

        assert!(matches!(
            state.complete_reveal(&handle).await,
            Err(HrError::StaleReveal)
        ));
        assert_eq!(state.winners().len(), 1);
    }

    #[tokio::test]
    async fn test_only_latest_reveal_completes_once() {
        let mut state = AppState::in_memory(fast_config());
        state.add_names("A, B").await.unwrap();

        let first = state.start_reveal().unwrap();
        let second = state.start_reveal().unwrap();

        assert!(matches!(
            state.complete_reveal(&first).await,
            Err(HrError::StaleReveal)
        ));
        state.complete_reveal(&second).await.unwrap();
        assert!(matches!(
            state.complete_reveal(&second).await,
            Err(HrError::StaleReveal)
        ));
        assert_eq!(state.winners().len(), 1);
    }

    #[tokio::test]
    async fn test_reveal_excludes_winners_when_duplicates_turned_off() {
        let mut state = AppState::in_memory(fast_config());
        state.add_names("Solo").await.unwrap();
        state.draw().await.unwrap();

        state.set_allow_duplicates(true);
        let handle = state.start_reveal().unwrap();
        assert_eq!(handle.pool().len(), 1);

        state.set_allow_duplicates(false);
        assert!(matches!(
            state.complete_reveal(&handle).await,
            Err(HrError::EmptyPool)
        ));
        assert_eq!(state.winners().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_winners() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("hrtools.db");
        let storage = Arc::new(Storage::new(&db_path).await.unwrap());

        let mut state = AppState::open(storage, AppConfig::default()).await.unwrap();
        state.add_names("Alice, Bob").await.unwrap();
        state.draw().await.unwrap();

        rusqlite::Connection::open(&db_path)
            .unwrap()
            .execute("DROP TABLE kv_store", [])
            .unwrap();

        assert!(matches!(state.draw().await, Err(HrError::Storage(_))));
        assert_eq!(state.winners().len(), 1);

        assert!(matches!(state.remove_winner(0).await, Err(HrError::Storage(_))));
        assert_eq!(state.winners().len(), 1);

        assert!(matches!(state.add_names("Carol").await, Err(HrError::Storage(_))));
        assert_eq!(state.roster().len(), 2);
    }
}
