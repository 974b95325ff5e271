use crate::error::Result;
use crate::storage::Storage;
use crate::types::{Group, Participant, WinnerRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;

pub const ROSTER_KEY: &str = "hr_tools_people";
pub const WINNERS_KEY: &str = "hr_tools_winners";
pub const GROUPS_KEY: &str = "hr_tools_groups";

/// Typed access to the persisted session: roster, winner history and the
/// last grouping result, each JSON-encoded under a fixed key.
pub struct SessionStore<'a> {
    storage: &'a Storage,
}

impl<'a> SessionStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn save_roster(&self, roster: &[Participant]) -> Result<()> {
        self.save(ROSTER_KEY, roster).await
    }

    /// Entries with a blank name or a repeated id are dropped.
    pub async fn load_roster(&self) -> Result<Vec<Participant>> {
        let stored: Vec<Participant> = self.load(ROSTER_KEY).await?;
        let total = stored.len();

        let mut seen = HashSet::new();
        let roster: Vec<Participant> = stored
            .into_iter()
            .filter(|p| !p.name.trim().is_empty() && seen.insert(p.id.clone()))
            .collect();

        if roster.len() < total {
            tracing::warn!(
                "Dropped {} saved participants with a blank name or repeated ID",
                total - roster.len()
            );
        }
        Ok(roster)
    }

    pub async fn save_winners(&self, history: &[WinnerRecord]) -> Result<()> {
        self.save(WINNERS_KEY, history).await
    }

    pub async fn load_winners(&self) -> Result<Vec<WinnerRecord>> {
        self.load(WINNERS_KEY).await
    }

    pub async fn save_groups(&self, groups: &[Group]) -> Result<()> {
        self.save(GROUPS_KEY, groups).await
    }

    pub async fn load_groups(&self) -> Result<Vec<Group>> {
        self.load(GROUPS_KEY).await
    }

    pub async fn clear_all(&self) -> Result<()> {
        for key in [ROSTER_KEY, WINNERS_KEY, GROUPS_KEY] {
            self.storage.delete(key).await?;
        }
        Ok(())
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.storage.put(key, &encoded).await
    }

    /// Missing or undecodable data loads as empty.
    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.storage.get(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!("Failed to parse saved data under '{}': {}", key, e);
                Ok(Vec::new())
            }
        }
    }
}
