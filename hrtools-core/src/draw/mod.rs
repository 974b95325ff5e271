pub mod reveal;

pub use reveal::{RevealController, RevealFrame, RevealHandle};

use crate::error::{HrError, Result};
use crate::random::pick_index;
use crate::types::{Participant, WinnerRecord};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawSettings {
    pub prize: String,
    pub allow_duplicates: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            prize: "Grand Prize".to_string(),
            allow_duplicates: false,
        }
    }
}

/// Participants eligible for the next draw. Past winners are excluded by id
/// unless duplicates are allowed.
pub fn compute_eligible_pool(
    roster: &[Participant],
    history: &[WinnerRecord],
    allow_duplicates: bool,
) -> Vec<Participant> {
    if allow_duplicates {
        return roster.to_vec();
    }

    let winner_ids: HashSet<&str> = history.iter().map(|w| w.id.as_str()).collect();
    roster
        .iter()
        .filter(|p| !winner_ids.contains(p.id.as_str()))
        .cloned()
        .collect()
}

/// Prize draw state: settings plus winner history, most recent first.
#[derive(Debug, Clone, Default)]
pub struct DrawEngine {
    settings: DrawSettings,
    history: Vec<WinnerRecord>,
}

impl DrawEngine {
    pub fn new(settings: DrawSettings) -> Self {
        Self {
            settings,
            history: Vec::new(),
        }
    }

    pub fn with_history(settings: DrawSettings, history: Vec<WinnerRecord>) -> Self {
        Self { settings, history }
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn set_prize(&mut self, prize: impl Into<String>) {
        self.settings.prize = prize.into();
    }

    pub fn set_allow_duplicates(&mut self, allow: bool) {
        self.settings.allow_duplicates = allow;
    }

    pub fn history(&self) -> &[WinnerRecord] {
        &self.history
    }

    pub fn pool(&self, roster: &[Participant]) -> Vec<Participant> {
        compute_eligible_pool(roster, &self.history, self.settings.allow_duplicates)
    }

    pub fn draw(&mut self, roster: &[Participant]) -> Result<WinnerRecord> {
        let pool = self.pool(roster);
        self.draw_from_pool(&pool)
    }

    /// Draw against a pool snapshot taken earlier, e.g. when a reveal started.
    pub fn draw_from_pool(&mut self, pool: &[Participant]) -> Result<WinnerRecord> {
        self.draw_from_pool_with(pool, &mut rand::thread_rng())
    }

    pub fn draw_from_pool_with<R: Rng + ?Sized>(
        &mut self,
        pool: &[Participant],
        rng: &mut R,
    ) -> Result<WinnerRecord> {
        let index = pick_index(pool.len(), rng).ok_or(HrError::EmptyPool)?;
        let record = WinnerRecord::new(&pool[index], self.settings.prize.clone(), Utc::now());
        self.history.insert(0, record.clone());

        tracing::info!(
            "Drew {} ({}) for '{}' from a pool of {}",
            record.name,
            record.id,
            record.prize,
            pool.len()
        );
        Ok(record)
    }

    /// Remove the record at `index` in the history (0 = most recent).
    pub fn remove_winner(&mut self, index: usize) -> Result<WinnerRecord> {
        if index >= self.history.len() {
            return Err(HrError::WinnerNotFound(index));
        }

        let removed = self.history.remove(index);
        tracing::info!("Removed winner record {} ({})", index, removed.name);
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub(crate) fn restore_history(&mut self, history: Vec<WinnerRecord>) {
        self.history = history;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn roster(names: &[&str]) -> Vec<Participant> {
        names
            .iter()
            .map(|name| Participant::new(format!("id-{}", name), *name))
            .collect()
    }

    #[test]
    fn test_pool_excludes_past_winners() {
        let people = roster(&["A", "B", "C"]);
        let mut engine = DrawEngine::default();
        let winner = engine.draw(&people).unwrap();

        let pool = engine.pool(&people);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|p| p.id != winner.id));

        engine.set_allow_duplicates(true);
        assert_eq!(engine.pool(&people).len(), 3);
    }

    #[test]
    fn test_winner_stays_out_until_record_removed() {
        let people = roster(&["A", "B", "C", "D"]);
        let mut engine = DrawEngine::default();
        let mut rng = StdRng::seed_from_u64(11);

        let pool = engine.pool(&people);
        let first = engine.draw_from_pool_with(&pool, &mut rng).unwrap();
        for _ in 0..3 {
            let pool = engine.pool(&people);
            assert!(pool.iter().all(|p| p.id != first.id));
            if pool.is_empty() {
                break;
            }
            engine.draw_from_pool_with(&pool, &mut rng).unwrap();
        }

        // first winner is now the oldest record
        let last = engine.history().len() - 1;
        assert_eq!(engine.history()[last].id, first.id);
        engine.remove_winner(last).unwrap();
        assert!(engine.pool(&people).iter().any(|p| p.id == first.id));
    }

    #[test]
    fn test_empty_pool_leaves_history_untouched() {
        let people = roster(&["A"]);
        let mut engine = DrawEngine::default();
        engine.draw(&people).unwrap();

        assert!(matches!(engine.draw(&people), Err(HrError::EmptyPool)));
        assert_eq!(engine.history().len(), 1);

        let mut empty = DrawEngine::default();
        assert!(matches!(empty.draw(&[]), Err(HrError::EmptyPool)));
        assert!(empty.history().is_empty());
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let people = roster(&["A", "B"]);
        let mut engine = DrawEngine::new(DrawSettings {
            prize: "Mug".to_string(),
            allow_duplicates: false,
        });

        let first = engine.draw(&people).unwrap();
        engine.set_prize("Laptop");
        let second = engine.draw(&people).unwrap();

        assert_eq!(engine.history()[0], second);
        assert_eq!(engine.history()[1], first);
        assert_eq!(engine.history()[0].prize, "Laptop");
        assert_eq!(engine.history()[1].prize, "Mug");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_duplicate_winners_when_allowed() {
        let people = roster(&["Solo"]);
        let mut engine = DrawEngine::default();
        engine.set_allow_duplicates(true);

        engine.draw(&people).unwrap();
        engine.draw(&people).unwrap();
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history()[0].id, engine.history()[1].id);
    }

    #[test]
    fn test_remove_winner_out_of_range() {
        let mut engine = DrawEngine::default();
        assert!(matches!(engine.remove_winner(0), Err(HrError::WinnerNotFound(0))));
    }

    #[test]
    fn test_selection_is_uniform() {
        let people = roster(&["A", "B", "C", "D"]);
        let mut engine = DrawEngine::default();
        engine.set_allow_duplicates(true);
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts: HashMap<String, usize> = HashMap::new();

        for _ in 0..4000 {
            let record = engine.draw_from_pool_with(&people, &mut rng).unwrap();
            *counts.entry(record.name).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!((850..=1150).contains(count), "count {}", count);
        }
    }
}
