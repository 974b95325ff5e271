pub mod duplicates;
pub mod parser;

pub use duplicates::{collapse_duplicates, find_duplicate_names};
pub use parser::{generate_id, parse_names};

use crate::error::{HrError, Result};
use crate::types::Participant;
use std::collections::HashSet;
use std::path::Path;

/// Sample roster for trying the tools without real data.
pub const MOCK_NAMES: [&str; 25] = [
    "Chen Da-wen", "Li Xiao-hua", "Zhang Mei-li", "Wang Zhi-ming", "Lin Zhi-ling",
    "Ada Lovelace", "Alan Turing", "Grace Hopper", "Linus Torvalds", "Margaret Hamilton",
    "Ken Thompson", "Dennis Ritchie", "Barbara Liskov", "Donald Knuth", "Edsger Dijkstra",
    "Frances Allen", "John McCarthy", "Katherine Johnson", "Tim Berners-Lee", "Radia Perlman",
    "Niklaus Wirth", "Leslie Lamport", "Hedy Lamarr", "Guido van Rossum", "Bjarne Stroustrup",
];

/// Ordered collection of loaded participants.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_participants(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Parse `raw` and append the result. Blank input adds nothing.
    pub fn add_text(&mut self, raw: &str) -> Result<usize> {
        let parsed = parse_names(raw);
        if parsed.is_empty() {
            return Err(HrError::EmptyInput);
        }

        Ok(self.extend(parsed))
    }

    /// Read a UTF-8 text or CSV file and append every name found in it.
    pub async fn import_file(&mut self, path: &Path) -> Result<usize> {
        let content = tokio::fs::read_to_string(path).await?;
        let parsed = parse_names(&content);

        if parsed.is_empty() {
            tracing::warn!("No names found in {}", path.display());
        }

        Ok(self.extend(parsed))
    }

    pub fn load_mock(&mut self) -> usize {
        let mock = MOCK_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| Participant::new(generate_id(&format!("mock-{}", index)), *name))
            .collect();
        self.extend(mock)
    }

    pub fn extend(&mut self, participants: Vec<Participant>) -> usize {
        let added = participants.len();
        self.participants.extend(participants);
        tracing::info!("Added {} participants, roster size {}", added, self.len());
        added
    }

    /// Remove by exact identifier. Returns false when nothing matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        before != self.participants.len()
    }

    /// Collapse repeated names down to their first occurrence.
    pub fn remove_duplicates(&mut self) -> usize {
        let unique = collapse_duplicates(&self.participants);
        let removed = self.participants.len() - unique.len();
        self.participants = unique;

        if removed > 0 {
            tracing::info!("Removed {} duplicate entries", removed);
        }
        removed
    }

    pub fn duplicate_names(&self) -> HashSet<String> {
        find_duplicate_names(&self.participants)
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}
