use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person loaded into the roster. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Result of one successful draw. `id` and `name` are copied from the
/// participant at selection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub id: String,
    pub name: String,
    pub prize: String,
    pub won_at: DateTime<Utc>,
}

impl WinnerRecord {
    pub fn new(participant: &Participant, prize: impl Into<String>, won_at: DateTime<Utc>) -> Self {
        Self {
            id: participant.id.clone(),
            name: participant.name.clone(),
            prize: prize.into(),
            won_at,
        }
    }
}

/// One partition of the roster. Ordinals start at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub ordinal: usize,
    pub members: Vec<Participant>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }
}
