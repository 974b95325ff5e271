use crate::types::Participant;
use std::collections::{HashMap, HashSet};

/// Names occurring two or more times, compared by exact string equality.
pub fn find_duplicate_names(roster: &[Participant]) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for participant in roster {
        *counts.entry(participant.name.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Keep the first participant for each name, preserving roster order.
pub fn collapse_duplicates(roster: &[Participant]) -> Vec<Participant> {
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|p| seen.insert(p.name.as_str()))
        .cloned()
        .collect()
}
