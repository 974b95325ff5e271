use crate::error::{HrError, Result};
use crate::random::{chunk, shuffle_with};
use crate::types::{Group, Participant};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the roster is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupingPolicy {
    /// Fixed number of members per group; the last group may be smaller.
    BySize(usize),
    /// Target number of groups, capped at the roster size.
    ByCount(usize),
}

impl GroupingPolicy {
    /// Chunk size this policy resolves to for a roster of `roster_len`.
    pub fn chunk_size(&self, roster_len: usize) -> usize {
        match *self {
            GroupingPolicy::BySize(size) => size.max(1),
            GroupingPolicy::ByCount(count) => {
                let target = count.min(roster_len).max(1);
                roster_len.div_ceil(target).max(1)
            }
        }
    }
}

pub fn group(roster: &[Participant], policy: GroupingPolicy) -> Result<Vec<Group>> {
    group_with(roster, policy, &mut rand::thread_rng())
}

/// Shuffle the whole roster, then cut it into contiguous groups.
pub fn group_with<R: Rng + ?Sized>(
    roster: &[Participant],
    policy: GroupingPolicy,
    rng: &mut R,
) -> Result<Vec<Group>> {
    if roster.is_empty() {
        return Err(HrError::EmptyRoster);
    }

    let size = policy.chunk_size(roster.len());
    let shuffled = shuffle_with(roster, rng);
    let groups: Vec<Group> = chunk(&shuffled, size)?
        .into_iter()
        .enumerate()
        .map(|(idx, members)| Group {
            ordinal: idx + 1,
            members,
        })
        .collect();

    tracing::info!(
        "Split {} participants into {} groups ({:?})",
        roster.len(),
        groups.len(),
        policy
    );
    Ok(groups)
}
