//! Priority de-duplication of Primary and Secondary records.

use std::collections::HashSet;

use roster_model::{IdentityKey, PlayerRecord};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub primary_count: usize,
    pub secondary_count: usize,
    pub merged_count: usize,
    /// `primary_count + secondary_count - merged_count`.
    pub duplicates_dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub records: Vec<PlayerRecord>,
    pub stats: MergeStats,
}

/// Merge two record sets; Primary wins every identity-key collision.
///
/// Output keeps input order: Primary records first, then the Secondary
/// records whose key was not seen. Within one input the first occurrence of
/// a key is kept.
pub fn merge<P, S>(primary: P, secondary: S) -> MergeOutcome
where
    P: IntoIterator<Item = PlayerRecord>,
    S: IntoIterator<Item = PlayerRecord>,
{
    let mut seen: HashSet<IdentityKey> = HashSet::new();
    let mut records = Vec::new();
    let mut primary_count = 0;
    let mut secondary_count = 0;

    for record in primary {
        primary_count += 1;
        if seen.insert(record.identity_key()) {
            records.push(record);
        }
    }
    for record in secondary {
        secondary_count += 1;
        if seen.insert(record.identity_key()) {
            records.push(record);
        }
    }

    let merged_count = records.len();
    MergeOutcome {
        records,
        stats: MergeStats {
            primary_count,
            secondary_count,
            merged_count,
            duplicates_dropped: primary_count + secondary_count - merged_count,
        },
    }
}
