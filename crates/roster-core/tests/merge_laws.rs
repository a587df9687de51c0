use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use roster_core::merge;
use roster_model::{IdentityKey, PlayerRecord, SourceKind};

fn records(kind: SourceKind) -> impl Strategy<Value = Vec<PlayerRecord>> {
    let entry = (
        proptest::sample::select(vec!["A", "B", "C", "D", "E"]),
        proptest::sample::select(vec!["X1", "X2"]),
        proptest::sample::select(vec!["QB", "WR", "RB", "ZZ"]),
        proptest::option::of("[0-9]{1,2}"),
    );
    proptest::collection::vec(entry, 0..12).prop_map(move |entries| {
        let at = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        entries
            .into_iter()
            .enumerate()
            .map(|(idx, (name, org, role, jersey))| {
                let record = PlayerRecord::new(name, org, role, kind, at)
                    .with_depth_order(format!("{}", idx + 1));
                match jersey {
                    Some(jersey) => record.with_jersey_number(jersey),
                    None => record,
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn count_law(primary in records(SourceKind::Primary), secondary in records(SourceKind::Secondary)) {
        let outcome = merge(primary.clone(), secondary.clone());
        let stats = outcome.stats;
        prop_assert_eq!(stats.primary_count, primary.len());
        prop_assert_eq!(stats.secondary_count, secondary.len());
        prop_assert_eq!(stats.merged_count, outcome.records.len());
        prop_assert!(stats.merged_count <= stats.primary_count + stats.secondary_count);
        prop_assert_eq!(
            stats.duplicates_dropped,
            stats.primary_count + stats.secondary_count - stats.merged_count
        );

        let mut keys: Vec<IdentityKey> = primary.iter().chain(&secondary).map(PlayerRecord::identity_key).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(stats.merged_count == total, keys.len() == total);
    }

    #[test]
    fn primary_wins_every_collision(primary in records(SourceKind::Primary), secondary in records(SourceKind::Secondary)) {
        let outcome = merge(primary.clone(), secondary);
        let mut first_primary: HashMap<IdentityKey, &PlayerRecord> = HashMap::new();
        for record in &primary {
            first_primary.entry(record.identity_key()).or_insert(record);
        }
        for record in &outcome.records {
            if let Some(expected) = first_primary.get(&record.identity_key()) {
                prop_assert_eq!(record, *expected);
            }
        }
    }

    #[test]
    fn remerge_is_identity(primary in records(SourceKind::Primary), secondary in records(SourceKind::Secondary)) {
        let merged = merge(primary, secondary).records;
        let again = merge(merged.clone(), Vec::new());
        prop_assert_eq!(again.records, merged);
        prop_assert_eq!(again.stats.duplicates_dropped, 0);
    }
}
