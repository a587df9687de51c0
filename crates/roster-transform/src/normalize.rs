//! Payload to records.

use chrono::{DateTime, Utc};
use roster_ingest::RawPayload;
use roster_model::{PlayerRecord, SourceKind};
use tracing::{debug, warn};

use crate::depth::DepthChartEntries;
use crate::outcome::ParseOutcome;
use crate::roster_json::RosterEntries;

/// Per-entry parse outcomes for either source kind.
#[derive(Debug, Clone)]
pub enum Entries<'a> {
    DepthChart(DepthChartEntries<'a>),
    Roster(RosterEntries),
}

impl Iterator for Entries<'_> {
    type Item = ParseOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::DepthChart(entries) => entries.next(),
            Entries::Roster(entries) => entries.next(),
        }
    }
}

/// Parse `body` according to the conventions of `kind`.
pub fn parse_entries<'a>(
    body: &'a str,
    organization: &str,
    kind: SourceKind,
    observed_at: DateTime<Utc>,
) -> Entries<'a> {
    match kind {
        SourceKind::Primary => {
            Entries::DepthChart(DepthChartEntries::new(body, organization, observed_at))
        }
        SourceKind::Secondary => {
            Entries::Roster(RosterEntries::new(body, organization, observed_at))
        }
    }
}

/// Records from one payload.
///
/// Skipped entries and records with an unmapped role are logged as warnings;
/// the latter are still yielded.
pub fn normalize(
    payload: &RawPayload,
    observed_at: DateTime<Utc>,
) -> impl Iterator<Item = PlayerRecord> + Clone + '_ {
    let organization = payload.organization.as_str();
    let source = payload.source_kind;
    parse_entries(&payload.body, organization, source, observed_at).filter_map(move |outcome| {
        match outcome {
            ParseOutcome::Record(record) => {
                if !record.role_group.is_known() {
                    warn!(
                        organization,
                        source = %source,
                        role = %record.role,
                        name = %record.name,
                        "unmapped role, keeping record with Unknown group"
                    );
                }
                Some(record)
            }
            ParseOutcome::Skip(reason) => {
                warn!(organization, source = %source, reason = %reason, "skipped entry");
                None
            }
        }
    })
}

/// Collect a payload's records, logging the count.
pub fn normalize_all(payload: &RawPayload, observed_at: DateTime<Utc>) -> Vec<PlayerRecord> {
    let records: Vec<PlayerRecord> = normalize(payload, observed_at).collect();
    debug!(
        organization = %payload.organization,
        source = %payload.source_kind,
        endpoint = payload.endpoint,
        record_count = records.len(),
        "normalized payload"
    );
    records
}
