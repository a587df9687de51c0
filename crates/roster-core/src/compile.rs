//! Compilation driver: one organization at a time, folded into an accumulator.

use std::time::Instant;

use chrono::{DateTime, Utc};
use roster_ingest::{FetchFailure, SourceFetcher, Sleeper, Transport};
use roster_model::{Catalog, CompileOptions, Organization, PlayerRecord, SecondaryPolicy, SourceKind};
use roster_transform::normalize_all;
use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::merge::{MergeStats, merge};

/// What happened to one organization during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationOutcome {
    pub code: String,
    pub stats: MergeStats,
    pub secondary_fetched: bool,
    #[serde(skip)]
    pub failures: Vec<FetchFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizationStatus {
    Complete,
    /// Records were produced but at least one source failed.
    Partial,
    Failed,
}

impl OrganizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationStatus::Complete => "ok",
            OrganizationStatus::Partial => "partial",
            OrganizationStatus::Failed => "failed",
        }
    }
}

impl OrganizationOutcome {
    pub fn status(&self) -> OrganizationStatus {
        if self.stats.merged_count == 0 {
            OrganizationStatus::Failed
        } else if self.failures.is_empty() {
            OrganizationStatus::Complete
        } else {
            OrganizationStatus::Partial
        }
    }
}

/// The whole-population result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub compiled_at: DateTime<Utc>,
    pub records: Vec<PlayerRecord>,
    pub organizations: Vec<OrganizationOutcome>,
}

impl Compilation {
    pub fn failed_organizations(&self) -> impl Iterator<Item = &str> {
        self.organizations
            .iter()
            .filter(|org| org.status() == OrganizationStatus::Failed)
            .map(|org| org.code.as_str())
    }

    pub fn fetch_failures(&self) -> impl Iterator<Item = &FetchFailure> {
        self.organizations.iter().flat_map(|org| org.failures.iter())
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    records: Vec<PlayerRecord>,
    organizations: Vec<OrganizationOutcome>,
}

impl Accumulator {
    fn absorb(mut self, records: Vec<PlayerRecord>, outcome: OrganizationOutcome) -> Self {
        self.records.extend(records);
        self.organizations.push(outcome);
        self
    }
}

/// Sequential compiler over a catalog.
pub struct Compiler<T, S> {
    fetcher: SourceFetcher<T, S>,
    sleeper: S,
    options: CompileOptions,
    clock: fn() -> DateTime<Utc>,
}

impl<T: Transport, S: Sleeper + Clone> Compiler<T, S> {
    pub fn new(transport: T, sleeper: S, options: CompileOptions) -> Self {
        Self {
            fetcher: SourceFetcher::new(transport, sleeper.clone(), &options.fetch),
            sleeper,
            options,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used for `observedAt` and `compiledAt`.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Fetch, normalize and merge every organization in catalog order.
    ///
    /// Source failures are recorded per organization and never abort the run.
    pub fn compile(&self, catalog: &Catalog) -> Compilation {
        let span = info_span!("compile", organizations = catalog.len());
        let _guard = span.enter();
        let start = Instant::now();
        let compiled_at = (self.clock)();
        let delay = self.options.schedule.inter_org_delay();

        let accumulator = catalog.iter().fold(Accumulator::default(), |acc, organization| {
            let (records, outcome) = self.process_organization(organization);
            self.sleeper.sleep(delay);
            acc.absorb(records, outcome)
        });

        let failed = accumulator
            .organizations
            .iter()
            .filter(|org| org.status() == OrganizationStatus::Failed)
            .count();
        info!(
            organizations = accumulator.organizations.len(),
            failed,
            record_count = accumulator.records.len(),
            duration_ms = start.elapsed().as_millis(),
            "compilation complete"
        );
        Compilation {
            compiled_at,
            records: accumulator.records,
            organizations: accumulator.organizations,
        }
    }

    /// Fetch-normalize-merge for one organization.
    pub fn process_organization(
        &self,
        organization: &Organization,
    ) -> (Vec<PlayerRecord>, OrganizationOutcome) {
        let span = info_span!("organization", organization = organization.code);
        let _guard = span.enter();
        let mut failures = Vec::new();

        let primary = self.fetch_records(organization, SourceKind::Primary, &mut failures);
        let secondary_fetched = match self.options.schedule.secondary_policy {
            SecondaryPolicy::Always => true,
            SecondaryPolicy::WhenInsufficient => {
                primary.len() < self.options.expectations.per_org_min
            }
        };
        let secondary = if secondary_fetched {
            self.fetch_records(organization, SourceKind::Secondary, &mut failures)
        } else {
            Vec::new()
        };

        let merged = info_span!("merge").in_scope(|| merge(primary, secondary));
        let outcome = OrganizationOutcome {
            code: organization.code.to_string(),
            stats: merged.stats,
            secondary_fetched,
            failures,
        };
        if outcome.status() == OrganizationStatus::Failed {
            warn!(
                organization = organization.code,
                "no records from any source"
            );
        } else {
            info!(
                organization = organization.code,
                primary = merged.stats.primary_count,
                secondary = merged.stats.secondary_count,
                merged = merged.stats.merged_count,
                duplicates_dropped = merged.stats.duplicates_dropped,
                "organization merged"
            );
        }
        (merged.records, outcome)
    }

    fn fetch_records(
        &self,
        organization: &Organization,
        kind: SourceKind,
        failures: &mut Vec<FetchFailure>,
    ) -> Vec<PlayerRecord> {
        let result = self.fetcher.fetch_until(organization, kind, |payload| {
            let observed_at = (self.clock)();
            let records = info_span!("normalize", source = %kind)
                .in_scope(|| normalize_all(&payload, observed_at));
            (!records.is_empty()).then_some(records)
        });
        match result {
            Ok(records) => records,
            Err(failure) => {
                failures.push(failure);
                Vec::new()
            }
        }
    }
}
