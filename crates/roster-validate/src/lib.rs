//! Whole-population checks over a merged record set.
//!
//! [`validate`] is pure: it reads records, the catalog and the expectations,
//! and returns a [`ValidationReport`]. Findings are strings in the report,
//! never errors.

use std::collections::{BTreeMap, BTreeSet};

use roster_model::{Catalog, Expectations, PlayerRecord, ValidationReport};
use tracing::{info, info_span};

pub fn validate(
    records: &[PlayerRecord],
    catalog: &Catalog,
    expectations: &Expectations,
) -> ValidationReport {
    let span = info_span!("validate", record_count = records.len());
    let _guard = span.enter();

    let mut by_organization: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_role_group: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
    let mut unique: BTreeSet<(&str, &str)> = BTreeSet::new();
    for record in records {
        *by_organization
            .entry(record.organization_code.clone())
            .or_default() += 1;
        *by_role_group
            .entry(record.role_group.as_str().to_string())
            .or_default() += 1;
        *by_source
            .entry(record.source_kind.as_str().to_string())
            .or_default() += 1;
        unique.insert((record.name.as_str(), record.organization_code.as_str()));
    }

    let total = records.len();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let within_band = expectations.total_within_band(total);
    if !within_band {
        let (low, high) = expectations.total_band();
        let direction = if total < low { "below" } else { "above" };
        warnings.push(format!(
            "Total players {total} is {direction} the expected range {low}-{high} \
             (expected {} \u{b1} {:.1}%)",
            expectations.expected_total,
            expectations.tolerance * 100.0
        ));
    }

    if by_organization.is_empty() {
        errors.push("No organization produced any records".to_string());
    }

    let missing: Vec<String> = catalog
        .codes()
        .filter(|code| !by_organization.contains_key(*code))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        errors.push(format!("Missing organizations: {}", missing.join(", ")));
    }

    for organization in catalog.iter() {
        let Some(count) = by_organization.get(organization.code).copied() else {
            continue;
        };
        if !organization.expects(count) {
            warnings.push(format!(
                "{} has {count} players, outside the expected range {}-{}",
                organization.code, organization.min_expected, organization.max_expected
            ));
        }
    }

    for code in by_organization.keys() {
        if !catalog.contains(code) {
            warnings.push(format!("Records for organization {code} which is not in the catalog"));
        }
    }

    if let Some(unknown) = by_role_group.get("Unknown") {
        warnings.push(format!("{unknown} records have an unmapped role (group Unknown)"));
    }

    let organizations_processed = catalog
        .codes()
        .filter(|code| by_organization.contains_key(*code))
        .count();
    let report = ValidationReport {
        total_players: total,
        unique_players: unique.len(),
        organizations_processed,
        organizations_failed: missing.len(),
        organizations_expected: catalog.len(),
        expected_total: expectations.expected_total,
        meets_expectation: within_band && errors.is_empty(),
        by_organization,
        by_role_group,
        by_source,
        missing_organizations: missing,
        warnings,
        errors,
    };
    info!(
        total_players = report.total_players,
        organizations_failed = report.organizations_failed,
        warning_count = report.warning_count(),
        error_count = report.error_count(),
        meets_expectation = report.meets_expectation,
        "validation complete"
    );
    report
}
