use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Findings for one compilation run.
///
/// Warnings and errors are plain messages; they are data for the exporter and
/// the console, never control flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total_players: usize,
    pub unique_players: usize,
    pub organizations_processed: usize,
    pub organizations_failed: usize,
    pub organizations_expected: usize,
    pub expected_total: usize,
    pub meets_expectation: bool,
    pub by_organization: BTreeMap<String, usize>,
    pub by_role_group: BTreeMap<String, usize>,
    #[serde(default)]
    pub by_source: BTreeMap<String, usize>,
    #[serde(default)]
    pub missing_organizations: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Record count for one organization; zero when it produced nothing.
    pub fn organization_count(&self, code: &str) -> usize {
        self.by_organization.get(code).copied().unwrap_or(0)
    }
}
