use std::path::PathBuf;

use roster_core::OrganizationOutcome;
use roster_model::ValidationReport;
use roster_report::ExportSummary;

/// Outcome of a `compile` or `validate` run, ready for printing.
#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    /// Empty when re-validating an existing dataset.
    pub organizations: Vec<OrganizationOutcome>,
    pub report: ValidationReport,
    pub export: ExportSummary,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.report.has_errors() || self.export.has_failures()
    }
}
