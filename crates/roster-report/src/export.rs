//! Produce the configured artifacts, each independently of the others.

use std::time::Instant;

use chrono::{DateTime, Utc};
use roster_model::{ExportTargets, PlayerRecord, ValidationReport};
use tracing::{error, info, info_span};

use crate::dataset::{DatasetDocument, to_csv_bytes, to_json_bytes};
use crate::error::{ExportError, Result};
use crate::sink::ArtifactSink;
use crate::summary::render_summary;

/// One artifact that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<WrittenArtifact>,
    pub failed: Vec<(String, ExportError)>,
}

impl ExportSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Write every enabled target to `sink`.
///
/// A failing target is recorded in [`ExportSummary::failed`] and the
/// remaining targets are still attempted.
pub fn export(
    records: &[PlayerRecord],
    report: &ValidationReport,
    targets: &ExportTargets,
    sink: &mut dyn ArtifactSink,
    compiled_at: DateTime<Utc>,
) -> ExportSummary {
    let span = info_span!("export", record_count = records.len());
    let _guard = span.enter();
    let start = Instant::now();
    let mut summary = ExportSummary::default();

    if targets.json {
        let name = targets.json_name.as_str();
        let result = to_json_bytes(name, &DatasetDocument::new(records, report, compiled_at));
        write_target(sink, name, result, &mut summary);
    }
    if targets.csv {
        let name = targets.csv_name.as_str();
        write_target(sink, name, to_csv_bytes(name, records), &mut summary);
    }
    if targets.report {
        let name = targets.report_name.as_str();
        write_target(sink, name, to_json_bytes(name, report), &mut summary);
    }
    if targets.summary {
        let name = targets.summary_name.as_str();
        let bytes = Ok(render_summary(report).into_bytes());
        write_target(sink, name, bytes, &mut summary);
    }

    info!(
        written = summary.written.len(),
        failed = summary.failed.len(),
        duration_ms = start.elapsed().as_millis(),
        "export complete"
    );
    summary
}

fn write_target(
    sink: &mut dyn ArtifactSink,
    name: &str,
    bytes: Result<Vec<u8>>,
    summary: &mut ExportSummary,
) {
    match bytes.and_then(|bytes| sink.write(name, &bytes)) {
        Ok(location) => {
            info!(artifact = name, location = %location, "wrote artifact");
            summary.written.push(WrittenArtifact {
                name: name.to_string(),
                location,
            });
        }
        Err(err) => {
            error!(artifact = name, error = %err, "failed to write artifact");
            summary.failed.push((name.to_string(), err));
        }
    }
}
