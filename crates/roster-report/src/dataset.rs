//! `dataset.json` and `dataset.csv`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use roster_model::{PlayerRecord, ValidationReport, sort_for_export};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

pub const FORMAT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub compiled_at: DateTime<Utc>,
    pub total_players: usize,
    pub unique_players: usize,
    pub organizations_processed: usize,
    pub format_version: String,
}

/// Metadata envelope around the sorted record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub metadata: DatasetMetadata,
    pub records: Vec<PlayerRecord>,
}

impl DatasetDocument {
    pub fn new(
        records: &[PlayerRecord],
        report: &ValidationReport,
        compiled_at: DateTime<Utc>,
    ) -> Self {
        let mut records = records.to_vec();
        sort_for_export(&mut records);
        Self {
            metadata: DatasetMetadata {
                compiled_at,
                total_players: records.len(),
                unique_players: report.unique_players,
                organizations_processed: report.organizations_processed,
                format_version: FORMAT_VERSION.to_string(),
            },
            records,
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn to_json_bytes<T: Serialize>(name: &str, value: &T) -> Result<Vec<u8>> {
    let mut json = serde_json::to_string_pretty(value).map_err(|err| ExportError::Serialize {
        name: name.to_string(),
        message: err.to_string(),
    })?;
    json.push('\n');
    Ok(json.into_bytes())
}

pub fn read_dataset_json(path: &Path) -> Result<DatasetDocument> {
    let text = fs::read_to_string(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|err| ExportError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Flat CSV row; absent optional fields are empty cells.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    name: &'a str,
    organization_code: &'a str,
    role: &'a str,
    role_group: &'static str,
    depth_order: &'a str,
    injury_status: &'static str,
    jersey_number: &'a str,
    source_kind: &'static str,
    observed_at: String,
}

impl<'a> From<&'a PlayerRecord> for CsvRow<'a> {
    fn from(record: &'a PlayerRecord) -> Self {
        Self {
            name: &record.name,
            organization_code: &record.organization_code,
            role: &record.role,
            role_group: record.role_group.as_str(),
            depth_order: record.depth_order.as_deref().unwrap_or(""),
            injury_status: record.injury_status.as_str(),
            jersey_number: record.jersey_number.as_deref().unwrap_or(""),
            source_kind: record.source_kind.as_str(),
            observed_at: record.observed_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// CSV table sorted by organization, role group, role and name.
pub fn to_csv_bytes(name: &str, records: &[PlayerRecord]) -> Result<Vec<u8>> {
    let serialize_err = |message: String| ExportError::Serialize {
        name: name.to_string(),
        message,
    };
    let mut sorted: Vec<&PlayerRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.export_sort_key().cmp(&b.export_sort_key()));

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in sorted {
        writer
            .serialize(CsvRow::from(record))
            .map_err(|err| serialize_err(err.to_string()))?;
    }
    if records.is_empty() {
        writer
            .write_record([
                "name",
                "organizationCode",
                "role",
                "roleGroup",
                "depthOrder",
                "injuryStatus",
                "jerseyNumber",
                "sourceKind",
                "observedAt",
            ])
            .map_err(|err| serialize_err(err.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|err| serialize_err(err.to_string()))
}
