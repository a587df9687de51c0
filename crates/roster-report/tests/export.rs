use std::collections::BTreeMap;
use std::io;

use chrono::{TimeDelta, TimeZone, Utc};
use roster_model::{
    ExportTargets, InjuryStatus, PlayerRecord, SourceKind, ValidationReport,
};
use roster_report::{
    ArtifactSink, DirectorySink, ExportError, export, read_dataset_json, render_summary,
};

fn records() -> Vec<PlayerRecord> {
    let at = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    vec![
        PlayerRecord::new("Zed", "MIA", "QB", SourceKind::Primary, at).with_depth_order("1st"),
        PlayerRecord::new("Bob", "BUF", "WR", SourceKind::Secondary, at).with_jersey_number("8"),
        PlayerRecord::new("Al", "BUF", "CB", SourceKind::Primary, at)
            .with_depth_order("2nd")
            .with_injury_status(InjuryStatus::Out),
        PlayerRecord::new("Amy", "BUF", "WR", SourceKind::Primary, at).with_depth_order("1st"),
    ]
}

fn report() -> ValidationReport {
    ValidationReport {
        total_players: 4,
        unique_players: 4,
        organizations_processed: 2,
        organizations_expected: 2,
        expected_total: 2553,
        warnings: vec!["Total players 4 is below the expected range".to_string()],
        ..ValidationReport::default()
    }
}

/// Keeps artifacts in memory and refuses the configured names.
#[derive(Default)]
struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
    refuse: Vec<String>,
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> roster_report::Result<String> {
        if self.refuse.iter().any(|refused| refused == name) {
            return Err(ExportError::Write {
                name: name.to_string(),
                source: io::Error::other("disk full"),
            });
        }
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(format!("memory://{name}"))
    }
}

#[test]
fn json_round_trip_reproduces_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::create(dir.path().join("out")).unwrap();
    let compiled_at = Utc.with_ymd_and_hms(2025, 9, 2, 0, 0, 0).unwrap();

    let summary = export(&records(), &report(), &ExportTargets::default(), &mut sink, compiled_at);
    assert!(!summary.has_failures());
    assert_eq!(summary.written.len(), 4);

    let document = read_dataset_json(&sink.dir().join("dataset.json")).unwrap();
    assert_eq!(document.metadata.compiled_at, compiled_at);
    assert_eq!(document.metadata.total_players, 4);
    assert_eq!(document.metadata.format_version, "1.0.0");

    let mut expected = records();
    expected.sort_by(|a, b| a.export_sort_key().cmp(&b.export_sort_key()));
    assert_eq!(document.records, expected);
}

#[test]
fn csv_is_sorted_with_header() {
    let mut sink = MemorySink::default();
    let targets = ExportTargets {
        json: false,
        report: false,
        summary: false,
        ..ExportTargets::default()
    };
    export(&records(), &report(), &targets, &mut sink, Utc::now());

    let csv = String::from_utf8(sink.files["dataset.csv"].clone()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "name,organizationCode,role,roleGroup,depthOrder,injuryStatus,jerseyNumber,sourceKind,observedAt"
    );
    let keys: Vec<(&str, &str)> = lines[1..]
        .iter()
        .map(|line| {
            let mut cells = line.split(',');
            let name = cells.next().unwrap();
            (cells.next().unwrap(), name)
        })
        .collect();
    assert_eq!(
        keys,
        vec![("BUF", "Al"), ("BUF", "Amy"), ("BUF", "Bob"), ("MIA", "Zed")]
    );
    assert_eq!(
        lines[3],
        "Bob,BUF,WR,Offense,,Active,8,Secondary,2025-09-01T12:00:00Z"
    );
}

#[test]
fn csv_and_json_agree_on_sub_second_timestamps() {
    let at = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap() + TimeDelta::milliseconds(250);
    let records = vec![PlayerRecord::new("Cal", "NYJ", "LB", SourceKind::Primary, at)];
    let mut sink = MemorySink::default();
    let targets = ExportTargets {
        report: false,
        summary: false,
        ..ExportTargets::default()
    };
    export(&records, &report(), &targets, &mut sink, Utc::now());

    let json: serde_json::Value = serde_json::from_slice(&sink.files["dataset.json"]).unwrap();
    let json_stamp = json["records"][0]["observedAt"].as_str().unwrap().to_string();
    let csv = String::from_utf8(sink.files["dataset.csv"].clone()).unwrap();
    let csv_stamp = csv.lines().nth(1).unwrap().rsplit(',').next().unwrap();
    assert_eq!(csv_stamp, "2025-09-01T12:00:00.250Z");
    assert_eq!(csv_stamp, json_stamp);
}

#[test]
fn one_failed_target_does_not_block_the_rest() {
    let mut sink = MemorySink {
        refuse: vec!["dataset.csv".to_string()],
        ..MemorySink::default()
    };

    let summary = export(&records(), &report(), &ExportTargets::default(), &mut sink, Utc::now());

    assert!(summary.has_failures());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "dataset.csv");
    assert!(!summary.failed[0].1.is_fatal());
    let names: Vec<&str> = summary.written.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["dataset.json", "validation_report.json", "summary.txt"]);
}

#[test]
fn unusable_destination_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file").unwrap();

    let err = DirectorySink::create(blocker.join("out")).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn report_json_uses_camel_case_keys() {
    let mut sink = MemorySink::default();
    let targets = ExportTargets::report_only();
    export(&records(), &report(), &targets, &mut sink, Utc::now());

    let json: serde_json::Value =
        serde_json::from_slice(&sink.files["validation_report.json"]).unwrap();
    assert_eq!(json["totalPlayers"], 4);
    assert_eq!(json["meetsExpectation"], false);
    assert!(json["byOrganization"].is_object());
    assert!(sink.files.contains_key("summary.txt"));
    assert!(!sink.files.contains_key("dataset.json"));
}

#[test]
fn summary_layout() {
    let mut report = ValidationReport {
        total_players: 50,
        unique_players: 48,
        organizations_processed: 1,
        organizations_failed: 1,
        organizations_expected: 2,
        expected_total: 2553,
        missing_organizations: vec!["MIA".to_string()],
        warnings: vec!["Total players 50 is below the expected range".to_string()],
        errors: vec!["Missing organizations: MIA".to_string()],
        ..ValidationReport::default()
    };
    report.by_role_group.insert("Offense".to_string(), 30);
    report.by_role_group.insert("Defense".to_string(), 20);

    insta::assert_snapshot!(render_summary(&report), @r"
================================================================================
ROSTER DEPTH CHART COMPILATION SUMMARY
================================================================================

STATISTICS:
  Total Players: 50
  Unique Players: 48
  Organizations Processed: 1/2
  Organizations Failed: 1
  Expected Total: 2553
  Meets Expectation: no

FAILED ORGANIZATIONS:
  MIA

ROLE GROUP BREAKDOWN:
  Defense: 20
  Offense: 30

WARNINGS:
  - Total players 50 is below the expected range

ERRORS:
  - Missing organizations: MIA
================================================================================
");
}
