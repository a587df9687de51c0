use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use roster_core::{Compiler, OrganizationStatus};
use roster_ingest::testing::{RecordingSleeper, ScriptedTransport};
use roster_model::{Catalog, CompileOptions, SecondaryPolicy, SourceKind};

const BUF_DEPTH: &str = "https://www.espn.com/nfl/team/depth/_/name/buf";
const BUF_API: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/2/roster";
const MIA_DEPTH: &str = "https://www.espn.com/nfl/team/depth/_/name/mia";

fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
}

fn options() -> CompileOptions {
    let mut options = CompileOptions::default();
    options.expectations.per_org_min = 2;
    options
}

fn two_orgs() -> Catalog {
    Catalog::standard().select(&["BUF", "MIA"]).unwrap()
}

#[test]
fn failed_source_never_aborts_the_run() {
    let depth = "<table><tr><th>QB</th></tr><tr><td>Josh Allen</td></tr></table>";
    let api = r#"{"athletes":[
        {"fullName":"Josh Allen","jersey":"17","position":{"abbreviation":"QB"}},
        {"fullName":"James Cook","jersey":"4","position":{"abbreviation":"RB"}}
    ]}"#;
    let transport = ScriptedTransport::new().ok(BUF_DEPTH, depth).ok(BUF_API, api);
    let sleeper = RecordingSleeper::new();

    let compilation = Compiler::new(transport, sleeper.clone(), options())
        .with_clock(fixed_clock)
        .compile(&two_orgs());

    assert_eq!(compilation.compiled_at, fixed_clock());
    assert_eq!(compilation.records.len(), 2);
    let allen = &compilation.records[0];
    assert_eq!(allen.source_kind, SourceKind::Primary);
    assert_eq!(allen.depth_order.as_deref(), Some("1st"));
    assert_eq!(allen.jersey_number, None);
    assert_eq!(compilation.records[1].name, "James Cook");

    let buf = &compilation.organizations[0];
    assert!(buf.secondary_fetched);
    assert_eq!(buf.stats.duplicates_dropped, 1);
    assert_eq!(buf.status(), OrganizationStatus::Complete);

    let mia = &compilation.organizations[1];
    assert_eq!(mia.status(), OrganizationStatus::Failed);
    assert_eq!(mia.failures.len(), 2);
    assert_eq!(compilation.failed_organizations().collect::<Vec<_>>(), vec!["MIA"]);

    // one politeness pause per organization, after the backoff pauses
    let slept = sleeper.recorded();
    let pauses = slept
        .iter()
        .filter(|d| **d == Duration::from_millis(1000))
        .count();
    assert!(pauses >= 2);
    assert_eq!(slept.last(), Some(&Duration::from_millis(1000)));
}

#[test]
fn sufficient_primary_skips_secondary() {
    let depth = "<table><tr><th>QB</th></tr><tr><td>A</td><td>B</td></tr></table>";
    let transport = ScriptedTransport::new().ok(MIA_DEPTH, depth);
    let catalog = Catalog::standard().select(&["MIA"]).unwrap();
    let mut options = options();
    options.schedule.inter_org_delay_ms = 0;

    let compilation = Compiler::new(transport.clone(), RecordingSleeper::new(), options)
        .with_clock(fixed_clock)
        .compile(&catalog);

    assert_eq!(compilation.records.len(), 2);
    assert!(!compilation.organizations[0].secondary_fetched);
    assert_eq!(transport.requests(), vec![MIA_DEPTH.to_string()]);
}

#[test]
fn always_policy_fetches_secondary() {
    let depth = "<table><tr><th>QB</th></tr><tr><td>A</td><td>B</td></tr></table>";
    let api = r#"{"athletes":[{"fullName":"C","position":{"abbreviation":"K"}}]}"#;
    let mia_api = "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams/15/roster";
    let transport = ScriptedTransport::new().ok(MIA_DEPTH, depth).ok(mia_api, api);
    let catalog = Catalog::standard().select(&["MIA"]).unwrap();
    let mut options = options();
    options.schedule.secondary_policy = SecondaryPolicy::Always;

    let compilation = Compiler::new(transport, RecordingSleeper::new(), options)
        .with_clock(fixed_clock)
        .compile(&catalog);

    assert_eq!(compilation.records.len(), 3);
    assert!(compilation.organizations[0].secondary_fetched);
    assert_eq!(compilation.organizations[0].stats.secondary_count, 1);
}
