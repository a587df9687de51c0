use std::fs;
use std::path::Path;

use roster_cli::config::{ConfigError, Overrides, parse_options, resolve_options};
use roster_model::{RosterError, SecondaryPolicy};

#[test]
fn defaults_apply_without_file_or_flags() {
    let options = resolve_options(None, &Overrides::default()).unwrap();
    assert_eq!(options.fetch.max_retries, 3);
    assert_eq!(options.schedule.inter_org_delay_ms, 1000);
    assert!(options.export.json && options.export.csv);
}

#[test]
fn flags_override_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.toml");
    fs::write(
        &path,
        r#"
[fetch]
max_retries = 5
base_delay_ms = 250

[schedule]
secondary_policy = "always"

[export]
csv = false
"#,
    )
    .unwrap();

    let overrides = Overrides {
        max_retries: Some(2),
        no_summary: true,
        ..Overrides::default()
    };
    let options = resolve_options(Some(&path), &overrides).unwrap();
    assert_eq!(options.fetch.max_retries, 2);
    assert_eq!(options.fetch.base_delay_ms, 250);
    assert_eq!(options.schedule.secondary_policy, SecondaryPolicy::Always);
    assert!(!options.export.csv);
    assert!(!options.export.summary);
    assert!(options.export.report);
}

#[test]
fn disabled_flag_cannot_reenable_a_target() {
    let mut options = parse_options("[export]\njson = false\n", Path::new("inline.toml")).unwrap();
    Overrides::default().apply(&mut options);
    assert!(!options.export.json);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let error = resolve_options(Some(&path), &Overrides::default()).unwrap_err();
    assert!(matches!(error, ConfigError::Read { .. }));
}

#[test]
fn malformed_toml_names_the_file() {
    let error = parse_options("[fetch\nmax_retries = 1", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.to_string().contains("bad.toml"));
}

#[test]
fn invalid_combination_is_rejected_after_layering() {
    let overrides = Overrides {
        per_org_min: Some(100),
        per_org_max: Some(10),
        ..Overrides::default()
    };
    let error = resolve_options(None, &overrides).unwrap_err();
    assert!(matches!(
        error,
        ConfigError::Invalid(RosterError::InvalidConfig(_))
    ));
}
