//! Resolved configuration consumed by the compilation stages.
//!
//! Every field has a default so a partial TOML file deserializes cleanly.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{DEFAULT_MAX_EXPECTED, DEFAULT_MIN_EXPECTED};
use crate::error::{Result, RosterError};

pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://www.espn.com/nfl/team";
pub const DEFAULT_SECONDARY_BASE_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/football/nfl/teams";
pub const DEFAULT_USER_AGENT: &str = concat!("roster-compiler/", env!("CARGO_PKG_VERSION"));

/// Top-level options for one compilation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub fetch: FetchOptions,
    pub schedule: ScheduleOptions,
    pub expectations: Expectations,
    pub export: ExportTargets,
}

impl CompileOptions {
    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.max_retries == 0 {
            return Err(RosterError::InvalidConfig(
                "fetch.max_retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.expectations.tolerance) {
            return Err(RosterError::InvalidConfig(format!(
                "expectations.tolerance must be in [0, 1), got {}",
                self.expectations.tolerance
            )));
        }
        if self.expectations.per_org_min > self.expectations.per_org_max {
            return Err(RosterError::InvalidConfig(format!(
                "expectations.per_org_min ({}) exceeds per_org_max ({})",
                self.expectations.per_org_min, self.expectations.per_org_max
            )));
        }
        Ok(())
    }
}

/// Retry, timeout and endpoint settings for the two sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Total attempts per endpoint, including the first.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub primary_base_url: String,
    pub secondary_base_url: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            request_timeout_secs: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            primary_base_url: DEFAULT_PRIMARY_BASE_URL.to_string(),
            secondary_base_url: DEFAULT_SECONDARY_BASE_URL.to_string(),
        }
    }
}

impl FetchOptions {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// When the Secondary source is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryPolicy {
    /// Only when Primary produced fewer than `per_org_min` records.
    #[default]
    WhenInsufficient,
    Always,
}

impl SecondaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecondaryPolicy::WhenInsufficient => "when_insufficient",
            SecondaryPolicy::Always => "always",
        }
    }
}

impl fmt::Display for SecondaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SecondaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "when_insufficient" => Ok(SecondaryPolicy::WhenInsufficient),
            "always" => Ok(SecondaryPolicy::Always),
            _ => Err(format!("Unknown secondary policy: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// Pause after every organization, whether or not it succeeded.
    pub inter_org_delay_ms: u64,
    pub secondary_policy: SecondaryPolicy,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            inter_org_delay_ms: 1000,
            secondary_policy: SecondaryPolicy::default(),
        }
    }
}

impl ScheduleOptions {
    pub fn inter_org_delay(&self) -> Duration {
        Duration::from_millis(self.inter_org_delay_ms)
    }
}

/// Population bounds checked by the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    pub expected_total: usize,
    /// Fraction of `expected_total`; the accepted band is inclusive at both ends.
    pub tolerance: f64,
    pub per_org_min: usize,
    pub per_org_max: usize,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            expected_total: 2553,
            tolerance: 0.05,
            per_org_min: DEFAULT_MIN_EXPECTED,
            per_org_max: DEFAULT_MAX_EXPECTED,
        }
    }
}

impl Expectations {
    /// Inclusive `(low, high)` bounds for the total population.
    pub fn total_band(&self) -> (usize, usize) {
        let expected = self.expected_total as f64;
        let low = (expected * (1.0 - self.tolerance)).ceil() as usize;
        let high = (expected * (1.0 + self.tolerance)).floor() as usize;
        (low, high)
    }

    pub fn total_within_band(&self, total: usize) -> bool {
        let (low, high) = self.total_band();
        (low..=high).contains(&total)
    }
}

/// Which artifacts to produce and under which names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportTargets {
    pub json: bool,
    pub csv: bool,
    pub report: bool,
    pub summary: bool,
    pub json_name: String,
    pub csv_name: String,
    pub report_name: String,
    pub summary_name: String,
}

impl Default for ExportTargets {
    fn default() -> Self {
        Self {
            json: true,
            csv: true,
            report: true,
            summary: true,
            json_name: "dataset.json".to_string(),
            csv_name: "dataset.csv".to_string(),
            report_name: "validation_report.json".to_string(),
            summary_name: "summary.txt".to_string(),
        }
    }
}

impl ExportTargets {
    /// Only the report and summary; used when re-validating an existing dataset.
    pub fn report_only() -> Self {
        Self {
            json: false,
            csv: false,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.json || self.csv || self.report || self.summary)
    }
}
