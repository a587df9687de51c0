use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::injury::InjuryStatus;
use crate::roles::{RoleGroup, role_group_for};

/// Which upstream a record came from. Primary outranks Secondary in merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Primary,
    Secondary,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Primary => "Primary",
            SourceKind::Secondary => "Secondary",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PRIMARY" => Ok(SourceKind::Primary),
            "SECONDARY" => Ok(SourceKind::Secondary),
            _ => Err(format!("Unknown source kind: {s}")),
        }
    }
}

/// One player occupying one role for one organization.
///
/// Field names serialize in camelCase, matching the dataset exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub organization_code: String,
    pub role: String,
    pub role_group: RoleGroup,
    #[serde(default)]
    pub depth_order: Option<String>,
    #[serde(default)]
    pub injury_status: InjuryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jersey_number: Option<String>,
    pub source_kind: SourceKind,
    pub observed_at: DateTime<Utc>,
}

/// Identity used for de-duplication: (name, organization, role).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey {
    pub name: String,
    pub organization_code: String,
    pub role: String,
}

impl PlayerRecord {
    /// Build a record; the role group is derived from `role`.
    pub fn new(
        name: impl Into<String>,
        organization_code: impl Into<String>,
        role: impl Into<String>,
        source_kind: SourceKind,
        observed_at: DateTime<Utc>,
    ) -> Self {
        let role = role.into();
        let role_group = role_group_for(&role);
        Self {
            name: name.into(),
            organization_code: organization_code.into(),
            role,
            role_group,
            depth_order: None,
            injury_status: InjuryStatus::Active,
            jersey_number: None,
            source_kind,
            observed_at,
        }
    }

    #[must_use]
    pub fn with_depth_order(mut self, depth_order: impl Into<String>) -> Self {
        self.depth_order = Some(depth_order.into());
        self
    }

    #[must_use]
    pub fn with_injury_status(mut self, status: InjuryStatus) -> Self {
        self.injury_status = status;
        self
    }

    #[must_use]
    pub fn with_jersey_number(mut self, jersey: impl Into<String>) -> Self {
        let jersey = jersey.into();
        let trimmed = jersey.trim();
        self.jersey_number = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            name: self.name.clone(),
            organization_code: self.organization_code.clone(),
            role: self.role.clone(),
        }
    }

    /// Ordering used by every export: organization, role group, role, name.
    pub fn export_sort_key(&self) -> (&str, &'static str, &str, &str) {
        (
            self.organization_code.as_str(),
            self.role_group.as_str(),
            self.role.as_str(),
            self.name.as_str(),
        )
    }
}

/// Sort records in place by [`PlayerRecord::export_sort_key`].
pub fn sort_for_export(records: &mut [PlayerRecord]) {
    records.sort_by(|a, b| a.export_sort_key().cmp(&b.export_sort_key()));
}
