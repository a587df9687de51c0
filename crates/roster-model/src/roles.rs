//! Role (position) classification.
//!
//! Every raw role label maps to exactly one [`RoleGroup`]. The mapping is a
//! static table built once on first use; labels missing from the table get
//! [`RoleGroup::Unknown`] instead of being dropped.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Coarse classification bucket for a role label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleGroup {
    Offense,
    Defense,
    #[serde(rename = "Special Teams")]
    SpecialTeams,
    /// Sentinel for labels that are not in the role table.
    Unknown,
}

impl RoleGroup {
    /// Label as written in exports and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleGroup::Offense => "Offense",
            RoleGroup::Defense => "Defense",
            RoleGroup::SpecialTeams => "Special Teams",
            RoleGroup::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RoleGroup::Unknown)
    }
}

impl fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RoleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "OFFENSE" => Ok(RoleGroup::Offense),
            "DEFENSE" => Ok(RoleGroup::Defense),
            "SPECIAL TEAMS" | "SPECIALTEAMS" => Ok(RoleGroup::SpecialTeams),
            "UNKNOWN" => Ok(RoleGroup::Unknown),
            _ => Err(format!("Unknown role group: {s}")),
        }
    }
}

/// Role labels and their groups.
const ROLE_TABLE: &[(&str, RoleGroup)] = &[
    ("QB", RoleGroup::Offense),
    ("RB", RoleGroup::Offense),
    ("FB", RoleGroup::Offense),
    ("WR", RoleGroup::Offense),
    ("TE", RoleGroup::Offense),
    ("LT", RoleGroup::Offense),
    ("LG", RoleGroup::Offense),
    ("C", RoleGroup::Offense),
    ("RG", RoleGroup::Offense),
    ("RT", RoleGroup::Offense),
    ("OL", RoleGroup::Offense),
    ("OT", RoleGroup::Offense),
    ("OG", RoleGroup::Offense),
    ("G", RoleGroup::Offense),
    ("DE", RoleGroup::Defense),
    ("DT", RoleGroup::Defense),
    ("NT", RoleGroup::Defense),
    ("DL", RoleGroup::Defense),
    ("LB", RoleGroup::Defense),
    ("OLB", RoleGroup::Defense),
    ("MLB", RoleGroup::Defense),
    ("ILB", RoleGroup::Defense),
    ("WLB", RoleGroup::Defense),
    ("SLB", RoleGroup::Defense),
    ("LDE", RoleGroup::Defense),
    ("RDE", RoleGroup::Defense),
    ("LDT", RoleGroup::Defense),
    ("RDT", RoleGroup::Defense),
    ("CB", RoleGroup::Defense),
    ("LCB", RoleGroup::Defense),
    ("RCB", RoleGroup::Defense),
    ("NB", RoleGroup::Defense),
    ("S", RoleGroup::Defense),
    ("FS", RoleGroup::Defense),
    ("SS", RoleGroup::Defense),
    ("DB", RoleGroup::Defense),
    ("K", RoleGroup::SpecialTeams),
    ("PK", RoleGroup::SpecialTeams),
    ("P", RoleGroup::SpecialTeams),
    ("H", RoleGroup::SpecialTeams),
    ("LS", RoleGroup::SpecialTeams),
    ("PR", RoleGroup::SpecialTeams),
    ("KR", RoleGroup::SpecialTeams),
];

static ROLE_GROUPS: OnceLock<HashMap<&'static str, RoleGroup>> = OnceLock::new();

fn role_groups() -> &'static HashMap<&'static str, RoleGroup> {
    ROLE_GROUPS.get_or_init(|| ROLE_TABLE.iter().copied().collect())
}

/// Classify a raw role label.
///
/// Lookup is case-insensitive and ignores surrounding whitespace. This is a
/// pure function of `role`.
pub fn role_group_for(role: &str) -> RoleGroup {
    let key = role.trim().to_uppercase();
    role_groups()
        .get(key.as_str())
        .copied()
        .unwrap_or(RoleGroup::Unknown)
}

/// All role labels known to the table, in table order.
pub fn known_roles() -> impl Iterator<Item = &'static str> {
    ROLE_TABLE.iter().map(|(role, _)| *role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_classify() {
        assert_eq!(role_group_for("QB"), RoleGroup::Offense);
        assert_eq!(role_group_for(" cb "), RoleGroup::Defense);
        assert_eq!(role_group_for("LS"), RoleGroup::SpecialTeams);
    }

    #[test]
    fn unmapped_role_is_unknown() {
        assert_eq!(role_group_for("UNK"), RoleGroup::Unknown);
        assert_eq!(role_group_for(""), RoleGroup::Unknown);
    }

    #[test]
    fn role_table_has_no_duplicate_labels() {
        let count = known_roles().count();
        assert_eq!(role_groups().len(), count);
    }

    #[test]
    fn group_labels_parse_back() {
        for group in [
            RoleGroup::Offense,
            RoleGroup::Defense,
            RoleGroup::SpecialTeams,
            RoleGroup::Unknown,
        ] {
            assert_eq!(group.as_str().parse::<RoleGroup>().unwrap(), group);
        }
    }
}
