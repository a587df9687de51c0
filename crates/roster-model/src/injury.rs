//! Injury / availability status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Availability status of a player. Defaults to [`InjuryStatus::Active`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjuryStatus {
    #[default]
    Active,
    Questionable,
    Doubtful,
    Probable,
    Out,
    #[serde(rename = "Injured Reserve")]
    InjuredReserve,
    #[serde(rename = "PUP")]
    PhysicallyUnableToPerform,
    Suspended,
}

/// Tokens recognised at the end of a raw name fragment, in match order.
///
/// Longer words come before their abbreviations so that `"OUT"` is never read
/// as `"O"` followed by garbage.
pub const KNOWN_INJURY_TOKENS: &[(&str, InjuryStatus)] = &[
    ("QUESTIONABLE", InjuryStatus::Questionable),
    ("DOUBTFUL", InjuryStatus::Doubtful),
    ("PROBABLE", InjuryStatus::Probable),
    ("SUSPENDED", InjuryStatus::Suspended),
    ("OUT", InjuryStatus::Out),
    ("PUP", InjuryStatus::PhysicallyUnableToPerform),
    ("SUS", InjuryStatus::Suspended),
    ("IR", InjuryStatus::InjuredReserve),
    ("Q", InjuryStatus::Questionable),
    ("D", InjuryStatus::Doubtful),
    ("O", InjuryStatus::Out),
];

impl InjuryStatus {
    /// Label as written in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            InjuryStatus::Active => "Active",
            InjuryStatus::Questionable => "Questionable",
            InjuryStatus::Doubtful => "Doubtful",
            InjuryStatus::Probable => "Probable",
            InjuryStatus::Out => "Out",
            InjuryStatus::InjuredReserve => "Injured Reserve",
            InjuryStatus::PhysicallyUnableToPerform => "PUP",
            InjuryStatus::Suspended => "Suspended",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, InjuryStatus::Active | InjuryStatus::Probable)
    }

    /// Match a single token against [`KNOWN_INJURY_TOKENS`].
    ///
    /// Single-letter tokens only match in upper case; longer tokens match
    /// case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if token.chars().count() == 1 {
            return KNOWN_INJURY_TOKENS
                .iter()
                .find(|(known, _)| *known == token)
                .map(|(_, status)| *status);
        }
        let upper = token.to_uppercase();
        KNOWN_INJURY_TOKENS
            .iter()
            .find(|(known, _)| known.len() > 1 && *known == upper)
            .map(|(_, status)| *status)
    }
}

impl fmt::Display for InjuryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InjuryStatus {
    type Err = String;

    /// Parse a free-text status as delivered by structured sources
    /// (`"active"`, `"Injured Reserve"`, `"injured-reserve"`, `"Q"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "ACTIVE" | "ACT" | "HEALTHY" => Ok(InjuryStatus::Active),
            "INJURED RESERVE" | "INJURED" => Ok(InjuryStatus::InjuredReserve),
            "PHYSICALLY UNABLE TO PERFORM" => Ok(InjuryStatus::PhysicallyUnableToPerform),
            _ => InjuryStatus::from_token(s).ok_or_else(|| format!("Unknown injury status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match() {
        assert_eq!(InjuryStatus::from_token("Q"), Some(InjuryStatus::Questionable));
        assert_eq!(InjuryStatus::from_token("ir"), Some(InjuryStatus::InjuredReserve));
        assert_eq!(InjuryStatus::from_token("Out"), Some(InjuryStatus::Out));
        assert_eq!(InjuryStatus::from_token("q"), None);
        assert_eq!(InjuryStatus::from_token("Jr"), None);
    }

    #[test]
    fn free_text_statuses_parse() {
        assert_eq!(
            "injured-reserve".parse::<InjuryStatus>().unwrap(),
            InjuryStatus::InjuredReserve
        );
        assert_eq!("active".parse::<InjuryStatus>().unwrap(), InjuryStatus::Active);
        assert!("day to day".parse::<InjuryStatus>().is_err());
    }
}
