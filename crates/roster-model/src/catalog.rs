//! The fixed table of organizations a compilation covers.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::error::{Result, RosterError};

pub const DEFAULT_MIN_EXPECTED: usize = 53;
pub const DEFAULT_MAX_EXPECTED: usize = 90;

/// One organization: short code, upstream identifiers and expected population range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub code: &'static str,
    /// Identifier used by the Secondary source.
    pub internal_id: &'static str,
    /// Path segment used by the Primary source (and the Secondary fallback).
    pub slug: &'static str,
    pub display_name: &'static str,
    pub min_expected: usize,
    pub max_expected: usize,
}

impl Organization {
    pub const fn new(
        code: &'static str,
        internal_id: &'static str,
        slug: &'static str,
        display_name: &'static str,
    ) -> Self {
        Self {
            code,
            internal_id,
            slug,
            display_name,
            min_expected: DEFAULT_MIN_EXPECTED,
            max_expected: DEFAULT_MAX_EXPECTED,
        }
    }

    pub fn expects(&self, count: usize) -> bool {
        (self.min_expected..=self.max_expected).contains(&count)
    }
}

const ORGANIZATIONS: &[Organization] = &[
    Organization::new("BUF", "2", "buf", "Buffalo Bills"),
    Organization::new("MIA", "15", "mia", "Miami Dolphins"),
    Organization::new("NE", "17", "ne", "New England Patriots"),
    Organization::new("NYJ", "20", "nyj", "New York Jets"),
    Organization::new("BAL", "33", "bal", "Baltimore Ravens"),
    Organization::new("CIN", "4", "cin", "Cincinnati Bengals"),
    Organization::new("CLE", "5", "cle", "Cleveland Browns"),
    Organization::new("PIT", "23", "pit", "Pittsburgh Steelers"),
    Organization::new("HOU", "34", "hou", "Houston Texans"),
    Organization::new("IND", "11", "ind", "Indianapolis Colts"),
    Organization::new("JAX", "30", "jax", "Jacksonville Jaguars"),
    Organization::new("TEN", "10", "ten", "Tennessee Titans"),
    Organization::new("DEN", "7", "den", "Denver Broncos"),
    Organization::new("KC", "12", "kc", "Kansas City Chiefs"),
    Organization::new("LV", "13", "lv", "Las Vegas Raiders"),
    Organization::new("LAC", "24", "lac", "Los Angeles Chargers"),
    Organization::new("DAL", "6", "dal", "Dallas Cowboys"),
    Organization::new("NYG", "19", "nyg", "New York Giants"),
    Organization::new("PHI", "21", "phi", "Philadelphia Eagles"),
    Organization::new("WSH", "28", "was", "Washington Commanders"),
    Organization::new("CHI", "3", "chi", "Chicago Bears"),
    Organization::new("DET", "8", "det", "Detroit Lions"),
    Organization::new("GB", "9", "gb", "Green Bay Packers"),
    Organization::new("MIN", "16", "min", "Minnesota Vikings"),
    Organization::new("ATL", "1", "atl", "Atlanta Falcons"),
    Organization::new("CAR", "29", "car", "Carolina Panthers"),
    Organization::new("NO", "18", "no", "New Orleans Saints"),
    Organization::new("TB", "27", "tb", "Tampa Bay Buccaneers"),
    Organization::new("ARI", "22", "ari", "Arizona Cardinals"),
    Organization::new("LAR", "14", "lar", "Los Angeles Rams"),
    Organization::new("SF", "25", "sf", "San Francisco 49ers"),
    Organization::new("SEA", "26", "sea", "Seattle Seahawks"),
];

/// Ordered, read-only set of organizations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    organizations: Vec<Organization>,
}

static STANDARD_CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// The built-in 32-organization table.
    pub fn standard() -> &'static Catalog {
        STANDARD_CATALOG.get_or_init(|| Catalog {
            organizations: ORGANIZATIONS.to_vec(),
        })
    }

    pub fn from_organizations(organizations: Vec<Organization>) -> Self {
        Self { organizations }
    }

    /// Copy of this catalog with every organization's range replaced.
    #[must_use]
    pub fn with_bounds(&self, min_expected: usize, max_expected: usize) -> Self {
        let organizations = self
            .organizations
            .iter()
            .map(|org| Organization {
                min_expected,
                max_expected,
                ..*org
            })
            .collect();
        Self { organizations }
    }

    /// Restrict the catalog to the given codes, keeping catalog order.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> Result<Self> {
        let index: HashMap<String, &Organization> = self
            .organizations
            .iter()
            .map(|org| (org.code.to_string(), org))
            .collect();
        for code in codes {
            let key = code.as_ref().trim().to_uppercase();
            if !index.contains_key(&key) {
                return Err(RosterError::UnknownOrganization(code.as_ref().to_string()));
            }
        }
        let wanted: Vec<String> = codes
            .iter()
            .map(|code| code.as_ref().trim().to_uppercase())
            .collect();
        let organizations = self
            .organizations
            .iter()
            .filter(|org| wanted.iter().any(|code| code == org.code))
            .copied()
            .collect();
        Ok(Self { organizations })
    }

    pub fn get(&self, code: &str) -> Option<&Organization> {
        let code = code.trim();
        self.organizations
            .iter()
            .find(|org| org.code.eq_ignore_ascii_case(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Organization> {
        self.organizations.iter()
    }

    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.organizations.iter().map(|org| org.code)
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_unique_codes_and_ids() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 32);
        let mut codes: Vec<_> = catalog.codes().collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 32);
        let mut ids: Vec<_> = catalog.iter().map(|org| org.internal_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get("wsh").map(|org| org.slug), Some("was"));
        assert!(catalog.get("XXX").is_none());
    }

    #[test]
    fn select_keeps_catalog_order_and_rejects_unknown() {
        let catalog = Catalog::standard();
        let picked = catalog.select(&["sea", "BUF"]).unwrap();
        assert_eq!(picked.codes().collect::<Vec<_>>(), vec!["BUF", "SEA"]);
        assert!(matches!(
            catalog.select(&["ZZZ"]),
            Err(RosterError::UnknownOrganization(code)) if code == "ZZZ"
        ));
    }

    #[test]
    fn with_bounds_replaces_ranges() {
        let catalog = Catalog::standard().with_bounds(1, 2);
        assert!(catalog.iter().all(|org| org.min_expected == 1 && org.max_expected == 2));
        assert!(catalog.get("BUF").unwrap().expects(2));
        assert!(!catalog.get("BUF").unwrap().expects(3));
    }
}
