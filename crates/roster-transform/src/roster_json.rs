//! Secondary source: roster API documents.
//!
//! The `athletes` array is either grouped (`[{position, items: [...]}]`) or
//! flat (`[{displayName, position: {abbreviation}}]`). Entries carry roster
//! membership only, so no depth order is assigned.

use std::vec;

use chrono::{DateTime, Utc};
use roster_model::{InjuryStatus, PlayerRecord, SourceKind};
use serde::Deserialize;
use serde_json::Value;

use crate::outcome::{ParseOutcome, SkipReason};

/// Role used when an entry carries no position.
pub const UNKNOWN_ROLE: &str = "UNK";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AthleteEntry {
    full_name: Option<String>,
    display_name: Option<String>,
    jersey: Option<Jersey>,
    position: Option<Position>,
    status: Option<Status>,
    #[serde(default)]
    injuries: Vec<Injury>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Jersey {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Position {
    Detailed { abbreviation: Option<String> },
    Label(String),
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Injury {
    status: Option<String>,
}

impl AthleteEntry {
    fn name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .or(self.display_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn role(&self) -> String {
        match &self.position {
            Some(Position::Detailed {
                abbreviation: Some(abbreviation),
            }) if !abbreviation.trim().is_empty() => abbreviation.trim().to_uppercase(),
            Some(Position::Label(label)) if (1..=4).contains(&label.trim().len()) => {
                label.trim().to_uppercase()
            }
            _ => UNKNOWN_ROLE.to_string(),
        }
    }

    fn jersey(&self) -> Option<String> {
        match &self.jersey {
            Some(Jersey::Text(text)) => Some(text.clone()),
            Some(Jersey::Number(number)) => Some(number.to_string()),
            None => None,
        }
    }

    /// Reported injury first, then the roster status, else Active.
    fn injury_status(&self) -> InjuryStatus {
        self.injuries
            .iter()
            .filter_map(|injury| injury.status.as_deref())
            .chain(self.status.as_ref().and_then(|status| status.kind.as_deref()))
            .find_map(|text| text.parse::<InjuryStatus>().ok())
            .unwrap_or_default()
    }
}

/// Lazy walk over the athlete entries of a roster document.
#[derive(Debug, Clone)]
pub struct RosterEntries {
    entries: vec::IntoIter<Value>,
    document_error: Option<String>,
    organization: String,
    observed_at: DateTime<Utc>,
}

impl RosterEntries {
    pub fn new(body: &str, organization: &str, observed_at: DateTime<Utc>) -> Self {
        let (entries, document_error) = match serde_json::from_str::<Value>(body) {
            Ok(document) => (flatten_athletes(document), None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self {
            entries: entries.into_iter(),
            document_error,
            organization: organization.to_string(),
            observed_at,
        }
    }

    fn entry(&self, value: Value) -> ParseOutcome {
        let athlete: AthleteEntry = match serde_json::from_value(value) {
            Ok(athlete) => athlete,
            Err(err) => return ParseOutcome::Skip(SkipReason::MalformedEntry(err.to_string())),
        };
        let Some(name) = athlete.name() else {
            return ParseOutcome::Skip(SkipReason::InvalidName {
                fragment: String::new(),
            });
        };
        let mut record = PlayerRecord::new(
            name,
            self.organization.as_str(),
            athlete.role(),
            SourceKind::Secondary,
            self.observed_at,
        )
        .with_injury_status(athlete.injury_status());
        if let Some(jersey) = athlete.jersey() {
            record = record.with_jersey_number(jersey);
        }
        ParseOutcome::Record(record)
    }
}

impl Iterator for RosterEntries {
    type Item = ParseOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.document_error.take() {
            return Some(ParseOutcome::Skip(SkipReason::MalformedDocument(err)));
        }
        let value = self.entries.next()?;
        Some(self.entry(value))
    }
}

/// Athlete values in document order, with groups expanded in place.
fn flatten_athletes(document: Value) -> Vec<Value> {
    let Value::Object(mut root) = document else {
        return Vec::new();
    };
    let Some(Value::Array(athletes)) = root.remove("athletes") else {
        return Vec::new();
    };
    athletes
        .into_iter()
        .flat_map(|entry| match entry {
            Value::Object(mut group) if group.get("items").is_some_and(Value::is_array) => {
                match group.remove("items") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                }
            }
            other => vec![other],
        })
        .collect()
}
