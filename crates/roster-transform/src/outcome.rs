use roster_model::PlayerRecord;
use thiserror::Error;

/// Why a raw entry produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("entry {fragment:?} has no usable name")]
    InvalidName { fragment: String },

    #[error("roster entry is not a valid athlete object: {0}")]
    MalformedEntry(String),

    #[error("document could not be parsed: {0}")]
    MalformedDocument(String),
}

/// Result of parsing one raw entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Record(PlayerRecord),
    Skip(SkipReason),
}

impl ParseOutcome {
    pub fn into_record(self) -> Option<PlayerRecord> {
        match self {
            ParseOutcome::Record(record) => Some(record),
            ParseOutcome::Skip(_) => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, ParseOutcome::Skip(_))
    }
}
