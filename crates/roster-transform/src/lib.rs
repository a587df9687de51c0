//! Normalization of raw Primary and Secondary payloads into [`PlayerRecord`]s.
//!
//! [`PlayerRecord`]: roster_model::PlayerRecord

pub mod depth;
pub mod html;
pub mod name;
pub mod normalize;
pub mod outcome;
pub mod roster_json;

pub use depth::DepthChartEntries;
pub use name::{ordinal, role_from_header, split_name_injury};
pub use normalize::{Entries, normalize, normalize_all, parse_entries};
pub use outcome::{ParseOutcome, SkipReason};
pub use roster_json::{RosterEntries, UNKNOWN_ROLE};
