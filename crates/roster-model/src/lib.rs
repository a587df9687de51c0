//! Domain types shared by every roster compilation stage.

pub mod catalog;
pub mod error;
pub mod injury;
pub mod options;
pub mod record;
pub mod report;
pub mod roles;

pub use catalog::{Catalog, Organization};
pub use error::{Result, RosterError};
pub use injury::{InjuryStatus, KNOWN_INJURY_TOKENS};
pub use options::{
    CompileOptions, Expectations, ExportTargets, FetchOptions, ScheduleOptions, SecondaryPolicy,
};
pub use record::{IdentityKey, PlayerRecord, SourceKind, sort_for_export};
pub use report::ValidationReport;
pub use roles::{RoleGroup, known_roles, role_group_for};
