//! Merge and compilation driver for the roster pipeline.

pub mod compile;
pub mod merge;

pub use compile::{Compilation, Compiler, OrganizationOutcome, OrganizationStatus};
pub use merge::{MergeOutcome, MergeStats, merge};
