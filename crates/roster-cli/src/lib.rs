//! Library components for the roster compiler CLI.

pub mod config;
pub mod logging;
