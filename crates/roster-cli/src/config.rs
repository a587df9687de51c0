//! Option layering: built-in defaults, then an optional TOML file, then flags.

use std::fs;
use std::path::{Path, PathBuf};

use roster_model::{CompileOptions, RosterError, SecondaryPolicy};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    Invalid(#[from] RosterError),
}

/// Values supplied on the command line. `None` and `false` leave the
/// underlying option untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub inter_org_delay_ms: Option<u64>,
    pub secondary_policy: Option<SecondaryPolicy>,
    pub expected_total: Option<usize>,
    pub tolerance: Option<f64>,
    pub per_org_min: Option<usize>,
    pub per_org_max: Option<usize>,
    pub no_json: bool,
    pub no_csv: bool,
    pub no_report: bool,
    pub no_summary: bool,
}

impl Overrides {
    pub fn apply(&self, options: &mut CompileOptions) {
        if let Some(value) = self.max_retries {
            options.fetch.max_retries = value;
        }
        if let Some(value) = self.base_delay_ms {
            options.fetch.base_delay_ms = value;
        }
        if let Some(value) = self.request_timeout_secs {
            options.fetch.request_timeout_secs = value;
        }
        if let Some(value) = self.inter_org_delay_ms {
            options.schedule.inter_org_delay_ms = value;
        }
        if let Some(value) = self.secondary_policy {
            options.schedule.secondary_policy = value;
        }
        if let Some(value) = self.expected_total {
            options.expectations.expected_total = value;
        }
        if let Some(value) = self.tolerance {
            options.expectations.tolerance = value;
        }
        if let Some(value) = self.per_org_min {
            options.expectations.per_org_min = value;
        }
        if let Some(value) = self.per_org_max {
            options.expectations.per_org_max = value;
        }
        options.export.json &= !self.no_json;
        options.export.csv &= !self.no_csv;
        options.export.report &= !self.no_report;
        options.export.summary &= !self.no_summary;
    }
}

/// Parse a TOML document into options; missing keys keep their defaults.
pub fn parse_options(text: &str, path: &Path) -> Result<CompileOptions, ConfigError> {
    toml::from_str(text).map_err(|error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: error.to_string(),
    })
}

pub fn load_options_file(path: &Path) -> Result<CompileOptions, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_options(&text, path)
}

/// Resolve the options for a run and reject unusable combinations.
pub fn resolve_options(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<CompileOptions, ConfigError> {
    let mut options = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            load_options_file(path)?
        }
        None => CompileOptions::default(),
    };
    overrides.apply(&mut options);
    options.validate()?;
    Ok(options)
}
