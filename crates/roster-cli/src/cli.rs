//! CLI argument definitions for the roster compiler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_cli::config::Overrides;
use roster_model::SecondaryPolicy;

#[derive(Parser)]
#[command(
    name = "roster-compiler",
    version,
    about = "Compile a league-wide depth-chart and roster dataset",
    long_about = "Fetch depth charts and rosters for every organization, merge the two \
                  sources with depth charts taking priority, validate the population \
                  and export JSON, CSV, a validation report and a text summary."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch, merge, validate and export the full dataset.
    Compile(CompileArgs),

    /// Re-validate a previously exported dataset JSON.
    Validate(ValidateArgs),

    /// List the organizations in the catalog.
    Teams,
}

#[derive(Args)]
pub struct CompileArgs {
    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// TOML configuration file; flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only compile these organization codes (comma separated).
    #[arg(long = "teams", value_name = "CODES", value_delimiter = ',')]
    pub teams: Vec<String>,

    /// Attempts per endpoint, including the first.
    #[arg(long = "max-retries", value_name = "N")]
    pub max_retries: Option<u32>,

    /// Backoff base; attempt n waits base * 2^(n-1).
    #[arg(long = "base-delay-ms", value_name = "MS")]
    pub base_delay_ms: Option<u64>,

    /// Pause after each organization.
    #[arg(long = "inter-org-delay-ms", value_name = "MS")]
    pub inter_org_delay_ms: Option<u64>,

    /// Per-request timeout.
    #[arg(long = "timeout-secs", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// When to consult the Secondary source.
    #[arg(long = "secondary", value_enum)]
    pub secondary: Option<SecondaryPolicyArg>,

    #[command(flatten)]
    pub expectations: ExpectationArgs,

    /// Skip the dataset JSON.
    #[arg(long = "no-json")]
    pub no_json: bool,

    /// Skip the dataset CSV.
    #[arg(long = "no-csv")]
    pub no_csv: bool,

    /// Skip the validation report JSON.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Skip the text summary.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Dataset JSON written by a previous `compile`.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Where to write the report and summary (default: the dataset's folder).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML configuration file; flags override its values.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub expectations: ExpectationArgs,
}

#[derive(Args)]
pub struct ExpectationArgs {
    /// Expected total record count.
    #[arg(long = "expected-total", value_name = "N")]
    pub expected_total: Option<usize>,

    /// Accepted deviation from the expected total, as a fraction.
    #[arg(long = "tolerance", value_name = "FRACTION")]
    pub tolerance: Option<f64>,

    /// Lowest plausible record count per organization.
    #[arg(long = "per-org-min", value_name = "N")]
    pub per_org_min: Option<usize>,

    /// Highest plausible record count per organization.
    #[arg(long = "per-org-max", value_name = "N")]
    pub per_org_max: Option<usize>,
}

impl CompileArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            max_retries: self.max_retries,
            base_delay_ms: self.base_delay_ms,
            request_timeout_secs: self.timeout_secs,
            inter_org_delay_ms: self.inter_org_delay_ms,
            secondary_policy: self.secondary.map(SecondaryPolicy::from),
            no_json: self.no_json,
            no_csv: self.no_csv,
            no_report: self.no_report,
            no_summary: self.no_summary,
            ..self.expectations.overrides()
        }
    }
}

impl ExpectationArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            expected_total: self.expected_total,
            tolerance: self.tolerance,
            per_org_min: self.per_org_min,
            per_org_max: self.per_org_max,
            ..Overrides::default()
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SecondaryPolicyArg {
    WhenInsufficient,
    Always,
}

impl From<SecondaryPolicyArg> for SecondaryPolicy {
    fn from(arg: SecondaryPolicyArg) -> Self {
        match arg {
            SecondaryPolicyArg::WhenInsufficient => SecondaryPolicy::WhenInsufficient,
            SecondaryPolicyArg::Always => SecondaryPolicy::Always,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
