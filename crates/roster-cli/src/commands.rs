use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use roster_cli::config::resolve_options;
use roster_core::Compiler;
use roster_ingest::{ReqwestTransport, ThreadSleeper};
use roster_model::{Catalog, Expectations, ExportTargets};
use roster_report::{DirectorySink, export, read_dataset_json};
use roster_validate::validate;
use tracing::{info, info_span};

use crate::cli::{CompileArgs, ValidateArgs};
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_teams() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Name", "Slug", "ID", "Expected"]);
    apply_table_style(&mut table);
    for org in Catalog::standard().iter() {
        table.add_row(vec![
            org.code.to_string(),
            org.display_name.to_string(),
            org.slug.to_string(),
            org.internal_id.to_string(),
            format!("{}-{}", org.min_expected, org.max_expected),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_compile(args: &CompileArgs) -> Result<RunResult> {
    let options =
        resolve_options(args.config.as_deref(), &args.overrides()).context("resolve options")?;
    let catalog = select_catalog(&args.teams, &options.expectations)?;
    if options.export.is_empty() {
        bail!("every export target is disabled; nothing would be written");
    }

    let span = info_span!(
        "run",
        organizations = catalog.len(),
        output_dir = %args.output_dir.display()
    );
    let _guard = span.enter();
    let start = Instant::now();

    // Fail before any network traffic if nothing can be written.
    let mut sink = DirectorySink::create(&args.output_dir).context("create output directory")?;
    let transport = ReqwestTransport::new(&options.fetch).context("build http client")?;
    let compiler = Compiler::new(transport, ThreadSleeper, options.clone());

    let compilation = compiler.compile(&catalog);
    let report = validate(&compilation.records, &catalog, &options.expectations);
    let summary = export(
        &compilation.records,
        &report,
        &options.export,
        &mut sink,
        compilation.compiled_at,
    );

    info!(
        total_players = report.total_players,
        failed = report.organizations_failed,
        warnings = report.warning_count(),
        errors = report.error_count(),
        duration_ms = start.elapsed().as_millis(),
        "compilation finished"
    );

    Ok(RunResult {
        output_dir: args.output_dir.clone(),
        organizations: compilation.organizations,
        report,
        export: summary,
    })
}

pub fn run_validate(args: &ValidateArgs) -> Result<RunResult> {
    let options = resolve_options(args.config.as_deref(), &args.expectations.overrides())
        .context("resolve options")?;
    let catalog = Catalog::standard().with_bounds(
        options.expectations.per_org_min,
        options.expectations.per_org_max,
    );

    let span = info_span!("revalidate", dataset = %args.dataset.display());
    let _guard = span.enter();

    let document = read_dataset_json(&args.dataset).context("read dataset")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| dataset_folder(&args.dataset).to_path_buf());
    let mut sink = DirectorySink::create(&output_dir).context("create output directory")?;

    let report = validate(&document.records, &catalog, &options.expectations);
    let targets = ExportTargets {
        report_name: options.export.report_name.clone(),
        summary_name: options.export.summary_name.clone(),
        ..ExportTargets::report_only()
    };
    let summary = export(
        &document.records,
        &report,
        &targets,
        &mut sink,
        document.metadata.compiled_at,
    );

    Ok(RunResult {
        output_dir,
        organizations: Vec::new(),
        report,
        export: summary,
    })
}

fn select_catalog(teams: &[String], expectations: &Expectations) -> Result<Catalog> {
    let catalog =
        Catalog::standard().with_bounds(expectations.per_org_min, expectations.per_org_max);
    if teams.is_empty() {
        return Ok(catalog);
    }
    catalog.select(teams).context("select organizations")
}

fn dataset_folder(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
