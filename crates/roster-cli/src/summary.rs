use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_core::{OrganizationOutcome, OrganizationStatus};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    for artifact in &result.export.written {
        println!("  {}: {}", artifact.name, artifact.location);
    }
    if !result.organizations.is_empty() {
        print_organization_table(&result.organizations);
    }
    print_totals(result);
    print_issue_table(result);
    if result.export.has_failures() {
        eprintln!("Export failures:");
        for (name, error) in &result.export.failed {
            eprintln!("- {name}: {error}");
        }
    }
}

fn print_organization_table(organizations: &[OrganizationOutcome]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Org"),
        header_cell("Primary"),
        header_cell("Secondary"),
        header_cell("Merged"),
        header_cell("Dropped"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);

    let mut totals = [0usize; 4];
    for org in organizations {
        let stats = org.stats;
        totals[0] += stats.primary_count;
        totals[1] += stats.secondary_count;
        totals[2] += stats.merged_count;
        totals[3] += stats.duplicates_dropped;
        let secondary = if org.secondary_fetched {
            Cell::new(stats.secondary_count)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![
            Cell::new(&org.code)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stats.primary_count),
            secondary,
            Cell::new(stats.merged_count),
            count_cell(stats.duplicates_dropped, Color::Yellow),
            status_cell(org.status()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        Cell::new(totals[1]).add_attribute(Attribute::Bold),
        Cell::new(totals[2]).add_attribute(Attribute::Bold),
        count_cell(totals[3], Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_totals(result: &RunResult) {
    let report = &result.report;
    let (label, color) = if report.meets_expectation {
        ("yes", Color::Green)
    } else {
        ("no", Color::Red)
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total players"), Cell::new(report.total_players)]);
    table.add_row(vec![Cell::new("Unique players"), Cell::new(report.unique_players)]);
    table.add_row(vec![
        Cell::new("Organizations"),
        Cell::new(format!(
            "{}/{}",
            report.organizations_processed, report.organizations_expected
        )),
    ]);
    table.add_row(vec![
        Cell::new("Expected total"),
        Cell::new(report.expected_total),
    ]);
    table.add_row(vec![
        Cell::new("Meets expectation"),
        Cell::new(label).fg(color).add_attribute(Attribute::Bold),
    ]);
    for (group, count) in &report.by_role_group {
        table.add_row(vec![dim_cell(format!("  {group}")), Cell::new(count)]);
    }
    println!("{table}");
}

fn print_issue_table(result: &RunResult) {
    let report = &result.report;
    if report.errors.is_empty() && report.warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Severity"), header_cell("Message")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for error in &report.errors {
        table.add_row(vec![Cell::new("ERROR").fg(Color::Red), Cell::new(error)]);
    }
    for warning in &report.warnings {
        table.add_row(vec![Cell::new("WARN").fg(Color::Yellow), Cell::new(warning)]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: OrganizationStatus) -> Cell {
    let color = match status {
        OrganizationStatus::Complete => Color::Green,
        OrganizationStatus::Partial => Color::Yellow,
        OrganizationStatus::Failed => Color::Red,
    };
    Cell::new(status.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
