//! Fixed-layout text digest of a [`ValidationReport`].

use roster_model::ValidationReport;

const RULE_WIDTH: usize = 80;

pub fn render_summary(report: &ValidationReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "ROSTER DEPTH CHART COMPILATION SUMMARY".to_string(),
        rule.clone(),
        String::new(),
        "STATISTICS:".to_string(),
        format!("  Total Players: {}", report.total_players),
        format!("  Unique Players: {}", report.unique_players),
        format!(
            "  Organizations Processed: {}/{}",
            report.organizations_processed, report.organizations_expected
        ),
        format!("  Organizations Failed: {}", report.organizations_failed),
        format!("  Expected Total: {}", report.expected_total),
        format!(
            "  Meets Expectation: {}",
            if report.meets_expectation { "yes" } else { "no" }
        ),
        String::new(),
    ];

    if !report.missing_organizations.is_empty() {
        lines.push("FAILED ORGANIZATIONS:".to_string());
        lines.push(format!("  {}", report.missing_organizations.join(", ")));
        lines.push(String::new());
    }

    lines.push("ROLE GROUP BREAKDOWN:".to_string());
    lines.extend(
        report
            .by_role_group
            .iter()
            .map(|(group, count)| format!("  {group}: {count}")),
    );

    for (title, items) in [("WARNINGS", &report.warnings), ("ERRORS", &report.errors)] {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }

    lines.push(rule);
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
