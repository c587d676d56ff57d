// Colored terminal output for aggregate tables and label statistics.
//
// Each aggregate is shown as a stacked text bar per year, one segment per
// category, so the trend is readable without opening the rendered charts.

use colored::{ColoredString, Colorize};

use crate::aggregate::AggregateTable;
use crate::dataset::summary::{LabelCounts, UnknownLabel};

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 28;

/// Display one aggregate table as stacked per-year bars plus a legend.
pub fn display_aggregate(table: &AggregateTable) {
    let mut heading = format!("=== {} ", table.dimension.label());
    if let Some(split) = &table.split {
        heading.push_str(&format!("for {} '{}' ", split.column, split.value));
    }
    if let Some(n) = table.top_n {
        heading.push_str(&format!("(top {n} per year) "));
    }
    heading.push_str("===");
    println!("\n{}", heading.bold());

    if table.groups.is_empty() {
        println!("  {}", "No statements.".dimmed());
        return;
    }

    let categories = table.categories();
    let max_total = table.groups.iter().map(|g| g.total()).max().unwrap_or(0).max(1);

    for group in &table.groups {
        let mut bar = String::new();
        let mut used = 0;
        for c in &group.counts {
            let width = (c.count as usize * BAR_WIDTH) / max_total as usize;
            let idx = categories
                .iter()
                .position(|name| *name == c.category)
                .unwrap_or(0);
            bar.push_str(&paint(&"#".repeat(width), idx).to_string());
            used += width;
        }
        bar.push_str(&" ".repeat(BAR_WIDTH.saturating_sub(used)));
        println!("  {:>6}  [{}] {:>5}", group.year, bar, group.total());
    }

    println!();
    for (idx, name) in categories.iter().enumerate() {
        let per_year: Vec<String> = table
            .groups
            .iter()
            .map(|g| table.count(g.year.as_str(), name).to_string())
            .collect();
        println!(
            "  {} {:<width$} {}",
            paint("##", idx),
            super::truncate_chars(name, LABEL_WIDTH),
            per_year.join(" / ").dimmed(),
            width = LABEL_WIDTH + 3,
        );
    }
}

/// Display whole-table label counts, flagging labels outside the vocabulary.
pub fn display_label_counts(counts: &LabelCounts, unknown: &[UnknownLabel]) {
    println!(
        "\n{}",
        format!("=== Label counts ({} statements) ===", counts.rows).bold()
    );

    for dc in &counts.dimensions {
        println!("\n  {}", dc.dimension.label().bold());
        for (value, count) in &dc.counts {
            let label = if dc.dimension.ordinal(value).is_some() {
                value.normal()
            } else {
                value.yellow()
            };
            println!("    {:<width$} {:>6}", label, count, width = LABEL_WIDTH + 3);
        }
    }

    if !unknown.is_empty() {
        println!(
            "\n  {} {} label(s) outside the canonical vocabulary",
            "!".yellow().bold(),
            unknown.len()
        );
        for u in unknown {
            println!(
                "    {}: '{}' ({} rows)",
                u.dimension.column_name(),
                u.value,
                u.rows
            );
        }
    }
}

/// Cycle through a fixed palette by legend position.
fn paint(text: &str, idx: usize) -> ColoredString {
    match idx % 8 {
        0 => text.blue(),
        1 => text.bright_red(),
        2 => text.green(),
        3 => text.yellow(),
        4 => text.magenta(),
        5 => text.cyan(),
        6 => text.bright_blue(),
        _ => text.bright_black(),
    }
}
