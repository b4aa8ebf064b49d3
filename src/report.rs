use crate::deleter::DeletionReport;
use crate::error::SweepError;
use crate::selector::Selection;
use crate::types::Candidate;
use chrono::{DateTime, Local};
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, Table};
use std::collections::HashSet;
use std::path::PathBuf;

#[must_use]
pub fn format_timestamp(ts: DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn print_candidates(selection: &Selection) {
    if selection.candidates.is_empty() {
        println!("{}", "No files fit within the requested budget.".yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["#", "File", "Size", "Last accessed"]);

    for (i, candidate) in selection.candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(candidate.entry.path.display()),
            Cell::new(human_bytes::human_bytes(candidate.entry.size as f64)),
            Cell::new(candidate.formatted_accessed()),
        ]);
    }

    table.add_row(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new(format!("{} files", selection.candidates.len())).add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(selection.selected_size() as f64))
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new(""),
    ]);

    println!("\n{table}");
    println!(
        "Scanned total: {}   Budget: {}",
        human_bytes::human_bytes(selection.total_size as f64),
        human_bytes::human_bytes(selection.budget as f64)
    );
}

pub fn print_skipped(skipped: &[(PathBuf, SweepError)]) {
    if skipped.is_empty() {
        return;
    }

    println!(
        "\n{} {} files could not be measured and were left out:",
        "WARNING:".yellow(),
        skipped.len()
    );
    for (_, err) in skipped {
        println!("  - {err}");
    }
}

/// Bytes belonging to candidates that were actually removed.
#[must_use]
pub fn freed_bytes(candidates: &[Candidate], report: &DeletionReport) -> u64 {
    let removed: HashSet<&PathBuf> = report.succeeded.iter().collect();
    candidates
        .iter()
        .filter(|c| removed.contains(&c.entry.path))
        .map(|c| c.entry.size)
        .sum()
}

pub fn print_deletion_report(report: &DeletionReport, freed: u64) {
    println!("\n{}", "=== Deletion Summary ===".cyan());
    println!(
        "Deleted: {}   Freed: {}",
        report.succeeded.len().to_string().green(),
        human_bytes::human_bytes(freed as f64).green()
    );

    if report.failed.is_empty() {
        return;
    }

    println!("Failed:  {}", report.failed.len().to_string().red());
    for (_, err) in &report.failed {
        println!("  {} {err}", "✗".red());
    }
}
