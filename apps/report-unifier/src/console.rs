//! Plain-text output for the terminal

use crate::batch::SkippedFile;
use anyhow::Result;
use report_extract::PeriodGroup;
use report_types::{Severity, SummaryTable, NOT_AVAILABLE};
use std::fmt::Write;

/// Numbered list of the available periods
pub fn format_periods(groups: &[PeriodGroup]) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "Available periods:")?;
    for (index, group) in groups.iter().enumerate() {
        writeln!(
            output,
            "  {:>2}. {} ({} report{})",
            index + 1,
            group.label,
            group.files.len(),
            if group.files.len() == 1 { "" } else { "s" }
        )?;
    }
    Ok(output)
}

/// Comparative summary as an aligned text table, followed by severity
/// totals and any skipped files
pub fn format_summary(period: &str, table: &SummaryTable, skipped: &[SkippedFile]) -> Result<String> {
    let mut output = String::new();

    let headers = SummaryTable::headers();
    let mut lines: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.name.clone()];
            cells.extend(row.display_values());
            cells
        })
        .collect();
    let mut totals = vec!["TOTAL".to_string()];
    totals.extend(table.totals.display_values());
    lines.push(totals);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            lines
                .iter()
                .map(|l| l[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let rule = "-".repeat(widths.iter().sum::<usize>() + 3 * (widths.len() - 1));

    writeln!(output)?;
    writeln!(output, "Comparative Summary - {}", period)?;
    writeln!(output, "{}", rule)?;
    write_cells(&mut output, headers.iter().copied(), &widths)?;
    writeln!(output, "{}", rule)?;
    let total_index = lines.len() - 1;
    for (index, line) in lines.iter().enumerate() {
        if index == total_index {
            writeln!(output, "{}", rule)?;
        }
        write_cells(&mut output, line.iter().map(String::as_str), &widths)?;
    }
    writeln!(output)?;

    writeln!(output, "Alert Count by Severity:")?;
    for severity in Severity::ALL {
        let total = table
            .severity_total(severity)
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writeln!(output, "  {:<10} {}", severity.label(), total)?;
    }

    if !skipped.is_empty() {
        writeln!(output)?;
        writeln!(output, "Skipped {} unreadable file(s):", skipped.len())?;
        for file in skipped {
            writeln!(output, "  - {}: {}", file.path.display(), file.reason)?;
        }
    }
    writeln!(output)?;

    Ok(output)
}

/// First column left-aligned, counters right-aligned
fn write_cells<'a>(
    output: &mut String,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> Result<()> {
    let mut line = String::new();
    for (index, (cell, width)) in cells.zip(widths).enumerate() {
        if index == 0 {
            write!(line, "{:<width$}", cell, width = *width)?;
        } else {
            write!(line, " | {:>width$}", cell, width = *width)?;
        }
    }
    writeln!(output, "{}", line.trim_end())?;
    Ok(())
}
