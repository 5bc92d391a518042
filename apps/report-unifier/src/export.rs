//! JSON export of the consolidated data

use anyhow::Context;
use report_types::{ExtractionRecord, SummaryTable};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub period: &'a str,
    pub records: &'a [ExtractionRecord],
    pub summary: &'a SummaryTable,
}

pub fn to_json(period: &str, records: &[ExtractionRecord], summary: &SummaryTable) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&JsonExport {
        period,
        records,
        summary,
    })
    .context("Failed to serialize JSON export")
}

pub fn write_json(
    path: &Path,
    period: &str,
    records: &[ExtractionRecord],
    summary: &SummaryTable,
) -> anyhow::Result<()> {
    let json = to_json(period, records, summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON export: {}", path.display()))
}
