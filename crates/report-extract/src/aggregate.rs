//! Column totals across reports

use report_types::{Count, ExtractionRecord, Severity, SummaryColumn, SummaryRow, SummaryTable, Totals};

/// Sum the present values. Missing values are skipped rather than counted as
/// zero; a column with nothing to sum totals to `None`.
pub fn column_total<I>(values: I) -> Option<u64>
where
    I: IntoIterator<Item = Count>,
{
    values
        .into_iter()
        .filter_map(|c| c.value())
        .fold(None, |acc: Option<u64>, v| {
            Some(acc.unwrap_or(0).saturating_add(v))
        })
}

/// Build the comparative summary: one row per record in input order, plus
/// totals for the eight counter columns and the four severity buckets
pub fn aggregate(records: &[ExtractionRecord]) -> SummaryTable {
    let rows = records
        .iter()
        .map(|record| SummaryRow {
            name: record.display_name().to_string(),
            values: SummaryColumn::ALL.map(|column| column.get(record)),
        })
        .collect();

    let totals = Totals {
        values: SummaryColumn::ALL
            .iter()
            .map(|column| column_total(records.iter().map(|r| column.get(r))))
            .collect(),
    };

    let severity_totals = Totals {
        values: Severity::ALL
            .iter()
            .map(|severity| column_total(records.iter().map(|r| r.severity_counts.get(*severity))))
            .collect(),
    };

    SummaryTable {
        rows,
        totals,
        severity_totals,
    }
}
