//! Comparative summary table across reports

use crate::count::Count;
use crate::record::{ExtractionRecord, Severity};
use serde::{Deserialize, Serialize};

/// Counter columns of the comparative summary, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryColumn {
    AlertsTriggered,
    AlertsHandled,
    AffectedFiles,
    RemediatedFiles,
    AffectedEndpoints,
    AutoInvestigations,
    ResponseActions,
    ActiveEndpoints,
}

impl SummaryColumn {
    pub const ALL: [SummaryColumn; 8] = [
        SummaryColumn::AlertsTriggered,
        SummaryColumn::AlertsHandled,
        SummaryColumn::AffectedFiles,
        SummaryColumn::RemediatedFiles,
        SummaryColumn::AffectedEndpoints,
        SummaryColumn::AutoInvestigations,
        SummaryColumn::ResponseActions,
        SummaryColumn::ActiveEndpoints,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            SummaryColumn::AlertsTriggered => "Critical/High Alerts",
            SummaryColumn::AlertsHandled => "Handled Alerts",
            SummaryColumn::AffectedFiles => "Affected Files",
            SummaryColumn::RemediatedFiles => "Remediated Files",
            SummaryColumn::AffectedEndpoints => "Affected Endpoints",
            SummaryColumn::AutoInvestigations => "Auto. Investigations",
            SummaryColumn::ResponseActions => "Response Actions",
            SummaryColumn::ActiveEndpoints => "Active Endpoints",
        }
    }

    /// Read this column's value out of a record
    pub fn get(&self, record: &ExtractionRecord) -> Count {
        match self {
            SummaryColumn::AlertsTriggered => record.malicious.alerts_triggered,
            SummaryColumn::AlertsHandled => record.malicious.alerts_handled,
            SummaryColumn::AffectedFiles => record.malicious.affected_files,
            SummaryColumn::RemediatedFiles => record.malicious.remediated_files,
            SummaryColumn::AffectedEndpoints => record.malicious.affected_endpoints,
            SummaryColumn::AutoInvestigations => record.automation.auto_investigations,
            SummaryColumn::ResponseActions => record.automation.response_actions,
            SummaryColumn::ActiveEndpoints => record.inventory.active_endpoints,
        }
    }
}

/// One row per report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    pub values: [Count; 8],
}

impl SummaryRow {
    pub fn display_values(&self) -> Vec<String> {
        self.values.iter().map(Count::display).collect()
    }
}

/// Column totals. `None` means nothing in the column could be summed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Totals {
    pub values: Vec<Option<u64>>,
}

impl Totals {
    /// Totals display, `"N/A"` where the column could not be aggregated
    pub fn display_values(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|v| match v {
                Some(total) => total.to_string(),
                None => crate::NOT_AVAILABLE.to_string(),
            })
            .collect()
    }
}

/// Rows plus totals, ready for the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub totals: Totals,
    /// Severity totals across all reports, in `Severity::ALL` order
    pub severity_totals: Totals,
}

impl SummaryTable {
    pub fn headers() -> Vec<&'static str> {
        std::iter::once("Report")
            .chain(SummaryColumn::ALL.iter().map(SummaryColumn::header))
            .collect()
    }

    pub fn severity_total(&self, severity: Severity) -> Option<u64> {
        let idx = Severity::ALL
            .iter()
            .position(|s| *s == severity)
            .unwrap_or_default();
        self.severity_totals.values.get(idx).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_start_with_report() {
        let headers = SummaryTable::headers();
        assert_eq!(headers.len(), 9);
        assert_eq!(headers[0], "Report");
        assert_eq!(headers[8], "Active Endpoints");
    }

    #[test]
    fn test_totals_display() {
        let totals = Totals {
            values: vec![Some(5), None, Some(0)],
        };
        assert_eq!(totals.display_values(), vec!["5", "N/A", "0"]);
    }

    #[test]
    fn test_totals_serialize_as_nullable_list() {
        let totals = Totals {
            values: vec![Some(1), None],
        };
        let json = serde_json::to_string(&totals).unwrap();
        assert_eq!(json, "[1,null]");
    }
}
