use crate::count::Count;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Identity block of an executive report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub name: Option<String>,
    pub date_range: Option<String>,
    pub generated: Option<String>,
}

/// "Malicious Detections and Preventions" block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Malicious {
    pub alerts_triggered: Count,
    pub alerts_handled: Count,
    pub affected_files: Count,
    pub remediated_files: Count,
    pub affected_endpoints: Count,
}

/// "Automation" block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Automation {
    pub auto_investigations: Count,
    pub response_actions: Count,
}

/// "Inventory" block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub active_endpoints: Count,
}

/// Alert severity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Label as printed in the report table
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alert counts per severity bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: Count,
    pub high: Count,
    pub medium: Count,
    pub low: Count,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> Count {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn set(&mut self, severity: Severity, count: Count) {
        match severity {
            Severity::Critical => self.critical = count,
            Severity::High => self.high = count,
            Severity::Medium => self.medium = count,
            Severity::Low => self.low = count,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, Count)> + '_ {
        Severity::ALL.into_iter().map(|s| (s, self.get(s)))
    }
}

/// Everything extracted from one executive report PDF
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub report_name: String,
    pub summary: Summary,
    pub malicious: Malicious,
    pub automation: Automation,
    pub inventory: Inventory,
    pub severity_counts: SeverityCounts,
    /// Font names embedded in the source document, informational only
    pub fonts: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Text backend that produced the text the fields were matched against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

impl ExtractionRecord {
    pub fn new(report_name: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            ..Default::default()
        }
    }

    /// Name to show for this report: the extracted site/group name when
    /// present, the file-derived name otherwise
    pub fn display_name(&self) -> &str {
        self.summary
            .name
            .as_deref()
            .unwrap_or(self.report_name.as_str())
    }

    pub fn date_range_display(&self) -> &str {
        self.summary.date_range.as_deref().unwrap_or(crate::NOT_AVAILABLE)
    }

    pub fn generated_display(&self) -> &str {
        self.summary.generated.as_deref().unwrap_or(crate::NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_record_is_fully_populated() {
        let record = ExtractionRecord::new("Site A");
        assert_eq!(record.report_name, "Site A");
        assert_eq!(record.display_name(), "Site A");
        assert_eq!(record.date_range_display(), "N/A");
        assert_eq!(record.generated_display(), "N/A");
        assert_eq!(record.malicious.alerts_triggered.display(), "0");
        assert_eq!(record.inventory.active_endpoints.display(), "0");
        for (_, count) in record.severity_counts.iter() {
            assert_eq!(count.display(), "0");
        }
    }

    #[test]
    fn test_extracted_name_overrides_file_name() {
        let mut record = ExtractionRecord::new("file-derived");
        record.summary.name = Some("Head Office".into());
        assert_eq!(record.display_name(), "Head Office");
    }

    #[test]
    fn test_severity_from_label() {
        assert_eq!(Severity::from_label("critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_label(" HIGH "), Some(Severity::High));
        assert_eq!(Severity::from_label("Severe"), None);
    }

    #[test]
    fn test_severity_counts_set_get() {
        let mut counts = SeverityCounts::default();
        counts.set(Severity::Medium, Count::new(5));
        assert_eq!(counts.get(Severity::Medium), Count::new(5));
        assert!(counts.get(Severity::Low).is_missing());
    }
}
