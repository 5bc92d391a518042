//! Regex patterns for the executive report template
//!
//! All patterns are case-insensitive and let `.` cross line breaks, since
//! label/value pairs may be split across lines depending on the text backend.
//! Counter captures are ASCII digits, matching what `Count::parse` accepts.

use lazy_static::lazy_static;
use regex::Regex;
use report_types::Severity;

lazy_static! {
    /// "Group Name ... Date Range ... Generated ... *" identity variant
    pub static ref GROUP_IDENTITY: Regex =
        Regex::new(r"(?is)Group\s+Name\s*(.*?)\s*Date\s+Range\s*(.*?)\s*Generated\s*(.*?)\s*\*").unwrap();

    /// "Site Name ... Date Range" identity variant
    pub static ref SITE_NAME: Regex =
        Regex::new(r"(?is)Site\s+Name\s*(.*?)\s*Date\s+Range").unwrap();

    pub static ref DATE_RANGE: Regex =
        Regex::new(r"(?is)Date\s+Range\s*(.*?)\s*Generated").unwrap();

    pub static ref GENERATED: Regex =
        Regex::new(r"(?is)Generated\s*(.*?)\s*\*").unwrap();

    pub static ref MALICIOUS: Regex = Regex::new(concat!(
        r"(?is)Malicious\s+Detections\s+and\s+Preventions\s*",
        r"([0-9]+)\s*Critical\s+and\s+high\s+alerts\s+were\s+triggered\s*",
        r"([0-9]+)\s*Critical\s+and\s+high\s+alerts\s+were\s+handled\s*",
        r"([0-9]+)\s*Affected\s+files\s*",
        r"([0-9]+)\s*Remediated\s+files\s*",
        r"([0-9]+)\s*Affected\s+endpoints",
    ))
    .unwrap();

    pub static ref AUTOMATION: Regex = Regex::new(
        r"(?is)Automation\s*([0-9]+)\s*Automatic\s+investigations\s*([0-9]+)\s*Response\s+actions"
    )
    .unwrap();

    /// Count under the "Inventory" header
    pub static ref INVENTORY: Regex =
        Regex::new(r"(?is)Inventory\s*([0-9]+)\s*Active\s+endpoints").unwrap();

    /// Count before the label, anywhere in the text
    pub static ref ACTIVE_ENDPOINTS_BEFORE: Regex =
        Regex::new(r"(?is)([0-9]+)\s*Active\s+endpoints").unwrap();

    /// Count after the label, anywhere in the text
    pub static ref ACTIVE_ENDPOINTS_AFTER: Regex =
        Regex::new(r"(?is)Active\s+endpoints\s*([0-9]+)").unwrap();

    pub static ref SEVERITY_BLOCK_START: Regex =
        Regex::new(r"(?i)Alert\s+Count\s+by\s+Severity").unwrap();

    /// Section headers that may follow the severity table
    pub static ref SEVERITY_BLOCK_END: Regex = Regex::new(
        r"(?i)Top\s+Affected\s+Assets|Top\s+Alerts|Alerts\s+by|Inventory|Automation"
    )
    .unwrap();

    /// A whole table line: "<Severity> <count>"
    pub static ref SEVERITY_LINE: Regex =
        Regex::new(r"(?i)^\s*(Critical|High|Medium|Low)\s+([0-9]+)\s*$").unwrap();

    /// A "<Severity> <count>" pair inside a line that was linearized
    pub static ref SEVERITY_PAIR: Regex =
        Regex::new(r"(?i)\b(Critical|High|Medium|Low)\s+([0-9]+)\b").unwrap();

    /// Loose fallback: severity name, then the first run of digits after it
    pub static ref SEVERITY_LOOSE: Vec<(Severity, Regex)> = Severity::ALL
        .into_iter()
        .map(|severity| {
            let pattern = format!(r"(?is)\b{}\b.*?([0-9]+)", severity.label());
            (severity, Regex::new(&pattern).unwrap())
        })
        .collect();

    /// `<day>-<MonAbbrev>-<year>---<day>-<MonAbbrev>-<year>` in report file names
    pub static ref FILE_DATE_RANGE: Regex =
        Regex::new(r"([0-9]{1,2}-[A-Za-z]+-[0-9]{4})---([0-9]{1,2}-[A-Za-z]+-[0-9]{4})").unwrap();
}
