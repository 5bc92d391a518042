//! Shared data model for executive report consolidation
//!
//! The extraction crate produces these types, the renderer and the CLI
//! consume them. Absent values are modelled explicitly (`Option`) and only
//! turned into sentinel strings at display time.

pub mod count;
pub mod record;
pub mod summary;

pub use count::Count;
pub use record::{
    Automation, ExtractionRecord, Inventory, Malicious, Severity, SeverityCounts, Summary,
};
pub use summary::{SummaryColumn, SummaryRow, SummaryTable, Totals};

/// Display sentinel for text fields and totals that could not be determined
pub const NOT_AVAILABLE: &str = "N/A";

/// Display sentinel for counters that were not found in a report
pub const ZERO: &str = "0";
