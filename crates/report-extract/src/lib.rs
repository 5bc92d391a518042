//! Executive report field extraction
//!
//! Turns a vendor executive-report PDF into an [`ExtractionRecord`]:
//!
//! 1. Open the document once (the handle is dropped before returning)
//! 2. Enumerate embedded fonts across all pages
//! 3. Acquire linear text through the [`BackendChain`]
//! 4. Match each field group with its own regex, keeping defaults on misses
//!
//! Only a file that cannot be opened as a PDF at all is an error; every
//! data-shape problem degrades to default values instead.

pub mod aggregate;
pub mod error;
pub mod fields;
pub mod fonts;
pub mod patterns;
pub mod period;
pub mod text;

pub use aggregate::{aggregate, column_total};
pub use error::ExtractError;
pub use fields::extract_fields;
pub use fonts::document_fonts;
pub use period::{
    discover_reports, group_by_period, period_label, report_name_from_path, select_period,
    PeriodGroup, ReportFile,
};
pub use text::{BackendChain, BackendKind, ExtractionConfig, PdfSource, TextBackend};

use lopdf::Document;
use report_types::ExtractionRecord;
use std::path::Path;
use tracing::{debug, info};

/// Extract one report file
pub fn extract_report(path: &Path, chain: &BackendChain) -> Result<ExtractionRecord, ExtractError> {
    info!("Extracting data from {}", path.display());

    let document = Document::load(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let fonts = document_fonts(&document);
    let acquired = chain.first_page_text(&PdfSource {
        path,
        document: &document,
    });
    drop(document);

    let mut record = extract_fields(&acquired.text);
    if record.report_name.is_empty() {
        record.report_name = report_name_from_path(path);
    }
    record.fonts = fonts;
    record.source = Some(path.to_path_buf());
    record.backend = acquired.backend.map(str::to_string);

    debug!(
        report = %record.report_name,
        backend = ?record.backend,
        fonts = record.fonts.len(),
        "Extraction complete"
    );

    Ok(record)
}
