//! Unified executive summary PDF
//!
//! Draws the consolidated report with lopdf and the standard Helvetica
//! fonts: a header with the logo, the comparative summary with its TOTAL
//! row, severity totals and one section per source report. Pages break
//! automatically and every page carries the generation footer.

mod canvas;
mod encoding;
mod error;
mod layout;
mod logo;
mod sections;
mod table;

pub use error::RenderError;
pub use logo::LogoImage;

use chrono::NaiveDate;
use layout::PageLayout;
use report_types::{ExtractionRecord, SummaryTable};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_TITLE: &str = "Executive Summary";

/// Presentation settings for one rendered report
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    /// Period label shown under the title
    pub period: Option<String>,
    /// PNG logo; a placeholder bar is drawn when missing or unreadable
    pub logo: Option<PathBuf>,
    pub generated_on: NaiveDate,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            period: None,
            logo: None,
            generated_on: chrono::Local::now().date_naive(),
        }
    }
}

impl RenderOptions {
    /// "Unified Report - Generated: 09-Apr-2025"
    pub fn generated_line(&self) -> String {
        format!(
            "Unified Report - Generated: {}",
            self.generated_on.format("%d-%b-%Y")
        )
    }
}

fn load_logo(path: &Path) -> Option<LogoImage> {
    match LogoImage::from_path(path) {
        Ok(logo) => {
            debug!("Loaded logo {}x{} from {}", logo.width, logo.height, path.display());
            Some(logo)
        }
        Err(e) => {
            warn!("{}; drawing placeholder instead", e);
            None
        }
    }
}

/// Render the unified report to PDF bytes
pub fn render_report(
    records: &[ExtractionRecord],
    table: &SummaryTable,
    options: &RenderOptions,
) -> Result<Vec<u8>, RenderError> {
    let logo = options.logo.as_deref().and_then(load_logo);
    let generated = options.generated_line();

    let mut layout = PageLayout::new();
    sections::draw_header(
        &mut layout,
        &options.title,
        &generated,
        options.period.as_deref(),
        logo.as_ref(),
    );
    sections::draw_summary(&mut layout, table);
    sections::draw_severity_totals(&mut layout, table);
    for record in records {
        sections::draw_report_section(&mut layout, record);
    }

    let page_count = layout.page_count();
    let mut doc = layout.into_document(&generated, logo.as_ref())?;

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| RenderError::Write(e.to_string()))?;

    info!(
        "Rendered {} report(s) on {} page(s), {} bytes",
        records.len(),
        page_count,
        output.len()
    );
    Ok(output)
}

/// Render and write to `path`, creating parent directories
pub fn write_report(
    path: &Path,
    records: &[ExtractionRecord],
    table: &SummaryTable,
    options: &RenderOptions,
) -> Result<(), RenderError> {
    let bytes = render_report(records, table, options)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
