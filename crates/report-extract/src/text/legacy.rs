//! pdf-extract backend
//!
//! Re-reads the file from disk; pdf-extract keeps its own document model.

use super::{PdfSource, TextBackend};
use crate::error::ExtractError;

pub struct PdfExtractBackend;

impl TextBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn first_page_text(&self, source: &PdfSource<'_>) -> Result<String, ExtractError> {
        pdf_extract::extract_text(source.path).map_err(|e| ExtractError::Backend {
            backend: "pdf-extract",
            message: e.to_string(),
        })
    }
}
