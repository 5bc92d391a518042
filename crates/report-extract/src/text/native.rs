//! Built-in lopdf text extraction
//!
//! Loses the column alignment `pdftotext -layout` keeps, but needs nothing
//! outside the process and reuses the already-open document.

use super::{PdfSource, TextBackend};
use crate::error::ExtractError;

pub struct LopdfBackend;

impl TextBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn first_page_text(&self, source: &PdfSource<'_>) -> Result<String, ExtractError> {
        let page_numbers: Vec<u32> = source.document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractError::Backend {
                backend: "lopdf",
                message: "document has no pages".into(),
            });
        }

        source
            .document
            .extract_text(&page_numbers)
            .map_err(|e| ExtractError::Backend {
                backend: "lopdf",
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;
    use std::path::Path;

    #[test]
    fn test_pageless_document_is_an_error() {
        let doc = Document::with_version("1.5");
        let source = PdfSource {
            path: Path::new("empty.pdf"),
            document: &doc,
        };
        assert!(LopdfBackend.first_page_text(&source).is_err());
    }
}
