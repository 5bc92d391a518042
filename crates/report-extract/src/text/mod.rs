//! Text acquisition with backend fallback
//!
//! Backends are tried in order until one returns non-empty text:
//! - Layout: `pdftotext -layout` subprocess on page 1 (keeps label/value pairs
//!   on predictable lines)
//! - Lopdf: built-in lopdf extraction, all pages concatenated
//! - PdfExtract: the pdf-extract crate, all pages
//!
//! When every backend fails the text is empty and all fields fall back to
//! their defaults downstream.

mod layout;
mod legacy;
mod native;

pub use layout::LayoutBackend;
pub use legacy::PdfExtractBackend;
pub use native::LopdfBackend;

use crate::error::ExtractError;
use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// A PDF that has already been opened for this extraction pass
pub struct PdfSource<'a> {
    pub path: &'a Path,
    pub document: &'a Document,
}

/// Trait for text extraction backends
pub trait TextBackend {
    /// Backend identifier
    fn name(&self) -> &'static str;

    /// Linear text of the report's first page, or the whole document when the
    /// backend cannot address pages individually
    fn first_page_text(&self, source: &PdfSource<'_>) -> Result<String, ExtractError>;
}

/// Backend selector used in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Layout,
    Lopdf,
    PdfExtract,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Layout => "layout",
            BackendKind::Lopdf => "lopdf",
            BackendKind::PdfExtract => "pdf-extract",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "layout" | "pdftotext" => Ok(BackendKind::Layout),
            "lopdf" | "native" => Ok(BackendKind::Lopdf),
            "pdf-extract" | "pdf_extract" | "legacy" => Ok(BackendKind::PdfExtract),
            other => Err(ExtractError::UnknownBackend(other.to_string())),
        }
    }
}

/// Configuration for text acquisition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Backends in the order they are tried
    pub backends: Vec<BackendKind>,
    /// Name or path of the pdftotext binary
    pub pdftotext: String,
    /// Kill pdftotext after this many seconds and fall back
    pub timeout_secs: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backends: vec![BackendKind::Layout, BackendKind::Lopdf],
            pdftotext: "pdftotext".to_string(),
            timeout_secs: None,
        }
    }
}

/// Text obtained for one file, with the backend that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquiredText {
    pub text: String,
    pub backend: Option<&'static str>,
}

/// Ordered list of backends resolved with try/fallback
pub struct BackendChain {
    backends: Vec<Box<dyn TextBackend>>,
}

impl BackendChain {
    pub fn new(backends: Vec<Box<dyn TextBackend>>) -> Self {
        Self { backends }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let backends = config
            .backends
            .iter()
            .map(|kind| -> Box<dyn TextBackend> {
                match kind {
                    BackendKind::Layout => Box::new(LayoutBackend::new(
                        &config.pdftotext,
                        config.timeout_secs.map(Duration::from_secs),
                    )),
                    BackendKind::Lopdf => Box::new(LopdfBackend),
                    BackendKind::PdfExtract => Box::new(PdfExtractBackend),
                }
            })
            .collect();
        Self::new(backends)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Try each backend in turn. Never fails: exhausting the chain yields
    /// empty text.
    pub fn first_page_text(&self, source: &PdfSource<'_>) -> AcquiredText {
        for backend in &self.backends {
            match backend.first_page_text(source) {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(
                        backend = backend.name(),
                        chars = text.len(),
                        "Acquired text from {}",
                        source.path.display()
                    );
                    return AcquiredText {
                        text,
                        backend: Some(backend.name()),
                    };
                }
                Ok(_) => {
                    let err = ExtractError::EmptyText {
                        backend: backend.name(),
                    };
                    warn!("{}: {}, trying next backend", source.path.display(), err);
                }
                Err(err) => {
                    warn!("{}: {}, trying next backend", source.path.display(), err);
                }
            }
        }

        warn!(
            "No text backend produced text for {}; all fields will use defaults",
            source.path.display()
        );
        AcquiredText::default()
    }
}

impl Default for BackendChain {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedBackend {
        name: &'static str,
        result: Result<&'static str, ()>,
        calls: Cell<u32>,
    }

    impl FixedBackend {
        fn ok(name: &'static str, text: &'static str) -> Self {
            Self {
                name,
                result: Ok(text),
                calls: Cell::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                result: Err(()),
                calls: Cell::new(0),
            }
        }
    }

    impl TextBackend for FixedBackend {
        fn name(&self) -> &'static str {
            self.name
        }

        fn first_page_text(&self, _source: &PdfSource<'_>) -> Result<String, ExtractError> {
            self.calls.set(self.calls.get() + 1);
            self.result
                .map(str::to_string)
                .map_err(|_| ExtractError::Backend {
                    backend: self.name,
                    message: "boom".into(),
                })
        }
    }

    fn source(doc: &Document) -> PdfSource<'_> {
        PdfSource {
            path: Path::new("test.pdf"),
            document: doc,
        }
    }

    #[test]
    fn test_first_successful_backend_wins() {
        let doc = Document::with_version("1.5");
        let chain = BackendChain::new(vec![
            Box::new(FixedBackend::ok("first", "Automation 1")),
            Box::new(FixedBackend::ok("second", "unused")),
        ]);
        let acquired = chain.first_page_text(&source(&doc));
        assert_eq!(acquired.text, "Automation 1");
        assert_eq!(acquired.backend, Some("first"));
    }

    #[test]
    fn test_falls_back_on_error_and_blank_text() {
        let doc = Document::with_version("1.5");
        let chain = BackendChain::new(vec![
            Box::new(FixedBackend::failing("broken")),
            Box::new(FixedBackend::ok("blank", "  \n ")),
            Box::new(FixedBackend::ok("native", "Site Name X Date Range")),
        ]);
        let acquired = chain.first_page_text(&source(&doc));
        assert_eq!(acquired.backend, Some("native"));
    }

    #[test]
    fn test_exhausted_chain_yields_empty_text() {
        let doc = Document::with_version("1.5");
        let chain = BackendChain::new(vec![Box::new(FixedBackend::failing("broken"))]);
        let acquired = chain.first_page_text(&source(&doc));
        assert_eq!(acquired, AcquiredText::default());
    }

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("layout".parse::<BackendKind>().unwrap(), BackendKind::Layout);
        assert_eq!("LOPDF".parse::<BackendKind>().unwrap(), BackendKind::Lopdf);
        assert_eq!(
            "pdf-extract".parse::<BackendKind>().unwrap(),
            BackendKind::PdfExtract
        );
        assert!("ocr".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_default_chain_prefers_layout() {
        assert_eq!(BackendChain::default().names(), vec!["layout", "lopdf"]);
    }
}
