//! TOML configuration for the unifier
//!
//! Every section is optional; command-line flags are layered on top with
//! [`Config::apply`].

use anyhow::Context;
use report_extract::{BackendKind, ExtractionConfig};
use report_render::{RenderOptions, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOGO_FILE_NAME: &str = "logo.png";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub extraction: ExtractionConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(dir) = overrides.dir {
            self.input.dir = dir;
        }
        if let Some(pattern) = overrides.pattern {
            self.input.pattern = pattern;
        }
        if let Some(logo) = overrides.logo {
            self.output.logo = Some(logo);
        }
        if let Some(policy) = overrides.on_unreadable {
            self.batch.on_unreadable = policy;
        }
        if !overrides.backends.is_empty() {
            self.extraction.backends = overrides.backends;
        }
    }

    /// Directory the unified report is written to
    pub fn output_dir(&self) -> &Path {
        self.output.dir.as_deref().unwrap_or(&self.input.dir)
    }

    /// `<output dir>/<file_stem>_<period>.pdf` with spaces as underscores
    /// and slashes as dashes
    pub fn output_path(&self, period: &str) -> PathBuf {
        let suffix = period.replace(' ', "_").replace('/', "-");
        self.output_dir()
            .join(format!("{}_{}.pdf", self.output.file_stem, suffix))
    }

    /// Configured logo, else the first `logo.png` found in the input
    /// directory or next to the executable
    pub fn resolve_logo(&self) -> Option<PathBuf> {
        if let Some(logo) = &self.output.logo {
            return Some(logo.clone());
        }

        let mut candidates = vec![self.input.dir.join(LOGO_FILE_NAME)];
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(LOGO_FILE_NAME));
            candidates.push(exe_dir.join("assets").join(LOGO_FILE_NAME));
        }

        let found = candidates.into_iter().find(|p| p.is_file());
        match &found {
            Some(path) => debug!("Using logo found at {}", path.display()),
            None => debug!("No logo configured or found, using placeholder"),
        }
        found
    }

    pub fn render_options(&self, period: &str) -> RenderOptions {
        RenderOptions {
            title: self.output.title.clone(),
            period: Some(period.to_string()),
            logo: self.resolve_logo(),
            ..Default::default()
        }
    }
}

/// Values given on the command line, `None` when not given
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub logo: Option<PathBuf>,
    pub on_unreadable: Option<OnUnreadable>,
    pub backends: Vec<BackendKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub dir: PathBuf,
    pub pattern: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
            pattern: "*.pdf".to_string(),
        }
    }
}

/// `$HOME/Executive_Reports`, or a relative `Executive_Reports` without HOME
fn default_report_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join("Executive_Reports")
}

/// What to do with a file that cannot be opened as a PDF
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OnUnreadable {
    /// Log a warning and continue with the remaining files
    #[default]
    Skip,
    /// Fail the whole batch
    Abort,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub on_unreadable: OnUnreadable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Defaults to the input directory
    pub dir: Option<PathBuf>,
    pub file_stem: String,
    pub logo: Option<PathBuf>,
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_stem: "unified_report".to_string(),
            logo: None,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.input.pattern, "*.pdf");
        assert!(config.input.dir.ends_with("Executive_Reports"));
        assert_eq!(
            config.extraction.backends,
            vec![BackendKind::Layout, BackendKind::Lopdf]
        );
        assert_eq!(config.batch.on_unreadable, OnUnreadable::Skip);
        assert_eq!(config.output.file_stem, "unified_report");
        assert_eq!(config.output.title, "Executive Summary");
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [input]
            dir = "/data/reports"
            pattern = "ExecutiveReport_*.pdf"

            [extraction]
            backends = ["lopdf", "pdf-extract"]
            pdftotext = "/usr/local/bin/pdftotext"
            timeout_secs = 20

            [batch]
            on_unreadable = "abort"

            [output]
            dir = "/data/out"
            file_stem = "monthly"
            logo = "/data/logo.png"
            title = "Security Overview"
        "#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("/data/reports"));
        assert_eq!(
            config.extraction.backends,
            vec![BackendKind::Lopdf, BackendKind::PdfExtract]
        );
        assert_eq!(config.extraction.pdftotext, "/usr/local/bin/pdftotext");
        assert_eq!(config.extraction.timeout_secs, Some(20));
        assert_eq!(config.batch.on_unreadable, OnUnreadable::Abort);
        assert_eq!(config.output.logo, Some(PathBuf::from("/data/logo.png")));
        assert_eq!(
            config.output_path("March to April 2025"),
            PathBuf::from("/data/out/monthly_March_to_April_2025.pdf")
        );
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Config::from_str("[batch]\non_unreadable = \"retry\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::from_str("[input]\ndir = \"/a\"").unwrap();
        config.apply(Overrides {
            dir: Some(PathBuf::from("/b")),
            on_unreadable: Some(OnUnreadable::Abort),
            backends: vec![BackendKind::PdfExtract],
            ..Default::default()
        });
        assert_eq!(config.input.dir, PathBuf::from("/b"));
        assert_eq!(config.input.pattern, "*.pdf");
        assert_eq!(config.batch.on_unreadable, OnUnreadable::Abort);
        assert_eq!(config.extraction.backends, vec![BackendKind::PdfExtract]);
    }

    #[test]
    fn test_logo_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.input.dir = dir.path().to_path_buf();
        assert_eq!(config.resolve_logo(), None);

        std::fs::write(dir.path().join("logo.png"), b"png").unwrap();
        assert_eq!(config.resolve_logo(), Some(dir.path().join("logo.png")));

        config.output.logo = Some(PathBuf::from("/elsewhere/brand.png"));
        assert_eq!(config.resolve_logo(), Some(PathBuf::from("/elsewhere/brand.png")));
    }

    #[test]
    fn test_output_path_defaults_to_input_dir() {
        let mut config = Config::default();
        config.input.dir = PathBuf::from("/reports");
        assert_eq!(
            config.output_path("Q1 2025/EU"),
            PathBuf::from("/reports/unified_report_Q1_2025-EU.pdf")
        );
    }
}
