//! `pdftotext -layout` subprocess backend

use super::{PdfSource, TextBackend};
use crate::error::ExtractError;
use std::fs;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the external layout-preserving converter on page 1
pub struct LayoutBackend {
    program: String,
    timeout: Option<Duration>,
}

impl LayoutBackend {
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn failure(&self, message: impl Into<String>) -> ExtractError {
        ExtractError::Backend {
            backend: "layout",
            message: message.into(),
        }
    }
}

impl Default for LayoutBackend {
    fn default() -> Self {
        Self::new("pdftotext", None)
    }
}

impl TextBackend for LayoutBackend {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn first_page_text(&self, source: &PdfSource<'_>) -> Result<String, ExtractError> {
        // Dropped at the end of this call, removing the file
        let output = tempfile::Builder::new()
            .prefix("report-page-")
            .suffix(".txt")
            .tempfile()?;

        let mut child = Command::new(&self.program)
            .arg("-layout")
            .args(["-f", "1", "-l", "1"])
            .arg(source.path)
            .arg(output.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.failure(format!("could not run {}: {}", self.program, e)))?;

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => {
                let started = Instant::now();
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if started.elapsed() >= limit {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(self.failure(format!("timed out after {:?}", limit)));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        };

        if !status.success() {
            return Err(self.failure(format!("{} exited with {}", self.program, status)));
        }

        let bytes = fs::read(output.path())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
