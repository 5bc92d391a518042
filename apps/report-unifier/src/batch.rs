//! Batch driver: discover, pick a period, extract, aggregate and render

use crate::config::{Config, OnUnreadable};
use crate::{console, export};
use anyhow::{bail, Context};
use report_extract::{
    aggregate, discover_reports, extract_report, group_by_period, select_period, BackendChain,
    PeriodGroup,
};
use report_render::write_report;
use report_types::ExtractionRecord;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A file left out of the batch under [`OnUnreadable::Skip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What the caller asked for beyond the configuration
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Period label or 1-based index
    pub period: Option<String>,
    pub list_periods: bool,
    pub output: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Listed { periods: usize },
    Written {
        period: String,
        pdf: PathBuf,
        json: Option<PathBuf>,
        records: usize,
        skipped: Vec<SkippedFile>,
    },
}

/// Report files under the configured directory, grouped by period
pub fn discover_periods(config: &Config) -> anyhow::Result<Vec<PeriodGroup>> {
    let dir = &config.input.dir;
    if !dir.is_dir() {
        bail!("Report directory {} does not exist", dir.display());
    }

    let paths = discover_reports(dir, &config.input.pattern)
        .with_context(|| format!("Failed to list reports in {}", dir.display()))?;
    info!("Found {} file(s) in {}", paths.len(), dir.display());

    let groups = group_by_period(&paths);
    if groups.is_empty() {
        bail!(
            "No executive reports with a date range in their name found in {}",
            dir.display()
        );
    }
    Ok(groups)
}

/// Resolve the period to consolidate: an explicit selector wins, a single
/// period is taken as is, otherwise the user is asked until the answer is
/// valid.
pub fn choose_period<'a, R: BufRead, W: Write>(
    groups: &'a [PeriodGroup],
    selector: Option<&str>,
    mut input: R,
    mut out: W,
) -> anyhow::Result<&'a PeriodGroup> {
    if let Some(selector) = selector {
        return select_period(groups, selector).with_context(|| {
            let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
            format!(
                "Unknown period '{}' (available: {})",
                selector,
                labels.join(", ")
            )
        });
    }

    match groups {
        [] => bail!("No reporting periods available"),
        [only] => {
            info!("Only one period available: {}", only.label);
            return Ok(only);
        }
        _ => {}
    }

    write!(out, "{}", console::format_periods(groups)?)?;
    loop {
        write!(out, "Select a period [1-{}]: ", groups.len())?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            bail!("No period selected");
        }
        match select_period(groups, &answer) {
            Some(group) => return Ok(group),
            None => writeln!(out, "Invalid choice '{}'", answer.trim())?,
        }
    }
}

/// Extract every file of `group`. Unreadable files are skipped or abort the
/// batch depending on `policy`; having nothing left to consolidate is an
/// error either way.
pub fn extract_group(
    group: &PeriodGroup,
    chain: &BackendChain,
    policy: OnUnreadable,
) -> anyhow::Result<(Vec<ExtractionRecord>, Vec<SkippedFile>)> {
    let mut records = Vec::with_capacity(group.files.len());
    let mut skipped = Vec::new();

    for file in &group.files {
        match extract_report(&file.path, chain) {
            Ok(record) => {
                debug!(
                    "Fonts in {}: {}",
                    file.file_name,
                    record.fonts.iter().cloned().collect::<Vec<_>>().join(", ")
                );
                records.push(record);
            }
            Err(e) => match policy {
                OnUnreadable::Skip => {
                    warn!("Skipping {}: {}", file.path.display(), e);
                    skipped.push(SkippedFile {
                        path: file.path.clone(),
                        reason: e.to_string(),
                    });
                }
                OnUnreadable::Abort => {
                    return Err(e)
                        .with_context(|| format!("Failed to read {}", file.path.display()));
                }
            },
        }
    }

    if records.is_empty() {
        bail!(
            "None of the {} report(s) for {} could be read",
            group.files.len(),
            group.label
        );
    }
    Ok((records, skipped))
}

/// Full run against `config`, prompting on `input` and printing to `out`
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    request: &RunRequest,
    input: R,
    mut out: W,
) -> anyhow::Result<RunOutcome> {
    let groups = discover_periods(config)?;

    if request.list_periods {
        write!(out, "{}", console::format_periods(&groups)?)?;
        return Ok(RunOutcome::Listed {
            periods: groups.len(),
        });
    }

    let group = choose_period(&groups, request.period.as_deref(), input, &mut out)?;
    info!(
        "Consolidating {} report(s) for {}",
        group.files.len(),
        group.label
    );

    let chain = BackendChain::from_config(&config.extraction);
    debug!("Text backends: {}", chain.names().join(" -> "));
    let (records, skipped) = extract_group(group, &chain, config.batch.on_unreadable)?;
    let table = aggregate(&records);

    write!(
        out,
        "{}",
        console::format_summary(&group.label, &table, &skipped)?
    )?;

    let pdf = request
        .output
        .clone()
        .unwrap_or_else(|| config.output_path(&group.label));
    write_report(&pdf, &records, &table, &config.render_options(&group.label))
        .with_context(|| format!("Failed to write {}", pdf.display()))?;
    writeln!(out, "Unified report saved to {}", pdf.display())?;

    if let Some(json) = &request.json {
        export::write_json(json, &group.label, &records, &table)?;
        writeln!(out, "JSON export saved to {}", json.display())?;
    }

    Ok(RunOutcome::Written {
        period: group.label.clone(),
        pdf,
        json: request.json.clone(),
        records: records.len(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn groups() -> Vec<PeriodGroup> {
        group_by_period([
            "ExecutiveReport_A_1-Mar-2025---31-Mar-2025.pdf",
            "ExecutiveReport_B_1-Apr-2025---30-Apr-2025.pdf",
        ])
    }

    #[test]
    fn test_selector_wins() {
        let groups = groups();
        let group = choose_period(&groups, Some("april 2025"), Cursor::new(""), Vec::new()).unwrap();
        assert_eq!(group.label, "April 2025");
    }

    #[test]
    fn test_unknown_selector_lists_periods() {
        let groups = groups();
        let err = choose_period(&groups, Some("June 2025"), Cursor::new(""), Vec::new())
            .unwrap_err()
            .to_string();
        assert!(err.contains("March 2025, April 2025"));
    }

    #[test]
    fn test_single_period_needs_no_prompt() {
        let groups = group_by_period(["X_1-Mar-2025---31-Mar-2025.pdf"]);
        let mut out = Vec::new();
        let group = choose_period(&groups, None, Cursor::new(""), &mut out).unwrap();
        assert_eq!(group.label, "March 2025");
        assert!(out.is_empty());
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let groups = groups();
        let mut out = Vec::new();
        let group = choose_period(&groups, None, Cursor::new("7\nnope\n2\n"), &mut out).unwrap();
        assert_eq!(group.label, "April 2025");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Invalid choice '7'"));
        assert!(printed.contains("Invalid choice 'nope'"));
    }

    #[test]
    fn test_prompt_eof_is_an_error() {
        let groups = groups();
        assert!(choose_period(&groups, None, Cursor::new("9\n"), Vec::new()).is_err());
    }

    #[test]
    fn test_missing_directory() {
        let mut config = Config::default();
        config.input.dir = PathBuf::from("/nonexistent/reports");
        let err = discover_periods(&config).unwrap_err().to_string();
        assert!(err.contains("does not exist"));
    }
}
