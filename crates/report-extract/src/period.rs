//! Report discovery and period grouping from file names
//!
//! Report files encode their window as
//! `<day>-<MonAbbrev>-<year>---<day>-<MonAbbrev>-<year>`, e.g.
//! `ExecutiveReport_Demo-Console---SaaS_8-Mar-2025---8-Apr-2025.pdf`.

use crate::error::ExtractError;
use crate::patterns::FILE_DATE_RANGE;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FILE_PREFIX: &str = "ExecutiveReport_";

/// A discovered report file with its parsed window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportFile {
    pub path: PathBuf,
    pub file_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub period: String,
}

/// Reports sharing the same period label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodGroup {
    pub label: String,
    pub start: NaiveDate,
    pub files: Vec<ReportFile>,
}

/// Report name derived from the file name: vendor prefix and extension
/// removed, `---` separators shown as ` - `
pub fn report_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = file_name.strip_prefix(FILE_PREFIX).unwrap_or(&file_name);
    let name = name
        .strip_suffix(".pdf")
        .or_else(|| name.strip_suffix(".PDF"))
        .unwrap_or(name);
    name.replace("---", " - ")
}

/// Human label for a reporting window
pub fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    let start_month = start.format("%B");
    let end_month = end.format("%B");

    if start.month() == end.month() && start.year() == end.year() {
        format!("{} {}", start_month, start.year())
    } else if start.year() == end.year() {
        format!("{} to {} {}", start_month, end_month, start.year())
    } else {
        format!(
            "{} {} to {} {}",
            start_month,
            start.year(),
            end_month,
            end.year()
        )
    }
}

fn parse_file_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d-%b-%Y").ok()
}

/// Parse the window out of a report file name. `None` when the name does not
/// follow the convention or a date is invalid.
pub fn parse_report_file(path: &Path) -> Option<ReportFile> {
    let file_name = path.file_name()?.to_string_lossy().into_owned();
    let caps = FILE_DATE_RANGE.captures(&file_name)?;
    let start = parse_file_date(caps.get(1)?.as_str())?;
    let end = parse_file_date(caps.get(2)?.as_str())?;

    Some(ReportFile {
        path: path.to_path_buf(),
        period: period_label(start, end),
        file_name,
        start,
        end,
    })
}

/// Group files by period label, sorted chronologically by the earliest start
/// date in each group. Files without a recognizable window are skipped.
pub fn group_by_period<I, P>(paths: I) -> Vec<PeriodGroup>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut groups: Vec<PeriodGroup> = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let Some(file) = parse_report_file(path) else {
            debug!("Skipping {}: no date range in file name", path.display());
            continue;
        };

        match groups.iter_mut().find(|g| g.label == file.period) {
            Some(group) => {
                group.start = group.start.min(file.start);
                group.files.push(file);
            }
            None => groups.push(PeriodGroup {
                label: file.period.clone(),
                start: file.start,
                files: vec![file],
            }),
        }
    }

    groups.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.label.cmp(&b.label)));
    groups
}

/// Pick a group by label (case-insensitive) or 1-based index
pub fn select_period<'a>(groups: &'a [PeriodGroup], selector: &str) -> Option<&'a PeriodGroup> {
    let selector = selector.trim();
    if let Ok(index) = selector.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| groups.get(i));
    }
    groups
        .iter()
        .find(|g| g.label.eq_ignore_ascii_case(selector))
}

/// List files in `dir` matching `pattern`, sorted by path
pub fn discover_reports(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ExtractError> {
    let dir = dir
        .to_str()
        .ok_or_else(|| ExtractError::Pattern(dir.display().to_string()))?;
    // Directory names may contain glob metacharacters
    let full = Path::new(&glob::Pattern::escape(dir)).join(pattern);
    let full = full
        .to_str()
        .ok_or_else(|| ExtractError::Pattern(full.display().to_string()))?;

    let entries = glob::glob(full).map_err(|e| ExtractError::Pattern(e.to_string()))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    paths.sort();
    Ok(paths)
}
