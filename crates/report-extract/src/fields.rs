//! Field extraction from linearized report text
//!
//! Each field group has its own matcher returning `None` when the group is
//! not found. [`extract_fields`] combines them into a record where anything
//! unmatched keeps its default, so it never fails for any input.

use crate::patterns::*;
use regex::Captures;
use report_types::{
    Automation, Count, ExtractionRecord, Inventory, Malicious, Severity, SeverityCounts, Summary,
};
use tracing::debug;

/// Run every matcher over `text`. `report_name` is left empty unless the
/// identity block names the site; callers fill it from the file name.
pub fn extract_fields(text: &str) -> ExtractionRecord {
    let mut record = ExtractionRecord::default();

    if let Some(summary) = match_identity(text) {
        if let Some(name) = &summary.name {
            record.report_name = name.clone();
        }
        record.summary = summary;
    }
    if let Some(malicious) = match_malicious(text) {
        record.malicious = malicious;
    }
    if let Some(automation) = match_automation(text) {
        record.automation = automation;
    }
    if let Some(inventory) = match_inventory(text) {
        record.inventory = inventory;
    }
    if let Some(severity) = match_severity(text) {
        record.severity_counts = severity;
    }

    record
}

fn text_group(caps: &Captures<'_>, idx: usize) -> Option<String> {
    caps.get(idx)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn count_group(caps: &Captures<'_>, idx: usize) -> Count {
    caps.get(idx)
        .map(|m| Count::parse(m.as_str()))
        .unwrap_or_default()
}

/// Identity block. The "Group Name" variant is tried first; only if it fails
/// is "Site Name" tried, with date range and generation time then searched
/// independently.
pub fn match_identity(text: &str) -> Option<Summary> {
    if let Some(caps) = GROUP_IDENTITY.captures(text) {
        debug!("identity: matched group-name variant");
        return Some(Summary {
            name: text_group(&caps, 1),
            date_range: text_group(&caps, 2),
            generated: text_group(&caps, 3),
        });
    }

    let site = SITE_NAME.captures(text)?;
    debug!("identity: matched site-name variant");
    Some(Summary {
        name: text_group(&site, 1),
        date_range: DATE_RANGE.captures(text).and_then(|c| text_group(&c, 1)),
        generated: GENERATED.captures(text).and_then(|c| text_group(&c, 1)),
    })
}

pub fn match_malicious(text: &str) -> Option<Malicious> {
    let caps = MALICIOUS.captures(text)?;
    Some(Malicious {
        alerts_triggered: count_group(&caps, 1),
        alerts_handled: count_group(&caps, 2),
        affected_files: count_group(&caps, 3),
        remediated_files: count_group(&caps, 4),
        affected_endpoints: count_group(&caps, 5),
    })
}

pub fn match_automation(text: &str) -> Option<Automation> {
    let caps = AUTOMATION.captures(text)?;
    Some(Automation {
        auto_investigations: count_group(&caps, 1),
        response_actions: count_group(&caps, 2),
    })
}

pub fn match_inventory(text: &str) -> Option<Inventory> {
    let caps = INVENTORY
        .captures(text)
        .or_else(|| ACTIVE_ENDPOINTS_BEFORE.captures(text))
        .or_else(|| ACTIVE_ENDPOINTS_AFTER.captures(text))?;
    Some(Inventory {
        active_endpoints: count_group(&caps, 1),
    })
}

/// Severity table, two tiers.
///
/// With an "Alert Count by Severity" header, only the text up to the next
/// known section header is scanned, first for whole `<Severity> <n>` lines and
/// then for pairs inside linearized lines. Without the header, each severity
/// name is searched in the whole text and the first number after it is used.
pub fn match_severity(text: &str) -> Option<SeverityCounts> {
    let counts = match severity_block(text) {
        Some(block) => {
            debug!("severity: scanning bounded block");
            scan_severity_block(block)
        }
        None => {
            debug!("severity: block header missing, using loose search");
            loose_severity_search(text)
        }
    };

    if counts.iter().all(|(_, c)| c.is_missing()) {
        None
    } else {
        Some(counts)
    }
}

/// Text between the severity header and the following section, or the end
/// of the text
pub fn severity_block(text: &str) -> Option<&str> {
    let start = SEVERITY_BLOCK_START.find(text)?.end();
    let rest = &text[start..];
    let end = SEVERITY_BLOCK_END
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

fn scan_severity_block(block: &str) -> SeverityCounts {
    let mut counts = SeverityCounts::default();

    for line in block.lines() {
        if let Some(caps) = SEVERITY_LINE.captures(line) {
            record_first(&mut counts, &caps);
        }
    }

    for caps in SEVERITY_PAIR.captures_iter(block) {
        record_first(&mut counts, &caps);
    }

    counts
}

fn record_first(counts: &mut SeverityCounts, caps: &Captures<'_>) {
    let Some(severity) = caps.get(1).and_then(|m| Severity::from_label(m.as_str())) else {
        return;
    };
    if counts.get(severity).is_missing() {
        counts.set(severity, count_group(caps, 2));
    }
}

fn loose_severity_search(text: &str) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for (severity, pattern) in SEVERITY_LOOSE.iter() {
        if let Some(caps) = pattern.captures(text) {
            counts.set(*severity, count_group(&caps, 1));
        }
    }
    counts
}
