//! Executive report unifier
//!
//! Finds the vendor executive-report PDFs in a directory, groups them by
//! reporting period, extracts each site's counters and writes one unified
//! PDF (plus an optional JSON export) for the chosen period.

pub mod batch;
pub mod config;
pub mod console;
pub mod export;

pub use batch::{run, RunOutcome, RunRequest, SkippedFile};
pub use config::{Config, OnUnreadable, Overrides};
