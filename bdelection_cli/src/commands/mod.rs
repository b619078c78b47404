//! CLI subcommand implementations.

pub mod report;
pub mod scrape;
pub mod simulate;
pub mod summary;

use std::path::Path;

use anyhow::Result;
use bdelection_lib::{read_document, ReportStats};

/// Default location of the detail document written by `scrape`.
pub const DEFAULT_INPUT: &str = "out/bnp_vs_alliance_detail.json";

/// Read the detail document and compute the report statistics.
pub fn load_stats(input: &Path) -> Result<ReportStats> {
    let doc = read_document(input).map_err(|e| {
        anyhow::anyhow!(
            "{} (run 'bdelection scrape' first to create {})",
            e,
            input.display()
        )
    })?;
    Ok(ReportStats::from_document(&doc))
}
