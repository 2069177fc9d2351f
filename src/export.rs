//! Export of retained reports to a CSV file.
//!
//! The header row and column order come from the serde renames on
//! `ExtractedReport`; values are written verbatim with standard CSV quoting.
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::extract::ExtractedReport;

/// Write all reports to `path` as UTF-8 CSV with a header row. Returns
/// `Ok(false)` without touching the filesystem when there is nothing to
/// write; any write or flush error propagates.
pub fn save_reports_csv<P: AsRef<Path>>(reports: &[ExtractedReport], path: P) -> Result<bool> {
    if reports.is_empty() {
        return Ok(false);
    }
    let mut wtr = Writer::from_path(&path)
        .with_context(|| format!("create {}", path.as_ref().display()))?;
    for report in reports {
        wtr.serialize(report)
            .with_context(|| format!("write row for {}", report.report_path))?;
    }
    wtr.flush()
        .with_context(|| format!("flush {}", path.as_ref().display()))?;
    Ok(true)
}
