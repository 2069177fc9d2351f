//! Engine: runs the locate → parse → extract pipeline over a directory tree
//! and accumulates the retained reports in traversal encounter order.
//!
//! Typical usage:
//!
//! ```no_run
//! use wer_parser::engine::Engine;
//! use wer_parser::progress::LogReporter;
//!
//! let mut engine = Engine::new();
//! engine.scan_directory("C:/collected/wer".as_ref(), &LogReporter);
//! println!("{} report(s)", engine.reports.len());
//! ```
use std::path::Path;

use crate::extract::{ExtractedReport, extract_information};
use crate::io::DEFAULT_MMAP_THRESHOLD_BYTES;
use crate::locate::find_report_files;
use crate::progress::Reporter;
use crate::wer::{RawRecord, parse_wer_contents, parse_wer_file};

/// Per-run counters, rendered in the terminal summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Report files discovered by the locator.
    pub files_discovered: usize,
    /// Reports carrying information, retained for output.
    pub reports_retained: usize,
    /// Files that parsed to nothing or extracted no information.
    pub empty_skipped: usize,
}

/// Aggregates extracted reports and exposes loading helpers.
#[derive(Debug, Default)]
pub struct Engine {
    pub reports: Vec<ExtractedReport>,
    pub stats: ScanStats,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `root` and process every discovered report file, one at a time.
    /// Per-file failures are reported and recovered; this never fails.
    pub fn scan_directory(&mut self, root: &Path, reporter: &dyn Reporter) {
        self.scan_directory_with_threshold(root, DEFAULT_MMAP_THRESHOLD_BYTES, reporter);
    }

    /// As [`Engine::scan_directory`], with an explicit mmap threshold.
    pub fn scan_directory_with_threshold(
        &mut self,
        root: &Path,
        mmap_threshold_bytes: u64,
        reporter: &dyn Reporter,
    ) {
        for path in find_report_files(root, reporter) {
            self.stats.files_discovered += 1;
            reporter.info(&format!("parsing file: {}", path.display()));
            let data = parse_wer_file(&path, mmap_threshold_bytes, reporter);
            self.ingest(data, &path, reporter);
        }
        reporter.info(&format!(
            "total WER files processed: {}",
            self.stats.reports_retained
        ));
    }

    /// Load reports already in-memory. Intended for tests and small
    /// programmatic integrations.
    pub fn load_from_contents(&mut self, files: &[(&str, &str)], reporter: &dyn Reporter) {
        for (path, contents) in files {
            self.stats.files_discovered += 1;
            self.ingest(parse_wer_contents(contents), Path::new(path), reporter);
        }
    }

    fn ingest(&mut self, data: RawRecord, path: &Path, reporter: &dyn Reporter) {
        if data.is_empty() {
            reporter.info(&format!("no data found in file: {}", path.display()));
            self.stats.empty_skipped += 1;
            return;
        }
        let report = extract_information(&data, path, reporter);
        if report.has_information() {
            self.stats.reports_retained += 1;
            self.reports.push(report);
        } else {
            reporter.info(&format!(
                "no valid information extracted from file: {}",
                path.display()
            ));
            self.stats.empty_skipped += 1;
        }
    }
}
