//! Recursive discovery of WER report files under a root directory.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::progress::Reporter;

/// Case-sensitive suffix that marks a report file.
pub const REPORT_EXTENSION: &str = ".wer";

/// Lazily yield every file under `root` whose name ends with `.wer`, in
/// filesystem traversal order. A root that is missing or not a directory
/// produces zero results; walk errors are reported and skipped.
pub fn find_report_files<'a>(
    root: &Path,
    reporter: &'a dyn Reporter,
) -> impl Iterator<Item = PathBuf> + 'a {
    let walker = if root.is_dir() {
        Some(WalkDir::new(root).follow_links(false).into_iter())
    } else {
        reporter.warn(&format!(
            "input root is not a directory: {}",
            root.display()
        ));
        None
    };
    walker
        .into_iter()
        .flatten()
        .filter_map(move |entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                reporter.warn(&format!("walk error: {}", err));
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(REPORT_EXTENSION))
        .map(|e| e.into_path())
}
