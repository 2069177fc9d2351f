//! Human-readable summary rendering for terminal output.
use std::collections::HashMap;

use colored::*;

use crate::engine::Engine;
use crate::extract::ExtractedReport;

fn section_header(title: &str, color: Color) -> String {
    // Underline length comes from the plain title, before ANSI styling
    format!(
        "\n{}\n{}\n\n",
        title.bold().color(color),
        "─".repeat(title.chars().count())
    )
}

/// The most frequently crashing applications across all retained reports.
/// Returns (application, count) sorted descending by count, then ascending
/// by name to stabilize ordering for tests. Reports with no resolvable
/// application identity are skipped.
pub fn top_crashing_apps(reports: &[ExtractedReport], top_n: usize) -> Vec<(String, usize)> {
    use std::cmp::Reverse;
    let mut freq: HashMap<String, usize> = HashMap::new();
    for r in reports {
        let app = r.crashing_application();
        if !app.is_empty() {
            *freq.entry(app.to_string()).or_insert(0) += 1;
        }
    }
    let mut items: Vec<(String, usize)> = freq.into_iter().collect();
    items.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
    if items.len() > top_n {
        items.truncate(top_n);
    }
    items
}

pub fn render_summary(engine: &Engine) -> String {
    render_summary_with_top(engine, 10)
}

pub fn render_summary_with_top(engine: &Engine, top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        "WER Parser: Crash Report Triage Results".bold().cyan()
    ));

    out.push_str(&section_header("Scan Summary", Color::Yellow));
    out.push_str(&format!(
        "Report files discovered: {}\n",
        engine.stats.files_discovered
    ));
    out.push_str(&format!(
        "Reports retained: {}\n",
        engine.stats.reports_retained
    ));
    out.push_str(&format!(
        "Skipped (no information): {}\n",
        engine.stats.empty_skipped
    ));

    out.push_str(&section_header("Top Crashing Applications", Color::Magenta));
    let top = top_crashing_apps(&engine.reports, top_n);
    if top.is_empty() {
        out.push_str("(No reports)\n");
    } else {
        for (app, count) in top {
            out.push_str(&format!("  {}: {}\n", app, count));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::progress::MemoryReporter;

    fn loaded_engine() -> Engine {
        let r = MemoryReporter::new();
        let mut e = Engine::new();
        e.load_from_contents(
            &[
                ("a.wer", "Sig[0].Value=app.exe\n"),
                ("b.wer", "Sig[0].Value=app.exe\n"),
                ("c.wer", "AppName=other.exe\n"),
                ("d.wer", ""),
            ],
            &r,
        );
        e
    }

    #[test]
    fn summary_carries_counts_and_breakdown() {
        let e = loaded_engine();
        let s = render_summary(&e);
        assert!(s.contains("Scan Summary"));
        assert!(s.contains("Report files discovered: 4"));
        assert!(s.contains("Reports retained: 3"));
        assert!(s.contains("Skipped (no information): 1"));
        assert!(s.contains("app.exe: 2"));
        assert!(s.contains("other.exe: 1"));
    }

    #[test]
    fn top_crashing_respects_limit_and_ordering() {
        let e = loaded_engine();
        let top = top_crashing_apps(&e.reports, 1);
        assert_eq!(top, vec![("app.exe".to_string(), 2)]);
        let s = render_summary_with_top(&e, 1);
        assert!(s.contains("app.exe: 2"));
        assert!(!s.contains("other.exe: 1"));
    }
}
