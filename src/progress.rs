//! Progress and diagnostics reporting.
//!
//! The pipeline never prints directly; every notable event (file being
//! parsed, per-file errors, skipped records, final counts) goes through a
//! passed-in [`Reporter`]. The binary uses [`LogReporter`] to forward to the
//! `log` facade; tests use [`MemoryReporter`] to assert on emitted messages.
use std::sync::Mutex;

use log::{debug, info, warn};

/// Sink for pipeline diagnostics.
pub trait Reporter {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    /// Verbose detail such as parsed-record dumps. Default: dropped.
    fn debug(&self, msg: &str) {
        let _ = msg;
    }
}

/// Forwards messages to the global `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn info(&self, msg: &str) {
        info!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        warn!("{}", msg);
    }

    fn debug(&self, msg: &str) {
        debug!("{}", msg);
    }
}

/// Records every message in memory, for tests and programmatic callers.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(needle))
    }

    fn push(&self, level: &str, msg: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{}: {}", level, msg));
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
}
