//! Collects diagnostics from checks that may run on several threads.

use crate::code::DiagnosticCode;
use crate::diagnostic::{Diagnostic, Severity};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Receives diagnostics and counts them per severity.
///
/// Counters are atomics, so [`has_errors`](Self::has_errors) and
/// [`count`](Self::count) never take the lock. Draining with
/// [`take_all`](Self::take_all) keeps the counters.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    entries: Mutex<Vec<Diagnostic>>,
    counts: [AtomicUsize; 3],
}

fn slot(severity: Severity) -> usize {
    match severity {
        Severity::Note => 0,
        Severity::Warning => 1,
        Severity::Error => 2,
    }
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.counts[slot(diag.severity)].fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(diag);
    }

    /// Records every diagnostic of `diags`, in order.
    pub fn emit_all(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.emit(diag);
        }
    }

    /// Number of diagnostics of `severity` recorded so far.
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[slot(severity)].load(Ordering::Relaxed)
    }

    /// Number of errors recorded so far.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Returns `true` once any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Returns `true` if a held diagnostic carries `code`.
    pub fn contains_code(&self, code: DiagnosticCode) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|d| d.code == code)
    }

    /// Removes and returns the held diagnostics in emission order.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Copies the held diagnostics in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Copies the held diagnostics, most severe first. Diagnostics of equal
    /// severity keep their emission order.
    pub fn by_severity(&self) -> Vec<Diagnostic> {
        let mut diags = self.diagnostics();
        diags.sort_by_key(|d| std::cmp::Reverse(d.severity));
        diags
    }
}
