//! Structured diagnostics for the wirefab design tools.
//!
//! Library code in this workspace never prints. Checks that can find more than
//! one problem at a time (route-tree invariant checks, design validation)
//! report into a [`DiagnosticSink`], and callers render the collected
//! [`Diagnostic`]s with a [`TerminalRenderer`] or serialize them.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod sink;

pub use code::{Category, DiagnosticCode, ParseCodeError};
pub use diagnostic::{Diagnostic, Severity};
pub use renderer::TerminalRenderer;
pub use sink::DiagnosticSink;
