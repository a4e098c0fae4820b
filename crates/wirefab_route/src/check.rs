//! Structural re-verification of a route tree.
//!
//! The forest keeps its trees consistent on its own; `check` exists for
//! reporting layers that want to confirm that before writing a route out.

use crate::forest::RouteForest;
use crate::ids::NodeId;
use std::collections::HashSet;
use wirefab_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

/// A child handle that refers to no live node.
pub const DANGLING_CHILD: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
/// A child whose parent link does not point back at the node listing it.
pub const PARENT_MISMATCH: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
/// A child without an inbound connection.
pub const MISSING_INBOUND: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
/// An inbound connection whose endpoints differ from the parent and child wires.
pub const INCOHERENT_CONNECTION: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
/// A node reached twice from the same root.
pub const SHARED_NODE: DiagnosticCode = DiagnosticCode::new(Category::Error, 105);
/// The checked node is not the root of its tree.
pub const NOT_A_ROOT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 101);

impl RouteForest {
    /// Re-verifies the tree below `root`, emitting one diagnostic per
    /// violation into `sink`. Returns `true` if no error was found.
    ///
    /// Checking an attached node only emits a warning and then checks its
    /// subtree.
    pub fn check(&self, root: NodeId, sink: &DiagnosticSink) -> bool {
        if !self.contains(root) {
            sink.emit(
                Diagnostic::error(DANGLING_CHILD, format!("{root} is not a live node"))
                    .with_subject(root.to_string()),
            );
            return false;
        }
        if let Some(parent) = self.parent(root) {
            sink.emit(
                Diagnostic::warning(NOT_A_ROOT, format!("{root} is attached below {parent}"))
                    .with_subject(root.to_string())
                    .with_help("check the tree from its root to cover every node"),
            );
        }

        let mut errors = 0;
        let mut report = |diag: Diagnostic| {
            errors += 1;
            sink.emit(diag);
        };

        let mut seen = HashSet::from([root]);
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let wire = self.wire(node);
            for &child in self.children(node) {
                if !self.contains(child) {
                    report(
                        Diagnostic::error(DANGLING_CHILD, format!("{node} lists a freed child"))
                            .with_subject(node.to_string())
                            .with_note(format!("stale handle {child}")),
                    );
                    continue;
                }
                if !seen.insert(child) {
                    report(
                        Diagnostic::error(SHARED_NODE, format!("{child} is reached twice"))
                            .with_subject(child.to_string()),
                    );
                    continue;
                }
                if self.parent(child) != Some(node) {
                    report(
                        Diagnostic::error(
                            PARENT_MISMATCH,
                            format!("{child} is listed under {node} but does not point back"),
                        )
                        .with_subject(child.to_string()),
                    );
                }
                match self.inbound_connection(child) {
                    None => report(
                        Diagnostic::error(
                            MISSING_INBOUND,
                            format!("{child} has a parent but no inbound connection"),
                        )
                        .with_subject(child.to_string()),
                    ),
                    Some(conn) if conn.source() != wire || conn.sink() != self.wire(child) => {
                        report(
                            Diagnostic::error(
                                INCOHERENT_CONNECTION,
                                format!("inbound connection of {child} does not join its wires"),
                            )
                            .with_subject(child.to_string())
                            .with_note(format!("connection {conn}"))
                            .with_note(format!(
                                "parent wire {wire}, node wire {}",
                                self.wire(child)
                            )),
                        )
                    }
                    Some(_) => {}
                }
                stack.push(child);
            }
        }
        errors == 0
    }
}
