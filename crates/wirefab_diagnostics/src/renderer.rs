//! Plain-text rendering of diagnostics.

use crate::diagnostic::Diagnostic;

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// error[E102]: wire coherence violated
///   --> node 4
///    = note: inbound connection sinks at dummy_tile/3
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new() -> Self {
        Self
    }

    /// Renders a single diagnostic.
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = format!("{}[{}]: {}\n", diag.severity, diag.code, diag.message);
        if let Some(subject) = &diag.subject {
            out.push_str(&format!("  --> {subject}\n"));
        }
        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }

    /// Renders every diagnostic in order, separated by blank lines.
    pub fn render_all(&self, diags: &[Diagnostic]) -> String {
        diags
            .iter()
            .map(|d| self.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_with_subject_and_trailers() {
        let diag = Diagnostic::warning(DiagnosticCode::new(Category::Warning, 201), "unplaced")
            .with_subject("instance \"lut_0\"")
            .with_note("bonded state is unknown")
            .with_help("place the instance before export");
        let out = TerminalRenderer::new().render(&diag);
        assert!(out.starts_with("warning[W201]: unplaced\n"));
        assert!(out.contains("  --> instance \"lut_0\"\n"));
        assert!(out.contains("= note: bonded state is unknown"));
        assert!(out.contains("= help: place the instance before export"));
    }

    #[test]
    fn render_without_subject() {
        let diag = Diagnostic::error(DiagnosticCode::new(Category::Error, 999), "general error");
        let out = TerminalRenderer::new().render(&diag);
        assert_eq!(out, "error[E999]: general error\n");
    }

    #[test]
    fn render_all_joins() {
        let code = DiagnosticCode::new(Category::Note, 1);
        let diags = vec![Diagnostic::note(code, "a"), Diagnostic::note(code, "b")];
        let out = TerminalRenderer::new().render_all(&diags);
        assert_eq!(out, "note[N001]: a\n\nnote[N001]: b\n");
    }
}
