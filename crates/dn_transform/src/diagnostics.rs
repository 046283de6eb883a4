//! Advisory diagnostics collected while rewriting a file.

use std::fmt;

use swc_common::Span;

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An exported function's name does not appear in its file path.
    FilenameMismatch,
    /// Comments attached to a deleted `export default` statement were dropped.
    DroppedComment,
    /// A default export survived the pass.
    UnmodifiedDefaultExport,
}

/// A non-fatal finding. Rendered as `WARNING: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: String,
    /// Span of the node the diagnostic refers to, in the parsed source.
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WARNING: {}", self.message)
    }
}

/// Per-file diagnostics collector.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    file: String,
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub(crate) fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            records: Vec::new(),
        }
    }

    pub(crate) fn file(&self) -> &str {
        &self.file
    }

    pub(crate) fn push(&mut self, kind: DiagnosticKind, span: Span, message: String) {
        tracing::debug!(file = %self.file, ?kind, "{message}");
        self.records.push(Diagnostic {
            kind,
            message,
            file: self.file.clone(),
            span,
        });
    }

    /// Record a mismatch unless the file path mentions `function_name`.
    pub(crate) fn check_filename(&mut self, function_name: &str, span: Span) {
        if self.file.contains(function_name) {
            return;
        }
        let message = format!(
            "Exported function {function_name} does not match filename of {}! Ideally the function and the file should have the same name.",
            self.file
        );
        self.push(DiagnosticKind::FilenameMismatch, span, message);
    }

    pub(crate) fn dropped_comment(&mut self, span: Span) {
        let message = format!(
            "Deleted a comment attached to \"export default\" in {}!",
            self.file
        );
        self.push(DiagnosticKind::DroppedComment, span, message);
    }

    pub(crate) fn unmodified_default_export(&mut self, span: Span) {
        let message = format!("Unmodified \"export default\" found in file {}!", self.file);
        self.push(DiagnosticKind::UnmodifiedDefaultExport, span, message);
    }

    pub(crate) fn into_records(self) -> Vec<Diagnostic> {
        self.records
    }
}
