//! Conversion problem reporting.
//!
//! Every degraded construct in a converted unit is explained by one
//! [`Diagnostic`]. Positions are 0-indexed and refer to the *source* tree.

use std::sync::Arc;

use crate::base::{FileId, Span};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// What went wrong, independent of where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticKind {
    /// No structural mapping exists; a stub was emitted.
    UnsupportedConstruct,
    /// Several target candidates ranked equally; a tie-break picked one.
    AmbiguousResolution,
    /// Distinct source symbols map to the same target identifier.
    NamingCollision,
    /// The tree or model is inconsistent; the unit was abandoned.
    MalformedInput,
    /// A conversion rule faulted; the source node was kept verbatim.
    InternalConversionFailure,
    /// An explicit cast was inserted where the target is stricter.
    MissingCast,
}

impl DiagnosticKind {
    pub fn default_severity(self) -> Severity {
        match self {
            DiagnosticKind::UnsupportedConstruct
            | DiagnosticKind::AmbiguousResolution
            | DiagnosticKind::NamingCollision => Severity::Warning,
            DiagnosticKind::MalformedInput | DiagnosticKind::InternalConversionFailure => Severity::Error,
            DiagnosticKind::MissingCast => Severity::Info,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedConstruct => codes::UNSUPPORTED_CONSTRUCT,
            DiagnosticKind::AmbiguousResolution => codes::AMBIGUOUS_RESOLUTION,
            DiagnosticKind::NamingCollision => codes::NAMING_COLLISION,
            DiagnosticKind::MalformedInput => codes::MALFORMED_INPUT,
            DiagnosticKind::InternalConversionFailure => codes::INTERNAL_FAILURE,
            DiagnosticKind::MissingCast => codes::MISSING_CAST,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// The unit this diagnostic belongs to.
    pub file: FileId,
    pub kind: DiagnosticKind,
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// A diagnostic of `kind` with that kind's severity and code.
    pub fn new(kind: DiagnosticKind, file: FileId, line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            kind,
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
            severity: kind.default_severity(),
            code: Some(Arc::from(kind.code())),
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(kind: DiagnosticKind, file: FileId, line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(kind, file, line, col, message).with_severity(Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(kind: DiagnosticKind, file: FileId, line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(kind, file, line, col, message).with_severity(Severity::Warning)
    }

    pub fn info(kind: DiagnosticKind, file: FileId, line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(kind, file, line, col, message).with_severity(Severity::Info)
    }

    /// Set the span (range) for this diagnostic.
    pub fn with_span(mut self, end_line: u32, end_col: u32) -> Self {
        self.end_line = end_line;
        self.end_col = end_col;
        self
    }

    /// Set start and end from a [`Span`].
    pub fn at(mut self, span: Span) -> Self {
        self.start_line = span.start.line as u32;
        self.start_col = span.start.column as u32;
        self.end_line = span.end.line as u32;
        self.end_col = span.end.column as u32;
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn span(&self) -> Span {
        Span::from_coords(
            self.start_line as usize,
            self.start_col as usize,
            self.end_line as usize,
            self.end_col as usize,
        )
    }

    /// Render as a JSON object.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        };
        write!(f, "{}:{}:{}: {severity}", self.file, self.start_line + 1, self.start_col + 1)?;
        if let Some(code) = &self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Code Ranges
///
/// - **E0001-E0099**: Errors that degrade or abandon a unit
/// - **W0001-W0099**: Warnings (lossy or tie-broken conversions)
/// - **I0001-I0099**: Informational corrections
#[allow(dead_code)]
pub mod codes {
    // ========================================================================
    // ERRORS (E0001-E0099)
    // ========================================================================

    /// Tree or semantic model is inconsistent.
    pub const MALFORMED_INPUT: &str = "E0001";
    /// A conversion rule faulted.
    pub const INTERNAL_FAILURE: &str = "E0002";
    /// The unit was cancelled before it finished.
    pub const CANCELLED: &str = "E0003";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// No mapping for a construct.
    pub const UNSUPPORTED_CONSTRUCT: &str = "W0001";
    /// Overload tie broken deterministically.
    pub const AMBIGUOUS_RESOLUTION: &str = "W0002";
    /// Identifier renamed to avoid a case-insensitive clash.
    pub const NAMING_COLLISION: &str = "W0003";

    // ========================================================================
    // INFO (I0001-I0099)
    // ========================================================================

    /// Explicit cast inserted.
    pub const MISSING_CAST: &str = "I0001";
    /// Modifier without a counterpart was dropped.
    pub const DROPPED_MODIFIER: &str = "I0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during conversion and validation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics for a specific file.
    pub fn diagnostics_for_file(&self, file: FileId) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults_follow_kind() {
        let diag = Diagnostic::new(DiagnosticKind::UnsupportedConstruct, FileId::new(0), 10, 5, "goto");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code.as_deref(), Some(codes::UNSUPPORTED_CONSTRUCT));
        assert_eq!(diag.start_line, 10);
        assert_eq!(diag.start_col, 5);

        let diag = Diagnostic::new(DiagnosticKind::MissingCast, FileId::new(0), 0, 0, "cast");
        assert_eq!(diag.severity, Severity::Info);
        let diag = Diagnostic::new(DiagnosticKind::MalformedInput, FileId::new(0), 0, 0, "bad");
        assert_eq!(diag.severity, Severity::Error);
    }

    #[test]
    fn test_diagnostic_span_round_trip() {
        let span = Span::from_coords(1, 2, 3, 4);
        let diag = Diagnostic::error(DiagnosticKind::InternalConversionFailure, FileId::new(0), 0, 0, "x").at(span);
        assert_eq!(diag.span(), span);
        let diag = diag.with_span(5, 6);
        assert_eq!((diag.end_line, diag.end_col), (5, 6));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::warning(DiagnosticKind::NamingCollision, FileId::new(2), 0, 3, "renamed 'x' to 'x_1'");
        assert_eq!(diag.to_string(), "file#2:1:4: warning[W0003]: renamed 'x' to 'x_1'");
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::error(DiagnosticKind::MalformedInput, FileId::new(0), 0, 0, "error 1"));
        collector.add(Diagnostic::error(DiagnosticKind::InternalConversionFailure, FileId::new(0), 0, 0, "error 2"));
        collector.add(Diagnostic::warning(DiagnosticKind::NamingCollision, FileId::new(0), 0, 0, "warning 1"));

        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
        assert_eq!(collector.of_kind(DiagnosticKind::MalformedInput).count(), 1);
    }

    #[test]
    fn test_collector_by_file() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::info(DiagnosticKind::MissingCast, FileId::new(0), 0, 0, "file 0"));
        collector.add(Diagnostic::info(DiagnosticKind::MissingCast, FileId::new(1), 0, 0, "file 1"));
        collector.add(Diagnostic::info(DiagnosticKind::MissingCast, FileId::new(0), 0, 0, "file 0 again"));

        assert_eq!(collector.diagnostics_for_file(FileId::new(0)).len(), 2);
        assert_eq!(collector.diagnostics_for_file(FileId::new(1)).len(), 1);
        assert_eq!(collector.take().len(), 3);
        assert!(collector.is_empty());
    }

    #[test]
    fn test_severity_to_lsp() {
        assert_eq!(Severity::Error.to_lsp(), 1);
        assert_eq!(Severity::Warning.to_lsp(), 2);
        assert_eq!(Severity::Info.to_lsp(), 3);
        assert_eq!(Severity::Hint.to_lsp(), 4);
    }
}
