use indexmap::IndexMap;
use parking_lot::Mutex;

use super::DiagnosticSink;
use crate::base::FileId;
use crate::diagnostics::{Diagnostic, Severity};

/// A sink that keeps everything it receives, grouped by file in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    by_file: Mutex<IndexMap<FileId, Vec<Diagnostic>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics_for(&self, file: FileId) -> Vec<Diagnostic> {
        self.by_file.lock().get(&file).cloned().unwrap_or_default()
    }

    /// Everything received, file by file.
    pub fn all(&self) -> Vec<Diagnostic> {
        self.by_file.lock().values().flatten().cloned().collect()
    }

    pub fn error_count(&self) -> usize {
        self.by_file
            .lock()
            .values()
            .flatten()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.lock().values().all(Vec::is_empty)
    }
}

impl DiagnosticSink for CollectingSink {
    fn publish(&self, file: FileId, diagnostics: &[Diagnostic]) {
        self.by_file.lock().entry(file).or_default().extend_from_slice(diagnostics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn test_sink_groups_by_file() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        let a = FileId::new(1);
        let b = FileId::new(2);
        sink.publish(a, &[Diagnostic::warning(DiagnosticKind::NamingCollision, a, 3, 0, "renamed")]);
        sink.publish(b, &[Diagnostic::error(DiagnosticKind::MalformedInput, b, 0, 0, "bad")]);
        sink.publish(a, &[Diagnostic::info(DiagnosticKind::MissingCast, a, 7, 0, "cast")]);

        assert_eq!(sink.diagnostics_for(a).len(), 2);
        assert_eq!(sink.all().len(), 3);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn test_sink_is_shared_across_threads() {
        let sink = CollectingSink::new();
        std::thread::scope(|scope| {
            for i in 0..4 {
                let sink = &sink;
                scope.spawn(move || {
                    let file = FileId::new(i);
                    sink.publish(file, &[Diagnostic::info(DiagnosticKind::MissingCast, file, 0, 0, "cast")]);
                });
            }
        });
        assert_eq!(sink.all().len(), 4);
    }
}
