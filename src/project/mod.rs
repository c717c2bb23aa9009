//! Collaborator contracts around the converter.
//!
//! The library never touches the file system. A host supplies units through a
//! [`UnitLoader`], receives diagnostics through a [`DiagnosticSink`] and
//! persists converted trees through a [`TreeWriter`]; [`run_project`] wires the
//! three around [`convert_batch`].

mod sink;

pub use sink::CollectingSink;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::base::FileId;
use crate::convert::batch::{SourceUnit, convert_batch};
use crate::convert::{ConversionOptions, ConversionStatus};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::syntax::SyntaxTree;

/// Failures reported by collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("cannot load {file}: {reason}")]
    Load { file: FileId, reason: String },
    #[error("cannot write {file}: {reason}")]
    Write { file: FileId, reason: String },
}

/// Supplies parsed and bound units.
pub trait UnitLoader {
    /// Files to convert, in batch order.
    fn files(&self) -> Vec<FileId>;

    fn load(&self, file: FileId) -> Result<SourceUnit, ProjectError>;
}

/// Receives diagnostics, possibly from several threads.
pub trait DiagnosticSink: Send + Sync {
    fn publish(&self, file: FileId, diagnostics: &[Diagnostic]);
}

/// Persists converted trees, typically as `tree.text()`.
pub trait TreeWriter {
    fn write(&mut self, file: FileId, tree: &SyntaxTree) -> Result<(), ProjectError>;
}

/// Counts of what happened to each file of a project run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    pub converted: usize,
    pub malformed: usize,
    pub cancelled: usize,
    pub unloadable: usize,
    pub written: usize,
}

/// Load every unit, convert the batch, publish diagnostics and write the
/// converted trees.
///
/// A unit that fails to load is reported to `sink` as malformed input and the
/// rest of the project carries on. A write failure stops the run.
pub fn run_project(
    loader: &dyn UnitLoader,
    sink: &dyn DiagnosticSink,
    writer: &mut dyn TreeWriter,
    options: &ConversionOptions,
    cancel: &CancellationToken,
) -> Result<ProjectSummary, ProjectError> {
    let mut summary = ProjectSummary::default();
    let mut units = Vec::new();
    for file in loader.files() {
        match loader.load(file) {
            Ok(unit) => units.push(unit),
            Err(error) => {
                tracing::warn!(%file, %error, "unit skipped");
                let diagnostic = Diagnostic::error(DiagnosticKind::MalformedInput, file, 0, 0, error.to_string());
                sink.publish(file, &[diagnostic]);
                summary.unloadable += 1;
            }
        }
    }

    for result in convert_batch(&units, options, cancel) {
        if !result.diagnostics.is_empty() {
            sink.publish(result.file, &result.diagnostics);
        }
        match result.status {
            ConversionStatus::Converted | ConversionStatus::Validated => summary.converted += 1,
            ConversionStatus::Malformed => summary.malformed += 1,
            ConversionStatus::Cancelled => summary.cancelled += 1,
        }
        if let Some(tree) = &result.tree {
            writer.write(result.file, tree)?;
            summary.written += 1;
        }
    }
    tracing::info!(?summary, "project converted");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{SemanticModel, SymbolTable};
    use crate::syntax::factory::{Header, vb};
    use crate::syntax::VbKind;
    use rustc_hash::FxHashMap;
    use std::sync::Arc;

    struct MemoryLoader {
        sources: Vec<(FileId, Option<&'static str>)>,
        table: Arc<SymbolTable>,
    }

    impl UnitLoader for MemoryLoader {
        fn files(&self) -> Vec<FileId> {
            self.sources.iter().map(|(file, _)| *file).collect()
        }

        fn load(&self, file: FileId) -> Result<SourceUnit, ProjectError> {
            let Some((_, Some(name))) = self.sources.iter().find(|(f, _)| *f == file) else {
                return Err(ProjectError::Load { file, reason: "unreadable".into() });
            };
            let class = vb::type_block(VbKind::CLASS_KW, Header::default(), vb::ident(name), None, vec![], vec![], vec![]);
            let tree = SyntaxTree::new(vb::compilation_unit(vec![class]));
            let model = SemanticModel::new(&tree, self.table.clone());
            Ok(SourceUnit::new(file, tree, model))
        }
    }

    #[derive(Default)]
    struct MemoryWriter {
        written: FxHashMap<FileId, String>,
    }

    impl TreeWriter for MemoryWriter {
        fn write(&mut self, file: FileId, tree: &SyntaxTree) -> Result<(), ProjectError> {
            self.written.insert(file, tree.text().to_string());
            Ok(())
        }
    }

    #[test]
    fn test_run_project_writes_converted_units() {
        let loader = MemoryLoader {
            sources: vec![(FileId::new(0), Some("First")), (FileId::new(1), None), (FileId::new(2), Some("Second"))],
            table: Arc::new(SymbolTable::with_special_types()),
        };
        let sink = CollectingSink::new();
        let mut writer = MemoryWriter::default();
        let summary = run_project(&loader, &sink, &mut writer, &ConversionOptions::default(), &CancellationToken::new())
            .expect("run succeeds");

        assert_eq!(summary.converted, 2);
        assert_eq!(summary.unloadable, 1);
        assert_eq!(summary.written, 2);
        assert!(writer.written[&FileId::new(0)].contains("class First"));
        assert!(writer.written[&FileId::new(2)].contains("class Second"));
        assert_eq!(sink.diagnostics_for(FileId::new(1)).len(), 1);
    }
}
