use std::sync::Arc;

use codeconv::convert::ConversionOptions;
use codeconv::convert::batch::SourceUnit;
use codeconv::project::{CollectingSink, ProjectError, TreeWriter, UnitLoader, run_project};
use codeconv::semantic::SemanticModel;
use codeconv::syntax::SyntaxTree;
use codeconv::{CancellationToken, DiagnosticKind, FileId};
use indexmap::IndexMap;

use crate::helpers::*;

/// Loads Visual Basic classes by name; `None` cannot be read.
struct NamedClasses(Vec<Option<&'static str>>);

impl UnitLoader for NamedClasses {
    fn files(&self) -> Vec<FileId> {
        (0..self.0.len() as u32).map(FileId::new).collect()
    }

    fn load(&self, file: FileId) -> Result<SourceUnit, ProjectError> {
        match self.0.get(file.index() as usize).copied().flatten() {
            Some(name) => {
                let tree = SyntaxTree::new(vb_unit(name, vec![vb_sub("Run", vec![vb_assign("a", "b")])]));
                let model = SemanticModel::new(&tree, Arc::clone(&SPECIAL_TYPES));
                Ok(SourceUnit::new(file, tree, model))
            }
            None => Err(ProjectError::Load { file, reason: "permission denied".into() }),
        }
    }
}

#[derive(Default)]
struct Outputs {
    texts: IndexMap<FileId, String>,
    refuse: Option<FileId>,
}

impl TreeWriter for Outputs {
    fn write(&mut self, file: FileId, tree: &SyntaxTree) -> Result<(), ProjectError> {
        if self.refuse == Some(file) {
            return Err(ProjectError::Write { file, reason: "disk full".into() });
        }
        self.texts.insert(file, tree.text().to_string());
        Ok(())
    }
}

#[test]
fn test_project_run_converts_and_reports() {
    let loader = NamedClasses(vec![Some("Alpha"), None, Some("Gamma")]);
    let sink = CollectingSink::new();
    let mut outputs = Outputs::default();
    let summary = run_project(&loader, &sink, &mut outputs, &ConversionOptions::default(), &CancellationToken::new())
        .expect("no write failures");

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.unloadable, 1);
    assert_eq!(summary.written, 2);
    assert_contains(&outputs.texts[&FileId::new(0)], "class Alpha");
    assert_contains(&outputs.texts[&FileId::new(2)], "a = b;");

    let load_failure = sink.diagnostics_for(FileId::new(1));
    assert_eq!(load_failure.len(), 1);
    assert_eq!(load_failure[0].kind, DiagnosticKind::MalformedInput);
    assert!(load_failure[0].message.contains("permission denied"));
}

#[test]
fn test_write_failure_stops_the_run() {
    let loader = NamedClasses(vec![Some("Alpha"), Some("Beta")]);
    let sink = CollectingSink::new();
    let mut outputs = Outputs { refuse: Some(FileId::new(0)), ..Outputs::default() };
    let error = run_project(&loader, &sink, &mut outputs, &ConversionOptions::default(), &CancellationToken::new());

    assert!(matches!(error, Err(ProjectError::Write { file, .. }) if file == FileId::new(0)));
    assert!(outputs.texts.is_empty());
}
