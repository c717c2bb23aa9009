use std::sync::Arc;

use codeconv::convert::batch::{SourceUnit, convert_batch};
use codeconv::convert::{ConversionOptions, ConversionStatus};
use codeconv::semantic::SemanticModel;
use codeconv::syntax::factory::opaque;
use codeconv::syntax::{CsKind, SyntaxTree};
use codeconv::{CancellationToken, DiagnosticKind, FileId, Severity};

use crate::helpers::*;

fn plain_unit(file: u32, class: &str) -> SourceUnit {
    let (tree, model) = bound(
        cs_unit(class, vec![cs_method("Run", vec![cs_assign("a", "b")])]),
        &SPECIAL_TYPES,
        &[],
    );
    SourceUnit::new(FileId::new(file), tree, model)
}

/// A unit whose model was built for some other tree.
fn mismatched_unit(file: u32) -> SourceUnit {
    let tree = SyntaxTree::new(cs_unit("Broken", vec![cs_field(cs_int(), "x", None)]));
    let other = SyntaxTree::new(cs_unit("Other", vec![]));
    SourceUnit::new(FileId::new(file), tree, SemanticModel::new(&other, Arc::clone(&SPECIAL_TYPES)))
}

#[test]
fn test_malformed_unit_does_not_stop_siblings() {
    let units = vec![plain_unit(0, "First"), mismatched_unit(1), plain_unit(2, "Third")];
    let results = convert_batch(&units, &ConversionOptions::default(), &CancellationToken::new());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].status, ConversionStatus::Validated);
    assert_eq!(results[2].status, ConversionStatus::Validated);
    assert_contains(results[2].text().unwrap_or_default(), "Class Third");

    let broken = &results[1];
    assert_eq!(broken.status, ConversionStatus::Malformed);
    assert!(broken.tree.is_none());
    assert!(
        broken
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MalformedInput && d.severity == Severity::Error)
    );
}

#[test]
fn test_every_degraded_unit_explains_itself() {
    let units = vec![plain_unit(0, "First"), mismatched_unit(1)];
    let cancel = CancellationToken::new();
    let results = convert_batch(&units, &ConversionOptions::default(), &cancel);
    for result in results.iter().filter(|r| r.tree.is_none()) {
        assert!(!result.diagnostics.is_empty(), "{:?} degraded silently", result.file);
    }
}

#[test]
fn test_cancelled_batch_returns_every_unit() {
    let units: Vec<SourceUnit> = (0..4).map(|i| plain_unit(i, &format!("C{i}"))).collect();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let results = convert_batch(&units, &ConversionOptions::default(), &cancel);

    assert_eq!(results.len(), 4);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.file, FileId::new(i as u32));
        assert_eq!(result.status, ConversionStatus::Cancelled);
        assert!(!result.diagnostics.is_empty());
    }
}

#[test]
fn test_unsupported_statement_becomes_commented_stub() {
    let goto = opaque(CsKind::GOTO_STATEMENT, "goto done;");
    let (tree, model) = bound(
        cs_unit("Jumpy", vec![cs_method("Run", vec![cs_assign("a", "b"), goto, cs_assign("b", "a")])]),
        &SPECIAL_TYPES,
        &[],
    );
    let units = vec![SourceUnit::new(FileId::new(7), tree, model)];
    let results = convert_batch(&units, &ConversionOptions::default(), &CancellationToken::new());

    let result = &results[0];
    assert_eq!(result.status, ConversionStatus::Validated);
    let text = result.text().unwrap_or_default();
    assert_contains(text, "' Unsupported");
    assert_contains(text, "goto done;");
    assert_contains(text, "a = b");
    assert_contains(text, "b = a");
    assert_eq!(count_of(result, DiagnosticKind::UnsupportedConstruct), 1);
    assert!(result.diagnostics.iter().all(|d| d.file == FileId::new(7)));
}
