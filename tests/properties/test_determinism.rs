use codeconv::convert::batch::{SourceUnit, convert_batch};
use codeconv::convert::{ConversionOptions, convert};
use codeconv::semantic::SemanticModel;
use codeconv::syntax::{SyntaxTree, VbKind};
use codeconv::{CancellationToken, FileId};
use rstest::rstest;

use crate::helpers::*;

fn csharp_sample() -> (SyntaxTree, SemanticModel) {
    let unit = cs_unit(
        "Form",
        vec![
            cs_field(cs_int(), "value", None),
            cs_field(cs_int(), "Value", None),
            cs_field(cs_int(), "b", None),
            cs_method("Reset", vec![cs_assign("value", "b"), cs_assign("Value", "value")]),
        ],
    );
    bound(unit, &FORM.table, &[("value", FORM.lower_value), ("Value", FORM.upper_value), ("b", FORM.b)])
}

fn visual_basic_sample() -> (SyntaxTree, SemanticModel) {
    let unit = vb_unit(
        "Form",
        vec![vb_field("count", VbKind::INTEGER_KW), vb_field("b", VbKind::INTEGER_KW), vb_sub("Reset", vec![vb_assign("count", "b")])],
    );
    bound(unit, &FORM.table, &[("count", FORM.count), ("b", FORM.b)])
}

#[rstest]
#[case::csharp(csharp_sample())]
#[case::visual_basic(visual_basic_sample())]
fn test_conversion_is_deterministic(#[case] sample: (SyntaxTree, SemanticModel)) {
    let (tree, model) = sample;
    let options = ConversionOptions::default();
    let first = convert(&tree, &model, &options, &CancellationToken::new());
    let second = convert(&tree, &model, &options, &CancellationToken::new());

    assert!(first.is_converted());
    assert_eq!(first.text(), second.text());
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_batch_matches_single_conversion() {
    let (tree, model) = csharp_sample();
    let options = ConversionOptions::default();
    let single = convert(&tree, &model, &options, &CancellationToken::new());

    let units: Vec<SourceUnit> = (0..6)
        .map(|i| SourceUnit::new(FileId::new(i), tree.clone(), model.clone()))
        .collect();
    for result in convert_batch(&units, &options, &CancellationToken::new()) {
        assert_eq!(result.text(), single.text());
    }
}
