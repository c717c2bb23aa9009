use codeconv::annotations::collect_source_spans;
use codeconv::convert::ConversionOptions;
use codeconv::syntax::{GreenNode, VbKind};
use rstest::rstest;

use crate::helpers::*;

fn csharp_source() -> GreenNode {
    cs_unit(
        "Form",
        vec![
            cs_field(cs_int(), "count", None),
            cs_method("Reset", vec![cs_assign("count", "b")]),
            cs_method("Clear", vec![cs_assign("count", "b"), cs_assign("b", "count")]),
        ],
    )
}

fn visual_basic_source() -> GreenNode {
    vb_unit(
        "Form",
        vec![vb_field("count", VbKind::INTEGER_KW), vb_sub("Reset", vec![vb_assign("count", "b"), vb_assign("b", "count")])],
    )
}

#[rstest]
#[case::csharp(csharp_source())]
#[case::visual_basic(visual_basic_source())]
fn test_source_spans_stay_within_the_source(#[case] source: GreenNode) {
    let names = [("count", FORM.count), ("b", FORM.b)];
    let (tree, model) = bound(source, &FORM.table, &names);
    let (converted, _) = convert_validated(&tree, &model);

    let last_line = tree.text().matches('\n').count() as u32;
    let spans = collect_source_spans(&ConversionOptions::default().annotation_keys, &converted);
    assert!(!spans.is_empty(), "no source spans recorded");
    for (element, (start, end)) in spans {
        assert!(start <= end, "{element:?} spans {start}..{end}");
        assert!(end <= last_line, "{element:?} ends on line {end} of {last_line}");
    }
}

#[test]
fn test_source_mapping_can_be_switched_off() {
    let (tree, model) = bound(csharp_source(), &FORM.table, &[("count", FORM.count)]);
    let options = ConversionOptions::default().without_source_mapping();
    let result = codeconv::convert(&tree, &model, &options, &codeconv::CancellationToken::new());
    let Some(converted) = result.tree else {
        panic!("conversion failed: {:#?}", result.diagnostics);
    };
    assert!(collect_source_spans(&options.annotation_keys, &converted).is_empty());
}
