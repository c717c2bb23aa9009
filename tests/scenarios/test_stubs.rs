use codeconv::DiagnosticKind;
use codeconv::syntax::CsKind;
use codeconv::syntax::factory::cs;

use crate::helpers::*;

#[test]
fn test_stubbed_expression_keeps_source_visible() {
    // int x = i++;
    let increment = cs::postfix_unary(cs::name("i"), CsKind::PLUS_PLUS);
    let unit = cs_unit("Form", vec![cs_field(cs_int(), "x", Some(increment))]);
    let (tree, model) = bound(unit, &SPECIAL_TYPES, &[]);
    let (vb_tree, result) = convert_validated(&tree, &model);

    let text = vb_tree.text();
    assert_contains(text, "' Unsupported postfix unary expression: i++");
    assert_contains(text, "x As Integer = Nothing");
    let comment = text.find("' Unsupported").unwrap_or(usize::MAX);
    let field = text.find("x As Integer").unwrap_or(0);
    assert!(comment < field, "stub comment should precede the field:\n{text}");
    assert_eq!(count_of(&result, DiagnosticKind::UnsupportedConstruct), 1);
}

#[test]
fn test_stub_in_condition_is_noted_above_the_block() {
    // if (i++ > 0) { a = b; }
    let counter = cs::postfix_unary(cs::name("i"), CsKind::PLUS_PLUS);
    let condition = cs::binary(counter, CsKind::GT, cs::numeric_literal("0"));
    let statement = cs::if_statement(condition, cs::block(vec![cs_assign("a", "b")]), None);
    let (tree, model) = bound(cs_unit("Form", vec![cs_method("Run", vec![statement])]), &SPECIAL_TYPES, &[]);
    let (vb_tree, result) = convert_validated(&tree, &model);

    let text = vb_tree.text();
    assert_contains(text, "If Nothing > 0 Then");
    assert_contains(text, "a = b");
    let comment = text.find("' Unsupported postfix unary expression: i++").unwrap_or(usize::MAX);
    let block = text.find("If Nothing").unwrap_or(0);
    let body = text.find("a = b").unwrap_or(0);
    assert!(comment < block && block < body, "stub comment should precede the If:\n{text}");
    assert_eq!(count_of(&result, DiagnosticKind::UnsupportedConstruct), 1);
}
