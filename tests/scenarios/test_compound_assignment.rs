use codeconv::DiagnosticKind;
use codeconv::syntax::factory::cs;
use codeconv::syntax::{CsKind, GreenNode};

use crate::helpers::*;

/// `int count; int b; void Update() { target op= value; }`
fn update_unit(target: GreenNode, operator: CsKind, value: GreenNode) -> GreenNode {
    let statement = cs::expression_statement(cs::assignment(target, operator, value));
    cs_unit(
        "Form",
        vec![cs_field(cs_int(), "count", None), cs_field(cs_int(), "b", None), cs_method("Update", vec![statement])],
    )
}

fn names() -> [(&'static str, codeconv::SymbolId); 2] {
    [("count", FORM.count), ("b", FORM.b)]
}

#[test]
fn test_remainder_on_a_name_expands() {
    let unit = update_unit(cs::name("count"), CsKind::PERCENT_EQ, cs::name("b"));
    let (tree, model) = bound(unit, &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "count = count Mod b");
}

#[test]
fn test_integral_division_keeps_compound_operator() {
    let unit = update_unit(cs::name("count"), CsKind::SLASH_EQ, cs::name("b"));
    let (tree, model) = bound(unit, &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "count \\= b");
}

#[test]
fn test_side_effecting_target_is_not_duplicated() {
    // a[i++] %= b;
    let index = cs::argument(cs::postfix_unary(cs::name("i"), CsKind::PLUS_PLUS));
    let target = cs::element_access(cs::name("a"), cs::bracketed_argument_list(vec![index]));
    let unit = update_unit(target, CsKind::PERCENT_EQ, cs::name("b"));
    let (tree, model) = bound(unit, &FORM.table, &names());
    let (vb_tree, result) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "' Unsupported");
    assert_contains(vb_tree.text(), "a[i++] %= b;");
    assert!(!vb_tree.text().contains("Mod"));
    assert_eq!(count_of(&result, DiagnosticKind::UnsupportedConstruct), 1);
}

#[test]
fn test_indexed_target_with_plain_index_expands() {
    // a[i] %= b;
    let index = cs::argument(cs::name("i"));
    let target = cs::element_access(cs::name("a"), cs::bracketed_argument_list(vec![index]));
    let unit = update_unit(target, CsKind::PERCENT_EQ, cs::name("b"));
    let (tree, model) = bound(unit, &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "a(i) = a(i) Mod b");
}

#[test]
fn test_keyword_named_operand_is_escaped() {
    let unit = update_unit(cs::name("count"), CsKind::PLUS_EQ, cs::name("step"));
    let (tree, model) = bound(unit, &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "count += [step]");
}
