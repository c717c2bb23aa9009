use codeconv::syntax::factory::{cs, vb};
use codeconv::syntax::{CsKind, GreenNode, VbKind};
use rstest::rstest;

use crate::helpers::*;

/// `Widget item; int count; bool flag = {test};`
fn comparison_unit(test: GreenNode) -> GreenNode {
    cs_unit(
        "Form",
        vec![
            cs_field(cs::name("Widget"), "item", None),
            cs_field(cs_int(), "count", None),
            cs_field(cs_bool(), "flag", Some(test)),
        ],
    )
}

fn names() -> [(&'static str, codeconv::SymbolId); 2] {
    [("item", FORM.item), ("count", FORM.count)]
}

#[rstest]
#[case::null_equals(cs::null_literal(), CsKind::EQ_EQ, "item Is Nothing")]
#[case::null_differs(cs::null_literal(), CsKind::BANG_EQ, "item IsNot Nothing")]
#[case::default_equals(cs::default_literal(), CsKind::EQ_EQ, "item Is Nothing")]
fn test_reference_against_default_uses_is(
    #[case] default: GreenNode,
    #[case] operator: CsKind,
    #[case] expected: &str,
) {
    let test = cs::binary(cs::name("item"), operator, default);
    let (tree, model) = bound(comparison_unit(test), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), expected);
}

#[test]
fn test_default_on_the_left_is_recognised() {
    let test = cs::binary(cs::null_literal(), CsKind::EQ_EQ, cs::name("item"));
    let (tree, model) = bound(comparison_unit(test), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "item Is Nothing");
}

#[test]
fn test_value_type_against_default_uses_equals() {
    let test = cs::binary(cs::name("count"), CsKind::EQ_EQ, cs::default_literal());
    let (tree, model) = bound(comparison_unit(test), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "count = Nothing");
    assert!(!vb_tree.text().contains("count Is"));
}

#[test]
fn test_null_check_converts_back_to_default_comparison() {
    let test = cs::binary(cs::name("item"), CsKind::EQ_EQ, cs::null_literal());
    let (tree, model) = bound(comparison_unit(test), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);

    let vb_model = rebind(&vb_tree, &FORM.table, &names());
    let (cs_tree, _) = convert_validated(&vb_tree, &vb_model);
    assert_contains(cs_tree.text(), "item == null");
}

#[test]
fn test_value_comparison_converts_back_to_typed_default() {
    let test = cs::binary(cs::name("count"), CsKind::EQ_EQ, cs::default_literal());
    let (tree, model) = bound(comparison_unit(test), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);

    let vb_model = rebind(&vb_tree, &FORM.table, &names());
    let (cs_tree, _) = convert_validated(&vb_tree, &vb_model);
    assert_contains(cs_tree.text(), "count == default(int)");
}

#[test]
fn test_visual_basic_is_nothing_becomes_null_check() {
    let test = vb::binary(vb::name("item"), VbKind::IS_KW, vb::nothing_literal());
    let statement = vb::assignment_statement(vb::name("flag"), VbKind::EQ, test);
    let (tree, model) = bound(vb_unit("Form", vec![vb_sub("Check", vec![statement])]), &FORM.table, &names());
    let (cs_tree, _) = convert_validated(&tree, &model);
    assert_contains(cs_tree.text(), "item == null");
    assert!(!cs_tree.text().contains("Nothing"));
}

#[rstest]
#[case::is_nothing(VbKind::IS_KW, "text == null")]
#[case::is_not_nothing(VbKind::IS_NOT_KW, "text != null")]
fn test_string_identity_against_nothing_is_null_check(#[case] operator: VbKind, #[case] expected: &str) {
    let test = vb::binary(vb::name("text"), operator, vb::nothing_literal());
    let statement = vb::assignment_statement(vb::name("flag"), VbKind::EQ, test);
    let unit = vb_unit("Form", vec![vb_sub("Check", vec![statement])]);
    let (tree, model) = bound(unit, &FORM.table, &[("text", FORM.text)]);
    let (cs_tree, _) = convert_validated(&tree, &model);
    assert_contains(cs_tree.text(), expected);
    assert!(!cs_tree.text().contains("IsNullOrEmpty"));
}

#[rstest]
#[case::equals(VbKind::EQ, "flag = string.IsNullOrEmpty(text);")]
#[case::differs(VbKind::LT_GT, "flag = !string.IsNullOrEmpty(text);")]
fn test_string_equality_against_nothing_includes_empty(#[case] operator: VbKind, #[case] expected: &str) {
    let test = vb::binary(vb::name("text"), operator, vb::nothing_literal());
    let statement = vb::assignment_statement(vb::name("flag"), VbKind::EQ, test);
    let unit = vb_unit("Form", vec![vb_sub("Check", vec![statement])]);
    let (tree, model) = bound(unit, &FORM.table, &[("text", FORM.text)]);
    let (cs_tree, _) = convert_validated(&tree, &model);
    assert_contains(cs_tree.text(), expected);
}

/// `{ty} {left}; {ty} {right}; bool flag = left {operator} right;`
fn pair_unit(ty: &str, left: &str, right: &str, operator: CsKind) -> GreenNode {
    let test = cs::binary(cs::name(left), operator, cs::name(right));
    cs_unit(
        "Form",
        vec![
            cs_field(cs::name(ty), left, None),
            cs_field(cs::name(ty), right, None),
            cs_field(cs_bool(), "flag", Some(test)),
        ],
    )
}

#[rstest]
#[case::equals(CsKind::EQ_EQ, "item Is other")]
#[case::differs(CsKind::BANG_EQ, "item IsNot other")]
fn test_plain_references_compare_by_identity(#[case] operator: CsKind, #[case] expected: &str) {
    let unit = pair_unit("Widget", "item", "other", operator);
    let (tree, model) = bound(unit, &FORM.table, &[("item", FORM.item), ("other", FORM.other)]);
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), expected);
}

#[rstest]
#[case::equals(CsKind::EQ_EQ, "price = cost")]
#[case::differs(CsKind::BANG_EQ, "price <> cost")]
fn test_user_defined_equality_keeps_operator(#[case] operator: CsKind, #[case] expected: &str) {
    let unit = pair_unit("Money", "price", "cost", operator);
    let (tree, model) = bound(unit, &FORM.table, &[("price", FORM.price), ("cost", FORM.cost)]);
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), expected);
    assert!(!vb_tree.text().contains("price Is"));
}
