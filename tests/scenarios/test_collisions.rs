use codeconv::DiagnosticKind;
use codeconv::Severity;
use codeconv::syntax::CsKind;
use codeconv::syntax::factory::Header;
use codeconv::syntax::factory::cs::{self, MethodBody};

use crate::helpers::*;

/// `int value; int Value; void Sync() { Value = value; }`
fn case_variants() -> codeconv::syntax::GreenNode {
    cs_unit(
        "Form",
        vec![
            cs_field(cs_int(), "value", None),
            cs_field(cs_int(), "Value", None),
            cs_method("Sync", vec![cs_assign("Value", "value")]),
        ],
    )
}

fn names() -> [(&'static str, codeconv::SymbolId); 2] {
    [("value", FORM.lower_value), ("Value", FORM.upper_value)]
}

#[test]
fn test_case_variants_get_distinct_names() {
    let (tree, model) = bound(case_variants(), &FORM.table, &names());
    let (vb_tree, result) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "Value_1 = value");
    assert_eq!(vb_tree.text().matches("Value_1").count(), 2);
    assert_eq!(count_of(&result, DiagnosticKind::NamingCollision), 1);
    let collision = result.diagnostics.iter().find(|d| d.kind == DiagnosticKind::NamingCollision);
    assert!(collision.is_some_and(|d| d.severity == Severity::Warning && d.message.contains("Value_1")));
}

#[test]
fn test_case_variants_are_left_alone_for_csharp() {
    let (tree, model) = bound(case_variants(), &FORM.table, &names());
    let (vb_tree, _) = convert_validated(&tree, &model);

    // Visual Basic back to C#: distinct names stay distinct, nothing to rename.
    let renamed = [("value", FORM.lower_value), ("Value_1", FORM.upper_value)];
    let vb_model = rebind(&vb_tree, &FORM.table, &renamed);
    let (cs_tree, result) = convert_validated(&vb_tree, &vb_model);
    assert_contains(cs_tree.text(), "Value_1 = value;");
    assert_eq!(count_of(&result, DiagnosticKind::NamingCollision), 0);
}

#[test]
fn test_same_symbol_twice_is_not_a_collision() {
    let unit = cs_unit(
        "Form",
        vec![cs_field(cs_int(), "value", None), cs_method("Touch", vec![cs_assign("value", "value")])],
    );
    let (tree, model) = bound(unit, &FORM.table, &[("value", FORM.lower_value)]);
    let (vb_tree, result) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "value = value");
    assert_eq!(count_of(&result, DiagnosticKind::NamingCollision), 0);
}

/// `int Value; void Set(int value) { Value = value; }`
fn hiding_parameter() -> codeconv::syntax::GreenNode {
    let parameter = cs::parameter(Header::default(), Some(cs_int()), cs::ident("value"), None);
    let set = cs::method_declaration(
        Header::default(),
        cs::predefined_type(CsKind::VOID_KW),
        cs::ident("Set"),
        None,
        cs::parameter_list(vec![parameter]),
        MethodBody::Block(cs::block(vec![cs_assign("Value", "value")])),
    );
    cs_unit("Form", vec![cs_field(cs_int(), "Value", None), set])
}

#[test]
fn test_parameter_hiding_member_qualifies_member() {
    let names = [("Form", FORM.form), ("Value", FORM.upper_value), ("Set", FORM.set), ("value", FORM.value_param)];
    let (tree, model) = bound(hiding_parameter(), &FORM.table, &names);
    let (vb_tree, result) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "(value As Integer)");
    assert_contains(vb_tree.text(), "Me.Value = value");
    assert_eq!(count_of(&result, DiagnosticKind::NamingCollision), 1);
    let collision = result.diagnostics.iter().find(|d| d.kind == DiagnosticKind::NamingCollision);
    assert!(collision.is_some_and(|d| d.message.contains("Me.")));
}

#[test]
fn test_parameter_with_unreferenced_namesake_is_left_alone() {
    let parameter = cs::parameter(Header::default(), Some(cs_int()), cs::ident("value"), None);
    let set = cs::method_declaration(
        Header::default(),
        cs::predefined_type(CsKind::VOID_KW),
        cs::ident("Set"),
        None,
        cs::parameter_list(vec![parameter]),
        MethodBody::Block(cs::block(vec![cs_assign("b", "value")])),
    );
    let unit = cs_unit("Form", vec![cs_field(cs_int(), "Value", None), set]);
    let names = [("Form", FORM.form), ("Value", FORM.upper_value), ("value", FORM.value_param), ("b", FORM.b)];
    let (tree, model) = bound(unit, &FORM.table, &names);
    let (vb_tree, result) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "b = value");
    assert!(!vb_tree.text().contains("Me."));
    assert_eq!(count_of(&result, DiagnosticKind::NamingCollision), 0);
}
