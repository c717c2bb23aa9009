use codeconv::syntax::factory::{Header, cs, vb};
use codeconv::syntax::{CsKind, GreenNode, Language, VbKind};

use crate::helpers::*;

/// `x.Click += Handler;` inside `Wire`, with `Handler` declared alongside.
fn subscription(operator: CsKind) -> GreenNode {
    let event = cs::member_access(cs::name("x"), cs::name("Click"));
    let statement = cs::expression_statement(cs::assignment(event, operator, cs::name("Handler")));
    cs_unit("Form", vec![cs_method("Wire", vec![statement]), cs_method("Handler", vec![])])
}

#[test]
fn test_event_subscription_becomes_add_handler() {
    let names = [("Click", FORM.click), ("Handler", FORM.handler)];
    let (tree, model) = bound(subscription(CsKind::PLUS_EQ), &FORM.table, &names);
    let (vb_tree, _) = convert_validated(&tree, &model);

    assert_eq!(vb_tree.language(), Language::VisualBasic);
    assert_contains(vb_tree.text(), "AddHandler x.Click, AddressOf Handler");
    assert!(!vb_tree.text().contains("+="));
}

#[test]
fn test_event_unsubscription_becomes_remove_handler() {
    let names = [("Click", FORM.click), ("Handler", FORM.handler)];
    let (tree, model) = bound(subscription(CsKind::MINUS_EQ), &FORM.table, &names);
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "RemoveHandler x.Click, AddressOf Handler");
}

#[test]
fn test_add_handler_converts_back_to_operator() {
    let names = [("Click", FORM.click), ("Handler", FORM.handler)];
    let (tree, model) = bound(subscription(CsKind::PLUS_EQ), &FORM.table, &names);
    let (vb_tree, _) = convert_validated(&tree, &model);

    let vb_model = rebind(&vb_tree, &FORM.table, &names);
    let (cs_tree, _) = convert_validated(&vb_tree, &vb_model);
    assert_eq!(cs_tree.language(), Language::CSharp);
    assert_contains(cs_tree.text(), "x.Click += Handler;");
    assert!(!cs_tree.text().contains("AddressOf"));
}

#[test]
fn test_unbound_compound_assignment_stays_arithmetic() {
    let statement = cs::expression_statement(cs::assignment(cs::name("total"), CsKind::PLUS_EQ, cs::name("delta")));
    let (tree, model) = bound(cs_unit("Form", vec![cs_method("Add", vec![statement])]), &SPECIAL_TYPES, &[]);
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "total += delta");
    assert!(!vb_tree.text().contains("AddHandler"));
}

/// `x.Click += handler;` inside `Wire`.
fn lambda_subscription(handler: GreenNode) -> GreenNode {
    let event = cs::member_access(cs::name("x"), cs::name("Click"));
    let statement = cs::expression_statement(cs::assignment(event, CsKind::PLUS_EQ, handler));
    cs_unit("Form", vec![cs_method("Wire", vec![statement])])
}

fn refresh() -> GreenNode {
    cs::invocation(cs::name("Refresh"), cs::argument_list(vec![]))
}

fn cs_param(ty: Option<GreenNode>, name: &str) -> GreenNode {
    cs::parameter(Header::default(), ty, cs::ident(name), None)
}

#[test]
fn test_lambda_handler_becomes_sub_lambda() {
    let params = cs::parameter_list(vec![cs_param(None, "sender"), cs_param(None, "e")]);
    let unit = lambda_subscription(cs::parenthesized_lambda(params, refresh()));
    let (tree, model) = bound(unit, &FORM.table, &[("Click", FORM.click)]);
    let (vb_tree, _) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "AddHandler x.Click, Sub(sender, e) Refresh()");
    assert!(!vb_tree.text().contains("AddressOf"));
}

#[test]
fn test_anonymous_method_handler_keeps_typed_parameters() {
    let params = cs::parameter_list(vec![
        cs_param(Some(cs::predefined_type(CsKind::OBJECT_KW)), "sender"),
        cs_param(Some(cs::name("EventArgs")), "e"),
    ]);
    let body = cs::block(vec![cs::expression_statement(refresh())]);
    let unit = lambda_subscription(cs::anonymous_method(Some(params), body));
    let (tree, model) = bound(unit, &FORM.table, &[("Click", FORM.click)]);
    let (vb_tree, _) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "AddHandler x.Click, Sub(sender As Object, e As EventArgs) Refresh() End Sub");
}

#[test]
fn test_sub_lambda_handler_becomes_lambda() {
    let params = vb::parameter_list(vec![
        vb::parameter(Header::default(), vb::ident("sender"), None, None),
        vb::parameter(Header::default(), vb::ident("e"), None, None),
    ]);
    let body = vb::expression_statement(vb::invocation(vb::name("Refresh"), vb::argument_list(vec![])));
    let handler = vb::single_line_lambda(vb::lambda_header(VbKind::SUB_KW, params), body);
    let event = vb::member_access(vb::name("x"), vb::name("Click"));
    let unit = vb_unit("Form", vec![vb_sub("Wire", vec![vb::add_handler(event, handler)])]);
    let (tree, model) = bound(unit, &FORM.table, &[("Click", FORM.click)]);
    let (cs_tree, _) = convert_validated(&tree, &model);

    assert_contains(cs_tree.text(), "x.Click += (sender, e) => Refresh();");
    assert!(!cs_tree.text().contains("AddHandler"));
}
