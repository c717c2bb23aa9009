use codeconv::CancellationToken;
use codeconv::syntax::factory::{cs, opaque};
use codeconv::syntax::tokens::{find_last_token_of_partial_generic_name, try_parse_generic_name};
use codeconv::syntax::{CsKind, GreenElement, GreenNode, GreenToken, SyntaxTree};

use crate::helpers::*;

/// `a<b` as a front-end that could not rule out a generic name leaves it:
/// a generic name whose closing `>` is missing.
fn unclosed_generic(ident: &str, arg: &str) -> GreenNode {
    let args = GreenNode::new(
        CsKind::TYPE_ARGUMENT_LIST,
        [
            GreenElement::Token(GreenToken::fixed(CsKind::LT)),
            GreenElement::Node(cs::name(arg)),
            GreenElement::Token(GreenToken::missing(CsKind::GT)),
        ],
    );
    GreenNode::new(CsKind::GENERIC_NAME, [GreenElement::Token(cs::ident(ident)), GreenElement::Node(args)])
}

#[test]
fn test_unclosed_generic_converts_as_comparison() {
    let unit = cs_unit(
        "Form",
        vec![cs_field(cs_int(), "b", None), cs_field(cs_bool(), "flag", Some(unclosed_generic("a", "b")))],
    );
    let (tree, model) = bound(unit, &FORM.table, &[("b", FORM.b)]);
    let (vb_tree, _) = convert_validated(&tree, &model);

    assert_contains(vb_tree.text(), "a < b");
    assert!(!vb_tree.text().contains("(Of"));
}

#[test]
fn test_closed_generic_stays_generic() {
    let list = cs::generic_name(cs::ident("List"), vec![cs_int()]);
    let creation = cs::object_creation(list.clone(), Some(cs::argument_list(vec![])), None);
    let unit = cs_unit("Form", vec![cs_field(list, "items", Some(creation))]);
    let (tree, model) = bound(unit, &SPECIAL_TYPES, &[]);
    let (vb_tree, _) = convert_validated(&tree, &model);
    assert_contains(vb_tree.text(), "List(Of Integer)");
}

#[test]
fn test_token_scan_stops_before_declaration_keyword() {
    let tree = SyntaxTree::new(cs::compilation_unit(vec![opaque(CsKind::EXPRESSION_STATEMENT, "x = a < b public class C")]));
    let Some(a) = tree.all_tokens().find(|&t| tree.token_text(t) == "a") else {
        panic!("no `a` token");
    };
    let last = find_last_token_of_partial_generic_name(&tree, a);
    assert_eq!(tree.token_text(last), "b");
    assert!(try_parse_generic_name(&tree, a, &CancellationToken::new()).is_none());
}
