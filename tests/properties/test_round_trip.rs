use codeconv::syntax::{CsKind, SyntaxTree, VbKind};

use crate::helpers::*;

fn cs_shape(tree: &SyntaxTree) -> Vec<CsKind> {
    tree.descendants(tree.root())
        .into_iter()
        .filter_map(|node| tree.kind(node).as_cs())
        .filter(|kind| {
            matches!(
                kind,
                CsKind::CLASS_DECLARATION
                    | CsKind::FIELD_DECLARATION
                    | CsKind::VARIABLE_DECLARATOR
                    | CsKind::METHOD_DECLARATION
                    | CsKind::EXPRESSION_STATEMENT
                    | CsKind::ASSIGNMENT_EXPRESSION
            )
        })
        .collect()
}

fn vb_shape(tree: &SyntaxTree) -> Vec<VbKind> {
    tree.descendants(tree.root())
        .into_iter()
        .filter_map(|node| tree.kind(node).as_vb())
        .filter(|kind| {
            matches!(
                kind,
                VbKind::CLASS_BLOCK
                    | VbKind::FIELD_DECLARATION
                    | VbKind::VARIABLE_DECLARATOR
                    | VbKind::METHOD_BLOCK
                    | VbKind::ASSIGNMENT_STATEMENT
            )
        })
        .collect()
}

#[test]
fn test_csharp_members_round_trip() {
    let unit = cs_unit(
        "Form",
        vec![cs_field(cs_int(), "count", None), cs_method("Reset", vec![cs_assign("count", "b")])],
    );
    let names = [("count", FORM.count), ("b", FORM.b)];
    let (tree, model) = bound(unit, &FORM.table, &names);
    let (vb_tree, _) = convert_validated(&tree, &model);
    let vb_model = rebind(&vb_tree, &FORM.table, &names);
    let (back, _) = convert_validated(&vb_tree, &vb_model);

    assert_eq!(cs_shape(&back), cs_shape(&tree));
    assert_contains(back.text(), "count = b;");
}

#[test]
fn test_visual_basic_members_round_trip() {
    let unit = vb_unit(
        "Form",
        vec![vb_field("count", VbKind::INTEGER_KW), vb_sub("Reset", vec![vb_assign("count", "b")])],
    );
    let names = [("count", FORM.count), ("b", FORM.b)];
    let (tree, model) = bound(unit, &FORM.table, &names);
    let (cs_tree, _) = convert_validated(&tree, &model);
    let cs_model = rebind(&cs_tree, &FORM.table, &names);
    let (back, _) = convert_validated(&cs_tree, &cs_model);

    assert_eq!(vb_shape(&back), vb_shape(&tree));
    assert_contains(back.text(), "count As Integer");
}
