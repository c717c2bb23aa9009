use codeconv::syntax::{GreenNode, Trivia, VbKind};

use crate::helpers::*;

fn leading_comment(node: GreenNode, text: &str) -> GreenNode {
    node.map_first_token(|t| t.with_prepended_leading_trivia([Trivia::line_comment(text), Trivia::end_of_line()]))
}

fn trailing_comment(node: GreenNode, text: &str) -> GreenNode {
    node.map_last_token(|t| t.with_appended_trailing_trivia([Trivia::space(), Trivia::line_comment(text)]))
}

#[test]
fn test_csharp_comments_survive_conversion() {
    let unit = cs_unit(
        "Form",
        vec![
            leading_comment(cs_field(cs_int(), "count", None), "// how many"),
            leading_comment(
                cs_method("Reset", vec![trailing_comment(cs_assign("count", "b"), "// start over")]),
                "// clears the counter",
            ),
        ],
    );
    let (tree, model) = bound(unit, &FORM.table, &[("count", FORM.count), ("b", FORM.b)]);
    let (converted, _) = convert_validated(&tree, &model);

    let expected = comment_bodies(&tree);
    assert_eq!(expected.len(), 3);
    assert_eq!(comment_bodies(&converted), expected);
}

#[test]
fn test_visual_basic_comments_survive_conversion() {
    let unit = vb_unit(
        "Form",
        vec![
            leading_comment(vb_field("count", VbKind::INTEGER_KW), "' how many"),
            vb_sub("Reset", vec![trailing_comment(vb_assign("count", "b"), "' start over")]),
        ],
    );
    let (tree, model) = bound(unit, &FORM.table, &[("count", FORM.count), ("b", FORM.b)]);
    let (converted, _) = convert_validated(&tree, &model);

    assert_eq!(comment_bodies(&converted), comment_bodies(&tree));
}

#[test]
fn test_comments_survive_a_round_trip() {
    let unit = cs_unit("Form", vec![leading_comment(cs_method("Reset", vec![cs_assign("count", "b")]), "// note")]);
    let names = [("count", FORM.count), ("b", FORM.b)];
    let (tree, model) = bound(unit, &FORM.table, &names);
    let (vb_tree, _) = convert_validated(&tree, &model);
    let vb_model = rebind(&vb_tree, &FORM.table, &names);
    let (cs_tree, _) = convert_validated(&vb_tree, &vb_model);

    assert_eq!(comment_bodies(&cs_tree), vec!["note".to_string()]);
}
