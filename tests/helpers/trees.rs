//! Tree builders and text assertions.

use std::sync::Arc;

use codeconv::convert::{ConversionOptions, ConversionResult, ConversionStatus, convert};
use codeconv::semantic::{SemanticModel, SymbolId, SymbolTable};
use codeconv::syntax::factory::cs::{self, MethodBody};
use codeconv::syntax::factory::{Header, vb};
use codeconv::syntax::{CsKind, GreenNode, SyntaxTree, VbKind};
use codeconv::{CancellationToken, DiagnosticKind};

// ============================================================================
// C# builders
// ============================================================================

/// `class {name} { members }` alone in a compilation unit.
pub fn cs_unit(name: &str, members: Vec<GreenNode>) -> GreenNode {
    let class = cs::type_declaration(CsKind::CLASS_KW, Header::default(), cs::ident(name), None, None, members);
    cs::compilation_unit(vec![class])
}

/// `void {name}() { statements }`
pub fn cs_method(name: &str, statements: Vec<GreenNode>) -> GreenNode {
    cs::method_declaration(
        Header::default(),
        cs::predefined_type(CsKind::VOID_KW),
        cs::ident(name),
        None,
        cs::parameter_list(vec![]),
        MethodBody::Block(cs::block(statements)),
    )
}

/// `{ty} {name} = init;`
pub fn cs_field(ty: GreenNode, name: &str, init: Option<GreenNode>) -> GreenNode {
    let declarator = cs::variable_declarator(cs::ident(name), init);
    cs::field_declaration(Header::default(), cs::variable_declaration(ty, vec![declarator]))
}

pub fn cs_int() -> GreenNode {
    cs::predefined_type(CsKind::INT_KW)
}

pub fn cs_bool() -> GreenNode {
    cs::predefined_type(CsKind::BOOL_KW)
}

/// `left = right;`
pub fn cs_assign(left: &str, right: &str) -> GreenNode {
    cs::expression_statement(cs::assignment(cs::name(left), CsKind::EQ, cs::name(right)))
}

// ============================================================================
// Visual Basic builders
// ============================================================================

/// `Class {name} ... End Class` alone in a compilation unit.
pub fn vb_unit(name: &str, members: Vec<GreenNode>) -> GreenNode {
    let class = vb::type_block(VbKind::CLASS_KW, Header::default(), vb::ident(name), None, vec![], vec![], members);
    vb::compilation_unit(vec![class])
}

/// `Sub {name}() ... End Sub`
pub fn vb_sub(name: &str, statements: Vec<GreenNode>) -> GreenNode {
    let statement = vb::method_statement(Header::default(), vb::ident(name), None, vb::parameter_list(vec![]), None);
    vb::method_block(statement, statements)
}

/// `Private {name} As {ty}`
pub fn vb_field(name: &str, ty: VbKind) -> GreenNode {
    let declarator =
        vb::variable_declarator(vec![vb::ident(name)], Some(vb::simple_as_clause(vb::predefined_type(ty))), None);
    vb::field_declaration(Header::with_modifiers([VbKind::PRIVATE_KW]), vec![declarator])
}

/// `left = right`
pub fn vb_assign(left: &str, right: &str) -> GreenNode {
    vb::assignment_statement(vb::name(left), VbKind::EQ, vb::name(right))
}

// ============================================================================
// Binding and conversion
// ============================================================================

/// A tree plus a model binding each name, as references and as
/// declarations, to its symbol.
pub fn bound(source: GreenNode, table: &Arc<SymbolTable>, names: &[(&str, SymbolId)]) -> (SyntaxTree, SemanticModel) {
    let tree = SyntaxTree::new(source);
    let model = rebind(&tree, table, names);
    (tree, model)
}

/// A fresh model over an existing tree, typically a converted one.
pub fn rebind(tree: &SyntaxTree, table: &Arc<SymbolTable>, names: &[(&str, SymbolId)]) -> SemanticModel {
    let mut model = SemanticModel::new(tree, Arc::clone(table));
    for &(name, symbol) in names {
        model.bind_references(tree, name, symbol);
        model.bind_declarations(tree, name, symbol);
    }
    model
}

/// Convert with default options and insist on a validated tree.
pub fn convert_validated(tree: &SyntaxTree, model: &SemanticModel) -> (SyntaxTree, ConversionResult) {
    let result = convert(tree, model, &ConversionOptions::default(), &CancellationToken::new());
    assert_eq!(result.status, ConversionStatus::Validated, "diagnostics: {:#?}", result.diagnostics);
    let Some(converted) = result.tree.clone() else {
        panic!("validated result without a tree");
    };
    (converted, result)
}

// ============================================================================
// Assertions
// ============================================================================

/// Text with every whitespace run collapsed to one space.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn assert_contains(text: &str, expected: &str) {
    let squashed = squash(text);
    assert!(squashed.contains(expected), "expected `{expected}` in:\n{text}");
}

pub fn count_of(result: &ConversionResult, kind: DiagnosticKind) -> usize {
    result.diagnostics.iter().filter(|d| d.kind == kind).count()
}

/// Comment bodies of every token, with the comment markers of either
/// language removed, sorted so two trees compare as multisets.
pub fn comment_bodies(tree: &SyntaxTree) -> Vec<String> {
    let mut bodies: Vec<String> = tree
        .all_tokens()
        .flat_map(|t| {
            let token = tree.token(t);
            token.leading().iter().chain(token.trailing()).cloned().collect::<Vec<_>>()
        })
        .filter(|trivia| trivia.is_comment())
        .map(|trivia| {
            let text = trivia.text.trim();
            let body = text
                .strip_prefix("//")
                .or_else(|| text.strip_prefix('\''))
                .or_else(|| text.strip_prefix("REM "))
                .unwrap_or(text);
            body.trim().to_string()
        })
        .collect();
    bodies.sort();
    bodies
}
