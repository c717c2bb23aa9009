//! Cleanup passes over a converted tree.
//!
//! Some problems only show once the whole target tree exists: two names the
//! source kept apart only by case, a call that now picks another overload, a
//! conversion the source performed silently. Each pass reads the annotations
//! the converter left behind (bound symbols, expression types, source lines),
//! rewrites what it must through [`SyntaxTree::rebuild`] and reports every
//! change with a diagnostic positioned on the source line.

mod casts;
mod collisions;
mod overloads;

pub(crate) use collisions::resolve_cross_unit_collisions;

use rustc_hash::FxHashMap;

use crate::annotations::{self, Annotated, AnnotationKeys};
use crate::base::FileId;
use crate::convert::ConversionOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::semantic::{SpecialType, SymbolId, SymbolTable, TypeKind, is_array_of};
use crate::syntax::factory::{cs, escape_identifier, vb};
use crate::syntax::{CsKind, GreenNode, Language, NodeId, SyntaxKind, SyntaxTree, VbKind};

/// A validated tree and what the passes reported.
#[derive(Debug, Clone)]
pub struct Validation {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run every pass over `tree`, a converted unit.
///
/// `table` is the symbol table the source unit was bound against; the
/// annotations in `tree` refer to it.
pub fn validate(tree: SyntaxTree, table: &SymbolTable, options: &ConversionOptions, file: FileId) -> Validation {
    let mut validator = Validator::new(table, options, file);
    let tree = validator.resolve_collisions(tree);
    let tree = validator.pin_overloads(tree);
    let tree = validator.insert_missing_casts(tree);
    tracing::debug!(%file, diagnostics = validator.diagnostics.len(), "tree validated");
    Validation { tree, diagnostics: validator.diagnostics }
}

pub(crate) struct Validator<'a> {
    table: &'a SymbolTable,
    keys: &'a AnnotationKeys,
    option_strict: bool,
    file: FileId,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    pub(crate) fn new(table: &'a SymbolTable, options: &'a ConversionOptions, file: FileId) -> Self {
        Self {
            table,
            keys: &options.annotation_keys,
            option_strict: options.option_strict,
            file,
            diagnostics: Vec::new(),
        }
    }

    /// Report against the source line `node` was converted from, falling
    /// back to the node's own line when it carries no mapping.
    fn report(&mut self, tree: &SyntaxTree, node: NodeId, kind: DiagnosticKind, message: String) {
        let diagnostic = located(self.keys, tree, node, self.file, kind, message);
        self.diagnostics.push(diagnostic);
    }

    fn symbol_at(&self, tree: &SyntaxTree, node: NodeId) -> Option<SymbolId> {
        annotations::symbol_of(self.keys, tree.green(node))
            .or_else(|| tree.child_tokens(node).find_map(|t| annotations::symbol_of(self.keys, tree.token(t))))
    }

    fn expression_type(&self, tree: &SyntaxTree, node: NodeId) -> Option<SymbolId> {
        annotations::expression_type_of(self.keys, tree.green(node))
    }

    fn display_type(&self, ty: SymbolId) -> String {
        self.table.get(ty).map(|s| s.name.to_string()).unwrap_or_else(|| ty.to_string())
    }

    /// Fully qualified syntax for `ty`; validation runs after imports are
    /// final, so nothing is left to rely on them.
    fn type_syntax(&self, language: Language, ty: SymbolId) -> GreenNode {
        let object = || match language {
            Language::VisualBasic => vb::predefined_type(VbKind::OBJECT_KW),
            Language::CSharp => cs::predefined_type(CsKind::OBJECT_KW),
        };
        let Some(symbol) = self.table.get(ty) else {
            return object();
        };
        if let Some(info) = &symbol.type_info {
            if info.type_kind == TypeKind::Array {
                let element = match info.element_type {
                    Some(element) => self.type_syntax(language, element),
                    None => object(),
                };
                let rank = info.rank.max(1) as usize;
                return match language {
                    Language::VisualBasic => vb::array_type(element, vec![vb::array_rank_specifier(rank)]),
                    Language::CSharp => cs::array_type(element, vec![cs::omitted_rank_specifier(rank)]),
                };
            }
            if info.type_kind == TypeKind::Error || !info.can_be_referenced_by_name {
                return object();
            }
        }
        match symbol.special_type().and_then(|s| s.keyword(language)) {
            Some(SyntaxKind::Vb(keyword)) if language == Language::VisualBasic => return vb::predefined_type(keyword),
            Some(SyntaxKind::Cs(keyword)) if language == Language::CSharp => return cs::predefined_type(keyword),
            _ => {}
        }

        let mut segments = vec![escape_identifier(language, &symbol.name)];
        let mut outermost = ty;
        let mut container = symbol.containing_type;
        while let Some(outer) = container.and_then(|c| self.table.get(c)).filter(|s| s.is_type()) {
            segments.push(escape_identifier(language, &outer.name));
            outermost = outer.id;
            container = outer.containing_type;
        }
        if let Some(namespace) = self.table.namespace_of(outermost) {
            segments.push(namespace.to_string());
        }
        segments.reverse();
        let dotted = segments.join(".");
        match language {
            Language::VisualBasic => vb::name(&dotted),
            Language::CSharp => cs::name(&dotted),
        }
    }

    /// `expr` converted to `to` explicitly. The cast takes over the
    /// expression's outer trivia and annotations.
    fn cast_to(&self, language: Language, expr: GreenNode, from: Option<SymbolId>, to: SymbolId) -> GreenNode {
        let leading = expr.first_token().map(|t| t.leading().to_vec()).unwrap_or_default();
        let trailing = expr.last_token().map(|t| t.trailing().to_vec()).unwrap_or_default();
        let bare = expr
            .map_first_token(|t| t.with_leading_trivia(Vec::new()))
            .map_last_token(|t| t.with_trailing_trivia(Vec::new()));

        let from_string = from.and_then(|f| self.table.get(f)).and_then(|s| s.special_type()) == Some(SpecialType::String);
        let wrapped = if from_string && is_array_of(self.table, to, SpecialType::Char) {
            to_char_array(language, bare)
        } else {
            let ty = self.type_syntax(language, to);
            match language {
                Language::VisualBasic => vb::cast(VbKind::CTYPE_KW, bare, ty),
                Language::CSharp => cs::cast(ty, parenthesize(language, bare)),
            }
        };

        let wrapped = wrapped
            .map_first_token(|t| t.with_leading_trivia(leading))
            .map_last_token(|t| t.with_trailing_trivia(trailing))
            .with_annotations_from(&expr);
        annotations::with_expression_type(self.keys, wrapped, to)
    }
}

fn located(
    keys: &AnnotationKeys,
    tree: &SyntaxTree,
    node: NodeId,
    file: FileId,
    kind: DiagnosticKind,
    message: String,
) -> Diagnostic {
    let span = std::iter::once(node)
        .chain(tree.ancestors(node))
        .find_map(|n| annotations::source_line_span(keys, tree.green(n)));
    let (start, end) = span.unwrap_or_else(|| tree.line_span(node));
    Diagnostic::new(kind, file, start, 0, message).with_span(end, 0)
}

fn to_char_array(language: Language, expr: GreenNode) -> GreenNode {
    let target = parenthesize(language, expr);
    match language {
        Language::VisualBasic => vb::invocation(
            vb::member_access(target, vb::identifier_name(vb::ident("ToCharArray"))),
            vb::argument_list(Vec::new()),
        ),
        Language::CSharp => cs::invocation(
            cs::member_access(target, cs::identifier_name(cs::ident("ToCharArray"))),
            cs::argument_list(Vec::new()),
        ),
    }
}

/// Expressions that bind tighter than a cast or a member access.
fn is_primary(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::Cs(k) => matches!(
            k,
            CsKind::IDENTIFIER_NAME
                | CsKind::GENERIC_NAME
                | CsKind::QUALIFIED_NAME
                | CsKind::PREDEFINED_TYPE
                | CsKind::MEMBER_ACCESS_EXPRESSION
                | CsKind::INVOCATION_EXPRESSION
                | CsKind::ELEMENT_ACCESS_EXPRESSION
                | CsKind::LITERAL_EXPRESSION
                | CsKind::PARENTHESIZED_EXPRESSION
                | CsKind::THIS_EXPRESSION
                | CsKind::BASE_EXPRESSION
                | CsKind::OBJECT_CREATION_EXPRESSION
                | CsKind::TYPE_OF_EXPRESSION
                | CsKind::DEFAULT_EXPRESSION
                | CsKind::CHECKED_EXPRESSION
        ),
        SyntaxKind::Vb(k) => matches!(
            k,
            VbKind::IDENTIFIER_NAME
                | VbKind::GENERIC_NAME
                | VbKind::QUALIFIED_NAME
                | VbKind::PREDEFINED_TYPE
                | VbKind::MEMBER_ACCESS_EXPRESSION
                | VbKind::INVOCATION_EXPRESSION
                | VbKind::LITERAL_EXPRESSION
                | VbKind::PARENTHESIZED_EXPRESSION
                | VbKind::ME_EXPRESSION
                | VbKind::MY_BASE_EXPRESSION
                | VbKind::CAST_EXPRESSION
                | VbKind::GET_TYPE_EXPRESSION
                | VbKind::TERNARY_CONDITIONAL_EXPRESSION
                | VbKind::BINARY_CONDITIONAL_EXPRESSION
        ),
    }
}

fn parenthesize(language: Language, expr: GreenNode) -> GreenNode {
    if is_primary(expr.kind()) {
        return expr;
    }
    match language {
        Language::VisualBasic => vb::parenthesized(expr),
        Language::CSharp => cs::parenthesized(expr),
    }
}

/// Replace each target node with `wrap` of its rebuilt self, innermost first,
/// so a target nested inside another survives the outer rewrite.
fn rewrite_nested<T>(
    tree: SyntaxTree,
    mut targets: Vec<(NodeId, T)>,
    mut wrap: impl FnMut(GreenNode, &T) -> GreenNode,
) -> SyntaxTree {
    if targets.is_empty() {
        return tree;
    }
    targets.sort_by(|a, b| b.0.cmp(&a.0));
    targets.dedup_by(|a, b| a.0 == b.0);
    let mut nodes = FxHashMap::default();
    let tokens = FxHashMap::default();
    for (node, data) in &targets {
        let inner = tree.rebuild_subtree(*node, &nodes, &tokens);
        nodes.insert(*node, wrap(inner, data));
    }
    SyntaxTree::new(tree.rebuild(&nodes, &tokens))
}

/// The expression of an argument node.
fn argument_expression(tree: &SyntaxTree, argument: NodeId) -> Option<NodeId> {
    tree.child_nodes(argument).last()
}

/// Callee and argument expressions of an invocation.
fn invocation_parts(tree: &SyntaxTree, invocation: NodeId) -> Option<(NodeId, Vec<NodeId>)> {
    let mut children = tree.child_nodes(invocation);
    let callee = children.next()?;
    let list = children.next()?;
    let args = tree.child_nodes(list).filter_map(|a| argument_expression(tree, a)).collect();
    Some((callee, args))
}

/// The name node a callee expression ends with.
fn callee_name(tree: &SyntaxTree, callee: NodeId) -> NodeId {
    match tree.kind(callee) {
        SyntaxKind::Cs(CsKind::MEMBER_ACCESS_EXPRESSION) | SyntaxKind::Vb(VbKind::MEMBER_ACCESS_EXPRESSION) => {
            tree.child_nodes(callee).last().unwrap_or(callee)
        }
        _ => callee,
    }
}

fn is_invocation(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Cs(CsKind::INVOCATION_EXPRESSION) | SyntaxKind::Vb(VbKind::INVOCATION_EXPRESSION)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::{Symbol, TypeInfo};

    #[test]
    fn test_type_syntax_qualifies_named_types() {
        let mut table = SymbolTable::with_special_types();
        let outer = table.insert(Symbol::type_symbol("Outer", TypeInfo::new(TypeKind::Class).with_namespace("App.Core")));
        let inner = table.insert(Symbol::type_symbol("Inner", TypeInfo::new(TypeKind::Class)).in_type(outer));
        let options = ConversionOptions::default();
        let validator = Validator::new(&table, &options, FileId::new(0));

        assert_eq!(validator.type_syntax(Language::CSharp, inner).to_text(), "App.Core.Outer.Inner");
        assert_eq!(validator.type_syntax(Language::VisualBasic, outer).to_text(), "App.Core.Outer");
    }

    #[test]
    fn test_type_syntax_uses_keywords() {
        let table = SymbolTable::with_special_types();
        let options = ConversionOptions::default();
        let validator = Validator::new(&table, &options, FileId::new(0));
        let Some(int) = table.special_type(SpecialType::Int32) else {
            panic!("Int32 missing from special types");
        };
        assert_eq!(validator.type_syntax(Language::VisualBasic, int).to_text(), "Integer");
        assert_eq!(validator.type_syntax(Language::CSharp, int).to_text(), "int");
    }

    #[test]
    fn test_cast_keeps_outer_trivia() {
        let table = SymbolTable::with_special_types();
        let options = ConversionOptions::default();
        let validator = Validator::new(&table, &options, FileId::new(0));
        let Some(int) = table.special_type(SpecialType::Int32) else {
            panic!("Int32 missing from special types");
        };
        let expr = cs::binary(cs::name("a"), CsKind::PLUS, cs::name("b"))
            .map_first_token(|t| t.with_leading_trivia(vec![crate::syntax::Trivia::space()]));
        let cast = validator.cast_to(Language::CSharp, expr, None, int);
        assert_eq!(cast.to_text(), " (int)(a + b)");
        assert_eq!(annotations::expression_type_of(&options.annotation_keys, &cast), Some(int));
    }

    #[test]
    fn test_string_to_char_array_calls_to_char_array() {
        let mut table = SymbolTable::with_special_types();
        let (Some(string), Some(chr)) = (table.special_type(SpecialType::String), table.special_type(SpecialType::Char))
        else {
            panic!("special types missing");
        };
        let chars = table.insert_array(chr, 1);
        let options = ConversionOptions::default();
        let validator = Validator::new(&table, &options, FileId::new(0));
        let cast = validator.cast_to(Language::CSharp, cs::name("s"), Some(string), chars);
        assert_eq!(cast.to_text(), "s.ToCharArray()");
    }
}
