//! Names that only differed by case in the source.
//!
//! A case-sensitive source may declare `name` and `Name` side by side; in a
//! case-insensitive target they are the same identifier. Within each
//! declaration scope the first spelling keeps its name and every symbol
//! spelled differently is renamed to `name_N`, at its declaration and at
//! every reference bound to it.
//!
//! A parameter or local spelled like a member of its type up to case hides
//! that member in the target; references to the member inside the local's
//! scope are qualified with `Me.` (or the type name when shared) instead.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::{Validator, located};
use crate::annotations::{self, AnnotationKeys};
use crate::convert::ConversionResult;
use crate::diagnostics::DiagnosticKind;
use crate::semantic::{Symbol, SymbolId, SymbolKind, SymbolTable, follow_base_types};
use crate::syntax::factory::{escape_identifier, unescape_identifier, vb};
use crate::syntax::{CsKind, GreenNode, GreenToken, Language, NodeId, SyntaxKind, SyntaxTree, TokenId, VbKind};

/// A declared name found in a converted tree.
#[derive(Debug, Clone)]
struct Declared {
    token: TokenId,
    symbol: SymbolId,
    text: SmolStr,
}

/// Declarations of a converted tree grouped by the scope they share.
fn declarations_by_scope(keys: &AnnotationKeys, tree: &SyntaxTree) -> IndexMap<NodeId, Vec<Declared>> {
    let mut scopes: IndexMap<NodeId, Vec<Declared>> = IndexMap::new();
    for token in tree.all_tokens() {
        if !tree.token_kind(token).is_identifier() {
            continue;
        }
        let owner = tree.token_parent(token);
        if !is_declaration(tree.kind(owner)) {
            continue;
        }
        let Some(symbol) = annotations::symbol_of(keys, tree.token(token)) else {
            continue;
        };
        let Some(scope) = scope_of(tree, owner) else {
            continue;
        };
        let text = SmolStr::new(unescape_identifier(tree.token_text(token)));
        scopes.entry(scope).or_default().push(Declared { token, symbol, text });
    }
    scopes
}

/// The node whose declarations compete with the one made by `owner`.
fn scope_of(tree: &SyntaxTree, owner: NodeId) -> Option<NodeId> {
    // a block's opening statement names the block in the enclosing scope
    let start = if opens_block(tree.kind(owner)) { tree.parent(owner)? } else { owner };
    tree.ancestors(start).find(|&n| is_scope(tree.kind(n)))
}

fn is_declaration(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Vb(
            VbKind::CLASS_STATEMENT
                | VbKind::STRUCTURE_STATEMENT
                | VbKind::INTERFACE_STATEMENT
                | VbKind::MODULE_STATEMENT
                | VbKind::ENUM_STATEMENT
                | VbKind::ENUM_MEMBER_DECLARATION
                | VbKind::DELEGATE_STATEMENT
                | VbKind::METHOD_STATEMENT
                | VbKind::PROPERTY_STATEMENT
                | VbKind::EVENT_STATEMENT
                | VbKind::MODIFIED_IDENTIFIER
                | VbKind::PARAMETER
                | VbKind::TYPE_PARAMETER
                | VbKind::CATCH_STATEMENT
        ) | SyntaxKind::Cs(
            CsKind::CLASS_DECLARATION
                | CsKind::STRUCT_DECLARATION
                | CsKind::INTERFACE_DECLARATION
                | CsKind::ENUM_DECLARATION
                | CsKind::ENUM_MEMBER_DECLARATION
                | CsKind::DELEGATE_DECLARATION
                | CsKind::METHOD_DECLARATION
                | CsKind::PROPERTY_DECLARATION
                | CsKind::VARIABLE_DECLARATOR
                | CsKind::PARAMETER
                | CsKind::TYPE_PARAMETER
        )
    )
}

fn opens_block(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Vb(
            VbKind::CLASS_STATEMENT
                | VbKind::STRUCTURE_STATEMENT
                | VbKind::INTERFACE_STATEMENT
                | VbKind::MODULE_STATEMENT
                | VbKind::ENUM_STATEMENT
                | VbKind::METHOD_STATEMENT
                | VbKind::PROPERTY_STATEMENT
                | VbKind::DELEGATE_STATEMENT
                | VbKind::EVENT_STATEMENT
        ) | SyntaxKind::Cs(
            CsKind::CLASS_DECLARATION
                | CsKind::STRUCT_DECLARATION
                | CsKind::INTERFACE_DECLARATION
                | CsKind::ENUM_DECLARATION
                | CsKind::METHOD_DECLARATION
                | CsKind::DELEGATE_DECLARATION
        )
    )
}

fn is_scope(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Vb(
            VbKind::COMPILATION_UNIT
                | VbKind::NAMESPACE_BLOCK
                | VbKind::CLASS_BLOCK
                | VbKind::STRUCTURE_BLOCK
                | VbKind::INTERFACE_BLOCK
                | VbKind::MODULE_BLOCK
                | VbKind::ENUM_BLOCK
                | VbKind::METHOD_BLOCK
                | VbKind::CONSTRUCTOR_BLOCK
                | VbKind::PROPERTY_BLOCK
                | VbKind::ACCESSOR_BLOCK
                | VbKind::DELEGATE_STATEMENT
                | VbKind::EVENT_STATEMENT
                | VbKind::SINGLE_LINE_LAMBDA_EXPRESSION
                | VbKind::MULTI_LINE_LAMBDA_EXPRESSION
        ) | SyntaxKind::Cs(
            CsKind::COMPILATION_UNIT
                | CsKind::NAMESPACE_DECLARATION
                | CsKind::CLASS_DECLARATION
                | CsKind::STRUCT_DECLARATION
                | CsKind::INTERFACE_DECLARATION
                | CsKind::ENUM_DECLARATION
                | CsKind::METHOD_DECLARATION
                | CsKind::CONSTRUCTOR_DECLARATION
                | CsKind::PROPERTY_DECLARATION
                | CsKind::DELEGATE_DECLARATION
                | CsKind::PARENTHESIZED_LAMBDA_EXPRESSION
                | CsKind::SIMPLE_LAMBDA_EXPRESSION
        )
    )
}

fn is_type_block(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Vb(VbKind::CLASS_BLOCK | VbKind::STRUCTURE_BLOCK | VbKind::INTERFACE_BLOCK | VbKind::MODULE_BLOCK)
    )
}

fn is_top_level_scope(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Vb(VbKind::COMPILATION_UNIT | VbKind::NAMESPACE_BLOCK)
            | SyntaxKind::Cs(CsKind::COMPILATION_UNIT | CsKind::NAMESPACE_DECLARATION)
    )
}

/// Every identifier spelling in use, folded to lower case.
fn taken_names(tree: &SyntaxTree) -> FxHashSet<String> {
    tree.all_tokens()
        .filter(|&t| tree.token_kind(t).is_identifier())
        .map(|t| unescape_identifier(tree.token_text(t)).to_lowercase())
        .collect()
}

fn fresh_name(base: &str, taken: &mut FxHashSet<String>) -> SmolStr {
    let mut n = 1;
    loop {
        let candidate = format!("{base}_{n}");
        if taken.insert(candidate.to_lowercase()) {
            return SmolStr::new(candidate);
        }
        n += 1;
    }
}

/// Among declarations sharing a name up to case, the symbols whose spelling
/// differs from the first one seen. Each is listed once with its first
/// declaration.
fn clashing<'d>(declared: impl IntoIterator<Item = &'d Declared>) -> Vec<(&'d Declared, SmolStr)> {
    let mut groups: IndexMap<String, Vec<&Declared>> = IndexMap::new();
    for d in declared {
        groups.entry(d.text.to_lowercase()).or_default().push(d);
    }
    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    for group in groups.values() {
        let Some(first) = group.first() else {
            continue;
        };
        for d in group.iter().filter(|d| d.text != first.text && d.symbol != first.symbol) {
            if seen.insert(d.symbol) {
                out.push((*d, first.text.clone()));
            }
        }
    }
    out
}

/// Respell every identifier bound to a renamed symbol.
fn rename_symbols(
    keys: &AnnotationKeys,
    tree: &SyntaxTree,
    renames: &FxHashMap<SymbolId, SmolStr>,
) -> FxHashMap<TokenId, GreenToken> {
    let language = tree.language();
    tree.all_tokens()
        .filter(|&t| tree.token_kind(t).is_identifier())
        .filter_map(|t| {
            let green = tree.token(t);
            let name = renames.get(&annotations::symbol_of(keys, green)?)?;
            Some((t, green.clone().with_text(escape_identifier(language, name))))
        })
        .collect()
}

fn apply_renames(keys: &AnnotationKeys, tree: SyntaxTree, renames: &FxHashMap<SymbolId, SmolStr>) -> SyntaxTree {
    let tokens = rename_symbols(keys, &tree, renames);
    if tokens.is_empty() {
        return tree;
    }
    SyntaxTree::new(tree.rebuild(&FxHashMap::default(), &tokens))
}

/// The symbol a type block declares, read off its opening statement.
fn declared_type(keys: &AnnotationKeys, tree: &SyntaxTree, block: NodeId) -> Option<SymbolId> {
    let statement = tree.child_nodes(block).next()?;
    tree.child_tokens(statement)
        .filter(|&t| tree.token_kind(t).is_identifier())
        .find_map(|t| annotations::symbol_of(keys, tree.token(t)))
}

/// Members of `ty` and its base types that a simple name can reach.
fn reachable_members(table: &SymbolTable, ty: SymbolId) -> Vec<&Symbol> {
    follow_base_types(table, ty)
        .into_iter()
        .flat_map(|id| table.members_of(id))
        .filter_map(|&id| table.get(id))
        .filter(|member| !matches!(member.kind, SymbolKind::Type | SymbolKind::Constructor))
        .collect()
}

/// `node` names something on its own rather than after a `.`.
fn is_unqualified(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.parent(node) {
        Some(parent) if tree.kind(parent) == VbKind::MEMBER_ACCESS_EXPRESSION => {
            tree.child_nodes(parent).next() == Some(node)
        }
        _ => true,
    }
}

/// `qualifier.name`, with the name's leading trivia moved in front.
fn qualify(name: &GreenNode, qualifier: GreenNode) -> GreenNode {
    let leading = name.first_token().map(|t| t.leading().to_vec()).unwrap_or_default();
    let bare = name.map_first_token(|t| t.with_leading_trivia(Vec::new()));
    vb::member_access(qualifier, bare).map_first_token(|t| t.with_leading_trivia(leading))
}

fn collision_message(original: &str, existing: &str, renamed: &str, target: Language) -> String {
    format!("`{original}` collides with `{existing}` in {target}; renamed to `{renamed}`")
}

impl Validator<'_> {
    pub(crate) fn resolve_collisions(&mut self, tree: SyntaxTree) -> SyntaxTree {
        let target = tree.language();
        if target.is_case_sensitive() {
            return tree;
        }
        let scopes = declarations_by_scope(self.keys, &tree);
        let mut taken = taken_names(&tree);
        let mut renames: FxHashMap<SymbolId, SmolStr> = FxHashMap::default();
        for declared in scopes.values() {
            for (d, existing) in clashing(declared) {
                if renames.contains_key(&d.symbol) {
                    continue;
                }
                let renamed = fresh_name(&d.text, &mut taken);
                let message = collision_message(&d.text, &existing, &renamed, target);
                self.report(&tree, tree.token_parent(d.token), DiagnosticKind::NamingCollision, message);
                renames.insert(d.symbol, renamed);
            }
        }
        let tree = if renames.is_empty() {
            tree
        } else {
            tracing::debug!(renamed = renames.len(), "case collisions resolved");
            apply_renames(self.keys, tree, &renames)
        };
        self.qualify_hidden_members(tree, &renames)
    }

    /// Qualify references to members hidden by a parameter or local that
    /// only matches them up to case.
    fn qualify_hidden_members(&mut self, tree: SyntaxTree, renames: &FxHashMap<SymbolId, SmolStr>) -> SyntaxTree {
        let target = tree.language();
        let mut nodes: FxHashMap<NodeId, GreenNode> = FxHashMap::default();
        for (scope, declared) in declarations_by_scope(self.keys, &tree) {
            let Some(ty) = tree.ancestors(scope).find(|&n| is_type_block(tree.kind(n))) else {
                continue;
            };
            let Some(type_symbol) = declared_type(self.keys, &tree, ty) else {
                continue;
            };
            let members = reachable_members(self.table, type_symbol);
            for d in &declared {
                let is_local = self
                    .table
                    .get(d.symbol)
                    .is_some_and(|s| matches!(s.kind, SymbolKind::Parameter | SymbolKind::Local));
                if !is_local {
                    continue;
                }
                let folded = d.text.to_lowercase();
                for member in &members {
                    let spelling = renames.get(&member.id).unwrap_or(&member.name);
                    if member.id == d.symbol || *spelling == d.text || spelling.to_lowercase() != folded {
                        continue;
                    }
                    let references: Vec<NodeId> = tree
                        .tokens_of(scope)
                        .filter(|&t| tree.token_kind(t).is_identifier())
                        .filter(|&t| annotations::symbol_of(self.keys, tree.token(t)) == Some(member.id))
                        .map(|t| tree.token_parent(t))
                        .filter(|&n| tree.kind(n) == VbKind::IDENTIFIER_NAME && is_unqualified(&tree, n))
                        .collect();
                    if references.is_empty() {
                        continue;
                    }
                    let owner = self.table.get(type_symbol).map(|s| s.name.clone()).unwrap_or_default();
                    let (qualifier, label) = if member.is_static {
                        (vb::identifier_name(vb::ident(&escape_identifier(target, &owner))), owner.to_string())
                    } else {
                        (vb::me_expression(), "Me".to_string())
                    };
                    for node in references {
                        nodes.insert(node, qualify(tree.green(node), qualifier.clone()));
                    }
                    let message = format!(
                        "`{}` hides member `{spelling}` in {target}; references to the member qualified with `{label}.`",
                        d.text
                    );
                    self.report(&tree, tree.token_parent(d.token), DiagnosticKind::NamingCollision, message);
                }
            }
        }
        if nodes.is_empty() {
            return tree;
        }
        tracing::debug!(qualified = nodes.len(), "hidden members qualified");
        SyntaxTree::new(tree.rebuild(&nodes, &FxHashMap::default()))
    }
}

/// The collision check over top-level type names of a whole batch.
///
/// Types only meet across units when they share a namespace, so the
/// namespace is part of the comparison. Units are visited in batch order and
/// the first spelling wins.
pub(crate) fn resolve_cross_unit_collisions(
    results: &mut [ConversionResult],
    table: &SymbolTable,
    keys: &AnnotationKeys,
) {
    let mut by_namespace: IndexMap<String, Vec<(usize, Declared)>> = IndexMap::new();
    let mut taken = FxHashSet::default();
    for (index, result) in results.iter().enumerate() {
        let Some(tree) = &result.tree else {
            continue;
        };
        if tree.language().is_case_sensitive() {
            continue;
        }
        taken.extend(taken_names(tree));
        for (scope, declared) in declarations_by_scope(keys, tree) {
            if !is_top_level_scope(tree.kind(scope)) {
                continue;
            }
            for d in declared {
                let namespace = table.namespace_of(d.symbol).unwrap_or_default().to_lowercase();
                by_namespace.entry(namespace).or_default().push((index, d));
            }
        }
    }

    let mut renames: FxHashMap<SymbolId, SmolStr> = FxHashMap::default();
    let mut reports: Vec<(usize, TokenId, String)> = Vec::new();
    for declared in by_namespace.values() {
        let clashes = clashing(declared.iter().map(|(_, d)| d));
        for (d, existing) in clashes {
            if renames.contains_key(&d.symbol) {
                continue;
            }
            let Some((unit, _)) = declared.iter().find(|(_, other)| other.token == d.token && other.symbol == d.symbol)
            else {
                continue;
            };
            let renamed = fresh_name(&d.text, &mut taken);
            reports.push((*unit, d.token, collision_message(&d.text, &existing, &renamed, Language::VisualBasic)));
            renames.insert(d.symbol, renamed);
        }
    }
    if renames.is_empty() {
        return;
    }
    tracing::debug!(renamed = renames.len(), "cross-unit collisions resolved");

    for (index, result) in results.iter_mut().enumerate() {
        let Some(tree) = result.tree.take() else {
            continue;
        };
        for (_, token, message) in reports.iter().filter(|(unit, _, _)| *unit == index) {
            let owner = tree.token_parent(*token);
            result.diagnostics.push(located(keys, &tree, owner, result.file, DiagnosticKind::NamingCollision, message.clone()));
        }
        result.tree = Some(apply_renames(keys, tree, &renames));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::convert::ConversionOptions;
    use crate::semantic::{Symbol, SymbolKind, TypeInfo, TypeKind};
    use crate::syntax::factory::{Header, vb};
    use crate::syntax::GreenNode;

    fn field(keys: &AnnotationKeys, name: &str, symbol: SymbolId) -> GreenNode {
        let ident = annotations::with_symbol(keys, vb::ident(name), symbol);
        vb::field_declaration(
            Header::with_modifiers([VbKind::PRIVATE_KW]),
            vec![vb::variable_declarator(vec![ident], Some(vb::simple_as_clause(vb::predefined_type(VbKind::INTEGER_KW))), None)],
        )
    }

    fn reference(keys: &AnnotationKeys, name: &str, symbol: SymbolId) -> GreenNode {
        let ident = annotations::with_symbol(keys, vb::ident(name), symbol);
        vb::expression_statement(vb::identifier_name(ident))
    }

    #[test]
    fn test_fields_differing_by_case_are_renamed() {
        let mut table = SymbolTable::with_special_types();
        let class = table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
        let lower = table.insert(Symbol::new("value", SymbolKind::Field).in_type(class));
        let upper = table.insert(Symbol::new("Value", SymbolKind::Field).in_type(class));
        let options = ConversionOptions::default();
        let keys = &options.annotation_keys;

        let method = vb::method_block(
            vb::method_statement(Header::default(), vb::ident("M"), None, vb::parameter_list(vec![]), None),
            vec![reference(keys, "Value", upper), reference(keys, "value", lower)],
        );
        let class_block = vb::type_block(
            VbKind::CLASS_KW,
            Header::default(),
            vb::ident("C"),
            None,
            vec![],
            vec![],
            vec![field(keys, "value", lower), field(keys, "Value", upper), method],
        );
        let tree = SyntaxTree::new(vb::compilation_unit(vec![class_block]));

        let mut validator = Validator::new(&table, &options, FileId::new(0));
        let renamed = validator.resolve_collisions(tree);
        let text = renamed.text();
        assert_eq!(text.matches("Value_1").count(), 2);
        assert_eq!(text.matches("value").count(), 2);
        assert_eq!(validator.diagnostics.len(), 1);
        assert_eq!(validator.diagnostics[0].kind, DiagnosticKind::NamingCollision);
    }

    #[test]
    fn test_parameter_hiding_shared_member_qualifies_with_type() {
        let mut table = SymbolTable::with_special_types();
        let class = table.insert(Symbol::type_symbol("Counter", TypeInfo::new(TypeKind::Class)));
        let total = table.insert(Symbol::new("Total", SymbolKind::Field).in_type(class).shared());
        let method = table.insert(Symbol::new("Add", SymbolKind::Method).in_type(class));
        let param = table.add_parameter(method, Symbol::new("total", SymbolKind::Parameter));
        let options = ConversionOptions::default();
        let keys = &options.annotation_keys;

        let parameter = vb::parameter(
            Header::default(),
            annotations::with_symbol(keys, vb::ident("total"), param),
            Some(vb::predefined_type(VbKind::INTEGER_KW)),
            None,
        );
        let statement = vb::method_statement(
            Header::default(),
            annotations::with_symbol(keys, vb::ident("Add"), method),
            None,
            vb::parameter_list(vec![parameter]),
            None,
        );
        let body = vb::assignment_statement(
            vb::identifier_name(annotations::with_symbol(keys, vb::ident("Total"), total)),
            VbKind::PLUS_EQ,
            vb::identifier_name(annotations::with_symbol(keys, vb::ident("total"), param)),
        );
        let class_block = vb::type_block(
            VbKind::CLASS_KW,
            Header::default(),
            annotations::with_symbol(keys, vb::ident("Counter"), class),
            None,
            vec![],
            vec![],
            vec![field(keys, "Total", total), vb::method_block(statement, vec![body])],
        );
        let tree = SyntaxTree::new(vb::compilation_unit(vec![class_block]));

        let mut validator = Validator::new(&table, &options, FileId::new(0));
        let qualified = validator.resolve_collisions(tree);
        assert!(qualified.text().contains("Counter.Total += total"));
        assert_eq!(validator.diagnostics.len(), 1);
        assert_eq!(validator.diagnostics[0].kind, DiagnosticKind::NamingCollision);
    }

    #[test]
    fn test_same_symbol_in_two_places_is_not_a_collision() {
        let declared = [
            Declared { token: TokenId::from_index(0), symbol: SymbolId(4), text: "Part".into() },
            Declared { token: TokenId::from_index(9), symbol: SymbolId(4), text: "Part".into() },
        ];
        assert!(clashing(&declared).is_empty());
    }

    #[test]
    fn test_fresh_names_skip_taken_ones() {
        let mut taken: FxHashSet<String> = ["name_1".to_string()].into_iter().collect();
        assert_eq!(fresh_name("Name", &mut taken), "Name_2");
        assert_eq!(fresh_name("Name", &mut taken), "Name_3");
    }
}
