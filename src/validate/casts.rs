//! Conversions the source performed silently and the target will not.
//!
//! Assignments, variable initialisers and call arguments are checked against
//! the target's implicit conversions. Where the value's type does not convert
//! implicitly to the destination type, the value is wrapped in an explicit
//! conversion: `CType(e, T)` in Visual Basic and `(T)e` in C#. A string
//! going into a `Char` array becomes `e.ToCharArray()` instead.

use super::{Validator, callee_name, invocation_parts, is_invocation, rewrite_nested};
use crate::annotations;
use crate::diagnostics::DiagnosticKind;
use crate::semantic::{SymbolId, SymbolKind, is_implicit_conversion};
use crate::syntax::{CsKind, NodeId, SyntaxKind, SyntaxTree, VbKind};

impl Validator<'_> {
    pub(crate) fn insert_missing_casts(&mut self, tree: SyntaxTree) -> SyntaxTree {
        let target = tree.language();
        let table = self.table;
        let mut casts: Vec<(NodeId, (Option<SymbolId>, SymbolId))> = Vec::new();

        for node in tree.descendants(tree.root()) {
            for (value, destination) in self.conversion_sites(&tree, node) {
                let Some(from) = self.expression_type(&tree, value) else {
                    continue;
                };
                if is_implicit_conversion(table, from, destination, target, self.option_strict) {
                    continue;
                }
                let message = format!(
                    "no implicit conversion from `{}` to `{}` in {target}; made explicit",
                    self.display_type(from),
                    self.display_type(destination)
                );
                self.report(&tree, value, DiagnosticKind::MissingCast, message);
                casts.push((value, (Some(from), destination)));
            }
        }

        if !casts.is_empty() {
            tracing::debug!(casts = casts.len(), "explicit conversions inserted");
        }
        rewrite_nested(tree, casts, |green, &(from, to)| self.cast_to(target, green, from, to))
    }

    /// Value expressions under `node` paired with the type they must convert to.
    fn conversion_sites(&self, tree: &SyntaxTree, node: NodeId) -> Vec<(NodeId, SymbolId)> {
        match tree.kind(node) {
            SyntaxKind::Cs(CsKind::ASSIGNMENT_EXPRESSION) | SyntaxKind::Vb(VbKind::ASSIGNMENT_STATEMENT) => {
                let is_plain = tree
                    .child_tokens(node)
                    .any(|t| matches!(tree.token_kind(t), SyntaxKind::Cs(CsKind::EQ) | SyntaxKind::Vb(VbKind::EQ)));
                let mut sides = tree.child_nodes(node);
                let (Some(left), Some(right)) = (sides.next(), sides.next()) else {
                    return Vec::new();
                };
                match self.expression_type(tree, left) {
                    Some(ty) if is_plain => vec![(right, ty)],
                    _ => Vec::new(),
                }
            }
            SyntaxKind::Cs(CsKind::VARIABLE_DECLARATOR) => {
                let declared = tree
                    .child_tokens(node)
                    .find_map(|t| annotations::symbol_of(self.keys, tree.token(t)))
                    .and_then(|symbol| self.table.get(symbol))
                    .and_then(|symbol| symbol.ty);
                let value = tree
                    .child_nodes(node)
                    .find(|&n| tree.kind(n) == CsKind::EQUALS_VALUE_CLAUSE)
                    .and_then(|clause| tree.child_nodes(clause).next());
                match (value, declared) {
                    (Some(value), Some(ty)) => vec![(value, ty)],
                    _ => Vec::new(),
                }
            }
            SyntaxKind::Vb(VbKind::VARIABLE_DECLARATOR) => {
                let names: Vec<NodeId> =
                    tree.child_nodes(node).filter(|&n| tree.kind(n) == VbKind::MODIFIED_IDENTIFIER).collect();
                let [name] = names.as_slice() else {
                    return Vec::new();
                };
                let declared = self
                    .symbol_at(tree, *name)
                    .and_then(|symbol| self.table.get(symbol))
                    .and_then(|symbol| symbol.ty);
                let value = tree
                    .child_nodes(node)
                    .find(|&n| tree.kind(n) == VbKind::EQUALS_VALUE)
                    .and_then(|clause| tree.child_nodes(clause).next());
                match (value, declared) {
                    (Some(value), Some(ty)) => vec![(value, ty)],
                    _ => Vec::new(),
                }
            }
            kind if is_invocation(kind) => {
                let Some((callee, args)) = invocation_parts(tree, node) else {
                    return Vec::new();
                };
                let method = self
                    .symbol_at(tree, callee_name(tree, callee))
                    .or_else(|| self.symbol_at(tree, callee))
                    .filter(|&m| self.table.get(m).is_some_and(|s| s.kind == SymbolKind::Method));
                let Some(method) = method else {
                    return Vec::new();
                };
                args.into_iter()
                    .zip(self.table.parameters(method))
                    .filter_map(|(arg, parameter)| Some((arg, parameter.ty?)))
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}
