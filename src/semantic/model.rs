//! Per-tree bindings from syntax nodes to symbols.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::symbol_table::{Symbol, SymbolId, SymbolTable};
use crate::syntax::{CsKind, Language, NodeId, SyntaxKind, SyntaxTree, VbKind};

/// Inconsistencies between a model and the tree it is used with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("semantic model is for {model} but the tree is {tree}")]
    LanguageMismatch { model: Language, tree: Language },
    #[error("semantic model was built for a different tree")]
    TreeMismatch,
    #[error("node {0} is bound but not part of the tree")]
    UnknownNode(usize),
    #[error("node {node} is bound to {symbol}, which is not in the symbol table")]
    UnknownSymbol { node: usize, symbol: SymbolId },
}

/// Shape of the tree a model was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TreeFingerprint {
    nodes: usize,
    tokens: usize,
    text_len: usize,
}

impl TreeFingerprint {
    fn of(tree: &SyntaxTree) -> Self {
        Self { nodes: tree.node_count(), tokens: tree.token_count(), text_len: tree.text().len() }
    }
}

/// Bound semantic information for one syntax tree.
///
/// Supplied by the front-end alongside the tree. Nodes are identified by
/// their arena index, so a model is only meaningful for the exact tree it
/// was built for; [`SemanticModel::check_consistency`] verifies that.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    table: Arc<SymbolTable>,
    language: Language,
    fingerprint: TreeFingerprint,
    /// Symbol referenced by a name or member access
    symbols: FxHashMap<NodeId, SymbolId>,
    /// Type of an expression
    types: FxHashMap<NodeId, SymbolId>,
    /// Symbol introduced by a declaration
    declared: FxHashMap<NodeId, SymbolId>,
}

impl SemanticModel {
    pub fn new(tree: &SyntaxTree, table: Arc<SymbolTable>) -> Self {
        Self {
            table,
            language: tree.language(),
            fingerprint: TreeFingerprint::of(tree),
            symbols: FxHashMap::default(),
            types: FxHashMap::default(),
            declared: FxHashMap::default(),
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn shared_table(&self) -> Arc<SymbolTable> {
        Arc::clone(&self.table)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    // ------------------------------------------------------------------------
    // Binding (front-end side)
    // ------------------------------------------------------------------------

    pub fn bind_symbol(&mut self, node: NodeId, symbol: SymbolId) -> &mut Self {
        self.symbols.insert(node, symbol);
        self
    }

    pub fn bind_type(&mut self, node: NodeId, ty: SymbolId) -> &mut Self {
        self.types.insert(node, ty);
        self
    }

    pub fn bind_declared(&mut self, node: NodeId, symbol: SymbolId) -> &mut Self {
        self.declared.insert(node, symbol);
        self
    }

    /// Bind every simple name spelled `name` to `symbol`, and type it with
    /// the symbol's declared type. Returns the number of names bound.
    pub fn bind_references(&mut self, tree: &SyntaxTree, name: &str, symbol: SymbolId) -> usize {
        let ty = self.table.get(symbol).and_then(|s| s.ty);
        let targets: Vec<NodeId> = tree
            .descendants(tree.root())
            .into_iter()
            .filter(|&node| is_simple_name(tree.kind(node)) && self.language.names_equal(tree.node_text(node), name))
            .collect();
        for &node in &targets {
            self.symbols.insert(node, symbol);
            if let Some(ty) = ty {
                self.types.insert(node, ty);
            }
        }
        targets.len()
    }

    /// Bind every declaration whose own identifier is spelled `name`.
    /// Returns the number of declarations bound.
    pub fn bind_declarations(&mut self, tree: &SyntaxTree, name: &str, symbol: SymbolId) -> usize {
        let targets: Vec<NodeId> = tree
            .descendants(tree.root())
            .into_iter()
            .filter(|&node| {
                let identifier = match tree.kind(node) {
                    SyntaxKind::Cs(_) => tree.child_token_of_kind(node, CsKind::IDENT),
                    SyntaxKind::Vb(_) => tree.child_token_of_kind(node, VbKind::IDENT),
                };
                is_declaration(tree.kind(node))
                    && identifier.is_some_and(|ident| self.language.names_equal(tree.token_text(ident), name))
            })
            .collect();
        for &node in &targets {
            self.declared.insert(node, symbol);
        }
        targets.len()
    }

    // ------------------------------------------------------------------------
    // Queries (converter side)
    // ------------------------------------------------------------------------

    pub fn symbol_info(&self, node: NodeId) -> Option<SymbolId> {
        self.symbols.get(&node).copied()
    }

    pub fn type_info(&self, node: NodeId) -> Option<SymbolId> {
        self.types.get(&node).copied()
    }

    pub fn declared_symbol(&self, node: NodeId) -> Option<SymbolId> {
        self.declared.get(&node).copied()
    }

    pub fn symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.symbol_info(node).and_then(|id| self.table.get(id))
    }

    pub fn type_symbol(&self, node: NodeId) -> Option<&Symbol> {
        self.type_info(node).and_then(|id| self.table.get(id))
    }

    /// Verify this model belongs to `tree` and refers only to known nodes
    /// and symbols.
    pub fn check_consistency(&self, tree: &SyntaxTree) -> Result<(), ModelError> {
        if self.language != tree.language() {
            return Err(ModelError::LanguageMismatch { model: self.language, tree: tree.language() });
        }
        if self.fingerprint != TreeFingerprint::of(tree) {
            return Err(ModelError::TreeMismatch);
        }
        // sorted so the first reported problem does not depend on hash order
        let mut bindings: Vec<(NodeId, SymbolId)> = self
            .symbols
            .iter()
            .chain(&self.types)
            .chain(&self.declared)
            .map(|(node, symbol)| (*node, *symbol))
            .collect();
        bindings.sort();
        for (node, symbol) in bindings {
            if !tree.contains_node(node) {
                return Err(ModelError::UnknownNode(node.index()));
            }
            if !self.table.contains(symbol) {
                return Err(ModelError::UnknownSymbol { node: node.index(), symbol });
            }
        }
        Ok(())
    }
}

fn is_simple_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Cs(CsKind::IDENTIFIER_NAME | CsKind::GENERIC_NAME)
            | SyntaxKind::Vb(VbKind::IDENTIFIER_NAME | VbKind::GENERIC_NAME)
    )
}

fn is_declaration(kind: SyntaxKind) -> bool {
    match kind {
        SyntaxKind::Cs(k) => matches!(
            k,
            CsKind::CLASS_DECLARATION
                | CsKind::STRUCT_DECLARATION
                | CsKind::INTERFACE_DECLARATION
                | CsKind::ENUM_DECLARATION
                | CsKind::ENUM_MEMBER_DECLARATION
                | CsKind::DELEGATE_DECLARATION
                | CsKind::METHOD_DECLARATION
                | CsKind::CONSTRUCTOR_DECLARATION
                | CsKind::PROPERTY_DECLARATION
                | CsKind::VARIABLE_DECLARATOR
                | CsKind::PARAMETER
                | CsKind::TYPE_PARAMETER
                | CsKind::CATCH_DECLARATION
                | CsKind::FOR_EACH_STATEMENT
        ),
        SyntaxKind::Vb(k) => matches!(
            k,
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
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbol_table::{Symbol, SymbolKind, TypeInfo, TypeKind};
    use crate::syntax::factory::cs;
    use crate::syntax::factory::opaque;

    fn tree_and_table() -> (SyntaxTree, Arc<SymbolTable>, SymbolId) {
        let tree = SyntaxTree::new(cs::compilation_unit(vec![opaque(CsKind::EXPRESSION_STATEMENT, "x = x + y;")]));
        let mut table = SymbolTable::with_special_types();
        let class = table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
        let x = table.insert(Symbol::new("x", SymbolKind::Field).in_type(class));
        (tree, Arc::new(table), x)
    }

    #[test]
    fn test_bind_and_query() {
        let (tree, table, x) = tree_and_table();
        let mut model = SemanticModel::new(&tree, table);
        let root = tree.root();
        model.bind_symbol(root, x).bind_type(root, x);
        assert_eq!(model.symbol_info(root), Some(x));
        assert_eq!(model.symbol(root).map(|s| s.name.as_str()), Some("x"));
        assert_eq!(model.declared_symbol(root), None);
        assert!(model.check_consistency(&tree).is_ok());
    }

    #[test]
    fn test_model_for_other_tree_is_rejected() {
        let (tree, table, _) = tree_and_table();
        let model = SemanticModel::new(&tree, table);
        let other = SyntaxTree::new(cs::compilation_unit(vec![opaque(CsKind::EXPRESSION_STATEMENT, "y();")]));
        assert_eq!(model.check_consistency(&other), Err(ModelError::TreeMismatch));
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let (tree, table, _) = tree_and_table();
        let mut model = SemanticModel::new(&tree, table);
        model.bind_symbol(tree.root(), SymbolId(9999));
        assert!(matches!(model.check_consistency(&tree), Err(ModelError::UnknownSymbol { .. })));
    }
}
