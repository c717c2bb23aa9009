//! Arena-allocated syntax tree.
//!
//! A [`SyntaxTree`] flattens a green root into two arenas, one for nodes and
//! one for tokens, with parent indices and absolute ranges. Node and token
//! ids are plain indices; token ids follow document order, so the next or
//! previous token is an index step. Nothing here references a compilation
//! or any mutable state: ancestor queries walk parent indices.

use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

use super::green::{GreenElement, GreenNode, GreenToken};
use super::{Language, SyntaxKind};
use crate::base::LineIndex;

// ============================================================================
// IDS
// ============================================================================

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Index of a token in a [`SyntaxTree`]. Ordered by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_index(index: usize) -> Self {
        TokenId(index as u32)
    }
}

/// A child of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Node(NodeId),
    Token(TokenId),
}

impl ElementId {
    pub fn as_node(self) -> Option<NodeId> {
        match self {
            ElementId::Node(id) => Some(id),
            ElementId::Token(_) => None,
        }
    }

    pub fn as_token(self) -> Option<TokenId> {
        match self {
            ElementId::Token(id) => Some(id),
            ElementId::Node(_) => None,
        }
    }
}

// ============================================================================
// ARENA ENTRIES
// ============================================================================

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    parent: Option<NodeId>,
    children: Vec<ElementId>,
    full_range: TextRange,
    green: GreenNode,
}

#[derive(Debug, Clone)]
struct TokenData {
    parent: NodeId,
    range: TextRange,
    full_range: TextRange,
    green: GreenToken,
}

// ============================================================================
// TREE
// ============================================================================

/// An immutable tree with positions, parents and a line index.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    language: Language,
    text: String,
    line_index: LineIndex,
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
}

impl SyntaxTree {
    /// Build the arena for `root`. The tree's language is the root's.
    pub fn new(root: GreenNode) -> Self {
        let language = root.kind().language();
        let text = root.to_text();
        let line_index = LineIndex::new(&text);
        let mut tree = SyntaxTree { language, text, line_index, nodes: Vec::new(), tokens: Vec::new() };
        tree.push_node(&root, None, TextSize::from(0));
        tree
    }

    fn push_node(&mut self, green: &GreenNode, parent: Option<NodeId>, start: TextSize) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData {
            kind: green.kind(),
            parent,
            children: Vec::with_capacity(green.children().len()),
            full_range: TextRange::at(start, green.full_width()),
            green: green.clone(),
        });

        let mut offset = start;
        let mut children = Vec::with_capacity(green.children().len());
        for child in green.children() {
            match child {
                GreenElement::Node(n) => {
                    children.push(ElementId::Node(self.push_node(n, Some(id), offset)));
                }
                GreenElement::Token(t) => {
                    let token_id = TokenId::from_index(self.tokens.len());
                    let text_start = offset + t.leading_width();
                    self.tokens.push(TokenData {
                        parent: id,
                        range: TextRange::at(text_start, t.width()),
                        full_range: TextRange::at(offset, t.full_width()),
                        green: t.clone(),
                    });
                    children.push(ElementId::Token(token_id));
                }
            }
            offset += child.full_width();
        }
        self.nodes[id.index()].children = children;
        id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Lossless source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_green(&self) -> &GreenNode {
        &self.nodes[0].green
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn contains_token(&self, id: TokenId) -> bool {
        id.index() < self.tokens.len()
    }

    // ------------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------------

    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.nodes[node.index()].kind
    }

    pub fn green(&self, node: NodeId) -> &GreenNode {
        &self.nodes[node.index()].green
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn children(&self, node: NodeId) -> &[ElementId] {
        &self.nodes[node.index()].children
    }

    pub fn child_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).iter().filter_map(|c| c.as_node())
    }

    pub fn child_tokens(&self, node: NodeId) -> impl Iterator<Item = TokenId> + '_ {
        self.children(node).iter().filter_map(|c| c.as_token())
    }

    /// First child node of `kind`.
    pub fn child_node_of_kind(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> Option<NodeId> {
        let kind = kind.into();
        self.child_nodes(node).find(|&c| self.kind(c) == kind)
    }

    /// First child token of `kind`.
    pub fn child_token_of_kind(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> Option<TokenId> {
        let kind = kind.into();
        self.child_tokens(node).find(|&t| self.token_kind(t) == kind)
    }

    /// Parent chain of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Preorder walk of `node` and every node below it.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            let children: Vec<NodeId> = self.child_nodes(current).collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub fn first_token(&self, node: NodeId) -> Option<TokenId> {
        self.children(node).iter().find_map(|child| match *child {
            ElementId::Token(t) => Some(t),
            ElementId::Node(n) => self.first_token(n),
        })
    }

    pub fn last_token(&self, node: NodeId) -> Option<TokenId> {
        self.children(node).iter().rev().find_map(|child| match *child {
            ElementId::Token(t) => Some(t),
            ElementId::Node(n) => self.last_token(n),
        })
    }

    /// Token ids covered by `node`, in order.
    pub fn tokens_of(&self, node: NodeId) -> impl Iterator<Item = TokenId> + use<> {
        let range = match (self.first_token(node), self.last_token(node)) {
            (Some(first), Some(last)) => first.0..last.0 + 1,
            _ => 0..0,
        };
        range.map(TokenId)
    }

    /// Range including the trivia of the outer tokens.
    pub fn node_full_range(&self, node: NodeId) -> TextRange {
        self.nodes[node.index()].full_range
    }

    /// Range from the first token's text to the last token's text.
    pub fn node_range(&self, node: NodeId) -> TextRange {
        match (self.first_token(node), self.last_token(node)) {
            (Some(first), Some(last)) => {
                TextRange::new(self.token_range(first).start(), self.token_range(last).end())
            }
            _ => TextRange::empty(self.node_full_range(node).start()),
        }
    }

    /// Source text of `node` without its outer trivia.
    pub fn node_text(&self, node: NodeId) -> &str {
        &self.text[self.node_range(node)]
    }

    /// Zero-based first and last line of `node`'s text.
    pub fn line_span(&self, node: NodeId) -> (u32, u32) {
        let range = self.node_range(node);
        (self.line_index.line_of(range.start()), self.line_index.line_of(range.end()))
    }

    // ------------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------------

    pub fn token(&self, token: TokenId) -> &GreenToken {
        &self.tokens[token.index()].green
    }

    pub fn token_kind(&self, token: TokenId) -> SyntaxKind {
        self.token(token).kind()
    }

    pub fn token_text(&self, token: TokenId) -> &str {
        self.token(token).text()
    }

    pub fn token_parent(&self, token: TokenId) -> NodeId {
        self.tokens[token.index()].parent
    }

    pub fn token_range(&self, token: TokenId) -> TextRange {
        self.tokens[token.index()].range
    }

    pub fn token_full_range(&self, token: TokenId) -> TextRange {
        self.tokens[token.index()].full_range
    }

    pub fn token_line(&self, token: TokenId) -> u32 {
        self.line_index.line_of(self.token_range(token).start())
    }

    pub fn all_tokens(&self) -> impl Iterator<Item = TokenId> + use<> {
        (0..self.tokens.len() as u32).map(TokenId)
    }

    /// The token whose text range contains `offset`, preferring the later one
    /// at a boundary.
    pub fn token_at_offset(&self, offset: TextSize) -> Option<TokenId> {
        let index = self.tokens.partition_point(|t| t.full_range.end() <= offset);
        (index < self.tokens.len()).then(|| TokenId::from_index(index))
    }

    // ------------------------------------------------------------------------
    // Rewriting
    // ------------------------------------------------------------------------

    /// Rebuild the green root with some nodes and tokens replaced.
    ///
    /// Replacements are looked up top-down; a replaced node's subtree is not
    /// searched further.
    pub fn rebuild(
        &self,
        nodes: &FxHashMap<NodeId, GreenNode>,
        tokens: &FxHashMap<TokenId, GreenToken>,
    ) -> GreenNode {
        self.rebuild_node(self.root(), nodes, tokens)
    }

    /// Like [`SyntaxTree::rebuild`], limited to the subtree under `node`.
    pub fn rebuild_subtree(
        &self,
        node: NodeId,
        nodes: &FxHashMap<NodeId, GreenNode>,
        tokens: &FxHashMap<TokenId, GreenToken>,
    ) -> GreenNode {
        self.rebuild_node(node, nodes, tokens)
    }

    fn rebuild_node(
        &self,
        node: NodeId,
        nodes: &FxHashMap<NodeId, GreenNode>,
        tokens: &FxHashMap<TokenId, GreenToken>,
    ) -> GreenNode {
        if let Some(replacement) = nodes.get(&node) {
            return replacement.clone();
        }
        let touches = self
            .descendants(node)
            .iter()
            .any(|d| nodes.contains_key(d) && *d != node)
            || self.tokens_of(node).any(|t| tokens.contains_key(&t));
        if !touches {
            return self.green(node).clone();
        }
        let children = self
            .children(node)
            .iter()
            .map(|child| match *child {
                ElementId::Node(n) => GreenElement::Node(self.rebuild_node(n, nodes, tokens)),
                ElementId::Token(t) => GreenElement::Token(
                    tokens.get(&t).cloned().unwrap_or_else(|| self.token(t).clone()),
                ),
            })
            .collect();
        self.green(node).with_children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::green::Trivia;
    use crate::syntax::CsKind;

    fn tok(kind: CsKind, text: &str) -> GreenElement {
        GreenToken::new(kind, text).into()
    }

    fn name(text: &str) -> GreenElement {
        GreenNode::new(CsKind::IDENTIFIER_NAME, [tok(CsKind::IDENT, text)]).into()
    }

    fn sample() -> SyntaxTree {
        // a = b;\n
        let assign = GreenNode::new(
            CsKind::ASSIGNMENT_EXPRESSION,
            [
                name("a"),
                GreenToken::fixed(CsKind::EQ)
                    .with_trivia(vec![Trivia::space()], vec![Trivia::space()])
                    .into(),
                name("b"),
            ],
        );
        let stmt = GreenNode::new(
            CsKind::EXPRESSION_STATEMENT,
            [
                assign.into(),
                GreenToken::fixed(CsKind::SEMICOLON)
                    .with_trailing_trivia(vec![Trivia::end_of_line()])
                    .into(),
            ],
        );
        let root = GreenNode::new(
            CsKind::COMPILATION_UNIT,
            [stmt.into(), GreenToken::missing(CsKind::EOF_TOKEN).into()],
        );
        SyntaxTree::new(root)
    }

    #[test]
    fn text_is_lossless() {
        let tree = sample();
        assert_eq!(tree.text(), "a = b;\n");
        assert_eq!(tree.language(), Language::CSharp);
        assert_eq!(tree.token_count(), 5);
    }

    #[test]
    fn ranges_exclude_outer_trivia() {
        let tree = sample();
        let eq = TokenId::from_index(1);
        assert_eq!(tree.token_text(eq), "=");
        assert_eq!(tree.token_range(eq), TextRange::new(2.into(), 3.into()));
        assert_eq!(tree.token_full_range(eq), TextRange::new(1.into(), 4.into()));

        let stmt = tree.child_nodes(tree.root()).next().unwrap();
        assert_eq!(tree.node_text(stmt), "a = b;");
        assert_eq!(tree.line_span(stmt), (0, 0));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let tree = sample();
        let b = TokenId::from_index(2);
        let parent = tree.token_parent(b);
        let kinds: Vec<_> = std::iter::once(parent)
            .chain(tree.ancestors(parent))
            .map(|n| tree.kind(n))
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::Cs(CsKind::IDENTIFIER_NAME),
                SyntaxKind::Cs(CsKind::ASSIGNMENT_EXPRESSION),
                SyntaxKind::Cs(CsKind::EXPRESSION_STATEMENT),
                SyntaxKind::Cs(CsKind::COMPILATION_UNIT),
            ]
        );
    }

    #[test]
    fn rebuild_replaces_tokens() {
        let tree = sample();
        let mut tokens = FxHashMap::default();
        tokens.insert(TokenId::from_index(2), GreenToken::new(CsKind::IDENT, "c"));
        let root = tree.rebuild(&FxHashMap::default(), &tokens);
        assert_eq!(root.to_text(), "a = c;\n");
    }

    #[test]
    fn token_at_offset_finds_enclosing_token() {
        let tree = sample();
        assert_eq!(tree.token_at_offset(0.into()), Some(TokenId::from_index(0)));
        assert_eq!(tree.token_at_offset(4.into()), Some(TokenId::from_index(2)));
        assert_eq!(tree.token_at_offset(100.into()), None);
    }
}
