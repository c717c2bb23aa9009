//! Constructors for well-formed green nodes.
//!
//! [`cs`] and [`vb`] build exactly the node shapes documented on
//! [`crate::syntax::CsKind`] and [`crate::syntax::VbKind`], with elastic
//! layout: keywords and operators get single spaces, statements end their
//! line. Indentation is never invented; the converter carries it over from
//! the source.

pub mod cs;
pub mod vb;

use super::green::{GreenElement, GreenNode, GreenToken, Trivia, TriviaKind};
use super::lexer;
use super::{Language, SyntaxKind};

/// A canonical token without trivia.
pub fn token(kind: impl Into<SyntaxKind>) -> GreenToken {
    GreenToken::fixed(kind)
}

/// A canonical token followed by one space.
pub fn token_sp(kind: impl Into<SyntaxKind>) -> GreenToken {
    GreenToken::fixed(kind).with_trailing_trivia(vec![Trivia::space()])
}

/// A canonical token surrounded by spaces, for binary operators.
pub fn sp_token_sp(kind: impl Into<SyntaxKind>) -> GreenToken {
    GreenToken::fixed(kind).with_trivia(vec![Trivia::space()], vec![Trivia::space()])
}

/// A canonical token followed by a line break.
pub fn token_eol(kind: impl Into<SyntaxKind>) -> GreenToken {
    GreenToken::fixed(kind).with_trailing_trivia(vec![Trivia::end_of_line()])
}

fn ends_with_layout(token: &GreenToken) -> bool {
    token.trailing().last().is_some_and(|t| t.kind.is_layout())
}

/// Ensure the node's last token is followed by whitespace.
pub fn space_after(node: GreenNode) -> GreenNode {
    node.map_last_token(|t| {
        if ends_with_layout(&t) {
            t
        } else {
            t.with_appended_trailing_trivia([Trivia::space()])
        }
    })
}

pub fn token_space_after(token: GreenToken) -> GreenToken {
    if ends_with_layout(&token) {
        token
    } else {
        token.with_appended_trailing_trivia([Trivia::space()])
    }
}

/// Ensure the node ends its line. Trailing spaces before the break are dropped.
pub fn end_line(node: GreenNode) -> GreenNode {
    node.map_last_token(token_end_line)
}

pub fn token_end_line(token: GreenToken) -> GreenToken {
    if token.trailing().iter().any(|t| t.kind == TriviaKind::EndOfLine) {
        return token;
    }
    let mut trailing = token.trailing().to_vec();
    while trailing.last().is_some_and(|t| t.kind == TriviaKind::Whitespace) {
        trailing.pop();
    }
    trailing.push(Trivia::end_of_line());
    token.with_trailing_trivia(trailing)
}

/// Remove trailing whitespace (not line breaks or comments) from the node's last token.
pub fn trim_end(node: GreenNode) -> GreenNode {
    node.map_last_token(|t| {
        let mut trailing = t.trailing().to_vec();
        while trailing.last().is_some_and(|t| t.kind == TriviaKind::Whitespace) {
            trailing.pop();
        }
        t.with_trailing_trivia(trailing)
    })
}

/// A node of `kind` holding the tokens of `text`, lexed in `kind`'s language.
///
/// Used for constructs that are carried through unchanged or reported as
/// unsupported, where only the tokens matter.
pub fn opaque(kind: impl Into<SyntaxKind>, text: &str) -> GreenNode {
    let kind = kind.into();
    let mut tokens = lexer::tokenize(kind.language(), text);
    let eof = tokens.pop();
    let mut children: Vec<GreenElement> = tokens.into_iter().map(GreenElement::Token).collect();
    // Trivia after the last token stays with the node.
    if let Some(eof) = eof.filter(|e| !e.leading().is_empty()) {
        match children.last_mut() {
            Some(GreenElement::Token(last)) => {
                *last = last.clone().with_appended_trailing_trivia(eof.leading().iter().cloned());
            }
            _ => children.push(GreenElement::Token(eof)),
        }
    }
    GreenNode::new(kind, children)
}

/// Ordered child list for a node under construction.
#[derive(Default)]
pub(crate) struct Children(Vec<GreenElement>);

impl Children {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn token(mut self, token: GreenToken) -> Self {
        self.0.push(GreenElement::Token(token));
        self
    }

    pub(crate) fn opt_token(self, token: Option<GreenToken>) -> Self {
        match token {
            Some(t) => self.token(t),
            None => self,
        }
    }

    pub(crate) fn tokens(mut self, tokens: impl IntoIterator<Item = GreenToken>) -> Self {
        self.0.extend(tokens.into_iter().map(GreenElement::Token));
        self
    }

    pub(crate) fn node(mut self, node: GreenNode) -> Self {
        self.0.push(GreenElement::Node(node));
        self
    }

    pub(crate) fn opt_node(self, node: Option<GreenNode>) -> Self {
        match node {
            Some(n) => self.node(n),
            None => self,
        }
    }

    pub(crate) fn nodes(mut self, nodes: impl IntoIterator<Item = GreenNode>) -> Self {
        self.0.extend(nodes.into_iter().map(GreenElement::Node));
        self
    }

    /// Nodes joined by `separator` tokens (each followed by a space).
    pub(crate) fn separated(
        mut self,
        nodes: impl IntoIterator<Item = GreenNode>,
        separator: impl Into<SyntaxKind> + Copy,
    ) -> Self {
        for (i, node) in nodes.into_iter().enumerate() {
            if i > 0 {
                self.0.push(GreenElement::Token(token_sp(separator)));
            }
            self.0.push(GreenElement::Node(node));
        }
        self
    }

    /// Make sure the last child so far is followed by whitespace.
    pub(crate) fn spaced(mut self) -> Self {
        match self.0.pop() {
            Some(GreenElement::Node(n)) => self.0.push(GreenElement::Node(space_after(n))),
            Some(GreenElement::Token(t)) => self.0.push(GreenElement::Token(token_space_after(t))),
            None => {}
        }
        self
    }

    pub(crate) fn build(self, kind: impl Into<SyntaxKind>) -> GreenNode {
        GreenNode::new(kind, self.0)
    }
}

/// Attribute lists and modifiers that open a declaration.
#[derive(Debug, Clone, Default)]
pub struct Header {
    pub attributes: Vec<GreenNode>,
    pub modifiers: Vec<GreenToken>,
}

impl Header {
    pub fn new(attributes: Vec<GreenNode>, modifiers: Vec<GreenToken>) -> Self {
        Self { attributes, modifiers }
    }

    pub fn with_modifiers<K: Into<SyntaxKind>>(kinds: impl IntoIterator<Item = K>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: kinds.into_iter().map(token_sp).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.modifiers.is_empty()
    }

    pub(crate) fn push_into(self, children: Children) -> Children {
        children
            .nodes(self.attributes.into_iter().map(space_after))
            .tokens(self.modifiers.into_iter().map(token_space_after))
    }
}

/// Escape `name` for use as an identifier in `language` when it is a keyword.
pub fn escape_identifier(language: Language, name: &str) -> String {
    let bare = unescape_identifier(name);
    if !lexer::is_reserved_word(language, bare) {
        return bare.to_string();
    }
    match language {
        Language::CSharp => format!("@{bare}"),
        Language::VisualBasic => format!("[{bare}]"),
    }
}

/// Strip `@name` / `[name]` escaping.
pub fn unescape_identifier(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('@') {
        rest
    } else if let Some(inner) = name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        inner
    } else {
        name
    }
}

/// True when `name` is a syntactically valid identifier once unescaped.
pub fn is_valid_identifier(name: &str) -> bool {
    let bare = unescape_identifier(name);
    let mut chars = bare.chars();
    match chars.next() {
        Some(c) if c == '_' || unicode_ident::is_xid_start(c) => chars.all(unicode_ident::is_xid_continue),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CsKind, VbKind};

    #[test]
    fn escaping_follows_target_keywords() {
        assert_eq!(escape_identifier(Language::CSharp, "class"), "@class");
        assert_eq!(escape_identifier(Language::CSharp, "[Class]"), "Class");
        assert_eq!(escape_identifier(Language::VisualBasic, "@class"), "[class]");
        assert_eq!(escape_identifier(Language::VisualBasic, "error"), "[error]");
        assert_eq!(escape_identifier(Language::VisualBasic, "value"), "value");
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("_x1"));
        assert!(is_valid_identifier("@class"));
        assert!(is_valid_identifier("größe"));
        assert!(!is_valid_identifier("1x"));
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn end_line_replaces_trailing_space() {
        let node = Children::new().token(token_sp(CsKind::RETURN_KW)).build(CsKind::RETURN_STATEMENT);
        assert_eq!(end_line(node).to_text(), "return\n");
    }

    #[test]
    fn opaque_keeps_all_text() {
        let node = opaque(VbKind::GO_TO_STATEMENT, "GoTo Done ' jump\n");
        assert_eq!(node.to_text(), "GoTo Done ' jump\n");
        assert_eq!(node.kind(), SyntaxKind::Vb(VbKind::GO_TO_STATEMENT));
    }
}
