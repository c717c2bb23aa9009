//! Immutable green values: tokens with trivia, nodes with ordered children.
//!
//! Green values carry no position and no parent. They are cheap to clone
//! (`GreenNode` is an `Arc`) and are shared freely between the source tree,
//! the converter's output and the validator's rewrites. Positions, parents
//! and ids live in [`super::SyntaxTree`].

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextSize;

use super::SyntaxKind;

// ============================================================================
// TRIVIA
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    /// `// ...` in C#, `' ...` or `REM ...` in VB. Text includes the delimiter.
    LineComment,
    /// `/* ... */` (C# only).
    BlockComment,
    /// A whole preprocessor line such as `#region Foo`.
    Directive,
}

impl TriviaKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TriviaKind::LineComment | TriviaKind::BlockComment)
    }

    /// Whitespace and line breaks carry layout only.
    pub fn is_layout(self) -> bool {
        matches!(self, TriviaKind::Whitespace | TriviaKind::EndOfLine)
    }
}

/// A single piece of whitespace, comment or directive attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: SmolStr,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<SmolStr>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn whitespace(text: impl Into<SmolStr>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn space() -> Self {
        Self::whitespace(" ")
    }

    pub fn end_of_line() -> Self {
        Self::new(TriviaKind::EndOfLine, "\n")
    }

    pub fn line_comment(text: impl Into<SmolStr>) -> Self {
        Self::new(TriviaKind::LineComment, text)
    }

    pub fn block_comment(text: impl Into<SmolStr>) -> Self {
        Self::new(TriviaKind::BlockComment, text)
    }

    pub fn directive(text: impl Into<SmolStr>) -> Self {
        Self::new(TriviaKind::Directive, text)
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn trivia_width(list: &[Trivia]) -> TextSize {
    list.iter().map(Trivia::len).sum()
}

// ============================================================================
// ANNOTATIONS
// ============================================================================

/// Key/value metadata on a token or node. Keys are supplied by the caller
/// through [`crate::annotations::AnnotationKeys`]; this type does not know
/// any key by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub kind: SmolStr,
    pub data: Option<SmolStr>,
}

impl Annotation {
    pub fn new(kind: impl Into<SmolStr>, data: impl Into<SmolStr>) -> Self {
        Self { kind: kind.into(), data: Some(data.into()) }
    }

    pub fn marker(kind: impl Into<SmolStr>) -> Self {
        Self { kind: kind.into(), data: None }
    }
}

// ============================================================================
// TOKENS
// ============================================================================

/// An immutable token: kind, text, surrounding trivia and annotations.
///
/// A token with empty text is *missing* (inserted by error recovery).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GreenToken {
    kind: SyntaxKind,
    text: SmolStr,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
    annotations: Vec<Annotation>,
}

impl GreenToken {
    pub fn new(kind: impl Into<SyntaxKind>, text: impl Into<SmolStr>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            leading: Vec::new(),
            trailing: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// A fixed token or keyword spelled canonically.
    pub fn fixed(kind: impl Into<SyntaxKind>) -> Self {
        let kind = kind.into();
        Self::new(kind, kind.text().unwrap_or(""))
    }

    /// A zero-width token standing in for one the source omitted.
    pub fn missing(kind: impl Into<SyntaxKind>) -> Self {
        Self::new(kind, "")
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_smol(&self) -> &SmolStr {
        &self.text
    }

    pub fn leading(&self) -> &[Trivia] {
        &self.leading
    }

    pub fn trailing(&self) -> &[Trivia] {
        &self.trailing
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn is_missing(&self) -> bool {
        self.text.is_empty()
    }

    /// Width of the token text without trivia.
    pub fn width(&self) -> TextSize {
        TextSize::of(self.text.as_str())
    }

    pub fn leading_width(&self) -> TextSize {
        trivia_width(&self.leading)
    }

    pub fn full_width(&self) -> TextSize {
        trivia_width(&self.leading) + self.width() + trivia_width(&self.trailing)
    }

    pub fn with_kind(mut self, kind: impl Into<SyntaxKind>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<SmolStr>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_leading_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.leading = trivia;
        self
    }

    pub fn with_trailing_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.trailing = trivia;
        self
    }

    /// Replace both trivia lists.
    pub fn with_trivia(self, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> Self {
        self.with_leading_trivia(leading).with_trailing_trivia(trailing)
    }

    pub fn without_trivia(self) -> Self {
        self.with_trivia(Vec::new(), Vec::new())
    }

    pub fn with_prepended_leading_trivia(mut self, trivia: impl IntoIterator<Item = Trivia>) -> Self {
        let mut leading: Vec<Trivia> = trivia.into_iter().collect();
        leading.append(&mut self.leading);
        self.leading = leading;
        self
    }

    pub fn with_appended_trailing_trivia(mut self, trivia: impl IntoIterator<Item = Trivia>) -> Self {
        self.trailing.extend(trivia);
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn write_to(&self, out: &mut String) {
        for t in &self.leading {
            out.push_str(&t.text);
        }
        out.push_str(&self.text);
        for t in &self.trailing {
            out.push_str(&t.text);
        }
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

// ============================================================================
// NODES
// ============================================================================

/// A child of a green node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GreenElement {
    Node(GreenNode),
    Token(GreenToken),
}

impl GreenElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(n) => n.kind(),
            GreenElement::Token(t) => t.kind(),
        }
    }

    pub fn full_width(&self) -> TextSize {
        match self {
            GreenElement::Node(n) => n.full_width(),
            GreenElement::Token(t) => t.full_width(),
        }
    }

    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            GreenElement::Node(n) => Some(n),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            GreenElement::Token(t) => Some(t),
            GreenElement::Node(_) => None,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        GreenElement::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        GreenElement::Token(token)
    }
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    children: Vec<GreenElement>,
    annotations: Vec<Annotation>,
    full_width: TextSize,
}

/// An immutable, shareable node.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub fn new(kind: impl Into<SyntaxKind>, children: impl IntoIterator<Item = GreenElement>) -> Self {
        Self::with_parts(kind.into(), children.into_iter().collect(), Vec::new())
    }

    fn with_parts(kind: SyntaxKind, children: Vec<GreenElement>, annotations: Vec<Annotation>) -> Self {
        let full_width = children.iter().map(GreenElement::full_width).sum();
        GreenNode(Arc::new(GreenNodeData { kind, children, annotations, full_width }))
    }

    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &GreenNode> {
        self.0.children.iter().filter_map(GreenElement::as_node)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &GreenToken> {
        self.0.children.iter().filter_map(GreenElement::as_token)
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.0.annotations
    }

    pub fn full_width(&self) -> TextSize {
        self.0.full_width
    }

    pub fn with_annotations(&self, annotations: Vec<Annotation>) -> Self {
        Self::with_parts(self.kind(), self.0.children.clone(), annotations)
    }

    /// Same kind and annotations, new children.
    pub fn with_children(&self, children: Vec<GreenElement>) -> Self {
        Self::with_parts(self.kind(), children, self.0.annotations.clone())
    }

    pub fn with_kind(&self, kind: impl Into<SyntaxKind>) -> Self {
        Self::with_parts(kind.into(), self.0.children.clone(), self.0.annotations.clone())
    }

    /// All tokens in document order.
    pub fn tokens(&self) -> Vec<&GreenToken> {
        let mut out = Vec::new();
        collect_tokens(self, &mut out);
        out
    }

    pub fn first_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().find_map(|child| match child {
            GreenElement::Token(t) => Some(t),
            GreenElement::Node(n) => n.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&GreenToken> {
        self.0.children.iter().rev().find_map(|child| match child {
            GreenElement::Token(t) => Some(t),
            GreenElement::Node(n) => n.last_token(),
        })
    }

    /// Rebuild with the first token replaced. Unchanged if the node has no tokens.
    pub fn map_first_token(&self, f: impl FnOnce(GreenToken) -> GreenToken) -> Self {
        self.map_edge_token(false, f).unwrap_or_else(|| self.clone())
    }

    /// Rebuild with the last token replaced. Unchanged if the node has no tokens.
    pub fn map_last_token(&self, f: impl FnOnce(GreenToken) -> GreenToken) -> Self {
        self.map_edge_token(true, f).unwrap_or_else(|| self.clone())
    }

    fn map_edge_token(&self, last: bool, f: impl FnOnce(GreenToken) -> GreenToken) -> Option<Self> {
        let children = &self.0.children;
        let order: Vec<usize> = if last {
            (0..children.len()).rev().collect()
        } else {
            (0..children.len()).collect()
        };
        for index in order {
            let replaced = match &children[index] {
                GreenElement::Token(t) => Some(GreenElement::Token(f(t.clone()))),
                GreenElement::Node(n) if n.first_token().is_some() => {
                    n.map_edge_token(last, f).map(GreenElement::Node)
                }
                GreenElement::Node(_) => continue,
            };
            let mut new_children = children.clone();
            new_children[index] = replaced?;
            return Some(self.with_children(new_children));
        }
        None
    }

    pub fn write_to(&self, out: &mut String) {
        for child in &self.0.children {
            match child {
                GreenElement::Node(n) => n.write_to(out),
                GreenElement::Token(t) => t.write_to(out),
            }
        }
    }

    /// Lossless text including trivia.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(u32::from(self.full_width()) as usize);
        self.write_to(&mut out);
        out
    }
}

fn collect_tokens<'a>(node: &'a GreenNode, out: &mut Vec<&'a GreenToken>) {
    for child in node.children() {
        match child {
            GreenElement::Node(n) => collect_tokens(n, out),
            GreenElement::Token(t) => out.push(t),
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("children", &self.0.children)
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::CsKind;

    fn ident(name: &str) -> GreenToken {
        GreenToken::new(CsKind::IDENT, name)
    }

    #[test]
    fn token_width_counts_trivia() {
        let token = ident("abc")
            .with_trivia(vec![Trivia::whitespace("  ")], vec![Trivia::end_of_line()]);
        assert_eq!(token.width(), TextSize::from(3));
        assert_eq!(token.full_width(), TextSize::from(6));
        assert_eq!(token.to_string(), "  abc\n");
    }

    #[test]
    fn prepend_and_append_keep_order() {
        let token = ident("x")
            .with_leading_trivia(vec![Trivia::whitespace(" ")])
            .with_prepended_leading_trivia([Trivia::line_comment("// a"), Trivia::end_of_line()])
            .with_appended_trailing_trivia([Trivia::line_comment("// b")]);
        assert_eq!(token.to_string(), "// a\n x// b");
    }

    #[test]
    fn trivia_edits_keep_annotations() {
        let token = ident("x").with_annotations(vec![Annotation::new("k", "v")]);
        let edited = token.with_trivia(vec![Trivia::space()], vec![]).without_trivia();
        assert_eq!(edited.annotations().len(), 1);
    }

    #[test]
    fn node_text_and_edges() {
        let node = GreenNode::new(
            CsKind::BINARY_EXPRESSION,
            [
                GreenNode::new(CsKind::IDENTIFIER_NAME, [ident("a").into()]).into(),
                GreenToken::fixed(CsKind::LT)
                    .with_trivia(vec![Trivia::space()], vec![Trivia::space()])
                    .into(),
                GreenNode::new(CsKind::IDENTIFIER_NAME, [ident("b").into()]).into(),
            ],
        );
        assert_eq!(node.to_text(), "a < b");
        assert_eq!(node.full_width(), TextSize::from(5));
        assert_eq!(node.first_token().map(GreenToken::text), Some("a"));
        assert_eq!(node.last_token().map(GreenToken::text), Some("b"));

        let mapped = node.map_last_token(|t| t.with_trailing_trivia(vec![Trivia::end_of_line()]));
        assert_eq!(mapped.to_text(), "a < b\n");
        let mapped = mapped.map_first_token(|t| t.with_text("c"));
        assert_eq!(mapped.to_text(), "c < b\n");
    }

    #[test]
    fn edge_mapping_skips_empty_nodes() {
        let node = GreenNode::new(
            CsKind::COMPILATION_UNIT,
            [
                GreenNode::new(CsKind::BLOCK, []).into(),
                GreenToken::missing(CsKind::EOF_TOKEN).into(),
            ],
        );
        let mapped = node.map_first_token(|t| t.with_leading_trivia(vec![Trivia::line_comment("// x")]));
        assert_eq!(mapped.to_text(), "// x");
    }
}
