//! Source-position annotations.
//!
//! Converted tokens and nodes remember the source lines they came from so
//! that tools built on the output can report against the original text.
//! Annotation keys are not global: every run passes an [`AnnotationKeys`]
//! through its options, so independent runs can use distinct schemes.
//!
//! Annotations ride on green values. Trivia edits on a token
//! ([`crate::syntax::GreenToken::with_trivia`] and friends) keep them, and
//! so does replacing a node's children.

use smol_str::SmolStr;

use crate::semantic::SymbolId;
use crate::syntax::{Annotation, ElementId, GreenNode, GreenToken, NodeId, SyntaxTree, TokenId};

/// Annotation key registry for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationKeys {
    pub source_start_line: SmolStr,
    pub source_end_line: SmolStr,
    /// Symbol a converted name or declaration stands for.
    pub symbol: SmolStr,
    /// Type of a converted expression.
    pub expression_type: SmolStr,
    /// Original text of a stubbed construct.
    pub unsupported: SmolStr,
}

impl Default for AnnotationKeys {
    fn default() -> Self {
        Self {
            source_start_line: SmolStr::new_static("SourceStartLine"),
            source_end_line: SmolStr::new_static("SourceEndLine"),
            symbol: SmolStr::new_static("Symbol"),
            expression_type: SmolStr::new_static("ExpressionType"),
            unsupported: SmolStr::new_static("Unsupported"),
        }
    }
}

impl AnnotationKeys {
    /// Keys with `prefix` prepended, for runs that must not see each
    /// other's annotations.
    pub fn prefixed(prefix: &str) -> Self {
        let base = Self::default();
        let key = |k: &SmolStr| SmolStr::from(format!("{prefix}{k}"));
        Self {
            source_start_line: key(&base.source_start_line),
            source_end_line: key(&base.source_end_line),
            symbol: key(&base.symbol),
            expression_type: key(&base.expression_type),
            unsupported: key(&base.unsupported),
        }
    }
}

// ============================================================================
// ANNOTATED VALUES
// ============================================================================

/// Green values that carry annotations.
pub trait Annotated: Sized {
    fn annotation_list(&self) -> &[Annotation];

    fn replace_annotations(self, annotations: Vec<Annotation>) -> Self;

    fn annotation(&self, kind: &str) -> Option<&Annotation> {
        self.annotation_list().iter().find(|a| a.kind == kind)
    }

    fn annotation_data(&self, kind: &str) -> Option<&str> {
        self.annotation(kind).and_then(|a| a.data.as_deref())
    }

    fn has_annotation(&self, kind: &str) -> bool {
        self.annotation(kind).is_some()
    }

    /// Add `annotation`, replacing any existing one of the same kind.
    fn with_annotation(self, annotation: Annotation) -> Self {
        let mut annotations: Vec<Annotation> = self
            .annotation_list()
            .iter()
            .filter(|a| a.kind != annotation.kind)
            .cloned()
            .collect();
        annotations.push(annotation);
        self.replace_annotations(annotations)
    }

    fn without_annotations(self, kinds: &[&str]) -> Self {
        if !self.annotation_list().iter().any(|a| kinds.contains(&a.kind.as_str())) {
            return self;
        }
        let annotations = self
            .annotation_list()
            .iter()
            .filter(|a| !kinds.contains(&a.kind.as_str()))
            .cloned()
            .collect();
        self.replace_annotations(annotations)
    }

    /// Copy every annotation of `source` onto `self`, source values winning.
    fn with_annotations_from(self, source: &impl Annotated) -> Self {
        source
            .annotation_list()
            .iter()
            .cloned()
            .fold(self, |target, annotation| target.with_annotation(annotation))
    }
}

impl Annotated for GreenToken {
    fn annotation_list(&self) -> &[Annotation] {
        self.annotations()
    }

    fn replace_annotations(self, annotations: Vec<Annotation>) -> Self {
        self.with_annotations(annotations)
    }
}

impl Annotated for GreenNode {
    fn annotation_list(&self) -> &[Annotation] {
        self.annotations()
    }

    fn replace_annotations(self, annotations: Vec<Annotation>) -> Self {
        self.with_annotations(annotations)
    }
}

// ============================================================================
// SOURCE LINES
// ============================================================================

pub fn with_source_start_line<T: Annotated>(keys: &AnnotationKeys, target: T, line: u32) -> T {
    target.with_annotation(Annotation::new(keys.source_start_line.clone(), line.to_string()))
}

pub fn with_source_end_line<T: Annotated>(keys: &AnnotationKeys, target: T, line: u32) -> T {
    target.with_annotation(Annotation::new(keys.source_end_line.clone(), line.to_string()))
}

/// Stamp the lines of `token`'s text in `source`.
pub fn with_source_mapping_from_token<T: Annotated>(
    keys: &AnnotationKeys,
    target: T,
    source: &SyntaxTree,
    token: TokenId,
) -> T {
    let range = source.token_range(token);
    let start = source.line_index().line_of(range.start());
    let end = source.line_index().line_of(range.end());
    let target = with_source_start_line(keys, target, start);
    with_source_end_line(keys, target, end)
}

/// Stamp the lines of `node`'s text (outer trivia excluded) in `source`.
pub fn with_source_mapping_from_node<T: Annotated>(
    keys: &AnnotationKeys,
    target: T,
    source: &SyntaxTree,
    node: NodeId,
) -> T {
    let (start, end) = source.line_span(node);
    let target = with_source_start_line(keys, target, start);
    with_source_end_line(keys, target, end)
}

/// Remove both line annotations.
pub fn without_source_mapping<T: Annotated>(keys: &AnnotationKeys, target: T) -> T {
    target.without_annotations(&[keys.source_start_line.as_str(), keys.source_end_line.as_str()])
}

/// Source start and end line. A lone start or end stands for both.
pub fn source_line_span(keys: &AnnotationKeys, target: &impl Annotated) -> Option<(u32, u32)> {
    let line = |key: &str| target.annotation_data(key).and_then(|d| d.parse::<u32>().ok());
    match (line(&keys.source_start_line), line(&keys.source_end_line)) {
        (Some(start), Some(end)) => Some((start, end)),
        (Some(line), None) | (None, Some(line)) => Some((line, line)),
        (None, None) => None,
    }
}

/// Every element of `tree` that carries a source mapping, in document
/// order (nodes before their tokens).
pub fn collect_source_spans(keys: &AnnotationKeys, tree: &SyntaxTree) -> Vec<(ElementId, (u32, u32))> {
    let mut spans = Vec::new();
    collect_node(keys, tree, tree.root(), &mut spans);
    spans
}

fn collect_node(keys: &AnnotationKeys, tree: &SyntaxTree, node: NodeId, out: &mut Vec<(ElementId, (u32, u32))>) {
    if let Some(span) = source_line_span(keys, tree.green(node)) {
        out.push((ElementId::Node(node), span));
    }
    for child in tree.children(node) {
        match *child {
            ElementId::Node(n) => collect_node(keys, tree, n, out),
            ElementId::Token(t) => {
                if let Some(span) = source_line_span(keys, tree.token(t)) {
                    out.push((ElementId::Token(t), span));
                }
            }
        }
    }
}

// ============================================================================
// SEMANTIC MARKERS
// ============================================================================

pub fn with_symbol<T: Annotated>(keys: &AnnotationKeys, target: T, symbol: SymbolId) -> T {
    target.with_annotation(Annotation::new(keys.symbol.clone(), symbol.0.to_string()))
}

pub fn symbol_of(keys: &AnnotationKeys, target: &impl Annotated) -> Option<SymbolId> {
    target.annotation_data(&keys.symbol).and_then(|d| d.parse().ok()).map(SymbolId)
}

pub fn with_expression_type<T: Annotated>(keys: &AnnotationKeys, target: T, ty: SymbolId) -> T {
    target.with_annotation(Annotation::new(keys.expression_type.clone(), ty.0.to_string()))
}

pub fn expression_type_of(keys: &AnnotationKeys, target: &impl Annotated) -> Option<SymbolId> {
    target.annotation_data(&keys.expression_type).and_then(|d| d.parse().ok()).map(SymbolId)
}

/// Mark a stub as standing in for `original` source text.
pub fn mark_unsupported<T: Annotated>(keys: &AnnotationKeys, target: T, original: &str) -> T {
    target.with_annotation(Annotation::new(keys.unsupported.clone(), original))
}

pub fn unsupported_text<'a>(keys: &AnnotationKeys, target: &'a impl Annotated) -> Option<&'a str> {
    target.annotation_data(&keys.unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{cs, opaque};
    use crate::syntax::{CsKind, Trivia};

    fn keys() -> AnnotationKeys {
        AnnotationKeys::default()
    }

    #[test]
    fn test_start_and_end_lines() {
        let token = GreenToken::new(CsKind::IDENT, "x");
        let token = with_source_start_line(&keys(), token, 3);
        assert_eq!(source_line_span(&keys(), &token), Some((3, 3)));
        let token = with_source_end_line(&keys(), token, 5);
        assert_eq!(source_line_span(&keys(), &token), Some((3, 5)));
        let token = with_source_start_line(&keys(), token, 4);
        assert_eq!(source_line_span(&keys(), &token), Some((4, 5)));
        assert_eq!(token.annotations().len(), 2);
    }

    #[test]
    fn test_annotations_survive_trivia_edits() {
        let token = with_source_start_line(&keys(), GreenToken::new(CsKind::IDENT, "x"), 7);
        let edited = token
            .with_prepended_leading_trivia([Trivia::space()])
            .with_appended_trailing_trivia([Trivia::end_of_line()])
            .without_trivia();
        assert_eq!(source_line_span(&keys(), &edited), Some((7, 7)));
    }

    #[test]
    fn test_without_source_mapping_keeps_other_annotations() {
        let node = cs::name("x");
        let node = with_source_mapping_from_node(&keys(), node, &SyntaxTree::new(cs::compilation_unit(vec![])), NodeId::from_index(0));
        let node = with_symbol(&keys(), node, SymbolId(4));
        let node = without_source_mapping(&keys(), node);
        assert_eq!(source_line_span(&keys(), &node), None);
        assert_eq!(symbol_of(&keys(), &node), Some(SymbolId(4)));
    }

    #[test]
    fn test_mapping_from_source_tree() {
        let source = SyntaxTree::new(cs::compilation_unit(vec![
            opaque(CsKind::EXPRESSION_STATEMENT, "a();\n"),
            opaque(CsKind::EXPRESSION_STATEMENT, "b(\n1);\n"),
        ]));
        let second = source
            .child_nodes(source.root())
            .nth(1)
            .unwrap_or(source.root());
        let stub = with_source_mapping_from_node(&keys(), cs::name("b"), &source, second);
        assert_eq!(source_line_span(&keys(), &stub), Some((1, 2)));

        let last_paren = source.tokens_of(second).filter(|t| source.token_kind(*t) == CsKind::R_PAREN).last();
        let token = last_paren.map(|t| with_source_mapping_from_token(&keys(), GreenToken::fixed(CsKind::R_PAREN), &source, t));
        assert_eq!(token.and_then(|t| source_line_span(&keys(), &t)), Some((2, 2)));
    }

    #[test]
    fn test_collect_source_spans_in_document_order() {
        let keys = keys();
        let first = with_source_start_line(&keys, cs::name("a"), 0);
        let second = cs::name("b").map_first_token(|t| with_source_start_line(&keys, t, 1));
        let tree = SyntaxTree::new(cs::compilation_unit(vec![
            cs::expression_statement(first),
            cs::expression_statement(second),
        ]));
        let spans: Vec<_> = collect_source_spans(&keys, &tree).into_iter().map(|(_, span)| span).collect();
        assert_eq!(spans, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_distinct_key_schemes_do_not_see_each_other() {
        let other = AnnotationKeys::prefixed("Run2.");
        let token = with_source_start_line(&keys(), GreenToken::new(CsKind::IDENT, "x"), 1);
        assert_eq!(source_line_span(&other, &token), None);
        let token = with_source_start_line(&other, token, 9);
        assert_eq!(source_line_span(&keys(), &token), Some((1, 1)));
        assert_eq!(source_line_span(&other, &token), Some((9, 9)));
    }

    #[test]
    fn test_unsupported_marker() {
        let stub = mark_unsupported(&keys(), cs::null_literal(), "goto end;");
        assert_eq!(unsupported_text(&keys(), &stub), Some("goto end;"));
    }
}
