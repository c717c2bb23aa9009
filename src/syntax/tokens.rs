//! Token and trivia utilities.
//!
//! Lexical navigation and classification over a [`SyntaxTree`], independent
//! of the shape of the nodes around a token. Ancestor queries walk parent
//! indices in the arena.

use text_size::TextSize;
use tokio_util::sync::CancellationToken;

use super::factory::Children;
use super::green::{GreenNode, GreenToken, Trivia, TriviaKind};
use super::tree::{NodeId, SyntaxTree, TokenId};
use super::{CsKind, Language, SyntaxKind, VbKind};

// ============================================================================
// ANCESTORS
// ============================================================================

/// Nearest node enclosing `token` (its parent first) that satisfies `predicate`.
pub fn get_ancestor(
    tree: &SyntaxTree,
    token: TokenId,
    mut predicate: impl FnMut(&SyntaxTree, NodeId) -> bool,
) -> Option<NodeId> {
    get_ancestors(tree, token).find(|&node| predicate(tree, node))
}

/// All nodes enclosing `token`, nearest first.
pub fn get_ancestors(tree: &SyntaxTree, token: TokenId) -> impl Iterator<Item = NodeId> + '_ {
    let parent = tree.token_parent(token);
    std::iter::once(parent).chain(tree.ancestors(parent))
}

pub fn get_ancestor_of_kind(tree: &SyntaxTree, token: TokenId, kind: impl Into<SyntaxKind>) -> Option<NodeId> {
    let kind = kind.into();
    get_ancestor(tree, token, |tree, node| tree.kind(node) == kind)
}

// ============================================================================
// WIDTHS AND POSITIONS
// ============================================================================

pub fn width(tree: &SyntaxTree, token: TokenId) -> TextSize {
    tree.token_range(token).len()
}

pub fn full_width(tree: &SyntaxTree, token: TokenId) -> TextSize {
    tree.token_full_range(token).len()
}

/// True when `position` lies within the token's text, either end included.
pub fn intersects_with(tree: &SyntaxTree, token: TokenId, position: TextSize) -> bool {
    let range = tree.token_range(token);
    range.start() <= position && position <= range.end()
}

/// The previous token when `position` touches this token and it is a word,
/// otherwise the token itself.
pub fn get_previous_token_if_touching_word(tree: &SyntaxTree, token: TokenId, position: TextSize) -> Option<TokenId> {
    if intersects_with(tree, token, position) && is_word(tree.token(token)) {
        previous_token(tree, token)
    } else {
        Some(token)
    }
}

// ============================================================================
// KIND AND TEXT MATCHING
// ============================================================================

pub fn is_kind<K: Into<SyntaxKind> + Copy>(token: &GreenToken, kinds: &[K]) -> bool {
    kinds.iter().any(|&k| token.kind() == k.into())
}

/// True when the token is spelled like `kind`'s canonical text. Works
/// across vocabularies; VB spellings compare case-insensitively.
pub fn has_matching_text(token: &GreenToken, kind: impl Into<SyntaxKind>) -> bool {
    let kind = kind.into();
    match kind.text() {
        Some(text) => kind.language().names_equal(token.text(), text),
        None => false,
    }
}

pub fn is_kind_or_has_matching_text(token: &GreenToken, kind: impl Into<SyntaxKind>) -> bool {
    let kind = kind.into();
    token.kind() == kind || has_matching_text(token, kind)
}

/// C# accessibility modifiers, plus `const` for variables and `static` for
/// constructors.
pub fn is_cs_visibility(token: &GreenToken, is_variable_or_const: bool, is_constructor: bool) -> bool {
    is_kind(token, &[CsKind::PUBLIC_KW, CsKind::INTERNAL_KW, CsKind::PROTECTED_KW, CsKind::PRIVATE_KW])
        || is_variable_or_const && token.kind() == CsKind::CONST_KW
        || is_constructor && token.kind() == CsKind::STATIC_KW
}

/// VB accessibility modifiers, plus `Const` for variables and `Shared` for
/// constructors.
pub fn is_vb_visibility(token: &GreenToken, is_variable_or_const: bool, is_constructor: bool) -> bool {
    is_kind(token, &[VbKind::PUBLIC_KW, VbKind::FRIEND_KW, VbKind::PROTECTED_KW, VbKind::PRIVATE_KW])
        || is_variable_or_const && token.kind() == VbKind::CONST_KW
        || is_constructor && token.kind() == VbKind::SHARED_KW
}

/// Character, numeric, string and boolean literals of either language.
pub fn is_literal(token: &GreenToken) -> bool {
    match token.kind() {
        SyntaxKind::Cs(kind) => matches!(
            kind,
            CsKind::CHAR_LITERAL | CsKind::NUMERIC_LITERAL | CsKind::STRING_LITERAL | CsKind::TRUE_KW | CsKind::FALSE_KW
        ),
        SyntaxKind::Vb(kind) => matches!(
            kind,
            VbKind::CHAR_LITERAL | VbKind::NUMERIC_LITERAL | VbKind::STRING_LITERAL | VbKind::TRUE_KW | VbKind::FALSE_KW
        ),
    }
}

/// Identifiers and keywords.
pub fn is_word(token: &GreenToken) -> bool {
    let kind = token.kind();
    kind.is_identifier() || kind.is_keyword() || kind.is_contextual_keyword()
}

/// A C# string literal that is not verbatim.
pub fn is_regular_string_literal(token: &GreenToken) -> bool {
    token.kind() == CsKind::STRING_LITERAL && !token.text().starts_with('@')
}

/// C# attribute target keywords (`assembly:`, `return:`, ...). Contextual
/// targets lex as identifiers, so they are matched by spelling.
pub fn is_valid_attribute_target(token: &GreenToken) -> bool {
    [
        CsKind::ASSEMBLY_KW,
        CsKind::MODULE_KW,
        CsKind::FIELD_KW,
        CsKind::EVENT_KW,
        CsKind::METHOD_KW,
        CsKind::PARAM_KW,
        CsKind::PROPERTY_KW,
        CsKind::RETURN_KW,
        CsKind::TYPE_KW,
    ]
    .into_iter()
    .any(|kind| is_kind_or_has_matching_text(token, kind))
}

pub fn is_identifier_or_accessor_or_accessibility_modifier(token: &GreenToken) -> bool {
    token.kind() == CsKind::IDENT
        || is_kind(
            token,
            &[CsKind::GET_KW, CsKind::SET_KW, CsKind::PRIVATE_KW, CsKind::PROTECTED_KW, CsKind::INTERNAL_KW, CsKind::PUBLIC_KW],
        )
}

/// True for the type parameter list of a generic interface or delegate
/// declaration, in either language.
pub fn is_generic_interface_or_delegate_type_parameter_list(tree: &SyntaxTree, node: NodeId) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };
    match (tree.kind(node), tree.kind(parent)) {
        (SyntaxKind::Cs(CsKind::TYPE_PARAMETER_LIST), SyntaxKind::Cs(parent)) => {
            matches!(parent, CsKind::INTERFACE_DECLARATION | CsKind::DELEGATE_DECLARATION)
        }
        (SyntaxKind::Vb(VbKind::TYPE_PARAMETER_LIST), SyntaxKind::Vb(parent)) => {
            matches!(parent, VbKind::INTERFACE_STATEMENT | VbKind::DELEGATE_STATEMENT)
        }
        _ => false,
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

fn is_navigable(tree: &SyntaxTree, token: TokenId) -> bool {
    let green = tree.token(token);
    !green.is_missing() && !green.kind().is_end_of_file()
}

/// Next token in document order, skipping missing tokens. `None` at the end.
pub fn next_token(tree: &SyntaxTree, token: TokenId) -> Option<TokenId> {
    (token.index() + 1..tree.token_count())
        .map(TokenId::from_index)
        .find(|&t| is_navigable(tree, t))
}

pub fn previous_token(tree: &SyntaxTree, token: TokenId) -> Option<TokenId> {
    (0..token.index())
        .rev()
        .map(TokenId::from_index)
        .find(|&t| is_navigable(tree, t))
}

/// Next token, or the end-of-file token of the compilation unit.
pub fn next_token_or_end_of_file(tree: &SyntaxTree, token: TokenId) -> Option<TokenId> {
    next_token(tree, token).or_else(|| tree.last_token(tree.root()))
}

/// Trailing trivia of `token` followed by the leading trivia of whatever
/// token comes next, missing tokens included.
pub fn all_trailing_trivia(tree: &SyntaxTree, token: TokenId) -> Vec<Trivia> {
    let mut out = tree.token(token).trailing().to_vec();
    if token.index() + 1 < tree.token_count() {
        out.extend_from_slice(tree.token(TokenId::from_index(token.index() + 1)).leading());
    }
    out
}

pub fn is_first_token_on_line(tree: &SyntaxTree, token: TokenId) -> bool {
    match previous_token(tree, token) {
        None => true,
        Some(previous) => tree.token_line(token) > tree.token_line(previous),
    }
}

/// True when a directive sits between any two consecutive tokens of the run.
pub fn spans_preprocessor_directive<'a>(tokens: impl IntoIterator<Item = &'a GreenToken>) -> bool {
    let has_directive = |trivia: &[Trivia]| trivia.iter().any(|t| t.kind == TriviaKind::Directive);
    let mut previous: Option<&GreenToken> = None;
    for token in tokens {
        if let Some(previous) = previous {
            if has_directive(token.leading()) || has_directive(previous.trailing()) {
                return true;
            }
        }
        previous = Some(token);
    }
    false
}

// ============================================================================
// PARTIAL GENERIC NAMES (C#)
// ============================================================================

/// Scan forward from an identifier followed by `<` for the token that closes
/// what lexically looks like its type argument list.
///
/// The result is the matching `>` when one is found. Otherwise the scan
/// stops at the last token that could still belong to the name: the token
/// before a declaration keyword or anything that cannot appear in a type.
pub fn find_last_token_of_partial_generic_name(tree: &SyntaxTree, identifier: TokenId) -> TokenId {
    let Some(mut token) = next_token(tree, identifier) else {
        return identifier;
    };
    let mut depth = 0usize;
    loop {
        let Some(next) = next_token(tree, token) else {
            return token;
        };
        token = next;
        let Some(kind) = tree.token_kind(token).as_cs() else {
            return previous_token(tree, token).unwrap_or(identifier);
        };
        match kind {
            CsKind::GT if depth == 0 => return token,
            CsKind::GT => depth -= 1,
            CsKind::LT_LT => depth += 2,
            CsKind::LT => depth += 1,
            CsKind::STAR
            | CsKind::QUESTION
            | CsKind::COLON
            | CsKind::COLON_COLON
            | CsKind::R_BRACKET
            | CsKind::L_BRACKET
            | CsKind::DOT
            | CsKind::IDENT
            | CsKind::COMMA => {}
            CsKind::CLASS_KW
            | CsKind::STRUCT_KW
            | CsKind::INTERFACE_KW
            | CsKind::DELEGATE_KW
            | CsKind::ENUM_KW
            | CsKind::PRIVATE_KW
            | CsKind::PUBLIC_KW
            | CsKind::INTERNAL_KW
            | CsKind::PROTECTED_KW
            | CsKind::VOID_KW => return previous_token(tree, token).unwrap_or(identifier),
            // `in` on the way to `int`
            kind if kind.is_keyword() => {}
            _ => return previous_token(tree, token).unwrap_or(identifier),
        }
    }
}

/// Parse the tokens starting at `identifier` as a C# generic name.
///
/// Succeeds only when `identifier` is followed by `<`, the lexical scan ends
/// on a balancing `>`, and the scanned run parses as exactly one generic
/// name. Returns `None` when cancelled.
pub fn try_parse_generic_name(tree: &SyntaxTree, identifier: TokenId, cancel: &CancellationToken) -> Option<GreenNode> {
    if tree.language() != Language::CSharp || tree.token_kind(identifier) != CsKind::IDENT {
        return None;
    }
    let less_than = next_token(tree, identifier)?;
    if tree.token_kind(less_than) != CsKind::LT {
        return None;
    }
    let last = find_last_token_of_partial_generic_name(tree, identifier);
    if tree.token_kind(last) != CsKind::GT {
        return None;
    }

    let mut run = Vec::new();
    let mut current = Some(identifier);
    while let Some(token) = current {
        if cancel.is_cancelled() {
            return None;
        }
        run.push(tree.token(token).clone());
        if token == last {
            break;
        }
        current = next_token(tree, token);
    }
    if let Some(first) = run.first_mut() {
        *first = first.clone().with_leading_trivia(Vec::new());
    }
    if let Some(last) = run.last_mut() {
        *last = last.clone().with_trailing_trivia(Vec::new());
    }

    let mut parser = NameParser { tokens: &run, pos: 0 };
    let name = parser.parse_type()?;
    (parser.pos == run.len() && name.kind() == CsKind::GENERIC_NAME).then_some(name)
}

/// Recursive descent over a token run, producing C# type syntax.
struct NameParser<'t> {
    tokens: &'t [GreenToken],
    pos: usize,
}

impl NameParser<'_> {
    fn peek(&self) -> Option<CsKind> {
        self.tokens.get(self.pos).and_then(|t| t.kind().as_cs())
    }

    fn bump(&mut self) -> Option<GreenToken> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: CsKind) -> Option<GreenToken> {
        if self.peek() == Some(kind) { self.bump() } else { None }
    }

    fn parse_type(&mut self) -> Option<GreenNode> {
        let mut ty = match self.peek()? {
            kind if kind.is_predefined_type() => {
                Children::new().token(self.bump()?).build(CsKind::PREDEFINED_TYPE)
            }
            CsKind::IDENT => self.parse_simple_name()?,
            _ => return None,
        };
        loop {
            match self.peek() {
                Some(CsKind::DOT) => {
                    let dot = self.bump()?;
                    let right = self.parse_simple_name()?;
                    ty = Children::new().node(ty).token(dot).node(right).build(CsKind::QUALIFIED_NAME);
                }
                Some(CsKind::COLON_COLON) if ty.kind() == CsKind::IDENTIFIER_NAME => {
                    let colons = self.bump()?;
                    let right = self.parse_simple_name()?;
                    ty = Children::new().node(ty).token(colons).node(right).build(CsKind::ALIAS_QUALIFIED_NAME);
                }
                Some(CsKind::QUESTION) => {
                    ty = Children::new().node(ty).token(self.bump()?).build(CsKind::NULLABLE_TYPE);
                }
                Some(CsKind::STAR) => {
                    ty = Children::new().node(ty).token(self.bump()?).build(CsKind::POINTER_TYPE);
                }
                Some(CsKind::L_BRACKET) => {
                    let mut ranks = Vec::new();
                    while self.peek() == Some(CsKind::L_BRACKET) {
                        let mut rank = Children::new().token(self.bump()?);
                        while self.peek() == Some(CsKind::COMMA) {
                            rank = rank.token(self.bump()?);
                        }
                        rank = rank.token(self.expect(CsKind::R_BRACKET)?);
                        ranks.push(rank.build(CsKind::ARRAY_RANK_SPECIFIER));
                    }
                    ty = Children::new().node(ty).nodes(ranks).build(CsKind::ARRAY_TYPE);
                }
                _ => return Some(ty),
            }
        }
    }

    fn parse_simple_name(&mut self) -> Option<GreenNode> {
        let ident = self.expect(CsKind::IDENT)?;
        if self.peek() != Some(CsKind::LT) {
            return Some(Children::new().token(ident).build(CsKind::IDENTIFIER_NAME));
        }
        let mut args = Children::new().token(self.bump()?);
        args = args.node(self.parse_type()?);
        while self.peek() == Some(CsKind::COMMA) {
            args = args.token(self.bump()?).node(self.parse_type()?);
        }
        args = args.token(self.expect(CsKind::GT)?);
        Some(
            Children::new()
                .token(ident)
                .node(args.build(CsKind::TYPE_ARGUMENT_LIST))
                .build(CsKind::GENERIC_NAME),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{cs, opaque};

    fn cs_tree(text: &str) -> SyntaxTree {
        SyntaxTree::new(cs::compilation_unit(vec![opaque(CsKind::EXPRESSION_STATEMENT, text)]))
    }

    fn find(tree: &SyntaxTree, text: &str) -> TokenId {
        tree.all_tokens()
            .find(|&t| tree.token_text(t) == text)
            .unwrap_or_else(|| panic!("no token {text:?}"))
    }

    #[test]
    fn test_comparison_is_not_a_generic_name() {
        let tree = cs_tree("x = a < b;");
        let a = find(&tree, "a");
        let last = find_last_token_of_partial_generic_name(&tree, a);
        assert_eq!(tree.token_text(last), "b");
        assert!(try_parse_generic_name(&tree, a, &CancellationToken::new()).is_none());
    }

    #[test]
    fn test_declaration_keyword_stops_the_scan() {
        let tree = cs_tree("a < b public class");
        let a = find(&tree, "a");
        assert_eq!(tree.token_text(find_last_token_of_partial_generic_name(&tree, a)), "b");
    }

    #[test]
    fn test_balanced_generic_name_parses() {
        let tree = cs_tree("x = List<Dictionary<string, int[]>>.Empty;");
        let list = find(&tree, "List");
        let name = try_parse_generic_name(&tree, list, &CancellationToken::new()).expect("generic");
        assert_eq!(name.kind(), CsKind::GENERIC_NAME);
        assert_eq!(name.to_text(), "List<Dictionary<string, int[]>>");
    }

    #[test]
    fn test_cancelled_parse_gives_up() {
        let tree = cs_tree("List<int>");
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert!(try_parse_generic_name(&tree, find(&tree, "List"), &cancel).is_none());
    }

    #[test]
    fn test_foreign_keywords_match_by_spelling() {
        let token = GreenToken::new(CsKind::IDENT, "assembly");
        assert!(is_valid_attribute_target(&token));
        let vb_public = GreenToken::new(VbKind::PUBLIC_KW, "PUBLIC");
        assert!(has_matching_text(&vb_public, VbKind::PUBLIC_KW));
        assert!(!has_matching_text(&GreenToken::new(CsKind::IDENT, "Public"), CsKind::PUBLIC_KW));
        assert!(is_kind_or_has_matching_text(&GreenToken::new(VbKind::IDENT, "public"), VbKind::PUBLIC_KW));
    }

    #[test]
    fn test_visibility_depends_on_declaration() {
        let shared = GreenToken::fixed(VbKind::SHARED_KW);
        assert!(!is_vb_visibility(&shared, false, false));
        assert!(is_vb_visibility(&shared, false, true));
        let konst = GreenToken::fixed(CsKind::CONST_KW);
        assert!(is_cs_visibility(&konst, true, false));
        assert!(is_cs_visibility(&GreenToken::fixed(CsKind::INTERNAL_KW), false, false));
    }

    #[test]
    fn test_trailing_trivia_spans_token_boundary() {
        let tree = cs_tree("a; // note\n/* next */ b;");
        let semi = tree.all_tokens().find(|&t| tree.token_text(t) == ";").expect("semicolon");
        let trivia: Vec<String> = all_trailing_trivia(&tree, semi).iter().map(|t| t.text.to_string()).collect();
        assert_eq!(trivia, vec![" ", "// note", "\n", "/* next */", " "]);
        let b = find(&tree, "b");
        assert!(is_first_token_on_line(&tree, b));
        assert!(!is_first_token_on_line(&tree, semi));
    }

    #[test]
    fn test_directives_between_tokens_are_detected() {
        let tree = cs_tree("a\n#if DEBUG\nb");
        let tokens: Vec<GreenToken> = tree.all_tokens().map(|t| tree.token(t).clone()).collect();
        assert!(spans_preprocessor_directive(&tokens));
        assert!(!spans_preprocessor_directive(&tokens[..1]));
    }

    #[test]
    fn test_literals_and_words() {
        assert!(is_literal(&GreenToken::fixed(VbKind::TRUE_KW)));
        assert!(is_literal(&GreenToken::new(CsKind::NUMERIC_LITERAL, "1")));
        assert!(!is_literal(&GreenToken::fixed(CsKind::NULL_KW)));
        assert!(is_word(&GreenToken::fixed(CsKind::CLASS_KW)));
        assert!(!is_word(&GreenToken::fixed(CsKind::SEMICOLON)));
        assert!(is_regular_string_literal(&GreenToken::new(CsKind::STRING_LITERAL, "\"a\"")));
        assert!(!is_regular_string_literal(&GreenToken::new(CsKind::STRING_LITERAL, "@\"a\"")));
    }
}
