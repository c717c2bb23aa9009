//! Per-unit conversion state shared by both directions.
//!
//! The context owns everything a single conversion run mutates: collected
//! imports, generated names, the set of source trivia already emitted and
//! the diagnostics raised so far. Trees, the semantic model and the options
//! are borrowed read-only.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::error::{ConvertError, ConvertResult};
use super::options::ConversionOptions;
use super::trivia::{as_lines, comment_line, convert_trivia, end_of_line_comments, has_comments};
use crate::annotations;
use crate::base::FileId;
use crate::diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity, codes};
use crate::semantic::{SemanticModel, SymbolId, SymbolKind, SymbolTable, TypeKind, contains_member};
use crate::syntax::factory::{self, cs, escape_identifier, is_valid_identifier, unescape_identifier, vb};
use crate::syntax::{
    CsKind, GreenElement, GreenNode, GreenToken, Language, NodeId, SyntaxKind, SyntaxTree, TokenId, Trivia,
    TriviaKind, VbKind,
};

/// Where a unit is in its conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionState {
    Unconverted,
    Converting,
    Converted,
    Validated,
}

/// Which position a node kind may occupy in a source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Role {
    Unit,
    Member,
    Statement,
    Expression,
    Type,
    /// Only meaningful inside a specific parent.
    Part,
    /// Has no counterpart in the other language.
    Unsupported,
    Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Leading,
    Trailing,
}

/// Statements of a converted body plus the trivia found on its delimiters.
#[derive(Debug, Default)]
pub(crate) struct Body {
    pub statements: Vec<GreenNode>,
    /// Comments that followed the opening delimiter, laid out for the end of
    /// the header line.
    pub header: Vec<Trivia>,
    /// Leading trivia for the closing delimiter or `End` statement.
    pub closing: Vec<Trivia>,
}

/// Fresh identifiers that clash with nothing in the unit.
#[derive(Debug)]
pub(crate) struct NameGenerator {
    language: Language,
    taken: FxHashSet<SmolStr>,
}

impl NameGenerator {
    pub(crate) fn new(language: Language) -> Self {
        Self { language, taken: FxHashSet::default() }
    }

    fn key(&self, name: &str) -> SmolStr {
        let bare = unescape_identifier(name);
        if self.language.is_case_sensitive() { SmolStr::new(bare) } else { SmolStr::new(bare.to_lowercase()) }
    }

    pub(crate) fn reserve(&mut self, name: &str) {
        let key = self.key(name);
        self.taken.insert(key);
    }

    pub(crate) fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&self.key(name))
    }

    /// `base` if free, otherwise `base1`, `base2`, ...
    pub(crate) fn fresh(&mut self, base: &str) -> SmolStr {
        let base = if is_valid_identifier(base) { base.to_string() } else { format!("_{base}") };
        let mut candidate = SmolStr::new(&base);
        let mut n = 1u32;
        while self.is_taken(&candidate) {
            candidate = SmolStr::new(format!("{base}{n}"));
            n += 1;
        }
        self.reserve(&candidate);
        candidate
    }
}

pub(crate) struct ConversionContext<'a> {
    pub tree: &'a SyntaxTree,
    pub model: &'a SemanticModel,
    pub options: &'a ConversionOptions,
    pub file: FileId,
    pub target: Language,
    cancel: &'a CancellationToken,
    imports: IndexSet<SmolStr>,
    aliases: IndexMap<SymbolId, (SmolStr, String)>,
    names: NameGenerator,
    output_names: FxHashMap<SymbolId, SmolStr>,
    claimed: FxHashSet<(TokenId, Side)>,
    pending: Vec<Trivia>,
    /// Original text of stubbed expressions, and where each open line's
    /// share of it starts.
    stub_notes: Vec<Trivia>,
    stub_marks: Vec<usize>,
    pub diagnostics: DiagnosticCollector,
    pub state: ConversionState,
}

impl<'a> ConversionContext<'a> {
    pub(crate) fn new(
        tree: &'a SyntaxTree,
        model: &'a SemanticModel,
        options: &'a ConversionOptions,
        cancel: &'a CancellationToken,
        file: FileId,
    ) -> Self {
        let target = tree.language().other();
        let mut names = NameGenerator::new(target);
        for token in tree.all_tokens() {
            if tree.token_kind(token).is_identifier() {
                names.reserve(tree.token_text(token));
            }
        }
        Self {
            tree,
            model,
            options,
            file,
            target,
            cancel,
            imports: IndexSet::new(),
            aliases: IndexMap::new(),
            names,
            output_names: FxHashMap::default(),
            claimed: FxHashSet::default(),
            pending: Vec::new(),
            stub_notes: Vec::new(),
            stub_marks: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            state: ConversionState::Unconverted,
        }
    }

    pub(crate) fn table(&self) -> &'a SymbolTable {
        self.model.table()
    }

    pub(crate) fn cancel_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    pub(crate) fn check_cancelled(&self) -> ConvertResult<()> {
        if self.cancel.is_cancelled() { Err(ConvertError::Cancelled) } else { Ok(()) }
    }

    // ========================================================================
    // SOURCE NAVIGATION
    // ========================================================================

    pub(crate) fn kind(&self, node: NodeId) -> SyntaxKind {
        self.tree.kind(node)
    }

    pub(crate) fn nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.child_nodes(node).collect()
    }

    pub(crate) fn child(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> Option<NodeId> {
        self.tree.child_node_of_kind(node, kind)
    }

    pub(crate) fn children_of(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> Vec<NodeId> {
        let kind = kind.into();
        self.tree.child_nodes(node).filter(|&n| self.tree.kind(n) == kind).collect()
    }

    pub(crate) fn token(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> Option<TokenId> {
        self.tree.child_token_of_kind(node, kind)
    }

    pub(crate) fn has_token(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> bool {
        self.token(node, kind).is_some()
    }

    pub(crate) fn token_kinds(&self, node: NodeId) -> Vec<SyntaxKind> {
        self.tree.child_tokens(node).map(|t| self.tree.token_kind(t)).collect()
    }

    /// The `index`th child node, or an internal error naming what was expected.
    pub(crate) fn nth(&self, node: NodeId, index: usize, what: &str) -> ConvertResult<NodeId> {
        self.tree
            .child_nodes(node)
            .nth(index)
            .ok_or_else(|| ConvertError::internal(self.kind(node), format!("missing {what}")))
    }

    pub(crate) fn require(&self, node: NodeId, kind: impl Into<SyntaxKind>) -> ConvertResult<NodeId> {
        let kind = kind.into();
        self.child(node, kind)
            .ok_or_else(|| ConvertError::internal(self.kind(node), format!("missing {kind}")))
    }

    pub(crate) fn ident_token(&self, node: NodeId) -> ConvertResult<TokenId> {
        self.tree
            .child_tokens(node)
            .find(|&t| self.tree.token_kind(t).is_identifier())
            .ok_or_else(|| ConvertError::internal(self.kind(node), "missing identifier"))
    }

    pub(crate) fn text(&self, token: TokenId) -> &'a str {
        self.tree.token_text(token)
    }

    /// Nearest ancestor (excluding `node`) whose kind satisfies `predicate`.
    pub(crate) fn ancestor(&self, node: NodeId, predicate: impl Fn(SyntaxKind) -> bool) -> Option<NodeId> {
        self.tree.ancestors(node).find(|&a| predicate(self.tree.kind(a)))
    }

    // ========================================================================
    // TRIVIA
    // ========================================================================

    fn claim(&mut self, token: TokenId, side: Side) -> bool {
        self.claimed.insert((token, side))
    }

    /// Converted trivia of one side of a source token, once.
    fn converted(&mut self, token: TokenId, side: Side) -> Vec<Trivia> {
        if !self.claim(token, side) {
            return Vec::new();
        }
        let green = self.tree.token(token);
        let trivia = match side {
            Side::Leading => green.leading(),
            Side::Trailing => green.trailing(),
        };
        convert_trivia(trivia, self.target)
    }

    /// Whitespace that indents the line `token` starts.
    pub(crate) fn indent_of(&self, token: TokenId) -> Vec<Trivia> {
        let leading = self.tree.token(token).leading();
        let start = leading.iter().rposition(|t| t.kind == TriviaKind::EndOfLine).map_or(0, |i| i + 1);
        leading[start..].iter().filter(|t| t.kind == TriviaKind::Whitespace).cloned().collect()
    }

    pub(crate) fn indent_of_node(&self, node: NodeId) -> Vec<Trivia> {
        self.tree.first_token(node).map(|t| self.indent_of(t)).unwrap_or_default()
    }

    fn take_pending(&mut self, indent: &[Trivia]) -> Vec<Trivia> {
        let pending = std::mem::take(&mut self.pending);
        indent_lines(pending, indent)
    }

    /// Leading trivia for the converted form of `node`: relocated comments
    /// first, then the node's own leading trivia.
    pub(crate) fn begin_line(&mut self, node: NodeId) -> Vec<Trivia> {
        self.stub_marks.push(self.stub_notes.len());
        let Some(first) = self.tree.first_token(node) else {
            return Vec::new();
        };
        let indent = self.indent_of(first);
        let mut out = self.take_pending(&indent);
        out.extend(self.converted(first, Side::Leading));
        out
    }

    /// Finish the converted form of `node`: hoist `leading` onto the first
    /// output node, move end-of-line comments onto the last, and queue every
    /// comment inside `node` that no rule emitted.
    pub(crate) fn end_line(&mut self, node: NodeId, mut out: Vec<GreenNode>, mut leading: Vec<Trivia>) -> Vec<GreenNode> {
        let mark = self.stub_marks.pop().unwrap_or(0).min(self.stub_notes.len());
        if mark < self.stub_notes.len() {
            let notes = self.stub_notes.split_off(mark);
            let notes = indent_lines(notes, &self.indent_of_node(node));
            let indent_start = leading.len()
                - leading.iter().rev().take_while(|t| t.kind == TriviaKind::Whitespace).count();
            let indent = leading.split_off(indent_start);
            leading.extend(notes);
            leading.extend(indent);
        }
        let trailing = match self.tree.last_token(node) {
            Some(last) => {
                let converted = self.converted(last, Side::Trailing);
                end_of_line_comments(&converted)
            }
            None => Vec::new(),
        };
        if out.is_empty() {
            if !has_comments(&leading) && trailing.is_empty() {
                self.sweep(node);
                return out;
            }
            out.push(self.carrier());
        }
        if let Some(first) = out.first_mut() {
            *first = first.map_first_token(|t| t.with_prepended_leading_trivia(leading));
        }
        if let Some(last) = out.last_mut() {
            *last = with_eol_comments(last, trailing);
        }
        self.sweep(node);
        out
    }

    /// Queue unclaimed comments and directives inside `node`.
    pub(crate) fn sweep(&mut self, node: NodeId) {
        for token in self.tree.tokens_of(node) {
            for side in [Side::Leading, Side::Trailing] {
                if self.claimed.contains(&(token, side)) {
                    continue;
                }
                let green = self.tree.token(token);
                let trivia = match side {
                    Side::Leading => green.leading(),
                    Side::Trailing => green.trailing(),
                };
                if !has_comments(trivia) {
                    continue;
                }
                let converted = self.converted(token, side);
                tracing::trace!(token = token.index(), "relocating comments");
                self.pending.extend(as_lines(&converted));
            }
        }
    }

    /// Queue the comments of `trivia` for the next line.
    pub(crate) fn defer(&mut self, trivia: &[Trivia]) {
        self.pending.extend(as_lines(trivia));
    }

    /// Claim the leading trivia of `token`, keeping only its comments as
    /// whole lines indented by `indent`.
    pub(crate) fn leading_lines(&mut self, token: TokenId, indent: &[Trivia]) -> Vec<Trivia> {
        let converted = self.converted(token, Side::Leading);
        indent_lines(as_lines(&converted), indent)
    }

    /// Claim the trailing trivia of `token` as end-of-line comments.
    pub(crate) fn trailing_comments(&mut self, token: TokenId) -> Vec<Trivia> {
        let converted = self.converted(token, Side::Trailing);
        end_of_line_comments(&converted)
    }

    /// Claim the trivia of an opening delimiter, returning its comments laid
    /// out for the end of the header line.
    pub(crate) fn take_open(&mut self, token: TokenId) -> Vec<Trivia> {
        let mut converted = self.converted(token, Side::Leading);
        converted.extend(self.converted(token, Side::Trailing));
        end_of_line_comments(&converted)
    }

    /// Leading trivia for a closing delimiter or `End` statement taken from
    /// `token`, the source's own closer.
    pub(crate) fn closing(&mut self, token: TokenId, indent: &[Trivia]) -> Vec<Trivia> {
        let mut out = self.take_pending(indent);
        let converted = self.converted(token, Side::Leading);
        if converted.iter().any(|t| t.kind == TriviaKind::EndOfLine) {
            out.extend(converted);
        } else {
            out.extend(indent_lines(as_lines(&converted), indent));
            out.extend(indent.iter().cloned());
        }
        out
    }

    /// Like [`Self::closing`] when the source has no closer of its own.
    pub(crate) fn closing_pending(&mut self, indent: &[Trivia]) -> Vec<Trivia> {
        let mut out = self.take_pending(indent);
        out.extend(indent.iter().cloned());
        out
    }

    /// Leading trivia for the end-of-file token: everything still pending and
    /// every comment of the unit no rule emitted.
    pub(crate) fn finish_unit(&mut self, eof: Option<TokenId>) -> Vec<Trivia> {
        self.sweep(self.tree.root());
        let mut out = std::mem::take(&mut self.stub_notes);
        out.extend(self.take_pending(&[]));
        if let Some(eof) = eof {
            out.extend(self.converted(eof, Side::Leading));
        }
        out
    }

    /// Claim the trivia between the tokens of `node`; its text is being
    /// embedded somewhere else.
    pub(crate) fn discard(&mut self, node: NodeId) {
        let (Some(first), Some(last)) = (self.tree.first_token(node), self.tree.last_token(node)) else {
            return;
        };
        for token in self.tree.tokens_of(node) {
            if token != first {
                self.claim(token, Side::Leading);
            }
            if token != last {
                self.claim(token, Side::Trailing);
            }
        }
    }

    /// A statement with no text, used to hold trivia.
    pub(crate) fn carrier(&self) -> GreenNode {
        match self.target {
            Language::VisualBasic => vb::empty_statement(),
            Language::CSharp => cs::empty_carrier(),
        }
    }

    /// Attach header comments and closing trivia to a converted block.
    ///
    /// C# targets carry them on the block's braces; VB targets on the opening
    /// statement and the closing `End`/`Loop`/`Next` statement.
    pub(crate) fn decorate_block(&self, block: GreenNode, header: Vec<Trivia>, closing: Vec<Trivia>) -> GreenNode {
        if header.is_empty() && closing.is_empty() {
            return block;
        }
        match self.target {
            Language::CSharp => decorate_braces(block, header, closing),
            Language::VisualBasic => {
                let mut children = block.children().to_vec();
                if let Some(GreenElement::Node(first)) = children.iter_mut().find(|c| c.as_node().is_some()) {
                    *first = with_eol_comments(first, header);
                }
                if !closing.is_empty() {
                    if let Some(GreenElement::Node(last)) = children.iter_mut().rev().find(|c| c.as_node().is_some()) {
                        *last = last.map_first_token(|t| t.with_leading_trivia(closing));
                    }
                }
                block.with_children(children)
            }
        }
    }

    // ========================================================================
    // STUBS AND DIAGNOSTICS
    // ========================================================================

    /// Comment lines holding the original text of `node`, for a stub.
    fn stub_comments(&self, node: NodeId) -> Vec<Trivia> {
        let mut out = Vec::new();
        let label = kind_label(self.kind(node));
        for (i, line) in self.tree.node_text(node).lines().enumerate() {
            let body = if i == 0 { format!("Unsupported {label}: {}", line.trim()) } else { line.trim_end().to_string() };
            out.push(comment_line(self.target, &body));
            out.push(Trivia::end_of_line());
        }
        out
    }

    /// Replace a statement or member that failed to convert.
    pub(crate) fn stub_line(&mut self, node: NodeId, error: &ConvertError) -> GreenNode {
        self.discard(node);
        // the stub carries the whole line, expression notes included
        if let Some(&mark) = self.stub_marks.last() {
            self.stub_notes.truncate(mark);
        }
        let indent = self.indent_of_node(node);
        let comments = indent_lines(self.stub_comments(node), &indent);
        let stub = self.carrier().map_first_token(|t| t.with_leading_trivia(comments));
        let stub = annotations::mark_unsupported(&self.options.annotation_keys, stub, self.tree.node_text(node));
        self.report_failure(node, error);
        stub
    }

    /// Replace an expression that failed to convert with a typed placeholder.
    /// The original text goes above the enclosing line as a comment.
    pub(crate) fn stub_expr(&mut self, node: NodeId, error: &ConvertError) -> GreenNode {
        self.discard(node);
        let notes = self.stub_comments(node);
        self.stub_notes.extend(notes);
        let placeholder = match self.target {
            Language::VisualBasic => vb::nothing_literal(),
            Language::CSharp => cs::default_literal(),
        };
        let stub = annotations::mark_unsupported(&self.options.annotation_keys, placeholder, self.tree.node_text(node));
        self.report_failure(node, error);
        stub
    }

    fn report_failure(&mut self, node: NodeId, error: &ConvertError) {
        let kind = match error {
            ConvertError::Unsupported { .. } => DiagnosticKind::UnsupportedConstruct,
            _ => DiagnosticKind::InternalConversionFailure,
        };
        tracing::debug!(%error, "node replaced by stub");
        self.report(kind, node, error.to_string());
    }

    pub(crate) fn diagnostic(&self, kind: DiagnosticKind, node: NodeId, message: impl Into<std::sync::Arc<str>>) -> Diagnostic {
        let range = self.tree.node_range(node);
        let index = self.tree.line_index();
        let start = index.line_col(range.start());
        let end = index.line_col(range.end());
        Diagnostic::new(kind, self.file, start.line, start.col, message).with_span(end.line, end.col)
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, node: NodeId, message: impl Into<std::sync::Arc<str>>) {
        let diagnostic = self.diagnostic(kind, node, message);
        self.diagnostics.add(diagnostic);
    }

    /// A modifier with no counterpart was left out.
    pub(crate) fn report_dropped_modifier(&mut self, node: NodeId, modifier: &str) {
        let diagnostic = self
            .diagnostic(
                DiagnosticKind::UnsupportedConstruct,
                node,
                format!("modifier `{modifier}` has no {} equivalent and was dropped", self.target),
            )
            .with_severity(Severity::Info)
            .with_code(codes::DROPPED_MODIFIER);
        self.diagnostics.add(diagnostic);
    }

    // ========================================================================
    // ANNOTATIONS
    // ========================================================================

    pub(crate) fn map_source(&self, node: NodeId, green: GreenNode) -> GreenNode {
        if self.options.source_mapping {
            annotations::with_source_mapping_from_node(&self.options.annotation_keys, green, self.tree, node)
        } else {
            green
        }
    }

    /// Stamp the bound symbol and type of `node` onto its converted form.
    pub(crate) fn annotate_expr(&self, node: NodeId, green: GreenNode) -> GreenNode {
        let keys = &self.options.annotation_keys;
        let green = match self.model.type_info(node) {
            Some(ty) => annotations::with_expression_type(keys, green, ty),
            None => green,
        };
        let green = match self.model.symbol_info(node) {
            Some(symbol) => annotations::with_symbol(keys, green, symbol),
            None => green,
        };
        self.map_source(node, green)
    }

    // ========================================================================
    // NAMES
    // ========================================================================

    /// Output spelling of `symbol`: its declared name, escaped for the target.
    /// The first spelling chosen is kept for the rest of the unit.
    pub(crate) fn name_for(&mut self, symbol: SymbolId) -> Option<SmolStr> {
        if let Some(name) = self.output_names.get(&symbol) {
            return Some(name.clone());
        }
        let declared = self.table().get(symbol)?;
        let name = SmolStr::new(escape_identifier(self.target, &declared.name));
        self.output_names.insert(symbol, name.clone());
        Some(name)
    }

    /// An identifier token for the target; bound identifiers use the symbol's
    /// output spelling and carry a symbol annotation.
    pub(crate) fn identifier(&mut self, text: &str, symbol: Option<SymbolId>) -> GreenToken {
        let spelled = symbol.and_then(|s| self.name_for(s));
        let text = match spelled {
            Some(name) if self.tree.language().names_equal(unescape_identifier(text), unescape_identifier(&name)) => {
                name.to_string()
            }
            _ => escape_identifier(self.target, text),
        };
        let token = match self.target {
            Language::VisualBasic => vb::ident(&text),
            Language::CSharp => cs::ident(&text),
        };
        match symbol {
            Some(symbol) => annotations::with_symbol(&self.options.annotation_keys, token, symbol),
            None => token,
        }
    }

    /// Identifier for the source identifier token `token`, bound to whatever
    /// the model says `owner` declares or references.
    pub(crate) fn identifier_of(&mut self, token: TokenId, owner: NodeId) -> GreenToken {
        let symbol = self.model.declared_symbol(owner).or_else(|| self.model.symbol_info(owner));
        let text = self.text(token);
        self.identifier(text, symbol)
    }

    /// Types declared around `node`, innermost first.
    pub(crate) fn enclosing_types(&self, node: NodeId) -> Vec<SymbolId> {
        self.tree
            .ancestors(node)
            .filter_map(|a| match self.kind(a) {
                SyntaxKind::Cs(
                    CsKind::CLASS_DECLARATION | CsKind::STRUCT_DECLARATION | CsKind::INTERFACE_DECLARATION,
                ) => self.model.declared_symbol(a),
                SyntaxKind::Vb(
                    VbKind::CLASS_BLOCK | VbKind::STRUCTURE_BLOCK | VbKind::INTERFACE_BLOCK | VbKind::MODULE_BLOCK,
                ) => self.tree.child_nodes(a).next().and_then(|s| self.model.declared_symbol(s)),
                _ => None,
            })
            .collect()
    }

    /// The type a simple name must be qualified with in the target: shared
    /// members reached from outside their declaring type and its bases.
    /// Names already on the right of a member access never need one.
    pub(crate) fn qualifier_for(&self, node: NodeId) -> Option<SymbolId> {
        let symbol = self.model.symbol(node)?;
        if !symbol.is_static
            || !matches!(
                symbol.kind,
                SymbolKind::Method | SymbolKind::Field | SymbolKind::Property | SymbolKind::Event
            )
        {
            return None;
        }
        let declaring = symbol.containing_type?;
        if let Some(parent) = self.tree.parent(node) {
            let qualified = matches!(
                self.kind(parent),
                SyntaxKind::Cs(CsKind::MEMBER_ACCESS_EXPRESSION | CsKind::QUALIFIED_NAME)
                    | SyntaxKind::Vb(VbKind::MEMBER_ACCESS_EXPRESSION | VbKind::QUALIFIED_NAME)
            );
            if qualified && self.tree.child_nodes(parent).next() != Some(node) {
                return None;
            }
        }
        let table = self.table();
        let reachable = self.enclosing_types(node).iter().any(|&ty| contains_member(table, ty, symbol.id));
        (!reachable).then_some(declaring)
    }

    pub(crate) fn fresh_name(&mut self, base: &str) -> SmolStr {
        self.names.fresh(base)
    }

    pub(crate) fn name_node(&self, dotted: &str) -> GreenNode {
        match self.target {
            Language::VisualBasic => vb::name(dotted),
            Language::CSharp => cs::name(dotted),
        }
    }

    pub(crate) fn require_import(&mut self, namespace: &str) {
        if self.imports.insert(SmolStr::new(namespace)) {
            tracing::trace!(namespace, "import recorded");
        }
    }

    /// Imports recorded while converting, in first-use order.
    pub(crate) fn take_imports(&mut self) -> Vec<SmolStr> {
        std::mem::take(&mut self.imports).into_iter().collect()
    }

    /// Aliases recorded while converting: alias name and aliased full name.
    pub(crate) fn take_aliases(&mut self) -> Vec<(SmolStr, String)> {
        std::mem::take(&mut self.aliases).into_values().collect()
    }

    /// Syntax for the type `ty` in the target language.
    pub(crate) fn type_syntax(&mut self, ty: SymbolId) -> GreenNode {
        let table = self.table();
        let Some(symbol) = table.get(ty) else {
            return self.object_type();
        };
        if let Some(info) = &symbol.type_info {
            if info.type_kind == TypeKind::Array {
                let element = match info.element_type {
                    Some(element) => self.type_syntax(element),
                    None => self.object_type(),
                };
                let rank = info.rank.max(1) as usize;
                return match self.target {
                    Language::VisualBasic => vb::array_type(element, vec![vb::array_rank_specifier(rank)]),
                    Language::CSharp => cs::array_type(element, vec![cs::omitted_rank_specifier(rank)]),
                };
            }
            if info.type_kind == TypeKind::Error || !info.can_be_referenced_by_name {
                return self.object_type();
            }
        }
        if let Some(keyword) = symbol.special_type().and_then(|s| s.keyword(self.target)) {
            return self.keyword_type(keyword);
        }
        self.named_type(ty)
    }

    fn keyword_type(&self, keyword: SyntaxKind) -> GreenNode {
        match (self.target, keyword) {
            (Language::VisualBasic, SyntaxKind::Vb(kw)) => vb::predefined_type(kw),
            (Language::CSharp, SyntaxKind::Cs(kw)) => cs::predefined_type(kw),
            _ => self.object_type(),
        }
    }

    pub(crate) fn object_type(&self) -> GreenNode {
        match self.target {
            Language::VisualBasic => vb::predefined_type(VbKind::OBJECT_KW),
            Language::CSharp => cs::predefined_type(CsKind::OBJECT_KW),
        }
    }

    /// A type referenced by name: nested types are qualified with their
    /// containers, top-level types import their namespace. A simple name
    /// shared by types of different namespaces goes through an alias.
    fn named_type(&mut self, ty: SymbolId) -> GreenNode {
        let table = self.table();
        let Some(symbol) = table.get(ty) else {
            return self.object_type();
        };
        if let Some(container) = symbol.containing_type.filter(|c| table.get(*c).is_some_and(|s| s.is_type())) {
            let left = self.named_type(container);
            let right = self.simple_name(&symbol.name);
            return match self.target {
                Language::VisualBasic => vb::qualified_name(left, right),
                Language::CSharp => cs::qualified_name(left, right),
            };
        }
        let Some(namespace) = table.namespace_of(ty) else {
            return self.simple_name(&symbol.name);
        };
        let ambiguous = table
            .types_named(&symbol.name)
            .iter()
            .any(|&other| other != ty && table.namespace_of(other) != Some(namespace));
        if ambiguous {
            let alias = self.alias_for(ty, namespace, &symbol.name);
            return self.simple_name(&alias);
        }
        self.require_import(namespace);
        self.simple_name(&symbol.name)
    }

    fn alias_for(&mut self, ty: SymbolId, namespace: &str, name: &str) -> SmolStr {
        if let Some((alias, _)) = self.aliases.get(&ty) {
            return alias.clone();
        }
        let prefix = namespace.rsplit('.').next().unwrap_or(namespace);
        let alias = self.fresh_name(&format!("{prefix}{name}"));
        tracing::trace!(%alias, namespace, name, "type alias recorded");
        self.aliases.insert(ty, (alias.clone(), format!("{namespace}.{name}")));
        alias
    }

    fn simple_name(&self, name: &str) -> GreenNode {
        let escaped = escape_identifier(self.target, name);
        match self.target {
            Language::VisualBasic => vb::identifier_name(vb::ident(&escaped)),
            Language::CSharp => cs::identifier_name(cs::ident(&escaped)),
        }
    }
}

/// Put `indent` before each line of a run of comment lines.
pub(crate) fn indent_lines(lines: Vec<Trivia>, indent: &[Trivia]) -> Vec<Trivia> {
    if indent.is_empty() || lines.is_empty() {
        return lines;
    }
    let mut out = Vec::with_capacity(lines.len() * 2);
    let mut at_line_start = true;
    for item in lines {
        if at_line_start && item.kind != TriviaKind::EndOfLine {
            out.extend(indent.iter().cloned());
        }
        at_line_start = item.kind == TriviaKind::EndOfLine;
        out.push(item);
    }
    out
}

/// One nesting level deeper than `indent`.
pub(crate) fn nested_indent(indent: &[Trivia]) -> Vec<Trivia> {
    let mut out = indent.to_vec();
    out.push(Trivia::whitespace("    "));
    out
}

/// Move a statement that shared a line with its parent onto its own line at
/// `indent`, keeping any comments in front of it.
pub(crate) fn reindent(node: GreenNode, indent: &[Trivia]) -> GreenNode {
    node.map_first_token(|t| {
        if t.leading().iter().any(|x| x.kind == TriviaKind::EndOfLine) {
            return t;
        }
        let mut leading = indent.to_vec();
        leading.extend(t.leading().iter().filter(|x| x.kind != TriviaKind::Whitespace).cloned());
        t.with_leading_trivia(leading)
    })
}

/// Replace the trailing layout of `token` with end-of-line comments.
pub(crate) fn token_with_eol_comments(token: GreenToken, comments: Vec<Trivia>) -> GreenToken {
    if comments.is_empty() {
        return token;
    }
    let mut trailing = token.trailing().to_vec();
    while trailing.last().is_some_and(|t| t.kind.is_layout()) {
        trailing.pop();
    }
    trailing.extend(comments);
    token.with_trailing_trivia(trailing)
}

pub(crate) fn with_eol_comments(node: &GreenNode, comments: Vec<Trivia>) -> GreenNode {
    if comments.is_empty() {
        return node.clone();
    }
    node.map_last_token(|t| token_with_eol_comments(t, comments))
}

fn decorate_braces(node: GreenNode, header: Vec<Trivia>, closing: Vec<Trivia>) -> GreenNode {
    let children = node.children();
    let open = children.iter().position(|c| c.kind() == CsKind::L_BRACE);
    let close = children.iter().rposition(|c| c.kind() == CsKind::R_BRACE);
    if let (Some(open), Some(close)) = (open, close) {
        let mut children = children.to_vec();
        if let GreenElement::Token(t) = &children[open] {
            children[open] = GreenElement::Token(token_with_eol_comments(t.clone(), header));
        }
        if !closing.is_empty() {
            if let GreenElement::Token(t) = &children[close] {
                children[close] = GreenElement::Token(t.clone().with_leading_trivia(closing));
            }
        }
        return node.with_children(children);
    }
    let inner = children
        .iter()
        .rposition(|c| matches!(c.kind(), SyntaxKind::Cs(CsKind::BLOCK | CsKind::ACCESSOR_LIST)));
    match inner {
        Some(index) => {
            let mut children = children.to_vec();
            if let GreenElement::Node(block) = &children[index] {
                children[index] = GreenElement::Node(decorate_braces(block.clone(), header, closing));
            }
            node.with_children(children)
        }
        None => node,
    }
}

/// `FOR_STATEMENT` → `for statement`, for stub comments.
fn kind_label(kind: SyntaxKind) -> String {
    let name = match kind {
        SyntaxKind::Cs(k) => format!("{k:?}"),
        SyntaxKind::Vb(k) => format!("{k:?}"),
    };
    name.to_lowercase().replace('_', " ")
}

/// Lines of `first` followed by `second`, dropping the indentation `first`
/// ends with.
pub(crate) fn join_lines(mut first: Vec<Trivia>, second: Vec<Trivia>) -> Vec<Trivia> {
    while first.last().is_some_and(|t| t.kind == TriviaKind::Whitespace) {
        first.pop();
    }
    first.extend(second);
    first
}

/// The text of a token with no trivia, for rebuilding as the other language.
pub(crate) fn bare(token: &GreenToken) -> GreenToken {
    token.clone().without_trivia()
}

/// `factory::end_line` for callers that hold a `Vec`.
pub(crate) fn end_lines(nodes: Vec<GreenNode>) -> Vec<GreenNode> {
    nodes.into_iter().map(factory::end_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::Header;
    use std::sync::Arc;

    fn unit(source: GreenNode) -> (SyntaxTree, SemanticModel) {
        let tree = SyntaxTree::new(source);
        let model = SemanticModel::new(&tree, Arc::new(SymbolTable::with_special_types()));
        (tree, model)
    }

    fn commented_field() -> GreenNode {
        let decl = cs::variable_declaration(
            cs::predefined_type(CsKind::INT_KW),
            vec![cs::variable_declarator(cs::ident("x"), None)],
        );
        let field = cs::field_declaration(Header::default(), decl).map_first_token(|t| {
            t.with_leading_trivia(vec![
                Trivia::whitespace("    "),
                Trivia::line_comment("// note"),
                Trivia::end_of_line(),
                Trivia::whitespace("    "),
            ])
        });
        let field = field.map_last_token(|t| {
            t.with_trailing_trivia(vec![Trivia::space(), Trivia::line_comment("// tail"), Trivia::end_of_line()])
        });
        cs::compilation_unit(vec![field])
    }

    #[test]
    fn test_name_generator_avoids_taken_names() {
        let mut names = NameGenerator::new(Language::VisualBasic);
        names.reserve("Value");
        assert_eq!(names.fresh("value"), "value1");
        assert_eq!(names.fresh("value"), "value2");
        assert_eq!(names.fresh("other"), "other");
        assert_eq!(names.fresh("1st"), "_1st");

        let mut names = NameGenerator::new(Language::CSharp);
        names.reserve("Value");
        assert_eq!(names.fresh("value"), "value");
    }

    #[test]
    fn test_trivia_is_claimed_once() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let mut ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(0));
        let field = tree.child_nodes(tree.root()).next().unwrap();

        let leading = ctx.begin_line(field);
        assert!(leading.iter().any(|t| t.text == "' note"));
        assert!(ctx.begin_line(field).is_empty());

        let out = ctx.end_line(field, vec![vb::empty_statement()], leading);
        let text = out[0].to_text();
        assert!(text.contains("' note"));
        assert!(text.ends_with(" ' tail\n"));
        assert!(ctx.finish_unit(None).is_empty());
    }

    #[test]
    fn test_unemitted_comments_reach_end_of_file() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let mut ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(0));
        let eof = tree.last_token(tree.root());
        let flushed = ctx.finish_unit(eof);
        let comments: Vec<_> = flushed.iter().filter(|t| t.is_comment()).map(|t| t.text.to_string()).collect();
        assert_eq!(comments, vec!["' note", "' tail"]);
    }

    #[test]
    fn test_stub_line_keeps_original_text() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let mut ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(3));
        let field = tree.child_nodes(tree.root()).next().unwrap();
        let error = ConvertError::unsupported(CsKind::FIELD_DECLARATION, "test");

        let stub = ctx.stub_line(field, &error);
        assert!(stub.to_text().contains("' Unsupported field declaration: int x;"));
        assert_eq!(
            annotations::unsupported_text(&options.annotation_keys, &stub),
            Some("int x;")
        );
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics.diagnostics()[0].file, FileId::new(3));
    }

    #[test]
    fn test_stub_expr_shows_original_text_above_line() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let mut ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(0));
        let field = tree.child_nodes(tree.root()).next().unwrap();
        let declaration = tree.child_nodes(field).next().unwrap();
        let ty = tree.child_nodes(declaration).next().unwrap();
        let error = ConvertError::internal(CsKind::PREDEFINED_TYPE, "test");

        let leading = ctx.begin_line(field);
        let placeholder = ctx.stub_expr(ty, &error);
        assert_eq!(placeholder.to_text(), "Nothing");
        let out = ctx.end_line(field, vec![vb::empty_statement()], leading);
        let text = out[0].to_text();
        let note = text.find("' note").unwrap();
        let stub = text.find("' Unsupported").unwrap();
        assert!(note < stub);
        assert!(text[stub..].lines().next().unwrap().ends_with(": int"));
        assert_eq!(ctx.diagnostics.len(), 1);
    }

    #[test]
    fn test_cancellation_is_observed() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(0));
        assert!(ctx.check_cancelled().is_ok());
        cancel.cancel();
        assert_eq!(ctx.check_cancelled(), Err(ConvertError::Cancelled));
    }

    #[test]
    fn test_decorate_block_on_braces() {
        let (tree, model) = unit(commented_field());
        let options = ConversionOptions::default();
        let cancel = CancellationToken::new();
        let ctx = ConversionContext::new(&tree, &model, &options, &cancel, FileId::new(0));
        // the context converts C# to VB; decorate a VB block
        let block = vb::while_block(vb::true_literal(), vec![]);
        let block = ctx.decorate_block(
            block,
            vec![Trivia::space(), Trivia::line_comment("' open"), Trivia::end_of_line()],
            vec![Trivia::whitespace("  ")],
        );
        assert_eq!(block.to_text(), "While True ' open\n  End While");

        let braces = decorate_braces(
            cs::block(vec![]),
            vec![Trivia::space(), Trivia::line_comment("// open"), Trivia::end_of_line()],
            vec![Trivia::whitespace("  ")],
        );
        assert_eq!(braces.to_text(), "{ // open\n  }");
    }
}
