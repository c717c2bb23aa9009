//! Visual Basic → C#.
//!
//! Same layout as the other direction: [`role`] sorts every Visual Basic
//! kind, and the `member`, `statement`, `expr` and `ty` entry points
//! dispatch on it. Visual Basic blocks are an opening statement, a body and
//! an `End`/`Loop`/`Next` statement; [`VbToCs::body`] turns that shape into
//! the statements and brace trivia of a C# block.

mod declarations;
mod expressions;
mod statements;

pub(crate) use declarations::convert_unit;

use super::context::{Body, ConversionContext, Role};
use super::error::{ConvertError, ConvertResult};
use crate::semantic::{Symbol, SymbolKind, TypeKind};
use crate::syntax::{GreenNode, NodeId, SyntaxKind, TokenId, Trivia, VbKind};

pub(crate) struct VbToCs<'c, 'a> {
    pub(crate) ctx: &'c mut ConversionContext<'a>,
}

impl<'c, 'a> VbToCs<'c, 'a> {
    pub(crate) fn new(ctx: &'c mut ConversionContext<'a>) -> Self {
        Self { ctx }
    }

    /// The Visual Basic kind of `node`; a C# kind means the tree is corrupt.
    pub(crate) fn kind(&self, node: NodeId) -> ConvertResult<VbKind> {
        let kind = self.ctx.kind(node);
        kind.as_vb()
            .ok_or_else(|| ConvertError::Malformed(format!("{kind} node in a Visual Basic tree")))
    }

    /// Convert one line-level construct, recovering local failures as a stub
    /// and carrying the node's trivia onto the result.
    pub(crate) fn line(
        &mut self,
        node: NodeId,
        convert: impl FnOnce(&mut Self) -> ConvertResult<Vec<GreenNode>>,
    ) -> ConvertResult<Vec<GreenNode>> {
        self.ctx.check_cancelled()?;
        let leading = self.ctx.begin_line(node);
        let out = match convert(self) {
            Ok(out) => out.into_iter().map(|green| self.ctx.map_source(node, green)).collect(),
            Err(error) if error.is_recoverable() => vec![self.ctx.stub_line(node, &error)],
            Err(error) => return Err(error),
        };
        Ok(self.ctx.end_line(node, out, leading))
    }

    pub(crate) fn token_kind(&self, token: TokenId) -> Option<VbKind> {
        self.ctx.tree.token_kind(token).as_vb()
    }

    /// Header comments from the end of an opening statement, for its `{`.
    pub(crate) fn open(&mut self, statement: NodeId) -> Vec<Trivia> {
        match self.ctx.tree.last_token(statement) {
            Some(last) => self.ctx.trailing_comments(last),
            None => Vec::new(),
        }
    }

    /// Leading trivia for the `}` that replaces the statement `closer`.
    pub(crate) fn close(&mut self, closer: Option<NodeId>, indent: &[Trivia]) -> Vec<Trivia> {
        match closer.and_then(|c| self.ctx.tree.first_token(c)) {
            Some(first) => self.ctx.closing(first, indent),
            None => self.ctx.closing_pending(indent),
        }
    }

    /// The `End`, `Loop` or `Next` statement closing `block`.
    pub(crate) fn closer(&self, block: NodeId) -> Option<NodeId> {
        self.ctx.tree.child_nodes(block).last().filter(|&last| {
            matches!(
                self.ctx.kind(last),
                SyntaxKind::Vb(VbKind::END_BLOCK_STATEMENT | VbKind::LOOP_STATEMENT | VbKind::NEXT_STATEMENT)
            )
        })
    }

    /// Statements of one segment of a block: everything after its opening
    /// statement up to the next clause. `closer` is the statement whose
    /// line the closing brace takes over.
    pub(crate) fn body(&mut self, segment: NodeId, closer: Option<NodeId>, indent: &[Trivia]) -> ConvertResult<Body> {
        self.body_except(segment, closer, indent, None)
    }

    /// [`Self::body`] leaving out `skip`, a statement some other construct
    /// has already taken over.
    pub(crate) fn body_except(
        &mut self,
        segment: NodeId,
        closer: Option<NodeId>,
        indent: &[Trivia],
        skip: Option<NodeId>,
    ) -> ConvertResult<Body> {
        let mut children = self.ctx.nodes(segment).into_iter();
        let header = match children.next() {
            Some(opening) => self.open(opening),
            None => Vec::new(),
        };
        let mut statements = Vec::new();
        for child in children {
            if Some(child) == skip {
                self.ctx.sweep(child);
                continue;
            }
            let kind = self.kind(child)?;
            if matches!(role(kind), Role::Statement | Role::Unsupported) {
                statements.extend(self.statement(child)?);
            }
        }
        let closing = self.close(closer, indent);
        Ok(Body { statements, header, closing })
    }

    /// [`Self::body`] for a block closed by its own last statement.
    pub(crate) fn block_body(&mut self, block: NodeId, indent: &[Trivia]) -> ConvertResult<Body> {
        let closer = self.closer(block);
        self.body(block, closer, indent)
    }

    /// Symbol a name or member access refers to.
    pub(crate) fn bound(&self, node: NodeId) -> Option<&'a Symbol> {
        let model = self.ctx.model;
        model.symbol(node).or_else(|| match self.ctx.kind(node) {
            SyntaxKind::Vb(VbKind::MEMBER_ACCESS_EXPRESSION | VbKind::QUALIFIED_NAME) => {
                self.ctx.tree.child_nodes(node).last().and_then(|name| model.symbol(name))
            }
            _ => None,
        })
    }

    /// Whether `callee(args)` indexes a value rather than calling something.
    /// Unbound callees stay calls.
    pub(crate) fn is_indexed(&self, callee: NodeId) -> bool {
        let table = self.ctx.table();
        match self.bound(callee) {
            Some(symbol) if symbol.kind.is_value() => {
                let ty = symbol.ty.and_then(|t| table.get(t)).and_then(|t| t.type_kind());
                ty != Some(TypeKind::Delegate)
            }
            Some(_) => false,
            None => self
                .ctx
                .model
                .type_symbol(callee)
                .and_then(|t| t.type_kind())
                .is_some_and(|k| k == TypeKind::Array),
        }
    }

    /// A method named outside a call: Visual Basic calls it, C# needs `()`.
    pub(crate) fn is_implicit_call(&self, node: NodeId) -> bool {
        if !self.bound(node).is_some_and(|s| s.kind == SymbolKind::Method) {
            return false;
        }
        let Some(parent) = self.ctx.tree.parent(node) else {
            return true;
        };
        match self.ctx.kind(parent) {
            SyntaxKind::Vb(VbKind::INVOCATION_EXPRESSION) => self.ctx.tree.child_nodes(parent).next() != Some(node),
            SyntaxKind::Vb(VbKind::ADDRESS_OF_EXPRESSION) => false,
            SyntaxKind::Vb(VbKind::MEMBER_ACCESS_EXPRESSION) => {
                self.ctx.tree.child_nodes(parent).next() == Some(node)
            }
            _ => true,
        }
    }

    /// The innermost type block around `node`, if it is a `Module`.
    pub(crate) fn in_module(&self, node: NodeId) -> bool {
        let container = self.ctx.ancestor(node, |k| {
            matches!(
                k,
                SyntaxKind::Vb(
                    VbKind::CLASS_BLOCK | VbKind::STRUCTURE_BLOCK | VbKind::INTERFACE_BLOCK | VbKind::MODULE_BLOCK
                )
            )
        });
        container.is_some_and(|c| self.ctx.kind(c) == VbKind::MODULE_BLOCK)
    }

    /// Indentation of the statement or member containing `node`.
    pub(crate) fn line_indent(&self, node: NodeId) -> Vec<Trivia> {
        let line = std::iter::once(node)
            .chain(self.ctx.tree.ancestors(node))
            .find(|&n| {
                self.ctx
                    .kind(n)
                    .as_vb()
                    .is_some_and(|k| matches!(role(k), Role::Statement | Role::Member))
            });
        line.map(|n| self.ctx.indent_of_node(n)).unwrap_or_default()
    }
}

pub(crate) fn malformed_token(kind: VbKind) -> ConvertError {
    ConvertError::Malformed(format!("token {kind:?} where a node was expected"))
}

pub(crate) fn unsupported(kind: VbKind) -> ConvertError {
    let detail = match kind {
        VbKind::SELECT_BLOCK => "Select Case is not converted",
        VbKind::GO_TO_STATEMENT => "GoTo has no structured equivalent",
        VbKind::ON_ERROR_STATEMENT => "On Error has no C# equivalent",
        VbKind::WITH_BLOCK => "With blocks are not converted",
        _ => "no conversion rule",
    };
    ConvertError::unsupported(kind, detail)
}

/// Position class of every Visual Basic kind.
pub(crate) fn role(kind: VbKind) -> Role {
    use VbKind::*;
    match kind {
        COMPILATION_UNIT => Role::Unit,

        NAMESPACE_BLOCK | CLASS_BLOCK | STRUCTURE_BLOCK | INTERFACE_BLOCK | MODULE_BLOCK | ENUM_BLOCK
        | DELEGATE_STATEMENT | METHOD_BLOCK | METHOD_STATEMENT | CONSTRUCTOR_BLOCK | PROPERTY_BLOCK
        | PROPERTY_STATEMENT | FIELD_DECLARATION | EVENT_STATEMENT => Role::Member,

        LOCAL_DECLARATION_STATEMENT | EXPRESSION_STATEMENT | ASSIGNMENT_STATEMENT | ADD_HANDLER_STATEMENT
        | REMOVE_HANDLER_STATEMENT | RAISE_EVENT_STATEMENT | MULTI_LINE_IF_BLOCK | WHILE_BLOCK | DO_LOOP_BLOCK
        | FOR_EACH_BLOCK | RETURN_STATEMENT | THROW_STATEMENT | EXIT_STATEMENT | CONTINUE_STATEMENT | TRY_BLOCK
        | USING_BLOCK | EMPTY_STATEMENT => Role::Statement,

        SELECT_BLOCK | GO_TO_STATEMENT | ON_ERROR_STATEMENT | WITH_BLOCK => Role::Unsupported,

        IDENTIFIER_NAME | GENERIC_NAME | QUALIFIED_NAME | GLOBAL_NAME | PREDEFINED_TYPE | MEMBER_ACCESS_EXPRESSION
        | INVOCATION_EXPRESSION | LITERAL_EXPRESSION | PARENTHESIZED_EXPRESSION | BINARY_EXPRESSION
        | UNARY_EXPRESSION | TERNARY_CONDITIONAL_EXPRESSION | BINARY_CONDITIONAL_EXPRESSION | CAST_EXPRESSION
        | OBJECT_CREATION_EXPRESSION | ARRAY_CREATION_EXPRESSION | COLLECTION_INITIALIZER | ME_EXPRESSION
        | MY_BASE_EXPRESSION | GET_TYPE_EXPRESSION | TYPE_OF_IS_EXPRESSION | SINGLE_LINE_LAMBDA_EXPRESSION
        | MULTI_LINE_LAMBDA_EXPRESSION | ADDRESS_OF_EXPRESSION => Role::Expression,

        ARRAY_TYPE | NULLABLE_TYPE => Role::Type,

        IMPORTS_STATEMENT | IMPORT_ALIAS_CLAUSE | NAMESPACE_STATEMENT | END_BLOCK_STATEMENT | CLASS_STATEMENT
        | STRUCTURE_STATEMENT | INTERFACE_STATEMENT | MODULE_STATEMENT | ENUM_STATEMENT
        | ENUM_MEMBER_DECLARATION | INHERITS_STATEMENT | IMPLEMENTS_STATEMENT | TYPE_PARAMETER_LIST
        | TYPE_PARAMETER | SUB_NEW_STATEMENT | ACCESSOR_BLOCK | ACCESSOR_STATEMENT | VARIABLE_DECLARATOR
        | MODIFIED_IDENTIFIER | SIMPLE_AS_CLAUSE | AS_NEW_CLAUSE | EQUALS_VALUE | PARAMETER_LIST | PARAMETER
        | ATTRIBUTE_LIST | ATTRIBUTE_TARGET | ATTRIBUTE | IF_STATEMENT | ELSE_IF_BLOCK | ELSE_IF_STATEMENT
        | ELSE_BLOCK | ELSE_STATEMENT | WHILE_STATEMENT | DO_STATEMENT | LOOP_STATEMENT | FOR_EACH_STATEMENT
        | NEXT_STATEMENT | TRY_STATEMENT | CATCH_BLOCK | CATCH_STATEMENT | FINALLY_BLOCK | FINALLY_STATEMENT
        | USING_STATEMENT | TYPE_ARGUMENT_LIST | ARRAY_RANK_SPECIFIER | ARGUMENT_LIST | SIMPLE_ARGUMENT
        | LAMBDA_HEADER => Role::Part,

        EOF_TOKEN | BAD_TOKEN | EMPTY_TOKEN | IDENT | NUMERIC_LITERAL | STRING_LITERAL | CHAR_LITERAL | L_PAREN
        | R_PAREN | L_BRACE | R_BRACE | DOT | COMMA | EQ | LT_GT | LT | GT | LT_EQ | GT_EQ | PLUS | MINUS | STAR
        | SLASH | BACKSLASH | CARET | AMP | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | BACKSLASH_EQ | AMP_EQ | LT_LT
        | GT_GT | COLON | COLON_EQ | QUESTION => Role::Token,

        ADD_HANDLER_KW | ADDRESS_OF_KW | AND_KW | AND_ALSO_KW | AS_KW | ASSEMBLY_KW | BOOLEAN_KW | BY_REF_KW
        | BY_VAL_KW | BYTE_KW | CALL_KW | CASE_KW | CATCH_KW | CHAR_KW | CLASS_KW | CONST_KW | CONTINUE_KW
        | CTYPE_KW | DATE_KW | DECIMAL_KW | DELEGATE_KW | DIM_KW | DIRECT_CAST_KW | DO_KW | DOUBLE_KW | EACH_KW
        | ELSE_KW | ELSE_IF_KW | END_KW | ENUM_KW | ERROR_KW | EVENT_KW | EXIT_KW | FALSE_KW | FINALLY_KW
        | FOR_KW | FRIEND_KW | FUNCTION_KW | GET_KW | GET_TYPE_KW | GLOBAL_KW | GO_TO_KW | HANDLES_KW | IF_KW
        | IMPLEMENTS_KW | IMPORTS_KW | IN_KW | INHERITS_KW | INTEGER_KW | INTERFACE_KW | IS_KW | IS_NOT_KW
        | LONG_KW | LOOP_KW | ME_KW | MOD_KW | MODULE_KW | MUST_INHERIT_KW | MUST_OVERRIDE_KW | MY_BASE_KW
        | NAMESPACE_KW | NEW_KW | NEXT_KW | NOT_KW | NOT_INHERITABLE_KW | NOT_OVERRIDABLE_KW | NOTHING_KW
        | OBJECT_KW | OF_KW | ON_KW | OPTIONAL_KW | OR_KW | OR_ELSE_KW | OVERRIDABLE_KW | OVERRIDES_KW
        | PARAM_ARRAY_KW | PARTIAL_KW | PRIVATE_KW | PROPERTY_KW | PROTECTED_KW | PUBLIC_KW | RAISE_EVENT_KW
        | READ_ONLY_KW | REMOVE_HANDLER_KW | RETURN_KW | SBYTE_KW | SELECT_KW | SET_KW | SHADOWS_KW | SHARED_KW
        | SHORT_KW | SINGLE_KW | STATIC_KW | STEP_KW | STRING_KW | STRUCTURE_KW | SUB_KW | THEN_KW | THROW_KW
        | TO_KW | TRUE_KW | TRY_KW | TRY_CAST_KW | TYPE_OF_KW | UINTEGER_KW | ULONG_KW | UNTIL_KW | USHORT_KW
        | USING_KW | WHILE_KW | WITH_KW | WRITE_ONLY_KW | XOR_KW => Role::Token,

        OUT_KW | FROM_KW => Role::Token,

        __LAST => Role::Token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_cover_node_kinds() {
        assert_eq!(role(VbKind::CLASS_BLOCK), Role::Member);
        assert_eq!(role(VbKind::METHOD_STATEMENT), Role::Member);
        assert_eq!(role(VbKind::DO_LOOP_BLOCK), Role::Statement);
        assert_eq!(role(VbKind::ADDRESS_OF_EXPRESSION), Role::Expression);
        assert_eq!(role(VbKind::NULLABLE_TYPE), Role::Type);
        assert_eq!(role(VbKind::ELSE_IF_BLOCK), Role::Part);
        assert_eq!(role(VbKind::WITH_BLOCK), Role::Unsupported);
        assert_eq!(role(VbKind::FROM_KW), Role::Token);
    }

    #[test]
    fn test_tokens_and_nodes_agree_with_kind_ranges() {
        for kind in [VbKind::EOF_TOKEN, VbKind::QUESTION, VbKind::XOR_KW, VbKind::OUT_KW] {
            assert!(kind.is_token());
            assert_eq!(role(kind), Role::Token);
        }
        for kind in [VbKind::COMPILATION_UNIT, VbKind::LAMBDA_HEADER, VbKind::ADDRESS_OF_EXPRESSION] {
            assert!(kind.is_node());
            assert_ne!(role(kind), Role::Token);
        }
    }

    #[test]
    fn test_unsupported_kinds_explain_themselves() {
        let error = unsupported(VbKind::ON_ERROR_STATEMENT);
        assert!(error.to_string().contains("On Error"));
        assert!(error.is_recoverable());
    }
}
