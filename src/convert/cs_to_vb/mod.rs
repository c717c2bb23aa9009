//! C# → Visual Basic.
//!
//! [`role`] sorts every C# kind into the position it may occupy; the
//! `member`, `statement`, `expr` and `ty` entry points dispatch on it and
//! recover from local failures at their own granularity.

mod declarations;
mod expressions;
mod statements;

pub(crate) use declarations::convert_unit;

use super::context::{ConversionContext, Role};
use super::error::{ConvertError, ConvertResult};
use crate::semantic::{Symbol, SymbolKind};
use crate::syntax::{CsKind, GreenNode, NodeId, SyntaxKind, TokenId, Trivia};

pub(crate) struct CsToVb<'c, 'a> {
    pub(crate) ctx: &'c mut ConversionContext<'a>,
}

impl<'c, 'a> CsToVb<'c, 'a> {
    pub(crate) fn new(ctx: &'c mut ConversionContext<'a>) -> Self {
        Self { ctx }
    }

    /// The C# kind of `node`; a Visual Basic kind means the tree is corrupt.
    pub(crate) fn kind(&self, node: NodeId) -> ConvertResult<CsKind> {
        let kind = self.ctx.kind(node);
        kind.as_cs()
            .ok_or_else(|| ConvertError::Malformed(format!("{kind} node in a C# tree")))
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

    pub(crate) fn token_kind(&self, token: TokenId) -> Option<CsKind> {
        self.ctx.tree.token_kind(token).as_cs()
    }

    /// Header comments from the `{` of `node`.
    pub(crate) fn open(&mut self, node: NodeId) -> Vec<Trivia> {
        match self.ctx.token(node, CsKind::L_BRACE) {
            Some(brace) => self.ctx.take_open(brace),
            None => Vec::new(),
        }
    }

    /// Leading trivia for the `End` that replaces the `}` of `node`.
    pub(crate) fn close(&mut self, node: NodeId, indent: &[Trivia]) -> Vec<Trivia> {
        match self.ctx.token(node, CsKind::R_BRACE) {
            Some(brace) => self.ctx.closing(brace, indent),
            None => self.ctx.closing_pending(indent),
        }
    }

    /// Symbol a name or member access refers to.
    pub(crate) fn bound(&self, node: NodeId) -> Option<&'a Symbol> {
        let model = self.ctx.model;
        model.symbol(node).or_else(|| match self.ctx.kind(node) {
            SyntaxKind::Cs(CsKind::MEMBER_ACCESS_EXPRESSION | CsKind::QUALIFIED_NAME) => {
                self.ctx.tree.child_nodes(node).last().and_then(|name| model.symbol(name))
            }
            _ => None,
        })
    }

    /// A method named without being called: `AddressOf` in Visual Basic.
    pub(crate) fn is_method_group(&self, node: NodeId) -> bool {
        if !self.bound(node).is_some_and(|s| s.kind == SymbolKind::Method) {
            return false;
        }
        let Some(parent) = self.ctx.tree.parent(node) else {
            return false;
        };
        match self.ctx.kind(parent) {
            SyntaxKind::Cs(CsKind::INVOCATION_EXPRESSION) => self.ctx.tree.child_nodes(parent).next() != Some(node),
            SyntaxKind::Cs(CsKind::MEMBER_ACCESS_EXPRESSION) => false,
            _ => true,
        }
    }

    /// `var` in a declaration, unless a type of that name is in scope.
    pub(crate) fn is_var(&self, ty: NodeId) -> bool {
        self.ctx.kind(ty) == CsKind::IDENTIFIER_NAME
            && self.ctx.tree.node_text(ty) == "var"
            && self.ctx.model.symbol_info(ty).is_none()
    }

    /// A top-level `static class`, which becomes a `Module`.
    pub(crate) fn is_module(&self, node: NodeId) -> bool {
        self.ctx.kind(node) == CsKind::CLASS_DECLARATION
            && self.ctx.has_token(node, CsKind::STATIC_KW)
            && !self.ctx.has_token(node, CsKind::ABSTRACT_KW)
            && self.ctx.child(node, CsKind::TYPE_PARAMETER_LIST).is_none()
            && self.ctx.tree.parent(node).is_some_and(|p| {
                matches!(
                    self.ctx.kind(p),
                    SyntaxKind::Cs(CsKind::COMPILATION_UNIT | CsKind::NAMESPACE_DECLARATION)
                )
            })
    }

    /// Indentation of the statement or member containing `node`.
    pub(crate) fn line_indent(&self, node: NodeId) -> Vec<Trivia> {
        let line = std::iter::once(node)
            .chain(self.ctx.tree.ancestors(node))
            .find(|&n| {
                self.ctx
                    .kind(n)
                    .as_cs()
                    .is_some_and(|k| matches!(role(k), Role::Statement | Role::Member) && k != CsKind::BLOCK)
            });
        line.map(|n| self.ctx.indent_of_node(n)).unwrap_or_default()
    }
}

pub(crate) fn malformed_token(kind: CsKind) -> ConvertError {
    ConvertError::Malformed(format!("token {kind:?} where a node was expected"))
}

pub(crate) fn unsupported(kind: CsKind) -> ConvertError {
    let detail = match kind {
        CsKind::FOR_STATEMENT => "for loops are not converted",
        CsKind::SWITCH_STATEMENT => "switch statements are not converted",
        CsKind::GOTO_STATEMENT => "goto has no structured equivalent",
        CsKind::UNSAFE_STATEMENT => "unsafe code has no Visual Basic equivalent",
        CsKind::POINTER_TYPE => "pointer types have no Visual Basic equivalent",
        _ => "no conversion rule",
    };
    ConvertError::unsupported(kind, detail)
}

/// Position class of every C# kind.
pub(crate) fn role(kind: CsKind) -> Role {
    use CsKind::*;
    match kind {
        COMPILATION_UNIT => Role::Unit,

        NAMESPACE_DECLARATION | CLASS_DECLARATION | STRUCT_DECLARATION | INTERFACE_DECLARATION
        | ENUM_DECLARATION | DELEGATE_DECLARATION | METHOD_DECLARATION | CONSTRUCTOR_DECLARATION
        | PROPERTY_DECLARATION | FIELD_DECLARATION | EVENT_FIELD_DECLARATION => Role::Member,

        BLOCK | LOCAL_DECLARATION_STATEMENT | EXPRESSION_STATEMENT | IF_STATEMENT | WHILE_STATEMENT
        | DO_STATEMENT | FOR_EACH_STATEMENT | RETURN_STATEMENT | THROW_STATEMENT | BREAK_STATEMENT
        | CONTINUE_STATEMENT | TRY_STATEMENT | USING_STATEMENT | EMPTY_STATEMENT => Role::Statement,

        FOR_STATEMENT | SWITCH_STATEMENT | GOTO_STATEMENT | UNSAFE_STATEMENT | POINTER_TYPE => Role::Unsupported,

        IDENTIFIER_NAME | GENERIC_NAME | QUALIFIED_NAME | ALIAS_QUALIFIED_NAME | PREDEFINED_TYPE
        | MEMBER_ACCESS_EXPRESSION | INVOCATION_EXPRESSION | ELEMENT_ACCESS_EXPRESSION | LITERAL_EXPRESSION
        | DEFAULT_EXPRESSION | PARENTHESIZED_EXPRESSION | BINARY_EXPRESSION | PREFIX_UNARY_EXPRESSION
        | POSTFIX_UNARY_EXPRESSION | ASSIGNMENT_EXPRESSION | CONDITIONAL_EXPRESSION | CAST_EXPRESSION
        | OBJECT_CREATION_EXPRESSION | ARRAY_CREATION_EXPRESSION | INITIALIZER_EXPRESSION | THIS_EXPRESSION
        | BASE_EXPRESSION | TYPE_OF_EXPRESSION | PARENTHESIZED_LAMBDA_EXPRESSION | SIMPLE_LAMBDA_EXPRESSION
        | ANONYMOUS_METHOD_EXPRESSION | CHECKED_EXPRESSION => Role::Expression,

        ARRAY_TYPE | NULLABLE_TYPE => Role::Type,

        USING_DIRECTIVE | NAME_EQUALS | ENUM_MEMBER_DECLARATION | BASE_LIST | TYPE_PARAMETER_LIST
        | TYPE_PARAMETER | CONSTRUCTOR_INITIALIZER | ACCESSOR_LIST | ACCESSOR_DECLARATION
        | VARIABLE_DECLARATION | VARIABLE_DECLARATOR | EQUALS_VALUE_CLAUSE | ARROW_EXPRESSION_CLAUSE
        | PARAMETER_LIST | PARAMETER | ATTRIBUTE_LIST | ATTRIBUTE_TARGET_SPECIFIER | ATTRIBUTE
        | ELSE_CLAUSE | CATCH_CLAUSE | CATCH_DECLARATION | FINALLY_CLAUSE | TYPE_ARGUMENT_LIST
        | ARRAY_RANK_SPECIFIER | ARGUMENT_LIST | BRACKETED_ARGUMENT_LIST | ARGUMENT => Role::Part,

        EOF_TOKEN | BAD_TOKEN | IDENT | NUMERIC_LITERAL | STRING_LITERAL | CHAR_LITERAL | L_BRACE
        | R_BRACE | L_PAREN | R_PAREN | L_BRACKET | R_BRACKET | SEMICOLON | COMMA | DOT | COLON
        | COLON_COLON | QUESTION | QUESTION_QUESTION | LT | GT | LT_LT | GT_GT | LT_EQ | GT_EQ | EQ_EQ
        | BANG_EQ | EQ | PLUS_EQ | MINUS_EQ | STAR_EQ | SLASH_EQ | PERCENT_EQ | AMP_EQ | PIPE_EQ
        | CARET_EQ | PLUS | MINUS | STAR | SLASH | PERCENT | AMP | AMP_AMP | PIPE | PIPE_PIPE | CARET
        | BANG | TILDE | PLUS_PLUS | MINUS_MINUS | FAT_ARROW => Role::Token,

        ABSTRACT_KW | AS_KW | BASE_KW | BOOL_KW | BREAK_KW | BYTE_KW | CATCH_KW | CHAR_KW | CHECKED_KW
        | CLASS_KW | CONST_KW | CONTINUE_KW | DECIMAL_KW | DEFAULT_KW | DELEGATE_KW | DO_KW | DOUBLE_KW
        | ELSE_KW | ENUM_KW | EVENT_KW | EXTERN_KW | FALSE_KW | FINALLY_KW | FIXED_KW | FLOAT_KW
        | FOR_KW | FOREACH_KW | GOTO_KW | IF_KW | IN_KW | INT_KW | INTERFACE_KW | INTERNAL_KW | IS_KW
        | LONG_KW | NAMESPACE_KW | NEW_KW | NULL_KW | OBJECT_KW | OUT_KW | OVERRIDE_KW | PARAMS_KW
        | PRIVATE_KW | PROTECTED_KW | PUBLIC_KW | READONLY_KW | REF_KW | RETURN_KW | SBYTE_KW
        | SEALED_KW | SHORT_KW | STATIC_KW | STRING_KW | STRUCT_KW | SWITCH_KW | THIS_KW | THROW_KW
        | TRUE_KW | TRY_KW | TYPEOF_KW | UINT_KW | ULONG_KW | UNSAFE_KW | USHORT_KW | USING_KW
        | VIRTUAL_KW | VOID_KW | VOLATILE_KW | WHILE_KW => Role::Token,

        VAR_KW | GET_KW | SET_KW | ADD_KW | REMOVE_KW | PARTIAL_KW | GLOBAL_KW | ASSEMBLY_KW | MODULE_KW
        | FIELD_KW | METHOD_KW | PARAM_KW | PROPERTY_KW | TYPE_KW => Role::Token,

        __LAST => Role::Token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_cover_node_kinds() {
        assert_eq!(role(CsKind::CLASS_DECLARATION), Role::Member);
        assert_eq!(role(CsKind::BLOCK), Role::Statement);
        assert_eq!(role(CsKind::GENERIC_NAME), Role::Expression);
        assert_eq!(role(CsKind::ARRAY_TYPE), Role::Type);
        assert_eq!(role(CsKind::SWITCH_STATEMENT), Role::Unsupported);
        assert_eq!(role(CsKind::SEMICOLON), Role::Token);
        assert_eq!(role(CsKind::VAR_KW), Role::Token);
    }

    #[test]
    fn test_tokens_and_nodes_agree_with_kind_ranges() {
        for kind in [CsKind::EOF_TOKEN, CsKind::FAT_ARROW, CsKind::WHILE_KW, CsKind::TYPE_KW] {
            assert!(kind.is_token());
            assert_eq!(role(kind), Role::Token);
        }
        for kind in [CsKind::COMPILATION_UNIT, CsKind::ARGUMENT, CsKind::CHECKED_EXPRESSION] {
            assert!(kind.is_node());
            assert_ne!(role(kind), Role::Token);
        }
    }
}
