//! C# node constructors.
//!
//! Layout conventions: a block's `{` ends its line and its `}` carries no
//! trailing trivia, so whatever contains the block decides how the line ends.
//! Members and statements inside blocks are forced onto their own lines.

use super::{Children, Header, end_line, sp_token_sp, space_after, token, token_eol, token_sp, trim_end};
use crate::syntax::green::{GreenNode, GreenToken, Trivia};
use crate::syntax::CsKind;

// ============================================================================
// NAMES AND TYPES
// ============================================================================

pub fn ident(name: &str) -> GreenToken {
    GreenToken::new(CsKind::IDENT, name)
}

pub fn identifier_name(ident: GreenToken) -> GreenNode {
    Children::new().token(ident).build(CsKind::IDENTIFIER_NAME)
}

/// A dotted name such as `System.Collections.Generic`.
pub fn name(text: &str) -> GreenNode {
    let mut parts = text.split('.');
    let first = identifier_name(ident(parts.next().unwrap_or_default()));
    parts.fold(first, |left, part| qualified_name(left, identifier_name(ident(part))))
}

pub fn generic_name(ident: GreenToken, args: Vec<GreenNode>) -> GreenNode {
    Children::new().token(ident).node(type_argument_list(args)).build(CsKind::GENERIC_NAME)
}

pub fn type_argument_list(args: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::LT))
        .separated(args, CsKind::COMMA)
        .token(token(CsKind::GT))
        .build(CsKind::TYPE_ARGUMENT_LIST)
}

pub fn qualified_name(left: GreenNode, right: GreenNode) -> GreenNode {
    Children::new().node(left).token(token(CsKind::DOT)).node(right).build(CsKind::QUALIFIED_NAME)
}

/// `global::Right`
pub fn alias_qualified_name(alias: GreenToken, right: GreenNode) -> GreenNode {
    Children::new()
        .node(identifier_name(alias))
        .token(token(CsKind::COLON_COLON))
        .node(right)
        .build(CsKind::ALIAS_QUALIFIED_NAME)
}

pub fn predefined_type(keyword: CsKind) -> GreenNode {
    Children::new().token(token(keyword)).build(CsKind::PREDEFINED_TYPE)
}

pub fn array_type(element: GreenNode, ranks: Vec<GreenNode>) -> GreenNode {
    Children::new().node(element).nodes(ranks).build(CsKind::ARRAY_TYPE)
}

/// `[n]` or `[a, b]`; an empty list gives `[]`.
pub fn array_rank_specifier(sizes: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_BRACKET))
        .separated(sizes, CsKind::COMMA)
        .token(token(CsKind::R_BRACKET))
        .build(CsKind::ARRAY_RANK_SPECIFIER)
}

/// `[]`, `[,]`, ... for a rank with omitted sizes.
pub fn omitted_rank_specifier(rank: usize) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_BRACKET))
        .tokens((1..rank.max(1)).map(|_| token(CsKind::COMMA)))
        .token(token(CsKind::R_BRACKET))
        .build(CsKind::ARRAY_RANK_SPECIFIER)
}

pub fn nullable_type(ty: GreenNode) -> GreenNode {
    Children::new().node(ty).token(token(CsKind::QUESTION)).build(CsKind::NULLABLE_TYPE)
}

pub fn pointer_type(ty: GreenNode) -> GreenNode {
    Children::new().node(ty).token(token(CsKind::STAR)).build(CsKind::POINTER_TYPE)
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

pub fn member_access(expr: GreenNode, name: GreenNode) -> GreenNode {
    Children::new()
        .node(expr)
        .token(token(CsKind::DOT))
        .node(name)
        .build(CsKind::MEMBER_ACCESS_EXPRESSION)
}

pub fn invocation(expr: GreenNode, args: GreenNode) -> GreenNode {
    Children::new().node(expr).node(args).build(CsKind::INVOCATION_EXPRESSION)
}

pub fn argument_list(args: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_PAREN))
        .separated(args, CsKind::COMMA)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::ARGUMENT_LIST)
}

pub fn bracketed_argument_list(args: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_BRACKET))
        .separated(args, CsKind::COMMA)
        .token(token(CsKind::R_BRACKET))
        .build(CsKind::BRACKETED_ARGUMENT_LIST)
}

pub fn argument(expr: GreenNode) -> GreenNode {
    Children::new().node(expr).build(CsKind::ARGUMENT)
}

/// `ref x` / `out x`
pub fn ref_argument(modifier: CsKind, expr: GreenNode) -> GreenNode {
    Children::new().token(token_sp(modifier)).node(expr).build(CsKind::ARGUMENT)
}

pub fn element_access(expr: GreenNode, args: GreenNode) -> GreenNode {
    Children::new().node(expr).node(args).build(CsKind::ELEMENT_ACCESS_EXPRESSION)
}

pub fn literal_token(literal: GreenToken) -> GreenNode {
    Children::new().token(literal).build(CsKind::LITERAL_EXPRESSION)
}

pub fn literal(kind: CsKind, text: &str) -> GreenNode {
    literal_token(GreenToken::new(kind, text))
}

pub fn numeric_literal(text: &str) -> GreenNode {
    literal(CsKind::NUMERIC_LITERAL, text)
}

/// A regular string literal holding `value`, escaped.
pub fn string_literal(value: &str) -> GreenNode {
    literal(CsKind::STRING_LITERAL, &format!("\"{}\"", escape(value, '"')))
}

pub fn char_literal(value: char) -> GreenNode {
    literal(CsKind::CHAR_LITERAL, &format!("'{}'", escape(&value.to_string(), '\'')))
}

fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

pub fn true_literal() -> GreenNode {
    literal_token(token(CsKind::TRUE_KW))
}

pub fn false_literal() -> GreenNode {
    literal_token(token(CsKind::FALSE_KW))
}

pub fn null_literal() -> GreenNode {
    literal_token(token(CsKind::NULL_KW))
}

pub fn default_literal() -> GreenNode {
    literal_token(token(CsKind::DEFAULT_KW))
}

/// `default(T)`
pub fn default_expression(ty: GreenNode) -> GreenNode {
    Children::new()
        .token(token(CsKind::DEFAULT_KW))
        .token(token(CsKind::L_PAREN))
        .node(ty)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::DEFAULT_EXPRESSION)
}

pub fn parenthesized(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_PAREN))
        .node(expr)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::PARENTHESIZED_EXPRESSION)
}

pub fn binary(left: GreenNode, operator: CsKind, right: GreenNode) -> GreenNode {
    Children::new()
        .node(left)
        .token(sp_token_sp(operator))
        .node(right)
        .build(CsKind::BINARY_EXPRESSION)
}

pub fn prefix_unary(operator: CsKind, operand: GreenNode) -> GreenNode {
    Children::new().token(token(operator)).node(operand).build(CsKind::PREFIX_UNARY_EXPRESSION)
}

pub fn postfix_unary(operand: GreenNode, operator: CsKind) -> GreenNode {
    Children::new().node(operand).token(token(operator)).build(CsKind::POSTFIX_UNARY_EXPRESSION)
}

pub fn assignment(left: GreenNode, operator: CsKind, right: GreenNode) -> GreenNode {
    Children::new()
        .node(left)
        .token(sp_token_sp(operator))
        .node(right)
        .build(CsKind::ASSIGNMENT_EXPRESSION)
}

pub fn conditional(condition: GreenNode, when_true: GreenNode, when_false: GreenNode) -> GreenNode {
    Children::new()
        .node(condition)
        .token(sp_token_sp(CsKind::QUESTION))
        .node(when_true)
        .token(sp_token_sp(CsKind::COLON))
        .node(when_false)
        .build(CsKind::CONDITIONAL_EXPRESSION)
}

pub fn cast(ty: GreenNode, expr: GreenNode) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_PAREN))
        .node(ty)
        .token(token(CsKind::R_PAREN))
        .node(expr)
        .build(CsKind::CAST_EXPRESSION)
}

pub fn object_creation(ty: GreenNode, args: Option<GreenNode>, initializer: Option<GreenNode>) -> GreenNode {
    let ty = if initializer.is_some() && args.is_none() { space_after(ty) } else { ty };
    let args = if initializer.is_some() { args.map(space_after) } else { args };
    Children::new()
        .token(token_sp(CsKind::NEW_KW))
        .node(ty)
        .opt_node(args)
        .opt_node(initializer)
        .build(CsKind::OBJECT_CREATION_EXPRESSION)
}

pub fn array_creation(array_ty: GreenNode, initializer: Option<GreenNode>) -> GreenNode {
    let array_ty = if initializer.is_some() { space_after(array_ty) } else { array_ty };
    Children::new()
        .token(token_sp(CsKind::NEW_KW))
        .node(array_ty)
        .opt_node(initializer)
        .build(CsKind::ARRAY_CREATION_EXPRESSION)
}

/// `{ a, b }`
pub fn initializer(exprs: Vec<GreenNode>) -> GreenNode {
    if exprs.is_empty() {
        return Children::new()
            .token(token(CsKind::L_BRACE))
            .token(token(CsKind::R_BRACE))
            .build(CsKind::INITIALIZER_EXPRESSION);
    }
    Children::new()
        .token(token_sp(CsKind::L_BRACE))
        .separated(exprs, CsKind::COMMA)
        .token(token(CsKind::R_BRACE).with_leading_trivia(vec![Trivia::space()]))
        .build(CsKind::INITIALIZER_EXPRESSION)
}

pub fn this_expression() -> GreenNode {
    Children::new().token(token(CsKind::THIS_KW)).build(CsKind::THIS_EXPRESSION)
}

pub fn base_expression() -> GreenNode {
    Children::new().token(token(CsKind::BASE_KW)).build(CsKind::BASE_EXPRESSION)
}

pub fn type_of(ty: GreenNode) -> GreenNode {
    Children::new()
        .token(token(CsKind::TYPEOF_KW))
        .token(token(CsKind::L_PAREN))
        .node(ty)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::TYPE_OF_EXPRESSION)
}

/// `(a, b) => body` where body is an expression or a block.
pub fn parenthesized_lambda(params: GreenNode, body: GreenNode) -> GreenNode {
    Children::new()
        .node(params)
        .token(sp_token_sp(CsKind::FAT_ARROW))
        .node(body)
        .build(CsKind::PARENTHESIZED_LAMBDA_EXPRESSION)
}

/// `a => body`
pub fn simple_lambda(param: GreenNode, body: GreenNode) -> GreenNode {
    Children::new()
        .node(param)
        .token(sp_token_sp(CsKind::FAT_ARROW))
        .node(body)
        .build(CsKind::SIMPLE_LAMBDA_EXPRESSION)
}

pub fn anonymous_method(params: Option<GreenNode>, body: GreenNode) -> GreenNode {
    let keyword = if params.is_some() { token(CsKind::DELEGATE_KW) } else { token_sp(CsKind::DELEGATE_KW) };
    Children::new()
        .token(keyword)
        .opt_node(params.map(space_after))
        .node(body)
        .build(CsKind::ANONYMOUS_METHOD_EXPRESSION)
}

pub fn checked_expression(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(token(CsKind::CHECKED_KW))
        .token(token(CsKind::L_PAREN))
        .node(expr)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::CHECKED_EXPRESSION)
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// `{` statements `}`; each statement on its own line.
pub fn block(statements: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token_eol(CsKind::L_BRACE))
        .nodes(statements.into_iter().map(end_line))
        .token(token(CsKind::R_BRACE))
        .build(CsKind::BLOCK)
}

pub fn local_declaration(is_const: bool, declaration: GreenNode) -> GreenNode {
    Children::new()
        .opt_token(is_const.then(|| token_sp(CsKind::CONST_KW)))
        .node(declaration)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::LOCAL_DECLARATION_STATEMENT)
}

pub fn expression_statement(expr: GreenNode) -> GreenNode {
    Children::new().node(expr).token(token(CsKind::SEMICOLON)).build(CsKind::EXPRESSION_STATEMENT)
}

pub fn if_statement(condition: GreenNode, statement: GreenNode, else_clause: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::IF_KW))
        .token(token(CsKind::L_PAREN))
        .node(condition)
        .token(token_sp(CsKind::R_PAREN))
        .node(statement)
        .opt_node(else_clause)
        .build(CsKind::IF_STATEMENT)
}

pub fn else_clause(statement: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::ELSE_KW))
        .node(statement)
        .build(CsKind::ELSE_CLAUSE)
}

pub fn while_statement(condition: GreenNode, statement: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::WHILE_KW))
        .token(token(CsKind::L_PAREN))
        .node(condition)
        .token(token_sp(CsKind::R_PAREN))
        .node(statement)
        .build(CsKind::WHILE_STATEMENT)
}

pub fn do_statement(statement: GreenNode, condition: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::DO_KW))
        .node(statement)
        .token(sp_token_sp(CsKind::WHILE_KW))
        .token(token(CsKind::L_PAREN))
        .node(condition)
        .token(token(CsKind::R_PAREN))
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::DO_STATEMENT)
}

pub fn foreach_statement(ty: GreenNode, ident: GreenToken, expr: GreenNode, statement: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::FOREACH_KW))
        .token(token(CsKind::L_PAREN))
        .node(space_after(ty))
        .token(ident)
        .token(sp_token_sp(CsKind::IN_KW))
        .node(expr)
        .token(token_sp(CsKind::R_PAREN))
        .node(statement)
        .build(CsKind::FOR_EACH_STATEMENT)
}

pub fn return_statement(expr: Option<GreenNode>) -> GreenNode {
    let keyword = if expr.is_some() { token_sp(CsKind::RETURN_KW) } else { token(CsKind::RETURN_KW) };
    Children::new()
        .token(keyword)
        .opt_node(expr)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::RETURN_STATEMENT)
}

pub fn throw_statement(expr: Option<GreenNode>) -> GreenNode {
    let keyword = if expr.is_some() { token_sp(CsKind::THROW_KW) } else { token(CsKind::THROW_KW) };
    Children::new()
        .token(keyword)
        .opt_node(expr)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::THROW_STATEMENT)
}

pub fn break_statement() -> GreenNode {
    Children::new()
        .token(token(CsKind::BREAK_KW))
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::BREAK_STATEMENT)
}

pub fn continue_statement() -> GreenNode {
    Children::new()
        .token(token(CsKind::CONTINUE_KW))
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::CONTINUE_STATEMENT)
}

pub fn try_statement(block: GreenNode, catches: Vec<GreenNode>, finally: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::TRY_KW))
        .node(block)
        .nodes(catches)
        .opt_node(finally)
        .build(CsKind::TRY_STATEMENT)
}

pub fn catch_clause(declaration: Option<GreenNode>, block: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::CATCH_KW))
        .opt_node(declaration.map(space_after))
        .node(block)
        .build(CsKind::CATCH_CLAUSE)
}

pub fn catch_declaration(ty: GreenNode, ident: Option<GreenToken>) -> GreenNode {
    let ty = if ident.is_some() { space_after(ty) } else { ty };
    Children::new()
        .token(token(CsKind::L_PAREN))
        .node(ty)
        .opt_token(ident)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::CATCH_DECLARATION)
}

pub fn finally_clause(block: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::FINALLY_KW))
        .node(block)
        .build(CsKind::FINALLY_CLAUSE)
}

/// `using (resource) statement`; resource is a declaration or an expression.
pub fn using_statement(resource: GreenNode, statement: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::USING_KW))
        .token(token(CsKind::L_PAREN))
        .node(resource)
        .token(token_sp(CsKind::R_PAREN))
        .node(statement)
        .build(CsKind::USING_STATEMENT)
}

pub fn empty_statement() -> GreenNode {
    Children::new().token(token(CsKind::SEMICOLON)).build(CsKind::EMPTY_STATEMENT)
}

/// An empty statement whose semicolon is missing; a carrier for trivia at
/// member level.
pub fn empty_carrier() -> GreenNode {
    Children::new().token(GreenToken::missing(CsKind::SEMICOLON)).build(CsKind::EMPTY_STATEMENT)
}

// ============================================================================
// DECLARATIONS
// ============================================================================

pub fn compilation_unit(members: Vec<GreenNode>) -> GreenNode {
    compilation_unit_with_eof(members, GreenToken::missing(CsKind::EOF_TOKEN))
}

pub fn compilation_unit_with_eof(members: Vec<GreenNode>, eof: GreenToken) -> GreenNode {
    Children::new()
        .nodes(members.into_iter().map(end_line))
        .token(eof)
        .build(CsKind::COMPILATION_UNIT)
}

pub fn using_directive(name: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::USING_KW))
        .node(name)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::USING_DIRECTIVE)
}

/// `using Alias = Name;`
pub fn using_alias(alias: GreenToken, name: GreenNode) -> GreenNode {
    let alias = Children::new().token(alias).token(sp_token_sp(CsKind::EQ)).build(CsKind::NAME_EQUALS);
    Children::new()
        .token(token_sp(CsKind::USING_KW))
        .node(alias)
        .node(name)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::USING_DIRECTIVE)
}

pub fn namespace_declaration(name: GreenNode, members: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token_sp(CsKind::NAMESPACE_KW))
        .node(space_after(name))
        .token(token_eol(CsKind::L_BRACE))
        .nodes(members.into_iter().map(end_line))
        .token(token(CsKind::R_BRACE))
        .build(CsKind::NAMESPACE_DECLARATION)
}

/// Class, struct or interface declaration; `keyword` picks which.
pub fn type_declaration(
    keyword: CsKind,
    header: Header,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    base_list: Option<GreenNode>,
    members: Vec<GreenNode>,
) -> GreenNode {
    let kind = match keyword {
        CsKind::STRUCT_KW => CsKind::STRUCT_DECLARATION,
        CsKind::INTERFACE_KW => CsKind::INTERFACE_DECLARATION,
        _ => CsKind::CLASS_DECLARATION,
    };
    let children = header
        .push_into(Children::new())
        .token(token_sp(keyword))
        .token(ident)
        .opt_node(type_parameters)
        .opt_node(base_list)
        .spaced();
    children
        .token(token_eol(CsKind::L_BRACE))
        .nodes(members.into_iter().map(end_line))
        .token(token(CsKind::R_BRACE))
        .build(kind)
}

/// `: A, B`
pub fn base_list(types: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::COLON))
        .separated(types, CsKind::COMMA)
        .build(CsKind::BASE_LIST)
}

pub fn type_parameter_list(params: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::LT))
        .separated(params, CsKind::COMMA)
        .token(token(CsKind::GT))
        .build(CsKind::TYPE_PARAMETER_LIST)
}

/// `T`, `in T` or `out T`.
pub fn type_parameter(variance: Option<CsKind>, ident: GreenToken) -> GreenNode {
    Children::new()
        .opt_token(variance.map(token_sp))
        .token(ident)
        .build(CsKind::TYPE_PARAMETER)
}

pub fn enum_declaration(
    header: Header,
    ident: GreenToken,
    underlying: Option<GreenNode>,
    members: Vec<GreenNode>,
) -> GreenNode {
    let base = underlying.map(|ty| base_list(vec![ty]));
    let count = members.len();
    let mut children = header
        .push_into(Children::new())
        .token(token_sp(CsKind::ENUM_KW))
        .token(ident)
        .opt_node(base)
        .spaced()
        .token(token_eol(CsKind::L_BRACE));
    for (i, member) in members.into_iter().enumerate() {
        if i + 1 < count {
            children = children.node(trim_end(member)).token(token_eol(CsKind::COMMA));
        } else {
            children = children.node(end_line(member));
        }
    }
    children.token(token(CsKind::R_BRACE)).build(CsKind::ENUM_DECLARATION)
}

pub fn enum_member(ident: GreenToken, value: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(ident)
        .opt_node(value.map(equals_value))
        .build(CsKind::ENUM_MEMBER_DECLARATION)
}

pub fn delegate_declaration(
    header: Header,
    return_type: GreenNode,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    params: GreenNode,
) -> GreenNode {
    header
        .push_into(Children::new())
        .token(token_sp(CsKind::DELEGATE_KW))
        .node(space_after(return_type))
        .token(ident)
        .opt_node(type_parameters)
        .node(params)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::DELEGATE_DECLARATION)
}

/// Body of a method-like member.
#[derive(Debug, Clone)]
pub enum MethodBody {
    Block(GreenNode),
    Expression(GreenNode),
    None,
}

fn push_body(children: Children, params: GreenNode, body: MethodBody) -> Children {
    match body {
        MethodBody::Block(block) => children.node(space_after(params)).node(block),
        MethodBody::Expression(expr) => children
            .node(params)
            .node(
                Children::new()
                    .token(sp_token_sp(CsKind::FAT_ARROW))
                    .node(expr)
                    .build(CsKind::ARROW_EXPRESSION_CLAUSE),
            )
            .token(token(CsKind::SEMICOLON)),
        MethodBody::None => children.node(params).token(token(CsKind::SEMICOLON)),
    }
}

pub fn method_declaration(
    header: Header,
    return_type: GreenNode,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    params: GreenNode,
    body: MethodBody,
) -> GreenNode {
    let children = header
        .push_into(Children::new())
        .node(space_after(return_type))
        .token(ident)
        .opt_node(type_parameters);
    push_body(children, params, body).build(CsKind::METHOD_DECLARATION)
}

pub fn constructor_declaration(
    header: Header,
    ident: GreenToken,
    params: GreenNode,
    initializer: Option<GreenNode>,
    body: GreenNode,
) -> GreenNode {
    let (params, initializer) = match initializer {
        Some(init) => (params, Some(space_after(init))),
        None => (space_after(params), None),
    };
    header
        .push_into(Children::new())
        .token(ident)
        .node(params)
        .opt_node(initializer)
        .node(body)
        .build(CsKind::CONSTRUCTOR_DECLARATION)
}

/// `: base(args)` or `: this(args)`
pub fn constructor_initializer(keyword: CsKind, args: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::COLON))
        .token(token(keyword))
        .node(args)
        .build(CsKind::CONSTRUCTOR_INITIALIZER)
}

pub fn property_declaration(
    header: Header,
    ty: GreenNode,
    ident: GreenToken,
    accessors: GreenNode,
    initializer: Option<GreenNode>,
) -> GreenNode {
    let mut children = header
        .push_into(Children::new())
        .node(space_after(ty))
        .token(ident)
        .spaced()
        .node(accessors);
    if let Some(init) = initializer {
        children = children.node(equals_value(init)).token(token(CsKind::SEMICOLON));
    }
    children.build(CsKind::PROPERTY_DECLARATION)
}

/// `{ get; set; }` on one line when no accessor has a body, otherwise one
/// accessor per line.
pub fn accessor_list(accessors: Vec<GreenNode>) -> GreenNode {
    let inline = accessors
        .iter()
        .all(|a| a.child_nodes().all(|n| n.kind() != CsKind::BLOCK));
    if inline {
        Children::new()
            .token(token_sp(CsKind::L_BRACE))
            .nodes(accessors.into_iter().map(space_after))
            .token(token(CsKind::R_BRACE))
            .build(CsKind::ACCESSOR_LIST)
    } else {
        Children::new()
            .token(token_eol(CsKind::L_BRACE))
            .nodes(accessors.into_iter().map(end_line))
            .token(token(CsKind::R_BRACE))
            .build(CsKind::ACCESSOR_LIST)
    }
}

/// `get;`, `private set { ... }`, `add { ... }`
pub fn accessor(modifiers: Vec<GreenToken>, keyword: CsKind, body: Option<GreenNode>) -> GreenNode {
    let children = Children::new().tokens(modifiers);
    let children = match body {
        Some(block) => children.token(token_sp(keyword)).node(block),
        None => children.token(token(keyword)).token(token(CsKind::SEMICOLON)),
    };
    children.build(CsKind::ACCESSOR_DECLARATION)
}

pub fn field_declaration(header: Header, declaration: GreenNode) -> GreenNode {
    header
        .push_into(Children::new())
        .node(declaration)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::FIELD_DECLARATION)
}

pub fn event_field_declaration(header: Header, declaration: GreenNode) -> GreenNode {
    header
        .push_into(Children::new())
        .token(token_sp(CsKind::EVENT_KW))
        .node(declaration)
        .token(token(CsKind::SEMICOLON))
        .build(CsKind::EVENT_FIELD_DECLARATION)
}

pub fn variable_declaration(ty: GreenNode, declarators: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .node(space_after(ty))
        .separated(declarators, CsKind::COMMA)
        .build(CsKind::VARIABLE_DECLARATION)
}

pub fn variable_declarator(ident: GreenToken, initializer: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(ident)
        .opt_node(initializer.map(equals_value))
        .build(CsKind::VARIABLE_DECLARATOR)
}

/// ` = expr`
pub fn equals_value(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(CsKind::EQ))
        .node(expr)
        .build(CsKind::EQUALS_VALUE_CLAUSE)
}

pub fn parameter_list(params: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(CsKind::L_PAREN))
        .separated(params, CsKind::COMMA)
        .token(token(CsKind::R_PAREN))
        .build(CsKind::PARAMETER_LIST)
}

/// A parameter; `ty` is omitted for implicitly typed lambda parameters.
pub fn parameter(header: Header, ty: Option<GreenNode>, ident: GreenToken, default: Option<GreenNode>) -> GreenNode {
    header
        .push_into(Children::new())
        .opt_node(ty.map(space_after))
        .token(ident)
        .opt_node(default.map(equals_value))
        .build(CsKind::PARAMETER)
}

/// `[target: A, B(x)]`
pub fn attribute_list(target: Option<CsKind>, attributes: Vec<GreenNode>) -> GreenNode {
    let target = target.map(|kind| {
        Children::new()
            .token(token(kind))
            .token(token_sp(CsKind::COLON))
            .build(CsKind::ATTRIBUTE_TARGET_SPECIFIER)
    });
    Children::new()
        .token(token(CsKind::L_BRACKET))
        .opt_node(target)
        .separated(attributes, CsKind::COMMA)
        .token(token_sp(CsKind::R_BRACKET))
        .build(CsKind::ATTRIBUTE_LIST)
}

pub fn attribute(name: GreenNode, args: Option<GreenNode>) -> GreenNode {
    Children::new().node(name).opt_node(args).build(CsKind::ATTRIBUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> GreenNode {
        identifier_name(ident("x"))
    }

    #[test]
    fn expressions_render_with_elastic_spacing() {
        let expr = assignment(
            member_access(x(), identifier_name(ident("Click"))),
            CsKind::PLUS_EQ,
            identifier_name(ident("Handler")),
        );
        assert_eq!(expression_statement(expr).to_text(), "x.Click += Handler;");
        assert_eq!(
            binary(x(), CsKind::EQ_EQ, default_expression(name("System.Int32"))).to_text(),
            "x == default(System.Int32)"
        );
        assert_eq!(
            generic_name(ident("List"), vec![predefined_type(CsKind::INT_KW)]).to_text(),
            "List<int>"
        );
        assert_eq!(string_literal("a\"b\\").to_text(), r#""a\"b\\""#);
        assert_eq!(char_literal('\'').to_text(), r"'\''");
    }

    #[test]
    fn class_with_method() {
        let method = method_declaration(
            Header::with_modifiers([CsKind::PUBLIC_KW]),
            predefined_type(CsKind::VOID_KW),
            ident("M"),
            None,
            parameter_list(vec![]),
            MethodBody::Block(block(vec![return_statement(None)])),
        );
        let class = type_declaration(
            CsKind::CLASS_KW,
            Header::default(),
            ident("C"),
            None,
            Some(base_list(vec![name("B")])),
            vec![method],
        );
        let unit = compilation_unit(vec![using_directive(name("System")), class]);
        assert_eq!(
            unit.to_text(),
            "using System;\nclass C : B {\npublic void M() {\nreturn;\n}\n}\n"
        );
    }

    #[test]
    fn auto_property_is_inline() {
        let prop = property_declaration(
            Header::with_modifiers([CsKind::PUBLIC_KW]),
            predefined_type(CsKind::INT_KW),
            ident("P"),
            accessor_list(vec![
                accessor(vec![], CsKind::GET_KW, None),
                accessor(vec![token_sp(CsKind::PRIVATE_KW)], CsKind::SET_KW, None),
            ]),
            None,
        );
        assert_eq!(prop.to_text(), "public int P { get; private set; }");
    }

    #[test]
    fn enum_members_are_one_per_line() {
        let decl = enum_declaration(
            Header::default(),
            ident("E"),
            Some(predefined_type(CsKind::BYTE_KW)),
            vec![enum_member(ident("A"), None), enum_member(ident("B"), Some(numeric_literal("2")))],
        );
        assert_eq!(decl.to_text(), "enum E : byte {\nA,\nB = 2\n}");
    }
}
