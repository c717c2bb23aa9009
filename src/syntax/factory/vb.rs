//! Visual Basic node constructors.
//!
//! Every statement ends its line. Block constructs take their body
//! statements as a list and close with an `End` statement whose trailing
//! line break is left to the container, so blocks nest like statements.

use super::{Children, Header, end_line, sp_token_sp, space_after, token, token_eol, token_sp};
use crate::syntax::green::{GreenNode, GreenToken};
use crate::syntax::VbKind;

fn body(statements: Vec<GreenNode>) -> impl Iterator<Item = GreenNode> {
    statements.into_iter().map(end_line)
}

// ============================================================================
// NAMES AND TYPES
// ============================================================================

pub fn ident(name: &str) -> GreenToken {
    GreenToken::new(VbKind::IDENT, name)
}

pub fn identifier_name(ident: GreenToken) -> GreenNode {
    Children::new().token(ident).build(VbKind::IDENTIFIER_NAME)
}

/// A dotted name such as `System.Collections.Generic`.
pub fn name(text: &str) -> GreenNode {
    let mut parts = text.split('.');
    let first = identifier_name(ident(parts.next().unwrap_or_default()));
    parts.fold(first, |left, part| qualified_name(left, identifier_name(ident(part))))
}

/// `Name(Of A, B)`
pub fn generic_name(ident: GreenToken, args: Vec<GreenNode>) -> GreenNode {
    Children::new().token(ident).node(type_argument_list(args)).build(VbKind::GENERIC_NAME)
}

pub fn type_argument_list(args: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .token(token_sp(VbKind::OF_KW))
        .separated(args, VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::TYPE_ARGUMENT_LIST)
}

pub fn qualified_name(left: GreenNode, right: GreenNode) -> GreenNode {
    Children::new().node(left).token(token(VbKind::DOT)).node(right).build(VbKind::QUALIFIED_NAME)
}

pub fn global_name() -> GreenNode {
    Children::new().token(token(VbKind::GLOBAL_KW)).build(VbKind::GLOBAL_NAME)
}

pub fn predefined_type(keyword: VbKind) -> GreenNode {
    Children::new().token(token(keyword)).build(VbKind::PREDEFINED_TYPE)
}

pub fn array_type(element: GreenNode, ranks: Vec<GreenNode>) -> GreenNode {
    Children::new().node(element).nodes(ranks).build(VbKind::ARRAY_TYPE)
}

/// `()`, `(,)`, ... for the given rank.
pub fn array_rank_specifier(rank: usize) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .tokens((1..rank.max(1)).map(|_| token(VbKind::COMMA)))
        .token(token(VbKind::R_PAREN))
        .build(VbKind::ARRAY_RANK_SPECIFIER)
}

pub fn nullable_type(ty: GreenNode) -> GreenNode {
    Children::new().node(ty).token(token(VbKind::QUESTION)).build(VbKind::NULLABLE_TYPE)
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

pub fn member_access(expr: GreenNode, name: GreenNode) -> GreenNode {
    Children::new()
        .node(expr)
        .token(token(VbKind::DOT))
        .node(name)
        .build(VbKind::MEMBER_ACCESS_EXPRESSION)
}

pub fn invocation(expr: GreenNode, args: GreenNode) -> GreenNode {
    Children::new().node(expr).node(args).build(VbKind::INVOCATION_EXPRESSION)
}

pub fn argument_list(args: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .separated(args, VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::ARGUMENT_LIST)
}

pub fn simple_argument(expr: GreenNode) -> GreenNode {
    Children::new().node(expr).build(VbKind::SIMPLE_ARGUMENT)
}

pub fn literal_token(literal: GreenToken) -> GreenNode {
    Children::new().token(literal).build(VbKind::LITERAL_EXPRESSION)
}

pub fn literal(kind: VbKind, text: &str) -> GreenNode {
    literal_token(GreenToken::new(kind, text))
}

pub fn numeric_literal(text: &str) -> GreenNode {
    literal(VbKind::NUMERIC_LITERAL, text)
}

fn control_constant(c: char) -> Option<&'static str> {
    match c {
        '\r' => Some("vbCr"),
        '\n' => Some("vbLf"),
        '\t' => Some("vbTab"),
        '\0' => Some("vbNullChar"),
        _ => None,
    }
}

/// A string expression holding `value`. Quotes are doubled; control
/// characters, which VB string literals cannot contain, are spliced in as
/// `vbCr`/`vbLf`/`vbTab`/`vbNullChar` with `&`.
pub fn string_literal(value: &str) -> GreenNode {
    let mut parts: Vec<GreenNode> = Vec::new();
    let mut pending = String::new();
    let flush = |pending: &mut String, parts: &mut Vec<GreenNode>| {
        if !pending.is_empty() {
            parts.push(literal(VbKind::STRING_LITERAL, &format!("\"{}\"", pending.replace('"', "\"\""))));
            pending.clear();
        }
    };
    for c in value.chars() {
        match control_constant(c) {
            Some(constant) => {
                flush(&mut pending, &mut parts);
                parts.push(identifier_name(ident(constant)));
            }
            None => pending.push(c),
        }
    }
    flush(&mut pending, &mut parts);
    let mut parts = parts.into_iter();
    match parts.next() {
        Some(first) => parts.fold(first, |left, right| binary(left, VbKind::AMP, right)),
        None => literal(VbKind::STRING_LITERAL, "\"\""),
    }
}

/// `"x"c`, or a constant for control characters.
pub fn char_literal(value: char) -> GreenNode {
    match control_constant(value) {
        Some(constant) => identifier_name(ident(constant)),
        None => {
            let text = if value == '"' { "\"\"\"\"c".to_string() } else { format!("\"{value}\"c") };
            literal(VbKind::CHAR_LITERAL, &text)
        }
    }
}

pub fn true_literal() -> GreenNode {
    literal_token(token(VbKind::TRUE_KW))
}

pub fn false_literal() -> GreenNode {
    literal_token(token(VbKind::FALSE_KW))
}

pub fn nothing_literal() -> GreenNode {
    literal_token(token(VbKind::NOTHING_KW))
}

pub fn parenthesized(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .node(expr)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::PARENTHESIZED_EXPRESSION)
}

pub fn binary(left: GreenNode, operator: VbKind, right: GreenNode) -> GreenNode {
    Children::new()
        .node(left)
        .token(sp_token_sp(operator))
        .node(right)
        .build(VbKind::BINARY_EXPRESSION)
}

/// `Not x`, `-x`, `+x`
pub fn unary(operator: VbKind, operand: GreenNode) -> GreenNode {
    let operator = if operator == VbKind::NOT_KW { token_sp(operator) } else { token(operator) };
    Children::new().token(operator).node(operand).build(VbKind::UNARY_EXPRESSION)
}

/// `If(condition, whenTrue, whenFalse)`
pub fn ternary_conditional(condition: GreenNode, when_true: GreenNode, when_false: GreenNode) -> GreenNode {
    Children::new()
        .token(token(VbKind::IF_KW))
        .token(token(VbKind::L_PAREN))
        .separated([condition, when_true, when_false], VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::TERNARY_CONDITIONAL_EXPRESSION)
}

/// `If(value, fallback)`
pub fn binary_conditional(value: GreenNode, fallback: GreenNode) -> GreenNode {
    Children::new()
        .token(token(VbKind::IF_KW))
        .token(token(VbKind::L_PAREN))
        .separated([value, fallback], VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::BINARY_CONDITIONAL_EXPRESSION)
}

/// `CType(expr, T)`, `DirectCast(expr, T)` or `TryCast(expr, T)`.
pub fn cast(keyword: VbKind, expr: GreenNode, ty: GreenNode) -> GreenNode {
    Children::new()
        .token(token(keyword))
        .token(token(VbKind::L_PAREN))
        .separated([expr, ty], VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::CAST_EXPRESSION)
}

/// `New T(args) From {a, b}`
pub fn object_creation(ty: GreenNode, args: Option<GreenNode>, initializer: Option<GreenNode>) -> GreenNode {
    let mut children = Children::new().token(token_sp(VbKind::NEW_KW)).node(ty).opt_node(args);
    if let Some(init) = initializer {
        children = children.spaced().token(token_sp(VbKind::FROM_KW)).node(init);
    }
    children.build(VbKind::OBJECT_CREATION_EXPRESSION)
}

/// `New T(bounds) {a, b}`; `bounds` is an argument list or a rank specifier.
pub fn array_creation(element: GreenNode, bounds: GreenNode, initializer: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::NEW_KW))
        .node(element)
        .node(space_after(bounds))
        .node(initializer)
        .build(VbKind::ARRAY_CREATION_EXPRESSION)
}

/// `{a, b}`
pub fn collection_initializer(exprs: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_BRACE))
        .separated(exprs, VbKind::COMMA)
        .token(token(VbKind::R_BRACE))
        .build(VbKind::COLLECTION_INITIALIZER)
}

pub fn me_expression() -> GreenNode {
    Children::new().token(token(VbKind::ME_KW)).build(VbKind::ME_EXPRESSION)
}

pub fn my_base_expression() -> GreenNode {
    Children::new().token(token(VbKind::MY_BASE_KW)).build(VbKind::MY_BASE_EXPRESSION)
}

pub fn get_type(ty: GreenNode) -> GreenNode {
    Children::new()
        .token(token(VbKind::GET_TYPE_KW))
        .token(token(VbKind::L_PAREN))
        .node(ty)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::GET_TYPE_EXPRESSION)
}

/// `TypeOf x Is T` / `TypeOf x IsNot T`
pub fn type_of_is(expr: GreenNode, negated: bool, ty: GreenNode) -> GreenNode {
    let operator = if negated { VbKind::IS_NOT_KW } else { VbKind::IS_KW };
    Children::new()
        .token(token_sp(VbKind::TYPE_OF_KW))
        .node(expr)
        .token(sp_token_sp(operator))
        .node(ty)
        .build(VbKind::TYPE_OF_IS_EXPRESSION)
}

/// `Sub(a, b)` / `Function(a)`
pub fn lambda_header(keyword: VbKind, params: GreenNode) -> GreenNode {
    Children::new().token(token(keyword)).node(params).build(VbKind::LAMBDA_HEADER)
}

pub fn single_line_lambda(header: GreenNode, body: GreenNode) -> GreenNode {
    Children::new()
        .node(space_after(header))
        .node(body)
        .build(VbKind::SINGLE_LINE_LAMBDA_EXPRESSION)
}

pub fn multi_line_lambda(header: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let keyword = header
        .first_token()
        .and_then(|t| t.kind().as_vb())
        .unwrap_or(VbKind::SUB_KW);
    Children::new()
        .node(end_line(header))
        .nodes(body(statements))
        .node(end_block(keyword))
        .build(VbKind::MULTI_LINE_LAMBDA_EXPRESSION)
}

pub fn address_of(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::ADDRESS_OF_KW))
        .node(expr)
        .build(VbKind::ADDRESS_OF_EXPRESSION)
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// `End Sub`, `End Class`, ...
pub fn end_block(keyword: VbKind) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::END_KW))
        .token(token(keyword))
        .build(VbKind::END_BLOCK_STATEMENT)
}

/// `Dim x As T = v`; `keywords` is `Dim`, `Const` or `Static`.
pub fn local_declaration(keywords: &[VbKind], declarators: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .tokens(keywords.iter().copied().map(token_sp))
        .separated(declarators, VbKind::COMMA)
        .build(VbKind::LOCAL_DECLARATION_STATEMENT)
}

pub fn expression_statement(expr: GreenNode) -> GreenNode {
    Children::new().node(expr).build(VbKind::EXPRESSION_STATEMENT)
}

pub fn assignment_statement(left: GreenNode, operator: VbKind, right: GreenNode) -> GreenNode {
    Children::new()
        .node(left)
        .token(sp_token_sp(operator))
        .node(right)
        .build(VbKind::ASSIGNMENT_STATEMENT)
}

/// `AddHandler event, handler`
pub fn add_handler(event: GreenNode, handler: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::ADD_HANDLER_KW))
        .separated([event, handler], VbKind::COMMA)
        .build(VbKind::ADD_HANDLER_STATEMENT)
}

pub fn remove_handler(event: GreenNode, handler: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::REMOVE_HANDLER_KW))
        .separated([event, handler], VbKind::COMMA)
        .build(VbKind::REMOVE_HANDLER_STATEMENT)
}

/// `RaiseEvent Name(args)`
pub fn raise_event(name: GreenNode, args: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::RAISE_EVENT_KW))
        .node(name)
        .opt_node(args)
        .build(VbKind::RAISE_EVENT_STATEMENT)
}

pub fn multi_line_if(
    condition: GreenNode,
    statements: Vec<GreenNode>,
    else_ifs: Vec<GreenNode>,
    else_block: Option<GreenNode>,
) -> GreenNode {
    let if_statement = Children::new()
        .token(token_sp(VbKind::IF_KW))
        .node(space_after(condition))
        .token(token_eol(VbKind::THEN_KW))
        .build(VbKind::IF_STATEMENT);
    Children::new()
        .node(if_statement)
        .nodes(body(statements))
        .nodes(else_ifs)
        .opt_node(else_block)
        .node(end_block(VbKind::IF_KW))
        .build(VbKind::MULTI_LINE_IF_BLOCK)
}

pub fn else_if_block(condition: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new()
        .token(token_sp(VbKind::ELSE_IF_KW))
        .node(space_after(condition))
        .token(token_eol(VbKind::THEN_KW))
        .build(VbKind::ELSE_IF_STATEMENT);
    Children::new().node(statement).nodes(body(statements)).build(VbKind::ELSE_IF_BLOCK)
}

pub fn else_block(statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new().token(token_eol(VbKind::ELSE_KW)).build(VbKind::ELSE_STATEMENT);
    Children::new().node(statement).nodes(body(statements)).build(VbKind::ELSE_BLOCK)
}

pub fn while_block(condition: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new()
        .token(token_sp(VbKind::WHILE_KW))
        .node(end_line(condition))
        .build(VbKind::WHILE_STATEMENT);
    Children::new()
        .node(statement)
        .nodes(body(statements))
        .node(end_block(VbKind::WHILE_KW))
        .build(VbKind::WHILE_BLOCK)
}

/// A loop condition: `While x` or `Until x`.
pub type LoopCondition = (VbKind, GreenNode);

/// `Do [While|Until c] ... Loop [While|Until c]`
pub fn do_loop_block(top: Option<LoopCondition>, statements: Vec<GreenNode>, bottom: Option<LoopCondition>) -> GreenNode {
    let do_statement = match top {
        Some((keyword, condition)) => Children::new()
            .token(token_sp(VbKind::DO_KW))
            .token(token_sp(keyword))
            .node(end_line(condition)),
        None => Children::new().token(token_eol(VbKind::DO_KW)),
    }
    .build(VbKind::DO_STATEMENT);
    let loop_statement = match bottom {
        Some((keyword, condition)) => Children::new()
            .token(token_sp(VbKind::LOOP_KW))
            .token(token_sp(keyword))
            .node(condition),
        None => Children::new().token(token(VbKind::LOOP_KW)),
    }
    .build(VbKind::LOOP_STATEMENT);
    Children::new()
        .node(do_statement)
        .nodes(body(statements))
        .node(loop_statement)
        .build(VbKind::DO_LOOP_BLOCK)
}

/// `For Each control In expr ... Next`; `control` is an identifier name or
/// a variable declarator.
pub fn for_each_block(control: GreenNode, expr: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new()
        .token(token_sp(VbKind::FOR_KW))
        .token(token_sp(VbKind::EACH_KW))
        .node(control)
        .token(sp_token_sp(VbKind::IN_KW))
        .node(end_line(expr))
        .build(VbKind::FOR_EACH_STATEMENT);
    let next = Children::new().token(token(VbKind::NEXT_KW)).build(VbKind::NEXT_STATEMENT);
    Children::new()
        .node(statement)
        .nodes(body(statements))
        .node(next)
        .build(VbKind::FOR_EACH_BLOCK)
}

pub fn return_statement(expr: Option<GreenNode>) -> GreenNode {
    let keyword = if expr.is_some() { token_sp(VbKind::RETURN_KW) } else { token(VbKind::RETURN_KW) };
    Children::new().token(keyword).opt_node(expr).build(VbKind::RETURN_STATEMENT)
}

pub fn throw_statement(expr: Option<GreenNode>) -> GreenNode {
    let keyword = if expr.is_some() { token_sp(VbKind::THROW_KW) } else { token(VbKind::THROW_KW) };
    Children::new().token(keyword).opt_node(expr).build(VbKind::THROW_STATEMENT)
}

/// `Exit Sub`, `Exit Do`, ...
pub fn exit_statement(keyword: VbKind) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::EXIT_KW))
        .token(token(keyword))
        .build(VbKind::EXIT_STATEMENT)
}

/// `Continue For`, `Continue While`, `Continue Do`
pub fn continue_statement(keyword: VbKind) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::CONTINUE_KW))
        .token(token(keyword))
        .build(VbKind::CONTINUE_STATEMENT)
}

pub fn try_block(statements: Vec<GreenNode>, catches: Vec<GreenNode>, finally: Option<GreenNode>) -> GreenNode {
    let statement = Children::new().token(token_eol(VbKind::TRY_KW)).build(VbKind::TRY_STATEMENT);
    Children::new()
        .node(statement)
        .nodes(body(statements))
        .nodes(catches)
        .opt_node(finally)
        .node(end_block(VbKind::TRY_KW))
        .build(VbKind::TRY_BLOCK)
}

/// `Catch ex As T`
pub fn catch_block(ident: Option<GreenToken>, ty: Option<GreenNode>, statements: Vec<GreenNode>) -> GreenNode {
    let keyword = if ident.is_some() || ty.is_some() { token_sp(VbKind::CATCH_KW) } else { token(VbKind::CATCH_KW) };
    let ident = if ty.is_some() { ident.map(super::token_space_after) } else { ident };
    let statement = Children::new()
        .token(keyword)
        .opt_token(ident)
        .opt_node(ty.map(simple_as_clause))
        .build(VbKind::CATCH_STATEMENT);
    Children::new()
        .node(end_line(statement))
        .nodes(body(statements))
        .build(VbKind::CATCH_BLOCK)
}

pub fn finally_block(statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new().token(token_eol(VbKind::FINALLY_KW)).build(VbKind::FINALLY_STATEMENT);
    Children::new().node(statement).nodes(body(statements)).build(VbKind::FINALLY_BLOCK)
}

/// `Using resource ... End Using`; `resource` is a declarator or an expression.
pub fn using_block(resource: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new()
        .token(token_sp(VbKind::USING_KW))
        .node(end_line(resource))
        .build(VbKind::USING_STATEMENT);
    Children::new()
        .node(statement)
        .nodes(body(statements))
        .node(end_block(VbKind::USING_KW))
        .build(VbKind::USING_BLOCK)
}

/// A statement with no text; a carrier for trivia.
pub fn empty_statement() -> GreenNode {
    Children::new().token(GreenToken::missing(VbKind::EMPTY_TOKEN)).build(VbKind::EMPTY_STATEMENT)
}

// ============================================================================
// DECLARATIONS
// ============================================================================

pub fn compilation_unit(members: Vec<GreenNode>) -> GreenNode {
    compilation_unit_with_eof(members, GreenToken::missing(VbKind::EOF_TOKEN))
}

pub fn compilation_unit_with_eof(members: Vec<GreenNode>, eof: GreenToken) -> GreenNode {
    Children::new().nodes(body(members)).token(eof).build(VbKind::COMPILATION_UNIT)
}

pub fn imports_statement(name: GreenNode) -> GreenNode {
    Children::new()
        .token(token_sp(VbKind::IMPORTS_KW))
        .node(name)
        .build(VbKind::IMPORTS_STATEMENT)
}

/// `Imports Alias = Name`
pub fn imports_alias(alias: GreenToken, name: GreenNode) -> GreenNode {
    let clause = Children::new()
        .token(alias)
        .token(sp_token_sp(VbKind::EQ))
        .build(VbKind::IMPORT_ALIAS_CLAUSE);
    Children::new()
        .token(token_sp(VbKind::IMPORTS_KW))
        .node(clause)
        .node(name)
        .build(VbKind::IMPORTS_STATEMENT)
}

pub fn namespace_block(name: GreenNode, members: Vec<GreenNode>) -> GreenNode {
    let statement = Children::new()
        .token(token_sp(VbKind::NAMESPACE_KW))
        .node(end_line(name))
        .build(VbKind::NAMESPACE_STATEMENT);
    Children::new()
        .node(statement)
        .nodes(body(members))
        .node(end_block(VbKind::NAMESPACE_KW))
        .build(VbKind::NAMESPACE_BLOCK)
}

/// Class, structure, interface or module block; `keyword` picks which.
pub fn type_block(
    keyword: VbKind,
    header: Header,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    inherits: Vec<GreenNode>,
    implements: Vec<GreenNode>,
    members: Vec<GreenNode>,
) -> GreenNode {
    let (block, statement) = match keyword {
        VbKind::STRUCTURE_KW => (VbKind::STRUCTURE_BLOCK, VbKind::STRUCTURE_STATEMENT),
        VbKind::INTERFACE_KW => (VbKind::INTERFACE_BLOCK, VbKind::INTERFACE_STATEMENT),
        VbKind::MODULE_KW => (VbKind::MODULE_BLOCK, VbKind::MODULE_STATEMENT),
        _ => (VbKind::CLASS_BLOCK, VbKind::CLASS_STATEMENT),
    };
    let statement = header
        .push_into(Children::new())
        .token(token_sp(keyword))
        .token(ident)
        .opt_node(type_parameters)
        .build(statement);
    let inherits = (!inherits.is_empty()).then(|| {
        Children::new()
            .token(token_sp(VbKind::INHERITS_KW))
            .separated(inherits, VbKind::COMMA)
            .build(VbKind::INHERITS_STATEMENT)
    });
    let implements = (!implements.is_empty()).then(|| {
        Children::new()
            .token(token_sp(VbKind::IMPLEMENTS_KW))
            .separated(implements, VbKind::COMMA)
            .build(VbKind::IMPLEMENTS_STATEMENT)
    });
    Children::new()
        .node(end_line(statement))
        .opt_node(inherits.map(end_line))
        .opt_node(implements.map(end_line))
        .nodes(body(members))
        .node(end_block(keyword))
        .build(block)
}

/// `(Of T, In U)`
pub fn type_parameter_list(params: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .token(token_sp(VbKind::OF_KW))
        .separated(params, VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::TYPE_PARAMETER_LIST)
}

pub fn type_parameter(variance: Option<VbKind>, ident: GreenToken) -> GreenNode {
    Children::new()
        .opt_token(variance.map(token_sp))
        .token(ident)
        .build(VbKind::TYPE_PARAMETER)
}

pub fn enum_block(header: Header, ident: GreenToken, underlying: Option<GreenNode>, members: Vec<GreenNode>) -> GreenNode {
    let ident = if underlying.is_some() { super::token_space_after(ident) } else { ident };
    let statement = header
        .push_into(Children::new())
        .token(token_sp(VbKind::ENUM_KW))
        .token(ident)
        .opt_node(underlying.map(simple_as_clause))
        .build(VbKind::ENUM_STATEMENT);
    Children::new()
        .node(end_line(statement))
        .nodes(body(members))
        .node(end_block(VbKind::ENUM_KW))
        .build(VbKind::ENUM_BLOCK)
}

pub fn enum_member(ident: GreenToken, value: Option<GreenNode>) -> GreenNode {
    Children::new()
        .token(ident)
        .opt_node(value.map(equals_value))
        .build(VbKind::ENUM_MEMBER_DECLARATION)
}

/// `Delegate Sub D(...)` / `Delegate Function D(...) As T`
pub fn delegate_statement(
    header: Header,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    params: GreenNode,
    return_type: Option<GreenNode>,
) -> GreenNode {
    let keyword = if return_type.is_some() { VbKind::FUNCTION_KW } else { VbKind::SUB_KW };
    let params = if return_type.is_some() { space_after(params) } else { params };
    header
        .push_into(Children::new())
        .token(token_sp(VbKind::DELEGATE_KW))
        .token(token_sp(keyword))
        .token(ident)
        .opt_node(type_parameters)
        .node(params)
        .opt_node(return_type.map(simple_as_clause))
        .build(VbKind::DELEGATE_STATEMENT)
}

/// `Sub M(...)` or `Function M(...) As T`, without a body.
pub fn method_statement(
    header: Header,
    ident: GreenToken,
    type_parameters: Option<GreenNode>,
    params: GreenNode,
    return_type: Option<GreenNode>,
) -> GreenNode {
    let keyword = if return_type.is_some() { VbKind::FUNCTION_KW } else { VbKind::SUB_KW };
    let params = if return_type.is_some() { space_after(params) } else { params };
    header
        .push_into(Children::new())
        .token(token_sp(keyword))
        .token(ident)
        .opt_node(type_parameters)
        .node(params)
        .opt_node(return_type.map(simple_as_clause))
        .build(VbKind::METHOD_STATEMENT)
}

pub fn method_block(statement: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let keyword = if statement.child_tokens().any(|t| t.kind() == VbKind::FUNCTION_KW) {
        VbKind::FUNCTION_KW
    } else {
        VbKind::SUB_KW
    };
    Children::new()
        .node(end_line(statement))
        .nodes(body(statements))
        .node(end_block(keyword))
        .build(VbKind::METHOD_BLOCK)
}

/// `Sub New(...) ... End Sub`
pub fn constructor_block(header: Header, params: GreenNode, statements: Vec<GreenNode>) -> GreenNode {
    let statement = header
        .push_into(Children::new())
        .token(token_sp(VbKind::SUB_KW))
        .token(token(VbKind::NEW_KW))
        .node(params)
        .build(VbKind::SUB_NEW_STATEMENT);
    Children::new()
        .node(end_line(statement))
        .nodes(body(statements))
        .node(end_block(VbKind::SUB_KW))
        .build(VbKind::CONSTRUCTOR_BLOCK)
}

pub fn property_statement(
    header: Header,
    ident: GreenToken,
    params: Option<GreenNode>,
    ty: GreenNode,
    initializer: Option<GreenNode>,
) -> GreenNode {
    let (ident, params) = match params {
        Some(p) => (ident, Some(space_after(p))),
        None => (super::token_space_after(ident), None),
    };
    let as_clause = simple_as_clause(ty);
    let as_clause = if initializer.is_some() { space_after(as_clause) } else { as_clause };
    header
        .push_into(Children::new())
        .token(token_sp(VbKind::PROPERTY_KW))
        .token(ident)
        .opt_node(params)
        .node(as_clause)
        .opt_node(initializer.map(equals_value))
        .build(VbKind::PROPERTY_STATEMENT)
}

pub fn property_block(statement: GreenNode, accessors: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .node(end_line(statement))
        .nodes(body(accessors))
        .node(end_block(VbKind::PROPERTY_KW))
        .build(VbKind::PROPERTY_BLOCK)
}

/// `Get ... End Get`, `Private Set(value As T) ... End Set`
pub fn accessor_block(
    modifiers: Vec<GreenToken>,
    keyword: VbKind,
    params: Option<GreenNode>,
    statements: Vec<GreenNode>,
) -> GreenNode {
    let statement = Children::new()
        .tokens(modifiers)
        .token(token(keyword))
        .opt_node(params)
        .build(VbKind::ACCESSOR_STATEMENT);
    Children::new()
        .node(end_line(statement))
        .nodes(body(statements))
        .node(end_block(keyword))
        .build(VbKind::ACCESSOR_BLOCK)
}

/// A field; `header` must carry at least one modifier (`Dim` when nothing else).
pub fn field_declaration(header: Header, declarators: Vec<GreenNode>) -> GreenNode {
    let header = if header.modifiers.is_empty() {
        Header { modifiers: vec![token_sp(VbKind::DIM_KW)], ..header }
    } else {
        header
    };
    header
        .push_into(Children::new())
        .separated(declarators, VbKind::COMMA)
        .build(VbKind::FIELD_DECLARATION)
}

/// What follows an event name: a parameter list or `As DelegateType`.
#[derive(Debug, Clone)]
pub enum EventSignature {
    Parameters(GreenNode),
    DelegateType(GreenNode),
}

pub fn event_statement(header: Header, ident: GreenToken, signature: EventSignature) -> GreenNode {
    let children = header.push_into(Children::new()).token(token_sp(VbKind::EVENT_KW));
    let children = match signature {
        EventSignature::Parameters(params) => children.token(ident).node(params),
        EventSignature::DelegateType(ty) => children.token(ident).spaced().node(simple_as_clause(ty)),
    };
    children.build(VbKind::EVENT_STATEMENT)
}

/// `a, b As T = v`; `as_clause` is a simple or `As New` clause.
pub fn variable_declarator(names: Vec<GreenToken>, as_clause: Option<GreenNode>, initializer: Option<GreenNode>) -> GreenNode {
    let names = names
        .into_iter()
        .map(|n| Children::new().token(n).build(VbKind::MODIFIED_IDENTIFIER));
    let mut children = Children::new().separated(names, VbKind::COMMA);
    if let Some(clause) = as_clause {
        children = children.spaced().node(clause);
    }
    children.opt_node(initializer.map(equals_value)).build(VbKind::VARIABLE_DECLARATOR)
}

/// `As T`
pub fn simple_as_clause(ty: GreenNode) -> GreenNode {
    Children::new().token(token_sp(VbKind::AS_KW)).node(ty).build(VbKind::SIMPLE_AS_CLAUSE)
}

/// `As New T(args)`
pub fn as_new_clause(creation: GreenNode) -> GreenNode {
    Children::new().token(token_sp(VbKind::AS_KW)).node(creation).build(VbKind::AS_NEW_CLAUSE)
}

/// ` = expr`
pub fn equals_value(expr: GreenNode) -> GreenNode {
    Children::new()
        .token(sp_token_sp(VbKind::EQ))
        .node(expr)
        .build(VbKind::EQUALS_VALUE)
}

pub fn parameter_list(params: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::L_PAREN))
        .separated(params, VbKind::COMMA)
        .token(token(VbKind::R_PAREN))
        .build(VbKind::PARAMETER_LIST)
}

/// `ByRef x As T = v`; `ty` is omitted for implicitly typed lambda parameters.
pub fn parameter(header: Header, ident: GreenToken, ty: Option<GreenNode>, default: Option<GreenNode>) -> GreenNode {
    let ident = if ty.is_some() { super::token_space_after(ident) } else { ident };
    header
        .push_into(Children::new())
        .token(ident)
        .opt_node(ty.map(simple_as_clause))
        .opt_node(default.map(equals_value))
        .build(VbKind::PARAMETER)
}

/// `<A, B(x)>`
pub fn attribute_list(attributes: Vec<GreenNode>) -> GreenNode {
    Children::new()
        .token(token(VbKind::LT))
        .separated(attributes, VbKind::COMMA)
        .token(token_sp(VbKind::GT))
        .build(VbKind::ATTRIBUTE_LIST)
}

/// `Assembly: Name(args)`
pub fn attribute(target: Option<VbKind>, name: GreenNode, args: Option<GreenNode>) -> GreenNode {
    let target = target.map(|kind| {
        Children::new()
            .token(token(kind))
            .token(token_sp(VbKind::COLON))
            .build(VbKind::ATTRIBUTE_TARGET)
    });
    Children::new().opt_node(target).node(name).opt_node(args).build(VbKind::ATTRIBUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> GreenNode {
        identifier_name(ident("x"))
    }

    #[test]
    fn handlers_and_casts() {
        let stmt = add_handler(
            member_access(x(), identifier_name(ident("Click"))),
            address_of(identifier_name(ident("OnClick"))),
        );
        assert_eq!(stmt.to_text(), "AddHandler x.Click, AddressOf OnClick");
        let cast = cast(VbKind::CTYPE_KW, x(), predefined_type(VbKind::INTEGER_KW));
        assert_eq!(cast.to_text(), "CType(x, Integer)");
        assert_eq!(
            generic_name(ident("List"), vec![predefined_type(VbKind::STRING_KW)]).to_text(),
            "List(Of String)"
        );
    }

    #[test]
    fn strings_escape_quotes_and_splice_controls() {
        assert_eq!(string_literal("say \"hi\"").to_text(), "\"say \"\"hi\"\"\"");
        assert_eq!(string_literal("a\nb").to_text(), "\"a\" & vbLf & \"b\"");
        assert_eq!(string_literal("").to_text(), "\"\"");
        assert_eq!(char_literal('a').to_text(), "\"a\"c");
    }

    #[test]
    fn class_with_function() {
        let statement = method_statement(
            Header::with_modifiers([VbKind::PUBLIC_KW]),
            ident("F"),
            None,
            parameter_list(vec![parameter(
                Header::with_modifiers([VbKind::BY_VAL_KW]),
                ident("a"),
                Some(predefined_type(VbKind::INTEGER_KW)),
                None,
            )]),
            Some(predefined_type(VbKind::INTEGER_KW)),
        );
        let method = method_block(statement, vec![return_statement(Some(identifier_name(ident("a"))))]);
        let class = type_block(
            VbKind::CLASS_KW,
            Header::default(),
            ident("C"),
            None,
            vec![name("B")],
            vec![],
            vec![method],
        );
        assert_eq!(
            compilation_unit(vec![imports_statement(name("System")), class]).to_text(),
            "Imports System\nClass C\nInherits B\nPublic Function F(ByVal a As Integer) As Integer\nReturn a\nEnd Function\nEnd Class\n"
        );
    }

    #[test]
    fn loops_and_ifs() {
        let block = do_loop_block(None, vec![exit_statement(VbKind::DO_KW)], Some((VbKind::WHILE_KW, x())));
        assert_eq!(block.to_text(), "Do\nExit Do\nLoop While x");
        let block = multi_line_if(x(), vec![], vec![], Some(else_block(vec![])));
        assert_eq!(block.to_text(), "If x Then\nElse\nEnd If");
    }
}
