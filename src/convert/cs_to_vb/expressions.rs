//! Expressions, names and types.

use super::{CsToVb, malformed_token, role, unsupported};
use crate::convert::context::Role;
use crate::convert::error::{ConvertError, ConvertResult};
use crate::semantic::{SpecialType, defines_equality_operator, has_keyword, is_value_type};
use crate::syntax::factory::vb;
use crate::syntax::tokens::try_parse_generic_name;
use crate::syntax::{CsKind, GreenNode, Language, NodeId, SyntaxKind, VbKind};

impl CsToVb<'_, '_> {
    /// Convert an expression. Failures degrade to a `Nothing` placeholder.
    pub(crate) fn expr(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        self.ctx.check_cancelled()?;
        let kind = self.kind(node)?;
        let converted = match role(kind) {
            Role::Token => return Err(malformed_token(kind)),
            Role::Unsupported => Err(unsupported(kind)),
            _ => self.expr_of_kind(node, kind),
        };
        match converted {
            Ok(green) => Ok(self.ctx.annotate_expr(node, green)),
            Err(error) if error.is_recoverable() => Ok(self.ctx.stub_expr(node, &error)),
            Err(error) => Err(error),
        }
    }

    fn expr_of_kind(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<GreenNode> {
        match kind {
            CsKind::IDENTIFIER_NAME => self.identifier_expr(node),
            CsKind::GENERIC_NAME => self.generic_name(node, false),
            CsKind::QUALIFIED_NAME
            | CsKind::ALIAS_QUALIFIED_NAME
            | CsKind::PREDEFINED_TYPE
            | CsKind::ARRAY_TYPE
            | CsKind::NULLABLE_TYPE => self.ty(node),
            CsKind::MEMBER_ACCESS_EXPRESSION => self.member_access(node),
            CsKind::INVOCATION_EXPRESSION => {
                let callee = self.expr(self.ctx.nth(node, 0, "callee")?)?;
                let args = self.arguments(self.ctx.require(node, CsKind::ARGUMENT_LIST)?)?;
                Ok(vb::invocation(callee, args))
            }
            // indexing and calls share parentheses
            CsKind::ELEMENT_ACCESS_EXPRESSION => {
                let target = self.expr(self.ctx.nth(node, 0, "indexed expression")?)?;
                let args = self.arguments(self.ctx.require(node, CsKind::BRACKETED_ARGUMENT_LIST)?)?;
                Ok(vb::invocation(target, args))
            }
            CsKind::LITERAL_EXPRESSION => self.literal(node),
            CsKind::DEFAULT_EXPRESSION => Ok(vb::nothing_literal()),
            CsKind::PARENTHESIZED_EXPRESSION => Ok(vb::parenthesized(self.expr(self.ctx.nth(node, 0, "expression")?)?)),
            CsKind::BINARY_EXPRESSION => self.binary(node),
            CsKind::PREFIX_UNARY_EXPRESSION => self.prefix_unary(node),
            CsKind::POSTFIX_UNARY_EXPRESSION | CsKind::ASSIGNMENT_EXPRESSION => {
                Err(ConvertError::unsupported(kind, "assignment used as a value"))
            }
            CsKind::CONDITIONAL_EXPRESSION => {
                let condition = self.expr(self.ctx.nth(node, 0, "condition")?)?;
                let when_true = self.expr(self.ctx.nth(node, 1, "true branch")?)?;
                let when_false = self.expr(self.ctx.nth(node, 2, "false branch")?)?;
                Ok(vb::ternary_conditional(condition, when_true, when_false))
            }
            CsKind::CAST_EXPRESSION => {
                let ty = self.ty(self.ctx.nth(node, 0, "cast type")?)?;
                let value = self.expr(self.ctx.nth(node, 1, "cast operand")?)?;
                Ok(vb::cast(VbKind::CTYPE_KW, value, ty))
            }
            CsKind::OBJECT_CREATION_EXPRESSION => self.object_creation(node),
            CsKind::ARRAY_CREATION_EXPRESSION => self.array_creation(node),
            CsKind::INITIALIZER_EXPRESSION => self.initializer(node),
            CsKind::THIS_EXPRESSION => Ok(vb::me_expression()),
            CsKind::BASE_EXPRESSION => Ok(vb::my_base_expression()),
            CsKind::TYPE_OF_EXPRESSION => Ok(vb::get_type(self.ty(self.ctx.nth(node, 0, "type")?)?)),
            CsKind::PARENTHESIZED_LAMBDA_EXPRESSION
            | CsKind::SIMPLE_LAMBDA_EXPRESSION
            | CsKind::ANONYMOUS_METHOD_EXPRESSION => self.lambda(node, kind),
            // overflow checking is a project setting in Visual Basic
            CsKind::CHECKED_EXPRESSION => self.expr(self.ctx.nth(node, 0, "expression")?),
            _ => Err(ConvertError::internal(kind, "not an expression")),
        }
    }

    fn identifier_expr(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let text = self.ctx.text(ident);
        let symbol = self.ctx.model.symbol_info(node);
        let mut name = vb::identifier_name(self.ctx.identifier(text, symbol));
        if let Some(declaring) = self.ctx.qualifier_for(node) {
            let qualifier = self.ctx.type_syntax(declaring);
            name = vb::member_access(qualifier, name);
        }
        Ok(self.method_group(node, name))
    }

    fn method_group(&self, node: NodeId, converted: GreenNode) -> GreenNode {
        if self.is_method_group(node) { vb::address_of(converted) } else { converted }
    }

    /// `a.b`, converting `b` as a plain name.
    fn member_access(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left = self.expr(self.ctx.nth(node, 0, "receiver")?)?;
        let right_node = self.ctx.nth(node, 1, "member name")?;
        let right = match self.kind(right_node)? {
            CsKind::GENERIC_NAME => self.generic_name(right_node, true)?,
            _ => {
                let ident = self.ctx.ident_token(right_node)?;
                let text = self.ctx.text(ident);
                let symbol = self.ctx.model.symbol_info(right_node);
                vb::identifier_name(self.ctx.identifier(text, symbol))
            }
        };
        let right = self.ctx.annotate_expr(right_node, right);
        Ok(self.method_group(node, vb::member_access(left, right)))
    }

    /// `F<T>` is a generic name when closed and not bound to a value;
    /// otherwise it is the comparison `F < T` the parser could not rule out.
    fn generic_name(&mut self, node: NodeId, in_type: bool) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let text = self.ctx.text(ident);
        let symbol = self.ctx.model.symbol_info(node);
        let args_node = self.ctx.require(node, CsKind::TYPE_ARGUMENT_LIST)?;
        if !in_type {
            let value_bound = self.ctx.model.symbol(node).is_some_and(|s| s.kind.is_value());
            let closed = self
                .ctx
                .token(args_node, CsKind::GT)
                .is_some_and(|gt| !self.ctx.tree.token(gt).is_missing());
            let generic = !value_bound
                && (closed || try_parse_generic_name(self.ctx.tree, ident, self.ctx.cancel_token()).is_some());
            if !generic {
                tracing::trace!(name = text, "treating `<` as a comparison");
                let left = vb::identifier_name(self.ctx.identifier(text, symbol));
                let right = match self.ctx.nodes(args_node).as_slice() {
                    [only] => self.expr(*only)?,
                    _ => return Err(ConvertError::internal(CsKind::GENERIC_NAME, "ambiguous comparison")),
                };
                return Ok(vb::binary(left, VbKind::LT, right));
            }
        }
        let mut args = Vec::new();
        for arg in self.ctx.nodes(args_node) {
            args.push(self.ty(arg)?);
        }
        Ok(vb::generic_name(self.ctx.identifier(text, symbol), args))
    }

    pub(crate) fn arguments(&mut self, list: NodeId) -> ConvertResult<GreenNode> {
        let mut args = Vec::new();
        for arg in self.ctx.children_of(list, CsKind::ARGUMENT) {
            // `ref`/`out` are implied by the callee's ByRef parameters
            let value = self.expr(self.ctx.nth(arg, 0, "argument")?)?;
            args.push(vb::simple_argument(value));
        }
        Ok(vb::argument_list(args))
    }

    fn literal(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let token = self
            .ctx
            .tree
            .child_tokens(node)
            .next()
            .ok_or_else(|| ConvertError::internal(CsKind::LITERAL_EXPRESSION, "empty literal"))?;
        let text = self.ctx.text(token);
        match self.token_kind(token) {
            Some(CsKind::NUMERIC_LITERAL) => Ok(vb::numeric_literal(&numeric_to_vb(text))),
            Some(CsKind::STRING_LITERAL) => {
                let value = decode_string(text)
                    .ok_or_else(|| ConvertError::internal(CsKind::STRING_LITERAL, "invalid escape sequence"))?;
                Ok(vb::string_literal(&value))
            }
            Some(CsKind::CHAR_LITERAL) => {
                let value = text
                    .strip_prefix('\'')
                    .and_then(|t| t.strip_suffix('\''))
                    .and_then(unescape)
                    .filter(|v| v.chars().count() == 1)
                    .and_then(|v| v.chars().next())
                    .ok_or_else(|| ConvertError::internal(CsKind::CHAR_LITERAL, "invalid character literal"))?;
                Ok(vb::char_literal(value))
            }
            Some(CsKind::TRUE_KW) => Ok(vb::true_literal()),
            Some(CsKind::FALSE_KW) => Ok(vb::false_literal()),
            Some(CsKind::NULL_KW | CsKind::DEFAULT_KW) => Ok(vb::nothing_literal()),
            _ => Err(ConvertError::internal(CsKind::LITERAL_EXPRESSION, format!("unexpected literal `{text}`"))),
        }
    }

    fn binary(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left = self.ctx.nth(node, 0, "left operand")?;
        let right = self.ctx.nth(node, 1, "right operand")?;
        let operators: Vec<CsKind> = self.ctx.tree.child_tokens(node).filter_map(|t| self.token_kind(t)).collect();
        let operator = match operators.as_slice() {
            // `>>` lexed as two `>` to keep generic argument lists closable
            [CsKind::GT, CsKind::GT] => CsKind::GT_GT,
            [single] => *single,
            _ => return Err(ConvertError::internal(CsKind::BINARY_EXPRESSION, "missing operator")),
        };
        match operator {
            CsKind::IS_KW => Ok(vb::type_of_is(self.expr(left)?, false, self.ty(right)?)),
            CsKind::AS_KW => Ok(vb::cast(VbKind::TRY_CAST_KW, self.expr(left)?, self.ty(right)?)),
            CsKind::QUESTION_QUESTION => Ok(vb::binary_conditional(self.expr(left)?, self.expr(right)?)),
            CsKind::EQ_EQ | CsKind::BANG_EQ => self.equality(left, right, operator == CsKind::BANG_EQ),
            _ => {
                let mapped = self.binary_operator(operator, left, right)?;
                Ok(vb::binary(self.expr(left)?, mapped, self.expr(right)?))
            }
        }
    }

    fn binary_operator(&self, operator: CsKind, left: NodeId, right: NodeId) -> ConvertResult<VbKind> {
        let integral = |node| self.special_type_of(node).is_some_and(SpecialType::is_integral);
        Ok(match operator {
            CsKind::PLUS if self.is_string(left) || self.is_string(right) => VbKind::AMP,
            CsKind::PLUS => VbKind::PLUS,
            CsKind::MINUS => VbKind::MINUS,
            CsKind::STAR => VbKind::STAR,
            CsKind::SLASH if integral(left) && integral(right) => VbKind::BACKSLASH,
            CsKind::SLASH => VbKind::SLASH,
            CsKind::PERCENT => VbKind::MOD_KW,
            CsKind::LT => VbKind::LT,
            CsKind::GT => VbKind::GT,
            CsKind::LT_EQ => VbKind::LT_EQ,
            CsKind::GT_EQ => VbKind::GT_EQ,
            CsKind::AMP_AMP => VbKind::AND_ALSO_KW,
            CsKind::PIPE_PIPE => VbKind::OR_ELSE_KW,
            CsKind::AMP => VbKind::AND_KW,
            CsKind::PIPE => VbKind::OR_KW,
            CsKind::CARET => VbKind::XOR_KW,
            CsKind::LT_LT => VbKind::LT_LT,
            CsKind::GT_GT => VbKind::GT_GT,
            other => return Err(ConvertError::internal(other, "not a binary operator")),
        })
    }

    fn is_default_value(&self, node: NodeId) -> bool {
        match self.ctx.kind(node) {
            SyntaxKind::Cs(CsKind::DEFAULT_EXPRESSION) => true,
            SyntaxKind::Cs(CsKind::LITERAL_EXPRESSION) => {
                self.ctx.has_token(node, CsKind::NULL_KW) || self.ctx.has_token(node, CsKind::DEFAULT_KW)
            }
            _ => false,
        }
    }

    /// `==`/`!=`. Reference comparisons and comparisons with `null` use
    /// `Is`/`IsNot`; a value type against its default compares with
    /// `= Nothing`, which `Is` would reject. A type with its own `==`
    /// keeps `=` so the operator still runs.
    fn equality(&mut self, left: NodeId, right: NodeId, negated: bool) -> ConvertResult<GreenNode> {
        let table = self.ctx.table();
        let value_typed = |this: &Self, node| this.ctx.model.type_info(node).is_some_and(|ty| is_value_type(table, ty));
        let defaulted = if self.is_default_value(right) {
            Some(left)
        } else if self.is_default_value(left) {
            Some(right)
        } else {
            None
        };
        if let Some(operand) = defaulted {
            let value = self.expr(operand)?;
            let operator = match (value_typed(self, operand), negated) {
                (true, false) => VbKind::EQ,
                (true, true) => VbKind::LT_GT,
                (false, false) => VbKind::IS_KW,
                (false, true) => VbKind::IS_NOT_KW,
            };
            return Ok(vb::binary(value, operator, vb::nothing_literal()));
        }
        let reference = |this: &Self, node| {
            this.ctx.model.type_symbol(node).is_some_and(|s| {
                s.type_info.as_ref().is_some_and(|info| info.is_reference_type)
                    && s.special_type() != Some(SpecialType::String)
                    && !defines_equality_operator(table, s.id)
            })
        };
        let by_reference = reference(self, left) && reference(self, right);
        let operator = match (by_reference, negated) {
            (true, false) => VbKind::IS_KW,
            (true, true) => VbKind::IS_NOT_KW,
            (false, false) => VbKind::EQ,
            (false, true) => VbKind::LT_GT,
        };
        Ok(vb::binary(self.expr(left)?, operator, self.expr(right)?))
    }

    fn prefix_unary(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let operator = self.ctx.tree.child_tokens(node).find_map(|t| self.token_kind(t));
        let mapped = match operator {
            Some(CsKind::BANG | CsKind::TILDE) => VbKind::NOT_KW,
            Some(CsKind::MINUS) => VbKind::MINUS,
            Some(CsKind::PLUS) => VbKind::PLUS,
            _ => return Err(ConvertError::unsupported(CsKind::PREFIX_UNARY_EXPRESSION, "increment used as a value")),
        };
        Ok(vb::unary(mapped, self.expr(self.ctx.nth(node, 0, "operand")?)?))
    }

    fn object_creation(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ty = self.ty(self.ctx.nth(node, 0, "created type")?)?;
        let args = match self.ctx.child(node, CsKind::ARGUMENT_LIST) {
            Some(list) => Some(self.arguments(list)?),
            None => None,
        };
        let initializer = match self.ctx.child(node, CsKind::INITIALIZER_EXPRESSION) {
            Some(init) => {
                let assigns = self
                    .ctx
                    .nodes(init)
                    .into_iter()
                    .any(|e| self.ctx.kind(e) == CsKind::ASSIGNMENT_EXPRESSION);
                if assigns {
                    return Err(ConvertError::unsupported(CsKind::OBJECT_CREATION_EXPRESSION, "object initializers"));
                }
                Some(self.initializer(init)?)
            }
            None => None,
        };
        let args = match (args, &initializer) {
            (None, None) => Some(vb::argument_list(Vec::new())),
            (args, _) => args,
        };
        Ok(vb::object_creation(ty, args, initializer))
    }

    fn initializer(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let mut values = Vec::new();
        for value in self.ctx.nodes(node) {
            values.push(self.expr(value)?);
        }
        Ok(vb::collection_initializer(values))
    }

    /// `new int[n]` → `New Integer(n - 1) {}`: Visual Basic bounds are upper
    /// indices, not lengths.
    fn array_creation(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let array_type = self.ctx.require(node, CsKind::ARRAY_TYPE)?;
        let ranks = self.ctx.children_of(array_type, CsKind::ARRAY_RANK_SPECIFIER);
        let mut element = self.ty(self.ctx.nth(array_type, 0, "element type")?)?;
        if ranks.len() > 1 {
            let inner = ranks[1..].iter().map(|&r| vb::array_rank_specifier(self.rank_of(r))).collect();
            element = vb::array_type(element, inner);
        }
        let sizes = ranks.first().map(|&r| self.ctx.nodes(r)).unwrap_or_default();
        let bounds = if sizes.is_empty() {
            vb::array_rank_specifier(ranks.first().map_or(1, |&r| self.rank_of(r)))
        } else {
            let mut args = Vec::new();
            for size in sizes {
                args.push(vb::simple_argument(self.upper_bound(size)?));
            }
            vb::argument_list(args)
        };
        let initializer = match self.ctx.child(node, CsKind::INITIALIZER_EXPRESSION) {
            Some(init) => self.initializer(init)?,
            None => vb::collection_initializer(Vec::new()),
        };
        Ok(vb::array_creation(element, bounds, initializer))
    }

    fn rank_of(&self, specifier: NodeId) -> usize {
        1 + self.ctx.token_kinds(specifier).iter().filter(|&&k| k == CsKind::COMMA).count()
    }

    fn upper_bound(&mut self, size: NodeId) -> ConvertResult<GreenNode> {
        if self.ctx.kind(size) == CsKind::LITERAL_EXPRESSION {
            let length = self.ctx.tree.node_text(size).trim().parse::<u64>().ok();
            if let Some(length) = length.filter(|&n| n > 0) {
                self.ctx.discard(size);
                return Ok(vb::numeric_literal(&(length - 1).to_string()));
            }
        }
        let length = self.expr(size)?;
        let length = if length.kind() == VbKind::BINARY_EXPRESSION { vb::parenthesized(length) } else { length };
        Ok(vb::binary(length, VbKind::MINUS, vb::numeric_literal("1")))
    }

    /// Lambdas and anonymous methods become `Sub` or `Function` lambdas.
    fn lambda(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<GreenNode> {
        let params = match kind {
            CsKind::SIMPLE_LAMBDA_EXPRESSION => {
                vb::parameter_list(vec![self.parameter(self.ctx.require(node, CsKind::PARAMETER)?)?])
            }
            _ => match self.ctx.child(node, CsKind::PARAMETER_LIST) {
                Some(list) => self.parameter_list(list)?,
                None => vb::parameter_list(Vec::new()),
            },
        };
        let body = self
            .ctx
            .tree
            .child_nodes(node)
            .last()
            .filter(|&b| !matches!(self.ctx.kind(b), SyntaxKind::Cs(CsKind::PARAMETER | CsKind::PARAMETER_LIST)))
            .ok_or_else(|| ConvertError::internal(kind, "missing body"))?;
        let is_sub = self.lambda_is_sub(node, body);
        let header = vb::lambda_header(if is_sub { VbKind::SUB_KW } else { VbKind::FUNCTION_KW }, params);
        if self.ctx.kind(body) == CsKind::BLOCK {
            let indent = self.line_indent(node);
            let block = self.block(body, &indent)?;
            let lambda = vb::multi_line_lambda(header, block.statements);
            return Ok(self.ctx.decorate_block(lambda, block.header, block.closing));
        }
        let body = if is_sub { self.expression_statement(body)? } else { self.expr(body)? };
        Ok(vb::single_line_lambda(header, body))
    }

    /// A lambda returns nothing when the model says so; otherwise guess from
    /// the body.
    fn lambda_is_sub(&self, node: NodeId, body: NodeId) -> bool {
        let table = self.ctx.table();
        let returns = self.ctx.model.symbol(node).and_then(|s| s.ty).and_then(|ty| table.get(ty));
        if let Some(returns) = returns {
            return returns.special_type() == Some(SpecialType::Void);
        }
        match self.ctx.kind(body).as_cs() {
            Some(CsKind::BLOCK) => !self.ctx.tree.descendants(body).into_iter().any(|d| {
                self.ctx.kind(d) == CsKind::RETURN_STATEMENT && self.ctx.tree.child_nodes(d).next().is_some()
            }),
            Some(CsKind::ASSIGNMENT_EXPRESSION | CsKind::POSTFIX_UNARY_EXPRESSION) => true,
            Some(CsKind::INVOCATION_EXPRESSION) => match self.ctx.model.type_symbol(body) {
                Some(ty) => ty.special_type() == Some(SpecialType::Void),
                None => true,
            },
            _ => false,
        }
    }

    /// Convert a type. Primitive types become Visual Basic keywords,
    /// including when written by their framework name.
    pub(crate) fn ty(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let kind = self.kind(node)?;
        match kind {
            CsKind::PREDEFINED_TYPE => {
                let keyword = self
                    .ctx
                    .tree
                    .child_tokens(node)
                    .next()
                    .map(|t| self.ctx.tree.token_kind(t))
                    .and_then(SpecialType::from_keyword)
                    .and_then(|special| special.keyword(Language::VisualBasic))
                    .and_then(SyntaxKind::as_vb)
                    .ok_or_else(|| ConvertError::internal(kind, "no Visual Basic keyword"))?;
                Ok(vb::predefined_type(keyword))
            }
            CsKind::IDENTIFIER_NAME => {
                if let Some(keyword) = self.keyword_type(node) {
                    return Ok(keyword);
                }
                let ident = self.ctx.ident_token(node)?;
                let text = self.ctx.text(ident);
                let symbol = self.ctx.model.symbol_info(node);
                Ok(vb::identifier_name(self.ctx.identifier(text, symbol)))
            }
            CsKind::GENERIC_NAME => self.generic_name(node, true),
            CsKind::QUALIFIED_NAME => {
                if let Some(keyword) = self.keyword_type(node) {
                    self.ctx.discard(node);
                    return Ok(keyword);
                }
                let left = self.ty(self.ctx.nth(node, 0, "qualifier")?)?;
                let right = self.ty(self.ctx.nth(node, 1, "name")?)?;
                Ok(vb::qualified_name(left, right))
            }
            CsKind::ALIAS_QUALIFIED_NAME => {
                let alias = self.ctx.nth(node, 0, "alias")?;
                let left = if self.ctx.tree.node_text(alias).trim() == "global" {
                    vb::global_name()
                } else {
                    self.ty(alias)?
                };
                let right = self.ty(self.ctx.nth(node, 1, "name")?)?;
                Ok(vb::qualified_name(left, right))
            }
            CsKind::ARRAY_TYPE => {
                let element = self.ty(self.ctx.nth(node, 0, "element type")?)?;
                let ranks = self
                    .ctx
                    .children_of(node, CsKind::ARRAY_RANK_SPECIFIER)
                    .into_iter()
                    .map(|r| vb::array_rank_specifier(self.rank_of(r)))
                    .collect();
                Ok(vb::array_type(element, ranks))
            }
            CsKind::NULLABLE_TYPE => Ok(vb::nullable_type(self.ty(self.ctx.nth(node, 0, "underlying type")?)?)),
            CsKind::POINTER_TYPE => Err(unsupported(kind)),
            _ => Err(ConvertError::internal(kind, "not a type")),
        }
    }

    /// `Int32` or `System.String` bound to a primitive type.
    fn keyword_type(&self, node: NodeId) -> Option<GreenNode> {
        let symbol = self.bound(node).filter(|s| has_keyword(s))?;
        let keyword = symbol.special_type()?.keyword(Language::VisualBasic)?.as_vb()?;
        Some(vb::predefined_type(keyword))
    }
}

/// C# numeric literal spelled for Visual Basic: `0xFFu` → `&HFFUI`,
/// `1.5f` → `1.5F`, `2m` → `2D`.
fn numeric_to_vb(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let (prefix, body) = if let Some(rest) = lower.strip_prefix("0x") {
        ("&H", rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        ("&B", rest)
    } else {
        ("", lower.as_str())
    };
    let suffixes: &[char] = if prefix.is_empty() { &['u', 'l', 'f', 'd', 'm'] } else { &['u', 'l'] };
    let split = body.trim_end_matches(suffixes).len();
    let (digits, suffix) = body.split_at(split);
    let suffix = match suffix {
        "" => "",
        "u" => "UI",
        "l" => "L",
        "ul" | "lu" => "UL",
        "f" => "F",
        "d" => "R",
        "m" => "D",
        other => other,
    };
    if prefix.is_empty() {
        format!("{digits}{suffix}")
    } else {
        format!("{prefix}{}{suffix}", digits.to_ascii_uppercase())
    }
}

/// Value of a regular or verbatim C# string literal.
fn decode_string(text: &str) -> Option<String> {
    if let Some(inner) = text.strip_prefix("@\"").and_then(|t| t.strip_suffix('"')) {
        return Some(inner.replace("\"\"", "\""));
    }
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    unescape(inner)
}

/// Resolve C# escape sequences.
fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            '0' => '\0',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?
            }
            'x' => {
                let rest = chars.as_str();
                let len = rest.chars().take(4).take_while(|c| c.is_ascii_hexdigit()).count();
                if len == 0 {
                    return None;
                }
                let value = u32::from_str_radix(&rest[..len], 16).ok()?;
                chars = rest[len..].chars();
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals() {
        assert_eq!(numeric_to_vb("42"), "42");
        assert_eq!(numeric_to_vb("0xFFu"), "&HFFUI");
        assert_eq!(numeric_to_vb("0x1f"), "&H1F");
        assert_eq!(numeric_to_vb("10UL"), "10UL");
        assert_eq!(numeric_to_vb("1.5f"), "1.5F");
        assert_eq!(numeric_to_vb("2.0d"), "2.0R");
        assert_eq!(numeric_to_vb("9.99m"), "9.99D");
        assert_eq!(numeric_to_vb("1e5"), "1e5");
    }

    #[test]
    fn test_string_decoding() {
        assert_eq!(decode_string(r#""a\tb\n""#).as_deref(), Some("a\tb\n"));
        assert_eq!(decode_string(r#"@"c:\temp\""#).as_deref(), Some(r"c:\temp\"));
        assert_eq!(decode_string(r#"@"say ""hi""""#).as_deref(), Some(r#"say "hi""#));
        assert_eq!(decode_string(r#""\u0041\x42""#).as_deref(), Some("AB"));
        assert_eq!(decode_string(r#""bad \q""#), None);
    }
}
