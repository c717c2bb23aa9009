//! Expressions, names and types.

use super::{VbToCs, malformed_token, role, unsupported};
use crate::convert::context::Role;
use crate::convert::error::{ConvertError, ConvertResult};
use crate::semantic::types::enum_underlying_type;
use crate::semantic::{SpecialType, TypeKind, has_keyword, is_value_type};
use crate::syntax::factory::{self, cs};
use crate::syntax::{CsKind, GreenNode, Language, NodeId, SyntaxKind, VbKind};

impl VbToCs<'_, '_> {
    /// Convert an expression. Failures degrade to a `default` placeholder.
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

    fn expr_of_kind(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<GreenNode> {
        match kind {
            VbKind::IDENTIFIER_NAME => self.identifier_expr(node),
            VbKind::GENERIC_NAME => self.generic_name(node),
            VbKind::QUALIFIED_NAME | VbKind::PREDEFINED_TYPE | VbKind::ARRAY_TYPE | VbKind::NULLABLE_TYPE => {
                self.ty(node)
            }
            VbKind::GLOBAL_NAME => Err(ConvertError::unsupported(kind, "`Global` outside a qualified name")),
            VbKind::MEMBER_ACCESS_EXPRESSION => self.member_access(node),
            VbKind::INVOCATION_EXPRESSION => self.invocation(node),
            VbKind::LITERAL_EXPRESSION => self.literal(node),
            VbKind::PARENTHESIZED_EXPRESSION => Ok(cs::parenthesized(self.expr(self.ctx.nth(node, 0, "expression")?)?)),
            VbKind::BINARY_EXPRESSION => self.binary(node),
            VbKind::UNARY_EXPRESSION => self.unary(node),
            VbKind::TERNARY_CONDITIONAL_EXPRESSION => {
                let condition = self.expr(self.ctx.nth(node, 0, "condition")?)?;
                let when_true = self.expr(self.ctx.nth(node, 1, "true branch")?)?;
                let when_false = self.expr(self.ctx.nth(node, 2, "false branch")?)?;
                Ok(cs::conditional(condition, when_true, when_false))
            }
            VbKind::BINARY_CONDITIONAL_EXPRESSION => {
                let value = self.expr(self.ctx.nth(node, 0, "tested value")?)?;
                let fallback = self.expr(self.ctx.nth(node, 1, "fallback")?)?;
                Ok(binary(value, CsKind::QUESTION_QUESTION, fallback))
            }
            VbKind::CAST_EXPRESSION => self.cast(node),
            VbKind::OBJECT_CREATION_EXPRESSION => self.object_creation(node),
            VbKind::ARRAY_CREATION_EXPRESSION => self.array_creation(node),
            VbKind::COLLECTION_INITIALIZER => self.initializer(node),
            VbKind::ME_EXPRESSION => Ok(cs::this_expression()),
            VbKind::MY_BASE_EXPRESSION => Ok(cs::base_expression()),
            VbKind::GET_TYPE_EXPRESSION => Ok(cs::type_of(self.ty(self.ctx.nth(node, 0, "type")?)?)),
            VbKind::TYPE_OF_IS_EXPRESSION => self.type_of_is(node),
            VbKind::SINGLE_LINE_LAMBDA_EXPRESSION | VbKind::MULTI_LINE_LAMBDA_EXPRESSION => self.lambda(node, kind),
            // a method group converts to a delegate implicitly in C#
            VbKind::ADDRESS_OF_EXPRESSION => self.expr(self.ctx.nth(node, 0, "method")?),
            _ => Err(ConvertError::internal(kind, "not an expression")),
        }
    }

    fn identifier_expr(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let text = self.ctx.text(ident);
        let symbol = self.ctx.model.symbol_info(node);
        let runtime_constant = match self.ctx.model.symbol(node) {
            None => true,
            Some(bound) => {
                let table = self.ctx.table();
                bound.containing_type.and_then(|t| table.get(t)).is_some_and(|t| t.name == "Constants")
            }
        };
        if runtime_constant {
            if let Some(value) = runtime_constant_value(text) {
                tracing::trace!(name = text, "inlining runtime constant");
                return Ok(cs::string_literal(value));
            }
        }
        let mut name = cs::identifier_name(self.ctx.identifier(text, symbol));
        if let Some(declaring) = self.ctx.qualifier_for(node) {
            let qualifier = self.ctx.type_syntax(declaring);
            name = cs::member_access(qualifier, name);
        }
        Ok(self.implicit_call(node, name))
    }

    fn implicit_call(&self, node: NodeId, converted: GreenNode) -> GreenNode {
        if self.is_implicit_call(node) { cs::invocation(converted, cs::argument_list(Vec::new())) } else { converted }
    }

    /// `a.b`, converting `b` as a plain name. `Global.X` becomes `global::X`.
    fn member_access(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left_node = self.ctx.nth(node, 0, "receiver")?;
        let right_node = self.ctx.nth(node, 1, "member name")?;
        let right = match self.kind(right_node)? {
            VbKind::GENERIC_NAME => self.generic_name(right_node)?,
            _ => {
                let ident = self.ctx.ident_token(right_node)?;
                let text = self.ctx.text(ident);
                let symbol = self.ctx.model.symbol_info(right_node);
                cs::identifier_name(self.ctx.identifier(text, symbol))
            }
        };
        let right = self.ctx.annotate_expr(right_node, right);
        if self.ctx.kind(left_node) == VbKind::GLOBAL_NAME {
            return Ok(cs::alias_qualified_name(factory::token(CsKind::GLOBAL_KW), right));
        }
        let left = self.expr(left_node)?;
        Ok(self.implicit_call(node, cs::member_access(left, right)))
    }

    /// `F(Of T)`. Visual Basic spells generics unambiguously, so this is
    /// always a generic name.
    fn generic_name(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let text = self.ctx.text(ident);
        let symbol = self.ctx.model.symbol_info(node);
        let args_node = self.ctx.require(node, VbKind::TYPE_ARGUMENT_LIST)?;
        let mut args = Vec::new();
        for arg in self.ctx.nodes(args_node) {
            args.push(self.ty(arg)?);
        }
        Ok(cs::generic_name(self.ctx.identifier(text, symbol), args))
    }

    /// `f(x)` is a call or, when `f` is a value, an element access.
    fn invocation(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let callee = self.ctx.nth(node, 0, "callee")?;
        let list = self.ctx.child(node, VbKind::ARGUMENT_LIST);
        let indexed = self.is_indexed(callee);
        let callee = self.expr(callee)?;
        let args = match list {
            Some(list) => self.argument_nodes(list)?,
            None => Vec::new(),
        };
        if indexed {
            return Ok(cs::element_access(callee, cs::bracketed_argument_list(args)));
        }
        // `F()()` is already a call once the inner name gained its `()`
        if list.is_none() && callee.kind() == CsKind::INVOCATION_EXPRESSION {
            return Ok(callee);
        }
        Ok(cs::invocation(callee, cs::argument_list(args)))
    }

    pub(crate) fn arguments(&mut self, list: NodeId) -> ConvertResult<GreenNode> {
        Ok(cs::argument_list(self.argument_nodes(list)?))
    }

    fn argument_nodes(&mut self, list: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let mut args = Vec::new();
        for arg in self.ctx.children_of(list, VbKind::SIMPLE_ARGUMENT) {
            let Some(value) = self.ctx.tree.child_nodes(arg).next() else {
                return Err(ConvertError::unsupported(VbKind::ARGUMENT_LIST, "omitted arguments"));
            };
            args.push(cs::argument(self.expr(value)?));
        }
        Ok(args)
    }

    fn literal(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let token = self
            .ctx
            .tree
            .child_tokens(node)
            .next()
            .ok_or_else(|| ConvertError::internal(VbKind::LITERAL_EXPRESSION, "empty literal"))?;
        let text = self.ctx.text(token);
        match self.token_kind(token) {
            Some(VbKind::NUMERIC_LITERAL) => {
                let (spelled, cast) = numeric_to_cs(text);
                let literal = cs::numeric_literal(&spelled);
                Ok(match cast {
                    Some(keyword) => cs::cast(cs::predefined_type(keyword), literal),
                    None => literal,
                })
            }
            Some(VbKind::STRING_LITERAL) => {
                let value = decode_string(text)
                    .ok_or_else(|| ConvertError::internal(VbKind::STRING_LITERAL, "unterminated string"))?;
                Ok(cs::string_literal(&value))
            }
            Some(VbKind::CHAR_LITERAL) => {
                let value = decode_char(text)
                    .ok_or_else(|| ConvertError::internal(VbKind::CHAR_LITERAL, "invalid character literal"))?;
                Ok(cs::char_literal(value))
            }
            Some(VbKind::TRUE_KW) => Ok(cs::true_literal()),
            Some(VbKind::FALSE_KW) => Ok(cs::false_literal()),
            Some(VbKind::NOTHING_KW) => Ok(self.nothing(node)),
            _ => Err(ConvertError::internal(VbKind::LITERAL_EXPRESSION, format!("unexpected literal `{text}`"))),
        }
    }

    /// `Nothing` is `null` for references and `default` for values and
    /// type parameters.
    fn nothing(&self, node: NodeId) -> GreenNode {
        let table = self.ctx.table();
        let defaulted = self.ctx.model.type_info(node).is_some_and(|ty| {
            is_value_type(table, ty) || table.get(ty).and_then(|s| s.type_kind()) == Some(TypeKind::TypeParameter)
        });
        if defaulted { cs::default_literal() } else { cs::null_literal() }
    }

    fn is_nothing(&self, node: NodeId) -> bool {
        self.ctx.kind(node) == VbKind::LITERAL_EXPRESSION && self.ctx.has_token(node, VbKind::NOTHING_KW)
    }

    /// Special type of an expression, from the model or the literal itself.
    pub(crate) fn special_type_of(&self, node: NodeId) -> Option<SpecialType> {
        if let Some(special) = self.ctx.model.type_symbol(node).and_then(|s| s.special_type()) {
            return Some(special);
        }
        let table = self.ctx.table();
        if let Some(underlying) = self.ctx.model.type_info(node).and_then(|ty| enum_underlying_type(table, ty)) {
            return Some(underlying);
        }
        match self.ctx.kind(node).as_vb()? {
            VbKind::PARENTHESIZED_EXPRESSION => self.special_type_of(self.ctx.tree.child_nodes(node).next()?),
            VbKind::LITERAL_EXPRESSION => {
                let token = self.ctx.tree.child_tokens(node).next()?;
                match self.token_kind(token)? {
                    VbKind::STRING_LITERAL => Some(SpecialType::String),
                    VbKind::CHAR_LITERAL => Some(SpecialType::Char),
                    VbKind::TRUE_KW | VbKind::FALSE_KW => Some(SpecialType::Boolean),
                    VbKind::NUMERIC_LITERAL => Some(numeric_type(self.ctx.text(token))),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn is_string(&self, node: NodeId) -> bool {
        self.special_type_of(node) == Some(SpecialType::String)
    }

    fn is_integral(&self, node: NodeId) -> bool {
        self.special_type_of(node).is_some_and(SpecialType::is_integral)
    }

    fn binary(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left = self.ctx.nth(node, 0, "left operand")?;
        let right = self.ctx.nth(node, 1, "right operand")?;
        let operators: Vec<VbKind> = self.ctx.tree.child_tokens(node).filter_map(|t| self.token_kind(t)).collect();
        let operator = match operators.as_slice() {
            [single] => *single,
            _ => return Err(ConvertError::internal(VbKind::BINARY_EXPRESSION, "missing operator")),
        };
        match operator {
            VbKind::AMP => self.concatenation(node, left, right),
            VbKind::EQ | VbKind::LT_GT | VbKind::IS_KW | VbKind::IS_NOT_KW => self.equality(left, right, operator),
            VbKind::CARET => {
                self.ctx.require_import("System");
                let args = vec![cs::argument(self.expr(left)?), cs::argument(self.expr(right)?)];
                Ok(cs::invocation(cs::member_access(cs::name("Math"), cs::name("Pow")), cs::argument_list(args)))
            }
            // `/` is always floating point in Visual Basic
            VbKind::SLASH if self.is_integral(left) && self.is_integral(right) => {
                let value = self.expr(left)?;
                let value = if is_primary(&value) { value } else { cs::parenthesized(value) };
                let dividend = cs::cast(cs::predefined_type(CsKind::DOUBLE_KW), value);
                Ok(binary(dividend, CsKind::SLASH, self.expr(right)?))
            }
            VbKind::LT | VbKind::GT | VbKind::LT_EQ | VbKind::GT_EQ if self.is_string(left) && self.is_string(right) => {
                let mapped = binary_operator(operator)?;
                let args = vec![cs::argument(self.expr(left)?), cs::argument(self.expr(right)?)];
                let compare = cs::invocation(string_member("CompareOrdinal"), cs::argument_list(args));
                Ok(binary(compare, mapped, cs::numeric_literal("0")))
            }
            _ => {
                let mapped = binary_operator(operator)?;
                Ok(binary(self.expr(left)?, mapped, self.expr(right)?))
            }
        }
    }

    /// `&`. Chains of string constants fold into one literal; otherwise the
    /// operands are concatenated as strings whatever their types.
    fn concatenation(&mut self, node: NodeId, left: NodeId, right: NodeId) -> ConvertResult<GreenNode> {
        if let Some(value) = self.constant_string(node) {
            self.ctx.discard(node);
            return Ok(cs::string_literal(&value));
        }
        let stringly = self.is_string(left) || self.is_string(right);
        let left = self.expr(left)?;
        let right = self.expr(right)?;
        if stringly {
            return Ok(binary(left, CsKind::PLUS, right));
        }
        let args = vec![cs::argument(left), cs::argument(right)];
        Ok(cs::invocation(string_member("Concat"), cs::argument_list(args)))
    }

    fn constant_string(&self, node: NodeId) -> Option<String> {
        match self.ctx.kind(node).as_vb()? {
            VbKind::BINARY_EXPRESSION => {
                if !self.ctx.has_token(node, VbKind::AMP) {
                    return None;
                }
                let mut operands = self.ctx.tree.child_nodes(node);
                let (left, right) = (operands.next()?, operands.next()?);
                let mut value = self.constant_string(left)?;
                value.push_str(&self.constant_string(right)?);
                Some(value)
            }
            VbKind::PARENTHESIZED_EXPRESSION => self.constant_string(self.ctx.tree.child_nodes(node).next()?),
            VbKind::LITERAL_EXPRESSION => {
                let token = self.ctx.tree.child_tokens(node).next()?;
                let text = self.ctx.text(token);
                match self.token_kind(token)? {
                    VbKind::STRING_LITERAL => decode_string(text),
                    VbKind::CHAR_LITERAL => decode_char(text).map(String::from),
                    _ => None,
                }
            }
            VbKind::IDENTIFIER_NAME if self.ctx.model.symbol_info(node).is_none() => {
                let ident = self.ctx.ident_token(node).ok()?;
                runtime_constant_value(self.ctx.text(ident)).map(String::from)
            }
            _ => None,
        }
    }

    /// `=`, `<>`, `Is` and `IsNot`. Against `Nothing`, `=` and `<>` on
    /// strings compare as empty-or-null, values against their default and
    /// references against `null`. `Is` is identity, so a string stays a
    /// `null` check.
    fn equality(&mut self, left: NodeId, right: NodeId, operator: VbKind) -> ConvertResult<GreenNode> {
        let negated = matches!(operator, VbKind::LT_GT | VbKind::IS_NOT_KW);
        let identity = matches!(operator, VbKind::IS_KW | VbKind::IS_NOT_KW);
        let operator = if negated { CsKind::BANG_EQ } else { CsKind::EQ_EQ };
        let tested = if self.is_nothing(right) {
            Some((left, right))
        } else if self.is_nothing(left) {
            Some((right, left))
        } else {
            None
        };
        let Some((operand, nothing)) = tested else {
            return Ok(binary(self.expr(left)?, operator, self.expr(right)?));
        };
        self.ctx.discard(nothing);
        let value = self.expr(operand)?;
        if !identity && self.is_string(operand) {
            let test =
                cs::invocation(string_member("IsNullOrEmpty"), cs::argument_list(vec![cs::argument(value)]));
            return Ok(if negated { cs::prefix_unary(CsKind::BANG, test) } else { test });
        }
        let table = self.ctx.table();
        let default = match self.ctx.model.type_info(operand) {
            Some(ty) if is_value_type(table, ty) => cs::default_expression(self.ctx.type_syntax(ty)),
            _ => cs::null_literal(),
        };
        Ok(binary(value, operator, default))
    }

    /// `Not` is logical on booleans and bitwise on integers.
    fn unary(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let operand_node = self.ctx.nth(node, 0, "operand")?;
        let operator = self.ctx.tree.child_tokens(node).find_map(|t| self.token_kind(t));
        let mapped = match operator {
            Some(VbKind::NOT_KW) if self.is_integral(operand_node) => CsKind::TILDE,
            Some(VbKind::NOT_KW) => CsKind::BANG,
            Some(VbKind::MINUS) => CsKind::MINUS,
            Some(VbKind::PLUS) => CsKind::PLUS,
            _ => return Err(ConvertError::internal(VbKind::UNARY_EXPRESSION, "missing operator")),
        };
        let operand = self.expr(operand_node)?;
        let operand = if is_primary(&operand) { operand } else { cs::parenthesized(operand) };
        Ok(cs::prefix_unary(mapped, operand))
    }

    /// `CType`/`DirectCast` become casts, `TryCast` becomes `as`. `CType`
    /// from a string to a number parses, which needs `Convert`.
    fn cast(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let keyword = self.ctx.tree.child_tokens(node).find_map(|t| self.token_kind(t));
        let operand_node = self.ctx.nth(node, 0, "cast operand")?;
        let ty_node = self.ctx.nth(node, 1, "cast type")?;
        let target = self.special_type_of_type(ty_node);
        match keyword {
            Some(VbKind::TRY_CAST_KW) => {
                let value = self.expr(operand_node)?;
                Ok(binary(value, CsKind::AS_KW, self.ty(ty_node)?))
            }
            Some(VbKind::CTYPE_KW)
                if self.is_string(operand_node)
                    && target.is_some_and(|t| t.is_numeric() || t == SpecialType::Boolean) =>
            {
                let target = target.map_or("Object", SpecialType::metadata_name);
                self.ctx.require_import("System");
                self.ctx.discard(ty_node);
                let value = self.expr(operand_node)?;
                let convert = cs::member_access(cs::name("Convert"), cs::name(&format!("To{target}")));
                Ok(cs::invocation(convert, cs::argument_list(vec![cs::argument(value)])))
            }
            Some(VbKind::CTYPE_KW | VbKind::DIRECT_CAST_KW) => {
                let ty = self.ty(ty_node)?;
                let value = self.expr(operand_node)?;
                let value = if is_primary(&value) { value } else { cs::parenthesized(value) };
                Ok(cs::cast(ty, value))
            }
            _ => Err(ConvertError::internal(VbKind::CAST_EXPRESSION, "missing cast keyword")),
        }
    }

    fn special_type_of_type(&self, node: NodeId) -> Option<SpecialType> {
        if self.ctx.kind(node) == VbKind::PREDEFINED_TYPE {
            let keyword = self.ctx.tree.child_tokens(node).next()?;
            return SpecialType::from_keyword(self.ctx.tree.token_kind(keyword));
        }
        self.bound(node)?.special_type()
    }

    /// `TypeOf x Is T` → `x is T`; `IsNot` negates the whole test.
    fn type_of_is(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let value = self.expr(self.ctx.nth(node, 0, "tested value")?)?;
        let ty = self.ty(self.ctx.nth(node, 1, "tested type")?)?;
        let test = binary(value, CsKind::IS_KW, ty);
        if self.ctx.has_token(node, VbKind::IS_NOT_KW) {
            return Ok(cs::prefix_unary(CsKind::BANG, cs::parenthesized(test)));
        }
        Ok(test)
    }

    fn object_creation(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ty = self.ty(self.ctx.nth(node, 0, "created type")?)?;
        let args = match self.ctx.child(node, VbKind::ARGUMENT_LIST) {
            Some(list) => Some(self.arguments(list)?),
            None => None,
        };
        let initializer = match self.ctx.child(node, VbKind::COLLECTION_INITIALIZER) {
            Some(init) => Some(self.initializer(init)?),
            None => None,
        };
        let args = match (args, &initializer) {
            (None, None) => Some(cs::argument_list(Vec::new())),
            (args, _) => args,
        };
        Ok(cs::object_creation(ty, args, initializer))
    }

    fn initializer(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let mut values = Vec::new();
        for value in self.ctx.nodes(node) {
            values.push(self.expr(value)?);
        }
        Ok(cs::initializer(values))
    }

    /// `New Integer(4) {}` → `new int[5]`: Visual Basic bounds are upper
    /// indices, not lengths.
    fn array_creation(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let element = self.ty(self.ctx.nth(node, 0, "element type")?)?;
        let mut sizes = Vec::new();
        let mut rank = 1;
        if let Some(bounds) = self.ctx.child(node, VbKind::ARGUMENT_LIST) {
            for arg in self.ctx.children_of(bounds, VbKind::SIMPLE_ARGUMENT) {
                let bound = self.ctx.nth(arg, 0, "array bound")?;
                sizes.push(self.length(bound)?);
            }
        } else if let Some(specifier) = self.ctx.child(node, VbKind::ARRAY_RANK_SPECIFIER) {
            rank = self.rank_of(specifier);
        }
        let specifier = if sizes.is_empty() {
            cs::omitted_rank_specifier(rank)
        } else {
            cs::array_rank_specifier(sizes.clone())
        };
        // `New Integer()() {}`: the created rank comes before the element's
        let array_type = if element.kind() == CsKind::ARRAY_TYPE {
            let mut parts = element.child_nodes().cloned();
            let inner = parts.next().unwrap_or_else(|| self.ctx.object_type());
            let mut ranks = vec![specifier];
            ranks.extend(parts);
            cs::array_type(inner, ranks)
        } else {
            cs::array_type(element, vec![specifier])
        };
        let values = match self.ctx.child(node, VbKind::COLLECTION_INITIALIZER) {
            Some(init) => {
                let mut values = Vec::new();
                for value in self.ctx.nodes(init) {
                    values.push(self.expr(value)?);
                }
                values
            }
            None => Vec::new(),
        };
        let initializer = match (sizes.is_empty(), values.is_empty()) {
            (false, true) => None,
            _ => Some(cs::initializer(values)),
        };
        Ok(cs::array_creation(array_type, initializer))
    }

    fn rank_of(&self, specifier: NodeId) -> usize {
        1 + self.ctx.token_kinds(specifier).iter().filter(|&&k| k == VbKind::COMMA).count()
    }

    /// Array length for an upper bound: literals are folded and `n - 1`
    /// gives back `n`.
    fn length(&mut self, bound: NodeId) -> ConvertResult<GreenNode> {
        if self.ctx.kind(bound) == VbKind::LITERAL_EXPRESSION {
            if let Ok(upper) = self.ctx.tree.node_text(bound).trim().parse::<u64>() {
                self.ctx.discard(bound);
                return Ok(cs::numeric_literal(&(upper + 1).to_string()));
            }
        }
        if self.ctx.kind(bound) == VbKind::BINARY_EXPRESSION && self.ctx.has_token(bound, VbKind::MINUS) {
            let right = self.ctx.nth(bound, 1, "right operand")?;
            if self.ctx.tree.node_text(right).trim() == "1" {
                let left = self.expr(self.ctx.nth(bound, 0, "left operand")?)?;
                self.ctx.discard(bound);
                return Ok(left);
            }
        }
        let upper = self.expr(bound)?;
        Ok(binary(upper, CsKind::PLUS, cs::numeric_literal("1")))
    }

    /// `Sub`/`Function` lambdas. A lone untyped parameter drops its
    /// parentheses; `Sub` bodies that are a single statement stay
    /// expression-bodied.
    fn lambda(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<GreenNode> {
        let header = self.ctx.require(node, VbKind::LAMBDA_HEADER)?;
        let is_sub = self.ctx.has_token(header, VbKind::SUB_KW);
        let params = match self.ctx.child(header, VbKind::PARAMETER_LIST) {
            Some(list) => self.ctx.children_of(list, VbKind::PARAMETER),
            None => Vec::new(),
        };
        let bare = match params.as_slice() {
            [only] => {
                self.ctx.nodes(*only).is_empty()
                    && !self.ctx.has_token(*only, VbKind::BY_REF_KW)
                    && !self.ctx.has_token(*only, VbKind::PARAM_ARRAY_KW)
            }
            _ => false,
        };
        let mut converted = Vec::new();
        for param in &params {
            converted.push(self.parameter(*param, true)?);
        }

        let body = if kind == VbKind::MULTI_LINE_LAMBDA_EXPRESSION {
            let indent = self.line_indent(node);
            let body = self.block_body(node, &indent)?;
            self.braced(body)
        } else {
            let body = self
                .ctx
                .tree
                .child_nodes(node)
                .last()
                .filter(|&b| b != header)
                .ok_or_else(|| ConvertError::internal(kind, "missing body"))?;
            let body_kind = self.kind(body)?;
            match role(body_kind) {
                Role::Statement => {
                    let statements = self.statement_of_kind(body, body_kind)?;
                    match statements.as_slice() {
                        [only] if only.kind() == CsKind::EXPRESSION_STATEMENT => {
                            only.child_nodes().next().cloned().unwrap_or_else(|| cs::block(statements.clone()))
                        }
                        _ => cs::block(statements),
                    }
                }
                _ if is_sub => {
                    let statement = self.expression_statement(body)?;
                    let first = statement.child_nodes().next().cloned();
                    first.unwrap_or(statement)
                }
                _ => self.expr(body)?,
            }
        };

        if bare {
            if let Some(param) = converted.pop() {
                return Ok(cs::simple_lambda(param, body));
            }
        }
        Ok(cs::parenthesized_lambda(cs::parameter_list(converted), body))
    }

    /// Convert a type. Primitive types become C# keywords, including when
    /// written by their framework name.
    pub(crate) fn ty(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let kind = self.kind(node)?;
        match kind {
            VbKind::PREDEFINED_TYPE => {
                let special = self
                    .ctx
                    .tree
                    .child_tokens(node)
                    .next()
                    .map(|t| self.ctx.tree.token_kind(t))
                    .and_then(SpecialType::from_keyword)
                    .ok_or_else(|| ConvertError::internal(kind, "unknown type keyword"))?;
                match special.keyword(Language::CSharp).and_then(SyntaxKind::as_cs) {
                    Some(keyword) => Ok(cs::predefined_type(keyword)),
                    None => {
                        // `Date` has no C# keyword
                        self.ctx.require_import("System");
                        Ok(cs::name(special.metadata_name()))
                    }
                }
            }
            VbKind::IDENTIFIER_NAME => {
                if let Some(keyword) = self.keyword_type(node) {
                    return Ok(keyword);
                }
                let ident = self.ctx.ident_token(node)?;
                let text = self.ctx.text(ident);
                let symbol = self.ctx.model.symbol_info(node);
                Ok(cs::identifier_name(self.ctx.identifier(text, symbol)))
            }
            VbKind::GENERIC_NAME => self.generic_name(node),
            VbKind::QUALIFIED_NAME => {
                if let Some(keyword) = self.keyword_type(node) {
                    self.ctx.discard(node);
                    return Ok(keyword);
                }
                let left = self.ctx.nth(node, 0, "qualifier")?;
                let right = self.ty(self.ctx.nth(node, 1, "name")?)?;
                if self.ctx.kind(left) == VbKind::GLOBAL_NAME {
                    return Ok(cs::alias_qualified_name(factory::token(CsKind::GLOBAL_KW), right));
                }
                Ok(cs::qualified_name(self.ty(left)?, right))
            }
            VbKind::ARRAY_TYPE => {
                let element = self.ty(self.ctx.nth(node, 0, "element type")?)?;
                let ranks = self
                    .ctx
                    .children_of(node, VbKind::ARRAY_RANK_SPECIFIER)
                    .into_iter()
                    .map(|r| cs::omitted_rank_specifier(self.rank_of(r)))
                    .collect();
                Ok(cs::array_type(element, ranks))
            }
            VbKind::NULLABLE_TYPE => Ok(cs::nullable_type(self.ty(self.ctx.nth(node, 0, "underlying type")?)?)),
            VbKind::GLOBAL_NAME => Err(ConvertError::unsupported(kind, "`Global` outside a qualified name")),
            _ => Err(ConvertError::internal(kind, "not a type")),
        }
    }

    /// `Int32` or `System.String` bound to a primitive type.
    fn keyword_type(&self, node: NodeId) -> Option<GreenNode> {
        let symbol = self.bound(node).filter(|s| has_keyword(s))?;
        let keyword = symbol.special_type()?.keyword(Language::CSharp)?.as_cs()?;
        Some(cs::predefined_type(keyword))
    }
}

fn string_member(name: &str) -> GreenNode {
    cs::member_access(cs::predefined_type(CsKind::STRING_KW), cs::name(name))
}

fn binary_operator(operator: VbKind) -> ConvertResult<CsKind> {
    Ok(match operator {
        VbKind::PLUS => CsKind::PLUS,
        VbKind::MINUS => CsKind::MINUS,
        VbKind::STAR => CsKind::STAR,
        VbKind::SLASH | VbKind::BACKSLASH => CsKind::SLASH,
        VbKind::MOD_KW => CsKind::PERCENT,
        VbKind::LT => CsKind::LT,
        VbKind::GT => CsKind::GT,
        VbKind::LT_EQ => CsKind::LT_EQ,
        VbKind::GT_EQ => CsKind::GT_EQ,
        VbKind::AND_ALSO_KW => CsKind::AMP_AMP,
        VbKind::OR_ELSE_KW => CsKind::PIPE_PIPE,
        VbKind::AND_KW => CsKind::AMP,
        VbKind::OR_KW => CsKind::PIPE,
        VbKind::XOR_KW => CsKind::CARET,
        VbKind::LT_LT => CsKind::LT_LT,
        VbKind::GT_GT => CsKind::GT_GT,
        other => return Err(ConvertError::internal(other, "not a binary operator")),
    })
}

/// Binding strength of a C# binary operator; higher binds tighter.
fn precedence(operator: CsKind) -> u8 {
    match operator {
        CsKind::STAR | CsKind::SLASH | CsKind::PERCENT => 11,
        CsKind::PLUS | CsKind::MINUS => 10,
        CsKind::LT_LT | CsKind::GT_GT => 9,
        CsKind::LT | CsKind::GT | CsKind::LT_EQ | CsKind::GT_EQ | CsKind::IS_KW | CsKind::AS_KW => 8,
        CsKind::EQ_EQ | CsKind::BANG_EQ => 7,
        CsKind::AMP => 6,
        CsKind::CARET => 5,
        CsKind::PIPE => 4,
        CsKind::AMP_AMP => 3,
        CsKind::PIPE_PIPE => 2,
        CsKind::QUESTION_QUESTION => 1,
        _ => 12,
    }
}

fn operand_precedence(operand: &GreenNode) -> Option<u8> {
    match operand.kind().as_cs()? {
        CsKind::BINARY_EXPRESSION => {
            let operator = operand.child_tokens().next()?.kind().as_cs()?;
            Some(precedence(operator))
        }
        CsKind::CONDITIONAL_EXPRESSION
        | CsKind::ASSIGNMENT_EXPRESSION
        | CsKind::SIMPLE_LAMBDA_EXPRESSION
        | CsKind::PARENTHESIZED_LAMBDA_EXPRESSION => Some(0),
        _ => None,
    }
}

/// A C# binary expression, parenthesizing operands the Visual Basic tree
/// grouped more tightly than C# precedence would.
fn binary(left: GreenNode, operator: CsKind, right: GreenNode) -> GreenNode {
    let own = precedence(operator);
    let left = match operand_precedence(&left) {
        // `??` groups to the right, everything else to the left
        Some(p) if p < own || (p == own && operator == CsKind::QUESTION_QUESTION) => cs::parenthesized(left),
        _ => left,
    };
    let right = match operand_precedence(&right) {
        Some(p) if p < own || (p == own && operator != CsKind::QUESTION_QUESTION) => cs::parenthesized(right),
        _ => right,
    };
    cs::binary(left, operator, right)
}

/// Expressions that never need parentheses as an operand.
pub(crate) fn is_primary(green: &GreenNode) -> bool {
    matches!(
        green.kind().as_cs(),
        Some(
            CsKind::IDENTIFIER_NAME
                | CsKind::GENERIC_NAME
                | CsKind::QUALIFIED_NAME
                | CsKind::ALIAS_QUALIFIED_NAME
                | CsKind::PREDEFINED_TYPE
                | CsKind::MEMBER_ACCESS_EXPRESSION
                | CsKind::INVOCATION_EXPRESSION
                | CsKind::ELEMENT_ACCESS_EXPRESSION
                | CsKind::LITERAL_EXPRESSION
                | CsKind::PARENTHESIZED_EXPRESSION
                | CsKind::THIS_EXPRESSION
                | CsKind::BASE_EXPRESSION
                | CsKind::TYPE_OF_EXPRESSION
                | CsKind::DEFAULT_EXPRESSION
                | CsKind::OBJECT_CREATION_EXPRESSION
        )
    )
}

/// Value of a Visual Basic runtime string constant such as `vbCrLf`.
fn runtime_constant_value(name: &str) -> Option<&'static str> {
    let value = match name.to_ascii_lowercase().as_str() {
        "vbcr" => "\r",
        "vblf" => "\n",
        "vbcrlf" | "vbnewline" => "\r\n",
        "vbtab" => "\t",
        "vbnullchar" => "\0",
        "vbback" => "\u{8}",
        "vbformfeed" => "\u{c}",
        "vbverticaltab" => "\u{b}",
        _ => return None,
    };
    Some(value)
}

/// Visual Basic numeric literal spelled for C#, with the cast a suffix
/// needs when C# has no counterpart: `&HFFUI` → `0xFFU`, `2D` → `2M`,
/// `5S` → `(short)5`.
fn numeric_to_cs(text: &str) -> (String, Option<CsKind>) {
    let upper = text.to_ascii_uppercase();
    let (radix, body) = if let Some(rest) = upper.strip_prefix("&H") {
        (16, rest)
    } else if let Some(rest) = upper.strip_prefix("&O") {
        (8, rest)
    } else if let Some(rest) = upper.strip_prefix("&B") {
        (2, rest)
    } else {
        (10, upper.as_str())
    };
    let suffixes: &[char] = if radix == 10 {
        &['U', 'S', 'I', 'L', 'D', 'F', 'R', '@', '!', '#', '%', '&']
    } else {
        &['U', 'S', 'I', 'L']
    };
    let split = body.trim_end_matches(suffixes).len();
    let (digits, suffix) = body.split_at(split);
    let (suffix, cast) = match suffix {
        "" | "I" | "%" => ("", None),
        "UI" => ("U", None),
        "L" | "&" => ("L", None),
        "UL" => ("UL", None),
        "D" | "@" => ("M", None),
        "F" | "!" => ("F", None),
        "R" | "#" => ("D", None),
        "S" => ("", Some(CsKind::SHORT_KW)),
        "US" => ("", Some(CsKind::USHORT_KW)),
        other => (other, None),
    };
    let spelled = match radix {
        16 => format!("0x{digits}{suffix}"),
        2 => format!("0b{digits}{suffix}"),
        // C# has no octal literals
        8 => match u64::from_str_radix(digits, 8) {
            Ok(value) => format!("{value}{suffix}"),
            Err(_) => format!("{digits}{suffix}"),
        },
        _ => format!("{digits}{suffix}"),
    };
    (spelled, cast)
}

/// Type of a numeric literal with no model information.
fn numeric_type(text: &str) -> SpecialType {
    let upper = text.to_ascii_uppercase();
    if upper.starts_with('&') {
        return if upper.ends_with('L') { SpecialType::Int64 } else { SpecialType::Int32 };
    }
    match upper.chars().last() {
        Some('D' | '@') => SpecialType::Decimal,
        Some('F' | '!') => SpecialType::Single,
        Some('R' | '#') => SpecialType::Double,
        Some('L' | '&') => SpecialType::Int64,
        _ if upper.contains(['.', 'E']) => SpecialType::Double,
        _ => SpecialType::Int32,
    }
}

/// Value of a Visual Basic string literal; quotes are doubled inside.
fn decode_string(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"\"", "\""))
}

/// Value of a `"x"c` character literal.
fn decode_char(text: &str) -> Option<char> {
    let quoted = text.strip_suffix(['c', 'C'])?;
    let value = decode_string(quoted)?;
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
