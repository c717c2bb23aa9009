//! Statements and method bodies.

use super::{CsToVb, malformed_token, role, unsupported};
use crate::convert::context::{Body, Role, join_lines, nested_indent, reindent};
use crate::convert::error::{ConvertError, ConvertResult};
use crate::semantic::{SpecialType, SymbolKind};
use crate::syntax::factory::vb;
use crate::syntax::{CsKind, GreenNode, NodeId, SyntaxKind, TokenId, Trivia, TriviaKind, VbKind};

impl CsToVb<'_, '_> {
    /// Convert one statement. A nested block has no Visual Basic form of its
    /// own, so its statements are spliced into the enclosing body.
    pub(crate) fn statement(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let kind = self.kind(node)?;
        match role(kind) {
            Role::Token => Err(malformed_token(kind)),
            Role::Unsupported => self.line(node, |_| Err(unsupported(kind))),
            _ if kind == CsKind::BLOCK => self.flattened(node),
            _ => self.line(node, |this| this.statement_of_kind(node, kind)),
        }
    }

    fn flattened(&mut self, block: NodeId) -> ConvertResult<Vec<GreenNode>> {
        if let Some(open) = self.ctx.token(block, CsKind::L_BRACE) {
            let comments = self.ctx.take_open(open);
            self.ctx.defer(&comments);
        }
        let mut out = Vec::new();
        for statement in self.ctx.nodes(block) {
            out.extend(self.statement(statement)?);
        }
        if let Some(close) = self.ctx.token(block, CsKind::R_BRACE) {
            let comments = self.ctx.leading_lines(close, &[]);
            self.ctx.defer(&comments);
        }
        Ok(out)
    }

    fn statement_of_kind(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<Vec<GreenNode>> {
        let one = match kind {
            CsKind::LOCAL_DECLARATION_STATEMENT => self.local_declaration(node)?,
            CsKind::EXPRESSION_STATEMENT => self.expression_statement(self.ctx.nth(node, 0, "expression")?)?,
            CsKind::IF_STATEMENT => self.if_statement(node)?,
            CsKind::WHILE_STATEMENT => self.while_statement(node)?,
            CsKind::DO_STATEMENT => self.do_statement(node)?,
            CsKind::FOR_EACH_STATEMENT => self.for_each(node)?,
            CsKind::RETURN_STATEMENT => vb::return_statement(self.optional_expr(node)?),
            CsKind::THROW_STATEMENT => vb::throw_statement(self.optional_expr(node)?),
            CsKind::BREAK_STATEMENT => self.exit(node)?,
            CsKind::CONTINUE_STATEMENT => self.continue_statement(node)?,
            CsKind::TRY_STATEMENT => self.try_statement(node)?,
            CsKind::USING_STATEMENT => self.using_statement(node)?,
            CsKind::EMPTY_STATEMENT => return Ok(Vec::new()),
            _ => return Err(ConvertError::internal(kind, "not a statement")),
        };
        Ok(vec![one])
    }

    fn optional_expr(&mut self, node: NodeId) -> ConvertResult<Option<GreenNode>> {
        match self.ctx.tree.child_nodes(node).next() {
            Some(expr) => self.expr(expr).map(Some),
            None => Ok(None),
        }
    }

    /// The statements of a `{ }` block and the trivia of its braces.
    pub(crate) fn block(&mut self, block: NodeId, indent: &[Trivia]) -> ConvertResult<Body> {
        let header = self.open(block);
        let mut statements = Vec::new();
        for statement in self.ctx.nodes(block) {
            statements.extend(self.statement(statement)?);
        }
        let closing = self.close(block, indent);
        Ok(Body { statements, header, closing })
    }

    /// Body of a compound statement, which C# allows to be a single embedded
    /// statement instead of a block.
    pub(crate) fn body(&mut self, node: NodeId, indent: &[Trivia]) -> ConvertResult<Body> {
        if self.kind(node)? == CsKind::BLOCK {
            return self.block(node, indent);
        }
        let inner = nested_indent(indent);
        let statements = self.statement(node)?.into_iter().map(|s| reindent(s, &inner)).collect();
        Ok(Body { statements, header: Vec::new(), closing: self.ctx.closing_pending(indent) })
    }

    /// Leading trivia for a clause keyword (`Else`, `Catch`, `Finally`) that
    /// follows the closing trivia of the previous segment.
    fn segment_lead(&mut self, closing: Vec<Trivia>, keyword: Option<TokenId>, indent: &[Trivia]) -> Vec<Trivia> {
        let comments = match keyword {
            Some(keyword) => self.ctx.leading_lines(keyword, indent),
            None => Vec::new(),
        };
        let mut lead = join_lines(closing, comments);
        lead.extend(indent.iter().cloned());
        lead
    }

    fn local_declaration(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let keyword = if self.ctx.has_token(node, CsKind::CONST_KW) { VbKind::CONST_KW } else { VbKind::DIM_KW };
        let declaration = self.ctx.require(node, CsKind::VARIABLE_DECLARATION)?;
        let declarators = self.declarators(declaration)?;
        Ok(vb::local_declaration(&[keyword], declarators))
    }

    /// Declarators of a field or local: `int a = 1, b` → `a As Integer = 1, b As Integer`.
    pub(crate) fn declarators(&mut self, declaration: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let ty_node = self.ctx.nth(declaration, 0, "declared type")?;
        let implicit = self.is_var(ty_node);
        let explicit = if implicit { None } else { Some(self.ty(ty_node)?) };
        let mut out = Vec::new();
        for declarator in self.ctx.children_of(declaration, CsKind::VARIABLE_DECLARATOR) {
            let ident = self.ctx.ident_token(declarator)?;
            let ident = self.ctx.identifier_of(ident, declarator);
            let value_node = match self.ctx.child(declarator, CsKind::EQUALS_VALUE_CLAUSE) {
                Some(clause) => Some(self.ctx.nth(clause, 0, "initializer")?),
                None => None,
            };
            let value = match value_node {
                Some(value) => Some(self.expr(value)?),
                None => None,
            };
            // `var x = new T()` reads best as `Dim x As New T()`
            let as_new = implicit && value.as_ref().is_some_and(|v| v.kind() == VbKind::OBJECT_CREATION_EXPRESSION);
            let converted = if as_new {
                vb::variable_declarator(vec![ident], value.map(vb::as_new_clause), None)
            } else {
                let ty = match &explicit {
                    Some(ty) => Some(ty.clone()),
                    None => self.inferred_type(declarator, value_node),
                };
                vb::variable_declarator(vec![ident], ty.map(vb::simple_as_clause), value)
            };
            out.push(converted);
        }
        Ok(out)
    }

    /// Explicit `As` type for an implicitly typed variable, unless the output
    /// is meant to rely on local type inference.
    fn inferred_type(&mut self, declarator: NodeId, value: Option<NodeId>) -> Option<GreenNode> {
        if self.ctx.options.infer_local_types {
            return None;
        }
        let model = self.ctx.model;
        let ty = model
            .declared_symbol(declarator)
            .and_then(|s| model.table().get(s))
            .and_then(|s| s.ty)
            .or_else(|| value.and_then(|v| model.type_info(v)))?;
        Some(self.ctx.type_syntax(ty))
    }

    pub(crate) fn expression_statement(&mut self, expr: NodeId) -> ConvertResult<GreenNode> {
        match self.kind(expr)? {
            CsKind::ASSIGNMENT_EXPRESSION => self.assignment_statement(expr),
            CsKind::PREFIX_UNARY_EXPRESSION | CsKind::POSTFIX_UNARY_EXPRESSION => self.increment(expr),
            CsKind::INVOCATION_EXPRESSION => match self.raise_event(expr)? {
                Some(raise) => Ok(raise),
                None => Ok(vb::expression_statement(self.expr(expr)?)),
            },
            _ => Ok(vb::expression_statement(self.expr(expr)?)),
        }
    }

    fn is_event(&self, node: NodeId) -> bool {
        self.bound(node).is_some_and(|s| s.kind == SymbolKind::Event)
    }

    pub(crate) fn is_string(&self, node: NodeId) -> bool {
        self.special_type_of(node) == Some(SpecialType::String)
    }

    /// Special type of an expression, from the model or the literal itself.
    pub(crate) fn special_type_of(&self, node: NodeId) -> Option<SpecialType> {
        if let Some(special) = self.ctx.model.type_symbol(node).and_then(|s| s.special_type()) {
            return Some(special);
        }
        if self.ctx.kind(node) != CsKind::LITERAL_EXPRESSION {
            return None;
        }
        let token = self.ctx.tree.child_tokens(node).next()?;
        match self.token_kind(token)? {
            CsKind::STRING_LITERAL => Some(SpecialType::String),
            CsKind::CHAR_LITERAL => Some(SpecialType::Char),
            CsKind::TRUE_KW | CsKind::FALSE_KW => Some(SpecialType::Boolean),
            CsKind::NUMERIC_LITERAL => {
                let text = self.ctx.text(token).to_ascii_lowercase();
                let hex = text.starts_with("0x");
                let real = !hex && (text.contains(['.', 'e', 'f', 'd', 'm']));
                (!real).then_some(SpecialType::Int32)
            }
            _ => None,
        }
    }

    fn assignment_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left = self.ctx.nth(node, 0, "assignment target")?;
        let right = self.ctx.nth(node, 1, "assigned value")?;
        let operator = self
            .ctx
            .tree
            .child_tokens(node)
            .find_map(|t| self.token_kind(t))
            .ok_or_else(|| ConvertError::internal(CsKind::ASSIGNMENT_EXPRESSION, "missing operator"))?;

        if matches!(operator, CsKind::PLUS_EQ | CsKind::MINUS_EQ) && self.is_event(left) {
            let event = self.expr(left)?;
            let handler = self.handler(right)?;
            return Ok(if operator == CsKind::PLUS_EQ {
                vb::add_handler(event, handler)
            } else {
                vb::remove_handler(event, handler)
            });
        }

        let integral = |this: &Self| {
            this.special_type_of(left).is_some_and(SpecialType::is_integral)
                && this.special_type_of(right).is_some_and(SpecialType::is_integral)
        };
        let (direct, expanded) = match operator {
            CsKind::EQ => (Some(VbKind::EQ), None),
            CsKind::PLUS_EQ if self.is_string(left) || self.is_string(right) => (Some(VbKind::AMP_EQ), None),
            CsKind::PLUS_EQ => (Some(VbKind::PLUS_EQ), None),
            CsKind::MINUS_EQ => (Some(VbKind::MINUS_EQ), None),
            CsKind::STAR_EQ => (Some(VbKind::STAR_EQ), None),
            CsKind::SLASH_EQ if integral(self) => (Some(VbKind::BACKSLASH_EQ), None),
            CsKind::SLASH_EQ => (Some(VbKind::SLASH_EQ), None),
            CsKind::PERCENT_EQ => (None, Some(VbKind::MOD_KW)),
            CsKind::AMP_EQ => (None, Some(VbKind::AND_KW)),
            CsKind::PIPE_EQ => (None, Some(VbKind::OR_KW)),
            CsKind::CARET_EQ => (None, Some(VbKind::XOR_KW)),
            other => return Err(ConvertError::internal(other, "not an assignment operator")),
        };
        if direct.is_none() && !self.is_repeatable(left) {
            return Err(ConvertError::unsupported(operator, "compound assignment whose target would be evaluated twice"));
        }
        let target = self.expr(left)?;
        let value = self.expr(right)?;
        match (direct, expanded) {
            (Some(direct), _) => Ok(vb::assignment_statement(target, direct, value)),
            (None, Some(binary)) => {
                let value = if value.kind() == VbKind::BINARY_EXPRESSION { vb::parenthesized(value) } else { value };
                let combined = vb::binary(target.clone(), binary, value);
                Ok(vb::assignment_statement(target, VbKind::EQ, combined))
            }
            (None, None) => Err(ConvertError::internal(operator, "no assignment form")),
        }
    }

    /// Targets that can be written twice in `x = x op y` without running
    /// anything twice: names, `this`/`base`, and member or element access
    /// over those with name or literal indices.
    fn is_repeatable(&self, node: NodeId) -> bool {
        match self.ctx.kind(node).as_cs() {
            Some(CsKind::IDENTIFIER_NAME | CsKind::THIS_EXPRESSION | CsKind::BASE_EXPRESSION) => true,
            Some(CsKind::PARENTHESIZED_EXPRESSION | CsKind::MEMBER_ACCESS_EXPRESSION) => {
                self.ctx.tree.child_nodes(node).next().is_some_and(|receiver| self.is_repeatable(receiver))
            }
            Some(CsKind::ELEMENT_ACCESS_EXPRESSION) => {
                let mut children = self.ctx.tree.child_nodes(node);
                let receiver = children.next().is_some_and(|receiver| self.is_repeatable(receiver));
                let plain_index = |argument: NodeId| {
                    self.ctx.tree.child_nodes(argument).all(|index| {
                        matches!(self.ctx.kind(index).as_cs(), Some(CsKind::IDENTIFIER_NAME | CsKind::LITERAL_EXPRESSION))
                    })
                };
                receiver && children.all(|list| self.ctx.tree.child_nodes(list).all(plain_index))
            }
            _ => false,
        }
    }

    /// Handler of `+=`/`-=` on an event: `new Handler(M)` and `M` both
    /// become `AddressOf M`.
    fn handler(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        if self.ctx.kind(node) == CsKind::OBJECT_CREATION_EXPRESSION {
            let args = self
                .ctx
                .child(node, CsKind::ARGUMENT_LIST)
                .map(|list| self.ctx.children_of(list, CsKind::ARGUMENT))
                .unwrap_or_default();
            if let [only] = args.as_slice() {
                let inner = self.ctx.nth(*only, 0, "handler")?;
                if self.is_method_group(inner) {
                    return self.expr(inner);
                }
            }
        }
        self.expr(node)
    }

    /// `x++;` → `x += 1`
    fn increment(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let operator = self.ctx.tree.child_tokens(node).find_map(|t| self.token_kind(t));
        let assign = match operator {
            Some(CsKind::PLUS_PLUS) => VbKind::PLUS_EQ,
            Some(CsKind::MINUS_MINUS) => VbKind::MINUS_EQ,
            _ => return Ok(vb::expression_statement(self.expr(node)?)),
        };
        let operand = self.expr(self.ctx.nth(node, 0, "operand")?)?;
        Ok(vb::assignment_statement(operand, assign, vb::numeric_literal("1")))
    }

    /// `Changed(this, e)` or `Changed.Invoke(this, e)` on an event of this
    /// type → `RaiseEvent Changed(Me, e)`.
    fn raise_event(&mut self, node: NodeId) -> ConvertResult<Option<GreenNode>> {
        let callee = self.ctx.nth(node, 0, "callee")?;
        let event = match self.kind(callee)? {
            CsKind::IDENTIFIER_NAME => callee,
            CsKind::MEMBER_ACCESS_EXPRESSION => {
                let left = self.ctx.nth(callee, 0, "receiver")?;
                let right = self.ctx.nth(callee, 1, "member")?;
                if self.ctx.kind(left) == CsKind::THIS_EXPRESSION {
                    right
                } else if self.ctx.tree.node_text(right) == "Invoke" {
                    left
                } else {
                    return Ok(None);
                }
            }
            _ => return Ok(None),
        };
        if !self.is_event(event) || !matches!(self.ctx.kind(event), SyntaxKind::Cs(CsKind::IDENTIFIER_NAME)) {
            return Ok(None);
        }
        let ident = self.ctx.ident_token(event)?;
        let name = vb::identifier_name(self.ctx.identifier_of(ident, event));
        let args = self.arguments(self.ctx.require(node, CsKind::ARGUMENT_LIST)?)?;
        Ok(Some(vb::raise_event(name, Some(args))))
    }

    fn if_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let condition = self.expr(self.ctx.nth(node, 0, "condition")?)?;
        let Body { statements, header, closing } = self.body(self.ctx.nth(node, 1, "statement")?, &indent)?;
        let mut closing = closing;
        let mut else_ifs = Vec::new();
        let mut else_block = None;
        let mut clause = self.ctx.child(node, CsKind::ELSE_CLAUSE);
        while let Some(current) = clause {
            let else_keyword = self.ctx.token(current, CsKind::ELSE_KW);
            let mut lead = self.segment_lead(std::mem::take(&mut closing), else_keyword, &indent);
            let mut clause_header = match else_keyword {
                Some(keyword) => self.ctx.trailing_comments(keyword),
                None => Vec::new(),
            };
            let nested = self.ctx.nth(current, 0, "else statement")?;
            if self.kind(nested)? == CsKind::IF_STATEMENT {
                // `else if` folds into `ElseIf`
                if let Some(keyword) = self.ctx.token(nested, CsKind::IF_KW) {
                    let comments = self.ctx.leading_lines(keyword, &indent);
                    lead = join_lines(lead, comments);
                    lead.extend(indent.iter().cloned());
                }
                let condition = self.expr(self.ctx.nth(nested, 0, "condition")?)?;
                let body = self.body(self.ctx.nth(nested, 1, "statement")?, &indent)?;
                merge_header(&mut clause_header, body.header);
                let block = vb::else_if_block(condition, body.statements);
                let block = self.ctx.decorate_block(block, clause_header, Vec::new());
                let block = block.map_first_token(|t| t.with_leading_trivia(lead));
                else_ifs.push(self.ctx.map_source(nested, block));
                closing = body.closing;
                clause = self.ctx.child(nested, CsKind::ELSE_CLAUSE);
            } else {
                let body = self.body(nested, &indent)?;
                merge_header(&mut clause_header, body.header);
                let block = self.ctx.decorate_block(vb::else_block(body.statements), clause_header, Vec::new());
                else_block = Some(block.map_first_token(|t| t.with_leading_trivia(lead)));
                closing = body.closing;
                clause = None;
            }
        }
        let block = vb::multi_line_if(condition, statements, else_ifs, else_block);
        Ok(self.ctx.decorate_block(block, header, closing))
    }

    fn while_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let condition = self.expr(self.ctx.nth(node, 0, "condition")?)?;
        let body = self.body(self.ctx.nth(node, 1, "statement")?, &indent)?;
        Ok(self.ctx.decorate_block(vb::while_block(condition, body.statements), body.header, body.closing))
    }

    /// `do { } while (c);` → `Do ... Loop While c`
    fn do_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let body = self.body(self.ctx.nth(node, 0, "statement")?, &indent)?;
        let condition = self.expr(self.ctx.nth(node, 1, "condition")?)?;
        let block = vb::do_loop_block(None, body.statements, Some((VbKind::WHILE_KW, condition)));
        Ok(self.ctx.decorate_block(block, body.header, body.closing))
    }

    fn for_each(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let ty_node = self.ctx.nth(node, 0, "variable type")?;
        let collection = self.ctx.nth(node, 1, "collection")?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let as_clause = if self.is_var(ty_node) {
            self.inferred_type(node, None)
        } else {
            Some(self.ty(ty_node)?)
        };
        let control = vb::variable_declarator(vec![ident], as_clause.map(vb::simple_as_clause), None);
        let collection = self.expr(collection)?;
        let body = self.body(self.ctx.nth(node, 2, "statement")?, &indent)?;
        let block = vb::for_each_block(control, collection, body.statements);
        Ok(self.ctx.decorate_block(block, body.header, body.closing))
    }

    /// The loop or `switch` a `break`/`continue` leaves, stopping at the
    /// enclosing function.
    fn jump_target(&self, node: NodeId, include_switch: bool) -> ConvertResult<CsKind> {
        let target = self.ctx.ancestor(node, |k| {
            matches!(
                k,
                SyntaxKind::Cs(
                    CsKind::WHILE_STATEMENT
                        | CsKind::DO_STATEMENT
                        | CsKind::FOR_EACH_STATEMENT
                        | CsKind::FOR_STATEMENT
                        | CsKind::METHOD_DECLARATION
                        | CsKind::CONSTRUCTOR_DECLARATION
                        | CsKind::ACCESSOR_DECLARATION
                        | CsKind::PARENTHESIZED_LAMBDA_EXPRESSION
                        | CsKind::SIMPLE_LAMBDA_EXPRESSION
                        | CsKind::ANONYMOUS_METHOD_EXPRESSION
                ) | SyntaxKind::Cs(CsKind::SWITCH_STATEMENT)
            ) && (include_switch || k != CsKind::SWITCH_STATEMENT)
        });
        let kind = self.ctx.kind(node).as_cs().unwrap_or(CsKind::BREAK_STATEMENT);
        match target.and_then(|t| self.ctx.kind(t).as_cs()) {
            Some(
                found @ (CsKind::WHILE_STATEMENT
                | CsKind::DO_STATEMENT
                | CsKind::FOR_EACH_STATEMENT
                | CsKind::FOR_STATEMENT
                | CsKind::SWITCH_STATEMENT),
            ) => Ok(found),
            _ => Err(ConvertError::internal(kind, "not inside a loop")),
        }
    }

    fn exit(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let keyword = match self.jump_target(node, true)? {
            CsKind::WHILE_STATEMENT => VbKind::WHILE_KW,
            CsKind::DO_STATEMENT => VbKind::DO_KW,
            CsKind::SWITCH_STATEMENT => VbKind::SELECT_KW,
            _ => VbKind::FOR_KW,
        };
        Ok(vb::exit_statement(keyword))
    }

    fn continue_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let keyword = match self.jump_target(node, false)? {
            CsKind::WHILE_STATEMENT => VbKind::WHILE_KW,
            CsKind::DO_STATEMENT => VbKind::DO_KW,
            _ => VbKind::FOR_KW,
        };
        Ok(vb::continue_statement(keyword))
    }

    fn try_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let body = self.block(self.ctx.require(node, CsKind::BLOCK)?, &indent)?;
        let mut closing = body.closing;
        let mut catches = Vec::new();
        for clause in self.ctx.children_of(node, CsKind::CATCH_CLAUSE) {
            let keyword = self.ctx.token(clause, CsKind::CATCH_KW);
            let lead = self.segment_lead(std::mem::take(&mut closing), keyword, &indent);
            let (ident, ty) = match self.ctx.child(clause, CsKind::CATCH_DECLARATION) {
                Some(declaration) => {
                    let ty = self.ty(self.ctx.nth(declaration, 0, "exception type")?)?;
                    let ident = match self.ctx.ident_token(declaration) {
                        Ok(ident) => self.ctx.identifier_of(ident, declaration),
                        Err(_) => {
                            let name = self.ctx.fresh_name("ex");
                            vb::ident(&name)
                        }
                    };
                    (Some(ident), Some(ty))
                }
                None => (None, None),
            };
            let handler = self.block(self.ctx.require(clause, CsKind::BLOCK)?, &indent)?;
            let block = vb::catch_block(ident, ty, handler.statements);
            let block = self.ctx.decorate_block(block, handler.header, Vec::new());
            let block = block.map_first_token(|t| t.with_leading_trivia(lead));
            catches.push(self.ctx.map_source(clause, block));
            closing = handler.closing;
        }
        let finally = match self.ctx.child(node, CsKind::FINALLY_CLAUSE) {
            Some(clause) => {
                let keyword = self.ctx.token(clause, CsKind::FINALLY_KW);
                let lead = self.segment_lead(std::mem::take(&mut closing), keyword, &indent);
                let handler = self.block(self.ctx.require(clause, CsKind::BLOCK)?, &indent)?;
                let block = self.ctx.decorate_block(vb::finally_block(handler.statements), handler.header, Vec::new());
                closing = handler.closing;
                Some(self.ctx.map_source(clause, block.map_first_token(|t| t.with_leading_trivia(lead))))
            }
            None => None,
        };
        let block = vb::try_block(body.statements, catches, finally);
        Ok(self.ctx.decorate_block(block, body.header, closing))
    }

    /// `using (var a = x, b = y) s` → nested `Using` blocks, one per resource.
    fn using_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let resource = self.ctx.nth(node, 0, "resource")?;
        let resources = if self.ctx.kind(resource) == CsKind::VARIABLE_DECLARATION {
            self.declarators(resource)?
        } else {
            vec![self.expr(resource)?]
        };
        let body = self.body(self.ctx.nth(node, 1, "statement")?, &indent)?;
        let mut resources = resources.into_iter().rev();
        let innermost = resources
            .next()
            .ok_or_else(|| ConvertError::internal(CsKind::USING_STATEMENT, "no resource"))?;
        let mut block = self.ctx.decorate_block(vb::using_block(innermost, body.statements), body.header, body.closing);
        for outer in resources {
            block = self.ctx.decorate_block(vb::using_block(outer, vec![block]), Vec::new(), indent.clone());
        }
        Ok(block)
    }
}

/// Append the header comments of a clause body after those of its keyword.
fn merge_header(header: &mut Vec<Trivia>, more: Vec<Trivia>) {
    if header.is_empty() {
        *header = more;
    } else {
        header.extend(more.into_iter().skip_while(|t| t.kind == TriviaKind::Whitespace));
    }
}
