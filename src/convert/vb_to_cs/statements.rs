//! Statements and method bodies.

use super::declarations::{Site, var_type};
use super::expressions::is_primary;
use super::{VbToCs, malformed_token, role, unsupported};
use crate::convert::context::{Body, Role, reindent};
use crate::convert::error::{ConvertError, ConvertResult};
use crate::syntax::factory::cs;
use crate::syntax::{CsKind, GreenNode, GreenToken, NodeId, SyntaxKind, VbKind};

impl VbToCs<'_, '_> {
    /// Convert one statement; a `Dim` with several declarators yields one
    /// C# declaration each.
    pub(crate) fn statement(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let kind = self.kind(node)?;
        match role(kind) {
            Role::Token => Err(malformed_token(kind)),
            Role::Unsupported => self.line(node, |_| Err(unsupported(kind))),
            _ => self.line(node, |this| this.statement_of_kind(node, kind)),
        }
    }

    pub(crate) fn statement_of_kind(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<Vec<GreenNode>> {
        let one = match kind {
            VbKind::LOCAL_DECLARATION_STATEMENT => return self.local_declaration(node),
            VbKind::EXPRESSION_STATEMENT => self.expression_statement(self.ctx.nth(node, 0, "expression")?)?,
            VbKind::ASSIGNMENT_STATEMENT => self.assignment(node)?,
            VbKind::ADD_HANDLER_STATEMENT => self.handler(node, CsKind::PLUS_EQ)?,
            VbKind::REMOVE_HANDLER_STATEMENT => self.handler(node, CsKind::MINUS_EQ)?,
            VbKind::RAISE_EVENT_STATEMENT => self.raise_event(node)?,
            VbKind::MULTI_LINE_IF_BLOCK => self.if_block(node)?,
            VbKind::WHILE_BLOCK => self.while_block(node)?,
            VbKind::DO_LOOP_BLOCK => self.do_loop(node)?,
            VbKind::FOR_EACH_BLOCK => self.for_each(node)?,
            VbKind::RETURN_STATEMENT => cs::return_statement(self.optional_expr(node)?),
            VbKind::THROW_STATEMENT => cs::throw_statement(self.optional_expr(node)?),
            VbKind::EXIT_STATEMENT => self.exit(node)?,
            VbKind::CONTINUE_STATEMENT => cs::continue_statement(),
            VbKind::TRY_BLOCK => self.try_block(node)?,
            VbKind::USING_BLOCK => self.using_block(node)?,
            VbKind::EMPTY_STATEMENT => return Ok(Vec::new()),
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

    /// A C# block from a converted body, with its brace trivia.
    pub(crate) fn braced(&self, body: Body) -> GreenNode {
        self.ctx.decorate_block(cs::block(body.statements), body.header, body.closing)
    }

    fn local_declaration(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let is_const = self.ctx.has_token(node, VbKind::CONST_KW);
        if let Some(keyword) = self.ctx.token(node, VbKind::STATIC_KW) {
            let text = self.ctx.text(keyword);
            self.ctx.report_dropped_modifier(node, text);
        }
        let site = if is_const { Site::Constant } else { Site::Local };
        let indent = self.ctx.indent_of_node(node);
        let declarations = self.declarations(node, site)?;
        Ok(declarations
            .into_iter()
            .enumerate()
            .map(|(i, declaration)| {
                let statement = cs::local_declaration(is_const, declaration);
                if i == 0 { statement } else { reindent(statement, &indent) }
            })
            .collect())
    }

    /// One C# variable declaration per Visual Basic declarator.
    pub(crate) fn declarations(&mut self, node: NodeId, site: Site) -> ConvertResult<Vec<GreenNode>> {
        let mut out = Vec::new();
        for declarator in self.ctx.children_of(node, VbKind::VARIABLE_DECLARATOR) {
            out.extend(self.declarator(declarator, site)?);
        }
        Ok(out)
    }

    /// `a, b As T = v` shares one type. `a, b As New T()` gives every name
    /// its own object, so each becomes a declaration of its own.
    fn declarator(&mut self, declarator: NodeId, site: Site) -> ConvertResult<Vec<GreenNode>> {
        let names = self.ctx.children_of(declarator, VbKind::MODIFIED_IDENTIFIER);
        if let Some(clause) = self.ctx.child(declarator, VbKind::AS_NEW_CLAUSE) {
            let creation = self.ctx.nth(clause, 0, "created object")?;
            let mut out = Vec::new();
            for name in names {
                let ident = self.declared_name(name)?;
                let ty = match site {
                    Site::Local => var_type(),
                    Site::Field | Site::Constant => self.ty(self.ctx.nth(creation, 0, "created type")?)?,
                };
                let value = self.expr(creation)?;
                out.push(cs::variable_declaration(ty, vec![cs::variable_declarator(ident, Some(value))]));
            }
            return Ok(out);
        }

        let value_node = match self.ctx.child(declarator, VbKind::EQUALS_VALUE) {
            Some(clause) => Some(self.ctx.nth(clause, 0, "initializer")?),
            None => None,
        };
        let ty = match self.ctx.child(declarator, VbKind::SIMPLE_AS_CLAUSE) {
            Some(clause) => self.ty(self.ctx.nth(clause, 0, "declared type")?)?,
            None if names.len() > 1 => self.implicit_type(declarator, value_node, Site::Field),
            None => self.implicit_type(declarator, value_node, site),
        };
        let mut idents = Vec::new();
        for name in names {
            idents.push(self.declared_name(name)?);
        }
        let mut value = match value_node {
            Some(value) => Some(self.expr(value)?),
            None => None,
        };
        // only a single name may have an initializer
        let count = idents.len();
        let declarators = idents
            .into_iter()
            .enumerate()
            .map(|(i, ident)| cs::variable_declarator(ident, if i + 1 == count { value.take() } else { None }))
            .collect();
        Ok(vec![cs::variable_declaration(ty, declarators)])
    }

    fn declared_name(&mut self, name: NodeId) -> ConvertResult<GreenToken> {
        let ident = self.ctx.ident_token(name)?;
        Ok(self.ctx.identifier_of(ident, name))
    }

    /// Type for a declarator without `As`. Locals may use `var` when they
    /// have an initializer; everything else needs a type, `object` when the
    /// model has none.
    fn implicit_type(&mut self, declarator: NodeId, value: Option<NodeId>, site: Site) -> GreenNode {
        if site == Site::Local && value.is_some() && self.ctx.options.infer_local_types {
            return var_type();
        }
        let model = self.ctx.model;
        let declared = model
            .declared_symbol(declarator)
            .or_else(|| self.ctx.tree.child_nodes(declarator).next().and_then(|n| model.declared_symbol(n)));
        let inferred = declared
            .and_then(|s| model.table().get(s))
            .and_then(|s| s.ty)
            .or_else(|| value.and_then(|v| model.type_info(v)));
        match (inferred, site, value) {
            (Some(ty), _, _) => self.ctx.type_syntax(ty),
            (None, Site::Local, Some(_)) => var_type(),
            _ => self.ctx.object_type(),
        }
    }

    /// A bare name used as a statement is a call in Visual Basic.
    pub(crate) fn expression_statement(&mut self, expr: NodeId) -> ConvertResult<GreenNode> {
        let converted = self.expr(expr)?;
        let converted = match converted.kind() {
            SyntaxKind::Cs(CsKind::IDENTIFIER_NAME | CsKind::GENERIC_NAME | CsKind::MEMBER_ACCESS_EXPRESSION) => {
                cs::invocation(converted, cs::argument_list(Vec::new()))
            }
            _ => converted,
        };
        Ok(cs::expression_statement(converted))
    }

    fn assignment(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let left = self.ctx.nth(node, 0, "assignment target")?;
        let right = self.ctx.nth(node, 1, "assigned value")?;
        let operator = self
            .ctx
            .tree
            .child_tokens(node)
            .find_map(|t| self.token_kind(t))
            .ok_or_else(|| ConvertError::internal(VbKind::ASSIGNMENT_STATEMENT, "missing operator"))?;
        let mapped = match operator {
            VbKind::EQ => CsKind::EQ,
            VbKind::PLUS_EQ => CsKind::PLUS_EQ,
            VbKind::MINUS_EQ => CsKind::MINUS_EQ,
            VbKind::STAR_EQ => CsKind::STAR_EQ,
            VbKind::SLASH_EQ => CsKind::SLASH_EQ,
            // integral operands, so `/=` truncates too
            VbKind::BACKSLASH_EQ => CsKind::SLASH_EQ,
            // string concatenation
            VbKind::AMP_EQ => CsKind::PLUS_EQ,
            other => return Err(ConvertError::internal(other, "not an assignment operator")),
        };
        let target = self.expr(left)?;

        // `x += 1` → `x++`
        if matches!(operator, VbKind::PLUS_EQ | VbKind::MINUS_EQ) && self.is_one(right) {
            self.ctx.discard(right);
            let step = if operator == VbKind::PLUS_EQ { CsKind::PLUS_PLUS } else { CsKind::MINUS_MINUS };
            return Ok(cs::expression_statement(cs::postfix_unary(target, step)));
        }
        let value = self.expr(right)?;
        Ok(cs::expression_statement(cs::assignment(target, mapped, value)))
    }

    fn is_one(&self, node: NodeId) -> bool {
        self.ctx.kind(node) == VbKind::LITERAL_EXPRESSION && self.ctx.tree.node_text(node).trim() == "1"
    }

    /// `AddHandler e, AddressOf h` → `e += h;`
    fn handler(&mut self, node: NodeId, operator: CsKind) -> ConvertResult<GreenNode> {
        let event = self.expr(self.ctx.nth(node, 0, "event")?)?;
        let handler = self.expr(self.ctx.nth(node, 1, "handler")?)?;
        Ok(cs::expression_statement(cs::assignment(event, operator, handler)))
    }

    /// `RaiseEvent Changed(args)` → `Changed(args);`
    fn raise_event(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let event = self.expr(self.ctx.nth(node, 0, "event")?)?;
        let args = match self.ctx.child(node, VbKind::ARGUMENT_LIST) {
            Some(list) => self.arguments(list)?,
            None => cs::argument_list(Vec::new()),
        };
        Ok(cs::expression_statement(cs::invocation(event, args)))
    }

    /// `If`/`ElseIf`/`Else` → nested `if`/`else if`/`else`. Each segment's
    /// closing brace takes over the line of the clause after it.
    fn if_block(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::IF_STATEMENT)?;
        let condition = self.expr(self.ctx.nth(statement, 0, "condition")?)?;
        let clauses: Vec<NodeId> = self
            .ctx
            .nodes(node)
            .into_iter()
            .filter(|&c| matches!(self.ctx.kind(c), SyntaxKind::Vb(VbKind::ELSE_IF_BLOCK | VbKind::ELSE_BLOCK)))
            .collect();
        let end = self.closer(node);
        let body = self.body(node, clauses.first().copied().or(end), &indent)?;
        let block = self.braced(body);

        let mut segments = Vec::new();
        for (i, &clause) in clauses.iter().enumerate() {
            let closer = clauses.get(i + 1).copied().or(end);
            let condition = if self.ctx.kind(clause) == VbKind::ELSE_IF_BLOCK {
                let opening = self.ctx.require(clause, VbKind::ELSE_IF_STATEMENT)?;
                Some(self.expr(self.ctx.nth(opening, 0, "condition")?)?)
            } else {
                None
            };
            let body = self.body(clause, closer, &indent)?;
            segments.push((clause, condition, self.braced(body)));
        }

        let mut tail: Option<GreenNode> = None;
        for (clause, condition, block) in segments.into_iter().rev() {
            let converted = match condition {
                Some(condition) => cs::if_statement(condition, block, tail.take().map(cs::else_clause)),
                None => block,
            };
            tail = Some(self.ctx.map_source(clause, converted));
        }
        Ok(cs::if_statement(condition, block, tail.map(cs::else_clause)))
    }

    fn while_block(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::WHILE_STATEMENT)?;
        let condition = self.expr(self.ctx.nth(statement, 0, "condition")?)?;
        let body = self.block_body(node, &indent)?;
        Ok(cs::while_statement(condition, self.braced(body)))
    }

    /// `Do While c` → `while`, `Loop While c` → `do ... while`, `Until`
    /// negates, and a bare `Do ... Loop` runs forever.
    fn do_loop(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let top = self.loop_condition(self.ctx.require(node, VbKind::DO_STATEMENT)?)?;
        let body = self.block_body(node, &indent)?;
        let bottom = self.loop_condition(self.ctx.require(node, VbKind::LOOP_STATEMENT)?)?;
        let block = self.braced(body);
        Ok(match (top, bottom) {
            (Some(condition), _) => cs::while_statement(condition, block),
            (None, Some(condition)) => cs::do_statement(block, condition),
            (None, None) => cs::while_statement(cs::true_literal(), block),
        })
    }

    fn loop_condition(&mut self, statement: NodeId) -> ConvertResult<Option<GreenNode>> {
        let Some(condition) = self.ctx.tree.child_nodes(statement).next() else {
            return Ok(None);
        };
        let value = self.expr(condition)?;
        if !self.ctx.has_token(statement, VbKind::UNTIL_KW) {
            return Ok(Some(value));
        }
        let operand = if is_primary(&value) { value } else { cs::parenthesized(value) };
        Ok(Some(cs::prefix_unary(CsKind::BANG, operand)))
    }

    fn for_each(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::FOR_EACH_STATEMENT)?;
        let control = self.ctx.nth(statement, 0, "loop variable")?;
        if self.ctx.kind(control) != VbKind::VARIABLE_DECLARATOR {
            return Err(ConvertError::unsupported(
                VbKind::FOR_EACH_STATEMENT,
                "loop variable declared outside the loop",
            ));
        }
        let name = self.ctx.require(control, VbKind::MODIFIED_IDENTIFIER)?;
        let ident = self.declared_name(name)?;
        let ty = match self.ctx.child(control, VbKind::SIMPLE_AS_CLAUSE) {
            Some(clause) => self.ty(self.ctx.nth(clause, 0, "loop variable type")?)?,
            None => {
                let model = self.ctx.model;
                let inferred = model
                    .declared_symbol(name)
                    .or_else(|| model.declared_symbol(control))
                    .and_then(|s| model.table().get(s))
                    .and_then(|s| s.ty);
                match inferred {
                    Some(ty) if !self.ctx.options.infer_local_types => self.ctx.type_syntax(ty),
                    _ => var_type(),
                }
            }
        };
        let collection = self.expr(self.ctx.nth(statement, 1, "collection")?)?;
        let body = self.block_body(node, &indent)?;
        Ok(cs::foreach_statement(ty, ident, collection, self.braced(body)))
    }

    /// `Exit Sub` returns, `Exit For`/`While`/`Do` breaks.
    fn exit(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let keyword = self
            .ctx
            .tree
            .child_tokens(node)
            .filter_map(|t| self.token_kind(t))
            .find(|&k| k != VbKind::EXIT_KW);
        match keyword {
            Some(VbKind::SUB_KW) => Ok(cs::return_statement(None)),
            Some(VbKind::FUNCTION_KW) => Ok(cs::return_statement(Some(cs::default_literal()))),
            Some(VbKind::PROPERTY_KW) => {
                let in_getter = self
                    .ctx
                    .ancestor(node, |k| k == VbKind::ACCESSOR_BLOCK)
                    .and_then(|accessor| self.ctx.tree.child_nodes(accessor).next())
                    .is_some_and(|statement| self.ctx.has_token(statement, VbKind::GET_KW));
                Ok(cs::return_statement(in_getter.then(cs::default_literal)))
            }
            Some(VbKind::FOR_KW | VbKind::WHILE_KW | VbKind::DO_KW) => Ok(cs::break_statement()),
            Some(other) => Err(ConvertError::unsupported(VbKind::EXIT_STATEMENT, format!("Exit {other:?}"))),
            None => Err(ConvertError::internal(VbKind::EXIT_STATEMENT, "missing block keyword")),
        }
    }

    fn try_block(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let clauses: Vec<NodeId> = self
            .ctx
            .nodes(node)
            .into_iter()
            .filter(|&c| matches!(self.ctx.kind(c), SyntaxKind::Vb(VbKind::CATCH_BLOCK | VbKind::FINALLY_BLOCK)))
            .collect();
        let end = self.closer(node);
        let body = self.body(node, clauses.first().copied().or(end), &indent)?;
        let block = self.braced(body);

        let mut catches = Vec::new();
        let mut finally = None;
        for (i, &clause) in clauses.iter().enumerate() {
            let closer = clauses.get(i + 1).copied().or(end);
            if self.ctx.kind(clause) == VbKind::FINALLY_BLOCK {
                let body = self.body(clause, closer, &indent)?;
                let converted = cs::finally_clause(self.braced(body));
                finally = Some(self.ctx.map_source(clause, converted));
                continue;
            }
            let statement = self.ctx.require(clause, VbKind::CATCH_STATEMENT)?;
            let ident = match self.ctx.token(statement, VbKind::IDENT) {
                Some(ident) => Some(self.ctx.identifier_of(ident, statement)),
                None => None,
            };
            let ty = match self.ctx.child(statement, VbKind::SIMPLE_AS_CLAUSE) {
                Some(as_clause) => Some(self.ty(self.ctx.nth(as_clause, 0, "exception type")?)?),
                None if ident.is_some() => {
                    self.ctx.require_import("System");
                    Some(cs::identifier_name(cs::ident("Exception")))
                }
                None => None,
            };
            let declaration = ty.map(|ty| cs::catch_declaration(ty, ident));
            let body = self.body(clause, closer, &indent)?;
            let converted = cs::catch_clause(declaration, self.braced(body));
            catches.push(self.ctx.map_source(clause, converted));
        }
        Ok(cs::try_statement(block, catches, finally))
    }

    /// `Using r As New T()` → `using (var r = new T())`; several names nest.
    fn using_block(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::USING_STATEMENT)?;
        let resource = self.ctx.nth(statement, 0, "resource")?;
        let resources = if self.ctx.kind(resource) == VbKind::VARIABLE_DECLARATOR {
            self.declarator(resource, Site::Local)?
        } else {
            vec![self.expr(resource)?]
        };
        let body = self.block_body(node, &indent)?;
        let mut resources = resources.into_iter().rev();
        let innermost = resources
            .next()
            .ok_or_else(|| ConvertError::internal(VbKind::USING_STATEMENT, "no resource"))?;
        let mut converted = cs::using_statement(innermost, self.braced(body));
        for outer in resources {
            converted = cs::using_statement(outer, converted);
        }
        Ok(converted)
    }
}
