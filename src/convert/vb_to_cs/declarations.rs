//! Compilation unit, namespaces, types and their members.

use super::{VbToCs, malformed_token, role, unsupported};
use crate::convert::context::{ConversionContext, Role, nested_indent, reindent};
use crate::convert::error::{ConvertError, ConvertResult};
use crate::syntax::factory::{self, Header, cs};
use crate::syntax::tokens::is_vb_visibility;
use crate::syntax::{CsKind, GreenElement, GreenNode, GreenToken, Language, NodeId, SyntaxKind, Trivia, VbKind};

/// What a declaration's modifiers are attached to; decides which
/// visibility is implied and whether a `Module` makes it `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decl {
    Type,
    Module,
    Field,
    Member,
    Constructor,
}

/// Where a variable declarator appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Site {
    Field,
    Local,
    Constant,
}

/// Convert a whole Visual Basic compilation unit.
pub(crate) fn convert_unit(ctx: &mut ConversionContext<'_>) -> ConvertResult<GreenNode> {
    let root = ctx.tree.root();
    if ctx.kind(root) != VbKind::COMPILATION_UNIT {
        return Err(ConvertError::Malformed(format!("root is {}, not a compilation unit", ctx.kind(root))));
    }
    let mut this = VbToCs::new(ctx);
    let mut usings = Vec::new();
    let mut present: Vec<String> = Vec::new();
    let mut members = Vec::new();
    for child in this.ctx.nodes(root) {
        match this.kind(child)? {
            VbKind::IMPORTS_STATEMENT => {
                if this.ctx.child(child, VbKind::IMPORT_ALIAS_CLAUSE).is_none() {
                    if let Some(name) = this.ctx.tree.child_nodes(child).last() {
                        present.push(compact(this.ctx.tree.node_text(name)));
                    }
                }
                usings.extend(this.line(child, |this| this.imports_statement(child).map(|g| vec![g]))?);
            }
            kind => {
                if kind == VbKind::NAMESPACE_BLOCK {
                    let name = this.ctx.tree.child_nodes(child).next().and_then(|s| this.ctx.tree.child_nodes(s).next());
                    if let Some(name) = name {
                        present.push(compact(this.ctx.tree.node_text(name)));
                    }
                }
                members.extend(this.member(child)?);
            }
        }
    }

    for namespace in this.ctx.take_imports() {
        if present.iter().any(|p| Language::VisualBasic.names_equal(p, &namespace)) {
            continue;
        }
        tracing::trace!(%namespace, "adding using directive");
        usings.push(cs::using_directive(cs::name(&namespace)));
    }
    for (alias, full_name) in this.ctx.take_aliases() {
        usings.push(cs::using_alias(cs::ident(&alias), cs::name(&full_name)));
    }

    let source_eof = this.ctx.tree.last_token(root).filter(|&t| this.ctx.tree.token_kind(t).is_end_of_file());
    let eof = GreenToken::missing(CsKind::EOF_TOKEN).with_leading_trivia(this.ctx.finish_unit(source_eof));
    usings.extend(members);
    Ok(cs::compilation_unit_with_eof(usings, eof))
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl VbToCs<'_, '_> {
    fn imports_statement(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let name_node = self
            .ctx
            .tree
            .child_nodes(node)
            .filter(|&n| self.ctx.kind(n) != VbKind::IMPORT_ALIAS_CLAUSE)
            .last()
            .ok_or_else(|| ConvertError::internal(VbKind::IMPORTS_STATEMENT, "missing name"))?;
        let name = self.ty(name_node)?;
        match self.ctx.child(node, VbKind::IMPORT_ALIAS_CLAUSE) {
            Some(alias) => {
                let ident = self.ctx.ident_token(alias)?;
                let ident = self.ctx.identifier_of(ident, alias);
                Ok(cs::using_alias(ident, name))
            }
            None => Ok(cs::using_directive(name)),
        }
    }

    /// Convert a namespace or type member, one output line per declaration.
    pub(crate) fn member(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let kind = self.kind(node)?;
        match role(kind) {
            Role::Token => Err(malformed_token(kind)),
            Role::Unsupported => self.line(node, |_| Err(unsupported(kind))),
            _ => self.line(node, |this| this.member_of_kind(node, kind)),
        }
    }

    fn member_of_kind(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<Vec<GreenNode>> {
        let one = match kind {
            VbKind::NAMESPACE_BLOCK => self.namespace(node)?,
            VbKind::CLASS_BLOCK | VbKind::STRUCTURE_BLOCK | VbKind::INTERFACE_BLOCK | VbKind::MODULE_BLOCK => {
                self.type_declaration(node, kind)?
            }
            VbKind::ENUM_BLOCK => self.enum_declaration(node)?,
            VbKind::DELEGATE_STATEMENT => self.delegate(node)?,
            VbKind::METHOD_BLOCK | VbKind::METHOD_STATEMENT => self.method(node, kind)?,
            VbKind::CONSTRUCTOR_BLOCK => self.constructor(node)?,
            VbKind::PROPERTY_BLOCK | VbKind::PROPERTY_STATEMENT => self.property(node, kind)?,
            VbKind::FIELD_DECLARATION => return self.field(node),
            VbKind::EVENT_STATEMENT => return self.event(node),
            VbKind::EMPTY_STATEMENT => return Ok(Vec::new()),
            _ => return Err(ConvertError::internal(kind, "not a member")),
        };
        Ok(vec![one])
    }

    /// Members among the children of a namespace or type block, skipping its
    /// opening, `Inherits`, `Implements` and `End` statements.
    fn members(&mut self, nodes: Vec<NodeId>) -> ConvertResult<Vec<GreenNode>> {
        let mut out = Vec::new();
        for node in nodes {
            let kind = self.kind(node)?;
            if matches!(role(kind), Role::Part | Role::Expression | Role::Type) {
                continue;
            }
            out.extend(self.member(node)?);
        }
        Ok(out)
    }

    fn namespace(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::NAMESPACE_STATEMENT)?;
        let name = self.ty(self.ctx.nth(statement, 0, "namespace name")?)?;
        let header = self.open(statement);
        let members = self.members(self.ctx.nodes(node))?;
        let closer = self.closer(node);
        let closing = self.close(closer, &indent);
        Ok(self.ctx.decorate_block(cs::namespace_declaration(name, members), header, closing))
    }

    fn type_declaration(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<GreenNode> {
        let keyword = match kind {
            VbKind::STRUCTURE_BLOCK => CsKind::STRUCT_KW,
            VbKind::INTERFACE_BLOCK => CsKind::INTERFACE_KW,
            _ => CsKind::CLASS_KW,
        };
        let decl = if kind == VbKind::MODULE_BLOCK { Decl::Module } else { Decl::Type };
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.nth(node, 0, "type statement")?;
        let header = self.header(node, statement, decl)?;
        let ident = self.ctx.ident_token(statement)?;
        let ident = self.ctx.identifier_of(ident, statement);
        let type_parameters = self.type_parameters(statement)?;
        let open = self.open(statement);

        // base class first, then interfaces, as C# requires
        let mut bases = Vec::new();
        for clause_kind in [VbKind::INHERITS_STATEMENT, VbKind::IMPLEMENTS_STATEMENT] {
            for clause in self.ctx.children_of(node, clause_kind) {
                for base in self.ctx.nodes(clause) {
                    bases.push(self.ty(base)?);
                }
                self.ctx.sweep(clause);
            }
        }
        let base_list = (!bases.is_empty()).then(|| cs::base_list(bases));

        let members = self.members(self.ctx.nodes(node))?;
        let closer = self.closer(node);
        let closing = self.close(closer, &indent);
        let declaration = cs::type_declaration(keyword, header, ident, type_parameters, base_list, members);
        Ok(self.ctx.decorate_block(declaration, open, closing))
    }

    fn type_parameters(&mut self, statement: NodeId) -> ConvertResult<Option<GreenNode>> {
        let Some(list) = self.ctx.child(statement, VbKind::TYPE_PARAMETER_LIST) else {
            return Ok(None);
        };
        let mut params = Vec::new();
        for param in self.ctx.children_of(list, VbKind::TYPE_PARAMETER) {
            let variance = if self.ctx.has_token(param, VbKind::IN_KW) {
                Some(CsKind::IN_KW)
            } else if self.ctx.has_token(param, VbKind::OUT_KW) {
                Some(CsKind::OUT_KW)
            } else {
                None
            };
            let ident = self.ctx.ident_token(param)?;
            let ident = self.ctx.identifier_of(ident, param);
            params.push(cs::type_parameter(variance, ident));
        }
        Ok(Some(cs::type_parameter_list(params)))
    }

    /// Attributes and modifiers of `statement`, the line that opens the
    /// declaration `node`.
    fn header(&mut self, node: NodeId, statement: NodeId, decl: Decl) -> ConvertResult<Header> {
        let mut attributes = Vec::new();
        for list in self.ctx.children_of(statement, VbKind::ATTRIBUTE_LIST) {
            attributes.extend(self.attribute_list(list)?);
        }
        let in_module = !matches!(decl, Decl::Type | Decl::Module) && self.in_module(node);
        let is_const = self.ctx.has_token(statement, VbKind::CONST_KW);
        let mut modifiers = Vec::new();
        let mut has_visibility = false;
        let tokens: Vec<_> = self.ctx.tree.child_tokens(statement).collect();
        for token in tokens {
            let Some(kind) = self.token_kind(token).filter(|k| k.is_modifier()) else {
                continue;
            };
            if is_vb_visibility(self.ctx.tree.token(token), decl == Decl::Field, decl == Decl::Constructor) {
                has_visibility = true;
            }
            let mapped = match kind {
                VbKind::PUBLIC_KW | VbKind::PRIVATE_KW | VbKind::PROTECTED_KW | VbKind::FRIEND_KW => visibility(kind),
                VbKind::SHARED_KW if in_module => None,
                VbKind::SHARED_KW => Some(CsKind::STATIC_KW),
                VbKind::READ_ONLY_KW if decl == Decl::Field => Some(CsKind::READONLY_KW),
                // a property's accessors say whether it can be read or written
                VbKind::READ_ONLY_KW | VbKind::WRITE_ONLY_KW if decl == Decl::Member => None,
                VbKind::CONST_KW => Some(CsKind::CONST_KW),
                VbKind::DIM_KW => None,
                VbKind::MUST_INHERIT_KW | VbKind::MUST_OVERRIDE_KW => Some(CsKind::ABSTRACT_KW),
                VbKind::NOT_INHERITABLE_KW | VbKind::NOT_OVERRIDABLE_KW => Some(CsKind::SEALED_KW),
                VbKind::OVERRIDABLE_KW => Some(CsKind::VIRTUAL_KW),
                VbKind::OVERRIDES_KW => Some(CsKind::OVERRIDE_KW),
                VbKind::SHADOWS_KW => Some(CsKind::NEW_KW),
                VbKind::PARTIAL_KW => Some(CsKind::PARTIAL_KW),
                _ => {
                    let text = self.ctx.text(token);
                    self.ctx.report_dropped_modifier(node, text);
                    None
                }
            };
            if let Some(mapped) = mapped {
                modifiers.push(factory::token(mapped));
            }
        }
        let implied_static = decl == Decl::Module || (in_module && !is_const);
        if implied_static && !modifiers.iter().any(|m| m.kind() == CsKind::STATIC_KW) {
            modifiers.push(factory::token(CsKind::STATIC_KW));
        }
        if !has_visibility {
            if let Some(default) = self.default_visibility(node, decl) {
                modifiers.insert(0, factory::token(default));
            }
        }
        Ok(Header::new(attributes, modifiers))
    }

    /// Visibility Visual Basic implies where none is written.
    fn default_visibility(&self, node: NodeId, decl: Decl) -> Option<CsKind> {
        let parent = self.ctx.tree.parent(node).map(|p| self.ctx.kind(p));
        if parent == Some(SyntaxKind::Vb(VbKind::INTERFACE_BLOCK)) {
            return None;
        }
        let top_level = matches!(
            parent,
            Some(SyntaxKind::Vb(VbKind::COMPILATION_UNIT | VbKind::NAMESPACE_BLOCK)) | None
        );
        match decl {
            Decl::Type | Decl::Module if top_level => Some(CsKind::INTERNAL_KW),
            Decl::Type | Decl::Module => Some(CsKind::PUBLIC_KW),
            Decl::Field if parent == Some(SyntaxKind::Vb(VbKind::STRUCTURE_BLOCK)) => Some(CsKind::PUBLIC_KW),
            Decl::Field => Some(CsKind::PRIVATE_KW),
            Decl::Constructor if self.in_module(node) => None,
            Decl::Member | Decl::Constructor => Some(CsKind::PUBLIC_KW),
        }
    }

    /// One C# attribute list per run of attributes sharing a target.
    fn attribute_list(&mut self, list: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let mut out = Vec::new();
        let mut run: Vec<GreenNode> = Vec::new();
        let mut run_target = None;
        for attribute in self.ctx.children_of(list, VbKind::ATTRIBUTE) {
            let target = match self.ctx.child(attribute, VbKind::ATTRIBUTE_TARGET) {
                Some(specifier) => match self.ctx.tree.child_tokens(specifier).next().and_then(|t| self.token_kind(t)) {
                    Some(VbKind::ASSEMBLY_KW) => Some(CsKind::ASSEMBLY_KW),
                    Some(VbKind::MODULE_KW) => Some(CsKind::MODULE_KW),
                    _ => None,
                },
                None => None,
            };
            if !run.is_empty() && target != run_target {
                out.push(cs::attribute_list(run_target, std::mem::take(&mut run)));
            }
            run_target = target;
            let name = self
                .ctx
                .tree
                .child_nodes(attribute)
                .find(|&n| !matches!(self.ctx.kind(n), SyntaxKind::Vb(VbKind::ATTRIBUTE_TARGET | VbKind::ARGUMENT_LIST)))
                .ok_or_else(|| ConvertError::internal(VbKind::ATTRIBUTE, "missing name"))?;
            let name = self.ty(name)?;
            let args = match self.ctx.child(attribute, VbKind::ARGUMENT_LIST) {
                Some(args) => Some(self.arguments(args)?),
                None => None,
            };
            run.push(cs::attribute(name, args));
        }
        if !run.is_empty() {
            out.push(cs::attribute_list(run_target, run));
        }
        Ok(out)
    }

    /// `As T` of a declaration, converted.
    fn as_type(&mut self, node: NodeId) -> ConvertResult<Option<GreenNode>> {
        match self.ctx.child(node, VbKind::SIMPLE_AS_CLAUSE) {
            Some(clause) => self.ty(self.ctx.nth(clause, 0, "type")?).map(Some),
            None => Ok(None),
        }
    }

    /// `void` for a `Sub`, otherwise the `As` type or `object`.
    fn return_type(&mut self, statement: NodeId) -> ConvertResult<GreenNode> {
        if self.ctx.has_token(statement, VbKind::SUB_KW) {
            return Ok(cs::predefined_type(CsKind::VOID_KW));
        }
        Ok(match self.as_type(statement)? {
            Some(ty) => ty,
            None => self.ctx.object_type(),
        })
    }

    fn parameters_of(&mut self, statement: NodeId) -> ConvertResult<GreenNode> {
        match self.ctx.child(statement, VbKind::PARAMETER_LIST) {
            Some(list) => self.parameter_list(list),
            None => Ok(cs::parameter_list(Vec::new())),
        }
    }

    fn method(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<GreenNode> {
        let statement = if kind == VbKind::METHOD_BLOCK { self.ctx.nth(node, 0, "method statement")? } else { node };
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, statement, Decl::Member)?;
        let ident = self.ctx.ident_token(statement)?;
        let ident = self.ctx.identifier_of(ident, statement);
        let return_type = self.return_type(statement)?;
        let type_parameters = self.type_parameters(statement)?;
        let params = self.parameters_of(statement)?;
        if kind == VbKind::METHOD_STATEMENT {
            return Ok(cs::method_declaration(header, return_type, ident, type_parameters, params, cs::MethodBody::None));
        }
        let body = self.block_body(node, &indent)?;
        let block = self.ctx.decorate_block(cs::block(body.statements), body.header, body.closing);
        Ok(cs::method_declaration(header, return_type, ident, type_parameters, params, cs::MethodBody::Block(block)))
    }

    fn constructor(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let statement = self.ctx.require(node, VbKind::SUB_NEW_STATEMENT)?;
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, statement, Decl::Constructor)?;
        let ident = self.type_name(node)?;
        let params = self.parameters_of(statement)?;
        let chained = self.chained_constructor(node)?;
        let initializer = match chained {
            Some((call, keyword)) => {
                let args = match self.ctx.child(call, VbKind::ARGUMENT_LIST) {
                    Some(list) => self.arguments(list)?,
                    None => cs::argument_list(Vec::new()),
                };
                Some(cs::constructor_initializer(keyword, args))
            }
            None => None,
        };
        let skip = chained.and_then(|(call, _)| self.ctx.tree.parent(call));
        let body = self.body_except(node, self.closer(node), &indent, skip)?;
        let block = self.ctx.decorate_block(cs::block(body.statements), body.header, body.closing);
        Ok(cs::constructor_declaration(header, ident, params, initializer, block))
    }

    /// Name of the type declaring the constructor `node`.
    fn type_name(&mut self, node: NodeId) -> ConvertResult<GreenToken> {
        let statement = self
            .ctx
            .ancestor(node, |k| {
                matches!(
                    k,
                    SyntaxKind::Vb(
                        VbKind::CLASS_BLOCK | VbKind::STRUCTURE_BLOCK | VbKind::MODULE_BLOCK | VbKind::INTERFACE_BLOCK
                    )
                )
            })
            .and_then(|block| self.ctx.tree.child_nodes(block).next())
            .ok_or_else(|| ConvertError::internal(VbKind::CONSTRUCTOR_BLOCK, "constructor outside a type"))?;
        let ident = self.ctx.ident_token(statement)?;
        let text = self.ctx.text(ident);
        let symbol = self.ctx.model.declared_symbol(statement);
        Ok(self.ctx.identifier(text, symbol))
    }

    /// A leading `MyBase.New(...)` or `Me.New(...)` call, which C# writes as
    /// a constructor initializer.
    fn chained_constructor(&self, node: NodeId) -> ConvertResult<Option<(NodeId, CsKind)>> {
        let first = self
            .ctx
            .tree
            .child_nodes(node)
            .skip(1)
            .find(|&n| self.ctx.kind(n).as_vb().is_some_and(|k| role(k) == Role::Statement));
        let Some(first) = first.filter(|&s| self.ctx.kind(s) == VbKind::EXPRESSION_STATEMENT) else {
            return Ok(None);
        };
        let call = self.ctx.nth(first, 0, "expression")?;
        if self.ctx.kind(call) != VbKind::INVOCATION_EXPRESSION {
            return Ok(None);
        }
        let callee = self.ctx.nth(call, 0, "callee")?;
        if self.ctx.kind(callee) != VbKind::MEMBER_ACCESS_EXPRESSION {
            return Ok(None);
        }
        let receiver = self.ctx.nth(callee, 0, "receiver")?;
        let name = self.ctx.nth(callee, 1, "member")?;
        if !self.ctx.tree.node_text(name).eq_ignore_ascii_case("New") {
            return Ok(None);
        }
        Ok(match self.ctx.kind(receiver) {
            SyntaxKind::Vb(VbKind::MY_BASE_EXPRESSION) => Some((call, CsKind::BASE_KW)),
            SyntaxKind::Vb(VbKind::ME_EXPRESSION) => Some((call, CsKind::THIS_KW)),
            _ => None,
        })
    }

    fn property(&mut self, node: NodeId, kind: VbKind) -> ConvertResult<GreenNode> {
        let statement = if kind == VbKind::PROPERTY_BLOCK { self.ctx.nth(node, 0, "property statement")? } else { node };
        let indexed = self
            .ctx
            .child(statement, VbKind::PARAMETER_LIST)
            .is_some_and(|list| self.ctx.child(list, VbKind::PARAMETER).is_some());
        if indexed {
            return Err(ConvertError::unsupported(VbKind::PROPERTY_STATEMENT, "properties with parameters"));
        }
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, statement, Decl::Member)?;
        let ident = self.ctx.ident_token(statement)?;
        let ident = self.ctx.identifier_of(ident, statement);
        let ty = match self.as_type(statement)? {
            Some(ty) => ty,
            None => self.ctx.object_type(),
        };

        if kind == VbKind::PROPERTY_STATEMENT {
            let mut accessors = vec![cs::accessor(Vec::new(), CsKind::GET_KW, None)];
            if !self.ctx.has_token(statement, VbKind::READ_ONLY_KW) {
                accessors.push(cs::accessor(Vec::new(), CsKind::SET_KW, None));
            }
            let initializer = match self.ctx.child(statement, VbKind::EQUALS_VALUE) {
                Some(clause) => Some(self.expr(self.ctx.nth(clause, 0, "initializer")?)?),
                None => None,
            };
            return Ok(cs::property_declaration(header, ty, ident, cs::accessor_list(accessors), initializer));
        }

        let open = self.open(statement);
        let mut accessors = Vec::new();
        for accessor in self.ctx.children_of(node, VbKind::ACCESSOR_BLOCK) {
            accessors.extend(self.line(accessor, |this| this.accessor(accessor).map(|a| vec![a]))?);
        }
        let closer = self.closer(node);
        let closing = self.close(closer, &indent);
        let declaration = cs::property_declaration(header, ty, ident, cs::accessor_list(accessors), None);
        Ok(self.ctx.decorate_block(declaration, open, closing))
    }

    fn accessor(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let statement = self.ctx.require(node, VbKind::ACCESSOR_STATEMENT)?;
        let keyword = if self.ctx.has_token(statement, VbKind::GET_KW) {
            CsKind::GET_KW
        } else if self.ctx.has_token(statement, VbKind::SET_KW) {
            CsKind::SET_KW
        } else {
            return Err(ConvertError::internal(VbKind::ACCESSOR_STATEMENT, "missing Get or Set"));
        };
        let modifiers: Vec<GreenToken> = self
            .ctx
            .tree
            .child_tokens(statement)
            .filter_map(|t| self.token_kind(t))
            .filter_map(visibility)
            .map(factory::token_sp)
            .collect();
        let indent = self.ctx.indent_of_node(node);
        let body = self.block_body(node, &indent)?;
        let mut statements = body.statements;

        // `Set(v As T)` names its value; C# always calls it `value`
        let param = self.ctx.child(statement, VbKind::PARAMETER_LIST).and_then(|l| self.ctx.child(l, VbKind::PARAMETER));
        if let Some(param) = param.filter(|_| keyword == CsKind::SET_KW) {
            let ident = self.ctx.ident_token(param)?;
            if !self.ctx.text(ident).eq_ignore_ascii_case("value") {
                let ident = self.ctx.identifier_of(ident, param);
                let value = cs::identifier_name(cs::ident("value"));
                let declaration = cs::variable_declaration(var_type(), vec![cs::variable_declarator(ident, Some(value))]);
                let alias = cs::local_declaration(false, declaration);
                statements.insert(0, reindent(alias, &nested_indent(&indent)));
            }
        }
        let block = self.ctx.decorate_block(cs::block(statements), body.header, body.closing);
        Ok(cs::accessor(modifiers, keyword, Some(block)))
    }

    /// `Dim a, b As Integer, c As String` declares one C# field per declarator.
    fn field(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let header = self.header(node, node, Decl::Field)?;
        let indent = self.ctx.indent_of_node(node);
        let declarations = self.declarations(node, Site::Field)?;
        Ok(declarations
            .into_iter()
            .enumerate()
            .map(|(i, declaration)| {
                let field = cs::field_declaration(header.clone(), declaration);
                if i == 0 { field } else { reindent(field, &indent) }
            })
            .collect())
    }

    /// `Event E As T` is an event field; `Event E(args)` also needs a
    /// delegate type to name, which is declared just before it.
    fn event(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let header = self.header(node, node, Decl::Member)?;
        let ident_token = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident_token, node);
        if let Some(ty) = self.as_type(node)? {
            let declaration = cs::variable_declaration(ty, vec![cs::variable_declarator(ident, None)]);
            return Ok(vec![cs::event_field_declaration(header, declaration)]);
        }

        let indent = self.ctx.indent_of_node(node);
        let base = factory::unescape_identifier(self.ctx.text(ident_token)).to_string();
        let delegate_name = self.ctx.fresh_name(&format!("{base}EventHandler"));
        tracing::trace!(event = %base, delegate = %delegate_name, "declaring delegate for event");
        let params = self.parameters_of(node)?;
        let delegate_modifiers: Vec<GreenToken> = header
            .modifiers
            .iter()
            .filter(|m| {
                matches!(
                    m.kind(),
                    SyntaxKind::Cs(CsKind::PUBLIC_KW | CsKind::PRIVATE_KW | CsKind::PROTECTED_KW | CsKind::INTERNAL_KW)
                )
            })
            .cloned()
            .collect();
        let delegate = cs::delegate_declaration(
            Header::new(Vec::new(), delegate_modifiers),
            cs::predefined_type(CsKind::VOID_KW),
            cs::ident(&delegate_name),
            None,
            params,
        );
        let ty = cs::identifier_name(cs::ident(&delegate_name));
        let declaration = cs::variable_declaration(ty, vec![cs::variable_declarator(ident, None)]);
        let event = cs::event_field_declaration(header, declaration);
        Ok(vec![delegate, reindent(event, &indent)])
    }

    fn enum_declaration(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let statement = self.ctx.require(node, VbKind::ENUM_STATEMENT)?;
        let header = self.header(node, statement, Decl::Type)?;
        let ident = self.ctx.ident_token(statement)?;
        let ident = self.ctx.identifier_of(ident, statement);
        let underlying = self.as_type(statement)?;
        let open = self.open(statement);
        let mut members = Vec::new();
        for member in self.ctx.children_of(node, VbKind::ENUM_MEMBER_DECLARATION) {
            members.extend(self.line(member, |this| this.enum_member(member).map(|m| vec![m]))?);
        }
        let closer = self.closer(node);
        let closing = self.close(closer, &indent);
        let declaration = comments_after_commas(cs::enum_declaration(header, ident, underlying, members));
        Ok(self.ctx.decorate_block(declaration, open, closing))
    }

    fn enum_member(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let value = match self.ctx.child(node, VbKind::EQUALS_VALUE) {
            Some(clause) => Some(self.expr(self.ctx.nth(clause, 0, "enum value")?)?),
            None => None,
        };
        Ok(cs::enum_member(ident, value))
    }

    fn delegate(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let header = self.header(node, node, Decl::Type)?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let return_type = self.return_type(node)?;
        let type_parameters = self.type_parameters(node)?;
        let params = self.parameters_of(node)?;
        Ok(cs::delegate_declaration(header, return_type, ident, type_parameters, params))
    }

    pub(crate) fn parameter_list(&mut self, list: NodeId) -> ConvertResult<GreenNode> {
        let mut params = Vec::new();
        for param in self.ctx.children_of(list, VbKind::PARAMETER) {
            params.push(self.parameter(param, false)?);
        }
        Ok(cs::parameter_list(params))
    }

    /// One parameter. Untyped parameters are `object`, except in lambdas
    /// where C# infers them too.
    pub(crate) fn parameter(&mut self, node: NodeId, in_lambda: bool) -> ConvertResult<GreenNode> {
        let mut attributes = Vec::new();
        for list in self.ctx.children_of(node, VbKind::ATTRIBUTE_LIST) {
            attributes.extend(self.attribute_list(list)?);
        }
        let mut modifiers = Vec::new();
        let tokens: Vec<_> = self.ctx.tree.child_tokens(node).collect();
        for token in tokens {
            match self.token_kind(token) {
                Some(VbKind::BY_REF_KW) => modifiers.push(factory::token(CsKind::REF_KW)),
                Some(VbKind::PARAM_ARRAY_KW) => modifiers.push(factory::token(CsKind::PARAMS_KW)),
                _ => {}
            }
        }
        let ty = match self.as_type(node)? {
            Some(ty) => Some(ty),
            None if in_lambda => None,
            None => Some(self.ctx.object_type()),
        };
        let default = match self.ctx.child(node, VbKind::EQUALS_VALUE) {
            Some(clause) => Some(self.expr(self.ctx.nth(clause, 0, "default value")?)?),
            None => None,
        };
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        Ok(cs::parameter(Header::new(attributes, modifiers), ty, ident, default))
    }
}

/// The contextual `var`.
pub(crate) fn var_type() -> GreenNode {
    cs::identifier_name(cs::ident("var"))
}

fn visibility(kind: VbKind) -> Option<CsKind> {
    match kind {
        VbKind::PUBLIC_KW => Some(CsKind::PUBLIC_KW),
        VbKind::PRIVATE_KW => Some(CsKind::PRIVATE_KW),
        VbKind::PROTECTED_KW => Some(CsKind::PROTECTED_KW),
        VbKind::FRIEND_KW => Some(CsKind::INTERNAL_KW),
        _ => None,
    }
}

/// `A // note` followed by `,` → `A, // note`: end-of-line comments of a
/// list entry move past the comma the list adds after it.
fn comments_after_commas(node: GreenNode) -> GreenNode {
    let mut children = node.children().to_vec();
    for i in 1..children.len() {
        if children[i].kind() != CsKind::COMMA {
            continue;
        }
        let GreenElement::Node(entry) = &children[i - 1] else {
            continue;
        };
        let Some(trailing) = entry.last_token().map(|t| t.trailing().to_vec()) else {
            continue;
        };
        if !trailing.iter().any(Trivia::is_comment) {
            continue;
        }
        let entry = entry.map_last_token(|t| t.with_trailing_trivia(Vec::new()));
        children[i - 1] = GreenElement::Node(entry);
        if let GreenElement::Token(comma) = &children[i] {
            children[i] = GreenElement::Token(comma.clone().with_trailing_trivia(trailing));
        }
    }
    node.with_children(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_keywords() {
        assert_eq!(visibility(VbKind::FRIEND_KW), Some(CsKind::INTERNAL_KW));
        assert_eq!(visibility(VbKind::PUBLIC_KW), Some(CsKind::PUBLIC_KW));
        assert_eq!(visibility(VbKind::SHARED_KW), None);
    }

    #[test]
    fn test_enum_comments_follow_commas() {
        let commented = cs::enum_member(cs::ident("A"), None).map_last_token(|t| {
            t.with_trailing_trivia(vec![Trivia::space(), Trivia::line_comment("// first"), Trivia::end_of_line()])
        });
        let declaration = cs::enum_declaration(
            Header::default(),
            cs::ident("E"),
            None,
            vec![commented, cs::enum_member(cs::ident("B"), None)],
        );
        let moved = comments_after_commas(declaration);
        assert_eq!(moved.to_text(), "enum E {\nA, // first\nB\n}");
    }
}
