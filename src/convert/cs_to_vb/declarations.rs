//! Compilation unit, namespaces, types and their members.

use super::{CsToVb, malformed_token, role, unsupported};
use crate::convert::context::{Body, ConversionContext, Role, nested_indent, reindent, with_eol_comments};
use crate::convert::error::{ConvertError, ConvertResult};
use crate::semantic::TypeKind;
use crate::syntax::factory::{self, Header, vb};
use crate::syntax::{CsKind, ElementId, GreenNode, GreenToken, NodeId, SyntaxKind, VbKind};

/// What a declaration's modifiers are attached to; decides how `static`,
/// `abstract` and `sealed` read and which visibility is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decl {
    Type,
    Module,
    Member,
    Constructor,
}

/// Convert a whole C# compilation unit.
pub(crate) fn convert_unit(ctx: &mut ConversionContext<'_>) -> ConvertResult<GreenNode> {
    let root = ctx.tree.root();
    if ctx.kind(root) != CsKind::COMPILATION_UNIT {
        return Err(ConvertError::Malformed(format!("root is {}, not a compilation unit", ctx.kind(root))));
    }
    let mut this = CsToVb::new(ctx);
    let mut imports = Vec::new();
    let mut present: Vec<String> = Vec::new();
    let mut members = Vec::new();
    for child in this.ctx.nodes(root) {
        match this.kind(child)? {
            CsKind::USING_DIRECTIVE => {
                if this.ctx.child(child, CsKind::NAME_EQUALS).is_none() {
                    if let Some(name) = this.ctx.tree.child_nodes(child).last() {
                        present.push(compact(this.ctx.tree.node_text(name)));
                    }
                }
                imports.extend(this.line(child, |this| this.using_directive(child).map(|g| vec![g]))?);
            }
            kind => {
                if kind == CsKind::NAMESPACE_DECLARATION {
                    if let Some(name) = this.ctx.tree.child_nodes(child).next() {
                        present.push(compact(this.ctx.tree.node_text(name)));
                    }
                }
                members.extend(this.member(child)?);
            }
        }
    }

    let target = this.ctx.target;
    for namespace in this.ctx.take_imports() {
        if present.iter().any(|p| target.names_equal(p, &namespace)) {
            continue;
        }
        tracing::trace!(%namespace, "adding import");
        imports.push(vb::imports_statement(vb::name(&namespace)));
    }
    for (alias, full_name) in this.ctx.take_aliases() {
        imports.push(vb::imports_alias(vb::ident(&alias), vb::name(&full_name)));
    }

    let source_eof = this.ctx.tree.last_token(root).filter(|&t| this.ctx.tree.token_kind(t).is_end_of_file());
    let eof = GreenToken::missing(VbKind::EOF_TOKEN).with_leading_trivia(this.ctx.finish_unit(source_eof));
    imports.extend(members);
    Ok(vb::compilation_unit_with_eof(imports, eof))
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl CsToVb<'_, '_> {
    fn using_directive(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let name_node = self
            .ctx
            .tree
            .child_nodes(node)
            .filter(|&n| self.ctx.kind(n) != CsKind::NAME_EQUALS)
            .last()
            .ok_or_else(|| ConvertError::internal(CsKind::USING_DIRECTIVE, "missing name"))?;
        let name = self.ty(name_node)?;
        match self.ctx.child(node, CsKind::NAME_EQUALS) {
            Some(alias) => {
                let ident = self.ctx.ident_token(alias)?;
                let ident = self.ctx.identifier_of(ident, alias);
                Ok(vb::imports_alias(ident, name))
            }
            None => Ok(vb::imports_statement(name)),
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

    fn member_of_kind(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<Vec<GreenNode>> {
        let one = match kind {
            CsKind::NAMESPACE_DECLARATION => self.namespace(node)?,
            CsKind::CLASS_DECLARATION | CsKind::STRUCT_DECLARATION | CsKind::INTERFACE_DECLARATION => {
                self.type_declaration(node, kind)?
            }
            CsKind::ENUM_DECLARATION => self.enum_declaration(node)?,
            CsKind::DELEGATE_DECLARATION => self.delegate(node)?,
            CsKind::METHOD_DECLARATION => self.method(node)?,
            CsKind::CONSTRUCTOR_DECLARATION => self.constructor(node)?,
            CsKind::PROPERTY_DECLARATION => self.property(node)?,
            CsKind::FIELD_DECLARATION => self.field(node)?,
            CsKind::EVENT_FIELD_DECLARATION => return self.event_field(node),
            CsKind::EMPTY_STATEMENT => return Ok(Vec::new()),
            // Visual Basic only imports at file level
            CsKind::USING_DIRECTIVE if self.ctx.child(node, CsKind::NAME_EQUALS).is_none() => {
                if let Some(name) = self.ctx.tree.child_nodes(node).last() {
                    let namespace = compact(self.ctx.tree.node_text(name));
                    self.ctx.require_import(&namespace);
                }
                return Ok(Vec::new());
            }
            CsKind::USING_DIRECTIVE => {
                return Err(ConvertError::unsupported(kind, "aliases inside a namespace"));
            }
            _ => return Err(ConvertError::internal(kind, "not a member")),
        };
        Ok(vec![one])
    }

    /// Members among `nodes`, skipping the parts of the declaration header.
    fn members(&mut self, nodes: Vec<NodeId>) -> ConvertResult<Vec<GreenNode>> {
        let mut out = Vec::new();
        for node in nodes {
            let kind = self.kind(node)?;
            let header_part = role(kind) == Role::Part && kind != CsKind::USING_DIRECTIVE;
            if header_part || matches!(role(kind), Role::Expression | Role::Type) {
                continue;
            }
            out.extend(self.member(node)?);
        }
        Ok(out)
    }

    fn namespace(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let name = self.ty(self.ctx.nth(node, 0, "namespace name")?)?;
        let header = self.open(node);
        let members = self.members(self.ctx.nodes(node))?;
        let closing = self.close(node, &indent);
        Ok(self.ctx.decorate_block(vb::namespace_block(name, members), header, closing))
    }

    fn type_declaration(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<GreenNode> {
        let module = self.is_module(node);
        let keyword = match kind {
            _ if module => VbKind::MODULE_KW,
            CsKind::STRUCT_DECLARATION => VbKind::STRUCTURE_KW,
            CsKind::INTERFACE_DECLARATION => VbKind::INTERFACE_KW,
            _ => VbKind::CLASS_KW,
        };
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, if module { Decl::Module } else { Decl::Type })?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let type_parameters = self.type_parameters(node)?;
        let (inherits, implements) = self.base_types(node, kind)?;
        let open = self.open(node);
        let members = self.members(self.ctx.nodes(node))?;
        let closing = self.close(node, &indent);
        let block = vb::type_block(keyword, header, ident, type_parameters, inherits, implements, members);
        Ok(self.ctx.decorate_block(block, open, closing))
    }

    /// Split a base list into `Inherits` and `Implements`.
    fn base_types(&mut self, node: NodeId, kind: CsKind) -> ConvertResult<(Vec<GreenNode>, Vec<GreenNode>)> {
        let Some(list) = self.ctx.child(node, CsKind::BASE_LIST) else {
            return Ok((Vec::new(), Vec::new()));
        };
        let mut inherits = Vec::new();
        let mut implements = Vec::new();
        for (index, base) in self.ctx.nodes(list).into_iter().enumerate() {
            let implemented = match kind {
                CsKind::INTERFACE_DECLARATION => false,
                CsKind::STRUCT_DECLARATION => true,
                _ => self.is_interface(base, index),
            };
            let converted = self.ty(base)?;
            if implemented { implements.push(converted) } else { inherits.push(converted) }
        }
        Ok((inherits, implements))
    }

    /// Whether a base list entry names an interface. Unbound names fall back
    /// to position and the `IName` convention.
    fn is_interface(&self, base: NodeId, index: usize) -> bool {
        let bound = self.bound(base).or_else(|| self.ctx.model.type_symbol(base));
        if let Some(kind) = bound.and_then(|s| s.type_kind()) {
            return kind == TypeKind::Interface;
        }
        if index > 0 {
            return true;
        }
        let text = self.ctx.tree.node_text(base);
        let last = text.rsplit('.').next().unwrap_or(text);
        let mut chars = last.chars();
        chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_uppercase())
    }

    fn type_parameters(&mut self, node: NodeId) -> ConvertResult<Option<GreenNode>> {
        let Some(list) = self.ctx.child(node, CsKind::TYPE_PARAMETER_LIST) else {
            return Ok(None);
        };
        let mut params = Vec::new();
        for param in self.ctx.children_of(list, CsKind::TYPE_PARAMETER) {
            let variance = if self.ctx.has_token(param, CsKind::IN_KW) {
                Some(VbKind::IN_KW)
            } else if self.ctx.has_token(param, CsKind::OUT_KW) {
                Some(VbKind::OUT_KW)
            } else {
                None
            };
            let ident = self.ctx.ident_token(param)?;
            let ident = self.ctx.identifier_of(ident, param);
            params.push(vb::type_parameter(variance, ident));
        }
        Ok(Some(vb::type_parameter_list(params)))
    }

    fn header(&mut self, node: NodeId, decl: Decl) -> ConvertResult<Header> {
        let mut attributes = Vec::new();
        for list in self.ctx.children_of(node, CsKind::ATTRIBUTE_LIST) {
            attributes.push(self.attribute_list(list)?);
        }
        let in_module = self.ctx.tree.parent(node).is_some_and(|p| self.is_module(p));
        let is_type = matches!(decl, Decl::Type | Decl::Module);
        let mut modifiers = Vec::new();
        let mut has_visibility = false;
        let tokens: Vec<_> = self.ctx.tree.child_tokens(node).collect();
        for token in tokens {
            let Some(kind) = self.token_kind(token).filter(|k| k.is_modifier()) else {
                continue;
            };
            let mapped = match kind {
                CsKind::PUBLIC_KW | CsKind::PRIVATE_KW | CsKind::PROTECTED_KW | CsKind::INTERNAL_KW => {
                    has_visibility = true;
                    visibility(kind)
                }
                CsKind::STATIC_KW => match decl {
                    Decl::Module => None,
                    Decl::Type => Some(VbKind::NOT_INHERITABLE_KW),
                    _ if in_module => None,
                    _ => Some(VbKind::SHARED_KW),
                },
                CsKind::READONLY_KW => Some(VbKind::READ_ONLY_KW),
                CsKind::CONST_KW => Some(VbKind::CONST_KW),
                CsKind::ABSTRACT_KW if is_type => Some(VbKind::MUST_INHERIT_KW),
                CsKind::ABSTRACT_KW => Some(VbKind::MUST_OVERRIDE_KW),
                CsKind::SEALED_KW if is_type => Some(VbKind::NOT_INHERITABLE_KW),
                CsKind::SEALED_KW => Some(VbKind::NOT_OVERRIDABLE_KW),
                CsKind::VIRTUAL_KW => Some(VbKind::OVERRIDABLE_KW),
                CsKind::OVERRIDE_KW => Some(VbKind::OVERRIDES_KW),
                CsKind::NEW_KW => Some(VbKind::SHADOWS_KW),
                CsKind::PARTIAL_KW => Some(VbKind::PARTIAL_KW),
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
        if !has_visibility {
            if let Some(default) = self.default_visibility(node, decl) {
                modifiers.insert(0, factory::token(default));
            }
        }
        Ok(Header::new(attributes, modifiers))
    }

    /// Visibility C# implies where none is written, spelled out because
    /// Visual Basic's defaults differ.
    fn default_visibility(&self, node: NodeId, decl: Decl) -> Option<VbKind> {
        let parent = self.ctx.tree.parent(node).map(|p| self.ctx.kind(p));
        if parent == Some(SyntaxKind::Cs(CsKind::INTERFACE_DECLARATION)) {
            return None;
        }
        match decl {
            Decl::Constructor if self.ctx.has_token(node, CsKind::STATIC_KW) => None,
            Decl::Type | Decl::Module
                if matches!(
                    parent,
                    Some(SyntaxKind::Cs(CsKind::COMPILATION_UNIT | CsKind::NAMESPACE_DECLARATION)) | None
                ) =>
            {
                Some(VbKind::FRIEND_KW)
            }
            _ => Some(VbKind::PRIVATE_KW),
        }
    }

    fn attribute_list(&mut self, list: NodeId) -> ConvertResult<GreenNode> {
        let target = match self.ctx.child(list, CsKind::ATTRIBUTE_TARGET_SPECIFIER) {
            Some(specifier) => {
                let keyword = self.ctx.tree.child_tokens(specifier).next().and_then(|t| self.token_kind(t));
                match keyword {
                    Some(CsKind::ASSEMBLY_KW) => Some(VbKind::ASSEMBLY_KW),
                    Some(CsKind::MODULE_KW) => Some(VbKind::MODULE_KW),
                    _ => {
                        let text = self.ctx.tree.node_text(specifier);
                        self.ctx.report_dropped_modifier(list, text);
                        None
                    }
                }
            }
            None => None,
        };
        let mut attributes = Vec::new();
        for attribute in self.ctx.children_of(list, CsKind::ATTRIBUTE) {
            let name = self.ty(self.ctx.nth(attribute, 0, "attribute name")?)?;
            let args = match self.ctx.child(attribute, CsKind::ARGUMENT_LIST) {
                Some(args) => Some(self.arguments(args)?),
                None => None,
            };
            attributes.push(vb::attribute(target, name, args));
        }
        Ok(vb::attribute_list(attributes))
    }

    /// The first child node after the attributes: a return, property or
    /// delegate type.
    fn declared_type_node(&self, node: NodeId) -> ConvertResult<NodeId> {
        self.ctx
            .tree
            .child_nodes(node)
            .find(|&n| self.ctx.kind(n) != CsKind::ATTRIBUTE_LIST)
            .ok_or_else(|| ConvertError::internal(self.ctx.kind(node), "missing type"))
    }

    fn is_void(&self, ty: NodeId) -> bool {
        self.ctx.kind(ty) == CsKind::PREDEFINED_TYPE && self.ctx.has_token(ty, CsKind::VOID_KW)
    }

    fn return_type(&mut self, node: NodeId) -> ConvertResult<Option<GreenNode>> {
        let ty = self.declared_type_node(node)?;
        if self.is_void(ty) { Ok(None) } else { self.ty(ty).map(Some) }
    }

    fn method(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, Decl::Member)?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let return_type = self.return_type(node)?;
        let is_sub = return_type.is_none();
        let type_parameters = self.type_parameters(node)?;
        let params = self.parameter_list(self.ctx.require(node, CsKind::PARAMETER_LIST)?)?;
        let statement = vb::method_statement(header, ident, type_parameters, params, return_type);

        if let Some(block) = self.ctx.child(node, CsKind::BLOCK) {
            let body = self.block(block, &indent)?;
            return Ok(self.ctx.decorate_block(vb::method_block(statement, body.statements), body.header, body.closing));
        }
        if let Some(arrow) = self.ctx.child(node, CsKind::ARROW_EXPRESSION_CLAUSE) {
            let value = self.ctx.nth(arrow, 0, "expression body")?;
            let single = if is_sub {
                self.expression_statement(value)?
            } else {
                vb::return_statement(Some(self.expr(value)?))
            };
            let single = reindent(self.ctx.map_source(arrow, single), &nested_indent(&indent));
            let closing = self.ctx.closing_pending(&indent);
            return Ok(self.ctx.decorate_block(vb::method_block(statement, vec![single]), Vec::new(), closing));
        }
        Ok(statement)
    }

    fn constructor(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, Decl::Constructor)?;
        let params = self.parameter_list(self.ctx.require(node, CsKind::PARAMETER_LIST)?)?;
        let mut statements = Vec::new();
        if let Some(init) = self.ctx.child(node, CsKind::CONSTRUCTOR_INITIALIZER) {
            let target = if self.ctx.has_token(init, CsKind::BASE_KW) {
                vb::my_base_expression()
            } else {
                vb::me_expression()
            };
            let args = self.arguments(self.ctx.require(init, CsKind::ARGUMENT_LIST)?)?;
            let call = vb::invocation(vb::member_access(target, vb::identifier_name(vb::ident("New"))), args);
            let call = self.ctx.map_source(init, vb::expression_statement(call));
            statements.push(reindent(call, &nested_indent(&indent)));
        }
        let body = self.block(self.ctx.require(node, CsKind::BLOCK)?, &indent)?;
        statements.extend(body.statements);
        Ok(self.ctx.decorate_block(vb::constructor_block(header, params, statements), body.header, body.closing))
    }

    fn property(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let mut header = self.header(node, Decl::Member)?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let ty = self.ty(self.declared_type_node(node)?)?;
        let list = self.ctx.require(node, CsKind::ACCESSOR_LIST)?;
        let accessors = self.ctx.children_of(list, CsKind::ACCESSOR_DECLARATION);
        let keywords: Vec<Option<CsKind>> = accessors.iter().map(|&a| self.accessor_keyword(a)).collect();
        let has_get = keywords.contains(&Some(CsKind::GET_KW));
        let has_set = keywords.contains(&Some(CsKind::SET_KW));
        if has_get && !has_set {
            header.modifiers.push(factory::token(VbKind::READ_ONLY_KW));
        } else if has_set && !has_get {
            header.modifiers.push(factory::token(VbKind::WRITE_ONLY_KW));
        }

        let is_auto = accessors.iter().all(|&a| self.ctx.child(a, CsKind::BLOCK).is_none());
        if is_auto {
            for &accessor in &accessors {
                let tokens: Vec<_> = self.ctx.tree.child_tokens(accessor).collect();
                for token in tokens {
                    if self.token_kind(token).is_some_and(|k| k.is_modifier()) {
                        let text = self.ctx.text(token);
                        self.ctx.report_dropped_modifier(accessor, text);
                    }
                }
            }
            let initializer = match self.ctx.child(node, CsKind::EQUALS_VALUE_CLAUSE) {
                Some(clause) => Some(self.expr(self.ctx.nth(clause, 0, "initializer")?)?),
                None => None,
            };
            return Ok(vb::property_statement(header, ident, None, ty, initializer));
        }

        let statement = vb::property_statement(header, ident, None, ty.clone(), None);
        let open = self.open(list);
        let mut blocks = Vec::new();
        for accessor in accessors {
            blocks.extend(self.line(accessor, |this| this.accessor(accessor, &ty).map(|b| vec![b]))?);
        }
        let closing = self.close(list, &indent);
        Ok(self.ctx.decorate_block(vb::property_block(statement, blocks), open, closing))
    }

    fn accessor_keyword(&self, accessor: NodeId) -> Option<CsKind> {
        self.ctx
            .tree
            .child_tokens(accessor)
            .filter_map(|t| self.token_kind(t))
            .find(|k| matches!(k, CsKind::GET_KW | CsKind::SET_KW | CsKind::ADD_KW | CsKind::REMOVE_KW))
    }

    fn accessor(&mut self, accessor: NodeId, ty: &GreenNode) -> ConvertResult<GreenNode> {
        let keyword = match self.accessor_keyword(accessor) {
            Some(CsKind::GET_KW) => VbKind::GET_KW,
            Some(CsKind::SET_KW) => VbKind::SET_KW,
            _ => return Err(ConvertError::unsupported(CsKind::ACCESSOR_DECLARATION, "event accessors")),
        };
        let modifiers: Vec<GreenToken> = self
            .ctx
            .tree
            .child_tokens(accessor)
            .filter_map(|t| self.token_kind(t))
            .filter_map(visibility)
            .map(factory::token_sp)
            .collect();
        let params = (keyword == VbKind::SET_KW).then(|| {
            vb::parameter_list(vec![vb::parameter(Header::default(), vb::ident("value"), Some(ty.clone()), None)])
        });
        let indent = self.ctx.indent_of_node(accessor);
        let body = match self.ctx.child(accessor, CsKind::BLOCK) {
            Some(block) => self.block(block, &indent)?,
            None => Body { closing: self.ctx.closing_pending(&indent), ..Body::default() },
        };
        let block = vb::accessor_block(modifiers, keyword, params, body.statements);
        Ok(self.ctx.decorate_block(block, body.header, body.closing))
    }

    fn field(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let header = self.header(node, Decl::Member)?;
        let declaration = self.ctx.require(node, CsKind::VARIABLE_DECLARATION)?;
        let declarators = self.declarators(declaration)?;
        Ok(vb::field_declaration(header, declarators))
    }

    /// `event EventHandler A, B;` declares one event per name.
    fn event_field(&mut self, node: NodeId) -> ConvertResult<Vec<GreenNode>> {
        let header = self.header(node, Decl::Member)?;
        let declaration = self.ctx.require(node, CsKind::VARIABLE_DECLARATION)?;
        let ty_node = self.ctx.nth(declaration, 0, "event type")?;
        let ty = self.ty(ty_node)?;
        let indent = self.ctx.indent_of_node(node);
        let mut out = Vec::new();
        for (i, declarator) in self.ctx.children_of(declaration, CsKind::VARIABLE_DECLARATOR).into_iter().enumerate() {
            let ident = self.ctx.ident_token(declarator)?;
            let ident = self.ctx.identifier_of(ident, declarator);
            let event = vb::event_statement(header.clone(), ident, vb::EventSignature::DelegateType(ty.clone()));
            out.push(if i == 0 { event } else { reindent(event, &indent) });
        }
        Ok(out)
    }

    fn enum_declaration(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let indent = self.ctx.indent_of_node(node);
        let header = self.header(node, Decl::Type)?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let underlying = match self.ctx.child(node, CsKind::BASE_LIST) {
            Some(list) => Some(self.ty(self.ctx.nth(list, 0, "underlying type")?)?),
            None => None,
        };
        let open = self.open(node);
        let mut members: Vec<GreenNode> = Vec::new();
        for element in self.ctx.tree.children(node).to_vec() {
            match element {
                ElementId::Node(member) if self.ctx.kind(member) == CsKind::ENUM_MEMBER_DECLARATION => {
                    members.extend(self.line(member, |this| this.enum_member(member).map(|m| vec![m]))?);
                }
                // `A, // note`: the comment belongs to the member before the comma
                ElementId::Token(comma) if self.token_kind(comma) == Some(CsKind::COMMA) => {
                    let comments = self.ctx.trailing_comments(comma);
                    if let Some(last) = members.last_mut() {
                        *last = with_eol_comments(last, comments);
                    }
                }
                _ => {}
            }
        }
        let closing = self.close(node, &indent);
        Ok(self.ctx.decorate_block(vb::enum_block(header, ident, underlying, members), open, closing))
    }

    fn enum_member(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let value = match self.ctx.child(node, CsKind::EQUALS_VALUE_CLAUSE) {
            Some(clause) => Some(self.expr(self.ctx.nth(clause, 0, "enum value")?)?),
            None => None,
        };
        Ok(vb::enum_member(ident, value))
    }

    fn delegate(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let header = self.header(node, Decl::Type)?;
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        let return_type = self.return_type(node)?;
        let type_parameters = self.type_parameters(node)?;
        let params = self.parameter_list(self.ctx.require(node, CsKind::PARAMETER_LIST)?)?;
        Ok(vb::delegate_statement(header, ident, type_parameters, params, return_type))
    }

    pub(crate) fn parameter_list(&mut self, list: NodeId) -> ConvertResult<GreenNode> {
        let mut params = Vec::new();
        for param in self.ctx.children_of(list, CsKind::PARAMETER) {
            params.push(self.parameter(param)?);
        }
        Ok(vb::parameter_list(params))
    }

    pub(crate) fn parameter(&mut self, node: NodeId) -> ConvertResult<GreenNode> {
        let mut attributes = Vec::new();
        for list in self.ctx.children_of(node, CsKind::ATTRIBUTE_LIST) {
            attributes.push(self.attribute_list(list)?);
        }
        let mut modifiers = Vec::new();
        let tokens: Vec<_> = self.ctx.tree.child_tokens(node).collect();
        for token in tokens {
            match self.token_kind(token) {
                Some(CsKind::REF_KW | CsKind::OUT_KW) => modifiers.push(factory::token(VbKind::BY_REF_KW)),
                Some(CsKind::PARAMS_KW) => modifiers.push(factory::token(VbKind::PARAM_ARRAY_KW)),
                Some(CsKind::THIS_KW) => self.ctx.report_dropped_modifier(node, "this"),
                _ => {}
            }
        }
        let default = match self.ctx.child(node, CsKind::EQUALS_VALUE_CLAUSE) {
            Some(clause) => {
                modifiers.insert(0, factory::token(VbKind::OPTIONAL_KW));
                Some(self.expr(self.ctx.nth(clause, 0, "default value")?)?)
            }
            None => None,
        };
        let ty = self
            .ctx
            .tree
            .child_nodes(node)
            .find(|&n| !matches!(self.ctx.kind(n), SyntaxKind::Cs(CsKind::ATTRIBUTE_LIST | CsKind::EQUALS_VALUE_CLAUSE)));
        let ty = match ty {
            Some(ty) => Some(self.ty(ty)?),
            None => None,
        };
        let ident = self.ctx.ident_token(node)?;
        let ident = self.ctx.identifier_of(ident, node);
        Ok(vb::parameter(Header::new(attributes, modifiers), ident, ty, default))
    }
}

fn visibility(kind: CsKind) -> Option<VbKind> {
    match kind {
        CsKind::PUBLIC_KW => Some(VbKind::PUBLIC_KW),
        CsKind::PRIVATE_KW => Some(VbKind::PRIVATE_KW),
        CsKind::PROTECTED_KW => Some(VbKind::PROTECTED_KW),
        CsKind::INTERNAL_KW => Some(VbKind::FRIEND_KW),
        _ => None,
    }
}
