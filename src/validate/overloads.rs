//! Calls whose overload choice changes in the target.
//!
//! Overload resolution differs between the languages (case folding of names,
//! conversions counted as applicable). Every call bound to a method is resolved
//! again against the candidates the target sees; when the bound method no
//! longer wins outright, arguments are cast to its parameter types so the
//! original method is selected.

use super::{Validator, callee_name, invocation_parts, is_invocation, rewrite_nested};
use crate::diagnostics::DiagnosticKind;
use crate::semantic::{SymbolId, SymbolKind, follow_base_types, resolve_overload};
use crate::syntax::{Language, NodeId, SyntaxTree};

impl Validator<'_> {
    pub(crate) fn pin_overloads(&mut self, tree: SyntaxTree) -> SyntaxTree {
        let target = tree.language();
        let table = self.table;
        let mut casts: Vec<(NodeId, (Option<SymbolId>, SymbolId))> = Vec::new();

        for node in tree.descendants(tree.root()) {
            if !is_invocation(tree.kind(node)) {
                continue;
            }
            let Some((callee, args)) = invocation_parts(&tree, node) else {
                continue;
            };
            let Some(bound) = self.symbol_at(&tree, callee_name(&tree, callee)).or_else(|| self.symbol_at(&tree, callee))
            else {
                continue;
            };
            let Some(method) = table.get(bound).filter(|s| s.kind == SymbolKind::Method) else {
                continue;
            };
            let Some(container) = method.containing_type else {
                continue;
            };
            let candidates = self.candidates(container, &method.name, target);
            if candidates.len() < 2 {
                continue;
            }

            let arg_types: Vec<Option<SymbolId>> = args.iter().map(|&a| self.expression_type(&tree, a)).collect();
            let resolution = resolve_overload(table, &candidates, &arg_types, target, Some(bound));
            if resolution.chosen == Some(bound) && !resolution.ambiguous {
                continue;
            }

            let mut pinned = 0;
            for (&arg, (arg_ty, parameter)) in args.iter().zip(arg_types.iter().zip(table.parameters(bound))) {
                let Some(param_ty) = parameter.ty else {
                    continue;
                };
                if *arg_ty == Some(param_ty) {
                    continue;
                }
                casts.push((arg, (*arg_ty, param_ty)));
                pinned += 1;
            }
            let message = if pinned > 0 {
                format!(
                    "call to `{}` resolves differently in {target}; {pinned} argument(s) cast to keep the original overload",
                    method.name
                )
            } else {
                format!("call to `{}` is ambiguous in {target}", method.name)
            };
            tracing::trace!(method = %method.name, pinned, "overload pinned");
            self.report(&tree, node, DiagnosticKind::AmbiguousResolution, message);
        }

        rewrite_nested(tree, casts, |green, &(from, to)| self.cast_to(target, green, from, to))
    }

    /// Methods named `name` up the base chain of `container`, compared the
    /// way `target` compares names.
    fn candidates(&self, container: SymbolId, name: &str, target: Language) -> Vec<SymbolId> {
        follow_base_types(self.table, container)
            .into_iter()
            .flat_map(|ty| self.table.members_of(ty).iter().copied())
            .filter(|&member| {
                self.table
                    .get(member)
                    .is_some_and(|s| s.kind == SymbolKind::Method && target.names_equal(&s.name, name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations;
    use crate::base::FileId;
    use crate::convert::ConversionOptions;
    use crate::semantic::{SpecialType, Symbol, SymbolTable, TypeInfo, TypeKind};
    use crate::syntax::GreenNode;
    use crate::syntax::factory::vb;

    struct Fixture {
        table: SymbolTable,
        long: SymbolId,
        short: SymbolId,
        int: SymbolId,
    }

    fn fixture() -> Fixture {
        let table = SymbolTable::with_special_types();
        let special = |s| table.special_type(s).unwrap_or(SymbolId(u32::MAX));
        let (long, short, int) = (special(SpecialType::Int64), special(SpecialType::Int16), special(SpecialType::Int32));
        Fixture { table, long, short, int }
    }

    fn call(keys: &annotations::AnnotationKeys, method: SymbolId, arg: GreenNode) -> SyntaxTree {
        let callee = vb::identifier_name(annotations::with_symbol(keys, vb::ident("Process"), method));
        let invocation = vb::invocation(callee, vb::argument_list(vec![vb::simple_argument(arg)]));
        SyntaxTree::new(vb::compilation_unit(vec![vb::expression_statement(invocation)]))
    }

    #[test]
    fn test_case_folded_overloads_get_pinned() {
        let mut f = fixture();
        let class = f.table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
        let wide = f.table.insert(Symbol::new("Process", SymbolKind::Method).in_type(class));
        f.table.add_parameter(wide, Symbol::new("value", SymbolKind::Parameter).of_type(f.long));
        let narrow = f.table.insert(Symbol::new("process", SymbolKind::Method).in_type(class));
        f.table.add_parameter(narrow, Symbol::new("value", SymbolKind::Parameter).of_type(f.int));

        let options = ConversionOptions::default();
        let keys = &options.annotation_keys;
        let arg = annotations::with_expression_type(keys, vb::name("count"), f.short);
        let tree = call(keys, wide, arg);

        let mut validator = Validator::new(&f.table, &options, FileId::new(0));
        let pinned = validator.pin_overloads(tree);
        assert!(pinned.text().contains("Process(CType(count, Long))"));
        assert_eq!(validator.diagnostics.len(), 1);
        assert_eq!(validator.diagnostics[0].kind, DiagnosticKind::AmbiguousResolution);
    }

    #[test]
    fn test_unique_overload_is_left_alone() {
        let mut f = fixture();
        let class = f.table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
        let only = f.table.insert(Symbol::new("Process", SymbolKind::Method).in_type(class));
        f.table.add_parameter(only, Symbol::new("value", SymbolKind::Parameter).of_type(f.long));

        let options = ConversionOptions::default();
        let keys = &options.annotation_keys;
        let arg = annotations::with_expression_type(keys, vb::name("count"), f.short);
        let tree = call(keys, only, arg);
        let before = tree.text().to_string();

        let mut validator = Validator::new(&f.table, &options, FileId::new(0));
        let after = validator.pin_overloads(tree);
        assert_eq!(after.text(), before);
        assert!(validator.diagnostics.is_empty());
    }
}
