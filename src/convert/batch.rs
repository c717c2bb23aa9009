//! Parallel conversion of many units.
//!
//! Units are independent while converting, so they run on rayon's pool and
//! share only the options and the cancellation token. Results come back in
//! input order. Once every unit is done, one sequential pass checks top-level
//! type names across units for case collisions.

use std::sync::Arc;

use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use super::{ConversionOptions, ConversionResult, ConversionStatus, convert_file};
use crate::base::FileId;
use crate::semantic::SemanticModel;
use crate::syntax::SyntaxTree;
use crate::validate;

/// A source tree ready for conversion: the tree, its bound model and the id
/// its results are reported under.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub file: FileId,
    pub tree: SyntaxTree,
    pub model: SemanticModel,
}

impl SourceUnit {
    pub fn new(file: FileId, tree: SyntaxTree, model: SemanticModel) -> Self {
        Self { file, tree, model }
    }
}

/// Convert every unit, one result per unit in input order.
///
/// A malformed unit never stops the others. After cancellation, units not yet
/// finished report [`ConversionStatus::Cancelled`].
pub fn convert_batch(
    units: &[SourceUnit],
    options: &ConversionOptions,
    cancel: &CancellationToken,
) -> Vec<ConversionResult> {
    tracing::info!(units = units.len(), "converting batch");

    let mut results: Vec<ConversionResult> = units
        .par_iter()
        .map(|unit| {
            if cancel.is_cancelled() {
                return ConversionResult::cancelled(unit.file);
            }
            convert_file(unit.file, &unit.tree, &unit.model, options, cancel)
        })
        .collect();

    if options.validate && !cancel.is_cancelled() {
        match shared_table(units) {
            Some(table) => validate::resolve_cross_unit_collisions(&mut results, &table, &options.annotation_keys),
            None if units.len() > 1 => {
                tracing::debug!("units are bound against different symbol tables; cross-unit check skipped");
            }
            None => {}
        }
    }

    let count = |status: ConversionStatus| results.iter().filter(|r| r.status == status).count();
    tracing::info!(
        converted = count(ConversionStatus::Converted) + count(ConversionStatus::Validated),
        malformed = count(ConversionStatus::Malformed),
        cancelled = count(ConversionStatus::Cancelled),
        "batch finished"
    );
    results
}

/// The symbol table every unit was bound against, if they agree on one.
fn shared_table(units: &[SourceUnit]) -> Option<Arc<crate::semantic::SymbolTable>> {
    let first = units.first()?.model.shared_table();
    units
        .iter()
        .all(|unit| Arc::ptr_eq(&unit.model.shared_table(), &first))
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations;
    use crate::diagnostics::DiagnosticKind;
    use crate::semantic::{Symbol, SymbolTable, TypeInfo, TypeKind};
    use crate::syntax::factory::{Header, cs};
    use crate::syntax::{CsKind, GreenNode};

    fn class_unit(name: &str) -> GreenNode {
        let class = cs::type_declaration(CsKind::CLASS_KW, Header::default(), cs::ident(name), None, None, vec![]);
        cs::compilation_unit(vec![class])
    }

    fn bound_unit(file: u32, name: &str, symbol: crate::semantic::SymbolId, table: &Arc<SymbolTable>) -> SourceUnit {
        let tree = SyntaxTree::new(class_unit(name));
        let mut model = SemanticModel::new(&tree, table.clone());
        model.bind_declarations(&tree, name, symbol);
        SourceUnit::new(FileId::new(file), tree, model)
    }

    #[test]
    fn test_results_keep_input_order() {
        let table = Arc::new(SymbolTable::with_special_types());
        let units: Vec<SourceUnit> = (0..8)
            .map(|i| {
                let tree = SyntaxTree::new(class_unit(&format!("C{i}")));
                let model = SemanticModel::new(&tree, table.clone());
                SourceUnit::new(FileId::new(i), tree, model)
            })
            .collect();
        let results = convert_batch(&units, &ConversionOptions::default(), &CancellationToken::new());
        let files: Vec<u32> = results.iter().map(|r| r.file.index()).collect();
        assert_eq!(files, (0..8).collect::<Vec<_>>());
        assert!(results.iter().all(|r| r.status == ConversionStatus::Validated));
    }

    #[test]
    fn test_cancelled_batch_reports_every_unit() {
        let table = Arc::new(SymbolTable::with_special_types());
        let tree = SyntaxTree::new(class_unit("C"));
        let model = SemanticModel::new(&tree, table);
        let units = vec![SourceUnit::new(FileId::new(0), tree.clone(), model.clone()), SourceUnit::new(FileId::new(1), tree, model)];
        let cancel = CancellationToken::new();
        cancel.cancel();
        let results = convert_batch(&units, &ConversionOptions::default(), &cancel);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == ConversionStatus::Cancelled && r.tree.is_none()));
    }

    #[test]
    fn test_type_names_collide_across_units() {
        let mut table = SymbolTable::with_special_types();
        let upper = table.insert(Symbol::type_symbol("Widget", TypeInfo::new(TypeKind::Class)));
        let lower = table.insert(Symbol::type_symbol("widget", TypeInfo::new(TypeKind::Class)));
        let table = Arc::new(table);
        let units = vec![bound_unit(0, "Widget", upper, &table), bound_unit(1, "widget", lower, &table)];

        let results = convert_batch(&units, &ConversionOptions::default(), &CancellationToken::new());
        assert!(results[0].text().is_some_and(|t| t.contains("Class Widget")));
        assert!(results[1].text().is_some_and(|t| t.contains("Class widget_1")));
        assert!(results[0].diagnostics.iter().all(|d| d.kind != DiagnosticKind::NamingCollision));
        assert!(results[1].diagnostics.iter().any(|d| d.kind == DiagnosticKind::NamingCollision));

        let keys = ConversionOptions::default().annotation_keys;
        let Some(converted) = &results[1].tree else {
            panic!("second unit did not convert");
        };
        let renamed = converted
            .all_tokens()
            .find(|&t| converted.token_text(t) == "widget_1")
            .map(|t| annotations::symbol_of(&keys, converted.token(t)));
        assert_eq!(renamed, Some(Some(lower)));
    }
}
