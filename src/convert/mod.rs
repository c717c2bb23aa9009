//! Conversion of one syntax tree into the other language.
//!
//! [`convert`] is the entry point for a single unit and [`batch::convert_batch`]
//! for many. Both directions share [`context::ConversionContext`]; the rules
//! themselves live in `cs_to_vb` and `vb_to_cs`, each dispatching with an
//! exhaustive match over its source language's kinds.
//!
//! A unit either converts (possibly with stubbed nodes and diagnostics) or is
//! abandoned as malformed or cancelled. Validation of the converted tree runs
//! afterwards unless the options turn it off.

pub mod batch;
mod context;
mod cs_to_vb;
mod error;
mod options;
mod trivia;
mod vb_to_cs;

pub use context::ConversionState;
pub use error::{ConvertError, ConvertResult};
pub use options::ConversionOptions;

use tokio_util::sync::CancellationToken;

use crate::base::FileId;
use crate::diagnostics::{Diagnostic, DiagnosticKind, Severity, codes};
use crate::semantic::SemanticModel;
use crate::syntax::{Language, SyntaxTree};
use crate::validate;
use context::ConversionContext;

/// How a unit left the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConversionStatus {
    /// Converted; validation was turned off.
    Converted,
    /// Converted and passed through the validator.
    Validated,
    /// The input tree or its model was unusable; no output.
    Malformed,
    /// Cancellation was observed before the unit finished; no output.
    Cancelled,
}

/// Outcome of converting one unit.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub file: FileId,
    /// The converted tree, absent for malformed or cancelled units.
    pub tree: Option<SyntaxTree>,
    pub diagnostics: Vec<Diagnostic>,
    pub status: ConversionStatus,
}

impl ConversionResult {
    fn abandoned(file: FileId, status: ConversionStatus, diagnostics: Vec<Diagnostic>) -> Self {
        Self { file, tree: None, diagnostics, status }
    }

    pub(crate) fn cancelled(file: FileId) -> Self {
        let diagnostic = Diagnostic::warning(
            DiagnosticKind::InternalConversionFailure,
            file,
            0,
            0,
            "conversion cancelled before the unit finished",
        )
        .with_code(codes::CANCELLED);
        Self::abandoned(file, ConversionStatus::Cancelled, vec![diagnostic])
    }

    pub(crate) fn malformed(file: FileId, reason: &str) -> Self {
        let diagnostic = Diagnostic::error(DiagnosticKind::MalformedInput, file, 0, 0, reason.to_string());
        Self::abandoned(file, ConversionStatus::Malformed, vec![diagnostic])
    }

    pub fn is_converted(&self) -> bool {
        self.tree.is_some()
    }

    /// Text of the converted tree.
    pub fn text(&self) -> Option<&str> {
        self.tree.as_ref().map(SyntaxTree::text)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// Convert `tree` into the other language.
///
/// The result's tree is in the opposite language of `tree`. Cancellation is
/// checked before every node; once observed the unit is abandoned.
pub fn convert(
    tree: &SyntaxTree,
    model: &SemanticModel,
    options: &ConversionOptions,
    cancel: &CancellationToken,
) -> ConversionResult {
    convert_file(FileId::default(), tree, model, options, cancel)
}

/// [`convert`] for a unit identified by `file` within a batch.
pub fn convert_file(
    file: FileId,
    tree: &SyntaxTree,
    model: &SemanticModel,
    options: &ConversionOptions,
    cancel: &CancellationToken,
) -> ConversionResult {
    let source = tree.language();
    tracing::debug!(%file, %source, nodes = tree.node_count(), "converting unit");

    if cancel.is_cancelled() {
        return ConversionResult::cancelled(file);
    }
    if let Err(error) = model.check_consistency(tree) {
        tracing::warn!(%file, %error, "semantic model does not match its tree");
        return ConversionResult::malformed(file, &error.to_string());
    }

    let mut ctx = ConversionContext::new(tree, model, options, cancel, file);
    ctx.state = ConversionState::Converting;
    let converted = match source {
        Language::CSharp => cs_to_vb::convert_unit(&mut ctx),
        Language::VisualBasic => vb_to_cs::convert_unit(&mut ctx),
    };
    let mut diagnostics = ctx.diagnostics.take();

    let root = match converted {
        Ok(root) => root,
        Err(ConvertError::Cancelled) => {
            tracing::debug!(%file, "conversion cancelled");
            return ConversionResult::cancelled(file);
        }
        Err(error) => {
            tracing::warn!(%file, %error, "unit abandoned");
            let mut result = ConversionResult::malformed(file, &error.to_string());
            result.diagnostics.splice(0..0, diagnostics);
            return result;
        }
    };
    ctx.state = ConversionState::Converted;
    let converted = SyntaxTree::new(root);

    if !options.validate {
        return ConversionResult { file, tree: Some(converted), diagnostics, status: ConversionStatus::Converted };
    }
    if cancel.is_cancelled() {
        return ConversionResult::cancelled(file);
    }
    let validated = validate::validate(converted, model.table(), options, file);
    ctx.state = ConversionState::Validated;
    diagnostics.extend(validated.diagnostics);
    tracing::debug!(%file, diagnostics = diagnostics.len(), "unit converted");

    ConversionResult { file, tree: Some(validated.tree), diagnostics, status: ConversionStatus::Validated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SymbolTable;
    use crate::syntax::factory::{Header, cs, vb};
    use crate::syntax::{CsKind, GreenNode, VbKind};
    use std::sync::Arc;

    fn unit(source: GreenNode) -> (SyntaxTree, SemanticModel) {
        let tree = SyntaxTree::new(source);
        let model = SemanticModel::new(&tree, Arc::new(SymbolTable::with_special_types()));
        (tree, model)
    }

    fn cs_class() -> GreenNode {
        let class = cs::type_declaration(CsKind::CLASS_KW, Header::default(), cs::ident("C"), None, None, vec![]);
        cs::compilation_unit(vec![class])
    }

    fn vb_class() -> GreenNode {
        let class = vb::type_block(VbKind::CLASS_KW, Header::default(), vb::ident("C"), None, vec![], vec![], vec![]);
        vb::compilation_unit(vec![class])
    }

    #[test]
    fn test_convert_flips_the_language() {
        let (tree, model) = unit(cs_class());
        let result = convert(&tree, &model, &ConversionOptions::default(), &CancellationToken::new());
        assert_eq!(result.status, ConversionStatus::Validated);
        assert_eq!(result.tree.as_ref().map(SyntaxTree::language), Some(Language::VisualBasic));
        assert!(result.text().is_some_and(|text| text.contains("Class C")));
    }

    #[test]
    fn test_without_validation_stops_at_converted() {
        let (tree, model) = unit(vb_class());
        let options = ConversionOptions::default().without_validation();
        let result = convert(&tree, &model, &options, &CancellationToken::new());
        assert_eq!(result.status, ConversionStatus::Converted);
        assert_eq!(result.tree.map(|t| t.language()), Some(Language::CSharp));
    }

    #[test]
    fn test_cancelled_unit_has_no_tree() {
        let (tree, model) = unit(cs_class());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = convert(&tree, &model, &ConversionOptions::default(), &cancel);
        assert_eq!(result.status, ConversionStatus::Cancelled);
        assert!(result.tree.is_none());
        assert!(result.diagnostics.iter().any(|d| d.code.as_deref() == Some(codes::CANCELLED)));
    }

    #[test]
    fn test_model_of_other_tree_is_malformed() {
        let (tree, _) = unit(cs_class());
        let (_, foreign) = unit(vb_class());
        let result = convert(&tree, &foreign, &ConversionOptions::default(), &CancellationToken::new());
        assert_eq!(result.status, ConversionStatus::Malformed);
        assert!(result.tree.is_none());
        assert!(result.has_errors());
    }
}
