//! # codeconv
//!
//! Semantic syntax-tree conversion between C# and Visual Basic.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project     → Collaborator contracts (loader, sink, writer)
//!   ↓
//! validate    → Post-conversion cleanup: collisions, overloads, casts
//!   ↓
//! convert     → Converter visitors (C# → VB, VB → C#), batch driver
//!   ↓
//! annotations → Source line mapping on converted nodes/tokens
//!   ↓
//! semantic    → Symbol table, semantic model, type predicates
//!   ↓
//! syntax      → Kinds, logos lexers, green values, arena tree, token utilities
//!   ↓
//! base        → Primitives (FileId, Position/Span, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → semantic → annotations → convert)
// ============================================================================

/// Foundation types: FileId, Position/Span, LineIndex
pub mod base;

/// Syntax: kinds, lexers, green/red trees, factories, token utilities
pub mod syntax;

/// Semantic model: symbols, bindings, type predicates
pub mod semantic;

/// Source-position annotations
pub mod annotations;

/// Diagnostic types and collector
pub mod diagnostics;

/// The converter
pub mod convert;

/// Validator / cleanup pass over converted trees
pub mod validate;

/// Collaborator contracts for loaders, sinks and writers
pub mod project;

// Re-export commonly needed items
pub use base::{FileId, LineIndex, Position, Span};
pub use convert::{
    ConversionOptions, ConversionResult, ConversionStatus, ConvertError, convert,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use semantic::{SemanticModel, SymbolId, SymbolTable};
pub use syntax::{Language, SyntaxKind, SyntaxTree};
pub use tokio_util::sync::CancellationToken;
