//! # Semantic Layer
//!
//! Read-only facts the converter consults: the [`SymbolTable`] shared by a
//! whole batch, the per-tree [`SemanticModel`] binding nodes to symbols, and
//! pure predicates over types, conversions and overloads.
//!
//! Nothing here is mutated once conversion starts.

pub mod conversions;
pub mod model;
pub mod overloads;
pub mod symbol_table;
pub mod types;

pub use conversions::is_implicit_conversion;
pub use model::{ModelError, SemanticModel};
pub use overloads::{OverloadResolution, resolve_overload};
pub use symbol_table::{
    Accessibility, SpecialType, Symbol, SymbolId, SymbolKind, SymbolTable, TypeInfo, TypeKind,
};
pub use types::{
    EQUALITY_OPERATOR, contains_member, defines_equality_operator, follow_base_types, has_keyword, is_array_of,
    is_delegate_referencable_by_name, is_value_type,
};
