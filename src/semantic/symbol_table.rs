/// Read-only registry of every resolved symbol in a conversion run
mod symbol;
mod table;

pub use symbol::{Accessibility, SpecialType, Symbol, SymbolId, SymbolKind, TypeInfo, TypeKind};
pub use table::SymbolTable;

#[cfg(test)]
mod tests;
