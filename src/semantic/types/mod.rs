//! Predicates over resolved type and member symbols.
//!
//! These answer the questions the converter asks before picking a target
//! construct: can this type be written as a keyword, can this delegate be
//! named, does this member need a qualifier.

use rustc_hash::FxHashSet;

use super::symbol_table::{SpecialType, Symbol, SymbolId, SymbolKind, SymbolTable, TypeKind};

/// True when `ty` is one of the primitive types both languages spell with a
/// keyword. `Object` and `Void` are excluded: they are keywords, but the
/// converter treats them as ordinary type references.
pub fn has_keyword(ty: &Symbol) -> bool {
    matches!(
        ty.special_type(),
        Some(
            SpecialType::Boolean
                | SpecialType::Char
                | SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::Decimal
                | SpecialType::Single
                | SpecialType::Double
                | SpecialType::String
        )
    )
}

/// True when `ty` is a delegate that can be referenced by name in the
/// output.
pub fn is_delegate_referencable_by_name(ty: &Symbol) -> bool {
    ty.type_info
        .as_ref()
        .is_some_and(|info| info.can_be_referenced_by_name && info.type_kind == TypeKind::Delegate)
}

/// `ty` followed by each base type up the chain. A cyclic chain (malformed
/// input) stops at the first repeat.
pub fn follow_base_types(table: &SymbolTable, ty: SymbolId) -> Vec<SymbolId> {
    let mut chain = Vec::new();
    let mut seen = FxHashSet::default();
    let mut current = Some(ty);
    while let Some(id) = current {
        if !table.contains(id) || !seen.insert(id) {
            break;
        }
        chain.push(id);
        current = table
            .get(id)
            .and_then(|symbol| symbol.type_info.as_ref())
            .and_then(|info| info.base_type);
    }
    chain
}

/// True when `member`'s declaring type is `container` or one of its base
/// types.
pub fn contains_member(table: &SymbolTable, container: SymbolId, member: SymbolId) -> bool {
    let Some(declaring) = table.get(member).and_then(|symbol| symbol.containing_type) else {
        return false;
    };
    follow_base_types(table, container).contains(&declaring)
}

/// Metadata name both languages give a user-defined `==`/`=` operator.
pub const EQUALITY_OPERATOR: &str = "op_Equality";

/// True when `ty` or a base type declares a user-defined equality operator.
pub fn defines_equality_operator(table: &SymbolTable, ty: SymbolId) -> bool {
    follow_base_types(table, ty).into_iter().any(|id| {
        table
            .members_named(id, EQUALITY_OPERATOR)
            .any(|member| member.kind == SymbolKind::Method)
    })
}

/// True when `ty` is an array whose element type is `special`.
pub fn is_array_of(table: &SymbolTable, ty: SymbolId, special: SpecialType) -> bool {
    let Some(info) = table.get(ty).and_then(|symbol| symbol.type_info.as_ref()) else {
        return false;
    };
    if info.type_kind != TypeKind::Array {
        return false;
    }
    info.element_type
        .and_then(|element| table.get(element))
        .is_some_and(|element| element.special_type() == Some(special))
}

/// True for enums, structs and value-classified special types.
pub fn is_value_type(table: &SymbolTable, ty: SymbolId) -> bool {
    table
        .get(ty)
        .and_then(|symbol| symbol.type_info.as_ref())
        .is_some_and(|info| !info.is_reference_type && info.type_kind != TypeKind::TypeParameter && info.type_kind != TypeKind::Error)
}

/// Underlying integral type of an enum.
pub fn enum_underlying_type(table: &SymbolTable, ty: SymbolId) -> Option<SpecialType> {
    let info = table.get(ty)?.type_info.as_ref()?;
    if info.type_kind != TypeKind::Enum {
        return None;
    }
    match info.element_type {
        Some(underlying) => table.get(underlying)?.special_type(),
        None => Some(SpecialType::Int32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbol_table::{Symbol, TypeInfo};

    fn hierarchy() -> (SymbolTable, SymbolId, SymbolId, SymbolId) {
        let mut table = SymbolTable::with_special_types();
        let object = table.special_type(SpecialType::Object).unwrap_or(SymbolId(0));
        let base = table.insert(Symbol::type_symbol("Base", TypeInfo::new(TypeKind::Class).with_base_type(object)));
        let derived = table.insert(Symbol::type_symbol("Derived", TypeInfo::new(TypeKind::Class).with_base_type(base)));
        (table, object, base, derived)
    }

    #[test]
    fn test_has_keyword_excludes_object_and_void() {
        let table = SymbolTable::with_special_types();
        for special in SpecialType::ALL {
            let symbol = table.special_type(special).and_then(|id| table.get(id)).cloned();
            let Some(symbol) = symbol else { continue };
            let expected = !matches!(special, SpecialType::Object | SpecialType::Void | SpecialType::DateTime);
            assert_eq!(has_keyword(&symbol), expected, "{special:?}");
        }
    }

    #[test]
    fn test_delegate_referencable_by_name() {
        let named = Symbol::type_symbol("Handler", TypeInfo::new(TypeKind::Delegate));
        let anonymous = Symbol::type_symbol("<anon>", TypeInfo::new(TypeKind::Delegate).unnameable());
        let class = Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class));
        assert!(is_delegate_referencable_by_name(&named));
        assert!(!is_delegate_referencable_by_name(&anonymous));
        assert!(!is_delegate_referencable_by_name(&class));
    }

    #[test]
    fn test_follow_base_types_is_self_inclusive() {
        let (table, object, base, derived) = hierarchy();
        assert_eq!(follow_base_types(&table, derived), vec![derived, base, object]);
        assert_eq!(follow_base_types(&table, object), vec![object]);
    }

    #[test]
    fn test_follow_base_types_stops_on_cycle() {
        let mut table = SymbolTable::new();
        let a = table.insert(Symbol::type_symbol("A", TypeInfo::new(TypeKind::Class).with_base_type(SymbolId(1))));
        let b = table.insert(Symbol::type_symbol("B", TypeInfo::new(TypeKind::Class).with_base_type(a)));
        assert_eq!(follow_base_types(&table, a), vec![a, b]);
    }

    #[test]
    fn test_contains_member_walks_base_chain() {
        let (mut table, _, base, derived) = hierarchy();
        let inherited = table.insert(Symbol::new("Value", SymbolKind::Field).in_type(base));
        let own = table.insert(Symbol::new("Other", SymbolKind::Field).in_type(derived));
        assert!(contains_member(&table, derived, inherited));
        assert!(contains_member(&table, derived, own));
        assert!(!contains_member(&table, base, own));
    }

    #[test]
    fn test_equality_operator_is_inherited() {
        let (mut table, object, base, derived) = hierarchy();
        assert!(!defines_equality_operator(&table, derived));
        table.insert(Symbol::new(EQUALITY_OPERATOR, SymbolKind::Method).in_type(base).shared());
        assert!(defines_equality_operator(&table, derived));
        assert!(!defines_equality_operator(&table, object));
    }

    #[test]
    fn test_is_array_of() {
        let mut table = SymbolTable::with_special_types();
        let char_ty = table.special_type(SpecialType::Char).unwrap_or(SymbolId(0));
        let string_ty = table.special_type(SpecialType::String).unwrap_or(SymbolId(0));
        let chars = table.insert_array(char_ty, 1);
        assert!(is_array_of(&table, chars, SpecialType::Char));
        assert!(!is_array_of(&table, chars, SpecialType::Byte));
        assert!(!is_array_of(&table, string_ty, SpecialType::Char));
    }

    #[test]
    fn test_value_types_and_enums() {
        let mut table = SymbolTable::with_special_types();
        let byte = table.special_type(SpecialType::Byte).unwrap_or(SymbolId(0));
        let string = table.special_type(SpecialType::String).unwrap_or(SymbolId(0));
        let color = table.insert(Symbol::type_symbol("Color", TypeInfo::new(TypeKind::Enum).with_element_type(byte)));
        let plain = table.insert(Symbol::type_symbol("Plain", TypeInfo::new(TypeKind::Enum)));
        assert!(is_value_type(&table, byte));
        assert!(is_value_type(&table, color));
        assert!(!is_value_type(&table, string));
        assert_eq!(enum_underlying_type(&table, color), Some(SpecialType::Byte));
        assert_eq!(enum_underlying_type(&table, plain), Some(SpecialType::Int32));
        assert_eq!(enum_underlying_type(&table, byte), None);
    }
}
