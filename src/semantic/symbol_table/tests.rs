#![allow(clippy::unwrap_used)]

use super::*;
use crate::syntax::{CsKind, Language, VbKind};

#[test]
fn test_insert_assigns_sequential_ids() {
    let mut table = SymbolTable::new();
    let a = table.insert(Symbol::type_symbol("A", TypeInfo::new(TypeKind::Class)));
    let b = table.insert(Symbol::type_symbol("B", TypeInfo::new(TypeKind::Class)));
    assert_eq!(a, SymbolId(0));
    assert_eq!(b, SymbolId(1));
    assert_eq!(table.get(b).unwrap().id, b);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_members_keep_declaration_order() {
    let mut table = SymbolTable::new();
    let class = table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
    let first = table.insert(Symbol::new("Zeta", SymbolKind::Field).in_type(class));
    let second = table.insert(Symbol::new("alpha", SymbolKind::Method).in_type(class));
    assert_eq!(table.members_of(class), &[first, second]);
    assert_eq!(table.members_named(class, "alpha").count(), 1);
    assert_eq!(table.members_named(class, "Alpha").count(), 0);
}

#[test]
fn test_parameters_attach_to_owner() {
    let mut table = SymbolTable::with_special_types();
    let int = table.special_type(SpecialType::Int32).unwrap();
    let class = table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
    let method = table.insert(Symbol::new("M", SymbolKind::Method).in_type(class));
    table.add_parameter(method, Symbol::new("x", SymbolKind::Parameter).of_type(int));
    table.add_parameter(method, Symbol::new("y", SymbolKind::Parameter).of_type(int).optional());

    let names: Vec<_> = table.parameters(method).map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["x", "y"]);
    assert!(table.parameters(method).nth(1).unwrap().has_default);
}

#[test]
fn test_special_types_are_registered_once() {
    let table = SymbolTable::with_special_types();
    for special in SpecialType::ALL {
        let id = table.special_type(special).unwrap();
        assert_eq!(table.get(id).unwrap().special_type(), Some(special));
        assert_eq!(table.namespace_of(id), Some("System"));
    }
    assert_eq!(table.types_named("Int32").len(), 1);
}

#[test]
fn test_array_types_are_anonymous() {
    let mut table = SymbolTable::with_special_types();
    let char_ty = table.special_type(SpecialType::Char).unwrap();
    let array = table.insert_array(char_ty, 1);
    let info = table.get(array).unwrap().type_info.clone().unwrap();
    assert_eq!(info.type_kind, TypeKind::Array);
    assert_eq!(info.element_type, Some(char_ty));
    assert!(info.is_reference_type);
    assert!(table.types_named("Char[]").is_empty());
}

#[test]
fn test_special_type_keywords() {
    assert_eq!(SpecialType::Int32.keyword(Language::CSharp), Some(CsKind::INT_KW.into()));
    assert_eq!(SpecialType::Int32.keyword(Language::VisualBasic), Some(VbKind::INTEGER_KW.into()));
    assert_eq!(SpecialType::DateTime.keyword(Language::CSharp), None);
    assert_eq!(SpecialType::Void.keyword(Language::VisualBasic), None);
    assert_eq!(SpecialType::from_keyword(CsKind::FLOAT_KW.into()), Some(SpecialType::Single));
    assert_eq!(SpecialType::from_keyword(VbKind::DATE_KW.into()), Some(SpecialType::DateTime));
    assert_eq!(SpecialType::from_keyword(CsKind::CLASS_KW.into()), None);
}

#[test]
fn test_symbol_kind_value_classification() {
    assert!(SymbolKind::Local.is_value());
    assert!(SymbolKind::Event.is_value());
    assert!(!SymbolKind::Method.is_value());
    assert!(!SymbolKind::Type.is_value());
    assert_eq!(SymbolKind::Property.display(), "property");
}
