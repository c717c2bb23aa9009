//! Implicit conversion rules of both languages.
//!
//! The validator compares what the source language converted silently with
//! what the target accepts; any gap gets an explicit cast.

use super::symbol_table::{SpecialType, SymbolId, SymbolTable, TypeKind};
use super::types::{enum_underlying_type, follow_base_types, is_array_of};
use crate::syntax::Language;

use SpecialType::*;

/// Numeric widening shared by both languages.
fn numeric_widening(from: SpecialType, to: SpecialType) -> bool {
    let targets: &[SpecialType] = match from {
        SByte => &[Int16, Int32, Int64, Single, Double, Decimal],
        Byte => &[Int16, UInt16, Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Int16 => &[Int32, Int64, Single, Double, Decimal],
        UInt16 => &[Int32, UInt32, Int64, UInt64, Single, Double, Decimal],
        Int32 => &[Int64, Single, Double, Decimal],
        UInt32 => &[Int64, UInt64, Single, Double, Decimal],
        Int64 | UInt64 => &[Single, Double, Decimal],
        Single => &[Double],
        _ => &[],
    };
    targets.contains(&to)
}

fn special_widening(from: SpecialType, to: SpecialType, language: Language) -> bool {
    if numeric_widening(from, to) {
        return true;
    }
    match language {
        Language::CSharp => from == Char && matches!(to, UInt16 | Int32 | UInt32 | Int64 | UInt64 | Single | Double | Decimal),
        Language::VisualBasic => matches!((from, to), (Decimal, Single | Double) | (Char, String)),
    }
}

/// Conversions VB performs silently under `Option Strict Off`.
fn vb_lenient(from: SpecialType, to: SpecialType) -> bool {
    let convertible = |t: SpecialType| t.is_numeric() || matches!(t, Boolean | String | Char | DateTime | Object);
    convertible(from) && convertible(to)
}

/// True when a value of type `from` converts to `to` without a cast in
/// `language`. `option_strict` only affects Visual Basic.
pub fn is_implicit_conversion(
    table: &SymbolTable,
    from: SymbolId,
    to: SymbolId,
    language: Language,
    option_strict: bool,
) -> bool {
    if from == to {
        return true;
    }
    let (Some(from_symbol), Some(to_symbol)) = (table.get(from), table.get(to)) else {
        // unknown types never force a cast
        return true;
    };
    let (Some(from_info), Some(to_info)) = (from_symbol.type_info.as_ref(), to_symbol.type_info.as_ref()) else {
        return true;
    };
    if from_info.type_kind == TypeKind::Error || to_info.type_kind == TypeKind::Error {
        return true;
    }
    if to_symbol.special_type() == Some(Object) {
        return true;
    }
    if follow_base_types(table, from).contains(&to) {
        return true;
    }

    let lenient = language == Language::VisualBasic && !option_strict;
    if let (Some(f), Some(t)) = (from_symbol.special_type(), to_symbol.special_type()) {
        return special_widening(f, t, language) || (lenient && vb_lenient(f, t));
    }

    if language == Language::VisualBasic {
        if let (Some(underlying), Some(t)) = (enum_underlying_type(table, from), to_symbol.special_type()) {
            return underlying == t || special_widening(underlying, t, language) || lenient;
        }
        if is_array_of(table, from, Char) && to_symbol.special_type() == Some(String) {
            return true;
        }
        if from_symbol.special_type() == Some(String) && is_array_of(table, to, Char) {
            return lenient;
        }
        // downcasts
        if lenient && follow_base_types(table, to).contains(&from) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbol_table::{Symbol, TypeInfo};

    fn table() -> SymbolTable {
        SymbolTable::with_special_types()
    }

    fn special(table: &SymbolTable, special: SpecialType) -> SymbolId {
        table.special_type(special).unwrap_or(SymbolId(u32::MAX))
    }

    #[test]
    fn test_numeric_widening_is_shared() {
        let t = table();
        for language in [Language::CSharp, Language::VisualBasic] {
            assert!(is_implicit_conversion(&t, special(&t, Int32), special(&t, Int64), language, true));
            assert!(is_implicit_conversion(&t, special(&t, Byte), special(&t, Double), language, true));
            assert!(!is_implicit_conversion(&t, special(&t, Int64), special(&t, Int32), language, true));
            assert!(!is_implicit_conversion(&t, special(&t, Double), special(&t, Single), language, true));
        }
    }

    #[test]
    fn test_char_rules_differ() {
        let t = table();
        let (ch, int, string) = (special(&t, Char), special(&t, Int32), special(&t, String));
        assert!(is_implicit_conversion(&t, ch, int, Language::CSharp, true));
        assert!(!is_implicit_conversion(&t, ch, int, Language::VisualBasic, true));
        assert!(is_implicit_conversion(&t, ch, string, Language::VisualBasic, true));
        assert!(!is_implicit_conversion(&t, ch, string, Language::CSharp, true));
    }

    #[test]
    fn test_decimal_to_floating_widens_only_in_vb() {
        let t = table();
        let (dec, dbl) = (special(&t, Decimal), special(&t, Double));
        assert!(is_implicit_conversion(&t, dec, dbl, Language::VisualBasic, true));
        assert!(!is_implicit_conversion(&t, dec, dbl, Language::CSharp, true));
    }

    #[test]
    fn test_option_strict_off_allows_narrowing() {
        let t = table();
        let (long, int, string) = (special(&t, Int64), special(&t, Int32), special(&t, String));
        assert!(!is_implicit_conversion(&t, long, int, Language::VisualBasic, true));
        assert!(is_implicit_conversion(&t, long, int, Language::VisualBasic, false));
        assert!(is_implicit_conversion(&t, string, int, Language::VisualBasic, false));
        assert!(!is_implicit_conversion(&t, long, int, Language::CSharp, false));
    }

    #[test]
    fn test_string_and_char_arrays() {
        let mut t = table();
        let chars = t.insert_array(special(&t, Char), 1);
        let string = special(&t, String);
        assert!(is_implicit_conversion(&t, chars, string, Language::VisualBasic, true));
        assert!(!is_implicit_conversion(&t, string, chars, Language::VisualBasic, true));
        assert!(is_implicit_conversion(&t, string, chars, Language::VisualBasic, false));
        assert!(!is_implicit_conversion(&t, string, chars, Language::CSharp, false));
    }

    #[test]
    fn test_reference_conversions() {
        let mut t = table();
        let object = special(&t, Object);
        let base = t.insert(Symbol::type_symbol("Base", TypeInfo::new(TypeKind::Class).with_base_type(object)));
        let derived = t.insert(Symbol::type_symbol("Derived", TypeInfo::new(TypeKind::Class).with_base_type(base)));
        assert!(is_implicit_conversion(&t, derived, base, Language::CSharp, true));
        assert!(is_implicit_conversion(&t, special(&t, Int32), object, Language::CSharp, true));
        assert!(!is_implicit_conversion(&t, base, derived, Language::CSharp, true));
        assert!(!is_implicit_conversion(&t, base, derived, Language::VisualBasic, true));
        assert!(is_implicit_conversion(&t, base, derived, Language::VisualBasic, false));
    }

    #[test]
    fn test_enum_to_underlying_widens_in_vb() {
        let mut t = table();
        let int = special(&t, Int32);
        let color = t.insert(Symbol::type_symbol("Color", TypeInfo::new(TypeKind::Enum)));
        assert!(is_implicit_conversion(&t, color, int, Language::VisualBasic, true));
        assert!(!is_implicit_conversion(&t, color, int, Language::CSharp, true));
    }
}
