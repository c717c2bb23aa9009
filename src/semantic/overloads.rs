//! Overload ranking with a deterministic tie-break.

use super::conversions::is_implicit_conversion;
use super::symbol_table::{SymbolId, SymbolTable};
use crate::syntax::Language;

/// Outcome of ranking a candidate set against an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverloadResolution {
    /// The chosen candidate, `None` when nothing is applicable.
    pub chosen: Option<SymbolId>,
    /// More than one candidate shared the best rank.
    pub ambiguous: bool,
    /// Applicable candidates in declaration order.
    pub viable: Vec<SymbolId>,
}

struct Ranked {
    id: SymbolId,
    exact_matches: usize,
    exact_signature: bool,
}

/// Rank `candidates` (in declaration order) against `arg_types`.
///
/// A candidate is applicable when the argument count fits between its
/// required and total parameter counts and every argument of known type
/// converts implicitly to its parameter type. Candidates with the most
/// argument types equal to their parameter types rank best. Ties go to:
/// 1. `preferred`, the symbol the source program bound, when it is tied;
/// 2. the first tied candidate whose arity and every parameter type match exactly;
/// 3. the first tied candidate in declaration order.
pub fn resolve_overload(
    table: &SymbolTable,
    candidates: &[SymbolId],
    arg_types: &[Option<SymbolId>],
    language: Language,
    preferred: Option<SymbolId>,
) -> OverloadResolution {
    let ranked: Vec<Ranked> = candidates
        .iter()
        .filter_map(|&id| rank(table, id, arg_types, language))
        .collect();
    let viable = ranked.iter().map(|r| r.id).collect::<Vec<_>>();
    let Some(best) = ranked.iter().map(|r| r.exact_matches).max() else {
        return OverloadResolution { chosen: None, ambiguous: false, viable };
    };
    let tied: Vec<&Ranked> = ranked.iter().filter(|r| r.exact_matches == best).collect();
    let ambiguous = tied.len() > 1;

    let chosen = preferred
        .filter(|p| tied.iter().any(|r| r.id == *p))
        .or_else(|| tied.iter().find(|r| r.exact_signature).map(|r| r.id))
        .or_else(|| tied.first().map(|r| r.id));

    if ambiguous {
        tracing::trace!(candidates = tied.len(), ?chosen, "overload tie broken");
    }
    OverloadResolution { chosen, ambiguous, viable }
}

fn rank(table: &SymbolTable, id: SymbolId, arg_types: &[Option<SymbolId>], language: Language) -> Option<Ranked> {
    let parameters: Vec<_> = table.parameters(id).collect();
    let required = parameters.iter().filter(|p| !p.has_default).count();
    if arg_types.len() < required || arg_types.len() > parameters.len() {
        return None;
    }
    let mut exact_matches = 0;
    for (arg, parameter) in arg_types.iter().zip(&parameters) {
        let (Some(arg), Some(param_ty)) = (arg, parameter.ty) else {
            continue;
        };
        if *arg == param_ty {
            exact_matches += 1;
        } else if !is_implicit_conversion(table, *arg, param_ty, language, true) {
            return None;
        }
    }
    let exact_signature = arg_types.len() == parameters.len() && exact_matches == parameters.len();
    Some(Ranked { id, exact_matches, exact_signature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::symbol_table::{SpecialType, Symbol, SymbolKind, TypeInfo, TypeKind};

    struct Fixture {
        table: SymbolTable,
        int: SymbolId,
        long: SymbolId,
        string: SymbolId,
        class: SymbolId,
    }

    fn fixture() -> Fixture {
        let mut table = SymbolTable::with_special_types();
        let int = table.special_type(SpecialType::Int32).unwrap_or(SymbolId(0));
        let long = table.special_type(SpecialType::Int64).unwrap_or(SymbolId(0));
        let string = table.special_type(SpecialType::String).unwrap_or(SymbolId(0));
        let class = table.insert(Symbol::type_symbol("C", TypeInfo::new(TypeKind::Class)));
        Fixture { table, int, long, string, class }
    }

    fn method(f: &mut Fixture, name: &str, params: &[(SymbolId, bool)]) -> SymbolId {
        let id = f.table.insert(Symbol::new(name, SymbolKind::Method).in_type(f.class));
        for (i, &(ty, optional)) in params.iter().enumerate() {
            let mut p = Symbol::new(format!("p{i}"), SymbolKind::Parameter).of_type(ty);
            if optional {
                p = p.optional();
            }
            f.table.add_parameter(id, p);
        }
        id
    }

    #[test]
    fn test_single_applicable_candidate() {
        let mut f = fixture();
        let (int, string) = (f.int, f.string);
        let by_int = method(&mut f, "M", &[(int, false)]);
        let by_string = method(&mut f, "M", &[(string, false)]);
        let result = resolve_overload(&f.table, &[by_int, by_string], &[Some(int)], Language::CSharp, None);
        assert_eq!(result.chosen, Some(by_int));
        assert!(!result.ambiguous);
        assert_eq!(result.viable, vec![by_int]);
    }

    #[test]
    fn test_exact_match_beats_widening() {
        let mut f = fixture();
        let (int, long) = (f.int, f.long);
        let wide = method(&mut f, "M", &[(long, false)]);
        let exact = method(&mut f, "M", &[(int, false)]);
        let result = resolve_overload(&f.table, &[wide, exact], &[Some(int)], Language::CSharp, None);
        assert_eq!(result.chosen, Some(exact));
        assert!(!result.ambiguous);
    }

    #[test]
    fn test_tie_prefers_bound_symbol() {
        let mut f = fixture();
        let int = f.int;
        let first = method(&mut f, "m", &[(int, false)]);
        let second = method(&mut f, "M", &[(int, false)]);
        let result = resolve_overload(&f.table, &[first, second], &[Some(int)], Language::VisualBasic, Some(second));
        assert!(result.ambiguous);
        assert_eq!(result.chosen, Some(second));
    }

    #[test]
    fn test_tie_prefers_exact_signature_then_first_declared() {
        let mut f = fixture();
        let int = f.int;
        let with_optional = method(&mut f, "M", &[(int, false), (int, true)]);
        let exact = method(&mut f, "M", &[(int, false)]);
        let result = resolve_overload(&f.table, &[with_optional, exact], &[Some(int)], Language::CSharp, None);
        assert!(result.ambiguous);
        assert_eq!(result.chosen, Some(exact));

        let result = resolve_overload(&f.table, &[with_optional, exact], &[None], Language::CSharp, None);
        assert!(result.ambiguous);
        assert_eq!(result.chosen, Some(with_optional));
    }

    #[test]
    fn test_nothing_applicable() {
        let mut f = fixture();
        let string = f.string;
        let m = method(&mut f, "M", &[(string, false)]);
        let result = resolve_overload(&f.table, &[m], &[], Language::CSharp, None);
        assert_eq!(result, OverloadResolution::default());
    }
}
