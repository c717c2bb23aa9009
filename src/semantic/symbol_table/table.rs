use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbol::{SpecialType, Symbol, SymbolId, SymbolKind, TypeInfo, TypeKind};

/// Arena of every symbol known to a conversion run.
///
/// Built once by the front-end, then shared read-only (behind an `Arc`) by
/// all converters in a batch.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Arena storage for all symbols - single source of truth
    arena: Vec<Symbol>,
    /// Members of each type, in declaration order
    members: FxHashMap<SymbolId, Vec<SymbolId>>,
    /// Type symbols by simple name, in declaration order
    types_by_name: FxHashMap<SmolStr, Vec<SymbolId>>,
    special: FxHashMap<SpecialType, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-populated with every [`SpecialType`] under the `System`
    /// namespace.
    pub fn with_special_types() -> Self {
        let mut table = Self::new();
        for special in SpecialType::ALL {
            let kind = match special {
                SpecialType::Object | SpecialType::String => TypeKind::Class,
                _ => TypeKind::Struct,
            };
            let info = TypeInfo::new(kind).with_special_type(special).with_namespace("System");
            table.insert(Symbol::type_symbol(special.metadata_name(), info));
        }
        table
    }

    /// Add a symbol, returning its id. Members are indexed under their
    /// containing type in insertion order.
    pub fn insert(&mut self, mut symbol: Symbol) -> SymbolId {
        let id = SymbolId::new(self.arena.len());
        symbol.id = id;
        if let Some(container) = symbol.containing_type {
            self.members.entry(container).or_default().push(id);
        }
        if symbol.kind == SymbolKind::Type {
            self.types_by_name.entry(symbol.name.clone()).or_default().push(id);
            if let Some(special) = symbol.special_type() {
                self.special.entry(special).or_insert(id);
            }
        }
        self.arena.push(symbol);
        id
    }

    /// Add a parameter to an already inserted method, constructor, delegate
    /// or event.
    pub fn add_parameter(&mut self, owner: SymbolId, parameter: Symbol) -> SymbolId {
        let id = self.insert(parameter);
        if let Some(symbol) = self.arena.get_mut(owner.index()) {
            symbol.parameters.push(id);
        }
        id
    }

    /// Add an array type over `element`.
    pub fn insert_array(&mut self, element: SymbolId, rank: u32) -> SymbolId {
        let name = match self.get(element) {
            Some(symbol) => SmolStr::from(format!("{}[]", symbol.name)),
            None => SmolStr::new_static("[]"),
        };
        let mut info = TypeInfo::new(TypeKind::Array).with_element_type(element);
        info.rank = rank.max(1);
        info.base_type = self.special_type(SpecialType::Object);
        let mut symbol = Symbol::type_symbol(name, info);
        // array types are anonymous: they never appear in types_by_name
        let id = SymbolId::new(self.arena.len());
        symbol.id = id;
        self.arena.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.arena.get(id.index())
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        id.index() < self.arena.len()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.arena.iter()
    }

    /// Members of `ty` in declaration order.
    pub fn members_of(&self, ty: SymbolId) -> &[SymbolId] {
        self.members.get(&ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Members of `ty` whose name equals `name` exactly.
    pub fn members_named<'a>(&'a self, ty: SymbolId, name: &'a str) -> impl Iterator<Item = &'a Symbol> + 'a {
        self.members_of(ty)
            .iter()
            .filter_map(|id| self.get(*id))
            .filter(move |symbol| symbol.name == name)
    }

    /// Type symbols declared with exactly this simple name.
    pub fn types_named(&self, name: &str) -> &[SymbolId] {
        self.types_by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn special_type(&self, special: SpecialType) -> Option<SymbolId> {
        self.special.get(&special).copied()
    }

    /// Parameter symbols of a callable, in order.
    pub fn parameters(&self, callable: SymbolId) -> impl Iterator<Item = &Symbol> {
        self.get(callable)
            .map(|symbol| symbol.parameters.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.get(*id))
    }

    /// Declared type of a value, or return type of a method.
    pub fn type_of(&self, id: SymbolId) -> Option<&Symbol> {
        self.get(id).and_then(|symbol| symbol.ty).and_then(|ty| self.get(ty))
    }

    /// Containing namespace of a type, dotted.
    pub fn namespace_of(&self, ty: SymbolId) -> Option<&str> {
        self.get(ty)
            .and_then(|symbol| symbol.type_info.as_ref())
            .and_then(|info| info.namespace.as_deref())
    }
}
