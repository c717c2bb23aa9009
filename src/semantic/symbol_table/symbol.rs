use smol_str::SmolStr;

use crate::syntax::{CsKind, Language, SyntaxKind, VbKind};

/// Unique identifier for a symbol in the arena.
/// Uses u32 for compact storage (supports ~4 billion symbols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Create a new SymbolId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "symbol#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type,
    Method,
    Constructor,
    Field,
    Property,
    Event,
    Parameter,
    Local,
}

impl SymbolKind {
    /// Symbols that denote a storage location or value rather than a type
    /// or callable.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            SymbolKind::Field | SymbolKind::Property | SymbolKind::Event | SymbolKind::Parameter | SymbolKind::Local
        )
    }

    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Type => "type",
            SymbolKind::Method => "method",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Field => "field",
            SymbolKind::Property => "property",
            SymbolKind::Event => "event",
            SymbolKind::Parameter => "parameter",
            SymbolKind::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    #[default]
    Private,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Array,
    TypeParameter,
    Error,
}

/// Primitive classification of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialType {
    Object,
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Decimal,
    Single,
    Double,
    String,
    DateTime,
    Void,
}

impl SpecialType {
    pub const ALL: [SpecialType; 17] = [
        SpecialType::Object,
        SpecialType::Boolean,
        SpecialType::Char,
        SpecialType::SByte,
        SpecialType::Byte,
        SpecialType::Int16,
        SpecialType::UInt16,
        SpecialType::Int32,
        SpecialType::UInt32,
        SpecialType::Int64,
        SpecialType::UInt64,
        SpecialType::Decimal,
        SpecialType::Single,
        SpecialType::Double,
        SpecialType::String,
        SpecialType::DateTime,
        SpecialType::Void,
    ];

    /// Simple metadata name, e.g. `Int32`.
    pub fn metadata_name(self) -> &'static str {
        match self {
            SpecialType::Object => "Object",
            SpecialType::Boolean => "Boolean",
            SpecialType::Char => "Char",
            SpecialType::SByte => "SByte",
            SpecialType::Byte => "Byte",
            SpecialType::Int16 => "Int16",
            SpecialType::UInt16 => "UInt16",
            SpecialType::Int32 => "Int32",
            SpecialType::UInt32 => "UInt32",
            SpecialType::Int64 => "Int64",
            SpecialType::UInt64 => "UInt64",
            SpecialType::Decimal => "Decimal",
            SpecialType::Single => "Single",
            SpecialType::Double => "Double",
            SpecialType::String => "String",
            SpecialType::DateTime => "DateTime",
            SpecialType::Void => "Void",
        }
    }

    /// The keyword naming this type in `language`, if there is one.
    pub fn keyword(self, language: Language) -> Option<SyntaxKind> {
        match language {
            Language::CSharp => {
                let kind = match self {
                    SpecialType::Object => CsKind::OBJECT_KW,
                    SpecialType::Boolean => CsKind::BOOL_KW,
                    SpecialType::Char => CsKind::CHAR_KW,
                    SpecialType::SByte => CsKind::SBYTE_KW,
                    SpecialType::Byte => CsKind::BYTE_KW,
                    SpecialType::Int16 => CsKind::SHORT_KW,
                    SpecialType::UInt16 => CsKind::USHORT_KW,
                    SpecialType::Int32 => CsKind::INT_KW,
                    SpecialType::UInt32 => CsKind::UINT_KW,
                    SpecialType::Int64 => CsKind::LONG_KW,
                    SpecialType::UInt64 => CsKind::ULONG_KW,
                    SpecialType::Decimal => CsKind::DECIMAL_KW,
                    SpecialType::Single => CsKind::FLOAT_KW,
                    SpecialType::Double => CsKind::DOUBLE_KW,
                    SpecialType::String => CsKind::STRING_KW,
                    SpecialType::Void => CsKind::VOID_KW,
                    SpecialType::DateTime => return None,
                };
                Some(kind.into())
            }
            Language::VisualBasic => {
                let kind = match self {
                    SpecialType::Object => VbKind::OBJECT_KW,
                    SpecialType::Boolean => VbKind::BOOLEAN_KW,
                    SpecialType::Char => VbKind::CHAR_KW,
                    SpecialType::SByte => VbKind::SBYTE_KW,
                    SpecialType::Byte => VbKind::BYTE_KW,
                    SpecialType::Int16 => VbKind::SHORT_KW,
                    SpecialType::UInt16 => VbKind::USHORT_KW,
                    SpecialType::Int32 => VbKind::INTEGER_KW,
                    SpecialType::UInt32 => VbKind::UINTEGER_KW,
                    SpecialType::Int64 => VbKind::LONG_KW,
                    SpecialType::UInt64 => VbKind::ULONG_KW,
                    SpecialType::Decimal => VbKind::DECIMAL_KW,
                    SpecialType::Single => VbKind::SINGLE_KW,
                    SpecialType::Double => VbKind::DOUBLE_KW,
                    SpecialType::String => VbKind::STRING_KW,
                    SpecialType::DateTime => VbKind::DATE_KW,
                    SpecialType::Void => return None,
                };
                Some(kind.into())
            }
        }
    }

    /// Reverse of [`SpecialType::keyword`].
    pub fn from_keyword(kind: SyntaxKind) -> Option<SpecialType> {
        let language = kind.language();
        Self::ALL.into_iter().find(|special| special.keyword(language) == Some(kind))
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral() || matches!(self, SpecialType::Decimal | SpecialType::Single | SpecialType::Double)
    }
}

/// Type-specific facts about a type symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub type_kind: TypeKind,
    pub special_type: Option<SpecialType>,
    pub base_type: Option<SymbolId>,
    /// Element type of arrays, underlying type of enums.
    pub element_type: Option<SymbolId>,
    pub rank: u32,
    pub can_be_referenced_by_name: bool,
    pub is_reference_type: bool,
    /// Containing namespace, dotted.
    pub namespace: Option<SmolStr>,
}

impl TypeInfo {
    pub fn new(type_kind: TypeKind) -> Self {
        Self {
            type_kind,
            special_type: None,
            base_type: None,
            element_type: None,
            rank: 0,
            can_be_referenced_by_name: true,
            is_reference_type: matches!(
                type_kind,
                TypeKind::Class | TypeKind::Interface | TypeKind::Delegate | TypeKind::Array
            ),
            namespace: None,
        }
    }

    pub fn with_special_type(mut self, special: SpecialType) -> Self {
        self.special_type = Some(special);
        self.is_reference_type = matches!(special, SpecialType::Object | SpecialType::String);
        self
    }

    pub fn with_base_type(mut self, base: SymbolId) -> Self {
        self.base_type = Some(base);
        self
    }

    pub fn with_element_type(mut self, element: SymbolId) -> Self {
        self.element_type = Some(element);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn unnameable(mut self) -> Self {
        self.can_be_referenced_by_name = false;
        self
    }
}

/// A resolved semantic entity. Read-only once the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub containing_type: Option<SymbolId>,
    /// Declared type of values, return type of methods, delegate type of events.
    pub ty: Option<SymbolId>,
    pub accessibility: Accessibility,
    pub is_static: bool,
    /// Parameters of methods, constructors, delegates and parameterised events.
    pub parameters: Vec<SymbolId>,
    /// Parameters only: a default value makes the argument optional.
    pub has_default: bool,
    pub type_info: Option<TypeInfo>,
}

impl Symbol {
    /// A symbol not yet placed in a table; [`super::SymbolTable::insert`]
    /// assigns its id.
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId(u32::MAX),
            name: name.into(),
            kind,
            containing_type: None,
            ty: None,
            accessibility: Accessibility::default(),
            is_static: false,
            parameters: Vec::new(),
            has_default: false,
            type_info: None,
        }
    }

    pub fn type_symbol(name: impl Into<SmolStr>, info: TypeInfo) -> Self {
        let mut symbol = Self::new(name, SymbolKind::Type);
        symbol.accessibility = Accessibility::Public;
        symbol.type_info = Some(info);
        symbol
    }

    pub fn in_type(mut self, containing: SymbolId) -> Self {
        self.containing_type = Some(containing);
        self
    }

    pub fn of_type(mut self, ty: SymbolId) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn shared(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn is_type(&self) -> bool {
        self.kind == SymbolKind::Type
    }

    pub fn type_kind(&self) -> Option<TypeKind> {
        self.type_info.as_ref().map(|info| info.type_kind)
    }

    pub fn special_type(&self) -> Option<SpecialType> {
        self.type_info.as_ref().and_then(|info| info.special_type)
    }
}
