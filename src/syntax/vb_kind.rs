//! Syntax kinds for Visual Basic trees.
//!
//! Same layout as [`super::CsKind`]: tokens, reserved keywords, contextual
//! keywords, then composite nodes. Keyword spelling in source is
//! case-insensitive; [`VbKind::text`] returns the canonical casing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum VbKind {
    // =========================================================================
    // TOKENS
    // =========================================================================
    EOF_TOKEN = 0,
    BAD_TOKEN,
    EMPTY_TOKEN,
    IDENT,
    NUMERIC_LITERAL,
    STRING_LITERAL,
    CHAR_LITERAL,

    // Punctuation
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACE,   // {
    R_BRACE,   // }
    DOT,       // .
    COMMA,     // ,
    EQ,        // =
    LT_GT,     // <>
    LT,        // <
    GT,        // >
    LT_EQ,     // <=
    GT_EQ,     // >=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    BACKSLASH, // \
    CARET,     // ^
    AMP,       // &
    PLUS_EQ,   // +=
    MINUS_EQ,  // -=
    STAR_EQ,   // *=
    SLASH_EQ,  // /=
    BACKSLASH_EQ, // \=
    AMP_EQ,    // &=
    LT_LT,     // <<
    GT_GT,     // >>
    COLON,     // :
    COLON_EQ,  // :=
    QUESTION,  // ?

    // =========================================================================
    // RESERVED KEYWORDS
    // =========================================================================
    ADD_HANDLER_KW,
    ADDRESS_OF_KW,
    AND_KW,
    AND_ALSO_KW,
    AS_KW,
    ASSEMBLY_KW,
    BOOLEAN_KW,
    BY_REF_KW,
    BY_VAL_KW,
    BYTE_KW,
    CALL_KW,
    CASE_KW,
    CATCH_KW,
    CHAR_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    CTYPE_KW,
    DATE_KW,
    DECIMAL_KW,
    DELEGATE_KW,
    DIM_KW,
    DIRECT_CAST_KW,
    DO_KW,
    DOUBLE_KW,
    EACH_KW,
    ELSE_KW,
    ELSE_IF_KW,
    END_KW,
    ENUM_KW,
    ERROR_KW,
    EVENT_KW,
    EXIT_KW,
    FALSE_KW,
    FINALLY_KW,
    FOR_KW,
    FRIEND_KW,
    FUNCTION_KW,
    GET_KW,
    GET_TYPE_KW,
    GLOBAL_KW,
    GO_TO_KW,
    HANDLES_KW,
    IF_KW,
    IMPLEMENTS_KW,
    IMPORTS_KW,
    IN_KW,
    INHERITS_KW,
    INTEGER_KW,
    INTERFACE_KW,
    IS_KW,
    IS_NOT_KW,
    LONG_KW,
    LOOP_KW,
    ME_KW,
    MOD_KW,
    MODULE_KW,
    MUST_INHERIT_KW,
    MUST_OVERRIDE_KW,
    MY_BASE_KW,
    NAMESPACE_KW,
    NEW_KW,
    NEXT_KW,
    NOT_KW,
    NOT_INHERITABLE_KW,
    NOT_OVERRIDABLE_KW,
    NOTHING_KW,
    OBJECT_KW,
    OF_KW,
    ON_KW,
    OPTIONAL_KW,
    OR_KW,
    OR_ELSE_KW,
    OVERRIDABLE_KW,
    OVERRIDES_KW,
    PARAM_ARRAY_KW,
    PARTIAL_KW,
    PRIVATE_KW,
    PROPERTY_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    RAISE_EVENT_KW,
    READ_ONLY_KW,
    REMOVE_HANDLER_KW,
    RETURN_KW,
    SBYTE_KW,
    SELECT_KW,
    SET_KW,
    SHADOWS_KW,
    SHARED_KW,
    SHORT_KW,
    SINGLE_KW,
    STATIC_KW,
    STEP_KW,
    STRING_KW,
    STRUCTURE_KW,
    SUB_KW,
    THEN_KW,
    THROW_KW,
    TO_KW,
    TRUE_KW,
    TRY_KW,
    TRY_CAST_KW,
    TYPE_OF_KW,
    UINTEGER_KW,
    ULONG_KW,
    UNTIL_KW,
    USHORT_KW,
    USING_KW,
    WHILE_KW,
    WITH_KW,
    WRITE_ONLY_KW,
    XOR_KW,

    // =========================================================================
    // CONTEXTUAL KEYWORDS
    // =========================================================================
    OUT_KW,
    FROM_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    COMPILATION_UNIT,               // IMPORTS_STATEMENT*, member*, EOF_TOKEN
    IMPORTS_STATEMENT,              // Imports, IMPORT_ALIAS_CLAUSE?, name
    IMPORT_ALIAS_CLAUSE,            // IDENT, =
    NAMESPACE_BLOCK,                // NAMESPACE_STATEMENT, member*, END_BLOCK_STATEMENT
    NAMESPACE_STATEMENT,            // Namespace, name
    END_BLOCK_STATEMENT,            // End, keyword
    CLASS_BLOCK,                    // CLASS_STATEMENT, INHERITS_STATEMENT*, IMPLEMENTS_STATEMENT*, member*, END_BLOCK_STATEMENT
    CLASS_STATEMENT,                // ATTRIBUTE_LIST*, modifier*, Class, IDENT, TYPE_PARAMETER_LIST?
    STRUCTURE_BLOCK,                // as CLASS_BLOCK
    STRUCTURE_STATEMENT,            // as CLASS_STATEMENT with Structure
    INTERFACE_BLOCK,                // as CLASS_BLOCK
    INTERFACE_STATEMENT,            // as CLASS_STATEMENT with Interface
    MODULE_BLOCK,                   // as CLASS_BLOCK
    MODULE_STATEMENT,               // as CLASS_STATEMENT with Module
    ENUM_BLOCK,                     // ENUM_STATEMENT, ENUM_MEMBER_DECLARATION*, END_BLOCK_STATEMENT
    ENUM_STATEMENT,                 // ATTRIBUTE_LIST*, modifier*, Enum, IDENT, SIMPLE_AS_CLAUSE?
    ENUM_MEMBER_DECLARATION,        // IDENT, EQUALS_VALUE?
    INHERITS_STATEMENT,             // Inherits, type (, type)*
    IMPLEMENTS_STATEMENT,           // Implements, type (, type)*
    TYPE_PARAMETER_LIST,            // (, Of, TYPE_PARAMETER (, TYPE_PARAMETER)*, )
    TYPE_PARAMETER,                 // (In | Out)?, IDENT
    DELEGATE_STATEMENT,             // ATTRIBUTE_LIST*, modifier*, Delegate, (Sub | Function), IDENT, TYPE_PARAMETER_LIST?, PARAMETER_LIST, SIMPLE_AS_CLAUSE?
    METHOD_BLOCK,                   // METHOD_STATEMENT, statement*, END_BLOCK_STATEMENT
    METHOD_STATEMENT,               // ATTRIBUTE_LIST*, modifier*, (Sub | Function), IDENT, TYPE_PARAMETER_LIST?, PARAMETER_LIST, SIMPLE_AS_CLAUSE?
    CONSTRUCTOR_BLOCK,              // SUB_NEW_STATEMENT, statement*, END_BLOCK_STATEMENT
    SUB_NEW_STATEMENT,              // ATTRIBUTE_LIST*, modifier*, Sub, New, PARAMETER_LIST
    PROPERTY_BLOCK,                 // PROPERTY_STATEMENT, ACCESSOR_BLOCK+, END_BLOCK_STATEMENT
    PROPERTY_STATEMENT,             // ATTRIBUTE_LIST*, modifier*, Property, IDENT, PARAMETER_LIST?, SIMPLE_AS_CLAUSE?, EQUALS_VALUE?
    ACCESSOR_BLOCK,                 // ACCESSOR_STATEMENT, statement*, END_BLOCK_STATEMENT
    ACCESSOR_STATEMENT,             // modifier*, (Get | Set), PARAMETER_LIST?
    FIELD_DECLARATION,              // ATTRIBUTE_LIST*, modifier+, VARIABLE_DECLARATOR (, VARIABLE_DECLARATOR)*
    EVENT_STATEMENT,                // ATTRIBUTE_LIST*, modifier*, Event, IDENT, (PARAMETER_LIST | SIMPLE_AS_CLAUSE)
    VARIABLE_DECLARATOR,            // MODIFIED_IDENTIFIER (, MODIFIED_IDENTIFIER)*, (SIMPLE_AS_CLAUSE | AS_NEW_CLAUSE)?, EQUALS_VALUE?
    MODIFIED_IDENTIFIER,            // IDENT
    SIMPLE_AS_CLAUSE,               // As, type
    AS_NEW_CLAUSE,                  // As, OBJECT_CREATION_EXPRESSION
    EQUALS_VALUE,                   // =, expr
    PARAMETER_LIST,                 // (, PARAMETER (, PARAMETER)*, )
    PARAMETER,                      // ATTRIBUTE_LIST*, modifier*, IDENT, SIMPLE_AS_CLAUSE?, EQUALS_VALUE?
    ATTRIBUTE_LIST,                 // <, ATTRIBUTE (, ATTRIBUTE)*, >
    ATTRIBUTE_TARGET,               // (Assembly | Module), :
    ATTRIBUTE,                      // ATTRIBUTE_TARGET?, name, ARGUMENT_LIST?

    // Statements
    LOCAL_DECLARATION_STATEMENT,    // (Dim | Const | Static)+, VARIABLE_DECLARATOR (, VARIABLE_DECLARATOR)*
    EXPRESSION_STATEMENT,           // expr
    ASSIGNMENT_STATEMENT,           // expr, (= | += | -= | *= | /= | &=), expr
    ADD_HANDLER_STATEMENT,          // AddHandler, expr, ",", expr
    REMOVE_HANDLER_STATEMENT,       // RemoveHandler, expr, ",", expr
    RAISE_EVENT_STATEMENT,          // RaiseEvent, IDENTIFIER_NAME, ARGUMENT_LIST?
    MULTI_LINE_IF_BLOCK,            // IF_STATEMENT, statement*, ELSE_IF_BLOCK*, ELSE_BLOCK?, END_BLOCK_STATEMENT
    IF_STATEMENT,                   // If, expr, Then
    ELSE_IF_BLOCK,                  // ELSE_IF_STATEMENT, statement*
    ELSE_IF_STATEMENT,              // ElseIf, expr, Then
    ELSE_BLOCK,                     // ELSE_STATEMENT, statement*
    ELSE_STATEMENT,                 // Else
    WHILE_BLOCK,                    // WHILE_STATEMENT, statement*, END_BLOCK_STATEMENT
    WHILE_STATEMENT,                // While, expr
    DO_LOOP_BLOCK,                  // DO_STATEMENT, statement*, LOOP_STATEMENT
    DO_STATEMENT,                   // Do, ((While | Until), expr)?
    LOOP_STATEMENT,                 // Loop, ((While | Until), expr)?
    FOR_EACH_BLOCK,                 // FOR_EACH_STATEMENT, statement*, NEXT_STATEMENT
    FOR_EACH_STATEMENT,             // For, Each, (IDENTIFIER_NAME | VARIABLE_DECLARATOR), In, expr
    NEXT_STATEMENT,                 // Next
    RETURN_STATEMENT,               // Return, expr?
    THROW_STATEMENT,                // Throw, expr?
    EXIT_STATEMENT,                 // Exit, block keyword
    CONTINUE_STATEMENT,             // Continue, (While | For | Do)
    TRY_BLOCK,                      // TRY_STATEMENT, statement*, CATCH_BLOCK*, FINALLY_BLOCK?, END_BLOCK_STATEMENT
    TRY_STATEMENT,                  // Try
    CATCH_BLOCK,                    // CATCH_STATEMENT, statement*
    CATCH_STATEMENT,                // Catch, IDENT?, SIMPLE_AS_CLAUSE?
    FINALLY_BLOCK,                  // FINALLY_STATEMENT, statement*
    FINALLY_STATEMENT,              // Finally
    USING_BLOCK,                    // USING_STATEMENT, statement*, END_BLOCK_STATEMENT
    USING_STATEMENT,                // Using, (VARIABLE_DECLARATOR | expr)
    SELECT_BLOCK,                   // Select Case ... End Select
    GO_TO_STATEMENT,                // GoTo label
    ON_ERROR_STATEMENT,             // On Error ...
    WITH_BLOCK,                     // With ... End With
    EMPTY_STATEMENT,                // EMPTY_TOKEN

    // Names, types and expressions
    IDENTIFIER_NAME,                // IDENT
    GENERIC_NAME,                   // IDENT, TYPE_ARGUMENT_LIST
    TYPE_ARGUMENT_LIST,             // (, Of, type (, type)*, )
    QUALIFIED_NAME,                 // name, ., name
    GLOBAL_NAME,                    // Global
    PREDEFINED_TYPE,                // keyword
    ARRAY_TYPE,                     // type, ARRAY_RANK_SPECIFIER+
    ARRAY_RANK_SPECIFIER,           // (, ","*, )
    NULLABLE_TYPE,                  // type, ?
    MEMBER_ACCESS_EXPRESSION,       // expr, ., name
    INVOCATION_EXPRESSION,          // expr, ARGUMENT_LIST
    ARGUMENT_LIST,                  // (, SIMPLE_ARGUMENT (, SIMPLE_ARGUMENT)*, )
    SIMPLE_ARGUMENT,                // expr
    LITERAL_EXPRESSION,             // literal | True | False | Nothing
    PARENTHESIZED_EXPRESSION,       // (, expr, )
    BINARY_EXPRESSION,              // expr, operator, expr
    UNARY_EXPRESSION,               // (Not | - | +), expr
    TERNARY_CONDITIONAL_EXPRESSION, // If, (, expr, ",", expr, ",", expr, )
    BINARY_CONDITIONAL_EXPRESSION,  // If, (, expr, ",", expr, )
    CAST_EXPRESSION,                // (CType | DirectCast | TryCast), (, expr, ",", type, )
    OBJECT_CREATION_EXPRESSION,     // New, type, ARGUMENT_LIST?, (From, COLLECTION_INITIALIZER)?
    ARRAY_CREATION_EXPRESSION,      // New, type, (ARGUMENT_LIST | ARRAY_RANK_SPECIFIER), COLLECTION_INITIALIZER
    COLLECTION_INITIALIZER,         // {, expr (, expr)*, }
    ME_EXPRESSION,                  // Me
    MY_BASE_EXPRESSION,             // MyBase
    GET_TYPE_EXPRESSION,            // GetType, (, type, )
    TYPE_OF_IS_EXPRESSION,          // TypeOf, expr, (Is | IsNot), type
    SINGLE_LINE_LAMBDA_EXPRESSION,  // LAMBDA_HEADER, (expr | statement)
    MULTI_LINE_LAMBDA_EXPRESSION,   // LAMBDA_HEADER, statement*, END_BLOCK_STATEMENT
    LAMBDA_HEADER,                  // (Sub | Function), PARAMETER_LIST
    ADDRESS_OF_EXPRESSION,          // AddressOf, expr

    #[doc(hidden)]
    __LAST,
}

impl VbKind {
    /// Check if this is a reserved keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ADD_HANDLER_KW as u16) && (self as u16) <= (Self::XOR_KW as u16)
    }

    /// Check if this is a contextual keyword
    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (Self::OUT_KW as u16) && (self as u16) <= (Self::FROM_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::QUESTION as u16)
    }

    /// Check if this is any token kind (as opposed to a composite node)
    pub fn is_token(self) -> bool {
        (self as u16) < (Self::COMPILATION_UNIT as u16)
    }

    pub fn is_node(self) -> bool {
        !self.is_token() && self != Self::__LAST
    }

    /// Canonical text of fixed tokens and keywords.
    pub fn text(self) -> Option<&'static str> {
        use VbKind::*;
        let text = match self {
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACE => "{",
            R_BRACE => "}",
            DOT => ".",
            COMMA => ",",
            EQ => "=",
            LT_GT => "<>",
            LT => "<",
            GT => ">",
            LT_EQ => "<=",
            GT_EQ => ">=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            BACKSLASH => "\\",
            CARET => "^",
            AMP => "&",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            SLASH_EQ => "/=",
            BACKSLASH_EQ => "\\=",
            AMP_EQ => "&=",
            LT_LT => "<<",
            GT_GT => ">>",
            COLON => ":",
            COLON_EQ => ":=",
            QUESTION => "?",
            ADD_HANDLER_KW => "AddHandler",
            ADDRESS_OF_KW => "AddressOf",
            AND_KW => "And",
            AND_ALSO_KW => "AndAlso",
            AS_KW => "As",
            ASSEMBLY_KW => "Assembly",
            BOOLEAN_KW => "Boolean",
            BY_REF_KW => "ByRef",
            BY_VAL_KW => "ByVal",
            BYTE_KW => "Byte",
            CALL_KW => "Call",
            CASE_KW => "Case",
            CATCH_KW => "Catch",
            CHAR_KW => "Char",
            CLASS_KW => "Class",
            CONST_KW => "Const",
            CONTINUE_KW => "Continue",
            CTYPE_KW => "CType",
            DATE_KW => "Date",
            DECIMAL_KW => "Decimal",
            DELEGATE_KW => "Delegate",
            DIM_KW => "Dim",
            DIRECT_CAST_KW => "DirectCast",
            DO_KW => "Do",
            DOUBLE_KW => "Double",
            EACH_KW => "Each",
            ELSE_KW => "Else",
            ELSE_IF_KW => "ElseIf",
            END_KW => "End",
            ENUM_KW => "Enum",
            ERROR_KW => "Error",
            EVENT_KW => "Event",
            EXIT_KW => "Exit",
            FALSE_KW => "False",
            FINALLY_KW => "Finally",
            FOR_KW => "For",
            FRIEND_KW => "Friend",
            FUNCTION_KW => "Function",
            GET_KW => "Get",
            GET_TYPE_KW => "GetType",
            GLOBAL_KW => "Global",
            GO_TO_KW => "GoTo",
            HANDLES_KW => "Handles",
            IF_KW => "If",
            IMPLEMENTS_KW => "Implements",
            IMPORTS_KW => "Imports",
            IN_KW => "In",
            INHERITS_KW => "Inherits",
            INTEGER_KW => "Integer",
            INTERFACE_KW => "Interface",
            IS_KW => "Is",
            IS_NOT_KW => "IsNot",
            LONG_KW => "Long",
            LOOP_KW => "Loop",
            ME_KW => "Me",
            MOD_KW => "Mod",
            MODULE_KW => "Module",
            MUST_INHERIT_KW => "MustInherit",
            MUST_OVERRIDE_KW => "MustOverride",
            MY_BASE_KW => "MyBase",
            NAMESPACE_KW => "Namespace",
            NEW_KW => "New",
            NEXT_KW => "Next",
            NOT_KW => "Not",
            NOT_INHERITABLE_KW => "NotInheritable",
            NOT_OVERRIDABLE_KW => "NotOverridable",
            NOTHING_KW => "Nothing",
            OBJECT_KW => "Object",
            OF_KW => "Of",
            ON_KW => "On",
            OPTIONAL_KW => "Optional",
            OR_KW => "Or",
            OR_ELSE_KW => "OrElse",
            OVERRIDABLE_KW => "Overridable",
            OVERRIDES_KW => "Overrides",
            PARAM_ARRAY_KW => "ParamArray",
            PARTIAL_KW => "Partial",
            PRIVATE_KW => "Private",
            PROPERTY_KW => "Property",
            PROTECTED_KW => "Protected",
            PUBLIC_KW => "Public",
            RAISE_EVENT_KW => "RaiseEvent",
            READ_ONLY_KW => "ReadOnly",
            REMOVE_HANDLER_KW => "RemoveHandler",
            RETURN_KW => "Return",
            SBYTE_KW => "SByte",
            SELECT_KW => "Select",
            SET_KW => "Set",
            SHADOWS_KW => "Shadows",
            SHARED_KW => "Shared",
            SHORT_KW => "Short",
            SINGLE_KW => "Single",
            STATIC_KW => "Static",
            STEP_KW => "Step",
            STRING_KW => "String",
            STRUCTURE_KW => "Structure",
            SUB_KW => "Sub",
            THEN_KW => "Then",
            THROW_KW => "Throw",
            TO_KW => "To",
            TRUE_KW => "True",
            TRY_KW => "Try",
            TRY_CAST_KW => "TryCast",
            TYPE_OF_KW => "TypeOf",
            UINTEGER_KW => "UInteger",
            ULONG_KW => "ULong",
            UNTIL_KW => "Until",
            USHORT_KW => "UShort",
            USING_KW => "Using",
            WHILE_KW => "While",
            WITH_KW => "With",
            WRITE_ONLY_KW => "WriteOnly",
            XOR_KW => "Xor",
            OUT_KW => "Out",
            FROM_KW => "From",
            _ => return None,
        };
        Some(text)
    }

    /// All reserved and contextual keywords, in declaration order.
    pub fn keywords() -> &'static [Self] {
        KEYWORDS
    }

    /// Reverse lookup of a keyword by spelling, ignoring case.
    pub fn from_keyword_text(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .copied()
            .find(|kind| kind.text().is_some_and(|t| t.eq_ignore_ascii_case(text)))
    }

    /// Keywords that name a built-in type.
    pub fn is_predefined_type(self) -> bool {
        use VbKind::*;
        matches!(
            self,
            BOOLEAN_KW
                | BYTE_KW
                | CHAR_KW
                | DATE_KW
                | DECIMAL_KW
                | DOUBLE_KW
                | INTEGER_KW
                | LONG_KW
                | OBJECT_KW
                | SBYTE_KW
                | SHORT_KW
                | SINGLE_KW
                | STRING_KW
                | UINTEGER_KW
                | ULONG_KW
                | USHORT_KW
        )
    }

    /// Check if this is a modifier keyword allowed on declarations
    pub fn is_modifier(self) -> bool {
        use VbKind::*;
        matches!(
            self,
            PUBLIC_KW
                | PRIVATE_KW
                | PROTECTED_KW
                | FRIEND_KW
                | SHARED_KW
                | READ_ONLY_KW
                | WRITE_ONLY_KW
                | CONST_KW
                | DIM_KW
                | STATIC_KW
                | MUST_INHERIT_KW
                | MUST_OVERRIDE_KW
                | NOT_INHERITABLE_KW
                | NOT_OVERRIDABLE_KW
                | OVERRIDABLE_KW
                | OVERRIDES_KW
                | SHADOWS_KW
                | PARTIAL_KW
                | BY_VAL_KW
                | BY_REF_KW
                | OPTIONAL_KW
                | PARAM_ARRAY_KW
        )
    }
}

const KEYWORDS: &[VbKind] = {
    use VbKind::*;
    &[
        ADD_HANDLER_KW, ADDRESS_OF_KW, AND_KW, AND_ALSO_KW, AS_KW, ASSEMBLY_KW, BOOLEAN_KW,
        BY_REF_KW, BY_VAL_KW, BYTE_KW, CALL_KW, CASE_KW, CATCH_KW, CHAR_KW, CLASS_KW, CONST_KW,
        CONTINUE_KW, CTYPE_KW, DATE_KW, DECIMAL_KW, DELEGATE_KW, DIM_KW, DIRECT_CAST_KW, DO_KW,
        DOUBLE_KW, EACH_KW, ELSE_KW, ELSE_IF_KW, END_KW, ENUM_KW, ERROR_KW, EVENT_KW, EXIT_KW,
        FALSE_KW, FINALLY_KW, FOR_KW, FRIEND_KW, FUNCTION_KW, GET_KW, GET_TYPE_KW, GLOBAL_KW,
        GO_TO_KW, HANDLES_KW, IF_KW, IMPLEMENTS_KW, IMPORTS_KW, IN_KW, INHERITS_KW, INTEGER_KW,
        INTERFACE_KW, IS_KW, IS_NOT_KW, LONG_KW, LOOP_KW, ME_KW, MOD_KW, MODULE_KW,
        MUST_INHERIT_KW, MUST_OVERRIDE_KW, MY_BASE_KW, NAMESPACE_KW, NEW_KW, NEXT_KW, NOT_KW,
        NOT_INHERITABLE_KW, NOT_OVERRIDABLE_KW, NOTHING_KW, OBJECT_KW, OF_KW, ON_KW, OPTIONAL_KW,
        OR_KW, OR_ELSE_KW, OVERRIDABLE_KW, OVERRIDES_KW, PARAM_ARRAY_KW, PARTIAL_KW, PRIVATE_KW,
        PROPERTY_KW, PROTECTED_KW, PUBLIC_KW, RAISE_EVENT_KW, READ_ONLY_KW, REMOVE_HANDLER_KW,
        RETURN_KW, SBYTE_KW, SELECT_KW, SET_KW, SHADOWS_KW, SHARED_KW, SHORT_KW, SINGLE_KW,
        STATIC_KW, STEP_KW, STRING_KW, STRUCTURE_KW, SUB_KW, THEN_KW, THROW_KW, TO_KW, TRUE_KW,
        TRY_KW, TRY_CAST_KW, TYPE_OF_KW, UINTEGER_KW, ULONG_KW, UNTIL_KW, USHORT_KW, USING_KW,
        WHILE_KW, WITH_KW, WRITE_ONLY_KW, XOR_KW, OUT_KW, FROM_KW,
    ]
};
