//! Syntax kinds for C# trees.
//!
//! Tokens, reserved keywords, contextual keywords and composite nodes, in
//! that order. The ordering is load-bearing: range checks below compare
//! discriminants.

/// All C# token and node kinds.
///
/// Node shapes (children in order, `?` optional, `*` repeated) are documented
/// next to each node kind; the factory in `syntax::factory::cs` builds exactly
/// these shapes and the converter reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum CsKind {
    // =========================================================================
    // TOKENS
    // =========================================================================
    EOF_TOKEN = 0,
    BAD_TOKEN,
    IDENT,
    NUMERIC_LITERAL,
    STRING_LITERAL,
    CHAR_LITERAL,

    // Punctuation
    L_BRACE,           // {
    R_BRACE,           // }
    L_PAREN,           // (
    R_PAREN,           // )
    L_BRACKET,         // [
    R_BRACKET,         // ]
    SEMICOLON,         // ;
    COMMA,             // ,
    DOT,               // .
    COLON,             // :
    COLON_COLON,       // ::
    QUESTION,          // ?
    QUESTION_QUESTION, // ??
    LT,                // <
    GT,                // >
    LT_LT,             // <<
    GT_GT,             // >> (only synthesized; the lexer yields two `>`)
    LT_EQ,             // <=
    GT_EQ,             // >=
    EQ_EQ,             // ==
    BANG_EQ,           // !=
    EQ,                // =
    PLUS_EQ,           // +=
    MINUS_EQ,          // -=
    STAR_EQ,           // *=
    SLASH_EQ,          // /=
    PERCENT_EQ,        // %=
    AMP_EQ,            // &=
    PIPE_EQ,           // |=
    CARET_EQ,          // ^=
    PLUS,              // +
    MINUS,             // -
    STAR,              // *
    SLASH,             // /
    PERCENT,           // %
    AMP,               // &
    AMP_AMP,           // &&
    PIPE,              // |
    PIPE_PIPE,         // ||
    CARET,             // ^
    BANG,              // !
    TILDE,             // ~
    PLUS_PLUS,         // ++
    MINUS_MINUS,       // --
    FAT_ARROW,         // =>

    // =========================================================================
    // RESERVED KEYWORDS
    // =========================================================================
    ABSTRACT_KW,
    AS_KW,
    BASE_KW,
    BOOL_KW,
    BREAK_KW,
    BYTE_KW,
    CATCH_KW,
    CHAR_KW,
    CHECKED_KW,
    CLASS_KW,
    CONST_KW,
    CONTINUE_KW,
    DECIMAL_KW,
    DEFAULT_KW,
    DELEGATE_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EVENT_KW,
    EXTERN_KW,
    FALSE_KW,
    FINALLY_KW,
    FIXED_KW,
    FLOAT_KW,
    FOR_KW,
    FOREACH_KW,
    GOTO_KW,
    IF_KW,
    IN_KW,
    INT_KW,
    INTERFACE_KW,
    INTERNAL_KW,
    IS_KW,
    LONG_KW,
    NAMESPACE_KW,
    NEW_KW,
    NULL_KW,
    OBJECT_KW,
    OUT_KW,
    OVERRIDE_KW,
    PARAMS_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    REF_KW,
    RETURN_KW,
    SBYTE_KW,
    SEALED_KW,
    SHORT_KW,
    STATIC_KW,
    STRING_KW,
    STRUCT_KW,
    SWITCH_KW,
    THIS_KW,
    THROW_KW,
    TRUE_KW,
    TRY_KW,
    TYPEOF_KW,
    UINT_KW,
    ULONG_KW,
    UNSAFE_KW,
    USHORT_KW,
    USING_KW,
    VIRTUAL_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,

    // =========================================================================
    // CONTEXTUAL KEYWORDS (lexed as IDENT, produced by the factory)
    // =========================================================================
    VAR_KW,
    GET_KW,
    SET_KW,
    ADD_KW,
    REMOVE_KW,
    PARTIAL_KW,
    GLOBAL_KW,
    ASSEMBLY_KW,
    MODULE_KW,
    FIELD_KW,
    METHOD_KW,
    PARAM_KW,
    PROPERTY_KW,
    TYPE_KW,

    // =========================================================================
    // COMPOSITE NODES
    // =========================================================================
    COMPILATION_UNIT,             // (USING_DIRECTIVE | member)*, EOF_TOKEN
    USING_DIRECTIVE,              // using, NAME_EQUALS?, name, ;
    NAME_EQUALS,                  // IDENT, =
    NAMESPACE_DECLARATION,        // namespace, name, {, member*, }
    CLASS_DECLARATION,            // ATTRIBUTE_LIST*, modifier*, class, IDENT, TYPE_PARAMETER_LIST?, BASE_LIST?, {, member*, }
    STRUCT_DECLARATION,           // same shape with struct
    INTERFACE_DECLARATION,        // same shape with interface
    ENUM_DECLARATION,             // ATTRIBUTE_LIST*, modifier*, enum, IDENT, BASE_LIST?, {, (ENUM_MEMBER_DECLARATION ,?)*, }
    ENUM_MEMBER_DECLARATION,      // IDENT, EQUALS_VALUE_CLAUSE?
    DELEGATE_DECLARATION,         // ATTRIBUTE_LIST*, modifier*, delegate, type, IDENT, TYPE_PARAMETER_LIST?, PARAMETER_LIST, ;
    BASE_LIST,                    // :, type (, type)*
    TYPE_PARAMETER_LIST,          // <, TYPE_PARAMETER (, TYPE_PARAMETER)*, >
    TYPE_PARAMETER,               // (in | out)?, IDENT
    METHOD_DECLARATION,           // ATTRIBUTE_LIST*, modifier*, type, IDENT, TYPE_PARAMETER_LIST?, PARAMETER_LIST, (BLOCK | ARROW_EXPRESSION_CLAUSE ; | ;)
    CONSTRUCTOR_DECLARATION,      // ATTRIBUTE_LIST*, modifier*, IDENT, PARAMETER_LIST, CONSTRUCTOR_INITIALIZER?, BLOCK
    CONSTRUCTOR_INITIALIZER,      // :, (base | this), ARGUMENT_LIST
    PROPERTY_DECLARATION,         // ATTRIBUTE_LIST*, modifier*, type, IDENT, ACCESSOR_LIST, (EQUALS_VALUE_CLAUSE ;)?
    ACCESSOR_LIST,                // {, ACCESSOR_DECLARATION*, }
    ACCESSOR_DECLARATION,         // modifier*, (get | set | add | remove), (BLOCK | ;)
    FIELD_DECLARATION,            // ATTRIBUTE_LIST*, modifier*, VARIABLE_DECLARATION, ;
    EVENT_FIELD_DECLARATION,      // ATTRIBUTE_LIST*, modifier*, event, VARIABLE_DECLARATION, ;
    VARIABLE_DECLARATION,         // type, VARIABLE_DECLARATOR (, VARIABLE_DECLARATOR)*
    VARIABLE_DECLARATOR,          // IDENT, EQUALS_VALUE_CLAUSE?
    EQUALS_VALUE_CLAUSE,          // =, expr
    ARROW_EXPRESSION_CLAUSE,      // =>, expr
    PARAMETER_LIST,               // (, PARAMETER (, PARAMETER)*, )
    PARAMETER,                    // ATTRIBUTE_LIST*, modifier*, type?, IDENT, EQUALS_VALUE_CLAUSE?
    ATTRIBUTE_LIST,               // [, ATTRIBUTE_TARGET_SPECIFIER?, ATTRIBUTE (, ATTRIBUTE)*, ]
    ATTRIBUTE_TARGET_SPECIFIER,   // target keyword, :
    ATTRIBUTE,                    // name, ARGUMENT_LIST?

    // Statements
    BLOCK,                        // {, statement*, }
    LOCAL_DECLARATION_STATEMENT,  // const?, VARIABLE_DECLARATION, ;
    EXPRESSION_STATEMENT,         // expr, ;
    IF_STATEMENT,                 // if, (, expr, ), statement, ELSE_CLAUSE?
    ELSE_CLAUSE,                  // else, statement
    WHILE_STATEMENT,              // while, (, expr, ), statement
    DO_STATEMENT,                 // do, statement, while, (, expr, ), ;
    FOR_EACH_STATEMENT,           // foreach, (, type, IDENT, in, expr, ), statement
    FOR_STATEMENT,                // for (...) statement
    SWITCH_STATEMENT,             // switch (...) { ... }
    GOTO_STATEMENT,               // goto IDENT ;
    UNSAFE_STATEMENT,             // unsafe BLOCK
    RETURN_STATEMENT,             // return, expr?, ;
    THROW_STATEMENT,              // throw, expr?, ;
    BREAK_STATEMENT,              // break, ;
    CONTINUE_STATEMENT,           // continue, ;
    TRY_STATEMENT,                // try, BLOCK, CATCH_CLAUSE*, FINALLY_CLAUSE?
    CATCH_CLAUSE,                 // catch, CATCH_DECLARATION?, BLOCK
    CATCH_DECLARATION,            // (, type, IDENT?, )
    FINALLY_CLAUSE,               // finally, BLOCK
    USING_STATEMENT,              // using, (, (VARIABLE_DECLARATION | expr), ), statement
    EMPTY_STATEMENT,              // ;

    // Names, types and expressions
    IDENTIFIER_NAME,              // IDENT
    GENERIC_NAME,                 // IDENT, TYPE_ARGUMENT_LIST
    TYPE_ARGUMENT_LIST,           // <, type (, type)*, >   (`>` may be missing)
    QUALIFIED_NAME,               // name, ., name
    ALIAS_QUALIFIED_NAME,         // IDENTIFIER_NAME, ::, name
    PREDEFINED_TYPE,              // keyword
    ARRAY_TYPE,                   // type, ARRAY_RANK_SPECIFIER+
    ARRAY_RANK_SPECIFIER,         // [, (expr | ,)*, ]
    NULLABLE_TYPE,                // type, ?
    POINTER_TYPE,                 // type, *
    MEMBER_ACCESS_EXPRESSION,     // expr, ., name
    INVOCATION_EXPRESSION,        // expr, ARGUMENT_LIST
    ARGUMENT_LIST,                // (, ARGUMENT (, ARGUMENT)*, )
    BRACKETED_ARGUMENT_LIST,      // [, ARGUMENT (, ARGUMENT)*, ]
    ARGUMENT,                     // (ref | out)?, expr
    ELEMENT_ACCESS_EXPRESSION,    // expr, BRACKETED_ARGUMENT_LIST
    LITERAL_EXPRESSION,           // literal token | true | false | null | default
    DEFAULT_EXPRESSION,           // default, (, type, )
    PARENTHESIZED_EXPRESSION,     // (, expr, )
    BINARY_EXPRESSION,            // expr, operator, expr   (`is`/`as` take a type on the right)
    PREFIX_UNARY_EXPRESSION,      // operator, expr
    POSTFIX_UNARY_EXPRESSION,     // expr, operator
    ASSIGNMENT_EXPRESSION,        // expr, assignment operator, expr
    CONDITIONAL_EXPRESSION,       // expr, ?, expr, :, expr
    CAST_EXPRESSION,              // (, type, ), expr
    OBJECT_CREATION_EXPRESSION,   // new, type, ARGUMENT_LIST?, INITIALIZER_EXPRESSION?
    ARRAY_CREATION_EXPRESSION,    // new, ARRAY_TYPE, INITIALIZER_EXPRESSION?
    INITIALIZER_EXPRESSION,       // {, expr (, expr)*, }
    THIS_EXPRESSION,              // this
    BASE_EXPRESSION,              // base
    TYPE_OF_EXPRESSION,           // typeof, (, type, )
    PARENTHESIZED_LAMBDA_EXPRESSION, // PARAMETER_LIST, =>, (BLOCK | expr)
    SIMPLE_LAMBDA_EXPRESSION,     // PARAMETER, =>, (BLOCK | expr)
    ANONYMOUS_METHOD_EXPRESSION,  // delegate, PARAMETER_LIST?, BLOCK
    CHECKED_EXPRESSION,           // checked, (, expr, )

    #[doc(hidden)]
    __LAST,
}

impl CsKind {
    /// Check if this is a reserved keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a contextual keyword
    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (Self::VAR_KW as u16) && (self as u16) <= (Self::TYPE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::FAT_ARROW as u16)
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
        use CsKind::*;
        let text = match self {
            L_BRACE => "{",
            R_BRACE => "}",
            L_PAREN => "(",
            R_PAREN => ")",
            L_BRACKET => "[",
            R_BRACKET => "]",
            SEMICOLON => ";",
            COMMA => ",",
            DOT => ".",
            COLON => ":",
            COLON_COLON => "::",
            QUESTION => "?",
            QUESTION_QUESTION => "??",
            LT => "<",
            GT => ">",
            LT_LT => "<<",
            GT_GT => ">>",
            LT_EQ => "<=",
            GT_EQ => ">=",
            EQ_EQ => "==",
            BANG_EQ => "!=",
            EQ => "=",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            AMP_EQ => "&=",
            PIPE_EQ => "|=",
            CARET_EQ => "^=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            SLASH => "/",
            PERCENT => "%",
            AMP => "&",
            AMP_AMP => "&&",
            PIPE => "|",
            PIPE_PIPE => "||",
            CARET => "^",
            BANG => "!",
            TILDE => "~",
            PLUS_PLUS => "++",
            MINUS_MINUS => "--",
            FAT_ARROW => "=>",
            ABSTRACT_KW => "abstract",
            AS_KW => "as",
            BASE_KW => "base",
            BOOL_KW => "bool",
            BREAK_KW => "break",
            BYTE_KW => "byte",
            CATCH_KW => "catch",
            CHAR_KW => "char",
            CHECKED_KW => "checked",
            CLASS_KW => "class",
            CONST_KW => "const",
            CONTINUE_KW => "continue",
            DECIMAL_KW => "decimal",
            DEFAULT_KW => "default",
            DELEGATE_KW => "delegate",
            DO_KW => "do",
            DOUBLE_KW => "double",
            ELSE_KW => "else",
            ENUM_KW => "enum",
            EVENT_KW => "event",
            EXTERN_KW => "extern",
            FALSE_KW => "false",
            FINALLY_KW => "finally",
            FIXED_KW => "fixed",
            FLOAT_KW => "float",
            FOR_KW => "for",
            FOREACH_KW => "foreach",
            GOTO_KW => "goto",
            IF_KW => "if",
            IN_KW => "in",
            INT_KW => "int",
            INTERFACE_KW => "interface",
            INTERNAL_KW => "internal",
            IS_KW => "is",
            LONG_KW => "long",
            NAMESPACE_KW => "namespace",
            NEW_KW => "new",
            NULL_KW => "null",
            OBJECT_KW => "object",
            OUT_KW => "out",
            OVERRIDE_KW => "override",
            PARAMS_KW => "params",
            PRIVATE_KW => "private",
            PROTECTED_KW => "protected",
            PUBLIC_KW => "public",
            READONLY_KW => "readonly",
            REF_KW => "ref",
            RETURN_KW => "return",
            SBYTE_KW => "sbyte",
            SEALED_KW => "sealed",
            SHORT_KW => "short",
            STATIC_KW => "static",
            STRING_KW => "string",
            STRUCT_KW => "struct",
            SWITCH_KW => "switch",
            THIS_KW => "this",
            THROW_KW => "throw",
            TRUE_KW => "true",
            TRY_KW => "try",
            TYPEOF_KW => "typeof",
            UINT_KW => "uint",
            ULONG_KW => "ulong",
            UNSAFE_KW => "unsafe",
            USHORT_KW => "ushort",
            USING_KW => "using",
            VIRTUAL_KW => "virtual",
            VOID_KW => "void",
            VOLATILE_KW => "volatile",
            WHILE_KW => "while",
            VAR_KW => "var",
            GET_KW => "get",
            SET_KW => "set",
            ADD_KW => "add",
            REMOVE_KW => "remove",
            PARTIAL_KW => "partial",
            GLOBAL_KW => "global",
            ASSEMBLY_KW => "assembly",
            MODULE_KW => "module",
            FIELD_KW => "field",
            METHOD_KW => "method",
            PARAM_KW => "param",
            PROPERTY_KW => "property",
            TYPE_KW => "type",
            _ => return None,
        };
        Some(text)
    }

    /// All reserved and contextual keywords, in declaration order.
    pub fn keywords() -> &'static [Self] {
        KEYWORDS
    }

    /// Reverse lookup of a keyword (reserved or contextual) by exact spelling.
    pub fn from_keyword_text(text: &str) -> Option<Self> {
        KEYWORDS.iter().copied().find(|kind| kind.text() == Some(text))
    }

    /// Keywords that name a built-in type.
    pub fn is_predefined_type(self) -> bool {
        use CsKind::*;
        matches!(
            self,
            BOOL_KW
                | BYTE_KW
                | CHAR_KW
                | DECIMAL_KW
                | DOUBLE_KW
                | FLOAT_KW
                | INT_KW
                | LONG_KW
                | OBJECT_KW
                | SBYTE_KW
                | SHORT_KW
                | STRING_KW
                | UINT_KW
                | ULONG_KW
                | USHORT_KW
                | VOID_KW
        )
    }

    /// Check if this is a modifier keyword allowed on declarations
    pub fn is_modifier(self) -> bool {
        use CsKind::*;
        matches!(
            self,
            PUBLIC_KW
                | PRIVATE_KW
                | PROTECTED_KW
                | INTERNAL_KW
                | STATIC_KW
                | READONLY_KW
                | CONST_KW
                | ABSTRACT_KW
                | SEALED_KW
                | VIRTUAL_KW
                | OVERRIDE_KW
                | NEW_KW
                | PARTIAL_KW
                | EXTERN_KW
                | UNSAFE_KW
                | VOLATILE_KW
        )
    }
}

const KEYWORDS: &[CsKind] = {
    use CsKind::*;
    &[
        ABSTRACT_KW, AS_KW, BASE_KW, BOOL_KW, BREAK_KW, BYTE_KW, CATCH_KW, CHAR_KW, CHECKED_KW,
        CLASS_KW, CONST_KW, CONTINUE_KW, DECIMAL_KW, DEFAULT_KW, DELEGATE_KW, DO_KW, DOUBLE_KW,
        ELSE_KW, ENUM_KW, EVENT_KW, EXTERN_KW, FALSE_KW, FINALLY_KW, FIXED_KW, FLOAT_KW, FOR_KW,
        FOREACH_KW, GOTO_KW, IF_KW, IN_KW, INT_KW, INTERFACE_KW, INTERNAL_KW, IS_KW, LONG_KW,
        NAMESPACE_KW, NEW_KW, NULL_KW, OBJECT_KW, OUT_KW, OVERRIDE_KW, PARAMS_KW, PRIVATE_KW,
        PROTECTED_KW, PUBLIC_KW, READONLY_KW, REF_KW, RETURN_KW, SBYTE_KW, SEALED_KW, SHORT_KW,
        STATIC_KW, STRING_KW, STRUCT_KW, SWITCH_KW, THIS_KW, THROW_KW, TRUE_KW, TRY_KW,
        TYPEOF_KW, UINT_KW, ULONG_KW, UNSAFE_KW, USHORT_KW, USING_KW, VIRTUAL_KW, VOID_KW,
        VOLATILE_KW, WHILE_KW, VAR_KW, GET_KW, SET_KW, ADD_KW, REMOVE_KW, PARTIAL_KW, GLOBAL_KW,
        ASSEMBLY_KW, MODULE_KW, FIELD_KW, METHOD_KW, PARAM_KW, PROPERTY_KW, TYPE_KW,
    ]
};
